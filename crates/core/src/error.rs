use thiserror::Error;

use crate::memory::MemoryError;
use crate::model::{CatalogError, PreferenceParseError, UnknownFilterValue};
use crate::quiz::QuizError;

/// Any failure raised by the domain crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Quiz(#[from] QuizError),

    #[error(transparent)]
    Memory(#[from] MemoryError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Filter(#[from] UnknownFilterValue),

    #[error(transparent)]
    Preference(#[from] PreferenceParseError),
}
