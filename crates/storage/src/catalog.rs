//! Question catalog sources.
//!
//! The built-in catalog ships inside the binary. A JSON file with the same
//! shape (`id`, `question`, `options`, `correctAnswer`, `category`,
//! `difficulty`) can replace it.

use std::path::{Path, PathBuf};

use quiz_core::model::{CatalogError, QuestionCatalog, QuestionDraft};
use thiserror::Error;

const BUILTIN_CATALOG: &str = include_str!("../assets/questions.json");

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogLoadError {
    #[error("failed to read catalog {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed catalog json: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] CatalogError),
}

/// Parse and validate a catalog from JSON text.
///
/// # Errors
///
/// Returns `CatalogLoadError::Json` for malformed input and
/// `CatalogLoadError::Invalid` if any record fails validation.
pub fn parse_catalog(json: &str) -> Result<QuestionCatalog, CatalogLoadError> {
    let drafts: Vec<QuestionDraft> = serde_json::from_str(json)?;
    Ok(QuestionCatalog::from_drafts(drafts)?)
}

/// The catalog bundled with the application.
///
/// # Errors
///
/// Only fails if the bundled asset itself is broken.
pub fn builtin_catalog() -> Result<QuestionCatalog, CatalogLoadError> {
    parse_catalog(BUILTIN_CATALOG)
}

/// Load a catalog from a JSON file on disk.
///
/// # Errors
///
/// Returns `CatalogLoadError::Io` if the file cannot be read, otherwise the
/// errors of [`parse_catalog`].
pub fn load_catalog_file(path: &Path) -> Result<QuestionCatalog, CatalogLoadError> {
    let json = std::fs::read_to_string(path).map_err(|source| CatalogLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_catalog(&json)
}
