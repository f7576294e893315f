#![forbid(unsafe_code)]

pub mod deferred;
pub mod error;
pub mod memory;
pub mod model;
pub mod quiz;
pub mod shuffle;
pub mod time;

pub use deferred::{Deferred, Generation, GenerationCounter};
pub use error::Error;
pub use time::Clock;
