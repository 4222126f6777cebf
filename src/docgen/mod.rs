//! Service Agreement document generation.
//!
//! Turns a stored contract record into a print-ready DOCX, and batches of
//! records into a single ZIP archive. Rendering is pure and deterministic:
//! the same record always produces the same bytes.

pub mod agreement;
pub mod batch;
pub mod dates;
pub mod docx;
pub mod words;

use thiserror::Error;

pub use agreement::render;
pub use batch::{generate_batch, BatchArchive, SkippedContract};

/// Errors surfaced by document generation.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("invalid numeric value for {field}: {value:?}")]
    Formatting { field: &'static str, value: String },

    #[error("failed to assemble document archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("failed to write document payload: {0}")]
    Io(#[from] std::io::Error),
}
