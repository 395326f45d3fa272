//! PDF report error types.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for PDF report operations.
pub type PdfReportResult<T> = std::result::Result<T, PdfReportError>;

/// Errors surfaced by the PDF report toolkit.
#[derive(Debug, Error)]
pub enum PdfReportError {
    /// Font file could not be read.
    #[error("Failed to read font {path}: {source}")]
    FontRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Font file is not a usable TrueType/OpenType face.
    #[error("Failed to parse font {path}: {message}")]
    FontParse { path: PathBuf, message: String },

    /// Document construction or serialization failed.
    #[error("PDF error: {0}")]
    Pdf(#[from] printpdf::Error),

    /// Image decoding failed.
    #[error("Image error: {0}")]
    Image(#[from] printpdf::image_crate::ImageError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
