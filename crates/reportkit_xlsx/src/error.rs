//! XLSX report error types.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for XLSX report operations.
pub type XlsxReportResult<T> = std::result::Result<T, XlsxReportError>;

/// Errors surfaced by the XLSX report toolkit.
#[derive(Debug, Error)]
pub enum XlsxReportError {
    /// Argument outside its valid domain (column below 1, row 0, ...).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Requested worksheet does not exist in the workbook.
    #[error("Worksheet not found: {0:?}")]
    SheetNotFound(String),

    /// Existing workbook could not be read.
    #[error("Failed to read workbook {path}: {message}")]
    Read {
        /// Workbook path.
        path: PathBuf,
        /// Underlying reader error text.
        message: String,
    },

    /// Workbook serialization failed.
    #[error("Failed to write workbook: {0}")]
    Workbook(#[from] umya_spreadsheet::XlsxError),

    /// DataFrame report or image encoding failed.
    #[error("xlsx write error: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),

    /// DataFrame access failed.
    #[error("DataFrame error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
