//! `reportkit_pdf` v1:
//! Stateful PDF report builder.
//!
//! Module layout:
//! - `conf`   : units, page sizes and layout defaults
//! - `spec`   : page/margin/color/font models and options
//! - `error`  : crate error type
//! - `util`   : geometry helpers and font metrics
//! - `writer` : `PdfReport` session (printpdf)
pub mod conf;
pub mod error;
pub mod spec;
pub mod util;
pub mod writer;

pub use conf::{N_PT_PER_CM, N_PT_PER_INCH};
pub use error::{PdfReportError, PdfReportResult};
pub use spec::{
    EnumFontVariant, SpecColor, SpecFontFamily, SpecPageMargins, SpecPageSize,
    SpecPdfReportOptions,
};
pub use writer::PdfReport;
