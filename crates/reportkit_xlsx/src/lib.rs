//! `reportkit_xlsx` v1:
//! Stateful XLSX report builder.
//!
//! Module layout:
//! - `conf`    : constants and style preset tables
//! - `spec`    : style/cell/defined-name models and options
//! - `error`   : crate error type
//! - `util`    : column references and sheet-name helpers
//! - `formula` : `<<ROW>>` / `<<NAME±k>>` formula templating
//! - `writer`  : `XlsxReport` session (umya-spreadsheet read/edit/write)
//! - `frame`   : DataFrame report (rust_xlsxwriter for new files)
pub mod conf;
pub mod error;
pub mod formula;
pub mod frame;
pub mod spec;
pub mod util;
pub mod writer;

pub use conf::{
    EnumAlignmentPreset, EnumFillPreset, EnumFontPreset, N_LEN_EXCEL_CELL_TEXT_MAX,
    N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX, TUP_EXCEL_ILLEGAL,
};
pub use error::{XlsxReportError, XlsxReportResult};
pub use formula::{C_PLACEHOLDER_ROW, resolve_formula};
pub use frame::create_dataframe_report;
pub use spec::{
    EnumAlignHorizontal, EnumAlignVertical, EnumBorderStyle, EnumCellValue,
    EnumColumnIdentifier, SpecAlignment, SpecBorderSide, SpecCellBorder, SpecCellStyle,
    SpecDefinedName, SpecDocProperties, SpecFill, SpecFont, SpecXlsxReportOptions,
};
pub use util::{
    convert_column_letter_to_index, create_cell_reference, create_column_reference,
    sanitize_sheet_name,
};
pub use writer::XlsxReport;
