//! Shared XLSX report models: styles, cell values, defined names and options.

use crate::conf::{
    C_SHEET_NAME_DEFAULT, N_HEIGHT_ROW_HEADERS, N_HEIGHT_ROW_TITLE, N_WIDTH_AUTOFIT_FACTOR,
};

////////////////////////////////////////////////////////////////////////////////
// #region StyleSpecification

/// Horizontal alignment types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EnumAlignHorizontal {
    /// Excel default (text left, numbers right).
    #[default]
    General,
    Left,
    Center,
    Right,
    Fill,
    Justify,
    /// Center across the selection of adjacent cells.
    CenterContinuous,
    Distributed,
}

/// Vertical alignment types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EnumAlignVertical {
    Top,
    Center,
    #[default]
    Bottom,
    Justify,
    Distributed,
}

/// Cell alignment record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SpecAlignment {
    /// Horizontal alignment.
    pub horizontal: EnumAlignHorizontal,
    /// Vertical alignment.
    pub vertical: EnumAlignVertical,
    /// Wrap text inside the cell.
    pub wrap_text: bool,
}

/// Cell font record.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecFont {
    /// Font family name.
    pub name: String,
    /// Font size in points.
    pub size: f64,
    /// Bold style.
    pub bold: bool,
    /// Italic style.
    pub italic: bool,
    /// Font color as `0xRRGGBB`; `None` keeps the theme color.
    pub color: Option<u32>,
}

impl Default for SpecFont {
    fn default() -> Self {
        Self {
            name: "Calibri".to_string(),
            size: 11.0,
            bold: false,
            italic: false,
            color: None,
        }
    }
}

/// Solid background fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpecFill {
    /// Fill color as `0xRRGGBB`.
    pub color: u32,
}

/// Border line styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumBorderStyle {
    Thin,
    Medium,
    Thick,
    Dashed,
    Dotted,
    Double,
    Hair,
}

/// One border edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpecBorderSide {
    /// Line style.
    pub style: EnumBorderStyle,
    /// Line color as `0xRRGGBB`.
    pub color: u32,
}

/// Border tuple for top/bottom/left/right; `None` means no line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SpecCellBorder {
    pub top: Option<SpecBorderSide>,
    pub bottom: Option<SpecBorderSide>,
    pub left: Option<SpecBorderSide>,
    pub right: Option<SpecBorderSide>,
}

/// Complete style attached to one cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecCellStyle {
    pub font: SpecFont,
    pub alignment: SpecAlignment,
    pub fill: Option<SpecFill>,
    pub border: SpecCellBorder,
    /// Number format code.
    pub num_format: Option<String>,
    /// Explicit protection lock; `None` keeps the workbook default.
    pub locked: Option<bool>,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region CellSpecification

/// Normalized cell value.
///
/// `Text` starting with `=` is emitted as a formula when the workbook is saved.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EnumCellValue {
    /// Missing/blank value.
    #[default]
    Empty,
    /// Text value.
    Text(String),
    /// Numeric value.
    Number(f64),
    /// Boolean value.
    Boolean(bool),
}

impl EnumCellValue {
    /// Whether the cell carries no value.
    pub fn is_empty(&self) -> bool {
        matches!(self, EnumCellValue::Empty)
    }

    /// Whether the value is a formula string.
    pub fn is_formula(&self) -> bool {
        matches!(self, EnumCellValue::Text(s) if s.starts_with('='))
    }

    /// Text shown for the value, used for width estimation.
    pub fn to_display_string(&self) -> String {
        match self {
            EnumCellValue::Empty => String::new(),
            EnumCellValue::Text(s) => s.clone(),
            EnumCellValue::Number(n) => n.to_string(),
            EnumCellValue::Boolean(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        }
    }
}

impl From<&str> for EnumCellValue {
    fn from(value: &str) -> Self {
        EnumCellValue::Text(value.to_string())
    }
}

impl From<String> for EnumCellValue {
    fn from(value: String) -> Self {
        EnumCellValue::Text(value)
    }
}

impl From<f64> for EnumCellValue {
    fn from(value: f64) -> Self {
        EnumCellValue::Number(value)
    }
}

impl From<i64> for EnumCellValue {
    fn from(value: i64) -> Self {
        EnumCellValue::Number(value as f64)
    }
}

impl From<i32> for EnumCellValue {
    fn from(value: i32) -> Self {
        EnumCellValue::Number(value as f64)
    }
}

impl From<bool> for EnumCellValue {
    fn from(value: bool) -> Self {
        EnumCellValue::Boolean(value)
    }
}

impl<T: Into<EnumCellValue>> From<Option<T>> for EnumCellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(EnumCellValue::Empty, Into::into)
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetSpecification

/// Column selector for page setup calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumColumnIdentifier {
    /// 1-based column index.
    Index(usize),
    /// Column letters, e.g. `"F"`.
    Letter(String),
}

impl From<usize> for EnumColumnIdentifier {
    fn from(value: usize) -> Self {
        EnumColumnIdentifier::Index(value)
    }
}

impl From<&str> for EnumColumnIdentifier {
    fn from(value: &str) -> Self {
        EnumColumnIdentifier::Letter(value.to_string())
    }
}

/// Workbook-level defined name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecDefinedName {
    pub name: String,
    /// Target formula without the leading `=`, e.g. `Data!$D$4`.
    pub refers_to: String,
}

/// Workbook document properties.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecDocProperties {
    pub title: Option<String>,
    pub subject: Option<String>,
    pub author: Option<String>,
    pub company: Option<String>,
    pub comment: Option<String>,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ReportOptions

/// Options for opening an [`crate::writer::XlsxReport`].
#[derive(Debug, Clone, PartialEq)]
pub struct SpecXlsxReportOptions {
    /// Worksheet selected (and created if absent) on open.
    pub sheet_name: String,
    /// Multiplier from estimated text length to column width in `col_autofit`.
    pub width_autofit_factor: f64,
    /// Row height applied by `wr_title`.
    pub height_row_title: f64,
    /// Row height applied by `wr_headers`.
    pub height_row_headers: f64,
}

impl Default for SpecXlsxReportOptions {
    fn default() -> Self {
        Self {
            sheet_name: C_SHEET_NAME_DEFAULT.to_string(),
            width_autofit_factor: N_WIDTH_AUTOFIT_FACTOR,
            height_row_title: N_HEIGHT_ROW_TITLE,
            height_row_headers: N_HEIGHT_ROW_HEADERS,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_value_conversions() {
        assert_eq!(EnumCellValue::from("a"), EnumCellValue::Text("a".to_string()));
        assert_eq!(EnumCellValue::from(3), EnumCellValue::Number(3.0));
        assert_eq!(EnumCellValue::from(true), EnumCellValue::Boolean(true));
        assert_eq!(EnumCellValue::from(None::<f64>), EnumCellValue::Empty);
        assert!(EnumCellValue::from("=SUM(A1:A3)").is_formula());
        assert!(!EnumCellValue::from("SUM").is_formula());
    }
}
