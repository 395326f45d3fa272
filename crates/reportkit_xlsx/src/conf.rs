//! XLSX constants and normalized style preset tables.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use crate::spec::{
    EnumAlignHorizontal, EnumAlignVertical, EnumBorderStyle, SpecAlignment, SpecBorderSide,
    SpecCellBorder, SpecFill, SpecFont,
};

/// Excel worksheet maximum row count.
pub const N_NROWS_EXCEL_MAX: usize = 1_048_576;
/// Excel worksheet maximum column count.
pub const N_NCOLS_EXCEL_MAX: usize = 16_384;
/// Excel sheet name maximum length.
pub const N_LEN_EXCEL_SHEET_NAME_MAX: usize = 31;
/// Excel maximum characters in one cell.
pub const N_LEN_EXCEL_CELL_TEXT_MAX: usize = 32_767;
/// Characters not allowed in sheet names.
pub const TUP_EXCEL_ILLEGAL: [&str; 7] = ["*", ":", "?", "/", "\\", "[", "]"];

/// Extension appended to report paths given without one.
pub const C_XLSX_EXTENSION: &str = "xlsx";
/// Worksheet created when the caller does not name one.
pub const C_SHEET_NAME_DEFAULT: &str = "Data";
/// Text stored in a cell whose value could not be written.
pub const C_CELL_ERROR_TEXT: &str = "ERROR";
/// Number format used by scientific cells.
pub const C_NUM_FORMAT_SCIENTIFIC: &str = "0.0E+0";

/// Row height applied by `wr_title`.
pub const N_HEIGHT_ROW_TITLE: f64 = 40.0;
/// Row height applied by `wr_headers`.
pub const N_HEIGHT_ROW_HEADERS: f64 = 35.0;
/// Multiplier from estimated text length to column width.
pub const N_WIDTH_AUTOFIT_FACTOR: f64 = 1.23;
/// Page margin (inches) set by `sheet_head`.
pub const N_MARGIN_SHEET_HEAD_INCH: f64 = 0.4;

/// Named font presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EnumFontPreset {
    /// Report title.
    Title,
    /// Column header.
    Header,
    /// Body text.
    Main,
    /// Small caption text.
    Caption,
}

/// Named alignment presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EnumAlignmentPreset {
    /// Left aligned, vertically centered.
    Main,
}

/// Named fill presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EnumFillPreset {
    /// Solid red.
    Red,
}

static DICT_FONT_PRESETS: Lazy<BTreeMap<EnumFontPreset, SpecFont>> = Lazy::new(|| {
    let cfg_base_font = SpecFont {
        name: "Calibri".to_string(),
        size: 10.0,
        ..Default::default()
    };

    let mut dict_font = BTreeMap::new();
    dict_font.insert(
        EnumFontPreset::Title,
        SpecFont {
            size: 12.0,
            bold: true,
            ..cfg_base_font.clone()
        },
    );
    dict_font.insert(
        EnumFontPreset::Header,
        SpecFont {
            bold: true,
            ..cfg_base_font.clone()
        },
    );
    dict_font.insert(EnumFontPreset::Main, cfg_base_font.clone());
    dict_font.insert(
        EnumFontPreset::Caption,
        SpecFont {
            size: 8.0,
            ..cfg_base_font
        },
    );
    dict_font
});

static DICT_ALIGNMENT_PRESETS: Lazy<BTreeMap<EnumAlignmentPreset, SpecAlignment>> =
    Lazy::new(|| {
        let mut dict_alignment = BTreeMap::new();
        dict_alignment.insert(
            EnumAlignmentPreset::Main,
            SpecAlignment {
                horizontal: EnumAlignHorizontal::Left,
                vertical: EnumAlignVertical::Center,
                wrap_text: false,
            },
        );
        dict_alignment
    });

static DICT_FILL_PRESETS: Lazy<BTreeMap<EnumFillPreset, SpecFill>> = Lazy::new(|| {
    let mut dict_fill = BTreeMap::new();
    dict_fill.insert(EnumFillPreset::Red, SpecFill { color: 0xFF0000 });
    dict_fill
});

impl EnumFontPreset {
    /// Preset record for this font.
    pub fn spec(self) -> &'static SpecFont {
        &DICT_FONT_PRESETS[&self]
    }
}

impl EnumAlignmentPreset {
    /// Preset record for this alignment.
    pub fn spec(self) -> &'static SpecAlignment {
        &DICT_ALIGNMENT_PRESETS[&self]
    }
}

impl EnumFillPreset {
    /// Preset record for this fill.
    pub fn spec(self) -> &'static SpecFill {
        &DICT_FILL_PRESETS[&self]
    }
}

/// Border drawn by `low_border`: medium black bottom edge only.
pub fn derive_low_border() -> SpecCellBorder {
    SpecCellBorder {
        bottom: Some(SpecBorderSide {
            style: EnumBorderStyle::Medium,
            color: 0x000000,
        }),
        ..Default::default()
    }
}
