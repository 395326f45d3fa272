//! PDF units, page sizes and layout defaults.

/// Points per inch.
pub const N_PT_PER_INCH: f32 = 72.0;
/// Points per centimetre.
pub const N_PT_PER_CM: f32 = N_PT_PER_INCH / 2.54;

/// A4 width in points.
pub const N_WIDTH_A4_PT: f32 = 21.0 * N_PT_PER_CM;
/// A4 height in points.
pub const N_HEIGHT_A4_PT: f32 = 29.7 * N_PT_PER_CM;
/// US Letter width in points.
pub const N_WIDTH_LETTER_PT: f32 = 8.5 * N_PT_PER_INCH;
/// US Letter height in points.
pub const N_HEIGHT_LETTER_PT: f32 = 11.0 * N_PT_PER_INCH;

pub const N_MARGIN_TOP_PT: f32 = 1.0 * N_PT_PER_CM;
pub const N_MARGIN_BOTTOM_PT: f32 = 2.0 * N_PT_PER_CM;
pub const N_MARGIN_LEFT_PT: f32 = 1.5 * N_PT_PER_CM;
pub const N_MARGIN_RIGHT_PT: f32 = 1.0 * N_PT_PER_CM;

/// Extra leading added to the font size after each written line.
pub const N_SPACING_LINE_PT: f32 = 5.0;
/// Vertical advance after a divider.
pub const N_ADVANCE_DIVIDER_PT: f32 = 20.0;
/// Default divider stroke width.
pub const N_WIDTH_DIVIDER_LINE_PT: f32 = 1.5;

/// Font size of `wr_normal`.
pub const N_SIZE_FONT_NORMAL: f32 = 12.0;
/// Font size of `wr_header1`.
pub const N_SIZE_FONT_HEADER1: f32 = 14.0;

/// Resolution at which one image pixel maps to one point.
pub const N_DPI_IMAGE: f32 = 72.0;

pub const C_LAYER_NAME: &str = "Layer 1";

pub const C_FONT_FILE_NORMAL: &str = "arial.ttf";
pub const C_FONT_FILE_BOLD: &str = "arialbd.ttf";
pub const C_FONT_FILE_ITALIC: &str = "ariali.ttf";
pub const C_FONT_FILE_ITALIC_BOLD: &str = "arialbi.ttf";
