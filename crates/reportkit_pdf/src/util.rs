//! Geometry helpers and font metrics.

use std::collections::HashMap;

use printpdf::{Mm, Pt};
use ttf_parser::{Face, GlyphId};

use crate::conf::N_WIDTH_DIVIDER_LINE_PT;
use crate::spec::{SpecPageMargins, SpecPageSize};

////////////////////////////////////////////////////////////////////////////////
// #region Geometry

/// Convert points to the millimetres the drawing layer expects.
pub fn convert_pt_to_mm(pt: f32) -> Mm {
    Mm::from(Pt(pt))
}

/// Horizontal centre of the area between the side margins.
pub fn derive_center_x(page_size: &SpecPageSize, margins: &SpecPageMargins) -> f32 {
    (page_size.width - margins.left - margins.right) / 2.0 + margins.left
}

/// Start x for text of `text_width` centred on `center_x`.
pub fn derive_centered_origin_x(center_x: f32, text_width: f32) -> f32 {
    center_x - text_width / 2.0
}

/// Baseline of the next line after writing at `y`.
pub fn derive_next_line_y(y: f32, font_size: f32, spacing: f32) -> f32 {
    y - (font_size + spacing)
}

/// Bottom edge of an image whose top-left corner sits at `y`.
pub fn derive_image_bottom_y(y: f32, height_px: u32, size_percent: f32) -> f32 {
    y - height_px as f32 * size_percent / 100.0
}

/// Stroke width of a divider; non-positive or non-finite widths fall back
/// to the default.
pub fn derive_divider_width(line_width: Option<f32>) -> f32 {
    match line_width {
        Some(n_width) if n_width.is_finite() && n_width > 0.0 => n_width,
        _ => N_WIDTH_DIVIDER_LINE_PT,
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region FontMetrics

/// Horizontal advances of one font face, keyed by character.
#[derive(Debug, Clone)]
pub struct SpecFontMetrics {
    units_per_em: u16,
    advance_missing: u16,
    dict_advance: HashMap<char, u16>,
}

impl SpecFontMetrics {
    /// Read advances from a TrueType/OpenType face.
    pub fn from_face(face: &Face<'_>) -> Self {
        let mut dict_advance = HashMap::new();
        if let Some(cmap) = face.tables().cmap {
            for subtable in cmap.subtables {
                if !subtable.is_unicode() {
                    continue;
                }
                subtable.codepoints(|n_codepoint| {
                    let Some(chr) = char::from_u32(n_codepoint) else {
                        return;
                    };
                    if let Some(glyph_id) = subtable.glyph_index(n_codepoint) {
                        if let Some(n_advance) = face.glyph_hor_advance(glyph_id) {
                            dict_advance.entry(chr).or_insert(n_advance);
                        }
                    }
                });
            }
        }

        Self {
            units_per_em: face.units_per_em(),
            advance_missing: face.glyph_hor_advance(GlyphId(0)).unwrap_or(0),
            dict_advance,
        }
    }

    /// Width of `text` in points at `font_size`.
    pub fn string_width(&self, text: &str, font_size: f32) -> f32 {
        if self.units_per_em == 0 {
            return 0.0;
        }
        let n_units: u64 = text
            .chars()
            .map(|chr| {
                u64::from(
                    self.dict_advance
                        .get(&chr)
                        .copied()
                        .unwrap_or(self.advance_missing),
                )
            })
            .sum();
        n_units as f32 * font_size / f32::from(self.units_per_em)
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
