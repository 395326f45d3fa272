//! PDF report models and options. All lengths are points.

use std::path::{Path, PathBuf};

use crate::conf::{
    C_FONT_FILE_BOLD, C_FONT_FILE_ITALIC, C_FONT_FILE_ITALIC_BOLD, C_FONT_FILE_NORMAL,
    N_HEIGHT_A4_PT, N_HEIGHT_LETTER_PT, N_MARGIN_BOTTOM_PT, N_MARGIN_LEFT_PT,
    N_MARGIN_RIGHT_PT, N_MARGIN_TOP_PT, N_SPACING_LINE_PT, N_WIDTH_A4_PT, N_WIDTH_LETTER_PT,
};

/// Page size (width, height).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpecPageSize {
    pub width: f32,
    pub height: f32,
}

impl SpecPageSize {
    pub const A4: SpecPageSize = SpecPageSize {
        width: N_WIDTH_A4_PT,
        height: N_HEIGHT_A4_PT,
    };
    pub const LETTER: SpecPageSize = SpecPageSize {
        width: N_WIDTH_LETTER_PT,
        height: N_HEIGHT_LETTER_PT,
    };

    /// Same page with the short side as width.
    pub fn portrait(self) -> Self {
        Self {
            width: f32::min(self.width, self.height),
            height: f32::max(self.width, self.height),
        }
    }

    /// Same page with the long side as width.
    pub fn landscape(self) -> Self {
        Self {
            width: f32::max(self.width, self.height),
            height: f32::min(self.width, self.height),
        }
    }
}

impl Default for SpecPageSize {
    fn default() -> Self {
        Self::A4.portrait()
    }
}

/// Page margins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpecPageMargins {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl Default for SpecPageMargins {
    fn default() -> Self {
        Self {
            top: N_MARGIN_TOP_PT,
            bottom: N_MARGIN_BOTTOM_PT,
            left: N_MARGIN_LEFT_PT,
            right: N_MARGIN_RIGHT_PT,
        }
    }
}

/// RGB color, components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpecColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl SpecColor {
    pub const BLACK: SpecColor = SpecColor {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };
}

impl Default for SpecColor {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Registered font variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EnumFontVariant {
    Normal,
    Bold,
    Italic,
    ItalicBold,
}

impl EnumFontVariant {
    pub const ALL: [EnumFontVariant; 4] = [
        EnumFontVariant::Normal,
        EnumFontVariant::Bold,
        EnumFontVariant::Italic,
        EnumFontVariant::ItalicBold,
    ];
}

/// One TrueType file per font variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecFontFamily {
    pub normal: PathBuf,
    pub bold: PathBuf,
    pub italic: PathBuf,
    pub italic_bold: PathBuf,
}

impl SpecFontFamily {
    /// Use the same file for every variant.
    pub fn uniform(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            normal: path.clone(),
            bold: path.clone(),
            italic: path.clone(),
            italic_bold: path,
        }
    }

    pub fn path(&self, variant: EnumFontVariant) -> &Path {
        match variant {
            EnumFontVariant::Normal => &self.normal,
            EnumFontVariant::Bold => &self.bold,
            EnumFontVariant::Italic => &self.italic,
            EnumFontVariant::ItalicBold => &self.italic_bold,
        }
    }
}

impl Default for SpecFontFamily {
    /// Arial files resolved relative to the working directory.
    fn default() -> Self {
        Self {
            normal: PathBuf::from(C_FONT_FILE_NORMAL),
            bold: PathBuf::from(C_FONT_FILE_BOLD),
            italic: PathBuf::from(C_FONT_FILE_ITALIC),
            italic_bold: PathBuf::from(C_FONT_FILE_ITALIC_BOLD),
        }
    }
}

/// Options for opening a [`crate::writer::PdfReport`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecPdfReportOptions {
    pub page_size: SpecPageSize,
    pub margins: SpecPageMargins,
    pub fonts: SpecFontFamily,
    /// Leading added to the font size by `write`.
    pub spacing: Option<f32>,
}

impl SpecPdfReportOptions {
    pub fn spacing(&self) -> f32 {
        self.spacing.unwrap_or(N_SPACING_LINE_PT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a4_orientation() {
        let portrait = SpecPageSize::A4.portrait();
        assert!((portrait.width - 595.27).abs() < 0.01);
        assert!((portrait.height - 841.89).abs() < 0.01);

        let landscape = SpecPageSize::A4.landscape();
        assert_eq!(landscape.width, portrait.height);
        assert_eq!(landscape.height, portrait.width);
        assert_eq!(SpecPageSize::default(), portrait);
    }

    #[test]
    fn test_default_margins_in_points() {
        let margins = SpecPageMargins::default();
        assert!((margins.top - 28.35).abs() < 0.01);
        assert!((margins.bottom - 56.69).abs() < 0.01);
        assert!((margins.left - 42.52).abs() < 0.01);
        assert!((margins.right - 28.35).abs() < 0.01);
    }

    #[test]
    fn test_font_family_paths() {
        let fonts = SpecFontFamily::default();
        assert_eq!(fonts.path(EnumFontVariant::Bold), Path::new("arialbd.ttf"));
        let fonts = SpecFontFamily::uniform("/tmp/x.ttf");
        assert_eq!(fonts.path(EnumFontVariant::ItalicBold), Path::new("/tmp/x.ttf"));
        assert_eq!(SpecPdfReportOptions::default().spacing(), 5.0);
    }
}
