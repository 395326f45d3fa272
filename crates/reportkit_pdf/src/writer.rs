//! Stateful PDF report session on top of `printpdf`.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use printpdf::image_crate::GenericImageView;
use printpdf::{
    Color, Image, ImageTransform, IndirectFontRef, Line, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Rgb,
};

use crate::conf::{
    C_LAYER_NAME, N_ADVANCE_DIVIDER_PT, N_DPI_IMAGE, N_SIZE_FONT_HEADER1, N_SIZE_FONT_NORMAL,
};
use crate::error::{PdfReportError, PdfReportResult};
use crate::spec::{EnumFontVariant, SpecColor, SpecPdfReportOptions};
use crate::util::{
    SpecFontMetrics, convert_pt_to_mm, derive_center_x, derive_centered_origin_x,
    derive_divider_width, derive_image_bottom_y, derive_next_line_y,
};

struct RegisteredFont {
    font_ref: IndirectFontRef,
    metrics: SpecFontMetrics,
}

/// Open PDF document with a current page.
///
/// Coordinates are points from the bottom-left corner of the page.
pub struct PdfReport {
    path_file: PathBuf,
    options: SpecPdfReportOptions,
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    n_pages: usize,
    dict_fonts: BTreeMap<EnumFontVariant, RegisteredFont>,
}

impl PdfReport {
    /// Create a document with one page and register the configured font family.
    pub fn open(
        path: impl AsRef<Path>,
        title: &str,
        options: SpecPdfReportOptions,
    ) -> PdfReportResult<Self> {
        let page_size = options.page_size;
        let (doc, idx_page, idx_layer) = PdfDocument::new(
            title,
            convert_pt_to_mm(page_size.width),
            convert_pt_to_mm(page_size.height),
            C_LAYER_NAME,
        );

        let mut dict_fonts = BTreeMap::new();
        for variant in EnumFontVariant::ALL {
            let path_font = options.fonts.path(variant);
            let v_bytes = std::fs::read(path_font).map_err(|source| PdfReportError::FontRead {
                path: path_font.to_path_buf(),
                source,
            })?;
            let face = ttf_parser::Face::parse(&v_bytes, 0).map_err(|err| {
                PdfReportError::FontParse {
                    path: path_font.to_path_buf(),
                    message: err.to_string(),
                }
            })?;
            let metrics = SpecFontMetrics::from_face(&face);
            let font_ref = doc.add_external_font(v_bytes.as_slice())?;
            dict_fonts.insert(variant, RegisteredFont { font_ref, metrics });
        }

        let layer = doc.get_page(idx_page).get_layer(idx_layer);
        log::debug!(
            "Opened pdf report {} ({:.1} x {:.1} pt)",
            path.as_ref().display(),
            page_size.width,
            page_size.height
        );

        Ok(Self {
            path_file: path.as_ref().to_path_buf(),
            options,
            doc,
            layer,
            n_pages: 1,
            dict_fonts,
        })
    }

    pub fn file_path(&self) -> &Path {
        &self.path_file
    }

    pub fn page_count(&self) -> usize {
        self.n_pages
    }

    /// Start a new page; later drawing targets it.
    pub fn show_page(&mut self) {
        let page_size = self.options.page_size;
        let (idx_page, idx_layer) = self.doc.add_page(
            convert_pt_to_mm(page_size.width),
            convert_pt_to_mm(page_size.height),
            C_LAYER_NAME,
        );
        self.layer = self.doc.get_page(idx_page).get_layer(idx_layer);
        self.n_pages += 1;
    }

    /// Write the document to disk and return its path.
    pub fn save(self) -> PdfReportResult<PathBuf> {
        let file = File::create(&self.path_file)?;
        let mut writer = BufWriter::new(file);
        self.doc.save(&mut writer)?;
        log::debug!(
            "Saved pdf report {} ({} pages)",
            self.path_file.display(),
            self.n_pages
        );
        Ok(self.path_file)
    }

    /// Left margin, or the centre of the printable width.
    pub fn get_x(&self, centered: bool) -> f32 {
        if centered {
            derive_center_x(&self.options.page_size, &self.options.margins)
        } else {
            self.options.margins.left
        }
    }

    /// Top of the printable area.
    pub fn get_y(&self) -> f32 {
        self.options.page_size.height - self.options.margins.top
    }

    /// Width of `text` in points for a registered font.
    pub fn string_width(&self, text: &str, font: EnumFontVariant, font_size: f32) -> f32 {
        self.dict_fonts
            .get(&font)
            .map(|registered| registered.metrics.string_width(text, font_size))
            .unwrap_or(0.0)
    }

    /// Draw one line of text with its baseline at `(x, y)`.
    ///
    /// Returns the start of the next line: `(x, y - (font_size + spacing))`.
    pub fn write(
        &mut self,
        x: f32,
        y: f32,
        text: &str,
        font: EnumFontVariant,
        font_size: f32,
        color: SpecColor,
    ) -> (f32, f32) {
        if let Some(registered) = self.dict_fonts.get(&font) {
            self.layer
                .set_fill_color(Color::Rgb(Rgb::new(color.r, color.g, color.b, None)));
            self.layer.use_text(
                text,
                font_size,
                convert_pt_to_mm(x),
                convert_pt_to_mm(y),
                &registered.font_ref,
            );
        }
        (x, derive_next_line_y(y, font_size, self.options.spacing()))
    }

    /// Body text, 12 pt regular.
    pub fn wr_normal(&mut self, y: f32, text: &str, centered: bool) -> (f32, f32) {
        self.write_preset(y, text, centered, EnumFontVariant::Normal, N_SIZE_FONT_NORMAL)
    }

    /// Heading, 14 pt bold.
    pub fn wr_header1(&mut self, y: f32, text: &str, centered: bool) -> (f32, f32) {
        self.write_preset(y, text, centered, EnumFontVariant::Bold, N_SIZE_FONT_HEADER1)
    }

    fn write_preset(
        &mut self,
        y: f32,
        text: &str,
        centered: bool,
        font: EnumFontVariant,
        font_size: f32,
    ) -> (f32, f32) {
        let x = if centered {
            derive_centered_origin_x(self.get_x(true), self.string_width(text, font, font_size))
        } else {
            self.get_x(false)
        };
        self.write(x, y, text, font, font_size, SpecColor::BLACK)
    }

    /// Horizontal rule between the side margins at `y`, 1.5 pt thick unless
    /// `line_width` is given.
    ///
    /// Returns `(left margin, y - 20)`.
    pub fn wr_divider(&mut self, y: f32, line_width: Option<f32>) -> (f32, f32) {
        let margins = self.options.margins;
        let n_x_end = self.options.page_size.width - margins.right;

        self.layer
            .set_outline_thickness(derive_divider_width(line_width));
        self.layer
            .set_outline_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
        self.layer.add_line(Line {
            points: vec![
                (
                    Point::new(convert_pt_to_mm(margins.left), convert_pt_to_mm(y)),
                    false,
                ),
                (
                    Point::new(convert_pt_to_mm(n_x_end), convert_pt_to_mm(y)),
                    false,
                ),
            ],
            is_closed: false,
        });

        (self.get_x(false), y - N_ADVANCE_DIVIDER_PT)
    }

    /// Draw an image with its top-left corner at `(x, y)`; one pixel is one
    /// point before scaling by `size_percent / 100`.
    ///
    /// A missing file is a no-op.
    pub fn wr_image(
        &mut self,
        x: f32,
        y: f32,
        img_path: impl AsRef<Path>,
        size_percent: f32,
    ) -> PdfReportResult<()> {
        let img_path = img_path.as_ref();
        if !img_path.exists() {
            log::debug!("Image not found, skipped: {}", img_path.display());
            return Ok(());
        }

        let img = printpdf::image_crate::open(img_path)?;
        let (_, n_height_px) = img.dimensions();
        let n_scale = size_percent / 100.0;

        Image::from_dynamic_image(&img).add_to_layer(
            self.layer.clone(),
            ImageTransform {
                translate_x: Some(convert_pt_to_mm(x)),
                translate_y: Some(convert_pt_to_mm(derive_image_bottom_y(
                    y,
                    n_height_px,
                    size_percent,
                ))),
                scale_x: Some(n_scale),
                scale_y: Some(n_scale),
                dpi: Some(N_DPI_IMAGE),
                ..Default::default()
            },
        );
        Ok(())
    }
}
