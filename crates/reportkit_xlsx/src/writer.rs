//! Stateful XLSX report session.
//!
//! The session edits an `umya_spreadsheet` workbook in place: an existing file
//! is read with its styles, dimensions, defined names, print setup, images and
//! document properties, and every [`XlsxReport::save`] writes all of it back.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use umya_spreadsheet::structs::drawing::spreadsheet::MarkerType;
use umya_spreadsheet::{
    Border, BorderStyleValues, Break, Cell, CellRawValue, Color, HorizontalAlignmentValues,
    Image as SheetImage, Spreadsheet, Style, VerticalAlignmentValues, Worksheet,
};

use crate::conf::{
    C_CELL_ERROR_TEXT, C_NUM_FORMAT_SCIENTIFIC, C_XLSX_EXTENSION, EnumAlignmentPreset,
    EnumFontPreset, N_LEN_EXCEL_CELL_TEXT_MAX, N_MARGIN_SHEET_HEAD_INCH, N_NCOLS_EXCEL_MAX,
    derive_low_border,
};
use crate::error::{XlsxReportError, XlsxReportResult};
use crate::formula::resolve_formula;
use crate::spec::{
    EnumAlignHorizontal, EnumAlignVertical, EnumBorderStyle, EnumCellValue,
    EnumColumnIdentifier, SpecAlignment, SpecBorderSide, SpecCellBorder, SpecCellStyle,
    SpecDefinedName, SpecDocProperties, SpecFill, SpecFont, SpecXlsxReportOptions,
};
use crate::util::{
    cast_col_num, cast_row_num, cast_sheet_coordinate, convert_column_letter_to_index,
    create_absolute_reference, create_cell_reference, create_column_reference,
    create_sheet_identifier, estimate_unicode_string_width, quote_sheet_name,
    sanitize_sheet_name,
};

const C_DEFINED_NAME_PRINT_AREA: &str = "_xlnm.Print_Area";
const C_DEFINED_NAME_PRINT_TITLES: &str = "_xlnm.Print_Titles";

/// Open XLSX report with a current sheet and a row cursor.
pub struct XlsxReport {
    path_file: PathBuf,
    options: SpecXlsxReportOptions,
    book: Spreadsheet,
    idx_sheet_current: usize,
    row: usize,
    if_modified: bool,
    if_closed: bool,
}

impl XlsxReport {
    /// Open (or create) the report at `path` and select `sheet_name`.
    ///
    /// `.xlsx` is appended when `path` has no extension. A missing file is
    /// created on disk immediately.
    pub fn open(path: impl AsRef<Path>, sheet_name: &str) -> XlsxReportResult<Self> {
        Self::open_with_options(
            path,
            SpecXlsxReportOptions {
                sheet_name: sheet_name.to_string(),
                ..Default::default()
            },
        )
    }

    /// Open (or create) the report at `path` using explicit options.
    ///
    /// An existing file is never written here; a sheet created for it is kept
    /// in memory until [`Self::save`].
    pub fn open_with_options(
        path: impl AsRef<Path>,
        options: SpecXlsxReportOptions,
    ) -> XlsxReportResult<Self> {
        let path_file = derive_report_path(path.as_ref());
        let c_sheet_name = sanitize_sheet_name(&options.sheet_name, "_");

        let if_exists = path_file.exists();
        let mut book = if if_exists {
            umya_spreadsheet::reader::xlsx::read(&path_file).map_err(|err| {
                XlsxReportError::Read {
                    path: path_file.clone(),
                    message: err.to_string(),
                }
            })?
        } else {
            create_workbook(&c_sheet_name)?
        };

        let (idx_sheet_current, if_sheet_created) = match find_sheet_index(&book, &c_sheet_name)
        {
            Some(n_idx) => (n_idx, false),
            None => {
                book.new_sheet(c_sheet_name.clone())
                    .map_err(derive_workbook_error)?;
                (book.get_sheet_count() - 1, true)
            }
        };

        let mut report = Self {
            path_file,
            options,
            book,
            idx_sheet_current,
            row: 1,
            if_modified: if_sheet_created,
            if_closed: false,
        };

        if !if_exists {
            report.save()?;
        }
        log::debug!(
            "Opened xlsx report {} (sheet {c_sheet_name:?}, existing={if_exists}, created={if_sheet_created})",
            report.path_file.display()
        );
        Ok(report)
    }

    /// Report file path (with extension resolved).
    pub fn file_path(&self) -> &Path {
        &self.path_file
    }

    /// Write the workbook to [`Self::file_path`].
    pub fn save(&mut self) -> XlsxReportResult<()> {
        umya_spreadsheet::writer::xlsx::write(&self.book, &self.path_file)?;
        self.if_modified = false;
        log::debug!(
            "Saved xlsx report {} ({} sheets)",
            self.path_file.display(),
            self.book.get_sheet_count()
        );
        Ok(())
    }

    /// End the session without saving pending changes.
    pub fn close(mut self) {
        self.if_closed = true;
    }

    /// Workbook document properties; unset fields are `None`.
    pub fn properties(&self) -> SpecDocProperties {
        let properties = self.book.get_properties();
        let derive_field = |val: &str| (!val.is_empty()).then(|| val.to_string());
        SpecDocProperties {
            title: derive_field(properties.get_title()),
            subject: derive_field(properties.get_subject()),
            author: derive_field(properties.get_creator()),
            company: derive_field(properties.get_company()),
            comment: derive_field(properties.get_description()),
        }
    }

    /// Replace workbook document properties.
    pub fn set_properties(&mut self, properties: SpecDocProperties) {
        let target = self.book.get_properties_mut();
        target.set_title(properties.title.unwrap_or_default());
        target.set_subject(properties.subject.unwrap_or_default());
        target.set_creator(properties.author.unwrap_or_default());
        target.set_company(properties.company.unwrap_or_default());
        target.set_description(properties.comment.unwrap_or_default());
        self.if_modified = true;
    }

    ////////////////////////////////////////////////////////////////////////////
    // #region RowCursor

    /// Current row cursor (1-based).
    pub fn row(&self) -> usize {
        self.row
    }

    /// Move the row cursor.
    pub fn set_row(&mut self, row: usize) {
        self.row = row;
    }

    /// Advance the row cursor by `number`.
    pub fn row_inc(&mut self, number: usize) {
        self.row += number;
    }

    // #endregion
    ////////////////////////////////////////////////////////////////////////////
    // #region Geometry

    /// Set height (points) of a row.
    pub fn row_height(&mut self, row: usize, height: f64) -> XlsxReportResult<()> {
        let n_row = cast_row_num(row)? + 1;
        self.sheet_mut()?
            .get_row_dimension_mut(&n_row)
            .set_height(height);
        self.if_modified = true;
        Ok(())
    }

    /// Set width (character units) of a column.
    pub fn col_width(&mut self, column: usize, width: f64) -> XlsxReportResult<()> {
        let n_col = u32::from(cast_col_num(column)?) + 1;
        self.sheet_mut()?
            .get_column_dimension_by_number_mut(&n_col)
            .set_width(width);
        self.if_modified = true;
        Ok(())
    }

    /// Size every non-empty column of the current sheet to its longest value.
    pub fn col_autofit(&mut self) -> XlsxReportResult<()> {
        let n_factor = self.options.width_autofit_factor;

        let mut dict_width_by_col: BTreeMap<u32, usize> = BTreeMap::new();
        if let Some(sheet) = self.sheet() {
            for cell in sheet.get_cell_collection() {
                let n_col = *cell.get_coordinate().get_col_num();
                let n_width =
                    estimate_unicode_string_width(&derive_cell_value(cell).to_display_string());
                let n_width_max = dict_width_by_col.entry(n_col).or_insert(0);
                *n_width_max = usize::max(*n_width_max, n_width);
            }
        }

        let sheet = self.sheet_mut()?;
        for (n_col, n_width) in dict_width_by_col {
            if n_width > 0 {
                sheet
                    .get_column_dimension_by_number_mut(&n_col)
                    .set_width(n_width as f64 * n_factor);
            }
        }
        self.if_modified = true;
        Ok(())
    }

    /// Set an autofilter from `A1` to the last used column and row.
    pub fn col_filters(&mut self) -> XlsxReportResult<()> {
        let sheet = self.sheet_mut()?;
        let (n_col_max, n_row_max) = sheet.get_highest_column_and_row();
        let c_range = format!(
            "A1:{}",
            create_cell_reference(n_row_max.max(1) as usize, n_col_max.max(1) as usize)?
        );
        sheet.set_auto_filter(c_range);
        self.if_modified = true;
        Ok(())
    }

    // #endregion
    ////////////////////////////////////////////////////////////////////////////
    // #region Sheets

    /// Names of all worksheets, in workbook order.
    pub fn sheet_list(&self) -> Vec<String> {
        self.book
            .get_sheet_collection_no_check()
            .iter()
            .map(|sheet| sheet.get_name().to_string())
            .collect()
    }

    /// Name of the current worksheet.
    pub fn sheet_current(&self) -> &str {
        self.book
            .get_sheet_collection_no_check()
            .get(self.idx_sheet_current)
            .map(Worksheet::get_name)
            .unwrap_or_default()
    }

    /// Make an existing worksheet current.
    pub fn sheet_select(&mut self, sheet_name: &str) -> XlsxReportResult<()> {
        self.idx_sheet_current = find_sheet_index(&self.book, sheet_name)
            .ok_or_else(|| XlsxReportError::SheetNotFound(sheet_name.to_string()))?;
        Ok(())
    }

    /// Create a worksheet, make it current and return its final name.
    ///
    /// Illegal characters are replaced and clashing names get a numeric suffix.
    pub fn sheet_new(&mut self, sheet_name: &str) -> XlsxReportResult<String> {
        let c_sheet_name = self.derive_unique_sheet_name(&sanitize_sheet_name(sheet_name, "_"));
        self.book
            .new_sheet(c_sheet_name.clone())
            .map_err(derive_workbook_error)?;
        self.idx_sheet_current = self.book.get_sheet_count() - 1;
        self.if_modified = true;
        Ok(c_sheet_name)
    }

    fn derive_unique_sheet_name(&self, name: &str) -> String {
        let if_taken = |candidate: &str| find_sheet_index(&self.book, candidate).is_some();
        if !if_taken(name) {
            return name.to_string();
        }

        let mut n_idx = 2usize;
        loop {
            let candidate = create_sheet_identifier(name, n_idx);
            if !if_taken(&candidate) {
                return candidate;
            }
            n_idx += 1;
        }
    }

    fn sheet(&self) -> Option<&Worksheet> {
        self.book
            .get_sheet_collection_no_check()
            .get(self.idx_sheet_current)
    }

    fn sheet_mut(&mut self) -> XlsxReportResult<&mut Worksheet> {
        let n_idx = self.idx_sheet_current;
        self.book
            .get_sheet_mut(&n_idx)
            .ok_or_else(|| XlsxReportError::SheetNotFound(format!("#{n_idx}")))
    }

    // #endregion
    ////////////////////////////////////////////////////////////////////////////
    // #region CellAccess

    /// Value of a cell in the current sheet (`Empty` when unset).
    ///
    /// Formulas read back as text starting with `=`.
    pub fn rd(&self, row: usize, column: usize) -> EnumCellValue {
        let Ok(coordinate) = cast_sheet_coordinate(row, column) else {
            return EnumCellValue::Empty;
        };
        self.sheet()
            .and_then(|sheet| sheet.get_cell(coordinate))
            .map(derive_cell_value)
            .unwrap_or_default()
    }

    /// Style of a cell in the current sheet, if the cell exists.
    pub fn style(&self, row: usize, column: usize) -> Option<SpecCellStyle> {
        let coordinate = cast_sheet_coordinate(row, column).ok()?;
        self.sheet()
            .and_then(|sheet| sheet.get_cell(coordinate))
            .map(|cell| derive_cell_style(cell.get_style()))
    }

    /// Width of a column in the current sheet, if one is set.
    pub fn column_width(&self, column: usize) -> Option<f64> {
        let n_col = u32::from(cast_col_num(column).ok()?) + 1;
        self.sheet()?
            .get_column_dimension_by_number(&n_col)
            .map(|dimension| *dimension.get_width())
    }

    /// Write a value with font and alignment (main presets when `None`).
    ///
    /// Never fails: invalid coordinates are logged and skipped, and a value the
    /// workbook cannot hold is logged and replaced by the text `"ERROR"`.
    /// Fill, border, number format and protection of the cell are kept.
    pub fn wr(
        &mut self,
        row: usize,
        column: usize,
        value: impl Into<EnumCellValue>,
        font: Option<&SpecFont>,
        alignment: Option<&SpecAlignment>,
    ) {
        let value = value.into();
        let coordinate = match cast_sheet_coordinate(row, column) {
            Ok(coordinate) => coordinate,
            Err(err) => {
                log::error!("wr({row}, {column}) skipped: {err}");
                return;
            }
        };

        let value = match validate_cell_value(&value) {
            Ok(()) => value,
            Err(err) => {
                log::error!("wr({row}, {column}) failed, writing {C_CELL_ERROR_TEXT:?}: {err}");
                EnumCellValue::Text(C_CELL_ERROR_TEXT.to_string())
            }
        };

        let sheet = match self.sheet_mut() {
            Ok(sheet) => sheet,
            Err(err) => {
                log::error!("wr({row}, {column}) skipped: {err}");
                return;
            }
        };
        let cell = sheet.get_cell_mut(coordinate);
        write_cell_value(cell, &value);
        let style = cell.get_style_mut();
        apply_font(style, font.unwrap_or(EnumFontPreset::Main.spec()));
        apply_alignment(
            style,
            alignment.unwrap_or(EnumAlignmentPreset::Main.spec()),
        );
        self.if_modified = true;
    }

    /// Write a title cell and make its row taller.
    pub fn wr_title(&mut self, row: usize, column: usize, value: &str) {
        self.wr(
            row,
            column,
            value,
            Some(EnumFontPreset::Title.spec()),
            Some(EnumAlignmentPreset::Main.spec()),
        );
        let n_height = self.options.height_row_title;
        if let Err(err) = self.row_height(row, n_height) {
            log::error!("wr_title({row}, {column}) row height skipped: {err}");
        }
    }

    /// Write a header cell (left/center aligned, optional wrap).
    pub fn wr_header(&mut self, row: usize, column: usize, value: &str, wrap_text: bool) {
        let alignment = SpecAlignment {
            horizontal: EnumAlignHorizontal::Left,
            vertical: EnumAlignVertical::Center,
            wrap_text,
        };
        self.wr(
            row,
            column,
            value,
            Some(EnumFontPreset::Header.spec()),
            Some(&alignment),
        );
    }

    /// Write consecutive header cells from `column_init` and make the row taller.
    pub fn wr_headers<S: AsRef<str>>(
        &mut self,
        row: usize,
        column_init: usize,
        headers: &[S],
        wrap_text: bool,
    ) {
        for (n_offset, header) in headers.iter().enumerate() {
            self.wr_header(row, column_init + n_offset, header.as_ref(), wrap_text);
        }
        let n_height = self.options.height_row_headers;
        if let Err(err) = self.row_height(row, n_height) {
            log::error!("wr_headers({row}, {column_init}) row height skipped: {err}");
        }
    }

    /// Write a number shown in scientific notation (`0.0E+0`).
    pub fn wr_sci_number(&mut self, row: usize, column: usize, value: f64) {
        self.wr(row, column, value, None, None);
        if let Err(err) = self.style_cell(row, column, |style| {
            style
                .get_number_format_mut()
                .set_format_code(C_NUM_FORMAT_SCIENTIFIC);
        }) {
            log::error!("wr_sci_number({row}, {column}) format skipped: {err}");
        }
    }

    /// Resolve a formula template for `row` and write it to `(row, column)`.
    ///
    /// Returns the resolved formula.
    pub fn wr_formula<S: AsRef<str>>(
        &mut self,
        row: usize,
        column: usize,
        template: &str,
        columns: &[(S, usize)],
    ) -> XlsxReportResult<String> {
        let c_formula = resolve_formula(template, row, columns)?;
        self.wr(row, column, c_formula.as_str(), None, None);
        Ok(c_formula)
    }

    /// Apply a solid fill to a cell.
    pub fn wr_fill(&mut self, row: usize, column: usize, fill: &SpecFill) -> XlsxReportResult<()> {
        let c_argb = derive_argb(fill.color);
        self.style_cell(row, column, |style| {
            style.set_background_color(c_argb);
        })
    }

    /// Enable text wrapping in a cell.
    pub fn wrap(&mut self, row: usize, column: usize) -> XlsxReportResult<()> {
        self.style_cell(row, column, |style| {
            style.get_alignment_mut().set_wrap_text(true);
        })
    }

    /// Mark a cell as locked.
    pub fn cell_protect(&mut self, row: usize, column: usize) -> XlsxReportResult<()> {
        self.style_cell(row, column, |style| {
            style.get_protection_mut().set_locked(true);
        })
    }

    /// Draw a medium bottom border on `row` for columns `col_ini..col_end_exclusive`.
    ///
    /// Replaces any other border of those cells.
    pub fn low_border(
        &mut self,
        row: usize,
        col_ini: usize,
        col_end_exclusive: usize,
    ) -> XlsxReportResult<()> {
        let border = derive_low_border();
        for n_col in col_ini..col_end_exclusive {
            self.style_cell(row, n_col, |style| apply_border(style, &border))?;
        }
        Ok(())
    }

    /// Define a workbook-level name pointing at a cell of the current sheet.
    ///
    /// An existing workbook-level name with the same text is replaced.
    pub fn set_range_name(&mut self, row: usize, column: usize, name: &str) -> XlsxReportResult<()> {
        cast_sheet_coordinate(row, column)?;
        if name.trim().is_empty() {
            return Err(XlsxReportError::InvalidArgument(
                "defined name must not be empty.".to_string(),
            ));
        }

        let c_target = format!(
            "{}!{}",
            quote_sheet_name(self.sheet_current()),
            create_absolute_reference(row, column)?
        );

        let if_same_global = |defined_name: &umya_spreadsheet::DefinedName| {
            defined_name.get_name() == name && !defined_name.has_local_sheet_id()
        };
        self.book
            .get_defined_names_mut()
            .retain(|defined_name| !if_same_global(defined_name));
        for sheet in self.book.get_sheet_collection_mut().iter_mut() {
            sheet
                .get_defined_names_mut()
                .retain(|defined_name| !if_same_global(defined_name));
        }

        self.sheet_mut()?
            .add_defined_name(name.to_string(), c_target)
            .map_err(derive_workbook_error)?;
        self.if_modified = true;
        Ok(())
    }

    /// Workbook-level defined names, including those read from the file.
    pub fn defined_names(&self) -> Vec<SpecDefinedName> {
        let l_sheet_names = self
            .book
            .get_sheet_collection_no_check()
            .iter()
            .flat_map(|sheet| sheet.get_defined_names());
        self.book
            .get_defined_names()
            .iter()
            .chain(l_sheet_names)
            .filter(|defined_name| !defined_name.has_local_sheet_id())
            .map(|defined_name| SpecDefinedName {
                name: defined_name.get_name().to_string(),
                refers_to: defined_name.get_address(),
            })
            .collect()
    }

    fn style_cell(
        &mut self,
        row: usize,
        column: usize,
        apply: impl FnOnce(&mut Style),
    ) -> XlsxReportResult<()> {
        let coordinate = cast_sheet_coordinate(row, column)?;
        apply(self.sheet_mut()?.get_style_mut(coordinate));
        self.if_modified = true;
        Ok(())
    }

    fn set_sheet_scoped_name(&mut self, name: &str, target: String) -> XlsxReportResult<()> {
        let n_local_id = u32::try_from(self.idx_sheet_current).map_err(|_| {
            XlsxReportError::InvalidArgument(format!(
                "sheet index overflow: {}",
                self.idx_sheet_current
            ))
        })?;

        let sheet = self.sheet_mut()?;
        sheet.get_defined_names_mut().retain(|defined_name| {
            !(defined_name.get_name() == name
                && defined_name.has_local_sheet_id()
                && *defined_name.get_local_sheet_id() == n_local_id)
        });
        sheet
            .add_defined_name(name.to_string(), target)
            .map_err(derive_workbook_error)?;
        if let Some(defined_name) = sheet.get_defined_names_mut().last_mut() {
            defined_name.set_local_sheet_id(n_local_id);
        }
        self.if_modified = true;
        Ok(())
    }

    // #endregion
    ////////////////////////////////////////////////////////////////////////////
    // #region PageSetup

    /// Print columns `A..=column_end`, fitted to one page wide.
    pub fn sheet_print_area(
        &mut self,
        column_end: impl Into<EnumColumnIdentifier>,
    ) -> XlsxReportResult<()> {
        let n_col_end = match column_end.into() {
            EnumColumnIdentifier::Index(n_col) => n_col,
            EnumColumnIdentifier::Letter(c_letters) => convert_column_letter_to_index(&c_letters)?,
        };
        cast_col_num(n_col_end)?;

        let c_target = format!(
            "{}!$A:${}",
            quote_sheet_name(self.sheet_current()),
            create_column_reference(n_col_end, None)?
        );
        self.set_sheet_scoped_name(C_DEFINED_NAME_PRINT_AREA, c_target)?;

        self.sheet_mut()?
            .get_page_setup_mut()
            .set_fit_to_width(1)
            .set_fit_to_height(0);
        Ok(())
    }

    /// Repeat rows `1..=row_fin` on every printed page and tighten margins.
    pub fn sheet_head(&mut self, row_fin: usize) -> XlsxReportResult<()> {
        cast_row_num(row_fin)?;

        let c_target = format!(
            "{}!$1:${row_fin}",
            quote_sheet_name(self.sheet_current())
        );
        self.set_sheet_scoped_name(C_DEFINED_NAME_PRINT_TITLES, c_target)?;

        self.sheet_mut()?
            .get_page_margins_mut()
            .set_top(N_MARGIN_SHEET_HEAD_INCH)
            .set_bottom(N_MARGIN_SHEET_HEAD_INCH)
            .set_header(N_MARGIN_SHEET_HEAD_INCH)
            .set_footer(N_MARGIN_SHEET_HEAD_INCH);
        Ok(())
    }

    /// Start a new printed page at `row`.
    pub fn page_break(&mut self, row: usize) -> XlsxReportResult<()> {
        let n_id = cast_row_num(row)?;
        let row_breaks = self.sheet_mut()?.get_row_breaks_mut();
        if !row_breaks
            .get_break_list()
            .iter()
            .any(|brk| *brk.get_id() == n_id)
        {
            let mut brk = Break::default();
            brk.set_id(n_id)
                .set_max(N_NCOLS_EXCEL_MAX as u32 - 1)
                .set_manual_page_break(true);
            row_breaks.add_break_list(brk);
        }
        self.if_modified = true;
        Ok(())
    }

    /// Anchor an image at a cell, optionally scaled to `(width, height)` pixels.
    pub fn image_insert(
        &mut self,
        row: usize,
        column: usize,
        img_path: impl AsRef<Path>,
        size_px: Option<(u32, u32)>,
    ) -> XlsxReportResult<()> {
        let (n_col, n_row) = cast_sheet_coordinate(row, column)?;
        let img_path = img_path.as_ref();

        let image_native = rust_xlsxwriter::Image::new(img_path)?;
        let (n_width, n_height) = size_px.unwrap_or((
            image_native.width().round() as u32,
            image_native.height().round() as u32,
        ));
        let v_bytes = std::fs::read(img_path)?;
        let c_image_name = img_path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("image.png");

        let mut marker = MarkerType::default();
        marker.set_col(n_col - 1).set_row(n_row - 1);
        let mut image = SheetImage::default();
        image.new_image_with_dimensions(n_height, n_width, c_image_name, v_bytes, marker);

        self.sheet_mut()?.add_image(image);
        self.if_modified = true;
        Ok(())
    }

    // #endregion
    ////////////////////////////////////////////////////////////////////////////
}

impl Drop for XlsxReport {
    fn drop(&mut self) {
        if self.if_modified && !self.if_closed {
            log::warn!(
                "xlsx report {} dropped with unsaved changes",
                self.path_file.display()
            );
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// #region Validation

pub(crate) fn validate_cell_value(value: &EnumCellValue) -> XlsxReportResult<()> {
    match value {
        EnumCellValue::Number(n) if !n.is_finite() => Err(XlsxReportError::InvalidArgument(
            format!("non-finite number: {n}"),
        )),
        EnumCellValue::Text(s) if s.chars().count() > N_LEN_EXCEL_CELL_TEXT_MAX => {
            Err(XlsxReportError::InvalidArgument(format!(
                "text exceeds {N_LEN_EXCEL_CELL_TEXT_MAX} characters"
            )))
        }
        _ => Ok(()),
    }
}

/// Append `.xlsx` when `path` has no extension.
pub fn derive_report_path(path: &Path) -> PathBuf {
    match path.extension() {
        Some(ext) if !ext.is_empty() => path.to_path_buf(),
        _ => path.with_extension(C_XLSX_EXTENSION),
    }
}

fn derive_workbook_error(message: &str) -> XlsxReportError {
    XlsxReportError::InvalidArgument(message.to_string())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Workbook

fn create_workbook(sheet_name: &str) -> XlsxReportResult<Spreadsheet> {
    let mut book = umya_spreadsheet::new_file();
    if find_sheet_index(&book, sheet_name).is_none() {
        book.set_sheet_name(0, sheet_name)
            .map_err(derive_workbook_error)?;
    }
    Ok(book)
}

fn find_sheet_index(book: &Spreadsheet, sheet_name: &str) -> Option<usize> {
    book.get_sheet_collection_no_check()
        .iter()
        .position(|sheet| sheet.get_name() == sheet_name)
}

fn derive_cell_value(cell: &Cell) -> EnumCellValue {
    if cell.is_formula() {
        return EnumCellValue::Text(format!("={}", cell.get_formula()));
    }
    match cell.get_raw_value() {
        CellRawValue::Empty => EnumCellValue::Empty,
        CellRawValue::Numeric(val) => EnumCellValue::Number(*val),
        CellRawValue::Bool(val) => EnumCellValue::Boolean(*val),
        CellRawValue::String(val) | CellRawValue::Lazy(val) => EnumCellValue::Text(val.to_string()),
        CellRawValue::RichText(val) => EnumCellValue::Text(val.get_text().to_string()),
        CellRawValue::Error(val) => EnumCellValue::Text(val.to_string()),
    }
}

fn write_cell_value(cell: &mut Cell, value: &EnumCellValue) {
    match value {
        EnumCellValue::Empty => {
            cell.set_blank();
        }
        EnumCellValue::Text(val) if value.is_formula() => {
            cell.set_blank();
            cell.set_formula(val.trim_start_matches('='));
        }
        EnumCellValue::Text(val) => {
            cell.set_value_string(val.as_str());
        }
        EnumCellValue::Number(val) => {
            cell.set_value_number(*val);
        }
        EnumCellValue::Boolean(val) => {
            cell.set_value_bool(*val);
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region StyleMapping

fn apply_font(style: &mut Style, spec: &SpecFont) {
    let font = style.get_font_mut();
    font.set_name(spec.name.as_str())
        .set_size(spec.size)
        .set_bold(spec.bold)
        .set_italic(spec.italic);
    match spec.color {
        Some(val) => {
            font.get_color_mut().set_argb(derive_argb(val));
        }
        None => {
            font.set_color(Color::default());
        }
    }
}

fn apply_alignment(style: &mut Style, spec: &SpecAlignment) {
    let alignment = style.get_alignment_mut();
    alignment.set_horizontal(derive_horizontal_alignment(spec.horizontal));
    alignment.set_vertical(derive_vertical_alignment(spec.vertical));
    alignment.set_wrap_text(spec.wrap_text);
}

fn apply_border(style: &mut Style, spec: &SpecCellBorder) {
    let borders = style.get_borders_mut();
    borders.set_top(derive_border(spec.top.as_ref()));
    borders.set_bottom(derive_border(spec.bottom.as_ref()));
    borders.set_left(derive_border(spec.left.as_ref()));
    borders.set_right(derive_border(spec.right.as_ref()));
}

fn derive_border(side: Option<&SpecBorderSide>) -> Border {
    let mut border = Border::default();
    if let Some(side) = side {
        border.set_style(derive_border_style(side.style));
        border.get_color_mut().set_argb(derive_argb(side.color));
    }
    border
}

fn derive_cell_style(style: &Style) -> SpecCellStyle {
    let font = style
        .get_font()
        .map(|font| SpecFont {
            name: font.get_name().to_string(),
            size: *font.get_size(),
            bold: *font.get_bold(),
            italic: *font.get_italic(),
            color: derive_rgb(font.get_color().get_argb()),
        })
        .unwrap_or_default();

    let alignment = style
        .get_alignment()
        .map(|alignment| SpecAlignment {
            horizontal: derive_align_horizontal(alignment.get_horizontal()),
            vertical: derive_align_vertical(alignment.get_vertical()),
            wrap_text: *alignment.get_wrap_text(),
        })
        .unwrap_or_default();

    let border = style
        .get_borders()
        .map(|borders| SpecCellBorder {
            top: derive_border_side(borders.get_top()),
            bottom: derive_border_side(borders.get_bottom()),
            left: derive_border_side(borders.get_left()),
            right: derive_border_side(borders.get_right()),
        })
        .unwrap_or_default();

    SpecCellStyle {
        font,
        alignment,
        fill: style
            .get_background_color()
            .and_then(|color| derive_rgb(color.get_argb()))
            .map(|color| SpecFill { color }),
        border,
        num_format: style
            .get_number_format()
            .map(|format| format.get_format_code().to_string())
            .filter(|code| !code.is_empty() && code != "General"),
        locked: style.get_protection().map(|protection| *protection.get_locked()),
    }
}

fn derive_border_side(border: &Border) -> Option<SpecBorderSide> {
    let style = derive_enum_border_style(border.get_style())?;
    Some(SpecBorderSide {
        style,
        color: derive_rgb(border.get_color().get_argb()).unwrap_or(0x000000),
    })
}

/// `0xRRGGBB` to an opaque `AARRGGBB` string.
fn derive_argb(color: u32) -> String {
    format!("FF{:06X}", color & 0x00FF_FFFF)
}

/// Trailing `RRGGBB` of an `AARRGGBB` string; theme colors have none.
fn derive_rgb(argb: &str) -> Option<u32> {
    let n_len = argb.len();
    if n_len < 6 {
        return None;
    }
    u32::from_str_radix(argb.get(n_len - 6..)?, 16).ok()
}

fn derive_border_style(style: EnumBorderStyle) -> BorderStyleValues {
    match style {
        EnumBorderStyle::Thin => BorderStyleValues::Thin,
        EnumBorderStyle::Medium => BorderStyleValues::Medium,
        EnumBorderStyle::Thick => BorderStyleValues::Thick,
        EnumBorderStyle::Dashed => BorderStyleValues::Dashed,
        EnumBorderStyle::Dotted => BorderStyleValues::Dotted,
        EnumBorderStyle::Double => BorderStyleValues::Double,
        EnumBorderStyle::Hair => BorderStyleValues::Hair,
    }
}

/// Closest supported style; `None` when the edge has no line.
fn derive_enum_border_style(style: &BorderStyleValues) -> Option<EnumBorderStyle> {
    match style {
        BorderStyleValues::None => None,
        BorderStyleValues::Thin => Some(EnumBorderStyle::Thin),
        BorderStyleValues::Medium
        | BorderStyleValues::MediumDashed
        | BorderStyleValues::MediumDashDot
        | BorderStyleValues::MediumDashDotDot => Some(EnumBorderStyle::Medium),
        BorderStyleValues::Thick => Some(EnumBorderStyle::Thick),
        BorderStyleValues::Dashed
        | BorderStyleValues::DashDot
        | BorderStyleValues::DashDotDot
        | BorderStyleValues::SlantDashDot => Some(EnumBorderStyle::Dashed),
        BorderStyleValues::Dotted => Some(EnumBorderStyle::Dotted),
        BorderStyleValues::Double => Some(EnumBorderStyle::Double),
        BorderStyleValues::Hair => Some(EnumBorderStyle::Hair),
    }
}

fn derive_horizontal_alignment(align: EnumAlignHorizontal) -> HorizontalAlignmentValues {
    match align {
        EnumAlignHorizontal::General => HorizontalAlignmentValues::General,
        EnumAlignHorizontal::Left => HorizontalAlignmentValues::Left,
        EnumAlignHorizontal::Center => HorizontalAlignmentValues::Center,
        EnumAlignHorizontal::Right => HorizontalAlignmentValues::Right,
        EnumAlignHorizontal::Fill => HorizontalAlignmentValues::Fill,
        EnumAlignHorizontal::Justify => HorizontalAlignmentValues::Justify,
        EnumAlignHorizontal::CenterContinuous => HorizontalAlignmentValues::CenterContinuous,
        EnumAlignHorizontal::Distributed => HorizontalAlignmentValues::Distributed,
    }
}

fn derive_align_horizontal(align: &HorizontalAlignmentValues) -> EnumAlignHorizontal {
    match align {
        HorizontalAlignmentValues::General => EnumAlignHorizontal::General,
        HorizontalAlignmentValues::Left => EnumAlignHorizontal::Left,
        HorizontalAlignmentValues::Center => EnumAlignHorizontal::Center,
        HorizontalAlignmentValues::Right => EnumAlignHorizontal::Right,
        HorizontalAlignmentValues::Fill => EnumAlignHorizontal::Fill,
        HorizontalAlignmentValues::Justify => EnumAlignHorizontal::Justify,
        HorizontalAlignmentValues::CenterContinuous => EnumAlignHorizontal::CenterContinuous,
        HorizontalAlignmentValues::Distributed => EnumAlignHorizontal::Distributed,
    }
}

fn derive_vertical_alignment(align: EnumAlignVertical) -> VerticalAlignmentValues {
    match align {
        EnumAlignVertical::Top => VerticalAlignmentValues::Top,
        EnumAlignVertical::Center => VerticalAlignmentValues::Center,
        EnumAlignVertical::Bottom => VerticalAlignmentValues::Bottom,
        EnumAlignVertical::Justify => VerticalAlignmentValues::Justify,
        EnumAlignVertical::Distributed => VerticalAlignmentValues::Distributed,
    }
}

fn derive_align_vertical(align: &VerticalAlignmentValues) -> EnumAlignVertical {
    match align {
        VerticalAlignmentValues::Top => EnumAlignVertical::Top,
        VerticalAlignmentValues::Center => EnumAlignVertical::Center,
        VerticalAlignmentValues::Bottom => EnumAlignVertical::Bottom,
        VerticalAlignmentValues::Justify => EnumAlignVertical::Justify,
        VerticalAlignmentValues::Distributed => EnumAlignVertical::Distributed,
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_report_path_appends_extension() {
        assert_eq!(
            derive_report_path(Path::new("out/report")),
            PathBuf::from("out/report.xlsx")
        );
        assert_eq!(
            derive_report_path(Path::new("out/report.xlsm")),
            PathBuf::from("out/report.xlsm")
        );
    }

    #[test]
    fn test_validate_cell_value() {
        assert!(validate_cell_value(&EnumCellValue::Number(1.0)).is_ok());
        assert!(validate_cell_value(&EnumCellValue::Number(f64::NAN)).is_err());
        assert!(validate_cell_value(&EnumCellValue::Text("x".repeat(32_768))).is_err());
        assert!(validate_cell_value(&EnumCellValue::Boolean(true)).is_ok());
    }

    #[test]
    fn test_argb_conversion() {
        assert_eq!(derive_argb(0xFF0000), "FFFF0000");
        assert_eq!(derive_argb(0x00_12_AB), "FF0012AB");
        assert_eq!(derive_rgb("FF0012AB"), Some(0x0012AB));
        assert_eq!(derive_rgb(""), None);
    }

    #[test]
    fn test_cell_value_round_trip_through_cell() {
        let mut cell = Cell::default();
        write_cell_value(&mut cell, &EnumCellValue::Number(2.5));
        assert_eq!(derive_cell_value(&cell), EnumCellValue::Number(2.5));

        write_cell_value(&mut cell, &EnumCellValue::from("=SUM(A1:A2)"));
        assert!(cell.is_formula());
        assert_eq!(derive_cell_value(&cell), EnumCellValue::from("=SUM(A1:A2)"));

        write_cell_value(&mut cell, &EnumCellValue::from("TRUE"));
        assert_eq!(derive_cell_value(&cell), EnumCellValue::from("TRUE"));

        write_cell_value(&mut cell, &EnumCellValue::Empty);
        assert_eq!(derive_cell_value(&cell), EnumCellValue::Empty);
    }

    #[test]
    fn test_style_mapping_keeps_font_and_border() {
        let mut style = Style::default();
        apply_font(&mut style, EnumFontPreset::Title.spec());
        apply_border(&mut style, &derive_low_border());

        let spec = derive_cell_style(&style);
        assert_eq!(&spec.font, EnumFontPreset::Title.spec());
        assert_eq!(spec.border, derive_low_border());
    }

    #[test]
    fn test_vertical_bottom_and_general_map_to_library_defaults() {
        assert_eq!(
            derive_horizontal_alignment(EnumAlignHorizontal::General),
            HorizontalAlignmentValues::default()
        );
        assert_eq!(
            derive_vertical_alignment(EnumAlignVertical::Bottom),
            VerticalAlignmentValues::default()
        );
        assert_eq!(
            derive_align_horizontal(&HorizontalAlignmentValues::CenterContinuous),
            EnumAlignHorizontal::CenterContinuous
        );
    }
}
