//! DataFrame to XLSX report.

use std::path::{Path, PathBuf};

use polars::prelude::{AnyValue, Column, DataFrame};
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet};

use crate::conf::{
    C_CELL_ERROR_TEXT, EnumAlignmentPreset, EnumFontPreset, N_HEIGHT_ROW_HEADERS,
    N_WIDTH_AUTOFIT_FACTOR, derive_low_border,
};
use crate::error::XlsxReportResult;
use crate::spec::{
    EnumAlignHorizontal, EnumAlignVertical, EnumBorderStyle, EnumCellValue, SpecAlignment,
    SpecCellBorder, SpecFont,
};
use crate::util::{cast_col_num, cast_row_num, estimate_unicode_string_width, sanitize_sheet_name};
use crate::writer::{XlsxReport, derive_report_path, validate_cell_value};

/// Write `df` as a styled report: header row, bottom border, one row per
/// record, autofilter over the written range, autofit columns.
///
/// A new file is written in one pass; an existing workbook is opened as an
/// [`XlsxReport`] so its other sheets and formatting are kept.
///
/// Returns the path of the saved workbook.
pub fn create_dataframe_report(
    df: &DataFrame,
    path: impl AsRef<Path>,
    sheet_name: &str,
) -> XlsxReportResult<PathBuf> {
    let path_file = derive_report_path(path.as_ref());
    if path_file.exists() {
        append_dataframe_report(df, &path_file, sheet_name)?;
    } else {
        write_dataframe_workbook(df, &path_file, sheet_name)?;
    }
    log::debug!(
        "DataFrame report written: {} ({} rows x {} cols)",
        path_file.display(),
        df.height(),
        df.width()
    );
    Ok(path_file)
}

fn write_dataframe_workbook(df: &DataFrame, path_file: &Path, sheet_name: &str) -> XlsxReportResult<()> {
    let l_cols = df.get_columns();
    let alignment_header = derive_header_alignment();
    let fmt_header = derive_rust_xlsx_format(
        EnumFontPreset::Header.spec(),
        &alignment_header,
        &derive_low_border(),
    );
    let fmt_main = derive_rust_xlsx_format(
        EnumFontPreset::Main.spec(),
        EnumAlignmentPreset::Main.spec(),
        &SpecCellBorder::default(),
    );

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sanitize_sheet_name(sheet_name, "_"))?;

    let mut l_width_by_col = vec![0usize; l_cols.len()];
    for (n_idx_col, col) in l_cols.iter().enumerate() {
        let value = EnumCellValue::from(col.name().as_str());
        write_cell_with_format(worksheet, 1, n_idx_col + 1, &value, &fmt_header)?;
        l_width_by_col[n_idx_col] = estimate_unicode_string_width(col.name().as_str());
    }
    worksheet.set_row_height(cast_row_num(1)?, N_HEIGHT_ROW_HEADERS)?;

    for n_idx_row in 0..df.height() {
        let n_row = n_idx_row + 2;
        for (n_idx_col, col) in l_cols.iter().enumerate() {
            let value = derive_record_value(col, n_idx_row)?;
            let value = match validate_cell_value(&value) {
                Ok(()) => value,
                Err(err) => {
                    log::error!("DataFrame cell ({n_row}, {}) failed: {err}", n_idx_col + 1);
                    EnumCellValue::Text(C_CELL_ERROR_TEXT.to_string())
                }
            };
            write_cell_with_format(worksheet, n_row, n_idx_col + 1, &value, &fmt_main)?;
            l_width_by_col[n_idx_col] = usize::max(
                l_width_by_col[n_idx_col],
                estimate_unicode_string_width(&value.to_display_string()),
            );
        }
    }

    if !l_cols.is_empty() {
        worksheet.autofilter(
            0,
            0,
            cast_row_num(df.height() + 1)?,
            cast_col_num(l_cols.len())?,
        )?;
    }
    for (n_idx_col, n_width) in l_width_by_col.into_iter().enumerate() {
        if n_width > 0 {
            worksheet.set_column_width(
                cast_col_num(n_idx_col + 1)?,
                n_width as f64 * N_WIDTH_AUTOFIT_FACTOR,
            )?;
        }
    }

    workbook.save(path_file)?;
    Ok(())
}

fn append_dataframe_report(df: &DataFrame, path_file: &Path, sheet_name: &str) -> XlsxReportResult<()> {
    let mut report = XlsxReport::open(path_file, sheet_name)?;
    let l_cols = df.get_columns();

    let l_headers: Vec<&str> = l_cols.iter().map(|col| col.name().as_str()).collect();
    let n_row_header = report.row();
    report.wr_headers(n_row_header, 1, &l_headers, false);
    report.low_border(n_row_header, 1, l_headers.len() + 1)?;
    report.row_inc(1);

    for n_idx_row in 0..df.height() {
        let n_row = report.row();
        for (n_idx_col, col) in l_cols.iter().enumerate() {
            report.wr(n_row, n_idx_col + 1, derive_record_value(col, n_idx_row)?, None, None);
        }
        report.row_inc(1);
    }

    report.col_filters()?;
    report.col_autofit()?;
    report.save()?;
    report.close();
    Ok(())
}

fn derive_record_value(col: &Column, n_idx_row: usize) -> XlsxReportResult<EnumCellValue> {
    Ok(derive_cell_value_from_any_value(col.get(n_idx_row)?))
}

fn derive_header_alignment() -> SpecAlignment {
    SpecAlignment {
        horizontal: EnumAlignHorizontal::Left,
        vertical: EnumAlignVertical::Center,
        wrap_text: false,
    }
}

fn derive_cell_value_from_any_value(value: AnyValue<'_>) -> EnumCellValue {
    match value {
        AnyValue::Null => EnumCellValue::Empty,
        AnyValue::Boolean(val) => EnumCellValue::Boolean(val),
        AnyValue::String(val) => EnumCellValue::Text(val.to_string()),
        AnyValue::StringOwned(val) => EnumCellValue::Text(val.to_string()),
        AnyValue::UInt8(val) => EnumCellValue::Number(val as f64),
        AnyValue::UInt16(val) => EnumCellValue::Number(val as f64),
        AnyValue::UInt32(val) => EnumCellValue::Number(val as f64),
        AnyValue::UInt64(val) => EnumCellValue::Number(val as f64),
        AnyValue::Int8(val) => EnumCellValue::Number(val as f64),
        AnyValue::Int16(val) => EnumCellValue::Number(val as f64),
        AnyValue::Int32(val) => EnumCellValue::Number(val as f64),
        AnyValue::Int64(val) => EnumCellValue::Number(val as f64),
        AnyValue::Float32(val) => EnumCellValue::Number(val as f64),
        AnyValue::Float64(val) => EnumCellValue::Number(val),
        _ => EnumCellValue::Text(value.to_string()),
    }
}

////////////////////////////////////////////////////////////////////////////////
// #region RustXlsxFormat

/// Write one value at 1-based `(row, column)`.
fn write_cell_with_format(
    worksheet: &mut Worksheet,
    row: usize,
    column: usize,
    value: &EnumCellValue,
    format: &Format,
) -> XlsxReportResult<()> {
    let n_row = cast_row_num(row)?;
    let n_col = cast_col_num(column)?;
    match value {
        EnumCellValue::Empty => {
            worksheet.write_blank(n_row, n_col, format)?;
        }
        EnumCellValue::Text(val) if value.is_formula() => {
            worksheet.write_formula_with_format(n_row, n_col, val.as_str(), format)?;
        }
        EnumCellValue::Text(val) => {
            worksheet.write_string_with_format(n_row, n_col, val, format)?;
        }
        EnumCellValue::Number(val) => {
            worksheet.write_number_with_format(n_row, n_col, *val, format)?;
        }
        EnumCellValue::Boolean(val) => {
            worksheet.write_boolean_with_format(n_row, n_col, *val, format)?;
        }
    }
    Ok(())
}

fn derive_rust_xlsx_format(
    font: &SpecFont,
    alignment: &SpecAlignment,
    border: &SpecCellBorder,
) -> Format {
    let mut format = Format::new()
        .set_font_name(font.name.as_str())
        .set_font_size(font.size);
    if font.bold {
        format = format.set_bold();
    }
    if font.italic {
        format = format.set_italic();
    }
    if let Some(val) = font.color {
        format = format.set_font_color(val);
    }

    format = format
        .set_align(derive_format_align_horizontal(alignment.horizontal))
        .set_align(derive_format_align_vertical(alignment.vertical));
    if alignment.wrap_text {
        format = format.set_text_wrap();
    }

    if let Some(side) = border.top {
        format = format
            .set_border_top(derive_format_border(side.style))
            .set_border_top_color(side.color);
    }
    if let Some(side) = border.bottom {
        format = format
            .set_border_bottom(derive_format_border(side.style))
            .set_border_bottom_color(side.color);
    }
    if let Some(side) = border.left {
        format = format
            .set_border_left(derive_format_border(side.style))
            .set_border_left_color(side.color);
    }
    if let Some(side) = border.right {
        format = format
            .set_border_right(derive_format_border(side.style))
            .set_border_right_color(side.color);
    }

    format
}

fn derive_format_border(style: EnumBorderStyle) -> FormatBorder {
    match style {
        EnumBorderStyle::Thin => FormatBorder::Thin,
        EnumBorderStyle::Medium => FormatBorder::Medium,
        EnumBorderStyle::Thick => FormatBorder::Thick,
        EnumBorderStyle::Dashed => FormatBorder::Dashed,
        EnumBorderStyle::Dotted => FormatBorder::Dotted,
        EnumBorderStyle::Double => FormatBorder::Double,
        EnumBorderStyle::Hair => FormatBorder::Hair,
    }
}

fn derive_format_align_horizontal(align: EnumAlignHorizontal) -> FormatAlign {
    match align {
        EnumAlignHorizontal::General => FormatAlign::General,
        EnumAlignHorizontal::Left => FormatAlign::Left,
        EnumAlignHorizontal::Center => FormatAlign::Center,
        EnumAlignHorizontal::Right => FormatAlign::Right,
        EnumAlignHorizontal::Fill => FormatAlign::Fill,
        EnumAlignHorizontal::Justify => FormatAlign::Justify,
        EnumAlignHorizontal::CenterContinuous => FormatAlign::CenterAcross,
        EnumAlignHorizontal::Distributed => FormatAlign::Distributed,
    }
}

fn derive_format_align_vertical(align: EnumAlignVertical) -> FormatAlign {
    match align {
        EnumAlignVertical::Top => FormatAlign::Top,
        EnumAlignVertical::Center => FormatAlign::VerticalCenter,
        EnumAlignVertical::Bottom => FormatAlign::Bottom,
        EnumAlignVertical::Justify => FormatAlign::VerticalJustify,
        EnumAlignVertical::Distributed => FormatAlign::VerticalDistributed,
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_cell_value_from_any_value() {
        assert_eq!(
            derive_cell_value_from_any_value(AnyValue::Null),
            EnumCellValue::Empty
        );
        assert_eq!(
            derive_cell_value_from_any_value(AnyValue::Boolean(true)),
            EnumCellValue::Boolean(true)
        );
        assert_eq!(
            derive_cell_value_from_any_value(AnyValue::Int32(-3)),
            EnumCellValue::Number(-3.0)
        );
        assert_eq!(
            derive_cell_value_from_any_value(AnyValue::String("x")),
            EnumCellValue::Text("x".to_string())
        );
    }

    #[test]
    fn test_header_format_matches_session_header() {
        let fmt_expected = Format::new()
            .set_font_name("Calibri")
            .set_font_size(10.0)
            .set_bold()
            .set_align(FormatAlign::Left)
            .set_align(FormatAlign::VerticalCenter)
            .set_border_bottom(FormatBorder::Medium)
            .set_border_bottom_color(0x000000);
        assert_eq!(
            derive_rust_xlsx_format(
                EnumFontPreset::Header.spec(),
                &derive_header_alignment(),
                &derive_low_border(),
            ),
            fmt_expected
        );
    }
}
