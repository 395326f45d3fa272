use calamine::{Data, Reader, Xlsx, open_workbook};
use polars::df;
use pretty_assertions::assert_eq;
use tempfile::tempdir;

use reportkit_xlsx::{
    EnumCellValue, EnumFillPreset, EnumFontPreset, SpecDocProperties, XlsxReport,
    XlsxReportError, create_dataframe_report,
};

fn read_cell(path: &std::path::Path, sheet: &str, row: u32, col: u32) -> Option<Data> {
    let mut workbook: Xlsx<_> = open_workbook(path).unwrap();
    let range = workbook.worksheet_range(sheet).unwrap();
    range.get_value((row, col)).cloned()
}

#[test]
fn open_creates_file_with_extension_and_sheet() {
    let dir = tempdir().unwrap();
    let report = XlsxReport::open(dir.path().join("report"), "Summary").unwrap();

    let path_file = dir.path().join("report.xlsx");
    assert!(path_file.exists());
    assert_eq!(report.file_path(), path_file.as_path());
    assert_eq!(report.sheet_list(), vec!["Summary".to_string()]);
    assert_eq!(report.row(), 1);
    report.close();
}

#[test]
fn reopen_reloads_values_and_formulas() {
    let dir = tempdir().unwrap();
    let path_file = dir.path().join("data.xlsx");

    let mut report = XlsxReport::open(&path_file, "Data").unwrap();
    report.wr(1, 1, "name", None, None);
    report.wr(2, 1, 4.5, None, None);
    report.wr(3, 1, true, None, None);
    report.wr(4, 1, "=SUM(A2:A2)", None, None);
    report.save().unwrap();
    report.close();

    let mut report = XlsxReport::open(&path_file, "Data").unwrap();
    assert_eq!(report.rd(1, 1), EnumCellValue::from("name"));
    assert_eq!(report.rd(2, 1), EnumCellValue::Number(4.5));
    assert_eq!(report.rd(3, 1), EnumCellValue::Boolean(true));
    assert_eq!(report.rd(4, 1), EnumCellValue::from("=SUM(A2:A2)"));
    assert_eq!(report.rd(9, 9), EnumCellValue::Empty);

    let c_sheet = report.sheet_new("Other").unwrap();
    assert_eq!(c_sheet, "Other");
    report.save().unwrap();
    report.close();

    let report = XlsxReport::open(&path_file, "Other").unwrap();
    assert_eq!(
        report.sheet_list(),
        vec!["Data".to_string(), "Other".to_string()]
    );
    report.close();
}

#[test]
fn reopen_and_save_keeps_styles_names_and_widths() {
    let dir = tempdir().unwrap();
    let path_file = dir.path().join("keep.xlsx");

    let mut report = XlsxReport::open(&path_file, "Data").unwrap();
    report.wr_title(1, 1, "Title");
    report.set_range_name(1, 1, "Anchor").unwrap();
    report.col_width(1, 30.0).unwrap();
    report.sheet_print_area(4).unwrap();
    report.save().unwrap();
    report.close();

    let mut report = XlsxReport::open(&path_file, "Data").unwrap();
    report.wr(2, 1, "more", None, None);
    report.save().unwrap();
    report.close();

    let report = XlsxReport::open(&path_file, "Data").unwrap();
    let style = report.style(1, 1).unwrap();
    assert_eq!(&style.font, EnumFontPreset::Title.spec());
    assert!(style.font.bold);
    assert_eq!(style.font.size, 12.0);
    assert_eq!(report.column_width(1), Some(30.0));
    assert_eq!(report.rd(2, 1), EnumCellValue::from("more"));
    report.close();

    let book = umya_spreadsheet::reader::xlsx::read(&path_file).unwrap();
    let sheet = book.get_sheet_by_name("Data").unwrap();
    let font = sheet.get_cell((1, 1)).unwrap().get_style().get_font().unwrap();
    assert!(*font.get_bold());
    assert_eq!(*font.get_size(), 12.0);
    assert_eq!(
        sheet
            .get_column_dimension_by_number(&1)
            .map(|col| *col.get_width()),
        Some(30.0)
    );

    let workbook: Xlsx<_> = open_workbook(&path_file).unwrap();
    let l_names = workbook.defined_names();
    assert!(
        l_names
            .iter()
            .any(|(name, formula)| name == "Anchor" && formula.contains("$A$1"))
    );
    assert!(
        l_names
            .iter()
            .any(|(name, formula)| name == "_xlnm.Print_Area" && formula.contains("$A:$D"))
    );
}

#[test]
fn open_existing_file_with_new_sheet_defers_write_until_save() {
    let dir = tempdir().unwrap();
    let path_file = dir.path().join("defer.xlsx");

    let mut report = XlsxReport::open(&path_file, "Data").unwrap();
    report.wr(1, 1, "kept", None, None);
    report.save().unwrap();
    report.close();
    let v_bytes_before = std::fs::read(&path_file).unwrap();

    let report = XlsxReport::open(&path_file, "NewSheet").unwrap();
    assert_eq!(
        report.sheet_list(),
        vec!["Data".to_string(), "NewSheet".to_string()]
    );
    assert_eq!(report.sheet_current(), "NewSheet");
    report.close();
    assert_eq!(std::fs::read(&path_file).unwrap(), v_bytes_before);

    let mut report = XlsxReport::open(&path_file, "NewSheet").unwrap();
    report.save().unwrap();
    report.close();
    let workbook: Xlsx<_> = open_workbook(&path_file).unwrap();
    assert_eq!(
        workbook.sheet_names(),
        vec!["Data".to_string(), "NewSheet".to_string()]
    );
}

#[test]
fn wr_substitutes_error_text_for_unwritable_values() {
    let dir = tempdir().unwrap();
    let mut report = XlsxReport::open(dir.path().join("err.xlsx"), "Data").unwrap();

    report.wr(1, 1, f64::INFINITY, None, None);
    report.wr(1, 2, "x".repeat(40_000), None, None);
    report.wr(0, 1, "skipped", None, None);

    assert_eq!(report.rd(1, 1), EnumCellValue::from("ERROR"));
    assert_eq!(report.rd(1, 2), EnumCellValue::from("ERROR"));
    assert_eq!(report.rd(0, 1), EnumCellValue::Empty);
    report.close();
}

#[test]
fn sheet_select_and_new() {
    let dir = tempdir().unwrap();
    let mut report = XlsxReport::open(dir.path().join("sheets.xlsx"), "Data").unwrap();

    assert!(matches!(
        report.sheet_select("Missing"),
        Err(XlsxReportError::SheetNotFound(_))
    ));

    assert_eq!(report.sheet_new("Data").unwrap(), "Data_2");
    assert_eq!(report.sheet_new("a/b").unwrap(), "a_b");
    assert_eq!(report.sheet_current(), "a_b");

    report.sheet_select("Data").unwrap();
    assert_eq!(report.sheet_current(), "Data");
    report.close();
}

#[test]
fn formatted_report_saves_and_reads_back() {
    let dir = tempdir().unwrap();
    let path_file = dir.path().join("styled.xlsx");
    let mut report = XlsxReport::open(&path_file, "Data").unwrap();

    report.set_properties(SpecDocProperties {
        title: Some("Quarterly".to_string()),
        ..Default::default()
    });
    report.wr_title(1, 1, "Quarterly report");
    report.row_inc(2);
    let n_row = report.row();
    report.wr_headers(n_row, 1, &["Item", "Qty", "Price", "Total"], true);
    report.low_border(n_row, 1, 5).unwrap();
    report.wr(4, 1, "Widget", None, None);
    report.wr(4, 2, 3, None, None);
    report.wr_sci_number(4, 3, 0.000_012_5);
    let c_formula = report
        .wr_formula(4, 4, "=<<qty>><<ROW>>*<<qty+1>><<ROW>>", &[("qty", 2)])
        .unwrap();
    assert_eq!(c_formula, "=B4*C4");
    report.wr_fill(4, 4, EnumFillPreset::Red.spec()).unwrap();
    report.wrap(4, 1).unwrap();
    report.cell_protect(4, 4).unwrap();
    report.set_range_name(4, 4, "GrandTotal").unwrap();
    report.col_width(1, 25.0).unwrap();
    report.col_autofit().unwrap();
    report.col_filters().unwrap();
    report.sheet_print_area("D").unwrap();
    report.sheet_head(3).unwrap();
    report.page_break(10).unwrap();
    report.save().unwrap();

    assert_eq!(
        report.style(4, 3).and_then(|style| style.num_format),
        Some("0.0E+0".to_string())
    );
    assert!(report.style(3, 2).unwrap().border.bottom.is_some());
    assert_eq!(report.style(4, 4).and_then(|style| style.fill), Some(*EnumFillPreset::Red.spec()));
    let l_names = report.defined_names();
    assert_eq!(l_names.len(), 1);
    assert_eq!(l_names[0].name, "GrandTotal");
    assert!(l_names[0].refers_to.ends_with("!$D$4"));
    report.close();

    assert_eq!(
        read_cell(&path_file, "Data", 0, 0),
        Some(Data::String("Quarterly report".to_string()))
    );
    assert_eq!(
        read_cell(&path_file, "Data", 2, 3),
        Some(Data::String("Total".to_string()))
    );
    assert_eq!(read_cell(&path_file, "Data", 3, 1), Some(Data::Float(3.0)));
}

#[test]
fn image_insert_rejects_missing_file() {
    let dir = tempdir().unwrap();
    let mut report = XlsxReport::open(dir.path().join("img.xlsx"), "Data").unwrap();
    assert!(
        report
            .image_insert(1, 1, dir.path().join("missing.png"), None)
            .is_err()
    );
    report.close();
}

#[test]
fn dataframe_report_writes_header_and_rows() {
    let dir = tempdir().unwrap();
    let df = df!(
        "name" => ["a", "b", "a"],
        "score" => [1.5, 1.5, 3.0],
        "ok" => [true, false, true],
    )
    .unwrap();

    let path_file = create_dataframe_report(&df, dir.path().join("frame"), "Scores").unwrap();
    assert_eq!(path_file, dir.path().join("frame.xlsx"));

    let mut workbook: Xlsx<_> = open_workbook(&path_file).unwrap();
    let range = workbook.worksheet_range("Scores").unwrap();
    assert_eq!(
        range.get_value((0, 0)),
        Some(&Data::String("name".to_string()))
    );
    assert_eq!(
        range.get_value((0, 2)),
        Some(&Data::String("ok".to_string()))
    );
    // Repeated values stay in their own columns.
    assert_eq!(range.get_value((2, 0)), Some(&Data::String("b".to_string())));
    assert_eq!(range.get_value((2, 1)), Some(&Data::Float(1.5)));
    assert_eq!(range.get_value((3, 1)), Some(&Data::Float(3.0)));
    assert_eq!(range.get_value((3, 2)), Some(&Data::Bool(true)));
}

#[test]
fn dataframe_report_into_existing_workbook_keeps_other_sheets() {
    let dir = tempdir().unwrap();
    let path_file = dir.path().join("mixed.xlsx");

    let mut report = XlsxReport::open(&path_file, "Cover").unwrap();
    report.wr_title(1, 1, "Cover page");
    report.col_width(1, 40.0).unwrap();
    report.save().unwrap();
    report.close();

    let df = df!("id" => [1i64, 2], "label" => ["x", "y"]).unwrap();
    create_dataframe_report(&df, &path_file, "Rows").unwrap();

    let report = XlsxReport::open(&path_file, "Cover").unwrap();
    assert_eq!(
        report.sheet_list(),
        vec!["Cover".to_string(), "Rows".to_string()]
    );
    assert_eq!(report.rd(1, 1), EnumCellValue::from("Cover page"));
    assert_eq!(report.column_width(1), Some(40.0));
    report.close();

    assert_eq!(
        read_cell(&path_file, "Rows", 0, 1),
        Some(Data::String("label".to_string()))
    );
    assert_eq!(read_cell(&path_file, "Rows", 2, 0), Some(Data::Float(2.0)));
}
