//! Stateless helper utilities used by the XLSX report kernel.

use crate::conf::{
    N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX, TUP_EXCEL_ILLEGAL,
};
use crate::error::{XlsxReportError, XlsxReportResult};

////////////////////////////////////////////////////////////////////////////////
// #region ColumnReference

/// Convert a 1-based column index to spreadsheet letters, optionally followed by a row.
///
/// Bijective base-26: `1 -> "A"`, `26 -> "Z"`, `27 -> "AA"`, `703 -> "AAA"`.
/// With `row = Some(7)`, column 6 becomes `"F7"`.
pub fn create_column_reference(column: usize, row: Option<usize>) -> XlsxReportResult<String> {
    if column == 0 {
        return Err(XlsxReportError::InvalidArgument(
            "column index must be >= 1.".to_string(),
        ));
    }

    let mut v_letters = Vec::new();
    let mut n_rest = column;
    while n_rest > 0 {
        let n_rem = (n_rest - 1) % 26;
        v_letters.push(char::from(b'A' + n_rem as u8));
        n_rest = (n_rest - 1) / 26;
    }

    let mut c_ref: String = v_letters.iter().rev().collect();
    if let Some(n_row) = row {
        c_ref.push_str(&n_row.to_string());
    }
    Ok(c_ref)
}

/// Cell reference from 1-based `(row, column)`, e.g. `(1, 1) -> "A1"`.
pub fn create_cell_reference(row: usize, column: usize) -> XlsxReportResult<String> {
    if row == 0 {
        return Err(XlsxReportError::InvalidArgument(
            "row index must be >= 1.".to_string(),
        ));
    }
    create_column_reference(column, Some(row))
}

/// Absolute cell reference, e.g. `(7, 6) -> "$F$7"`.
pub fn create_absolute_reference(row: usize, column: usize) -> XlsxReportResult<String> {
    if row == 0 {
        return Err(XlsxReportError::InvalidArgument(
            "row index must be >= 1.".to_string(),
        ));
    }
    Ok(format!("${}${row}", create_column_reference(column, None)?))
}

/// Decode spreadsheet letters back to a 1-based column index (`"AB" -> 28`).
pub fn convert_column_letter_to_index(letters: &str) -> XlsxReportResult<usize> {
    let c_letters = letters.trim();
    if c_letters.is_empty() {
        return Err(XlsxReportError::InvalidArgument(
            "column letters must not be empty.".to_string(),
        ));
    }

    let mut n_column: usize = 0;
    for chr in c_letters.chars() {
        if !chr.is_ascii_alphabetic() {
            return Err(XlsxReportError::InvalidArgument(format!(
                "invalid column letters: {letters:?}"
            )));
        }
        let n_digit = (chr.to_ascii_uppercase() as u8 - b'A') as usize + 1;
        n_column = n_column
            .checked_mul(26)
            .and_then(|n| n.checked_add(n_digit))
            .ok_or_else(|| {
                XlsxReportError::InvalidArgument(format!("column letters overflow: {letters:?}"))
            })?;
    }
    Ok(n_column)
}

/// Quote a sheet name for use in a reference when it is not a plain identifier.
pub fn quote_sheet_name(sheet_name: &str) -> String {
    let if_plain = !sheet_name.is_empty()
        && sheet_name
            .chars()
            .all(|chr| chr.is_alphanumeric() || chr == '_' || chr == '.')
        && !sheet_name.starts_with(|chr: char| chr.is_ascii_digit());
    if if_plain {
        return sheet_name.to_string();
    }
    format!("'{}'", sheet_name.replace('\'', "''"))
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetNormalization

/// Replace invalid chars and trim to valid Excel sheet name.
pub fn sanitize_sheet_name(name: &str, replace_to: &str) -> String {
    let mut c_name = name.to_string();
    for c_illegal in TUP_EXCEL_ILLEGAL {
        c_name = c_name.replace(c_illegal, replace_to);
    }
    c_name = c_name.trim().trim_matches('\'').to_string();
    if c_name.is_empty() {
        c_name = "Sheet".to_string();
    }

    c_name.chars().take(N_LEN_EXCEL_SHEET_NAME_MAX).collect()
}

/// Create suffixed sheet name (`base_1`, `base_2`, ...), respecting length cap.
pub fn create_sheet_identifier(base_name: &str, part_idx_1based: usize) -> String {
    let c_sheet_name_suffix = format!("_{part_idx_1based}");
    let n_len_base_name_max = N_LEN_EXCEL_SHEET_NAME_MAX.saturating_sub(c_sheet_name_suffix.len());

    let c_sheet_name_base: String = base_name
        .chars()
        .take(usize::max(1, n_len_base_name_max))
        .collect();

    format!("{c_sheet_name_base}{c_sheet_name_suffix}")
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region WidthEstimation

/// Estimate display width of text; wide (non-ASCII) glyphs count 1.6 units.
pub fn estimate_unicode_string_width(s: &str) -> usize {
    let n_ascii = s.chars().filter(|chr| chr.is_ascii()).count();
    let n_non_ascii = s.chars().count().saturating_sub(n_ascii);
    n_ascii + (n_non_ascii as f64 * 1.6).round() as usize
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region IndexCasting

/// Validate a 1-based row and convert it to the zero-based writer index.
pub fn cast_row_num(row: usize) -> XlsxReportResult<u32> {
    if row == 0 || row > N_NROWS_EXCEL_MAX {
        return Err(XlsxReportError::InvalidArgument(format!(
            "row index out of range 1..={N_NROWS_EXCEL_MAX}: {row}"
        )));
    }
    u32::try_from(row - 1)
        .map_err(|_| XlsxReportError::InvalidArgument(format!("row index overflow: {row}")))
}

/// Validate a 1-based column and convert it to the zero-based writer index.
pub fn cast_col_num(column: usize) -> XlsxReportResult<u16> {
    if column == 0 || column > N_NCOLS_EXCEL_MAX {
        return Err(XlsxReportError::InvalidArgument(format!(
            "column index out of range 1..={N_NCOLS_EXCEL_MAX}: {column}"
        )));
    }
    u16::try_from(column - 1)
        .map_err(|_| XlsxReportError::InvalidArgument(format!("column index overflow: {column}")))
}

/// Validate a 1-based `(row, column)` and return it as a 1-based `(col, row)`
/// worksheet coordinate.
pub fn cast_sheet_coordinate(row: usize, column: usize) -> XlsxReportResult<(u32, u32)> {
    let n_row = cast_row_num(row)? + 1;
    let n_col = u32::from(cast_col_num(column)?) + 1;
    Ok((n_col, n_row))
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_create_column_reference_known_values() {
        for (n_col, c_expected) in [
            (1, "A"),
            (26, "Z"),
            (27, "AA"),
            (28, "AB"),
            (52, "AZ"),
            (53, "BA"),
            (702, "ZZ"),
            (703, "AAA"),
            (16_384, "XFD"),
        ] {
            assert_eq!(create_column_reference(n_col, None).unwrap(), c_expected);
        }
    }

    #[test]
    fn test_create_column_reference_with_row() {
        assert_eq!(create_column_reference(6, Some(7)).unwrap(), "F7");
        assert_eq!(create_column_reference(28, Some(7)).unwrap(), "AB7");
        assert_eq!(create_cell_reference(1, 1).unwrap(), "A1");
        assert_eq!(create_absolute_reference(7, 6).unwrap(), "$F$7");
    }

    #[test]
    fn test_create_column_reference_rejects_zero() {
        assert!(matches!(
            create_column_reference(0, None),
            Err(XlsxReportError::InvalidArgument(_))
        ));
        assert!(matches!(
            create_cell_reference(0, 3),
            Err(XlsxReportError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_convert_column_letter_to_index() {
        assert_eq!(convert_column_letter_to_index("A").unwrap(), 1);
        assert_eq!(convert_column_letter_to_index("ab").unwrap(), 28);
        assert_eq!(convert_column_letter_to_index("XFD").unwrap(), 16_384);
        assert!(convert_column_letter_to_index("").is_err());
        assert!(convert_column_letter_to_index("A1").is_err());
    }

    #[test]
    fn test_quote_sheet_name() {
        assert_eq!(quote_sheet_name("Data"), "Data");
        assert_eq!(quote_sheet_name("My Sheet"), "'My Sheet'");
        assert_eq!(quote_sheet_name("O'Neil"), "'O''Neil'");
        assert_eq!(quote_sheet_name("2024"), "'2024'");
    }

    #[test]
    fn test_sanitize_sheet_name() {
        assert_eq!(sanitize_sheet_name("a/b:c", "_"), "a_b_c");
        assert_eq!(sanitize_sheet_name("   ", "_"), "Sheet");
        assert_eq!(sanitize_sheet_name(&"x".repeat(40), "_").len(), 31);
        assert_eq!(create_sheet_identifier(&"y".repeat(40), 12).len(), 31);
    }

    #[test]
    fn test_cast_indices_are_one_based() {
        assert_eq!(cast_row_num(1).unwrap(), 0);
        assert_eq!(cast_col_num(16_384).unwrap(), 16_383);
        assert!(cast_row_num(0).is_err());
        assert!(cast_col_num(16_385).is_err());
    }

    #[test]
    fn test_cast_sheet_coordinate_swaps_to_col_row() {
        assert_eq!(cast_sheet_coordinate(7, 2).unwrap(), (2, 7));
        assert!(cast_sheet_coordinate(1, 0).is_err());
    }

    #[test]
    fn test_estimate_unicode_string_width() {
        assert_eq!(estimate_unicode_string_width("abc"), 3);
        assert_eq!(estimate_unicode_string_width("日本"), 3);
    }

    proptest! {
        #[test]
        fn prop_column_reference_round_trip(n_col in 1usize..=1_000_000) {
            let c_ref = create_column_reference(n_col, None).unwrap();
            prop_assert!(c_ref.chars().all(|chr| chr.is_ascii_uppercase()));
            prop_assert_eq!(convert_column_letter_to_index(&c_ref).unwrap(), n_col);
        }
    }
}
