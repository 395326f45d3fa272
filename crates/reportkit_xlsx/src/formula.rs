//! Formula templating with `<<ROW>>` and `<<NAME>>` / `<<NAME+k>>` / `<<NAME-k>>` placeholders.

use regex::Regex;

use crate::error::{XlsxReportError, XlsxReportResult};
use crate::util::create_column_reference;

/// Placeholder replaced by the target row number.
pub const C_PLACEHOLDER_ROW: &str = "<<ROW>>";

/// Resolve a formula template for `row` against an ordered column-name mapping.
///
/// Every `<<ROW>>` and every plain `<<name>>` is replaced. For the offset form
/// (`<<name+k>>`, `<<name-k>>`) only the first occurrence per name is resolved;
/// later offset placeholders of the same name are left verbatim, as are
/// placeholders whose name is not in `columns`.
///
/// ```
/// use reportkit_xlsx::resolve_formula;
///
/// let columns = [("col1", 1)];
/// let c_formula =
///     resolve_formula("=COUNT(<<col1>><<ROW>>:<<col1+9>><<ROW>>)", 2, &columns).unwrap();
/// assert_eq!(c_formula, "=COUNT(A2:J2)");
/// ```
pub fn resolve_formula<S: AsRef<str>>(
    template: &str,
    row: usize,
    columns: &[(S, usize)],
) -> XlsxReportResult<String> {
    if row == 0 {
        return Err(XlsxReportError::InvalidArgument(
            "row index must be >= 1.".to_string(),
        ));
    }

    let mut c_formula = template.to_string();
    if c_formula.contains(C_PLACEHOLDER_ROW) {
        c_formula = c_formula.replace(C_PLACEHOLDER_ROW, &row.to_string());
    }

    for (name, n_col_idx) in columns {
        let c_name = name.as_ref();

        let c_placeholder = format!("<<{c_name}>>");
        if c_formula.contains(&c_placeholder) {
            c_formula =
                c_formula.replace(&c_placeholder, &create_column_reference(*n_col_idx, None)?);
        }

        let re_offset = derive_offset_regex(c_name)?;
        let Some(caps) = re_offset.captures(&c_formula) else {
            continue;
        };
        let range_match = caps.get(0).map(|m| m.range()).unwrap_or_default();
        let n_offset = parse_signed_offset(&caps[1], &caps[2])?;
        let n_col_effective = i64::try_from(*n_col_idx)
            .ok()
            .and_then(|n| n.checked_add(n_offset))
            .filter(|n| *n >= 1)
            .ok_or_else(|| {
                XlsxReportError::InvalidArgument(format!(
                    "offset column for {c_name:?} resolves below 1: {n_col_idx} {}{}",
                    &caps[1], &caps[2]
                ))
            })?;
        let c_col_ref = create_column_reference(n_col_effective as usize, None)?;
        c_formula.replace_range(range_match, &c_col_ref);
    }

    Ok(c_formula)
}

fn derive_offset_regex(name: &str) -> XlsxReportResult<Regex> {
    Regex::new(&format!(r"<<{}([+-])([0-9]+)>>", regex::escape(name))).map_err(|err| {
        XlsxReportError::InvalidArgument(format!("invalid column name {name:?}: {err}"))
    })
}

fn parse_signed_offset(sign: &str, digits: &str) -> XlsxReportResult<i64> {
    let n_offset = digits.parse::<i64>().map_err(|_| {
        XlsxReportError::InvalidArgument(format!("column offset too large: {digits}"))
    })?;
    Ok(if sign == "-" { -n_offset } else { n_offset })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const EMPTY: [(&str, usize); 0] = [];

    #[test]
    fn test_row_only() {
        assert_eq!(resolve_formula("<<ROW>>", 5, &EMPTY).unwrap(), "5");
        assert_eq!(
            resolve_formula("=A<<ROW>>+B<<ROW>>", 12, &EMPTY).unwrap(),
            "=A12+B12"
        );
    }

    #[test]
    fn test_named_column_with_row() {
        let columns = [("col1", 1), ("col2", 6)];
        assert_eq!(
            resolve_formula("=IF(<<col2>><<ROW>><0,\"Pass\",\"Fail\")", 3, &columns).unwrap(),
            "=IF(F3<0,\"Pass\",\"Fail\")"
        );
    }

    #[test]
    fn test_positive_offset() {
        let columns = [("col1", 1)];
        assert_eq!(
            resolve_formula("=COUNT(<<col1>><<ROW>>:<<col1+9>><<ROW>>)", 2, &columns).unwrap(),
            "=COUNT(A2:J2)"
        );
    }

    #[test]
    fn test_negative_offset() {
        let columns = [("total".to_string(), 10)];
        assert_eq!(
            resolve_formula("=<<total-1>><<ROW>>/<<total>><<ROW>>", 4, &columns).unwrap(),
            "=I4/J4"
        );
    }

    #[test]
    fn test_unknown_placeholder_is_left_verbatim() {
        let columns = [("col1", 1)];
        assert_eq!(
            resolve_formula("=<<col1>>1+<<other>>1+<<other+2>>1", 1, &columns).unwrap(),
            "=A1+<<other>>1+<<other+2>>1"
        );
    }

    #[test]
    fn test_only_first_offset_per_name_is_resolved() {
        let columns = [("col1", 1)];
        assert_eq!(
            resolve_formula("<<col1+1>> <<col1+2>>", 1, &columns).unwrap(),
            "B <<col1+2>>"
        );
    }

    #[test]
    fn test_offset_below_one_is_invalid() {
        let columns = [("col1", 2)];
        assert!(matches!(
            resolve_formula("<<col1-2>>", 1, &columns),
            Err(XlsxReportError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_zero_column_only_fails_when_used() {
        let columns = [("unused", 0), ("col1", 3)];
        assert_eq!(resolve_formula("<<col1>>", 1, &columns).unwrap(), "C");
        assert!(resolve_formula("<<unused>>", 1, &columns).is_err());
    }

    #[test]
    fn test_name_with_regex_metacharacters() {
        let columns = [("a.b", 2)];
        assert_eq!(
            resolve_formula("<<a.b+1>>|<<axb+1>>", 1, &columns).unwrap(),
            "C|<<axb+1>>"
        );
    }

    #[test]
    fn test_offset_accepts_only_ascii_digits() {
        let columns = [("col1", 1)];
        assert_eq!(
            resolve_formula("<<col1+\u{663}>>|<<col1+3>>", 1, &columns).unwrap(),
            "<<col1+\u{663}>>|D"
        );
        assert!(matches!(
            resolve_formula("<<col1+99999999999999999999>>", 1, &columns),
            Err(XlsxReportError::InvalidArgument(msg)) if msg.contains("too large")
        ));
    }

    #[test]
    fn test_row_zero_is_invalid() {
        assert!(resolve_formula("<<ROW>>", 0, &EMPTY).is_err());
    }
}
