//! Completion-flag normalization.
//!
//! Exports encode the flag as numbers, booleans or strings depending on the
//! tool that produced them. Anything that cannot be read as "completed" is
//! treated as not completed.

use crate::model::{columns, Category, CellValue, RawRow};

/// `Count Status` values treated as counted (compared case-insensitively).
pub const COUNTED_SYNONYMS: [&str; 3] = ["counted", "y", "yes"];

/// Canonical 0/1 completion indicator for `row` in `category`.
pub fn normalize_flag(row: &RawRow, category: Category) -> u8 {
    match row.get(category.flag_column()) {
        None | Some(CellValue::Empty) => status_flag(row),
        Some(CellValue::Bool(b)) => u8::from(*b),
        Some(CellValue::Number(n)) => u8::from(*n == 1.0),
        Some(CellValue::Text(s)) => text_flag(s),
    }
}

fn text_flag(s: &str) -> u8 {
    let s = s.trim();
    if s.eq_ignore_ascii_case("true") {
        return 1;
    }
    if s.eq_ignore_ascii_case("false") {
        return 0;
    }
    match s.parse::<f64>() {
        Ok(n) if n == 1.0 => 1,
        _ => 0,
    }
}

fn status_flag(row: &RawRow) -> u8 {
    let counted = match row.get(columns::COUNT_STATUS) {
        Some(CellValue::Text(s)) => is_counted_status(s),
        Some(CellValue::Bool(b)) => *b,
        _ => false,
    };
    u8::from(counted)
}

/// Whether a free-text status reads as counted.
pub fn is_counted_status(status: &str) -> bool {
    let status = status.trim();
    COUNTED_SYNONYMS.iter().any(|s| status.eq_ignore_ascii_case(s))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cc(value: impl Into<CellValue>) -> RawRow {
        RawRow::new().with(columns::CC_FLAG, value)
    }

    #[test]
    fn canonical_true_values() {
        assert_eq!(normalize_flag(&cc(1.0), Category::Cc), 1);
        assert_eq!(normalize_flag(&cc("1"), Category::Cc), 1);
        assert_eq!(normalize_flag(&cc(true), Category::Cc), 1);
        assert_eq!(normalize_flag(&cc("true"), Category::Cc), 1);
        assert_eq!(normalize_flag(&cc("TRUE"), Category::Cc), 1);
    }

    #[test]
    fn canonical_false_values() {
        assert_eq!(normalize_flag(&cc(0.0), Category::Cc), 0);
        assert_eq!(normalize_flag(&cc("0"), Category::Cc), 0);
        assert_eq!(normalize_flag(&cc(false), Category::Cc), 0);
        assert_eq!(normalize_flag(&cc("false"), Category::Cc), 0);
    }

    #[test]
    fn missing_flag_falls_back_to_status() {
        let row = RawRow::new().with(columns::COUNT_STATUS, "Counted");
        assert_eq!(normalize_flag(&row, Category::Cc), 1);

        let row = RawRow::new()
            .with(columns::CC_FLAG, CellValue::Empty)
            .with(columns::COUNT_STATUS, "Counted");
        assert_eq!(normalize_flag(&row, Category::Cc), 1);

        let row = RawRow::new().with(columns::COUNT_STATUS, "Not Counted");
        assert_eq!(normalize_flag(&row, Category::Cc), 0);
    }

    #[test]
    fn status_synonyms_ignore_case() {
        for status in ["COUNTED", "counted", " Y ", "yes"] {
            let row = RawRow::new().with(columns::COUNT_STATUS, status);
            assert_eq!(normalize_flag(&row, Category::Ira), 1, "{status}");
        }
    }

    #[test]
    fn empty_row_is_not_counted() {
        assert_eq!(normalize_flag(&RawRow::new(), Category::Cc), 0);
        assert_eq!(normalize_flag(&RawRow::new(), Category::Ira), 0);
    }

    #[test]
    fn numeric_coercion() {
        assert_eq!(normalize_flag(&cc(" 1.0 "), Category::Cc), 1);
        assert_eq!(normalize_flag(&cc("1.5"), Category::Cc), 0);
        assert_eq!(normalize_flag(&cc(100.0), Category::Cc), 0);
        assert_eq!(normalize_flag(&cc("n/a"), Category::Cc), 0);
        assert_eq!(normalize_flag(&cc(""), Category::Cc), 0);
    }

    #[test]
    fn flag_column_follows_category() {
        let row = RawRow::new().with(columns::IRA_FLAG, 1.0);
        assert_eq!(normalize_flag(&row, Category::Ira), 1);
        assert_eq!(normalize_flag(&row, Category::Cc), 0);
    }

    #[test]
    fn flag_wins_over_status() {
        let row = RawRow::new()
            .with(columns::IRA_FLAG, 0.0)
            .with(columns::COUNT_STATUS, "Counted");
        assert_eq!(normalize_flag(&row, Category::Ira), 0);
    }
}
