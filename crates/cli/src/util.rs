use std::path::Path;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use countboard_io::store::{SnapshotStore, SqliteSnapshotStore};
use countboard_stats::{
    validate_upload, Category, CategoryReport, CategoryStats, ParsedUpload, Snapshot, SnapshotComparison,
    WeekTargetConfig,
};

use crate::exit_codes::{EXIT_ERROR, EXIT_SNAPSHOT_NOT_FOUND};
use crate::{CliError, Context, UploadArgs};

// ============================================================================
// Inputs
// ============================================================================

/// Read an upload, honoring `--sheet` for spreadsheet files.
pub(crate) fn load_upload(path: &Path, sheet: Option<&str>) -> Result<ParsedUpload, CliError> {
    if !path.exists() {
        return Err(CliError::io(format!("file not found: {}", path.display())));
    }
    countboard_io::import_with_sheet(path, sheet).map_err(CliError::parse)
}

/// Validate and aggregate one category's upload.
pub(crate) fn category_stats(path: &Path, sheet: Option<&str>, category: Category) -> Result<CategoryStats, CliError> {
    let upload = load_upload(path, sheet)?;
    validate_upload(&upload, category);
    Ok(upload.aggregate(category))
}

/// Stats for each category given in `--ira` / `--cc`.
pub(crate) fn upload_stats(args: &UploadArgs) -> Result<Vec<(Category, CategoryStats)>, CliError> {
    let mut out = Vec::new();
    for (category, path) in [(Category::Ira, &args.ira), (Category::Cc, &args.cc)] {
        if let Some(path) = path {
            out.push((category, category_stats(path, args.sheet.as_deref(), category)?));
        }
    }
    if out.is_empty() {
        return Err(CliError::args("no input files").with_hint("pass --ira FILE and/or --cc FILE"));
    }
    Ok(out)
}

pub(crate) fn build_reports(
    stats: &[(Category, CategoryStats)],
    config: &WeekTargetConfig,
    at: NaiveDateTime,
) -> Vec<CategoryReport> {
    stats
        .iter()
        .map(|(category, s)| CategoryReport::build(*category, s, config, at))
        .collect()
}

/// Reference time for target lookup: `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS`,
/// RFC 3339, or local now.
pub(crate) fn parse_at(date: Option<&str>) -> Result<NaiveDateTime, CliError> {
    let Some(raw) = date else {
        return Ok(Local::now().naive_local());
    };
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.naive_local());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt);
    }
    parse_day(raw).map(|d| d.and_time(chrono::NaiveTime::MIN))
}

pub(crate) fn parse_day(raw: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| CliError::args(format!("invalid date '{raw}'")).with_hint("use YYYY-MM-DD"))
}

pub(crate) fn load_targets(ctx: &Context) -> Result<WeekTargetConfig, CliError> {
    countboard_config::load_targets(&ctx.targets).map_err(CliError::parse)
}

// ============================================================================
// Snapshots
// ============================================================================

pub(crate) fn open_store(ctx: &Context) -> Result<SqliteSnapshotStore, CliError> {
    SqliteSnapshotStore::open(&ctx.db).map_err(CliError::io)
}

pub(crate) fn fetch_snapshot(store: &impl SnapshotStore, id: &str) -> Result<Snapshot, CliError> {
    match store.get(id).map_err(CliError::parse)? {
        Some(snapshot) => Ok(snapshot),
        None => Err(CliError {
            code: EXIT_SNAPSHOT_NOT_FOUND,
            message: format!("snapshot '{id}' not found"),
            hint: Some("run `countboard snapshot list` to see saved ids".to_string()),
        }),
    }
}

/// Comparison of the uploads being processed against a saved snapshot.
/// A category without an upload compares as empty.
pub(crate) fn current_comparison(
    ctx: &Context,
    stats: &[(Category, CategoryStats)],
    previous_id: &str,
) -> Result<SnapshotComparison, CliError> {
    let store = open_store(ctx)?;
    let previous = fetch_snapshot(&store, previous_id)?;

    let for_category = |category: Category| {
        stats
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, s)| s.clone())
            .unwrap_or_default()
    };
    let current = Snapshot {
        id: String::new(),
        name: "current upload".to_string(),
        date: Local::now().to_rfc3339(),
        week_number: None,
        ira_stats: for_category(Category::Ira),
        cc_stats: for_category(Category::Cc),
    };
    Ok(SnapshotComparison::between(&current, &previous))
}

// ============================================================================
// Output
// ============================================================================

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| CliError {
        code: EXIT_ERROR,
        message: format!("JSON serialization error: {e}"),
        hint: None,
    })?;
    println!("{json}");
    Ok(())
}

/// Pad or truncate a string to exactly `width` display columns.
/// If shorter, right-pads with spaces. If longer, truncates with "..".
pub(crate) fn pad_right(s: &str, width: usize) -> String {
    let sw = UnicodeWidthStr::width(s);
    if sw <= width {
        return format!("{}{}", s, " ".repeat(width - sw));
    }

    let budget = width.saturating_sub(2);
    let mut used = 0;
    let mut out = String::new();
    for ch in s.chars() {
        let cw = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + cw > budget {
            break;
        }
        used += cw;
        out.push(ch);
    }
    out.push_str(&"..".chars().take(width - used).collect::<String>());
    out.push_str(&" ".repeat(width.saturating_sub(used + 2)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_right_pads_and_truncates() {
        assert_eq!(pad_right("MEDAN", 8), "MEDAN   ");
        assert_eq!(pad_right("BANJARMASIN", 8), "BANJAR..");
        assert_eq!(pad_right("ab", 1), ".");
    }

    #[test]
    fn parse_at_formats() {
        let day = parse_at(Some("2026-10-16")).unwrap();
        assert_eq!(day.to_string(), "2026-10-16 00:00:00");
        let dt = parse_at(Some("2026-10-16T23:30:00")).unwrap();
        assert_eq!(dt.to_string(), "2026-10-16 23:30:00");
        let rfc = parse_at(Some("2026-10-16T23:30:00+07:00")).unwrap();
        assert_eq!(rfc.to_string(), "2026-10-16 23:30:00");
        assert!(parse_at(Some("16/10/2026")).is_err());
    }
}
