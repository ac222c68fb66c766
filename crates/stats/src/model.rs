use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

/// Column names the engine reads from uploaded reports.
pub mod columns {
    /// Completion flag for IRA reports.
    pub const IRA_FLAG: &str = "%IRALine";
    /// Completion flag for cycle-count reports.
    pub const CC_FLAG: &str = "%CountComp";
    /// Free-text status consulted when the flag cell is missing.
    pub const COUNT_STATUS: &str = "Count Status";
    /// Storage type; `LIVE_PICA` rows are not part of cycle counts.
    pub const STORAGE_TYPE: &str = "StorageType";
    pub const LIVE_PICA: &str = "LIVE_PICA";
    /// Known spellings of the branch column, in priority order.
    pub const BRANCH_VARIANTS: [&str; 4] = ["Branch", "!Branch", "Plant", "Lbl_Branch"];
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// One raw cell as produced by the upload parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Bool(bool),
    Number(f64),
    Text(String),
    /// Explicit null / blank cell.
    Empty,
}

impl CellValue {
    /// Cell rendered as text, `None` for blanks.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Empty => None,
            Self::Bool(b) => Some(b.to_string()),
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => Some(format!("{}", *n as i64)),
            Self::Number(n) => Some(n.to_string()),
            Self::Text(s) => Some(s.clone()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// A single uploaded row. Columns missing from the map are "undefined".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRow {
    cells: HashMap<String, CellValue>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells.get(column)
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<CellValue>) {
        self.cells.insert(column.into(), value.into());
    }

    pub fn with(mut self, column: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Parsed upload: header row plus data rows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedUpload {
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(alias = "rows")]
    pub data: Vec<RawRow>,
}

impl ParsedUpload {
    pub fn new(columns: Vec<String>, data: Vec<RawRow>) -> Self {
        Self { columns, data }
    }

    pub fn aggregate(&self, category: Category) -> CategoryStats {
        crate::aggregate::aggregate(&self.data, &self.columns, category)
    }
}

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Ira,
    Cc,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Ira, Category::Cc];

    /// Authoritative completion flag column.
    pub fn flag_column(&self) -> &'static str {
        match self {
            Self::Ira => columns::IRA_FLAG,
            Self::Cc => columns::CC_FLAG,
        }
    }

    /// Whether the category-specific pre-filter drops this row. The storage
    /// type must equal `LIVE_PICA` exactly.
    pub fn excludes(&self, row: &RawRow) -> bool {
        match self {
            Self::Ira => false,
            Self::Cc => row
                .get(columns::STORAGE_TYPE)
                .and_then(CellValue::as_text)
                .is_some_and(|s| s == columns::LIVE_PICA),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ira => write!(f, "IRA"),
            Self::Cc => write!(f, "CC"),
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ira" => Ok(Self::Ira),
            "cc" | "cycle-count" | "cyclecount" => Ok(Self::Cc),
            other => Err(format!("unknown category '{other}' (expected ira or cc)")),
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregation output
// ---------------------------------------------------------------------------

/// Running counts for one registry branch. `counted <= total` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BranchTally {
    pub branch: &'static str,
    pub counted: u64,
    pub total: u64,
}

impl BranchTally {
    pub fn new(branch: &'static str) -> Self {
        Self { branch, counted: 0, total: 0 }
    }

    pub fn record(&mut self, flag: u8) {
        self.counted += u64::from(flag);
        self.total += 1;
    }

    pub fn percentage(&self) -> f64 {
        percentage(self.counted, self.total)
    }
}

/// `100 * counted / total`, or 0 for an empty denominator.
pub fn percentage(counted: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * counted as f64 / total as f64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchPercentage {
    pub branch: String,
    pub percentage: f64,
    #[serde(default)]
    pub counted: u64,
    #[serde(default)]
    pub total: u64,
}

impl From<&BranchTally> for BranchPercentage {
    fn from(t: &BranchTally) -> Self {
        Self {
            branch: t.branch.to_string(),
            percentage: t.percentage(),
            counted: t.counted,
            total: t.total,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStats {
    pub counted: u64,
    pub not_counted: u64,
    pub percentage: f64,
    pub branch_percentages: Vec<BranchPercentage>,
}

impl CategoryStats {
    /// Rows considered after category filtering.
    pub fn total(&self) -> u64 {
        self.counted + self.not_counted
    }

    pub fn branch(&self, branch: &str) -> Option<&BranchPercentage> {
        self.branch_percentages.iter().find(|b| b.branch == branch)
    }
}

// ---------------------------------------------------------------------------
// Snapshots
// ---------------------------------------------------------------------------

/// Named, dated capture of both categories. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub id: String,
    pub name: String,
    /// RFC 3339 timestamp.
    pub date: String,
    pub week_number: Option<u8>,
    pub ira_stats: CategoryStats,
    pub cc_stats: CategoryStats,
}

impl Snapshot {
    pub fn stats(&self, category: Category) -> &CategoryStats {
        match category {
            Category::Ira => &self.ira_stats,
            Category::Cc => &self.cc_stats,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotSummary {
    pub id: String,
    pub name: String,
    pub date: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_value_from_json() {
        let row: RawRow = serde_json::from_str(
            r#"{"%CountComp": 1, "Branch": "1951 - PT. APL MEDAN", "Done": true, "Note": null}"#,
        )
        .unwrap();
        assert_eq!(row.get("%CountComp"), Some(&CellValue::Number(1.0)));
        assert_eq!(row.get("Done"), Some(&CellValue::Bool(true)));
        assert_eq!(row.get("Note"), Some(&CellValue::Empty));
        assert_eq!(row.get("Missing"), None);
    }

    #[test]
    fn number_text_drops_integral_fraction() {
        assert_eq!(CellValue::Number(1951.0).as_text().as_deref(), Some("1951"));
        assert_eq!(CellValue::Number(0.5).as_text().as_deref(), Some("0.5"));
        assert_eq!(CellValue::Empty.as_text(), None);
    }

    #[test]
    fn cc_excludes_live_pica_only() {
        let pica = RawRow::new().with(columns::STORAGE_TYPE, "LIVE_PICA");
        let bulk = RawRow::new().with(columns::STORAGE_TYPE, "BULK");
        assert!(Category::Cc.excludes(&pica));
        assert!(!Category::Cc.excludes(&bulk));
        assert!(!Category::Ira.excludes(&pica));
    }

    #[test]
    fn live_pica_match_is_exact() {
        for value in ["live_pica", " LIVE_PICA ", "Live_Pica", "LIVE_PICA2"] {
            let row = RawRow::new().with(columns::STORAGE_TYPE, value);
            assert!(!Category::Cc.excludes(&row), "{value:?} was excluded from CC");
        }
    }

    #[test]
    fn category_parse_and_display() {
        assert_eq!("IRA".parse::<Category>().unwrap(), Category::Ira);
        assert_eq!("cc".parse::<Category>().unwrap(), Category::Cc);
        assert!("stock".parse::<Category>().is_err());
        assert_eq!(Category::Cc.to_string(), "CC");
    }

    #[test]
    fn category_serializes_like_display() {
        for category in Category::ALL {
            let json = serde_json::to_value(category).unwrap();
            assert_eq!(json, serde_json::json!(category.to_string()));
        }
        assert_eq!(serde_json::from_str::<Category>(r#""CC""#).unwrap(), Category::Cc);
    }

    #[test]
    fn stats_accept_snapshots_without_tallies() {
        let stats: CategoryStats = serde_json::from_str(
            r#"{"counted":3,"notCounted":1,"percentage":75.0,
                "branchPercentages":[{"branch":"1951 - PT. APL MEDAN","percentage":75.0}]}"#,
        )
        .unwrap();
        assert_eq!(stats.total(), 4);
        assert_eq!(stats.branch_percentages[0].counted, 0);
    }
}
