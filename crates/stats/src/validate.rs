//! Upload checks surfaced to the user before aggregation.
//!
//! Nothing here blocks aggregation; every finding is a warning.

use serde::Serialize;

use crate::branch::BRANCHES;
use crate::model::columns::{self, BRANCH_VARIANTS};
use crate::model::{Category, CellValue, ParsedUpload};
use crate::resolve::{find_branch_column, resolve_branch};

const MAX_SAMPLES: usize = 5;

/// Guess the report category from its header row.
pub fn detect_category(columns: &[String]) -> Option<Category> {
    let has = |name: &str| columns.iter().any(|c| c.trim() == name);
    match (has(columns::IRA_FLAG), has(columns::CC_FLAG)) {
        (true, false) => Some(Category::Ira),
        (false, true) => Some(Category::Cc),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UploadWarning {
    NoRows,
    /// Neither the category flag nor `Count Status` exists; every row reads as not counted.
    NoFlagColumn { expected: String },
    NoBranchColumn,
    UnresolvedBranches { rows: usize, samples: Vec<String> },
    LivePicaExcluded { rows: usize },
}

impl std::fmt::Display for UploadWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoRows => write!(f, "upload has no data rows"),
            Self::NoFlagColumn { expected } => write!(
                f,
                "neither '{expected}' nor '{}' found; all rows count as not completed",
                columns::COUNT_STATUS
            ),
            Self::NoBranchColumn => write!(
                f,
                "no branch column ({}); branch breakdown will be empty",
                BRANCH_VARIANTS.join(", ")
            ),
            Self::UnresolvedBranches { rows, samples } => write!(
                f,
                "{rows} row(s) with an unknown branch (e.g. {})",
                samples.join(", ")
            ),
            Self::LivePicaExcluded { rows } => {
                write!(f, "{rows} {} row(s) excluded from cycle count", columns::LIVE_PICA)
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadCheck {
    pub category: Category,
    pub rows: usize,
    pub branch_column: Option<String>,
    pub warnings: Vec<UploadWarning>,
}

impl UploadCheck {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

pub fn validate_upload(upload: &ParsedUpload, category: Category) -> UploadCheck {
    let mut warnings = Vec::new();
    let has_column = |name: &str| upload.columns.iter().any(|c| c == name);

    if upload.data.is_empty() {
        warnings.push(UploadWarning::NoRows);
    }

    if !has_column(category.flag_column()) && !has_column(columns::COUNT_STATUS) {
        warnings.push(UploadWarning::NoFlagColumn {
            expected: category.flag_column().to_string(),
        });
    }

    let branch_column = find_branch_column(&upload.columns, &BRANCH_VARIANTS);
    let mut excluded = 0;
    let mut unresolved = 0;
    let mut samples: Vec<String> = Vec::new();

    for row in &upload.data {
        if category.excludes(row) {
            excluded += 1;
            continue;
        }
        let Some(col) = branch_column else { continue };
        let raw = row.get(col).and_then(CellValue::as_text).unwrap_or_default();
        if resolve_branch(&raw, &BRANCHES).is_none() {
            unresolved += 1;
            let shown = if raw.trim().is_empty() { "(blank)".to_string() } else { raw };
            if samples.len() < MAX_SAMPLES && !samples.contains(&shown) {
                samples.push(shown);
            }
        }
    }

    if branch_column.is_none() && !upload.data.is_empty() {
        warnings.push(UploadWarning::NoBranchColumn);
    }
    if unresolved > 0 {
        warnings.push(UploadWarning::UnresolvedBranches { rows: unresolved, samples });
    }
    if excluded > 0 {
        warnings.push(UploadWarning::LivePicaExcluded { rows: excluded });
    }

    for w in &warnings {
        log::warn!("{category} upload: {w}");
    }

    UploadCheck {
        category,
        rows: upload.data.len(),
        branch_column: branch_column.map(str::to_string),
        warnings,
    }
}
