use std::collections::HashMap;

use crate::branch::BRANCHES;
use crate::flag::normalize_flag;
use crate::model::columns::BRANCH_VARIANTS;
use crate::model::{BranchPercentage, BranchTally, Category, CategoryStats, CellValue, RawRow};
use crate::resolve::{find_branch_column, resolve_branch};

/// Count completed rows for one category, overall and per branch.
///
/// Rows removed by the category pre-filter are ignored entirely. Rows whose
/// branch cannot be resolved still count toward the overall totals.
pub fn aggregate(rows: &[RawRow], columns: &[String], category: Category) -> CategoryStats {
    let branch_column = find_branch_column(columns, &BRANCH_VARIANTS);
    match branch_column {
        Some(col) => log::debug!("{category}: branch column '{col}'"),
        None => log::debug!("{category}: no branch column among {} columns", columns.len()),
    }

    let mut tallies: Vec<BranchTally> = BRANCHES.iter().map(|b| BranchTally::new(*b)).collect();
    // Uploads repeat the same branch text thousands of times.
    let mut resolved: HashMap<String, Option<usize>> = HashMap::new();
    let mut counted = 0u64;
    let mut total = 0u64;

    for row in rows.iter().filter(|r| !category.excludes(r)) {
        let flag = normalize_flag(row, category);
        counted += u64::from(flag);
        total += 1;

        let Some(raw) = branch_column
            .and_then(|col| row.get(col))
            .and_then(CellValue::as_text)
        else {
            continue;
        };

        let slot = *resolved.entry(raw).or_insert_with_key(|raw| {
            resolve_branch(raw, &BRANCHES).and_then(|b| tallies.iter().position(|t| t.branch == b))
        });
        if let Some(idx) = slot {
            tallies[idx].record(flag);
        }
    }

    log::debug!("{category}: {counted}/{total} rows counted");

    CategoryStats {
        counted,
        not_counted: total - counted,
        percentage: crate::model::percentage(counted, total),
        branch_percentages: tallies
            .iter()
            .filter(|t| t.total > 0)
            .map(BranchPercentage::from)
            .collect(),
    }
}
