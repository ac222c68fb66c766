//! Growth between two aggregation results.

use serde::Serialize;

use crate::branch::BRANCHES;
use crate::model::{Category, CategoryStats, Snapshot};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Growth {
    pub previous_value: f64,
    pub current_value: f64,
    pub absolute_growth: f64,
    pub relative_growth_percent: f64,
}

impl Growth {
    pub fn between(current: f64, previous: f64) -> Self {
        let absolute_growth = current - previous;
        Self {
            previous_value: previous,
            current_value: current,
            absolute_growth,
            relative_growth_percent: if previous > 0.0 {
                100.0 * absolute_growth / previous
            } else {
                0.0
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchGrowth {
    pub branch: String,
    #[serde(flatten)]
    pub growth: Growth,
}

/// Overall percentage growth from `previous` to `current`.
pub fn compare_snapshots(current: &CategoryStats, previous: &CategoryStats) -> Growth {
    Growth::between(current.percentage, previous.percentage)
}

/// Growth for every branch present in either side; a missing side counts as 0.
///
/// Registry branches come first in registry order, then any unknown names
/// carried by older snapshots in order of appearance.
pub fn compare_branches(current: &CategoryStats, previous: &CategoryStats) -> Vec<BranchGrowth> {
    let mut names: Vec<&str> = BRANCHES
        .iter()
        .copied()
        .filter(|b| current.branch(b).is_some() || previous.branch(b).is_some())
        .collect();
    for b in current.branch_percentages.iter().chain(&previous.branch_percentages) {
        if !names.contains(&b.branch.as_str()) {
            names.push(&b.branch);
        }
    }

    names
        .into_iter()
        .map(|name| {
            let value = |stats: &CategoryStats| stats.branch(name).map_or(0.0, |b| b.percentage);
            BranchGrowth {
                branch: name.to_string(),
                growth: Growth::between(value(current), value(previous)),
            }
        })
        .collect()
}

/// IRA and CC trend between two stored snapshots.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotComparison {
    pub current_id: String,
    pub current_name: String,
    pub previous_id: String,
    pub previous_name: String,
    pub ira: Growth,
    pub cc: Growth,
    pub ira_branches: Vec<BranchGrowth>,
    pub cc_branches: Vec<BranchGrowth>,
}

impl SnapshotComparison {
    pub fn between(current: &Snapshot, previous: &Snapshot) -> Self {
        Self {
            current_id: current.id.clone(),
            current_name: current.name.clone(),
            previous_id: previous.id.clone(),
            previous_name: previous.name.clone(),
            ira: compare_snapshots(current.stats(Category::Ira), previous.stats(Category::Ira)),
            cc: compare_snapshots(current.stats(Category::Cc), previous.stats(Category::Cc)),
            ira_branches: compare_branches(current.stats(Category::Ira), previous.stats(Category::Ira)),
            cc_branches: compare_branches(current.stats(Category::Cc), previous.stats(Category::Cc)),
        }
    }
}
