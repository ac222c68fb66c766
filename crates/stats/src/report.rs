//! Dashboard view of one category: target in force, overall status and the
//! branch table ordered for display.

use chrono::NaiveDateTime;
use ordered_float::OrderedFloat;
use serde::Serialize;

use crate::branch::{registry_index, short_name};
use crate::model::{Category, CategoryStats};
use crate::target::{TargetStatus, WeekTargetConfig};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchRow {
    pub branch: String,
    pub short_name: String,
    pub counted: u64,
    pub total: u64,
    pub percentage: f64,
    pub status: TargetStatus,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryReport {
    pub category: Category,
    /// Week number in force, `None` when the fallback target applies.
    pub week: Option<u8>,
    pub target: f64,
    pub counted: u64,
    pub not_counted: u64,
    pub percentage: f64,
    pub status: TargetStatus,
    pub branches: Vec<BranchRow>,
}

impl CategoryReport {
    pub fn build(
        category: Category,
        stats: &CategoryStats,
        config: &WeekTargetConfig,
        at: NaiveDateTime,
    ) -> Self {
        let week = config.active_week(category, at);
        let target = config.target_at(category, at);

        let mut branches: Vec<BranchRow> = stats
            .branch_percentages
            .iter()
            .map(|b| BranchRow {
                branch: b.branch.clone(),
                short_name: short_name(&b.branch).to_string(),
                counted: b.counted,
                total: b.total,
                percentage: b.percentage,
                status: TargetStatus::against(b.percentage, target),
            })
            .collect();
        sort_by_percentage(&mut branches);

        Self {
            category,
            week: week.map(|w| w.week),
            target,
            counted: stats.counted,
            not_counted: stats.not_counted,
            percentage: stats.percentage,
            status: TargetStatus::against(stats.percentage, target),
            branches,
        }
    }

    pub fn below_target(&self) -> impl Iterator<Item = &BranchRow> {
        self.branches.iter().filter(|b| !b.status.is_on_target())
    }
}

/// Highest percentage first; ties keep registry order.
pub fn sort_by_percentage(rows: &mut [BranchRow]) {
    rows.sort_by_key(|r| {
        (
            std::cmp::Reverse(OrderedFloat(r.percentage)),
            registry_index(&r.branch).unwrap_or(usize::MAX),
        )
    });
}
