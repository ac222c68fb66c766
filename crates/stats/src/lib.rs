//! `countboard-stats`: completion engine for IRA and cycle-count reports.
//!
//! Pure crate: receives parsed rows, returns counts, percentages, target
//! verdicts and growth. No file, database or CLI dependencies.

pub mod aggregate;
pub mod branch;
pub mod compare;
pub mod error;
pub mod flag;
pub mod model;
pub mod report;
pub mod resolve;
pub mod target;
pub mod validate;

pub use aggregate::aggregate;
pub use branch::{short_name, BRANCHES};
pub use compare::{compare_branches, compare_snapshots, BranchGrowth, Growth, SnapshotComparison};
pub use error::StatsError;
pub use flag::normalize_flag;
pub use model::{
    BranchPercentage, Category, CategoryStats, CellValue, ParsedUpload, RawRow, Snapshot,
    SnapshotSummary,
};
pub use report::CategoryReport;
pub use resolve::resolve_branch;
pub use target::{meets_target, TargetStatus, WeekTarget, WeekTargetConfig, DEFAULT_TARGET_PERCENT};
pub use validate::{detect_category, validate_upload, UploadCheck, UploadWarning};
