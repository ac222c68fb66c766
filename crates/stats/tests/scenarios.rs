use chrono::{NaiveDate, NaiveDateTime};

use countboard_stats::model::columns::{CC_FLAG, COUNT_STATUS, IRA_FLAG, STORAGE_TYPE};
use countboard_stats::{
    aggregate, compare_snapshots, meets_target, normalize_flag, Category, CategoryReport,
    CategoryStats, CellValue, ParsedUpload, RawRow, Snapshot, SnapshotComparison, WeekTarget,
    WeekTargetConfig,
};

const MEDAN: &str = "1951 - PT. APL MEDAN";

fn cols(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn morning(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(8, 30, 0).unwrap()
}

// -------------------------------------------------------------------------
// Flags and filtering
// -------------------------------------------------------------------------

#[test]
fn flag_examples() {
    let row = RawRow::new().with(CC_FLAG, "1");
    assert_eq!(normalize_flag(&row, Category::Cc), 1);

    let row = RawRow::new()
        .with(CC_FLAG, CellValue::Empty)
        .with(COUNT_STATUS, "Counted");
    assert_eq!(normalize_flag(&row, Category::Cc), 1);

    assert_eq!(normalize_flag(&RawRow::new(), Category::Cc), 0);
}

#[test]
fn empty_input_is_zeroed() {
    let stats = aggregate(&[], &[], Category::Ira);
    assert_eq!(stats.counted, 0);
    assert_eq!(stats.not_counted, 0);
    assert_eq!(stats.percentage, 0.0);
    assert!(stats.branch_percentages.is_empty());
}

#[test]
fn live_pica_row_only_leaves_cycle_count() {
    let row = RawRow::new()
        .with("Branch", MEDAN)
        .with(STORAGE_TYPE, "LIVE_PICA")
        .with(CC_FLAG, 1.0)
        .with(IRA_FLAG, 1.0);
    let columns = cols(&["Branch", STORAGE_TYPE, CC_FLAG, IRA_FLAG]);

    let cc = aggregate(std::slice::from_ref(&row), &columns, Category::Cc);
    assert_eq!(cc.total(), 0);

    let ira = aggregate(std::slice::from_ref(&row), &columns, Category::Ira);
    assert_eq!(ira.total(), 1);
    assert_eq!(ira.counted, 1);
}

#[test]
fn near_miss_storage_type_still_counts_for_cycle_count() {
    let rows: Vec<RawRow> = ["live_pica", " LIVE_PICA ", "LIVE_PICA"]
        .iter()
        .map(|st| RawRow::new().with("Branch", MEDAN).with(STORAGE_TYPE, *st).with(CC_FLAG, 1.0))
        .collect();
    let columns = cols(&["Branch", STORAGE_TYPE, CC_FLAG]);

    let cc = aggregate(&rows, &columns, Category::Cc);
    assert_eq!(cc.total(), 2);
    assert_eq!(cc.counted, 2);
}

// -------------------------------------------------------------------------
// Cycle count: 100 rows, 60 complete
// -------------------------------------------------------------------------

#[test]
fn hundred_rows_all_resolved() {
    let rows: Vec<RawRow> = (0..100)
        .map(|i| {
            RawRow::new()
                .with("Plant", MEDAN)
                .with(CC_FLAG, if i < 60 { 1.0 } else { 0.0 })
        })
        .collect();
    let stats = aggregate(&rows, &cols(&["Plant", CC_FLAG]), Category::Cc);

    assert_eq!(stats.counted, 60);
    assert_eq!(stats.not_counted, 40);
    assert_eq!(stats.percentage, 60.0);
    assert_eq!(stats.branch_percentages.len(), 1);
    assert_eq!(stats.branch_percentages[0].branch, MEDAN);
    assert_eq!(stats.branch_percentages[0].percentage, 60.0);
}

#[test]
fn hundred_rows_partly_unresolved() {
    // 60 complete rows at Medan, 40 incomplete rows at an unknown site.
    let rows: Vec<RawRow> = (0..100)
        .map(|i| {
            if i < 60 {
                RawRow::new().with("Branch", MEDAN).with(CC_FLAG, 1.0)
            } else {
                RawRow::new().with("Branch", "Gudang Luar").with(CC_FLAG, 0.0)
            }
        })
        .collect();
    let stats = aggregate(&rows, &cols(&["Branch", CC_FLAG]), Category::Cc);

    assert_eq!((stats.counted, stats.not_counted), (60, 40));
    assert_eq!(stats.percentage, 60.0);
    assert_eq!(stats.branch_percentages.len(), 1);
    let medan = &stats.branch_percentages[0];
    assert_eq!((medan.counted, medan.total, medan.percentage), (60, 60, 100.0));
}

// -------------------------------------------------------------------------
// Growth and targets
// -------------------------------------------------------------------------

fn overall(percentage: f64) -> CategoryStats {
    CategoryStats {
        percentage,
        ..CategoryStats::default()
    }
}

#[test]
fn growth_between_snapshots() {
    let g = compare_snapshots(&overall(70.0), &overall(50.0));
    assert_eq!(g.absolute_growth, 20.0);
    assert_eq!(g.relative_growth_percent, 40.0);
}

#[test]
fn week_three_target() {
    let mut config = WeekTargetConfig::default();
    let d = |day| NaiveDate::from_ymd_opt(2026, 10, day).unwrap();
    config.cc.week1 = WeekTarget::new(d(1), d(7), 25.0);
    config.cc.week2 = WeekTarget::new(d(8), d(14), 50.0);
    config.cc.week3 = WeekTarget::new(d(15), d(21), 75.0);
    config.cc.week4 = WeekTarget::new(d(22), d(31), 100.0);

    assert!(meets_target(96.0, Category::Cc, morning(2026, 10, 16), &config));
    assert!(!meets_target(96.0, Category::Cc, morning(2026, 10, 23), &config));
}

// -------------------------------------------------------------------------
// Upload to report, end to end
// -------------------------------------------------------------------------

#[test]
fn upload_json_to_report() {
    let upload: ParsedUpload = serde_json::from_str(
        r#"{
            "columns": ["Lbl_Branch", "%IRALine", "Count Status"],
            "data": [
                {"Lbl_Branch": "MEDAN", "%IRALine": 1},
                {"Lbl_Branch": "MEDAN", "%IRALine": "0"},
                {"Lbl_Branch": "JAMBI", "%IRALine": true},
                {"Lbl_Branch": "JAMBI", "%IRALine": null, "Count Status": "COUNTED"},
                {"Lbl_Branch": "???", "Count Status": "Open"}
            ]
        }"#,
    )
    .unwrap();

    let stats = upload.aggregate(Category::Ira);
    assert_eq!((stats.counted, stats.not_counted), (3, 2));
    assert_eq!(stats.percentage, 60.0);

    let report = CategoryReport::build(Category::Ira, &stats, &WeekTargetConfig::default(), morning(2026, 10, 16));
    let order: Vec<_> = report.branches.iter().map(|b| b.short_name.as_str()).collect();
    assert_eq!(order, vec!["JAMBI", "MEDAN"]);
    assert_eq!(report.branches[0].percentage, 100.0);
    assert!(report.branches[0].status.is_on_target());
    assert!(!report.status.is_on_target());
}

#[test]
fn snapshot_comparison_covers_both_categories() {
    let upload = |flag: &str, values: &[f64]| -> Vec<RawRow> {
        values.iter().map(|v| RawRow::new().with("Branch", MEDAN).with(flag, *v)).collect()
    };
    let columns = cols(&["Branch", IRA_FLAG, CC_FLAG]);

    let previous = Snapshot {
        id: "1".into(),
        name: "week 1".into(),
        date: "2026-10-05T10:00:00+07:00".into(),
        week_number: Some(1),
        ira_stats: aggregate(&upload(IRA_FLAG, &[1.0, 0.0]), &columns, Category::Ira),
        cc_stats: aggregate(&upload(CC_FLAG, &[0.0, 0.0, 0.0, 1.0]), &columns, Category::Cc),
    };
    let current = Snapshot {
        id: "2".into(),
        name: "week 2".into(),
        date: "2026-10-12T10:00:00+07:00".into(),
        week_number: Some(2),
        ira_stats: aggregate(&upload(IRA_FLAG, &[1.0, 1.0]), &columns, Category::Ira),
        cc_stats: aggregate(&upload(CC_FLAG, &[1.0, 0.0]), &columns, Category::Cc),
    };

    let cmp = SnapshotComparison::between(&current, &previous);
    assert_eq!(cmp.ira.absolute_growth, 50.0);
    assert_eq!(cmp.ira.relative_growth_percent, 100.0);
    assert_eq!(cmp.cc.absolute_growth, 25.0);
    assert_eq!(cmp.cc_branches.len(), 1);
    assert_eq!(cmp.cc_branches[0].growth.current_value, 50.0);

    let json = serde_json::to_value(&cmp).unwrap();
    assert_eq!(json["ira"]["relativeGrowthPercent"], 100.0);
    assert_eq!(json["ccBranches"][0]["branch"], MEDAN);
    assert_eq!(json["ccBranches"][0]["absoluteGrowth"], 25.0);
}
