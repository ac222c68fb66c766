//! `countboard analyze`: dashboard for a single report.

use std::path::PathBuf;

use serde::Serialize;

use countboard_stats::{detect_category, validate_upload, Category, CategoryReport, UploadCheck, BRANCHES};

use crate::exit_codes::EXIT_BELOW_TARGET;
use crate::util::{load_targets, load_upload, pad_right, parse_at, print_json};
use crate::{CliError, Context};

const BRANCH_WIDTH: usize = 14;

#[derive(Serialize)]
struct AnalyzeOutput<'a> {
    file: String,
    check: &'a UploadCheck,
    report: &'a CategoryReport,
}

pub fn cmd_analyze(
    ctx: &Context,
    file: PathBuf,
    category: Option<Category>,
    sheet: Option<String>,
    date: Option<String>,
    json: bool,
    fail_below_target: bool,
) -> Result<(), CliError> {
    let upload = load_upload(&file, sheet.as_deref())?;

    let category = match category.or_else(|| detect_category(&upload.columns)) {
        Some(c) => c,
        None => {
            return Err(CliError::args(format!("cannot tell whether {} is an IRA or CC report", file.display()))
                .with_hint("pass --category ira or --category cc"))
        }
    };

    let config = load_targets(ctx)?;
    let at = parse_at(date.as_deref())?;

    let check = validate_upload(&upload, category);
    let stats = upload.aggregate(category);
    let report = CategoryReport::build(category, &stats, &config, at);

    if json {
        print_json(&AnalyzeOutput {
            file: file.display().to_string(),
            check: &check,
            report: &report,
        })?;
    } else {
        print_dashboard(&report);
    }

    if fail_below_target && !report.status.is_on_target() {
        return Err(CliError {
            code: EXIT_BELOW_TARGET,
            message: format!("{} at {:.2}%, below target {}%", category, report.percentage, report.target),
            hint: None,
        });
    }
    Ok(())
}

pub(crate) fn print_dashboard(report: &CategoryReport) {
    let week = report.week.map(|w| format!(" (week {w})")).unwrap_or_default();
    println!(
        "{}  {:.2}%  {} counted, {} not counted  target {}%{}  {}",
        report.category,
        report.percentage,
        report.counted,
        report.not_counted,
        report.target,
        week,
        report.status,
    );
    println!();
    println!("{}  {:>7}  {:>7}  {:>7}  Status", pad_right("Branch", BRANCH_WIDTH), "Counted", "Total", "%");
    for b in &report.branches {
        println!(
            "{}  {:>7}  {:>7}  {:>7.2}  {}",
            pad_right(&b.short_name, BRANCH_WIDTH),
            b.counted,
            b.total,
            b.percentage,
            b.status,
        );
    }

    let idle = BRANCHES.len().saturating_sub(report.branches.len());
    if idle > 0 {
        println!("({idle} branch(es) with no rows)");
    }
}
