// Report export: Excel workbook and per-category CSV

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet};

use countboard_stats::{BranchGrowth, CategoryReport, Growth, SnapshotComparison};

const SUMMARY_HEADERS: [&str; 7] = ["Category", "Week", "Counted", "Not Counted", "Percentage", "Target", "Status"];
const BRANCH_HEADERS: [&str; 6] = ["Branch", "Name", "Counted", "Total", "Percentage", "Status"];
const COMPARISON_HEADERS: [&str; 6] = ["Category", "Branch", "Previous", "Current", "Change", "Change %"];

/// Write the dashboard workbook: `Summary`, one branch sheet per category and,
/// when given, a `Comparison` sheet.
pub fn write_xlsx(
    path: &Path,
    reports: &[CategoryReport],
    comparison: Option<&SnapshotComparison>,
) -> Result<(), String> {
    let header = Format::new().set_bold();
    let percent = Format::new().set_num_format("0.00");

    let mut workbook = Workbook::new();

    let summary = add_sheet(&mut workbook, "Summary")?;
    write_headers(summary, &SUMMARY_HEADERS, &header)?;
    for (idx, report) in reports.iter().enumerate() {
        let row = idx as u32 + 1;
        summary.write_string(row, 0, report.category.to_string()).map_err(xlsx_err)?;
        if let Some(week) = report.week {
            summary.write_number(row, 1, week).map_err(xlsx_err)?;
        }
        summary.write_number(row, 2, report.counted as f64).map_err(xlsx_err)?;
        summary.write_number(row, 3, report.not_counted as f64).map_err(xlsx_err)?;
        summary.write_number_with_format(row, 4, report.percentage, &percent).map_err(xlsx_err)?;
        summary.write_number(row, 5, report.target).map_err(xlsx_err)?;
        summary.write_string(row, 6, report.status.to_string()).map_err(xlsx_err)?;
    }
    summary.autofit();

    for report in reports {
        let sheet = add_sheet(&mut workbook, &format!("{} Branches", report.category))?;
        write_headers(sheet, &BRANCH_HEADERS, &header)?;
        for (idx, branch) in report.branches.iter().enumerate() {
            let row = idx as u32 + 1;
            sheet.write_string(row, 0, &branch.branch).map_err(xlsx_err)?;
            sheet.write_string(row, 1, &branch.short_name).map_err(xlsx_err)?;
            sheet.write_number(row, 2, branch.counted as f64).map_err(xlsx_err)?;
            sheet.write_number(row, 3, branch.total as f64).map_err(xlsx_err)?;
            sheet.write_number_with_format(row, 4, branch.percentage, &percent).map_err(xlsx_err)?;
            sheet.write_string(row, 5, branch.status.to_string()).map_err(xlsx_err)?;
        }
        sheet.autofit();
    }

    if let Some(cmp) = comparison {
        let sheet = add_sheet(&mut workbook, "Comparison")?;
        write_headers(sheet, &COMPARISON_HEADERS, &header)?;

        let mut row = 1u32;
        for (label, overall, branches) in [("IRA", &cmp.ira, &cmp.ira_branches), ("CC", &cmp.cc, &cmp.cc_branches)] {
            write_growth(sheet, row, label, "(overall)", overall, &percent)?;
            row += 1;
            for BranchGrowth { branch, growth } in branches {
                write_growth(sheet, row, label, branch, growth, &percent)?;
                row += 1;
            }
        }
        sheet.autofit();
    }

    workbook
        .save(path)
        .map_err(|e| format!("Failed to save XLSX file: {}", e))?;
    log::info!("exported {} report(s) to {}", reports.len(), path.display());
    Ok(())
}

/// Branch table of one category as CSV, in report order.
pub fn write_branch_csv(path: &Path, report: &CategoryReport) -> Result<(), String> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| format!("cannot create {}: {e}", path.display()))?;
    writer.write_record(BRANCH_HEADERS).map_err(|e| e.to_string())?;
    for b in &report.branches {
        writer
            .write_record([
                b.branch.clone(),
                b.short_name.clone(),
                b.counted.to_string(),
                b.total.to_string(),
                format!("{:.2}", b.percentage),
                b.status.to_string(),
            ])
            .map_err(|e| e.to_string())?;
    }
    writer.flush().map_err(|e| e.to_string())
}

fn add_sheet<'a>(workbook: &'a mut Workbook, name: &str) -> Result<&'a mut Worksheet, String> {
    workbook
        .add_worksheet()
        .set_name(name)
        .map_err(|e| format!("Failed to create sheet '{}': {}", name, e))
}

fn write_headers(sheet: &mut Worksheet, headers: &[&str], format: &Format) -> Result<(), String> {
    for (col, title) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *title, format).map_err(xlsx_err)?;
    }
    Ok(())
}

fn write_growth(
    sheet: &mut Worksheet,
    row: u32,
    category: &str,
    branch: &str,
    growth: &Growth,
    percent: &Format,
) -> Result<(), String> {
    sheet.write_string(row, 0, category).map_err(xlsx_err)?;
    sheet.write_string(row, 1, branch).map_err(xlsx_err)?;
    sheet.write_number_with_format(row, 2, growth.previous_value, percent).map_err(xlsx_err)?;
    sheet.write_number_with_format(row, 3, growth.current_value, percent).map_err(xlsx_err)?;
    sheet.write_number_with_format(row, 4, growth.absolute_growth, percent).map_err(xlsx_err)?;
    sheet.write_number_with_format(row, 5, growth.relative_growth_percent, percent).map_err(xlsx_err)?;
    Ok(())
}

fn xlsx_err(e: rust_xlsxwriter::XlsxError) -> String {
    format!("Failed to write cell: {}", e)
}
