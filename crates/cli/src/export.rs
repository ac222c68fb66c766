//! `countboard export`: dashboard workbook or branch CSV.

use std::path::PathBuf;

use countboard_io::export::{write_branch_csv, write_xlsx};

use crate::util::{build_reports, current_comparison, load_targets, parse_at, upload_stats};
use crate::{CliError, Context, UploadArgs};

pub fn cmd_export(
    ctx: &Context,
    uploads: UploadArgs,
    output: PathBuf,
    compare_to: Option<String>,
    date: Option<String>,
) -> Result<(), CliError> {
    let ext = output
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let stats = upload_stats(&uploads)?;
    let config = load_targets(ctx)?;
    let at = parse_at(date.as_deref())?;
    let reports = build_reports(&stats, &config, at);

    match ext.as_str() {
        "xlsx" => {
            let comparison = match &compare_to {
                Some(id) => Some(current_comparison(ctx, &stats, id)?),
                None => None,
            };
            write_xlsx(&output, &reports, comparison.as_ref()).map_err(CliError::io)?;
        }
        "csv" => {
            let [report] = reports.as_slice() else {
                return Err(CliError::args("CSV export takes a single category")
                    .with_hint("pass only one of --ira / --cc, or write .xlsx"));
            };
            if compare_to.is_some() {
                return Err(CliError::args("--compare-to needs .xlsx output"));
            }
            write_branch_csv(&output, report).map_err(CliError::io)?;
        }
        _ => {
            return Err(CliError::args(format!("unsupported output type: {}", output.display()))
                .with_hint("use a .xlsx or .csv file name"))
        }
    }

    eprintln!("wrote {}", output.display());
    Ok(())
}
