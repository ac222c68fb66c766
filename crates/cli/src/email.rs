//! `countboard email`: progress email draft.

use countboard_io::email::draft;

use crate::util::{build_reports, current_comparison, load_targets, parse_at, print_json, upload_stats};
use crate::{CliError, Context, UploadArgs};

pub fn cmd_email(
    ctx: &Context,
    uploads: UploadArgs,
    compare_to: Option<String>,
    date: Option<String>,
    mailto: bool,
    json: bool,
) -> Result<(), CliError> {
    let stats = upload_stats(&uploads)?;
    let config = load_targets(ctx)?;
    let at = parse_at(date.as_deref())?;
    let reports = build_reports(&stats, &config, at);

    let comparison = match &compare_to {
        Some(id) => Some(current_comparison(ctx, &stats, id)?),
        None => None,
    };

    let draft = draft(&reports, comparison.as_ref(), &ctx.settings.email);

    if json {
        return print_json(&draft);
    }
    if mailto {
        println!("{}", draft.mailto());
        return Ok(());
    }

    if draft.to.is_empty() {
        log::warn!("no recipients configured; set [email] to = [...] in settings.toml");
    }
    println!("To: {}", draft.to.join(", "));
    if !draft.cc.is_empty() {
        println!("Cc: {}", draft.cc.join(", "));
    }
    println!("Subject: {}", draft.subject);
    println!();
    print!("{}", draft.body);
    Ok(())
}
