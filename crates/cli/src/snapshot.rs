//! `countboard snapshot`: save and manage dated snapshots.

use std::path::PathBuf;

use chrono::{Local, Utc};
use clap::Subcommand;

use countboard_io::store::SnapshotStore;
use countboard_stats::{Category, Snapshot};

use crate::util::{category_stats, fetch_snapshot, load_targets, open_store, pad_right, print_json};
use crate::exit_codes::EXIT_SNAPSHOT_NOT_FOUND;
use crate::{CliError, Context};

#[derive(Subcommand)]
pub enum SnapshotCommands {
    /// Aggregate both reports and store them as a new snapshot
    #[command(after_help = "\
Examples:
  countboard snapshot save --ira ira.xlsx --cc cc.xlsx --name \"Week 3 close\"
  countboard snapshot save --ira ira.csv --cc cc.csv --name \"Mid-week\" --week 2")]
    Save {
        /// IRA report
        #[arg(long, value_name = "FILE")]
        ira: PathBuf,

        /// Cycle-count report
        #[arg(long, value_name = "FILE")]
        cc: PathBuf,

        /// Snapshot name
        #[arg(long)]
        name: String,

        /// Target week (1-4); taken from the IRA target table when omitted
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=4))]
        week: Option<u8>,

        /// Worksheet to read from spreadsheet files (default: first)
        #[arg(long)]
        sheet: Option<String>,
    },

    /// List saved snapshots, newest first
    List {
        /// Output JSON to stdout
        #[arg(long)]
        json: bool,
    },

    /// Print one snapshot as JSON
    Show {
        id: String,
    },

    /// Delete a snapshot
    Delete {
        id: String,
    },
}

pub fn cmd_snapshot(ctx: &Context, cmd: SnapshotCommands) -> Result<(), CliError> {
    match cmd {
        SnapshotCommands::Save { ira, cc, name, week, sheet } => cmd_save(ctx, ira, cc, name, week, sheet),
        SnapshotCommands::List { json } => cmd_list(ctx, json),
        SnapshotCommands::Show { id } => {
            let store = open_store(ctx)?;
            print_json(&fetch_snapshot(&store, &id)?)
        }
        SnapshotCommands::Delete { id } => {
            let mut store = open_store(ctx)?;
            if !store.delete(&id).map_err(CliError::io)? {
                return Err(CliError {
                    code: EXIT_SNAPSHOT_NOT_FOUND,
                    message: format!("snapshot '{id}' not found"),
                    hint: None,
                });
            }
            eprintln!("deleted snapshot {id}");
            Ok(())
        }
    }
}

fn cmd_save(
    ctx: &Context,
    ira: PathBuf,
    cc: PathBuf,
    name: String,
    week: Option<u8>,
    sheet: Option<String>,
) -> Result<(), CliError> {
    if name.trim().is_empty() {
        return Err(CliError::args("snapshot name is empty"));
    }

    let ira_stats = category_stats(&ira, sheet.as_deref(), Category::Ira)?;
    let cc_stats = category_stats(&cc, sheet.as_deref(), Category::Cc)?;

    let now = Local::now();
    let week_number = match week {
        Some(w) => Some(w),
        None => load_targets(ctx)?
            .active_week(Category::Ira, now.naive_local())
            .map(|w| w.week),
    };

    let snapshot = Snapshot {
        id: Utc::now().timestamp_millis().to_string(),
        name: name.trim().to_string(),
        date: now.to_rfc3339(),
        week_number,
        ira_stats,
        cc_stats,
    };

    let mut store = open_store(ctx)?;
    store.save(&snapshot).map_err(CliError::io)?;

    eprintln!(
        "saved snapshot '{}': IRA {:.2}%, CC {:.2}%",
        snapshot.name, snapshot.ira_stats.percentage, snapshot.cc_stats.percentage
    );
    println!("{}", snapshot.id);
    Ok(())
}

fn cmd_list(ctx: &Context, json: bool) -> Result<(), CliError> {
    let store = open_store(ctx)?;
    let summaries = store.list().map_err(CliError::io)?;

    if json {
        return print_json(&summaries);
    }

    if summaries.is_empty() {
        eprintln!("no snapshots in {}", ctx.db.display());
        return Ok(());
    }
    for s in &summaries {
        println!("{}  {}  {}", pad_right(&s.id, 14), pad_right(&s.date, 25), s.name);
    }
    Ok(())
}
