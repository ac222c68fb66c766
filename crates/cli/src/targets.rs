//! `countboard targets`: weekly target table.

use clap::Subcommand;

use countboard_config::save_targets;
use countboard_stats::{Category, WeekTarget, WeekTargetConfig};

use crate::util::{load_targets, parse_day, print_json};
use crate::{CliError, Context};

#[derive(Subcommand)]
pub enum TargetsCommands {
    /// Print the target table
    Show {
        /// Output JSON to stdout
        #[arg(long)]
        json: bool,
    },

    /// Set one week's date range and target
    #[command(after_help = "\
Examples:
  countboard targets set --category cc --week 3 --start 2026-10-15 --end 2026-10-21 --target 75")]
    Set {
        #[arg(long, short = 'c')]
        category: Category,

        /// Week number (1-4)
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=4))]
        week: u8,

        /// First day of the week (YYYY-MM-DD)
        #[arg(long)]
        start: String,

        /// Last day of the week, inclusive (YYYY-MM-DD)
        #[arg(long)]
        end: String,

        /// Completion target in percent
        #[arg(long)]
        target: f64,
    },
}

pub fn cmd_targets(ctx: &Context, cmd: TargetsCommands) -> Result<(), CliError> {
    match cmd {
        TargetsCommands::Show { json } => {
            let config = load_targets(ctx)?;
            if json {
                return print_json(&config);
            }
            print_table(&config);
            Ok(())
        }
        TargetsCommands::Set { category, week, start, end, target } => {
            let start = parse_day(&start)?;
            let end = parse_day(&end)?;

            let mut config = load_targets(ctx)?;
            if let Some(slot) = config.for_category_mut(category).week_mut(week) {
                *slot = WeekTarget::new(start, end, target);
            }
            config.validate().map_err(|e| CliError::args(e.to_string()))?;

            for overlap in config.overlaps() {
                eprintln!("warning: {overlap}");
            }

            save_targets(&ctx.targets, &config).map_err(CliError::io)?;
            eprintln!("{category} week{week}: {start} .. {end}, target {target}% ({})", ctx.targets.display());
            Ok(())
        }
    }
}

fn print_table(config: &WeekTargetConfig) {
    for category in Category::ALL {
        println!("{category}");
        for (week, w) in config.for_category(category).weeks() {
            let range = match (w.start_date, w.end_date) {
                (Some(s), Some(e)) => format!("{s} .. {e}"),
                _ => "(not set)".to_string(),
            };
            println!("  week{week}  {range:<24}  {}%", w.target);
        }
    }
}
