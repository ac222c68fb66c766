//! `countboard compare`: trend between two snapshots.

use countboard_stats::{short_name, BranchGrowth, Growth, SnapshotComparison};

use crate::util::{fetch_snapshot, open_store, pad_right, print_json};
use crate::{CliError, Context};

pub fn cmd_compare(ctx: &Context, current: String, previous: String, json: bool) -> Result<(), CliError> {
    let store = open_store(ctx)?;
    let current = fetch_snapshot(&store, &current)?;
    let previous = fetch_snapshot(&store, &previous)?;

    let comparison = SnapshotComparison::between(&current, &previous);
    if json {
        return print_json(&comparison);
    }

    println!("{} -> {}", comparison.previous_name, comparison.current_name);
    for (label, overall, branches) in [
        ("IRA", &comparison.ira, &comparison.ira_branches),
        ("CC", &comparison.cc, &comparison.cc_branches),
    ] {
        println!();
        println!("{}", growth_line(label, 14, overall));
        for BranchGrowth { branch, growth } in branches {
            println!("  {}", growth_line(short_name(branch), 12, growth));
        }
    }
    Ok(())
}

fn growth_line(label: &str, width: usize, g: &Growth) -> String {
    format!(
        "{}  {:>7.2}% -> {:>7.2}%  {:>+8.2} pts  {:>+8.2}%",
        pad_right(label, width),
        g.previous_value,
        g.current_value,
        g.absolute_growth,
        g.relative_growth_percent,
    )
}
