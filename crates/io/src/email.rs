// Plain-text progress email

use serde::Serialize;

use countboard_config::EmailSettings;
use countboard_stats::{Category, CategoryReport, Growth, SnapshotComparison};

/// Branches listed per category before the list is cut short.
const MAX_LISTED_BRANCHES: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmailDraft {
    pub to: Vec<String>,
    pub cc: Vec<String>,
    pub subject: String,
    pub body: String,
}

impl EmailDraft {
    /// `mailto:` link for handing the draft to a mail client.
    pub fn mailto(&self) -> String {
        let mut link = format!("mailto:{}?subject={}", self.to.join(","), encode(&self.subject));
        if !self.cc.is_empty() {
            link.push_str(&format!("&cc={}", self.cc.join(",")));
        }
        link.push_str(&format!("&body={}", encode(&self.body)));
        link
    }
}

pub fn draft(
    reports: &[CategoryReport],
    comparison: Option<&SnapshotComparison>,
    settings: &EmailSettings,
) -> EmailDraft {
    let week = reports.iter().find_map(|r| r.week);
    let subject = match week {
        Some(w) => format!("IRA & CC Progress Report - Week {w}"),
        None => "IRA & CC Progress Report".to_string(),
    };

    let mut body = String::from("Dear all,\n\nPlease find below the current stock count progress.\n");

    for report in reports {
        body.push('\n');
        body.push_str(&format!(
            "{}: {:.2}% ({} of {} counted), target {}% - {}\n",
            report.category,
            report.percentage,
            report.counted,
            report.counted + report.not_counted,
            report.target,
            report.status,
        ));

        let below: Vec<_> = report.below_target().collect();
        if below.is_empty() {
            body.push_str("  All branches on target.\n");
        } else {
            body.push_str(&format!("  Branches below target ({}):\n", below.len()));
            for b in below.iter().take(MAX_LISTED_BRANCHES) {
                body.push_str(&format!("  - {}: {:.2}%\n", b.short_name, b.percentage));
            }
            if below.len() > MAX_LISTED_BRANCHES {
                body.push_str(&format!("  - ... and {} more\n", below.len() - MAX_LISTED_BRANCHES));
            }
        }

        if let Some(cmp) = comparison {
            let growth = match report.category {
                Category::Ira => &cmp.ira,
                Category::Cc => &cmp.cc,
            };
            body.push_str(&format!("  Versus \"{}\": {}\n", cmp.previous_name, describe(growth)));
        }
    }

    body.push_str("\nRegards,\n");
    if !settings.sender.is_empty() {
        body.push_str(&settings.sender);
        body.push('\n');
    }

    EmailDraft {
        to: settings.to.clone(),
        cc: settings.cc.clone(),
        subject,
        body,
    }
}

fn describe(growth: &Growth) -> String {
    format!(
        "{:+.2} pts ({:.2}% -> {:.2}%, {:+.2}%)",
        growth.absolute_growth,
        growth.previous_value,
        growth.current_value,
        growth.relative_growth_percent
    )
}

/// Percent-encode everything outside the RFC 3986 unreserved set.
fn encode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for byte in text.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => out.push(byte as char),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
