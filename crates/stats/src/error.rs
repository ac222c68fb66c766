use std::fmt;

use crate::model::Category;

#[derive(Debug)]
pub enum StatsError {
    /// JSON parse / deserialization error in a target configuration.
    ConfigParse(String),
    /// A week target outside `[0, 100]`.
    TargetOutOfRange { category: Category, week: u8, target: f64 },
    /// A week whose start date falls after its end date.
    InvertedWeek { category: Category, week: u8 },
}

impl fmt::Display for StatsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "target config parse error: {msg}"),
            Self::TargetOutOfRange { category, week, target } => {
                write!(f, "{category} week{week}: target {target} is outside 0..=100")
            }
            Self::InvertedWeek { category, week } => {
                write!(f, "{category} week{week}: start date is after end date")
            }
        }
    }
}

impl std::error::Error for StatsError {}
