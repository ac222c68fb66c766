use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::StatsError;
use crate::model::Category;

/// Threshold used when no configured week covers the reference date.
pub const DEFAULT_TARGET_PERCENT: f64 = 95.0;

// ---------------------------------------------------------------------------
// Week targets
// ---------------------------------------------------------------------------

/// Target for one configured week. Both dates are inclusive; a week with
/// either date missing never matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekTarget {
    #[serde(default, with = "date_opt")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, with = "date_opt")]
    pub end_date: Option<NaiveDate>,
    #[serde(default = "default_target")]
    pub target: f64,
}

fn default_target() -> f64 {
    DEFAULT_TARGET_PERCENT
}

impl Default for WeekTarget {
    fn default() -> Self {
        Self {
            start_date: None,
            end_date: None,
            target: DEFAULT_TARGET_PERCENT,
        }
    }
}

impl WeekTarget {
    pub fn new(start: NaiveDate, end: NaiveDate, target: f64) -> Self {
        Self {
            start_date: Some(start),
            end_date: Some(end),
            target,
        }
    }

    /// Whether `at` falls between the start of `start_date` and the end of `end_date`.
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => start <= at.date() && at.date() <= end,
            _ => false,
        }
    }

    fn overlaps(&self, other: &WeekTarget) -> bool {
        match (self.start_date, self.end_date, other.start_date, other.end_date) {
            (Some(a0), Some(a1), Some(b0), Some(b1)) => a0 <= b1 && b0 <= a1,
            _ => false,
        }
    }
}

/// The four configured weeks of one category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryTargets {
    pub week1: WeekTarget,
    pub week2: WeekTarget,
    pub week3: WeekTarget,
    pub week4: WeekTarget,
}

impl CategoryTargets {
    /// Weeks with their 1-based number, lowest first.
    pub fn weeks(&self) -> [(u8, &WeekTarget); 4] {
        [(1, &self.week1), (2, &self.week2), (3, &self.week3), (4, &self.week4)]
    }

    pub fn week_mut(&mut self, week: u8) -> Option<&mut WeekTarget> {
        match week {
            1 => Some(&mut self.week1),
            2 => Some(&mut self.week2),
            3 => Some(&mut self.week3),
            4 => Some(&mut self.week4),
            _ => None,
        }
    }
}

/// Week currently in force for a category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveWeek {
    pub week: u8,
    pub target: f64,
}

/// Two weeks of one category whose date ranges intersect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekOverlap {
    pub category: Category,
    pub first: u8,
    pub second: u8,
}

impl std::fmt::Display for WeekOverlap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: week{} overlaps week{} (week{} wins)",
            self.category, self.first, self.second, self.first
        )
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeekTargetConfig {
    pub ira: CategoryTargets,
    pub cc: CategoryTargets,
}

impl WeekTargetConfig {
    pub fn from_json(input: &str) -> Result<Self, StatsError> {
        let config: WeekTargetConfig =
            serde_json::from_str(input).map_err(|e| StatsError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, StatsError> {
        serde_json::to_string_pretty(self).map_err(|e| StatsError::ConfigParse(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), StatsError> {
        for category in Category::ALL {
            for (week, w) in self.for_category(category).weeks() {
                if !(0.0..=100.0).contains(&w.target) {
                    return Err(StatsError::TargetOutOfRange {
                        category,
                        week,
                        target: w.target,
                    });
                }
                if let (Some(start), Some(end)) = (w.start_date, w.end_date) {
                    if start > end {
                        return Err(StatsError::InvertedWeek { category, week });
                    }
                }
            }
        }
        Ok(())
    }

    pub fn for_category(&self, category: Category) -> &CategoryTargets {
        match category {
            Category::Ira => &self.ira,
            Category::Cc => &self.cc,
        }
    }

    pub fn for_category_mut(&mut self, category: Category) -> &mut CategoryTargets {
        match category {
            Category::Ira => &mut self.ira,
            Category::Cc => &mut self.cc,
        }
    }

    /// Overlapping week ranges. Not an error: the lowest week number wins.
    pub fn overlaps(&self) -> Vec<WeekOverlap> {
        let mut found = Vec::new();
        for category in Category::ALL {
            let weeks = self.for_category(category).weeks();
            for (i, (a, wa)) in weeks.iter().enumerate() {
                for (b, wb) in &weeks[i + 1..] {
                    if wa.overlaps(wb) {
                        found.push(WeekOverlap { category, first: *a, second: *b });
                    }
                }
            }
        }
        found
    }

    /// First week (by number) whose range contains `at`.
    pub fn active_week(&self, category: Category, at: NaiveDateTime) -> Option<ActiveWeek> {
        self.for_category(category)
            .weeks()
            .into_iter()
            .find(|(_, w)| w.contains(at))
            .map(|(week, w)| ActiveWeek { week, target: w.target })
    }

    /// Effective target at `at`, falling back to [`DEFAULT_TARGET_PERCENT`].
    pub fn target_at(&self, category: Category, at: NaiveDateTime) -> f64 {
        self.active_week(category, at)
            .map_or(DEFAULT_TARGET_PERCENT, |w| w.target)
    }
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

pub fn meets_target(
    percentage: f64,
    category: Category,
    at: NaiveDateTime,
    config: &WeekTargetConfig,
) -> bool {
    percentage >= config.target_at(category, at)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetStatus {
    OnTarget,
    BelowTarget,
}

impl TargetStatus {
    pub fn evaluate(
        percentage: f64,
        category: Category,
        at: NaiveDateTime,
        config: &WeekTargetConfig,
    ) -> Self {
        Self::against(percentage, config.target_at(category, at))
    }

    pub fn against(percentage: f64, target: f64) -> Self {
        if percentage >= target {
            Self::OnTarget
        } else {
            Self::BelowTarget
        }
    }

    pub fn is_on_target(&self) -> bool {
        matches!(self, Self::OnTarget)
    }
}

impl std::fmt::Display for TargetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OnTarget => write!(f, "On Target"),
            Self::BelowTarget => write!(f, "Below Target"),
        }
    }
}

/// Dates are stored as `YYYY-MM-DD`; full timestamps and empty strings are
/// accepted on read.
mod date_opt {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => s.serialize_str(&d.format("%Y-%m-%d").to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        let Some(raw) = raw else {
            return Ok(None);
        };
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        let day = raw.get(..10).unwrap_or(raw);
        NaiveDate::parse_from_str(day, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid date '{raw}'")))
    }
}
