use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};
use crate::types::PreferencesRecord;

const DEFAULT_TRIP_DAYS: i64 = 3;
const DEFAULT_BUDGET_PER_HEAD: u32 = 25_000;
const DEFAULT_THEME: &str = "Adventure";

/// Structured trip request as a user fills it in: dates, head counts and interests.
///
/// [`TripForm::into_preferences`] flattens it into the free-text
/// [`PreferencesRecord`] the planner prompts are written against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripForm {
    pub destination: Option<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub budget_per_head: u32,
    pub adults: u32,
    pub children: u32,
    pub interests: Vec<String>,
}

impl Default for TripForm {
    fn default() -> Self {
        Self {
            destination: None,
            start: None,
            end: None,
            budget_per_head: DEFAULT_BUDGET_PER_HEAD,
            adults: 2,
            children: 0,
            interests: vec!["adventure".to_string()],
        }
    }
}

impl TripForm {
    /// Sample request: five days in December, destination left to the planner.
    pub fn demo() -> Self {
        Self {
            destination: Some("Unsure".to_string()),
            start: NaiveDate::from_ymd_opt(2025, 12, 10),
            end: NaiveDate::from_ymd_opt(2025, 12, 15),
            budget_per_head: 50_000,
            adults: 3,
            children: 0,
            interests: vec!["adventure".to_string(), "food".to_string()],
        }
    }

    /// Number of days between start and end, at least one; three when either date is missing.
    pub fn trip_days(&self) -> i64 {
        match (self.start, self.end) {
            (Some(start), Some(end)) => (end - start).num_days().max(1),
            _ => DEFAULT_TRIP_DAYS,
        }
    }

    /// `today` stands in for the start date when picking the travel month.
    pub fn into_preferences(self, today: NaiveDate) -> Result<PreferencesRecord> {
        if let (Some(start), Some(end)) = (self.start, self.end) {
            if start > end {
                return Err(PlannerError::InputShape(
                    "End date must be after start date".to_string(),
                ));
            }
        }

        let destination = self
            .destination
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or("Unsure")
            .to_string();

        let month = self.start.unwrap_or(today).format("%B").to_string();

        let themes = if self.interests.is_empty() {
            DEFAULT_THEME.to_string()
        } else {
            self.interests.join(", ")
        };

        let mut travellers = format!("Adults: {}", self.adults);
        if self.children > 0 {
            travellers.push_str(&format!(", Children: {}", self.children));
        }

        Ok(PreferencesRecord::new(
            month,
            format!("{} Days", self.trip_days()),
            format!("{} rupees per head", self.budget_per_head),
            themes,
            travellers,
        )
        .with_destination(destination))
    }
}
