//! Named lookback windows for the daily metrics series.

use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    Week,
    #[default]
    Month,
    Quarter,
    Year,
    All,
}

impl TimeRange {
    pub const ALL: [TimeRange; 5] = [
        TimeRange::Week,
        TimeRange::Month,
        TimeRange::Quarter,
        TimeRange::Year,
        TimeRange::All,
    ];

    /// Window length in days; `None` means unbounded.
    pub fn days(&self) -> Option<i64> {
        match self {
            Self::Week => Some(7),
            Self::Month => Some(30),
            Self::Quarter => Some(90),
            Self::Year => Some(365),
            Self::All => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::Year => "year",
            Self::All => "all",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Week => "Last 7 days",
            Self::Month => "Last 30 days",
            Self::Quarter => "Last 90 days",
            Self::Year => "Last year",
            Self::All => "All time",
        }
    }

    /// Lenient parse: a missing or unrecognized value falls back to `month`.
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        match raw {
            Some(value) => value.parse().unwrap_or_else(|_| {
                tracing::debug!(range = %value, "Unknown range, defaulting to month");
                Self::default()
            }),
            None => Self::default(),
        }
    }

    /// Earliest instant included by this range, relative to `now`.
    pub fn start(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.days().map(|days| now - Duration::days(days))
    }

    /// First calendar day included by this range. The day `start` falls on
    /// counts in full, so `week` covers eight dates.
    pub fn start_date(&self, now: DateTime<Utc>) -> Option<NaiveDate> {
        self.start(now).map(|start| start.date_naive())
    }
}

impl FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| format!("unknown range '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn range_days_mapping() {
        assert_eq!(TimeRange::Week.days(), Some(7));
        assert_eq!(TimeRange::Month.days(), Some(30));
        assert_eq!(TimeRange::Quarter.days(), Some(90));
        assert_eq!(TimeRange::Year.days(), Some(365));
        assert_eq!(TimeRange::All.days(), None);
    }

    #[test]
    fn unknown_range_defaults_to_month() {
        assert_eq!(TimeRange::parse_lenient(Some("fortnight")), TimeRange::Month);
        assert_eq!(TimeRange::parse_lenient(None), TimeRange::Month);
        assert_eq!(TimeRange::parse_lenient(Some("quarter")), TimeRange::Quarter);
    }

    #[test]
    fn start_subtracts_range_days() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
        assert_eq!(
            TimeRange::Week.start(now),
            Some(Utc.with_ymd_and_hms(2026, 10, 12, 12, 0, 0).unwrap())
        );
        assert_eq!(TimeRange::All.start(now), None);
    }

    #[test]
    fn start_date_includes_the_whole_first_day() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
        let start = TimeRange::Week.start_date(now).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2026, 10, 12).unwrap());

        // A row dated on the start day sits before the start instant but is kept.
        let first_day = NaiveDate::from_ymd_opt(2026, 10, 12).unwrap();
        assert!(first_day >= start);
        assert!(first_day.and_hms_opt(0, 0, 0).unwrap().and_utc() < TimeRange::Week.start(now).unwrap());
        assert_eq!(TimeRange::All.start_date(now), None);
    }
}
