//! Time buckets for deduplication and aggregation.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::MdroError;

/// Granularity of a time bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Month,
    Year,
    /// A single bucket spanning all time.
    Whole,
}

impl Period {
    /// Bucket containing `date`, or `None` for [`Period::Whole`].
    pub fn bucket(self, date: NaiveDate) -> Option<PeriodKey> {
        match self {
            Period::Month => Some(PeriodKey::month(date.year(), date.month())),
            Period::Year => Some(PeriodKey::year(date.year())),
            Period::Whole => None,
        }
    }

    pub fn bucket_at(self, timestamp: NaiveDateTime) -> Option<PeriodKey> {
        self.bucket(timestamp.date())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Period::Month => "month",
            Period::Year => "year",
            Period::Whole => "whole",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = MdroError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "month" | "monthly" | "m" => Ok(Period::Month),
            "year" | "yearly" | "annual" | "y" => Ok(Period::Year),
            "whole" | "all" | "none" => Ok(Period::Whole),
            _ => Err(MdroError::invalid_value("period", s)),
        }
    }
}

/// A calendar year, or a month within a year.
///
/// Keys order chronologically; a year key sorts before the months of the
/// same year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PeriodKey {
    pub year: i32,
    pub month: Option<u32>,
}

impl PeriodKey {
    pub fn month(year: i32, month: u32) -> Self {
        Self {
            year,
            month: Some(month),
        }
    }

    pub fn year(year: i32) -> Self {
        Self { year, month: None }
    }

    pub fn is_month(&self) -> bool {
        self.month.is_some()
    }

    /// The year bucket containing this key.
    pub fn to_year(self) -> Self {
        Self::year(self.year)
    }

    /// First day of the bucket.
    pub fn start_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month.unwrap_or(1), 1)
    }

    /// Parse a bucket from `YYYY`, `YYYY-MM` or any date/timestamp
    /// beginning with `YYYY-MM-DD` (which yields a month key).
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let mut parts = trimmed
            .split(|ch: char| ch == '-' || ch == '/' || ch == '.')
            .map(str::trim);
        let year_part = parts.next()?;
        let year_digits: String = year_part.chars().take_while(char::is_ascii_digit).collect();
        if year_digits.len() != 4 {
            return None;
        }
        let year: i32 = year_digits.parse().ok()?;
        if year_digits.len() != year_part.len() {
            return None;
        }
        match parts.next() {
            None => Some(Self::year(year)),
            Some(month_part) => {
                let month_digits: String =
                    month_part.chars().take_while(char::is_ascii_digit).collect();
                let month: u32 = month_digits.parse().ok()?;
                if (1..=12).contains(&month) {
                    Some(Self::month(year, month))
                } else {
                    None
                }
            }
        }
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.month {
            Some(month) => write!(f, "{:04}-{:02}", self.year, month),
            None => write!(f, "{:04}", self.year),
        }
    }
}

impl FromStr for PeriodKey {
    type Err = MdroError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| MdroError::invalid_value("period", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_month_and_year_keys() {
        assert_eq!(PeriodKey::parse("2023-04"), Some(PeriodKey::month(2023, 4)));
        assert_eq!(PeriodKey::parse("2023"), Some(PeriodKey::year(2023)));
        assert_eq!(
            PeriodKey::parse("2023-04-30 00:00:00"),
            Some(PeriodKey::month(2023, 4))
        );
        assert_eq!(PeriodKey::parse("2023-13"), None);
        assert_eq!(PeriodKey::parse("23-04"), None);
        assert_eq!(PeriodKey::parse(""), None);
    }

    #[test]
    fn year_key_sorts_before_its_months() {
        assert!(PeriodKey::year(2023) < PeriodKey::month(2023, 1));
        assert!(PeriodKey::month(2022, 12) < PeriodKey::year(2023));
    }
}
