//! Period granularity and period-key handling.
//!
//! Keys are derived in UTC:
//!
//! - daily: `YYYY-MM-DD`
//! - weekly: `YYYY-MM-DD` of the Sunday on or before the date
//! - monthly: `YYYY-MM`
//!
//! Keys can be parsed back into the `[start, end)` range they cover.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, Utc};
use nom::{
    bytes::complete::take_while_m_n,
    character::complete::char,
    combinator::{all_consuming, map_res},
    sequence::{preceded, separated_pair},
    IResult, Parser,
};
use serde::{Deserialize, Serialize};

use crate::error::CarbonError;

pub const SECONDS_PER_DAY: i64 = 86_400;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, uniffi::Enum)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Daily,
    Weekly,
    Monthly,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Daily => "daily",
            Period::Weekly => "weekly",
            Period::Monthly => "monthly",
        }
    }

    /// Key of the bucket containing `timestamp_unix`.
    pub fn key_for(&self, timestamp_unix: i64) -> Result<String, CarbonError> {
        let date = to_datetime(timestamp_unix)?.date_naive();
        let key = match self {
            Period::Daily => day_key(date),
            Period::Weekly => {
                let back = u64::from(date.weekday().num_days_from_sunday());
                let sunday = date
                    .checked_sub_days(Days::new(back))
                    .ok_or(CarbonError::InvalidTimestamp(timestamp_unix))?;
                day_key(sunday)
            }
            Period::Monthly => month_key(date),
        };
        Ok(key)
    }

    /// Unix range `[start, end)` covered by a bucket key.
    pub fn bounds(&self, key: &str) -> Result<(i64, i64), CarbonError> {
        let invalid = |reason: &str| CarbonError::InvalidPeriodKey {
            key: key.to_string(),
            reason: reason.to_string(),
        };

        let (start, end) = match self {
            Period::Daily | Period::Weekly => {
                let (_, (y, m, d)) = all_consuming(date_key)
                    .parse(key)
                    .map_err(|_| invalid("expected YYYY-MM-DD"))?;
                let start = NaiveDate::from_ymd_opt(y, m, d).ok_or_else(|| invalid("no such date"))?;
                let span = if *self == Period::Weekly {
                    if start.weekday().num_days_from_sunday() != 0 {
                        return Err(invalid("weekly keys start on a Sunday"));
                    }
                    7
                } else {
                    1
                };
                let end = start
                    .checked_add_days(Days::new(span))
                    .ok_or_else(|| invalid("date out of range"))?;
                (start, end)
            }
            Period::Monthly => {
                let (_, (y, m)) = all_consuming(month_key_parser)
                    .parse(key)
                    .map_err(|_| invalid("expected YYYY-MM"))?;
                let start = NaiveDate::from_ymd_opt(y, m, 1).ok_or_else(|| invalid("no such month"))?;
                let end = start
                    .checked_add_months(Months::new(1))
                    .ok_or_else(|| invalid("date out of range"))?;
                (start, end)
            }
        };

        Ok((midnight_unix(start), midnight_unix(end)))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = CarbonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Period::Daily),
            "weekly" => Ok(Period::Weekly),
            "monthly" => Ok(Period::Monthly),
            _ => Err(CarbonError::InvalidPeriod(s.to_string())),
        }
    }
}

pub(crate) fn to_datetime(timestamp_unix: i64) -> Result<DateTime<Utc>, CarbonError> {
    DateTime::from_timestamp(timestamp_unix, 0).ok_or(CarbonError::InvalidTimestamp(timestamp_unix))
}

fn midnight_unix(date: NaiveDate) -> i64 {
    date.and_time(chrono::NaiveTime::MIN).and_utc().timestamp()
}

fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Month keys for the `count` months ending with the month of `reference_unix`,
/// oldest first.
pub fn trailing_month_keys(reference_unix: i64, count: u32) -> Result<Vec<String>, CarbonError> {
    let date = to_datetime(reference_unix)?.date_naive();
    let first = date.with_day(1).ok_or(CarbonError::InvalidTimestamp(reference_unix))?;

    (0..count)
        .rev()
        .map(|back| {
            first
                .checked_sub_months(Months::new(back))
                .map(month_key)
                .ok_or(CarbonError::InvalidTimestamp(reference_unix))
        })
        .collect()
}

// ── Key parsers ─────────────────────────────────────────────────────────────

fn year(input: &str) -> IResult<&str, i32> {
    map_res(take_while_m_n(4, 4, |c: char| c.is_ascii_digit()), |s: &str| {
        s.parse::<i32>()
    })
    .parse(input)
}

fn two_digits(input: &str) -> IResult<&str, u32> {
    map_res(take_while_m_n(2, 2, |c: char| c.is_ascii_digit()), |s: &str| {
        s.parse::<u32>()
    })
    .parse(input)
}

fn month_key_parser(input: &str) -> IResult<&str, (i32, u32)> {
    separated_pair(year, char('-'), two_digits).parse(input)
}

fn date_key(input: &str) -> IResult<&str, (i32, u32, u32)> {
    (
        year,
        preceded(char('-'), two_digits),
        preceded(char('-'), two_digits),
    )
        .parse(input)
}
