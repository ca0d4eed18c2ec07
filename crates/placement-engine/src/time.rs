//! Pure time utilities: weekday domain, wall-clock times, interval overlap,
//! and candidate-slot generation.
//!
//! All interval comparisons go through minutes-since-midnight integers. Times
//! are institution-local wall clock — no time zones, no seconds.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// A school weekday. Saturday and Sunday are outside the domain: date-to-day
/// mapping returns `None` for them rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl WeekDay {
    /// All five weekdays in schedule order.
    pub const ALL: [WeekDay; 5] = [
        WeekDay::Monday,
        WeekDay::Tuesday,
        WeekDay::Wednesday,
        WeekDay::Thursday,
        WeekDay::Friday,
    ];

    /// Map a calendar date to its weekday, or `None` for weekend dates.
    pub fn from_date(date: NaiveDate) -> Option<WeekDay> {
        match date.weekday() {
            Weekday::Mon => Some(WeekDay::Monday),
            Weekday::Tue => Some(WeekDay::Tuesday),
            Weekday::Wed => Some(WeekDay::Wednesday),
            Weekday::Thu => Some(WeekDay::Thursday),
            Weekday::Fri => Some(WeekDay::Friday),
            Weekday::Sat | Weekday::Sun => None,
        }
    }
}

impl fmt::Display for WeekDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WeekDay::Monday => "Monday",
            WeekDay::Tuesday => "Tuesday",
            WeekDay::Wednesday => "Wednesday",
            WeekDay::Thursday => "Thursday",
            WeekDay::Friday => "Friday",
        };
        f.write_str(name)
    }
}

/// Parse an ISO `YYYY-MM-DD` date string.
///
/// # Errors
/// Returns `EngineError::MalformedTime` if the string is not a valid date.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| EngineError::MalformedTime(format!("invalid date: {input:?}")))
}

/// A wall-clock time of day, `HH:MM`, 24-hour. Ordering compares
/// minutes-since-midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    /// Construct from hour (0-23) and minute (0-59).
    ///
    /// # Errors
    /// Returns `EngineError::MalformedTime` if either component is out of range.
    pub fn new(hour: u8, minute: u8) -> Result<TimeOfDay> {
        if hour > 23 || minute > 59 {
            return Err(EngineError::MalformedTime(format!(
                "time out of range: {hour:02}:{minute:02}"
            )));
        }
        Ok(TimeOfDay { hour, minute })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Minutes since midnight. The basis for every interval comparison.
    pub fn minutes(&self) -> u16 {
        u16::from(self.hour) * 60 + u16::from(self.minute)
    }

    /// 12-hour display form for the planning UI, e.g. `"1:05 PM"`.
    pub fn display_12h(&self) -> String {
        let meridiem = if self.hour < 12 { "AM" } else { "PM" };
        let hour_12 = match self.hour % 12 {
            0 => 12,
            h => h,
        };
        format!("{}:{:02} {}", hour_12, self.minute, meridiem)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = EngineError;

    /// Parse `"HH:MM"`. Fails fast with `MalformedTime` — a bad string never
    /// produces a usable value.
    fn from_str(s: &str) -> Result<TimeOfDay> {
        let malformed = || EngineError::MalformedTime(format!("invalid time: {s:?}"));
        let (h, m) = s.split_once(':').ok_or_else(malformed)?;
        if h.is_empty() || h.len() > 2 || m.len() != 2 {
            return Err(malformed());
        }
        let hour: u8 = h.parse().map_err(|_| malformed())?;
        let minute: u8 = m.parse().map_err(|_| malformed())?;
        TimeOfDay::new(hour, minute).map_err(|_| malformed())
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = EngineError;

    fn try_from(s: String) -> Result<TimeOfDay> {
        s.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(t: TimeOfDay) -> String {
        t.to_string()
    }
}

impl PartialOrd for TimeOfDay {
    fn partial_cmp(&self, other: &TimeOfDay) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimeOfDay {
    fn cmp(&self, other: &TimeOfDay) -> std::cmp::Ordering {
        self.minutes().cmp(&other.minutes())
    }
}

/// Half-open interval overlap on minutes-since-midnight.
///
/// Two intervals overlap iff `a_start < b_end && a_end > b_start`. This
/// excludes the adjacent case: a slot ending exactly when a constraint begins
/// does NOT overlap it.
pub fn overlaps(a_start: u16, a_end: u16, b_start: u16, b_end: u16) -> bool {
    a_start < b_end && a_end > b_start
}

/// A contiguous wall-clock interval with `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBlock {
    start: TimeOfDay,
    end: TimeOfDay,
}

impl TimeBlock {
    /// # Errors
    /// Returns `EngineError::Validation` unless `start < end`.
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Result<TimeBlock> {
        if start >= end {
            return Err(EngineError::Validation(format!(
                "start time {start} must be before end time {end}"
            )));
        }
        Ok(TimeBlock { start, end })
    }

    pub fn start(&self) -> TimeOfDay {
        self.start
    }

    pub fn end(&self) -> TimeOfDay {
        self.end
    }

    /// True when the block fully contains `[time, time + duration)`.
    pub fn contains(&self, time: TimeOfDay, duration_minutes: u16) -> bool {
        let slot_start = time.minutes();
        let slot_end = slot_start + duration_minutes;
        self.start.minutes() <= slot_start && slot_end <= self.end.minutes()
    }

    /// True when the block overlaps `[time, time + duration)` (half-open).
    pub fn overlaps_slot(&self, time: TimeOfDay, duration_minutes: u16) -> bool {
        let slot_start = time.minutes();
        overlaps(
            slot_start,
            slot_start + duration_minutes,
            self.start.minutes(),
            self.end.minutes(),
        )
    }
}

/// Generate candidate slot times from `start_hour:00` (inclusive) up to
/// `end_hour:00` (exclusive), every `step_minutes`.
///
/// Eager and deterministic: the same arguments always yield the same ordered
/// list. A zero step yields an empty list.
pub fn generate_slots(start_hour: u8, end_hour: u8, step_minutes: u16) -> Vec<TimeOfDay> {
    if step_minutes == 0 || start_hour >= end_hour || end_hour > 24 {
        return Vec::new();
    }
    let end = u16::from(end_hour) * 60;
    let mut slots = Vec::new();
    let mut cursor = u16::from(start_hour) * 60;
    while cursor < end {
        slots.push(TimeOfDay {
            hour: (cursor / 60) as u8,
            minute: (cursor % 60) as u8,
        });
        cursor += step_minutes;
    }
    slots
}
