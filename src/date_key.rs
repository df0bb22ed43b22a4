//! Filing tasks under calendar days
//!
//! Every task that belongs on the calendar is filed under a [`DateKey`], i.e. a `YYYY-MM-DD` day.
//! Keys are built from calendar fields only, never from timestamps, so that a task never moves to another day because of a timezone.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;
use crate::task::{CompletionStatus, Task};

/// A calendar day, formatted as `YYYY-MM-DD`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DateKey {
    date: NaiveDate,
}

impl DateKey {
    /// Build a key from a year, a 0-based month and a day of month.
    ///
    /// Returns `None` if these fields are not a valid calendar day.
    pub fn from_ymd0(year: i32, month0: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month0.checked_add(1)?, day)
            .map(Self::from)
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// The key of the current local day
    pub fn today() -> Self {
        Self::from(Local::now().date_naive())
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self { date }
    }
}

impl Display for DateKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{:04}-{:02}-{:02}", self.date.year(), self.date.month(), self.date.day())
    }
}

impl FromStr for DateKey {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_calendar_date(s).map(Self::from)
    }
}

/// Used to support serde
impl Serialize for DateKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}
/// Used to support serde
impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D>(deserializer: D) -> Result<DateKey, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Parse the calendar date of an ISO 8601 date (`2024-03-05`) or date-time (`2024-03-05T22:30:00Z`).
///
/// Only the date part is kept, as written. The time and offset (if any) are ignored.
pub fn parse_calendar_date(s: &str) -> Result<NaiveDate, Error> {
    let date_part = s.trim().split('T').next().unwrap_or_default();
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|_| Error::InvalidDate(s.to_string()))
}

/// Returns the key of the day `task` should be filed under, or `None` if it should not be filed at all.
///
/// See [`key_for_on`]. The current local day is used for completed tasks that have no date at all.
pub fn key_for(task: &Task) -> Option<DateKey> {
    key_for_on(task, Local::now().date_naive())
}

/// Returns the key of the day `task` should be filed under, or `None` if it should not be filed at all.
///
/// * completed tasks are filed under their completion date, else their deadline, else `today`
/// * active tasks are filed under their deadline. Active tasks without deadline are not filed.
pub fn key_for_on(task: &Task, today: NaiveDate) -> Option<DateKey> {
    let date = match task.completion_status() {
        CompletionStatus::Completed(completion_date) => {
            completion_date
                .or_else(|| task.deadline())
                .unwrap_or(today)
        },
        CompletionStatus::InProgress => task.deadline()?,
    };
    Some(DateKey::from(date))
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::TaskId;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn completed(completion: Option<NaiveDate>, deadline: Option<NaiveDate>) -> Task {
        Task::new_with_parameters(TaskId::from("c"), "Done".to_string(), None,
            deadline, CompletionStatus::Completed(completion))
    }

    #[test]
    fn completed_tasks_use_their_completion_date() {
        let today = date(2030, 1, 1);
        let task = completed(Some(date(2024, 3, 5)), Some(date(2024, 4, 20)));
        assert_eq!(key_for_on(&task, today).unwrap().to_string(), "2024-03-05");

        let task = completed(Some(date(2024, 3, 5)), None);
        assert_eq!(key_for_on(&task, today).unwrap().to_string(), "2024-03-05");
    }

    #[test]
    fn completed_tasks_fall_back_to_deadline_then_today() {
        let today = date(2030, 1, 1);
        let task = completed(None, Some(date(2024, 4, 20)));
        assert_eq!(key_for_on(&task, today).unwrap().to_string(), "2024-04-20");

        let task = completed(None, None);
        assert_eq!(key_for_on(&task, today).unwrap().to_string(), "2030-01-01");
    }

    #[test]
    fn active_tasks_use_their_deadline() {
        let task = Task::new(TaskId::from("a"), "Active".to_string(), Some(date(2024, 3, 5)));
        assert_eq!(key_for(&task).unwrap().to_string(), "2024-03-05");

        let undated = Task::new(TaskId::from("b"), "Someday".to_string(), None);
        assert_eq!(key_for(&undated), None);
    }

    #[test]
    fn keys_are_zero_padded() {
        let key = DateKey::from_ymd0(987, 0, 9).unwrap();
        assert_eq!(key.to_string(), "0987-01-09");
        assert_eq!(DateKey::from_ymd0(2024, 1, 30), None);
        assert_eq!(DateKey::from_ymd0(2024, 12, 1), None);
    }

    #[test]
    fn parse_dates_and_date_times() {
        assert_eq!(parse_calendar_date("2024-06-02").unwrap(), date(2024, 6, 2));
        assert_eq!(parse_calendar_date("2024-06-02T23:59:59.000Z").unwrap(), date(2024, 6, 2));
        assert_eq!(parse_calendar_date("2024-06-02T00:30:00+05:00").unwrap(), date(2024, 6, 2));
        assert!(parse_calendar_date("02/06/2024").is_err());
        assert!(parse_calendar_date("").is_err());

        let key: DateKey = "2024-06-01".parse().unwrap();
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"2024-06-01\"");
    }
}
