//! Month calendar views over the tasks filed by day
//!
//! Months are 0-based (0 is January, 11 is December) everywhere in this module, days of month are 1-based.

pub mod month_cursor;
pub use month_cursor::MonthCursor;

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::date_key::DateKey;
use crate::task::Task;

/// How many completed task names a day cell of a [`MonthGrid`] shows
pub const DAY_PREVIEW_LIMIT: usize = 3;


/// Answers day-level queries over tasks filed by [`DateKey`].
///
/// Every query is a lookup in the map it was built from. None of them fail: a day without tasks simply has no tasks.
#[derive(Clone, Copy, Debug)]
pub struct CalendarAggregator<'a> {
    by_date: &'a BTreeMap<DateKey, Vec<Task>>,
}

impl<'a> CalendarAggregator<'a> {
    /// Build an aggregator over a map such as [`TaskStore::by_date_key`](crate::store::TaskStore::by_date_key)
    pub fn new(by_date: &'a BTreeMap<DateKey, Vec<Task>>) -> Self {
        Self { by_date }
    }

    /// The tasks filed under a day, in their store order. Invalid days have no tasks.
    pub fn tasks_for_day(&self, year: i32, month: u32, day: u32) -> &'a [Task] {
        DateKey::from_ymd0(year, month, day)
            .and_then(|key| self.by_date.get(&key))
            .map(|bucket| bucket.as_slice())
            .unwrap_or(&[])
    }

    /// The completed tasks filed under a day
    pub fn completed_tasks_for_day(&self, year: i32, month: u32, day: u32) -> Vec<&'a Task> {
        self.tasks_for_day(year, month, day)
            .iter()
            .filter(|task| task.completed())
            .collect()
    }

    /// How many completed tasks are filed under a day
    pub fn completed_count_for_day(&self, year: i32, month: u32, day: u32) -> usize {
        self.tasks_for_day(year, month, day)
            .iter()
            .filter(|task| task.completed())
            .count()
    }

    /// Whether `task` is still in progress after its deadline day.
    ///
    /// Only calendar days are compared: a task due on `reference` is not overdue yet.
    pub fn is_overdue(task: &Task, reference: NaiveDate) -> bool {
        if task.completed() {
            return false;
        }
        match task.deadline() {
            None => false,
            Some(deadline) => deadline < reference,
        }
    }

    /// Whether the given day is the day of `reference`
    pub fn is_today(year: i32, month: u32, day: u32, reference: NaiveDate) -> bool {
        reference.year() == year
            && reference.month0() == month
            && reference.day() == day
    }

    /// Build the cells of a month calendar.
    ///
    /// Returns `None` if `month` is not a valid month.
    pub fn month_grid(&self, year: i32, month: u32, today: NaiveDate) -> Option<MonthGrid> {
        let (first, last) = month_bounds(year, month)?;

        let mut days: Vec<DayCell> = (1..=last.day())
            .map(|day| DayCell {
                day,
                completed_count: 0,
                preview: Vec::new(),
                overflow: 0,
                is_today: Self::is_today(year, month, day, today),
            })
            .collect();

        for (key, bucket) in self.by_date.range(DateKey::from(first)..=DateKey::from(last)) {
            let cell = &mut days[key.date().day0() as usize];
            for task in bucket.iter().filter(|task| task.completed()) {
                cell.completed_count += 1;
                if cell.preview.len() < DAY_PREVIEW_LIMIT {
                    cell.preview.push(task.name().to_string());
                } else {
                    cell.overflow += 1;
                }
            }
        }

        Some(MonthGrid {
            year,
            month,
            leading_blanks: first.weekday().num_days_from_sunday(),
            days,
        })
    }
}


/// The content of a month calendar, ready to be laid out in weeks starting on Sunday
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    /// 0-based
    pub month: u32,
    /// Number of empty cells before the 1st of the month
    pub leading_blanks: u32,
    /// One cell per day of month, in order
    pub days: Vec<DayCell>,
}

impl MonthGrid {
    pub fn day(&self, day: u32) -> Option<&DayCell> {
        let index = day.checked_sub(1)?;
        self.days.get(index as usize)
    }

    /// Total count of completed tasks this month
    pub fn completed_count(&self) -> usize {
        self.days.iter().map(|cell| cell.completed_count).sum()
    }

    /// The cells split into weeks. `None` stands for an empty cell, before the 1st or after the last day of month.
    pub fn weeks(&self) -> Vec<Vec<Option<&DayCell>>> {
        let mut cells: Vec<Option<&DayCell>> = Vec::new();
        cells.extend((0..self.leading_blanks).map(|_| None));
        cells.extend(self.days.iter().map(Some));
        while cells.len() % 7 != 0 {
            cells.push(None);
        }
        cells.chunks(7).map(|week| week.to_vec()).collect()
    }
}

/// A day of a [`MonthGrid`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DayCell {
    pub day: u32,
    pub completed_count: usize,
    /// Names of the first completed tasks of the day (at most [`DAY_PREVIEW_LIMIT`])
    pub preview: Vec<String>,
    /// Completed tasks that did not fit in the preview
    pub overflow: usize,
    pub is_today: bool,
}


/// Number of days in a month, or `None` for an invalid month
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    month_bounds(year, month).map(|(_, last)| last.day())
}

/// The first and the last day of a month, or `None` for an invalid month
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    if month > 11 {
        return None;
    }
    let first = NaiveDate::from_ymd_opt(year, month + 1, 1)?;
    let first_of_next = if month == 11 {
        NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 2, 1)?
    };
    Some((first, first_of_next.pred_opt()?))
}
