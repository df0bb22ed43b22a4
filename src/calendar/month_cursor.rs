//! The month a calendar view currently displays

use std::fmt::{Display, Formatter};

use chrono::{Datelike, Local, NaiveDate};

use crate::error::Error;

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

/// A `(year, month)` pair, with a 0-based month that is always in `0..=11`.
///
/// Moving to the next or previous month rolls over year boundaries. The only bounds are the ones of `i32` years.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthCursor {
    year: i32,
    month: u32,
}

impl MonthCursor {
    pub fn new(year: i32, month: u32) -> Result<Self, Error> {
        if month > 11 {
            return Err(Error::InvalidMonth(month));
        }
        Ok(Self { year, month })
    }

    /// The month that contains `date`
    pub fn containing(date: NaiveDate) -> Self {
        Self { year: date.year(), month: date.month0() }
    }

    /// The current local month
    pub fn current() -> Self {
        Self::containing(Local::now().date_naive())
    }

    pub fn year(&self) -> i32     { self.year  }
    pub fn month(&self) -> u32    { self.month }
    pub fn as_tuple(&self) -> (i32, u32) { (self.year, self.month) }

    /// Move to the next month. The cursor stays on December of `i32::MAX`
    pub fn next(&mut self) {
        if self.month < 11 {
            self.month += 1;
            return;
        }
        match self.year.checked_add(1) {
            Some(year) => {
                self.year = year;
                self.month = 0;
            },
            None => log::debug!("{} is the last month a cursor can show", self),
        }
    }

    /// Move to the previous month. The cursor stays on January of `i32::MIN`
    pub fn previous(&mut self) {
        if self.month > 0 {
            self.month -= 1;
            return;
        }
        match self.year.checked_sub(1) {
            Some(year) => {
                self.year = year;
                self.month = 11;
            },
            None => log::debug!("{} is the first month a cursor can show", self),
        }
    }

    /// Display another month. Unlike [`Self::next`] and [`Self::previous`], an out-of-range month is rejected rather than wrapped.
    pub fn jump_to(&mut self, year: i32, month: u32) -> Result<(), Error> {
        *self = Self::new(year, month)?;
        Ok(())
    }

    /// The first and last day of this month, e.g. to fetch the tasks of this month only
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        super::month_bounds(self.year, self.month)
    }

    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[self.month as usize]
    }
}

impl Display for MonthCursor {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{} {}", self.month_name(), self.year)
    }
}
