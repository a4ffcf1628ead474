// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Day-level availability used to highlight bookable days in the calendar.

use crate::error::DomainError;
use crate::types::{RawRange, TimeRange};
use chrono::{Datelike, Months, NaiveDate};
use std::collections::BTreeSet;

/// Format of a day key.
pub const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

/// Format of a month key.
pub const MONTH_KEY_FORMAT: &str = "%Y-%m";

/// Renders a date as a `yyyy-MM-dd` day key.
#[must_use]
pub fn day_key(date: NaiveDate) -> String {
    date.format(DAY_KEY_FORMAT).to_string()
}

/// Parses a `yyyy-MM-dd` day key.
///
/// # Errors
///
/// Returns `DomainError::InvalidDayKey` if the text is not a calendar date.
pub fn parse_day_key(value: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(value, DAY_KEY_FORMAT)
        .map_err(|_| DomainError::InvalidDayKey(value.to_string()))
}

/// Renders the month containing `date` as a `yyyy-MM` key.
#[must_use]
pub fn month_key(date: NaiveDate) -> String {
    date.format(MONTH_KEY_FORMAT).to_string()
}

/// Parses a `yyyy-MM` month key into the first day of that month.
///
/// # Errors
///
/// Returns `DomainError::InvalidMonthKey` if the text is not a valid month.
pub fn parse_month_key(value: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(&format!("{value}-01"), DAY_KEY_FORMAT)
        .map_err(|_| DomainError::InvalidMonthKey(value.to_string()))
}

/// Returns the first day of the month containing `date`.
#[must_use]
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Returns true when both dates fall in the same calendar month.
#[must_use]
pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// The date range queried to build the available-day set for a view month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    /// First day queried (inclusive).
    pub start: NaiveDate,
    /// Last day queried (inclusive).
    pub end: NaiveDate,
}

impl MonthWindow {
    /// Computes the query window for `view_month`.
    ///
    /// The window runs from the first day of the previous month to the last
    /// day of the next month, with the lower bound clamped to `today`.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(window))` when there is something to query
    /// * `Ok(None)` when the whole window lies in the past
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DateArithmeticOverflow` at the edges of the
    /// representable calendar.
    pub fn for_view_month(
        view_month: NaiveDate,
        today: NaiveDate,
    ) -> Result<Option<Self>, DomainError> {
        let month_start: NaiveDate = first_of_month(view_month);
        let ideal_start: NaiveDate = month_start
            .checked_sub_months(Months::new(1))
            .ok_or_else(|| overflow("computing the previous month"))?;
        let end: NaiveDate = month_start
            .checked_add_months(Months::new(2))
            .and_then(|d| d.pred_opt())
            .ok_or_else(|| overflow("computing the end of the next month"))?;

        let start: NaiveDate = ideal_start.max(today);
        if end < start {
            return Ok(None);
        }
        Ok(Some(Self { start, end }))
    }

    /// Window covering exactly one day.
    #[must_use]
    pub const fn single_day(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }
}

fn overflow(operation: &str) -> DomainError {
    DomainError::DateArithmeticOverflow {
        operation: operation.to_string(),
    }
}

/// The set of days with at least one free range.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailableDays {
    days: BTreeSet<NaiveDate>,
}

impl AvailableDays {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            days: BTreeSet::new(),
        }
    }

    /// Builds a fresh snapshot from upstream free ranges.
    ///
    /// Each range contributes the day of its start. Days before `today` are
    /// dropped even if the upstream reports them.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimestamp` for the first unparseable range.
    pub fn from_ranges(ranges: &[RawRange], today: NaiveDate) -> Result<Self, DomainError> {
        let mut days: BTreeSet<NaiveDate> = BTreeSet::new();
        for (index, raw) in ranges.iter().enumerate() {
            let range: TimeRange = raw.parse(index)?;
            let day: NaiveDate = range.start.date();
            if day >= today {
                days.insert(day);
            }
        }
        Ok(Self { days })
    }

    /// Returns true when `day` has availability.
    #[must_use]
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.days.contains(&day)
    }

    /// Returns true when the day named by a `yyyy-MM-dd` key has availability.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        parse_day_key(key).is_ok_and(|day| self.contains(day))
    }

    /// Number of available days.
    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Returns true when no day is available.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Available days in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.iter().copied()
    }

    /// Available days as sorted `yyyy-MM-dd` keys.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.iter().map(day_key).collect()
    }
}
