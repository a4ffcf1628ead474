// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! URL parameters driving the booking flow.
//!
//! The booking page is addressed by three independent query parameters:
//!
//! - `month`: the calendar month on display (`yyyy-MM`)
//! - `day`: the selected day (`yyyy-MM-dd`)
//! - `time`: the selected slot start (`HH:mm`)
//!
//! Invalid values are never errors here: they fall back to their defaults.

use crate::available_days::{
    day_key, first_of_month, month_key, parse_day_key, parse_month_key,
};
use crate::error::DomainError;
use crate::types::{TIME_KEY_FORMAT, parse_local_timestamp, parse_time_key};
use chrono::{Months, NaiveDate};
use tracing::debug;

/// Parsed navigation state as consumed by the booking state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationParams {
    view_month: NaiveDate,
    selected_date: Option<NaiveDate>,
    selected_time: Option<String>,
}

impl NavigationParams {
    /// Creates navigation params. `view_month` is normalized to the first of its month.
    #[must_use]
    pub fn new(
        view_month: NaiveDate,
        selected_date: Option<NaiveDate>,
        selected_time: Option<String>,
    ) -> Self {
        Self {
            view_month: first_of_month(view_month),
            selected_date,
            selected_time,
        }
    }

    /// Parses raw query values, defaulting anything missing or invalid.
    ///
    /// # Arguments
    ///
    /// * `month` - Raw `month` value (`yyyy-MM`)
    /// * `day` - Raw `day` value (ISO date, or ISO date-time whose date is used)
    /// * `time` - Raw `time` value (`HH:mm`)
    /// * `today` - Used for the default view month
    #[must_use]
    pub fn from_query(
        month: Option<&str>,
        day: Option<&str>,
        time: Option<&str>,
        today: NaiveDate,
    ) -> Self {
        let view_month: NaiveDate = month
            .and_then(|value| {
                parse_month_key(value)
                    .inspect_err(|err| debug!(%err, "Ignoring month parameter"))
                    .ok()
            })
            .unwrap_or(today);

        let selected_date: Option<NaiveDate> = day.and_then(|value| {
            parse_day_key(value)
                .ok()
                .or_else(|| parse_local_timestamp(value).map(|dt| dt.date()))
                .or_else(|| {
                    debug!(day = %value, "Ignoring day parameter");
                    None
                })
        });

        let selected_time: Option<String> = time.and_then(|value| {
            parse_time_key(value)
                .inspect_err(|err| debug!(%err, "Ignoring time parameter"))
                .ok()
                .map(|parsed| parsed.format(TIME_KEY_FORMAT).to_string())
        });

        Self::new(view_month, selected_date, selected_time)
    }

    /// First day of the month on display.
    #[must_use]
    pub const fn view_month(&self) -> NaiveDate {
        self.view_month
    }

    /// The selected day, if any.
    #[must_use]
    pub const fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    /// The selected `HH:mm` slot key, if any.
    #[must_use]
    pub fn selected_time(&self) -> Option<&str> {
        self.selected_time.as_deref()
    }

    /// Applies a navigation intent, producing the params the URL should carry next.
    #[must_use]
    pub fn apply(&self, intent: &NavigationIntent) -> Self {
        match intent {
            NavigationIntent::ShowMonth(month) => Self::new(
                *month,
                self.selected_date,
                self.selected_time.clone(),
            ),
            NavigationIntent::PickDay(day) => Self::new(self.view_month, Some(*day), None),
            NavigationIntent::PickSlot(time_key) => Self::new(
                self.view_month,
                self.selected_date,
                Some(time_key.clone()),
            ),
            NavigationIntent::Clear => Self::new(self.view_month, None, None),
        }
    }

    /// Builds the intent for moving the calendar by `delta` months.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DateArithmeticOverflow` at the edges of the
    /// representable calendar.
    pub fn shift_month(&self, delta: i32) -> Result<NavigationIntent, DomainError> {
        let months: Months = Months::new(delta.unsigned_abs());
        let target: Option<NaiveDate> = if delta >= 0 {
            self.view_month.checked_add_months(months)
        } else {
            self.view_month.checked_sub_months(months)
        };
        target
            .map(NavigationIntent::ShowMonth)
            .ok_or_else(|| DomainError::DateArithmeticOverflow {
                operation: format!("shifting the view month by {delta}"),
            })
    }

    /// Renders the params back into query pairs, in `month`, `day`, `time` order.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs: Vec<(&'static str, String)> = vec![("month", month_key(self.view_month))];
        if let Some(day) = self.selected_date {
            pairs.push(("day", day_key(day)));
        }
        if let Some(time) = &self.selected_time {
            pairs.push(("time", time.clone()));
        }
        pairs
    }

    /// Renders the params as an encoded query string (without the leading `?`).
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.to_query_pairs() {
            serializer.append_pair(key, &value);
        }
        serializer.finish()
    }
}

/// A request to change the URL, produced when the visitor navigates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationIntent {
    /// Show another month; keeps the current selection.
    ShowMonth(NaiveDate),
    /// Select a day; clears any selected time.
    PickDay(NaiveDate),
    /// Select a slot by its `HH:mm` key.
    PickSlot(String),
    /// Drop the day and time selection.
    Clear,
}
