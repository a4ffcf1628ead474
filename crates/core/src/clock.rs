// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::{NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

/// Source of the current date for the booking flow.
pub trait Clock: Send + Sync + 'static {
    /// The current wall-clock time in the session timezone.
    fn now(&self) -> NaiveDateTime;

    /// The current day in the session timezone.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Reads the system clock and converts it to the session timezone.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    time_zone: Tz,
}

impl SystemClock {
    /// Creates a clock for `time_zone`.
    #[must_use]
    pub const fn new(time_zone: Tz) -> Self {
        Self { time_zone }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.time_zone).naive_local()
    }
}
