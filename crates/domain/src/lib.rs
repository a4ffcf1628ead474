// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod available_days;
mod calendar_export;
mod error;
mod navigation;
mod slots;
mod types;

#[cfg(test)]
mod tests;

pub use available_days::{
    AvailableDays, DAY_KEY_FORMAT, MONTH_KEY_FORMAT, MonthWindow, day_key, first_of_month,
    month_key, parse_day_key, parse_month_key, same_month,
};
pub use calendar_export::{CalendarEvent, google_calendar_url, ics_document};
pub use error::DomainError;
pub use navigation::{NavigationIntent, NavigationParams};
pub use slots::{
    DEFAULT_SLOT_DURATION_MINUTES, DEFAULT_SLOT_STEP_MINUTES, SlotPolicy, Slots, generate_slots,
};

// Re-export public types
pub use types::{
    Attendee, BookingRequest, LOCAL_TIMESTAMP_FORMAT, OFFSET_TIMESTAMP_FORMAT, RawRange, Slot,
    TIME_KEY_FORMAT, TimeRange, parse_local_timestamp, parse_time_key,
};
