// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The booking flow: canonical state, its transitions, and the async
//! session that drives them against a calendar backend.

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

mod clock;
mod config;
mod error;
mod session;
mod source;
mod state;
mod transition;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use clock::{Clock, SystemClock};
pub use config::{DEFAULT_MONTH_LOADING_DELAY, SessionConfig, TIME_ZONE_ENV, resolve_time_zone};
pub use error::CoreError;
pub use session::{BookingSession, PendingFetches};
pub use source::{CalendarSource, SourceError};
pub use state::{BookingState, Step};
pub use transition::{
    AVAILABILITY_ERROR_MESSAGE, BOOKING_FAILED_MESSAGE, BookingSubmission, DayFetch, MonthFetch,
    SLOT_UNAVAILABLE_MESSAGE, SyncOutcome,
};
