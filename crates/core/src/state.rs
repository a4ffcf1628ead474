// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::config::SessionConfig;
use book_me_domain::{AvailableDays, CalendarEvent, Slot, SlotPolicy};
use chrono::NaiveDate;
use chrono_tz::Tz;

/// Where the visitor is in the booking flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// Choosing a day.
    Calendar,
    /// Choosing a time on the selected day.
    Time,
    /// Entering attendee details for the selected time.
    Form,
    /// The meeting has been booked.
    Success,
}

impl Step {
    /// Converts this step to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Calendar => "calendar",
            Self::Time => "time",
            Self::Form => "form",
            Self::Success => "success",
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Canonical booking state for one visitor session.
///
/// Only canonical data is stored. The current step and the selected slot are
/// computed on every read, so they can never disagree with the selection or
/// the fetched slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingState {
    /// First day of the month on display.
    pub(crate) view_date: NaiveDate,
    /// Month of the most recent month fetch.
    pub(crate) last_fetched_month: Option<NaiveDate>,
    /// The selected day.
    pub(crate) selected_date: Option<NaiveDate>,
    /// The selected `HH:mm` key, stored verbatim.
    pub(crate) selected_time: Option<String>,
    /// Slots of the selected day.
    pub(crate) availability: Vec<Slot>,
    /// Days with availability around the view month.
    pub(crate) available_days: AvailableDays,
    /// A slot request for the selected day is in flight.
    pub(crate) day_loading: bool,
    /// Number of booking submissions awaiting an answer.
    pub(crate) bookings_in_flight: u32,
    /// A month fetch has been running longer than the debounce delay.
    pub(crate) month_loading: bool,
    /// The message shown to the visitor, if any.
    pub(crate) error: Option<String>,
    /// Set by a successful booking; forces `Step::Success`.
    pub(crate) booked: bool,
    /// Session timezone, passed through to booking payloads.
    pub(crate) time_zone: Tz,
    /// Shape of the generated slots.
    pub(crate) slot_policy: SlotPolicy,
    /// Generation of the latest month fetch.
    pub(crate) month_generation: u64,
    /// Generation of the latest day fetch.
    pub(crate) day_generation: u64,
}

impl BookingState {
    /// Creates the initial state of a session.
    ///
    /// # Arguments
    ///
    /// * `config` - Session settings
    /// * `today` - Used as the initial view month
    #[must_use]
    pub fn new(config: &SessionConfig, today: NaiveDate) -> Self {
        Self {
            view_date: book_me_domain::first_of_month(today),
            last_fetched_month: None,
            selected_date: None,
            selected_time: None,
            availability: Vec::new(),
            available_days: AvailableDays::new(),
            day_loading: false,
            bookings_in_flight: 0,
            month_loading: false,
            error: None,
            booked: false,
            time_zone: config.time_zone,
            slot_policy: config.slot_policy,
            month_generation: 0,
            day_generation: 0,
        }
    }

    /// The current step, derived from the selection.
    #[must_use]
    pub const fn step(&self) -> Step {
        if self.booked {
            Step::Success
        } else if self.selected_time.is_some() {
            Step::Form
        } else if self.selected_date.is_some() {
            Step::Time
        } else {
            Step::Calendar
        }
    }

    /// The fetched slot whose start matches the selected time.
    ///
    /// `None` while no time is selected, or while the slots for the selected
    /// day have not arrived yet.
    #[must_use]
    pub fn selected_slot(&self) -> Option<Slot> {
        let time_key: &str = self.selected_time.as_deref()?;
        self.availability
            .iter()
            .find(|slot| slot.time_key() == time_key)
            .copied()
    }

    /// First day of the month on display.
    #[must_use]
    pub const fn view_date(&self) -> NaiveDate {
        self.view_date
    }

    /// The selected day.
    #[must_use]
    pub const fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    /// The selected `HH:mm` key.
    #[must_use]
    pub fn selected_time(&self) -> Option<&str> {
        self.selected_time.as_deref()
    }

    /// Slots of the selected day, in generation order.
    #[must_use]
    pub fn availability(&self) -> &[Slot] {
        &self.availability
    }

    /// Days with availability around the view month.
    #[must_use]
    pub const fn available_days(&self) -> &AvailableDays {
        &self.available_days
    }

    /// Whether a day fetch or booking is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.day_loading || self.bookings_in_flight > 0
    }

    /// Whether the month loading indicator should be shown.
    #[must_use]
    pub const fn is_month_loading(&self) -> bool {
        self.month_loading
    }

    /// The message to show the visitor, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The session timezone.
    #[must_use]
    pub const fn time_zone(&self) -> Tz {
        self.time_zone
    }

    /// Builds the "add to calendar" event for a completed booking.
    ///
    /// Returns `None` unless the flow is in `Step::Success`.
    #[must_use]
    pub fn confirmed_event(
        &self,
        title: &str,
        description: &str,
        location: Option<String>,
    ) -> Option<CalendarEvent> {
        if self.step() != Step::Success {
            return None;
        }
        self.selected_slot()
            .map(|slot| CalendarEvent::for_slot(&slot, title, description, location))
    }
}
