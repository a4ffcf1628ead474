// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State transitions of the booking flow.
//!
//! Transitions never perform I/O. Starting a fetch returns a ticket
//! describing what to request; the caller performs the request and hands the
//! result back together with the ticket. A result is applied only if its
//! ticket is still the latest of its kind, so a slow response can never
//! overwrite the result of a request issued after it.

use crate::error::CoreError;
use crate::source::SourceError;
use crate::state::BookingState;
use book_me_domain::{
    Attendee, AvailableDays, BookingRequest, MonthWindow, NavigationParams, RawRange, Slot,
    generate_slots, same_month,
};
use chrono::NaiveDate;
use tracing::{debug, info, warn};

/// Shown when the slots of a day cannot be loaded.
pub const AVAILABILITY_ERROR_MESSAGE: &str = "Failed to load availability. Please try again.";

/// Shown when booking is attempted without a resolvable slot.
pub const SLOT_UNAVAILABLE_MESSAGE: &str = "Time Slot is not available";

/// Shown when the booking backend gives no usable message.
pub const BOOKING_FAILED_MESSAGE: &str = "Booking failed";

/// Ticket for a month availability request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthFetch {
    generation: u64,
    view_month: NaiveDate,
    window: MonthWindow,
}

impl MonthFetch {
    /// The month the request was issued for.
    #[must_use]
    pub const fn view_month(&self) -> NaiveDate {
        self.view_month
    }

    /// The days to query.
    #[must_use]
    pub const fn window(&self) -> MonthWindow {
        self.window
    }
}

/// Ticket for a day slot request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayFetch {
    generation: u64,
    day: NaiveDate,
}

impl DayFetch {
    /// The day the request was issued for.
    #[must_use]
    pub const fn day(&self) -> NaiveDate {
        self.day
    }
}

/// A booking payload tagged with the selection it was made for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingSubmission {
    day_generation: u64,
    request: BookingRequest,
}

impl BookingSubmission {
    /// The payload to send to the booking backend.
    #[must_use]
    pub const fn request(&self) -> &BookingRequest {
        &self.request
    }
}

/// Requests triggered by a navigation change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOutcome {
    /// Month availability to fetch, if the view month changed.
    pub month: Option<MonthFetch>,
    /// Day slots to fetch, if the selected day changed.
    pub day: Option<DayFetch>,
}

impl BookingState {
    /// Aligns the state with the navigation params.
    ///
    /// # Arguments
    ///
    /// * `params` - The parsed URL parameters
    /// * `today` - Lower bound for month queries
    ///
    /// # Returns
    ///
    /// The fetches the caller must perform.
    pub fn sync(&mut self, params: &NavigationParams, today: NaiveDate) -> SyncOutcome {
        let mut outcome: SyncOutcome = SyncOutcome::default();
        self.booked = false;

        let view_month: NaiveDate = params.view_month();
        if self
            .last_fetched_month
            .is_none_or(|last| !same_month(last, view_month))
        {
            self.view_date = view_month;
            self.last_fetched_month = Some(view_month);
            outcome.month = self.begin_month_fetch(view_month, today);
        }

        match params.selected_date() {
            Some(day) if self.selected_date != Some(day) => {
                self.selected_date = Some(day);
                outcome.day = Some(self.begin_day_fetch(day));
            }
            Some(_) => {}
            None => self.clear_selected_day(),
        }

        self.selected_time = params.selected_time().map(str::to_string);

        debug!(
            step = %self.step(),
            month_fetch = outcome.month.is_some(),
            day_fetch = outcome.day.is_some(),
            "Synchronized booking state"
        );
        outcome
    }

    /// Starts a month availability request.
    ///
    /// Returns `None` when nothing needs to be queried: the window lies
    /// entirely in the past (the day set is emptied) or cannot be computed
    /// (the day set is kept).
    pub fn begin_month_fetch(
        &mut self,
        view_month: NaiveDate,
        today: NaiveDate,
    ) -> Option<MonthFetch> {
        self.month_generation += 1;
        self.month_loading = false;

        match MonthWindow::for_view_month(view_month, today) {
            Ok(Some(window)) => Some(MonthFetch {
                generation: self.month_generation,
                view_month,
                window,
            }),
            Ok(None) => {
                debug!(%view_month, "Month window lies in the past, skipping query");
                self.available_days = AvailableDays::new();
                None
            }
            Err(err) => {
                warn!(%view_month, %err, "Cannot compute month window");
                None
            }
        }
    }

    /// Shows the month loading indicator if `fetch` is still the latest.
    pub fn show_month_loading(&mut self, fetch: &MonthFetch) {
        if fetch.generation == self.month_generation {
            self.month_loading = true;
        }
    }

    /// Applies the result of a month request.
    ///
    /// Failures keep the previous day set; they are logged and never shown.
    ///
    /// # Returns
    ///
    /// `false` if the ticket was stale and the result was discarded.
    pub fn complete_month_fetch(
        &mut self,
        fetch: &MonthFetch,
        result: Result<Vec<RawRange>, SourceError>,
        today: NaiveDate,
    ) -> bool {
        if fetch.generation != self.month_generation {
            debug!(view_month = %fetch.view_month, "Discarding stale month availability");
            return false;
        }
        self.month_loading = false;

        let days: Result<AvailableDays, CoreError> = result
            .map_err(CoreError::from)
            .and_then(|ranges| AvailableDays::from_ranges(&ranges, today).map_err(CoreError::from));
        match days {
            Ok(days) => {
                debug!(view_month = %fetch.view_month, days = days.len(), "Updated available days");
                self.available_days = days;
            }
            Err(err) => {
                warn!(view_month = %fetch.view_month, %err, "Failed to fetch month availability");
            }
        }
        true
    }

    /// Starts a slot request for `day`, clearing the previous slots and error.
    pub fn begin_day_fetch(&mut self, day: NaiveDate) -> DayFetch {
        self.day_generation += 1;
        self.day_loading = true;
        self.error = None;
        self.availability.clear();
        DayFetch {
            generation: self.day_generation,
            day,
        }
    }

    /// Applies the result of a day request.
    ///
    /// # Returns
    ///
    /// `false` if the ticket was stale and the result was discarded.
    pub fn complete_day_fetch(
        &mut self,
        fetch: &DayFetch,
        result: Result<Vec<RawRange>, SourceError>,
    ) -> bool {
        if fetch.generation != self.day_generation || self.selected_date != Some(fetch.day) {
            debug!(day = %fetch.day, "Discarding stale day availability");
            return false;
        }
        self.day_loading = false;

        let slots: Result<Vec<Slot>, CoreError> = result
            .map_err(CoreError::from)
            .and_then(|ranges| generate_slots(&ranges, &self.slot_policy).map_err(CoreError::from));
        match slots {
            Ok(slots) => {
                debug!(day = %fetch.day, slots = slots.len(), "Loaded day availability");
                self.availability = slots;
                self.error = None;
            }
            Err(err) => {
                warn!(day = %fetch.day, %err, "Failed to fetch day availability");
                self.availability.clear();
                self.error = Some(AVAILABILITY_ERROR_MESSAGE.to_string());
            }
        }
        true
    }

    /// Starts a booking for the selected slot.
    ///
    /// On success the state is marked loading until the matching
    /// [`Self::complete_booking`] call, and the payload to submit is returned
    /// tagged with the current selection.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NoSlotSelected` (and sets the visitor-facing
    /// error) when no fetched slot matches the selected time, or
    /// `CoreError::DomainViolation` when the slot cannot be given a UTC offset.
    pub fn begin_booking(&mut self, attendee: Attendee) -> Result<BookingSubmission, CoreError> {
        let Some(slot) = self.selected_slot() else {
            self.error = Some(SLOT_UNAVAILABLE_MESSAGE.to_string());
            return Err(CoreError::NoSlotSelected);
        };

        let request: BookingRequest = BookingRequest::for_slot(&slot, self.time_zone, attendee)
            .map_err(|err| {
                warn!(%err, "Cannot build booking payload");
                self.error = Some(SLOT_UNAVAILABLE_MESSAGE.to_string());
                CoreError::from(err)
            })?;

        self.bookings_in_flight += 1;
        self.error = None;
        Ok(BookingSubmission {
            day_generation: self.day_generation,
            request,
        })
    }

    /// Applies the booking backend's answer.
    ///
    /// The answer only changes the step or the visitor-facing error while
    /// the day selection it was made for is still current. After a reset or
    /// a day change it is returned to the caller and otherwise only logged.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Source` when the backend rejected the booking; the
    /// step is left unchanged so the visitor can retry.
    pub fn complete_booking(
        &mut self,
        submission: &BookingSubmission,
        result: Result<serde_json::Value, SourceError>,
    ) -> Result<serde_json::Value, CoreError> {
        self.bookings_in_flight = self.bookings_in_flight.saturating_sub(1);
        let current: bool = submission.day_generation == self.day_generation;
        match result {
            Ok(body) => {
                info!(start = %submission.request.start, current, "Meeting booked");
                if current {
                    self.booked = true;
                }
                Ok(body)
            }
            Err(err) => {
                warn!(%err, current, "Booking failed");
                if current {
                    self.error = Some(err.user_message(BOOKING_FAILED_MESSAGE));
                }
                Err(CoreError::from(err))
            }
        }
    }

    /// Returns to the calendar step, independent of the URL.
    ///
    /// Any in-flight day request is discarded when it completes.
    pub fn reset(&mut self) {
        self.clear_selected_day();
        self.selected_time = None;
        self.error = None;
        self.booked = false;
    }

    fn clear_selected_day(&mut self) {
        if self.selected_date.take().is_some() {
            self.day_generation += 1;
            self.day_loading = false;
        }
        self.availability.clear();
    }
}
