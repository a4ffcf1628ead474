// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Async driver for one visitor's booking flow.

use crate::clock::Clock;
use crate::config::SessionConfig;
use crate::error::CoreError;
use crate::source::{CalendarSource, SourceError};
use crate::state::BookingState;
use crate::transition::{BookingSubmission, DayFetch, MonthFetch, SyncOutcome};
use book_me_domain::{Attendee, MonthWindow, NavigationParams, RawRange};
use chrono::NaiveDate;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// A booking session bound to one calendar backend.
///
/// The state lock is never held across a backend call. Each fetch runs in
/// its own task and applies its result through the ticket returned by the
/// transition that started it.
pub struct BookingSession<S: CalendarSource, C: Clock> {
    /// The canonical state.
    state: Arc<Mutex<BookingState>>,
    /// The calendar backend.
    source: Arc<S>,
    /// Source of "today".
    clock: Arc<C>,
    /// Session settings.
    config: SessionConfig,
}

impl<S: CalendarSource, C: Clock> BookingSession<S, C> {
    /// Creates a session in the calendar step, viewing the current month.
    #[must_use]
    pub fn new(source: S, clock: C, config: SessionConfig) -> Self {
        let state: BookingState = BookingState::new(&config, clock.today());
        Self {
            state: Arc::new(Mutex::new(state)),
            source: Arc::new(source),
            clock: Arc::new(clock),
            config,
        }
    }

    /// The session settings.
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The current day according to the session clock.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// A snapshot of the current state.
    pub async fn state(&self) -> BookingState {
        self.state.lock().await.clone()
    }

    /// Parses raw URL query values and synchronizes with them.
    ///
    /// See [`NavigationParams::from_query`] for the defaulting rules.
    pub async fn sync_query(
        &self,
        month: Option<&str>,
        day: Option<&str>,
        time: Option<&str>,
    ) -> PendingFetches {
        let params: NavigationParams = NavigationParams::from_query(month, day, time, self.today());
        self.sync_state(&params).await
    }

    /// Synchronizes the session with the navigation params and starts the
    /// fetches the change requires.
    ///
    /// # Returns
    ///
    /// A handle on the spawned fetches. Dropping it does not cancel them.
    pub async fn sync_state(&self, params: &NavigationParams) -> PendingFetches {
        let today: NaiveDate = self.today();
        let mut guard = self.state.lock().await;
        let outcome: SyncOutcome = guard.sync(params, today);
        drop(guard);

        let mut tasks: Vec<JoinHandle<()>> = Vec::new();
        if let Some(fetch) = outcome.month {
            tasks.push(self.spawn_month_fetch(fetch, today));
        }
        if let Some(fetch) = outcome.day {
            tasks.push(self.spawn_day_fetch(fetch));
        }
        PendingFetches { tasks }
    }

    /// Books the selected slot for `attendee`.
    ///
    /// The submission runs in its own task, so the in-flight booking is
    /// accounted for even if the returned future is dropped. An answer that
    /// arrives after a reset or a day change is returned but leaves the
    /// state's step alone.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NoSlotSelected` without contacting the backend
    /// when the selected time does not match a fetched slot, or the
    /// backend's failure otherwise. The visitor-facing message is stored in
    /// the state in both cases.
    pub async fn book_meeting(&self, attendee: Attendee) -> Result<serde_json::Value, CoreError> {
        let mut guard = self.state.lock().await;
        let begun: Result<BookingSubmission, CoreError> = guard.begin_booking(attendee);
        drop(guard);
        let submission: BookingSubmission = begun?;

        info!(
            start = %submission.request().start,
            end = %submission.request().end,
            "Submitting booking"
        );
        let state: Arc<Mutex<BookingState>> = Arc::clone(&self.state);
        let source: Arc<S> = Arc::clone(&self.source);
        let task: JoinHandle<Result<serde_json::Value, CoreError>> = tokio::spawn(async move {
            let result: Result<serde_json::Value, SourceError> =
                source.book(submission.request()).await;
            let mut guard = state.lock().await;
            let outcome: Result<serde_json::Value, CoreError> =
                guard.complete_booking(&submission, result);
            drop(guard);
            outcome
        });

        task.await
            .map_err(|err| CoreError::Internal(format!("booking task failed: {err}")))?
    }

    /// Returns to the calendar step. The caller is responsible for clearing
    /// the URL as well.
    pub async fn reset(&self) {
        let mut guard = self.state.lock().await;
        guard.reset();
        drop(guard);
        info!("Booking session reset");
    }

    fn spawn_month_fetch(&self, fetch: MonthFetch, today: NaiveDate) -> JoinHandle<()> {
        let state: Arc<Mutex<BookingState>> = Arc::clone(&self.state);
        let source: Arc<S> = Arc::clone(&self.source);
        let delay = self.config.month_loading_delay;

        tokio::spawn(async move {
            let indicator: JoinHandle<()> = {
                let state: Arc<Mutex<BookingState>> = Arc::clone(&state);
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    state.lock().await.show_month_loading(&fetch);
                })
            };

            let window: MonthWindow = fetch.window();
            let result: Result<Vec<RawRange>, SourceError> =
                source.free_ranges(window.start, window.end).await;
            indicator.abort();

            let mut guard = state.lock().await;
            guard.complete_month_fetch(&fetch, result, today);
            drop(guard);
        })
    }

    fn spawn_day_fetch(&self, fetch: DayFetch) -> JoinHandle<()> {
        let state: Arc<Mutex<BookingState>> = Arc::clone(&self.state);
        let source: Arc<S> = Arc::clone(&self.source);

        tokio::spawn(async move {
            let window: MonthWindow = MonthWindow::single_day(fetch.day());
            let result: Result<Vec<RawRange>, SourceError> =
                source.free_ranges(window.start, window.end).await;

            let mut guard = state.lock().await;
            guard.complete_day_fetch(&fetch, result);
            drop(guard);
        })
    }
}

/// Fetches started by one synchronization.
#[derive(Debug, Default)]
pub struct PendingFetches {
    tasks: Vec<JoinHandle<()>>,
}

impl PendingFetches {
    /// Number of fetches started.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns true when the synchronization required no fetch.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Waits until every fetch has applied or discarded its result.
    pub async fn settled(self) {
        for result in futures::future::join_all(self.tasks).await {
            if let Err(err) = result {
                warn!(%err, "Availability fetch task failed");
            }
        }
    }
}
