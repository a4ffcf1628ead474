// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{CalendarSource, Clock, SessionConfig, SourceError};
use book_me_domain::{BookingRequest, RawRange};
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn today() -> NaiveDate {
    date(2026, 10, 18)
}

pub fn range(start: &str, end: &str) -> RawRange {
    RawRange::new(start, end)
}

/// A clock frozen at 2026-10-18 09:00.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock;

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        today().and_hms_opt(9, 0, 0).unwrap()
    }
}

type Window = (NaiveDate, NaiveDate);

#[derive(Default)]
struct FakeInner {
    responses: Mutex<HashMap<Window, Result<Vec<RawRange>, SourceError>>>,
    gates: Mutex<HashMap<Window, Arc<Notify>>>,
    requests: Mutex<Vec<Window>>,
    bookings: Mutex<Vec<BookingRequest>>,
    booking_response: Mutex<Option<Result<serde_json::Value, SourceError>>>,
}

/// In-memory calendar backend.
///
/// Unknown windows answer with no free ranges. A gated window holds its
/// answer until `release` is called.
#[derive(Clone, Default)]
pub struct FakeSource {
    inner: Arc<FakeInner>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, start: NaiveDate, end: NaiveDate, ranges: Vec<RawRange>) {
        self.inner
            .responses
            .lock()
            .unwrap()
            .insert((start, end), Ok(ranges));
    }

    pub fn fail(&self, start: NaiveDate, end: NaiveDate, err: SourceError) {
        self.inner
            .responses
            .lock()
            .unwrap()
            .insert((start, end), Err(err));
    }

    pub fn gate(&self, start: NaiveDate, end: NaiveDate) {
        self.inner
            .gates
            .lock()
            .unwrap()
            .insert((start, end), Arc::new(Notify::new()));
    }

    pub fn release(&self, start: NaiveDate, end: NaiveDate) {
        let gate: Arc<Notify> = Arc::clone(&self.inner.gates.lock().unwrap()[&(start, end)]);
        gate.notify_one();
    }

    pub fn requests(&self) -> Vec<Window> {
        self.inner.requests.lock().unwrap().clone()
    }

    pub fn bookings(&self) -> Vec<BookingRequest> {
        self.inner.bookings.lock().unwrap().clone()
    }

    pub fn set_booking_response(&self, response: Result<serde_json::Value, SourceError>) {
        *self.inner.booking_response.lock().unwrap() = Some(response);
    }
}

impl CalendarSource for FakeSource {
    async fn free_ranges(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<RawRange>, SourceError> {
        self.inner.requests.lock().unwrap().push((start, end));
        let gate: Option<Arc<Notify>> = self.inner.gates.lock().unwrap().get(&(start, end)).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.inner
            .responses
            .lock()
            .unwrap()
            .get(&(start, end))
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn book(&self, request: &BookingRequest) -> Result<serde_json::Value, SourceError> {
        self.inner.bookings.lock().unwrap().push(request.clone());
        self.inner
            .booking_response
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok(serde_json::json!({ "id": "meeting-1" })))
    }
}

pub fn session_config() -> SessionConfig {
    SessionConfig::default()
}
