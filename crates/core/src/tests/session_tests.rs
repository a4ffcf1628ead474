// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{FakeSource, FixedClock, date, range, session_config, today};
use crate::{
    BOOKING_FAILED_MESSAGE, BookingSession, BookingState, CoreError, PendingFetches,
    SLOT_UNAVAILABLE_MESSAGE, SourceError, Step,
};
use book_me_domain::{Attendee, BookingRequest};
use std::time::Duration;

fn session(source: &FakeSource) -> BookingSession<FakeSource, FixedClock> {
    BookingSession::new(source.clone(), FixedClock, session_config())
}

fn attendee() -> Attendee {
    Attendee::new("Grace Hopper", "grace@example.com")
}

/// Serves one hour of availability on 2026-10-20 from 10:00.
fn source_with_day_slots() -> FakeSource {
    let source: FakeSource = FakeSource::new();
    source.respond(
        date(2026, 10, 20),
        date(2026, 10, 20),
        vec![range("2026-10-20T10:00:00", "2026-10-20T11:00:00")],
    );
    source
}

#[tokio::test]
async fn test_sync_fetches_month_days_and_day_slots() {
    let source: FakeSource = FakeSource::new();
    source.respond(
        today(),
        date(2026, 11, 30),
        vec![
            range("2026-10-20T10:00:00", "2026-10-20T10:50:00"),
            range("2026-10-22T14:00:00", "2026-10-22T15:00:00"),
        ],
    );
    source.respond(
        date(2026, 10, 20),
        date(2026, 10, 20),
        vec![range("2026-10-20T10:00:00", "2026-10-20T10:50:00")],
    );
    let session = session(&source);

    let pending: PendingFetches = session
        .sync_query(Some("2026-10"), Some("2026-10-20"), None)
        .await;
    assert_eq!(pending.len(), 2);
    pending.settled().await;

    let state: BookingState = session.state().await;
    assert_eq!(state.step(), Step::Time);
    assert_eq!(state.available_days().keys(), vec!["2026-10-20", "2026-10-22"]);
    let keys: Vec<String> = state.availability().iter().map(|slot| slot.time_key()).collect();
    assert_eq!(keys, vec!["10:00", "10:15"]);
    assert!(!state.is_loading());
    assert!(state.error().is_none());
}

#[tokio::test]
async fn test_repeated_sync_for_same_month_fetches_once() {
    let source: FakeSource = FakeSource::new();
    let session = session(&source);

    session.sync_query(Some("2026-11"), None, None).await.settled().await;
    let again: PendingFetches = session.sync_query(Some("2026-11"), None, None).await;

    assert!(again.is_empty());
    assert_eq!(source.requests(), vec![(today(), date(2026, 12, 31))]);
}

#[tokio::test]
async fn test_past_month_issues_no_request() {
    let source: FakeSource = FakeSource::new();
    let session = session(&source);

    let pending: PendingFetches = session.sync_query(Some("2026-08"), None, None).await;

    assert!(pending.is_empty());
    assert!(source.requests().is_empty());
    assert!(session.state().await.available_days().is_empty());
}

#[tokio::test]
async fn test_invalid_query_values_fall_back_to_defaults() {
    let source: FakeSource = FakeSource::new();
    let session = session(&source);

    session
        .sync_query(Some("not-a-month"), Some("tomorrow"), Some("25:99"))
        .await
        .settled()
        .await;

    let state: BookingState = session.state().await;
    assert_eq!(state.view_date(), date(2026, 10, 1));
    assert_eq!(state.step(), Step::Calendar);
    assert_eq!(source.requests(), vec![(today(), date(2026, 11, 30))]);
}

#[tokio::test]
async fn test_slow_stale_month_does_not_overwrite_newer_month() {
    let source: FakeSource = FakeSource::new();
    source.gate(today(), date(2026, 12, 31));
    source.respond(
        today(),
        date(2026, 12, 31),
        vec![range("2026-11-05T09:00:00", "2026-11-05T12:00:00")],
    );
    source.respond(
        date(2026, 11, 1),
        date(2027, 1, 31),
        vec![range("2026-12-02T09:00:00", "2026-12-02T12:00:00")],
    );
    let session = session(&source);

    let november: PendingFetches = session.sync_query(Some("2026-11"), None, None).await;
    session
        .sync_query(Some("2026-12"), None, None)
        .await
        .settled()
        .await;
    source.release(today(), date(2026, 12, 31));
    november.settled().await;

    let state: BookingState = session.state().await;
    assert_eq!(state.view_date(), date(2026, 12, 1));
    assert_eq!(state.available_days().keys(), vec!["2026-12-02"]);
}

#[tokio::test(start_paused = true)]
async fn test_month_loading_indicator_is_debounced_for_slow_fetch() {
    let source: FakeSource = FakeSource::new();
    source.gate(today(), date(2026, 11, 30));
    let session = session(&source);

    let pending: PendingFetches = session.sync_query(Some("2026-10"), None, None).await;

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert!(!session.state().await.is_month_loading());

    tokio::time::sleep(Duration::from_millis(600)).await;
    assert!(session.state().await.is_month_loading());

    source.release(today(), date(2026, 11, 30));
    pending.settled().await;
    assert!(!session.state().await.is_month_loading());
}

#[tokio::test(start_paused = true)]
async fn test_month_loading_indicator_stays_off_for_fast_fetch() {
    let source: FakeSource = FakeSource::new();
    let session = session(&source);

    session
        .sync_query(Some("2026-10"), None, None)
        .await
        .settled()
        .await;
    tokio::time::sleep(Duration::from_secs(2)).await;

    assert!(!session.state().await.is_month_loading());
}

#[tokio::test(start_paused = true)]
async fn test_month_loading_indicator_is_cleared_on_failure() {
    let source: FakeSource = FakeSource::new();
    source.gate(today(), date(2026, 11, 30));
    source.fail(
        today(),
        date(2026, 11, 30),
        SourceError::Transport(String::from("timed out")),
    );
    let session = session(&source);

    let pending: PendingFetches = session.sync_query(Some("2026-10"), None, None).await;
    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert!(session.state().await.is_month_loading());

    source.release(today(), date(2026, 11, 30));
    pending.settled().await;

    let state: BookingState = session.state().await;
    assert!(!state.is_month_loading());
    assert!(state.error().is_none());
}

#[tokio::test]
async fn test_reset_discards_in_flight_day_fetch() {
    let source: FakeSource = source_with_day_slots();
    source.gate(date(2026, 10, 20), date(2026, 10, 20));
    let session = session(&source);

    let pending: PendingFetches = session
        .sync_query(Some("2026-10"), Some("2026-10-20"), None)
        .await;
    session.reset().await;
    source.release(date(2026, 10, 20), date(2026, 10, 20));
    pending.settled().await;

    let state: BookingState = session.state().await;
    assert_eq!(state.step(), Step::Calendar);
    assert!(state.availability().is_empty());
    assert!(!state.is_loading());
}

#[tokio::test]
async fn test_booking_without_slot_makes_no_request() {
    let source: FakeSource = FakeSource::new();
    let session = session(&source);
    session
        .sync_query(Some("2026-10"), Some("2026-10-20"), Some("10:00"))
        .await
        .settled()
        .await;

    let result = session.book_meeting(attendee()).await;

    assert_eq!(result, Err(CoreError::NoSlotSelected));
    assert!(source.bookings().is_empty());
    let state: BookingState = session.state().await;
    assert_eq!(state.error(), Some(SLOT_UNAVAILABLE_MESSAGE));
    assert_eq!(state.step(), Step::Form);
}

#[tokio::test]
async fn test_booking_submits_offset_timestamps_and_succeeds() {
    let source: FakeSource = source_with_day_slots();
    let config = session_config().with_time_zone(chrono_tz::Europe::Berlin);
    let session = BookingSession::new(source.clone(), FixedClock, config);
    session
        .sync_query(Some("2026-10"), Some("2026-10-20"), Some("10:15"))
        .await
        .settled()
        .await;

    let body = session.book_meeting(attendee()).await.unwrap();

    assert_eq!(body["id"], "meeting-1");
    let bookings: Vec<BookingRequest> = source.bookings();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].start, "2026-10-20T10:15:00+02:00");
    assert_eq!(bookings[0].end, "2026-10-20T10:45:00+02:00");
    assert_eq!(bookings[0].attendees, vec![attendee()]);

    let state: BookingState = session.state().await;
    assert_eq!(state.step(), Step::Success);
    assert!(!state.is_loading());
    assert!(state.error().is_none());
    let event = state.confirmed_event("Intro call", "Agenda", None).unwrap();
    assert_eq!(event.start, date(2026, 10, 20).and_hms_opt(10, 15, 0).unwrap());
}

#[tokio::test]
async fn test_booking_failure_surfaces_backend_detail() {
    let source: FakeSource = source_with_day_slots();
    source.set_booking_response(Err(SourceError::Status {
        status: 409,
        body: String::from(r#"{"detail":"Slot already taken"}"#),
    }));
    let session = session(&source);
    session
        .sync_query(Some("2026-10"), Some("2026-10-20"), Some("10:00"))
        .await
        .settled()
        .await;

    let result = session.book_meeting(attendee()).await;

    assert!(matches!(result, Err(CoreError::Source(SourceError::Status { status: 409, .. }))));
    let state: BookingState = session.state().await;
    assert_eq!(state.error(), Some("Slot already taken"));
    assert_eq!(state.step(), Step::Form);
    assert!(!state.is_loading());
}

#[tokio::test]
async fn test_booking_transport_failure_uses_fallback_message() {
    let source: FakeSource = source_with_day_slots();
    source.set_booking_response(Err(SourceError::Transport(String::from("connection refused"))));
    let session = session(&source);
    session
        .sync_query(Some("2026-10"), Some("2026-10-20"), Some("10:00"))
        .await
        .settled()
        .await;

    let result = session.book_meeting(attendee()).await;

    assert!(result.is_err());
    assert_eq!(session.state().await.error(), Some(BOOKING_FAILED_MESSAGE));
}
