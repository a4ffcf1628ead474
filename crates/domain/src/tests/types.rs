// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::at;
use crate::{
    Attendee, BookingRequest, DomainError, RawRange, Slot, SlotPolicy, TimeRange,
    parse_local_timestamp, parse_time_key,
};
use chrono_tz::Tz;

fn slot(start: &str, end: &str) -> Slot {
    Slot::new(at(start), at(end))
}

#[test]
fn test_parse_local_timestamp_accepts_upstream_shapes() {
    let expected = at("2026-10-20T10:00:00");

    assert_eq!(parse_local_timestamp("2026-10-20T10:00:00"), Some(expected));
    assert_eq!(parse_local_timestamp("2026-10-20T10:00"), Some(expected));
    assert_eq!(
        parse_local_timestamp("2026-10-20T10:00:00.000"),
        Some(expected)
    );
}

#[test]
fn test_parse_local_timestamp_keeps_wall_clock_of_offset_timestamps() {
    assert_eq!(
        parse_local_timestamp("2026-10-20T10:00:00+02:00"),
        Some(at("2026-10-20T10:00:00"))
    );
}

#[test]
fn test_parse_local_timestamp_rejects_garbage() {
    assert_eq!(parse_local_timestamp(""), None);
    assert_eq!(parse_local_timestamp("tomorrow"), None);
    assert_eq!(parse_local_timestamp("2026-13-01T10:00:00"), None);
}

#[test]
fn test_raw_range_parse_reports_index() {
    let raw: RawRange = RawRange::new("2026-10-20T10:00:00", "oops");

    assert_eq!(
        raw.parse(4),
        Err(DomainError::InvalidTimestamp {
            range_index: 4,
            value: String::from("oops"),
        })
    );
}

#[test]
fn test_time_range_emptiness_and_containment() {
    let range: TimeRange = TimeRange::new(at("2026-10-20T10:00:00"), at("2026-10-20T11:00:00"));

    assert!(!range.is_empty());
    assert!(range.contains(at("2026-10-20T10:00:00")));
    assert!(!range.contains(at("2026-10-20T11:00:00")));
    assert!(TimeRange::new(range.end, range.start).is_empty());
}

#[test]
fn test_slot_time_key_and_wire_shape() {
    let slot: Slot = slot("2026-10-20T09:45:00", "2026-10-20T10:15:00");

    assert_eq!(slot.time_key(), "09:45");
    assert_eq!(
        slot.to_raw(),
        RawRange::new("2026-10-20T09:45:00", "2026-10-20T10:15:00")
    );
}

#[test]
fn test_raw_range_deserializes_from_upstream_json() {
    let ranges: Vec<RawRange> = serde_json::from_str(
        r#"[{"start":"2026-10-20T10:00:00","end":"2026-10-20T12:00:00"}]"#,
    )
    .unwrap();

    assert_eq!(
        ranges,
        vec![RawRange::new("2026-10-20T10:00:00", "2026-10-20T12:00:00")]
    );
    let slots: Vec<Slot> = SlotPolicy::default()
        .slots(&ranges[0].parse(0).unwrap())
        .collect();
    assert_eq!(slots.len(), 7);
}

#[test]
fn test_parse_time_key() {
    assert!(parse_time_key("09:30").is_ok());
    assert_eq!(
        parse_time_key("9.30"),
        Err(DomainError::InvalidTimeKey(String::from("9.30")))
    );
    assert!(parse_time_key("25:00").is_err());
}

#[test]
fn test_booking_request_carries_explicit_offset() {
    let slot: Slot = slot("2026-10-20T10:00:00", "2026-10-20T10:30:00");
    let attendee: Attendee = Attendee::new("Ada Lovelace", "ada@example.com");

    let request: BookingRequest =
        BookingRequest::for_slot(&slot, Tz::Europe__Berlin, attendee.clone()).unwrap();

    assert_eq!(request.start, "2026-10-20T10:00:00+02:00");
    assert_eq!(request.end, "2026-10-20T10:30:00+02:00");
    assert_eq!(request.attendees, vec![attendee]);
}

#[test]
fn test_booking_request_in_utc_uses_zero_offset() {
    let slot: Slot = slot("2026-12-01T15:15:00", "2026-12-01T15:45:00");

    let request: BookingRequest =
        BookingRequest::for_slot(&slot, Tz::UTC, Attendee::new("A", "a@example.com")).unwrap();

    assert_eq!(request.start, "2026-12-01T15:15:00+00:00");
    assert_eq!(request.end, "2026-12-01T15:45:00+00:00");
}

#[test]
fn test_booking_request_rejects_nonexistent_local_time() {
    // Clocks jump from 02:00 to 03:00 in Berlin on this day.
    let slot: Slot = slot("2026-03-29T02:15:00", "2026-03-29T02:45:00");

    let err: DomainError =
        BookingRequest::for_slot(&slot, Tz::Europe__Berlin, Attendee::new("A", "a@example.com"))
            .unwrap_err();

    assert_eq!(
        err,
        DomainError::UnresolvableLocalTime {
            value: String::from("2026-03-29T02:15:00"),
            time_zone: String::from("Europe/Berlin"),
        }
    );
}

#[test]
fn test_booking_request_serializes_to_wire_shape() {
    let request: BookingRequest = BookingRequest {
        start: String::from("2026-10-20T10:00:00+02:00"),
        end: String::from("2026-10-20T10:30:00+02:00"),
        attendees: vec![Attendee::new("Ada", "ada@example.com")],
    };

    let json: serde_json::Value = serde_json::to_value(&request).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "start": "2026-10-20T10:00:00+02:00",
            "end": "2026-10-20T10:30:00+02:00",
            "attendees": [{"name": "Ada", "email": "ada@example.com"}]
        })
    );
}
