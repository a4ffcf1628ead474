// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! "Add to calendar" exports for a booked meeting.

use crate::types::Slot;
use chrono::NaiveDateTime;

const GOOGLE_CALENDAR_RENDER_URL: &str = "https://calendar.google.com/calendar/render";
const COMPACT_TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%S";

/// A meeting as presented to external calendars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    /// Event title.
    pub title: String,
    /// Free-form description; may span several lines.
    pub description: String,
    /// Local start time.
    pub start: NaiveDateTime,
    /// Local end time.
    pub end: NaiveDateTime,
    /// Optional location or meeting link.
    pub location: Option<String>,
}

impl CalendarEvent {
    /// Creates an event covering a booked slot.
    pub fn for_slot(
        slot: &Slot,
        title: impl Into<String>,
        description: impl Into<String>,
        location: Option<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            start: slot.start(),
            end: slot.end(),
            location,
        }
    }
}

fn compact(timestamp: NaiveDateTime) -> String {
    timestamp.format(COMPACT_TIMESTAMP_FORMAT).to_string()
}

/// Builds a Google Calendar "create event" link for `event`.
#[must_use]
pub fn google_calendar_url(event: &CalendarEvent) -> String {
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    query
        .append_pair("action", "TEMPLATE")
        .append_pair("text", &event.title)
        .append_pair(
            "dates",
            &format!("{}/{}", compact(event.start), compact(event.end)),
        )
        .append_pair("details", &event.description);
    if let Some(location) = &event.location {
        query.append_pair("location", location);
    }
    format!("{GOOGLE_CALENDAR_RENDER_URL}?{}", query.finish())
}

/// Renders `event` as a single-event iCalendar document.
///
/// `stamp` becomes the `DTSTAMP` (normally the time of export).
#[must_use]
pub fn ics_document(event: &CalendarEvent, stamp: NaiveDateTime) -> String {
    let mut lines: Vec<String> = vec![
        String::from("BEGIN:VCALENDAR"),
        String::from("VERSION:2.0"),
        String::from("PRODID:-//Book Me//Book Me//EN"),
        String::from("CALSCALE:GREGORIAN"),
        String::from("BEGIN:VEVENT"),
        format!("DTSTAMP:{}", compact(stamp)),
        format!("DTSTART:{}", compact(event.start)),
        format!("DTEND:{}", compact(event.end)),
        format!("SUMMARY:{}", event.title),
        format!("DESCRIPTION:{}", event.description.replace('\n', "\\n")),
    ];
    if let Some(location) = &event.location {
        lines.push(format!("LOCATION:{location}"));
    }
    lines.push(String::from("STATUS:CONFIRMED"));
    lines.push(String::from("END:VEVENT"));
    lines.push(String::from("END:VCALENDAR"));
    lines.join("\r\n")
}
