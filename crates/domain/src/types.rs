// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use chrono::{DateTime, NaiveDateTime, NaiveTime, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Wire format for offset-free local timestamps.
pub const LOCAL_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Wire format for timestamps carrying an explicit UTC offset.
pub const OFFSET_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// Format of a slot's URL identity.
pub const TIME_KEY_FORMAT: &str = "%H:%M";

/// Parses an upstream timestamp into calendar-local wall-clock time.
///
/// Accepts `yyyy-MM-ddTHH:mm:ss` (optionally with fractional seconds) and
/// `yyyy-MM-ddTHH:mm`. A timestamp carrying an offset keeps its wall-clock
/// part; the offset is not applied.
#[must_use]
pub fn parse_local_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.naive_local())
        })
}

/// Parses an `HH:mm` time key.
///
/// # Errors
///
/// Returns `DomainError::InvalidTimeKey` if the text is not a valid `HH:mm` time.
pub fn parse_time_key(value: &str) -> Result<NaiveTime, DomainError> {
    NaiveTime::parse_from_str(value, TIME_KEY_FORMAT)
        .map_err(|_| DomainError::InvalidTimeKey(value.to_string()))
}

/// A free range exactly as the upstream reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRange {
    /// Range start (ISO local timestamp).
    pub start: String,
    /// Range end (ISO local timestamp).
    pub end: String,
}

impl RawRange {
    /// Creates a raw range from its two timestamps.
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Parses both ends of the range.
    ///
    /// # Arguments
    ///
    /// * `range_index` - Position of this range in its response, used for error reporting
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimestamp` naming the first unparseable end.
    pub fn parse(&self, range_index: usize) -> Result<TimeRange, DomainError> {
        let start: NaiveDateTime =
            parse_local_timestamp(&self.start).ok_or_else(|| DomainError::InvalidTimestamp {
                range_index,
                value: self.start.clone(),
            })?;
        let end: NaiveDateTime =
            parse_local_timestamp(&self.end).ok_or_else(|| DomainError::InvalidTimestamp {
                range_index,
                value: self.end.clone(),
            })?;
        Ok(TimeRange::new(start, end))
    }
}

/// A half-open interval `[start, end)` of calendar-local time.
///
/// Inverted ranges are representable; they are simply empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeRange {
    /// Inclusive.
    pub start: NaiveDateTime,
    /// Exclusive.
    pub end: NaiveDateTime,
}

impl TimeRange {
    /// Creates a new range.
    #[must_use]
    pub const fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Returns true when the range covers no time at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Returns true when `instant` falls inside the range.
    #[must_use]
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant < self.end
    }
}

/// A single bookable offer derived from a free range.
///
/// A slot is identified by its start time alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slot {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl Slot {
    pub(crate) const fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Slot start (local).
    #[must_use]
    pub const fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Slot end (local).
    #[must_use]
    pub const fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// The slot as a time range.
    #[must_use]
    pub const fn range(&self) -> TimeRange {
        TimeRange::new(self.start, self.end)
    }

    /// The `HH:mm` key used to round-trip the slot through the URL.
    #[must_use]
    pub fn time_key(&self) -> String {
        self.start.format(TIME_KEY_FORMAT).to_string()
    }

    /// The slot in its offset-free wire shape.
    #[must_use]
    pub fn to_raw(&self) -> RawRange {
        RawRange::new(
            self.start.format(LOCAL_TIMESTAMP_FORMAT).to_string(),
            self.end.format(LOCAL_TIMESTAMP_FORMAT).to_string(),
        )
    }
}

/// A meeting participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendee {
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
}

impl Attendee {
    /// Creates a new attendee.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Payload submitted to the booking endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    /// Meeting start with explicit UTC offset.
    pub start: String,
    /// Meeting end with explicit UTC offset.
    pub end: String,
    /// People attending the meeting.
    pub attendees: Vec<Attendee>,
}

impl BookingRequest {
    /// Builds the booking payload for a slot and a single attendee.
    ///
    /// The slot's wall-clock times are interpreted in `time_zone` and
    /// rendered with that zone's offset.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnresolvableLocalTime` if either end falls in a
    /// DST gap or overlap.
    pub fn for_slot(slot: &Slot, time_zone: Tz, attendee: Attendee) -> Result<Self, DomainError> {
        Ok(Self {
            start: with_offset(slot.start(), time_zone)?,
            end: with_offset(slot.end(), time_zone)?,
            attendees: vec![attendee],
        })
    }
}

fn with_offset(local: NaiveDateTime, time_zone: Tz) -> Result<String, DomainError> {
    let resolved = time_zone
        .from_local_datetime(&local)
        .single()
        .ok_or_else(|| DomainError::UnresolvableLocalTime {
            value: local.format(LOCAL_TIMESTAMP_FORMAT).to_string(),
            time_zone: time_zone.name().to_string(),
        })?;
    Ok(resolved.format(OFFSET_TIMESTAMP_FORMAT).to_string())
}
