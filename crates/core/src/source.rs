// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The seam between the booking flow and the calendar backend.

use book_me_domain::{BookingRequest, RawRange};
use chrono::NaiveDate;
use std::future::Future;

/// Failures reported by a calendar backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The backend answered with a non-success status.
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },
    /// The backend could not be reached.
    Transport(String),
    /// The backend answered with an unreadable body.
    Decode(String),
}

impl SourceError {
    /// Extracts the message to show a visitor.
    ///
    /// Looks for a `detail` string in a JSON error body, then for an `error`
    /// string (which may itself wrap a JSON body with a `detail`). Anything
    /// else yields `fallback`.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Status { body, .. } => {
                extract_detail(body).unwrap_or_else(|| fallback.to_string())
            }
            Self::Transport(_) | Self::Decode(_) => fallback.to_string(),
        }
    }
}

fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    if let Some(detail) = value.get("detail").and_then(serde_json::Value::as_str) {
        return Some(detail.to_string());
    }
    let wrapped: &str = value.get("error").and_then(serde_json::Value::as_str)?;
    extract_detail(wrapped).or_else(|| (!wrapped.trim().is_empty()).then(|| wrapped.to_string()))
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Status { status, body } => {
                write!(f, "Calendar backend returned status {status}: {body}")
            }
            Self::Transport(msg) => write!(f, "Calendar backend unreachable: {msg}"),
            Self::Decode(msg) => write!(f, "Calendar backend response unreadable: {msg}"),
        }
    }
}

impl std::error::Error for SourceError {}

/// A calendar backend offering free ranges and accepting bookings.
///
/// Implementations are shared across spawned fetch tasks, so both the
/// backend and the futures it returns must be `Send`.
pub trait CalendarSource: Send + Sync + 'static {
    /// Returns the free ranges between `start` and `end` (both inclusive days).
    fn free_ranges(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Future<Output = Result<Vec<RawRange>, SourceError>> + Send;

    /// Submits a booking. The success body is opaque to the booking flow.
    fn book(
        &self,
        request: &BookingRequest,
    ) -> impl Future<Output = Result<serde_json::Value, SourceError>> + Send;
}
