// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::source::SourceError;
use book_me_domain::DomainError;

/// Errors that can occur while driving the booking flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The calendar backend failed.
    Source(SourceError),
    /// A booking was attempted without a resolved slot.
    NoSlotSelected,
    /// A background task could not complete.
    Internal(String),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::Source(err) => write!(f, "{err}"),
            Self::NoSlotSelected => write!(f, "No available slot matches the selected time"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

impl From<SourceError> for CoreError {
    fn from(err: SourceError) -> Self {
        Self::Source(err)
    }
}
