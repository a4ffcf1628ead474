// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A free range carried a timestamp that could not be parsed.
    InvalidTimestamp {
        /// Position of the offending range in the upstream response.
        range_index: usize,
        /// The unparseable text.
        value: String,
    },
    /// Slot duration or step is unusable.
    InvalidSlotPolicy {
        /// Description of the problem.
        reason: String,
    },
    /// A `yyyy-MM-dd` day key could not be parsed.
    InvalidDayKey(String),
    /// A `yyyy-MM` month key could not be parsed.
    InvalidMonthKey(String),
    /// An `HH:mm` time key could not be parsed.
    InvalidTimeKey(String),
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// A wall-clock time does not map to a single instant in the timezone.
    UnresolvableLocalTime {
        /// The local timestamp.
        value: String,
        /// The IANA timezone name.
        time_zone: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTimestamp { range_index, value } => {
                write!(
                    f,
                    "Invalid timestamp '{value}' in availability range {range_index}"
                )
            }
            Self::InvalidSlotPolicy { reason } => write!(f, "Invalid slot policy: {reason}"),
            Self::InvalidDayKey(value) => write!(f, "Invalid day '{value}': expected yyyy-MM-dd"),
            Self::InvalidMonthKey(value) => {
                write!(f, "Invalid month '{value}': expected yyyy-MM")
            }
            Self::InvalidTimeKey(value) => write!(f, "Invalid time '{value}': expected HH:mm"),
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
            Self::UnresolvableLocalTime { value, time_zone } => {
                write!(
                    f,
                    "Local time {value} is ambiguous or does not exist in {time_zone}"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
