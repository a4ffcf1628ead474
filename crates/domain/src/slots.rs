// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Conversion of free ranges into bookable slots.
//!
//! ## Rules
//!
//! - The first candidate start is the range start rounded **up** to the next
//!   multiple of the step, measured in minutes within the hour (seconds are
//!   dropped before rounding)
//! - Candidates advance by the step, so slots overlap whenever the step is
//!   shorter than the duration
//! - A candidate is emitted only if it ends at or before the range end
//! - Ranges are processed independently and never merged
//!
//! ## Example
//!
//! ```text
//! range    = 10:00-10:50
//! duration = 30 min
//! step     = 15 min
//!
//! 10:00-10:30  emitted
//! 10:15-10:45  emitted
//! 10:30-11:00  rejected (ends after 10:50)
//! ```

use crate::error::DomainError;
use crate::types::{RawRange, Slot, TimeRange};
use chrono::{Duration, NaiveDateTime, Timelike};
use std::iter::FusedIterator;

/// Default slot length in minutes.
pub const DEFAULT_SLOT_DURATION_MINUTES: u32 = 30;

/// Default distance between consecutive slot starts in minutes.
pub const DEFAULT_SLOT_STEP_MINUTES: u32 = 15;

/// Shape of the slots offered to a visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotPolicy {
    duration_minutes: u32,
    step_minutes: u32,
}

impl SlotPolicy {
    /// Creates a validated slot policy.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidSlotPolicy` if either value is zero, or if
    /// the step is longer than an hour (rounding is done within the hour).
    pub fn new(duration_minutes: u32, step_minutes: u32) -> Result<Self, DomainError> {
        if duration_minutes == 0 {
            return Err(DomainError::InvalidSlotPolicy {
                reason: String::from("slot duration must be greater than 0"),
            });
        }
        if step_minutes == 0 || step_minutes > 60 {
            return Err(DomainError::InvalidSlotPolicy {
                reason: format!("slot step must be between 1 and 60 minutes, got {step_minutes}"),
            });
        }
        Ok(Self {
            duration_minutes,
            step_minutes,
        })
    }

    /// Slot length in minutes.
    #[must_use]
    pub const fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    /// Step between slot starts in minutes.
    #[must_use]
    pub const fn step_minutes(&self) -> u32 {
        self.step_minutes
    }

    /// Lazily enumerates the slots that fit in `range`.
    ///
    /// The returned iterator can be cloned to restart enumeration.
    #[must_use]
    pub fn slots(&self, range: &TimeRange) -> Slots {
        Slots {
            next_start: self.first_candidate(range.start),
            end: range.end,
            duration: Duration::minutes(i64::from(self.duration_minutes)),
            step: Duration::minutes(i64::from(self.step_minutes)),
        }
    }

    fn first_candidate(&self, start: NaiveDateTime) -> Option<NaiveDateTime> {
        let rounded: u32 = start.minute().div_ceil(self.step_minutes) * self.step_minutes;
        let top_of_hour: NaiveDateTime = start.date().and_hms_opt(start.hour(), 0, 0)?;
        top_of_hour.checked_add_signed(Duration::minutes(i64::from(rounded)))
    }
}

impl Default for SlotPolicy {
    fn default() -> Self {
        Self {
            duration_minutes: DEFAULT_SLOT_DURATION_MINUTES,
            step_minutes: DEFAULT_SLOT_STEP_MINUTES,
        }
    }
}

/// Iterator over the slots of a single range.
#[derive(Debug, Clone)]
pub struct Slots {
    next_start: Option<NaiveDateTime>,
    end: NaiveDateTime,
    duration: Duration,
    step: Duration,
}

impl Iterator for Slots {
    type Item = Slot;

    fn next(&mut self) -> Option<Slot> {
        let start: NaiveDateTime = self.next_start?;
        let slot_end: Option<NaiveDateTime> = start.checked_add_signed(self.duration);
        match slot_end {
            Some(slot_end) if slot_end <= self.end => {
                self.next_start = start.checked_add_signed(self.step);
                Some(Slot::new(start, slot_end))
            }
            _ => {
                self.next_start = None;
                None
            }
        }
    }
}

impl FusedIterator for Slots {}

/// Converts upstream free ranges into bookable slots.
///
/// Slots are concatenated in input order; overlapping or adjacent ranges are
/// not merged.
///
/// # Errors
///
/// Returns `DomainError::InvalidTimestamp` for the first range that cannot be
/// parsed. No partial result is produced.
pub fn generate_slots(ranges: &[RawRange], policy: &SlotPolicy) -> Result<Vec<Slot>, DomainError> {
    let parsed: Vec<TimeRange> = ranges
        .iter()
        .enumerate()
        .map(|(index, raw)| raw.parse(index))
        .collect::<Result<_, _>>()?;

    Ok(parsed
        .iter()
        .flat_map(|range| policy.slots(range))
        .collect())
}
