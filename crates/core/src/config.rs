// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use book_me_domain::SlotPolicy;
use chrono_tz::Tz;
use std::time::Duration;
use tracing::warn;

/// Environment variable naming the session timezone.
pub const TIME_ZONE_ENV: &str = "TZ";

/// How long a month fetch may run before the loading indicator is shown.
pub const DEFAULT_MONTH_LOADING_DELAY: Duration = Duration::from_secs(1);

/// Settings fixed for the lifetime of a booking session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Timezone used to attach offsets to booked slots.
    pub time_zone: Tz,
    /// Shape of the generated slots.
    pub slot_policy: SlotPolicy,
    /// Debounce delay for the month loading indicator.
    pub month_loading_delay: Duration,
}

impl SessionConfig {
    /// Builds a config whose timezone is read once from `TZ`.
    ///
    /// Falls back to UTC when the variable is unset or not an IANA name.
    #[must_use]
    pub fn from_env() -> Self {
        let name: Option<String> = std::env::var(TIME_ZONE_ENV).ok();
        Self {
            time_zone: resolve_time_zone(name.as_deref()),
            ..Self::default()
        }
    }

    /// Replaces the timezone.
    #[must_use]
    pub const fn with_time_zone(mut self, time_zone: Tz) -> Self {
        self.time_zone = time_zone;
        self
    }

    /// Replaces the slot policy.
    #[must_use]
    pub const fn with_slot_policy(mut self, slot_policy: SlotPolicy) -> Self {
        self.slot_policy = slot_policy;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            time_zone: Tz::UTC,
            slot_policy: SlotPolicy::default(),
            month_loading_delay: DEFAULT_MONTH_LOADING_DELAY,
        }
    }
}

/// Resolves an IANA timezone name, defaulting to UTC.
#[must_use]
pub fn resolve_time_zone(name: Option<&str>) -> Tz {
    match name.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => name.parse::<Tz>().unwrap_or_else(|_| {
            warn!(time_zone = %name, "Unknown timezone, falling back to UTC");
            Tz::UTC
        }),
        None => {
            warn!("No timezone configured, using UTC");
            Tz::UTC
        }
    }
}
