// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod types;

use chrono::{NaiveDate, NaiveDateTime};

/// Parses a local timestamp fixture.
pub fn at(value: &str) -> NaiveDateTime {
    crate::parse_local_timestamp(value).unwrap()
}

/// Builds a date fixture.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}
