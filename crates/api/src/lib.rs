// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Client for the calendar backend behind Book Me.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod client;
mod config;
mod error;

#[cfg(test)]
mod tests;

pub use client::CalendarClient;
pub use config::{ClientConfig, DEFAULT_TIMEOUT, DEFAULT_UPSTREAM_URL};
pub use error::ApiError;
