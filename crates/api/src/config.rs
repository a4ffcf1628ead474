// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::ApiError;
use std::time::Duration;
use url::Url;

/// Base URL of the hosted calendar backend.
pub const DEFAULT_UPSTREAM_URL: &str = "https://calendar.meetchase.ai/api";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Location and limits of the calendar backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL; the endpoints are `<base>/availability` and `<base>/meetings`.
    pub base_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Parses `base_url` into a config.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Config` if the URL is not an absolute base URL.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url: Url = Url::parse(base_url)
            .map_err(|err| ApiError::Config(format!("invalid base URL '{base_url}': {err}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Config(format!(
                "base URL '{base_url}' cannot carry a path"
            )));
        }
        Ok(Self { base_url, timeout })
    }

    /// The free-range query endpoint.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Config` if the base URL cannot carry a path.
    pub fn availability_endpoint(&self) -> Result<Url, ApiError> {
        self.endpoint("availability")
    }

    /// The booking endpoint.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Config` if the base URL cannot carry a path.
    pub fn meetings_endpoint(&self) -> Result<Url, ApiError> {
        self.endpoint("meetings")
    }

    fn endpoint(&self, segment: &str) -> Result<Url, ApiError> {
        let mut url: Url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                ApiError::Config(format!("base URL '{}' cannot carry a path", self.base_url))
            })?
            .pop_if_empty()
            .push(segment);
        Ok(url)
    }
}
