// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP client for the calendar backend.

use crate::config::ClientConfig;
use crate::error::ApiError;
use book_me::{CalendarSource, SourceError};
use book_me_domain::{BookingRequest, RawRange, day_key};
use chrono::NaiveDate;
use reqwest::{RequestBuilder, Response, StatusCode};
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Talks to the upstream `availability` and `meetings` endpoints.
///
/// The raw methods return upstream JSON untouched and back the proxy
/// routes. The [`CalendarSource`] implementation decodes them for the
/// booking flow.
#[derive(Debug, Clone)]
pub struct CalendarClient {
    http: reqwest::Client,
    availability_endpoint: Url,
    meetings_endpoint: Url,
}

impl CalendarClient {
    /// Creates a client for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Config` if the HTTP client cannot be built or the
    /// base URL cannot carry endpoint paths.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let http: reqwest::Client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| ApiError::Config(format!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            availability_endpoint: config.availability_endpoint()?,
            meetings_endpoint: config.meetings_endpoint()?,
        })
    }

    /// Queries free ranges between two day keys, returning the upstream body.
    ///
    /// The values are forwarded as given; validation is up to the backend.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Upstream` for non-success statuses,
    /// `ApiError::Transport` when the backend cannot be reached, and
    /// `ApiError::Decode` when the body is not JSON.
    #[instrument(skip(self))]
    pub async fn availability(
        &self,
        start: &str,
        end: &str,
    ) -> Result<serde_json::Value, ApiError> {
        debug!(url = %self.availability_endpoint, "GET availability");
        let request: RequestBuilder = self
            .http
            .get(self.availability_endpoint.clone())
            .query(&[("start", start), ("end", end)]);
        self.send(request).await
    }

    /// Submits a booking body, returning the upstream body.
    ///
    /// # Errors
    ///
    /// Same as [`Self::availability`].
    #[instrument(skip_all)]
    pub async fn create_meeting(
        &self,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, ApiError> {
        debug!(url = %self.meetings_endpoint, "POST meeting");
        let request: RequestBuilder = self.http.post(self.meetings_endpoint.clone()).json(body);
        let created: serde_json::Value = self.send(request).await?;
        info!("Meeting created upstream");
        Ok(created)
    }

    async fn send(&self, request: RequestBuilder) -> Result<serde_json::Value, ApiError> {
        let response: Response = request.send().await.map_err(|err| {
            warn!(%err, "Calendar backend unreachable");
            ApiError::Transport(err.to_string())
        })?;

        let status: StatusCode = response.status();
        if !status.is_success() {
            let body: String = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), %body, "Calendar backend returned an error");
            return Err(ApiError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        response.json::<serde_json::Value>().await.map_err(|err| {
            warn!(%err, "Calendar backend response is not JSON");
            ApiError::Decode(err.to_string())
        })
    }
}

impl CalendarSource for CalendarClient {
    async fn free_ranges(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<RawRange>, SourceError> {
        let body: serde_json::Value = self.availability(&day_key(start), &day_key(end)).await?;
        serde_json::from_value::<Vec<RawRange>>(body)
            .map_err(|err| SourceError::Decode(format!("expected an array of ranges: {err}")))
    }

    async fn book(&self, request: &BookingRequest) -> Result<serde_json::Value, SourceError> {
        let body: serde_json::Value = serde_json::to_value(request)
            .map_err(|err| SourceError::Decode(format!("cannot encode booking: {err}")))?;
        self.create_meeting(&body).await.map_err(SourceError::from)
    }
}
