// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Query, State as AxumState, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use book_me_api::{ApiError, CalendarClient, ClientConfig, DEFAULT_UPSTREAM_URL};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// Book Me Server - proxies availability and booking requests to the calendar backend
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to bind the server to
    #[arg(short, long, env = "BOOK_ME_PORT", default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: IpAddr,

    /// Base URL of the calendar backend
    #[arg(long, env = "BOOK_ME_UPSTREAM_URL", default_value = DEFAULT_UPSTREAM_URL)]
    upstream_url: String,

    /// Timeout for calendar backend requests, in seconds
    #[arg(long, default_value_t = 30)]
    upstream_timeout_secs: u64,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// Client for the calendar backend.
    client: Arc<CalendarClient>,
}

/// Query parameters for GET `/api/availability`.
#[derive(Debug, Deserialize)]
struct AvailabilityQuery {
    /// First day to query (`yyyy-MM-dd`).
    start: Option<String>,
    /// Last day to query (`yyyy-MM-dd`).
    end: Option<String>,
}

/// Error body returned by every route.
#[derive(Debug, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error text.
    error: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl HttpError {
    fn bad_request(message: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.to_string(),
        }
    }

    fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: String::from("Internal Server Error"),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Upstream { status, body } => {
                warn!(status, "Echoing calendar backend error");
                Self {
                    status: StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                    message: body,
                }
            }
            ApiError::Config(_) | ApiError::Transport(_) | ApiError::Decode(_) => {
                error!(error = %err, "Calendar backend request failed");
                Self::internal()
            }
        }
    }
}

/// Handler for GET `/api/availability`.
///
/// Forwards `start` and `end` to the calendar backend and returns its body.
async fn handle_availability(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<serde_json::Value>, HttpError> {
    let start: Option<&str> = query.start.as_deref().filter(|value| !value.is_empty());
    let end: Option<&str> = query.end.as_deref().filter(|value| !value.is_empty());
    let (Some(start), Some(end)) = (start, end) else {
        return Err(HttpError::bad_request("Missing start or end date"));
    };

    info!(start = %start, end = %end, "Handling availability request");
    let body: serde_json::Value = app_state.client.availability(start, end).await?;
    Ok(Json(body))
}

/// Handler for POST `/api/meetings`.
///
/// Forwards the JSON body to the calendar backend and returns its answer.
async fn handle_create_meeting(
    AxumState(app_state): AxumState<AppState>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<serde_json::Value>, HttpError> {
    let Json(payload) = payload.map_err(|rejection| {
        warn!(error = %rejection, "Rejecting meeting request");
        HttpError::bad_request("Invalid request body")
    })?;

    info!("Handling create meeting request");
    let body: serde_json::Value = app_state.client.create_meeting(&payload).await?;
    Ok(Json(body))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/availability", get(handle_availability))
        .route("/api/meetings", post(handle_create_meeting))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Book Me Server");

    let config: ClientConfig = ClientConfig::new(
        &args.upstream_url,
        Duration::from_secs(args.upstream_timeout_secs),
    )?;
    info!(upstream = %config.base_url, "Using calendar backend");

    let app_state: AppState = AppState {
        client: Arc::new(CalendarClient::new(&config)?),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: SocketAddr = SocketAddr::new(args.bind, args.port);
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
