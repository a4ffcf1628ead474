// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the calendar backend client.

use book_me::SourceError;
use thiserror::Error;

/// Calendar backend client errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The client could not be configured.
    #[error("Invalid client configuration: {0}")]
    Config(String),

    /// The request could not be sent or timed out.
    #[error("Calendar backend request failed: {0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("Calendar backend returned status {status}: {body}")]
    Upstream {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The backend's response body could not be decoded.
    #[error("Calendar backend response could not be decoded: {0}")]
    Decode(String),
}

impl From<ApiError> for SourceError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Config(msg) | ApiError::Transport(msg) => Self::Transport(msg),
            ApiError::Upstream { status, body } => Self::Status { status, body },
            ApiError::Decode(msg) => Self::Decode(msg),
        }
    }
}
