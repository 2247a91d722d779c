// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `scanbus` library.
//!
//! This module provides the error hierarchy for the places where the crate
//! meets untyped input: value validation, payload and JSON decoding, and
//! transport to the cloud service or across the event queue.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while decoding a payload.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Error occurred while talking to the cloud service or the event queue.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A scanner serial was empty or whitespace only.
    #[error("invalid serial: {0:?}")]
    InvalidSerial(String),

    /// A MAC address string could not be parsed.
    #[error("invalid MAC address: {0}")]
    InvalidMacAddress(String),

    /// An event name does not match any known notification.
    #[error("unknown event name: {0}")]
    UnknownEvent(String),
}

/// Errors related to decoding payloads.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Expected field is missing from the payload.
    #[error("missing field in payload: {0}")]
    MissingField(String),

    /// A field was present but held an invalid value.
    #[error("invalid value in payload: {0}")]
    InvalidValue(#[from] ValueError),
}

/// Errors related to transport (cloud HTTP requests, event marshaling).
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[cfg(feature = "cloud")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("unexpected HTTP status {0}")]
    UnexpectedStatus(u16),

    /// Authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Internal channel was closed.
    #[error("channel closed: {0}")]
    ChannelClosed(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_error_display() {
        let err = ValueError::InvalidSerial("  ".to_string());
        assert_eq!(err.to_string(), "invalid serial: \"  \"");
    }

    #[test]
    fn error_from_value_error() {
        let value_err = ValueError::UnknownEvent("bogus".to_string());
        let err: Error = value_err.into();
        assert!(matches!(err, Error::Value(ValueError::UnknownEvent(_))));
    }

    #[test]
    fn parse_error_display() {
        let err = ParseError::MissingField("results".to_string());
        assert_eq!(err.to_string(), "missing field in payload: results");
    }

    #[test]
    fn parse_error_wraps_value_error() {
        let err: ParseError = ValueError::InvalidMacAddress("zz".to_string()).into();
        assert_eq!(
            err.to_string(),
            "invalid value in payload: invalid MAC address: zz"
        );
    }

    #[test]
    fn protocol_error_display() {
        assert_eq!(
            ProtocolError::UnexpectedStatus(503).to_string(),
            "unexpected HTTP status 503"
        );
        assert_eq!(
            ProtocolError::ChannelClosed("event queue".to_string()).to_string(),
            "channel closed: event queue"
        );
    }
}
