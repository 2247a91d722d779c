// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP client for the cloud device registry.

use std::time::Duration;

use reqwest::{Client, StatusCode, header};

use super::{parse_device_list, publish_records};
use crate::error::{ProtocolError, Result};
use crate::event::EventSender;
use crate::types::ScannerCloud;

// ============================================================================
// CloudConfig
// ============================================================================

/// Configuration for the cloud device registry.
///
/// # Examples
///
/// ```
/// use scanbus::cloud::CloudConfig;
/// use std::time::Duration;
///
/// let config = CloudConfig::new("https://cloud.example.com", "api-token")
///     .with_timeout(Duration::from_secs(5));
///
/// assert_eq!(
///     config.devices_url(),
///     "https://cloud.example.com/api/public/v0/devices/oem/?format=json"
/// );
/// ```
#[derive(Clone)]
pub struct CloudConfig {
    base_url: String,
    token: String,
    path: String,
    timeout: Duration,
}

impl CloudConfig {
    /// Default device list path.
    pub const DEFAULT_PATH: &'static str = "/api/public/v0/devices/oem/";
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration for the service at `base_url`, authenticating
    /// with an OEM API token.
    #[must_use]
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
            path: Self::DEFAULT_PATH.to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets the device list path.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the full device list URL.
    #[must_use]
    pub fn devices_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = self.path.trim_start_matches('/');
        format!("{base}/{path}?format=json")
    }

    /// Creates a `CloudClient` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::InvalidAddress` if the base URL is not an
    /// `http` or `https` URL, or `ProtocolError::Http` if the HTTP client
    /// cannot be created.
    pub fn into_client(self) -> std::result::Result<CloudClient, ProtocolError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ProtocolError::InvalidAddress(self.base_url));
        }

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(CloudClient {
            url: self.devices_url(),
            authorization: format!("OEM-API-Key {}", self.token),
            client,
        })
    }
}

impl std::fmt::Debug for CloudConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudConfig")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("path", &self.path)
            .field("timeout", &self.timeout)
            .finish()
    }
}

// ============================================================================
// CloudClient
// ============================================================================

/// Client for fetching scanner records from the cloud.
///
/// # Examples
///
/// ```no_run
/// use scanbus::cloud::CloudConfig;
///
/// # async fn example() -> scanbus::Result<()> {
/// let client = CloudConfig::new("https://cloud.example.com", "api-token").into_client()?;
/// for record in client.fetch_records().await? {
///     println!("{} authenticated: {}", record.serial, record.is_authenticated());
/// }
/// # Ok(())
/// # }
/// ```
pub struct CloudClient {
    client: Client,
    url: String,
    authorization: String,
}

impl CloudClient {
    /// Fetches every scanner record visible to the token.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::AuthenticationFailed` on 401/403,
    /// `ProtocolError::UnexpectedStatus` on any other non-success status,
    /// `ProtocolError::Http` on transport failure and `ParseError` if the
    /// body is not a device list.
    pub async fn fetch_records(&self) -> Result<Vec<ScannerCloud>> {
        tracing::debug!(url = %self.url, "Fetching cloud device list");

        let response = self
            .client
            .get(&self.url)
            .header(header::AUTHORIZATION, &self.authorization)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(ProtocolError::Http)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            tracing::warn!(status = status.as_u16(), "Cloud rejected API token");
            return Err(ProtocolError::AuthenticationFailed.into());
        }
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Cloud device list request failed");
            return Err(ProtocolError::UnexpectedStatus(status.as_u16()).into());
        }

        let body = response.text().await.map_err(ProtocolError::Http)?;
        Ok(parse_device_list(&body)?)
    }

    /// Fetches every record and posts one `cloud-record-received`
    /// notification per record.
    ///
    /// Returns the number of notifications posted.
    ///
    /// # Errors
    ///
    /// Returns any error from [`fetch_records`](Self::fetch_records), or
    /// `ProtocolError::ChannelClosed` if the event queue is gone.
    pub async fn sync(&self, sender: &EventSender) -> Result<usize> {
        let records = self.fetch_records().await?;
        publish_records(sender, records)
    }
}

impl std::fmt::Debug for CloudClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudClient")
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn devices_url_joins_cleanly() {
        let with_slash = CloudConfig::new("https://cloud.example.com/", "t");
        let without = CloudConfig::new("https://cloud.example.com", "t");
        assert_eq!(with_slash.devices_url(), without.devices_url());

        let custom = without.with_path("v1/scanners");
        assert_eq!(
            custom.devices_url(),
            "https://cloud.example.com/v1/scanners?format=json"
        );
    }

    #[test]
    fn debug_redacts_token() {
        let config = CloudConfig::new("https://cloud.example.com", "super-secret");
        let debug = format!("{config:?}");
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn into_client_rejects_non_http_url() {
        let err = CloudConfig::new("ftp://cloud.example.com", "t")
            .into_client()
            .unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidAddress(_)));
    }

    #[test]
    fn defaults() {
        let config = CloudConfig::new("https://cloud.example.com", "t");
        assert_eq!(config.timeout(), CloudConfig::DEFAULT_TIMEOUT);
        assert_eq!(config.base_url(), "https://cloud.example.com");
    }
}
