// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the cloud client using wiremock.

#![cfg(feature = "cloud")]

use std::time::Duration;

use scanbus::cloud::{CloudClient, CloudConfig};
use scanbus::types::Serial;
use scanbus::{AppContext, Error, ParseError, ProtocolError};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DEVICES_PATH: &str = "/api/public/v0/devices/oem/";

fn device_list() -> serde_json::Value {
    serde_json::json!({
        "count": 3,
        "results": [
            {"device": {"serial": "CUS-0001"}, "crt": "-----BEGIN CERTIFICATE-----"},
            {"device": {"serial": "CUS-0002"}},
            {"device": {}}
        ]
    })
}

fn client(server: &MockServer, token: &str) -> CloudClient {
    CloudConfig::new(server.uri(), token)
        .with_timeout(Duration::from_secs(2))
        .into_client()
        .unwrap()
}

// ============================================================================
// CloudClient Tests
// ============================================================================

mod cloud_client {
    use super::*;

    #[tokio::test]
    async fn fetch_records_sends_token_and_format() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(DEVICES_PATH))
            .and(query_param("format", "json"))
            .and(header("Authorization", "OEM-API-Key secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(device_list()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let records = client(&mock_server, "secret").fetch_records().await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].serial.as_str(), "CUS-0001");
        assert!(records[0].is_authenticated());
        assert!(!records[1].is_authenticated());
    }

    #[tokio::test]
    async fn unauthorized_is_authentication_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let err = client(&mock_server, "wrong").fetch_records().await.unwrap_err();
        assert!(matches!(
            err,
            Error::Protocol(ProtocolError::AuthenticationFailed)
        ));
    }

    #[tokio::test]
    async fn forbidden_is_authentication_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&mock_server)
            .await;

        let err = client(&mock_server, "wrong").fetch_records().await.unwrap_err();
        assert!(matches!(
            err,
            Error::Protocol(ProtocolError::AuthenticationFailed)
        ));
    }

    #[tokio::test]
    async fn server_error_is_unexpected_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let err = client(&mock_server, "secret").fetch_records().await.unwrap_err();
        assert!(matches!(
            err,
            Error::Protocol(ProtocolError::UnexpectedStatus(500))
        ));
    }

    #[tokio::test]
    async fn body_without_results_is_parse_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "detail": "nothing here"
            })))
            .mount(&mock_server)
            .await;

        let err = client(&mock_server, "secret").fetch_records().await.unwrap_err();
        assert!(matches!(
            err,
            Error::Parse(ParseError::MissingField(ref field)) if field == "results"
        ));
    }

    #[tokio::test]
    async fn malformed_body_is_json_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&mock_server)
            .await;

        let err = client(&mock_server, "secret").fetch_records().await.unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::Json(_))));
    }

    #[test]
    fn non_http_base_url_is_rejected() {
        let err = CloudConfig::new("ftp://cloud.example.com", "secret")
            .into_client()
            .unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidAddress(_)));
    }
}

// ============================================================================
// Sync Tests
// ============================================================================

mod sync {
    use super::*;

    #[tokio::test]
    async fn sync_feeds_cloud_and_scanner_state() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(DEVICES_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(device_list()))
            .mount(&mock_server)
            .await;

        let mut app = AppContext::default();
        let posted = client(&mock_server, "secret")
            .sync(&app.sender())
            .await
            .unwrap();

        assert_eq!(posted, 2);
        assert_eq!(app.drain_events(), 2);

        let serial = Serial::new("CUS-0001").unwrap();
        assert_eq!(app.cloud().authenticated(), vec![serial.clone()]);
        assert!(
            app.scanners()
                .scanner(&serial)
                .and_then(|scanner| scanner.cloud)
                .is_some_and(|cloud| cloud.is_authenticated())
        );
    }

    #[tokio::test]
    async fn sync_after_context_dropped_fails() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(device_list()))
            .mount(&mock_server)
            .await;

        let app = AppContext::default();
        let sender = app.sender();
        drop(app);

        let err = client(&mock_server, "secret").sync(&sender).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Protocol(ProtocolError::ChannelClosed(_))
        ));
    }
}
