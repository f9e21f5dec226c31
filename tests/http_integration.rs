// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the VeSync cloud session using wiremock.

use std::time::Duration;

use serde_json::json;
use vesync_outlet::types::Repeat;
use vesync_outlet::{
    AuthenticationError, CloudSession, ConfigError, DeviceId, Error, SessionConfig,
    TransportError,
};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const USERNAME: &str = "user@example.com";
const PASSWORD: &str = "s3cret";

/// Mounts a `/login` mock that only answers correctly shaped requests.
async fn mount_login(mock_server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(json!({"Account": USERNAME, "Password": PASSWORD})))
        .and(header("account", USERNAME))
        .and(header("password", PASSWORD))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tk": "abc",
            "id": "123",
            "nickName": "home"
        })))
        .expect(1)
        .mount(mock_server)
        .await;
}

async fn connect(mock_server: &MockServer) -> CloudSession {
    mount_login(mock_server).await;
    CloudSession::builder(USERNAME, PASSWORD)
        .with_base_url(mock_server.uri())
        .connect()
        .await
        .unwrap()
}

fn device_list() -> serde_json::Value {
    json!({
        "devices": [
            {"cid": "outlet-1", "type": "wifi-switch", "deviceName": "Lamp", "deviceStatus": "on"},
            {"cid": "thermo-1", "type": "thermostat", "deviceName": "Hall"},
            {"cid": "outlet-2", "type": "wifi-switch", "deviceName": "Fan", "connectionStatus": "offline"}
        ]
    })
}

// ============================================================================
// Login Tests
// ============================================================================

mod login {
    use super::*;

    #[tokio::test]
    async fn stores_identity_and_sends_it_afterwards() {
        let mock_server = MockServer::start().await;
        let session = connect(&mock_server).await;

        assert_eq!(session.account_id(), "123");
        assert!(session.auth().has_token("abc"));

        Mock::given(method("POST"))
            .and(path("/loadMain"))
            .and(header("tk", "abc"))
            .and(header("accountID", "123"))
            .and(header("id", "123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(device_list()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let (devices, response) = session.list_devices().await.unwrap();
        assert!(devices.is_some());
        assert_eq!(response.status_code(), 200);
    }

    #[tokio::test]
    async fn unauthorized_is_authentication_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad credentials"))
            .mount(&mock_server)
            .await;

        let err = CloudSession::builder(USERNAME, "wrong")
            .with_base_url(mock_server.uri())
            .connect()
            .await
            .unwrap_err();

        match err {
            Error::Authentication(auth @ AuthenticationError::Rejected { .. }) => {
                assert_eq!(auth.status(), 401);
                assert_eq!(auth.response().body(), "bad credentials");
            }
            other => panic!("expected rejected login, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn error_header_is_authentication_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("error", "account locked")
                    .set_body_json(json!({"tk": "abc", "id": "123"})),
            )
            .mount(&mock_server)
            .await;

        let err = CloudSession::builder(USERNAME, PASSWORD)
            .with_base_url(mock_server.uri())
            .connect()
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Authentication(AuthenticationError::ErrorHeader { ref indicator, .. })
                if indicator == "account locked"
        ));
    }

    #[tokio::test]
    async fn missing_token_is_authentication_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "123"})))
            .mount(&mock_server)
            .await;

        let err = CloudSession::builder(USERNAME, PASSWORD)
            .with_base_url(mock_server.uri())
            .connect()
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Authentication(AuthenticationError::MissingIdentity { field: "tk", .. })
        ));
    }

    #[tokio::test]
    async fn missing_account_id_is_authentication_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"tk": "abc", "id": ""})))
            .mount(&mock_server)
            .await;

        let err = CloudSession::builder(USERNAME, PASSWORD)
            .with_base_url(mock_server.uri())
            .connect()
            .await
            .unwrap_err();

        match err {
            Error::Authentication(auth @ AuthenticationError::MissingIdentity { field: "id", .. }) => {
                assert_eq!(auth.status(), 200);
                assert!(auth.response().body().contains("\"tk\""));
            }
            other => panic!("expected missing id, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_body_is_authentication_error_with_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&mock_server)
            .await;

        let err = CloudSession::builder(USERNAME, PASSWORD)
            .with_base_url(mock_server.uri())
            .connect()
            .await
            .unwrap_err();

        match err {
            Error::Authentication(auth @ AuthenticationError::InvalidBody { .. }) => {
                assert_eq!(auth.status(), 200);
                assert_eq!(auth.response().body(), "<html>maintenance</html>");
            }
            other => panic!("expected invalid login body, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn numeric_account_id_is_accepted() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"tk": "abc", "id": 987})))
            .mount(&mock_server)
            .await;

        let session = CloudSession::builder(USERNAME, PASSWORD)
            .with_base_url(mock_server.uri())
            .connect()
            .await
            .unwrap();

        assert_eq!(session.account_id(), "987");
    }

    #[tokio::test]
    async fn options_apply_known_keys_and_ignore_the_rest() {
        let mock_server = MockServer::start().await;
        mount_login(&mock_server).await;

        let options = json!({
            "base_url": mock_server.uri(),
            "repeats": 5,
            "session": "should be ignored",
            "verbose": true
        });

        let session = CloudSession::builder(USERNAME, PASSWORD)
            .with_options(options)
            .unwrap()
            .connect()
            .await
            .unwrap();

        assert_eq!(session.base_url(), mock_server.uri());
        assert_eq!(session.repeats().get(), 5);
    }
}

// ============================================================================
// Device List Tests
// ============================================================================

mod device_list {
    use super::*;

    async fn mount_devices(mock_server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/loadMain"))
            .respond_with(ResponseTemplate::new(200).set_body_json(device_list()))
            .mount(mock_server)
            .await;
    }

    #[tokio::test]
    async fn default_filter_returns_outlets_in_order() {
        let mock_server = MockServer::start().await;
        let session = connect(&mock_server).await;
        mount_devices(&mock_server).await;

        let (devices, _response) = session.list_devices().await.unwrap();
        let devices = devices.unwrap();

        let ids: Vec<&str> = devices.iter().filter_map(|d| d.id()).map(DeviceId::as_str).collect();
        assert_eq!(ids, ["outlet-1", "outlet-2"]);
        assert_eq!(devices[0].name(), Some("Lamp"));
        assert_eq!(devices[0].status(), Some("on"));
        assert_eq!(devices[1].connection_status(), Some("offline"));
    }

    #[tokio::test]
    async fn empty_filter_returns_everything() {
        let mock_server = MockServer::start().await;
        let session = connect(&mock_server).await;
        mount_devices(&mock_server).await;

        let (devices, _response) = session.list_all_devices().await.unwrap();
        let devices = devices.unwrap();
        let types: Vec<&str> = devices.iter().filter_map(|d| d.device_type()).collect();
        assert_eq!(types, ["wifi-switch", "thermostat", "wifi-switch"]);
    }

    #[tokio::test]
    async fn custom_filter() {
        let mock_server = MockServer::start().await;
        let session = connect(&mock_server).await;
        mount_devices(&mock_server).await;

        let (devices, _response) = session.list_devices_filtered(&["thermostat"]).await.unwrap();
        let devices = devices.unwrap();
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].id().unwrap().as_str(), "thermo-1");
    }

    #[tokio::test]
    async fn odd_records_keep_the_rest_of_the_list() {
        let mock_server = MockServer::start().await;
        let session = connect(&mock_server).await;

        Mock::given(method("POST"))
            .and(path("/loadMain"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "devices": [
                    {"cid": "outlet-1", "type": "wifi-switch"},
                    {"uuid": "hub-9", "type": "hub"},
                    {"cid": "x", "type": null}
                ]
            })))
            .mount(&mock_server)
            .await;

        let (outlets, _response) = session.list_devices().await.unwrap();
        let outlets = outlets.unwrap();
        assert_eq!(outlets.len(), 1);
        assert_eq!(outlets[0].id().unwrap().as_str(), "outlet-1");

        let (all, _response) = session.list_all_devices().await.unwrap();
        let all = all.unwrap();
        assert_eq!(all.len(), 3);
        assert!(all[1].id().is_none());
        assert_eq!(all[1].fields()["uuid"], "hub-9");
        assert_eq!(all[2].device_type(), None);
    }

    #[tokio::test]
    async fn server_error_returns_none_with_response() {
        let mock_server = MockServer::start().await;
        let session = connect(&mock_server).await;

        Mock::given(method("POST"))
            .and(path("/loadMain"))
            .respond_with(ResponseTemplate::new(500).set_body_string("maintenance"))
            .mount(&mock_server)
            .await;

        let (devices, response) = session.list_devices().await.unwrap();
        assert!(devices.is_none());
        assert_eq!(response.status_code(), 500);
        assert_eq!(response.body(), "maintenance");
        assert_eq!(response.provider_error().unwrap().status, 500);
    }

    #[tokio::test]
    async fn error_header_returns_none() {
        let mock_server = MockServer::start().await;
        let session = connect(&mock_server).await;

        Mock::given(method("POST"))
            .and(path("/loadMain"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("error", "token expired")
                    .set_body_json(device_list()),
            )
            .mount(&mock_server)
            .await;

        let (devices, response) = session.list_devices().await.unwrap();
        assert!(devices.is_none());
        assert_eq!(response.error_indicator(), Some("token expired"));
    }

    #[tokio::test]
    async fn body_without_devices_returns_none() {
        let mock_server = MockServer::start().await;
        let session = connect(&mock_server).await;

        Mock::given(method("POST"))
            .and(path("/loadMain"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"msg": "ok"})))
            .mount(&mock_server)
            .await;

        let (devices, response) = session.list_devices().await.unwrap();
        assert!(devices.is_none());
        assert!(response.is_success());
    }
}

// ============================================================================
// Power Control Tests
// ============================================================================

mod power_control {
    use super::*;

    fn switch_body(cid: &str, action: &str) -> serde_json::Value {
        json!({"cid": cid, "uri": "/relay", "action": action})
    }

    #[tokio::test]
    async fn turn_on_repeats_and_returns_last_body() {
        let mock_server = MockServer::start().await;
        let session = connect(&mock_server).await;

        Mock::given(method("POST"))
            .and(path("/devRequest"))
            .and(header("tk", "abc"))
            .and(body_json(switch_body("outlet-1", "open")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"seq": "early"})))
            .up_to_n_times(2)
            .expect(2)
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/devRequest"))
            .and(body_json(switch_body("outlet-1", "open")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"seq": "last"})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let (data, response) = session.turn_on("outlet-1", Some(3)).await.unwrap();
        assert_eq!(data, Some(json!({"seq": "last"})));
        assert_eq!(response.status_code(), 200);
    }

    #[tokio::test]
    async fn turn_off_sends_break_on_every_repeat() {
        let mock_server = MockServer::start().await;
        let session = connect(&mock_server).await;

        Mock::given(method("POST"))
            .and(path("/devRequest"))
            .and(body_json(switch_body("outlet-2", "break")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 0})))
            .expect(2)
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/devRequest"))
            .and(body_json(switch_body("outlet-2", "open")))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        // Default repeat count is 2
        let (data, _response) = session.turn_off("outlet-2", None).await.unwrap();
        assert_eq!(data, Some(json!({"code": 0})));
    }

    #[tokio::test]
    async fn session_repeat_default_is_used() {
        let mock_server = MockServer::start().await;
        mount_login(&mock_server).await;

        let session = CloudSession::builder(USERNAME, PASSWORD)
            .with_base_url(mock_server.uri())
            .with_repeats(Repeat::new(4).unwrap())
            .connect()
            .await
            .unwrap();

        Mock::given(method("POST"))
            .and(path("/devRequest"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(4)
            .mount(&mock_server)
            .await;

        session.turn_on("outlet-1", None).await.unwrap();
    }

    #[tokio::test]
    async fn repeats_even_when_provider_fails() {
        let mock_server = MockServer::start().await;
        let session = connect(&mock_server).await;

        Mock::given(method("POST"))
            .and(path("/devRequest"))
            .respond_with(ResponseTemplate::new(503))
            .expect(3)
            .mount(&mock_server)
            .await;

        let (data, response) = session.turn_on("outlet-1", Some(3)).await.unwrap();
        assert!(data.is_none());
        assert_eq!(response.status_code(), 503);
    }

    #[tokio::test]
    async fn zero_repeat_is_config_error_without_requests() {
        let mock_server = MockServer::start().await;
        let session = connect(&mock_server).await;

        Mock::given(method("POST"))
            .and(path("/devRequest"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let err = session.turn_on("outlet-1", Some(0)).await.unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::ZeroRepeat)));
    }

    #[tokio::test]
    async fn non_json_body_yields_no_data() {
        let mock_server = MockServer::start().await;
        let session = connect(&mock_server).await;

        Mock::given(method("POST"))
            .and(path("/devRequest"))
            .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
            .mount(&mock_server)
            .await;

        let (data, response) = session.turn_on("outlet-1", Some(1)).await.unwrap();
        assert!(data.is_none());
        assert_eq!(response.body(), "OK");
    }

    #[tokio::test]
    async fn accepts_device_record_ids() {
        let mock_server = MockServer::start().await;
        let session = connect(&mock_server).await;

        Mock::given(method("POST"))
            .and(path("/loadMain"))
            .respond_with(ResponseTemplate::new(200).set_body_json(device_list()))
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/devRequest"))
            .and(body_json(switch_body("outlet-1", "open")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let (devices, _response) = session.list_devices().await.unwrap();
        let devices = devices.unwrap();
        session.turn_on(devices[0].id().unwrap(), Some(1)).await.unwrap();
    }
}

// ============================================================================
// Raw Request Tests
// ============================================================================

mod raw_requests {
    use reqwest::Method;
    use reqwest::header::{HeaderMap, HeaderValue};

    use super::*;

    #[tokio::test]
    async fn defaults_to_auth_headers() {
        let mock_server = MockServer::start().await;
        let session = connect(&mock_server).await;

        Mock::given(method("POST"))
            .and(path("/deviceDetail"))
            .and(header("tk", "abc"))
            .and(body_json(json!({"cid": "outlet-1"})))
            .respond_with(ResponseTemplate::new(202).set_body_string("queued"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let response = session
            .send_request(
                Method::POST,
                "/deviceDetail",
                Some(&json!({"cid": "outlet-1"})),
                None,
            )
            .await
            .unwrap();

        // Returned as is, even though it is not a 200
        assert_eq!(response.status_code(), 202);
        assert_eq!(response.body(), "queued");
    }

    #[tokio::test]
    async fn explicit_headers_replace_auth_headers() {
        let mock_server = MockServer::start().await;
        let session = connect(&mock_server).await;

        Mock::given(method("GET"))
            .and(path("/ping"))
            .and(header("x-custom", "1"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut headers = HeaderMap::new();
        headers.insert("x-custom", HeaderValue::from_static("1"));

        let response = session
            .send_request(Method::GET, "/ping", None, Some(&headers))
            .await
            .unwrap();
        assert_eq!(response.status_code(), 200);

        let requests = mock_server.received_requests().await.unwrap();
        let ping = requests
            .iter()
            .find(|r| r.url.path() == "/ping")
            .unwrap();
        assert!(!ping.headers.contains_key("tk"));
    }
}

// ============================================================================
// Error Handling Tests
// ============================================================================

mod error_handling {
    use super::*;

    #[tokio::test]
    async fn connection_refused_at_login_is_transport_error() {
        // Use a port that's definitely not listening
        let err = CloudSession::builder(USERNAME, PASSWORD)
            .with_base_url("http://127.0.0.1:59999")
            .connect()
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Transport(TransportError::Http(_))));
    }

    #[tokio::test]
    async fn timeout_on_list_is_transport_error() {
        let mock_server = MockServer::start().await;
        mount_login(&mock_server).await;

        let session = CloudSession::builder(USERNAME, PASSWORD)
            .with_base_url(mock_server.uri())
            .with_timeout(Duration::from_millis(200))
            .connect()
            .await
            .unwrap();

        Mock::given(method("POST"))
            .and(path("/loadMain"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(device_list())
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&mock_server)
            .await;

        let err = session.list_devices().await.unwrap_err();
        assert!(matches!(err, Error::Transport(TransportError::Timeout(_))));
    }

    #[tokio::test]
    async fn timeout_on_switch_fails_whole_operation() {
        let mock_server = MockServer::start().await;
        mount_login(&mock_server).await;

        let session = CloudSession::builder(USERNAME, PASSWORD)
            .with_base_url(mock_server.uri())
            .with_timeout(Duration::from_millis(200))
            .connect()
            .await
            .unwrap();

        Mock::given(method("POST"))
            .and(path("/devRequest"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&mock_server)
            .await;

        let err = session.turn_off("outlet-1", Some(2)).await.unwrap_err();
        assert!(matches!(err, Error::Transport(TransportError::Timeout(_))));
    }

    #[tokio::test]
    async fn default_config_points_at_vesync() {
        assert_eq!(
            SessionConfig::default().base_url(),
            "https://server1.vesync.com:4007"
        );
    }
}
