//! Integration tests for the HTTP attendance client.
//!
//! These tests spin up a real `axum` server on a random local port and
//! point the client at it, so the request actually crosses a socket.

#[cfg(feature = "http")]
mod http {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use axum::extract::State;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use punchcard_protocol::{
        AttendanceRecord, EmployeeId, GeoCoordinate, PunchDirection,
    };
    use punchcard_remote::{
        AttendanceApi, HttpAttendanceClient, RemoteConfig, RemoteError,
    };
    use serde_json::Value;

    /// What the fake attendance API answers, and what it received.
    #[derive(Clone)]
    struct FakeApi {
        status: StatusCode,
        body: &'static str,
        received: Arc<Mutex<Vec<Value>>>,
    }

    async fn attendance(
        State(api): State<FakeApi>,
        Json(record): Json<Value>,
    ) -> (StatusCode, String) {
        api.received.lock().unwrap().push(record);
        (api.status, api.body.to_string())
    }

    /// Starts the fake API on `127.0.0.1:0` and returns its base URL plus
    /// the list of bodies it receives.
    async fn start_api(
        status: StatusCode,
        body: &'static str,
    ) -> (String, Arc<Mutex<Vec<Value>>>) {
        let received = Arc::new(Mutex::new(Vec::new()));
        let state = FakeApi {
            status,
            body,
            received: Arc::clone(&received),
        };
        let app = Router::new()
            .route("/api/attendance", post(attendance))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("should bind");
        let addr = listener.local_addr().expect("should have local addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        (format!("http://{addr}"), received)
    }

    fn client_for(base_url: &str) -> HttpAttendanceClient {
        HttpAttendanceClient::new(&RemoteConfig {
            base_url: base_url.to_string(),
            timeout: Duration::from_secs(5),
            ..RemoteConfig::default()
        })
        .expect("client should build")
    }

    fn record(direction: PunchDirection) -> AttendanceRecord {
        AttendanceRecord::new(
            EmployeeId::new("EMP001"),
            direction,
            GeoCoordinate::new(12.9, 77.6).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_submit_success_posts_wire_record() {
        let (url, received) = start_api(StatusCode::OK, "{}").await;
        let client = client_for(&url);

        client
            .submit(&record(PunchDirection::ClockIn))
            .await
            .expect("200 should be accepted");

        let bodies = received.lock().unwrap().clone();
        assert_eq!(bodies.len(), 1);
        assert_eq!(
            bodies[0],
            serde_json::json!({
                "employee_id": "EMP001",
                "type": "clock_in",
                "clock_in": true,
                "latitude": 12.9,
                "longitude": 77.6,
            })
        );
    }

    #[tokio::test]
    async fn test_submit_created_counts_as_success() {
        let (url, _) = start_api(StatusCode::CREATED, "").await;
        let client = client_for(&url);

        let result = client.submit(&record(PunchDirection::ClockOut)).await;

        assert!(result.is_ok(), "any 2xx is success, got {result:?}");
    }

    #[tokio::test]
    async fn test_submit_server_error_uses_body_message() {
        let (url, _) = start_api(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"message":"server busy"}"#,
        )
        .await;
        let client = client_for(&url);

        let result = client.submit(&record(PunchDirection::ClockIn)).await;

        assert_eq!(
            result,
            Err(RemoteError::Rejected {
                status: 500,
                message: "server busy".into(),
            })
        );
    }

    #[tokio::test]
    async fn test_submit_undecodable_body_uses_fallback_message() {
        let (url, _) =
            start_api(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>").await;
        let client = client_for(&url);

        let result = client.submit(&record(PunchDirection::ClockOut)).await;

        assert_eq!(
            result,
            Err(RemoteError::Rejected {
                status: 502,
                message: "Failed to punch out".into(),
            })
        );
    }

    #[tokio::test]
    async fn test_submit_body_without_message_uses_fallback_message() {
        let (url, _) = start_api(StatusCode::BAD_REQUEST, r#"{"code":7}"#).await;
        let client = client_for(&url);

        let result = client.submit(&record(PunchDirection::ClockIn)).await;

        assert!(
            matches!(
                &result,
                Err(RemoteError::Rejected { status: 400, message })
                    if message == "Failed to punch in"
            ),
            "got {result:?}"
        );
    }

    #[tokio::test]
    async fn test_submit_unknown_route_is_rejected_not_unreachable() {
        let (url, received) = start_api(StatusCode::OK, "{}").await;
        let client = HttpAttendanceClient::new(&RemoteConfig {
            base_url: url,
            endpoint: "/api/missing".into(),
            timeout: Duration::from_secs(5),
        })
        .unwrap();

        let result = client.submit(&record(PunchDirection::ClockIn)).await;

        assert!(matches!(
            result,
            Err(RemoteError::Rejected { status: 404, .. })
        ));
        assert!(received.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_closed_port_returns_unreachable() {
        // Bind to grab a free port, then close it so nothing is listening.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = client_for(&format!("http://{addr}"));

        let result = client.submit(&record(PunchDirection::ClockIn)).await;

        assert!(
            matches!(result, Err(RemoteError::Unreachable(_))),
            "got {result:?}"
        );
    }

    #[test]
    fn test_new_rejects_malformed_base_url() {
        let result = HttpAttendanceClient::new(&RemoteConfig {
            base_url: "not a url".into(),
            ..RemoteConfig::default()
        });

        assert!(matches!(result, Err(RemoteError::InvalidConfig(_))));
    }
}
