use std::thread;
use std::time::Duration;

use anyhow::{Result, anyhow};
use cdnmon::api::{ApiError, DistributionsClient};
use cdnmon::models::{DistributionStatus, FilterState};
use tiny_http::{Header, Response, Server};

const PAGE_BODY: &str = r#"{
    "data": [
        {
            "id": "d-1",
            "name": "assets",
            "domain": "assets.example.com",
            "status": "active",
            "created_at": "2026-01-02T10:00:00Z",
            "updated_at": "2026-01-03T15:30:00Z"
        }
    ],
    "meta": { "pagination": { "total": 11, "total_pages": 2 } }
}"#;

/// Serve one canned response and check the request target
fn serve_once(status: u16, body: &'static str, expected_url: &'static str) -> Result<(String, thread::JoinHandle<()>)> {
    let server =
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
    let addr = format!("http://{}/api/", server.server_addr());

    let handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        assert_eq!(request.url(), expected_url);
        let response = Response::from_string(body)
            .with_status_code(status)
            .with_header(
                Header::from_bytes("Content-Type", "application/json")
                    .expect("valid content type header"),
            );
        request.respond(response).expect("response should succeed");
    });

    Ok((addr, handle))
}

#[tokio::test]
async fn list_sends_ordered_query_and_decodes_page() -> Result<()> {
    let (addr, handle) = serve_once(
        200,
        PAGE_BODY,
        "/api/distributions?page=2&limit=10&sort=-created_at&filter%5Bstatus%5D%5Beq%5D=active%2Csuspended",
    )?;

    let client = DistributionsClient::new(&addr, Duration::from_secs(2))?;
    let filters = FilterState {
        page: 2,
        status: "active,suspended".to_string(),
        priority: "high".to_string(),
        ..FilterState::default()
    };
    let page = client.list(&filters).await?;

    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].status, DistributionStatus::Active);
    assert_eq!(page.pagination().map(|p| p.total_pages), Some(2));

    handle.join().expect("server thread should join");
    Ok(())
}

#[tokio::test]
async fn server_error_is_reported_as_status() -> Result<()> {
    let (addr, handle) = serve_once(
        500,
        r#"{"error":"boom"}"#,
        "/api/distributions?page=1&limit=10&sort=-created_at",
    )?;

    let client = DistributionsClient::new(&addr, Duration::from_secs(2))?;
    let error = client
        .list(&FilterState::default())
        .await
        .expect_err("500 should fail");
    assert!(matches!(error, ApiError::Status { status } if status.as_u16() == 500));

    handle.join().expect("server thread should join");
    Ok(())
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() -> Result<()> {
    let (addr, handle) = serve_once(
        200,
        "<html>not json</html>",
        "/api/distributions?page=1&limit=10&sort=-created_at",
    )?;

    let client = DistributionsClient::new(&addr, Duration::from_secs(2))?;
    let error = client
        .list(&FilterState::default())
        .await
        .expect_err("html should not decode");
    assert!(matches!(error, ApiError::Decode(_)));

    handle.join().expect("server thread should join");
    Ok(())
}

#[tokio::test]
async fn unreachable_host_is_a_transport_error() -> Result<()> {
    let client = DistributionsClient::new("http://127.0.0.1:1", Duration::from_millis(200))?;
    let error = client
        .list(&FilterState::default())
        .await
        .expect_err("nothing listens on port 1");
    assert!(matches!(error, ApiError::Transport(_)));
    Ok(())
}
