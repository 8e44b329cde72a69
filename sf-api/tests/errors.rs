mod common;

use mockito::Matcher;

use common::{client_for, setup_mock_server};
use sf_api::{RequestDescriptor, RequestOptions};
use sf_core::SfError;

#[tokio::test]
async fn test_not_found_is_bad_status_and_not_retried() {
    let (mut server, client) = setup_mock_server().await;
    let m = server
        .mock("GET", "/devices")
        .with_status(404)
        .with_body(r#"{"message":"not found"}"#)
        .expect(1)
        .create_async()
        .await;

    match client.execute(RequestDescriptor::get("devices")).await {
        Err(SfError::BadStatus { status, body }) => {
            assert_eq!(status, 404);
            assert!(body.contains("not found"));
        }
        other => panic!("unexpected: {other:?}"),
    }
    m.assert_async().await;
}

#[tokio::test]
async fn test_too_many_requests_outside_drain() {
    let (mut server, client) = setup_mock_server().await;
    let m = server
        .mock("GET", "/devices")
        .with_status(429)
        .with_body("not json")
        .expect(1)
        .create_async()
        .await;

    let err = client
        .execute(RequestDescriptor::get("devices"))
        .await
        .unwrap_err();
    assert!(matches!(err, SfError::TooManyRequests));
    m.assert_async().await;
}

#[tokio::test]
async fn test_invalid_json_is_response_error() {
    let (mut server, client) = setup_mock_server().await;
    let _m = server
        .mock("GET", "/devices")
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    match client.execute(RequestDescriptor::get("devices")).await {
        Err(SfError::Response { body, .. }) => assert_eq!(body, "<html>maintenance</html>"),
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn test_non_200_success_is_bad_status() {
    let (mut server, client) = setup_mock_server().await;
    let _m = server
        .mock("GET", "/devices")
        .with_status(204)
        .create_async()
        .await;

    let err = client
        .execute(RequestDescriptor::get("devices"))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(204));
}

#[tokio::test]
async fn test_connection_refused() {
    // Nothing listens on port 1.
    let client = client_for("http://127.0.0.1:1");
    let err = client
        .execute(RequestDescriptor::get("devices"))
        .await
        .unwrap_err();
    assert!(matches!(err, SfError::Connection(_)), "got {err:?}");
}

#[tokio::test]
async fn test_options_pass_through() {
    let (mut server, client) = setup_mock_server().await;
    let m = server
        .mock("POST", "/devices/bulk")
        .match_header("x-request-id", "42")
        .match_body(Matcher::Json(serde_json::json!({"ids": ["a"]})))
        .with_status(200)
        .with_body(r#"{"total": 1}"#)
        .expect(1)
        .create_async()
        .await;

    let options = RequestOptions {
        headers: vec![("x-request-id".into(), "42".into())],
        body: Some(serde_json::json!({"ids": ["a"]})),
        timeout: None,
    };
    let request =
        RequestDescriptor::new(reqwest::Method::POST, "devices/bulk").with_options(options);
    let page = client.execute(request).await.unwrap();

    assert_eq!(page.data["total"], 1);
    assert!(page.next.is_none());
    m.assert_async().await;
}
