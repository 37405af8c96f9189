use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Router, http::StatusCode, routing::get};
use course_feed::source::CourseSource;
use course_feed::{FetchController, FetchError, HttpCourseSource, SourceConfig};

const COURSES: &str = r#"[
    {"id":1,"numberOfLessons":5,"name":"Swift","link":"http://x","imageUrl":"http://x/i.png"},
    {"id":2,"numberOfLessons":12,"name":"Rust","link":"http://y","imageUrl":"::bad::"}
]"#;

async fn spawn_server() -> SocketAddr {
    let app = Router::new()
        .route("/courses", get(|| async { COURSES }))
        .route("/missing", get(|| async { (StatusCode::NOT_FOUND, "[]") }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test server");
    let addr = listener.local_addr().expect("Failed to read local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    addr
}

fn source_for(endpoint: String) -> HttpCourseSource {
    HttpCourseSource::new(SourceConfig {
        endpoint,
        timeout: None,
    })
    .expect("Failed to create http source")
}

#[tokio::test]
async fn test_get_returns_status_and_body() {
    let addr = spawn_server().await;
    let source = source_for(format!("http://{}/courses", addr));

    let response = source.get().await.expect("request failed");

    assert_eq!(response.status, 200);
    assert_eq!(response.body, COURSES.as_bytes());
}

#[tokio::test]
async fn test_end_to_end_fetch_over_http() {
    let addr = spawn_server().await;
    let controller = FetchController::new(Arc::new(source_for(format!("http://{}/courses", addr))));

    controller.fetch_courses().await;

    let state = controller.state();
    assert!(!state.is_fetching);
    assert_eq!(state.error_message, "");
    assert_eq!(state.courses.len(), 2);
    assert_eq!(state.courses[1].name, "Rust");
    assert!(state.courses[1].image_locator().is_none());
}

#[tokio::test]
async fn test_not_found_reports_endpoint() {
    let addr = spawn_server().await;
    let endpoint = format!("http://{}/missing", addr);
    let controller = FetchController::new(Arc::new(source_for(endpoint.clone())));

    controller.fetch_courses().await;

    let state = controller.state();
    assert!(!state.is_fetching);
    assert_eq!(state.error_message, format!("Failed to fetch data from {}", endpoint));
    assert!(state.courses.is_empty());
}

#[tokio::test]
async fn test_connection_refused_is_a_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to read local addr");
    drop(listener);

    let source = source_for(format!("http://{}/courses", addr));
    let result = source.get().await;
    assert!(matches!(result, Err(FetchError::Network(_))));

    let controller = FetchController::new(Arc::new(source));
    controller.fetch_courses().await;

    let state = controller.state();
    assert!(state.is_fetching);
    assert!(state.error_message.starts_with("Failed to fetch data from remote URL"));
}
