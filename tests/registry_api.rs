//! Registration, deregistration and query over HTTP.

use std::net::SocketAddr;

use reqwest::StatusCode;
use serde_json::json;

use service_registry::http::{GetHostStatusesResponse, HostRequest};
use service_registry::{HostStatus, Status};

mod common;

async fn post(registry: SocketAddr, path: &str, body: &HostRequest) -> reqwest::Response {
    common::client()
        .post(format!("http://{}{}", registry, path))
        .json(body)
        .send()
        .await
        .unwrap()
}

async fn get_statuses(registry: SocketAddr, service_id: &str) -> Vec<HostStatus> {
    let res = common::client()
        .get(format!("http://{}/service-id/{}", registry, service_id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let mut body: GetHostStatusesResponse = res.json().await.unwrap();
    body.host_statuses.sort_by(|a, b| a.host.cmp(&b.host));
    body.host_statuses
}

#[tokio::test]
async fn test_register_two_hosts_under_one_service() {
    let (registry, store, shutdown) = common::start_registry().await;

    let one = post(registry, "/service-id/register", &HostRequest::new("one", "127.0.0.1:8080")).await;
    let two = post(registry, "/service-id/register", &HostRequest::new("one", "127.0.0.1:8081")).await;
    assert_eq!(one.status(), StatusCode::CREATED);
    assert_eq!(two.status(), StatusCode::CREATED);

    assert_eq!(store.service_count(), 1);
    assert_eq!(
        get_statuses(registry, "one").await,
        vec![
            HostStatus::new("127.0.0.1:8080", Status::Unknown),
            HostStatus::new("127.0.0.1:8081", Status::Unknown),
        ]
    );

    shutdown.trigger();
}

#[tokio::test]
async fn test_register_two_services() {
    let (registry, store, shutdown) = common::start_registry().await;

    post(registry, "/service-id/register", &HostRequest::new("one", "127.0.0.1:8080")).await;
    post(registry, "/service-id/register", &HostRequest::new("two", "127.0.0.1:8081")).await;

    assert_eq!(store.service_count(), 2);
    assert_eq!(
        get_statuses(registry, "one").await,
        vec![HostStatus::new("127.0.0.1:8080", Status::Unknown)]
    );
    assert_eq!(
        get_statuses(registry, "two").await,
        vec![HostStatus::new("127.0.0.1:8081", Status::Unknown)]
    );

    shutdown.trigger();
}

#[tokio::test]
async fn test_register_rejects_invalid_input() {
    let (registry, store, shutdown) = common::start_registry().await;

    let bad_host = post(registry, "/service-id/register", &HostRequest::new("one", "wrong host")).await;
    assert_eq!(bad_host.status(), StatusCode::BAD_REQUEST);

    let empty_id = post(registry, "/service-id/register", &HostRequest::new("", "127.0.0.1:8080")).await;
    assert_eq!(empty_id.status(), StatusCode::BAD_REQUEST);

    let broken = common::client()
        .post(format!("http://{}/service-id/register", registry))
        .body("wrong")
        .send()
        .await
        .unwrap();
    assert_eq!(broken.status(), StatusCode::BAD_REQUEST);

    let missing_field = common::client()
        .post(format!("http://{}/service-id/register", registry))
        .json(&json!({"service_id": "one"}))
        .send()
        .await
        .unwrap();
    assert_eq!(missing_field.status(), StatusCode::BAD_REQUEST);

    assert_eq!(store.service_count(), 0);
    shutdown.trigger();
}

#[tokio::test]
async fn test_remove_one_of_two_hosts() {
    let (registry, _store, shutdown) = common::start_registry().await;

    post(registry, "/service-id/register", &HostRequest::new("one", "127.0.0.1:8080")).await;
    post(registry, "/service-id/register", &HostRequest::new("one", "127.0.0.1:8081")).await;
    let res = post(registry, "/service-id/remove", &HostRequest::new("one", "127.0.0.1:8080")).await;
    assert_eq!(res.status(), StatusCode::OK);

    assert_eq!(
        get_statuses(registry, "one").await,
        vec![HostStatus::new("127.0.0.1:8081", Status::Unknown)]
    );

    shutdown.trigger();
}

#[tokio::test]
async fn test_remove_last_host_drops_service() {
    let (registry, store, shutdown) = common::start_registry().await;

    post(registry, "/service-id/register", &HostRequest::new("one", "127.0.0.1:8080")).await;
    let res = post(registry, "/service-id/remove", &HostRequest::new("one", "127.0.0.1:8080")).await;
    assert_eq!(res.status(), StatusCode::OK);

    assert!(!store.service_topology().contains_key("one"));
    assert!(get_statuses(registry, "one").await.is_empty());

    shutdown.trigger();
}

#[tokio::test]
async fn test_remove_missing_host_is_ok() {
    let (registry, store, shutdown) = common::start_registry().await;

    let res = post(registry, "/service-id/remove", &HostRequest::new("not-exist", "127.0.0.1:8080")).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(store.service_count(), 0);

    let bad_host = post(registry, "/service-id/remove", &HostRequest::new("not-exist", "nope")).await;
    assert_eq!(bad_host.status(), StatusCode::BAD_REQUEST);

    shutdown.trigger();
}

#[tokio::test]
async fn test_get_unknown_service_returns_empty_list() {
    let (registry, _store, shutdown) = common::start_registry().await;

    let res = common::client()
        .get(format!("http://{}/service-id/not-exist", registry))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("x-request-id"));

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body, json!({"host_statuses": []}));

    shutdown.trigger();
}

#[tokio::test]
async fn test_registry_reports_itself_healthy() {
    let (registry, _store, shutdown) = common::start_registry().await;

    let res = common::client()
        .get(format!("http://{}/health", registry))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body, json!({"status": "healthy"}));

    shutdown.trigger();
}
