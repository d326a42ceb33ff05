use std::borrow::Cow;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::future::join_all;
use github_client::{
    ApiRequestable, ApiService, ClientError, ConnectivityGate, Endpoint, PathStatus,
    PreparedRequest, RawResponse, Transport,
};
use reqwest::header::HeaderMap;
use serde::Deserialize;
use tokio::sync::Notify;

struct GetUser;

impl Endpoint for GetUser {
    fn path(&self) -> Cow<'_, str> {
        Cow::Borrowed("/users/octocat")
    }
}

#[derive(Debug, Deserialize)]
struct User {
    login: String,
}

/// Holds every request until `release` is notified.
#[derive(Default)]
struct HeldTransport {
    entered: Notify,
    release: Notify,
    calls: AtomicUsize,
}

impl Transport for HeldTransport {
    async fn execute(&self, _request: PreparedRequest) -> Result<RawResponse, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.entered.notify_one();
        self.release.notified().await;
        Ok(RawResponse {
            status: 200,
            headers: HeaderMap::new(),
            body: r#"{"login":"octocat"}"#.into(),
        })
    }
}

#[tokio::test]
async fn offline_gate_never_reaches_transport() {
    let (updater, gate) = ConnectivityGate::channel(true);
    updater.set(PathStatus::Unsatisfied);

    let service = ApiService::mocked(200, r#"{"login":"octocat"}"#).with_connectivity(gate);
    let error = service
        .send::<User, _>(&GetUser)
        .await
        .expect_err("offline");

    assert!(error.is_offline());
    assert_eq!(service.transport().calls(), 0);
}

#[tokio::test]
async fn gate_recovery_lets_requests_through() {
    let (updater, gate) = ConnectivityGate::channel(false);
    let service = ApiService::mocked(200, r#"{"login":"octocat"}"#).with_connectivity(gate);

    assert!(service.send::<User, _>(&GetUser).await.is_err());

    updater.set(PathStatus::Satisfied);
    let user: User = service.send(&GetUser).await.expect("online again");
    assert_eq!(user.login, "octocat");
    assert_eq!(service.transport().calls(), 1);
}

#[tokio::test]
async fn in_flight_request_ignores_later_flag_flip() {
    let (updater, gate) = ConnectivityGate::channel(true);
    let service = Arc::new(ApiService::new(HeldTransport::default()).with_connectivity(gate));

    let in_flight = tokio::spawn({
        let service = Arc::clone(&service);
        async move { service.send::<User, _>(&GetUser).await }
    });

    service.transport().entered.notified().await;
    updater.set(PathStatus::Unsatisfied);

    let rejected = service.send::<User, _>(&GetUser).await;
    assert!(matches!(rejected, Err(ClientError::Offline)));

    service.transport().release.notify_one();
    let user = in_flight
        .await
        .expect("task completes")
        .expect("transport outcome wins");
    assert_eq!(user.login, "octocat");
    assert_eq!(service.transport().calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_sends_are_independent() {
    let gate = ConnectivityGate::fixed(true);
    let service = Arc::new(
        ApiService::mocked(200, r#"{"login":"octocat"}"#).with_connectivity(gate),
    );

    let tasks = (0..16).map(|_| {
        let service = Arc::clone(&service);
        tokio::spawn(async move { service.send::<User, _>(&GetUser).await })
    });

    for result in join_all(tasks).await {
        let user = result.expect("task completes").expect("request succeeds");
        assert_eq!(user.login, "octocat");
    }
    assert_eq!(service.transport().calls(), 16);
}
