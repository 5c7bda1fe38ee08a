//! Sync engine integration tests
//!
//! A real server is started on a loopback port and a client store is fed
//! from it through the SSE channel, with decisions posted back over HTTP.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use careerhq_api::agents::{
    AgentProgressHandle, AgentStore, ApprovalAction, ApprovalWorkflow, ConnectionManager,
    EventChannel, EventStream, MockChannel, MockTiming, StoreChange, SyncResult,
};
use careerhq_api::api::{router, AppState};
use careerhq_api::config::Config;
use careerhq_api::domain::agent::AgentStatus;
use careerhq_api::domain::approval::{ApprovalDecision, ApprovalType};
use careerhq_api::infrastructure::channels::{backend_connection, SseChannel};
use careerhq_api::infrastructure::gateways::HttpApprovalGateway;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn test_config() -> Config {
    Config {
        mock_step_delay: Duration::ZERO,
        ..Config::default()
    }
}

/// Serve the router on an ephemeral port
async fn spawn_server() -> SocketAddr {
    let app = router(AppState::new(test_config()));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    addr
}

/// Opens fine and delivers nothing
struct SilentChannel;

#[async_trait]
impl EventChannel for SilentChannel {
    async fn open(&self) -> SyncResult<EventStream> {
        Ok(Box::pin(futures::stream::empty()))
    }
}

async fn wait_until(check: impl Fn() -> bool) {
    tokio::time::timeout(Duration::from_secs(10), async {
        while !check() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("condition not reached in time");
}

async fn get_json(url: String) -> Value {
    reqwest::get(url).await.unwrap().json().await.unwrap()
}

#[tokio::test]
async fn test_client_store_follows_server_stream() {
    let addr = spawn_server().await;
    let base_url = format!("http://{}", addr);

    // The silent fallback would leave the store empty, so any state comes from the server
    let store = Arc::new(AgentStore::new());
    let primary: Arc<dyn EventChannel> = Arc::new(SseChannel::new(base_url));
    let manager = ConnectionManager::new(store.clone(), primary, Arc::new(SilentChannel))
        .with_max_retries(0);

    let handle = manager.connect();
    wait_until(|| {
        store.task_registry().overall_completion() == 100 && store.pending_approval().is_some()
    })
    .await;

    let resume = store.get_agent_state("resume_agent");
    assert_eq!(resume.status, AgentStatus::Waiting);
    assert_eq!(resume.completion_percentage, 100);
    assert!(resume.waiting_for_approval);
    assert_eq!(
        store.pending_approval().map(|data| data.approval_type()),
        Some(ApprovalType::ResumeImprovements)
    );

    // The server keeps the stream open once its scripts are done
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(store.is_connected());
    assert!(!manager.is_fallback());
    assert_eq!(manager.last_error(), None);

    manager.close();
    handle.await.unwrap();
    assert!(!store.is_connected());
}

#[tokio::test]
async fn test_served_state_is_independent_of_the_backend_mirror() {
    let addr = spawn_server().await;
    let base_url = format!("http://{}", addr);

    // Wired like the binary: the mirror follows this same server's stream
    let config = Config {
        api_url: base_url.clone(),
        ..test_config()
    };
    let mirror = Arc::new(AgentStore::new());
    let connection = backend_connection(&config, mirror.clone());
    let handle = connection.connect();
    wait_until(|| {
        mirror.get_agent_state("resume_agent").status == AgentStatus::Waiting
            && mirror.task_registry().overall_completion() == 100
    })
    .await;

    let state = get_json(format!("{}/api/state/resume_agent", base_url)).await;
    assert_eq!(
        state,
        json!({"name": "resume_agent", "status": "idle", "completion_percentage": 0})
    );
    let tasks = get_json(format!("{}/api/tasks", base_url)).await;
    assert_eq!(tasks, json!({"tasks": [], "overall_completion": 0}));

    // Kick-off tasks survive the mirror's task updates
    let client = reqwest::Client::new();
    client
        .post(format!("{}/api/agents/resume", base_url))
        .json(&json!({"resume": "Senior Frontend Developer"}))
        .send()
        .await
        .unwrap();
    let tasks = get_json(format!("{}/api/tasks", base_url)).await;
    assert_eq!(tasks["tasks"].as_array().unwrap().len(), 1);
    assert_eq!(tasks["tasks"][0]["id"], "task-1");

    connection.close();
    handle.await.unwrap();
}

#[tokio::test]
async fn test_approval_round_trip_over_http() {
    let addr = spawn_server().await;
    let base_url = format!("http://{}", addr);

    // Populate the approval slot from the mock scripts
    let store = Arc::new(AgentStore::new());
    let mock: Arc<dyn EventChannel> = Arc::new(MockChannel::new(MockTiming::instant()));
    ConnectionManager::new(store.clone(), mock.clone(), mock)
        .activate_fallback()
        .await
        .unwrap();

    let workflow = ApprovalWorkflow::new(store.clone(), Arc::new(HttpApprovalGateway::new(base_url)));
    let action = ApprovalAction::new("approveResumeImprovements", ApprovalType::ResumeImprovements);
    let prompt = workflow.render(&action, |data| data.approval_type().to_string());
    assert_eq!(prompt.as_deref(), Some("resume_improvements"));

    let outcome = workflow
        .submit(ApprovalDecision::reject("Keep my original summary"))
        .await
        .unwrap();

    assert_eq!(outcome.ack.message, "Changes rejected.");
    assert!(store.pending_approval().is_none());
    assert!(workflow.render(&action, |_| ()).is_none());
}

#[tokio::test]
async fn test_unreachable_backend_falls_back_to_mock() {
    // Bind then drop to get a port nobody listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let store = Arc::new(AgentStore::new());
    let primary: Arc<dyn EventChannel> = Arc::new(SseChannel::new(format!("http://{}", addr)));
    let fallback: Arc<dyn EventChannel> = Arc::new(MockChannel::new(MockTiming::instant()));
    let manager = ConnectionManager::new(store.clone(), primary, fallback).with_max_retries(2);

    manager.connect().await.unwrap();

    assert!(manager.is_fallback());
    assert_eq!(manager.attempts(), 2);
    assert!(store.is_connected());
    assert_eq!(store.get_agent_state("resume_agent").completion_percentage, 100);
}

#[tokio::test]
async fn test_progress_handles_notify_subscribers() {
    let store = Arc::new(AgentStore::new());
    let mut changes = store.subscribe();
    let progress = AgentProgressHandle::new(store.clone(), "resume_agent");

    progress.start_analyzing().unwrap();
    progress.update_progress(35, "Parsed resume sections").unwrap();
    progress.update_progress(80, "Matched keywords").unwrap();
    progress.stop_analyzing().unwrap();

    for _ in 0..4 {
        assert_eq!(
            changes.recv().await.unwrap(),
            StoreChange::Progress("resume_agent_progress".to_string())
        );
    }
    let slice = store.progress("resume_agent");
    assert_eq!(slice.completion_status, 100);
    assert_eq!(
        slice.contributions.iter().map(|c| c.value).collect::<Vec<_>>(),
        vec![35, 45]
    );
}
