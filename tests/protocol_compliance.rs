//! A2A wire-format and HTTP contract tests
//!
//! These tests verify the protocol surface end to end: JSON shapes on the
//! wire, the always-200 server contract, and the client's conversion of
//! every transport failure into a failed task result.

mod common;

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use a2a_greenlight::{
    agents::{generator_card, GeneratorOutput},
    client::{AgentClient, ClientConfig},
    protocol::{
        A2AError, AgentCard, Task, TaskState, TaskStatus, AGENT_CARD_PATH, HEALTH_PATH,
        PROTOCOL_VERSION, TASKS_PATH,
    },
    server::{blocking_skill_fn, skill_fn, AgentServer},
};

use common::{spawn_generator, spawn_server, ScriptedGenerator};

#[test]
fn test_task_state_serialization() {
    // States serialize to lowercase strings
    let cases = [
        (TaskState::Pending, "pending"),
        (TaskState::Running, "running"),
        (TaskState::Completed, "completed"),
        (TaskState::Failed, "failed"),
        (TaskState::Cancelled, "cancelled"),
    ];
    for (state, expected) in cases {
        assert_eq!(serde_json::to_value(state).unwrap(), json!(expected));
    }
}

#[test]
fn test_task_wire_format() {
    let task = Task::new("generate")
        .with_input("topic_or_feedback", "Rain")
        .with_task_id("task-1");
    let value = serde_json::to_value(&task).unwrap();

    assert_eq!(value["skill"], "generate");
    assert_eq!(value["input"]["topic_or_feedback"], "Rain");
    assert_eq!(value["task_id"], "task-1");

    // The correlation id is omitted entirely when unset
    let bare = serde_json::to_value(Task::new("review")).unwrap();
    assert!(bare.get("task_id").is_none());
}

#[test]
fn test_task_status_wire_shapes() {
    // A completed status carries output and never an error
    let done = TaskStatus::completed(&GeneratorOutput {
        content: "a draft".to_string(),
    })
    .unwrap();
    let value = serde_json::to_value(&done).unwrap();
    assert_eq!(value["state"], "completed");
    assert_eq!(value["output"]["content"], "a draft");
    assert!(value.get("error").is_none());

    // A failed status carries a non-empty error
    let failed = TaskStatus::failed("engine unavailable");
    let value = serde_json::to_value(&failed).unwrap();
    assert_eq!(value["state"], "failed");
    assert_eq!(value["error"], "engine unavailable");
    assert!(value.get("output").is_none());
}

#[test]
fn test_agent_card_wire_format() {
    let card = generator_card("http://localhost:8001".parse().unwrap());
    let value = serde_json::to_value(&card).unwrap();

    assert_eq!(value["name"], "GeneratorAgent");
    assert_eq!(value["protocol_version"], PROTOCOL_VERSION);
    assert!(value["skills"].is_array());
    assert_eq!(value["skills"][0]["id"], "generate");

    // Field names are snake_case on the wire
    assert!(value.get("protocolVersion").is_none());
    assert!(value.get("default_input_modes").is_some());
}

#[tokio::test]
async fn test_server_exposes_card_and_health_over_http() {
    let base_url = spawn_generator(ScriptedGenerator::new()).await;

    let card_url = base_url.join(AGENT_CARD_PATH).unwrap();
    let card: serde_json::Value = reqwest::get(card_url).await.unwrap().json().await.unwrap();
    assert_eq!(card["name"], "GeneratorAgent");
    assert_eq!(card["protocol_version"], PROTOCOL_VERSION);

    let health_url = base_url.join(HEALTH_PATH).unwrap();
    let health: serde_json::Value = reqwest::get(health_url).await.unwrap().json().await.unwrap();
    assert_eq!(health, json!({ "status": "healthy", "agent": "GeneratorAgent" }));
}

#[tokio::test]
async fn test_task_round_trip_against_live_server() {
    let base_url = spawn_generator(ScriptedGenerator::new()).await;
    let client = AgentClient::new(base_url).unwrap();

    let task = Task::new("generate").with_input("topic_or_feedback", "Rain");
    let status = client.execute(&task).await;
    assert!(status.is_completed());
    let output: GeneratorOutput = status.parse_output().unwrap();
    assert_eq!(output.content, "Draft 1: Rain");
}

#[tokio::test]
async fn test_invalid_task_input_returns_failed_result_not_http_error() {
    let base_url = spawn_generator(ScriptedGenerator::new()).await;
    let client = AgentClient::new(base_url.clone()).unwrap();

    // Unknown skill: still HTTP 200, failure in the body
    let status = client.execute(&Task::new("transcode")).await;
    assert!(status.is_failed());
    assert!(status.failure_cause().contains("transcode"));

    // Missing required input field
    let status = client.execute(&Task::new("generate")).await;
    assert!(status.is_failed());
    assert!(status.failure_cause().contains("topic_or_feedback"));
}

#[tokio::test]
async fn test_blocking_skill_does_not_starve_health_probes() {
    let base_url = spawn_server(|url| {
        let card = AgentCard::new("SlowAgent", "Thinks slowly", url);
        AgentServer::new(
            card,
            blocking_skill_fn(|task: Task| -> anyhow::Result<TaskStatus> {
                std::thread::sleep(Duration::from_millis(300));
                Ok(TaskStatus::completed(&json!({ "echo": task.skill }))?)
            }),
        )
    })
    .await;
    let client = AgentClient::new(base_url).unwrap();

    let task = Task::new("ponder");
    let (status, healthy) = tokio::join!(client.execute(&task), client.health_check());
    assert!(status.is_completed());
    assert!(healthy, "health must answer while a task is in flight");
}

#[tokio::test]
async fn test_panicking_skill_reports_failed_result() {
    let base_url = spawn_server(|url| {
        let card = AgentCard::new("FlakyAgent", "Panics under pressure", url);
        AgentServer::new(
            card,
            blocking_skill_fn(|_task: Task| -> anyhow::Result<TaskStatus> {
                panic!("decision function exploded")
            }),
        )
    })
    .await;
    let client = AgentClient::new(base_url).unwrap();

    let status = client.execute(&Task::new("explode")).await;
    assert!(status.is_failed());
    assert!(status.failure_cause().contains("panicked"));
}

#[tokio::test]
async fn test_panicking_async_skill_reports_failed_result() {
    let base_url = spawn_server(|url| {
        let card = AgentCard::new("FlakyAsyncAgent", "Panics mid-poll", url);
        AgentServer::new(
            card,
            skill_fn(|_task| async move { panic!("decision function exploded") }),
        )
    })
    .await;
    let client = AgentClient::new(base_url).unwrap();

    let status = client.execute(&Task::new("explode")).await;
    assert!(status.is_failed());
    assert!(status.failure_cause().contains("panicked"));
    assert!(status.failure_cause().contains("decision function exploded"));
}

#[tokio::test]
async fn test_client_folds_http_500_into_failed_result() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TASKS_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = AgentClient::new(mock_server.uri().parse().unwrap()).unwrap();
    let status = client.execute(&Task::new("generate")).await;

    assert!(status.is_failed());
    assert!(status.failure_cause().contains("HTTP request failed"));
    assert!(status.failure_cause().contains("500"));
}

#[tokio::test]
async fn test_client_folds_undecodable_body_into_failed_result() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TASKS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("these are not the droids"))
        .mount(&mock_server)
        .await;

    let client = AgentClient::new(mock_server.uri().parse().unwrap()).unwrap();
    let status = client.execute(&Task::new("generate")).await;

    assert!(status.is_failed());
    assert!(status.failure_cause().contains("HTTP request failed"));
}

#[tokio::test]
async fn test_client_folds_timeout_into_failed_result() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TASKS_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "state": "completed", "output": {} }))
                .set_delay(Duration::from_millis(600)),
        )
        .mount(&mock_server)
        .await;

    let config = ClientConfig::new().with_timeout(Duration::from_millis(200));
    let client = AgentClient::with_config(mock_server.uri().parse().unwrap(), config).unwrap();
    let status = client.execute(&Task::new("generate")).await;

    assert!(status.is_failed());
    assert!(status.failure_cause().contains("Request timeout"));
}

#[tokio::test]
async fn test_fetch_agent_card_surfaces_http_status() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(AGENT_CARD_PATH))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = AgentClient::new(mock_server.uri().parse().unwrap()).unwrap();
    let err = client.fetch_agent_card().await.unwrap_err();
    assert!(matches!(err, A2AError::Status { status: 404, .. }));
}

#[tokio::test]
async fn test_health_check_reflects_http_status() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(HEALTH_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = AgentClient::new(mock_server.uri().parse().unwrap()).unwrap();
    assert!(!client.health_check().await);
}
