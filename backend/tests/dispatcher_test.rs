//! Integration tests for the mock dispatcher
//!
//! These tests verify the dispatcher contract:
//! 1. Reads return seeded records and reject unknown ids
//! 2. Patches shallow-merge and never change `id`
//! 3. Chat routing is a pure function of the message
//! 4. Simulated latency and cancellation

use serde_json::json;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use warehouse_studio_backend::dispatcher::{LatencyProfile, MockDispatcher};
use warehouse_studio_backend::error::AppError;
use warehouse_studio_backend::state::seed::{seed_agents, seed_connectors};
use warehouse_studio_backend::state::AgentStatus;

fn dispatcher() -> MockDispatcher {
    MockDispatcher::new(LatencyProfile::none())
}

#[tokio::test]
async fn test_every_seeded_agent_is_readable() {
    let d = dispatcher();
    for seeded in seed_agents() {
        let agent = d
            .get(&format!("/agents/{}", seeded.id))
            .await
            .unwrap()
            .data
            .into_agent()
            .unwrap();
        assert_eq!(agent, seeded);
    }
}

#[tokio::test]
async fn test_every_seeded_connector_is_readable() {
    let d = dispatcher();
    for seeded in seed_connectors() {
        let connector = d
            .get(&format!("/connectors/{}", seeded.id))
            .await
            .unwrap()
            .data
            .into_connector()
            .unwrap();
        assert_eq!(connector.id, seeded.id);
    }
}

#[tokio::test]
async fn test_unknown_ids_are_rejected() {
    let d = dispatcher();
    for path in ["/agents/DOCK", "/agents/dock2", "/agents/dock/extra"] {
        assert!(d.get(path).await.is_err(), "{path} should be rejected");
    }
    assert!(matches!(
        d.get("/connectors/nope").await,
        Err(AppError::ConnectorNotFound(_))
    ));
    assert!(matches!(
        d.get("/flows/nope").await,
        Err(AppError::FlowNotFound(_))
    ));
}

#[tokio::test]
async fn test_unknown_route() {
    let d = dispatcher();
    assert!(matches!(
        d.get("/warehouses").await,
        Err(AppError::UnknownRoute(_))
    ));
    assert!(matches!(
        d.post("/agents", json!({})).await,
        Err(AppError::UnknownRoute(_))
    ));
}

#[tokio::test]
async fn test_patch_merges_and_keeps_id() {
    let d = dispatcher();
    let partial = json!({
        "id": "renamed",
        "kpi": "12 trucks/hr",
        "config": { "maxQueue": 4 }
    });

    let once = d
        .patch("/agents/dock", partial.clone())
        .await
        .unwrap()
        .data
        .into_agent()
        .unwrap();
    let twice = d
        .patch("/agents/dock", partial)
        .await
        .unwrap()
        .data
        .into_agent()
        .unwrap();

    assert_eq!(once, twice);
    assert_eq!(once.id, "dock");
    assert_eq!(once.kpi, "12 trucks/hr");
    assert_eq!(once.config.get("maxQueue"), Some(&json!(4)));
    assert_eq!(once.config.len(), 1);
    assert!(d.get("/agents/renamed").await.is_err());
}

#[tokio::test]
async fn test_chat_routing_is_deterministic() {
    let d = dispatcher();
    let messages = [
        "Show me all PPE violations in the last hour",
        "Is the evening shift adequately staffed?",
        "How many trucks are currently waiting?",
        "What's our win rate this quarter and why are we losing?",
        "Any compliance issues today?",
        "tell me a joke",
    ];
    for message in messages {
        let first = d
            .post("/chat", json!({ "message": message }))
            .await
            .unwrap()
            .data
            .into_chat()
            .unwrap();
        let second = d
            .post("/chat", json!({ "message": message }))
            .await
            .unwrap()
            .data
            .into_chat()
            .unwrap();
        assert_eq!(first.handled_by, second.handled_by, "{message}");
        assert_eq!(first.agent_id, second.agent_id, "{message}");
    }
}

#[tokio::test]
async fn test_chat_scenarios() {
    let d = dispatcher();
    let safety = d
        .post("/chat", json!({ "message": "Show me all PPE violations in the last hour" }))
        .await
        .unwrap()
        .data
        .into_chat()
        .unwrap();
    assert_eq!(safety.handled_by, "Safety Agent");
    assert!(safety.response.contains("PPE violations"));

    let labour = d
        .post("/chat", json!({ "message": "Is the evening shift adequately staffed?" }))
        .await
        .unwrap()
        .data
        .into_chat()
        .unwrap();
    assert_eq!(labour.handled_by, "Labour Planner");
}

#[tokio::test]
async fn test_action_does_not_mutate() {
    let d = dispatcher();
    let response = d
        .post("/agents/safety/action", json!({ "action": "pause" }))
        .await
        .unwrap();
    assert_eq!(
        response.data.into_action().unwrap().status,
        AgentStatus::Stopped
    );

    let safety = d.get("/agents/safety").await.unwrap().data.into_agent().unwrap();
    assert_eq!(safety.status, AgentStatus::Running);
}

#[tokio::test(start_paused = true)]
async fn test_latency_is_simulated() {
    let d = MockDispatcher::new(LatencyProfile::default());
    let start = tokio::time::Instant::now();
    d.get("/agents").await.unwrap();
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(100), "{elapsed:?}");
    assert!(elapsed <= Duration::from_millis(300), "{elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn test_cancel_during_latency() {
    let d = MockDispatcher::new(LatencyProfile::default());
    let token = CancellationToken::new();
    let call = {
        let d = d.clone();
        let token = token.clone();
        tokio::spawn(async move {
            d.patch_with("/agents/dock", json!({ "status": "running" }), &token)
                .await
        })
    };

    tokio::time::sleep(Duration::from_millis(50)).await;
    token.cancel();
    let result = call.await.unwrap();
    assert!(result.unwrap_err().is_cancelled());

    let dock = d.get("/agents/dock").await.unwrap().data.into_agent().unwrap();
    assert_eq!(dock.status, AgentStatus::Stopped);
}
