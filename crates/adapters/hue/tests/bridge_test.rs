//! Hue adapter tests against a mock bridge served by axum on an ephemeral
//! port.

use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::routing::{get, put};
use axum::{Json, Router};
use serde_json::{Value, json};

use nightlight_adapter_hue::{HueBridge, HueConfig, HueError};
use nightlight_app::ports::DeviceApplier;
use nightlight_domain::device::DeviceState;

const USERNAME: &str = "test-user";

#[derive(Clone, Default)]
struct MockBridge {
    calls: Arc<Mutex<Vec<(String, bool)>>>,
    broken: Vec<String>,
}

fn unauthorized() -> Value {
    json!([{ "error": { "type": 1, "address": "/", "description": "unauthorized user" } }])
}

async fn list_lights(Path(user): Path<String>) -> Json<Value> {
    if user != USERNAME {
        return Json(unauthorized());
    }
    Json(json!({
        "1": { "name": "Porch", "state": { "on": false } },
        "2": { "name": "Hallway", "state": { "on": false } },
        "3": { "name": "Kitchen", "state": { "on": true } }
    }))
}

async fn set_state(
    State(bridge): State<MockBridge>,
    Path((user, id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Json<Value> {
    if user != USERNAME {
        return Json(unauthorized());
    }
    if bridge.broken.contains(&id) {
        return Json(json!([{ "error": {
            "type": 201,
            "address": format!("/lights/{id}/state/on"),
            "description": "parameter, on, is not modifiable. Device is set to off."
        } }]));
    }
    let on = body["on"].as_bool().unwrap_or_default();
    bridge.calls.lock().unwrap().push((id.clone(), on));
    Json(json!([{ "success": { format!("/lights/{id}/state/on"): on } }]))
}

async fn spawn_bridge(bridge: MockBridge) -> String {
    let app = Router::new()
        .route("/api/{user}/lights", get(list_lights))
        .route("/api/{user}/lights/{id}/state", put(set_state))
        .with_state(bridge);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn config(address: String, username: &str, lights: &[&str]) -> HueConfig {
    HueConfig {
        bridge_address: address,
        username: username.to_string(),
        lights: lights.iter().map(ToString::to_string).collect(),
        request_timeout_secs: 2,
    }
}

#[tokio::test]
async fn should_resolve_configured_lights_on_connect() {
    let address = spawn_bridge(MockBridge::default()).await;

    let bridge = HueBridge::connect(&config(address, USERNAME, &["Hallway", "Porch"]))
        .await
        .unwrap();

    let ids: Vec<_> = bridge.lights().iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, vec!["2", "1"]);
}

#[tokio::test]
async fn should_reject_unknown_username() {
    let address = spawn_bridge(MockBridge::default()).await;

    let err = HueBridge::connect(&config(address, "intruder", &["Porch"]))
        .await
        .unwrap_err();

    assert!(matches!(err, HueError::Bridge { kind: 1, .. }));
}

#[tokio::test]
async fn should_reject_unknown_light() {
    let address = spawn_bridge(MockBridge::default()).await;

    let err = HueBridge::connect(&config(address, USERNAME, &["Garage"]))
        .await
        .unwrap_err();

    assert!(matches!(err, HueError::LightNotFound(name) if name == "Garage"));
}

#[tokio::test]
async fn should_switch_every_configured_light() {
    let mock = MockBridge::default();
    let address = spawn_bridge(mock.clone()).await;
    let bridge = HueBridge::connect(&config(address, USERNAME, &["Porch", "Hallway"]))
        .await
        .unwrap();

    bridge.apply_state(DeviceState::On).await.unwrap();
    bridge.apply_state(DeviceState::Off).await.unwrap();

    assert_eq!(
        *mock.calls.lock().unwrap(),
        vec![
            ("1".to_string(), true),
            ("2".to_string(), true),
            ("1".to_string(), false),
            ("2".to_string(), false),
        ]
    );
}

#[tokio::test]
async fn should_try_remaining_lights_when_one_fails() {
    let mock = MockBridge {
        broken: vec!["1".to_string()],
        ..MockBridge::default()
    };
    let address = spawn_bridge(mock.clone()).await;
    let bridge = HueBridge::connect(&config(address, USERNAME, &["Porch", "Kitchen"]))
        .await
        .unwrap();

    let err = bridge.switch_all(DeviceState::Off).await.unwrap_err();

    assert!(matches!(err, HueError::PartialFailure { failed: 1, total: 2 }));
    assert_eq!(*mock.calls.lock().unwrap(), vec![("3".to_string(), false)]);
}

#[tokio::test]
async fn should_report_unreachable_bridge() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let err = HueBridge::connect(&config(address, USERNAME, &["Porch"]))
        .await
        .unwrap_err();

    assert!(matches!(err, HueError::Http(_)));
}
