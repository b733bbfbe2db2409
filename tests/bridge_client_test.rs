// Integration tests for `BridgeClient` and the light commands using wiremock.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hue_light::api::client::{BridgeClient, DEVICE_TYPE};
use hue_light::api::transport::TransportConfig;
use hue_light::cli::lights::{handle_control, handle_list};
use hue_light::config::{OutputMode, RuntimeConfig};
use hue_light::error::AppError;
use hue_light::models::directory::parse_devices;
use hue_light::models::light_state::{parse_light_state, LightChange, UNSET};

const KEY: &str = "test-application-key";

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, BridgeClient) {
    let server = MockServer::start().await;
    let client = BridgeClient::with_client(reqwest::Client::new(), server.uri(), Some(KEY.into()));
    (server, client)
}

fn runtime(output_mode: OutputMode) -> RuntimeConfig {
    RuntimeConfig {
        output_mode,
        transport: TransportConfig::default(),
    }
}

fn device_list() -> serde_json::Value {
    json!({
        "errors": [],
        "data": [
            {
                "id": "dev-desk",
                "metadata": {"name": "Desk", "archetype": "desk_lamp"},
                "services": [
                    {"rid": "zc-1", "rtype": "zigbee_connectivity"},
                    {"rid": "light-desk", "rtype": "light"}
                ]
            },
            {
                "id": "dev-dimmer",
                "metadata": {"name": "Dimmer switch"},
                "services": [{"rid": "btn-1", "rtype": "button"}]
            }
        ]
    })
}

fn light(on: bool, brightness: f64, x: f64, y: f64) -> serde_json::Value {
    json!({
        "errors": [],
        "data": [{
            "id": "light-desk",
            "type": "light",
            "on": {"on": on},
            "dimming": {"brightness": brightness},
            "color": {"xy": {"x": x, "y": y}}
        }]
    })
}

async fn mount_desk(server: &MockServer, current: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/clip/v2/resource/device"))
        .and(header("hue-application-key", KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(device_list()))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/clip/v2/resource/light/light-desk"))
        .and(header("hue-application-key", KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(current))
        .mount(server)
        .await;
}

// ── Client requests ─────────────────────────────────────────────────

#[tokio::test]
async fn test_register_client_posts_device_type() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api"))
        .and(body_json(json!({"devicetype": DEVICE_TYPE, "generateclientkey": true})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"success": {"username": "abc", "clientkey": "DEF"}}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let raw = client.register_client().await.unwrap();
    assert!(raw.contains("\"username\""));
}

#[tokio::test]
async fn test_get_devices_sends_application_key() {
    let (server, client) = setup().await;
    mount_desk(&server, light(true, 40.0, 0.3, 0.3)).await;

    let directory = parse_devices(&client.get_devices().await.unwrap());
    assert_eq!(directory.len(), 1);
    assert_eq!(directory.get("Desk"), Some("light-desk"));
}

#[tokio::test]
async fn test_get_light() {
    let (server, client) = setup().await;
    mount_desk(&server, light(true, 40.0, 0.45, 0.41)).await;

    let state = parse_light_state(&client.get_light("light-desk").await.unwrap());
    assert!(state.on);
    assert_eq!(state.brightness, 40.0);
    assert_eq!(state.color_x, 0.45);
    assert_eq!(state.color_y, 0.41);
}

#[tokio::test]
async fn test_error_status_is_api_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/clip/v2/resource/device"))
        .respond_with(ResponseTemplate::new(403).set_body_string("unauthorized user"))
        .mount(&server)
        .await;

    let result = client.get_devices().await;
    assert!(
        matches!(result, Err(AppError::Api { status: Some(403), .. })),
        "expected Api error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_put_ignores_rejection_status() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/clip/v2/resource/light/light-desk"))
        .respond_with(ResponseTemplate::new(400).set_body_json(
            json!({"errors": [{"description": "device (light) is \"soft off\""}], "data": []}),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let state = parse_light_state(&light(true, 10.0, 0.1, 0.2).to_string());
    client.put_light_state("light-desk", &state).await.unwrap();
}

#[tokio::test]
async fn test_transport_failure_is_error() {
    // Reserve a port, then release it so nothing is listening there.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    let client = BridgeClient::with_client(
        reqwest::Client::new(),
        format!("http://127.0.0.1:{port}"),
        Some(KEY.into()),
    );
    let result = client.get_devices().await;
    assert!(matches!(result, Err(AppError::Http(_))), "got: {result:?}");
}

// ── Control ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_control_keeps_unset_values() {
    let (server, client) = setup().await;
    mount_desk(&server, light(true, 40.0, 0.3, 0.32)).await;

    Mock::given(method("PUT"))
        .and(path("/clip/v2/resource/light/light-desk"))
        .and(header("hue-application-key", KEY))
        .and(body_json(json!({
            "on": {"on": true},
            "dimming": {"brightness": 40.0},
            "color": {"xy": {"x": 0.6, "y": 0.32}}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"errors": [], "data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let change = LightChange::from_flags(Some(UNSET), Some(0.6), None).unwrap();
    let merged = handle_control(&client, "Desk", &change, &runtime(OutputMode::Json))
        .await
        .unwrap();
    assert_eq!(merged.brightness, 40.0);
    assert_eq!(merged.color_x, 0.6);
}

#[tokio::test]
async fn test_control_zero_brightness_turns_off() {
    let (server, client) = setup().await;
    mount_desk(&server, light(true, 40.0, 0.3, 0.32)).await;

    Mock::given(method("PUT"))
        .and(path("/clip/v2/resource/light/light-desk"))
        .and(body_json(json!({
            "on": {"on": false},
            "dimming": {"brightness": 0.0},
            "color": {"xy": {"x": 0.3, "y": 0.32}}
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let change = LightChange::from_flags(Some(0.0), None, None).unwrap();
    let merged = handle_control(&client, "desk", &change, &runtime(OutputMode::Table))
        .await
        .unwrap();
    assert!(!merged.on);
}

#[tokio::test]
async fn test_control_unknown_light() {
    let (server, client) = setup().await;
    mount_desk(&server, light(true, 40.0, 0.3, 0.32)).await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = handle_control(
        &client,
        "Garage",
        &LightChange::default(),
        &runtime(OutputMode::Json),
    )
    .await;
    assert!(matches!(result, Err(AppError::LightNotFound(name)) if name == "Garage"));
}

// ── List ────────────────────────────────────────────────────────────

async fn mount_two_lights(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/clip/v2/resource/device"))
        .and(header("hue-application-key", KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": [],
            "data": [
                {
                    "metadata": {"name": "Window"},
                    "services": [{"rid": "light-window", "rtype": "light"}]
                },
                {
                    "metadata": {"name": "Ceiling"},
                    "services": [
                        {"rid": "zc-2", "rtype": "zigbee_connectivity"},
                        {"rid": "light-ceiling", "rtype": "light"}
                    ]
                }
            ]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_list_fetches_every_light() {
    let (server, client) = setup().await;
    mount_two_lights(&server).await;

    Mock::given(method("GET"))
        .and(path("/clip/v2/resource/light/light-ceiling"))
        .and(header("hue-application-key", KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(light(true, 80.0, 0.31, 0.33)))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/clip/v2/resource/light/light-window"))
        .and(header("hue-application-key", KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(light(false, 0.0, 0.5, 0.4)))
        .expect(1)
        .mount(&server)
        .await;

    let entries = handle_list(&client, &runtime(OutputMode::Table)).await.unwrap();

    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Ceiling", "Window"]);
    assert_eq!(entries[0].resource_id, "light-ceiling");
    assert!(entries[0].state.on);
    assert_eq!(entries[0].state.brightness, 80.0);
    assert_eq!(entries[1].resource_id, "light-window");
    assert!(!entries[1].state.on);
    assert_eq!(entries[1].state.color_x, 0.5);
}

#[tokio::test]
async fn test_list_aborts_when_a_light_fails() {
    let (server, client) = setup().await;
    mount_two_lights(&server).await;

    Mock::given(method("GET"))
        .and(path("/clip/v2/resource/light/light-ceiling"))
        .respond_with(ResponseTemplate::new(200).set_body_json(light(true, 80.0, 0.31, 0.33)))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/clip/v2/resource/light/light-window"))
        .respond_with(ResponseTemplate::new(503).set_body_string("bridge busy"))
        .expect(1)
        .mount(&server)
        .await;

    let result = handle_list(&client, &runtime(OutputMode::Json)).await;
    assert!(
        matches!(result, Err(AppError::Api { status: Some(503), .. })),
        "expected Api error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_list_with_no_lights() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/clip/v2/resource/device"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"errors": [], "data": []})))
        .mount(&server)
        .await;

    let entries = handle_list(&client, &runtime(OutputMode::Table)).await.unwrap();
    assert!(entries.is_empty());
}
