use std::path::Path;

use dispatch_server::state::AppState;
use reqwest::StatusCode;
use serde_json::{json, Value};

/// Serve the app on an ephemeral port and return its base URL.
async fn spawn_server(static_dir: Option<&Path>) -> String {
    let app = dispatch_server::app(AppState::default(), static_dir);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{addr}")
}

async fn post_json(client: &reqwest::Client, url: String, body: Value) -> reqwest::Response {
    client.post(url).json(&body).send().await.expect("request")
}

async fn create_driver(client: &reqwest::Client, base: &str, name: &str, x: f64, y: f64) -> Value {
    post_json(client, format!("{base}/drivers"), json!({ "name": name, "x": x, "y": y }))
        .await
        .json()
        .await
        .expect("driver json")
}

async fn create_rider(client: &reqwest::Client, base: &str, name: &str) -> Value {
    post_json(client, format!("{base}/riders"), json!({ "name": name }))
        .await
        .json()
        .await
        .expect("rider json")
}

async fn request_ride(
    client: &reqwest::Client,
    base: &str,
    rider_id: &Value,
    pickup: (f64, f64),
) -> reqwest::Response {
    let body = json!({
        "rider_id": rider_id,
        "pickup_x": pickup.0,
        "pickup_y": pickup.1,
        "dropoff_x": 20.0,
        "dropoff_y": 20.0,
    });
    post_json(client, format!("{base}/ride_requests"), body).await
}

#[tokio::test]
async fn driver_crud_round_trip() {
    let base = spawn_server(None).await;
    let client = reqwest::Client::new();

    let driver = create_driver(&client, &base, "Ada", 1.5, -2.0).await;
    assert_eq!(driver["name"], "Ada");
    assert_eq!(driver["position"], json!({ "x": 1.5, "y": -2.0 }));
    assert_eq!(driver["status"], "available");
    let id = driver["id"].as_str().expect("id").to_string();

    let listed: Value = client
        .get(format!("{base}/drivers"))
        .send()
        .await
        .expect("list")
        .json()
        .await
        .expect("list json");
    assert_eq!(listed, json!([driver.clone()]));

    let fetched: Value = client
        .get(format!("{base}/drivers/{id}"))
        .send()
        .await
        .expect("get")
        .json()
        .await
        .expect("get json");
    assert_eq!(fetched, driver);

    let deleted = client
        .delete(format!("{base}/drivers/{id}"))
        .send()
        .await
        .expect("delete");
    assert_eq!(deleted.status(), StatusCode::OK);
    let body: Value = deleted.json().await.expect("message");
    assert_eq!(body, json!({ "message": "Driver deleted successfully" }));

    let missing = client
        .get(format!("{base}/drivers/{id}"))
        .send()
        .await
        .expect("get missing");
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    let body: Value = missing.json().await.expect("detail");
    assert_eq!(body, json!({ "detail": "Driver not found" }));
}

#[tokio::test]
async fn rider_crud_and_missing_ids() {
    let base = spawn_server(None).await;
    let client = reqwest::Client::new();

    let rider = create_rider(&client, &base, "Grace").await;
    let id = rider["id"].as_str().expect("id").to_string();

    let fetched: Value = client
        .get(format!("{base}/riders/{id}"))
        .send()
        .await
        .expect("get")
        .json()
        .await
        .expect("json");
    assert_eq!(fetched, rider);

    let deleted = client
        .delete(format!("{base}/riders/{id}"))
        .send()
        .await
        .expect("delete");
    assert_eq!(deleted.status(), StatusCode::OK);

    let again = client
        .delete(format!("{base}/riders/{id}"))
        .send()
        .await
        .expect("delete again");
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn ride_request_is_assigned_to_nearest_driver() {
    let base = spawn_server(None).await;
    let client = reqwest::Client::new();

    let a = create_driver(&client, &base, "A", 0.0, 0.0).await;
    create_driver(&client, &base, "B", 10.0, 10.0).await;
    let rider = create_rider(&client, &base, "rider").await;

    let response = request_ride(&client, &base, &rider["id"], (1.0, 1.0)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let request: Value = response.json().await.expect("request json");
    assert_eq!(request["status"], "assigned");
    assert_eq!(request["assigned_driver_id"], a["id"]);
    assert_eq!(request["pickup"], json!({ "x": 1.0, "y": 1.0 }));

    let driver: Value = client
        .get(format!("{base}/drivers/{}", a["id"].as_str().expect("id")))
        .send()
        .await
        .expect("driver")
        .json()
        .await
        .expect("driver json");
    assert_eq!(driver["status"], "busy");
}

#[tokio::test]
async fn ride_request_without_drivers_is_unassignable() {
    let base = spawn_server(None).await;
    let client = reqwest::Client::new();
    let rider = create_rider(&client, &base, "rider").await;

    let response = request_ride(&client, &base, &rider["id"], (1.0, 1.0)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let request: Value = response.json().await.expect("json");
    assert_eq!(request["status"], "unassignable");
    assert_eq!(request["assigned_driver_id"], Value::Null);
}

#[tokio::test]
async fn ride_request_for_unknown_rider_is_404() {
    let base = spawn_server(None).await;
    let client = reqwest::Client::new();

    let response = request_ride(&client, &base, &json!("ghost"), (0.0, 0.0)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.expect("detail");
    assert_eq!(body, json!({ "detail": "Rider not found" }));

    let listed: Value = client
        .get(format!("{base}/ride_requests"))
        .send()
        .await
        .expect("list")
        .json()
        .await
        .expect("list json");
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn busy_driver_delete_conflicts_until_completion() {
    let base = spawn_server(None).await;
    let client = reqwest::Client::new();

    let driver = create_driver(&client, &base, "D", 0.0, 0.0).await;
    let driver_id = driver["id"].as_str().expect("id").to_string();
    let rider = create_rider(&client, &base, "rider").await;
    let request: Value = request_ride(&client, &base, &rider["id"], (0.0, 1.0))
        .await
        .json()
        .await
        .expect("request");
    let request_id = request["id"].as_str().expect("id").to_string();

    let conflict = client
        .delete(format!("{base}/drivers/{driver_id}"))
        .send()
        .await
        .expect("delete busy");
    assert_eq!(conflict.status(), StatusCode::CONFLICT);

    let started = client
        .post(format!("{base}/ride_requests/{request_id}/start"))
        .send()
        .await
        .expect("start");
    assert_eq!(started.status(), StatusCode::OK);

    let completed: Value = client
        .post(format!("{base}/ride_requests/{request_id}/complete"))
        .send()
        .await
        .expect("complete")
        .json()
        .await
        .expect("complete json");
    assert_eq!(completed["status"], "completed");
    assert_eq!(completed["assigned_driver_id"], Value::Null);

    let again = client
        .post(format!("{base}/ride_requests/{request_id}/complete"))
        .send()
        .await
        .expect("complete again");
    assert_eq!(again.status(), StatusCode::CONFLICT);

    let deleted = client
        .delete(format!("{base}/drivers/{driver_id}"))
        .send()
        .await
        .expect("delete free");
    assert_eq!(deleted.status(), StatusCode::OK);
}

#[tokio::test]
async fn cancel_and_delete_ride_requests() {
    let base = spawn_server(None).await;
    let client = reqwest::Client::new();

    create_driver(&client, &base, "D", 0.0, 0.0).await;
    let rider = create_rider(&client, &base, "rider").await;
    let request: Value = request_ride(&client, &base, &rider["id"], (0.0, 0.0))
        .await
        .json()
        .await
        .expect("request");
    let request_id = request["id"].as_str().expect("id").to_string();

    let cancelled: Value = client
        .post(format!("{base}/ride_requests/{request_id}/cancel"))
        .send()
        .await
        .expect("cancel")
        .json()
        .await
        .expect("cancel json");
    assert_eq!(cancelled["status"], "cancelled");

    let drivers: Value = client
        .get(format!("{base}/drivers"))
        .send()
        .await
        .expect("drivers")
        .json()
        .await
        .expect("drivers json");
    assert_eq!(drivers[0]["status"], "available");

    let deleted: Value = client
        .delete(format!("{base}/ride_requests/{request_id}"))
        .send()
        .await
        .expect("delete")
        .json()
        .await
        .expect("delete json");
    assert_eq!(deleted, json!({ "message": "Ride request deleted successfully" }));

    let missing = client
        .get(format!("{base}/ride_requests/{request_id}"))
        .send()
        .await
        .expect("get missing");
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn tick_counts_up_from_zero() {
    let base = spawn_server(None).await;
    let client = reqwest::Client::new();

    for expected in 1..=3 {
        let body: Value = client
            .post(format!("{base}/tick"))
            .send()
            .await
            .expect("tick")
            .json()
            .await
            .expect("tick json");
        assert_eq!(body, json!({ "time": expected }));
    }

    let current: Value = client
        .get(format!("{base}/tick"))
        .send()
        .await
        .expect("read clock")
        .json()
        .await
        .expect("clock json");
    assert_eq!(current, json!({ "time": 3 }));
}

#[tokio::test]
async fn stats_and_transition_timestamps_follow_the_clock() {
    let base = spawn_server(None).await;
    let client = reqwest::Client::new();

    create_driver(&client, &base, "D", 0.0, 0.0).await;
    let rider = create_rider(&client, &base, "rider").await;
    client.post(format!("{base}/tick")).send().await.expect("tick");
    client.post(format!("{base}/tick")).send().await.expect("tick");

    let request: Value = request_ride(&client, &base, &rider["id"], (0.0, 0.0))
        .await
        .json()
        .await
        .expect("request");
    assert_eq!(request["timing"]["requested_at"], 2);
    assert_eq!(request["timing"]["assigned_at"], 2);

    request_ride(&client, &base, &rider["id"], (0.0, 0.0)).await;

    let stats: Value = client
        .get(format!("{base}/stats"))
        .send()
        .await
        .expect("stats")
        .json()
        .await
        .expect("stats json");
    assert_eq!(stats["time"], 2);
    assert_eq!(stats["algorithm"], "nearest");
    assert_eq!(stats["requests_total"], 2);
    assert_eq!(stats["assigned_total"], 1);
    assert_eq!(stats["unassignable_total"], 1);
    assert_eq!(stats["assignment_rate"], 0.5);
}

#[tokio::test]
async fn driver_position_update() {
    let base = spawn_server(None).await;
    let client = reqwest::Client::new();
    let driver = create_driver(&client, &base, "D", 0.0, 0.0).await;
    let id = driver["id"].as_str().expect("id");

    let moved: Value = client
        .put(format!("{base}/drivers/{id}/position"))
        .json(&json!({ "x": 4.0, "y": 5.0 }))
        .send()
        .await
        .expect("move")
        .json()
        .await
        .expect("move json");
    assert_eq!(moved["position"], json!({ "x": 4.0, "y": 5.0 }));

    let missing = client
        .put(format!("{base}/drivers/nope/position"))
        .json(&json!({ "x": 0.0, "y": 0.0 }))
        .send()
        .await
        .expect("move missing");
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn static_directory_serves_index() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("index.html"), "<h1>dispatch</h1>").expect("write index");

    let base = spawn_server(Some(dir.path())).await;
    let client = reqwest::Client::new();

    let root = client.get(format!("{base}/")).send().await.expect("root");
    assert_eq!(root.status(), StatusCode::OK);
    assert_eq!(root.text().await.expect("text"), "<h1>dispatch</h1>");

    let asset = client
        .get(format!("{base}/static/index.html"))
        .send()
        .await
        .expect("asset");
    assert_eq!(asset.status(), StatusCode::OK);

    let health = client.get(format!("{base}/health")).send().await.expect("health");
    assert_eq!(health.text().await.expect("text"), "ok");
}
