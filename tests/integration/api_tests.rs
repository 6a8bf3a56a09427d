//! API integration tests
//!
//! These run against a live server backed by PostgreSQL.

use chrono::{DateTime, TimeZone, Utc};
use reqwest::Client;
use serde_json::{json, Value};
use std::{sync::Arc, time::Duration};

use visitor_desk::{
    database::{Database, PoolSettings},
    models::statistics::DashboardWindows,
    repository::statistics::StatisticsRepository,
    AppConfig,
};

const BASE_URL: &str = "http://localhost:3001/api";

async fn check_in(client: &Client, name: &str) -> Value {
    let response = client
        .post(format!("{}/visitors/checkin", BASE_URL))
        .json(&json!({
            "name": name,
            "email": "visitor@example.com",
            "company": "Acme",
            "purpose": "Meeting",
            "host_name": "Jane Host",
            "has_laptop": true,
            "laptop_make": "Lenovo",
            "laptop_serial": "PF-12345"
        }))
        .send()
        .await
        .expect("Failed to send check-in request");

    assert_eq!(response.status(), 201);
    response.json().await.expect("Failed to parse check-in response")
}

fn timestamp(value: &Value) -> DateTime<Utc> {
    value
        .as_str()
        .expect("Expected a timestamp string")
        .parse()
        .expect("Invalid timestamp")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "connected");
    assert!(body["pool"]["max_connections"].is_number());
}

#[tokio::test]
#[ignore]
async fn test_checkin_then_checkout() {
    let client = Client::new();

    let visitor = check_in(&client, "Integration Visitor").await;
    assert_eq!(visitor["status"], "checked_in");
    assert!(visitor["check_out_time"].is_null());
    let id = visitor["id"].as_i64().expect("No id in response");

    let response = client
        .get(format!("{}/visitors/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let fetched: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(fetched["name"], "Integration Visitor");
    assert_eq!(fetched["laptop_make"], "Lenovo");

    let response = client
        .put(format!("{}/visitors/{}/checkout", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let checked_out: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(checked_out["status"], "checked_out");
    let first_checkout = timestamp(&checked_out["check_out_time"]);

    // A repeated checkout is accepted and moves check_out_time forward
    tokio::time::sleep(Duration::from_millis(20)).await;
    let response = client
        .put(format!("{}/visitors/{}/checkout", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let again: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(again["status"], "checked_out");
    assert!(timestamp(&again["check_out_time"]) > first_checkout);
}

#[tokio::test]
#[ignore]
async fn test_checkin_requires_name() {
    let client = Client::new();

    let response = client
        .post(format!("{}/visitors/checkin", BASE_URL))
        .json(&json!({
            "name": "",
            "purpose": "Meeting",
            "host_name": "Jane Host"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["error"].is_string());
}

#[tokio::test]
#[ignore]
async fn test_list_visitors_by_status() {
    let client = Client::new();
    check_in(&client, "Listed Visitor").await;

    let response = client
        .get(format!("{}/visitors?status=checked_in", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    let visitors = body.as_array().expect("Expected an array");
    assert!(!visitors.is_empty());
    assert!(visitors.iter().all(|v| v["status"] == "checked_in"));

    let check_ins: Vec<DateTime<Utc>> = visitors.iter().map(|v| timestamp(&v["check_in_time"])).collect();
    assert!(check_ins.windows(2).all(|pair| pair[0] >= pair[1]));
}

#[tokio::test]
#[ignore]
async fn test_unknown_visitor_is_404() {
    let client = Client::new();

    for request in [
        client.get(format!("{}/visitors/999999999", BASE_URL)),
        client.put(format!("{}/visitors/999999999/checkout", BASE_URL)),
    ] {
        let response = request.send().await.expect("Failed to send request");
        assert_eq!(response.status(), 404);
        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["error"], "Visitor not found");
    }
}

#[tokio::test]
#[ignore]
async fn test_export_csv() {
    let client = Client::new();
    check_in(&client, "Exported Visitor").await;

    let response = client
        .get(format!("{}/visitors/export/csv", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/csv"));
    let disposition = response.headers()["content-disposition"].to_str().unwrap().to_string();
    assert!(disposition.contains("visitors-"));

    let body = response.text().await.expect("Failed to read body");
    assert!(body.starts_with("\"ID\",\"Name\""));
    assert!(body.contains("\"Exported Visitor\""));
}

#[tokio::test]
#[ignore]
async fn test_dashboard() {
    let client = Client::new();

    let response = client
        .get(format!("{}/statistics/dashboard", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    for key in ["todayVisitors", "currentlyCheckedIn", "weekVisitors", "monthVisitors"] {
        assert!(body[key].is_number(), "missing {key}");
    }
}

#[tokio::test]
#[ignore]
async fn test_visitor_statistics() {
    let client = Client::new();

    let response = client
        .get(format!(
            "{}/statistics/visitors?startDate=2024-01-01&endDate=2099-12-31",
            BASE_URL
        ))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body.is_array());

    let response = client
        .get(format!(
            "{}/statistics/visitors?startDate=2024-02-01&endDate=2024-01-01",
            BASE_URL
        ))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_directory_lists() {
    let client = Client::new();

    for path in ["hosts", "departments", "purposes"] {
        let response = client
            .get(format!("{}/{}", BASE_URL, path))
            .send()
            .await
            .expect("Failed to send request");

        assert!(response.status().is_success(), "GET /{path} failed");
        let body: Value = response.json().await.expect("Failed to parse response");
        assert!(body.is_array());
    }
}

/// Seeds rows around a fixed "now" far in the future and checks the counters
/// computed by PostgreSQL. Needs the database from config/default.toml.
#[tokio::test]
#[ignore]
async fn test_dashboard_counts_around_midnight() {
    let config = AppConfig::load().expect("Failed to load configuration");
    let database = Arc::new(Database::new(
        config.database.connect_options().expect("Invalid database options"),
        PoolSettings::from_config(&config.database, &config.monitor),
    ));
    assert!(database.ensure_connection().await, "database unreachable");
    let pool = database.pool().await;

    let seed_from = Utc.with_ymd_and_hms(2099, 1, 1, 0, 0, 0).unwrap();
    sqlx::query("DELETE FROM visitors WHERE check_in_time >= $1")
        .bind(seed_from)
        .execute(&pool)
        .await
        .expect("Failed to clear seeded rows");

    let check_ins = [
        Utc.with_ymd_and_hms(2099, 3, 1, 0, 0, 0).unwrap(),    // today, week, month
        Utc.with_ymd_and_hms(2099, 2, 28, 23, 59, 59).unwrap(), // week only
        Utc.with_ymd_and_hms(2099, 2, 22, 9, 30, 0).unwrap(),  // exactly 7 days back: week
        Utc.with_ymd_and_hms(2099, 2, 20, 12, 0, 0).unwrap(),  // none
    ];
    for check_in in check_ins {
        sqlx::query(
            "INSERT INTO visitors (name, purpose, host_name, check_in_time, check_out_time, status) \
             VALUES ('Seeded Visitor', 'Meeting', 'Jane Host', $1, $1, 'checked_out')",
        )
        .bind(check_in)
        .execute(&pool)
        .await
        .expect("Failed to seed visitor");
    }

    let now = Utc.with_ymd_and_hms(2099, 3, 1, 9, 30, 0).unwrap();
    let stats = StatisticsRepository::new(database.clone())
        .dashboard(&DashboardWindows::at(now))
        .await;

    sqlx::query("DELETE FROM visitors WHERE check_in_time >= $1")
        .bind(seed_from)
        .execute(&pool)
        .await
        .expect("Failed to clear seeded rows");

    let stats = stats.expect("Dashboard query failed");
    assert_eq!(stats.today_visitors, 1);
    assert_eq!(stats.week_visitors, 3);
    assert_eq!(stats.month_visitors, 1);
}
