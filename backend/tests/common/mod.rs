#![allow(dead_code)]

use gehakt::lobby::LobbyRegistry;
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::net::TcpListener;

pub struct TestServer {
    base_url: String,
    pub registry: Arc<LobbyRegistry>,
    client: reqwest::Client,
}

impl TestServer {
    pub fn http_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn post(&self, path: &str, body: Value) -> reqwest::Response {
        self.client
            .post(self.http_url(path))
            .json(&body)
            .send()
            .await
            .unwrap()
    }

    pub async fn post_json(&self, path: &str, body: Value) -> Value {
        let response = self.post(path, body).await;
        assert!(response.status().is_success());
        response.json().await.unwrap()
    }

    pub async fn create_lobby(&self, name: &str) -> Value {
        self.post_json("/create_lobby", json!({ "name": name })).await
    }

    pub async fn join_lobby(&self, pin: &str, name: &str) -> Value {
        self.post_json("/join_lobby", json!({ "pin": pin, "name": name }))
            .await
    }

    pub async fn leave_lobby(&self, pin: &str, player_id: &Value) -> Value {
        self.post_json("/leave_lobby", json!({ "pin": pin, "player_id": player_id }))
            .await
    }

    pub async fn start_game(&self, pin: &str) -> Value {
        self.post_json("/start_game", json!({ "pin": pin })).await
    }

    pub async fn get_lobby(&self, pin: &str) -> Value {
        let response = self
            .client
            .get(self.http_url("/get_lobby"))
            .query(&[("pin", pin)])
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());
        response.json().await.unwrap()
    }
}

pub async fn spawn_test_server() -> TestServer {
    let registry = Arc::new(LobbyRegistry::new());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let app = gehakt::app_with_registry(registry.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestServer {
        base_url: format!("http://{}", addr),
        registry,
        client: reqwest::Client::new(),
    }
}

/// Names and host flags of a `players` array, in roster order
pub fn roster(body: &Value) -> Vec<(String, bool)> {
    body["players"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| {
            (
                p["name"].as_str().unwrap().to_string(),
                p["is_host"].as_bool().unwrap(),
            )
        })
        .collect()
}
