use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use promo_relay::config::Config;
use promo_relay::notify::telegram::TelegramNotifier;

pub const BOT_TOKEN: &str = "123456:TEST-TOKEN";
pub const ADMIN_ID: &str = "999000";

/// A running relay instance wired to a fake Telegram API.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub telegram: MockServer,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// POST a JSON body to `/unlock-promo`, return (body, status).
    pub async fn submit(&self, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/unlock-promo"))
            .json(body)
            .send()
            .await
            .expect("submit request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn get_json(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Requests the fake Telegram API received for a Bot API method.
    pub async fn telegram_calls(&self, api_method: &str) -> Vec<wiremock::Request> {
        let suffix = format!("/{api_method}");
        self.telegram
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|r| r.url.path().ends_with(&suffix))
            .collect()
    }
}

pub fn bot_path(api_method: &str) -> String {
    format!("/bot{BOT_TOKEN}/{api_method}")
}

pub fn ok_reply() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "ok": true, "result": { "message_id": 1 } }))
}

pub fn rejected_reply(description: &str) -> ResponseTemplate {
    ResponseTemplate::new(400).set_body_json(json!({
        "ok": false,
        "error_code": 400,
        "description": description,
    }))
}

/// Mount a responder for a Bot API method with an expected call count.
pub async fn mock_method(server: &MockServer, api_method: &str, reply: ResponseTemplate, calls: u64) {
    Mock::given(method("POST"))
        .and(path(bot_path(api_method)))
        .respond_with(reply)
        .expect(calls)
        .mount(server)
        .await;
}

pub fn test_config(telegram_api_url: String) -> Config {
    Config {
        bot_token: Some(BOT_TOKEN.to_string()),
        admin_id: Some(ADMIN_ID.to_string()),
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        telegram_api_url,
        request_timeout: Duration::from_secs(5),
        max_body_size: 1_048_576,
        static_dir: PathBuf::from("static"),
        require_config: false,
        log_level: "warn".to_string(),
    }
}

/// Spawn a fully configured app against a fresh fake Telegram API.
pub async fn spawn_app() -> TestApp {
    spawn_app_with(|config| config).await
}

/// Spawn an app after letting the caller adjust the test config.
pub async fn spawn_app_with(adjust: impl FnOnce(Config) -> Config) -> TestApp {
    let telegram = MockServer::start().await;
    let config = adjust(test_config(telegram.uri()));

    let notifier = TelegramNotifier::new(config.telegram_api_url.clone(), config.request_timeout)
        .expect("Failed to build Telegram client");
    let app = promo_relay::build_app(config, Arc::new(notifier));

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    TestApp {
        addr,
        client: Client::new(),
        telegram,
    }
}
