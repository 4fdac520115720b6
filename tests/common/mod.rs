#![allow(dead_code)]

use pixlimit::application::service::PixLimitService;
use pixlimit::domain::ports::LimitStoreBox;
use pixlimit::infrastructure::in_memory::InMemoryLimitStore;
use pixlimit::interfaces::http;
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Starts the HTTP app on an ephemeral port and returns its base URL.
pub async fn spawn_app() -> String {
    spawn_app_with(Box::new(InMemoryLimitStore::new())).await
}

pub async fn spawn_app_with(store: LimitStoreBox) -> String {
    let service = Arc::new(PixLimitService::new(store));
    let app = http::router(service, &[]);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

/// Client that talks to the local test server directly, ignoring proxy settings.
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

pub fn clients_url(base: &str) -> String {
    format!("{}/api/v1/pix-clients", base)
}

pub fn client_body(document: &str, account_id: &str, limit: f64) -> Value {
    json!({
        "document": document,
        "accountId": account_id,
        "pixLimit": limit,
        "branchNumber": "0001",
        "accountNumber": "98765-4"
    })
}
