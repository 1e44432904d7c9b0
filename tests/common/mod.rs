#![allow(dead_code)]

use axum_test::TestServer;
use linkgate::config::Config;
use linkgate::infrastructure::persistence::{SqlValue, SqliteStore, Store};
use linkgate::routes::app_router;
use linkgate::state::AppState;
use std::sync::Arc;
use std::time::Duration;

pub const TEST_PASSWORD: &str = "test-password";

pub fn test_config() -> Config {
    Config {
        database_url: None,
        sqlite_path: ":memory:".to_string(),
        host: "127.0.0.1".to_string(),
        port: 3000,
        admin_password: TEST_PASSWORD.to_string(),
        auth_cookie_max_age: 86_400,
        log_level: "info".to_string(),
        log_format: "text".to_string(),
        db_max_connections: 1,
    }
}

pub async fn create_test_store() -> Arc<dyn Store> {
    let store = SqliteStore::in_memory().await.unwrap();
    store.ensure_schema().await.unwrap();
    Arc::new(store)
}

pub fn create_test_state(store: Arc<dyn Store>) -> AppState {
    AppState::new(store, &test_config())
}

/// Full application router over a fresh in-memory database.
pub async fn create_test_server() -> (TestServer, AppState) {
    let state = create_test_state(create_test_store().await);
    let server = TestServer::new(app_router(state.clone())).unwrap();
    (server, state)
}

/// `Cookie` header value of a logged-in admin.
pub fn auth_cookie(state: &AppState) -> String {
    format!("auth={}", state.auth_service.session_token())
}

/// Removes the `links` table so every later statement fails.
pub async fn drop_links_table(store: &dyn Store) {
    store.query("DROP TABLE links", &[]).await.unwrap();
}

pub async fn insert_link(store: &dyn Store, alias: &str, url: &str) -> i64 {
    let result = store
        .query(
            "INSERT INTO links (alias, url) VALUES ($1, $2) RETURNING id",
            &[alias.into(), url.into()],
        )
        .await
        .unwrap();

    result.first().unwrap().get_i64("id").unwrap()
}

pub async fn count_links(store: &dyn Store) -> i64 {
    let result = store
        .query("SELECT COUNT(*) AS n FROM links", &[])
        .await
        .unwrap();

    result.first().unwrap().get_i64("n").unwrap()
}

pub async fn clicks_for(store: &dyn Store, alias: &str) -> i64 {
    let result = store
        .query(
            "SELECT clicks FROM links WHERE alias = $1",
            &[SqlValue::from(alias)],
        )
        .await
        .unwrap();

    result.first().unwrap().get_i64("clicks").unwrap()
}

pub async fn url_for(store: &dyn Store, alias: &str) -> Option<String> {
    let result = store
        .query("SELECT url FROM links WHERE alias = $1", &[alias.into()])
        .await
        .unwrap();

    result.first().map(|row| row.get_string("url").unwrap())
}

/// Polls until the detached click increments have landed.
pub async fn wait_for_clicks(store: &dyn Store, alias: &str, expected: i64) -> i64 {
    let mut clicks = clicks_for(store, alias).await;
    for _ in 0..100 {
        if clicks >= expected {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
        clicks = clicks_for(store, alias).await;
    }
    clicks
}
