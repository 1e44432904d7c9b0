mod common;

use axum_test::TestServer;
use linkgate::state::AppState;

async fn logged_in() -> (TestServer, AppState, String) {
    let (server, state) = common::create_test_server().await;
    let cookie = common::auth_cookie(&state);
    (server, state, cookie)
}

#[tokio::test]
async fn test_admin_requires_auth() {
    let (server, state) = common::create_test_server().await;
    common::insert_link(state.store.as_ref(), "secret", "https://hidden.example").await;

    let response = server.get("/admin").await;

    assert_eq!(response.status_code(), 303);
    assert_eq!(response.header("location"), "/login");
    assert!(!response.text().contains("hidden.example"));
}

#[tokio::test]
async fn test_admin_rejects_raw_password_cookie() {
    let (server, _state) = common::create_test_server().await;

    let response = server
        .get("/admin")
        .add_header("Cookie", format!("auth={}", common::TEST_PASSWORD))
        .await;

    assert_eq!(response.status_code(), 303);
    assert_eq!(response.header("location"), "/login");
}

#[tokio::test]
async fn test_admin_mutations_require_auth() {
    let (server, state) = common::create_test_server().await;
    let store = state.store.as_ref();
    let id = common::insert_link(store, "keepme", "https://example.com").await;

    let response = server
        .post("/admin/create")
        .form(&[("url", "https://new.example")])
        .await;
    assert_eq!(response.header("location"), "/login");

    let response = server.post(&format!("/admin/delete/{id}")).await;
    assert_eq!(response.header("location"), "/login");

    assert_eq!(common::count_links(store).await, 1);
}

#[tokio::test]
async fn test_admin_lists_links_most_recent_first() {
    let (server, state, cookie) = logged_in().await;
    let store = state.store.as_ref();

    common::insert_link(store, "older1", "https://older.example").await;
    common::insert_link(store, "newer1", "https://newer.example").await;

    let response = server
        .get("/admin")
        .add_header("Cookie", cookie)
        .add_header("Host", "sho.rt")
        .await;

    assert_eq!(response.status_code(), 200);

    let body = response.text();
    let newer = body.find("newer.example").unwrap();
    let older = body.find("older.example").unwrap();
    assert!(newer < older);
    assert!(body.contains("href=\"//sho.rt/newer1\""));
}

#[tokio::test]
async fn test_admin_escapes_stored_values() {
    let (server, state, cookie) = logged_in().await;

    common::insert_link(
        state.store.as_ref(),
        "xss001",
        "https://example.com/?q=<script>alert(1)</script>",
    )
    .await;

    let response = server.get("/admin").add_header("Cookie", cookie).await;

    assert!(!response.text().contains("<script>alert(1)</script>"));
}

#[tokio::test]
async fn test_admin_shows_notice_banner() {
    let (server, _state, cookie) = logged_in().await;

    let response = server
        .get("/admin")
        .add_query_param("notice", "duplicate_alias")
        .add_header("Cookie", cookie)
        .await;

    assert_eq!(response.status_code(), 200);
    assert!(response.text().contains("That alias is already taken."));
}

#[tokio::test]
async fn test_admin_ignores_unknown_notice() {
    let (server, _state, cookie) = logged_in().await;

    let response = server
        .get("/admin")
        .add_query_param("notice", "<b>bogus</b>")
        .add_header("Cookie", cookie)
        .await;

    assert_eq!(response.status_code(), 200);
    assert!(!response.text().contains("bogus"));
}

#[tokio::test]
async fn test_create_prefixes_scheme() {
    let (server, state, cookie) = logged_in().await;

    let response = server
        .post("/admin/create")
        .add_header("Cookie", cookie)
        .form(&[("url", "example.com"), ("alias", "ex1")])
        .await;

    assert_eq!(response.status_code(), 303);
    assert_eq!(response.header("location"), "/admin?notice=created");
    assert_eq!(
        common::url_for(state.store.as_ref(), "ex1").await.as_deref(),
        Some("https://example.com")
    );
}

#[tokio::test]
async fn test_create_keeps_existing_scheme() {
    let (server, state, cookie) = logged_in().await;

    server
        .post("/admin/create")
        .add_header("Cookie", cookie)
        .form(&[("url", "http://plain.example/x"), ("alias", "plain")])
        .await;

    assert_eq!(
        common::url_for(state.store.as_ref(), "plain").await.as_deref(),
        Some("http://plain.example/x")
    );
}

#[tokio::test]
async fn test_create_generates_alias() {
    let (server, state, cookie) = logged_in().await;
    let store = state.store.as_ref();

    let response = server
        .post("/admin/create")
        .add_header("Cookie", cookie)
        .form(&[("url", "https://example.com"), ("alias", "")])
        .await;

    assert_eq!(response.header("location"), "/admin?notice=created");

    let result = store.query("SELECT alias FROM links", &[]).await.unwrap();
    let alias = result.first().unwrap().get_string("alias").unwrap();
    assert_eq!(alias.len(), 6);
    assert!(
        alias
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );
}

#[tokio::test]
async fn test_create_empty_url_inserts_nothing() {
    let (server, state, cookie) = logged_in().await;

    let response = server
        .post("/admin/create")
        .add_header("Cookie", cookie)
        .form(&[("url", "   "), ("alias", "empty1")])
        .await;

    assert_eq!(response.status_code(), 303);
    assert_eq!(response.header("location"), "/admin?notice=missing_url");
    assert_eq!(common::count_links(state.store.as_ref()).await, 0);
}

#[tokio::test]
async fn test_create_duplicate_alias_keeps_original() {
    let (server, state, cookie) = logged_in().await;
    let store = state.store.as_ref();

    common::insert_link(store, "taken1", "https://first.example").await;

    let response = server
        .post("/admin/create")
        .add_header("Cookie", cookie)
        .form(&[("url", "https://second.example"), ("alias", "taken1")])
        .await;

    assert_eq!(response.header("location"), "/admin?notice=duplicate_alias");
    assert_eq!(common::count_links(store).await, 1);
    assert_eq!(
        common::url_for(store, "taken1").await.as_deref(),
        Some("https://first.example")
    );
}

#[tokio::test]
async fn test_create_reserved_alias_rejected() {
    let (server, state, cookie) = logged_in().await;

    let response = server
        .post("/admin/create")
        .add_header("Cookie", cookie)
        .form(&[("url", "https://example.com"), ("alias", "admin")])
        .await;

    assert_eq!(response.header("location"), "/admin?notice=invalid");
    assert_eq!(common::count_links(state.store.as_ref()).await, 0);
}

#[tokio::test]
async fn test_create_rejects_control_characters() {
    let (server, state, cookie) = logged_in().await;

    let response = server
        .post("/admin/create")
        .add_header("Cookie", cookie)
        .form(&[("url", "example.com/a\nb"), ("alias", "ctrl01")])
        .await;

    assert_eq!(response.header("location"), "/admin?notice=invalid");
    assert_eq!(common::count_links(state.store.as_ref()).await, 0);
    assert_eq!(server.get("/ctrl01").await.status_code(), 404);
}

#[tokio::test]
async fn test_create_rejects_non_http_scheme() {
    let (server, state, cookie) = logged_in().await;

    for (url, alias) in [
        ("javascript://%0aalert(1)", "js0001"),
        ("ftp://files.example", "ftp001"),
    ] {
        let response = server
            .post("/admin/create")
            .add_header("Cookie", cookie.clone())
            .form(&[("url", url), ("alias", alias)])
            .await;

        assert_eq!(response.header("location"), "/admin?notice=invalid");
    }

    assert_eq!(common::count_links(state.store.as_ref()).await, 0);
}

#[tokio::test]
async fn test_created_link_redirects() {
    let (server, _state, cookie) = logged_in().await;

    server
        .post("/admin/create")
        .add_header("Cookie", cookie)
        .form(&[("url", "rust-lang.org"), ("alias", "rust")])
        .await;

    let response = server.get("/rust").await;

    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), "https://rust-lang.org");
}

#[tokio::test]
async fn test_delete_removes_exactly_one_row() {
    let (server, state, cookie) = logged_in().await;
    let store = state.store.as_ref();

    let id = common::insert_link(store, "gone01", "https://gone.example").await;
    common::insert_link(store, "stay01", "https://stay.example").await;

    let response = server
        .post(&format!("/admin/delete/{id}"))
        .add_header("Cookie", cookie)
        .await;

    assert_eq!(response.status_code(), 303);
    assert_eq!(response.header("location"), "/admin?notice=deleted");
    assert_eq!(common::count_links(store).await, 1);
    assert!(common::url_for(store, "gone01").await.is_none());
    assert!(common::url_for(store, "stay01").await.is_some());
}

#[tokio::test]
async fn test_delete_unknown_id_is_noop() {
    let (server, state, cookie) = logged_in().await;
    let store = state.store.as_ref();

    common::insert_link(store, "stay02", "https://stay.example").await;

    let response = server
        .post("/admin/delete/9999")
        .add_header("Cookie", cookie.clone())
        .await;
    assert_eq!(response.header("location"), "/admin?notice=not_found");

    let response = server
        .post("/admin/delete/abc")
        .add_header("Cookie", cookie)
        .await;
    assert_eq!(response.status_code(), 303);
    assert_eq!(response.header("location"), "/admin?notice=not_found");

    assert_eq!(common::count_links(store).await, 1);
}

#[tokio::test]
async fn test_admin_reports_storage_failure() {
    let (server, state, cookie) = logged_in().await;
    common::drop_links_table(state.store.as_ref()).await;

    let response = server.get("/admin").add_header("Cookie", cookie).await;

    assert_eq!(response.status_code(), 500);
    assert!(response.text().contains("Database error"));
}

#[tokio::test]
async fn test_mutations_report_storage_failure() {
    let (server, state, cookie) = logged_in().await;
    common::drop_links_table(state.store.as_ref()).await;

    let response = server
        .post("/admin/create")
        .add_header("Cookie", cookie.clone())
        .form(&[("url", "https://example.com"), ("alias", "fail01")])
        .await;
    assert_eq!(response.status_code(), 303);
    assert_eq!(response.header("location"), "/admin?notice=failed");

    let response = server
        .post("/admin/create")
        .add_header("Cookie", cookie.clone())
        .form(&[("url", "https://example.com"), ("alias", "")])
        .await;
    assert_eq!(response.header("location"), "/admin?notice=failed");

    let response = server
        .post("/admin/delete/1")
        .add_header("Cookie", cookie)
        .await;
    assert_eq!(response.status_code(), 303);
    assert_eq!(response.header("location"), "/admin?notice=failed");
}
