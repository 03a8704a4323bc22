//! Integration tests for the application factory.

mod common;

use common::{test_config, TestHarness};
use legalai_core::config::Config;
use legalai_server::create_app;

#[test]
fn factory_returns_app_with_supplied_config() {
    let mut config = test_config();
    config.server.port = 5123;
    config.auth.session_timeout_hours = 3;

    let app = create_app(config.clone()).unwrap();
    assert_eq!(app.config(), &config);
    assert_eq!(app.context().config.auth.session_timeout_hours, 3);
}

#[test]
fn factory_registers_database() {
    let app = create_app(test_config()).unwrap();
    let conn = legalai_db::pool::get_conn(app.db()).unwrap();
    let tables: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name IN ('users','auth_tokens','court_cases','bail_forms')",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(tables, 4);
}

#[test]
fn factory_persists_to_configured_path() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.server.db_path = dir.path().join("legalai.db");

    {
        let app = create_app(config.clone()).unwrap();
        legalai_db::queries::cases::create_case(
            &legalai_db::pool::get_conn(app.db()).unwrap(),
            &common::sample_case("persisted"),
        )
        .unwrap();
    }

    let reopened = create_app(config).unwrap();
    let conn = legalai_db::pool::get_conn(reopened.db()).unwrap();
    let all = legalai_db::queries::cases::list_cases(&conn, &Default::default()).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].details.case_title, "persisted");
}

#[test]
fn factory_reports_database_failure() {
    let dir = tempfile::tempdir().unwrap();
    let not_a_dir = dir.path().join("occupied");
    std::fs::write(&not_a_dir, "file").unwrap();

    let mut config = Config::default();
    config.server.db_path = not_a_dir.join("legalai.db");
    assert!(create_app(config).is_err());
}

#[test]
fn apps_do_not_share_state() {
    let a = create_app(test_config()).unwrap();
    let b = create_app(test_config()).unwrap();

    legalai_db::queries::cases::create_case(
        &legalai_db::pool::get_conn(a.db()).unwrap(),
        &common::sample_case("only in a"),
    )
    .unwrap();

    let conn_b = legalai_db::pool::get_conn(b.db()).unwrap();
    let in_b = legalai_db::queries::cases::list_cases(&conn_b, &Default::default()).unwrap();
    assert!(in_b.is_empty());
}

#[tokio::test]
async fn served_app_answers_health() {
    let h = TestHarness::start().await;
    let resp = h.client.get(h.url("/health")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    assert!(resp.headers().contains_key("x-request-id"));
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn request_id_is_echoed() {
    let h = TestHarness::start().await;
    let resp = h
        .client
        .get(h.url("/health"))
        .header("x-request-id", "trace-me")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.headers()["x-request-id"], "trace-me");
}
