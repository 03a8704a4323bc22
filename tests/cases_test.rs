//! Integration tests for court case routes.

mod common;

use common::{sample_case, test_config, TestHarness};
use legalai_core::Role;
use serde_json::json;

#[tokio::test]
async fn list_requires_token() {
    let h = TestHarness::start().await;
    let resp = h
        .client
        .get(h.url("/api/v1/getCases/getAllCase"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn list_returns_cases_newest_first() {
    let h = TestHarness::start().await;
    h.create_case("older");
    h.create_case("newer");
    let token = h.token_for("reader@example.com", Role::User).await;

    let resp = h
        .client
        .get(h.url("/api/v1/getCases/getAllCase"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let json: Vec<serde_json::Value> = resp.json().await.unwrap();
    assert_eq!(json.len(), 2);
    assert_eq!(json[0]["caseTitle"], "newer");
    assert_eq!(json[1]["caseTitle"], "older");
    assert_eq!(json[0]["cognizable"], "yes");
}

#[tokio::test]
async fn list_filters_by_status() {
    let h = TestHarness::start().await;
    let mut closed = sample_case("closed one");
    closed.status = Some(legalai_core::CaseStatus::Closed);
    legalai_db::queries::cases::create_case(&h.conn(), &closed).unwrap();
    h.create_case("no status");
    let token = h.token_for("filter@example.com", Role::Lawyer).await;

    let resp = h
        .client
        .get(h.url("/api/v1/getCases/getAllCase?status=Closed"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let json: Vec<serde_json::Value> = resp.json().await.unwrap();
    assert_eq!(json.len(), 1);
    assert_eq!(json[0]["status"], "Closed");

    let resp = h
        .client
        .get(h.url("/api/v1/getCases/getAllCase?status=Pending"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn detail_found() {
    let h = TestHarness::start().await;
    let case = h.create_case("State v. Kumar");
    let token = h.token_for("detail@example.com", Role::User).await;

    let resp = h
        .client
        .get(h.url(&format!("/api/v1/getCases/getDetail?id={}", case.id)))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["id"], case.id.to_string());
    assert_eq!(json["caseTitle"], "State v. Kumar");
    assert_eq!(json["judgeName"], "J. Iyer");
}

#[tokio::test]
async fn detail_unknown_id_is_404() {
    let h = TestHarness::start().await;
    let token = h.token_for("ghost@example.com", Role::User).await;

    let resp = h
        .client
        .get(h.url(&format!(
            "/api/v1/getCases/getDetail?id={}",
            legalai_core::CaseId::new()
        )))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert!(json["message"].as_str().unwrap().starts_with("Case not found"));
}

#[tokio::test]
async fn detail_missing_or_malformed_id_is_400() {
    let h = TestHarness::start().await;
    let token = h.token_for("bad-id@example.com", Role::User).await;

    for path in ["/api/v1/getCases/getDetail", "/api/v1/getCases/getDetail?id=12345"] {
        let resp = h
            .client
            .get(h.url(path))
            .bearer_auth(&token)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 400, "{path}");
    }
}

#[tokio::test]
async fn judge_creates_case() {
    let h = TestHarness::start().await;
    let token = h.token_for("judge@example.com", Role::Judge).await;

    let resp = h
        .client
        .post(h.url("/api/v1/getCases"))
        .bearer_auth(&token)
        .json(&json!({
            "caseTitle": "State v. Rao",
            "caseNumber": "CR-9",
            "filingNumber": "F-9",
            "filingDate": "2024-05-01",
            "filingYear": "2024",
            "listingDate": "2024-05-20",
            "plaintiffName": "State",
            "defendantName": "P. Rao",
            "plaintiffLawyerName": "A. Mehta",
            "defendantLawyerName": "K. Das",
            "judgeName": "J. Iyer",
            "daysInCustody": 12,
            "status": "In Progress",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["daysInCustody"], 12);
    assert_eq!(json["status"], "In Progress");

    let stored = legalai_db::queries::cases::list_cases(&h.conn(), &Default::default()).unwrap();
    assert_eq!(stored.len(), 1);
}

#[tokio::test]
async fn case_creation_validates_required_fields() {
    let h = TestHarness::start().await;
    let token = h.token_for("judge2@example.com", Role::Judge).await;

    let resp = h
        .client
        .post(h.url("/api/v1/getCases"))
        .bearer_auth(&token)
        .json(&json!({ "caseTitle": "Incomplete" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert!(json["message"].as_str().unwrap().contains("judgeName"));
}

#[tokio::test]
async fn non_judge_cannot_create_case() {
    let h = TestHarness::start().await;
    let token = h.token_for("lawyer@example.com", Role::Lawyer).await;

    let resp = h
        .client
        .post(h.url("/api/v1/getCases"))
        .bearer_auth(&token)
        .json(&serde_json::to_value(sample_case("sneaky")).unwrap())
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["message"], "Access denied");
}

#[tokio::test]
async fn auth_disabled_allows_case_creation() {
    let mut config = test_config();
    config.auth.enabled = false;
    let h = TestHarness::with_config(config).await;

    let resp = h
        .client
        .post(h.url("/api/v1/getCases"))
        .json(&serde_json::to_value(sample_case("open access")).unwrap())
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
}
