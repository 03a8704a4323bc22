//! Integration tests for bail application routes.

mod common;

use common::TestHarness;
use legalai_core::Role;
use serde_json::json;

fn bail_form(petitioner: &str) -> serde_json::Value {
    json!({
        "petitioner": {
            "name": petitioner,
            "gender": "M",
            "age": 29,
            "advocateName": "S. Rao",
            "barRegnNo": "D/123/2010",
        },
        "respondent": { "organizationName": "State of Delhi" },
        "policeStation": { "state": "Delhi", "firNo": "211", "firYear": "2024" },
        "actSection": [{ "act": "IPC", "sections": "379, 411" }],
        "bail": { "caseType": "Regular Bail", "offenceType": "Theft" },
    })
}

async fn submit(h: &TestHarness, token: &str, petitioner: &str) -> serde_json::Value {
    let resp = h
        .client
        .post(h.url("/api/v1/bailForms"))
        .bearer_auth(token)
        .json(&bail_form(petitioner))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    resp.json().await.unwrap()
}

#[tokio::test]
async fn submit_stores_all_sections() {
    let h = TestHarness::start().await;
    let token = h.token_for("lawyer@example.com", Role::Lawyer).await;

    let json = submit(&h, &token, "M. Singh").await;
    assert_eq!(json["petitioner"]["name"], "M. Singh");
    assert_eq!(json["petitioner"]["age"], 29);
    assert_eq!(json["petitioner"]["barRegnNo"], "D/123/2010");
    assert_eq!(json["respondent"]["organizationName"], "State of Delhi");
    assert_eq!(json["policeStation"]["firNo"], "211");
    assert_eq!(json["actSection"][0]["sections"], "379, 411");
    assert_eq!(json["bail"]["offenceType"], "Theft");
}

#[tokio::test]
async fn submit_requires_token_and_petitioner() {
    let h = TestHarness::start().await;
    let resp = h
        .client
        .post(h.url("/api/v1/bailForms"))
        .json(&bail_form("No Token"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    let token = h.token_for("empty@example.com", Role::User).await;
    let resp = h
        .client
        .post(h.url("/api/v1/bailForms"))
        .bearer_auth(&token)
        .json(&json!({ "bail": { "caseType": "Anticipatory" } }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn users_see_own_forms_and_judges_see_all() {
    let h = TestHarness::start().await;
    let alice = h.token_for("alice@example.com", Role::User).await;
    let bob = h.token_for("bob@example.com", Role::Lawyer).await;
    let judge = h.token_for("judge@example.com", Role::Judge).await;

    submit(&h, &alice, "Alice's client").await;
    submit(&h, &bob, "Bob's client").await;
    submit(&h, &bob, "Bob's second client").await;

    let list = |token: String| {
        let h = &h;
        async move {
            let resp = h
                .client
                .get(h.url("/api/v1/bailForms"))
                .bearer_auth(token)
                .send()
                .await
                .unwrap();
            assert_eq!(resp.status(), 200);
            resp.json::<Vec<serde_json::Value>>().await.unwrap()
        }
    };

    assert_eq!(list(alice).await.len(), 1);
    let bobs = list(bob).await;
    assert_eq!(bobs.len(), 2);
    assert_eq!(bobs[0]["petitioner"]["name"], "Bob's second client");
    assert_eq!(list(judge).await.len(), 3);
}

#[tokio::test]
async fn get_form_by_owner_or_judge_only() {
    let h = TestHarness::start().await;
    let owner = h.token_for("owner@example.com", Role::User).await;
    let other = h.token_for("other@example.com", Role::User).await;
    let judge = h.token_for("judge@example.com", Role::Judge).await;

    let form = submit(&h, &owner, "Owner's client").await;
    let path = format!("/api/v1/bailForms/{}", form["id"].as_str().unwrap());

    for (token, expected) in [(&owner, 200), (&judge, 200), (&other, 404)] {
        let resp = h
            .client
            .get(h.url(&path))
            .bearer_auth(token)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), expected);
    }

    let resp = h
        .client
        .get(h.url("/api/v1/bailForms/not-a-uuid"))
        .bearer_auth(&owner)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}
