use crate::fixtures::test_app::TestApp;
use serde_json::Value;

#[tokio::test]
async fn list_returns_newest_first() {
    let app = TestApp::spawn().await;
    let owner = app.seed_user();
    let actor = app.seed_user();

    for i in 1..=3 {
        app.seed_notification(&owner, &actor, &format!("Notification {}", i))
            .await;
    }

    let resp = app
        .auth_get("/api/notification", &owner.access_token)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 200);
    let json: Value = resp.json().await.unwrap();
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["message"], "Notification 3");
    assert_eq!(items[2]["message"], "Notification 1");
    assert_eq!(items[0]["user_id"], owner.id.to_hex());
    assert_eq!(items[0]["actor_id"], actor.id.to_hex());
    assert_eq!(items[0]["reference_type"], "task");
    assert_eq!(items[0]["is_read"], false);
}

#[tokio::test]
async fn list_honours_limit_and_offset() {
    let app = TestApp::spawn().await;
    let owner = app.seed_user();
    let actor = app.seed_user();

    for i in 1..=5 {
        app.seed_notification(&owner, &actor, &format!("Notification {}", i))
            .await;
    }

    let resp = app
        .auth_get("/api/notification?limit=2&offset=1", &owner.access_token)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 200);
    let json: Value = resp.json().await.unwrap();
    let messages: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["message"].as_str().unwrap())
        .collect();
    assert_eq!(messages, vec!["Notification 4", "Notification 3"]);

    // Past the end is an empty page, not an error
    let resp = app
        .auth_get("/api/notification?offset=10", &owner.access_token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let json: Value = resp.json().await.unwrap();
    assert!(json.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn list_only_shows_own_notifications() {
    let app = TestApp::spawn().await;
    let alice = app.seed_user();
    let bob = app.seed_user();

    app.seed_notification(&bob, &alice, "For bob").await;

    let resp = app
        .auth_get("/api/notification", &alice.access_token)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 200);
    let json: Value = resp.json().await.unwrap();
    assert!(json.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn list_without_token_is_unauthorized() {
    let app = TestApp::spawn().await;

    let resp = app
        .client
        .get(app.url("/api/notification"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 401);
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["error"], "unauthorized");
}

#[tokio::test]
async fn list_with_garbage_token_is_unauthorized() {
    let app = TestApp::spawn().await;

    let resp = app
        .auth_get("/api/notification", "not-a-jwt")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 401);
}

#[tokio::test]
async fn mark_as_read_only_touches_own_notifications() {
    let app = TestApp::spawn().await;
    let alice = app.seed_user();
    let bob = app.seed_user();

    let mine = app.seed_notification(&alice, &bob, "For alice").await;
    let theirs = app.seed_notification(&bob, &alice, "For bob").await;

    let resp = app
        .auth_patch("/api/notification/read", &alice.access_token)
        .json(&serde_json::json!({
            "ids": [mine.id.to_hex(), theirs.id.to_hex(), "not-an-id"],
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 200);
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["success"], true);

    let json: Value = app
        .auth_get("/api/notification", &alice.access_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(json[0]["is_read"], true);

    let json: Value = app
        .auth_get("/api/notification", &bob.access_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(json[0]["is_read"], false);
}

#[tokio::test]
async fn mark_as_read_with_no_valid_ids_succeeds() {
    let app = TestApp::spawn().await;
    let alice = app.seed_user();
    let bob = app.seed_user();
    app.seed_notification(&alice, &bob, "For alice").await;

    for body in [
        serde_json::json!({}),
        serde_json::json!({ "ids": [] }),
        serde_json::json!({ "ids": ["xyz"] }),
    ] {
        let resp = app
            .auth_patch("/api/notification/read", &alice.access_token)
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status().as_u16(), 200, "body {}", body);
    }

    let json: Value = app
        .auth_get("/api/notification", &alice.access_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(json[0]["is_read"], false);
}

#[tokio::test]
async fn mark_all_as_read_is_scoped_to_caller() {
    let app = TestApp::spawn().await;
    let alice = app.seed_user();
    let bob = app.seed_user();

    for i in 1..=3 {
        app.seed_notification(&alice, &bob, &format!("For alice {}", i))
            .await;
    }
    app.seed_notification(&bob, &alice, "For bob").await;

    let resp = app
        .auth_patch("/api/notification/read-all", &alice.access_token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["success"], true);

    let json: Value = app
        .auth_get("/api/notification", &alice.access_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(
        json.as_array()
            .unwrap()
            .iter()
            .all(|n| n["is_read"] == true)
    );

    let json: Value = app
        .auth_get("/api/notification", &bob.access_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(json[0]["is_read"], false);

    // Nothing left unread: still a success
    let resp = app
        .auth_patch("/api/notification/read-all", &alice.access_token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
}

#[tokio::test]
async fn health_reports_ok() {
    let app = TestApp::spawn().await;

    let resp = app.client.get(app.url("/health")).send().await.unwrap();

    assert_eq!(resp.status().as_u16(), 200);
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn mark_as_read_rejects_malformed_bodies() {
    let app = TestApp::spawn().await;
    let alice = app.seed_user();

    let wrong_shape = app
        .auth_patch("/api/notification/read", &alice.access_token)
        .json(&serde_json::json!({ "ids": 5 }))
        .send()
        .await
        .unwrap();
    let not_json = app
        .auth_patch("/api/notification/read", &alice.access_token)
        .header("content-type", "application/json")
        .body("{ids: [")
        .send()
        .await
        .unwrap();
    let no_content_type = app
        .auth_patch("/api/notification/read", &alice.access_token)
        .body(r#"{"ids": []}"#)
        .send()
        .await
        .unwrap();

    for resp in [wrong_shape, not_json, no_content_type] {
        assert_eq!(resp.status().as_u16(), 400);
        let json: Value = resp.json().await.unwrap();
        assert_eq!(json["error"], "bad_request");
        assert!(json["message"].as_str().is_some_and(|m| !m.is_empty()));
    }
}

#[tokio::test]
async fn cors_allows_any_origin_by_default() {
    let app = TestApp::spawn().await;

    let resp = app
        .client
        .get(app.url("/health"))
        .header("origin", "http://anywhere.example")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.headers()["access-control-allow-origin"], "*");
}

#[tokio::test]
async fn cors_honours_configured_origins() {
    let app = TestApp::spawn_with_settings(|s| {
        s.app.cors_origins = vec!["http://app.example".to_string()];
    })
    .await;

    let allowed = app
        .client
        .get(app.url("/health"))
        .header("origin", "http://app.example")
        .send()
        .await
        .unwrap();
    assert_eq!(
        allowed.headers()["access-control-allow-origin"],
        "http://app.example"
    );

    let refused = app
        .client
        .get(app.url("/health"))
        .header("origin", "http://evil.example")
        .send()
        .await
        .unwrap();
    assert!(refused.headers().get("access-control-allow-origin").is_none());
}
