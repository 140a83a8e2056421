//! Integration tests for notification delivery, the inbox and push subscriptions.

mod helpers;

use http::StatusCode;
use serde_json::{Value, json};

async fn kinds(app: &helpers::TestApp, user: &helpers::TestUser) -> Vec<String> {
    let response = app
        .request("GET", "/api/notifications", None, Some(&user.token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    response
        .body
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|n| n["kind"].as_str().map(String::from))
        .collect()
}

#[tokio::test]
async fn test_profile_creation_sends_welcome() {
    let app = helpers::TestApp::new();
    let user = app.sign_up("Alice", &["Music"]).await;
    app.flush_events().await;

    assert_eq!(kinds(&app, &user).await, vec!["WELCOME"]);
}

#[tokio::test]
async fn test_like_and_connection_notifications() {
    let app = helpers::TestApp::new();
    let a = app.sign_up("Alice", &["Music"]).await;
    let b = app.sign_up("Bank", &["Music"]).await;
    app.flush_events().await;

    app.judge(&a, &b, true).await;
    app.flush_events().await;
    assert_eq!(kinds(&app, &b).await, vec!["INTERACTION", "WELCOME"]);

    let back = app.judge(&b, &a, true).await;
    let chat_id = back.body["chatId"].as_str().expect("chatId").to_string();
    app.flush_events().await;

    let inbox = app
        .request("GET", "/api/notifications", None, Some(&a.token))
        .await;
    let newest = &inbox.body[0];
    assert_eq!(newest["kind"], "NEW_CONNECTION");
    assert_eq!(newest["data"]["peerName"], "Bank");
    assert_eq!(newest["data"]["chatId"], chat_id.as_str());
    assert_eq!(kinds(&app, &b).await[0], "NEW_CONNECTION");
}

#[tokio::test]
async fn test_disabled_toggle_suppresses_like_notification() {
    let app = helpers::TestApp::new();
    let a = app.sign_up("Alice", &["Music"]).await;
    let b = app.sign_up("Bank", &["Music"]).await;
    app.request(
        "PATCH",
        "/api/settings/me",
        Some(json!({ "notiNewConnectionRequest": false })),
        Some(&b.token),
    )
    .await;
    app.flush_events().await;

    app.judge(&a, &b, true).await;
    app.flush_events().await;

    assert_eq!(kinds(&app, &b).await, vec!["WELCOME"]);
}

#[tokio::test]
async fn test_message_notifies_recipient_only() {
    let app = helpers::TestApp::new();
    let a = app.sign_up("Alice", &["Music"]).await;
    let b = app.sign_up("Bank", &["Music"]).await;
    let chat_id = app.connect(&a, &b).await;
    app.flush_events().await;

    app.request(
        "POST",
        "/api/chats/message",
        Some(json!({ "chatId": chat_id, "content": "hi Bank" })),
        Some(&a.token),
    )
    .await;
    app.flush_events().await;

    assert_eq!(kinds(&app, &b).await[0], "NEW_MESSAGE");
    assert_ne!(kinds(&app, &a).await[0], "NEW_MESSAGE");
}

#[tokio::test]
async fn test_mark_read_only_touches_own_notifications() {
    let app = helpers::TestApp::new();
    let a = app.sign_up("Alice", &["Music"]).await;
    let b = app.sign_up("Bank", &["Music"]).await;
    app.flush_events().await;

    let inbox = app
        .request("GET", "/api/notifications", None, Some(&a.token))
        .await;
    let ids: Vec<Value> = inbox
        .body
        .as_array()
        .expect("array")
        .iter()
        .map(|n| n["id"].clone())
        .collect();
    assert_eq!(ids.len(), 1);

    let foreign = app
        .request(
            "PATCH",
            "/api/notifications/read",
            Some(json!({ "notificationIds": ids })),
            Some(&b.token),
        )
        .await;
    assert_eq!(foreign.status, StatusCode::OK);
    assert_eq!(foreign.body["updated"], 0);

    let own = app
        .request(
            "PATCH",
            "/api/notifications/read",
            Some(json!({ "notificationIds": ids })),
            Some(&a.token),
        )
        .await;
    assert_eq!(own.body["updated"], 1);

    let inbox = app
        .request("GET", "/api/notifications", None, Some(&a.token))
        .await;
    assert!(inbox.body[0]["readAt"].is_string());

    let empty = app
        .request(
            "PATCH",
            "/api/notifications/read",
            Some(json!({ "notificationIds": [] })),
            Some(&a.token),
        )
        .await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_notifications_are_paginated_newest_first() {
    let app = helpers::TestApp::new();
    let me = app.sign_up("Me", &["Music"]).await;
    let fan = app.sign_up("Fan", &["Music"]).await;
    app.judge(&fan, &me, true).await;
    app.flush_events().await;

    let first = app
        .request("GET", "/api/notifications?page=1&size=1", None, Some(&me.token))
        .await;
    assert_eq!(first.body.as_array().map(Vec::len), Some(1));
    assert_eq!(first.body[0]["kind"], "INTERACTION");

    let second = app
        .request("GET", "/api/notifications?page=2&size=1", None, Some(&me.token))
        .await;
    assert_eq!(second.body[0]["kind"], "WELCOME");
}

#[tokio::test]
async fn test_push_subscription_registration() {
    let app = helpers::TestApp::new();
    let user = app.sign_up("Alice", &["Music"]).await;

    let created = app
        .request(
            "POST",
            "/api/notifications/subscribe",
            Some(json!({
                "endpoint": "https://push.example.com/send/abc",
                "keys": { "p256dh": "BPublicKey", "auth": "secret" }
            })),
            Some(&user.token),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["endpoint"], "https://push.example.com/send/abc");

    let invalid = app
        .request(
            "POST",
            "/api/notifications/subscribe",
            Some(json!({
                "endpoint": "not a url",
                "keys": { "p256dh": "BPublicKey", "auth": "secret" }
            })),
            Some(&user.token),
        )
        .await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);

    let keyless = app
        .request(
            "POST",
            "/api/notifications/subscribe",
            Some(json!({
                "endpoint": "https://push.example.com/send/def",
                "keys": { "p256dh": "", "auth": "" }
            })),
            Some(&user.token),
        )
        .await;
    assert_eq!(keyless.status, StatusCode::BAD_REQUEST);
}
