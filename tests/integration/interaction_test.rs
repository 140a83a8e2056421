//! Integration tests for likes, mutual connections and pending likes.

mod helpers;

use http::StatusCode;
use serde_json::json;

use kuconnect_core::types::UserId;

#[tokio::test]
async fn test_mutual_like_forms_one_connection() {
    let app = helpers::TestApp::new();
    let a = app.sign_up("Alice", &["Music"]).await;
    let b = app.sign_up("Bank", &["Music"]).await;

    let first = app.judge(&a, &b, true).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["connected"], false);
    assert!(first.body.get("chatId").is_none());

    let second = app.judge(&b, &a, true).await;
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(second.body["connected"], true);
    let chat_id = second.body["chatId"].as_str().expect("chatId").to_string();

    let opened = app
        .request(
            "POST",
            "/api/chats",
            Some(json!({ "userId": b.id })),
            Some(&a.token),
        )
        .await;
    assert_eq!(opened.status, StatusCode::OK);
    assert_eq!(opened.body["id"], chat_id.as_str());

    let repeat = app.judge(&a, &b, false).await;
    assert_eq!(repeat.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_dislike_never_connects() {
    let app = helpers::TestApp::new();
    let a = app.sign_up("Alice", &["Music"]).await;
    let b = app.sign_up("Bank", &["Music"]).await;

    assert_eq!(app.judge(&a, &b, false).await.body["connected"], false);
    let back = app.judge(&b, &a, true).await;
    assert_eq!(back.status, StatusCode::OK);
    assert_eq!(back.body["connected"], false);

    let chats = app.request("GET", "/api/chats", None, Some(&a.token)).await;
    assert_eq!(chats.body.as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_self_like_is_rejected() {
    let app = helpers::TestApp::new();
    let a = app.sign_up("Alice", &["Music"]).await;

    let response = app.judge(&a, &a, true).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let pending = app
        .request("GET", "/api/interactions/pending", None, Some(&a.token))
        .await;
    assert_eq!(pending.body["count"], 0);
}

#[tokio::test]
async fn test_like_of_unknown_user_is_not_found() {
    let app = helpers::TestApp::new();
    let a = app.sign_up("Alice", &["Music"]).await;

    let response = app
        .request(
            "POST",
            "/api/interactions",
            Some(json!({ "toUserId": UserId::new(), "liked": true })),
            Some(&a.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_interaction_body_is_rejected() {
    let app = helpers::TestApp::new();
    let a = app.sign_up("Alice", &["Music"]).await;

    let response = app
        .request(
            "POST",
            "/api/interactions",
            Some(json!({ "toUserId": "nope" })),
            Some(&a.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_pending_likes_drop_judged_likers() {
    let app = helpers::TestApp::new();
    let me = app.sign_up("Me", &["Music"]).await;
    let fan = app.sign_up("Fan", &["Music"]).await;
    let other = app.sign_up("Other", &["Coding"]).await;

    app.judge(&fan, &me, true).await;
    app.judge(&other, &me, true).await;

    let pending = app
        .request("GET", "/api/interactions/pending", None, Some(&me.token))
        .await;
    assert_eq!(pending.status, StatusCode::OK);
    assert_eq!(pending.body["count"], 2);
    assert_eq!(pending.body["profiles"].as_array().map(Vec::len), Some(2));

    app.judge(&me, &other, false).await;

    let pending = app
        .request("GET", "/api/interactions/pending", None, Some(&me.token))
        .await;
    assert_eq!(pending.body["count"], 1);
    assert_eq!(
        pending.body["profiles"][0]["userId"],
        fan.id.to_string().as_str()
    );
}
