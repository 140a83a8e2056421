//! Integration tests for chats and messages.

mod helpers;

use http::StatusCode;
use serde_json::json;

use kuconnect_core::types::ChatId;

#[tokio::test]
async fn test_messages_flow_between_connected_users() {
    let app = helpers::TestApp::new();
    let a = app.sign_up("Alice", &["Music"]).await;
    let b = app.sign_up("Bank", &["Music"]).await;
    let chat_id = app.connect(&a, &b).await;

    let sent = app
        .request(
            "POST",
            "/api/chats/message",
            Some(json!({ "chatId": chat_id, "content": "  hello there  " })),
            Some(&a.token),
        )
        .await;
    assert_eq!(sent.status, StatusCode::CREATED);
    assert_eq!(sent.body["content"], "hello there");
    assert_eq!(sent.body["authorId"], a.id.to_string().as_str());

    let listed = app.request("GET", "/api/chats", None, Some(&b.token)).await;
    assert_eq!(listed.status, StatusCode::OK);
    let summary = &listed.body[0];
    assert_eq!(summary["chatId"], chat_id.as_str());
    assert_eq!(summary["peer"]["name"], "Alice");
    assert_eq!(summary["unreadCount"], 1);
    assert_eq!(summary["lastMessage"]["content"], "hello there");

    let detail = app
        .request("GET", &format!("/api/chats/{chat_id}"), None, Some(&b.token))
        .await;
    assert_eq!(detail.status, StatusCode::OK);
    assert_eq!(detail.body["target"]["name"], "Alice");
    assert_eq!(detail.body["messages"].as_array().map(Vec::len), Some(1));

    let listed = app.request("GET", "/api/chats", None, Some(&b.token)).await;
    assert_eq!(listed.body[0]["unreadCount"], 0);
}

#[tokio::test]
async fn test_chat_requires_connection() {
    let app = helpers::TestApp::new();
    let a = app.sign_up("Alice", &["Music"]).await;
    let b = app.sign_up("Bank", &["Music"]).await;
    app.judge(&a, &b, true).await;

    let response = app
        .request(
            "POST",
            "/api/chats",
            Some(json!({ "userId": b.id })),
            Some(&a.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), "FORBIDDEN");
}

#[tokio::test]
async fn test_outsiders_cannot_read_or_write() {
    let app = helpers::TestApp::new();
    let a = app.sign_up("Alice", &["Music"]).await;
    let b = app.sign_up("Bank", &["Music"]).await;
    let outsider = app.sign_up("Outsider", &["Music"]).await;
    let chat_id = app.connect(&a, &b).await;

    let read = app
        .request(
            "GET",
            &format!("/api/chats/{chat_id}"),
            None,
            Some(&outsider.token),
        )
        .await;
    assert_eq!(read.status, StatusCode::FORBIDDEN);

    let write = app
        .request(
            "POST",
            "/api/chats/message",
            Some(json!({ "chatId": chat_id, "content": "let me in" })),
            Some(&outsider.token),
        )
        .await;
    assert_eq!(write.status, StatusCode::FORBIDDEN);

    let missing = app
        .request(
            "GET",
            &format!("/api/chats/{}", ChatId::new()),
            None,
            Some(&a.token),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let malformed = app
        .request("GET", "/api/chats/123", None, Some(&a.token))
        .await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_message_content_bounds() {
    let app = helpers::TestApp::new();
    let a = app.sign_up("Alice", &["Music"]).await;
    let b = app.sign_up("Bank", &["Music"]).await;
    let chat_id = app.connect(&a, &b).await;

    for content in [String::new(), "   ".to_string(), "x".repeat(256)] {
        let response = app
            .request(
                "POST",
                "/api/chats/message",
                Some(json!({ "chatId": chat_id, "content": content })),
                Some(&a.token),
            )
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "content {content:?}");
    }

    let longest = app
        .request(
            "POST",
            "/api/chats/message",
            Some(json!({ "chatId": chat_id, "content": "x".repeat(255) })),
            Some(&a.token),
        )
        .await;
    assert_eq!(longest.status, StatusCode::CREATED);
}
