//! Integration tests for profiles, interests and settings.

mod helpers;

use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_health_needs_no_token() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/healthz", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert!(response.body["version"].is_string());
}

#[tokio::test]
async fn test_missing_or_bad_token_is_unauthorized() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/interests", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "UNAUTHORIZED");

    let response = app
        .request("GET", "/api/interests", None, Some("not-a-jwt"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_catalog_lists_seeded_interests() {
    let app = helpers::TestApp::new();
    let user = app.anonymous();

    let response = app
        .request("GET", "/api/interests", None, Some(&user.token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let names: Vec<&str> = response
        .body
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|i| i["name"].as_str())
        .collect();
    assert!(names.contains(&"Music"));
    assert!(names.contains(&"Coding"));
}

#[tokio::test]
async fn test_create_profile_once() {
    let app = helpers::TestApp::new();
    let user = app.sign_up("Ploy", &["Music", "Coding"]).await;

    let again = app
        .request(
            "POST",
            "/api/profiles",
            Some(json!({ "displayName": "Ploy again", "interests": [] })),
            Some(&user.token),
        )
        .await;
    assert_eq!(again.status, StatusCode::CONFLICT);
    assert_eq!(again.error_code(), "CONFLICT");

    let own = app
        .request("GET", "/api/me/profile", None, Some(&user.token))
        .await;
    assert_eq!(own.status, StatusCode::OK);
    assert_eq!(own.body["displayName"], "Ploy");
    assert_eq!(own.body["interests"].as_array().map(Vec::len), Some(2));
    assert_eq!(own.body["settings"]["profileVisibility"], "public");
}

#[tokio::test]
async fn test_create_profile_rejects_invalid_fields() {
    let app = helpers::TestApp::new();
    let user = app.anonymous();

    let response = app
        .request(
            "POST",
            "/api/profiles",
            Some(json!({ "displayName": "Nine", "year": 9 })),
            Some(&user.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION_ERROR");

    let response = app
        .request(
            "POST",
            "/api/profiles",
            Some(json!({ "bio": "no name" })),
            Some(&user.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let own = app
        .request("GET", "/api/me/profile", None, Some(&user.token))
        .await;
    assert_eq!(own.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_profile_and_replace_interests() {
    let app = helpers::TestApp::new();
    let user = app.sign_up("Mint", &["Music"]).await;

    let updated = app
        .request(
            "PUT",
            "/api/profiles",
            Some(json!({ "displayName": "Mint K.", "bio": "Hello", "year": 4 })),
            Some(&user.token),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["displayName"], "Mint K.");
    assert_eq!(updated.body["year"], 4);

    let coding = app.store.interest_named("Coding").await.expect("Coding");
    let replaced = app
        .request(
            "PUT",
            "/api/profiles/me/interests",
            Some(json!({ "interests": [coding.id] })),
            Some(&user.token),
        )
        .await;
    assert_eq!(replaced.status, StatusCode::OK);

    let listed = app
        .request("GET", "/api/profiles/me/interests", None, Some(&user.token))
        .await;
    let names: Vec<&str> = listed
        .body
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|i| i["name"].as_str())
        .collect();
    assert_eq!(names, vec!["Coding"]);
}

#[tokio::test]
async fn test_candidates_exclude_self_and_judged_users() {
    let app = helpers::TestApp::new();
    let viewer = app.sign_up("Viewer", &["Music", "Coding"]).await;
    let liked = app.sign_up("Liked", &["Music"]).await;
    let other = app.sign_up("Other", &["Coding"]).await;

    let before = app
        .request("GET", "/api/profiles", None, Some(&viewer.token))
        .await;
    assert_eq!(before.status, StatusCode::OK);
    let ids: Vec<String> = before.body["profiles"]
        .as_array()
        .expect("profiles")
        .iter()
        .filter_map(|p| p["userId"].as_str().map(String::from))
        .collect();
    assert_eq!(ids.len(), 2);
    assert!(!ids.contains(&viewer.id.to_string()));

    assert_eq!(app.judge(&viewer, &liked, true).await.status, StatusCode::OK);

    let after = app
        .request("GET", "/api/profiles", None, Some(&viewer.token))
        .await;
    let ids: Vec<&str> = after.body["profiles"]
        .as_array()
        .expect("profiles")
        .iter()
        .filter_map(|p| p["userId"].as_str())
        .collect();
    assert_eq!(ids, vec![other.id.to_string().as_str()]);
}

#[tokio::test]
async fn test_candidate_pagination() {
    let app = helpers::TestApp::new();
    let viewer = app.sign_up("Viewer", &["Music"]).await;
    for i in 0..3 {
        app.sign_up(&format!("Candidate {i}"), &["Music"]).await;
    }

    let page = app
        .request("GET", "/api/profiles?page=2&size=2", None, Some(&viewer.token))
        .await;
    assert_eq!(page.status, StatusCode::OK);
    assert_eq!(page.body["profiles"].as_array().map(Vec::len), Some(1));

    let beyond = app
        .request("GET", "/api/profiles?page=5&size=2", None, Some(&viewer.token))
        .await;
    assert_eq!(beyond.status, StatusCode::OK);
    assert_eq!(beyond.body["profiles"].as_array().map(Vec::len), Some(0));

    let invalid = app
        .request("GET", "/api/profiles?size=0", None, Some(&viewer.token))
        .await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);

    let too_big = app
        .request("GET", "/api/profiles?size=101", None, Some(&viewer.token))
        .await;
    assert_eq!(too_big.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_profile_visibility_and_contact_filtering() {
    let app = helpers::TestApp::new();
    let viewer = app.sign_up("Viewer", &["Music"]).await;
    let owner = app.sign_up("Owner", &["Music"]).await;
    let path = format!("/api/profiles/{}", owner.id);

    // Contacts default to connections only.
    let seen = app.request("GET", &path, None, Some(&viewer.token)).await;
    assert_eq!(seen.status, StatusCode::OK);
    assert_eq!(seen.body["displayName"], "Owner");
    assert!(seen.body.get("line").is_none());

    let patched = app
        .request(
            "PATCH",
            "/api/settings/me",
            Some(json!({ "contactInfoVisibility": "public" })),
            Some(&owner.token),
        )
        .await;
    assert_eq!(patched.status, StatusCode::OK);
    let seen = app.request("GET", &path, None, Some(&viewer.token)).await;
    assert_eq!(seen.body["line"], "owner.line");

    app.request(
        "PATCH",
        "/api/settings/me",
        Some(json!({ "profileVisibility": "private" })),
        Some(&owner.token),
    )
    .await;
    let hidden = app.request("GET", &path, None, Some(&viewer.token)).await;
    assert_eq!(hidden.status, StatusCode::NOT_FOUND);

    let own = app.request("GET", &path, None, Some(&owner.token)).await;
    assert_eq!(own.status, StatusCode::OK);

    let malformed = app
        .request("GET", "/api/profiles/not-a-uuid", None, Some(&viewer.token))
        .await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_settings_round_trip() {
    let app = helpers::TestApp::new();
    let user = app.sign_up("Settings", &[]).await;

    let current = app
        .request("GET", "/api/settings/me", None, Some(&user.token))
        .await;
    assert_eq!(current.status, StatusCode::OK);
    assert_eq!(current.body["notiNewMessage"], true);

    let updated = app
        .request(
            "PATCH",
            "/api/settings/me",
            Some(json!({ "notiNewMessage": false })),
            Some(&user.token),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["notiNewMessage"], false);
    assert_eq!(updated.body["notiNewConnectionRequest"], true);

    let empty = app
        .request("PATCH", "/api/settings/me", Some(json!({})), Some(&user.token))
        .await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);

    let stranger = app.anonymous();
    let missing = app
        .request("GET", "/api/settings/me", None, Some(&stranger.token))
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}
