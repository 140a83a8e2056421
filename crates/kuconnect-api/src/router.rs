//! Route definitions for the KU Connect HTTP API.
//!
//! REST routes are mounted under `/api`; the WebSocket upgrade and the
//! liveness probe sit at the root. The router receives `AppState` and passes
//! it to all handlers via Axum's `State` extractor.

use axum::Router;
use axum::routing::{get, patch, post};

use crate::handlers;
use crate::state::AppState;

/// Build the router with every route, state applied, no middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(profile_routes())
        .merge(interest_routes())
        .merge(settings_routes())
        .merge(interaction_routes())
        .merge(notification_routes())
        .merge(chat_routes());

    Router::new()
        .nest("/api", api_routes)
        .route("/ws", get(handlers::ws::ws_upgrade))
        .route("/healthz", get(handlers::health::health))
        .with_state(state)
}

/// Candidates, own profile, other profiles, interest set
fn profile_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/profiles",
            get(handlers::profile::list_candidates)
                .post(handlers::profile::create_profile)
                .put(handlers::profile::update_profile),
        )
        .route("/profiles/{id}", get(handlers::profile::get_profile))
        .route(
            "/profiles/me/interests",
            get(handlers::profile::get_interests).put(handlers::profile::set_interests),
        )
        .route("/me/profile", get(handlers::profile::get_own_profile))
}

/// Interest catalog
fn interest_routes() -> Router<AppState> {
    Router::new().route("/interests", get(handlers::interest::list_catalog))
}

/// Caller settings
fn settings_routes() -> Router<AppState> {
    Router::new().route(
        "/settings/me",
        get(handlers::settings::get_settings).patch(handlers::settings::update_settings),
    )
}

/// Likes, dislikes, pending likers
fn interaction_routes() -> Router<AppState> {
    Router::new()
        .route("/interactions", post(handlers::interaction::create_interaction))
        .route("/interactions/pending", get(handlers::interaction::pending_likes))
}

/// Inbox, read marks, push subscriptions
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(handlers::notification::list_notifications))
        .route("/notifications/read", patch(handlers::notification::mark_read))
        .route("/notifications/subscribe", post(handlers::notification::subscribe))
}

/// Chats and messages
fn chat_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/chats",
            get(handlers::chat::list_chats).post(handlers::chat::open_chat),
        )
        .route("/chats/{id}", get(handlers::chat::get_chat))
        .route("/chats/message", post(handlers::chat::send_message))
}
