//! Chat handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use kuconnect_core::types::ChatId;
use kuconnect_entity::chat::{Chat, ChatDetail, ChatSummary, Message};

use crate::dto::request::{OpenChatRequest, SendMessageRequest};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::state::AppState;

/// POST /api/chats
pub async fn open_chat(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<OpenChatRequest>,
) -> ApiResult<Json<Chat>> {
    Ok(Json(state.chat_service.open_chat(&auth, req.user_id).await?))
}

/// GET /api/chats
pub async fn list_chats(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<ChatSummary>>> {
    Ok(Json(state.chat_service.list_chats(&auth).await?))
}

/// GET /api/chats/{id}
pub async fn get_chat(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(chat_id): IdPath<ChatId>,
) -> ApiResult<Json<ChatDetail>> {
    Ok(Json(state.chat_service.get_chat(&auth, chat_id).await?))
}

/// POST /api/chats/message
pub async fn send_message(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<SendMessageRequest>,
) -> ApiResult<(StatusCode, Json<Message>)> {
    let message = state
        .chat_service
        .send_message(&auth, req.chat_id, &req.content)
        .await?;
    Ok((StatusCode::CREATED, Json(message)))
}
