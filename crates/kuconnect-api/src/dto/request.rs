//! Request DTOs with validation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use kuconnect_core::types::{ChatId, InterestId, NotificationId, UserId};
use kuconnect_entity::profile::ProfileFields;
use kuconnect_entity::push::{NewPushSubscription, PushKeys};

/// Editable profile fields, used by create and full update.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProfileBody {
    /// Display name.
    #[validate(length(min = 1, max = 100, message = "Display name must be 1 to 100 characters"))]
    pub display_name: String,
    /// Introduction.
    #[validate(length(max = 1000))]
    pub bio: Option<String>,
    /// Avatar reference.
    #[validate(length(max = 2048))]
    pub image: Option<String>,
    /// Date of birth.
    pub birthdate: Option<NaiveDate>,
    /// Faculty.
    #[validate(length(max = 255))]
    pub faculty: Option<String>,
    /// Department.
    #[validate(length(max = 255))]
    pub department: Option<String>,
    /// Year of study.
    #[validate(range(min = 1, max = 8, message = "Year must be between 1 and 8"))]
    pub year: Option<i16>,
    /// LINE handle.
    #[validate(length(max = 255))]
    pub line: Option<String>,
    /// Facebook handle.
    #[validate(length(max = 255))]
    pub facebook: Option<String>,
    /// Instagram handle.
    #[validate(length(max = 255))]
    pub instagram: Option<String>,
    /// Other contact.
    #[validate(length(max = 255))]
    pub other: Option<String>,
}

impl From<ProfileBody> for ProfileFields {
    fn from(body: ProfileBody) -> Self {
        Self {
            display_name: body.display_name,
            bio: body.bio,
            image: body.image,
            birthdate: body.birthdate,
            faculty: body.faculty,
            department: body.department,
            year: body.year,
            line: body.line,
            facebook: body.facebook,
            instagram: body.instagram,
            other: body.other,
        }
    }
}

/// POST /api/profiles
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfileRequest {
    /// Profile fields.
    #[serde(flatten)]
    #[validate(nested)]
    pub profile: ProfileBody,
    /// Initial interest set.
    #[serde(default)]
    pub interests: Vec<InterestId>,
}

/// PUT /api/profiles/me/interests
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SetInterestsRequest {
    /// Replacement interest set; empty keeps none.
    pub interests: Vec<InterestId>,
}

/// POST /api/interactions
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateInteractionRequest {
    /// The judged user.
    pub to_user_id: UserId,
    /// Like (true) or pass (false).
    pub liked: bool,
}

/// PATCH /api/notifications/read
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MarkReadRequest {
    /// Notifications to mark.
    #[validate(length(min = 1, message = "At least one notification id is required"))]
    pub notification_ids: Vec<NotificationId>,
}

/// POST /api/notifications/subscribe
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubscribeRequest {
    /// Push service endpoint.
    #[validate(url(message = "Endpoint must be a URL"))]
    pub endpoint: String,
    /// Client keys.
    pub keys: PushKeys,
}

impl From<SubscribeRequest> for NewPushSubscription {
    fn from(req: SubscribeRequest) -> Self {
        Self {
            endpoint: req.endpoint,
            keys: req.keys,
        }
    }
}

/// POST /api/chats
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OpenChatRequest {
    /// The other member.
    pub user_id: UserId,
}

/// POST /api/chats/message
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    /// Target chat.
    pub chat_id: ChatId,
    /// Message body.
    #[validate(length(min = 1, message = "Message content is required"))]
    pub content: String,
}
