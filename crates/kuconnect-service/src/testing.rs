//! Shared fixtures for service tests: an in-memory world with recording delivery channels.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Mutex as AsyncMutex;

use kuconnect_core::config::MatchingConfig;
use kuconnect_core::error::AppError;
use kuconnect_core::events::EventBus;
use kuconnect_core::result::AppResult;
use kuconnect_core::types::{ChatId, MessageId, NotificationId, PageRequest, UserId};
use kuconnect_database::{MemoryStore, Stores};
use kuconnect_entity::chat::Message;
use kuconnect_entity::interest::Interest;
use kuconnect_entity::notification::Notification;
use kuconnect_entity::profile::ProfileFields;
use kuconnect_entity::push::PushSubscription;

use crate::chat::ChatService;
use crate::embedding::{Embedder, HashingEmbedder, interest_prompt};
use crate::interaction::{ConnectionOrchestrator, InteractionLedger};
use crate::live::LiveChannel;
use crate::notification::{EventWorker, NotificationDispatcher, NotificationService};
use crate::profile::{CandidateRanker, ProfileService};
use crate::push::{PushMessage, PushOutcome, PushSender};
use crate::settings::SettingsService;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    Notification(UserId, NotificationId),
    Message(ChatId, MessageId),
    Read(ChatId, MessageId),
}

/// Live channel that remembers every frame instead of sending it.
#[derive(Debug, Default)]
pub(crate) struct RecordingLive {
    frames: Mutex<Vec<Frame>>,
}

impl RecordingLive {
    fn record(&self, frame: Frame) {
        self.frames.lock().expect("frames lock").push(frame);
    }

    fn collect<T>(&self, pick: impl Fn(&Frame) -> Option<T>) -> Vec<T> {
        self.frames.lock().expect("frames lock").iter().filter_map(pick).collect()
    }

    pub(crate) fn notifications_for(&self, user: UserId) -> Vec<NotificationId> {
        self.collect(|f| match f {
            Frame::Notification(u, id) if *u == user => Some(*id),
            _ => None,
        })
    }

    pub(crate) fn messages_in(&self, chat: ChatId) -> Vec<MessageId> {
        self.collect(|f| match f {
            Frame::Message(c, id) if *c == chat => Some(*id),
            _ => None,
        })
    }

    pub(crate) fn reads_in(&self, chat: ChatId) -> Vec<MessageId> {
        self.collect(|f| match f {
            Frame::Read(c, id) if *c == chat => Some(*id),
            _ => None,
        })
    }
}

impl LiveChannel for RecordingLive {
    fn push_notification(&self, user_id: UserId, notification: &Notification) -> usize {
        self.record(Frame::Notification(user_id, notification.id));
        1
    }

    fn push_message(&self, chat_id: ChatId, message: &Message) -> usize {
        self.record(Frame::Message(chat_id, message.id));
        1
    }

    fn push_read_receipts(&self, chat_id: ChatId, message_ids: &[MessageId]) -> usize {
        for id in message_ids {
            self.record(Frame::Read(chat_id, *id));
        }
        message_ids.len()
    }
}

/// Push sender that records delivered endpoints and can be told to fail.
#[derive(Debug, Default)]
pub(crate) struct RecordingPush {
    sent: Mutex<Vec<String>>,
    failing: Option<String>,
    gone: Option<String>,
}

impl RecordingPush {
    pub(crate) fn failing_for(endpoint: &str) -> Self {
        Self {
            failing: Some(endpoint.to_string()),
            ..Self::default()
        }
    }

    pub(crate) fn gone_for(endpoint: &str) -> Self {
        Self {
            gone: Some(endpoint.to_string()),
            ..Self::default()
        }
    }

    pub(crate) fn sent(&self) -> Vec<String> {
        self.sent.lock().expect("sent lock").clone()
    }
}

#[async_trait]
impl PushSender for RecordingPush {
    async fn send(
        &self,
        subscription: &PushSubscription,
        _message: &PushMessage,
    ) -> AppResult<PushOutcome> {
        let endpoint = subscription.endpoint.as_str();
        if self.failing.as_deref() == Some(endpoint) {
            return Err(AppError::external("push relay unavailable"));
        }
        if self.gone.as_deref() == Some(endpoint) {
            return Ok(PushOutcome::Gone);
        }
        self.sent.lock().expect("sent lock").push(endpoint.to_string());
        Ok(PushOutcome::Delivered)
    }
}

/// A complete service graph over one memory store.
pub(crate) struct Harness {
    pub(crate) memory: MemoryStore,
    pub(crate) stores: Stores,
    pub(crate) live: Arc<RecordingLive>,
    pub(crate) push: Arc<RecordingPush>,
    pub(crate) bus: EventBus,
    pub(crate) dispatcher: NotificationDispatcher,
    embedder: Arc<HashingEmbedder>,
    matching: MatchingConfig,
    worker: AsyncMutex<EventWorker>,
}

impl Harness {
    pub(crate) fn new() -> Self {
        Self::with_push(RecordingPush::default())
    }

    pub(crate) fn with_push(push: RecordingPush) -> Self {
        let memory = MemoryStore::with_default_interests();
        let stores = Stores::memory(memory.clone());
        let live = Arc::new(RecordingLive::default());
        let push = Arc::new(push);
        let dispatcher = NotificationDispatcher::new(
            stores.settings.clone(),
            stores.notifications.clone(),
            stores.push_subscriptions.clone(),
            live.clone(),
            push.clone(),
        );
        let (bus, receiver) = EventBus::channel();
        let worker = EventWorker::new(receiver, dispatcher.clone());
        Self {
            memory,
            stores,
            live,
            push,
            bus,
            dispatcher,
            embedder: Arc::new(HashingEmbedder::new(64)),
            matching: MatchingConfig::default(),
            worker: AsyncMutex::new(worker),
        }
    }

    /// A user with a public profile and an embedding derived from `name`.
    pub(crate) async fn user_with_profile(&self, name: &str) -> UserId {
        let user = UserId::new();
        self.stores.users.upsert(user, None).await.expect("user");
        let embedding = self
            .embedder
            .embed(&interest_prompt(&[name]))
            .await
            .expect("embed");
        let fields = ProfileFields {
            display_name: name.to_string(),
            line: Some(format!("{name}-line")),
            ..ProfileFields::default()
        };
        self.stores
            .profiles
            .create_profile(user, fields, &[], &embedding)
            .await
            .expect("profile");
        user
    }

    /// Mutual likes plus the pair's chat, bypassing events.
    pub(crate) async fn connect(&self, a: UserId, b: UserId) -> ChatId {
        self.stores.interactions.record(a, b, true).await.expect("a likes b");
        self.stores.interactions.record(b, a, true).await.expect("b likes a");
        let (chat, _) = self.stores.chats.find_or_create(a, b).await.expect("chat");
        chat.id
    }

    pub(crate) async fn interest(&self, name: &str) -> Interest {
        self.memory.interest_named(name).await.expect("seeded interest")
    }

    /// Deliver every queued event.
    pub(crate) async fn settle(&self) -> usize {
        self.worker.lock().await.run_pending().await
    }

    /// Newest first.
    pub(crate) async fn notifications_of(&self, user: UserId) -> Vec<Notification> {
        let page = PageRequest::try_new(1, 100, 100).expect("page");
        self.stores
            .notifications
            .list_for_user(user, page)
            .await
            .expect("list")
    }

    pub(crate) fn profiles(&self) -> ProfileService {
        ProfileService::new(
            self.stores.users.clone(),
            self.stores.profiles.clone(),
            self.stores.interests.clone(),
            self.stores.interactions.clone(),
            self.stores.settings.clone(),
            self.embedder.clone(),
            self.bus.clone(),
        )
    }

    pub(crate) fn ranker(&self) -> CandidateRanker {
        CandidateRanker::new(self.stores.profiles.clone(), self.stores.interests.clone())
    }

    pub(crate) fn ledger(&self) -> InteractionLedger {
        InteractionLedger::new(
            self.stores.interactions.clone(),
            self.stores.settings.clone(),
            self.matching.pending_preview_limit,
        )
    }

    pub(crate) fn orchestrator(&self) -> ConnectionOrchestrator {
        ConnectionOrchestrator::new(
            self.stores.users.clone(),
            self.stores.profiles.clone(),
            self.stores.interactions.clone(),
            self.stores.chats.clone(),
            self.bus.clone(),
        )
    }

    pub(crate) fn chats(&self) -> ChatService {
        ChatService::new(
            self.stores.chats.clone(),
            self.stores.profiles.clone(),
            self.stores.interactions.clone(),
            self.live.clone(),
            self.bus.clone(),
        )
    }

    pub(crate) fn settings(&self) -> SettingsService {
        SettingsService::new(self.stores.settings.clone())
    }

    pub(crate) fn notifications(&self) -> NotificationService {
        NotificationService::new(
            self.stores.notifications.clone(),
            self.stores.push_subscriptions.clone(),
        )
    }
}
