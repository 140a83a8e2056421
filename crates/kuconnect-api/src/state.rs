//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use kuconnect_auth::JwtDecoder;
use kuconnect_core::config::AppConfig;
use kuconnect_core::events::EventBus;
use kuconnect_database::{DatabasePool, Stores};
use kuconnect_realtime::{RealtimeEngine, RealtimeSession};
use kuconnect_service::{
    CandidateRanker, ChatService, ConnectionOrchestrator, Embedder, EventWorker,
    InteractionLedger, NotificationDispatcher, NotificationService, ProfileService, PushSender,
    SettingsService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL pool, absent on the memory backend
    pub database: Option<DatabasePool>,
    /// Bearer token verifier
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Realtime ─────────────────────────────────────────────
    /// WebSocket connection engine
    pub realtime: Arc<RealtimeEngine>,
    /// Inbound frame handler
    pub session: Arc<RealtimeSession>,

    // ── Services ─────────────────────────────────────────────
    /// Profile store
    pub profile_service: Arc<ProfileService>,
    /// Candidate ranking
    pub candidate_ranker: Arc<CandidateRanker>,
    /// Pending likes and connection checks
    pub interaction_ledger: Arc<InteractionLedger>,
    /// Likes, dislikes and mutual connections
    pub orchestrator: Arc<ConnectionOrchestrator>,
    /// Chats and messages
    pub chat_service: Arc<ChatService>,
    /// Privacy and notification settings
    pub settings_service: Arc<SettingsService>,
    /// Notification inbox and push subscriptions
    pub notification_service: Arc<NotificationService>,
}

impl AppState {
    /// Wire every service over `stores`.
    ///
    /// Returns the state together with the event worker that must be
    /// spawned (or driven manually) to deliver notifications.
    pub fn build(
        config: AppConfig,
        stores: Stores,
        database: Option<DatabasePool>,
        embedder: Arc<dyn Embedder>,
        push: Arc<dyn PushSender>,
    ) -> (Self, EventWorker) {
        let (events, receiver) = EventBus::channel();

        let realtime = RealtimeEngine::new(config.realtime.clone());
        let live = realtime.live_channel();

        let dispatcher = NotificationDispatcher::new(
            stores.settings.clone(),
            stores.notifications.clone(),
            stores.push_subscriptions.clone(),
            live.clone(),
            push,
        );
        let worker = EventWorker::new(receiver, dispatcher);

        let profile_service = ProfileService::new(
            stores.users.clone(),
            stores.profiles.clone(),
            stores.interests.clone(),
            stores.interactions.clone(),
            stores.settings.clone(),
            embedder,
            events.clone(),
        );
        let candidate_ranker =
            CandidateRanker::new(stores.profiles.clone(), stores.interests.clone());
        let interaction_ledger = InteractionLedger::new(
            stores.interactions.clone(),
            stores.settings.clone(),
            config.matching.pending_preview_limit,
        );
        let orchestrator = ConnectionOrchestrator::new(
            stores.users.clone(),
            stores.profiles.clone(),
            stores.interactions.clone(),
            stores.chats.clone(),
            events.clone(),
        );
        let chat_service = ChatService::new(
            stores.chats.clone(),
            stores.profiles.clone(),
            stores.interactions.clone(),
            live,
            events,
        );
        let session = realtime.session(chat_service.clone());
        let settings_service = SettingsService::new(stores.settings.clone());
        let notification_service =
            NotificationService::new(stores.notifications.clone(), stores.push_subscriptions);

        let state = Self {
            jwt_decoder: Arc::new(JwtDecoder::new(&config.auth)),
            config: Arc::new(config),
            database,
            realtime: Arc::new(realtime),
            session: Arc::new(session),
            profile_service: Arc::new(profile_service),
            candidate_ranker: Arc::new(candidate_ranker),
            interaction_ledger: Arc::new(interaction_ledger),
            orchestrator: Arc::new(orchestrator),
            chat_service: Arc::new(chat_service),
            settings_service: Arc::new(settings_service),
            notification_service: Arc::new(notification_service),
        };
        (state, worker)
    }
}
