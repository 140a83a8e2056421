//! # kuconnect-service
//!
//! Business logic for KU Connect. Each service orchestrates store traits,
//! the embedding provider, the event bus and the delivery channels to
//! implement one use case family.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time as `Arc<dyn Trait>` handles.

pub mod chat;
pub mod context;
pub mod embedding;
pub mod interaction;
pub mod live;
pub mod notification;
pub mod profile;
pub mod push;
pub mod settings;

#[cfg(test)]
pub(crate) mod testing;

pub use chat::ChatService;
pub use context::RequestContext;
pub use embedding::{Embedder, build_embedder};
pub use interaction::{ConnectionOrchestrator, InteractionLedger, InteractionOutcome, PendingLikes};
pub use live::LiveChannel;
pub use notification::{EventWorker, NotificationDispatcher, NotificationService};
pub use profile::{CandidateRanker, ProfileService};
pub use push::{PushSender, build_push_sender};
pub use settings::SettingsService;
