//! Likes, dislikes and the connections they form.

pub mod ledger;
pub mod orchestrator;

pub use ledger::{InteractionLedger, PendingLikes};
pub use orchestrator::{ConnectionOrchestrator, InteractionOutcome};
