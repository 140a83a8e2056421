//! Directed like/dislike facts.

pub mod model;

pub use model::Interaction;
