//! Interest catalog entities.

pub mod model;

pub use model::{Interest, UserInterest};
