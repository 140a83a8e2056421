//! Profile lifecycle and candidate ranking.

pub mod ranking;
pub mod service;

pub use ranking::CandidateRanker;
pub use service::ProfileService;
