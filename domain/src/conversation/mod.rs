//! Conversation orchestration domain
//!
//! Topologies select which turn sequence runs; the state machine decides
//! whose turn is next. Neither performs I/O.

pub mod state;
pub mod topology;
