//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod prepare_models;
pub mod run_conversation;
