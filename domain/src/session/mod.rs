//! Persona session domain.
//!
//! - [`entities::PersonaSession`] - one persona's growing message history
//! - [`entities::Message`] - a single message within that history
//! - [`entities::ChatMessage`] - the same message as the inference API sees it

pub mod entities;
