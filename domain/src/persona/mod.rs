//! Persona domain.
//!
//! - [`spec::PersonaSpec`] - one participant's prompt, model and options
//! - [`spec::GenerationOptions`] - `num_ctx` / `num_predict` / `temperature`
//! - [`spec::Seat`] - where a persona sits in a topology

pub mod spec;
