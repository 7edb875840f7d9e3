//! Prompt domain
//!
//! Default persona prompts and the host messages synthesized during a run.

mod template;

pub use template::PromptTemplate;
