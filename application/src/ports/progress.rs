//! Progress notification port
//!
//! Defines the interface for reporting progress during a conversation run.

use court_domain::{DisplayBlock, PersonaSpec, Seat};

/// Callback for progress updates during a conversation run
///
/// Implementations live in the presentation layer and own every display
/// concern (icons, colors, spinners, thought presentation).
pub trait ConversationProgress: Send + Sync {
    /// Called before a turn's inference call is made
    fn on_turn_start(&self, turn_index: usize, seat: Seat, persona: &PersonaSpec);

    /// Called after a turn has been parsed and recorded
    fn on_turn_complete(&self, block: &DisplayBlock);

    /// Called when a turn's inference call fails
    fn on_turn_failed(&self, _turn_index: usize, _persona: &PersonaSpec, _error: &str) {}

    /// Called when a stop was requested; the turn in flight still finishes
    fn on_interrupt_requested(&self) {}

    /// Called when the run stops early because it was cancelled
    fn on_interrupted(&self, _completed_turns: usize) {}
}

/// Callback for model download progress
pub trait ModelPullProgress: Send + Sync {
    /// Called before a missing model is pulled
    fn on_pull_start(&self, model: &str);

    /// Called when a pull finishes
    fn on_pull_complete(&self, model: &str, success: bool);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ConversationProgress for NoProgress {
    fn on_turn_start(&self, _turn_index: usize, _seat: Seat, _persona: &PersonaSpec) {}
    fn on_turn_complete(&self, _block: &DisplayBlock) {}
}

impl ModelPullProgress for NoProgress {
    fn on_pull_start(&self, _model: &str) {}
    fn on_pull_complete(&self, _model: &str, _success: bool) {}
}
