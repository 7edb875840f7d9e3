//! Ctrl-C handling for a running conversation
//!
//! The first interrupt asks the run to stop once the turn in flight has
//! finished. A second interrupt exits right away.

use court_application::ConversationProgress;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::warn;

/// Conventional exit status after SIGINT
pub const EXIT_INTERRUPTED: u8 = 130;

/// What an interrupt should do, given what came before it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptAction {
    /// Let the current turn finish, then stop
    StopAfterTurn,
    /// A stop was already requested; leave now
    Quit,
}

/// Record one interrupt against the run's token.
pub fn on_interrupt(cancel: &CancellationToken) -> InterruptAction {
    if cancel.is_cancelled() {
        InterruptAction::Quit
    } else {
        cancel.cancel();
        InterruptAction::StopAfterTurn
    }
}

/// Listen for Ctrl-C for the rest of the process.
pub fn spawn_handler(cancel: CancellationToken, progress: Arc<dyn ConversationProgress>) {
    tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            match on_interrupt(&cancel) {
                InterruptAction::StopAfterTurn => {
                    warn!("Interrupt received, stopping after the current turn");
                    progress.on_interrupt_requested();
                }
                InterruptAction::Quit => {
                    warn!("Second interrupt received, exiting");
                    std::process::exit(i32::from(EXIT_INTERRUPTED));
                }
            }
        }
    });
}
