//! Progress reporting for conversation runs

use crate::config::OutputConfig;
use crate::output::console::ConsoleFormatter;
use colored::Colorize;
use court_application::ports::progress::{ConversationProgress, ModelPullProgress};
use court_domain::{DisplayBlock, PersonaSpec, Seat};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Shown after the first Ctrl-C
const STOP_HINT: &str = "Stopping after the current turn, press Ctrl-C again to quit";

/// Status line shown while a persona's call is in flight.
fn waiting_message(seat: Seat, persona: &PersonaSpec) -> String {
    let verb = match seat {
        Seat::Judge => "is deliberating...",
        Seat::PersonaA | Seat::PersonaB => "is thinking...",
    };
    format!(
        "{} {} {}",
        ConsoleFormatter::seat_icon(seat),
        persona.display_name(),
        verb
    )
}

/// Reports progress with a spinner per turn and prints finished turns
pub struct ProgressReporter {
    config: OutputConfig,
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new(config: OutputConfig) -> Self {
        Self {
            config,
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn start_spinner(&self, message: String) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(80));

        if let Ok(mut slot) = self.spinner.lock()
            && let Some(previous) = slot.replace(pb)
        {
            previous.finish_and_clear();
        }
    }

    /// Print above the spinner when one is running.
    fn print_line(&self, line: &str) {
        if let Ok(slot) = self.spinner.lock()
            && let Some(pb) = slot.as_ref()
        {
            pb.println(line);
            return;
        }
        println!("{}", line);
    }

    fn clear_spinner(&self) {
        if let Ok(mut slot) = self.spinner.lock()
            && let Some(pb) = slot.take()
        {
            pb.finish_and_clear();
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new(OutputConfig::default())
    }
}

impl ConversationProgress for ProgressReporter {
    fn on_turn_start(&self, _turn_index: usize, seat: Seat, persona: &PersonaSpec) {
        let message = waiting_message(seat, persona)
            .color(ConsoleFormatter::seat_color(seat))
            .bold()
            .to_string();
        self.start_spinner(message);
    }

    fn on_turn_complete(&self, block: &DisplayBlock) {
        self.clear_spinner();
        if self.config.prints_turns() {
            println!(
                "{}",
                ConsoleFormatter::turn_panel(block, self.config.show_thoughts)
            );
        }
    }

    fn on_turn_failed(&self, turn_index: usize, persona: &PersonaSpec, error: &str) {
        self.clear_spinner();
        eprintln!(
            "{}",
            ConsoleFormatter::error_panel(
                &format!("turn index {} ({})", turn_index, persona.display_name()),
                error
            )
        );
    }

    fn on_interrupt_requested(&self) {
        self.print_line(&format!("{} {}", "!".yellow(), STOP_HINT));
    }

    fn on_interrupted(&self, completed_turns: usize) {
        self.clear_spinner();
        println!(
            "{} Interrupted after {} turns, saving what was said",
            "!".yellow(),
            completed_turns
        );
    }
}

impl ModelPullProgress for ProgressReporter {
    fn on_pull_start(&self, model: &str) {
        self.start_spinner(format!(
            "Model {} not found. Pulling from Ollama registry...",
            model.bold()
        ));
    }

    fn on_pull_complete(&self, model: &str, success: bool) {
        self.clear_spinner();
        if success {
            println!("{} Pulled {}", "v".green(), model);
        } else {
            println!("{} Failed to pull {}", "x".red(), model);
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress {
    config: OutputConfig,
}

impl SimpleProgress {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }
}

impl ConversationProgress for SimpleProgress {
    fn on_turn_start(&self, _turn_index: usize, seat: Seat, persona: &PersonaSpec) {
        if self.config.prints_turns() {
            println!("{} {}", "->".cyan(), waiting_message(seat, persona));
        }
    }

    fn on_turn_complete(&self, block: &DisplayBlock) {
        if self.config.prints_turns() {
            println!(
                "{}",
                ConsoleFormatter::turn_panel(block, self.config.show_thoughts)
            );
        }
    }

    fn on_turn_failed(&self, turn_index: usize, persona: &PersonaSpec, error: &str) {
        eprintln!(
            "  {} turn index {} ({}) failed: {}",
            "x".red(),
            turn_index,
            persona.display_name(),
            error
        );
    }

    fn on_interrupt_requested(&self) {
        println!("  {} {}", "!".yellow(), STOP_HINT);
    }

    fn on_interrupted(&self, completed_turns: usize) {
        println!("  {} interrupted after {} turns", "!".yellow(), completed_turns);
    }
}

impl ModelPullProgress for SimpleProgress {
    fn on_pull_start(&self, model: &str) {
        println!("{} pulling {}", "->".cyan(), model);
    }

    fn on_pull_complete(&self, model: &str, success: bool) {
        if success {
            println!("  {} {}", "v".green(), model);
        } else {
            println!("  {} {} (failed)", "x".red(), model);
        }
    }
}
