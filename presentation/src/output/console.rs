//! Console output formatter for conversation runs

use colored::{Color, Colorize};
use court_domain::{
    ConversationKind, DisplayBlock, RunStatus, Seat, TranscriptRecorder, collapse_blank_lines,
    truncate,
};
use std::path::Path;

/// Width of panel rules
pub const PANEL_WIDTH: usize = 80;

/// Thought previews are cut to this many characters
pub const THOUGHT_PREVIEW_CHARS: usize = 200;

/// Formats turns and run results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    pub fn seat_icon(seat: Seat) -> &'static str {
        match seat {
            Seat::PersonaA => "🦊",
            Seat::PersonaB => "🏛",
            Seat::Judge => "⚖️",
        }
    }

    pub fn seat_color(seat: Seat) -> Color {
        match seat {
            Seat::PersonaA => Color::Magenta,
            Seat::PersonaB => Color::Cyan,
            Seat::Judge => Color::Yellow,
        }
    }

    /// Opening banner with the topic
    pub fn banner(kind: ConversationKind, topic: &str) -> String {
        let title = match kind {
            ConversationKind::Debate => "🏛  HISTORICAL COURT",
            ConversationKind::Dialogue => "💬  DIALOGUE",
        };
        format!(
            "{}\n{}\n{}\n",
            Self::rule(title, Color::Cyan),
            format!("«{}»", topic).cyan().bold(),
            Self::footer(Color::Cyan)
        )
    }

    /// Two-column table of run settings
    pub fn settings_table(rows: &[(&str, String)]) -> String {
        let width = rows
            .iter()
            .map(|(label, _)| label.chars().count())
            .max()
            .unwrap_or(0);

        let mut output = format!("{}\n", "Run settings".bold());
        for (label, value) in rows {
            output.push_str(&format!(
                "  {}  {}\n",
                format!("{:<width$}", label, width = width).cyan(),
                value
            ));
        }
        output
    }

    /// One completed turn
    pub fn turn_panel(block: &DisplayBlock, show_thoughts: bool) -> String {
        let mut output = String::new();

        let title = if block.is_verdict {
            format!("{}  VERDICT", Self::seat_icon(block.seat))
        } else {
            format!("{} {}", Self::seat_icon(block.seat), block.speaker.to_uppercase())
        };
        let color = Self::seat_color(block.seat);
        output.push_str(&Self::rule(&title, color));
        output.push('\n');

        if show_thoughts && let Some(preview) = Self::thought_preview(block) {
            output.push_str(&format!("{}\n\n", preview.dimmed().italic()));
        }

        let text = collapse_blank_lines(&block.text);
        if block.is_verdict {
            output.push_str(&format!("{}\n", text.bold()));
        } else {
            output.push_str(&format!("{}\n", text));
        }

        output.push_str(&format!("{}\n", Self::token_line(block).dimmed()));
        output
    }

    /// Thought blocks collapsed and cut to [`THOUGHT_PREVIEW_CHARS`].
    pub fn thought_preview(block: &DisplayBlock) -> Option<String> {
        let joined = collapse_blank_lines(block.joined_thoughts().trim());
        if joined.is_empty() {
            return None;
        }
        Some(truncate(&joined, THOUGHT_PREVIEW_CHARS))
    }

    pub fn token_line(block: &DisplayBlock) -> String {
        match block.usage {
            Some(usage) => format!(
                "Tokens: prompt: {}, completion: {}, total: {}",
                usage.prompt_tokens,
                usage.completion_tokens,
                usage.total()
            ),
            None => format!("Tokens: ~{} (estimate)", block.token_count),
        }
    }

    pub fn error_panel(title: &str, message: &str) -> String {
        format!(
            "{}\n{}\n{}\n",
            Self::rule(&format!("Error: {}", title), Color::Red),
            message,
            Self::footer(Color::Red)
        )
    }

    /// Status and token totals for a finished run
    pub fn run_summary(recorder: &TranscriptRecorder) -> String {
        let mut output = String::new();
        let turns = recorder.transcript().len();

        match recorder.status() {
            RunStatus::Completed => output.push_str(&format!(
                "{} {} turns completed\n",
                "v".green(),
                turns
            )),
            RunStatus::Interrupted => output.push_str(&format!(
                "{} Interrupted by user after {} turns\n",
                "!".yellow(),
                turns
            )),
            RunStatus::Failed {
                turn_index,
                speaker_id,
                reason,
            } => output.push_str(&format!(
                "{} Failed at turn index {} ({}): {}\n",
                "x".red(),
                turn_index,
                speaker_id,
                reason
            )),
        }

        if let Some(usage) = recorder.transcript().total_usage() {
            output.push_str(&format!(
                "{}\n",
                format!(
                    "Total tokens: prompt: {}, completion: {}, total: {}",
                    usage.prompt_tokens,
                    usage.completion_tokens,
                    usage.total()
                )
                .dimmed()
            ));
        }

        output
    }

    /// The verdict, or the last turn when there is none
    pub fn format_verdict_only(recorder: &TranscriptRecorder) -> String {
        let blocks = recorder.render_for_display();
        let chosen = blocks
            .iter()
            .rev()
            .find(|b| b.is_verdict)
            .or_else(|| blocks.last());

        match chosen {
            Some(block) => collapse_blank_lines(&block.text) + "\n",
            None => format!("{}\n", "No turns were recorded.".dimmed()),
        }
    }

    /// Header, status and transcript as pretty JSON
    pub fn format_json(recorder: &TranscriptRecorder) -> serde_json::Result<String> {
        let value = serde_json::json!({
            "header": recorder.header(),
            "status": recorder.status(),
            "transcript": recorder.transcript(),
        });
        serde_json::to_string_pretty(&value)
    }

    pub fn saved_line(path: &Path) -> String {
        format!("{} {}", "Saved transcript to".green(), path.display())
    }

    fn rule(title: &str, color: Color) -> String {
        let head = format!("── {} ", title);
        let pad = PANEL_WIDTH.saturating_sub(head.chars().count());
        format!("{}{}", head, "─".repeat(pad))
            .color(color)
            .bold()
            .to_string()
    }

    fn footer(color: Color) -> String {
        "─".repeat(PANEL_WIDTH).color(color).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use court_domain::{
        Participant, ResponseParser, RunHeader, TokenUsage, Transcript,
    };

    fn block(seat: Seat, speaker: &str, raw: &str, usage: Option<TokenUsage>) -> DisplayBlock {
        let parsed = ResponseParser::parse(raw);
        DisplayBlock {
            turn_index: 0,
            seat,
            speaker: speaker.to_string(),
            thoughts: parsed.thoughts,
            text: parsed.visible_text,
            token_count: parsed.token_estimate,
            usage,
            is_verdict: seat == Seat::Judge,
        }
    }

    fn recorder() -> TranscriptRecorder {
        let mut transcript = Transcript::new();
        transcript.record_turn(
            Seat::PersonaA,
            "machiavelli",
            ResponseParser::parse("Order first."),
            Some(TokenUsage::new(10, 2)),
            Utc::now(),
        );
        transcript.record_turn(
            Seat::Judge,
            "judge",
            ResponseParser::parse("Machiavelli wins."),
            Some(TokenUsage::new(5, 3)),
            Utc::now(),
        );
        let header = RunHeader {
            kind: ConversationKind::Debate,
            topic: "Order".to_string(),
            participants: vec![
                Participant {
                    seat: Seat::PersonaA,
                    id: "machiavelli".to_string(),
                    display_name: "Machiavelli".to_string(),
                    model: "llama3".to_string(),
                },
                Participant {
                    seat: Seat::Judge,
                    id: "judge".to_string(),
                    display_name: "Judge".to_string(),
                    model: "llama3.2".to_string(),
                },
            ],
        };
        TranscriptRecorder::from_transcript(header, transcript)
    }

    #[test]
    fn test_turn_panel_contents() {
        let panel = ConsoleFormatter::turn_panel(
            &block(
                Seat::PersonaB,
                "Socrates",
                "<think>ask why</think>Why?",
                Some(TokenUsage::new(42, 15)),
            ),
            true,
        );
        assert!(panel.contains("🏛 SOCRATES"));
        assert!(panel.contains("ask why"));
        assert!(panel.contains("Why?"));
        assert!(panel.contains("Tokens: prompt: 42, completion: 15, total: 57"));
    }

    #[test]
    fn test_hidden_thoughts() {
        let panel = ConsoleFormatter::turn_panel(
            &block(Seat::PersonaA, "Machiavelli", "<think>secret</think>Power.", None),
            false,
        );
        assert!(!panel.contains("secret"));
        assert!(panel.contains("Tokens: ~2 (estimate)"));
    }

    #[test]
    fn test_thought_preview_is_truncated() {
        let raw = format!("<think>{}</think>Done.", "x".repeat(300));
        let preview =
            ConsoleFormatter::thought_preview(&block(Seat::PersonaA, "M", &raw, None)).unwrap();
        assert_eq!(preview, format!("{}...", "x".repeat(THOUGHT_PREVIEW_CHARS)));
        assert!(ConsoleFormatter::thought_preview(&block(Seat::PersonaA, "M", "plain", None)).is_none());
        assert!(
            ConsoleFormatter::thought_preview(&block(Seat::PersonaA, "M", "<think> \n </think>x", None))
                .is_none()
        );
    }

    #[test]
    fn test_verdict_panel_title() {
        let panel = ConsoleFormatter::turn_panel(
            &block(Seat::Judge, "Judge", "Socrates wins.", None),
            true,
        );
        assert!(panel.contains("VERDICT"));
        assert!(panel.contains("Socrates wins."));
    }

    #[test]
    fn test_verdict_only() {
        assert_eq!(
            ConsoleFormatter::format_verdict_only(&recorder()),
            "Machiavelli wins.\n"
        );
    }

    #[test]
    fn test_summary_totals() {
        let summary = ConsoleFormatter::run_summary(&recorder());
        assert!(summary.contains("2 turns completed"));
        assert!(summary.contains("Total tokens: prompt: 15, completion: 5, total: 20"));

        let interrupted = recorder().with_status(RunStatus::Interrupted);
        assert!(ConsoleFormatter::run_summary(&interrupted).contains("Interrupted by user after 2 turns"));
    }

    #[test]
    fn test_failed_summary_uses_zero_based_turn_index() {
        let failed = recorder().with_status(RunStatus::Failed {
            turn_index: 2,
            speaker_id: "socrates".to_string(),
            reason: "timed out".to_string(),
        });
        let summary = ConsoleFormatter::run_summary(&failed);
        assert!(summary.contains("Failed at turn index 2 (socrates): timed out"));
    }

    #[test]
    fn test_json_output() {
        let json: serde_json::Value =
            serde_json::from_str(&ConsoleFormatter::format_json(&recorder()).unwrap()).unwrap();
        assert_eq!(json["header"]["topic"], "Order");
        assert_eq!(json["status"]["status"], "completed");
        assert_eq!(json["transcript"]["turns"][1]["seat"], "judge");
    }

    #[test]
    fn test_settings_table_aligns_labels() {
        let table = ConsoleFormatter::settings_table(&[
            ("Topic", "Order".to_string()),
            ("Rounds", "2".to_string()),
        ]);
        assert!(table.contains("Order"));
        assert!(table.contains("Rounds"));
    }
}
