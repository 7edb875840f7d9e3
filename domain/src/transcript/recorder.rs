//! Transcript recorder - renders a run for display and for persistence.
//!
//! The recorder owns a [`Transcript`] plus the run header and final status.
//! Rendering is pure: display blocks carry no ANSI styling and persistence
//! produces a Markdown string without touching the filesystem.

use crate::conversation::topology::ConversationKind;
use crate::core::error::TranscriptError;
use crate::persona::spec::Seat;
use crate::transcript::entities::{TokenUsage, Transcript, TurnRecord};
use crate::transcript::filename::transcript_file_name;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A seated persona as shown in transcript headers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub seat: Seat,
    pub id: String,
    pub display_name: String,
    pub model: String,
}

/// Static facts about a run, known before the first turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunHeader {
    pub kind: ConversationKind,
    pub topic: String,
    pub participants: Vec<Participant>,
}

impl RunHeader {
    pub fn participant(&self, seat: Seat) -> Option<&Participant> {
        self.participants.iter().find(|p| p.seat == seat)
    }

    /// Display name for `seat`, falling back to `speaker_id`.
    pub fn speaker_name<'a>(&'a self, seat: Seat, speaker_id: &'a str) -> &'a str {
        self.participant(seat)
            .map(|p| p.display_name.as_str())
            .unwrap_or(speaker_id)
    }
}

/// How a run ended
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunStatus {
    #[default]
    Completed,
    /// Stopped between turns by the user
    Interrupted,
    /// A turn's inference call failed
    Failed {
        turn_index: usize,
        speaker_id: String,
        reason: String,
    },
}

impl RunStatus {
    pub fn is_completed(&self) -> bool {
        matches!(self, RunStatus::Completed)
    }
}

/// One turn, ready for a renderer
///
/// Thoughts are trimmed and blank blocks left out; the record keeps them
/// verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayBlock {
    pub turn_index: usize,
    pub seat: Seat,
    pub speaker: String,
    pub thoughts: Vec<String>,
    pub text: String,
    pub token_count: usize,
    pub usage: Option<TokenUsage>,
    pub is_verdict: bool,
}

impl DisplayBlock {
    pub fn from_record(record: &TurnRecord, speaker: impl Into<String>) -> Self {
        Self {
            turn_index: record.turn_index,
            seat: record.seat,
            speaker: speaker.into(),
            thoughts: record
                .thoughts
                .iter()
                .map(|t| t.trim())
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
            text: record.visible_text.clone(),
            token_count: record.token_count,
            usage: record.usage,
            is_verdict: record.is_verdict(),
        }
    }

    /// Thought blocks joined with a blank line, empty when there are none.
    pub fn joined_thoughts(&self) -> String {
        self.thoughts.join("\n\n")
    }
}

/// Append-only recorder over one run
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptRecorder {
    header: RunHeader,
    transcript: Transcript,
    status: RunStatus,
}

impl TranscriptRecorder {
    pub fn new(header: RunHeader) -> Self {
        Self::from_transcript(header, Transcript::new())
    }

    pub fn from_transcript(header: RunHeader, transcript: Transcript) -> Self {
        Self {
            header,
            transcript,
            status: RunStatus::Completed,
        }
    }

    pub fn with_status(mut self, status: RunStatus) -> Self {
        self.status = status;
        self
    }

    pub fn set_status(&mut self, status: RunStatus) {
        self.status = status;
    }

    pub fn record(&mut self, record: TurnRecord) -> Result<(), TranscriptError> {
        self.transcript.push(record)
    }

    pub fn header(&self) -> &RunHeader {
        &self.header
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn status(&self) -> &RunStatus {
        &self.status
    }

    pub fn render_for_display(&self) -> Vec<DisplayBlock> {
        self.transcript
            .turns()
            .iter()
            .map(|record| {
                DisplayBlock::from_record(
                    record,
                    self.header.speaker_name(record.seat, &record.speaker_id),
                )
            })
            .collect()
    }

    /// Render the run as a Markdown document.
    pub fn render_for_persistence(&self) -> String {
        let mut lines: Vec<String> = Vec::new();
        let kind = self.header.kind;

        lines.push(format!("# {}: {}", kind.title(), self.header.topic));
        lines.push(String::new());
        lines.push("## Participants".to_string());
        lines.push(String::new());
        for participant in &self.header.participants {
            lines.push(format!(
                "- **{}:** `{}`",
                participant.display_name, participant.model
            ));
        }
        lines.push(String::new());

        let blocks = self.render_for_display();
        let (verdicts, turns): (Vec<&DisplayBlock>, Vec<&DisplayBlock>) =
            blocks.iter().partition(|b| b.is_verdict);

        lines.push("## Transcript".to_string());
        lines.push(String::new());
        if turns.is_empty() {
            lines.push("_No turns were recorded._".to_string());
            lines.push(String::new());
        }
        for block in turns {
            push_block(&mut lines, block);
        }

        if kind == ConversationKind::Debate {
            lines.push("## Verdict".to_string());
            lines.push(String::new());
            match verdicts.last() {
                Some(block) => push_block(&mut lines, block),
                None => {
                    lines.push("_No verdict was delivered._".to_string());
                    lines.push(String::new());
                }
            }
        }

        if let Some(usage) = self.transcript.total_usage() {
            lines.push("## Token usage".to_string());
            lines.push(String::new());
            lines.push(format!("- **Prompt tokens:** {}", usage.prompt_tokens));
            lines.push(format!(
                "- **Completion tokens:** {}",
                usage.completion_tokens
            ));
            lines.push(format!("- **Total:** {}", usage.total()));
            lines.push(String::new());
        }

        match &self.status {
            RunStatus::Completed => {}
            RunStatus::Interrupted => {
                lines.push("## Status".to_string());
                lines.push(String::new());
                lines.push(format!(
                    "Interrupted by user after {} turn(s).",
                    self.transcript.len()
                ));
                lines.push(String::new());
            }
            RunStatus::Failed {
                turn_index,
                speaker_id,
                reason,
            } => {
                lines.push("## Status".to_string());
                lines.push(String::new());
                lines.push(format!(
                    "Failed at turn index {} ({}): {}",
                    turn_index,
                    speaker_id,
                    reason
                ));
                lines.push(String::new());
            }
        }

        lines.join("\n")
    }

    pub fn file_name(&self, date: NaiveDate) -> String {
        transcript_file_name(&self.header.topic, date)
    }
}

fn push_block(lines: &mut Vec<String>, block: &DisplayBlock) {
    if !block.thoughts.is_empty() {
        lines.push("<details><summary>Thoughts</summary>".to_string());
        lines.push(String::new());
        lines.push(block.joined_thoughts());
        lines.push(String::new());
        lines.push("</details>".to_string());
        lines.push(String::new());
    }

    lines.push(format!("> **{}:**", block.speaker));
    for line in block.text.lines() {
        lines.push(format!("> {line}"));
    }
    lines.push(String::new());

    match block.usage {
        Some(usage) => lines.push(format!(
            "_Tokens: prompt {}, completion {}, total {}_",
            usage.prompt_tokens,
            usage.completion_tokens,
            usage.total()
        )),
        None => lines.push(format!("_Tokens: ~{}_", block.token_count)),
    }
    lines.push(String::new());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::parser::ResponseParser;
    use chrono::Utc;

    fn header(kind: ConversationKind) -> RunHeader {
        let mut participants = vec![
            Participant {
                seat: Seat::PersonaA,
                id: "machiavelli".to_string(),
                display_name: "Machiavelli".to_string(),
                model: "llama3:latest".to_string(),
            },
            Participant {
                seat: Seat::PersonaB,
                id: "socrates".to_string(),
                display_name: "Socrates".to_string(),
                model: "qwen2.5-coder:7b".to_string(),
            },
        ];
        if kind == ConversationKind::Debate {
            participants.push(Participant {
                seat: Seat::Judge,
                id: "judge".to_string(),
                display_name: "Judge".to_string(),
                model: "llama3.2:latest".to_string(),
            });
        }
        RunHeader {
            kind,
            topic: "What is justice?".to_string(),
            participants,
        }
    }

    fn debate_recorder() -> TranscriptRecorder {
        let mut transcript = Transcript::new();
        transcript.record_turn(
            Seat::PersonaA,
            "machiavelli",
            ResponseParser::parse("<think>be bold</think>Power is justice."),
            Some(TokenUsage::new(10, 4)),
            Utc::now(),
        );
        transcript.record_turn(
            Seat::PersonaB,
            "socrates",
            ResponseParser::parse("Is it?\nWhat is power?"),
            Some(TokenUsage::new(20, 5)),
            Utc::now(),
        );
        transcript.record_turn(
            Seat::Judge,
            "judge",
            ResponseParser::parse("Socrates wins."),
            Some(TokenUsage::new(30, 3)),
            Utc::now(),
        );
        TranscriptRecorder::from_transcript(header(ConversationKind::Debate), transcript)
    }

    #[test]
    fn test_display_blocks_use_display_names() {
        let blocks = debate_recorder().render_for_display();
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].speaker, "Machiavelli");
        assert_eq!(blocks[0].thoughts, vec!["be bold"]);
        assert_eq!(blocks[0].text, "Power is justice.");
        assert!(blocks[2].is_verdict);
    }

    #[test]
    fn test_display_trims_thoughts_and_skips_blank_ones() {
        let record = TurnRecord::new(
            0,
            Seat::PersonaB,
            "socrates",
            ResponseParser::parse("<think>\n  ask why \n</think><think> </think>Why?"),
            None,
            Utc::now(),
        );
        assert_eq!(record.thoughts.len(), 2);

        let block = DisplayBlock::from_record(&record, "Socrates");
        assert_eq!(block.thoughts, vec!["ask why"]);

        let mut recorder = TranscriptRecorder::new(header(ConversationKind::Dialogue));
        recorder.record(record).unwrap();
        let doc = recorder.render_for_persistence();
        assert_eq!(doc.matches("<details>").count(), 1);
        assert!(doc.contains("<summary>Thoughts</summary>\n\nask why\n\n</details>"));
    }

    #[test]
    fn test_blank_thought_renders_no_details_block() {
        let mut recorder = TranscriptRecorder::new(header(ConversationKind::Dialogue));
        recorder
            .record(TurnRecord::new(
                0,
                Seat::PersonaA,
                "machiavelli",
                ResponseParser::parse("<think></think>Order."),
                None,
                Utc::now(),
            ))
            .unwrap();
        assert!(!recorder.render_for_persistence().contains("<details>"));
    }

    #[test]
    fn test_persistence_layout() {
        let doc = debate_recorder().render_for_persistence();
        assert!(doc.starts_with("# Debate: What is justice?\n"));
        assert!(doc.contains("- **Socrates:** `qwen2.5-coder:7b`"));
        assert!(doc.contains("<details><summary>Thoughts</summary>\n\nbe bold\n\n</details>"));
        assert!(doc.contains("> **Socrates:**\n> Is it?\n> What is power?"));
        assert!(doc.contains("## Verdict\n\n> **Judge:**\n> Socrates wins."));
        assert!(doc.contains("- **Prompt tokens:** 60"));
        assert!(doc.contains("- **Completion tokens:** 12"));
        assert!(doc.contains("- **Total:** 72"));
        assert!(!doc.contains("## Status"));

        let transcript_at = doc.find("## Transcript").unwrap();
        let verdict_at = doc.find("## Verdict").unwrap();
        assert!(transcript_at < verdict_at);
        // thoughts never leak into the quoted speech
        assert!(!doc.contains("> be bold"));
    }

    #[test]
    fn test_dialogue_has_no_verdict_section() {
        let mut recorder = TranscriptRecorder::new(header(ConversationKind::Dialogue));
        recorder
            .record(TurnRecord::new(
                0,
                Seat::PersonaA,
                "machiavelli",
                ResponseParser::parse("Opening words"),
                None,
                Utc::now(),
            ))
            .unwrap();

        let doc = recorder.render_for_persistence();
        assert!(doc.starts_with("# Dialogue: What is justice?"));
        assert!(!doc.contains("## Verdict"));
        assert!(!doc.contains("## Token usage"));
        assert!(doc.contains("_Tokens: ~2_"));
    }

    #[test]
    fn test_interrupted_status_note() {
        let recorder = TranscriptRecorder::new(header(ConversationKind::Debate))
            .with_status(RunStatus::Interrupted);
        let doc = recorder.render_for_persistence();
        assert!(doc.contains("_No turns were recorded._"));
        assert!(doc.contains("_No verdict was delivered._"));
        assert!(doc.contains("Interrupted by user after 0 turn(s)."));
    }

    #[test]
    fn test_failed_status_note() {
        let mut recorder = debate_recorder();
        recorder.set_status(RunStatus::Failed {
            turn_index: 3,
            speaker_id: "socrates".to_string(),
            reason: "connection refused".to_string(),
        });
        let doc = recorder.render_for_persistence();
        assert!(doc.contains("Failed at turn index 3 (socrates): connection refused"));
    }

    #[test]
    fn test_record_rejects_out_of_order() {
        let mut recorder = TranscriptRecorder::new(header(ConversationKind::Dialogue));
        let err = recorder
            .record(TurnRecord::new(
                2,
                Seat::PersonaA,
                "a",
                ResponseParser::parse("x"),
                None,
                Utc::now(),
            ))
            .unwrap_err();
        assert_eq!(err, TranscriptError::OutOfOrder { expected: 0, got: 2 });
    }

    #[test]
    fn test_file_name_uses_topic() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();
        assert_eq!(
            debate_recorder().file_name(date),
            "2026-01-02_what_is_justice.md"
        );
    }
}
