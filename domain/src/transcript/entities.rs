//! Transcript entities - the ordered record of one run's turns.

use crate::core::error::TranscriptError;
use crate::persona::spec::Seat;
use crate::response::parser::ParsedResponse;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Token counts reported by the inference API for one call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
}

impl TokenUsage {
    pub fn new(prompt_tokens: u64, completion_tokens: u64) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
        }
    }

    pub fn total(&self) -> u64 {
        self.prompt_tokens + self.completion_tokens
    }
}

impl std::ops::Add for TokenUsage {
    type Output = TokenUsage;

    fn add(self, rhs: TokenUsage) -> TokenUsage {
        TokenUsage {
            prompt_tokens: self.prompt_tokens + rhs.prompt_tokens,
            completion_tokens: self.completion_tokens + rhs.completion_tokens,
        }
    }
}

/// One completed turn (Value Object)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// Zero-based position in the transcript
    pub turn_index: usize,
    /// Seat the speaker occupies
    pub seat: Seat,
    /// Id of the persona that spoke
    pub speaker_id: String,
    /// Reply with thought blocks removed
    pub visible_text: String,
    /// Extracted thought blocks, possibly empty
    pub thoughts: Vec<String>,
    /// Local token estimate (see [`ResponseParser::estimate_tokens`](crate::ResponseParser::estimate_tokens))
    pub token_count: usize,
    /// Counts reported by the inference API, when available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
    pub timestamp: DateTime<Utc>,
}

impl TurnRecord {
    pub fn new(
        turn_index: usize,
        seat: Seat,
        speaker_id: impl Into<String>,
        parsed: ParsedResponse,
        usage: Option<TokenUsage>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            turn_index,
            seat,
            speaker_id: speaker_id.into(),
            visible_text: parsed.visible_text,
            thoughts: parsed.thoughts,
            token_count: parsed.token_estimate,
            usage,
            timestamp,
        }
    }

    pub fn is_verdict(&self) -> bool {
        self.seat == Seat::Judge
    }
}

/// Ordered, append-only sequence of turns for a single run (Entity)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    turns: Vec<TurnRecord>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index the next appended turn must carry.
    pub fn next_turn_index(&self) -> usize {
        self.turns.len()
    }

    /// Append an externally built record.
    pub fn push(&mut self, record: TurnRecord) -> Result<(), TranscriptError> {
        let expected = self.next_turn_index();
        if record.turn_index != expected {
            return Err(TranscriptError::OutOfOrder {
                expected,
                got: record.turn_index,
            });
        }
        self.turns.push(record);
        Ok(())
    }

    /// Build and append the next turn, assigning its index.
    pub fn record_turn(
        &mut self,
        seat: Seat,
        speaker_id: &str,
        parsed: ParsedResponse,
        usage: Option<TokenUsage>,
        timestamp: DateTime<Utc>,
    ) -> &TurnRecord {
        let index = self.next_turn_index();
        self.turns
            .push(TurnRecord::new(index, seat, speaker_id, parsed, usage, timestamp));
        &self.turns[index]
    }

    pub fn turns(&self) -> &[TurnRecord] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&TurnRecord> {
        self.turns.last()
    }

    /// Most recent turn spoken from `seat`.
    pub fn latest_from(&self, seat: Seat) -> Option<&TurnRecord> {
        self.turns.iter().rev().find(|t| t.seat == seat)
    }

    /// The judge's record, if one was produced.
    pub fn verdict(&self) -> Option<&TurnRecord> {
        self.turns.iter().rev().find(|t| t.is_verdict())
    }

    /// Sum of provider-reported usage; `None` when no turn reported any.
    pub fn total_usage(&self) -> Option<TokenUsage> {
        self.turns
            .iter()
            .filter_map(|t| t.usage)
            .reduce(|acc, usage| acc + usage)
    }

    /// Sum of local token estimates.
    pub fn estimated_tokens(&self) -> usize {
        self.turns.iter().map(|t| t.token_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::parser::ResponseParser;

    fn record(index: usize, seat: Seat, text: &str) -> TurnRecord {
        TurnRecord::new(
            index,
            seat,
            seat.as_str(),
            ResponseParser::parse(text),
            None,
            Utc::now(),
        )
    }

    #[test]
    fn test_push_in_order() {
        let mut transcript = Transcript::new();
        transcript.push(record(0, Seat::PersonaA, "one")).unwrap();
        transcript.push(record(1, Seat::PersonaB, "two")).unwrap();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.next_turn_index(), 2);
    }

    #[test]
    fn test_push_out_of_order_rejected() {
        let mut transcript = Transcript::new();
        let err = transcript.push(record(1, Seat::PersonaA, "skip")).unwrap_err();
        assert_eq!(err, TranscriptError::OutOfOrder { expected: 0, got: 1 });
        assert!(transcript.is_empty());
    }

    #[test]
    fn test_record_turn_assigns_indices() {
        let mut transcript = Transcript::new();
        let first = transcript
            .record_turn(Seat::PersonaA, "a", ResponseParser::parse("hi"), None, Utc::now())
            .turn_index;
        let second = transcript
            .record_turn(Seat::PersonaB, "b", ResponseParser::parse("yo"), None, Utc::now())
            .turn_index;
        assert_eq!((first, second), (0, 1));
    }

    #[test]
    fn test_latest_from_and_verdict() {
        let mut transcript = Transcript::new();
        transcript.push(record(0, Seat::PersonaA, "a0")).unwrap();
        transcript.push(record(1, Seat::PersonaB, "b1")).unwrap();
        transcript.push(record(2, Seat::PersonaA, "a2")).unwrap();
        assert_eq!(
            transcript.latest_from(Seat::PersonaA).unwrap().visible_text,
            "a2"
        );
        assert!(transcript.verdict().is_none());

        transcript.push(record(3, Seat::Judge, "A wins")).unwrap();
        assert_eq!(transcript.verdict().unwrap().turn_index, 3);
    }

    #[test]
    fn test_total_usage() {
        let mut transcript = Transcript::new();
        assert_eq!(transcript.total_usage(), None);

        transcript.record_turn(
            Seat::PersonaA,
            "a",
            ResponseParser::parse("x"),
            Some(TokenUsage::new(100, 25)),
            Utc::now(),
        );
        transcript.record_turn(Seat::PersonaB, "b", ResponseParser::parse("y"), None, Utc::now());
        transcript.record_turn(
            Seat::PersonaA,
            "a",
            ResponseParser::parse("z"),
            Some(TokenUsage::new(42, 15)),
            Utc::now(),
        );

        let total = transcript.total_usage().unwrap();
        assert_eq!(total, TokenUsage::new(142, 40));
        assert_eq!(total.total(), 182);
        assert_eq!(transcript.estimated_tokens(), 3);
    }
}
