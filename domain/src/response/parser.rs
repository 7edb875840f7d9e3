//! Splitting raw model output into visible text and thought blocks.
//!
//! Reasoning models wrap their internal deliberation in
//! `<think>...</think>` markers. [`ResponseParser`] extracts every
//! well-formed block, leaves everything else untouched, and attaches a
//! deterministic token estimate.
//!
//! # Marker policy
//!
//! | Input | `visible_text` | `thoughts` |
//! |-------|----------------|------------|
//! | `<think>plan A</think>answer` | `answer` | `["plan A"]` |
//! | `hello <think>oops` | `hello <think>oops` | `[]` |
//! | `<think>a<think>b</think>c` | `c` | `["a<think>b"]` |
//! | `a</think>b` | `a</think>b` | `[]` |
//!
//! Blocks do not nest: once inside a block, the next closing marker ends it.
//! Block contents are kept verbatim, empty blocks included; trimming is a
//! display concern.

use crate::core::error::ParseError;
use serde::{Deserialize, Serialize};

/// Marker that opens a thought block
pub const THINK_OPEN: &str = "<think>";
/// Marker that closes a thought block
pub const THINK_CLOSE: &str = "</think>";

/// A raw response split into its parts (Value Object)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedResponse {
    /// Reply text with thought blocks removed, surrounding whitespace trimmed
    pub visible_text: String,
    /// Verbatim contents of each thought block, in order of appearance
    pub thoughts: Vec<String>,
    /// Approximate token count of `visible_text` plus all thoughts
    pub token_estimate: usize,
}

impl ParsedResponse {
    pub fn has_thoughts(&self) -> bool {
        !self.thoughts.is_empty()
    }

    /// Whether any thought block has non-whitespace content.
    pub fn has_visible_thoughts(&self) -> bool {
        self.thoughts.iter().any(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Clone, Copy)]
enum ScanState {
    /// Looking for the next opening marker
    Outside,
    /// Inside a block that opened at byte offset `open_at`
    Inside { open_at: usize },
}

/// Parser for raw model responses
pub struct ResponseParser;

impl ResponseParser {
    /// Split `raw` into visible text and thought blocks.
    ///
    /// Never fails: malformed markers are kept as plain text.
    pub fn parse(raw: &str) -> ParsedResponse {
        let mut visible = String::with_capacity(raw.len());
        let mut thoughts = Vec::new();
        let mut state = ScanState::Outside;
        let mut cursor = 0;

        loop {
            match state {
                ScanState::Outside => match raw[cursor..].find(THINK_OPEN) {
                    Some(offset) => {
                        let open_at = cursor + offset;
                        visible.push_str(&raw[cursor..open_at]);
                        cursor = open_at + THINK_OPEN.len();
                        state = ScanState::Inside { open_at };
                    }
                    None => {
                        visible.push_str(&raw[cursor..]);
                        break;
                    }
                },
                ScanState::Inside { open_at } => match raw[cursor..].find(THINK_CLOSE) {
                    Some(offset) => {
                        let close_at = cursor + offset;
                        thoughts.push(raw[cursor..close_at].to_string());
                        cursor = close_at + THINK_CLOSE.len();
                        state = ScanState::Outside;
                    }
                    None => {
                        // Unterminated: the marker and the rest stay visible.
                        visible.push_str(&raw[open_at..]);
                        break;
                    }
                },
            }
        }

        let visible_text = visible.trim().to_string();
        let token_estimate = Self::estimate_tokens(&visible_text, &thoughts);

        ParsedResponse {
            visible_text,
            thoughts,
            token_estimate,
        }
    }

    /// Parse a response that arrived as bytes.
    pub fn parse_bytes(raw: &[u8]) -> Result<ParsedResponse, ParseError> {
        let text = std::str::from_utf8(raw)?;
        Ok(Self::parse(text))
    }

    /// Estimate the token count of a parsed response.
    ///
    /// This is a whitespace-delimited word count, not a tokenizer-exact
    /// figure. It is stable for identical input.
    pub fn estimate_tokens(visible_text: &str, thoughts: &[String]) -> usize {
        visible_text.split_whitespace().count()
            + thoughts
                .iter()
                .map(|t| t.split_whitespace().count())
                .sum::<usize>()
    }
}
