//! Prompt templates for conversation runs

use crate::conversation::topology::ConversationKind;

/// Templates for the messages the host synthesizes
pub struct PromptTemplate;

impl PromptTemplate {
    /// Default system prompt for the pragmatist seat
    pub fn machiavelli_system() -> &'static str {
        r#"You are Niccolò Machiavelli, the Florentine diplomat and author of "The Prince".
You argue as a cold pragmatist: power, stability and results matter more than ideals.
Speak in the first person, stay in character, and answer your opponent directly.
Keep every reply short: a few sentences at most."#
    }

    /// Default system prompt for the questioner seat
    pub fn socrates_system() -> &'static str {
        r#"You are Socrates of Athens.
You never lecture; you test your opponent's claims with pointed questions and expose contradictions.
Speak in the first person, stay in character, and respond to what was just said.
Keep every reply short: a few sentences at most."#
    }

    /// Default system prompt for the judge seat
    pub fn judge_system() -> &'static str {
        "You are the Supreme Judge. Analyze the debate. Who won: Socrates or Machiavelli? Answer briefly and strictly in English."
    }

    /// First message of a run, sent to persona A
    pub fn opening(kind: ConversationKind, topic: &str) -> String {
        match kind {
            ConversationKind::Debate => format!(
                "Start a debate on the topic: {}. State your position briefly.",
                topic
            ),
            ConversationKind::Dialogue => format!(
                "Start a conversation on the topic: {}. Share your view briefly.",
                topic
            ),
        }
    }

    /// Sent to the pragmatist when the questioner has not spoken yet
    pub fn continuation(topic: &str) -> String {
        format!(
            "Continue the debate on the topic: {}. Develop your position further.",
            topic
        )
    }

    /// The judge's only user message: one `Name: speech` line per turn.
    pub fn judge_brief<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
        entries
            .into_iter()
            .map(|(name, speech)| format!("{}: {}", name, speech))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opening_embeds_topic() {
        let debate = PromptTemplate::opening(ConversationKind::Debate, "Justice");
        assert_eq!(
            debate,
            "Start a debate on the topic: Justice. State your position briefly."
        );
        let dialogue = PromptTemplate::opening(ConversationKind::Dialogue, "Justice");
        assert!(dialogue.contains("Justice"));
        assert_ne!(debate, dialogue);
    }

    #[test]
    fn test_continuation_embeds_topic() {
        assert!(PromptTemplate::continuation("Order").contains("Order"));
    }

    #[test]
    fn test_judge_brief_lines() {
        let brief = PromptTemplate::judge_brief([
            ("Machiavelli", "Power first."),
            ("Socrates", "Why?"),
        ]);
        assert_eq!(brief, "Machiavelli: Power first.\nSocrates: Why?");
        assert_eq!(PromptTemplate::judge_brief(std::iter::empty()), "");
    }

    #[test]
    fn test_default_system_prompts_not_empty() {
        assert!(!PromptTemplate::machiavelli_system().trim().is_empty());
        assert!(!PromptTemplate::socrates_system().trim().is_empty());
        assert!(PromptTemplate::judge_system().contains("Supreme Judge"));
    }
}
