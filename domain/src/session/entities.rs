//! Session domain entities

use crate::persona::spec::{PersonaSpec, Seat};
use serde::{Deserialize, Serialize};

/// Author of a message in a persona's history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// The persona's fixed character prompt
    System,
    /// The run itself: opening instructions, nudges, the judge's brief
    Host,
    /// A persona seated in the conversation
    Speaker(Seat),
}

/// Role understood by chat-style inference APIs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireRole {
    System,
    User,
    Assistant,
}

impl WireRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            WireRole::System => "system",
            WireRole::User => "user",
            WireRole::Assistant => "assistant",
        }
    }
}

/// A message in a persona's conversational context (Entity)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn host(content: impl Into<String>) -> Self {
        Self {
            role: Role::Host,
            content: content.into(),
        }
    }

    pub fn from_seat(seat: Seat, content: impl Into<String>) -> Self {
        Self {
            role: Role::Speaker(seat),
            content: content.into(),
        }
    }

    /// How this message reads from the point of view of `viewer`.
    ///
    /// A persona's own turns are `assistant`; everything said to it is `user`.
    pub fn wire_role(&self, viewer: Seat) -> WireRole {
        match self.role {
            Role::System => WireRole::System,
            Role::Speaker(seat) if seat == viewer => WireRole::Assistant,
            Role::Speaker(_) | Role::Host => WireRole::User,
        }
    }
}

/// A message as sent over the wire to the inference API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: WireRole,
    pub content: String,
}

/// One persona's rolling conversation context (Entity)
///
/// The first message is always the persona's system prompt; history only
/// grows by appending.
#[derive(Debug, Clone)]
pub struct PersonaSession {
    seat: Seat,
    persona: PersonaSpec,
    messages: Vec<Message>,
}

impl PersonaSession {
    pub fn new(seat: Seat, persona: PersonaSpec) -> Self {
        let messages = vec![Message::system(persona.system_prompt())];
        Self {
            seat,
            persona,
            messages,
        }
    }

    pub fn seat(&self) -> Seat {
        self.seat
    }

    pub fn persona(&self) -> &PersonaSpec {
        &self.persona
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Append a message addressed to this persona.
    pub fn add_incoming(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Append this persona's own (already parsed) reply.
    pub fn add_own_reply(&mut self, content: impl Into<String>) {
        self.messages.push(Message::from_seat(self.seat, content));
    }

    /// Render the history as chat messages from this persona's viewpoint.
    pub fn chat_messages(&self) -> Vec<ChatMessage> {
        self.messages
            .iter()
            .map(|m| ChatMessage {
                role: m.wire_role(self.seat),
                content: m.content.clone(),
            })
            .collect()
    }
}
