//! Turn-sequencing state machine.
//!
//! ```text
//! NotStarted -> Opening -> {RoundA(r), RoundB(r)}* -> (Judging) -> Done
//! ```
//!
//! Every state except `NotStarted` and `Done` is exactly one inference call.
//!
//! - **Debate**: each round is the pragmatist (`RoundA`) followed by the
//!   questioner (`RoundB`); `Judging` follows the last round.
//! - **Dialogue**: each round is a single reply, alternating `RoundB`,
//!   `RoundA`, `RoundB`, ... after the opening; there is no judge.

use crate::conversation::topology::ConversationKind;
use crate::persona::spec::Seat;

/// Position of a run in its turn sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    NotStarted,
    /// Persona A answers the synthesized opening line
    Opening,
    /// Persona A speaks in round `round` (1-based)
    RoundA { round: usize },
    /// Persona B speaks in round `round` (1-based)
    RoundB { round: usize },
    /// The judge reads the whole transcript
    Judging,
    Done,
}

impl TurnState {
    /// Seat that speaks in this state, `None` for states without a call.
    pub fn seat(&self) -> Option<Seat> {
        match self {
            TurnState::Opening | TurnState::RoundA { .. } => Some(Seat::PersonaA),
            TurnState::RoundB { .. } => Some(Seat::PersonaB),
            TurnState::Judging => Some(Seat::Judge),
            TurnState::NotStarted | TurnState::Done => None,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, TurnState::Done)
    }

    /// The state that follows this one.
    pub fn advance(self, kind: ConversationKind, rounds: usize) -> TurnState {
        match kind {
            ConversationKind::Debate => self.advance_debate(rounds),
            ConversationKind::Dialogue => self.advance_dialogue(rounds),
        }
    }

    fn advance_debate(self, rounds: usize) -> TurnState {
        match self {
            TurnState::NotStarted => TurnState::Opening,
            TurnState::Opening if rounds == 0 => TurnState::Judging,
            TurnState::Opening => TurnState::RoundA { round: 1 },
            TurnState::RoundA { round } => TurnState::RoundB { round },
            TurnState::RoundB { round } if round < rounds => TurnState::RoundA { round: round + 1 },
            TurnState::RoundB { .. } => TurnState::Judging,
            TurnState::Judging | TurnState::Done => TurnState::Done,
        }
    }

    fn advance_dialogue(self, rounds: usize) -> TurnState {
        let reply = |round: usize| {
            if round > rounds {
                TurnState::Done
            } else if round % 2 == 1 {
                TurnState::RoundB { round }
            } else {
                TurnState::RoundA { round }
            }
        };

        match self {
            TurnState::NotStarted => TurnState::Opening,
            TurnState::Opening => reply(1),
            TurnState::RoundA { round } | TurnState::RoundB { round } => reply(round + 1),
            TurnState::Judging | TurnState::Done => TurnState::Done,
        }
    }

    /// Every calling state a run of `kind` passes through, in order.
    pub fn schedule(kind: ConversationKind, rounds: usize) -> Vec<TurnState> {
        let mut states = Vec::new();
        let mut state = TurnState::NotStarted.advance(kind, rounds);
        while !state.is_done() {
            states.push(state);
            state = state.advance(kind, rounds);
        }
        states
    }
}
