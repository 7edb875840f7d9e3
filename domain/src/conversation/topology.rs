//! Conversation topologies and run plans

use crate::core::error::ConfigurationError;
use crate::persona::spec::{PersonaSpec, Seat};
use crate::transcript::recorder::{Participant, RunHeader};
use serde::{Deserialize, Serialize};

/// Which turn-sequencing procedure a run follows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationKind {
    /// Two personas alternate replies
    Dialogue,
    /// Two personas debate, then a judge delivers a verdict
    #[default]
    Debate,
}

impl ConversationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConversationKind::Dialogue => "dialogue",
            ConversationKind::Debate => "debate",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ConversationKind::Dialogue => "Dialogue",
            ConversationKind::Debate => "Debate",
        }
    }
}

impl std::fmt::Display for ConversationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ConversationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dialogue" => Ok(ConversationKind::Dialogue),
            "debate" => Ok(ConversationKind::Debate),
            other => Err(format!(
                "unknown conversation mode `{other}` (expected `dialogue` or `debate`)"
            )),
        }
    }
}

/// Who takes part in a run, by seat
#[derive(Debug, Clone, PartialEq)]
pub enum Topology {
    /// Persona A and persona B alternate
    Dialogue { a: PersonaSpec, b: PersonaSpec },
    /// The pragmatist opens, the questioner answers, the judge decides
    Debate {
        pragmatist: PersonaSpec,
        questioner: PersonaSpec,
        judge: PersonaSpec,
    },
}

impl Topology {
    pub fn kind(&self) -> ConversationKind {
        match self {
            Topology::Dialogue { .. } => ConversationKind::Dialogue,
            Topology::Debate { .. } => ConversationKind::Debate,
        }
    }

    /// The persona seated at `seat`, if the topology has that seat.
    pub fn persona(&self, seat: Seat) -> Option<&PersonaSpec> {
        match (self, seat) {
            (Topology::Dialogue { a, .. }, Seat::PersonaA) => Some(a),
            (Topology::Dialogue { b, .. }, Seat::PersonaB) => Some(b),
            (Topology::Dialogue { .. }, Seat::Judge) => None,
            (Topology::Debate { pragmatist, .. }, Seat::PersonaA) => Some(pragmatist),
            (Topology::Debate { questioner, .. }, Seat::PersonaB) => Some(questioner),
            (Topology::Debate { judge, .. }, Seat::Judge) => Some(judge),
        }
    }

    /// Seated personas in seat order.
    pub fn participants(&self) -> Vec<(Seat, &PersonaSpec)> {
        [Seat::PersonaA, Seat::PersonaB, Seat::Judge]
            .into_iter()
            .filter_map(|seat| self.persona(seat).map(|p| (seat, p)))
            .collect()
    }

    /// Number of inference calls a completed run makes.
    pub fn planned_turns(&self, rounds: usize) -> usize {
        match self {
            Topology::Dialogue { .. } => 1 + rounds,
            Topology::Debate { .. } => 1 + 2 * rounds + 1,
        }
    }
}

/// Everything one run needs, fixed at construction (Entity)
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationPlan {
    topic: String,
    rounds: usize,
    topology: Topology,
}

impl ConversationPlan {
    pub fn new(
        topic: impl Into<String>,
        rounds: usize,
        topology: Topology,
    ) -> Result<Self, ConfigurationError> {
        let topic = topic.into().trim().to_string();
        if topic.is_empty() {
            return Err(ConfigurationError::EmptyTopic);
        }

        let participants = topology.participants();
        for (i, (_, persona)) in participants.iter().enumerate() {
            if participants[..i].iter().any(|(_, p)| p.id() == persona.id()) {
                return Err(ConfigurationError::DuplicatePersona(persona.id().to_string()));
            }
        }

        Ok(Self {
            topic,
            rounds,
            topology,
        })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn rounds(&self) -> usize {
        self.rounds
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn kind(&self) -> ConversationKind {
        self.topology.kind()
    }

    pub fn planned_turns(&self) -> usize {
        self.topology.planned_turns(self.rounds)
    }

    /// Header used when rendering this run's transcript.
    pub fn header(&self) -> RunHeader {
        RunHeader {
            kind: self.kind(),
            topic: self.topic.clone(),
            participants: self
                .topology
                .participants()
                .into_iter()
                .map(|(seat, p)| Participant {
                    seat,
                    id: p.id().to_string(),
                    display_name: p.display_name().to_string(),
                    model: p.model().to_string(),
                })
                .collect(),
        }
    }
}
