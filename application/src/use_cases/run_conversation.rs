//! Run Conversation use case
//!
//! Drives a dialogue or debate turn by turn. Each turn builds the speaking
//! persona's payload from its rolling history, calls the gateway, parses
//! the reply and appends the record to the transcript. Only visible text
//! is fed back into any history; thought blocks stay in the transcript.

use crate::ports::llm_gateway::{GatewayError, GenerationRequest, LlmGateway};
use crate::ports::progress::{ConversationProgress, NoProgress};
use chrono::Utc;
use court_domain::{
    ConversationPlan, DisplayBlock, Message, PersonaSession, PromptTemplate, ResponseParser,
    RunHeader, RunStatus, Seat, Transcript, TurnState,
};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// A turn's inference call failed; the run stops at that turn
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Turn index {turn_index} ({speaker_id}) failed: {source}")]
pub struct GenerationError {
    pub turn_index: usize,
    pub speaker_id: String,
    #[source]
    pub source: GatewayError,
}

/// Errors that prevent a run from being driven at all
#[derive(Error, Debug)]
pub enum RunConversationError {
    #[error("No persona is seated at {0}")]
    MissingPersona(Seat),
}

/// Input for the RunConversation use case
#[derive(Debug, Clone)]
pub struct RunConversationInput {
    pub plan: ConversationPlan,
    /// Checked before every turn; an in-flight call is never aborted
    pub cancel: CancellationToken,
}

impl RunConversationInput {
    pub fn new(plan: ConversationPlan) -> Self {
        Self {
            plan,
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }
}

/// Why a run stopped
#[derive(Debug, Clone, PartialEq)]
pub enum RunTermination {
    Completed,
    Interrupted,
    Failed(GenerationError),
}

/// Transcript of a run plus how it ended
///
/// A failed or interrupted run still carries every turn recorded before
/// the stop.
#[derive(Debug, Clone)]
pub struct ConversationOutcome {
    pub header: RunHeader,
    pub transcript: Transcript,
    pub termination: RunTermination,
}

impl ConversationOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self.termination, RunTermination::Completed)
    }

    pub fn status(&self) -> RunStatus {
        match &self.termination {
            RunTermination::Completed => RunStatus::Completed,
            RunTermination::Interrupted => RunStatus::Interrupted,
            RunTermination::Failed(e) => RunStatus::Failed {
                turn_index: e.turn_index,
                speaker_id: e.speaker_id.clone(),
                reason: e.source.to_string(),
            },
        }
    }
}

/// Use case for running a dialogue or debate
pub struct RunConversationUseCase<G: LlmGateway + 'static> {
    gateway: Arc<G>,
}

impl<G: LlmGateway + 'static> RunConversationUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        input: RunConversationInput,
    ) -> Result<ConversationOutcome, RunConversationError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunConversationInput,
        progress: &dyn ConversationProgress,
    ) -> Result<ConversationOutcome, RunConversationError> {
        let plan = &input.plan;
        let kind = plan.kind();
        let rounds = plan.rounds();
        let header = plan.header();

        let mut sessions: HashMap<Seat, PersonaSession> = plan
            .topology()
            .participants()
            .into_iter()
            .map(|(seat, persona)| (seat, PersonaSession::new(seat, persona.clone())))
            .collect();
        let mut transcript = Transcript::new();

        info!(
            "Starting {} on {:?}: {} rounds, {} planned turns",
            kind,
            plan.topic(),
            rounds,
            plan.planned_turns()
        );

        let mut state = TurnState::NotStarted.advance(kind, rounds);
        while let Some(seat) = state.seat() {
            if input.cancel.is_cancelled() {
                info!("Run interrupted after {} turns", transcript.len());
                progress.on_interrupted(transcript.len());
                return Ok(ConversationOutcome {
                    header,
                    transcript,
                    termination: RunTermination::Interrupted,
                });
            }

            let incoming = incoming_message(state, plan, &header, &transcript);
            let session = sessions
                .get_mut(&seat)
                .ok_or(RunConversationError::MissingPersona(seat))?;
            session.add_incoming(incoming);

            let persona = session.persona().clone();
            let turn_index = transcript.next_turn_index();
            progress.on_turn_start(turn_index, seat, &persona);

            let request = GenerationRequest {
                model: persona.model().to_string(),
                messages: session.chat_messages(),
                options: persona.options().clone(),
            };
            debug!(
                "Turn {} ({}): sending {} messages to {}",
                turn_index,
                persona.id(),
                request.messages.len(),
                request.model
            );

            let generation = match self.gateway.generate(request).await {
                Ok(generation) => generation,
                Err(source) => {
                    warn!("Turn {} ({}) failed: {}", turn_index, persona.id(), source);
                    progress.on_turn_failed(turn_index, &persona, &source.to_string());
                    return Ok(ConversationOutcome {
                        header,
                        transcript,
                        termination: RunTermination::Failed(GenerationError {
                            turn_index,
                            speaker_id: persona.id().to_string(),
                            source,
                        }),
                    });
                }
            };

            let parsed = ResponseParser::parse(&generation.content);
            session.add_own_reply(parsed.visible_text.clone());

            let record =
                transcript.record_turn(seat, persona.id(), parsed, generation.usage, Utc::now());
            info!(
                "Turn {} ({}) complete: ~{} tokens, {} thought block(s)",
                turn_index,
                persona.id(),
                record.token_count,
                record.thoughts.len()
            );
            progress.on_turn_complete(&DisplayBlock::from_record(
                record,
                persona.display_name(),
            ));

            state = state.advance(kind, rounds);
        }

        Ok(ConversationOutcome {
            header,
            transcript,
            termination: RunTermination::Completed,
        })
    }
}

/// The message the speaker of `state` answers.
fn incoming_message(
    state: TurnState,
    plan: &ConversationPlan,
    header: &RunHeader,
    transcript: &Transcript,
) -> Message {
    match state {
        TurnState::Opening => Message::host(PromptTemplate::opening(plan.kind(), plan.topic())),
        TurnState::Judging => {
            let brief = PromptTemplate::judge_brief(
                transcript
                    .turns()
                    .iter()
                    .filter(|t| !t.is_verdict())
                    .map(|t| {
                        (
                            header.speaker_name(t.seat, &t.speaker_id),
                            t.visible_text.as_str(),
                        )
                    }),
            );
            Message::host(brief)
        }
        TurnState::RoundA { .. } | TurnState::RoundB { .. } => {
            let latest = state
                .seat()
                .and_then(|seat| seat.opponent())
                .and_then(|opponent| transcript.latest_from(opponent));
            match latest {
                Some(record) => Message::from_seat(record.seat, record.visible_text.clone()),
                None => Message::host(PromptTemplate::continuation(plan.topic())),
            }
        }
        TurnState::NotStarted | TurnState::Done => {
            Message::host(PromptTemplate::continuation(plan.topic()))
        }
    }
}
