//! Persona value objects

use crate::core::error::ConfigurationError;
use serde::{Deserialize, Serialize};

/// Sampling and context parameters sent with every generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Context window size in tokens
    pub num_ctx: u32,
    /// Maximum number of tokens to generate
    pub num_predict: u32,
    /// Sampling temperature
    pub temperature: f64,
}

impl GenerationOptions {
    pub const MIN_TEMPERATURE: f64 = 0.0;
    pub const MAX_TEMPERATURE: f64 = 2.0;

    /// Check the options on behalf of `persona`.
    pub fn validate(&self, persona: &str) -> Result<(), ConfigurationError> {
        if !(Self::MIN_TEMPERATURE..=Self::MAX_TEMPERATURE).contains(&self.temperature) {
            return Err(ConfigurationError::TemperatureOutOfRange {
                persona: persona.to_string(),
                value: self.temperature,
            });
        }
        if self.num_ctx == 0 {
            return Err(ConfigurationError::NonPositiveOption {
                persona: persona.to_string(),
                field: "num_ctx",
            });
        }
        if self.num_predict == 0 {
            return Err(ConfigurationError::NonPositiveOption {
                persona: persona.to_string(),
                field: "num_predict",
            });
        }
        Ok(())
    }
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            num_ctx: 2048,
            num_predict: 350,
            temperature: 0.8,
        }
    }
}

/// Position a persona occupies in a conversation topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seat {
    /// Opens the conversation (the pragmatist in a debate)
    PersonaA,
    /// Answers persona A (the questioner in a debate)
    PersonaB,
    /// Delivers the verdict after a debate
    Judge,
}

impl Seat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Seat::PersonaA => "persona_a",
            Seat::PersonaB => "persona_b",
            Seat::Judge => "persona_judge",
        }
    }

    /// The conversational counterpart of this seat, if any.
    pub fn opponent(&self) -> Option<Seat> {
        match self {
            Seat::PersonaA => Some(Seat::PersonaB),
            Seat::PersonaB => Some(Seat::PersonaA),
            Seat::Judge => None,
        }
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Static description of one conversation participant (Value Object)
///
/// Personas differ only in data: a Socrates and a Machiavelli are two
/// instances of this type with different prompts and models.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonaSpec {
    id: String,
    display_name: String,
    model: String,
    system_prompt: String,
    options: GenerationOptions,
}

impl PersonaSpec {
    /// Create a validated persona.
    ///
    /// An empty `display_name` falls back to the id.
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        model: impl Into<String>,
        system_prompt: impl Into<String>,
        options: GenerationOptions,
    ) -> Result<Self, ConfigurationError> {
        let id = id.into().trim().to_string();
        if id.is_empty() {
            return Err(ConfigurationError::EmptyPersonaId);
        }

        let model = model.into().trim().to_string();
        if model.is_empty() {
            return Err(ConfigurationError::EmptyModel { persona: id });
        }

        let system_prompt = system_prompt.into();
        if system_prompt.trim().is_empty() {
            return Err(ConfigurationError::EmptySystemPrompt { persona: id });
        }

        options.validate(&id)?;

        let display_name = display_name.into();
        let display_name = if display_name.trim().is_empty() {
            id.clone()
        } else {
            display_name
        };

        Ok(Self {
            id,
            display_name,
            model,
            system_prompt,
            options,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn persona(options: GenerationOptions) -> Result<PersonaSpec, ConfigurationError> {
        PersonaSpec::new(
            "socrates",
            "Socrates",
            "qwen2.5:7b",
            "You are Socrates.",
            options,
        )
    }

    #[test]
    fn test_valid_persona() {
        let p = persona(GenerationOptions::default()).unwrap();
        assert_eq!(p.id(), "socrates");
        assert_eq!(p.display_name(), "Socrates");
        assert_eq!(p.model(), "qwen2.5:7b");
        assert_eq!(p.options().num_ctx, 2048);
    }

    #[test]
    fn test_empty_system_prompt_rejected() {
        let err = PersonaSpec::new("judge", "Judge", "llama3", "   ", GenerationOptions::default())
            .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::EmptySystemPrompt {
                persona: "judge".to_string()
            }
        );
    }

    #[test]
    fn test_empty_id_and_model_rejected() {
        let err = PersonaSpec::new("", "X", "llama3", "prompt", GenerationOptions::default())
            .unwrap_err();
        assert_eq!(err, ConfigurationError::EmptyPersonaId);

        let err = PersonaSpec::new("x", "X", " ", "prompt", GenerationOptions::default())
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::EmptyModel { .. }));
    }

    #[test]
    fn test_temperature_bounds() {
        for temperature in [0.0, 1.0, 2.0] {
            let options = GenerationOptions {
                temperature,
                ..Default::default()
            };
            assert!(persona(options).is_ok(), "temperature {temperature}");
        }

        for temperature in [-0.1, 2.01, f64::NAN] {
            let options = GenerationOptions {
                temperature,
                ..Default::default()
            };
            assert!(matches!(
                persona(options),
                Err(ConfigurationError::TemperatureOutOfRange { .. })
            ));
        }
    }

    #[test]
    fn test_zero_limits_rejected() {
        let options = GenerationOptions {
            num_ctx: 0,
            ..Default::default()
        };
        assert_eq!(
            persona(options).unwrap_err(),
            ConfigurationError::NonPositiveOption {
                persona: "socrates".to_string(),
                field: "num_ctx"
            }
        );

        let options = GenerationOptions {
            num_predict: 0,
            ..Default::default()
        };
        assert!(matches!(
            persona(options),
            Err(ConfigurationError::NonPositiveOption {
                field: "num_predict",
                ..
            })
        ));
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        let p = PersonaSpec::new("judge", "", "llama3", "Decide.", GenerationOptions::default())
            .unwrap();
        assert_eq!(p.display_name(), "judge");
    }

    #[test]
    fn test_seat_names() {
        assert_eq!(Seat::PersonaA.as_str(), "persona_a");
        assert_eq!(Seat::Judge.to_string(), "persona_judge");
        assert_eq!(Seat::PersonaA.opponent(), Some(Seat::PersonaB));
        assert_eq!(Seat::Judge.opponent(), None);
    }
}
