//! Run settings: CLI flags layered over the loaded configuration

use court_domain::{
    ConfigurationError, ConversationKind, ConversationPlan, GenerationOptions, PersonaSpec,
    PromptTemplate, Topology,
};
use court_infrastructure::{ConfigValidationError, FileConfig, FilePromptsConfig};
use court_presentation::{Cli, OutputConfig, OutputFormat};
use std::path::PathBuf;
use std::time::Duration;

/// Topic used when neither the command line nor the config names one
pub const DEFAULT_TOPIC: &str = "What is better for society: total state control or complete anarchy and absence of vertical power structure";

/// Everything the binary needs for one run, after merging all sources
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub topic: String,
    pub rounds: usize,
    pub mode: ConversationKind,
    pub machiavelli_model: String,
    pub socrates_model: String,
    pub judge_model: String,
    pub options: GenerationOptions,
    pub prompts: FilePromptsConfig,
    pub debates_dir: PathBuf,
    pub host: String,
    pub timeout: Duration,
    pub save: bool,
    pub show_thoughts: bool,
    pub color: bool,
}

impl RunSettings {
    /// Resolve each field from the CLI first, then the config.
    ///
    /// Boolean switches can only turn a configured feature off.
    pub fn resolve(cli: &Cli, config: &FileConfig) -> Result<Self, ConfigValidationError> {
        let file_options = config.settings.generation_options();
        let options = GenerationOptions {
            num_ctx: cli.num_ctx.unwrap_or(file_options.num_ctx),
            num_predict: cli.num_predict.unwrap_or(file_options.num_predict),
            temperature: cli.temperature.unwrap_or(file_options.temperature),
        };

        let timeout_seconds = cli.timeout.unwrap_or(config.ollama.timeout_seconds);
        if timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        let host = cli.host.clone().unwrap_or_else(|| config.ollama.host.clone());
        if host.trim().is_empty() {
            return Err(ConfigValidationError::EmptyHost);
        }

        let debates_dir = cli
            .output_dir
            .clone()
            .unwrap_or_else(|| config.settings.debates_dir.clone());
        if debates_dir.as_os_str().is_empty() {
            return Err(ConfigValidationError::EmptyDebatesDir);
        }

        Ok(Self {
            topic: cli
                .topic
                .clone()
                .or_else(|| config.settings.topic.clone())
                .unwrap_or_else(|| DEFAULT_TOPIC.to_string()),
            rounds: cli.rounds.unwrap_or(config.settings.default_rounds),
            mode: cli.mode.map(Into::into).unwrap_or(config.settings.mode),
            machiavelli_model: pick(&cli.model_m, &config.models.machiavelli),
            socrates_model: pick(&cli.model_s, &config.models.socrates),
            judge_model: pick(&cli.judge, &config.models.judge),
            options,
            prompts: config.prompts.clone(),
            debates_dir,
            host,
            timeout: Duration::from_secs(timeout_seconds),
            save: !cli.no_save && config.output.save,
            show_thoughts: !cli.hide_thoughts && config.output.show_thoughts,
            color: !cli.no_color && config.output.color,
        })
    }

    pub fn output_config(&self, format: OutputFormat) -> OutputConfig {
        OutputConfig {
            format,
            color: self.color,
            show_thoughts: self.show_thoughts,
        }
    }

    /// Models the run will call; the judge only takes part in a debate.
    pub fn models(&self) -> Vec<String> {
        let mut models = vec![self.machiavelli_model.clone(), self.socrates_model.clone()];
        if self.mode == ConversationKind::Debate {
            models.push(self.judge_model.clone());
        }
        models
    }

    pub fn plan(&self) -> Result<ConversationPlan, ConfigurationError> {
        let machiavelli = self.persona(
            "machiavelli",
            "Machiavelli",
            &self.machiavelli_model,
            self.prompts.machiavelli.as_deref(),
            PromptTemplate::machiavelli_system(),
        )?;
        let socrates = self.persona(
            "socrates",
            "Socrates",
            &self.socrates_model,
            self.prompts.socrates.as_deref(),
            PromptTemplate::socrates_system(),
        )?;

        let topology = match self.mode {
            ConversationKind::Dialogue => Topology::Dialogue {
                a: machiavelli,
                b: socrates,
            },
            ConversationKind::Debate => Topology::Debate {
                pragmatist: machiavelli,
                questioner: socrates,
                judge: self.persona(
                    "judge",
                    "Judge",
                    &self.judge_model,
                    self.prompts.judge.as_deref(),
                    PromptTemplate::judge_system(),
                )?,
            },
        };

        ConversationPlan::new(&self.topic, self.rounds, topology)
    }

    /// Rows for the settings table printed before a run
    pub fn table_rows(&self) -> Vec<(&'static str, String)> {
        let mut rows = vec![
            ("Topic", self.topic.clone()),
            ("Mode", self.mode.title().to_string()),
            ("Rounds", self.rounds.to_string()),
            ("Machiavelli (model)", self.machiavelli_model.clone()),
            ("Socrates (model)", self.socrates_model.clone()),
        ];
        if self.mode == ConversationKind::Debate {
            rows.push(("Judge (model)", self.judge_model.clone()));
        }
        rows.push(("Host", self.host.clone()));
        rows
    }

    fn persona(
        &self,
        id: &str,
        display_name: &str,
        model: &str,
        prompt: Option<&str>,
        fallback: &str,
    ) -> Result<PersonaSpec, ConfigurationError> {
        PersonaSpec::new(
            id,
            display_name,
            model,
            prompt.unwrap_or(fallback),
            self.options.clone(),
        )
    }
}

fn pick(flag: &Option<String>, configured: &str) -> String {
    flag.clone().unwrap_or_else(|| configured.to_string())
}
