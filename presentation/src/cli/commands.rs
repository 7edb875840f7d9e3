//! CLI command definitions

use clap::{Parser, ValueEnum};
use court_domain::ConversationKind;
use std::path::PathBuf;

/// Output format for a finished run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Every turn as it happens, then the summary
    #[default]
    Full,
    /// Only the verdict (or the last turn of a dialogue)
    Verdict,
    /// The whole transcript as JSON
    Json,
}

/// Conversation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Two personas debate, then a judge rules
    Debate,
    /// Two personas talk, no judge
    Dialogue,
}

impl From<ModeArg> for ConversationKind {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Debate => ConversationKind::Debate,
            ModeArg::Dialogue => ConversationKind::Dialogue,
        }
    }
}

/// CLI arguments for ollama-court
#[derive(Parser, Debug)]
#[command(name = "ollama-court")]
#[command(author, version, about = "Historical court - Socrates and Machiavelli debate on local Ollama models")]
#[command(long_about = r#"
Ollama Court runs a debate between two historical personas served by local
Ollama models, then asks a judge model for a verdict.

The process:
1. Machiavelli opens on the topic
2. Each round, Machiavelli speaks and Socrates answers
3. The judge reads the whole transcript and names a winner

With --mode dialogue the two personas simply alternate, without a judge.
Transcripts are saved as Markdown into the debates directory.

Configuration files are loaded from (in priority order):
1. COURT_* environment variables
2. --config <path>     Explicit config file
3. ./court.toml, ./.court.toml or ./config.yaml
4. ~/.config/ollama-court/config.toml   Global config

Example:
  ollama-court --topic "Is a feared ruler safer than a loved one?"
  ollama-court --rounds 3 --model-m llama3:latest --judge llama3.2:latest
  ollama-court --mode dialogue --topic "What is virtue?"
"#)]
pub struct Cli {
    /// Topic of the conversation
    #[arg(short, long)]
    pub topic: Option<String>,

    /// Number of rounds
    #[arg(short, long)]
    pub rounds: Option<usize>,

    /// Model for Machiavelli
    #[arg(long = "model-m", visible_alias = "model_m", value_name = "MODEL")]
    pub model_m: Option<String>,

    /// Model for Socrates
    #[arg(long = "model-s", visible_alias = "model_s", value_name = "MODEL")]
    pub model_s: Option<String>,

    /// Model for the judge
    #[arg(long, value_name = "MODEL")]
    pub judge: Option<String>,

    /// Conversation mode
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Directory transcripts are saved to
    #[arg(long, visible_alias = "debates-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Context window size in tokens
    #[arg(long)]
    pub num_ctx: Option<u32>,

    /// Maximum tokens generated per turn
    #[arg(long)]
    pub num_predict: Option<u32>,

    /// Sampling temperature (0.0 - 2.0)
    #[arg(long)]
    pub temperature: Option<f64>,

    /// Ollama server URL
    #[arg(long, value_name = "URL")]
    pub host: Option<String>,

    /// Timeout in seconds for one inference call
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Do not save the transcript
    #[arg(long)]
    pub no_save: bool,

    /// Do not show thought previews
    #[arg(long)]
    pub hide_thoughts: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "full")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["ollama-court"]).unwrap();
        assert!(cli.topic.is_none());
        assert!(cli.rounds.is_none());
        assert!(cli.mode.is_none());
        assert_eq!(cli.output, OutputFormat::Full);
        assert_eq!(cli.verbose, 0);
        assert!(!cli.no_save);
    }

    #[test]
    fn test_original_flag_spellings() {
        let cli = Cli::try_parse_from([
            "ollama-court",
            "--topic",
            "Virtue",
            "--rounds",
            "3",
            "--model_m",
            "llama3:latest",
            "--model_s",
            "qwen2.5-coder:7b",
            "--judge",
            "llama3.2:latest",
        ])
        .unwrap();
        assert_eq!(cli.topic.as_deref(), Some("Virtue"));
        assert_eq!(cli.rounds, Some(3));
        assert_eq!(cli.model_m.as_deref(), Some("llama3:latest"));
        assert_eq!(cli.model_s.as_deref(), Some("qwen2.5-coder:7b"));
        assert_eq!(cli.judge.as_deref(), Some("llama3.2:latest"));
    }

    #[test]
    fn test_mode_and_verbosity() {
        let cli =
            Cli::try_parse_from(["ollama-court", "--mode", "dialogue", "-vv", "-o", "json"])
                .unwrap();
        assert_eq!(cli.mode.map(ConversationKind::from), Some(ConversationKind::Dialogue));
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.output, OutputFormat::Json);
    }

    #[test]
    fn test_rejects_negative_rounds() {
        assert!(Cli::try_parse_from(["ollama-court", "--rounds", "-1"]).is_err());
    }
}
