//! CLI entrypoint for ollama-court
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod interrupt;
mod settings;

use anyhow::{Context, Result, anyhow};
use chrono::Local;
use clap::Parser;
use court_application::{
    ConversationProgress, ModelPullProgress, NoProgress, PrepareModelsError,
    PrepareModelsUseCase, RunConversationInput, RunConversationUseCase, RunTermination,
    TranscriptSink,
};
use court_domain::TranscriptRecorder;
use court_infrastructure::{ConfigLoader, MarkdownFileSink, OllamaGateway};
use court_presentation::{Cli, ConsoleFormatter, OutputFormat, ProgressReporter, SimpleProgress};
use interrupt::EXIT_INTERRUPTED;
use settings::RunSettings;
use std::process::ExitCode;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting ollama-court");

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(ExitCode::SUCCESS);
    }

    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    config.validate().context("Invalid configuration")?;

    let settings = RunSettings::resolve(&cli, &config).context("Invalid run settings")?;
    if !settings.color {
        colored::control::set_override(false);
    }

    let plan = settings.plan().context("Invalid run settings")?;
    let output = settings.output_config(cli.output);

    if output.prints_turns() {
        println!("{}", ConsoleFormatter::banner(plan.kind(), plan.topic()));
        println!("{}", ConsoleFormatter::settings_table(&settings.table_rows()));
    }

    // Turn panels only go to stdout in full mode, so verdict and JSON
    // output stay machine-readable.
    let reporter = Arc::new(ProgressReporter::new(output));
    let simple = Arc::new(SimpleProgress::new(output));
    let (turn_progress, pull_progress): (Arc<dyn ConversationProgress>, &dyn ModelPullProgress) =
        if !output.prints_turns() {
            (Arc::new(NoProgress), &NoProgress)
        } else if cli.quiet {
            (simple.clone(), simple.as_ref())
        } else {
            (reporter.clone(), reporter.as_ref())
        };

    // === Dependency Injection ===
    let gateway = Arc::new(
        OllamaGateway::new(&settings.host, settings.timeout)
            .context("Failed to create the Ollama client")?,
    );

    let prepare = PrepareModelsUseCase::new(Arc::clone(&gateway));
    match prepare
        .execute_with_progress(&settings.models(), pull_progress)
        .await
    {
        Ok(prepared) => debug!(
            "Models ready ({} present, {} pulled)",
            prepared.present.len(),
            prepared.pulled.len()
        ),
        Err(PrepareModelsError::Unreachable(e)) => {
            eprintln!(
                "{}",
                ConsoleFormatter::error_panel(
                    "Ollama is not running",
                    &format!(
                        "Could not connect to {} ({}).\nPlease start Ollama app or run `ollama serve`.",
                        gateway.base_url(),
                        e
                    ),
                )
            );
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => {
            eprintln!("{}", ConsoleFormatter::error_panel("Model setup failed", &e.to_string()));
            return Ok(ExitCode::FAILURE);
        }
    }

    // Ctrl-C stops the run before the next turn; a second one exits
    let cancel = CancellationToken::new();
    interrupt::spawn_handler(cancel.clone(), Arc::clone(&turn_progress));

    let use_case = RunConversationUseCase::new(gateway);
    let input = RunConversationInput::new(plan).with_cancellation(cancel);
    let outcome = use_case.execute_with_progress(input, turn_progress.as_ref()).await?;

    let mut exit = match &outcome.termination {
        RunTermination::Completed => ExitCode::SUCCESS,
        RunTermination::Interrupted => ExitCode::from(EXIT_INTERRUPTED),
        RunTermination::Failed(e) => {
            warn!("{}", e);
            ExitCode::FAILURE
        }
    };
    let status = outcome.status();
    let recorder =
        TranscriptRecorder::from_transcript(outcome.header, outcome.transcript).with_status(status);

    match cli.output {
        OutputFormat::Full => print!("{}", ConsoleFormatter::run_summary(&recorder)),
        OutputFormat::Verdict => print!("{}", ConsoleFormatter::format_verdict_only(&recorder)),
        OutputFormat::Json => match ConsoleFormatter::format_json(&recorder) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!(
                    "{}",
                    ConsoleFormatter::error_panel("JSON output failed", &e.to_string())
                );
                exit = ExitCode::FAILURE;
            }
        },
    }

    if settings.save && !recorder.transcript().is_empty() {
        let sink = MarkdownFileSink::new(&settings.debates_dir);
        let file_name = recorder.file_name(Local::now().date_naive());
        match sink.persist(&file_name, &recorder.render_for_persistence()) {
            Ok(path) => {
                if output.prints_turns() {
                    println!("{}", ConsoleFormatter::saved_line(&path));
                } else {
                    eprintln!("{}", ConsoleFormatter::saved_line(&path));
                }
            }
            Err(e) => {
                eprintln!(
                    "{}",
                    ConsoleFormatter::error_panel("Error writing transcript", &e.to_string())
                );
                exit = ExitCode::FAILURE;
            }
        }
    }

    Ok(exit)
}
