//! CLI entrypoint for code-reviewer
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use reviewer_application::{
    ConversationLogger, LlmDraftWriter, MultiModelReviewer, NoConversationLogger, NoProgress,
    ProgressNotifier, SuperviseInput, SuperviseTaskUseCase, final_status,
};
use reviewer_domain::SupervisorOutcome;
use reviewer_infrastructure::{
    ConfigLoader, FileConfig, FileOutputFormat, JsonlConversationLogger, LocalTaskLoader,
    ResponsesGateway, RulesLoader,
};
use reviewer_presentation::{Cli, ConsoleFormatter, OutputFormat, ProgressReporter, SimpleProgress};
use std::io::IsTerminal;
use std::process::ExitCode;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Exit status when the budget ran out with violations left
const EXIT_EXHAUSTED: u8 = 2;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v when set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting code-reviewer");

    // === Configuration ===
    // `.env` feeds both the API key variable and the unprefixed model/rules names
    ConfigLoader::load_dotenv();
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?
    };
    apply_overrides(&mut config, &cli);

    if cli.show_config {
        for line in ConfigLoader::describe_sources(cli.config.as_deref()) {
            println!("{}", line);
        }
        println!();
        println!("{}", toml::to_string_pretty(&config)?);
        return Ok(ExitCode::SUCCESS);
    }

    config.validate()?;

    let format = output_format(&cli, &config);
    if !config.output.color {
        colored::control::set_override(false);
    }

    let Some(path) = cli.path.as_deref() else {
        bail!("A target file is required. See --help.");
    };
    let Some(instructions) = cli.instructions.as_deref() else {
        bail!("--instructions is required.");
    };

    // === Dependency Injection ===
    let rules = RulesLoader::new(
        config.rules.writer_rules_file.clone(),
        config.rules.reviewer_rules_file.clone(),
    );
    let loader = LocalTaskLoader::new();
    let request = loader.load(path, instructions, &cli.context)?;

    let gateway = Arc::new(ResponsesGateway::from_config(&config.provider));
    if !gateway.has_credentials() {
        warn!(
            "No API key found in {}; model calls will fail",
            config.provider.api_key_env
        );
    }

    let writer = LlmDraftWriter::new(
        gateway.clone(),
        config.models.writer_model(),
        rules.writer_rules()?,
    );

    let reviewer = MultiModelReviewer::new(gateway, rules.reviewer_rules()?)
        .with_reviewers(config.models.reviewer_models())
        .with_collator(config.models.collator_model());

    let conversation_logger: Arc<dyn ConversationLogger> =
        match cli.log_file.as_ref().or(config.logging.conversation_log.as_ref()) {
            Some(log_path) => {
                let logger = JsonlConversationLogger::open(log_path).with_context(|| {
                    format!("Failed to open conversation log {}", log_path.display())
                })?;
                info!("Conversation log: {}", logger.path().display());
                Arc::new(logger)
            }
            None => Arc::new(NoConversationLogger),
        };

    // Ctrl-C stops the run at the next transition
    let cancellation = CancellationToken::new();
    {
        let token = cancellation.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted; cancelling");
                token.cancel();
            }
        });
    }

    let use_case = SuperviseTaskUseCase::new(Arc::new(writer), Arc::new(reviewer))
        .with_conversation_logger(conversation_logger)
        .with_cancellation(cancellation);

    let input = SuperviseInput::new(request).with_params(config.supervisor.to_params());

    let progress: Box<dyn ProgressNotifier> = if cli.quiet {
        Box::new(NoProgress)
    } else if std::io::stderr().is_terminal() {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(SimpleProgress)
    };

    let result = use_case.execute_with_progress(input, progress.as_ref()).await;

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(e) => {
            if format == OutputFormat::Json {
                println!(
                    "{}",
                    ConsoleFormatter::format_error_json(final_status(&Err(e.clone())), &e.to_string())
                );
            }
            return Err(e.into());
        }
    };

    let output = match format {
        OutputFormat::Text => ConsoleFormatter::format(&outcome),
        OutputFormat::Json => ConsoleFormatter::format_json(&outcome),
    };
    println!("{}", output);

    if cli.write {
        write_if_compliant(&loader, &outcome)?;
    }

    Ok(if outcome.is_compliant() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_EXHAUSTED)
    })
}

/// Command-line flags take precedence over every config source
fn apply_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(max) = cli.max_iterations {
        config.supervisor.max_iterations = max;
    }
    if let Some(secs) = cli.timeout {
        config.supervisor.timeout_seconds = secs;
    }
    if let Some(writer) = &cli.writer_model {
        config.models.writer = writer.clone();
    }
    if !cli.reviewer_model.is_empty() {
        config.models.reviewers = cli.reviewer_model.clone();
    }
    if let Some(collator) = &cli.collator_model {
        config.models.collator = collator.clone();
    }
    if let Some(log_file) = &cli.log_file {
        config.logging.conversation_log = Some(log_file.clone());
    }
}

fn output_format(cli: &Cli, config: &FileConfig) -> OutputFormat {
    match cli.output {
        Some(format) => format,
        None => match config.output.format {
            FileOutputFormat::Text => OutputFormat::Text,
            FileOutputFormat::Json => OutputFormat::Json,
        },
    }
}

/// Persist the final draft; an exhausted draft is never written.
fn write_if_compliant(loader: &LocalTaskLoader, outcome: &SupervisorOutcome) -> Result<()> {
    if !outcome.is_compliant() {
        warn!(
            "Not writing {}: review still reports violations",
            outcome.draft().path
        );
        return Ok(());
    }
    let written = loader.persist(outcome.draft())?;
    eprintln!("Wrote {}", written.display());
    Ok(())
}
