//! CLI command implementations.

pub mod analyze;
pub mod examples;
pub mod patterns;
pub mod script;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::cli::output::progress::{create_spinner_with_message, hidden_spinner};
use crate::cli::types::{Cli, Commands};
use crate::domain::models::{AnalysisResult, Config};
use crate::domain::ports::RandomSource;
use crate::infrastructure::random::{SeededRandom, SystemRandom};
use crate::infrastructure::registry::FilePatternSource;
use crate::services::{AnalysisOrchestrator, PatternRegistry};

/// Run the parsed command line against loaded configuration.
pub async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    let options = GlobalOptions::from_cli(&cli, &config);

    match cli.command {
        Commands::Analyze(args) => analyze::execute(args, &options, &config).await,
        Commands::Script(args) => script::execute(args, &options, &config).await,
        Commands::Patterns => patterns::execute(&options, &config).await,
        Commands::Examples => examples::execute(&options, &config).await,
    }
}

/// Flags shared by every subcommand
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Emit JSON instead of human output
    pub json: bool,
    /// Knowledge base file overriding configuration
    pub patterns: Option<PathBuf>,
    /// Seed for the random source
    pub seed: Option<u64>,
}

impl GlobalOptions {
    /// `--patterns` wins over `patterns_path` from configuration.
    pub fn from_cli(cli: &Cli, config: &Config) -> Self {
        Self {
            json: cli.json,
            patterns: cli
                .patterns
                .clone()
                .or_else(|| config.patterns_path.as_ref().map(PathBuf::from)),
            seed: cli.seed,
        }
    }
}

/// Build an orchestrator from configuration, loading an external knowledge
/// base when one is configured.
pub async fn build_orchestrator(
    config: &Config,
    options: &GlobalOptions,
) -> Result<AnalysisOrchestrator> {
    let random: Arc<dyn RandomSource> = match options.seed {
        Some(seed) => Arc::new(SeededRandom::new(seed)),
        None => Arc::new(SystemRandom::new()),
    };

    let orchestrator = AnalysisOrchestrator::from_config(config, PatternRegistry::builtin(), random);

    if let Some(ref path) = options.patterns {
        load_patterns(&orchestrator, path).await?;
    }

    Ok(orchestrator)
}

async fn load_patterns(orchestrator: &AnalysisOrchestrator, path: &Path) -> Result<()> {
    let source = FilePatternSource::new(path);
    let count = orchestrator
        .reload_registry(&source)
        .await
        .with_context(|| format!("Failed to load patterns from {}", path.display()))?;
    info!(path = %path.display(), count, "loaded knowledge base");
    Ok(())
}

/// Run one analysis behind a spinner. Ctrl-C cancels it.
pub async fn run_analysis(
    orchestrator: &AnalysisOrchestrator,
    url: &str,
    json: bool,
) -> Result<AnalysisResult> {
    let spinner = if json {
        hidden_spinner()
    } else {
        create_spinner_with_message(format!("Analyzing {url}"))
    };

    let token = CancellationToken::new();
    let interrupt = {
        let token = token.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("interrupted, cancelling analysis");
                token.cancel();
            }
        })
    };

    let outcome = orchestrator.analyze_with_cancellation(url, &token).await;
    interrupt.abort();
    spinner.finish_and_clear();

    outcome.with_context(|| format!("Analysis of {url} failed"))
}
