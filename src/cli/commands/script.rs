//! `script` command.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use super::{build_orchestrator, run_analysis, GlobalOptions};
use crate::cli::display::{action_success, output, CommandOutput};
use crate::domain::models::{AnalysisResult, Config};
use crate::services::CodeSynthesizer;

/// `--output` value that picks the suggested file name
pub const AUTO_OUTPUT: &str = "auto";

/// Arguments for `loginprobe script`
#[derive(Args, Debug)]
pub struct ScriptArgs {
    /// Login page URL
    pub url: String,

    /// Write the script to this path ("auto" uses automation-<host>.js)
    #[arg(short, long)]
    pub output: Option<String>,
}

/// Result of script generation
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptOutput {
    /// Analyzed URL
    pub url: String,
    /// Resolved domain
    pub domain: String,
    /// Overall confidence of the analysis
    pub confidence: f64,
    /// Suggested file name derived from the domain
    pub file_name: String,
    /// Where the script was written, if anywhere
    #[serde(skip_serializing_if = "Option::is_none")]
    pub written_to: Option<PathBuf>,
    /// Generated Playwright source
    pub script: String,
}

impl ScriptOutput {
    /// Render the script for an analysis result
    pub fn new(result: &AnalysisResult, written_to: Option<PathBuf>) -> Self {
        let synthesizer = CodeSynthesizer::new();
        Self {
            url: result.url.clone(),
            domain: result.domain.clone(),
            confidence: result.confidence,
            file_name: synthesizer.suggested_file_name(result),
            written_to,
            script: synthesizer.synthesize(result),
        }
    }
}

impl CommandOutput for ScriptOutput {
    fn to_human(&self) -> String {
        match self.written_to {
            Some(ref path) => action_success(&format!(
                "Wrote automation script for {} to {}",
                self.domain,
                path.display()
            )),
            None => self.script.trim_end().to_string(),
        }
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Where the script should go, given the `--output` flag.
pub fn resolve_target(flag: Option<&str>, result: &AnalysisResult) -> Option<PathBuf> {
    match flag {
        None => None,
        Some(AUTO_OUTPUT) => Some(PathBuf::from(
            CodeSynthesizer::new().suggested_file_name(result),
        )),
        Some(path) => Some(PathBuf::from(path)),
    }
}

/// Run `loginprobe script`
pub async fn execute(args: ScriptArgs, options: &GlobalOptions, config: &Config) -> Result<()> {
    let orchestrator = build_orchestrator(config, options).await?;
    let result = run_analysis(&orchestrator, &args.url, options.json).await?;

    let target = resolve_target(args.output.as_deref(), &result);
    let script_output = ScriptOutput::new(&result, target);

    if let Some(ref path) = script_output.written_to {
        tokio::fs::write(path, &script_output.script)
            .await
            .with_context(|| format!("Failed to write script to {}", path.display()))?;
    }

    output(&script_output, options.json);
    Ok(())
}
