//! `analyze` command.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use super::{build_orchestrator, run_analysis, GlobalOptions};
use crate::cli::display::{
    colorize_confidence, colorize_origin, list_table, output, section, CommandOutput,
};
use crate::domain::models::{percent, AnalysisResult, Config, FieldKind};
use crate::services::recommendation_engine::tier_message;
use crate::services::CodeSynthesizer;

/// Arguments for `loginprobe analyze`
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Login page URL
    pub url: String,

    /// Append the generated Playwright script
    #[arg(short, long)]
    pub script: bool,
}

/// Analysis report, optionally carrying the generated script
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisOutput {
    /// The analysis itself
    #[serde(flatten)]
    pub result: AnalysisResult,

    /// Playwright script, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
}

impl AnalysisOutput {
    /// Wrap a result, synthesizing the script when `with_script` is set
    pub fn new(result: AnalysisResult, with_script: bool) -> Self {
        let script = with_script.then(|| CodeSynthesizer::new().synthesize(&result));
        Self { result, script }
    }

    fn elements_table(&self) -> String {
        let mut table = list_table(&["field", "selector", "confidence", "type", "label"]);
        for (kind, element) in self.result.elements.iter() {
            table.add_row(vec![
                kind.as_str().to_string(),
                element.selector.clone(),
                format!("{}%", percent(element.confidence)),
                element.element_type.clone(),
                element.label.clone().unwrap_or_else(|| "-".to_string()),
            ]);
        }
        table.to_string()
    }
}

impl CommandOutput for AnalysisOutput {
    fn to_human(&self) -> String {
        let result = &self.result;
        let mut lines = vec![
            format!("{} {}", section("Analysis for"), result.url),
            format!(
                "  Domain:      {} ({})",
                result.domain,
                colorize_origin(result.pattern_source)
            ),
            format!(
                "  Confidence:  {}  {}",
                colorize_confidence(result.confidence),
                tier_message(result.confidence)
            ),
            format!(
                "  Analyzed at: {}",
                result.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
            ),
            String::new(),
            section("Detected elements"),
            self.elements_table(),
            String::new(),
            section("Selector candidates"),
        ];

        for kind in FieldKind::ALL {
            lines.push(format!(
                "  {:<9} {}",
                kind.as_str(),
                result.selectors.combined(kind)
            ));
        }

        lines.push(String::new());
        lines.push(section("Auth methods"));
        lines.push(format!("  {}", result.auth_methods.join(", ")));

        lines.push(String::new());
        lines.push(section("Recommendations"));
        for recommendation in &result.recommendations {
            lines.push(format!("  \u{2022} {recommendation}"));
        }

        if let Some(ref script) = self.script {
            lines.push(String::new());
            lines.push(section("Generated script"));
            lines.push(script.trim_end().to_string());
        }

        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Run `loginprobe analyze`
pub async fn execute(args: AnalyzeArgs, options: &GlobalOptions, config: &Config) -> Result<()> {
    let orchestrator = build_orchestrator(config, options).await?;
    let result = run_analysis(&orchestrator, &args.url, options.json).await?;
    output(&AnalysisOutput::new(result, args.script), options.json);
    Ok(())
}
