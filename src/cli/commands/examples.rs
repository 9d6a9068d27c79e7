//! `examples` command.

use anyhow::Result;
use serde::Serialize;

use super::{build_orchestrator, GlobalOptions};
use crate::cli::display::{list_table, output, render_list, CommandOutput};
use crate::domain::models::{Config, PatternOrigin};
use crate::services::{DomainResolver, PatternRegistry};

/// Showcase login pages, in display order
pub const SAMPLE_LOGIN_URLS: [(&str, &str); 5] = [
    ("GitHub", "https://github.com/login"),
    ("Notion", "https://www.notion.so/login"),
    ("Dropbox", "https://www.dropbox.com/login"),
    ("Slack", "https://slack.com/signin"),
    ("Trello", "https://trello.com/login"),
];

/// One sample login URL and how it would be handled
#[derive(Debug, Serialize)]
pub struct ExampleEntry {
    /// Service name
    pub name: String,
    /// Sample login URL
    pub url: String,
    /// Resolved registry key
    pub domain: String,
    /// Whether the registry or the fallback serves it
    pub coverage: PatternOrigin,
}

/// Sample login URLs with their coverage
#[derive(Debug, Serialize)]
pub struct ExampleListOutput {
    /// One entry per sample URL
    pub examples: Vec<ExampleEntry>,
    /// Number of samples
    pub total: usize,
}

impl ExampleListOutput {
    /// Classify the sample URLs against a registry
    pub fn for_registry(registry: &PatternRegistry) -> Self {
        let resolver = DomainResolver::new();
        let examples: Vec<ExampleEntry> = SAMPLE_LOGIN_URLS
            .iter()
            .map(|(name, url)| {
                let domain = resolver.resolve(url);
                let coverage = if registry.contains(&domain) {
                    PatternOrigin::Registry
                } else {
                    PatternOrigin::Generic
                };
                ExampleEntry {
                    name: (*name).to_string(),
                    url: (*url).to_string(),
                    domain,
                    coverage,
                }
            })
            .collect();
        Self {
            total: examples.len(),
            examples,
        }
    }
}

impl CommandOutput for ExampleListOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["name", "url", "coverage"]);
        for entry in &self.examples {
            table.add_row(vec![
                entry.name.clone(),
                entry.url.clone(),
                entry.coverage.as_str().to_string(),
            ]);
        }
        render_list("example", &table, self.total)
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Run `loginprobe examples`
pub async fn execute(options: &GlobalOptions, config: &Config) -> Result<()> {
    let orchestrator = build_orchestrator(config, options).await?;
    let registry = orchestrator.registry();
    output(&ExampleListOutput::for_registry(&registry), options.json);
    Ok(())
}
