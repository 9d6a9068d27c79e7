//! `patterns` command.

use anyhow::Result;
use serde::Serialize;

use super::{build_orchestrator, GlobalOptions};
use crate::cli::display::{list_table, output, render_list, CommandOutput};
use crate::domain::models::{Config, FieldKind, SaaSPattern};
use crate::services::PatternRegistry;

/// Summary of one knowledge-base entry
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternEntry {
    /// Registry key
    pub domain: String,
    /// Username selector
    pub username: String,
    /// Password selector
    pub password: String,
    /// Submit selector
    pub submit: String,
    /// Authentication methods
    pub auth_methods: Vec<String>,
    /// Whether SSO is among the auth methods
    pub sso: bool,
}

impl PatternEntry {
    fn new(domain: &str, pattern: &SaaSPattern) -> Self {
        Self {
            domain: domain.to_string(),
            username: pattern.element(FieldKind::Username).selector.clone(),
            password: pattern.element(FieldKind::Password).selector.clone(),
            submit: pattern.element(FieldKind::Submit).selector.clone(),
            auth_methods: pattern.auth_methods.clone(),
            sso: pattern.supports_sso(),
        }
    }
}

/// Listing of the loaded knowledge base
#[derive(Debug, Serialize)]
pub struct PatternListOutput {
    /// Knowledge base document version
    pub version: u32,
    /// Entries sorted by domain
    pub patterns: Vec<PatternEntry>,
    /// Number of entries
    pub total: usize,
}

impl From<&PatternRegistry> for PatternListOutput {
    fn from(registry: &PatternRegistry) -> Self {
        let patterns: Vec<PatternEntry> = registry
            .domains()
            .into_iter()
            .filter_map(|domain| {
                registry
                    .lookup(domain)
                    .map(|pattern| PatternEntry::new(domain, pattern))
            })
            .collect();
        Self {
            version: registry.version(),
            total: patterns.len(),
            patterns,
        }
    }
}

impl CommandOutput for PatternListOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["domain", "username", "password", "submit", "auth methods"]);
        for entry in &self.patterns {
            table.add_row(vec![
                entry.domain.clone(),
                entry.username.clone(),
                entry.password.clone(),
                entry.submit.clone(),
                entry.auth_methods.join(", "),
            ]);
        }
        render_list("pattern", &table, self.total)
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Run `loginprobe patterns`
pub async fn execute(options: &GlobalOptions, config: &Config) -> Result<()> {
    let orchestrator = build_orchestrator(config, options).await?;
    let registry = orchestrator.registry();
    output(&PatternListOutput::from(registry.as_ref()), options.json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_builtin_sorted() {
        let output = PatternListOutput::from(&PatternRegistry::builtin());
        assert_eq!(output.total, 5);
        assert_eq!(output.version, 1);
        assert_eq!(output.patterns[0].domain, "dropbox.com");
        assert!(output.patterns[0].sso);
        assert_eq!(output.patterns[1].username, "#login_field");
        // "Google SSO" alone does not count as SSO support
        let notion = output.patterns.iter().find(|p| p.domain == "notion.so").unwrap();
        assert!(!notion.sso);
    }

    #[test]
    fn test_human_output() {
        let output = PatternListOutput::from(&PatternRegistry::builtin());
        let human = console::strip_ansi_codes(&output.to_human()).to_string();
        assert!(human.starts_with("5 patterns:"));
        assert!(human.contains("trello.com"));
        assert!(human.contains("#signin_btn"));
    }
}
