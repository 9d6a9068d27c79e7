//! Knowledge base sources
//!
//! Adapters for the [`PatternSource`] port:
//! - [`BuiltinPatternSource`]: the compiled-in registry
//! - [`FilePatternSource`]: a YAML document on disk

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::domain::ports::{PatternSource, RegistryDocument, RegistryError};
use crate::services::pattern_registry::PatternRegistry;

/// Source serving the compiled-in knowledge base
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinPatternSource;

impl BuiltinPatternSource {
    /// Source for the compiled-in patterns
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PatternSource for BuiltinPatternSource {
    async fn load(&self) -> Result<RegistryDocument, RegistryError> {
        Ok(PatternRegistry::builtin().to_document())
    }

    fn describe(&self) -> String {
        "builtin".to_string()
    }
}

/// Source reading a YAML (or JSON) knowledge base document from disk
#[derive(Debug, Clone)]
pub struct FilePatternSource {
    path: PathBuf,
}

impl FilePatternSource {
    /// Source reading `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File this source reads from
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PatternSource for FilePatternSource {
    async fn load(&self) -> Result<RegistryDocument, RegistryError> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| RegistryError::Io {
                path: self.path.clone(),
                source,
            })?;

        // YAML is a superset of JSON, so both formats parse here
        let document: RegistryDocument = serde_yaml::from_str(&contents)?;
        debug!(
            path = %self.path.display(),
            version = document.version,
            patterns = document.patterns.len(),
            "parsed pattern document"
        );
        Ok(document)
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::FieldKind;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r##"
version: 2
patterns:
  www.Example.com:
    username:
      selector: "#login"
      confidence: 0.9
      type: username
      label: Login
    password:
      selector: "#pass"
      confidence: 0.95
      type: password
    submit:
      selector: "button.go"
      confidence: 0.8
      type: submit
    authMethods: [email, SSO]
    specificSelectors:
      username: ["#login"]
      password: ["#pass"]
      submit: ["button.go"]
"##;

    #[tokio::test]
    async fn test_builtin_source_round_trips_registry() {
        let document = BuiltinPatternSource::new().load().await.unwrap();
        assert_eq!(document.version, 1);
        assert_eq!(document.patterns.len(), PatternRegistry::builtin().len());
        assert!(document.patterns.contains_key("github.com"));
    }

    #[tokio::test]
    async fn test_file_source_parses_yaml() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        file.flush().unwrap();

        let source = FilePatternSource::new(file.path());
        let document = source.load().await.unwrap();
        assert_eq!(document.version, 2);

        let registry = PatternRegistry::from_document(document).unwrap();
        let pattern = registry.lookup("example.com").expect("key is normalized");
        assert_eq!(pattern.username.selector, "#login");
        assert_eq!(pattern.username.label.as_deref(), Some("Login"));
        assert!(pattern.password.label.is_none());
        assert_eq!(pattern.specific_selectors.get(FieldKind::Password), ["#pass"]);
        assert!(pattern.supports_sso());
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let source = FilePatternSource::new("/nonexistent/loginprobe/patterns.yaml");
        let err = source.load().await.unwrap_err();
        assert!(matches!(err, RegistryError::Io { ref path, .. } if path == source.path()));
    }

    #[tokio::test]
    async fn test_file_source_malformed_document() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"version: [not a number").unwrap();
        file.flush().unwrap();

        let err = FilePatternSource::new(file.path()).load().await.unwrap_err();
        assert!(matches!(err, RegistryError::Parse(_)));
    }

    #[test]
    fn test_describe() {
        assert_eq!(BuiltinPatternSource.describe(), "builtin");
        assert_eq!(
            FilePatternSource::new("data/patterns.yaml").describe(),
            "file:data/patterns.yaml"
        );
    }
}
