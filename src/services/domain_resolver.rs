//! URL to registry key normalization.

use url::Url;

use crate::domain::{DomainError, DomainResult};

/// Domain returned for input that cannot be parsed as a URL.
///
/// It never appears in a registry, so it routes the analysis to the generic
/// fallback pattern.
pub const UNKNOWN_DOMAIN: &str = "unknown.com";

/// Normalizes arbitrary URLs into registry keys
#[derive(Debug, Clone, Copy, Default)]
pub struct DomainResolver;

impl DomainResolver {
    /// Create a resolver
    pub const fn new() -> Self {
        Self
    }

    /// Resolve a URL to its registry key, falling back to [`UNKNOWN_DOMAIN`].
    pub fn resolve(&self, url: &str) -> String {
        self.try_resolve(url)
            .unwrap_or_else(|_| UNKNOWN_DOMAIN.to_string())
    }

    /// Resolve a URL to its registry key, rejecting malformed input.
    pub fn try_resolve(&self, url: &str) -> DomainResult<String> {
        let host = Self::hostname(url).ok_or_else(|| DomainError::InvalidUrl(url.to_string()))?;
        Ok(normalize_domain(&host))
    }

    /// Raw hostname of a URL, if it parses and has one.
    pub fn hostname(url: &str) -> Option<String> {
        let parsed = Url::parse(url.trim()).ok()?;
        parsed
            .host_str()
            .filter(|host| !host.is_empty())
            .map(str::to_string)
    }
}

/// Lowercase a hostname and drop one leading `www.`.
pub fn normalize_domain(host: &str) -> String {
    let lower = host.trim().to_ascii_lowercase();
    match lower.strip_prefix("www.") {
        Some(rest) => rest.to_string(),
        None => lower,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_strips_www_and_path() {
        let resolver = DomainResolver::new();
        assert_eq!(resolver.resolve("https://www.notion.so/login"), "notion.so");
        assert_eq!(resolver.resolve("https://github.com/login"), "github.com");
    }

    #[test]
    fn test_resolve_lowercases_host() {
        let resolver = DomainResolver::new();
        assert_eq!(resolver.resolve("https://WWW.Dropbox.COM/login"), "dropbox.com");
    }

    #[test]
    fn test_resolve_keeps_other_subdomains() {
        let resolver = DomainResolver::new();
        assert_eq!(
            resolver.resolve("https://app.slack.com/signin"),
            "app.slack.com"
        );
        assert_eq!(
            resolver.resolve("https://wwwx.example.com"),
            "wwwx.example.com"
        );
    }

    #[test]
    fn test_resolve_only_strips_leading_www() {
        let resolver = DomainResolver::new();
        assert_eq!(
            resolver.resolve("https://login.www.example.com"),
            "login.www.example.com"
        );
    }

    #[test]
    fn test_malformed_url_maps_to_sentinel() {
        let resolver = DomainResolver::new();
        assert_eq!(resolver.resolve("not a url"), UNKNOWN_DOMAIN);
        assert_eq!(resolver.resolve(""), UNKNOWN_DOMAIN);
        assert_eq!(resolver.resolve("github.com/login"), UNKNOWN_DOMAIN);
    }

    #[test]
    fn test_url_without_host_maps_to_sentinel() {
        let resolver = DomainResolver::new();
        assert_eq!(resolver.resolve("mailto:someone@example.com"), UNKNOWN_DOMAIN);
    }

    #[test]
    fn test_try_resolve_reports_invalid_url() {
        let resolver = DomainResolver::new();
        let err = resolver.try_resolve("not a url").unwrap_err();
        assert_eq!(err, DomainError::InvalidUrl("not a url".to_string()));
    }

    #[test]
    fn test_hostname_keeps_www() {
        assert_eq!(
            DomainResolver::hostname("https://www.dropbox.com/login").as_deref(),
            Some("www.dropbox.com")
        );
    }
}
