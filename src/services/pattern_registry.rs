//! Knowledge base of login-form patterns keyed by domain.

use std::collections::{BTreeMap, HashMap};

use crate::domain::models::{ElementDetection, FieldKind, SaaSPattern, SelectorGroup};
use crate::domain::ports::{RegistryDocument, RegistryError};
use crate::services::domain_resolver::normalize_domain;

/// Version stamped on the compiled-in knowledge base.
pub const BUILTIN_VERSION: u32 = 1;

/// Immutable knowledge base keyed by normalized domain
///
/// Lookups are exact string matches; there is no fuzzy or TLD matching.
/// A missing key is the routine path to the generic fallback, not an error.
#[derive(Debug, Clone, Default)]
pub struct PatternRegistry {
    version: u32,
    patterns: HashMap<String, SaaSPattern>,
}

impl PatternRegistry {
    /// Build and validate a registry from a parsed document.
    pub fn from_document(document: RegistryDocument) -> Result<Self, RegistryError> {
        if document.version == 0 {
            return Err(RegistryError::UnsupportedVersion(document.version));
        }

        let mut patterns = HashMap::with_capacity(document.patterns.len());
        for (raw_key, pattern) in document.patterns {
            let domain = normalize_domain(&raw_key);
            if domain.is_empty() || domain.contains(char::is_whitespace) {
                return Err(RegistryError::InvalidDomain(raw_key));
            }
            validate_pattern(&domain, &pattern)?;
            if patterns.insert(domain.clone(), pattern).is_some() {
                return Err(RegistryError::DuplicateDomain(domain));
            }
        }

        Ok(Self {
            version: document.version,
            patterns,
        })
    }

    /// The compiled-in knowledge base.
    pub fn builtin() -> Self {
        let patterns = builtin_patterns()
            .into_iter()
            .map(|(domain, pattern)| (domain.to_string(), pattern))
            .collect();
        Self {
            version: BUILTIN_VERSION,
            patterns,
        }
    }

    /// Exact-match lookup by normalized domain.
    pub fn lookup(&self, domain: &str) -> Option<&SaaSPattern> {
        self.patterns.get(domain)
    }

    /// Whether `domain` has an exact entry
    pub fn contains(&self, domain: &str) -> bool {
        self.patterns.contains_key(domain)
    }

    /// Version of the loaded document
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Number of domains
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the registry has no entries
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Domains in lexical order.
    pub fn domains(&self) -> Vec<&str> {
        let mut domains: Vec<&str> = self.patterns.keys().map(String::as_str).collect();
        domains.sort_unstable();
        domains
    }

    /// Serialize back into the document form.
    pub fn to_document(&self) -> RegistryDocument {
        RegistryDocument {
            version: self.version,
            patterns: self
                .patterns
                .iter()
                .map(|(domain, pattern)| (domain.clone(), pattern.clone()))
                .collect::<BTreeMap<_, _>>(),
        }
    }
}

fn validate_pattern(domain: &str, pattern: &SaaSPattern) -> Result<(), RegistryError> {
    for kind in FieldKind::ALL {
        let element = pattern.element(kind);
        if !(0.0..=1.0).contains(&element.confidence) {
            return Err(RegistryError::ConfidenceOutOfRange {
                domain: domain.to_string(),
                field: kind,
                value: element.confidence,
            });
        }
        if element.selector.trim().is_empty() {
            return Err(RegistryError::BlankSelector {
                domain: domain.to_string(),
                field: kind,
            });
        }

        let candidates = pattern.specific_selectors.get(kind);
        if candidates.is_empty() {
            return Err(RegistryError::EmptySelectors {
                domain: domain.to_string(),
                field: kind,
            });
        }
        if candidates.iter().any(|s| s.trim().is_empty()) {
            return Err(RegistryError::BlankSelector {
                domain: domain.to_string(),
                field: kind,
            });
        }
    }
    Ok(())
}

fn element(selector: &str, confidence: f64, element_type: &str, label: &str) -> ElementDetection {
    ElementDetection::new(selector, confidence, element_type, Some(label))
}

fn auth(methods: &[&str]) -> Vec<String> {
    methods.iter().map(|m| (*m).to_string()).collect()
}

fn builtin_patterns() -> Vec<(&'static str, SaaSPattern)> {
    vec![
        (
            "github.com",
            SaaSPattern {
                username: element("#login_field", 0.95, "input", "Username or email"),
                password: element("#password", 0.98, "password", "Password"),
                submit: element("[type=\"submit\"]", 0.90, "button", "Sign in"),
                auth_methods: auth(&["Username/Password", "SSO", "GitHub Mobile"]),
                specific_selectors: SelectorGroup::new(
                    &["#login_field", "[name=\"login\"]", ".js-username-field"],
                    &["#password", "[type=\"password\"]", ".js-password-field"],
                    &["[type=\"submit\"]", ".btn-primary", "button:has-text(\"Sign in\")"],
                ),
            },
        ),
        (
            "notion.so",
            SaaSPattern {
                username: element("[data-testid=\"login-email\"]", 0.92, "email", "Email"),
                password: element("[data-testid=\"login-password\"]", 0.95, "password", "Password"),
                submit: element(
                    "[data-testid=\"login-submit\"]",
                    0.88,
                    "button",
                    "Continue with email",
                ),
                auth_methods: auth(&["Email/Password", "Google SSO", "Apple SSO"]),
                specific_selectors: SelectorGroup::new(
                    &["[data-testid=\"login-email\"]", "[name=\"email\"]", ".email-input"],
                    &["[data-testid=\"login-password\"]", "[type=\"password\"]", ".password-input"],
                    &["[data-testid=\"login-submit\"]", ".login-button", "button[type=\"submit\"]"],
                ),
            },
        ),
        (
            "dropbox.com",
            SaaSPattern {
                username: element("[name=\"login_email\"]", 0.93, "email", "Email"),
                password: element("[name=\"login_password\"]", 0.96, "password", "Password"),
                submit: element(".login-button", 0.91, "button", "Sign in"),
                auth_methods: auth(&["Email/Password", "Google SSO", "Apple SSO", "SSO"]),
                specific_selectors: SelectorGroup::new(
                    &["[name=\"login_email\"]", "#pyxl2u3", ".text-input-input"],
                    &["[name=\"login_password\"]", "#pyxl2u4", ".password-input"],
                    &[".login-button", "button[type=\"submit\"]", ".auth-button"],
                ),
            },
        ),
        (
            "slack.com",
            SaaSPattern {
                username: element("#email", 0.94, "email", "Email"),
                password: element("#password", 0.97, "password", "Password"),
                submit: element("#signin_btn", 0.89, "button", "Sign In with Email"),
                auth_methods: auth(&["Email/Password", "Google SSO", "Apple SSO", "SAML SSO"]),
                specific_selectors: SelectorGroup::new(
                    &["#email", "[name=\"email\"]", ".c-input_text"],
                    &["#password", "[type=\"password\"]", ".c-input_password"],
                    &["#signin_btn", "button[type=\"submit\"]", ".c-button--primary"],
                ),
            },
        ),
        (
            "trello.com",
            SaaSPattern {
                username: element("#user", 0.91, "email", "Email"),
                password: element("#password", 0.94, "password", "Password"),
                submit: element("#login", 0.87, "button", "Log in"),
                auth_methods: auth(&["Email/Password", "Google SSO", "Microsoft SSO"]),
                specific_selectors: SelectorGroup::new(
                    &["#user", "[name=\"user\"]", ".form-field-input"],
                    &["#password", "[type=\"password\"]", ".password-input"],
                    &["#login", "input[type=\"submit\"]", ".btn-login"],
                ),
            },
        ),
    ]
}
