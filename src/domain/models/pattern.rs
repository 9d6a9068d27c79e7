//! Knowledge base records.

use serde::{Deserialize, Serialize};

use super::element::{ElementDetection, FieldKind, SelectorGroup};

/// Auth method name whose presence triggers the redirect advisory.
pub const SSO_AUTH_METHOD: &str = "SSO";

/// Knowledge-base record describing the login form of one SaaS domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaaSPattern {
    /// Username field detection
    pub username: ElementDetection,
    /// Password field detection
    pub password: ElementDetection,
    /// Submit button detection
    pub submit: ElementDetection,

    /// Named authentication methods offered on the page
    pub auth_methods: Vec<String>,

    /// Fallback selector candidates per field
    pub specific_selectors: SelectorGroup,
}

impl SaaSPattern {
    /// Stored detection for one field
    pub const fn element(&self, kind: FieldKind) -> &ElementDetection {
        match kind {
            FieldKind::Username => &self.username,
            FieldKind::Password => &self.password,
            FieldKind::Submit => &self.submit,
        }
    }

    /// Whether the pattern lists SSO among its auth methods
    pub fn supports_sso(&self) -> bool {
        self.auth_methods.iter().any(|m| m == SSO_AUTH_METHOD)
    }
}

/// Where the pattern behind an analysis came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternOrigin {
    /// Exact knowledge-base match
    Registry,
    /// Synthesized from generic selector conventions
    Generic,
}

impl PatternOrigin {
    /// Serialized name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Registry => "registry",
            Self::Generic => "generic",
        }
    }
}
