//! Login form fields and their detections.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The three logical controls of a login form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Username or email input
    Username,
    /// Password input
    Password,
    /// Submit button
    Submit,
}

impl FieldKind {
    /// All field kinds in form order.
    pub const ALL: [Self; 3] = [Self::Username, Self::Password, Self::Submit];

    /// Lowercase field name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Password => "password",
            Self::Submit => "submit",
        }
    }

    /// Upper bound on the perturbed confidence for this field.
    pub const fn default_cap(self) -> f64 {
        match self {
            Self::Username => 0.98,
            Self::Password => 0.99,
            Self::Submit => 0.95,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One detected form field or control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementDetection {
    /// Primary CSS selector for the element
    pub selector: String,

    /// Detection reliability in `[0, 1]`
    pub confidence: f64,

    /// Element type (`input`, `email`, `password`, `button`)
    #[serde(rename = "type")]
    pub element_type: String,

    /// Human-readable label shown next to the control
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ElementDetection {
    /// Detection with no label
    pub fn new(
        selector: impl Into<String>,
        confidence: f64,
        element_type: impl Into<String>,
        label: Option<&str>,
    ) -> Self {
        Self {
            selector: selector.into(),
            confidence,
            element_type: element_type.into(),
            label: label.map(str::to_string),
        }
    }

    /// Same element with a replaced confidence value.
    #[must_use]
    pub fn with_confidence(&self, confidence: f64) -> Self {
        Self {
            confidence,
            ..self.clone()
        }
    }
}

/// One `ElementDetection` per login field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedElements {
    /// Username detection
    pub username: ElementDetection,
    /// Password detection
    pub password: ElementDetection,
    /// Submit detection
    pub submit: ElementDetection,
}

impl DetectedElements {
    /// Detection for one field
    pub const fn get(&self, kind: FieldKind) -> &ElementDetection {
        match kind {
            FieldKind::Username => &self.username,
            FieldKind::Password => &self.password,
            FieldKind::Submit => &self.submit,
        }
    }

    /// Iterate elements in form order together with their kind.
    pub fn iter(&self) -> impl Iterator<Item = (FieldKind, &ElementDetection)> {
        FieldKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }
}

/// Ordered selector candidates per field, most reliable first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorGroup {
    /// Username candidates
    pub username: Vec<String>,
    /// Password candidates
    pub password: Vec<String>,
    /// Submit candidates
    pub submit: Vec<String>,
}

impl SelectorGroup {
    /// Build a group from borrowed selector lists
    pub fn new(username: &[&str], password: &[&str], submit: &[&str]) -> Self {
        let owned = |list: &[&str]| list.iter().map(|s| (*s).to_string()).collect();
        Self {
            username: owned(username),
            password: owned(password),
            submit: owned(submit),
        }
    }

    /// Candidates for one field, most reliable first
    pub fn get(&self, kind: FieldKind) -> &[String] {
        match kind {
            FieldKind::Username => &self.username,
            FieldKind::Password => &self.password,
            FieldKind::Submit => &self.submit,
        }
    }

    /// Candidates joined into one first-match multi-selector locator.
    pub fn combined(&self, kind: FieldKind) -> String {
        self.get(kind).join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_group() -> SelectorGroup {
        SelectorGroup::new(
            &["#login_field", "[name=\"login\"]"],
            &["#password"],
            &["[type=\"submit\"]", ".btn-primary"],
        )
    }

    #[test]
    fn test_combined_joins_with_comma_space() {
        let group = sample_group();
        assert_eq!(
            group.combined(FieldKind::Username),
            "#login_field, [name=\"login\"]"
        );
        assert_eq!(group.combined(FieldKind::Password), "#password");
    }

    #[test]
    fn test_field_caps() {
        assert!((FieldKind::Username.default_cap() - 0.98).abs() < f64::EPSILON);
        assert!((FieldKind::Password.default_cap() - 0.99).abs() < f64::EPSILON);
        assert!((FieldKind::Submit.default_cap() - 0.95).abs() < f64::EPSILON);
    }

    #[test]
    fn test_element_serializes_type_field() {
        let element = ElementDetection::new("#password", 0.98, "password", Some("Password"));
        let json = serde_json::to_value(&element).unwrap();
        assert_eq!(json["type"], "password");
        assert_eq!(json["label"], "Password");
    }

    #[test]
    fn test_element_without_label_omits_it() {
        let element = ElementDetection::new("#x", 0.5, "input", None);
        let json = serde_json::to_value(&element).unwrap();
        assert!(json.get("label").is_none());
    }
}
