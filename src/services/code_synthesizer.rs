//! Playwright login script rendering
//!
//! The script is a single fixed template. Each field's locator is the field's
//! selector candidates joined with `", "`, which Playwright resolves with
//! first-match semantics via `.first()`.

use crate::domain::models::{AnalysisResult, FieldKind};
use crate::services::domain_resolver::DomainResolver;

/// Post-login markers the generated script probes to decide success.
pub const LOGIN_SUCCESS_MARKERS: &str = "[data-testid=\"user-menu\"], .user-profile, .logout-btn";

/// Timestamp layout for the script header, e.g. `10/19/2026, 3:04:05 PM`.
const HEADER_TIME_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Renders automation scripts from analysis results
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeSynthesizer;

impl CodeSynthesizer {
    /// Create a synthesizer
    pub const fn new() -> Self {
        Self
    }

    /// Render the login script for a result.
    ///
    /// Pure: identical results always render byte-identical scripts.
    pub fn synthesize(&self, result: &AnalysisResult) -> String {
        let url_comment = single_line(&result.url);
        let url_literal = js_single_quoted(&result.url);
        let generated_on = result.timestamp.format(HEADER_TIME_FORMAT);
        let confidence = result.confidence_percent();
        let username = js_single_quoted(&result.selectors.combined(FieldKind::Username));
        let password = js_single_quoted(&result.selectors.combined(FieldKind::Password));
        let submit = js_single_quoted(&result.selectors.combined(FieldKind::Submit));
        let markers = js_single_quoted(LOGIN_SUCCESS_MARKERS);

        format!(
            r"// AI-Generated Automation Script for {url_comment}
// Generated on {generated_on}
// Confidence Score: {confidence}%

async function loginToSaaS(page, credentials) {{
  try {{
    // Navigate to login page
    await page.goto('{url_literal}');

    // Smart element detection with fallback selectors
    const usernameField = await page.locator('{username}').first();
    const passwordField = await page.locator('{password}').first();
    const submitButton = await page.locator('{submit}').first();

    // Intelligent form filling
    await usernameField.waitFor({{ state: 'visible' }});
    await usernameField.fill(credentials.username);

    await passwordField.waitFor({{ state: 'visible' }});
    await passwordField.fill(credentials.password);

    // Submit form
    await submitButton.click();

    // Wait for navigation or error handling
    await page.waitForLoadState('networkidle');

    // Verify successful login
    const isLoggedIn = await page.locator('{markers}').isVisible();

    return {{
      success: isLoggedIn,
      url: page.url(),
      timestamp: new Date().toISOString()
    }};

  }} catch (error) {{
    console.error('Login automation failed:', error);
    return {{
      success: false,
      error: error.message,
      timestamp: new Date().toISOString()
    }};
  }}
}}

// Usage example
const result = await loginToSaaS(page, {{
  username: 'your-username@example.com',
  password: 'your-secure-password'
}});

console.log('Automation result:', result);
"
        )
    }

    /// File name offered when saving the script: `automation-<host>.js`.
    pub fn suggested_file_name(&self, result: &AnalysisResult) -> String {
        let host = DomainResolver::hostname(&result.url).unwrap_or_else(|| "unknown".to_string());
        let safe: String = host
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        format!("automation-{safe}.js")
    }
}

/// Escape text for a single-quoted JavaScript string literal.
///
/// Only backslashes, single quotes and line breaks change, so ordinary CSS
/// selectors pass through untouched.
fn js_single_quoted(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\u{2028}' => escaped.push_str("\\u2028"),
            '\u{2029}' => escaped.push_str("\\u2029"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Keep a value on one line so it cannot escape a `//` comment.
fn single_line(value: &str) -> String {
    value
        .chars()
        .map(|c| match c {
            '\n' | '\r' | '\u{2028}' | '\u{2029}' => ' ',
            _ => c,
        })
        .collect()
}
