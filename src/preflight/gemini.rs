//! Gemini preflight check.
//!
//! Recommendations are optional, so a missing key is reported but not fatal.

use super::CheckResult;
use crate::models::config::GeminiSettings;
use crate::services::gemini::GeminiConfig;

/// Check if a Gemini API key is configured.
pub fn check(settings: &GeminiSettings) -> CheckResult {
    match GeminiConfig::from_settings(settings) {
        Ok(config) => CheckResult::ok("Gemini", &format!("configured ({})", config.model)),
        Err(_) => CheckResult::warn(
            "Gemini",
            "API key not configured, recommendations disabled",
            "Set GEMINI_API_KEY environment variable",
        ),
    }
}
