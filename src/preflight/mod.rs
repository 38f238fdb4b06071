//! Preflight checks module.

mod gemini;
mod tmdb;

use crate::models::config::Config;
use colored::Colorize;

/// Result of a preflight check.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub success: bool,
    /// Advisory checks never fail the run.
    pub required: bool,
    pub message: String,
    pub hint: Option<String>,
}

impl CheckResult {
    pub fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            success: true,
            required: true,
            message: message.to_string(),
            hint: None,
        }
    }

    pub fn fail(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            success: false,
            required: true,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    pub fn warn(name: &str, message: &str, hint: &str) -> Self {
        Self {
            required: false,
            ..Self::fail(name, message, hint)
        }
    }
}

/// Run all preflight checks.
pub async fn run_preflight_checks(config: &Config) -> Vec<CheckResult> {
    vec![tmdb::check(&config.tmdb).await, gemini::check(&config.gemini)]
}

/// Print preflight check results.
pub fn print_results(results: &[CheckResult]) {
    for result in results {
        let tag = match (result.success, result.required) {
            (true, _) => "[OK]".green(),
            (false, true) => "[FAIL]".red(),
            (false, false) => "[WARN]".yellow(),
        };
        println!("{} {}: {}", tag, result.name.bold(), result.message);
        if !result.success {
            if let Some(ref hint) = result.hint {
                println!("  {} {}", "->".yellow(), hint);
            }
        }
    }
}

/// Check if all required preflight checks passed.
pub fn all_passed(results: &[CheckResult]) -> bool {
    results.iter().all(|r| r.success || !r.required)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advisory_failures_pass() {
        let results = vec![
            CheckResult::ok("TMDB API", "connected"),
            CheckResult::warn("Gemini", "not configured", "set key"),
        ];
        assert!(all_passed(&results));
    }

    #[test]
    fn test_required_failure_fails() {
        let results = vec![CheckResult::fail("TMDB API", "invalid", "check key")];
        assert!(!all_passed(&results));
    }

    #[test]
    fn test_gemini_missing_key_is_advisory() {
        let result = gemini::check(&Default::default());
        assert!(!result.success);
        assert!(!result.required);
    }
}
