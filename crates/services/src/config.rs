use std::env;
use std::time::Duration;

use quiz_core::{DEFAULT_REVEAL_DELAY_MS, DEFAULT_TIME_BUDGET_SECS};
use url::Url;

use crate::error::ConfigError;
use crate::quiz::QuizSettings;

pub const DEFAULT_QUESTIONS_URL: &str =
    "https://gist.githubusercontent.com/dr-samrat/53846277a8fcb034e482906ccc0d12b2/raw";

const QUESTIONS_URL_KEY: &str = "QUIZ_QUESTIONS_URL";
const TIME_BUDGET_KEY: &str = "QUIZ_TIME_BUDGET_SECS";
const REVEAL_DELAY_KEY: &str = "QUIZ_REVEAL_DELAY_MS";

/// Runtime configuration for the quiz services.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizConfig {
    pub questions_url: Url,
    pub time_budget_secs: u32,
    pub reveal_delay: Duration,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            questions_url: Url::parse(DEFAULT_QUESTIONS_URL)
                .expect("default questions URL should be valid"),
            time_budget_secs: DEFAULT_TIME_BUDGET_SECS,
            reveal_delay: Duration::from_millis(DEFAULT_REVEAL_DELAY_MS),
        }
    }
}

impl QuizConfig {
    /// Read `QUIZ_QUESTIONS_URL`, `QUIZ_TIME_BUDGET_SECS` and `QUIZ_REVEAL_DELAY_MS`,
    /// falling back to defaults for unset or blank variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env`, reading values through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a value is present but unusable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };

        let mut config = Self::default();
        if let Some(raw) = value(QUESTIONS_URL_KEY) {
            config.questions_url = parse_questions_url(&raw)?;
        }
        if let Some(raw) = value(TIME_BUDGET_KEY) {
            config.time_budget_secs = raw.parse().map_err(|_| ConfigError::InvalidNumber {
                key: TIME_BUDGET_KEY,
                raw,
            })?;
        }
        if let Some(raw) = value(REVEAL_DELAY_KEY) {
            let millis: u64 = raw.parse().map_err(|_| ConfigError::InvalidNumber {
                key: REVEAL_DELAY_KEY,
                raw,
            })?;
            config.reveal_delay = Duration::from_millis(millis);
        }
        Ok(config)
    }

    /// Override the questions URL, e.g. from a command-line flag.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the URL does not parse or is not http(s).
    pub fn with_questions_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.questions_url = parse_questions_url(raw.trim())?;
        Ok(self)
    }

    #[must_use]
    pub fn settings(&self) -> QuizSettings {
        QuizSettings {
            time_budget_secs: self.time_budget_secs,
            reveal_delay: self.reveal_delay,
        }
    }
}

fn parse_questions_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|source| ConfigError::InvalidUrl {
        raw: raw.to_string(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::UnsupportedScheme(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = QuizConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, QuizConfig::default());
        assert_eq!(config.time_budget_secs, 900);
        assert_eq!(config.reveal_delay, Duration::from_secs(2));
        assert_eq!(config.questions_url.as_str(), DEFAULT_QUESTIONS_URL);
    }

    #[test]
    fn reads_overrides() {
        let config = QuizConfig::from_lookup(lookup(&[
            ("QUIZ_QUESTIONS_URL", "http://localhost:8080/questions"),
            ("QUIZ_TIME_BUDGET_SECS", " 60 "),
            ("QUIZ_REVEAL_DELAY_MS", "500"),
        ]))
        .unwrap();
        assert_eq!(config.questions_url.as_str(), "http://localhost:8080/questions");
        assert_eq!(config.settings().time_budget_secs, 60);
        assert_eq!(config.settings().reveal_delay, Duration::from_millis(500));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = QuizConfig::from_lookup(lookup(&[("QUIZ_TIME_BUDGET_SECS", "  ")])).unwrap();
        assert_eq!(config.time_budget_secs, 900);
    }

    #[test]
    fn rejects_bad_values() {
        let err = QuizConfig::from_lookup(lookup(&[("QUIZ_TIME_BUDGET_SECS", "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { key: "QUIZ_TIME_BUDGET_SECS", .. }));

        let err = QuizConfig::default().with_questions_url("not a url").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));

        let err = QuizConfig::default()
            .with_questions_url("ftp://example.com/q")
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedScheme(scheme) if scheme == "ftp"));
    }
}
