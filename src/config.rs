//! Configuration management for the `TripCast` pipeline
//!
//! Credentials and generation settings are explicit values passed to the
//! pipeline at construction time. The process environment is the single
//! source for credentials; there is no config file and no `.env` loading.

use crate::TravelPlanError;
use crate::llm::{DEFAULT_MODEL, DEFAULT_TEMPERATURE, GenerationOptions};
use serde::{Deserialize, Serialize};
use std::env;

/// Environment variable holding the text-generation service key
pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";
/// Environment variable holding the web-search service key
pub const SERPER_API_KEY_VAR: &str = "SERPER_API_KEY";

/// Root configuration for the `TripCast` pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Text-generation service settings
    pub generation: GenerationConfig,
    /// Web-search service settings
    pub search: SearchApiConfig,
}

/// Text-generation service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// API key for the generation service
    pub api_key: String,
    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,
    /// Base endpoint URL
    #[serde(default = "default_generation_endpoint")]
    pub endpoint: String,
    /// Sampling temperature (0.0 - 2.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

/// Web-search service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchApiConfig {
    /// API key for the search service
    pub api_key: String,
    /// Search endpoint URL
    #[serde(default = "default_search_endpoint")]
    pub endpoint: String,
    /// Number of results requested per query
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

// Default value functions
fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_generation_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

fn default_search_endpoint() -> String {
    "https://google.serper.dev/search".to_string()
}

fn default_max_results() -> usize {
    5
}

impl GenerationConfig {
    /// Settings with defaults for everything but the key
    #[must_use]
    pub fn with_api_key<S: Into<String>>(api_key: S) -> Self {
        Self {
            api_key: api_key.into(),
            model: default_model(),
            endpoint: default_generation_endpoint(),
            temperature: default_temperature(),
        }
    }

    /// Generation parameters handed to the pipeline stages
    #[must_use]
    pub fn options(&self) -> GenerationOptions {
        GenerationOptions {
            model: self.model.clone(),
            temperature: self.temperature,
        }
    }
}

impl SearchApiConfig {
    /// Settings with defaults for everything but the key
    #[must_use]
    pub fn with_api_key<S: Into<String>>(api_key: S) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: default_search_endpoint(),
            max_results: default_max_results(),
        }
    }
}

impl PlannerConfig {
    /// Load credentials from the process environment.
    ///
    /// A missing or empty key blocks the pipeline with a configuration
    /// error naming the variable; the pipeline never silently proceeds
    /// without credentials.
    pub fn from_env() -> crate::Result<Self> {
        let gemini_key = read_env_key(GEMINI_API_KEY_VAR)?;
        let serper_key = read_env_key(SERPER_API_KEY_VAR)?;

        let config = Self {
            generation: GenerationConfig::with_api_key(gemini_key),
            search: SearchApiConfig::with_api_key(serper_key),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> crate::Result<()> {
        self.validate_api_keys()?;
        self.validate_generation()?;
        self.validate_search()?;
        Ok(())
    }

    /// Validate that both service credentials are present
    pub fn validate_api_keys(&self) -> crate::Result<()> {
        if self.generation.api_key.trim().is_empty() {
            return Err(TravelPlanError::config(
                "generation API key is empty; set GEMINI_API_KEY",
            ));
        }
        if self.search.api_key.trim().is_empty() {
            return Err(TravelPlanError::config(
                "search API key is empty; set SERPER_API_KEY",
            ));
        }
        Ok(())
    }

    /// Validate generation settings
    fn validate_generation(&self) -> crate::Result<()> {
        if self.generation.model.trim().is_empty() {
            return Err(TravelPlanError::config("generation model cannot be empty"));
        }
        if !(0.0..=2.0).contains(&self.generation.temperature) {
            return Err(TravelPlanError::config(format!(
                "temperature {} is out of range (0.0 - 2.0)",
                self.generation.temperature
            )));
        }
        validate_endpoint("generation", &self.generation.endpoint)?;
        Ok(())
    }

    /// Validate search settings
    fn validate_search(&self) -> crate::Result<()> {
        if self.search.max_results == 0 || self.search.max_results > 20 {
            return Err(TravelPlanError::config(format!(
                "search max_results {} is out of range (1 - 20)",
                self.search.max_results
            )));
        }
        validate_endpoint("search", &self.search.endpoint)?;
        Ok(())
    }
}

fn validate_endpoint(which: &str, endpoint: &str) -> crate::Result<()> {
    if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
        return Err(TravelPlanError::config(format!(
            "{which} endpoint must be an HTTP or HTTPS URL"
        )));
    }
    Ok(())
}

fn read_env_key(var: &str) -> crate::Result<String> {
    match env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(TravelPlanError::config(format!("{var} is not set"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> PlannerConfig {
        PlannerConfig {
            generation: GenerationConfig::with_api_key("gemini_test_key"),
            search: SearchApiConfig::with_api_key("serper_test_key"),
        }
    }

    #[test]
    fn test_default_config() {
        let config = test_config();
        assert_eq!(config.generation.model, "gemini-2.0-flash");
        assert_eq!(
            config.generation.endpoint,
            "https://generativelanguage.googleapis.com/v1beta"
        );
        assert_eq!(config.generation.temperature, 0.7);
        assert_eq!(config.search.endpoint, "https://google.serper.dev/search");
        assert_eq!(config.search.max_results, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_empty_api_key() {
        let mut config = test_config();
        config.generation.api_key = "   ".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("GEMINI_API_KEY"));

        let mut config = test_config();
        config.search.api_key = String::new();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("SERPER_API_KEY"));
    }

    #[test]
    fn test_validation_temperature_range() {
        let mut config = test_config();
        config.generation.temperature = 2.5;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("temperature"));
    }

    #[test]
    fn test_validation_endpoint_scheme() {
        let mut config = test_config();
        config.search.endpoint = "ftp://google.serper.dev/search".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("HTTP or HTTPS"));
    }

    #[test]
    fn test_validation_max_results_range() {
        let mut config = test_config();
        config.search.max_results = 0;
        assert!(config.validate().is_err());
        config.search.max_results = 21;
        assert!(config.validate().is_err());
        config.search.max_results = 20;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_generation_options() {
        let options = test_config().generation.options();
        assert_eq!(options.model, "gemini-2.0-flash");
        assert_eq!(options.temperature, 0.7);
    }

    #[test]
    fn test_from_env_roundtrip() {
        // Single sequential test for both the missing and the present case;
        // parallel tests must not race on process-wide variables.

        // SAFETY: Test environment, setting test values only
        unsafe {
            env::remove_var(GEMINI_API_KEY_VAR);
            env::remove_var(SERPER_API_KEY_VAR);
        }
        let err = PlannerConfig::from_env().unwrap_err();
        assert!(err.to_string().contains(GEMINI_API_KEY_VAR));

        // SAFETY: Test environment, setting test values only
        unsafe {
            env::set_var(GEMINI_API_KEY_VAR, "gemini_key_from_env");
        }
        let err = PlannerConfig::from_env().unwrap_err();
        assert!(err.to_string().contains(SERPER_API_KEY_VAR));

        // SAFETY: Test environment, setting test values only
        unsafe {
            env::set_var(SERPER_API_KEY_VAR, "serper_key_from_env");
        }
        let config = PlannerConfig::from_env().expect("both keys set");
        assert_eq!(config.generation.api_key, "gemini_key_from_env");
        assert_eq!(config.search.api_key, "serper_key_from_env");

        // SAFETY: Test cleanup
        unsafe {
            env::remove_var(GEMINI_API_KEY_VAR);
            env::remove_var(SERPER_API_KEY_VAR);
        }
    }
}
