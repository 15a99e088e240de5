//! Error types and handling for the `TripCast` pipeline

use thiserror::Error;

/// One sequential unit of the travel planning pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Weather-impact report generation
    Forecast,
    /// Weather-adjusted itinerary generation
    Itinerary,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Forecast => write!(f, "forecast"),
            Stage::Itinerary => write!(f, "itinerary"),
        }
    }
}

/// Main error type for the `TripCast` pipeline
#[derive(Error, Debug)]
pub enum TravelPlanError {
    /// Required credential missing or configuration value invalid,
    /// detected before any external call
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// User input rejected before the pipeline runs
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// A pipeline stage's external call failed or returned no usable output
    #[error("{stage} stage failed: {message}")]
    Stage { stage: Stage, message: String },
}

impl TravelPlanError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new stage execution error
    pub fn stage<S: Into<String>>(stage: Stage, message: S) -> Self {
        Self::Stage {
            stage,
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TravelPlanError::Config { message } => {
                format!("Configuration error: {message}. Please check your API keys and try again.")
            }
            TravelPlanError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            TravelPlanError::Stage { stage, message } => {
                format!(
                    "The {stage} step could not be completed: {message}. Please try again in a moment."
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = TravelPlanError::config("GEMINI_API_KEY is not set");
        assert!(matches!(config_err, TravelPlanError::Config { .. }));

        let validation_err = TravelPlanError::validation("location cannot be empty");
        assert!(matches!(validation_err, TravelPlanError::Validation { .. }));

        let stage_err = TravelPlanError::stage(Stage::Forecast, "connection failed");
        assert!(matches!(
            stage_err,
            TravelPlanError::Stage {
                stage: Stage::Forecast,
                ..
            }
        ));
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::Forecast.to_string(), "forecast");
        assert_eq!(Stage::Itinerary.to_string(), "itinerary");
    }

    #[test]
    fn test_user_messages() {
        let config_err = TravelPlanError::config("SERPER_API_KEY is not set");
        assert!(config_err.user_message().contains("API keys"));

        let validation_err = TravelPlanError::validation("location cannot be empty");
        assert!(
            validation_err
                .user_message()
                .contains("location cannot be empty")
        );

        let stage_err = TravelPlanError::stage(Stage::Itinerary, "HTTP 503");
        assert!(stage_err.user_message().contains("itinerary"));
        assert!(stage_err.user_message().contains("HTTP 503"));
    }
}
