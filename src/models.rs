//! Request and result models for the travel planning pipeline
//!
//! All entities here are request-scoped: built for one pipeline run and
//! discarded with it. Nothing is persisted.

use crate::TravelPlanError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Validated input to the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TravelQuery {
    location: String,
    preference: Option<String>,
}

impl TravelQuery {
    /// Create a query from raw user input.
    ///
    /// The location is trimmed and must be non-empty. A blank preference is
    /// treated as absent.
    pub fn new<S: Into<String>>(location: S, preference: Option<S>) -> crate::Result<Self> {
        let location = location.into().trim().to_string();
        if location.is_empty() {
            return Err(TravelPlanError::validation("location cannot be empty"));
        }

        let preference = preference
            .map(|p| p.into().trim().to_string())
            .filter(|p| !p.is_empty());

        Ok(Self {
            location,
            preference,
        })
    }

    /// The location this query is about
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// The traveler's free-text preference, if one was given
    #[must_use]
    pub fn preference(&self) -> Option<&str> {
        self.preference.as_deref()
    }
}

/// Raw textual output of one pipeline stage.
///
/// No output schema is enforced; whatever the generation service returns is
/// carried as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageResult {
    pub text: String,
}

impl StageResult {
    #[must_use]
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self { text: text.into() }
    }
}

/// Aggregated result of a successful pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineOutcome {
    /// Weather-impact report from the forecast stage
    pub forecast_report: StageResult,
    /// Weather-adjusted itinerary from the itinerary stage
    pub itinerary: StageResult,
    /// When this outcome was assembled
    pub generated_at: DateTime<Utc>,
}
