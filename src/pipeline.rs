//! Pipeline driver
//!
//! Sequences the two stages: the forecast synthesizer runs to completion
//! first and its text is handed to the itinerary composer. There is no
//! branching, no retry, and no concurrency between stages; on the first
//! stage failure the run aborts with that stage's error.

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::config::PlannerConfig;
use crate::llm::gemini::GeminiClient;
use crate::llm::{GenerationOptions, LlmClient};
use crate::models::{PipelineOutcome, TravelQuery};
use crate::search::SearchClient;
use crate::search::serper::SerperClient;
use crate::{Result, TravelPlanError, forecast, itinerary};

/// Driver states, in order of a successful run.
///
/// `Failed` is terminal and reachable from either running state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    RunningForecast,
    RunningItinerary,
    Done,
    Failed,
}

impl std::fmt::Display for PipelineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineState::Idle => write!(f, "idle"),
            PipelineState::RunningForecast => write!(f, "running-forecast"),
            PipelineState::RunningItinerary => write!(f, "running-itinerary"),
            PipelineState::Done => write!(f, "done"),
            PipelineState::Failed => write!(f, "failed"),
        }
    }
}

fn transition(state: &mut PipelineState, next: PipelineState) {
    debug!(from = %state, to = %next, "pipeline state");
    *state = next;
}

/// Two-stage travel planning pipeline.
///
/// Clients and generation options are fixed at construction; each `run` is
/// independent and shares nothing with other runs.
pub struct TravelPlanner<L, S> {
    llm: L,
    search: S,
    options: GenerationOptions,
}

impl<L: LlmClient, S: SearchClient> TravelPlanner<L, S> {
    /// Create a planner over explicit service clients
    pub fn new(llm: L, search: S, options: GenerationOptions) -> Self {
        Self {
            llm,
            search,
            options,
        }
    }

    /// Run both stages for a validated query.
    ///
    /// The itinerary stage never starts before the forecast stage has
    /// produced its result; its prompt embeds the forecast text verbatim.
    pub async fn run(&self, query: &TravelQuery) -> Result<PipelineOutcome> {
        let mut state = PipelineState::Idle;
        info!(
            location = %query.location(),
            has_preference = query.preference().is_some(),
            "starting travel plan pipeline"
        );

        transition(&mut state, PipelineState::RunningForecast);
        let forecast_report =
            match forecast::synthesize(&self.llm, &self.search, &self.options, query.location())
                .await
            {
                Ok(report) => report,
                Err(err) => {
                    transition(&mut state, PipelineState::Failed);
                    warn!(error = %err, "pipeline aborted during forecast stage");
                    return Err(err);
                }
            };

        transition(&mut state, PipelineState::RunningItinerary);
        let itinerary = match itinerary::compose(
            &self.llm,
            &self.options,
            query.location(),
            &forecast_report.text,
            query.preference(),
        )
        .await
        {
            Ok(itinerary) => itinerary,
            Err(err) => {
                transition(&mut state, PipelineState::Failed);
                warn!(error = %err, "pipeline aborted during itinerary stage");
                return Err(err);
            }
        };

        transition(&mut state, PipelineState::Done);
        info!("travel plan pipeline complete");

        Ok(PipelineOutcome {
            forecast_report,
            itinerary,
            generated_at: Utc::now(),
        })
    }

    /// Validate raw input and run the pipeline
    pub async fn plan(&self, location: &str, preference: Option<&str>) -> Result<PipelineOutcome> {
        let query = TravelQuery::new(location, preference)?;
        self.run(&query).await
    }
}

impl TravelPlanner<GeminiClient, SerperClient> {
    /// Build the production planner from configuration.
    ///
    /// Credentials are checked here, before any client exists; a missing
    /// key means no external call is ever attempted.
    pub fn from_config(config: &PlannerConfig) -> Result<Self> {
        config.validate()?;

        let llm = GeminiClient::new(config.generation.clone())
            .map_err(|e| TravelPlanError::config(format!("failed to build generation client: {e}")))?;
        let search = SerperClient::new(config.search.clone())
            .map_err(|e| TravelPlanError::config(format!("failed to build search client: {e}")))?;

        Ok(Self::new(llm, search, config.generation.options()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GenerationConfig, SearchApiConfig};
    use crate::llm::MockLlmClient;
    use crate::search::MockSearchClient;

    #[test]
    fn test_state_display() {
        assert_eq!(PipelineState::Idle.to_string(), "idle");
        assert_eq!(PipelineState::RunningForecast.to_string(), "running-forecast");
        assert_eq!(PipelineState::Failed.to_string(), "failed");
    }

    #[tokio::test]
    async fn test_plan_rejects_blank_location_before_any_call() {
        let llm = std::sync::Arc::new(MockLlmClient::with_responses(["unused"]));
        let search = std::sync::Arc::new(MockSearchClient::with_responses(["unused"]));
        let planner =
            TravelPlanner::new(llm.clone(), search.clone(), GenerationOptions::default());

        let err = planner.plan("   ", None).await.unwrap_err();
        assert!(matches!(err, TravelPlanError::Validation { .. }));
        assert!(llm.requests().is_empty());
        assert!(search.queries().is_empty());
    }

    #[test]
    fn test_from_config_rejects_missing_credentials() {
        let config = PlannerConfig {
            generation: GenerationConfig::with_api_key(""),
            search: SearchApiConfig::with_api_key("serper_test_key"),
        };
        let err = TravelPlanner::from_config(&config).unwrap_err();
        assert!(matches!(err, TravelPlanError::Config { .. }));
    }
}
