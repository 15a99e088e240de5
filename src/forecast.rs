//! Forecast synthesizer stage
//!
//! First stage of the pipeline: one web search for the location's weather,
//! then one generation call that turns the search context into a
//! travel-focused weather report. The report text is returned as-is.

use tracing::{debug, info};

use crate::error::Stage;
use crate::llm::{GenerationOptions, LlmClient, LlmRequest, MAX_PROMPT_LOG_CHARS, truncate_for_log};
use crate::models::StageResult;
use crate::search::SearchClient;
use crate::{Result, TravelPlanError};

const SYSTEM_PROMPT: &str = "You are an AI travel meteorologist trained in predictive \
climate modeling, specializing in travel impact analysis. Beyond standard forecasts, you \
assess how weather conditions affect travel plans, point out the best times for outdoor \
activities, warn travelers about disruptions, and suggest adjustments that make the most \
of their trip.";

/// Search query issued to ground the forecast prompt
pub(crate) fn build_search_query(location: &str) -> String {
    format!("{location} weather forecast this week travel conditions")
}

/// Build the (system, user) prompt pair for the forecast stage
pub(crate) fn build_prompt(location: &str, search_context: &str) -> (String, String) {
    let user = format!(
        "Weather analysis request for {location}.\n\
         \n\
         1. Analyze the weather forecast for {location} using the search results below.\n\
         2. Identify key weather conditions relevant to travel (temperature ranges, \
         precipitation, wind conditions).\n\
         3. Point out optimal times for outdoor activities and any weather disruptions \
         (e.g., rain, heat waves).\n\
         4. Suggest scenic or indoor alternatives if weather conditions change unexpectedly.\n\
         5. Summarize general weather patterns and forecasts for the week.\n\
         \n\
         Expected output: a comprehensive weather analysis focused on travel \
         recommendations, including daily forecasts, weather disruptions, and activity \
         suggestions.\n\
         \n\
         Web search results:\n\
         {search_context}\n"
    );
    (SYSTEM_PROMPT.to_string(), user)
}

/// Run the forecast stage for a location.
///
/// Any search or generation failure maps to a forecast stage error; there
/// is no partial result, retry, or fallback.
pub async fn synthesize<L: LlmClient, S: SearchClient>(
    llm: &L,
    search: &S,
    options: &GenerationOptions,
    location: &str,
) -> Result<StageResult> {
    let query = build_search_query(location);
    debug!(%query, "forecast search query");

    let search_context = search
        .search(&query)
        .await
        .map_err(|e| TravelPlanError::stage(Stage::Forecast, e.to_string()))?;
    debug!(context_len = search_context.len(), "forecast search context");

    let (system, user) = build_prompt(location, &search_context);
    if tracing::enabled!(tracing::Level::DEBUG) {
        debug!(
            user_prompt = %truncate_for_log(&user, MAX_PROMPT_LOG_CHARS),
            "forecast prompt"
        );
    }

    let text = llm
        .complete(LlmRequest {
            system,
            user,
            model: options.model.clone(),
            temperature: options.temperature,
        })
        .await
        .map_err(|e| TravelPlanError::stage(Stage::Forecast, e.to_string()))?;

    info!(report_len = text.len(), "forecast synthesized");
    Ok(StageResult::new(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockLlmClient;
    use crate::search::{MockSearchClient, SearchError};

    #[test]
    fn test_prompt_embeds_location_and_context() {
        let (system, user) = build_prompt("Paris, France", "1. sunny week ahead");
        assert!(system.contains("travel meteorologist"));
        assert!(user.contains("Weather analysis request for Paris, France."));
        assert!(user.contains("1. sunny week ahead"));
    }

    #[test]
    fn test_search_query_names_location() {
        let query = build_search_query("Kyoto");
        assert!(query.contains("Kyoto"));
        assert!(query.contains("weather forecast"));
    }

    #[tokio::test]
    async fn test_synthesize_grounds_prompt_in_search_results() {
        let llm = MockLlmClient::with_responses(["rain on Tuesday, clear otherwise"]);
        let search = MockSearchClient::with_responses(["1. Oslo forecast: showers"]);
        let options = GenerationOptions::default();

        let result = synthesize(&llm, &search, &options, "Oslo").await.unwrap();
        assert_eq!(result.text, "rain on Tuesday, clear otherwise");

        let requests = llm.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].user.contains("1. Oslo forecast: showers"));
        assert_eq!(search.queries().len(), 1);
        assert!(search.queries()[0].contains("Oslo"));
    }

    #[tokio::test]
    async fn test_search_failure_skips_generation() {
        let llm = MockLlmClient::with_responses(["never used"]);
        let search = MockSearchClient::from_script(vec![Err(SearchError::Http(
            "connection refused".to_string(),
        ))]);
        let options = GenerationOptions::default();

        let err = synthesize(&llm, &search, &options, "Oslo")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            TravelPlanError::Stage {
                stage: Stage::Forecast,
                ..
            }
        ));
        assert!(err.to_string().contains("connection refused"));
        assert!(llm.requests().is_empty());
    }
}
