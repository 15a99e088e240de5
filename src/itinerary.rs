//! Itinerary composer stage
//!
//! Second stage of the pipeline: one generation call that reworks the
//! forecast text into a day-by-day itinerary, honoring the traveler's
//! preference when one was given.

use tracing::{debug, info};

use crate::error::Stage;
use crate::llm::{GenerationOptions, LlmClient, LlmRequest, MAX_PROMPT_LOG_CHARS, truncate_for_log};
use crate::models::StageResult;
use crate::{Result, TravelPlanError};

const SYSTEM_PROMPT: &str = "You are an AI travel concierge, blending meteorological \
insight with cultural knowledge to craft memorable journeys. You optimize daily plans \
around the forecast, and when conditions shift you recommend the best indoor \
experiences, scenic alternatives, or hidden gems matching the traveler's interests.";

/// Build the (system, user) prompt pair for the itinerary stage.
///
/// The forecast text and, when present, the preference are embedded
/// verbatim.
pub(crate) fn build_prompt(
    location: &str,
    forecast_text: &str,
    preference: Option<&str>,
) -> (String, String) {
    let preference_step = match preference {
        Some(preference) => {
            format!("Take this traveler preference into account: {preference}")
        }
        None => format!(
            "No specific preference was given; highlight the best experiences in {location} \
             for this forecast."
        ),
    };

    let user = format!(
        "Itinerary request for {location}.\n\
         \n\
         1. Review the weather analysis below and understand the forecast.\n\
         2. {preference_step}\n\
         3. Adjust the itinerary day by day, suggesting the best times for outdoor \
         activities or alternative plans for indoor experiences.\n\
         4. Make sure the itinerary maximizes the traveler's experience while avoiding \
         weather disruptions.\n\
         \n\
         Expected output: a dynamic, weather-adjusted travel itinerary with \
         recommendations for activities, routes, and optimal timing.\n\
         \n\
         Weather analysis:\n\
         {forecast_text}\n"
    );
    (SYSTEM_PROMPT.to_string(), user)
}

/// Run the itinerary stage.
///
/// Consumes the forecast stage's text as context; same fail-fast policy as
/// the forecast stage.
pub async fn compose<L: LlmClient>(
    llm: &L,
    options: &GenerationOptions,
    location: &str,
    forecast_text: &str,
    preference: Option<&str>,
) -> Result<StageResult> {
    let (system, user) = build_prompt(location, forecast_text, preference);
    if tracing::enabled!(tracing::Level::DEBUG) {
        debug!(
            user_prompt = %truncate_for_log(&user, MAX_PROMPT_LOG_CHARS),
            "itinerary prompt"
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
        .map_err(|e| TravelPlanError::stage(Stage::Itinerary, e.to_string()))?;

    info!(itinerary_len = text.len(), "itinerary composed");
    Ok(StageResult::new(text))
}
