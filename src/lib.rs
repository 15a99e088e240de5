//! `TripCast` - Weather-aware AI travel itinerary planning
//!
//! This library runs a two-stage prompt pipeline: a forecast synthesizer
//! turns web search results into a travel-focused weather report, and an
//! itinerary composer turns that report into a day-by-day, weather-adjusted
//! travel plan. Both stages delegate text generation to an external service.

pub mod config;
pub mod error;
pub mod forecast;
pub mod itinerary;
pub mod llm;
pub mod models;
pub mod pipeline;
pub mod search;

// Re-export core types for public API
pub use config::{GenerationConfig, PlannerConfig, SearchApiConfig};
pub use error::{Stage, TravelPlanError};
pub use llm::{GenerationOptions, LlmClient};
pub use models::{PipelineOutcome, StageResult, TravelQuery};
pub use pipeline::{PipelineState, TravelPlanner};
pub use search::SearchClient;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TravelPlanError>;
