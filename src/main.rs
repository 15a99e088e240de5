use std::env;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use tripcast::{PlannerConfig, TravelPlanner};

fn print_usage() {
    eprintln!("Usage: tripcast <LOCATION> [PREFERENCE...]");
    eprintln!();
    eprintln!("  LOCATION     e.g. \"Paris, France\"");
    eprintln!("  PREFERENCE   optional free text, e.g. \"outdoor activities, avoid rain\"");
    eprintln!();
    eprintln!("Requires GEMINI_API_KEY and SERPER_API_KEY in the environment.");
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(location) = args.first() else {
        print_usage();
        return ExitCode::from(2);
    };
    let preference = if args.len() > 1 {
        Some(args[1..].join(" "))
    } else {
        None
    };

    match run(location, preference.as_deref()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(location: &str, preference: Option<&str>) -> tripcast::Result<()> {
    let config = PlannerConfig::from_env()?;
    let planner = TravelPlanner::from_config(&config)?;

    println!("Analyzing weather and preparing recommendations for {location}...");
    let outcome = planner.plan(location, preference).await?;

    println!();
    println!("== Weather Analysis ==");
    println!();
    println!("{}", outcome.forecast_report.text);
    println!();
    println!("== Travel Recommendations ==");
    println!();
    println!("{}", outcome.itinerary.text);

    Ok(())
}
