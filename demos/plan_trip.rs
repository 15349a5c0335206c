use trip_planner_rs::{ItineraryPlanner, TripForm};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::try_init().ok();

    let planner = ItineraryPlanner::from_env()?;

    println!("=== Trip Planner Demo ===\n");

    let form = TripForm::demo();
    let preferences = form.into_preferences(chrono::Local::now().date_naive())?;
    println!(
        "Preferences:\n{}\n",
        serde_json::to_string_pretty(&preferences)?
    );

    let itinerary = planner.generate(&preferences).await?;

    println!("Destination: {}\n", itinerary.destination);
    println!("{}", itinerary.final_document);

    Ok(())
}
