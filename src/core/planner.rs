use std::sync::Arc;
use std::time::Instant;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::{
    config::PlannerConfig,
    core::prompts,
    error::{PlannerError, Result},
    services::{GeminiClient, TextGenerator},
    types::{ItineraryDocument, PreferencesRecord},
};

/// Used as the destination when the suggestion request comes back empty
pub const FALLBACK_DESTINATION: &str = "Unknown error generating data";

/// The three independently generated parts of an itinerary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Overview,
    Daily,
    Budget,
}

impl Section {
    pub fn label(self) -> &'static str {
        match self {
            Section::Overview => "destination overview",
            Section::Daily => "daily itinerary",
            Section::Budget => "budget and logistics",
        }
    }

    fn prompt(self, destination: &str, preferences: &PreferencesRecord) -> String {
        match self {
            Section::Overview => prompts::destination_overview(destination, preferences),
            Section::Daily => prompts::daily_itinerary(destination, preferences),
            Section::Budget => prompts::budget_and_logistics(destination, preferences),
        }
    }
}

/// Turns travel preferences into an [`ItineraryDocument`].
///
/// One optional destination-suggestion call runs first; the overview, daily
/// plan and budget sections are then requested concurrently and the planner
/// waits for all three. Any failed or empty section fails the whole request.
#[derive(Debug, Clone)]
pub struct ItineraryPlanner {
    generator: Arc<dyn TextGenerator>,
}

impl ItineraryPlanner {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub fn from_config(config: &PlannerConfig) -> Result<Self> {
        let client = GeminiClient::from_config(config)?;
        Ok(Self::new(Arc::new(client)))
    }

    pub fn from_env() -> Result<Self> {
        Self::from_config(&PlannerConfig::from_env()?)
    }

    pub async fn generate(&self, preferences: &PreferencesRecord) -> Result<ItineraryDocument> {
        let started = Instant::now();
        let destination = self.resolve_destination(preferences).await?;

        info!(
            target: "tripplanner::planner",
            destination = %destination,
            "requesting itinerary sections"
        );

        let overview = self.dispatch(Section::Overview, &destination, preferences);
        let daily = self.dispatch(Section::Daily, &destination, preferences);
        let budget = self.dispatch(Section::Budget, &destination, preferences);

        // On the first failure the remaining handles are dropped, which
        // detaches their tasks rather than aborting them.
        let (overview, daily, budget) = tokio::try_join!(
            collect_section(Section::Overview, overview),
            collect_section(Section::Daily, daily),
            collect_section(Section::Budget, budget),
        )?;

        info!(
            target: "tripplanner::planner",
            destination = %destination,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "itinerary ready"
        );

        Ok(ItineraryDocument::from_sections(
            destination,
            overview,
            daily,
            budget,
        ))
    }

    /// The user's destination, or a single suggested one when they were unsure.
    pub async fn resolve_destination(&self, preferences: &PreferencesRecord) -> Result<String> {
        if let Some(destination) = preferences.explicit_destination() {
            return Ok(destination.to_string());
        }

        let prompt = prompts::destination_suggestion(preferences)?;
        let suggestion = self.generator.generate(&prompt).await?;
        let suggestion = suggestion.trim();

        if suggestion.is_empty() {
            warn!(
                target: "tripplanner::planner",
                "destination suggestion was empty, using fallback"
            );
            return Ok(FALLBACK_DESTINATION.to_string());
        }

        debug!(target: "tripplanner::planner", suggestion, "destination suggested");
        Ok(suggestion.to_string())
    }

    fn dispatch(
        &self,
        section: Section,
        destination: &str,
        preferences: &PreferencesRecord,
    ) -> JoinHandle<Result<String>> {
        let generator = Arc::clone(&self.generator);
        let prompt = section.prompt(destination, preferences);
        tokio::spawn(async move { generator.generate(&prompt).await })
    }
}

async fn collect_section(section: Section, handle: JoinHandle<Result<String>>) -> Result<String> {
    let text = handle
        .await
        .map_err(|err| {
            PlannerError::Generation(format!("{} task did not complete: {err}", section.label()))
        })?
        .map_err(|err| match err {
            PlannerError::Generation(message) => {
                PlannerError::Generation(format!("{}: {message}", section.label()))
            }
            other => other,
        })?;

    if text.trim().is_empty() {
        return Err(PlannerError::Generation(format!(
            "{} came back empty",
            section.label()
        )));
    }

    Ok(text)
}
