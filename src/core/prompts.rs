//! Prompt templates for the itinerary sections and the final document layout.

use crate::error::Result;
use crate::types::PreferencesRecord;

pub fn destination_suggestion(preferences: &PreferencesRecord) -> Result<String> {
    let preferences_json = serde_json::to_string(preferences)?;
    Ok(format!(
        "Suggest ONE single best destination in India based on these preferences.\n\
         Provide only the name of the destination (e.g., \"Auli, Uttarakhand\"). Do not add any other text.\n\
         \n\
         Preferences: {preferences_json}"
    ))
}

pub fn destination_overview(destination: &str, preferences: &PreferencesRecord) -> String {
    format!(
        "Provide a concise overview for a trip to {destination} in {time_of_year}.\n\
         Include these points in a bulleted list:\n\
         - Safety, Weather, Festivals/Events, Restrictions, Culture (1-2 do's/don'ts), Best Visit Time.",
        time_of_year = preferences.time_of_year,
    )
}

pub fn daily_itinerary(destination: &str, preferences: &PreferencesRecord) -> String {
    format!(
        "Create a detailed day-by-day suggested itinerary for a {duration} trip to {destination}.\n\
         The theme is '{themes}' for a '{travellers}'.\n\
         Include timings (morning/afternoon/evening) and weather-dependent alternatives.",
        duration = preferences.travel_duration,
        themes = preferences.travel_themes,
        travellers = preferences.travellers,
    )
}

pub fn budget_and_logistics(destination: &str, preferences: &PreferencesRecord) -> String {
    format!(
        "Provide a cost and logistics breakdown for a trip to {destination} on a budget of {budget}.\n\
         Use these headings:\n\
         ### Accommodation (Recommended areas, average costs)\n\
         ### Food (Estimated daily expenses)\n\
         ### Transportation (Local travel details)\n\
         ### Budget Summary (Daily budget range, money-saving tips)",
        budget = preferences.budget,
    )
}

pub fn final_document(destination: &str, overview: &str, daily: &str, budget: &str) -> String {
    let document = format!(
        "# Your Adventure Trip Plan to {destination}\n\
         Here is a comprehensive travel plan tailored to your preferences.\n\
         \n\
         ---\n\
         ## 📌 Destination Overview\n\
         {overview}\n\
         ---\n\
         ## 📅 Day-by-Day Suggested Itinerary\n\
         {daily}\n\
         ---\n\
         ## 💰 Budget and Logistics Breakdown\n\
         {budget}\n\
         ---\n\
         **Disclaimer:** All costs are estimates and subject to change. Please verify details before booking."
    );
    document.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefs() -> PreferencesRecord {
        PreferencesRecord::new(
            "December",
            "5 Days",
            "50000 rupees per head",
            "adventure, food",
            "Adults: 3",
        )
        .with_destination("Unsure")
    }

    #[test]
    fn suggestion_prompt_embeds_labelled_preferences() {
        let prompt = destination_suggestion(&prefs()).unwrap();
        assert!(prompt.starts_with("Suggest ONE single best destination in India"));
        assert!(prompt.contains(r#""Time of Year":"December""#));
        assert!(prompt.contains(r#""Destination":"Unsure""#));
    }

    #[test]
    fn section_prompts_are_conditioned_on_their_inputs() {
        let p = prefs();
        let overview = destination_overview("Goa", &p);
        assert!(overview.contains("trip to Goa in December"));

        let daily = daily_itinerary("Goa", &p);
        assert!(daily.contains("5 Days trip to Goa"));
        assert!(daily.contains("'adventure, food' for a 'Adults: 3'"));

        let budget = budget_and_logistics("Goa", &p);
        assert!(budget.contains("budget of 50000 rupees per head"));
        for heading in [
            "### Accommodation",
            "### Food",
            "### Transportation",
            "### Budget Summary",
        ] {
            assert!(budget.contains(heading), "{heading}");
        }
    }

    #[test]
    fn final_document_layout() {
        let doc = final_document("Goa", "OVERVIEW", "DAILY", "BUDGET");
        let mut lines = doc.lines();
        assert_eq!(lines.next(), Some("# Your Adventure Trip Plan to Goa"));
        assert!(doc.ends_with("Please verify details before booking."));
        assert!(doc.contains("## 📌 Destination Overview\nOVERVIEW\n---"));
        assert!(doc.contains("## 📅 Day-by-Day Suggested Itinerary\nDAILY\n---"));
        assert!(doc.contains("## 💰 Budget and Logistics Breakdown\nBUDGET\n---"));
    }
}
