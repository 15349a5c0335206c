use serde::{Deserialize, Serialize};

/// System instruction shared by every itinerary request
pub const SYSTEM_INSTRUCTION: &str = r#"You are my travel budget assistant. I need information about staying in [Destination].

Please include:
- Average hotel costs (budget, mid-range, luxury)
- Recommended hotel areas (safe, convenient, good connectivity)
- Estimated daily food expenses (budget/mid-range/high-end)
- Transportation costs (public transport, taxis, ride-share)
- Any local money-saving tips (passes, cards, etc.)
- Rough total daily budget ranges (budget/mid-range/luxury traveler)

Present the results in a comparison table format if possible and keep it in short and keep the currency in INR."#;

/// Moderate sampling: favours varied suggestions over deterministic output
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HarmCategory {
    #[serde(rename = "HARM_CATEGORY_HARASSMENT")]
    Harassment,
    #[serde(rename = "HARM_CATEGORY_HATE_SPEECH")]
    HateSpeech,
    #[serde(rename = "HARM_CATEGORY_SEXUALLY_EXPLICIT")]
    SexuallyExplicit,
    #[serde(rename = "HARM_CATEGORY_DANGEROUS_CONTENT")]
    DangerousContent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockThreshold {
    BlockLowAndAbove,
    BlockMediumAndAbove,
    BlockOnlyHigh,
    BlockNone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetySetting {
    pub category: HarmCategory,
    pub threshold: BlockThreshold,
}

/// Configuration applied to every text-generation call
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub system_instruction: String,
    pub temperature: f32,
    pub safety_settings: Vec<SafetySetting>,
    /// Ground responses with web search results
    pub search_grounding: bool,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        let safety_settings = [
            HarmCategory::Harassment,
            HarmCategory::HateSpeech,
            HarmCategory::SexuallyExplicit,
            HarmCategory::DangerousContent,
        ]
        .into_iter()
        .map(|category| SafetySetting {
            category,
            threshold: BlockThreshold::BlockMediumAndAbove,
        })
        .collect();

        Self {
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            safety_settings,
            search_grounding: true,
        }
    }
}

impl GenerationSettings {
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_search_grounding(mut self, enabled: bool) -> Self {
        self.search_grounding = enabled;
        self
    }
}
