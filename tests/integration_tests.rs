use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;
use trip_planner_rs::{
    ItineraryPlanner, PlannerError, PreferencesRecord, Result, TextGenerator,
    FALLBACK_DESTINATION,
};

#[derive(Debug, Clone, Copy)]
enum Reply {
    Text(&'static str),
    Fail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PromptKind {
    Suggestion,
    Overview,
    Daily,
    Budget,
}

fn classify(prompt: &str) -> PromptKind {
    if prompt.starts_with("Suggest ONE") {
        PromptKind::Suggestion
    } else if prompt.contains("concise overview") {
        PromptKind::Overview
    } else if prompt.contains("day-by-day") {
        PromptKind::Daily
    } else if prompt.contains("cost and logistics") {
        PromptKind::Budget
    } else {
        panic!("unexpected prompt: {prompt}")
    }
}

/// Deterministic generator that answers by prompt kind and records every call
#[derive(Debug)]
struct StubGenerator {
    suggestion: Reply,
    overview: Reply,
    daily: Reply,
    budget: Reply,
    delays: [Duration; 3],
    prompts: Mutex<Vec<String>>,
    completed: AtomicUsize,
}

impl StubGenerator {
    fn new() -> Self {
        Self {
            suggestion: Reply::Text("  Hampi, Karnataka\n"),
            overview: Reply::Text("OVERVIEW-TEXT"),
            daily: Reply::Text("DAILY-TEXT"),
            budget: Reply::Text("BUDGET-TEXT"),
            delays: [Duration::ZERO; 3],
            prompts: Mutex::new(Vec::new()),
            completed: AtomicUsize::new(0),
        }
    }

    fn with_suggestion(mut self, reply: Reply) -> Self {
        self.suggestion = reply;
        self
    }

    fn with_overview(mut self, reply: Reply) -> Self {
        self.overview = reply;
        self
    }

    fn with_daily(mut self, reply: Reply) -> Self {
        self.daily = reply;
        self
    }

    fn with_delays(mut self, overview: u64, daily: u64, budget: u64) -> Self {
        self.delays = [
            Duration::from_millis(overview),
            Duration::from_millis(daily),
            Duration::from_millis(budget),
        ];
        self
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        let kind = classify(prompt);
        let (reply, delay) = match kind {
            PromptKind::Suggestion => (self.suggestion, Duration::ZERO),
            PromptKind::Overview => (self.overview, self.delays[0]),
            PromptKind::Daily => (self.daily, self.delays[1]),
            PromptKind::Budget => (self.budget, self.delays[2]),
        };

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.completed.fetch_add(1, Ordering::SeqCst);

        match reply {
            Reply::Text(text) => Ok(text.to_string()),
            Reply::Fail => Err(PlannerError::Generation(format!("{kind:?} unavailable"))),
        }
    }
}

fn preferences() -> PreferencesRecord {
    PreferencesRecord::new(
        "December",
        "5 Days",
        "50000 rupees per head",
        "adventure, food",
        "Adults: 3",
    )
}

fn planner_with(stub: &Arc<StubGenerator>) -> ItineraryPlanner {
    ItineraryPlanner::new(stub.clone())
}

#[tokio::test]
async fn test_explicit_destination_skips_suggestion() {
    let stub = Arc::new(StubGenerator::new());
    let planner = planner_with(&stub);

    let doc = planner
        .generate(&preferences().with_destination("Goa"))
        .await
        .unwrap();

    assert_eq!(stub.calls(), 3);
    assert!(stub
        .prompts()
        .iter()
        .all(|p| classify(p) != PromptKind::Suggestion));
    assert_eq!(doc.destination, "Goa");
}

#[tokio::test]
async fn test_unsure_destination_is_resolved_first() {
    for destination in [None, Some("unsure"), Some("Unsure"), Some("UnSuRe")] {
        let stub = Arc::new(StubGenerator::new());
        let planner = planner_with(&stub);

        let mut prefs = preferences();
        prefs.destination = destination.map(str::to_string);
        let doc = planner.generate(&prefs).await.unwrap();

        let prompts = stub.prompts();
        assert_eq!(prompts.len(), 4, "{destination:?}");
        assert_eq!(classify(&prompts[0]), PromptKind::Suggestion);
        for prompt in &prompts[1..] {
            assert!(
                prompt.contains("Hampi, Karnataka"),
                "content prompt should use the trimmed suggestion: {prompt}"
            );
        }
        assert_eq!(doc.destination, "Hampi, Karnataka");
    }
}

#[tokio::test]
async fn test_whitespace_destination_is_passed_through() {
    let stub = Arc::new(StubGenerator::new());
    let planner = planner_with(&stub);

    let doc = planner
        .generate(&preferences().with_destination("   "))
        .await
        .unwrap();

    assert_eq!(stub.calls(), 3);
    assert!(stub
        .prompts()
        .iter()
        .all(|p| classify(p) != PromptKind::Suggestion));
    assert_eq!(doc.destination, "   ");
}

#[tokio::test]
async fn test_empty_suggestion_uses_fallback_destination() {
    let stub = Arc::new(StubGenerator::new().with_suggestion(Reply::Text("   ")));
    let planner = planner_with(&stub);

    let doc = planner.generate(&preferences()).await.unwrap();

    assert_eq!(doc.destination, FALLBACK_DESTINATION);
    assert_eq!(stub.calls(), 4);
    assert!(stub.prompts()[1..]
        .iter()
        .all(|p| p.contains(FALLBACK_DESTINATION)));
}

#[tokio::test]
async fn test_failed_suggestion_fails_before_fan_out() {
    let stub = Arc::new(StubGenerator::new().with_suggestion(Reply::Fail));
    let planner = planner_with(&stub);

    let err = planner.generate(&preferences()).await.unwrap_err();

    assert!(matches!(err, PlannerError::Generation(_)));
    assert_eq!(stub.calls(), 1);
}

#[tokio::test]
async fn test_final_document_composition() {
    let stub = Arc::new(StubGenerator::new());
    let planner = planner_with(&stub);

    let doc = planner
        .generate(&preferences().with_destination("Goa"))
        .await
        .unwrap();

    let title = doc.final_document.lines().next().unwrap();
    assert_eq!(title, "# Your Adventure Trip Plan to Goa");

    let text = &doc.final_document;
    for section in ["OVERVIEW-TEXT", "DAILY-TEXT", "BUDGET-TEXT"] {
        assert_eq!(text.matches(section).count(), 1, "{section}");
    }
    let overview_at = text.find("OVERVIEW-TEXT").unwrap();
    let daily_at = text.find("DAILY-TEXT").unwrap();
    let budget_at = text.find("BUDGET-TEXT").unwrap();
    assert!(overview_at < daily_at && daily_at < budget_at);

    assert_eq!(doc.overview, "OVERVIEW-TEXT");
    assert_eq!(doc.daily, "DAILY-TEXT");
    assert_eq!(doc.budget, "BUDGET-TEXT");
    assert!(text.ends_with("Please verify details before booking."));
}

#[tokio::test]
async fn test_any_failed_section_fails_the_request() {
    let stub = Arc::new(StubGenerator::new().with_daily(Reply::Fail));
    let planner = planner_with(&stub);

    let err = planner
        .generate(&preferences().with_destination("Goa"))
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), "GENERATION_ERROR");
    assert!(err.to_string().contains("daily itinerary"), "{err}");
}

#[tokio::test]
async fn test_empty_section_is_a_generation_error() {
    let stub = Arc::new(StubGenerator::new().with_overview(Reply::Text(" \n ")));
    let planner = planner_with(&stub);

    let err = planner
        .generate(&preferences().with_destination("Goa"))
        .await
        .unwrap_err();

    assert!(matches!(err, PlannerError::Generation(_)));
    assert!(err.to_string().contains("destination overview"), "{err}");
}

#[tokio::test]
async fn test_identical_inputs_give_identical_documents() {
    let stub = Arc::new(StubGenerator::new());
    let planner = planner_with(&stub);
    let prefs = preferences().with_destination("unsure");

    let first = planner.generate(&prefs).await.unwrap();
    let second = planner.generate(&prefs).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_vec(&first).unwrap(),
        serde_json::to_vec(&second).unwrap()
    );
}

#[tokio::test(start_paused = true)]
async fn test_sections_are_requested_concurrently() {
    let stub = Arc::new(StubGenerator::new().with_delays(10, 20, 30));
    let planner = planner_with(&stub);

    let started = Instant::now();
    planner
        .generate(&preferences().with_destination("Goa"))
        .await
        .unwrap();
    let elapsed = started.elapsed();

    assert!(elapsed >= Duration::from_millis(30), "{elapsed:?}");
    assert!(elapsed < Duration::from_millis(40), "{elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn test_failure_returns_without_waiting_for_slow_sections() {
    let stub = Arc::new(
        StubGenerator::new()
            .with_daily(Reply::Fail)
            .with_delays(1_000, 0, 1_000),
    );
    let planner = planner_with(&stub);

    let started = Instant::now();
    let result = planner
        .generate(&preferences().with_destination("Goa"))
        .await;
    assert!(result.is_err());
    assert!(started.elapsed() < Duration::from_millis(1_000));

    // the slow sections are detached, not cancelled
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(stub.completed.load(Ordering::SeqCst), 3);
}

#[test]
fn test_error_handling() {
    let error = PlannerError::Generation("Test error".to_string());
    assert_eq!(error.error_code(), "GENERATION_ERROR");
    assert!(error.to_string().contains("Test error"));

    let payload = error.to_error_payload();
    assert_eq!(payload["error"]["code"], "GENERATION_ERROR");
    assert_eq!(payload["error"]["retryable"], true);

    let input = PlannerError::InputShape("missing Budget".to_string());
    assert_eq!(input.to_error_payload()["error"]["retryable"], false);
}
