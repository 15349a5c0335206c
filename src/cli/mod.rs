use crate::{
    config::PlannerConfig,
    server::{self, AppState},
    store::InMemoryTripStore,
    types::TripForm,
    ItineraryPlanner,
};
use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// CLI entry point for the trip-planner tool
pub async fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let matches = command().get_matches();
    let config = resolve_config(&matches)?;

    match matches.subcommand() {
        Some(("serve", sub)) => serve(config, sub).await,
        Some(("plan", sub)) => plan(config, sub).await,
        _ => unreachable!("subcommand is required"),
    }
}

fn command() -> Command {
    Command::new("trip-planner")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate travel itineraries with Gemini")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("api-key")
                .short('k')
                .long("api-key")
                .global(true)
                .value_name("KEY")
                .help("Gemini API key (or set GOOGLE_API_KEY / GEMINI_API_KEY)"),
        )
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .global(true)
                .value_name("MODEL")
                .help("Gemini model to use (or set GEMINI_MODEL)"),
        )
        .arg(
            Arg::new("base-url")
                .short('u')
                .long("base-url")
                .global(true)
                .value_name("URL")
                .help("Gemini API base URL (or set GEMINI_BASE_URL)"),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .global(true)
                .value_name("SECONDS")
                .value_parser(value_parser!(u64))
                .help("Request timeout in seconds"),
        )
        .subcommand(
            Command::new("serve").about("Run the HTTP API").arg(
                Arg::new("listen")
                    .short('l')
                    .long("listen")
                    .value_name("ADDR")
                    .value_parser(value_parser!(SocketAddr))
                    .help("Address to bind (or set PLANNER_LISTEN)"),
            ),
        )
        .subcommand(
            Command::new("plan")
                .about("Generate one itinerary and print it")
                .arg(
                    Arg::new("destination")
                        .short('d')
                        .long("destination")
                        .value_name("PLACE")
                        .help("Destination; leave out to have one suggested"),
                )
                .arg(
                    Arg::new("start")
                        .long("start")
                        .value_name("YYYY-MM-DD")
                        .value_parser(parse_date),
                )
                .arg(
                    Arg::new("end")
                        .long("end")
                        .value_name("YYYY-MM-DD")
                        .value_parser(parse_date),
                )
                .arg(
                    Arg::new("budget")
                        .short('b')
                        .long("budget")
                        .value_name("RUPEES")
                        .value_parser(value_parser!(u32))
                        .default_value("25000")
                        .help("Budget per person in rupees"),
                )
                .arg(
                    Arg::new("adults")
                        .long("adults")
                        .value_parser(value_parser!(u32))
                        .default_value("2"),
                )
                .arg(
                    Arg::new("children")
                        .long("children")
                        .value_parser(value_parser!(u32))
                        .default_value("0"),
                )
                .arg(
                    Arg::new("interest")
                        .short('i')
                        .long("interest")
                        .value_name("THEME")
                        .action(ArgAction::Append)
                        .help("Travel theme, repeatable (heritage, adventure, nightlife, food, family, luxury)"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print the whole itinerary document as JSON"),
                ),
        )
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|err| format!("expected YYYY-MM-DD: {err}"))
}

fn resolve_config(matches: &ArgMatches) -> anyhow::Result<PlannerConfig> {
    let mut config = PlannerConfig::from_env_with_key(matches.get_one::<String>("api-key").cloned())
        .context("API key is required. Set GOOGLE_API_KEY or GEMINI_API_KEY, or use --api-key")?;

    if let Some(model) = matches.get_one::<String>("model") {
        config = config.with_model(model.as_str());
    }
    if let Some(base_url) = matches.get_one::<String>("base-url") {
        config = config.with_base_url(base_url.as_str());
    }
    if let Some(timeout) = matches.get_one::<u64>("timeout") {
        config = config.with_timeout(Duration::from_secs(*timeout));
    }
    Ok(config)
}

async fn serve(config: PlannerConfig, matches: &ArgMatches) -> anyhow::Result<()> {
    let listen = matches
        .get_one::<SocketAddr>("listen")
        .copied()
        .unwrap_or(config.listen);

    info!("Using model: {}", config.model);
    info!("Base URL: {}", config.base_url);

    let planner = ItineraryPlanner::from_config(&config)?;
    let state = AppState::new(planner, Arc::new(InMemoryTripStore::new()));
    server::serve(listen, state).await
}

async fn plan(config: PlannerConfig, matches: &ArgMatches) -> anyhow::Result<()> {
    let form = TripForm {
        destination: matches.get_one::<String>("destination").cloned(),
        start: matches.get_one::<NaiveDate>("start").copied(),
        end: matches.get_one::<NaiveDate>("end").copied(),
        budget_per_head: matches.get_one::<u32>("budget").copied().unwrap_or(25_000),
        adults: matches.get_one::<u32>("adults").copied().unwrap_or(2),
        children: matches.get_one::<u32>("children").copied().unwrap_or(0),
        interests: matches
            .get_many::<String>("interest")
            .map(|values| values.cloned().collect())
            .unwrap_or_default(),
    };
    let preferences = form.into_preferences(Local::now().date_naive())?;

    info!("Planning trip with preferences: {:?}", preferences);
    info!("Using model: {}", config.model);

    let planner = ItineraryPlanner::from_config(&config)?;
    match planner.generate(&preferences).await {
        Ok(document) => {
            if matches.get_flag("json") {
                println!("{}", serde_json::to_string_pretty(&document)?);
            } else {
                println!("{}", document.final_document);
            }
            info!("Itinerary generated for {}", document.destination);
            Ok(())
        }
        Err(e) => {
            error!("Itinerary generation failed: {}", e);
            Err(e.into())
        }
    }
}
