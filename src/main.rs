//! BrandVibe terminal driver.
//!
//! Runs one poster conversation over stdin/stdout:
//!
//! ```text
//! brandvibe [BRAND_KIT_JSON]
//! ```
//!
//! Without a Gemini key the conversation runs against scripted offline
//! providers.

use std::error::Error;
use std::sync::Arc;

use serde_json::json;
use tokio::io::{stdin, AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use brandvibe::adapters::{
    GeminiImageGenerator, GeminiProvider, InMemoryBrandCatalog, InMemoryPosterSessionRepository,
    MockAIProvider, MockImageGenerator,
};
use brandvibe::application::{
    PosterConversationEngine, RefinePosterCommand, RefinePosterHandler, ReplyOutcome,
    ReplyToPosterCommand, ReplyToPosterHandler, SelectImageVersionCommand,
    SelectImageVersionHandler, SessionTurnLocks, StartPosterCommand, StartPosterHandler,
};
use brandvibe::config::AppConfig;
use brandvibe::domain::brand::{BrandColors, BrandContext};
use brandvibe::domain::foundation::{BrandKitId, CommandMetadata, PosterSessionId, UserId};
use brandvibe::domain::poster::{PosterSession, PosterStage};
use brandvibe::ports::{AIProvider, ImageGenerator};

type Input = Lines<BufReader<Stdin>>;

struct Handlers {
    start: StartPosterHandler<dyn AIProvider>,
    reply: ReplyToPosterHandler<dyn AIProvider>,
    refine: RefinePosterHandler<dyn AIProvider>,
    select: SelectImageVersionHandler,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config);

    let (provider, images) = build_providers(&config)?;
    let brand = match std::env::args().nth(1) {
        Some(path) => InMemoryBrandCatalog::load_brand_file(&path).await?,
        None => demo_brand()?,
    };
    info!(brand = %brand.company_name(), "Brand kit loaded");

    let brand_kit_id = *brand.id();
    let user_id = brand.owner().clone();
    let brands = Arc::new(InMemoryBrandCatalog::with_brands([brand]));
    let repository = Arc::new(InMemoryPosterSessionRepository::new());
    let locks = SessionTurnLocks::new();
    let engine = Arc::new(
        PosterConversationEngine::new(provider).with_config(config.poster.engine_config()),
    );

    let handlers = Handlers {
        start: StartPosterHandler::new(engine.clone(), brands.clone(), repository.clone()),
        reply: ReplyToPosterHandler::new(
            engine.clone(),
            brands.clone(),
            images.clone(),
            repository.clone(),
            locks.clone(),
        ),
        refine: RefinePosterHandler::new(engine, brands, images, repository.clone(), locks.clone()),
        select: SelectImageVersionHandler::new(repository, locks),
    };

    let mut input = BufReader::new(stdin()).lines();
    run_conversation(&handlers, &mut input, brand_kit_id, user_id).await
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.runtime.log_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.is_production() {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn build_providers(
    config: &AppConfig,
) -> Result<(Arc<dyn AIProvider>, Arc<dyn ImageGenerator>), Box<dyn Error>> {
    match (config.ai.gemini(), config.ai.api_key()) {
        (Some(text), Some(key)) => {
            let image = config.image.gemini(key, &config.ai.base_url);
            info!(model = %text.model, image_model = %image.model, "Using Gemini providers");
            let provider: Arc<dyn AIProvider> = Arc::new(GeminiProvider::new(text)?);
            let images: Arc<dyn ImageGenerator> = Arc::new(GeminiImageGenerator::new(image)?);
            Ok((provider, images))
        }
        _ => {
            warn!("No Gemini API key configured, running with scripted offline providers");
            let provider: Arc<dyn AIProvider> = Arc::new(offline_script());
            let images: Arc<dyn ImageGenerator> = Arc::new(MockImageGenerator::new());
            Ok((provider, images))
        }
    }
}

/// Replies for one offline walk-through: an opening question, a ready
/// turn, then a few edits. Synthesis calls receive the default mock reply
/// and fall back to the deterministic prompt builder.
fn offline_script() -> MockAIProvider {
    let mut provider = MockAIProvider::new()
        .with_json_response(json!({
            "questions": ["What size should the poster be, and what is the main message?"],
            "gatheredInfo": { "mood": "inviting" }
        }))
        .with_json_response(json!({
            "isReady": true,
            "updatedInfo": { "dimensions": "1080x1080", "targetAudience": "local customers" }
        }))
        .with_response("");
    for _ in 0..5 {
        provider = provider
            .with_json_response(json!({
                "updatedInfo": {},
                "explanation": "Applied your edit to the design."
            }))
            .with_response("");
    }
    provider
}

fn demo_brand() -> Result<BrandContext, Box<dyn Error>> {
    let brand = BrandContext::new(BrandKitId::new(), UserId::new("local-user")?, "Demo Roasters")?
        .with_description("Small-batch coffee roaster")
        .with_tagline("Roasted this morning")
        .with_tone("warm and friendly")
        .with_audience("Coffee lovers in the neighbourhood")
        .with_colors(BrandColors {
            primary: Some("#3b2f2f".to_string()),
            secondary: Some("#f5e6d3".to_string()),
            accent: Some("#c0813f".to_string()),
            palette: Vec::new(),
        });
    Ok(brand)
}

async fn run_conversation(
    handlers: &Handlers,
    input: &mut Input,
    brand_kit_id: BrandKitId,
    user_id: UserId,
) -> Result<(), Box<dyn Error>> {
    let metadata = CommandMetadata::new(user_id).with_source("cli");

    println!("Describe the poster you want:");
    let Some(description) = next_line(input).await? else {
        return Ok(());
    };

    let started = handlers
        .start
        .handle(StartPosterCommand { brand_kit_id, description }, metadata.clone())
        .await?;
    let session_id = *started.session.id();
    for question in &started.questions {
        println!("? {}", question);
    }

    let mut session = started.session;
    while let Some(line) = next_line(input).await? {
        if line == "/quit" {
            break;
        }
        match step(handlers, &session, session_id, line, &metadata).await {
            Ok(updated) => session = updated,
            Err(e) => eprintln!("error: {}", e),
        }
    }

    print_versions(&session);
    Ok(())
}

/// Routes one line of input by stage and returns the updated session.
async fn step(
    handlers: &Handlers,
    session: &PosterSession,
    session_id: PosterSessionId,
    line: String,
    metadata: &CommandMetadata,
) -> Result<PosterSession, Box<dyn Error>> {
    if session.stage() == PosterStage::Gathering {
        let result = handlers
            .reply
            .handle(ReplyToPosterCommand { session_id, message: line }, metadata.clone())
            .await?;
        match &result.outcome {
            ReplyOutcome::NextQuestion(question) => println!("? {}", question),
            ReplyOutcome::Generated(version) => {
                println!("Poster ready: {}", version.image_url);
                println!("Prompt: {}", version.prompt);
                println!("Describe an edit, /select N to pick a version, /quit to finish.");
            }
        }
        return Ok(result.session);
    }

    if let Some(index) = line.strip_prefix("/select ") {
        let index: usize = index.trim().parse()?;
        let result = handlers
            .select
            .handle(SelectImageVersionCommand { session_id, index }, metadata.clone())
            .await?;
        println!("Selected version {}: {}", index, result.selected.image_url);
        return Ok(result.session);
    }

    let result = handlers
        .refine
        .handle(RefinePosterCommand { session_id, edit_request: line }, metadata.clone())
        .await?;
    println!("{}", result.explanation);
    println!("New version: {}", result.version.image_url);
    Ok(result.session)
}

fn print_versions(session: &PosterSession) {
    for (index, version) in session.image_versions().iter().enumerate() {
        let marker = if Some(index) == session.current_version_index() { "*" } else { " " };
        println!("{} [{}] {:?} {}", marker, index, version.status, version.image_url);
    }
}

async fn next_line(input: &mut Input) -> Result<Option<String>, std::io::Error> {
    while let Some(line) = input.next_line().await? {
        let line = line.trim();
        if !line.is_empty() {
            return Ok(Some(line.to_string()));
        }
    }
    Ok(None)
}
