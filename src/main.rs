//! Form Assistant server binary.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use form_assistant::adapters::ai::{DisabledAIProvider, OpenAIConfig, OpenAIProvider};
use form_assistant::adapters::deadlines::InMemoryDeadlineCalendar;
use form_assistant::adapters::forms::{CatalogSchemaResolver, TemplateCatalog};
use form_assistant::adapters::http::{app_router, ChatAppState};
use form_assistant::adapters::sessions::{InMemorySessionRepository, RedisSessionRepository};
use form_assistant::adapters::students::InMemoryStudentDirectory;
use form_assistant::application::{ProcessTurnConfig, ProcessTurnHandler, StartSessionHandler};
use form_assistant::config::{AiProvider, AppConfig, SessionBackend};
use form_assistant::ports::{AIProvider, SchemaResolver, SessionRepository};
use secrecy::ExposeSecret;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let sessions = session_store(&config).await?;
    let ai_provider = text_generator(&config)?;

    let templates = TemplateCatalog::new();
    if let Some(path) = &config.forms.templates_path {
        let loaded = templates.load_yaml(path).await?;
        info!(count = loaded, path = %path.display(), "templates loaded");
    }
    let schemas: Arc<dyn SchemaResolver> = Arc::new(CatalogSchemaResolver::new(templates));
    let deadlines = Arc::new(InMemoryDeadlineCalendar::with_deadlines(
        config.forms.deadline_entries()?,
    ));
    let directory = Arc::new(InMemoryStudentDirectory::new());
    let default_form = config.forms.default_form()?;

    let start_session = StartSessionHandler::new(sessions.clone(), schemas.clone(), deadlines.clone())
        .with_default_form(default_form.clone());
    let process_turn = ProcessTurnHandler::new(
        sessions.clone(),
        schemas.clone(),
        ai_provider,
        directory,
        deadlines,
    )
    .with_config(ProcessTurnConfig {
        reason_timeout: config.ai.reason_timeout(),
        max_tokens: config.ai.max_tokens,
        temperature: config.ai.temperature,
        deadline_warning_days: config.forms.deadline_warning_days,
        default_form,
    });

    let state = ChatAppState::new(start_session, process_turn, sessions, schemas);
    let app = app_router(state, &config.server);

    let addr = config.server.socket_addr()?;
    info!(%addr, environment = ?config.server.environment, "starting form assistant");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.server.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if config.is_production() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}

async fn session_store(
    config: &AppConfig,
) -> Result<Arc<dyn SessionRepository>, Box<dyn std::error::Error>> {
    match (config.sessions.backend, &config.redis) {
        (SessionBackend::Redis, Some(redis)) => {
            let repo = tokio::time::timeout(
                redis.timeout(),
                RedisSessionRepository::connect(&redis.url, config.sessions.ttl()),
            )
            .await??;
            info!("sessions stored in redis");
            Ok(Arc::new(repo))
        }
        _ => {
            info!(max_sessions = config.sessions.max_sessions, "sessions stored in memory");
            Ok(Arc::new(InMemorySessionRepository::new(
                config.sessions.ttl(),
                config.sessions.max_sessions,
            )))
        }
    }
}

fn text_generator(config: &AppConfig) -> Result<Arc<dyn AIProvider>, Box<dyn std::error::Error>> {
    match (config.ai.provider, &config.ai.openai_api_key) {
        (AiProvider::OpenAI, Some(key)) => {
            let provider = OpenAIProvider::new(
                OpenAIConfig::new(key.expose_secret().clone())
                    .with_model(config.ai.model.clone())
                    .with_base_url(config.ai.base_url.clone())
                    .with_timeout(config.ai.timeout())
                    .with_max_retries(config.ai.max_retries),
            )?;
            info!(model = %config.ai.model, "text generation via openai");
            Ok(Arc::new(provider))
        }
        _ => {
            info!("text generation disabled");
            Ok(Arc::new(DisabledAIProvider::new()))
        }
    }
}
