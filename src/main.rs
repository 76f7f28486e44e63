//! Quix context CLI
//!
//! Resolves the context of one chat against the configured backend and
//! prints it as JSON.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use quix::api::HttpChatApi;
use quix::cache::{CacheRegistry, ContextCache};
use quix::{ChatContext, ChatKind, ChatRef, Config, ContextState};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Debug, Parser)]
#[command(name = "quix", about = "Resolve the context of a Quix chat")]
struct Cli {
    /// `group` or `direct`
    kind: ChatKind,

    /// Group id, or the other user's id for a direct chat
    chat_id: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report<'a> {
    #[serde(flatten)]
    state: &'a ContextState,
    members_count: usize,
    pins_count: usize,
    resources_count: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load .env file first (before anything else)
    dotenvy::dotenv().ok();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("quix=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    info!("Using backend {}", config.api_url);

    let mut api = match config.request_timeout {
        Some(timeout) => HttpChatApi::with_timeout(config.api_url.clone(), timeout)?,
        None => HttpChatApi::new(config.api_url.clone())?,
    };
    if let Some(token) = &config.api_token {
        api = api.bearer_token(token.clone());
    }

    let store = ContextCache::new(CacheRegistry::global(), config.context_cache())?;
    let context = ChatContext::with_api(Arc::new(api), Arc::new(store));

    let chat = ChatRef {
        chat_id: cli.chat_id,
        kind: cli.kind,
    };
    info!("Resolving context for {}", chat);

    context.select(Some(chat));
    let state = context.settled().await;

    let report = Report {
        state: &state,
        members_count: state.members_count(),
        pins_count: state.pins_count(),
        resources_count: state.resources_count(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    if let Some(message) = &state.error {
        error!("{}", message);
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
