mod analysis;
mod config;
mod errors;
mod extraction;
mod models;
mod nlp;
mod routes;
mod session;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::{Analyzer, PartialRatio};
use crate::config::Config;
use crate::extraction::PdfExtractor;
use crate::nlp::{Lexicon, RuleBasedPipeline};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Profiler v{}", env!("CARGO_PKG_VERSION"));

    // Lexicon must be available before the first analysis; a failed fetch is fatal.
    let lexicon = Lexicon::load(config.lexicon_path.as_deref(), config.lexicon_url.as_deref())
        .await
        .context("NLP lexicon unavailable")?;
    info!(
        "NLP lexicon ready ({} stopwords, {} gazetteer entries)",
        lexicon.stopwords.len(),
        lexicon.entities.len()
    );

    let analyzer = Analyzer::new(
        Arc::new(PdfExtractor),
        Arc::new(RuleBasedPipeline::new(lexicon)),
        Arc::new(PartialRatio),
        config.heuristics.clone(),
        config.section_header_pass,
    );
    if config.section_header_pass {
        info!("Header-driven section pass enabled (debug output only)");
    }

    let state = AppState::new(config.clone(), analyzer);

    // Abandoned sessions would otherwise live until restart.
    let sessions = state.sessions.clone();
    let max_idle = chrono::Duration::seconds(config.session_idle_secs as i64);
    let period = Duration::from_secs(config.session_idle_secs.clamp(1, 60));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            let purged = sessions.purge_idle(max_idle);
            if purged > 0 {
                info!("Expired {purged} idle session(s), {} active", sessions.len());
            }
        }
    });

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
