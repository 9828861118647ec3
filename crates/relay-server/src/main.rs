//! Relay Server Binary

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use relay_agents::{
    Agent, ContentAgent, DeveloperAgent, DuckDuckGoSearch, Generator, LlmClassifier,
    OpenAiGenerator, Router, SearchProvider,
};
use relay_server::{
    http, queue, worker, AppState, Config, JobStore, JsonlAuditLog, Pipeline,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    // Load config
    let config = Config::from_env();
    let addr: SocketAddr = config.bind_addr.parse()?;

    // Wire collaborators explicitly: generation backend, classifier, search.
    let make_generator = |model: &str| -> Arc<dyn Generator> {
        let key = config.openai_api_key.as_deref().unwrap_or_default();
        let mut generator = OpenAiGenerator::new(key, model);
        if let Some(base_url) = &config.openai_base_url {
            generator = generator.with_base_url(base_url);
        }
        Arc::new(generator)
    };

    let (router, worker_generator): (Router, Option<Arc<dyn Generator>>) =
        if config.openai_api_key.is_some() {
            let classifier = LlmClassifier::new(make_generator(&config.router_model));
            (
                Router::new(Arc::new(classifier)),
                Some(make_generator(&config.worker_model)),
            )
        } else {
            info!("no generation backend configured, running in degraded mode");
            (Router::fallback_only(), None)
        };

    let search: Option<Arc<dyn SearchProvider>> = Some(Arc::new(DuckDuckGoSearch::new()));
    let developer: Arc<dyn Agent> = Arc::new(DeveloperAgent::new(
        worker_generator.clone(),
        &config.output_dir,
    ));
    let content: Arc<dyn Agent> = Arc::new(ContentAgent::new(worker_generator, search));

    // Shared state: job store, dispatch queue, pipeline.
    let store = Arc::new(JobStore::new());
    let audit = Arc::new(JsonlAuditLog::new(&config.audit_log_path));
    let (dispatch_queue, receiver) = queue::channel();
    let pipeline = Arc::new(Pipeline::new(
        router,
        developer,
        content,
        store.clone(),
        audit,
    ));

    // Worker pool
    for worker_id in 0..config.workers {
        tokio::spawn(worker::run_worker(
            worker_id,
            receiver.clone(),
            pipeline.clone(),
        ));
    }
    info!(workers = config.workers, "worker pool started");

    // HTTP server
    let state = AppState::new(store, dispatch_queue, pipeline);
    let router = http::create_router(state);
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %addr, "HTTP server listening");
    http::serve(listener, router, shutdown_signal()).await?;
    info!("shutdown complete");

    Ok(())
}

/// Resolves on ctrl-c, letting the server drain in-flight requests.
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
        return;
    }
    info!("ctrl-c received, shutting down");
}
