//! S.A.G.E server entry point: load configuration, ingest the corpus,
//! and serve the chat API.

use anyhow::Context;
use clap::Parser;
use owo_colors::OwoColorize;
use sage::{
    api,
    db::{DocumentStore, InMemoryVectorStore},
    llm::Provider,
    rag::{embeddings, ingest, RagOptions, RagPipeline},
    AppState, Config, SessionRegistry,
};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sage-server", version, about)]
struct Args {
    /// Path to the CSV corpus (overrides CORPUS_PATH)
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Bind host (overrides HOST)
    #[arg(long)]
    host: Option<String>,

    /// Bind port (overrides PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Suppress the startup banner
    #[arg(long)]
    no_banner: bool,
}

fn banner() {
    println!(
        r#"
   {}
   {}
   {}
   {}
"#,
        r"  ____    _    ____ _____ ".bright_cyan().bold(),
        r" / ___|  / \  / ___| ____|".bright_cyan().bold(),
        r" \___ \ / _ \| |_ ||  _|  ".cyan().bold(),
        r" |____/_/ \_\ \____|_____|".blue().bold(),
    );
    println!(
        "   {} {}\n",
        "Security Advisory Generation Engine".bright_white().bold(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    if !args.no_banner {
        banner();
    }

    let mut config = Config::from_env().context("failed to load configuration")?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(csv) = args.csv {
        config.rag.corpus_path = csv.display().to_string();
    }

    let embeddings = build_embeddings(&config)?;
    info!(
        model = embeddings.model_name(),
        dimensions = embeddings.dimensions(),
        "embedding provider ready"
    );

    let vectors = Arc::new(InMemoryVectorStore::new(config.embeddings.dimensions));
    let documents = Arc::new(DocumentStore::new());

    let corpus_path = PathBuf::from(&config.rag.corpus_path);
    let ingested = ingest::ingest_csv(
        &corpus_path,
        embeddings.as_ref(),
        vectors.as_ref(),
        documents.as_ref(),
        &config.rag.namespace,
    )
    .await
    .context("corpus ingestion failed")?;
    info!(documents = ingested, corpus = %config.rag.corpus_path, "corpus ready");

    let provider = Provider::OpenRouter {
        api_key: config.llm.api_key.clone(),
        api_base: config.llm.api_base.clone(),
        model: config.llm.model.clone(),
    };
    info!(provider = provider.name(), model = %config.llm.model, "completion provider ready");
    let completion: Arc<dyn sage::CompletionClient> = Arc::from(provider.create_client());

    let pipeline = Arc::new(RagPipeline::new(
        embeddings,
        vectors,
        documents,
        completion,
        RagOptions {
            system_prompt: config.rag.system_prompt.clone(),
            namespace: config.rag.namespace.clone(),
            top_k: config.rag.top_k,
        },
    ));

    let state = AppState {
        pipeline,
        sessions: Arc::new(SessionRegistry::new(config.rag.memory_capacity)),
    };

    let app = api::create_router()
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!(%addr, "listening");

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

#[cfg(feature = "local-embeddings")]
fn build_embeddings(_config: &Config) -> anyhow::Result<Arc<dyn sage::EmbeddingProvider>> {
    let provider =
        embeddings::FastembedEmbeddings::new().context("failed to load local embedding model")?;
    Ok(Arc::new(provider))
}

#[cfg(not(feature = "local-embeddings"))]
fn build_embeddings(config: &Config) -> anyhow::Result<Arc<dyn sage::EmbeddingProvider>> {
    Ok(Arc::new(embeddings::HttpEmbeddings::new(
        config.embeddings.api_key.clone(),
        config.embeddings.api_base.clone(),
        config.embeddings.model.clone(),
        config.embeddings.dimensions,
    )))
}
