use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use faqd_server::{AppState, ServiceConfig, serve};
use faqd_store::{FaqStore, RealtimeStore};
use faqd_watsonx::{LLMProvider, WatsonxClient, WatsonxEmbeddings};

#[derive(Parser)]
#[command(name = "faqd")]
#[command(about = "FAQ and realtime document question-answering service", long_about = None)]
struct Cli {
    /// Address to bind, overrides FAQD_BIND
    #[arg(short, long)]
    bind: Option<std::net::SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = ServiceConfig::from_env()?;
    if let Some(bind) = cli.bind {
        config.bind = bind;
    }

    let mut embeddings = WatsonxEmbeddings::from_env()?;
    embeddings.connect().await?;
    let embeddings = Arc::new(embeddings);

    let mut llm = WatsonxClient::from_env()?;
    llm.connect().await?;
    let llm = Arc::new(llm);
    tracing::info!("watsonx providers connected");

    let faq = FaqStore::open(&config.faq_path, &config.faq_index_path, embeddings.clone()).await?;
    let realtime = RealtimeStore::open(
        &config.document_path,
        &config.document_index_path,
        &config.history_path,
        &config.prompt_template_path,
        embeddings.clone(),
        llm,
    )
    .await?;

    let state = Arc::new(AppState::new(faq, realtime));
    serve(state, config.bind).await
}
