//! Service configuration

use faqd_core::{Error, Result};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// File paths and bind address for the service, from environment variables
/// with the original deployment's defaults.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub bind: SocketAddr,
    pub faq_path: PathBuf,
    pub faq_index_path: PathBuf,
    pub document_path: PathBuf,
    pub document_index_path: PathBuf,
    pub history_path: PathBuf,
    pub prompt_template_path: PathBuf,
}

fn env_path(key: &str, default: &str) -> PathBuf {
    env::var(key).map(PathBuf::from).unwrap_or_else(|_| PathBuf::from(default))
}

impl ServiceConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let bind = env::var("FAQD_BIND").unwrap_or_else(|_| "0.0.0.0:7000".to_string());
        let bind: SocketAddr = bind
            .parse()
            .map_err(|_| Error::Configuration(format!("invalid FAQD_BIND address: {bind}")))?;

        Ok(Self {
            bind,
            faq_path: env_path("FAQD_FAQ_PATH", "./faq.json"),
            faq_index_path: env_path("FAQD_FAQ_INDEX_PATH", "./faq.index"),
            document_path: env_path("FAQD_DOCUMENT_PATH", "./document.tsv"),
            document_index_path: env_path("FAQD_DOCUMENT_INDEX_PATH", "./document.index"),
            history_path: env_path("FAQD_HISTORY_PATH", "./qa_history.tsv"),
            prompt_template_path: env_path(
                "FAQD_PROMPT_TEMPLATE_PATH",
                "./templates/realtime_qa.j2",
            ),
        })
    }
}
