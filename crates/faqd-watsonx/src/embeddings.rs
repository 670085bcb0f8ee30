//! watsonx.ai text-embedding client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use faqd_core::{EmbeddingProvider, Error, Result};

use crate::config::WatsonxConfig;
use crate::iam;

/// watsonx.ai embedding client
pub struct WatsonxEmbeddings {
    config: WatsonxConfig,
    access_token: Option<String>,
    client: Client,
    model_id: String,
    dimension: usize,
}

#[derive(Serialize)]
struct EmbeddingRequest {
    inputs: Vec<String>,
    model_id: String,
    project_id: String,
}

#[derive(Deserialize)]
struct EmbeddingResults {
    embedding: Vec<f32>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    results: Vec<EmbeddingResults>,
}

impl WatsonxEmbeddings {
    /// Model constants
    pub const GRANITE_EMBEDDING_107M_MULTILINGUAL: &'static str =
        "ibm/granite-embedding-107m-multilingual";
    pub const GRANITE_EMBEDDING_DIMENSION: usize = 384;

    /// Create a new embedding client from configuration
    pub fn new(config: WatsonxConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self {
            config,
            access_token: None,
            client,
            model_id: Self::GRANITE_EMBEDDING_107M_MULTILINGUAL.to_string(),
            dimension: Self::GRANITE_EMBEDDING_DIMENSION,
        })
    }

    /// Create a new embedding client from environment variables
    pub fn from_env() -> Result<Self> {
        let config = WatsonxConfig::from_env()?;
        Self::new(config)
    }

    /// Connect/authenticate with watsonx
    pub async fn connect(&mut self) -> Result<()> {
        let token = iam::request_access_token(&self.client, &self.config).await?;
        self.access_token = Some(token);
        Ok(())
    }

    async fn request_embeddings(&self, inputs: Vec<String>) -> Result<Vec<Vec<f32>>> {
        let access_token = self.access_token.as_ref().ok_or_else(|| {
            Error::Authentication("not authenticated, call connect() first".to_string())
        })?;

        let request_body = EmbeddingRequest {
            inputs,
            model_id: self.model_id.clone(),
            project_id: self.config.project_id.clone(),
        };

        let url = format!(
            "{}/ml/v1/text/embeddings?version=2024-05-02",
            self.config.api_url
        );

        let response = self
            .client
            .post(&url)
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", access_token))
            .json(&request_body)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(Error::EmbeddingProvider(format!(
                "watsonx embedding request failed with status {}: {}",
                status, error_text
            )));
        }

        let data: EmbeddingData = response
            .json()
            .await
            .map_err(|e| Error::Serialization(e.to_string()))?;

        Ok(data.results.into_iter().map(|r| r.embedding).collect())
    }
}

#[async_trait]
impl EmbeddingProvider for WatsonxEmbeddings {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vectors = self.embed_batch(&[text.to_string()]).await?;
        vectors.pop().ok_or_else(|| {
            Error::EmbeddingProvider("embedding API returned no vector".to_string())
        })
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let vectors = self.request_embeddings(texts.to_vec()).await?;
        if vectors.len() != texts.len() {
            return Err(Error::EmbeddingProvider(format!(
                "embedding API returned {} vectors for {} inputs",
                vectors.len(),
                texts.len()
            )));
        }

        Ok(vectors)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}
