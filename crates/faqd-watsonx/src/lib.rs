//! watsonx.ai integration for faqd
//!
//! This crate provides the two external providers the stores depend on: a
//! text-generation client implementing `LLMProvider` and a text-embedding
//! client implementing `EmbeddingProvider`, both over the watsonx.ai HTTP
//! API with IAM authentication.

mod client;
mod config;
mod embeddings;
mod iam;

#[cfg(test)]
mod tests;

pub use client::WatsonxClient;
pub use config::WatsonxConfig;
pub use embeddings::WatsonxEmbeddings;

// Re-export core types for convenience
pub use faqd_core::{EmbeddingProvider, Error, GenerationConfig, GenerationResult, LLMProvider, Result};
