//! Core traits and types for faqd
//!
//! This crate defines the fundamental traits and types used across the faqd
//! system. It provides capability-facing interfaces for embedding providers
//! and LLM providers, plus the shared record and error types, making the
//! stores test-friendly and the providers swappable.

pub mod embedding;
pub mod error;
pub mod llm;
pub mod types;

pub use embedding::EmbeddingProvider;
pub use error::{Error, Result};
pub use llm::{GenerationConfig, GenerationResult, LLMProvider};
pub use types::{FaqEntry, RealtimeAnswer};
