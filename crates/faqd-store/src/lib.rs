//! Stores for the faqd question-answering service
//!
//! This crate provides the dense vector index, the FAQ store that keeps an
//! ordered question/answer list synchronized with an index over the
//! questions, and the realtime document store that backs LLM answer
//! generation with document retrieval.

mod faq;
mod index;
mod realtime;

#[cfg(test)]
mod tests;

pub use faq::FaqStore;
pub use index::{DenseIndex, Hit};
pub use realtime::{FALLBACK_ANSWER, RealtimeStore};

// Re-export core types for convenience
pub use faqd_core::{
    EmbeddingProvider, Error, FaqEntry, GenerationConfig, GenerationResult, LLMProvider,
    RealtimeAnswer, Result,
};
