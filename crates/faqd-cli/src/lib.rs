//! Command-line client for faqd
//!
//! A demonstration harness against a running faqd server: a typed HTTP
//! client for the five endpoints and an interactive menu that drives them.

mod client;
mod menu;

pub use client::ApiClient;
pub use menu::run_menu;

// Re-export core types for convenience
pub use faqd_core::{Error, FaqEntry, RealtimeAnswer, Result};
