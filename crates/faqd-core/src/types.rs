//! Shared record types

use serde::{Deserialize, Serialize};

/// A single question/answer record.
///
/// Records carry no surrogate ID: a record is identified by its position in
/// the FAQ list, and positions shift down when an earlier record is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

impl FaqEntry {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Answer produced by the realtime document QA path.
///
/// `url_list` holds the identifiers of the retrieved documents in
/// retrieval-rank order; it is empty when retrieval found nothing and the
/// canned fallback answer was returned instead of a generated one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealtimeAnswer {
    pub answer: String,
    pub url_list: Vec<String>,
}
