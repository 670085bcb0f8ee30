//! Typed HTTP client for the faqd API

use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;

use faqd_core::{Error, FaqEntry, RealtimeAnswer, Result};

/// Client for a running faqd server
pub struct ApiClient {
    base_url: String,
    http: Client,
}

#[derive(Serialize)]
struct AddFaqRequest<'a> {
    question: &'a str,
    answer: &'a str,
}

#[derive(Serialize)]
struct RemoveIdxRequest {
    idx: usize,
}

#[derive(Serialize)]
struct FaqQueryRequest<'a> {
    query: &'a str,
    topk: usize,
}

#[derive(Serialize)]
struct RealtimeQueryRequest<'a> {
    query: &'a str,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Fetch the full position-keyed FAQ list
    pub async fn get_faq(&self) -> Result<BTreeMap<usize, FaqEntry>> {
        self.post_empty("/api/get-faq").await
    }

    /// Add a record, returning the updated list
    pub async fn add_faq(
        &self,
        question: &str,
        answer: &str,
    ) -> Result<BTreeMap<usize, FaqEntry>> {
        self.post_json("/api/add-faq", &AddFaqRequest { question, answer })
            .await
    }

    /// Delete the record at `idx`, returning the updated list
    pub async fn delete_faq(&self, idx: usize) -> Result<BTreeMap<usize, FaqEntry>> {
        self.post_json("/api/delete-faq", &RemoveIdxRequest { idx }).await
    }

    /// Search the FAQ list, returning answers keyed by similarity rank
    pub async fn search_faq(&self, query: &str, topk: usize) -> Result<BTreeMap<usize, String>> {
        self.post_json("/api/search-faq", &FaqQueryRequest { query, topk })
            .await
    }

    /// Ask for a generated answer grounded in the document store
    pub async fn search_realtime(&self, query: &str) -> Result<RealtimeAnswer> {
        self.post_json("/api/search-realtime", &RealtimeQueryRequest { query })
            .await
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;
        Self::decode(response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(Error::Network(format!("server returned {status}: {body}")));
        }

        response
            .json()
            .await
            .map_err(|e| Error::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_keyed_maps_deserialize_from_string_keys() {
        // serde_json writes integer map keys as JSON strings; the client
        // must read them back into position keys
        let raw = r#"{"0":{"question":"Q1","answer":"A1"},"1":{"question":"Q2","answer":"A2"}}"#;
        let listed: BTreeMap<usize, FaqEntry> = serde_json::from_str(raw).unwrap();

        assert_eq!(listed.len(), 2);
        assert_eq!(listed[&0].question, "Q1");
        assert_eq!(listed[&1].answer, "A2");
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = ApiClient::new("http://127.0.0.1:7000/").unwrap();
        assert_eq!(client.base_url, "http://127.0.0.1:7000");
    }
}
