//! Store tests with deterministic stub providers

use async_trait::async_trait;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

use faqd_core::{
    EmbeddingProvider, Error, GenerationConfig, GenerationResult, LLMProvider, Result,
};

use crate::faq::FaqStore;
use crate::realtime::{FALLBACK_ANSWER, RealtimeStore};

/// Deterministic embedding provider for tests: a normalized character
/// histogram. Identical texts embed identically, so an exact-match query
/// always ranks its own entry first.
pub struct StubEmbeddings {
    dimension: usize,
}

impl StubEmbeddings {
    pub fn new() -> Self {
        Self { dimension: 32 }
    }

    fn vectorize(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimension];
        for byte in text.to_lowercase().bytes() {
            vector[byte as usize % self.dimension] += 1.0;
        }
        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in &mut vector {
                *value /= norm;
            }
        }
        vector
    }
}

#[async_trait]
impl EmbeddingProvider for StubEmbeddings {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.vectorize(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.vectorize(t)).collect())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

/// Canned-response LLM that records every prompt it receives
pub struct StubLlm {
    reply: String,
    prompts: Mutex<Vec<String>>,
}

impl StubLlm {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LLMProvider for StubLlm {
    async fn connect(&mut self) -> Result<()> {
        Ok(())
    }

    async fn generate(&self, prompt: &str) -> Result<GenerationResult> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(GenerationResult {
            text: self.reply.clone(),
            model_id: "stub".to_string(),
            tokens_used: None,
        })
    }

    async fn generate_with_config(
        &self,
        prompt: &str,
        _config: &GenerationConfig,
    ) -> Result<GenerationResult> {
        self.generate(prompt).await
    }

    fn model_id(&self) -> &str {
        "stub"
    }
}

/// LLM that always fails with an upstream error
pub struct FailingLlm;

#[async_trait]
impl LLMProvider for FailingLlm {
    async fn connect(&mut self) -> Result<()> {
        Ok(())
    }

    async fn generate(&self, _prompt: &str) -> Result<GenerationResult> {
        Err(Error::LLMProvider("upstream unavailable".to_string()))
    }

    async fn generate_with_config(
        &self,
        prompt: &str,
        _config: &GenerationConfig,
    ) -> Result<GenerationResult> {
        self.generate(prompt).await
    }

    fn model_id(&self) -> &str {
        "failing"
    }
}

async fn open_store(dir: &Path) -> FaqStore {
    FaqStore::open(
        dir.join("faq.json"),
        dir.join("faq.index"),
        Arc::new(StubEmbeddings::new()),
    )
    .await
    .unwrap()
}

fn write_template(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("realtime_qa.j2");
    fs::write(
        &path,
        "Documents:\n{{ documents }}\n\nQuery: {{ query }}\nAnswer:",
    )
    .unwrap();
    path
}

async fn open_realtime(dir: &Path, llm: Arc<dyn LLMProvider>) -> RealtimeStore {
    RealtimeStore::open(
        dir.join("document.tsv"),
        dir.join("document.index"),
        dir.join("qa_history.tsv"),
        write_template(dir),
        Arc::new(StubEmbeddings::new()),
        llm,
    )
    .await
    .unwrap()
}

#[tokio::test]
async fn add_then_list_includes_record_at_last_position() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(dir.path()).await;

    store.add("How do I enroll?", "Visit the registrar.").await.unwrap();
    let listed = store.add("Where is the library?", "Building C.").await.unwrap();

    assert_eq!(listed.len(), 2);
    assert_eq!(listed[&1].question, "Where is the library?");
    assert_eq!(listed[&1].answer, "Building C.");
}

#[tokio::test]
async fn delete_shifts_later_positions_down() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(dir.path()).await;

    store.add("q0", "a0").await.unwrap();
    store.add("q1", "a1").await.unwrap();
    store.add("q2", "a2").await.unwrap();

    let listed = store.delete(1).await.unwrap();

    assert_eq!(listed.len(), 2);
    assert_eq!(listed[&0].question, "q0");
    assert_eq!(listed[&1].question, "q2");
}

#[tokio::test]
async fn delete_out_of_range_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(dir.path()).await;
    store.add("q0", "a0").await.unwrap();

    let err = store.delete(5).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn search_before_any_record_reports_no_index() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(dir.path()).await;

    let err = store.search("anything", 1).await.unwrap_err();
    assert!(matches!(err, Error::NoIndex(_)));
}

#[tokio::test]
async fn search_returns_exactly_topk_nearest_first() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(dir.path()).await;

    store.add("How do I reset my password?", "Use the portal.").await.unwrap();
    store.add("What are the office hours?", "9 to 5.").await.unwrap();
    store.add("Where can I park?", "Lot B.").await.unwrap();

    let answers = store.search("What are the office hours?", 2).await.unwrap();

    assert_eq!(answers.len(), 2);
    assert_eq!(answers[&0], "9 to 5.");
}

#[tokio::test]
async fn search_topk_is_clamped_to_stored_count() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(dir.path()).await;

    store.add("q0", "a0").await.unwrap();
    store.add("q1", "a1").await.unwrap();

    let answers = store.search("q0", 10).await.unwrap();
    assert_eq!(answers.len(), 2);
}

#[tokio::test]
async fn reopening_from_disk_reproduces_identical_list() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut store = open_store(dir.path()).await;
        store.add("q0", "a0").await.unwrap();
        store.add("q1", "a1").await.unwrap();
    }

    let reopened = open_store(dir.path()).await;
    let listed = reopened.list();

    assert_eq!(listed.len(), 2);
    assert_eq!(listed[&0].question, "q0");
    assert_eq!(listed[&0].answer, "a0");
    assert_eq!(listed[&1].question, "q1");
    assert_eq!(listed[&1].answer, "a1");

    // the persisted index is usable without a rebuild
    let answers = reopened.search("q1", 1).await.unwrap();
    assert_eq!(answers[&0], "a1");
}

#[tokio::test]
async fn delete_then_search_resolves_shifted_position() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(dir.path()).await;

    store.add("Q1", "A1").await.unwrap();
    store.add("Q2", "A2").await.unwrap();

    let listed = store.delete(0).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[&0].question, "Q2");
    assert_eq!(listed[&0].answer, "A2");

    let answers = store.search("Q2", 1).await.unwrap();
    assert_eq!(answers.len(), 1);
    assert_eq!(answers[&0], "A2");
}

#[tokio::test]
async fn realtime_with_no_documents_returns_fallback_without_history() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_realtime(dir.path(), Arc::new(StubLlm::new("unused"))).await;

    let answer = store.search_realtime("anything", 1).await.unwrap();

    assert_eq!(answer.answer, FALLBACK_ANSWER);
    assert!(answer.url_list.is_empty());
    assert!(!dir.path().join("qa_history.tsv").exists());
}

#[tokio::test]
async fn realtime_answers_and_appends_one_history_line() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("document.tsv"),
        "Enrollment opens in March.\thttps://example.edu/enroll\n\
         The library closes at midnight.\thttps://example.edu/library\n",
    )
    .unwrap();

    let llm = Arc::new(StubLlm::new("Enrollment opens in March."));
    let store = open_realtime(dir.path(), llm.clone()).await;

    let answer = store
        .search_realtime("When does enrollment open?", 2)
        .await
        .unwrap();

    assert_eq!(answer.answer, "Enrollment opens in March.");
    assert_eq!(answer.url_list.len(), 2);
    assert!(answer.url_list.contains(&"https://example.edu/enroll".to_string()));

    let prompts = llm.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("When does enrollment open?"));
    assert!(prompts[0].contains("1. "));
    assert!(prompts[0].contains("2. "));

    let history = fs::read_to_string(dir.path().join("qa_history.tsv")).unwrap();
    assert_eq!(
        history,
        "When does enrollment open?\tEnrollment opens in March.\n"
    );
}

#[tokio::test]
async fn realtime_llm_failure_propagates_and_skips_history() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("document.tsv"),
        "Enrollment opens in March.\thttps://example.edu/enroll\n",
    )
    .unwrap();

    let store = open_realtime(dir.path(), Arc::new(FailingLlm)).await;

    let err = store.search_realtime("anything", 1).await.unwrap_err();
    assert!(matches!(err, Error::LLMProvider(_)));
    assert!(!dir.path().join("qa_history.tsv").exists());
}

#[tokio::test]
async fn realtime_duplicate_document_text_keeps_last_identifier() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("document.tsv"),
        "Same text.\thttps://example.edu/first\nSame text.\thttps://example.edu/second\n",
    )
    .unwrap();

    let store = open_realtime(dir.path(), Arc::new(StubLlm::new("ok"))).await;

    let answer = store.search_realtime("Same text.", 1).await.unwrap();
    assert_eq!(answer.url_list, vec!["https://example.edu/second".to_string()]);
}
