//! Realtime document QA store

use minijinja::{Environment, context};
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use faqd_core::{EmbeddingProvider, Error, LLMProvider, RealtimeAnswer, Result};

use crate::index::DenseIndex;

/// Canned answer returned when retrieval finds no documents
pub const FALLBACK_ANSWER: &str = "no result found, please use the FAQ service";

const TEMPLATE_NAME: &str = "realtime_qa";

/// Document store backing the realtime answer path.
///
/// Documents are loaded once at startup from a `text<TAB>identifier` file
/// and are immutable for the lifetime of the process. A vector index over
/// the document texts drives retrieval; the language model composes the
/// final answer from the retrieved documents. Each answered query appends
/// one `query<TAB>answer` line to the history log.
pub struct RealtimeStore {
    history_path: PathBuf,
    // text -> identifier; a later duplicate text overwrites the earlier
    // identifier (known limitation of the keying scheme)
    identifiers: HashMap<String, String>,
    index: Option<DenseIndex>,
    templates: Environment<'static>,
    llm: Arc<dyn LLMProvider>,
}

impl RealtimeStore {
    /// Open the store: load documents, load or build the index, and compile
    /// the prompt template.
    ///
    /// A missing document file opens an empty store (every query falls back
    /// to the canned answer). A missing or malformed prompt template is a
    /// configuration error.
    pub async fn open(
        document_path: impl AsRef<Path>,
        index_path: impl AsRef<Path>,
        history_path: impl Into<PathBuf>,
        template_path: impl AsRef<Path>,
        provider: Arc<dyn EmbeddingProvider>,
        llm: Arc<dyn LLMProvider>,
    ) -> Result<Self> {
        let (texts, identifiers) = Self::load_documents(document_path.as_ref())?;

        let index_path = index_path.as_ref();
        let index = if index_path.exists() {
            Some(DenseIndex::load(index_path, provider.clone())?)
        } else if !texts.is_empty() {
            let built = DenseIndex::from_texts(&texts, provider.clone()).await?;
            built.save(index_path)?;
            Some(built)
        } else {
            None
        };

        let templates = Self::load_template(template_path.as_ref())?;

        tracing::info!(
            documents = identifiers.len(),
            indexed = index.as_ref().map(|i| i.len()).unwrap_or(0),
            "opened realtime store"
        );

        Ok(Self {
            history_path: history_path.into(),
            identifiers,
            index,
            templates,
            llm,
        })
    }

    /// Retrieve the `topk` nearest documents and ask the language model to
    /// compose an answer grounded in them.
    ///
    /// When retrieval comes back empty the fixed fallback answer is returned
    /// with an empty identifier list; no LLM call is made and nothing is
    /// appended to history. On a successful generation exactly one history
    /// line is written.
    pub async fn search_realtime(&self, query: &str, topk: usize) -> Result<RealtimeAnswer> {
        let hits = match &self.index {
            Some(index) => index.search(query, topk).await?,
            None => Vec::new(),
        };

        if hits.is_empty() {
            tracing::debug!(query, "no documents retrieved, returning fallback");
            return Ok(RealtimeAnswer {
                answer: FALLBACK_ANSWER.to_string(),
                url_list: Vec::new(),
            });
        }

        let mut url_list = Vec::with_capacity(hits.len());
        for hit in &hits {
            let identifier = self.identifiers.get(&hit.text).ok_or_else(|| {
                Error::VectorIndex(format!(
                    "indexed document at ordinal {} has no identifier mapping",
                    hit.ordinal
                ))
            })?;
            url_list.push(identifier.clone());
        }

        let documents = hits
            .iter()
            .enumerate()
            .map(|(i, hit)| format!("{}. {}", i + 1, hit.text))
            .collect::<Vec<_>>()
            .join("\n");

        let prompt = self
            .templates
            .get_template(TEMPLATE_NAME)
            .and_then(|t| t.render(context! { query => query, documents => documents }))
            .map_err(|e| Error::Configuration(format!("prompt template render failed: {e}")))?;

        let generated = self.llm.generate(&prompt).await?;
        let answer = generated.text;

        self.append_history(query, &answer)?;
        tracing::info!(query, documents = hits.len(), "answered realtime query");

        Ok(RealtimeAnswer { answer, url_list })
    }

    fn load_documents(path: &Path) -> Result<(Vec<String>, HashMap<String, String>)> {
        let mut texts = Vec::new();
        let mut identifiers = HashMap::new();

        if !path.exists() {
            return Ok((texts, identifiers));
        }

        for (lineno, line) in fs::read_to_string(path)?.lines().enumerate() {
            if line.is_empty() {
                continue;
            }
            match line.split_once('\t') {
                Some((text, identifier)) => {
                    texts.push(text.to_string());
                    identifiers.insert(text.to_string(), identifier.to_string());
                }
                None => {
                    tracing::warn!(line = lineno + 1, "document line has no identifier, skipping");
                }
            }
        }

        Ok((texts, identifiers))
    }

    fn load_template(path: &Path) -> Result<Environment<'static>> {
        let source = fs::read_to_string(path).map_err(|e| {
            Error::Configuration(format!(
                "cannot read prompt template {}: {e}",
                path.display()
            ))
        })?;

        let mut env = Environment::new();
        env.add_template_owned(TEMPLATE_NAME.to_string(), source)
            .map_err(|e| Error::Configuration(format!("invalid prompt template: {e}")))?;
        Ok(env)
    }

    // One line per answered query; embedded newlines in the generated text
    // are flattened so the log stays line-oriented.
    fn append_history(&self, query: &str, answer: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.history_path)?;
        let answer = answer.replace(['\n', '\r'], " ");
        writeln!(file, "{query}\t{answer}")?;
        Ok(())
    }
}
