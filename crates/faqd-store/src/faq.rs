//! FAQ store

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use faqd_core::{EmbeddingProvider, Error, FaqEntry, Result};

use crate::index::DenseIndex;

/// Ordered question/answer list with a synchronized vector index over the
/// question texts.
///
/// The list file on disk is the source of truth; the index is a derived
/// cache rebuilt from the questions whenever the two could diverge. Index
/// entry order always mirrors list order, which is why `delete` rebuilds the
/// whole index instead of removing one entry: the index has no
/// remove-by-position operation, and a stale ordering would resolve lookups
/// to the wrong record.
pub struct FaqStore {
    faq_path: PathBuf,
    index_path: PathBuf,
    provider: Arc<dyn EmbeddingProvider>,
    entries: Vec<FaqEntry>,
    index: Option<DenseIndex>,
}

impl FaqStore {
    /// Open a store, loading the list and index from disk when present.
    ///
    /// Load order: an existing index blob wins; otherwise the index is built
    /// from the loaded questions; an empty list leaves the store with no
    /// index until the first record is added.
    pub async fn open(
        faq_path: impl Into<PathBuf>,
        index_path: impl Into<PathBuf>,
        provider: Arc<dyn EmbeddingProvider>,
    ) -> Result<Self> {
        let faq_path = faq_path.into();
        let index_path = index_path.into();

        let entries = Self::load_entries(&faq_path)?;

        let index = if index_path.exists() {
            Some(DenseIndex::load(&index_path, provider.clone())?)
        } else if !entries.is_empty() {
            let questions: Vec<String> = entries.iter().map(|e| e.question.clone()).collect();
            Some(DenseIndex::from_texts(&questions, provider.clone()).await?)
        } else {
            None
        };

        tracing::info!(
            records = entries.len(),
            indexed = index.as_ref().map(|i| i.len()).unwrap_or(0),
            "opened FAQ store"
        );

        Ok(Self {
            faq_path,
            index_path,
            provider,
            entries,
            index,
        })
    }

    /// All records as a position-keyed map
    pub fn list(&self) -> BTreeMap<usize, FaqEntry> {
        self.entries.iter().cloned().enumerate().collect()
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append a record and insert its question into the index.
    ///
    /// The first record builds the index from scratch; later records insert
    /// incrementally. Identical questions may be added repeatedly. Both the
    /// list and the index are persisted before the updated list is returned.
    pub async fn add(
        &mut self,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Result<BTreeMap<usize, FaqEntry>> {
        let entry = FaqEntry::new(question, answer);
        self.entries.push(entry);

        match self.index.as_mut() {
            Some(index) => {
                let question = &self.entries[self.entries.len() - 1].question;
                index.add_texts(std::slice::from_ref(question)).await?;
            }
            None => {
                let questions: Vec<String> =
                    self.entries.iter().map(|e| e.question.clone()).collect();
                self.index = Some(DenseIndex::from_texts(&questions, self.provider.clone()).await?);
            }
        }

        self.save()?;
        tracing::info!(position = self.entries.len() - 1, "added FAQ record");
        Ok(self.list())
    }

    /// Remove the record at `position` and rebuild the index from the
    /// remaining questions.
    ///
    /// An out-of-range position is reported as `Error::NotFound`. Rebuilding
    /// re-embeds every remaining question, an O(n) cost accepted at this
    /// scale.
    pub async fn delete(&mut self, position: usize) -> Result<BTreeMap<usize, FaqEntry>> {
        if position >= self.entries.len() {
            return Err(Error::NotFound(format!(
                "no FAQ record at position {position}"
            )));
        }

        self.entries.remove(position);

        let questions: Vec<String> = self.entries.iter().map(|e| e.question.clone()).collect();
        self.index = Some(DenseIndex::from_texts(&questions, self.provider.clone()).await?);

        self.save()?;
        tracing::info!(position, remaining = self.entries.len(), "deleted FAQ record");
        Ok(self.list())
    }

    /// Retrieve the answers to the `topk` questions nearest to `query`.
    ///
    /// Results are keyed 0..n in similarity order, nearest first. `topk`
    /// beyond the stored count is clamped. A store that never built an index
    /// has nothing to search and reports `Error::NoIndex`.
    pub async fn search(&self, query: &str, topk: usize) -> Result<BTreeMap<usize, String>> {
        let index = self
            .index
            .as_ref()
            .ok_or_else(|| Error::NoIndex("the FAQ index has not been built yet".to_string()))?;

        let hits = index.search(query, topk).await?;

        let mut answers = BTreeMap::new();
        for (rank, hit) in hits.into_iter().enumerate() {
            let entry = self.entries.get(hit.ordinal).ok_or_else(|| {
                Error::VectorIndex(format!(
                    "index ordinal {} is out of sync with the FAQ list",
                    hit.ordinal
                ))
            })?;
            answers.insert(rank, entry.answer.clone());
        }

        Ok(answers)
    }

    fn load_entries(path: &Path) -> Result<Vec<FaqEntry>> {
        if !path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(path)?;
        serde_json::from_str(&raw).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Persist the list and the index, list first. There is no atomicity
    /// across the two files; a crash between the writes leaves the index to
    /// be rebuilt from the list on the next open.
    fn save(&self) -> Result<()> {
        let raw = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| Error::Serialization(e.to_string()))?;
        fs::write(&self.faq_path, raw)?;

        if let Some(index) = &self.index {
            index.save(&self.index_path)?;
        }
        Ok(())
    }
}
