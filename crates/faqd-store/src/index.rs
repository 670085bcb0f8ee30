//! Dense vector index

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;

use faqd_core::{EmbeddingProvider, Error, Result};

/// A single search hit.
///
/// `ordinal` is the position of the matched entry inside the index. Entries
/// are kept in insertion order, so as long as the index is rebuilt whenever
/// its source list is reordered, the ordinal resolves directly into that
/// list without any text re-scan.
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    pub ordinal: usize,
    pub text: String,
    pub score: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct IndexEntry {
    text: String,
    vector: Vec<f32>,
}

/// On-disk representation of the index. The embedding provider is not part
/// of the blob; it is re-attached at load time.
#[derive(Serialize, Deserialize)]
struct IndexFile {
    dimension: usize,
    entries: Vec<IndexEntry>,
}

/// Exact nearest-neighbor index over embedded texts.
///
/// The index embeds texts through its own embedding hook and ranks entries
/// by cosine similarity. It supports incremental inserts, a full rebuild via
/// `from_texts`, and save/load to a JSON blob on disk.
pub struct DenseIndex {
    dimension: usize,
    entries: Vec<IndexEntry>,
    provider: Arc<dyn EmbeddingProvider>,
}

impl DenseIndex {
    /// Build an index from scratch by embedding every text
    pub async fn from_texts(
        texts: &[String],
        provider: Arc<dyn EmbeddingProvider>,
    ) -> Result<Self> {
        let mut index = Self {
            dimension: provider.dimension(),
            entries: Vec::new(),
            provider,
        };
        index.add_texts(texts).await?;
        Ok(index)
    }

    /// Incrementally insert texts at the end of the index
    pub async fn add_texts(&mut self, texts: &[String]) -> Result<()> {
        if texts.is_empty() {
            return Ok(());
        }

        let vectors = self.provider.embed_batch(texts).await?;
        if vectors.len() != texts.len() {
            return Err(Error::EmbeddingProvider(format!(
                "embedding batch returned {} vectors for {} texts",
                vectors.len(),
                texts.len()
            )));
        }

        for (text, vector) in texts.iter().zip(vectors) {
            if vector.len() != self.dimension {
                return Err(Error::VectorIndex(format!(
                    "vector dimension {} does not match index dimension {}",
                    vector.len(),
                    self.dimension
                )));
            }
            self.entries.push(IndexEntry {
                text: text.clone(),
                vector,
            });
        }

        tracing::debug!(added = texts.len(), total = self.entries.len(), "indexed texts");
        Ok(())
    }

    /// Search for the `topk` entries nearest to `query`, nearest first.
    ///
    /// `topk` larger than the number of stored entries is clamped, not an
    /// error. Searching an empty index returns an empty hit list.
    pub async fn search(&self, query: &str, topk: usize) -> Result<Vec<Hit>> {
        if self.entries.is_empty() || topk == 0 {
            return Ok(Vec::new());
        }

        let query_vector = self.provider.embed(query).await?;
        if query_vector.len() != self.dimension {
            return Err(Error::VectorIndex(format!(
                "query vector dimension {} does not match index dimension {}",
                query_vector.len(),
                self.dimension
            )));
        }

        let mut hits: Vec<Hit> = self
            .entries
            .iter()
            .enumerate()
            .map(|(ordinal, entry)| Hit {
                ordinal,
                text: entry.text.clone(),
                score: Self::cosine_similarity(&query_vector, &entry.vector),
            })
            .collect();

        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits.truncate(topk.min(self.entries.len()));

        Ok(hits)
    }

    /// Number of entries in the index
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Persist the index as a JSON blob
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = IndexFile {
            dimension: self.dimension,
            entries: self.entries.clone(),
        };
        let blob = serde_json::to_string(&file).map_err(|e| Error::Serialization(e.to_string()))?;
        fs::write(path.as_ref(), blob)?;
        Ok(())
    }

    /// Load an index blob from disk, re-attaching the embedding provider
    pub fn load(path: impl AsRef<Path>, provider: Arc<dyn EmbeddingProvider>) -> Result<Self> {
        let blob = fs::read_to_string(path.as_ref())?;
        let file: IndexFile =
            serde_json::from_str(&blob).map_err(|e| Error::Serialization(e.to_string()))?;

        if file.dimension != provider.dimension() {
            return Err(Error::VectorIndex(format!(
                "stored index dimension {} does not match provider dimension {}",
                file.dimension,
                provider.dimension()
            )));
        }

        tracing::debug!(
            entries = file.entries.len(),
            path = %path.as_ref().display(),
            "loaded index"
        );

        Ok(Self {
            dimension: file.dimension,
            entries: file.entries,
            provider,
        })
    }

    fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
        if a.len() != b.len() {
            return 0.0;
        }

        let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
        let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }

        dot_product / (norm_a * norm_b)
    }
}
