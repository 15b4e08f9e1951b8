//! Synonyms Engine
//!
//! Context handle bundling the tokenizer, vector store and sentence scorer
//! behind the public API. Build one per model/dictionary set and share it.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::error::Result;
use crate::metrics::Metrics;
use crate::sentence::{SentenceVectorizer, SimilarityScorer};
use crate::tokenizer::{JiebaSegmenter, Segmenter, Token, Tokenizer};
use crate::vector::{Neighbor, Vector, VectorStore};

/// Chinese synonyms and sentence similarity engine
pub struct Synonyms {
    config: Config,
    tokenizer: Arc<Tokenizer>,
    store: Arc<VectorStore>,
    scorer: SimilarityScorer,
    metrics: Metrics,
}

impl Synonyms {
    /// Engine backed by jieba, loading the user dictionary from `config`
    ///
    /// The vector model and filter dictionaries load lazily on first use.
    pub fn new(config: Config) -> Result<Self> {
        let segmenter = match &config.user_dict_path {
            Some(path) => JiebaSegmenter::with_user_dict(path)?,
            None => JiebaSegmenter::new(),
        };
        Ok(Self::with_segmenter(config, Arc::new(segmenter)))
    }

    /// Engine with a caller-supplied segmenter
    pub fn with_segmenter(config: Config, segmenter: Arc<dyn Segmenter>) -> Self {
        let tokenizer = Tokenizer::from_config(&config, segmenter);
        let store = VectorStore::new(config.model_path.clone());
        Self::from_parts(config, tokenizer, store)
    }

    /// Engine from prebuilt components
    pub fn from_parts(config: Config, tokenizer: Tokenizer, store: VectorStore) -> Self {
        let tokenizer = Arc::new(tokenizer);
        let store = Arc::new(store);
        let scorer = SimilarityScorer::new(SentenceVectorizer::new(
            Arc::clone(&tokenizer),
            Arc::clone(&store),
        ));
        Self {
            config,
            tokenizer,
            store,
            scorer,
            metrics: Metrics::new(),
        }
    }

    /// Load the vector model and tokenizer dictionaries up front
    pub async fn initialize(&self) -> Result<()> {
        tokio::try_join!(self.store.initialize(), self.tokenizer.initialize())?;
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    pub fn vector_store(&self) -> &VectorStore {
        &self.store
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Segment text; see [`Tokenizer::segment`]
    pub async fn segment(
        &self,
        text: &str,
        keep_stopwords: bool,
        keep_punctuation: bool,
    ) -> Result<Vec<String>> {
        self.timed(
            "segment",
            self.tokenizer.segment(text, keep_stopwords, keep_punctuation),
        )
        .await
    }

    /// Tagged words, unfiltered
    pub fn tag(&self, text: &str) -> Result<Vec<Token>> {
        self.tokenizer.tag(text)
    }

    /// Vector of one word
    pub async fn vector(&self, word: &str) -> Result<Vector> {
        self.timed("vector", self.store.vector(word)).await
    }

    /// Vectors of every word that has one
    pub async fn vectors<S: AsRef<str>>(&self, words: &[S]) -> Result<Vec<Vector>> {
        self.timed("vectors", self.store.vectors(words)).await
    }

    /// Top-`k` words closest to `word` (k = 0 uses the configured default)
    pub async fn nearby(&self, word: &str, k: usize) -> Result<Vec<Neighbor>> {
        let k = self.config.top_k(k);
        self.timed("nearby", self.store.nearby(word, k)).await
    }

    /// Top-`k` words closest to a query vector
    pub async fn nearby_vector(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>> {
        let k = self.config.top_k(k);
        self.timed("nearby_vector", self.store.nearby_vector(query, k))
            .await
    }

    /// Bag-of-words vector of a sentence
    pub async fn sentence_vector(&self, sentence: &str) -> Result<Vector> {
        self.timed("sentence_vector", self.scorer.vectorizer().vectorize(sentence))
            .await
    }

    /// Similarity of two sentences
    pub async fn compare(&self, sen1: &str, sen2: &str) -> Result<f64> {
        self.timed("compare", self.scorer.compare(sen1, sen2)).await
    }

    /// Nearby words rendered as a ranked list
    ///
    /// ```text
    /// '飞机'近义词:
    ///   1. 客机: 0.99
    /// ```
    pub async fn display(&self, word: &str, k: usize) -> Result<String> {
        let neighbors = self.nearby(word, k).await?;
        let mut lines = Vec::with_capacity(neighbors.len() + 1);
        lines.push(format!("'{}'近义词:", word));
        lines.extend(
            neighbors
                .iter()
                .enumerate()
                .map(|(rank, n)| format!("  {}. {}: {}", rank + 1, n.word, n.score)),
        );
        lines.push(String::new());
        Ok(lines.join("\n"))
    }

    /// Vocabulary size, loading the model if needed
    pub async fn vocabulary_size(&self) -> Result<usize> {
        Ok(self.store.initialize().await?.vocabulary_size())
    }

    /// Embedding dimension, loading the model if needed
    pub async fn embedding_dim(&self) -> Result<usize> {
        Ok(self.store.initialize().await?.embedding_dim())
    }

    async fn timed<T, F>(&self, name: &'static str, op: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let start = Instant::now();
        let result = op.await;
        self.metrics
            .record_operation(name, start.elapsed(), result.is_ok());
        result
    }
}
