use std::collections::BTreeMap;

pub type DocId = i64;

/// Inverted index: term -> (document id -> normalized term frequency).
///
/// `BTreeMap` keeps term and posting iteration deterministic, which makes
/// scoring and matching reproducible across runs.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    postings: BTreeMap<String, BTreeMap<DocId, f64>>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one document's retained words. Each occurrence contributes
    /// `1 / word_count`, so one document's frequencies sum to 1.0.
    pub fn add_document(&mut self, document_id: DocId, words: &[String]) {
        if words.is_empty() {
            return;
        }
        let inv_word_count = 1.0 / words.len() as f64;
        for word in words {
            *self
                .postings
                .entry(word.clone())
                .or_default()
                .entry(document_id)
                .or_insert(0.0) += inv_word_count;
        }
    }

    /// The posting list for a term, if the term was ever indexed.
    pub fn postings(&self, word: &str) -> Option<&BTreeMap<DocId, f64>> {
        self.postings.get(word)
    }

    pub fn contains(&self, word: &str, document_id: DocId) -> bool {
        self.postings
            .get(word)
            .map_or(false, |posting| posting.contains_key(&document_id))
    }
}
