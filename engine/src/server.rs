use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SearchError;
use crate::index::{DocId, InvertedIndex};
use crate::query::Query;
use crate::stopwords::StopWords;
use crate::tokenizer::{is_valid_word, split_into_words};
use crate::{MAX_RESULT_DOCUMENT_COUNT, RELEVANCE_EPSILON};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DocumentStatus {
    #[default]
    Actual,
    Irrelevant,
    Banned,
    Removed,
}

/// A ranked query result. Produced fresh per query, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Document {
    pub id: DocId,
    pub relevance: f64,
    pub rating: i32,
}

#[derive(Debug, Clone, Copy)]
struct DocumentRecord {
    rating: i32,
    status: DocumentStatus,
}

/// The search engine: owns its stop-word set, inverted index, and document
/// store exclusively. Ingestion takes `&mut self` and queries take `&self`,
/// so the single-writer discipline is enforced by the borrow checker.
pub struct SearchServer {
    stop_words: StopWords,
    index: InvertedIndex,
    documents: HashMap<DocId, DocumentRecord>,
    document_ids: Vec<DocId>,
}

impl SearchServer {
    /// Build an engine over a sequence of stop words.
    pub fn new<I, S>(stop_words: I) -> Result<Self, SearchError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self::with_stop_words(StopWords::from_words(stop_words)?))
    }

    /// Build an engine over whitespace-delimited stop-word text.
    pub fn from_stop_words_text(text: &str) -> Result<Self, SearchError> {
        Ok(Self::with_stop_words(StopWords::from_text(text)?))
    }

    fn with_stop_words(stop_words: StopWords) -> Self {
        Self {
            stop_words,
            index: InvertedIndex::new(),
            documents: HashMap::new(),
            document_ids: Vec::new(),
        }
    }

    /// Ingest one document. The id must be non-negative and unused; the text
    /// is tokenized on whitespace, stop words are dropped, and each retained
    /// word contributes `1 / word_count` to its posting. The rating stored is
    /// the truncating integer average of `ratings` (0 when empty).
    pub fn add_document(
        &mut self,
        document_id: DocId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<(), SearchError> {
        if document_id < 0 || self.documents.contains_key(&document_id) {
            return Err(SearchError::InvalidDocument(document_id));
        }
        // The whole token list is validated before the index is touched, so
        // a rejected document leaves no partial postings behind.
        let words = self.split_into_words_no_stop(text)?;
        self.index.add_document(document_id, &words);
        self.documents.insert(
            document_id,
            DocumentRecord {
                rating: average_rating(ratings),
                status,
            },
        );
        self.document_ids.push(document_id);
        debug!(document_id, word_count = words.len(), "document indexed");
        Ok(())
    }

    /// Rank documents with status `ACTUAL` against the query.
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>, SearchError> {
        self.find_top_documents_with_status(raw_query, DocumentStatus::Actual)
    }

    /// Rank documents whose status equals `status` against the query.
    pub fn find_top_documents_with_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>, SearchError> {
        self.find_top_documents_with_predicate(raw_query, |_, document_status, _| {
            document_status == status
        })
    }

    /// Rank documents admitted by an arbitrary predicate against the query.
    /// Results are sorted by relevance descending, rating breaking ties
    /// within [`RELEVANCE_EPSILON`], and truncated to
    /// [`MAX_RESULT_DOCUMENT_COUNT`].
    pub fn find_top_documents_with_predicate<P>(
        &self,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<Document>, SearchError>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool,
    {
        let query = Query::parse(raw_query, &self.stop_words)?;
        let mut matched = self.find_all_documents(&query, predicate);
        matched.sort_by(|lhs, rhs| {
            if (lhs.relevance - rhs.relevance).abs() < RELEVANCE_EPSILON {
                rhs.rating.cmp(&lhs.rating)
            } else {
                rhs.relevance
                    .partial_cmp(&lhs.relevance)
                    .unwrap_or(Ordering::Equal)
            }
        });
        matched.truncate(MAX_RESULT_DOCUMENT_COUNT);
        Ok(matched)
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// The document id at a zero-based insertion position.
    pub fn document_id_at(&self, position: usize) -> Result<DocId, SearchError> {
        self.document_ids
            .get(position)
            .copied()
            .ok_or(SearchError::OutOfRange {
                position,
                count: self.document_ids.len(),
            })
    }

    /// Report which plus-terms of the query appear in one document, in
    /// lexicographic order. Any minus-term hit empties the result.
    pub fn match_document(
        &self,
        raw_query: &str,
        document_id: DocId,
    ) -> Result<(Vec<String>, DocumentStatus), SearchError> {
        let query = Query::parse(raw_query, &self.stop_words)?;
        let record = self
            .documents
            .get(&document_id)
            .ok_or(SearchError::NotFound(document_id))?;

        let mut matched_words = Vec::new();
        for word in &query.plus_words {
            if self.index.contains(word, document_id) {
                matched_words.push(word.clone());
            }
        }
        for word in &query.minus_words {
            if self.index.contains(word, document_id) {
                matched_words.clear();
                break;
            }
        }
        Ok((matched_words, record.status))
    }

    fn split_into_words_no_stop(&self, text: &str) -> Result<Vec<String>, SearchError> {
        let mut words = Vec::new();
        for word in split_into_words(text) {
            if !is_valid_word(&word) {
                return Err(SearchError::InvalidWord(word));
            }
            if !self.stop_words.contains(&word) {
                words.push(word);
            }
        }
        Ok(words)
    }

    fn inverse_document_freq(&self, posting_count: usize) -> f64 {
        (self.document_count() as f64 / posting_count as f64).ln()
    }

    /// Two-phase scoring: accumulate TF-IDF over plus-terms for documents
    /// admitted by the predicate, then veto every document carrying any
    /// minus-term. The veto runs strictly after all accumulation and ignores
    /// both score and predicate.
    fn find_all_documents<P>(&self, query: &Query, predicate: P) -> Vec<Document>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool,
    {
        let mut document_to_relevance: HashMap<DocId, f64> = HashMap::new();
        for word in &query.plus_words {
            let Some(postings) = self.index.postings(word) else {
                continue;
            };
            let inverse_document_freq = self.inverse_document_freq(postings.len());
            for (&document_id, &term_freq) in postings {
                let record = &self.documents[&document_id];
                if predicate(document_id, record.status, record.rating) {
                    *document_to_relevance.entry(document_id).or_insert(0.0) +=
                        term_freq * inverse_document_freq;
                }
            }
        }

        for word in &query.minus_words {
            let Some(postings) = self.index.postings(word) else {
                continue;
            };
            for &document_id in postings.keys() {
                document_to_relevance.remove(&document_id);
            }
        }

        document_to_relevance
            .into_iter()
            .map(|(document_id, relevance)| Document {
                id: document_id,
                relevance,
                rating: self.documents[&document_id].rating,
            })
            .collect()
    }
}

fn average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i32 = ratings.iter().sum();
    sum / ratings.len() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_rating_truncates_toward_zero() {
        assert_eq!(average_rating(&[]), 0);
        assert_eq!(average_rating(&[7, 2, 7]), 5);
        assert_eq!(average_rating(&[1, 2, 8]), 3);
        assert_eq!(average_rating(&[-3, -4]), -3);
    }

    #[test]
    fn negative_and_duplicate_ids_are_rejected() {
        let mut server = SearchServer::from_stop_words_text("").unwrap();
        assert_eq!(
            server.add_document(-1, "dog", DocumentStatus::Actual, &[]),
            Err(SearchError::InvalidDocument(-1))
        );
        server
            .add_document(1, "dog", DocumentStatus::Actual, &[])
            .unwrap();
        assert_eq!(
            server.add_document(1, "cat", DocumentStatus::Actual, &[]),
            Err(SearchError::InvalidDocument(1))
        );
        assert_eq!(server.document_count(), 1);
    }

    #[test]
    fn rejected_document_leaves_no_postings() {
        let mut server = SearchServer::from_stop_words_text("").unwrap();
        let err = server
            .add_document(1, "dog ca\x01t", DocumentStatus::Actual, &[])
            .unwrap_err();
        assert_eq!(err, SearchError::InvalidWord("ca\x01t".to_string()));
        assert_eq!(server.document_count(), 0);

        // "dog" must not have been indexed by the failed call.
        server
            .add_document(2, "sparrow", DocumentStatus::Actual, &[])
            .unwrap();
        let results = server.find_top_documents("dog").unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn all_stop_word_document_is_still_recorded() {
        let mut server = SearchServer::from_stop_words_text("and in at").unwrap();
        server
            .add_document(9, "and in at", DocumentStatus::Actual, &[4])
            .unwrap();
        assert_eq!(server.document_count(), 1);
        assert_eq!(server.document_id_at(0).unwrap(), 9);
        let (matched, status) = server.match_document("dog", 9).unwrap();
        assert!(matched.is_empty());
        assert_eq!(status, DocumentStatus::Actual);
    }

    #[test]
    fn document_id_at_follows_insertion_order() {
        let mut server = SearchServer::from_stop_words_text("").unwrap();
        for id in [5, 3, 8] {
            server
                .add_document(id, "word", DocumentStatus::Actual, &[])
                .unwrap();
        }
        assert_eq!(server.document_id_at(0).unwrap(), 5);
        assert_eq!(server.document_id_at(1).unwrap(), 3);
        assert_eq!(server.document_id_at(2).unwrap(), 8);
        assert_eq!(
            server.document_id_at(3),
            Err(SearchError::OutOfRange {
                position: 3,
                count: 3
            })
        );
    }

    #[test]
    fn match_against_unknown_document_fails() {
        let server = SearchServer::from_stop_words_text("").unwrap();
        assert_eq!(
            server.match_document("dog", 42),
            Err(SearchError::NotFound(42))
        );
    }
}
