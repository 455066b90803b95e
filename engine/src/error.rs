use crate::index::DocId;
use thiserror::Error;

/// Errors surfaced by the search engine. All validation is synchronous and
/// fails fast; a rejected call leaves previously built state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// A stop word or document word contains an ASCII control character.
    #[error("word {0:?} contains a control character")]
    InvalidWord(String),
    /// A document id is negative or was already ingested.
    #[error("invalid document id {0}")]
    InvalidDocument(DocId),
    /// A query token is a bare `-`, a doubled `--`, or otherwise invalid.
    #[error("query word {0:?} is invalid")]
    InvalidQueryWord(String),
    /// The document id was never ingested.
    #[error("document {0} was never added")]
    NotFound(DocId),
    /// A positional lookup past the ingested document count.
    #[error("position {position} is out of range (document count is {count})")]
    OutOfRange { position: usize, count: usize },
}
