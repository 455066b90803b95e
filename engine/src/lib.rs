//! In-process full-text search over short documents.
//!
//! Documents are tokenized on whitespace, filtered against a caller-supplied
//! stop-word set, and ranked with TF-IDF. Queries support plus/minus term
//! semantics: a `-` prefix turns a term into a hard veto. Results are bounded
//! and tie-broken by rating.

pub mod error;
pub mod index;
pub mod paginate;
pub mod query;
pub mod requests;
pub mod server;
pub mod stopwords;
pub mod tokenizer;

pub use server::{Document, DocumentStatus, SearchServer};
pub use error::SearchError;
pub use index::DocId;
pub use paginate::paginate;
pub use query::Query;
pub use requests::RequestQueue;
pub use stopwords::StopWords;

/// Search results are truncated to this many documents.
pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;

/// Relevance scores closer together than this are treated as equal and
/// tie-broken by rating instead.
pub const RELEVANCE_EPSILON: f64 = 1e-6;

/// How many of the most recent search calls a [`RequestQueue`] remembers.
pub const REQUEST_WINDOW_SIZE: usize = 1440;
