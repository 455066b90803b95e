use std::collections::BTreeSet;

use crate::error::SearchError;
use crate::stopwords::StopWords;
use crate::tokenizer::{is_valid_word, split_into_words};

/// A parsed query: terms that must contribute to scoring and terms whose
/// presence vetoes a document outright. Both sets are deduplicated; stop
/// words never land in either.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub plus_words: BTreeSet<String>,
    pub minus_words: BTreeSet<String>,
}

struct QueryWord {
    word: String,
    is_minus: bool,
    is_stop: bool,
}

fn parse_query_word(token: &str, stop_words: &StopWords) -> Result<QueryWord, SearchError> {
    if token.is_empty() {
        return Err(SearchError::InvalidQueryWord(token.to_string()));
    }
    let (word, is_minus) = match token.strip_prefix('-') {
        Some(stripped) => (stripped, true),
        None => (token, false),
    };
    if word.is_empty() || word.starts_with('-') || !is_valid_word(word) {
        return Err(SearchError::InvalidQueryWord(token.to_string()));
    }
    Ok(QueryWord {
        word: word.to_string(),
        is_minus,
        is_stop: stop_words.contains(word),
    })
}

impl Query {
    /// Tokenize a raw query and classify each token. A whole query fails on
    /// the first bad token; no partial term set escapes.
    pub fn parse(raw_query: &str, stop_words: &StopWords) -> Result<Self, SearchError> {
        let mut query = Query::default();
        for token in split_into_words(raw_query) {
            let parsed = parse_query_word(&token, stop_words)?;
            if parsed.is_stop {
                continue;
            }
            if parsed.is_minus {
                query.minus_words.insert(parsed.word);
            } else {
                query.plus_words.insert(parsed.word);
            }
        }
        Ok(query)
    }
}
