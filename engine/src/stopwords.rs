use std::collections::BTreeSet;

use crate::error::SearchError;
use crate::tokenizer::{is_valid_word, split_into_words};

/// Immutable set of words excluded from indexing and from query term sets.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: BTreeSet<String>,
}

impl StopWords {
    /// Build the set from individual words. Empty strings are dropped and
    /// duplicates collapse; any word with a control character is rejected.
    pub fn from_words<I, S>(words: I) -> Result<Self, SearchError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for word in words {
            let word = word.as_ref();
            if word.is_empty() {
                continue;
            }
            if !is_valid_word(word) {
                return Err(SearchError::InvalidWord(word.to_string()));
            }
            set.insert(word.to_string());
        }
        Ok(Self { words: set })
    }

    /// Build the set from whitespace-delimited text.
    pub fn from_text(text: &str) -> Result<Self, SearchError> {
        Self::from_words(split_into_words(text))
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }
}
