/// Split text into words on whitespace, skipping empty runs.
pub fn split_into_words(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// A valid word contains no ASCII control characters (code points below space).
pub fn is_valid_word(word: &str) -> bool {
    !word.chars().any(|c| (c as u32) < 0x20)
}
