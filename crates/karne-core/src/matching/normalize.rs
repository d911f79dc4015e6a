/// Fold a single character for case-insensitive comparison.
///
/// A character maps to its upper-case form when that form is a single
/// character, otherwise to itself, so folding never changes the character
/// count of a string. Dotted capital I folds with the plain `I` the way
/// Turkish text expects (`ı`, `i`, `I` and `İ` all compare equal).
pub fn fold_char(c: char) -> char {
    if c == '\u{130}' {
        return 'I';
    }
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

/// Case-fold a whole string, character by character.
///
/// The result has exactly as many `char`s as the input, so a character index
/// found in the folded text addresses the same character in the original.
pub fn fold_case(text: &str) -> String {
    text.chars().map(fold_char).collect()
}

/// Split a full name into its whitespace-separated tokens.
pub fn name_tokens(full_name: &str) -> Vec<String> {
    full_name.split_whitespace().map(|t| t.to_string()).collect()
}

/// Byte offset of the `char_index`-th character, or `text.len()` past the end.
pub(crate) fn byte_offset(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map(|(b, _)| b)
        .unwrap_or(text.len())
}
