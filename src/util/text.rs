//! Text helpers shared by the line matcher and the search highlighter

/// Convert a byte offset into a character column.
///
/// Offsets past the end clamp to the character length of `text`. Offsets that
/// fall inside a multi-byte character count that character as already passed.
pub fn byte_to_char_col(text: &str, byte_offset: usize) -> usize {
    if byte_offset >= text.len() {
        return text.chars().count();
    }
    text.char_indices()
        .take_while(|(idx, _)| *idx < byte_offset)
        .count()
}

/// Number of characters (Unicode scalar values) in `text`
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Whether a line is empty or contains only whitespace
pub fn is_blank(line: &str) -> bool {
    line.chars().all(char::is_whitespace)
}

/// Whether a string contains any character with regex meaning
pub fn has_regex_metachars(text: &str) -> bool {
    text.chars().any(|ch| {
        matches!(
            ch,
            '\\' | '.' | '+' | '*' | '?' | '(' | ')' | '|' | '[' | ']' | '{' | '}' | '^' | '$'
        )
    })
}
