use crate::code::CodeTable;
use tracing::debug;

/// Placeholder rendered for Morse tokens with no table entry.
const UNKNOWN_TOKEN: char = '?';

/// Translate text to a Morse code string.
///
/// Each input character is looked up case-insensitively; found symbols are
/// joined with a single space in input order. Characters with no mapping
/// (punctuation, whitespace) are silently skipped, not emitted as
/// placeholders. Empty input yields empty output.
///
/// # Arguments
/// * `text` - Text to encode
///
/// # Returns
/// Space-separated Morse symbol groups
#[must_use]
pub fn text_to_code(text: &str) -> String {
    let table = CodeTable::global();
    let mut symbols = Vec::new();

    for character in text.chars() {
        match table.encode(character) {
            Some(symbol) => symbols.push(symbol),
            None => debug!(character = %character, "no mapping, skipping"),
        }
    }

    symbols.join(" ")
}

/// Translate a Morse code string back to text.
///
/// The input is split on whitespace into symbol tokens (runs collapse,
/// leading/trailing whitespace is ignored). Tokens with no match render as
/// `?` in token order; no token is dropped.
#[must_use]
pub fn code_to_text(code: &str) -> String {
    let table = CodeTable::global();

    code.split_whitespace()
        .map(|token| {
            table.decode(token).unwrap_or_else(|| {
                debug!(token, "unknown symbol, rendering placeholder");
                UNKNOWN_TOKEN
            })
        })
        .collect()
}
