use std::collections::HashMap;
use std::sync::OnceLock;
use thiserror::Error;

/// Built-in International Morse alphabet: A-Z and 0-9.
const BUILTIN: &[(char, &str)] = &[
    ('A', ".-"),
    ('B', "-..."),
    ('C', "-.-."),
    ('D', "-.."),
    ('E', "."),
    ('F', "..-."),
    ('G', "--."),
    ('H', "...."),
    ('I', ".."),
    ('J', ".---"),
    ('K', "-.-"),
    ('L', ".-.."),
    ('M', "--"),
    ('N', "-."),
    ('O', "---"),
    ('P', ".--."),
    ('Q', "--.-"),
    ('R', ".-."),
    ('S', "..."),
    ('T', "-"),
    ('U', "..-"),
    ('V', "...-"),
    ('W', ".--"),
    ('X', "-..-"),
    ('Y', "-.--"),
    ('Z', "--.."),
    ('1', ".----"),
    ('2', "..---"),
    ('3', "...--"),
    ('4', "....-"),
    ('5', "....."),
    ('6', "-...."),
    ('7', "--..."),
    ('8', "---.."),
    ('9', "----."),
    ('0', "-----"),
];

/// Errors constructing a code table from custom entries
#[derive(Debug, Error)]
pub enum TableError {
    /// Two characters map to the same symbol, so decoding is ambiguous
    #[error("symbol {symbol:?} is mapped by both '{first}' and '{second}'")]
    AmbiguousMapping {
        /// The contested symbol
        symbol: String,
        /// Character that claimed the symbol first
        first: char,
        /// Character that tried to claim it again
        second: char,
    },

    /// A character maps to an empty symbol string
    #[error("character '{character}' maps to an empty symbol")]
    EmptySymbol {
        /// The offending character
        character: char,
    },
}

/// Bidirectional character to Morse symbol mapping.
///
/// The inverse table is derived from the forward table at construction and
/// always holds exactly as many entries (the mapping is a bijection).
#[derive(Debug)]
pub struct CodeTable {
    forward: HashMap<char, &'static str>,
    inverse: HashMap<&'static str, char>,
}

impl CodeTable {
    /// Builds a table from custom entries, validating the bijection.
    ///
    /// Characters are stored uppercased. The built-in alphabet cannot trip
    /// either check; validation only matters for configurable tables.
    ///
    /// # Errors
    /// Returns `TableError::AmbiguousMapping` if two characters share a
    /// symbol, `TableError::EmptySymbol` if a symbol string is empty.
    pub fn from_entries(entries: &[(char, &'static str)]) -> Result<Self, TableError> {
        let mut forward = HashMap::with_capacity(entries.len());
        let mut inverse = HashMap::with_capacity(entries.len());

        for &(character, symbol) in entries {
            if symbol.is_empty() {
                return Err(TableError::EmptySymbol { character });
            }
            let character = character.to_ascii_uppercase();
            if let Some(&first) = inverse.get(symbol) {
                return Err(TableError::AmbiguousMapping {
                    symbol: symbol.to_owned(),
                    first,
                    second: character,
                });
            }
            forward.insert(character, symbol);
            inverse.insert(symbol, character);
        }

        Ok(Self { forward, inverse })
    }

    /// Process-wide table for the built-in alphabet, built once on first use.
    pub fn global() -> &'static Self {
        static GLOBAL: OnceLock<CodeTable> = OnceLock::new();
        GLOBAL.get_or_init(Self::builtin)
    }

    // Infallible build for the fixed alphabet; bijectivity is covered by a test.
    fn builtin() -> Self {
        let mut forward = HashMap::with_capacity(BUILTIN.len());
        let mut inverse = HashMap::with_capacity(BUILTIN.len());
        for &(character, symbol) in BUILTIN {
            forward.insert(character, symbol);
            inverse.insert(symbol, character);
        }
        Self { forward, inverse }
    }

    /// Symbol for a character, case-insensitive. `None` if unmapped.
    #[must_use]
    pub fn encode(&self, character: char) -> Option<&'static str> {
        self.forward.get(&character.to_ascii_uppercase()).copied()
    }

    /// Character for a symbol. `None` if unmapped.
    #[must_use]
    pub fn decode(&self, symbol: &str) -> Option<char> {
        self.inverse.get(symbol).copied()
    }

    /// Number of mapped characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    #[cfg(test)]
    fn inverse_len(&self) -> usize {
        self.inverse.len()
    }
}
