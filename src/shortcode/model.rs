//! Core data types: the [`Mapping`] pair and the shape rules for short codes.

/// Number of characters in every short code.
pub const CODE_LEN: usize = 6;

/// Symbols a short code is drawn from.
pub const CODE_ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// One code → URL association.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping {
    pub code: String,
    pub url: String,
}

impl Mapping {
    pub fn new(code: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            url: url.into(),
        }
    }
}

/// Returns true if `s` is exactly [`CODE_LEN`] ASCII uppercase letters.
pub fn is_valid_code(s: &str) -> bool {
    s.len() == CODE_LEN && s.bytes().all(|b| b.is_ascii_uppercase())
}
