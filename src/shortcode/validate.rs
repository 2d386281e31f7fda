//! URL syntax checks done before a URL reaches the store.
//!
//! The store itself only enforces uniqueness. Whatever drives it (the API facade here)
//! must call [`validate_url`] first.

use crate::error::{Result, ShortenError};
use url::Url;

/// Accepts any absolute URL the parser understands, with any scheme.
///
/// Input is checked as given: surrounding whitespace is an error rather than
/// something to trim, so the stored string is exactly what was validated.
pub fn validate_url(input: &str) -> Result<()> {
    if input.is_empty() {
        return Err(ShortenError::InvalidUrl("URL cannot be empty".into()));
    }
    if input.trim() != input {
        return Err(ShortenError::InvalidUrl(format!(
            "{:?} has leading or trailing whitespace",
            input
        )));
    }
    if input.chars().any(char::is_whitespace) {
        return Err(ShortenError::InvalidUrl(format!(
            "{:?} contains whitespace",
            input
        )));
    }

    Url::parse(input).map_err(|e| ShortenError::InvalidUrl(format!("{}: {}", input, e)))?;
    Ok(())
}
