//! Short code generation.
//!
//! Codes are [`CODE_LEN`] symbols drawn uniformly from [`CODE_ALPHABET`], which gives
//! 26^6 (about 308.9 million) possible codes. Uniqueness is obtained by rejection
//! sampling: a candidate that is already taken is thrown away and a new one drawn.
//! The number of draws is capped so a saturated code space fails instead of spinning.

use crate::error::{Result, ShortenError};
use crate::model::{CODE_ALPHABET, CODE_LEN};
use rand::Rng;
use tracing::debug;

/// Draw budget used when none is configured.
pub const DEFAULT_MAX_ATTEMPTS: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeGenerator {
    max_attempts: usize,
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

impl CodeGenerator {
    /// `max_attempts` is clamped to at least one draw.
    pub fn new(max_attempts: usize) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Draws a single candidate code. Says nothing about uniqueness.
    pub fn random_code<R: Rng + ?Sized>(rng: &mut R) -> String {
        (0..CODE_LEN)
            .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
            .collect()
    }

    /// Draws candidates until one is not `taken`, or the draw budget runs out.
    pub fn generate_unique<R, F>(&self, rng: &mut R, taken: F) -> Result<String>
    where
        R: Rng + ?Sized,
        F: Fn(&str) -> bool,
    {
        for attempt in 1..=self.max_attempts {
            let candidate = Self::random_code(rng);
            if !taken(&candidate) {
                debug!(code = %candidate, attempt, "generated code");
                return Ok(candidate);
            }
            debug!(code = %candidate, attempt, "code collision, retrying");
        }

        Err(ShortenError::CodeSpaceExhausted {
            attempts: self.max_attempts,
        })
    }
}
