//! Keyword list parsing and the per-request optional keyword sample.

use rand::{seq::SliceRandom, Rng};
use std::ops::Deref;

/// How many optional keywords a single prompt receives.
pub const OPTIONAL_SAMPLE_SIZE: usize = 2;

const DELIMITERS: [char; 3] = [',', '，', '\n'];

/// Ordered list of trimmed, non-empty keywords.
///
/// Duplicates are kept: every entry is an independent keyword for prompt
/// building and density counting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordList(Vec<String>);

impl KeywordList {
    /// Split on `,`, `，` or newline, trim each token and drop empty ones.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        Self(
            raw.split(&DELIMITERS[..])
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(ToString::to_string)
                .collect(),
        )
    }

    /// Comma separated rendering used in prompts.
    #[must_use]
    pub fn joined(&self) -> String {
        self.0.join(", ")
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl Deref for KeywordList {
    type Target = [String];

    fn deref(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for KeywordList {
    fn from(keywords: Vec<String>) -> Self {
        Self(
            keywords
                .iter()
                .map(|keyword| keyword.trim())
                .filter(|keyword| !keyword.is_empty())
                .map(ToString::to_string)
                .collect(),
        )
    }
}

/// Pick up to [`OPTIONAL_SAMPLE_SIZE`] keywords from the optional pool.
///
/// Pools at or below the sample size are returned unchanged; larger pools are
/// shuffled (Fisher-Yates) on a copy and truncated. Call once per generation
/// request so every section draws its own sample.
pub fn sample_optional<R: Rng + ?Sized>(pool: &KeywordList, rng: &mut R) -> Vec<String> {
    if pool.len() <= OPTIONAL_SAMPLE_SIZE {
        return pool.to_vec();
    }

    let mut shuffled = pool.to_vec();
    shuffled.shuffle(rng);
    shuffled.truncate(OPTIONAL_SAMPLE_SIZE);
    shuffled
}
