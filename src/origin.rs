use crate::constants::{WILDCARD, WILDCARD_PATTERN};
use regex_automata::meta::{BuildError, Regex};
use thiserror::Error;
use tracing::warn;

const MAX_PATTERN_LENGTH: usize = 50_000;
pub(crate) const MAX_ORIGIN_LENGTH: usize = 4_096;

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("failed to compile origin pattern")]
    Build(#[source] Box<BuildError>),
    #[error("origin pattern length {length} exceeds maximum allowed {max}")]
    TooLong { length: usize, max: usize },
}

/// A compiled entry of the origin pattern list.
#[derive(Clone, Debug)]
pub enum OriginMatcher {
    Pattern(Regex),
    /// Placeholder for a pattern that could not be compiled. Never matches.
    Invalid,
}

impl OriginMatcher {
    /// Compiles `pattern` for unanchored, case-sensitive search.
    pub fn compile(pattern: &str) -> Result<Self, PatternError> {
        if pattern.len() > MAX_PATTERN_LENGTH {
            return Err(PatternError::TooLong {
                length: pattern.len(),
                max: MAX_PATTERN_LENGTH,
            });
        }

        Regex::new(pattern)
            .map(Self::Pattern)
            .map_err(|err| PatternError::Build(Box::new(err)))
    }

    pub fn matches(&self, origin: &str) -> bool {
        match self {
            OriginMatcher::Pattern(regex) => {
                origin.len() <= MAX_ORIGIN_LENGTH && regex.is_match(origin.as_bytes())
            }
            OriginMatcher::Invalid => false,
        }
    }
}

/// Ordered, precompiled form of the configured origin patterns.
#[derive(Clone, Debug, Default)]
pub(crate) struct OriginPatterns {
    matchers: Vec<OriginMatcher>,
}

impl OriginPatterns {
    pub(crate) fn compile<S: AsRef<str>>(patterns: &[S]) -> Self {
        let matchers = patterns
            .iter()
            .map(|pattern| {
                let pattern = pattern.as_ref();
                match OriginMatcher::compile(pattern) {
                    Ok(matcher) => matcher,
                    Err(err) => {
                        if pattern != WILDCARD && pattern != WILDCARD_PATTERN {
                            warn!(pattern, error = %err, "ignoring invalid CORS origin pattern");
                        }
                        OriginMatcher::Invalid
                    }
                }
            })
            .collect();

        Self { matchers }
    }

    pub(crate) fn is_match(&self, origin: &str) -> bool {
        self.matchers.iter().any(|matcher| matcher.matches(origin))
    }

    pub(crate) fn len(&self) -> usize {
        self.matchers.len()
    }
}

#[cfg(test)]
#[path = "origin_test.rs"]
mod origin_test;
