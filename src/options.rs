use crate::constants::{WILDCARD, WILDCARD_PATTERN};
use serde::{Deserialize, Serialize};

/// Immutable CORS policy shared by every request handled by a [`Cors`](crate::Cors).
///
/// Empty lists are permissive: no origins means every origin is allowed, no
/// methods or headers means the preflight request's own values are reflected.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CorsOptions {
    /// Exact origins, compared byte for byte. `"*"` allows every origin.
    pub allowed_origins: Vec<String>,
    /// Regular expressions searched within the origin, first match wins.
    /// `"*"` or `".*"` allow every origin.
    pub allowed_origin_patterns: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    pub exposed_headers: Vec<String>,
    /// Emitted as `Access-Control-Max-Age`; zero omits the header.
    pub max_age_seconds: i64,
    pub supports_credentials: bool,
}

impl CorsOptions {
    pub fn allows_all_origins(&self) -> bool {
        if self.allowed_origins.is_empty() && self.allowed_origin_patterns.is_empty() {
            return true;
        }

        contains(&self.allowed_origins, WILDCARD)
            || contains(&self.allowed_origin_patterns, WILDCARD)
            || contains(&self.allowed_origin_patterns, WILDCARD_PATTERN)
    }

    pub fn allows_all_methods(&self) -> bool {
        self.allowed_methods.is_empty() || contains(&self.allowed_methods, WILDCARD)
    }

    pub fn allows_all_headers(&self) -> bool {
        self.allowed_headers.is_empty() || contains(&self.allowed_headers, WILDCARD)
    }

    /// The only configured origin, when nothing else can change the allowed value.
    pub(crate) fn single_origin(&self) -> Option<&str> {
        if self.allows_all_origins() || !self.allowed_origin_patterns.is_empty() {
            return None;
        }

        match self.allowed_origins.as_slice() {
            [origin] => Some(origin.as_str()),
            _ => None,
        }
    }
}

fn contains(values: &[String], needle: &str) -> bool {
    values.iter().any(|value| value == needle)
}

#[cfg(test)]
#[path = "options_test.rs"]
mod options_test;
