use crate::constants::{LIST_SEPARATOR, header};
use crate::context::CorsResponse;
use crate::util::equals_ignore_case;
use indexmap::IndexMap;

/// Response headers in the order they were first written.
pub type Headers = IndexMap<String, String>;

/// Adds `name` to the response's `Vary` header unless it is already listed.
///
/// Existing entries are matched case-insensitively; new entries are appended
/// with `", "`. The merged list is written back as a single field line.
pub fn vary_header<R: CorsResponse + ?Sized>(response: &mut R, name: &str) {
    let name = name.trim();
    if name.is_empty() {
        return;
    }

    let merged = match response.vary().as_deref() {
        None | Some("") => name.to_owned(),
        Some(existing) => {
            let listed = existing
                .split(',')
                .map(str::trim)
                .any(|entry| equals_ignore_case(entry, name));
            if listed {
                return;
            }
            format!("{existing}{LIST_SEPARATOR}{name}")
        }
    };

    response.set_header(header::VARY, merged);
}

/// Insertion-ordered header map whose names are compared case-insensitively.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HeaderCollection {
    headers: Headers,
}

impl HeaderCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| equals_ignore_case(key, name))
            .map(|(_, value)| value.as_str())
    }

    pub fn insert(&mut self, name: &str, value: String) {
        let position = self
            .headers
            .keys()
            .position(|key| equals_ignore_case(key, name));

        match position.and_then(|index| self.headers.get_index_mut(index)) {
            Some((_, existing)) => *existing = value,
            None => {
                self.headers.insert(name.to_owned(), value);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn into_headers(self) -> Headers {
        self.headers
    }
}

/// In-memory [`CorsResponse`] that records headers and the status code.
#[derive(Debug, Default, Clone)]
pub struct BufferedResponse {
    pub headers: HeaderCollection,
    pub status: Option<u16>,
}

impl BufferedResponse {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CorsResponse for BufferedResponse {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    fn set_header(&mut self, name: &str, value: String) {
        self.headers.insert(name, value);
    }

    fn set_status(&mut self, status: u16) {
        self.status = Some(status);
    }
}

#[cfg(test)]
#[path = "headers_test.rs"]
mod headers_test;
