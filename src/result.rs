use crate::constants::{LIST_SEPARATOR, header};
use crate::context::CorsResponse;
use crate::headers::{BufferedResponse, Headers, vary_header};
use crate::util::equals_ignore_case;

/// Headers and response metadata produced by [`Cors::evaluate`](crate::Cors::evaluate).
#[derive(Debug, Clone, Default)]
pub struct CorsResult {
    pub headers: Headers,
    /// `Some(204)` for preflight requests; actual requests leave the status to the application.
    pub status: Option<u16>,
    /// `true` when the request was a preflight and must not reach the application.
    pub end_response: bool,
}

impl CorsResult {
    pub(crate) fn from_buffer(buffer: BufferedResponse, proceed: bool) -> Self {
        Self {
            headers: buffer.headers.into_headers(),
            status: buffer.status,
            end_response: !proceed,
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| equals_ignore_case(key, name))
            .map(|(_, value)| value.as_str())
    }

    /// Writes the recorded headers and status onto `response`.
    ///
    /// `Vary` entries are merged into whatever the application already set
    /// instead of overwriting it.
    pub fn apply_to<R: CorsResponse + ?Sized>(&self, response: &mut R) {
        for (name, value) in &self.headers {
            if equals_ignore_case(name, header::VARY) {
                for entry in value.split(LIST_SEPARATOR) {
                    vary_header(response, entry);
                }
            } else {
                response.set_header(name, value.clone());
            }
        }

        if let Some(status) = self.status {
            response.set_status(status);
        }
    }
}

#[cfg(test)]
#[path = "result_test.rs"]
mod result_test;
