use crate::constants::header;
use std::borrow::Cow;
use crate::util::equals_ignore_case;

/// Read access to the parts of an incoming request the CORS engine inspects.
pub trait CorsRequest {
    fn method(&self) -> &str;

    /// Looks up a request header. Names are compared case-insensitively.
    fn header(&self, name: &str) -> Option<&str>;

    /// Authority the request was addressed to, usually the `Host` header.
    fn host(&self) -> &str;

    /// `true` when the header is present with a non-empty value.
    fn has_header(&self, name: &str) -> bool {
        self.header(name).is_some_and(|value| !value.is_empty())
    }

    fn header_or_empty(&self, name: &str) -> &str {
        self.header(name).unwrap_or_default()
    }
}

/// Write access to the response the CORS engine decorates.
pub trait CorsResponse {
    fn header(&self, name: &str) -> Option<&str>;

    /// Sets a header, replacing any value already stored under the same name.
    fn set_header(&mut self, name: &str, value: String);

    fn set_status(&mut self, status: u16);

    fn has_header(&self, name: &str) -> bool {
        self.header(name).is_some_and(|value| !value.is_empty())
    }

    /// Every `Vary` entry already on the response as one comma-separated value.
    ///
    /// Stores that keep repeated field lines override this so all lines are
    /// seen, not only the first.
    fn vary(&self) -> Option<Cow<'_, str>> {
        self.header(header::VARY).map(Cow::Borrowed)
    }
}

impl<T: CorsRequest + ?Sized> CorsRequest for &T {
    fn method(&self) -> &str {
        (**self).method()
    }

    fn header(&self, name: &str) -> Option<&str> {
        (**self).header(name)
    }

    fn host(&self) -> &str {
        (**self).host()
    }
}

impl<T: CorsResponse + ?Sized> CorsResponse for &mut T {
    fn header(&self, name: &str) -> Option<&str> {
        (**self).header(name)
    }

    fn set_header(&mut self, name: &str, value: String) {
        (**self).set_header(name, value)
    }

    fn set_status(&mut self, status: u16) {
        (**self).set_status(status)
    }

    fn vary(&self) -> Option<Cow<'_, str>> {
        (**self).vary()
    }
}

/// Borrowed view of a request, for callers that already extracted the CORS headers.
#[derive(Debug, Clone, Default)]
pub struct RequestContext<'a> {
    pub method: &'a str,
    pub host: &'a str,
    pub origin: Option<&'a str>,
    pub access_control_request_method: Option<&'a str>,
    pub access_control_request_headers: Option<&'a str>,
}

impl CorsRequest for RequestContext<'_> {
    fn method(&self) -> &str {
        self.method
    }

    fn header(&self, name: &str) -> Option<&str> {
        if equals_ignore_case(name, header::ORIGIN) {
            self.origin
        } else if equals_ignore_case(name, header::ACCESS_CONTROL_REQUEST_METHOD) {
            self.access_control_request_method
        } else if equals_ignore_case(name, header::ACCESS_CONTROL_REQUEST_HEADERS) {
            self.access_control_request_headers
        } else if equals_ignore_case(name, header::HOST) {
            Some(self.host)
        } else {
            None
        }
    }

    fn host(&self) -> &str {
        self.host
    }
}

#[cfg(test)]
#[path = "context_test.rs"]
mod context_test;
