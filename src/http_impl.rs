//! [`CorsRequest`] and [`CorsResponse`] for the `http` crate's types, so the
//! engine can sit directly in hyper, axum or tower based stacks.

use crate::constants::LIST_SEPARATOR;
use crate::context::{CorsRequest, CorsResponse};
use http::header::{HOST, HeaderMap, HeaderName, HeaderValue, VARY};
use http::{Request, Response, StatusCode, Uri, request, response};
use std::borrow::Cow;
use tracing::warn;

impl<B> CorsRequest for Request<B> {
    fn method(&self) -> &str {
        Request::method(self).as_str()
    }

    fn header(&self, name: &str) -> Option<&str> {
        header_str(self.headers(), name)
    }

    fn host(&self) -> &str {
        request_host(self.headers(), self.uri())
    }
}

impl CorsRequest for request::Parts {
    fn method(&self) -> &str {
        self.method.as_str()
    }

    fn header(&self, name: &str) -> Option<&str> {
        header_str(&self.headers, name)
    }

    fn host(&self) -> &str {
        request_host(&self.headers, &self.uri)
    }
}

impl<B> CorsResponse for Response<B> {
    fn header(&self, name: &str) -> Option<&str> {
        header_str(self.headers(), name)
    }

    fn set_header(&mut self, name: &str, value: String) {
        insert_header(self.headers_mut(), name, value);
    }

    fn set_status(&mut self, status: u16) {
        if let Some(status) = status_code(status) {
            *self.status_mut() = status;
        }
    }

    fn vary(&self) -> Option<Cow<'_, str>> {
        joined_vary(self.headers())
    }
}

impl CorsResponse for response::Parts {
    fn header(&self, name: &str) -> Option<&str> {
        header_str(&self.headers, name)
    }

    fn set_header(&mut self, name: &str, value: String) {
        insert_header(&mut self.headers, name, value);
    }

    fn set_status(&mut self, status: u16) {
        if let Some(status) = status_code(status) {
            self.status = status;
        }
    }

    fn vary(&self) -> Option<Cow<'_, str>> {
        joined_vary(&self.headers)
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

/// All `Vary` field lines joined with `", "`; borrowed when there is only one.
fn joined_vary(headers: &HeaderMap) -> Option<Cow<'_, str>> {
    let mut lines = headers
        .get_all(VARY)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter(|value| !value.trim().is_empty());

    let first = lines.next()?;
    let Some(second) = lines.next() else {
        return Some(Cow::Borrowed(first));
    };

    let mut joined = format!("{first}{LIST_SEPARATOR}{second}");
    for line in lines {
        joined.push_str(LIST_SEPARATOR);
        joined.push_str(line);
    }
    Some(Cow::Owned(joined))
}

/// `Host` header first, then the authority of an absolute-form URI.
fn request_host<'a>(headers: &'a HeaderMap, uri: &'a Uri) -> &'a str {
    header_str(headers, HOST.as_str())
        .or_else(|| uri.authority().map(|authority| authority.as_str()))
        .unwrap_or_default()
}

fn insert_header(headers: &mut HeaderMap, name: &str, value: String) {
    let name = match HeaderName::from_bytes(name.as_bytes()) {
        Ok(name) => name,
        Err(err) => {
            warn!(name, error = %err, "skipping CORS header with invalid name");
            return;
        }
    };

    match HeaderValue::try_from(value) {
        Ok(value) => {
            headers.insert(name, value);
        }
        Err(err) => {
            warn!(header = %name, error = %err, "skipping CORS header with invalid value");
        }
    }
}

fn status_code(status: u16) -> Option<StatusCode> {
    match StatusCode::from_u16(status) {
        Ok(status) => Some(status),
        Err(err) => {
            warn!(status, error = %err, "ignoring invalid CORS status code");
            None
        }
    }
}

#[cfg(test)]
#[path = "http_impl_test.rs"]
mod http_impl_test;
