use crate::constants::{LIST_SEPARATOR, header, method, status};
use crate::context::{CorsRequest, CorsResponse};
use crate::headers::{BufferedResponse, vary_header};
use crate::options::CorsOptions;
use crate::origin::OriginPatterns;
use crate::result::CorsResult;
use crate::util::{normalize_upper, split_list, strip_port};
use tracing::{debug, trace};
use url::Url;

/// CORS policy engine built from an immutable [`CorsOptions`].
///
/// A single instance is meant to be shared by every request, typically behind an `Arc`.
#[derive(Clone, Debug)]
pub struct Cors {
    options: CorsOptions,
    patterns: OriginPatterns,
}

impl Cors {
    pub fn new(options: CorsOptions) -> Self {
        let patterns = OriginPatterns::compile(&options.allowed_origin_patterns);
        debug!(
            allow_all_origins = options.allows_all_origins(),
            origins = options.allowed_origins.len(),
            patterns = patterns.len(),
            credentials = options.supports_credentials,
            "CORS policy configured"
        );

        Self { options, patterns }
    }

    pub fn options(&self) -> &CorsOptions {
        &self.options
    }

    /// Decorates `response` for `request`.
    ///
    /// Returns `false` for preflight requests: the response is complete with a
    /// 204 status and the application must not run. Otherwise the actual
    /// request headers are attached and the caller continues as normal.
    pub fn handle<Req, Res>(&self, request: &Req, response: &mut Res) -> bool
    where
        Req: CorsRequest + ?Sized,
        Res: CorsResponse + ?Sized,
    {
        if self.is_preflight_request(request) {
            trace!(method = request.method(), "handling CORS preflight request");
            self.handle_preflight_request(request, response);
            self.vary_header(response, header::ACCESS_CONTROL_REQUEST_METHOD);
            return false;
        }

        if is_method(request, method::OPTIONS) {
            self.vary_header(response, header::ACCESS_CONTROL_REQUEST_METHOD);
        }
        self.add_actual_request_headers(request, response);
        true
    }

    /// Runs [`handle`](Self::handle) against an empty in-memory response.
    pub fn evaluate<Req: CorsRequest + ?Sized>(&self, request: &Req) -> CorsResult {
        let mut buffer = BufferedResponse::new();
        let proceed = self.handle(request, &mut buffer);
        CorsResult::from_buffer(buffer, proceed)
    }

    pub fn is_actual_request_allowed<Req: CorsRequest + ?Sized>(&self, request: &Req) -> bool {
        self.is_origin_allowed(request)
    }

    pub fn is_cors_request<Req: CorsRequest + ?Sized>(&self, request: &Req) -> bool {
        request.has_header(header::ORIGIN) && !is_same_host(request)
    }

    pub fn is_preflight_request<Req: CorsRequest + ?Sized>(&self, request: &Req) -> bool {
        is_method(request, method::OPTIONS)
            && request.has_header(header::ACCESS_CONTROL_REQUEST_METHOD)
    }

    pub fn vary_header<Res: CorsResponse + ?Sized>(&self, response: &mut Res, name: &str) {
        vary_header(response, name);
    }

    pub fn handle_preflight_request<Req, Res>(&self, request: &Req, response: &mut Res)
    where
        Req: CorsRequest + ?Sized,
        Res: CorsResponse + ?Sized,
    {
        response.set_status(status::NO_CONTENT);
        self.add_preflight_request_headers(request, response);
    }

    pub fn add_actual_request_headers<Req, Res>(&self, request: &Req, response: &mut Res)
    where
        Req: CorsRequest + ?Sized,
        Res: CorsResponse + ?Sized,
    {
        self.configure_allowed_origin(request, response);

        if response.has_header(header::ACCESS_CONTROL_ALLOW_ORIGIN) {
            self.configure_allow_credentials(response);
            self.configure_exposed_headers(response);
        }
    }

    pub fn add_preflight_request_headers<Req, Res>(&self, request: &Req, response: &mut Res)
    where
        Req: CorsRequest + ?Sized,
        Res: CorsResponse + ?Sized,
    {
        self.configure_allowed_origin(request, response);

        if response.has_header(header::ACCESS_CONTROL_ALLOW_ORIGIN) {
            self.configure_allow_credentials(response);
            self.configure_allowed_methods(request, response);
            self.configure_allowed_headers(request, response);
            self.configure_max_age(response);
        }
    }

    pub fn is_origin_allowed<Req: CorsRequest + ?Sized>(&self, request: &Req) -> bool {
        if self.options.allows_all_origins() {
            return true;
        }

        if !request.has_header(header::ORIGIN) {
            return false;
        }

        let origin = request.header_or_empty(header::ORIGIN);
        self.options
            .allowed_origins
            .iter()
            .any(|allowed| allowed == origin)
            || self.patterns.is_match(origin)
    }

    fn configure_allowed_origin<Req, Res>(&self, request: &Req, response: &mut Res)
    where
        Req: CorsRequest + ?Sized,
        Res: CorsResponse + ?Sized,
    {
        if self.options.allows_all_origins() && !self.options.supports_credentials {
            response.set_header(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*".to_owned());
        } else if let Some(origin) = self.options.single_origin() {
            response.set_header(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin.to_owned());
        } else {
            let origin = request.header_or_empty(header::ORIGIN);
            if !origin.is_empty() && self.is_origin_allowed(request) {
                response.set_header(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin.to_owned());
            } else {
                debug!(origin, "CORS origin not allowed");
            }

            self.vary_header(response, header::ORIGIN);
        }
    }

    fn configure_allowed_methods<Req, Res>(&self, request: &Req, response: &mut Res)
    where
        Req: CorsRequest + ?Sized,
        Res: CorsResponse + ?Sized,
    {
        let methods = if self.options.allows_all_methods() {
            self.vary_header(response, header::ACCESS_CONTROL_REQUEST_METHOD);
            split_list(request.header_or_empty(header::ACCESS_CONTROL_REQUEST_METHOD))
        } else {
            self.options.allowed_methods.clone()
        };

        let methods: Vec<String> = methods
            .iter()
            .map(String::as_str)
            .map(normalize_upper)
            .collect();

        if !methods.is_empty() {
            response.set_header(
                header::ACCESS_CONTROL_ALLOW_METHODS,
                methods.join(LIST_SEPARATOR),
            );
        }
    }

    fn configure_allowed_headers<Req, Res>(&self, request: &Req, response: &mut Res)
    where
        Req: CorsRequest + ?Sized,
        Res: CorsResponse + ?Sized,
    {
        let headers = if self.options.allows_all_headers() {
            self.vary_header(response, header::ACCESS_CONTROL_REQUEST_HEADERS);
            split_list(request.header_or_empty(header::ACCESS_CONTROL_REQUEST_HEADERS))
        } else {
            self.options.allowed_headers.clone()
        };

        if !headers.is_empty() {
            response.set_header(
                header::ACCESS_CONTROL_ALLOW_HEADERS,
                headers.join(LIST_SEPARATOR),
            );
        }
    }

    fn configure_allow_credentials<Res: CorsResponse + ?Sized>(&self, response: &mut Res) {
        if self.options.supports_credentials {
            response.set_header(header::ACCESS_CONTROL_ALLOW_CREDENTIALS, "true".to_owned());
        }
    }

    fn configure_exposed_headers<Res: CorsResponse + ?Sized>(&self, response: &mut Res) {
        if !self.options.exposed_headers.is_empty() {
            response.set_header(
                header::ACCESS_CONTROL_EXPOSE_HEADERS,
                self.options.exposed_headers.join(LIST_SEPARATOR),
            );
        }
    }

    fn configure_max_age<Res: CorsResponse + ?Sized>(&self, response: &mut Res) {
        if self.options.max_age_seconds != 0 {
            response.set_header(
                header::ACCESS_CONTROL_MAX_AGE,
                self.options.max_age_seconds.to_string(),
            );
        }
    }
}

impl From<CorsOptions> for Cors {
    fn from(options: CorsOptions) -> Self {
        Self::new(options)
    }
}

fn is_method<Req: CorsRequest + ?Sized>(request: &Req, expected: &str) -> bool {
    normalize_upper(request.method()) == normalize_upper(expected)
}

/// Compares the `Origin` host with the request host, ignoring scheme and port.
///
/// The host is taken as written in the header; `url` only validates it.
fn is_same_host<Req: CorsRequest + ?Sized>(request: &Req) -> bool {
    match origin_host(request.header_or_empty(header::ORIGIN)) {
        Some(host) => host == strip_port(request.host()),
        None => false,
    }
}

fn origin_host(origin: &str) -> Option<&str> {
    Url::parse(origin).ok()?.host_str()?;

    let (_, rest) = origin.split_once("://")?;
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let authority = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host)| host);

    Some(strip_port(authority)).filter(|host| !host.is_empty())
}

#[cfg(test)]
#[path = "cors_test.rs"]
mod cors_test;
