pub mod constants;
mod context;
mod cors;
mod headers;
mod http_impl;
mod options;
mod origin;
mod result;
mod util;

pub use context::{CorsRequest, CorsResponse, RequestContext};
pub use cors::Cors;
pub use headers::{BufferedResponse, HeaderCollection, Headers, vary_header};
pub use options::CorsOptions;
pub use origin::{OriginMatcher, PatternError};
pub use result::CorsResult;
pub use util::{equals_ignore_case, normalize_upper};
