use std::sync::Arc;

use vary_cors::{Cors, CorsOptions};

pub type SharedCors = Arc<Cors>;

#[derive(Clone)]
pub struct AppState {
    pub cors: SharedCors,
    pub greeting: &'static str,
}

pub fn build_state() -> AppState {
    let options = CorsOptions {
        allowed_origins: vec!["http://localhost:3000".into()],
        allowed_origin_patterns: vec![r"^https://[a-z0-9-]+\.example\.com$".into()],
        allowed_methods: vec!["GET".into(), "POST".into()],
        allowed_headers: vec!["Content-Type".into(), "X-Requested-With".into()],
        exposed_headers: vec!["X-Example-Trace".into()],
        max_age_seconds: 600,
        supports_credentials: true,
    };

    AppState {
        cors: Arc::new(Cors::new(options)),
        greeting: "Welcome to the Axum CORS demo!",
    }
}

pub mod middleware;
