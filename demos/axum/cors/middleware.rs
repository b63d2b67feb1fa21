use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use super::AppState;

pub async fn cors_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let result = state.cors.evaluate(&request);

    if result.end_response {
        let mut response = Response::new(Body::empty());
        result.apply_to(&mut response);
        return response;
    }

    let mut response = next.run(request).await;
    result.apply_to(&mut response);
    response
}
