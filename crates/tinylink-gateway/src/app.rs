use crate::auth::require_basic_auth;
use crate::error::AppError;
use crate::handlers::{delete_url_handler, health_handler, redirect_handler, save_url_handler};
use crate::state::AppState;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::Router;
use std::any::Any;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info_span, Span};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        let auth = middleware::from_fn_with_state(state.clone(), require_basic_auth);
        let timeout = state.request_timeout();

        Router::new()
            .route("/health", get(health_handler))
            .route("/url", post(save_url_handler).route_layer(auth.clone()))
            .route(
                "/url/{alias}",
                delete(delete_url_handler)
                    .route_layer(auth)
                    .get(redirect_handler),
            )
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(TraceLayer::new_for_http().make_span_with(request_span))
                    .layer(TimeoutLayer::with_status_code(
                        StatusCode::REQUEST_TIMEOUT,
                        timeout,
                    ))
                    .layer(CatchPanicLayer::custom(panic_response)),
            )
            .with_state(state)
    }
}

fn request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");

    error!(panic = %detail, "request handler panicked");
    AppError::Internal.with_status().into_response()
}
