use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::get_account::current_account;
use super::handlers::login::login;
use super::handlers::register::register;
use super::handlers::update_account::update_account;
use super::middleware::authenticate as auth_middleware;
use crate::account::ports::AccountServicePort;

pub struct AppState<AS: AccountServicePort> {
    pub account_service: Arc<AS>,
}

impl<AS: AccountServicePort> Clone for AppState<AS> {
    fn clone(&self) -> Self {
        Self {
            account_service: Arc::clone(&self.account_service),
        }
    }
}

pub fn create_router<AS: AccountServicePort>(account_service: Arc<AS>) -> Router {
    let state = AppState { account_service };

    let public_routes = Router::new()
        .route("/api/auth/login", post(login::<AS>))
        .route("/api/accounts", post(register::<AS>));

    let protected_routes = Router::new()
        .route("/api/accounts/me", get(current_account))
        .route("/api/accounts/me", patch(update_account::<AS>))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::<AS>,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
