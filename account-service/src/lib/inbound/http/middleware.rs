use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use super::handlers::ApiError;
use crate::account::models::Account;
use crate::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

/// Extension type carrying the identity resolved from a bearer token,
/// scoped to the lifetime of one request.
#[derive(Debug, Clone)]
pub struct AuthenticatedAccount {
    pub account: Account,
}

/// Middleware guarding protected routes.
///
/// Extracts the bearer token, asks the authentication flow to verify it
/// and re-fetch the live account, and stores the result in request
/// extensions. Every failure collapses into a single 401 response.
pub async fn authenticate<AS: AccountServicePort>(
    State(state): State<AppState<AS>>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_bearer_token(&req)?;

    let account = state
        .account_service
        .authorize(token)
        .await
        .map_err(|e| ApiError::from(e).into_response())?;

    req.extensions_mut().insert(AuthenticatedAccount { account });

    Ok(next.run(req).await)
}

fn extract_bearer_token(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| {
            ApiError::Unauthorized("Missing Authorization header".to_string()).into_response()
        })?;

    let auth_str = auth_header.to_str().map_err(|_| {
        ApiError::Unauthorized("Invalid Authorization header".to_string()).into_response()
    })?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) => Ok(token),
        None => Err(ApiError::Unauthorized(
            "Invalid Authorization header format. Expected: Bearer <token>".to_string(),
        )
        .into_response()),
    }
}
