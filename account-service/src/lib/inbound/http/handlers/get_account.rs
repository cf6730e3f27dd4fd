use axum::http::StatusCode;
use axum::Extension;

use super::AccountData;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedAccount;

/// Return the identity resolved from the bearer token.
///
/// The middleware has already verified the token and re-fetched the live
/// account; this handler only shapes the response.
pub async fn current_account(
    Extension(authenticated): Extension<AuthenticatedAccount>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    Ok(ApiSuccess::new(
        StatusCode::OK,
        (&authenticated.account).into(),
    ))
}
