use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::AccountData;
use super::ApiError;
use super::ApiSuccess;
use crate::account::errors::AccountError;
use crate::account::models::EmailAddress;
use crate::account::models::UpdateAccountCommand;
use crate::account::ports::AccountServicePort;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

pub async fn update_account<AS: AccountServicePort>(
    State(state): State<AppState<AS>>,
    Extension(authenticated): Extension<AuthenticatedAccount>,
    Json(body): Json<UpdateAccountRequest>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    let command = body.try_into_command()?;

    state
        .account_service
        .update_account(&authenticated.account.id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref account| ApiSuccess::new(StatusCode::OK, account.into()))
}

/// HTTP request body for updating an account (raw JSON).
///
/// `current_password` is mandatory: the token alone does not authorize
/// changes to credentials or contact details.
#[derive(Debug, Deserialize)]
pub struct UpdateAccountRequest {
    pub current_password: String,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl UpdateAccountRequest {
    fn try_into_command(self) -> Result<UpdateAccountCommand, AccountError> {
        let email = self.email.map(EmailAddress::new).transpose()?;

        Ok(UpdateAccountCommand {
            current_password: self.current_password,
            email,
            password: self.password,
        })
    }
}
