//! Credentialed operations against the auth endpoints. Every mutation
//! clears stale field errors, re-runs the CSRF pre-flight (a session
//! change rotates the token), posts, and sorts the outcome into the
//! error taxonomy: 422 stays local, everything else propagates.

use leptos::prelude::*;
use serde::Serialize;

use crate::api::client::ApiClient;
use crate::api::error::{ApiError, ValidationErrors};
use crate::auth::session::{Session, SessionState};

/// How an operation finished when it did not fail outright.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Accepted; any session mutation has already been applied.
    Completed,
    /// 422 — field errors were handed to the caller's setter.
    Invalid,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RegisterPayload {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResetPasswordPayload {
    pub token: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ForgotPasswordPayload {
    pub email: String,
}

async fn credentialed_post<B: Serialize>(
    client: &ApiClient,
    path: &str,
    payload: &B,
    set_errors: WriteSignal<ValidationErrors>,
) -> Result<AuthOutcome, ApiError> {
    set_errors.set(ValidationErrors::new());
    client.csrf_preflight().await?;
    match client.post_ok(path, payload).await {
        Ok(()) => Ok(AuthOutcome::Completed),
        Err(ApiError::Validation(errors)) => {
            set_errors.set(errors);
            Ok(AuthOutcome::Invalid)
        }
        Err(e) => Err(e),
    }
}

/// On success the session is refreshed in place, so the caller can
/// navigate to the dashboard knowing the state is `Present`.
pub async fn login(
    client: &ApiClient,
    session: Session,
    payload: &LoginPayload,
    set_errors: WriteSignal<ValidationErrors>,
) -> Result<AuthOutcome, ApiError> {
    let outcome = credentialed_post(client, "/api/login", payload, set_errors).await?;
    if outcome == AuthOutcome::Completed {
        let state = session.refresh_now(client).await;
        if !matches!(state, SessionState::Present(_)) {
            log::warn!("login accepted but session probe resolved {state:?}");
        }
    }
    Ok(outcome)
}

pub async fn register(
    client: &ApiClient,
    session: Session,
    payload: &RegisterPayload,
    set_errors: WriteSignal<ValidationErrors>,
) -> Result<AuthOutcome, ApiError> {
    let outcome = credentialed_post(client, "/api/register", payload, set_errors).await?;
    if outcome == AuthOutcome::Completed {
        session.refresh_now(client).await;
    }
    Ok(outcome)
}

/// Ends the session on the backend and resets all derived state. A 401
/// just means the session was already gone, which is the outcome the
/// caller wanted.
pub async fn logout(client: &ApiClient, session: Session) -> Result<(), ApiError> {
    client.csrf_preflight().await?;
    match client.post_bare("/api/logout").await {
        Ok(()) | Err(ApiError::Unauthorized) => {
            session.reset();
            Ok(())
        }
        Err(e) => Err(e),
    }
}

pub async fn reset_password(
    client: &ApiClient,
    payload: &ResetPasswordPayload,
    set_errors: WriteSignal<ValidationErrors>,
) -> Result<AuthOutcome, ApiError> {
    credentialed_post(client, "/api/reset-password", payload, set_errors).await
}

pub async fn forgot_password(
    client: &ApiClient,
    payload: &ForgotPasswordPayload,
    set_errors: WriteSignal<ValidationErrors>,
) -> Result<AuthOutcome, ApiError> {
    credentialed_post(client, "/api/forgot-password", payload, set_errors).await
}

/// Asks the backend to send a fresh verification mail to the signed-in
/// account.
pub async fn resend_verification(client: &ApiClient) -> Result<(), ApiError> {
    client.csrf_preflight().await?;
    client
        .post_bare("/api/email/verification-notification")
        .await
}
