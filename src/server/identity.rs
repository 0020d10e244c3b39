// src/server/identity.rs
//! Caller identity
//!
//! Authentication happens upstream; the gateway forwards the authenticated
//! user's email in `X-User-Email`. The recipe service trusts it as-is.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use super::error::{ApiError, ProblemDetails};

pub const USER_EMAIL_HEADER: &str = "x-user-email";

/// The email of the user making the request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    pub email: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for CallerIdentity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(USER_EMAIL_HEADER)
            .ok_or_else(|| ProblemDetails::bad_request("Missing X-User-Email header"))?;

        let email = value
            .to_str()
            .map_err(|_| ProblemDetails::bad_request("X-User-Email header is not valid text"))?
            .trim();

        if email.is_empty() {
            return Err(ProblemDetails::bad_request("X-User-Email header is empty").into());
        }

        Ok(CallerIdentity {
            email: email.to_string(),
        })
    }
}
