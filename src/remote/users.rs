// src/remote/users.rs
//! HTTP client for the user service

use crate::error::{EntityKind, LookupKey, Result};
use std::time::Duration;

use super::{ServiceClient, UserDirectory, UserProjection};

#[derive(Debug, Clone)]
pub struct UserServiceClient {
    inner: ServiceClient,
}

impl UserServiceClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            inner: ServiceClient::new(base_url, timeout)?,
        })
    }
}

impl UserDirectory for UserServiceClient {
    fn user_by_id(&self, id: &str) -> Result<UserProjection> {
        self.inner.fetch(
            &["api", "user", id],
            EntityKind::User,
            LookupKey::Id(id.to_string()),
        )
    }

    fn user_by_email(&self, email: &str) -> Result<UserProjection> {
        self.inner.fetch(
            &["api", "user", "email", email],
            EntityKind::User,
            LookupKey::Email(email.to_string()),
        )
    }
}
