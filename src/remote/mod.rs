// src/remote/mod.rs

//! Lookups against the services that own users and ingredients
//!
//! The recipe service stores only identifiers for authors and ingredients.
//! Everything displayable about them is fetched from the owning service on
//! every read:
//! - `GET {user_url}/api/user/{id}`
//! - `GET {user_url}/api/user/email/{email}`
//! - `GET {ingredient_url}/api/ingredient/{id}`
//!
//! The aggregator talks to these through the [`UserDirectory`] and
//! [`IngredientCatalog`] traits; the HTTP implementations live in
//! [`users`] and [`ingredients`].

mod client;
pub mod ingredients;
pub mod users;

use crate::error::Result;
use serde::{Deserialize, Serialize};

pub use client::{DEFAULT_TIMEOUT, ServiceClient};
pub use ingredients::IngredientServiceClient;
pub use users::UserServiceClient;

/// A user as the user service reports it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProjection {
    pub id: String,
    #[serde(default)]
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// An ingredient as the ingredient service reports it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientProjection {
    pub id: String,
    pub name: String,
    /// Units the ingredient service considers valid for this ingredient
    #[serde(default)]
    pub units: Vec<String>,
}

/// Source of author records
///
/// Implementations return [`crate::Error::NotFound`] when the user doesn't
/// exist and [`crate::Error::TransientFailure`] for anything else that
/// went wrong.
pub trait UserDirectory: Send + Sync {
    fn user_by_id(&self, id: &str) -> Result<UserProjection>;

    fn user_by_email(&self, email: &str) -> Result<UserProjection>;
}

/// Source of ingredient records, with the same error contract as [`UserDirectory`]
pub trait IngredientCatalog: Send + Sync {
    fn ingredient(&self, id: &str) -> Result<IngredientProjection>;
}
