// src/remote/ingredients.rs
//! HTTP client for the ingredient service

use crate::error::{EntityKind, LookupKey, Result};
use std::time::Duration;

use super::{IngredientCatalog, IngredientProjection, ServiceClient};

#[derive(Debug, Clone)]
pub struct IngredientServiceClient {
    inner: ServiceClient,
}

impl IngredientServiceClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            inner: ServiceClient::new(base_url, timeout)?,
        })
    }
}

impl IngredientCatalog for IngredientServiceClient {
    fn ingredient(&self, id: &str) -> Result<IngredientProjection> {
        self.inner.fetch(
            &["api", "ingredient", id],
            EntityKind::Ingredient,
            LookupKey::Id(id.to_string()),
        )
    }
}
