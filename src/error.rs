// src/error.rs

//! Error types for the recipe service
//!
//! Every failure the aggregator can surface falls into one of three classes
//! that the request layer maps to a status code:
//! - [`Error::NotFound`] - a recipe, author or ingredient is missing
//! - [`Error::Validation`] - the request itself is unacceptable
//! - everything else - an opaque internal failure

use std::fmt;
use thiserror::Error;

use crate::instructions::DelimiterConflict;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// The kind of entity a lookup was looking for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Recipe,
    User,
    Ingredient,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Recipe => "Recipe",
            EntityKind::User => "User",
            EntityKind::Ingredient => "Ingredient",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The key a failed lookup was made with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupKey {
    Id(String),
    Email(String),
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupKey::Id(id) => write!(f, "id: {id}"),
            LookupKey::Email(email) => write!(f, "email: {email}"),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    /// A recipe, author or ingredient does not exist
    #[error("{kind} not found with {key}")]
    NotFound { kind: EntityKind, key: LookupKey },

    /// The request was rejected before anything was persisted
    #[error("Validation failed: {0}")]
    Validation(String),

    /// An owning service was unreachable, failed, or answered with garbage
    #[error("Remote service failure: {0}")]
    TransientFailure(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Initialization error: {0}")]
    InitError(String),

    #[error("I/O error: {0}")]
    IoError(String),
}

impl Error {
    /// Shorthand for a missing entity looked up by identifier
    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        Error::NotFound {
            kind,
            key: LookupKey::Id(id.into()),
        }
    }

    /// True for the not-found class of failures
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// True for failures caused by the request itself
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

impl From<DelimiterConflict> for Error {
    fn from(err: DelimiterConflict) -> Self {
        Error::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = Error::not_found(EntityKind::Ingredient, "flourId");
        assert_eq!(err.to_string(), "Ingredient not found with id: flourId");
        assert!(err.is_not_found());

        let err = Error::NotFound {
            kind: EntityKind::User,
            key: LookupKey::Email("chef@example.com".to_string()),
        };
        assert_eq!(err.to_string(), "User not found with email: chef@example.com");
    }

    #[test]
    fn test_delimiter_conflict_is_validation() {
        let err: Error = DelimiterConflict { lines: vec![1] }.into();
        assert!(err.is_validation());
        assert!(!err.is_not_found());
    }
}
