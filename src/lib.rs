// src/lib.rs

//! Chomp recipe service
//!
//! Stores recipes and serves them hydrated with data owned by other
//! services.
//!
//! # Architecture
//!
//! - Skeletons only: recipes keep opaque ids for their author and
//!   ingredients; names and images are fetched from the owning services
//!   on every read
//! - Checked writes: every foreign reference is resolved before anything
//!   is persisted
//! - Instructions: an ordered list of lines packed into one stored string
//!   (see [`instructions`])

pub mod db;
pub mod duration;
mod error;
pub mod instructions;
pub mod recipes;
pub mod remote;

#[cfg(feature = "server")]
pub mod server;

pub use duration::{DurationParseError, RecipeDuration};
pub use error::{EntityKind, Error, LookupKey, Result};
pub use instructions::DelimiterConflict;
pub use recipes::{RecipeRequest, RecipeResponse, RecipeService};
pub use remote::{IngredientCatalog, IngredientProjection, UserDirectory, UserProjection};
