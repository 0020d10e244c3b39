// src/recipes/mod.rs

//! Recipe aggregation: the write checks and read hydration that stitch
//! locally stored skeletons together with the user and ingredient services.

pub mod dto;
pub mod lines;
mod service;

pub use dto::{
    AuthorResponse, RecipeIngredientRequest, RecipeIngredientResponse, RecipeRequest,
    RecipeResponse,
};
pub use lines::ResolvedLine;
pub use service::RecipeService;
