// src/server/handlers/mod.rs
//! HTTP request handlers for the recipe service

pub mod recipes;
