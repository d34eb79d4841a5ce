//! StudyForge API server library.
//!
//! Exposes the building blocks (config, state, ledger, renderers, routes)
//! so integration tests and the binary entrypoint can both access them.

pub mod compose;
pub mod config;
pub mod credits;
pub mod db;
pub mod errors;
pub mod generation;
pub mod history;
pub mod image_client;
pub mod llm_client;
pub mod models;
pub mod payments;
pub mod rasterizer;
pub mod render;
pub mod routes;
pub mod state;
