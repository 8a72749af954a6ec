//! # Blog API
//!
//! Actix-web HTTP server exposing CRUD operations over blog posts.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod observability;
pub mod server;
pub mod state;
pub mod telemetry;

pub use config::AppConfig;
pub use server::{BlogServer, ServerError, ServerStatus};
pub use state::AppState;
