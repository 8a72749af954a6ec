//! # Blog Infrastructure
//!
//! Concrete implementations of the [`PostRepository`](blog_core::ports::PostRepository) port.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL store via SeaORM
//! - `minimal` - No external dependencies, in-memory only

pub mod database;

pub use database::{DatabaseConfig, InMemoryPostRepository, MEMORY_URL, connect_repository};

#[cfg(feature = "postgres")]
pub use database::PostgresPostRepository;
