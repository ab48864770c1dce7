//! Invoice Dashboard Library
//!
//! This module exports the core types and functions for testing and reuse.

pub mod config;
pub mod constants;
pub mod currency;
pub mod db;
pub mod error;
pub mod models;
pub mod pagination;
pub mod revalidate;
pub mod routes;
pub mod search;
pub mod security;
pub mod seed;

pub use config::Config;
pub use error::{AppError, Result};
pub use revalidate::Revalidator;
pub use routes::router;

use sqlx::PgPool;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Config,
    pub revalidator: Revalidator,
}

impl AppState {
    /// Create a new AppState with the given pool and configuration
    pub fn new(pool: PgPool, config: Config) -> Self {
        Self {
            pool,
            config,
            revalidator: Revalidator::default(),
        }
    }
}
