//! Repository Module
//!
//! Free async functions per resource, all taking `&SqlitePool` (or a
//! `&mut Transaction` for the helpers that must run inside a caller's
//! transaction). Runtime-checked queries only.

// Customers
pub mod cliente;
pub mod endereco;

// Catalog
pub mod categoria;
pub mod produto;

// Shopping
pub mod carrinho;

// Orders
pub mod pagamento;
pub mod pedido;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Out of stock: {0}")]
    OutOfStock(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            let msg = db_err.message();
            // Surface constraint violations as client errors, not 500s
            if msg.contains("UNIQUE constraint failed") {
                return RepoError::Duplicate(msg.to_string());
            }
            if msg.contains("CHECK constraint failed") {
                return RepoError::Validation(msg.to_string());
            }
        }
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
