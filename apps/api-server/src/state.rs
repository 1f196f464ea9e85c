//! Application state - shared across all handlers.

use std::sync::Arc;

use sea_orm::{DbConn, DbErr};

use quill_core::ports::{CommentRepository, PostRepository, UserRepository};
use quill_infra::database::{
    DatabaseConfig, DatabaseConnections, PostgresCommentRepository, PostgresPostRepository,
    PostgresUserRepository,
};

/// Shared application state. Each store receives the pool handle
/// explicitly at construction.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
}

impl AppState {
    /// Connect to the database and build the repositories.
    pub async fn new(config: &DatabaseConfig) -> Result<Self, DbErr> {
        let connections = DatabaseConnections::init(config).await?;
        let state = Self::from_connection(connections.main);
        tracing::info!("Application state initialized");
        Ok(state)
    }

    /// Build the state over an existing connection (tests use this
    /// with a mock connection).
    pub fn from_connection(db: DbConn) -> Self {
        let db = Arc::new(db);
        Self {
            users: Arc::new(PostgresUserRepository::new(Arc::clone(&db))),
            posts: Arc::new(PostgresPostRepository::new(Arc::clone(&db))),
            comments: Arc::new(PostgresCommentRepository::new(db)),
        }
    }
}
