//! SeaORM entities for the three persisted tables.

pub mod comment;
pub mod post;
pub mod user;
