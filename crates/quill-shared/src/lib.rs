//! # Quill Shared
//!
//! Request/response DTOs and the standard error envelope, shared
//! between the API server and any Rust client.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
