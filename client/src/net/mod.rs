//! Networking modules for the auth HTTP API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` binds the authentication collaborator over HTTP and `types` defines
//! the shared wire schema.

pub mod api;
pub mod types;
