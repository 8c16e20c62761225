//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! `auth` holds the session store; `guard` holds the pure route-gating policy
//! that reads it.

pub mod auth;
pub mod guard;
