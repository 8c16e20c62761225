//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration. Access control is not a page
//! concern: `components::route_guard` wraps the whole route table.

pub mod admin;
pub mod dashboard;
pub mod login;
pub mod register;
