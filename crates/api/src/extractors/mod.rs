//! Axum request extractors.

pub mod staff_auth;

pub use staff_auth::StaffAuth;
