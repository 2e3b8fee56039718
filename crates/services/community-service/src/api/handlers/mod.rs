//! Request handlers.

pub mod community_handler;
pub mod health_handler;

pub use community_handler::{community_routes, membership_routes};
pub use health_handler::health_routes;
