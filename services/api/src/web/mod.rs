pub mod auth;
pub mod chat;
pub mod middleware;
pub mod rest;
pub mod state;

// Re-export the pieces the binaries wire into the router.
pub use middleware::require_auth;
pub use rest::{status_handler, ApiDoc};
