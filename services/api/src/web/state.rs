//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use research_chat_core::{AuthService, ChatService};
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
///
/// Everything in here is constructed in `main` and injected; no handler
/// reaches for globals.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub chat: Arc<ChatService>,
    pub config: Arc<Config>,
}
