pub mod api;
pub mod chat;
pub mod config;
pub mod error;
pub mod format;
pub mod intent;
pub mod news;

use std::sync::Arc;

use chat::ChatResponder;

/// Application state shared across handlers. Requests hold no other mutable
/// state; each one is handled end to end in its own task.
#[derive(Clone)]
pub struct AppState {
    pub responder: Arc<ChatResponder>,
}
