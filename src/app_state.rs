//! Application state shared across handlers

use std::sync::Arc;

use crate::models::{SnippetStore, UserStore};
use crate::render::Renderer;

/// Shared application state. Collaborators are trait objects so the pipeline
/// and its tests can substitute implementations; nothing here is request
/// scoped.
#[derive(Clone)]
pub struct AppState {
    pub snippets: Arc<dyn SnippetStore>,
    pub users: Arc<dyn UserStore>,
    pub renderer: Arc<dyn Renderer>,
}

impl AppState {
    pub fn new(
        snippets: Arc<dyn SnippetStore>,
        users: Arc<dyn UserStore>,
        renderer: Arc<dyn Renderer>,
    ) -> Self {
        Self {
            snippets,
            users,
            renderer,
        }
    }
}
