use std::sync::Arc;
use crate::gists::GistService;

// app's shared state

#[derive(Clone)]
pub struct AppState {
    pub gists: Arc<GistService>,
}

impl AppState {
    pub fn new(gists: GistService) -> Self {
        Self {
            gists: Arc::new(gists),
        }
    }
}
