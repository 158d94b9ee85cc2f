use std::sync::Arc;
use ddd_inference::Pipeline;
use ddd_storage::Library;

pub struct AppState {
    pub pipeline: Arc<Pipeline>,
    pub library: Arc<Library>,
}

impl AppState {
    pub fn new(pipeline: Pipeline, library: Library) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            library: Arc::new(library),
        }
    }
}
