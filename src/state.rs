use std::sync::Arc;

use crate::services::thumbnail::ThumbnailGenerator;

#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<ThumbnailGenerator>,
}
