//! Thumbnail Service
//!
//! Event-driven microservice generating 200x200 shrink-to-fit thumbnails for
//! image objects. The storage platform pushes one object-finalize
//! notification per upload; non-images and already-generated thumbnails are
//! skipped, everything else is downloaded, resized through ImageMagick, and
//! uploaded next to the source as `thumb_<basename>`.

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod services;
pub mod state;

// Public re-exports
pub use config::Config;
pub use error::{AppError, Result};
pub use state::AppState;
