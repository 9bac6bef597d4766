/// HTTP handlers for the event push surface
///
/// This module contains handlers for:
/// - Events: the object-finalize push endpoint
/// - Health: liveness/readiness probes
pub mod events;
pub mod health;

pub use events::handle_finalize;
pub use health::{health, health_ready};
