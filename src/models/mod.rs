pub mod event;

pub use event::{PushEnvelope, PushMessage, ResourceState, StorageObjectEvent};
