//! Scene-facing side of light synchronization
//!
//! The traits a host implements to feed lights ([`SceneSource`]) and to hear
//! about collection changes ([`ChangeTracker`]), in-memory implementations of
//! both, and the registry that drives many lights per frame.

pub mod change_tracker;
pub mod light_registry;
pub mod source;

#[cfg(test)]
mod tests;

pub use change_tracker::{ChangeTracker, CollectionChangeTracker};
pub use light_registry::{LightHandle, LightRegistry, RegistrySyncSummary};
pub use source::{InMemorySceneSource, SceneSource};
