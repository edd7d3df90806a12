//! # Tagstack
//!
//! Per-viewer, multi-line name tags for game-server entities.
//!
//! A tag is a vertical stack of text lines rendered above an entity, built
//! from client-side proxy entities that ride the target. Independent
//! content providers contribute lines; the engine merges them by priority,
//! decides per viewer whether the tag is shown, and emits minimal ordered
//! transactions whenever a provider's text changes.
//!
//! ## Core Concepts
//!
//! - **Providers**: pluggable [`LineProvider`]s, registered once and
//!   attached to tags by handle
//! - **Structure**: the priority-ordered line stack and its diff engine
//! - **Per-viewer state**: every line tracks what each viewer is shown, so
//!   updates only touch what actually changed for that viewer
//! - **Hysteresis**: tags spawn inside the spawn radius and are destroyed
//!   only outside the slightly larger keep radius
//!
//! ## Example
//!
//! ```rust,ignore
//! use tagstack::{ChannelSink, Event, Registry, SequentialFactory};
//!
//! let (sink, commands) = ChannelSink::unbounded();
//! let mut registry = Registry::builder()
//!     .world(my_world)
//!     .factory(SequentialFactory::default())
//!     .sink(sink)
//!     .build()?;
//!
//! let health = registry.register_provider(Box::new(HealthProvider));
//! registry.add_default_provider(health)?;
//! registry.handle(Event::TargetCreated(target));
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod config;
pub mod entity;
pub mod error;
pub mod provider;
pub mod registry;
pub mod render;
pub mod structure;
pub mod tag;
pub mod visibility;

#[cfg(test)]
mod testing;

// Re-exports for convenience
pub use config::TagConfig;
pub use entity::{Categories, ProxyId, Target, TargetId, ViewerId};
pub use error::{ConfigError, TagError};
pub use provider::{LineId, LineProvider, LineRef, ProviderId};
pub use registry::{Event, Registry, RegistryBuilder};
pub use render::{
    Anchors, ChannelSink, EntityFactory, Envelope, RenderCommand, SequentialFactory,
    TransactionSink, World,
};
pub use structure::{Change, LineSnapshot, Transaction};
pub use tag::{Tag, TagHandle};
pub use visibility::Visibility;
