//! RegistryBuilder: wiring the host collaborators at startup.

use super::Registry;
use crate::config::TagConfig;
use crate::error::TagError;
use crate::render::{EntityFactory, Renderer, TransactionSink, World};

/// Builder for a [`Registry`].
///
/// The world, entity factory and sink are all required; a registry cannot
/// run without any of them.
#[derive(Default)]
pub struct RegistryBuilder {
    config: TagConfig,
    world: Option<Box<dyn World>>,
    factory: Option<Box<dyn EntityFactory>>,
    sink: Option<Box<dyn TransactionSink>>,
}

impl RegistryBuilder {
    /// Create a builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom configuration.
    #[must_use]
    pub fn config(mut self, config: TagConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the host world.
    #[must_use]
    pub fn world(mut self, world: impl World + 'static) -> Self {
        self.world = Some(Box::new(world));
        self
    }

    /// Set the proxy entity factory.
    #[must_use]
    pub fn factory(mut self, factory: impl EntityFactory + 'static) -> Self {
        self.factory = Some(Box::new(factory));
        self
    }

    /// Set the transaction sink.
    #[must_use]
    pub fn sink(mut self, sink: impl TransactionSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Build the registry.
    ///
    /// # Errors
    ///
    /// Returns [`TagError::MissingCollaborator`] if a collaborator was not
    /// supplied, or [`TagError::Config`] if the configuration is invalid.
    pub fn build(self) -> Result<Registry, TagError> {
        self.config.validate()?;
        let world = self.world.ok_or(TagError::MissingCollaborator("world"))?;
        let factory = self
            .factory
            .ok_or(TagError::MissingCollaborator("entity factory"))?;
        let sink = self
            .sink
            .ok_or(TagError::MissingCollaborator("transaction sink"))?;

        tracing::debug!(config = ?self.config, "tag registry started");
        Ok(Registry::from_renderer(Renderer::new(
            self.config,
            world,
            factory,
            sink,
        )))
    }
}
