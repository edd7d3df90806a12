//! Error types.

use crate::entity::TargetId;
use crate::provider::ProviderId;
use thiserror::Error;

/// Errors surfaced by tag and registry operations.
///
/// Speculative calls that have nothing to do (removing a provider that was
/// never attached, updating a hidden tag) are not errors; they succeed
/// without emitting anything.
#[derive(Debug, Error)]
pub enum TagError {
    /// The operation requires a tag on this entity, and there is none.
    #[error("entity {0} does not have a tag associated with it")]
    MissingTag(TargetId),

    /// The provider handle was not issued by this registry.
    #[error("{0} is not registered")]
    UnknownProvider(ProviderId),

    /// A collaborator required at startup was not supplied.
    #[error("cannot start tag registry: no {0} was supplied")]
    MissingCollaborator(&'static str),

    /// The supplied configuration was rejected.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML document could not be parsed.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range.
    #[error("invalid value for '{field}': {reason}")]
    Invalid {
        /// Offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },
}
