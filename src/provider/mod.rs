//! Provider module: pluggable contributors of tag lines.
//!
//! This module contains:
//! - [`LineProvider`]: The capability set a content module implements
//! - [`LineId`] / [`LineRef`]: Identities of individual lines
//! - [`Providers`]: Arena issuing stable [`ProviderId`] handles

mod arena;
mod traits;

pub use arena::{ProviderId, Providers};
pub use traits::{LineId, LineProvider, LineRef};
