//! Providers: append-only arena of registered line providers.

use super::LineProvider;
use std::fmt;

/// Stable handle of a registered provider.
///
/// Handles are compared by identity: two providers with identical content
/// registered twice get two distinct handles. The value is the arena
/// index, so it cannot run out before the arena does.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct ProviderId(pub usize);

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "provider#{}", self.0)
    }
}

/// Arena owning every registered provider.
#[derive(Default)]
pub struct Providers {
    entries: Vec<Box<dyn LineProvider>>,
}

impl Providers {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider and return its handle.
    pub fn register(&mut self, provider: Box<dyn LineProvider>) -> ProviderId {
        let id = ProviderId(self.entries.len());
        self.entries.push(provider);
        id
    }

    /// Look up a provider by handle.
    pub fn get(&self, id: ProviderId) -> Option<&dyn LineProvider> {
        self.entries.get(id.0).map(|p| &**p)
    }

    /// Whether the handle was issued by this arena.
    pub fn contains(&self, id: ProviderId) -> bool {
        id.0 < self.entries.len()
    }

    /// Number of registered providers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no provider has been registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all handles in registration order.
    pub fn ids(&self) -> impl Iterator<Item = ProviderId> + '_ {
        (0..self.entries.len()).map(ProviderId)
    }
}

impl fmt::Debug for Providers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Providers").field("len", &self.entries.len()).finish()
    }
}
