//! Registry: the top-level owner of tags and default providers.
//!
//! The registry maps each target to at most one [`Tag`], remembers which
//! providers attach automatically to which entity categories, and turns
//! host [`Event`]s into tag operations.

mod builder;
mod events;

pub use builder::RegistryBuilder;
pub use events::Event;

use crate::entity::{Categories, Target, TargetId, ViewerId};
use crate::error::TagError;
use crate::provider::{LineProvider, LineRef, ProviderId, Providers};
use crate::render::Renderer;
use crate::tag::{Tag, TagHandle};
use crate::visibility::VisibilityStates;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Owner of every tag in the process.
#[derive(Debug)]
pub struct Registry {
    providers: Providers,
    /// Default providers and the categories they attach to, in registration order.
    defaults: Vec<(ProviderId, Categories)>,
    tags: HashMap<TargetId, Tag>,
    renderer: Renderer,
}

impl Registry {
    /// Start building a registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    pub(crate) fn from_renderer(renderer: Renderer) -> Self {
        Self {
            providers: Providers::new(),
            defaults: Vec::new(),
            tags: HashMap::new(),
            renderer,
        }
    }

    /// Register a provider, returning the handle used everywhere else.
    pub fn register_provider(&mut self, provider: Box<dyn LineProvider>) -> ProviderId {
        self.providers.register(provider)
    }

    /// Look up a registered provider.
    pub fn provider(&self, id: ProviderId) -> Option<&dyn LineProvider> {
        self.providers.get(id)
    }

    /// The renderer, for inspecting spawn state and counters.
    pub const fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// The visibility index.
    pub const fn states(&self) -> &VisibilityStates {
        self.renderer.states()
    }

    // -------------------------------------------------------------------
    // Default providers
    // -------------------------------------------------------------------

    /// Attach `provider` to every tag created from now on whose target
    /// category is in the provider's auto-attach set.
    ///
    /// # Errors
    ///
    /// Returns [`TagError::UnknownProvider`] if the handle was never issued.
    pub fn add_default_provider(&mut self, provider: ProviderId) -> Result<(), TagError> {
        let categories = self
            .providers
            .get(provider)
            .ok_or(TagError::UnknownProvider(provider))?
            .auto_attach();
        if categories.is_empty() {
            tracing::debug!(%provider, "provider auto-attaches to no category");
            return Ok(());
        }

        match self.defaults.iter_mut().find(|(id, _)| *id == provider) {
            Some((_, existing)) => *existing |= categories,
            None => self.defaults.push((provider, categories)),
        }
        Ok(())
    }

    /// Stop attaching `provider` to new tags. Existing tags keep it.
    pub fn remove_default_provider(&mut self, provider: ProviderId) {
        self.defaults.retain(|(id, _)| *id != provider);
    }

    /// Every default provider, in registration order.
    pub fn default_providers(&self) -> Vec<ProviderId> {
        self.defaults.iter().map(|(id, _)| *id).collect()
    }

    /// Default providers attaching to `category`.
    pub fn default_providers_for(&self, category: Categories) -> Vec<ProviderId> {
        self.defaults
            .iter()
            .filter(|(_, categories)| categories.intersects(category))
            .map(|(id, _)| *id)
            .collect()
    }

    /// Whether any default provider attaches to `category`.
    pub fn has_default_providers(&self, category: Categories) -> bool {
        self.defaults
            .iter()
            .any(|(_, categories)| categories.intersects(category))
    }

    // -------------------------------------------------------------------
    // Tags
    // -------------------------------------------------------------------

    /// The tag of `target`, ready for operations.
    pub fn tag(&mut self, target: TargetId) -> Option<TagHandle<'_>> {
        let tag = self.tags.get_mut(&target)?;
        Some(tag.handle(&self.providers, &mut self.renderer))
    }

    /// The tag of `target`, read-only.
    pub fn get_tag(&self, target: TargetId) -> Option<&Tag> {
        self.tags.get(&target)
    }

    /// Whether `target` has a tag.
    pub fn has_tag(&self, target: TargetId) -> bool {
        self.tags.contains_key(&target)
    }

    /// Every tag.
    pub fn tags(&self) -> impl Iterator<Item = &Tag> {
        self.tags.values()
    }

    /// The tag of `target`, creating it if there is none.
    ///
    /// A new tag receives every default provider of the target's category
    /// and is spawned for each viewer in the spawn radius.
    pub fn create_tag_if_missing(&mut self, target: Target) -> TagHandle<'_> {
        let defaults = self.default_providers_for(target.category);
        let tag = match self.tags.entry(target.id) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                tracing::debug!(tag = %target.id, providers = defaults.len(), "creating tag");
                let tag = entry.insert(Tag::new(target, &mut self.renderer));
                let mut handle = tag.handle(&self.providers, &mut self.renderer);
                for provider in defaults {
                    if let Err(err) = handle.add_provider(provider) {
                        tracing::warn!(%err, "skipping default provider");
                    }
                }
                handle.reconcile();
                tag
            }
        };
        tag.handle(&self.providers, &mut self.renderer)
    }

    /// Delete the tag of `target`, tearing it down for every viewer that
    /// has it. Does nothing if there is no tag.
    pub fn delete_tag(&mut self, target: TargetId) {
        let Some(mut tag) = self.tags.remove(&target) else {
            return;
        };
        tracing::debug!(tag = %target, "deleting tag");
        tag.handle(&self.providers, &mut self.renderer).release();
    }

    // -------------------------------------------------------------------
    // Updates
    // -------------------------------------------------------------------

    /// Refresh every line of `target`'s tag for one viewer.
    ///
    /// # Errors
    ///
    /// Returns [`TagError::MissingTag`] if `target` has no tag.
    pub fn update_for(&mut self, target: TargetId, viewer: ViewerId) -> Result<(), TagError> {
        self.tag(target)
            .ok_or(TagError::MissingTag(target))?
            .update_for(viewer);
        Ok(())
    }

    /// Refresh every line of `target`'s tag for every viewer that has it spawned.
    ///
    /// # Errors
    ///
    /// Returns [`TagError::MissingTag`] if `target` has no tag.
    pub fn update(&mut self, target: TargetId) -> Result<(), TagError> {
        self.tag(target).ok_or(TagError::MissingTag(target))?.update();
        Ok(())
    }

    /// Refresh `provider`'s lines on every tag `viewer` has spawned.
    pub fn update_provider_for(&mut self, provider: ProviderId, viewer: ViewerId) {
        for target in self.spawned_for(viewer) {
            if let Some(tag) = self.tags.get_mut(&target) {
                if tag.has_provider(provider) {
                    tag.handle(&self.providers, &mut self.renderer)
                        .update_provider_for(provider, viewer);
                }
            }
        }
    }

    /// Refresh `provider`'s lines for every online viewer.
    pub fn update_provider(&mut self, provider: ProviderId) {
        for viewer in self.renderer.world().online_viewers() {
            self.update_provider_for(provider, viewer);
        }
    }

    /// Refresh one line on every tag `viewer` has spawned.
    pub fn update_line_for(&mut self, line: LineRef, viewer: ViewerId) {
        for target in self.spawned_for(viewer) {
            if let Some(tag) = self.tags.get_mut(&target) {
                tag.handle(&self.providers, &mut self.renderer)
                    .update_line_for(line, viewer);
            }
        }
    }

    /// Refresh one line for every online viewer.
    pub fn update_line(&mut self, line: LineRef) {
        for viewer in self.renderer.world().online_viewers() {
            self.update_line_for(line, viewer);
        }
    }

    /// Recompose display names on every tag `viewer` has spawned.
    pub fn update_names_for(&mut self, viewer: ViewerId) {
        for target in self.spawned_for(viewer) {
            if let Some(tag) = self.tags.get_mut(&target) {
                tag.handle(&self.providers, &mut self.renderer)
                    .update_name_for(viewer);
            }
        }
    }

    /// Recompose display names on every tag.
    pub fn update_names(&mut self) {
        for tag in self.tags.values_mut() {
            tag.handle(&self.providers, &mut self.renderer).update_name();
        }
    }

    // -------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------

    /// React to a host event.
    pub fn handle(&mut self, event: Event) {
        match event {
            Event::TargetCreated(target) => {
                self.create_tag_if_missing(target);
            }
            Event::TargetRemoved(target) => self.delete_tag(target),
            Event::TargetMoved(target) => {
                if let Some(mut tag) = self.tag(target) {
                    tag.reconcile();
                }
            }
            Event::ViewerConnected(viewer) | Event::ViewerMoved(viewer) => {
                for tag in self.tags.values_mut() {
                    tag.handle(&self.providers, &mut self.renderer)
                        .reconcile_viewer(viewer);
                }
            }
            Event::ViewerDisconnected(viewer) => {
                for tag in self.tags.values_mut() {
                    tag.handle(&self.providers, &mut self.renderer)
                        .forget_viewer(viewer);
                }
                self.renderer.states_mut().purge_viewer(viewer);
            }
        }
    }

    /// Targets currently spawned for `viewer`.
    fn spawned_for(&self, viewer: ViewerId) -> Vec<TargetId> {
        self.renderer.states().get_visible(viewer).collect()
    }
}
