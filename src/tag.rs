//! Tag: the per-target aggregate and its orchestration surface.
//!
//! A [`Tag`] owns the target's line stack, its attached providers and the
//! two stack anchors. Operations that reach the host go through a
//! [`TagHandle`], which pairs the tag with the provider arena and the
//! renderer for the duration of one call.

use crate::entity::{Target, TargetId, ViewerId};
use crate::error::TagError;
use crate::provider::{LineRef, ProviderId, Providers};
use crate::render::{Anchors, Band, Renderer};
use crate::structure::{Change, RenderedLine, TagStructure, Transaction};
use crate::visibility::Visibility;
use std::collections::HashMap;
use std::ops::Deref;

/// A provider attached to a tag, ordered for name composition.
#[derive(Clone, Copy, Debug)]
struct Attached {
    id: ProviderId,
    naming_priority: i32,
    seq: u64,
}

impl Attached {
    const fn key(&self) -> (i32, u64) {
        (self.naming_priority, self.seq)
    }
}

/// The tag of one target.
#[derive(Debug)]
pub struct Tag {
    target: Target,
    structure: TagStructure,
    /// Attached providers by (naming priority, attach order).
    providers: Vec<Attached>,
    next_seq: u64,
    anchors: Anchors,
    default_visible: bool,
    /// Display name each spawned viewer currently shows.
    names: HashMap<ViewerId, String>,
}

impl Tag {
    pub(crate) fn new(target: Target, renderer: &mut Renderer) -> Self {
        let anchors = renderer.factory_mut().create_anchors(target.id);
        Self {
            target,
            structure: TagStructure::new(target, renderer.config().max_line_width),
            providers: Vec::new(),
            next_seq: 0,
            anchors,
            default_visible: renderer.config().default_visible,
            names: HashMap::new(),
        }
    }

    /// The entity this tag is attached to.
    pub const fn target(&self) -> &Target {
        &self.target
    }

    /// The stack anchors.
    pub const fn anchors(&self) -> Anchors {
        self.anchors
    }

    /// The realized line stack, topmost first.
    pub fn lines(&self) -> &[RenderedLine] {
        self.structure.lines()
    }

    /// Tag-wide default visibility.
    pub const fn default_visible(&self) -> bool {
        self.default_visible
    }

    /// Whether `provider` is attached.
    pub fn has_provider(&self, provider: ProviderId) -> bool {
        self.providers.iter().any(|a| a.id == provider)
    }

    /// Attached providers.
    ///
    /// With `sort_by_lines`, the distinct owners of the current lines in
    /// stack order (providers contributing no lines are left out).
    /// Otherwise every attached provider in naming order.
    pub fn providers(&self, sort_by_lines: bool) -> Vec<ProviderId> {
        if sort_by_lines {
            let mut owners: Vec<ProviderId> = Vec::new();
            for line in self.structure.lines() {
                if owners.last() != Some(&line.provider()) {
                    owners.push(line.provider());
                }
            }
            owners
        } else {
            self.providers.iter().map(|a| a.id).collect()
        }
    }

    /// Display name last sent to `viewer`, if the tag is spawned for it.
    pub fn name_for(&self, viewer: ViewerId) -> Option<&str> {
        self.names.get(&viewer).map(String::as_str)
    }

    pub(crate) fn handle<'a>(&'a mut self, providers: &'a Providers, renderer: &'a mut Renderer) -> TagHandle<'a> {
        TagHandle {
            tag: self,
            providers,
            renderer,
        }
    }
}

/// A tag borrowed together with what its operations need.
///
/// Obtained from [`Registry::tag`](crate::Registry::tag). Dereferences to
/// the underlying [`Tag`] for read access.
pub struct TagHandle<'a> {
    tag: &'a mut Tag,
    providers: &'a Providers,
    renderer: &'a mut Renderer,
}

impl Deref for TagHandle<'_> {
    type Target = Tag;

    fn deref(&self) -> &Tag {
        &*self.tag
    }
}

impl TagHandle<'_> {
    fn id(&self) -> TargetId {
        self.tag.target.id
    }

    /// Attach a provider and send its lines to every viewer that has the
    /// tag spawned within the spawn radius.
    ///
    /// Attaching an already attached provider does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`TagError::UnknownProvider`] if the handle was never issued.
    pub fn add_provider(&mut self, id: ProviderId) -> Result<(), TagError> {
        let providers = self.providers;
        let provider = providers.get(id).ok_or(TagError::UnknownProvider(id))?;
        if self.tag.has_provider(id) {
            return Ok(());
        }

        let attached = Attached {
            id,
            naming_priority: provider.naming_priority(),
            seq: self.tag.next_seq,
        };
        self.tag.next_seq += 1;
        let index = self
            .tag
            .providers
            .partition_point(|a| a.key() <= attached.key());
        self.tag.providers.insert(index, attached);

        let candidates = self.spawned_within(Band::Spawn);
        let transactions =
            self.tag
                .structure
                .add_provider(id, provider, &candidates, self.renderer.factory_mut());
        self.renderer.process_all(transactions);
        Ok(())
    }

    /// Detach a provider, removing its lines from every viewer's copy.
    ///
    /// Detaching a provider that is not attached does nothing.
    pub fn remove_provider(&mut self, id: ProviderId) {
        let Some(index) = self.tag.providers.iter().position(|a| a.id == id) else {
            return;
        };
        self.tag.providers.remove(index);

        let candidates = self.spawned_within(Band::Keep);
        let transactions = self
            .tag
            .structure
            .remove_provider(id, &candidates, self.renderer.factory_mut());
        self.renderer.process_all(transactions);
    }

    /// Force the tag visible or hidden for one viewer.
    ///
    /// The viewer's copy is rebuilt rather than patched: a spawned copy is
    /// destroyed, and respawned if the tag is now visible and in range.
    pub fn set_visible(&mut self, viewer: ViewerId, visible: bool) {
        let id = self.id();
        self.renderer.set_visible(id, viewer, Visibility::forced(visible));
        if self.renderer.is_spawned(id, viewer) {
            self.destroy_for(viewer);
        }
        if visible && self.renderer.is_within(&self.tag.target, viewer, Band::Spawn) {
            self.spawn_for(viewer);
        }
    }

    /// Remove the viewer's override, reverting to the tag default.
    ///
    /// If that changes what the viewer should see, the copy is spawned or
    /// destroyed right away.
    pub fn clear_visible(&mut self, viewer: ViewerId) {
        let id = self.id();
        let previous = self.renderer.is_visible(id, viewer);
        if previous == Visibility::Inherit {
            return;
        }

        let was_visible = previous.resolve(self.tag.default_visible);
        let now_visible = self.tag.default_visible;
        let spawned = self.renderer.is_spawned(id, viewer);

        if was_visible && !now_visible && spawned {
            self.destroy_for(viewer);
        } else if !was_visible
            && now_visible
            && !spawned
            && self.renderer.is_within(&self.tag.target, viewer, Band::Spawn)
        {
            self.spawn_for(viewer);
        }
        self.renderer.set_visible(id, viewer, Visibility::Inherit);
    }

    /// Raw override for one viewer.
    pub fn is_visible(&self, viewer: ViewerId) -> Visibility {
        self.renderer.is_visible(self.tag.target.id, viewer)
    }

    /// Change the tag-wide default.
    ///
    /// Only viewers without an override are affected: newly visible ones
    /// in the spawn radius are spawned, newly hidden ones in the keep
    /// radius are destroyed.
    pub fn set_default_visible(&mut self, visible: bool) {
        if visible == self.tag.default_visible {
            return;
        }
        let id = self.id();

        if visible {
            let viewers: Vec<ViewerId> = self
                .renderer
                .nearby(&self.tag.target, Band::Spawn)
                .into_iter()
                .filter(|&v| {
                    self.renderer.is_visible(id, v) == Visibility::Inherit
                        && !self.renderer.is_spawned(id, v)
                })
                .collect();
            for viewer in viewers {
                self.spawn_for(viewer);
            }
        } else {
            let viewers: Vec<ViewerId> = self
                .renderer
                .nearby(&self.tag.target, Band::Keep)
                .into_iter()
                .filter(|&v| {
                    self.renderer.is_visible(id, v) == Visibility::Inherit
                        && self.renderer.is_spawned(id, v)
                })
                .collect();
            for viewer in viewers {
                self.destroy_for(viewer);
            }
        }

        self.tag.default_visible = visible;
    }

    /// Refresh every line for one viewer.
    ///
    /// Skipped while the target carries a passenger, or when the tag is
    /// hidden from or not spawned for the viewer.
    pub fn update_for(&mut self, viewer: ViewerId) {
        if self.is_mounted() || !self.is_rendered_for(viewer) {
            return;
        }
        self.apply_update(viewer, |_| true);
    }

    /// Refresh every line for every viewer that has the tag spawned.
    ///
    /// That includes viewers resting between the spawn and keep radius,
    /// matching the registry-wide updates driven by the spawned index.
    pub fn update(&mut self) {
        for viewer in self.spawned_within(Band::Keep) {
            self.update_for(viewer);
        }
    }

    /// Refresh one provider's lines for one viewer.
    ///
    /// Besides the guards of [`update_for`](Self::update_for), skipped when
    /// the provider is not attached or the viewer is spectating.
    pub fn update_provider_for(&mut self, provider: ProviderId, viewer: ViewerId) {
        if !self.tag.has_provider(provider) || self.is_guarded(viewer) {
            return;
        }
        self.apply_update(viewer, |l| l.provider() == provider);
    }

    /// Refresh one provider's lines for every viewer that has the tag spawned.
    pub fn update_provider(&mut self, provider: ProviderId) {
        if !self.tag.has_provider(provider) {
            return;
        }
        for viewer in self.spawned_within(Band::Keep) {
            self.update_provider_for(provider, viewer);
        }
    }

    /// Refresh a single line for one viewer.
    pub fn update_line_for(&mut self, line: LineRef, viewer: ViewerId) {
        if self.is_guarded(viewer) {
            return;
        }
        self.apply_update(viewer, |l| l.is_rendered_by(line));
    }

    /// Refresh a single line for every viewer that has the tag spawned.
    pub fn update_line(&mut self, line: LineRef) {
        for viewer in self.spawned_within(Band::Keep) {
            self.update_line_for(line, viewer);
        }
    }

    /// Recompose the display name for one viewer, sending it if it changed.
    pub fn update_name_for(&mut self, viewer: ViewerId) {
        if !self.is_rendered_for(viewer) {
            return;
        }
        let name = self.compose_name(viewer);
        if self.tag.names.get(&viewer) == Some(&name) {
            return;
        }
        self.tag.names.insert(viewer, name.clone());
        let transaction = Transaction::new(self.id(), viewer, Change::Name { text: name });
        self.renderer.process(transaction);
    }

    /// Recompose the display name for every viewer that has the tag spawned.
    pub fn update_name(&mut self) {
        for viewer in self.spawned_within(Band::Keep) {
            self.update_name_for(viewer);
        }
    }

    /// Bring one viewer's copy in line with proximity and visibility.
    ///
    /// Spawns only inside the spawn radius and destroys only outside the
    /// keep radius, so a viewer resting between the two never flips.
    pub fn reconcile_viewer(&mut self, viewer: ViewerId) {
        if self.tag.target.is_viewer(viewer) {
            return;
        }
        let id = self.id();
        let visible = self
            .renderer
            .is_effectively_visible(id, viewer, self.tag.default_visible);

        if self.renderer.is_spawned(id, viewer) {
            if !visible || !self.renderer.is_within(&self.tag.target, viewer, Band::Keep) {
                self.destroy_for(viewer);
            }
        } else if visible && self.renderer.is_within(&self.tag.target, viewer, Band::Spawn) {
            self.spawn_for(viewer);
        }
    }

    /// Reconcile every viewer that has the tag or could gain it.
    pub fn reconcile(&mut self) {
        let id = self.id();
        let default_visible = self.tag.default_visible;

        let keep = self.renderer.nearby(&self.tag.target, Band::Keep);
        let stale: Vec<ViewerId> = self
            .renderer
            .states()
            .spawned_viewers(id)
            .filter(|v| {
                !keep.contains(v) || !self.renderer.is_effectively_visible(id, *v, default_visible)
            })
            .collect();
        for viewer in stale {
            self.destroy_for(viewer);
        }

        let fresh: Vec<ViewerId> = self
            .renderer
            .nearby(&self.tag.target, Band::Spawn)
            .into_iter()
            .filter(|&v| {
                !self.renderer.is_spawned(id, v)
                    && self.renderer.is_effectively_visible(id, v, default_visible)
            })
            .collect();
        for viewer in fresh {
            self.spawn_for(viewer);
        }
    }

    /// Tear the tag down for every viewer and release all proxy entities.
    pub(crate) fn release(&mut self) {
        let id = self.id();
        let viewers: Vec<ViewerId> = self.renderer.states().spawned_viewers(id).collect();
        for viewer in viewers {
            self.destroy_for(viewer);
        }

        let mut entities = self.tag.structure.entities();
        entities.extend(self.tag.anchors.entities());
        self.renderer.factory_mut().destroy(&entities);
        self.renderer.states_mut().purge_target(id);
    }

    /// Drop a departed viewer's copy without sending anything.
    pub(crate) fn forget_viewer(&mut self, viewer: ViewerId) {
        self.tag.structure.forget_viewer(viewer);
        self.tag.names.remove(&viewer);
    }

    fn spawn_for(&mut self, viewer: ViewerId) {
        let lines = self.tag.structure.spawn_snapshot(viewer, self.providers);
        let name = self.compose_name(viewer);
        self.tag.names.insert(viewer, name.clone());
        self.renderer
            .spawn(self.tag.target.id, viewer, self.tag.anchors, lines, name);
    }

    fn destroy_for(&mut self, viewer: ViewerId) {
        let entities = self.tag.structure.forget_viewer(viewer);
        self.tag.names.remove(&viewer);
        self.renderer
            .destroy(self.tag.target.id, viewer, self.tag.anchors, entities);
    }

    /// Viewers within `band` that currently have the tag spawned.
    fn spawned_within(&self, band: Band) -> Vec<ViewerId> {
        let id = self.id();
        self.renderer
            .nearby(&self.tag.target, band)
            .into_iter()
            .filter(|&v| self.renderer.is_spawned(id, v))
            .collect()
    }

    fn apply_update<P>(&mut self, viewer: ViewerId, predicate: P)
    where
        P: Fn(&RenderedLine) -> bool,
    {
        let transactions = self
            .tag
            .structure
            .create_update_transactions(predicate, viewer, self.providers);
        self.renderer.process_all(transactions);
    }

    /// Fold every attached provider's name transform over the base name.
    fn compose_name(&self, viewer: ViewerId) -> String {
        let target = &self.tag.target;
        let base = self.renderer.world().base_name(target.id);
        self.tag
            .providers
            .iter()
            .filter_map(|a| self.providers.get(a.id))
            .fold(base, |name, provider| provider.display_name(target, viewer, &name))
    }

    /// A foreign passenger owns the mount slot; updates must not fight it.
    fn is_mounted(&self) -> bool {
        let mounted = self.renderer.world().passenger_count(self.tag.target.id) > 0;
        if mounted {
            tracing::debug!(tag = %self.tag.target.id, "target carries a passenger, skipping update");
        }
        mounted
    }

    /// Effective visibility plus spawn state.
    fn is_rendered_for(&self, viewer: ViewerId) -> bool {
        let id = self.tag.target.id;
        self.renderer
            .is_effectively_visible(id, viewer, self.tag.default_visible)
            && self.renderer.is_spawned(id, viewer)
    }

    /// Guards of provider- and line-scoped updates.
    fn is_guarded(&self, viewer: ViewerId) -> bool {
        self.is_mounted()
            || self.renderer.world().is_spectating(viewer)
            || !self.is_rendered_for(viewer)
    }
}

#[cfg(test)]
mod tests {
    use crate::entity::{Categories, Target, TargetId, ViewerId};
    use crate::error::TagError;
    use crate::provider::{LineId, LineRef, ProviderId};
    use crate::render::RenderCommand;
    use crate::structure::Change;
    use crate::testing::{Harness, Script, ScriptedProvider};
    use crate::visibility::Visibility;
    use std::cell::RefCell;
    use std::rc::Rc;

    const T: TargetId = TargetId(1);
    const V: ViewerId = ViewerId(100);
    const W: ViewerId = ViewerId(101);

    /// A harness with one tag carrying one "Alpha" line, spawned for `V`.
    fn spawned() -> (Harness, ProviderId, Rc<RefCell<Script>>) {
        let mut h = Harness::new();
        let (a, script) = ScriptedProvider::new(0, 0, &[Some("Alpha")]);
        let a = h.registry.register_provider(Box::new(a));
        h.registry.add_default_provider(a).unwrap();
        h.world.place(V, 10.0);
        h.registry
            .create_tag_if_missing(Target::new(T, Categories::PASSIVE));
        h.drain();
        (h, a, script)
    }

    #[test]
    fn test_update_sends_only_changes() {
        let (mut h, _, script) = spawned();
        h.registry.tag(T).unwrap().update();
        assert!(h.drain().is_empty());

        script.borrow_mut().set_text(0, Some("Beta"));
        h.registry.tag(T).unwrap().update();
        let commands = h.drain_for(V);
        assert!(matches!(
            &commands[..],
            [RenderCommand::Apply(tx)] if matches!(&tx.change, Change::Update { position: 0, text, .. } if text == "Beta")
        ));
    }

    #[test]
    fn test_passenger_blocks_updates() {
        let (mut h, a, script) = spawned();
        h.world.set_passengers(T, 1);
        script.borrow_mut().set_text(0, Some("Beta"));
        {
            let mut tag = h.registry.tag(T).unwrap();
            tag.update_for(V);
            tag.update_provider_for(a, V);
            tag.update_line_for(LineRef::new(a, LineId(0)), V);
        }
        assert!(h.drain().is_empty());

        h.world.set_passengers(T, 0);
        h.registry.tag(T).unwrap().update_for(V);
        assert_eq!(h.drain_for(V).len(), 1);
    }

    #[test]
    fn test_spectator_skips_scoped_updates_only() {
        let (mut h, a, script) = spawned();
        h.world.set_spectating(V, true);
        script.borrow_mut().set_text(0, Some("Beta"));

        h.registry.tag(T).unwrap().update_provider_for(a, V);
        h.registry
            .tag(T)
            .unwrap()
            .update_line_for(LineRef::new(a, LineId(0)), V);
        assert!(h.drain().is_empty());

        // Full updates do not check spectators
        h.registry.tag(T).unwrap().update_for(V);
        assert_eq!(h.drain_for(V).len(), 1);
    }

    #[test]
    fn test_updates_reach_viewers_in_keep_band() {
        let (mut h, a, script) = spawned();
        h.world.place(W, 20.0);
        h.registry.tag(T).unwrap().reconcile();
        h.world.place(W, 50.0);
        h.drain();

        script.borrow_mut().set_text(0, Some("Beta"));
        h.registry.tag(T).unwrap().update_provider(a);
        let mut tag_level: Vec<_> = h.drain().into_iter().map(|e| e.viewer).collect();
        tag_level.sort_unstable();
        assert_eq!(tag_level, vec![V, W]);

        // The registry path walks the spawned index and agrees
        script.borrow_mut().set_text(0, Some("Gamma"));
        h.registry.update_provider(a);
        let mut registry_level: Vec<_> = h.drain().into_iter().map(|e| e.viewer).collect();
        registry_level.sort_unstable();
        assert_eq!(registry_level, tag_level);
    }

    #[test]
    fn test_update_provider_ignores_detached() {
        let (mut h, _, _) = spawned();
        let (b, script) = ScriptedProvider::new(0, 0, &[Some("Beta")]);
        let b = h.registry.register_provider(Box::new(b));
        script.borrow_mut().set_text(0, Some("Gamma"));
        h.registry.tag(T).unwrap().update_provider(b);
        assert!(h.drain().is_empty());
    }

    #[test]
    fn test_set_visible_rebuilds_copy() {
        let (mut h, _, _) = spawned();
        h.registry.tag(T).unwrap().set_visible(V, true);
        let commands = h.drain_for(V);
        assert!(matches!(
            &commands[..],
            [RenderCommand::Destroy { .. }, RenderCommand::Spawn { .. }]
        ));
        assert_eq!(h.registry.tag(T).unwrap().is_visible(V), Visibility::ForceVisible);
    }

    #[test]
    fn test_set_visible_outside_spawn_radius_does_not_spawn() {
        let (mut h, _, _) = spawned();
        h.world.place(W, 50.0);
        h.registry.tag(T).unwrap().set_visible(W, true);
        assert!(h.drain_for(W).is_empty());
        assert!(!h.registry.states().is_spawned(T, W));
    }

    #[test]
    fn test_clear_visible_single_transition() {
        let (mut h, _, _) = spawned();
        h.registry.tag(T).unwrap().set_visible(V, false);
        h.drain();

        h.registry.tag(T).unwrap().clear_visible(V);
        assert!(matches!(&h.drain_for(V)[..], [RenderCommand::Spawn { .. }]));

        // Clearing an absent override does nothing
        h.registry.tag(T).unwrap().clear_visible(V);
        assert!(h.drain().is_empty());

        // Clearing a redundant override does nothing either
        h.registry.tag(T).unwrap().set_visible(V, true);
        h.drain();
        h.registry.tag(T).unwrap().clear_visible(V);
        assert!(h.drain().is_empty());
        assert!(h.registry.states().is_spawned(T, V));
    }

    #[test]
    fn test_set_default_visible_respects_overrides() {
        let (mut h, _, _) = spawned();
        h.world.place(W, 20.0);
        h.registry.tag(T).unwrap().reconcile();
        h.registry.tag(T).unwrap().set_visible(W, true);
        h.drain();

        h.registry.tag(T).unwrap().set_default_visible(false);
        let destroyed: Vec<_> = h.drain().into_iter().map(|e| e.viewer).collect();
        assert_eq!(destroyed, vec![V]);
        assert!(!h.registry.get_tag(T).unwrap().default_visible());

        // Hidden by default: reconciling does not bring it back
        h.registry.tag(T).unwrap().reconcile_viewer(V);
        assert!(h.drain().is_empty());

        h.registry.tag(T).unwrap().set_default_visible(true);
        let spawned: Vec<_> = h.drain().into_iter().map(|e| e.viewer).collect();
        assert_eq!(spawned, vec![V]);
    }

    #[test]
    fn test_add_provider_reaches_only_spawn_band() {
        let (mut h, _, _) = spawned();
        h.world.place(W, 20.0);
        h.registry.tag(T).unwrap().reconcile();
        h.drain();
        h.world.place(W, 50.0);

        let (b, _) = ScriptedProvider::new(10, 0, &[Some("Beta")]);
        let b = h.registry.register_provider(Box::new(b));
        h.registry.tag(T).unwrap().add_provider(b).unwrap();
        let viewers: Vec<_> = h.drain().into_iter().map(|e| e.viewer).collect();
        assert_eq!(viewers, vec![V]);

        // W never got the line, so only V sees it go
        h.registry.tag(T).unwrap().remove_provider(b);
        let commands: Vec<_> = h.drain().into_iter().map(|e| (e.viewer, e.command)).collect();
        assert!(matches!(
            &commands[..],
            [(viewer, RenderCommand::Apply(tx))] if *viewer == V && matches!(tx.change, Change::Remove { position: 1, .. })
        ));
        assert!(!h.registry.get_tag(T).unwrap().has_provider(b));
    }

    #[test]
    fn test_remove_provider_reaches_keep_band() {
        let (mut h, _, _) = spawned();
        h.world.place(W, 20.0);
        h.registry.tag(T).unwrap().reconcile();
        let (b, _) = ScriptedProvider::new(10, 0, &[Some("Beta")]);
        let b = h.registry.register_provider(Box::new(b));
        h.registry.tag(T).unwrap().add_provider(b).unwrap();
        h.drain();

        // W drifts into the band and keeps its copy
        h.world.place(W, 50.0);
        h.registry.handle(crate::Event::ViewerMoved(W));
        assert!(h.drain().is_empty());
        assert_eq!(h.registry.get_tag(T).unwrap().lines()[1].text_for(W), Some("Beta"));

        h.registry.tag(T).unwrap().remove_provider(b);
        let commands = h.drain_for(W);
        assert!(matches!(
            &commands[..],
            [RenderCommand::Apply(tx)] if matches!(tx.change, Change::Remove { position: 1, .. })
        ));
    }

    #[test]
    fn test_add_unknown_provider_fails() {
        let (mut h, _, _) = spawned();
        let missing = ProviderId(42);
        let err = h.registry.tag(T).unwrap().add_provider(missing).unwrap_err();
        assert!(matches!(err, TagError::UnknownProvider(p) if p == missing));
    }

    #[test]
    fn test_keep_space_line_stays_blank() {
        let (mut h, a, script) = spawned();
        script.borrow_mut().set_keep_space(0, true);
        script.borrow_mut().set_text(0, None);
        h.registry.tag(T).unwrap().update_provider(a);
        let commands = h.drain_for(V);
        assert!(matches!(
            &commands[..],
            [RenderCommand::Apply(tx)] if matches!(&tx.change, Change::Update { text, .. } if text.is_empty())
        ));
    }
}
