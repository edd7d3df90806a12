//! TagStructure: priority-ordered merge of provider lines and the diff engine.
//!
//! The stack is shared by every viewer, but what each viewer sees of it is
//! not: a line whose text is null (and that does not keep its space) is
//! absent from that viewer's stack. Every diff is therefore computed
//! against the viewer's own copy, recorded in each [`RenderedLine`].

use super::text;
use super::{Change, LineSnapshot, RenderedLine, Transaction};
use crate::entity::{ProxyId, Target, ViewerId};
use crate::provider::{LineProvider, ProviderId, Providers};
use crate::render::EntityFactory;

/// The realized line stack of one tag.
#[derive(Debug, Clone)]
pub struct TagStructure {
    /// Target the stack belongs to.
    target: Target,
    /// Lines, topmost first, sorted by their order key.
    lines: Vec<RenderedLine>,
    /// Attach sequence for tie-breaking equal priorities.
    next_seq: u64,
    /// Optional display-width limit for line text.
    max_width: Option<usize>,
}

impl TagStructure {
    /// Create an empty stack for `target`.
    pub const fn new(target: Target, max_width: Option<usize>) -> Self {
        Self {
            target,
            lines: Vec::new(),
            next_seq: 0,
            max_width,
        }
    }

    /// The lines of the stack, topmost first.
    pub fn lines(&self) -> &[RenderedLine] {
        &self.lines
    }

    /// Whether any line of the stack is owned by `provider`.
    pub fn contains_provider(&self, provider: ProviderId) -> bool {
        self.lines.iter().any(|l| l.provider() == provider)
    }

    /// Proxy entities of every line in the stack.
    pub fn entities(&self) -> Vec<ProxyId> {
        self.lines.iter().map(RenderedLine::entity).collect()
    }

    /// Merge a provider's lines into the stack.
    ///
    /// The lines go below every line whose provider has a lower or equal
    /// priority (equal priorities keep attach order). Each viewer in
    /// `viewers` receives one insert per new line it can see, positioned
    /// within its own copy. A provider without lines, or one already in the
    /// stack, leaves the stack untouched and yields no transactions.
    pub fn add_provider(
        &mut self,
        id: ProviderId,
        provider: &dyn LineProvider,
        viewers: &[ViewerId],
        factory: &mut dyn EntityFactory,
    ) -> Vec<Transaction> {
        if self.contains_provider(id) {
            return Vec::new();
        }
        let keys = provider.lines_for(&self.target);
        if keys.is_empty() {
            return Vec::new();
        }

        let order = (provider.priority(), self.next_seq);
        self.next_seq += 1;

        let start = self.lines.partition_point(|l| l.order <= order);
        let created: Vec<RenderedLine> = keys
            .iter()
            .map(|&key| {
                RenderedLine::new(
                    id,
                    key,
                    factory.create_line(self.target.id),
                    order,
                )
            })
            .collect();
        let count = created.len();
        self.lines.splice(start..start, created);

        let mut transactions = Vec::new();
        for &viewer in viewers {
            for index in start..start + count {
                let Some(text) = self.resolve(provider, index, viewer) else {
                    continue;
                };
                let position = self.position_for(index, viewer);
                let line = &mut self.lines[index];
                line.show(viewer, text.clone());
                transactions.push(Transaction::new(
                    self.target.id,
                    viewer,
                    Change::Insert {
                        position,
                        entity: line.entity(),
                        text,
                    },
                ));
            }
        }
        transactions
    }

    /// Remove every line owned by `provider`.
    ///
    /// Each viewer holding any of those slots receives removes in descending
    /// position order, so every position is still valid when applied.
    /// Viewers in `viewers` come first; any other viewer still holding a
    /// slot follows, so no copy keeps a slot whose entity is released. The
    /// removed lines' proxy entities are destroyed through `factory`.
    pub fn remove_provider(
        &mut self,
        provider: ProviderId,
        viewers: &[ViewerId],
        factory: &mut dyn EntityFactory,
    ) -> Vec<Transaction> {
        if !self.contains_provider(provider) {
            return Vec::new();
        }

        let mut audience: Vec<ViewerId> = viewers.to_vec();
        let mut holders: Vec<ViewerId> = self
            .lines
            .iter()
            .filter(|l| l.provider() == provider)
            .flat_map(RenderedLine::viewers)
            .filter(|v| !viewers.contains(v))
            .collect();
        holders.sort_unstable();
        holders.dedup();
        audience.extend(holders);

        let mut transactions = Vec::new();
        for viewer in audience {
            let mut removals: Vec<(usize, ProxyId)> = self
                .lines
                .iter()
                .enumerate()
                .filter(|(_, l)| l.provider() == provider && l.is_shown_to(viewer))
                .map(|(index, l)| (self.position_for(index, viewer), l.entity()))
                .collect();
            removals.sort_unstable_by(|a, b| b.0.cmp(&a.0));

            transactions.extend(removals.into_iter().map(|(position, entity)| {
                Transaction::new(self.target.id, viewer, Change::Remove { position, entity })
            }));
        }

        let released: Vec<ProxyId> = self
            .lines
            .iter()
            .filter(|l| l.provider() == provider)
            .map(RenderedLine::entity)
            .collect();
        self.lines.retain(|l| l.provider() != provider);
        factory.destroy(&released);

        transactions
    }

    /// Recompute text of every line matching `predicate` for one viewer.
    ///
    /// Emits an update when shown text changed, an insert when an absent
    /// slot gained text, and a remove when a shown slot's text became null
    /// and the line does not keep its space. Unchanged lines emit nothing.
    pub fn create_update_transactions<P>(
        &mut self,
        predicate: P,
        viewer: ViewerId,
        providers: &Providers,
    ) -> Vec<Transaction>
    where
        P: Fn(&RenderedLine) -> bool,
    {
        let mut transactions = Vec::new();

        for index in 0..self.lines.len() {
            if !predicate(&self.lines[index]) {
                continue;
            }
            let Some(provider) = providers.get(self.lines[index].provider()) else {
                continue;
            };

            let next = self.resolve(provider, index, viewer);
            let position = self.position_for(index, viewer);
            let line = &mut self.lines[index];
            let entity = line.entity();

            let change = match next {
                Some(text) => match line.text_for(viewer).map(|current| current == text) {
                    Some(true) => None,
                    Some(false) => {
                        line.show(viewer, text.clone());
                        Some(Change::Update { position, entity, text })
                    }
                    None => {
                        line.show(viewer, text.clone());
                        Some(Change::Insert { position, entity, text })
                    }
                },
                None => line.hide(viewer).then_some(Change::Remove { position, entity }),
            };

            if let Some(change) = change {
                transactions.push(Transaction::new(self.target.id, viewer, change));
            }
        }

        transactions
    }

    /// Compute the full stack as `viewer` should first see it.
    ///
    /// Records the viewer's copy in every visible line; used when the whole
    /// tag is spawned for a viewer rather than diffed.
    pub fn spawn_snapshot(&mut self, viewer: ViewerId, providers: &Providers) -> Vec<LineSnapshot> {
        let mut snapshot = Vec::new();
        for index in 0..self.lines.len() {
            let Some(provider) = providers.get(self.lines[index].provider()) else {
                continue;
            };
            let line_text = self.resolve(provider, index, viewer);
            let line = &mut self.lines[index];
            match line_text {
                Some(text) => {
                    line.show(viewer, text.clone());
                    snapshot.push(LineSnapshot {
                        entity: line.entity(),
                        text,
                    });
                }
                None => {
                    line.hide(viewer);
                }
            }
        }
        snapshot
    }

    /// Drop `viewer`'s copy, returning the entities it was showing.
    pub fn forget_viewer(&mut self, viewer: ViewerId) -> Vec<ProxyId> {
        self.lines
            .iter_mut()
            .filter_map(|l| l.hide(viewer).then(|| l.entity()))
            .collect()
    }

    /// Position of line `index` within `viewer`'s copy.
    fn position_for(&self, index: usize, viewer: ViewerId) -> usize {
        self.lines[..index]
            .iter()
            .filter(|l| l.is_shown_to(viewer))
            .count()
    }

    /// Text line `index` should show to `viewer`; `None` if the slot is absent.
    fn resolve(&self, provider: &dyn LineProvider, index: usize, viewer: ViewerId) -> Option<String> {
        let line = self.lines[index].line();
        match provider.text(line, &self.target, viewer) {
            Some(text) => Some(text::normalize(text, self.max_width)),
            None if provider.keep_space_when_null(line, &self.target) => Some(String::new()),
            None => None,
        }
    }
}
