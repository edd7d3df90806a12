//! Scripted collaborators for unit tests.

use crate::entity::{Categories, Target, TargetId, ViewerId};
use crate::provider::{LineId, LineProvider};
use crate::registry::Registry;
use crate::render::{ChannelSink, Envelope, RenderCommand, SequentialFactory, World};
use crossbeam_channel::Receiver;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::rc::Rc;

#[derive(Debug, Default)]
pub struct WorldState {
    /// Distance of each online viewer to every target.
    distances: BTreeMap<ViewerId, f64>,
    passengers: HashMap<TargetId, usize>,
    spectating: HashSet<ViewerId>,
}

/// A world where every viewer sits at a fixed distance from every target.
#[derive(Debug, Clone, Default)]
pub struct ScriptedWorld(Rc<RefCell<WorldState>>);

impl ScriptedWorld {
    pub fn place(&self, viewer: ViewerId, distance: f64) {
        self.0.borrow_mut().distances.insert(viewer, distance);
    }

    pub fn remove(&self, viewer: ViewerId) {
        self.0.borrow_mut().distances.remove(&viewer);
    }

    pub fn set_passengers(&self, target: TargetId, count: usize) {
        self.0.borrow_mut().passengers.insert(target, count);
    }

    pub fn set_spectating(&self, viewer: ViewerId, spectating: bool) {
        let mut state = self.0.borrow_mut();
        if spectating {
            state.spectating.insert(viewer);
        } else {
            state.spectating.remove(&viewer);
        }
    }
}

impl World for ScriptedWorld {
    fn nearby(&self, _target: TargetId, radius: f64) -> Vec<ViewerId> {
        self.0
            .borrow()
            .distances
            .iter()
            .filter(|(_, distance)| **distance <= radius)
            .map(|(&v, _)| v)
            .collect()
    }

    fn online_viewers(&self) -> Vec<ViewerId> {
        self.0.borrow().distances.keys().copied().collect()
    }

    fn passenger_count(&self, target: TargetId) -> usize {
        self.0.borrow().passengers.get(&target).copied().unwrap_or(0)
    }

    fn is_spectating(&self, viewer: ViewerId) -> bool {
        self.0.borrow().spectating.contains(&viewer)
    }

    fn base_name(&self, target: TargetId) -> String {
        format!("Entity {}", target.0)
    }
}

/// Mutable content behind a [`ScriptedProvider`].
#[derive(Debug)]
pub struct Script {
    texts: Vec<Option<String>>,
    keep_space: Vec<bool>,
    pub categories: Categories,
    /// Prefix and suffix wrapped around the name composed so far.
    pub wrap: Option<(String, String)>,
}

impl Script {
    pub fn set_text(&mut self, line: usize, text: Option<&str>) {
        self.texts[line] = text.map(str::to_owned);
    }

    pub fn set_keep_space(&mut self, line: usize, keep: bool) {
        self.keep_space[line] = keep;
    }
}

/// A provider whose lines are driven by a shared [`Script`].
#[derive(Debug)]
pub struct ScriptedProvider {
    priority: i32,
    naming_priority: i32,
    script: Rc<RefCell<Script>>,
}

impl ScriptedProvider {
    pub fn new(priority: i32, naming_priority: i32, texts: &[Option<&str>]) -> (Self, Rc<RefCell<Script>>) {
        let script = Rc::new(RefCell::new(Script {
            texts: texts.iter().map(|t| t.map(str::to_owned)).collect(),
            keep_space: vec![false; texts.len()],
            categories: Categories::all(),
            wrap: None,
        }));
        let provider = Self {
            priority,
            naming_priority,
            script: Rc::clone(&script),
        };
        (provider, script)
    }
}

impl LineProvider for ScriptedProvider {
    fn lines_for(&self, _target: &Target) -> Vec<LineId> {
        let count = self.script.borrow().texts.len();
        (0..count).map(|i| LineId(i as u32)).collect()
    }

    fn text(&self, line: LineId, _target: &Target, _viewer: ViewerId) -> Option<String> {
        self.script.borrow().texts.get(line.0 as usize).cloned().flatten()
    }

    fn keep_space_when_null(&self, line: LineId, _target: &Target) -> bool {
        self.script
            .borrow()
            .keep_space
            .get(line.0 as usize)
            .copied()
            .unwrap_or(false)
    }

    fn display_name(&self, _target: &Target, _viewer: ViewerId, previous: &str) -> String {
        match &self.script.borrow().wrap {
            Some((prefix, suffix)) => format!("{prefix}{previous}{suffix}"),
            None => previous.to_owned(),
        }
    }

    fn auto_attach(&self) -> Categories {
        self.script.borrow().categories
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn naming_priority(&self) -> i32 {
        self.naming_priority
    }
}

/// A registry wired to a scripted world and a channel sink.
pub struct Harness {
    pub registry: Registry,
    pub world: ScriptedWorld,
    rx: Receiver<Envelope>,
}

impl Harness {
    pub fn new() -> Self {
        let world = ScriptedWorld::default();
        let (sink, rx) = ChannelSink::unbounded();
        let registry = Registry::builder()
            .world(world.clone())
            .factory(SequentialFactory::default())
            .sink(sink)
            .build()
            .expect("scripted collaborators are complete");
        Self { registry, world, rx }
    }

    /// Everything submitted since the last drain.
    pub fn drain(&self) -> Vec<Envelope> {
        self.rx.try_iter().collect()
    }

    /// Commands for `viewer` submitted since the last drain; others are dropped.
    pub fn drain_for(&self, viewer: ViewerId) -> Vec<RenderCommand> {
        self.drain()
            .into_iter()
            .filter(|e| e.viewer == viewer)
            .map(|e| e.command)
            .collect()
    }
}
