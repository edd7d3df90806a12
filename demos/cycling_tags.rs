//! Cycling Tags Demo: two providers sharing one tag stack.
//!
//! A cycling status line sits above a greeting; every tick the status
//! text advances and only the changed line travels to the transport
//! thread. Run with `RUST_LOG=tagstack=debug` to see spawns and destroys.

use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use tagstack::{
    Categories, ChannelSink, Event, LineId, LineProvider, RenderCommand, Registry,
    SequentialFactory, Target, TargetId, ViewerId, World,
};
use tracing_subscriber::EnvFilter;

const FRAMES: [&str; 4] = ["Idle", "Walking", "Running", "Resting"];

/// Cycles through [`FRAMES`] on a shared tick.
struct Status {
    tick: Rc<Cell<usize>>,
}

impl LineProvider for Status {
    fn lines_for(&self, _target: &Target) -> Vec<LineId> {
        vec![LineId(0)]
    }

    fn text(&self, _line: LineId, _target: &Target, _viewer: ViewerId) -> Option<String> {
        Some(format!("[{}]", FRAMES[self.tick.get() % FRAMES.len()]))
    }

    fn keep_space_when_null(&self, _line: LineId, _target: &Target) -> bool {
        true
    }

    fn priority(&self) -> i32 {
        -10
    }

    fn naming_priority(&self) -> i32 {
        0
    }
}

/// Greets each viewer by id and decorates the display name.
struct Greeting;

impl LineProvider for Greeting {
    fn lines_for(&self, _target: &Target) -> Vec<LineId> {
        vec![LineId(0)]
    }

    fn text(&self, _line: LineId, target: &Target, viewer: ViewerId) -> Option<String> {
        Some(format!("Hello viewer {}, I am {}", viewer.0, target.id))
    }

    fn keep_space_when_null(&self, _line: LineId, _target: &Target) -> bool {
        false
    }

    fn display_name(&self, _target: &Target, _viewer: ViewerId, previous: &str) -> String {
        format!("* {previous} *")
    }

    fn auto_attach(&self) -> Categories {
        Categories::PLAYER | Categories::PASSIVE
    }

    fn priority(&self) -> i32 {
        0
    }

    fn naming_priority(&self) -> i32 {
        0
    }
}

/// Viewers at fixed distances from every target.
struct Field {
    distances: Rc<std::cell::RefCell<BTreeMap<ViewerId, f64>>>,
}

impl World for Field {
    fn nearby(&self, _target: TargetId, radius: f64) -> Vec<ViewerId> {
        self.distances
            .borrow()
            .iter()
            .filter(|(_, distance)| **distance <= radius)
            .map(|(viewer, _)| *viewer)
            .collect()
    }

    fn online_viewers(&self) -> Vec<ViewerId> {
        self.distances.borrow().keys().copied().collect()
    }

    fn passenger_count(&self, _target: TargetId) -> usize {
        0
    }

    fn is_spectating(&self, _viewer: ViewerId) -> bool {
        false
    }

    fn base_name(&self, target: TargetId) -> String {
        format!("Sheep {}", target.0)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let distances = Rc::new(std::cell::RefCell::new(BTreeMap::new()));
    let (sink, commands) = ChannelSink::bounded(256);
    let mut registry = Registry::builder()
        .world(Field {
            distances: Rc::clone(&distances),
        })
        .factory(SequentialFactory::default())
        .sink(sink)
        .build()?;

    // Transport: print what each client would be told
    let transport = thread::spawn(move || {
        for envelope in commands {
            match envelope.command {
                RenderCommand::Spawn { target, lines, name, .. } => {
                    let texts: Vec<_> = lines.into_iter().map(|l| l.text).collect();
                    println!("{} <- spawn {target} {name:?} {texts:?}", envelope.viewer);
                }
                RenderCommand::Destroy { target, entities } => {
                    println!("{} <- destroy {target} ({} entities)", envelope.viewer, entities.len());
                }
                RenderCommand::Apply(transaction) => {
                    println!("{} <- {:?}", envelope.viewer, transaction.change);
                }
            }
        }
    });

    let tick = Rc::new(Cell::new(0));
    let status = registry.register_provider(Box::new(Status {
        tick: Rc::clone(&tick),
    }));
    let greeting = registry.register_provider(Box::new(Greeting));
    registry.add_default_provider(status)?;
    registry.add_default_provider(greeting)?;

    let sheep = Target::new(TargetId(7), Categories::PASSIVE);
    let alice = ViewerId(1);
    let bob = ViewerId(2);
    distances.borrow_mut().insert(alice, 10.0);
    registry.handle(Event::ViewerConnected(alice));
    registry.handle(Event::TargetCreated(sheep));

    distances.borrow_mut().insert(bob, 30.0);
    registry.handle(Event::ViewerConnected(bob));

    for _ in 0..FRAMES.len() {
        tick.set(tick.get() + 1);
        registry.update_provider(status);
        thread::sleep(Duration::from_millis(100));
    }

    // Bob wanders off past the keep radius
    distances.borrow_mut().insert(bob, 80.0);
    registry.handle(Event::ViewerMoved(bob));

    if let Some(mut tag) = registry.tag(sheep.id) {
        tag.set_visible(alice, false);
    }
    registry.handle(Event::TargetRemoved(sheep.id));

    let stats = registry.renderer().stats();
    println!(
        "spawns: {}, destroys: {}, transactions: {}",
        stats.spawns, stats.destroys, stats.transactions
    );

    drop(registry);
    transport.join().map_err(|_| "transport thread panicked")?;
    Ok(())
}
