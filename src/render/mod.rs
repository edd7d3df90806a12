//! Render module: the boundary between the engine and the host.
//!
//! The engine never talks to clients itself. It asks the host three things:
//! - **World**: who is near a target, and facts about targets and viewers
//! - **Entity factory**: allocate and release client-side proxy entities
//! - **Transaction sink**: deliver ordered commands to one viewer
//!
//! ```text
//!                    nearby / passengers / spectating
//! ┌──────────────┐ ◀──────────────────────────────── ┌──────────────┐
//! │   Renderer   │                                   │    World     │
//! │              │       create / destroy proxies    └──────────────┘
//! │  visibility  │ ────────────────────────────────▶ ┌──────────────┐
//! │    index     │                                   │   Factory    │
//! │              │   Envelope { viewer, command }    └──────────────┘
//! │              │ ────────────────────────────────▶ ┌──────────────┐
//! └──────────────┘                                   │     Sink     │
//!                                                    └──────────────┘
//! ```

mod messages;
mod renderer;
mod sink;
mod world;

pub use messages::{Anchors, Envelope, RenderCommand};
pub use renderer::{Band, RenderStats, Renderer};
pub use sink::{ChannelSink, TransactionSink};
pub use world::{EntityFactory, SequentialFactory, World};
