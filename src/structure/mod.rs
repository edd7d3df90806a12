//! Structure module: the realized line stack of one tag and its diff engine.
//!
//! This module contains:
//! - [`RenderedLine`]: One slot of the stack, with per-viewer shown text
//! - [`Transaction`] / [`Change`]: Ordered per-viewer instructions
//! - [`TagStructure`]: Priority-ordered merge of provider lines, producing
//!   minimal insert/remove/update transactions
//! - [`text`]: Display-width clamping for line text
//!
//! Positions in transactions are viewer-relative (0 = topmost slot present
//! in that viewer's stack) and valid at the moment the transaction is
//! applied, given every earlier transaction of the same batch was applied
//! first. Slots below an insert or remove shift implicitly.

mod line;
#[allow(clippy::module_inception)]
mod structure;
pub mod text;
mod transaction;

pub use line::RenderedLine;
pub use structure::TagStructure;
pub use transaction::{Change, LineSnapshot, Transaction};
