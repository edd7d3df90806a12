//! The line provider capability set.

use super::ProviderId;
use crate::entity::{Categories, Target, ViewerId};

/// Provider-local identity of one line.
///
/// A provider hands these out from [`LineProvider::lines_for`] and receives
/// them back when the engine asks for text. The value only has to be unique
/// within the issuing provider.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct LineId(pub u32);

/// Global identity of a line: the issuing provider plus its local id.
///
/// Line-scoped updates match rendered slots against this.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct LineRef {
    /// Provider that owns the line.
    pub provider: ProviderId,
    /// Line id within that provider.
    pub line: LineId,
}

impl LineRef {
    /// Create a new line reference.
    #[inline]
    pub const fn new(provider: ProviderId, line: LineId) -> Self {
        Self { provider, line }
    }
}

/// A content module contributing lines to tags.
///
/// Several providers may attach to one target. The engine merges their
/// lines by [`priority`](Self::priority) and composes the display name by
/// [`naming_priority`](Self::naming_priority); lower values take precedence
/// (sit higher in the stack, get applied first).
pub trait LineProvider {
    /// The ordered lines this provider wants rendered on `target`.
    ///
    /// Called once when the provider is attached to a tag. An empty list
    /// means the provider contributes nothing to that tag.
    fn lines_for(&self, target: &Target) -> Vec<LineId>;

    /// Current text of `line` as seen by `viewer`.
    ///
    /// `None` means the line has nothing to show; whether its slot stays as
    /// a blank line is decided by [`keep_space_when_null`](Self::keep_space_when_null).
    fn text(&self, line: LineId, target: &Target, viewer: ViewerId) -> Option<String>;

    /// Whether `line` keeps a blank slot while its text is `None`.
    fn keep_space_when_null(&self, line: LineId, target: &Target) -> bool;

    /// Transform the display name composed so far.
    fn display_name(&self, _target: &Target, _viewer: ViewerId, previous: &str) -> String {
        previous.to_owned()
    }

    /// Categories this provider attaches to automatically when registered
    /// as a default provider. Every category unless overridden.
    fn auto_attach(&self) -> Categories {
        Categories::all()
    }

    /// Stack ordering priority.
    fn priority(&self) -> i32;

    /// Name composition priority.
    fn naming_priority(&self) -> i32;
}
