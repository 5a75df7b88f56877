#![doc = include_str!("../README.md")]

pub mod buffer;
pub mod capture;
pub mod fragment;
pub mod streaming;

use atoll_dom::{NodeId, RenderTree};

pub use crate::buffer::{BufferError, BufferItem, BufferSlot, PendingBuffer, SsrBuffer};
pub use crate::capture::{capture, capture_shell, StaticCapture};
pub use crate::fragment::{is_end_fragment, is_start_fragment, locate_fragment, ISLAND_SLOT_ATTR};
pub use crate::streaming::StreamingWriter;

/// A convenience function to freeze the fragment starting at `start` into
/// plain markup.
///
/// For control over fallbacks and block counts, use [`capture`] directly.
pub fn capture_markup(tree: &RenderTree, start: Option<NodeId>) -> String {
    capture(tree, start, None).into_markup()
}

/// A convenience function to freeze the fragment starting at `start` into
/// a content-free island shell, with every slot stripped.
pub fn capture_shell_markup(tree: &RenderTree, start: Option<NodeId>) -> String {
    capture_shell(tree, start, None).into_markup()
}
