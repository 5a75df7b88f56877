//! Freezing fragments into static markup.

use crate::fragment::locate_fragment;
use atoll_dom::{NodeId, RenderTree};

/// A fragment frozen into non-reactive markup, handed to the renderer as a
/// replacement for the live subtree it was captured from.
///
/// A capture is always renderable: when the walk produced nothing and no
/// fallback was given, it degrades to a single empty `<div></div>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StaticCapture {
    markup: String,
    block_count: usize,
}

impl StaticCapture {
    /// The serialized markup of the whole capture.
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Number of top-level blocks concatenated into [`markup`](Self::markup).
    pub fn block_count(&self) -> usize {
        self.block_count
    }

    /// Consume the capture, returning its markup.
    pub fn into_markup(self) -> String {
        self.markup
    }

    fn placeholder() -> Self {
        Self {
            markup: "<div></div>".to_string(),
            block_count: 1,
        }
    }
}

/// Freeze the fragment starting at `start` into a [`StaticCapture`].
///
/// Defaults to `fallback` when the walk yields no blocks, and to an empty
/// `div` when no fallback is provided either. `fallback` must be valid
/// markup; it is used verbatim.
pub fn capture(
    tree: &RenderTree,
    start: Option<NodeId>,
    fallback: Option<&str>,
) -> StaticCapture {
    capture_inner(tree, start, fallback, false)
}

/// Like [`capture`], but strips the content of every slot element so the
/// result is a content-free shell ready for later injection.
pub fn capture_shell(
    tree: &RenderTree,
    start: Option<NodeId>,
    fallback: Option<&str>,
) -> StaticCapture {
    capture_inner(tree, start, fallback, true)
}

fn capture_inner(
    tree: &RenderTree,
    start: Option<NodeId>,
    fallback: Option<&str>,
    strip_slots: bool,
) -> StaticCapture {
    if let Some(blocks) = locate_fragment(tree, start, strip_slots) {
        if !blocks.is_empty() {
            return StaticCapture {
                block_count: blocks.len(),
                markup: blocks.concat(),
            };
        }
    }
    match fallback {
        Some(markup) => StaticCapture {
            markup: markup.to_string(),
            block_count: 1,
        },
        None => StaticCapture::placeholder(),
    }
}
