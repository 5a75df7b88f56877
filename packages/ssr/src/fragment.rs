//! Locating and serializing fragment regions of a rendered tree.
//!
//! A fragment is a contiguous run of sibling nodes. Renderers that emit a
//! multi-root fragment delimit it with comment markers: `<!--[-->` opens
//! the fragment and `<!--]-->` closes it. The common single-root case
//! carries no markers at all and is treated as a one-block fragment.

use atoll_dom::{NodeId, RenderTree};

/// Attribute marking an element as a slot: a designated injection point
/// whose content may be stripped from a capture and re-injected later.
/// The element and the attribute itself always survive stripping.
pub const ISLAND_SLOT_ATTR: &str = "data-island-slot";

const FRAGMENT_OPEN: &str = "[";
const FRAGMENT_CLOSE: &str = "]";

/// Returns true if `id` is a comment node opening a fragment.
pub fn is_start_fragment(tree: &RenderTree, id: NodeId) -> bool {
    tree.get(id).comment_value() == Some(FRAGMENT_OPEN)
}

/// Returns true if `id` is a comment node closing a fragment.
pub fn is_end_fragment(tree: &RenderTree, id: NodeId) -> bool {
    tree.get(id).comment_value() == Some(FRAGMENT_CLOSE)
}

/// Retrieve the markup of the fragment starting at `start`, one string per
/// block. Use `concat` to recover the markup of the whole fragment.
///
/// If `start` opens a marked fragment, siblings are walked until the
/// closing marker; otherwise the single node is the entire fragment. With
/// `strip_slots`, every element carrying [`ISLAND_SLOT_ATTR`] is rendered
/// with empty inner content.
pub fn locate_fragment(
    tree: &RenderTree,
    start: Option<NodeId>,
    strip_slots: bool,
) -> Option<Vec<String>> {
    let start = start?;
    if is_start_fragment(tree, start) {
        return Some(fragment_blocks(tree, start, strip_slots));
    }
    Some(vec![serialize_block(tree, start, strip_slots)])
}

/// Walk the sibling chain from a start marker, collecting one serialized
/// block per interior node. Start markers are skipped, the matching end
/// marker terminates the walk.
fn fragment_blocks(tree: &RenderTree, start: NodeId, strip_slots: bool) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut cursor = Some(start);
    while let Some(id) = cursor {
        if is_end_fragment(tree, id) {
            return blocks;
        }
        if !is_start_fragment(tree, id) {
            blocks.push(serialize_block(tree, id, strip_slots));
        }
        cursor = tree.next_sibling(id);
    }

    // The chain ran out before a closing marker. Hand back the partial
    // capture instead of failing the pass.
    tracing::debug!(
        "unterminated fragment at {start:?}, returning {} block(s)",
        blocks.len()
    );
    blocks
}

fn serialize_block(tree: &RenderTree, id: NodeId, strip_slots: bool) -> String {
    tree.outer_html_with(id, strip_slots.then_some(ISLAND_SLOT_ATTR))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sibling_chain(tree: &mut RenderTree, nodes: &[NodeId]) -> NodeId {
        let root = tree.element("template");
        for id in nodes {
            tree.append_child(root, *id);
        }
        nodes[0]
    }

    #[test]
    fn marked_fragment_yields_one_block_per_interior_node() {
        let mut tree = RenderTree::new();
        let open = tree.comment("[");
        let a = tree.element("header");
        let b = tree.element("footer");
        let close = tree.comment("]");
        let start = sibling_chain(&mut tree, &[open, a, b, close]);

        assert_eq!(
            locate_fragment(&tree, Some(start), false),
            Some(vec!["<header></header>".into(), "<footer></footer>".into()])
        );
    }

    #[test]
    fn single_root_is_a_one_block_fragment() {
        let mut tree = RenderTree::new();
        let el = tree.element("main");

        assert_eq!(
            locate_fragment(&tree, Some(el), false),
            Some(vec!["<main></main>".into()])
        );
    }

    #[test]
    fn absent_start_yields_none() {
        let tree = RenderTree::new();
        assert_eq!(locate_fragment(&tree, None, false), None);
    }

    #[test]
    fn end_marker_stops_the_walk() {
        let mut tree = RenderTree::new();
        let open = tree.comment("[");
        let a = tree.element("p");
        let close = tree.comment("]");
        let after = tree.element("aside");
        let start = sibling_chain(&mut tree, &[open, a, close, after]);

        assert_eq!(
            locate_fragment(&tree, Some(start), false),
            Some(vec!["<p></p>".into()])
        );
    }

    // The walk is lenient about malformed trees: a missing end marker
    // returns whatever was collected, not an error.
    #[test]
    fn unterminated_fragment_returns_partial_blocks() {
        let mut tree = RenderTree::new();
        let open = tree.comment("[");
        let a = tree.element("p");
        let start = sibling_chain(&mut tree, &[open, a]);

        assert_eq!(
            locate_fragment(&tree, Some(start), false),
            Some(vec!["<p></p>".into()])
        );
    }

    #[test]
    fn interior_comments_serialize_as_blocks() {
        let mut tree = RenderTree::new();
        let open = tree.comment("[");
        let note = tree.comment("teleport start");
        let close = tree.comment("]");
        let start = sibling_chain(&mut tree, &[open, note, close]);

        assert_eq!(
            locate_fragment(&tree, Some(start), false),
            Some(vec!["<!--teleport start-->".into()])
        );
    }
}
