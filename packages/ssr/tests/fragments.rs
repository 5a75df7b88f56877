use atoll_dom::RenderTree;
use atoll_ssr::{capture, capture_shell, locate_fragment, ISLAND_SLOT_ATTR};

/// Build `<div><section data-island-slot="default">secret</section></div>`
/// and return the root.
fn island_with_slot(tree: &mut RenderTree) -> atoll_dom::NodeId {
    let root = tree.element("div");
    let slot = tree.element("section");
    tree.set_attribute(slot, ISLAND_SLOT_ATTR, "default");
    tree.append_child(root, slot);
    let secret = tree.text("secret");
    tree.append_child(slot, secret);
    root
}

#[test]
fn marked_fragment_round_trips_in_sibling_order() {
    let mut tree = RenderTree::new();
    let parent = tree.element("template");
    let open = tree.comment("[");
    let a = tree.element("header");
    let b = tree.element("footer");
    let close = tree.comment("]");
    for id in [open, a, b, close] {
        tree.append_child(parent, id);
    }

    assert_eq!(
        locate_fragment(&tree, Some(open), false),
        Some(vec!["<header></header>".into(), "<footer></footer>".into()])
    );
}

#[test]
fn slot_content_is_stripped_only_on_request() {
    let mut tree = RenderTree::new();
    let root = island_with_slot(&mut tree);

    let full = capture(&tree, Some(root), None);
    assert_eq!(
        full.markup(),
        "<div><section data-island-slot=\"default\">secret</section></div>"
    );

    let shell = capture_shell(&tree, Some(root), None);
    assert_eq!(
        shell.markup(),
        "<div><section data-island-slot=\"default\"></section></div>"
    );
    assert_eq!(shell.block_count(), 1);
}

#[test]
fn slot_stripping_applies_to_every_fragment_block() {
    let mut tree = RenderTree::new();
    let parent = tree.element("template");
    let open = tree.comment("[");
    let first = island_with_slot(&mut tree);
    let second = tree.element("p");
    let close = tree.comment("]");
    for id in [open, first, second, close] {
        tree.append_child(parent, id);
    }

    assert_eq!(
        locate_fragment(&tree, Some(open), true),
        Some(vec![
            "<div><section data-island-slot=\"default\"></section></div>".into(),
            "<p></p>".into(),
        ])
    );
}

#[test]
fn capture_of_nothing_is_still_renderable() {
    let tree = RenderTree::new();

    let capture = capture(&tree, None, None);
    assert_eq!(capture.block_count(), 1);
    assert!(!capture.markup().is_empty());
}

#[test]
fn fallback_markup_is_used_verbatim() {
    let tree = RenderTree::new();

    let capture = capture(&tree, None, Some("<span>from cache</span>"));
    assert_eq!(capture.markup(), "<span>from cache</span>");
    assert_eq!(capture.block_count(), 1);
}

// Unterminated fragments are a documented degraded case: the walk keeps
// whatever it collected before the chain ran out.
#[test]
fn unterminated_fragment_is_a_partial_capture() {
    let mut tree = RenderTree::new();
    let parent = tree.element("template");
    let open = tree.comment("[");
    let a = tree.element("p");
    tree.append_child(parent, open);
    tree.append_child(parent, a);

    assert_eq!(
        locate_fragment(&tree, Some(open), false),
        Some(vec!["<p></p>".into()])
    );

    let capture = capture(&tree, Some(open), None);
    assert_eq!(capture.markup(), "<p></p>");
    assert_eq!(capture.block_count(), 1);
}
