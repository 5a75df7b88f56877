use crate::{Attribute, NodeData, NodeId, RenderTree};
use std::fmt::Write;

impl RenderTree {
    /// Serialize the subtree rooted at `id` to markup.
    pub fn outer_html(&self, id: NodeId) -> String {
        self.outer_html_with(id, None)
    }

    /// Serialize the subtree rooted at `id`, rendering any element that
    /// carries the `clear_inner` attribute with empty inner content. The
    /// element and its attributes are kept so content can be re-injected
    /// at the same position later.
    pub fn outer_html_with(&self, id: NodeId, clear_inner: Option<&str>) -> String {
        let mut buf = String::new();
        // fmt::Write for String never fails
        _ = self.write_outer_html(&mut buf, id, clear_inner);
        buf
    }

    pub fn write_outer_html(
        &self,
        buf: &mut impl Write,
        id: NodeId,
        clear_inner: Option<&str>,
    ) -> std::fmt::Result {
        let node = self.get(id);
        match node.data() {
            NodeData::Element { tag, attrs } => {
                write!(buf, "<{tag}")?;
                for attr in attrs {
                    write_attribute(buf, attr)?;
                }

                if self.first_child(id).is_none() && tag_is_self_closing(tag) {
                    return write!(buf, "/>");
                }
                write!(buf, ">")?;

                let cleared = clear_inner.is_some_and(|name| node.has_attribute(name));
                if !cleared {
                    let mut child = self.first_child(id);
                    while let Some(cur) = child {
                        self.write_outer_html(buf, cur, clear_inner)?;
                        child = self.next_sibling(cur);
                    }
                }
                write!(buf, "</{tag}>")
            }
            NodeData::Text { text } => {
                write!(buf, "{}", askama_escape::escape(text, askama_escape::Html))
            }
            NodeData::Comment { value } => write!(buf, "<!--{value}-->"),
        }
    }
}

fn write_attribute(buf: &mut impl Write, attr: &Attribute) -> std::fmt::Result {
    write!(buf, " {}=\"{}\"", attr.name, attr.value)
}

fn tag_is_self_closing(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

#[test]
fn elements_nest_and_escape_text() {
    let mut tree = RenderTree::new();
    let root = tree.element("div");
    tree.set_attribute(root, "class", "card");
    let inner = tree.element("span");
    tree.append_child(root, inner);
    let text = tree.text("a < b");
    tree.append_child(inner, text);

    assert_eq!(
        tree.outer_html(root),
        "<div class=\"card\"><span>a &#60; b</span></div>"
    );
}

#[test]
fn void_elements_self_close() {
    let mut tree = RenderTree::new();
    let br = tree.element("br");
    let div = tree.element("div");

    assert_eq!(tree.outer_html(br), "<br/>");
    assert_eq!(tree.outer_html(div), "<div></div>");
}

#[test]
fn comments_serialize_with_their_value() {
    let mut tree = RenderTree::new();
    let open = tree.comment("[");

    assert_eq!(tree.outer_html(open), "<!--[-->");
}
