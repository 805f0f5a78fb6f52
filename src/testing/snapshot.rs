//! Snapshot rendering helpers.
//!
//! Functions for converting virtual nodes into indented, line-per-node text
//! suitable for snapshot testing and assertions. Elements print as their open
//! tag; text leaves print quoted and escaped.

use crate::tree::{ComponentId, Tree};
use crate::vnode::escape;
use crate::vnode::node::write_open_tag;
use crate::vnode::VNode;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Render a virtual node as an indented outline.
///
/// ```ignore
/// let node = el("ul").child(el("li").text("a")).build();
/// assert_eq!(outline(&node), "<ul>\n  <li>\n    \"a\"");
/// ```
pub fn outline(node: &VNode) -> String {
    let mut lines = Vec::new();
    push_lines(node, 0, &mut lines);
    lines.join("\n")
}

/// Outline of the node last rendered for `component`.
pub fn component_outline(tree: &Tree, component: ComponentId) -> Option<String> {
    tree.vnode(component).map(outline)
}

fn push_lines(node: &VNode, depth: usize, lines: &mut Vec<String>) {
    let indent = "  ".repeat(depth);
    match node {
        VNode::Text(text) => {
            lines.push(format!("{indent}\"{}\"", escape::text(text.as_str())));
        }
        VNode::Element(el) => {
            let mut open = indent;
            write_open_tag(&mut open, el.tag(), el.attributes(), el.classes(), el.styles());
            lines.push(open);
            for child in el.children() {
                push_lines(child, depth + 1, lines);
            }
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
