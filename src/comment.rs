//! Documentation-comment rendering: a doc tree becomes inline prose in
//! the backend's flavor.
//!
//! Rendering is a pure function of the tree and the index; unresolvable
//! cross-references degrade to literal text instead of erroring.

use crate::index::DocIndex;
use crate::model::{find_section, DocElement, DocNode};
use crate::render::Backend;
use crate::signature;
use regex::Regex;
use std::sync::LazyLock;

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

pub struct CommentRenderer<'a> {
    index: &'a DocIndex<'a>,
    backend: &'a dyn Backend,
}

impl<'a> CommentRenderer<'a> {
    pub fn new(index: &'a DocIndex<'a>, backend: &'a dyn Backend) -> Self {
        CommentRenderer { index, backend }
    }

    /// Render the children of the first `tag` element among `nodes`.
    /// `None` when the section is absent or renders empty.
    pub fn render_section(&self, nodes: &[DocNode], tag: &str) -> Option<String> {
        let element = find_section(nodes, tag)?;
        let text = self.render(&element.children);
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Render a node sequence. Empty input renders as the empty string.
    pub fn render(&self, nodes: &[DocNode]) -> String {
        self.render_nodes(nodes).trim().to_string()
    }

    fn render_nodes(&self, nodes: &[DocNode]) -> String {
        let fragments: Vec<String> = nodes
            .iter()
            .map(|n| self.render_node(n))
            .filter(|f| !f.is_empty())
            .collect();
        fragments.join(" ")
    }

    fn render_node(&self, node: &DocNode) -> String {
        match node {
            DocNode::Text(text) => self.backend.escape(&collapse(text)),
            DocNode::Element(element) => self.render_element(element),
        }
    }

    fn render_element(&self, element: &DocElement) -> String {
        match element.tag.as_str() {
            "summary" | "remarks" | "example" => self.render_nodes(&element.children),
            "para" => {
                let mut text = self.render_nodes(&element.children);
                text.push('\n');
                text
            }
            "code" => self.backend.preformatted(&collect_text(&element.children)),
            "paramref" => match element.name {
                Some(ref name) => self.backend.inline_code(name, ""),
                None => self.backend.escape(&element.source_text()),
            },
            "see" => match element.cref {
                Some(ref cref) => self.resolve_cref(cref),
                None => self.backend.escape(&element.source_text()),
            },
            // No special rendering: degrade to the literal source text.
            _ => self.backend.escape(&element.source_text()),
        }
    }

    /// Known type wins over known member; an unresolvable cref renders as
    /// the raw key, unchanged.
    fn resolve_cref(&self, cref: &str) -> String {
        if let Some(type_def) = self.index.get_type(cref) {
            return self
                .backend
                .inline_code(&signature::type_def_display_name(type_def), "");
        }
        if let Some(member) = self.index.get_member(cref) {
            return self
                .backend
                .inline_code(&signature::member_display_name(member), "");
        }
        self.backend.inline_code(cref, "")
    }
}

fn collapse(text: &str) -> String {
    RE_WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

/// Literal text of a preformatted region. Unlike prose, line structure
/// is kept; only the shared indentation and surrounding blank lines go.
/// Not markup-escaped (the backend's code-block primitive owns that).
fn collect_text(nodes: &[DocNode]) -> String {
    let raw: String = nodes.iter().map(|n| n.source_text()).collect();
    unindent(&raw)
}

/// Strip the minimum indentation shared by all non-blank lines.
fn unindent(text: &str) -> String {
    let mut lines: Vec<&str> = text.split('\n').collect();
    while lines.first().is_some_and(|l| l.trim().is_empty()) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }
    let indent = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start_matches(' ').len())
        .min()
        .unwrap_or(0);
    lines
        .iter()
        .map(|l| if l.trim().is_empty() { *l } else { &l[indent..] })
        .collect::<Vec<_>>()
        .join("\n")
}
