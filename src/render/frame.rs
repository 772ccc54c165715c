//! Frame composition - from document subtree to styled lines.
//!
//! A frame is the flat, width-bounded view of a mounted subtree: one line
//! per visible text node (embedded newlines split), each carrying its text
//! attributes. Composition reads the document revision plus every content,
//! visibility and attribute prop, so composing inside an effect makes the
//! frame fully reactive.

use unicode_width::UnicodeWidthChar;

use crate::host::{Document, NodeKind};
use crate::types::{Attr, NodeId};

// =============================================================================
// Line
// =============================================================================

/// One rendered line: text already truncated to the frame width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub attrs: Attr,
}

// =============================================================================
// Frame
// =============================================================================

/// A composed frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u16,
    lines: Vec<Line>,
}

impl Frame {
    /// Compose the subtree under `root` into lines at most `width` cells wide.
    ///
    /// `root` itself contributes no line; only its descendant text nodes do.
    pub fn compose(doc: &Document, root: NodeId, width: u16) -> Self {
        // Structural dependency: re-compose on any tree mutation.
        let _ = doc.revision();

        let mut lines = Vec::new();
        collect(doc, root, width, &mut lines);
        Self { width, lines }
    }

    /// An empty frame of the given width.
    pub fn empty(width: u16) -> Self {
        Self {
            width,
            lines: Vec::new(),
        }
    }

    /// The composed lines, top to bottom.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Frame width in terminal cells.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Number of lines.
    pub fn height(&self) -> usize {
        self.lines.len()
    }
}

fn collect(doc: &Document, node: NodeId, width: u16, out: &mut Vec<Line>) {
    if !doc.is_visible(node) {
        return;
    }
    if doc.node_kind(node) == Some(NodeKind::Text) {
        let content = doc.content(node).unwrap_or_default();
        let attrs = doc.attrs(node).unwrap_or_default();
        for part in content.split('\n') {
            out.push(Line {
                text: fit(part, width),
                attrs,
            });
        }
    }
    for child in doc.children(node) {
        collect(doc, child, width, out);
    }
}

/// Truncate `text` to at most `width` display cells (unicode-width aware).
fn fit(text: &str, width: u16) -> String {
    let width = width as usize;
    let mut used = 0;
    let mut result = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        result.push(ch);
    }
    result
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::props::PropValue;

    fn doc_with_texts(texts: &[&str]) -> (Document, NodeId) {
        let mut doc = Document::with_root_element("root");
        let root = doc.element_by_id("root").unwrap();
        for text in texts {
            let node = doc.create_text(PropValue::Static(text.to_string()));
            doc.append_child(root, node);
        }
        (doc, root)
    }

    #[test]
    fn test_compose_one_line_per_text_node() {
        let (doc, root) = doc_with_texts(&["first", "second"]);
        let frame = Frame::compose(&doc, root, 80);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.lines()[0].text, "first");
        assert_eq!(frame.lines()[1].text, "second");
    }

    #[test]
    fn test_compose_splits_embedded_newlines() {
        let (doc, root) = doc_with_texts(&["a\nb"]);
        let frame = Frame::compose(&doc, root, 80);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.lines()[0].text, "a");
        assert_eq!(frame.lines()[1].text, "b");
    }

    #[test]
    fn test_compose_skips_invisible() {
        let (mut doc, root) = doc_with_texts(&["shown", "hidden"]);
        let hidden = doc.children(root)[1];
        doc.set_visible(hidden, PropValue::Static(false));

        let frame = Frame::compose(&doc, root, 80);
        assert_eq!(frame.height(), 1);
        assert_eq!(frame.lines()[0].text, "shown");
    }

    #[test]
    fn test_compose_carries_attrs() {
        let (mut doc, root) = doc_with_texts(&["bold"]);
        let node = doc.children(root)[0];
        doc.set_attrs(node, PropValue::Static(Attr::BOLD | Attr::UNDERLINE));

        let frame = Frame::compose(&doc, root, 80);
        assert_eq!(frame.lines()[0].attrs, Attr::BOLD | Attr::UNDERLINE);
    }

    #[test]
    fn test_fit_truncates_by_display_width() {
        assert_eq!(fit("hello", 3), "hel");
        assert_eq!(fit("hello", 10), "hello");
        // CJK characters are two cells wide: only one fits in three cells.
        assert_eq!(fit("你好", 3), "你");
        assert_eq!(fit("你好", 4), "你好");
        assert_eq!(fit("abc", 0), "");
    }

    #[test]
    fn test_empty_frame() {
        let frame = Frame::empty(40);
        assert_eq!(frame.height(), 0);
        assert_eq!(frame.width(), 40);
    }
}
