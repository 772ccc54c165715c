//! Host document - the tree applications mount into.
//!
//! The document is the single shared resource of the shell: an arena of
//! nodes with id ↔ node lookup, parent/child links, removal callbacks and a
//! free index pool for O(1) reuse. Applications never build it by hand;
//! the bootstrapper resolves a mount node by id and the component layer
//! inserts the rendered subtree under it.
//!
//! Structural mutations bump a revision signal so render effects that
//! composed a frame from this document automatically re-run.

use std::collections::HashMap;
use std::rc::Rc;
use std::cell::RefCell;

use spark_signals::{signal, Signal};
use tracing::warn;

use crate::component::props::PropValue;
use crate::types::{Attr, NodeId};

// =============================================================================
// Node
// =============================================================================

/// Node kind: container element or text leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Container node. Contributes no output itself.
    Element,
    /// Text leaf. Its content is what the renderer emits.
    Text,
}

struct Node {
    id: Option<String>,
    kind: NodeKind,
    content: PropValue<String>,
    attrs: PropValue<Attr>,
    visible: PropValue<bool>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Self {
            id: None,
            kind,
            content: PropValue::Static(String::new()),
            attrs: PropValue::Static(Attr::NONE),
            visible: PropValue::Static(true),
            parent: None,
            children: Vec::new(),
        }
    }
}

// =============================================================================
// Document
// =============================================================================

/// The host document.
///
/// Shared as `Rc<RefCell<Document>>` between the application, the component
/// scope and the render effect - the runtime is single-threaded and
/// event-loop driven, so interior mutability is all the coordination needed.
pub struct Document {
    nodes: Vec<Option<Node>>,
    free: Vec<usize>,
    ids: HashMap<String, NodeId>,
    remove_callbacks: HashMap<usize, Vec<Box<dyn FnOnce()>>>,
    revision: Signal<u64>,
    bootstrapped: bool,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            ids: HashMap::new(),
            remove_callbacks: HashMap::new(),
            revision: signal(0),
            bootstrapped: false,
        }
    }

    /// Create a document seeded with a single root element carrying `id`.
    ///
    /// The conventional host contract: the element the bootstrapper will
    /// look up must exist before bootstrap runs.
    pub fn with_root_element(id: &str) -> Self {
        let mut doc = Self::new();
        doc.create_element(Some(id));
        doc
    }

    /// Wrap the document for sharing with scopes and render effects.
    pub fn into_shared(self) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(self))
    }

    // =========================================================================
    // Node creation
    // =========================================================================

    /// Create a container element, optionally registering it under `id`.
    pub fn create_element(&mut self, id: Option<&str>) -> NodeId {
        let node = self.insert(Node::new(NodeKind::Element));
        if let Some(id) = id {
            self.assign_id(node, id);
        }
        self.bump();
        node
    }

    /// Create a text leaf with the given content.
    ///
    /// Content is a [`PropValue`]: pass a signal or getter to keep the
    /// rendered text reactive.
    pub fn create_text(&mut self, content: PropValue<String>) -> NodeId {
        let node = self.insert(Node::new(NodeKind::Text));
        if let Some(n) = self.node_mut(node) {
            n.content = content;
        }
        self.bump();
        node
    }

    fn insert(&mut self, node: Node) -> NodeId {
        match self.free.pop() {
            Some(index) => {
                self.nodes[index] = Some(node);
                NodeId(index)
            }
            None => {
                self.nodes.push(Some(node));
                NodeId(self.nodes.len() - 1)
            }
        }
    }

    /// Register `node` under `id` for [`element_by_id`](Self::element_by_id) lookup.
    ///
    /// Ids are expected to be unique; re-assigning an id re-points the
    /// mapping at the new node.
    pub fn assign_id(&mut self, node: NodeId, id: &str) {
        if !self.is_alive(node) {
            return;
        }
        if let Some(previous) = self.ids.insert(id.to_string(), node) {
            if previous != node && self.is_alive(previous) {
                warn!(id, "duplicate node id, lookup re-pointed at newest node");
            }
        }
        if let Some(n) = self.node_mut(node) {
            n.id = Some(id.to_string());
        }
    }

    // =========================================================================
    // Tree structure
    // =========================================================================

    /// Append `child` under `parent`.
    ///
    /// No-op (with a warning) if either node is dead.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if !self.is_alive(parent) || !self.is_alive(child) {
            warn!(parent = parent.index(), child = child.index(), "append_child on dead node");
            return;
        }
        if let Some(n) = self.node_mut(child) {
            n.parent = Some(parent);
        }
        if let Some(n) = self.node_mut(parent) {
            n.children.push(child);
        }
        self.bump();
    }

    /// Remove `node` and its entire subtree.
    ///
    /// Removal callbacks run child-first. Freed indices return to the pool.
    pub fn remove_subtree(&mut self, node: NodeId) {
        if !self.is_alive(node) {
            return;
        }
        // Detach from parent first so the walk below owns the subtree.
        let parent = self.node(node).and_then(|n| n.parent);
        if let Some(parent) = parent {
            if let Some(p) = self.node_mut(parent) {
                p.children.retain(|&c| c != node);
            }
        }
        self.release(node);
        self.bump();
    }

    fn release(&mut self, node: NodeId) {
        let children = self.node(node).map(|n| n.children.clone()).unwrap_or_default();
        for child in children {
            self.release(child);
        }

        if let Some(callbacks) = self.remove_callbacks.remove(&node.index()) {
            for callback in callbacks {
                callback();
            }
        }

        let removed = self.nodes[node.index()].take();
        if let Some(removed) = removed {
            if let Some(id) = removed.id {
                // Only drop the mapping if it still points at this node.
                if self.ids.get(&id) == Some(&node) {
                    self.ids.remove(&id);
                }
            }
        }
        self.free.push(node.index());
    }

    /// Register a callback to run when `node` is removed.
    pub fn on_remove(&mut self, node: NodeId, callback: impl FnOnce() + 'static) {
        if !self.is_alive(node) {
            return;
        }
        self.remove_callbacks
            .entry(node.index())
            .or_default()
            .push(Box::new(callback));
    }

    // =========================================================================
    // Property updates
    // =========================================================================

    /// Replace the content of a text node.
    pub fn set_text(&mut self, node: NodeId, content: PropValue<String>) {
        if let Some(n) = self.node_mut(node) {
            n.content = content;
        }
        self.bump();
    }

    /// Replace the visibility of a node.
    pub fn set_visible(&mut self, node: NodeId, visible: PropValue<bool>) {
        if let Some(n) = self.node_mut(node) {
            n.visible = visible;
        }
        self.bump();
    }

    /// Replace the text attributes of a node.
    pub fn set_attrs(&mut self, node: NodeId, attrs: PropValue<Attr>) {
        if let Some(n) = self.node_mut(node) {
            n.attrs = attrs;
        }
        self.bump();
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// Look up a live node by id.
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.ids.get(id).copied().filter(|&node| self.is_alive(node))
    }

    /// Check if a node is currently alive.
    pub fn is_alive(&self, node: NodeId) -> bool {
        self.nodes.get(node.index()).is_some_and(Option::is_some)
    }

    /// The kind of a node, if alive.
    pub fn node_kind(&self, node: NodeId) -> Option<NodeKind> {
        self.node(node).map(|n| n.kind)
    }

    /// Current content of a node (resolves signals and getters).
    pub fn content(&self, node: NodeId) -> Option<String> {
        self.node(node).map(|n| n.content.get())
    }

    /// Current text attributes of a node.
    pub fn attrs(&self, node: NodeId) -> Option<Attr> {
        self.node(node).map(|n| n.attrs.get())
    }

    /// Current visibility of a node.
    pub fn is_visible(&self, node: NodeId) -> bool {
        self.node(node).is_some_and(|n| n.visible.get())
    }

    /// Children of a node, in insertion order.
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.node(node).map(|n| n.children.clone()).unwrap_or_default()
    }

    /// Parent of a node.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).and_then(|n| n.parent)
    }

    /// Collect the visible text of a subtree, one line per text node.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut parts = Vec::new();
        self.collect_text(node, &mut parts);
        parts.join("\n")
    }

    fn collect_text(&self, node: NodeId, out: &mut Vec<String>) {
        let Some(n) = self.node(node) else { return };
        if !n.visible.get() {
            return;
        }
        if n.kind == NodeKind::Text {
            out.push(n.content.get());
        }
        for &child in &n.children {
            self.collect_text(child, out);
        }
    }

    /// Number of live nodes in a subtree, the root included.
    pub fn subtree_size(&self, node: NodeId) -> usize {
        let Some(n) = self.node(node) else { return 0 };
        1 + n.children.iter().map(|&c| self.subtree_size(c)).sum::<usize>()
    }

    /// Number of live nodes in the whole document.
    pub fn live_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    fn node(&self, node: NodeId) -> Option<&Node> {
        self.nodes.get(node.index()).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, node: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(node.index()).and_then(Option::as_mut)
    }

    // =========================================================================
    // Revision tracking
    // =========================================================================

    /// Current structural revision.
    ///
    /// Reading this inside an effect or derived creates a dependency, so
    /// the reader re-runs on any structural mutation.
    pub fn revision(&self) -> u64 {
        self.revision.get()
    }

    fn bump(&mut self) {
        let next = self.revision.get() + 1;
        self.revision.set(next);
    }

    // =========================================================================
    // Bootstrap guard
    // =========================================================================

    /// Whether an application is currently mounted into this document.
    pub fn is_bootstrapped(&self) -> bool {
        self.bootstrapped
    }

    /// Acquire the single-bootstrap guard. Returns false if already held.
    pub(crate) fn acquire_bootstrap(&mut self) -> bool {
        if self.bootstrapped {
            false
        } else {
            self.bootstrapped = true;
            true
        }
    }

    /// Release the guard so a later bootstrap is permitted.
    pub(crate) fn release_bootstrap(&mut self) {
        self.bootstrapped = false;
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
