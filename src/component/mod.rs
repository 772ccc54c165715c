//! Component model - mountable UI pieces and the scope they render into.
//!
//! A [`Component`] is anything that can mount a subtree into the host
//! document and hand back a [`Cleanup`] that removes it again. Mount must
//! be re-invokable: the strict wrapper deliberately runs
//! mount → cleanup → mount in development builds, so a component that can
//! only mount once is a bug the wrapper exists to catch.
//!
//! The [`Scope`] carries everything a component needs at mount time: the
//! current parent node, the shared document, and the localization service
//! (explicitly threaded, never an ambient global).

pub mod props;

use std::cell::RefCell;
use std::rc::Rc;

use crate::host::Document;
use crate::i18n::Localizer;
use crate::types::NodeId;
use props::{BlockProps, PropValue, TextProps};

// =============================================================================
// Cleanup Function
// =============================================================================

/// Cleanup function returned by every mount.
///
/// Call it to remove the nodes the mount created and release resources.
pub type Cleanup = Box<dyn FnOnce()>;

// =============================================================================
// Component Trait
// =============================================================================

/// A mountable piece of UI.
///
/// `mount` takes `&self` so the same component value can be mounted more
/// than once - a requirement of [`StrictMode`](crate::strict::StrictMode).
pub trait Component {
    /// Render this component under the scope's current parent.
    fn mount(&self, scope: &mut Scope) -> Cleanup;
}

/// Plain closures are components.
impl<F> Component for F
where
    F: Fn(&mut Scope) -> Cleanup,
{
    fn mount(&self, scope: &mut Scope) -> Cleanup {
        self(scope)
    }
}

// =============================================================================
// Scope
// =============================================================================

/// Render scope handed to components during mount.
pub struct Scope {
    doc: Rc<RefCell<Document>>,
    i18n: Rc<RefCell<Localizer>>,
    parent: NodeId,
}

impl Scope {
    /// Create a scope rooted at `parent`.
    pub fn new(
        doc: Rc<RefCell<Document>>,
        i18n: Rc<RefCell<Localizer>>,
        parent: NodeId,
    ) -> Self {
        Self { doc, i18n, parent }
    }

    /// The node new children are appended under.
    pub fn parent(&self) -> NodeId {
        self.parent
    }

    /// The shared host document.
    pub fn document(&self) -> &Rc<RefCell<Document>> {
        &self.doc
    }

    /// The shared localization service.
    pub fn localizer(&self) -> &Rc<RefCell<Localizer>> {
        &self.i18n
    }

    // =========================================================================
    // Localization
    // =========================================================================

    /// Translate `key` for the active locale, once, at call time.
    pub fn t(&self, key: &str) -> String {
        self.i18n.borrow().t(key)
    }

    /// A content prop that re-translates `key` on every read.
    ///
    /// The lookup reads the active-locale signal, so text bound this way
    /// re-renders when the locale changes.
    pub fn localized(&self, key: &str) -> PropValue<String> {
        let i18n = self.i18n.clone();
        let key = key.to_string();
        PropValue::Getter(Rc::new(move || i18n.borrow().t(&key)))
    }

    // =========================================================================
    // Primitives
    // =========================================================================

    /// Mount a text leaf under the current parent.
    pub fn text(&mut self, props: TextProps) -> Cleanup {
        let node = {
            let mut doc = self.doc.borrow_mut();
            let node = doc.create_text(props.content);
            if let Some(id) = props.id.as_deref() {
                doc.assign_id(node, id);
            }
            if let Some(attrs) = props.attrs {
                doc.set_attrs(node, attrs);
            }
            if let Some(visible) = props.visible {
                doc.set_visible(node, visible);
            }
            doc.append_child(self.parent, node);
            node
        };
        self.removal(node)
    }

    /// Mount a block container under the current parent.
    ///
    /// The children closure runs with the block as the parent. The returned
    /// cleanup removes the block and everything under it; per-node cleanup
    /// beyond that belongs in [`Document::on_remove`] hooks.
    pub fn block(&mut self, props: BlockProps) -> Cleanup {
        let node = {
            let mut doc = self.doc.borrow_mut();
            let node = doc.create_element(props.id.as_deref());
            if let Some(visible) = props.visible {
                doc.set_visible(node, visible);
            }
            doc.append_child(self.parent, node);
            node
        };

        if let Some(children) = props.children {
            let mut child_scope = Scope::new(self.doc.clone(), self.i18n.clone(), node);
            children(&mut child_scope);
        }

        self.removal(node)
    }

    fn removal(&self, node: NodeId) -> Cleanup {
        let doc = self.doc.clone();
        Box::new(move || {
            doc.borrow_mut().remove_subtree(node);
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
