//! Strict mode - development-only mount integrity checking.
//!
//! In development builds the wrapper mounts its inner component, runs the
//! returned cleanup, then mounts again, keeping only the second cleanup.
//! A component whose cleanup leaks nodes, or whose mount is not
//! re-invokable, shows up immediately as duplicated or missing output.
//!
//! In production builds it is a passthrough: one mount, zero overhead.
//! The profile is an explicit configuration value - see [`Profile`].

use tracing::debug;

use crate::component::{Cleanup, Component, Scope};
use crate::types::Profile;

/// Development-only integrity-checking wrapper around a component.
///
/// Final document state after a development mount must be identical to a
/// production mount; only the intermediate double invocation differs.
pub struct StrictMode<C> {
    inner: C,
    profile: Profile,
}

impl<C: Component> StrictMode<C> {
    /// Wrap `inner`, gated by `profile`.
    pub fn new(inner: C, profile: Profile) -> Self {
        Self { inner, profile }
    }

    /// The configured profile.
    pub fn profile(&self) -> Profile {
        self.profile
    }
}

impl<C: Component> Component for StrictMode<C> {
    fn mount(&self, scope: &mut Scope) -> Cleanup {
        match self.profile {
            Profile::Production => self.inner.mount(scope),
            Profile::Development => {
                debug!("strict mode: double-invoking mount to surface cleanup bugs");
                let first = self.inner.mount(scope);
                first();
                self.inner.mount(scope)
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::props::TextProps;
    use crate::host::Document;
    use crate::i18n::{Locale, Localizer};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn test_scope() -> (Rc<RefCell<Document>>, Scope) {
        let doc = Document::with_root_element("root").into_shared();
        let root = doc.borrow().element_by_id("root").unwrap();
        let mut i18n = Localizer::new(Locale::new("en"));
        i18n.init().unwrap();
        let scope = Scope::new(doc.clone(), Rc::new(RefCell::new(i18n)), root);
        (doc, scope)
    }

    fn counting_component(
        mounts: Rc<Cell<u32>>,
        cleanups: Rc<Cell<u32>>,
    ) -> impl Component {
        move |scope: &mut Scope| -> Cleanup {
            mounts.set(mounts.get() + 1);
            let node_cleanup = scope.text(TextProps {
                content: "content".into(),
                ..Default::default()
            });
            let cleanups = cleanups.clone();
            Box::new(move || {
                cleanups.set(cleanups.get() + 1);
                node_cleanup();
            })
        }
    }

    #[test]
    fn test_production_mounts_once() {
        let (_doc, mut scope) = test_scope();
        let mounts = Rc::new(Cell::new(0));
        let cleanups = Rc::new(Cell::new(0));

        let wrapped = StrictMode::new(
            counting_component(mounts.clone(), cleanups.clone()),
            Profile::Production,
        );
        let _cleanup = wrapped.mount(&mut scope);

        assert_eq!(mounts.get(), 1);
        assert_eq!(cleanups.get(), 0);
    }

    #[test]
    fn test_development_double_invokes() {
        let (_doc, mut scope) = test_scope();
        let mounts = Rc::new(Cell::new(0));
        let cleanups = Rc::new(Cell::new(0));

        let wrapped = StrictMode::new(
            counting_component(mounts.clone(), cleanups.clone()),
            Profile::Development,
        );
        let cleanup = wrapped.mount(&mut scope);

        assert_eq!(mounts.get(), 2);
        assert_eq!(cleanups.get(), 1);

        cleanup();
        assert_eq!(cleanups.get(), 2);
    }

    #[test]
    fn test_final_output_identical_across_profiles() {
        let render = |profile: Profile| {
            let (doc, mut scope) = test_scope();
            let root = scope.parent();
            let component = |scope: &mut Scope| -> Cleanup {
                scope.text(TextProps {
                    content: "stable output".into(),
                    ..Default::default()
                })
            };
            let _cleanup = StrictMode::new(component, profile).mount(&mut scope);
            let doc = doc.borrow();
            (doc.text_content(root), doc.subtree_size(root))
        };

        assert_eq!(render(Profile::Development), render(Profile::Production));
    }

    #[test]
    fn test_development_surfaces_leaky_cleanup() {
        // A component whose cleanup forgets its nodes leaves a duplicate
        // subtree behind under strict mode - exactly the bug class the
        // wrapper exists to catch.
        let (doc, mut scope) = test_scope();
        let root = scope.parent();

        let leaky = |scope: &mut Scope| -> Cleanup {
            let _forgotten = scope.text(TextProps {
                content: "leak".into(),
                ..Default::default()
            });
            Box::new(|| {})
        };

        let _cleanup = StrictMode::new(leaky, Profile::Development).mount(&mut scope);
        assert_eq!(doc.borrow().text_content(root), "leak\nleak");
    }
}
