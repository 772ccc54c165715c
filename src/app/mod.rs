//! Application bootstrapper - process startup sequencing.
//!
//! [`bootstrap`] is the shell's single entry point. It sequences startup so
//! that localization is initialized strictly before the first render, then
//! hands control to the rendering subsystem exactly once:
//!
//! 1. Initialize the localization service (translated strings must be
//!    available during the root component's first mount).
//! 2. Resolve the mount point by id - absence is fatal, nothing renders.
//! 3. Mount the root component, wrapped in [`StrictMode`], under the mount
//!    node, and install the render effect.
//!
//! The call returns immediately after the first frame is flushed; from then
//! on the mount node belongs to the rendering subsystem, which repaints
//! reactively as signals, the tree, or the active locale change.

mod config;
mod error;

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use spark_signals::{effect, flush_sync};
use tracing::{debug, error, info, warn};

use crate::component::{Cleanup, Component, Scope};
use crate::host::Document;
use crate::i18n::Localizer;
use crate::render::{Frame, Surface};
use crate::strict::StrictMode;
use crate::types::NodeId;

pub use config::{AppConfig, DEFAULT_MOUNT_ID};
pub use error::BootstrapError;

// =============================================================================
// App Handle
// =============================================================================

/// Handle returned by [`bootstrap`].
///
/// Holds the root cleanup, the render-effect stop function and the running
/// flag. Dropping the handle stops repainting; [`unmount`](Self::unmount)
/// additionally removes the mounted subtree and releases the document's
/// bootstrap guard.
pub struct AppHandle {
    cleanup: Option<Cleanup>,
    stop_effect: Option<Box<dyn FnOnce()>>,
    running: Arc<AtomicBool>,
    document: Rc<RefCell<Document>>,
    mount: NodeId,
}

impl std::fmt::Debug for AppHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppHandle")
            .field("running", &self.running.load(Ordering::SeqCst))
            .field("mount", &self.mount)
            .finish_non_exhaustive()
    }
}

impl AppHandle {
    /// The resolved mount point.
    pub fn mount_point(&self) -> NodeId {
        self.mount
    }

    /// Check if the render effect is still live.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Stop repainting without tearing the tree down.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Tear the application down: stop the render effect, remove the
    /// mounted subtree, release the bootstrap guard.
    pub fn unmount(mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(stop) = self.stop_effect.take() {
            stop();
        }
        if let Some(cleanup) = self.cleanup.take() {
            cleanup();
        }
        self.document.borrow_mut().release_bootstrap();
        debug!("application unmounted");
    }
}

impl Drop for AppHandle {
    fn drop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(stop) = self.stop_effect.take() {
            stop();
        }
    }
}

// =============================================================================
// Bootstrap
// =============================================================================

/// Bootstrap the application into `document`.
///
/// Fails fatally if localization cannot initialize, if the mount point is
/// missing, or if the document already hosts an application. On the failure
/// path nothing has been rendered.
pub fn bootstrap<C, S>(
    document: &Rc<RefCell<Document>>,
    localizer: &Rc<RefCell<Localizer>>,
    root: C,
    surface: S,
    config: &AppConfig,
) -> Result<AppHandle, BootstrapError>
where
    C: Component,
    S: Surface + 'static,
{
    // Step A: localization, sequenced strictly before any render.
    {
        let mut i18n = localizer.borrow_mut();
        if let Some(dir) = &config.resource_dir {
            i18n.set_resource_dir(dir.clone());
        }
        i18n.init()?;
        if let Some(locale) = &config.locale {
            i18n.set_locale(locale.clone());
        }
    }

    // Step B: resolve the mount point.
    let mount = document
        .borrow()
        .element_by_id(&config.mount_id)
        .ok_or_else(|| {
            error!(id = %config.mount_id, "mount point not found in host document");
            BootstrapError::MountPointNotFound {
                id: config.mount_id.clone(),
            }
        })?;

    // Single-invocation guard, acquired before anything renders.
    if !document.borrow_mut().acquire_bootstrap() {
        error!("bootstrap called on an already-mounted document");
        return Err(BootstrapError::AlreadyBootstrapped);
    }

    // Step C: one render call, strict wrapper around the root.
    let mut scope = Scope::new(document.clone(), localizer.clone(), mount);
    let cleanup = StrictMode::new(root, config.profile).mount(&mut scope);

    // Install the render effect. Composing reads the document revision and
    // every bound prop, so repaints happen on any reactive change.
    let running = Arc::new(AtomicBool::new(true));
    let running_effect = running.clone();
    let document_effect = document.clone();
    let width = surface.width();
    let mut surface = surface;

    let stop = effect(move || {
        if !running_effect.load(Ordering::SeqCst) {
            return;
        }
        let frame = {
            let doc = document_effect.borrow();
            Frame::compose(&doc, mount, width)
        };
        if let Err(err) = surface.present(&frame) {
            warn!(%err, "failed to present frame");
        }
    });
    // Paint the first frame before handing the handle back.
    flush_sync();

    info!(mount_id = %config.mount_id, profile = ?config.profile, "application mounted");

    Ok(AppHandle {
        cleanup: Some(cleanup),
        stop_effect: Some(Box::new(stop)),
        running,
        document: document.clone(),
        mount,
    })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::props::TextProps;
    use crate::i18n::{Bundle, Locale};
    use crate::render::BufferSurface;
    use crate::types::Profile;
    use std::cell::Cell;

    fn host() -> (Rc<RefCell<Document>>, Rc<RefCell<Localizer>>) {
        let doc = Document::with_root_element("root").into_shared();
        let mut i18n = Localizer::new(Locale::new("en"));
        i18n.add_bundle(Bundle::new("en").message("app.title", "My App"));
        i18n.add_bundle(Bundle::new("pt-BR").message("app.title", "Meu App"));
        (doc, Rc::new(RefCell::new(i18n)))
    }

    /// Root component rendering the localized application title.
    fn title_app(scope: &mut Scope) -> Cleanup {
        scope.text(TextProps {
            id: Some("title".to_string()),
            content: scope.localized("app.title"),
            ..Default::default()
        })
    }

    #[test]
    fn test_localization_complete_before_first_render() {
        // The lookup during the first mount must return the localized
        // message, never the raw key - raw keys mean init was skipped.
        let (doc, i18n) = host();
        assert!(!i18n.borrow().is_initialized());

        let surface = BufferSurface::new(80);
        let output = surface.clone();

        let handle =
            bootstrap(&doc, &i18n, title_app, surface, &AppConfig::default()).unwrap();

        assert!(i18n.borrow().is_initialized());
        assert_eq!(output.text(), "My App");
        assert!(!output.text().contains("app.title"));
        drop(handle);
    }

    #[test]
    fn test_mounted_subtree_lives_under_mount_point() {
        let (doc, i18n) = host();
        let handle = bootstrap(
            &doc,
            &i18n,
            title_app,
            BufferSurface::new(80),
            &AppConfig::default(),
        )
        .unwrap();

        let d = doc.borrow();
        let root = d.element_by_id("root").unwrap();
        let title = d.element_by_id("title").unwrap();
        assert_eq!(handle.mount_point(), root);
        assert_eq!(d.parent(title), Some(root));
        assert_eq!(d.text_content(root), "My App");
    }

    #[test]
    fn test_missing_mount_point_is_fatal_and_renders_nothing() {
        let doc = Document::new().into_shared(); // no "root" element
        let i18n = Rc::new(RefCell::new(Localizer::new(Locale::new("en"))));
        let mounts = Rc::new(Cell::new(0));
        let mounts_clone = mounts.clone();

        let surface = BufferSurface::new(80);
        let output = surface.clone();
        let app = move |scope: &mut Scope| -> Cleanup {
            mounts_clone.set(mounts_clone.get() + 1);
            scope.text(TextProps {
                content: "never".into(),
                ..Default::default()
            })
        };

        let err = bootstrap(&doc, &i18n, app, surface, &AppConfig::default()).unwrap_err();
        assert!(matches!(err, BootstrapError::MountPointNotFound { ref id } if id == "root"));
        assert_eq!(mounts.get(), 0);
        assert_eq!(output.text(), "");
        assert!(!doc.borrow().is_bootstrapped());
    }

    #[test]
    fn test_second_bootstrap_rejected_no_duplicate_mount() {
        let (doc, i18n) = host();
        let handle = bootstrap(
            &doc,
            &i18n,
            title_app,
            BufferSurface::new(80),
            &AppConfig::default(),
        )
        .unwrap();

        let root = doc.borrow().element_by_id("root").unwrap();
        let size_after_first = doc.borrow().subtree_size(root);

        let err = bootstrap(
            &doc,
            &i18n,
            title_app,
            BufferSurface::new(80),
            &AppConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, BootstrapError::AlreadyBootstrapped));
        assert_eq!(doc.borrow().subtree_size(root), size_after_first);

        // Unmount releases the guard; a fresh bootstrap is allowed again.
        handle.unmount();
        assert_eq!(doc.borrow().subtree_size(root), 1);
        let handle = bootstrap(
            &doc,
            &i18n,
            title_app,
            BufferSurface::new(80),
            &AppConfig::default(),
        )
        .unwrap();
        assert_eq!(doc.borrow().subtree_size(root), 2);
        drop(handle);
    }

    #[test]
    fn test_strict_wrapper_output_identical_across_profiles() {
        let render = |profile: Profile| {
            let (doc, i18n) = host();
            let surface = BufferSurface::new(80);
            let output = surface.clone();
            let config = AppConfig::default().with_profile(profile);
            let _handle = bootstrap(&doc, &i18n, title_app, surface, &config).unwrap();
            output.text()
        };

        assert_eq!(render(Profile::Development), render(Profile::Production));
    }

    #[test]
    fn test_development_profile_double_invokes_root() {
        let (doc, i18n) = host();
        let mounts = Rc::new(Cell::new(0));
        let mounts_clone = mounts.clone();

        let app = move |scope: &mut Scope| -> Cleanup {
            mounts_clone.set(mounts_clone.get() + 1);
            scope.text(TextProps {
                content: "x".into(),
                ..Default::default()
            })
        };

        let config = AppConfig::default().with_profile(Profile::Development);
        let _handle =
            bootstrap(&doc, &i18n, app, BufferSurface::new(80), &config).unwrap();
        assert_eq!(mounts.get(), 2);
    }

    #[test]
    fn test_locale_override_and_reactive_repaint() {
        let (doc, i18n) = host();
        let surface = BufferSurface::new(80);
        let output = surface.clone();

        let config = AppConfig::default().with_locale(Locale::with_region("pt", "BR"));
        let _handle = bootstrap(&doc, &i18n, title_app, surface, &config).unwrap();
        assert_eq!(output.text(), "Meu App");

        // Locale switch repaints through the render effect.
        i18n.borrow().set_locale(Locale::new("en"));
        flush_sync();
        assert_eq!(output.text(), "My App");
    }

    #[test]
    fn test_unmount_stops_repainting() {
        let (doc, i18n) = host();
        let surface = BufferSurface::new(80);
        let output = surface.clone();

        let handle = bootstrap(
            &doc,
            &i18n,
            title_app,
            surface,
            &AppConfig::default(),
        )
        .unwrap();
        assert!(handle.is_running());

        handle.unmount();
        let painted_at_unmount = output.text();

        // Mutations after unmount no longer reach the surface.
        let extra = doc
            .borrow_mut()
            .create_text("late".into());
        let root = doc.borrow().element_by_id("root").unwrap();
        doc.borrow_mut().append_child(root, extra);
        flush_sync();
        assert_eq!(output.text(), painted_at_unmount);
    }
}
