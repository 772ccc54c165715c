//! # ember-shell
//!
//! Application shell and bootstrap layer for reactive terminal UIs.
//!
//! Built on [spark-signals](https://crates.io/crates/spark-signals) for
//! fine-grained reactivity.
//!
//! ## Architecture
//!
//! The shell owns process startup and nothing else. Applications provide a
//! root [`Component`]; the shell sequences localization init strictly
//! before the first render, resolves the mount point in the host
//! [`Document`] by its well-known id, and issues exactly one render call
//! wrapped in [`StrictMode`]:
//!
//! ```text
//! Localizer::init → element_by_id("root") → StrictMode(App).mount → render effect
//! ```
//!
//! From there the render effect repaints reactively: any signal bound into
//! the tree, any structural mutation, and any locale switch re-composes the
//! frame and presents it to the configured [`Surface`].
//!
//! ## Example
//!
//! ```ignore
//! use ember_shell::{bootstrap, AppConfig, Document, Localizer, Locale, TextProps};
//!
//! let document = Document::with_root_element("root").into_shared();
//! let localizer = Localizer::new(Locale::new("en"))
//!     .with_resource_dir("locales")
//!     .into_shared();
//!
//! let app = |scope: &mut ember_shell::Scope| -> ember_shell::Cleanup {
//!     scope.text(TextProps {
//!         content: scope.localized("app.title"),
//!         ..Default::default()
//!     })
//! };
//!
//! let surface = ember_shell::TerminalSurface::new()?;
//! let handle = bootstrap(&document, &localizer, app, surface, &AppConfig::default())?;
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Core types (NodeId, Profile, Attr)
//! - [`host`] - Host document the application mounts into
//! - [`i18n`] - Localization service, initialized before first render
//! - [`component`] - Component model and render scope
//! - [`strict`] - Development-only mount integrity checking
//! - [`render`] - Frame composition and paint surfaces
//! - [`app`] - The bootstrapper

pub mod app;
pub mod component;
pub mod host;
pub mod i18n;
pub mod render;
pub mod strict;
pub mod types;

// Re-export commonly used items
pub use types::{Attr, NodeId, Profile};

pub use host::{Document, NodeKind};

pub use i18n::{Bundle, I18nError, Locale, Localizer};

pub use component::{
    props::{BlockProps, PropValue, TextProps},
    Cleanup, Component, Scope,
};

pub use strict::StrictMode;

pub use render::{BufferSurface, Frame, Line, Surface, TerminalSurface};

pub use app::{bootstrap, AppConfig, AppHandle, BootstrapError, DEFAULT_MOUNT_ID};
