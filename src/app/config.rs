//! Bootstrap configuration.
//!
//! Everything the bootstrapper varies on is an explicit value here - the
//! mount id, the build profile gating strict mode, and optional
//! localization overrides. Nothing is read from the environment.

use std::path::PathBuf;

use crate::i18n::Locale;
use crate::types::Profile;

/// The conventional mount point id.
pub const DEFAULT_MOUNT_ID: &str = "root";

/// Configuration for [`bootstrap`](crate::app::bootstrap).
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Id of the element to mount into (default: `"root"`).
    pub mount_id: String,

    /// Build profile. `Development` enables the strict wrapper's double
    /// invocation; `Production` makes it a passthrough.
    pub profile: Profile,

    /// Locale to activate after localization init, overriding the
    /// localizer's default.
    pub locale: Option<Locale>,

    /// Directory of `*.json` bundle files to load during init.
    pub resource_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mount_id: DEFAULT_MOUNT_ID.to_string(),
            profile: Profile::default(),
            locale: None,
            resource_dir: None,
        }
    }
}

impl AppConfig {
    /// Production config with the conventional `"root"` mount id.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the mount id.
    pub fn with_mount_id(mut self, id: impl Into<String>) -> Self {
        self.mount_id = id.into();
        self
    }

    /// Set the build profile.
    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    /// Override the active locale.
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = Some(locale);
        self
    }

    /// Load bundles from `dir` during init.
    pub fn with_resource_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.resource_dir = Some(dir.into());
        self
    }
}
