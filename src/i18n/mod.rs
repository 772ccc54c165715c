//! Localization service.
//!
//! An explicitly constructed, explicitly initialized service with a
//! lifecycle tied to process start: the bootstrapper calls [`Localizer::init`]
//! before the first render, so translated strings are available during the
//! root component's first mount. It is passed by handle to whatever needs
//! it - there is no ambient global to sniff.
//!
//! Lookup walks a fallback chain: exact locale → language only → default
//! locale → the raw key itself. The active locale is a signal, so effects
//! that translate through [`Localizer::t`] re-run on locale change.

mod bundle;

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use spark_signals::{signal, Signal};
use thiserror::Error;
use tracing::{debug, info, warn};

pub use bundle::Bundle;

// =============================================================================
// Errors
// =============================================================================

/// Localization failures. All fatal at bootstrap time - the shell performs
/// no recovery on behalf of the application.
#[derive(Debug, Error)]
pub enum I18nError {
    /// The configured resource directory does not exist.
    #[error("localization resource directory `{0}` does not exist")]
    ResourceDirMissing(PathBuf),

    /// A bundle file could not be read.
    #[error("failed to read bundle file `{path}`")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A bundle file is not valid bundle JSON.
    #[error("failed to parse bundle file `{path}`")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A locale tag could not be parsed.
    #[error("invalid locale tag `{0}`")]
    InvalidTag(String),
}

// =============================================================================
// Locale
// =============================================================================

/// A locale: language plus optional region, as in `"en"` or `"pt-BR"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    language: String,
    region: Option<String>,
}

impl Locale {
    /// Language-only locale. The language is lowercased.
    pub fn new(language: &str) -> Self {
        Self {
            language: language.to_ascii_lowercase(),
            region: None,
        }
    }

    /// Locale with a region. Language lowercased, region uppercased.
    pub fn with_region(language: &str, region: &str) -> Self {
        Self {
            language: language.to_ascii_lowercase(),
            region: Some(region.to_ascii_uppercase()),
        }
    }

    /// Parse a tag such as `"en"`, `"pt-BR"` or `"pt_BR"`.
    pub fn parse(tag: &str) -> Result<Self, I18nError> {
        let mut parts = tag.split(['-', '_']);
        let language = parts.next().unwrap_or_default();
        let region = parts.next();
        let valid = !language.is_empty()
            && language.chars().all(|c| c.is_ascii_alphabetic())
            && region.is_none_or(|r| !r.is_empty() && r.chars().all(|c| c.is_ascii_alphanumeric()))
            && parts.next().is_none();
        if !valid {
            return Err(I18nError::InvalidTag(tag.to_string()));
        }
        Ok(match region {
            Some(region) => Self::with_region(language, region),
            None => Self::new(language),
        })
    }

    /// The language subtag.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// The region subtag, if any.
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// This locale with the region stripped.
    pub fn language_only(&self) -> Locale {
        Self {
            language: self.language.clone(),
            region: None,
        }
    }

    /// Canonical tag form: `"en"` or `"pt-BR"`.
    pub fn tag(&self) -> String {
        match &self.region {
            Some(region) => format!("{}-{}", self.language, region),
            None => self.language.clone(),
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.tag())
    }
}

impl std::str::FromStr for Locale {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// =============================================================================
// Localizer
// =============================================================================

/// The localization service.
pub struct Localizer {
    default_locale: Locale,
    active: Signal<Locale>,
    bundles: HashMap<String, HashMap<String, String>>,
    resource_dir: Option<PathBuf>,
    initialized: bool,
}

impl Localizer {
    /// Create a localizer whose fallback-of-last-resort is `default_locale`.
    ///
    /// The active locale starts as the default.
    pub fn new(default_locale: Locale) -> Self {
        Self {
            active: signal(default_locale.clone()),
            default_locale,
            bundles: HashMap::new(),
            resource_dir: None,
            initialized: false,
        }
    }

    /// Configure a directory of `*.json` bundle files to load at init.
    pub fn with_resource_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.resource_dir = Some(dir.into());
        self
    }

    /// Replace the resource directory.
    pub fn set_resource_dir(&mut self, dir: impl Into<PathBuf>) {
        self.resource_dir = Some(dir.into());
    }

    /// Wrap the service for sharing with scopes and render effects.
    pub fn into_shared(self) -> std::rc::Rc<std::cell::RefCell<Self>> {
        std::rc::Rc::new(std::cell::RefCell::new(self))
    }

    /// Register a bundle. Messages merge into any existing bundle for the
    /// same locale, newest winning on key collisions.
    pub fn add_bundle(&mut self, bundle: Bundle) {
        debug!(locale = %bundle.locale, messages = bundle.messages.len(), "registering bundle");
        self.bundles
            .entry(bundle.locale)
            .or_default()
            .extend(bundle.messages);
    }

    /// Initialize the service: load the resource directory (if configured)
    /// and mark translations available.
    ///
    /// Idempotent - a second call returns without re-loading. Lookups made
    /// before init return the raw key, which is how the bootstrap ordering
    /// guarantee stays observable.
    pub fn init(&mut self) -> Result<(), I18nError> {
        if self.initialized {
            return Ok(());
        }
        if let Some(dir) = self.resource_dir.clone() {
            self.load_dir(&dir)?;
        }
        self.initialized = true;
        info!(
            default_locale = %self.default_locale,
            locales = self.bundles.len(),
            "localization initialized"
        );
        Ok(())
    }

    /// Load every `*.json` bundle file in `dir`.
    pub fn load_dir(&mut self, dir: &PathBuf) -> Result<(), I18nError> {
        if !dir.is_dir() {
            return Err(I18nError::ResourceDirMissing(dir.clone()));
        }
        let entries = fs::read_dir(dir).map_err(|source| I18nError::Read {
            path: dir.clone(),
            source,
        })?;
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let json = fs::read_to_string(&path).map_err(|source| I18nError::Read {
                path: path.clone(),
                source,
            })?;
            let bundle = Bundle::from_json(&json).map_err(|source| I18nError::Parse {
                path: path.clone(),
                source,
            })?;
            self.add_bundle(bundle);
        }
        Ok(())
    }

    /// Whether [`init`](Self::init) has completed.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// The active locale. Reading it inside an effect creates a dependency.
    pub fn locale(&self) -> Locale {
        self.active.get()
    }

    /// The fallback-of-last-resort locale.
    pub fn default_locale(&self) -> &Locale {
        &self.default_locale
    }

    /// Switch the active locale. Effects that translate re-run.
    pub fn set_locale(&self, locale: Locale) {
        debug!(locale = %locale, "switching locale");
        self.active.set(locale);
    }

    /// Translate `key` for the active locale.
    ///
    /// Fallback chain: exact locale → language only → default locale → the
    /// raw key. Before init every lookup returns the raw key.
    pub fn t(&self, key: &str) -> String {
        let locale = self.active.get();
        if !self.initialized {
            warn!(key, "translation lookup before init, returning raw key");
            return key.to_string();
        }

        self.message(&locale.tag(), key)
            .or_else(|| self.message(locale.language(), key))
            .or_else(|| self.message(&self.default_locale.tag(), key))
            .map(str::to_string)
            .unwrap_or_else(|| key.to_string())
    }

    fn message(&self, tag: &str, key: &str) -> Option<&str> {
        self.bundles.get(tag)?.get(key).map(String::as_str)
    }
}

// =============================================================================
// Tests
// =============================================================================
