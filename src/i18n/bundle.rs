//! Message bundles - the on-disk localization resource format.
//!
//! A bundle is one locale's messages as a flat key → string map. On disk
//! it is a JSON object:
//!
//! ```json
//! {
//!   "locale": "pt-BR",
//!   "messages": {
//!     "app.title": "Meu App"
//!   }
//! }
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One locale's message catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bundle {
    /// Locale tag this bundle applies to ("en", "pt-BR", ...).
    pub locale: String,
    /// Message key → translated string.
    pub messages: HashMap<String, String>,
}

impl Bundle {
    /// Create an empty bundle for `locale`.
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            messages: HashMap::new(),
        }
    }

    /// Add a message (builder style).
    pub fn message(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.messages.insert(key.into(), value.into());
        self
    }

    /// Parse a bundle from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

// =============================================================================
// Tests
// =============================================================================
