//! Bootstrap error taxonomy.
//!
//! Everything here is fatal by design: the bootstrapper is a thin,
//! fail-fast sequencing point with zero local recovery. Callers propagate
//! these out of `main` and let the process die loudly.

use thiserror::Error;

use crate::i18n::I18nError;

/// Fatal startup failures.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// The host document has no element with the configured mount id.
    ///
    /// A deployment/programming error, not a runtime condition: no retry,
    /// no fallback UI, nothing was rendered.
    #[error("mount point `{id}` not found in host document")]
    MountPointNotFound { id: String },

    /// The document already has a mounted application.
    #[error("document already has a mounted application")]
    AlreadyBootstrapped,

    /// Localization initialization failed before the first render.
    #[error(transparent)]
    I18n(#[from] I18nError),
}
