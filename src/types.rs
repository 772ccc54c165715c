//! Core types for ember-shell.
//!
//! These types are shared by every layer: the host document, the component
//! model, and the renderer.

// =============================================================================
// NodeId - Handle into the host document
// =============================================================================

/// Handle to a node in the host [`Document`](crate::host::Document).
///
/// NodeIds are arena indices. Removing a subtree returns its indices to a
/// free pool, so a stale NodeId may later refer to a different node - hold
/// on to ids only while the node is known to be alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The raw arena index.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

// =============================================================================
// Profile - Build profile gate
// =============================================================================

/// Build profile controlling development-only behavior.
///
/// Selected explicitly at configuration time - never sniffed from the
/// environment. The only consumer today is [`StrictMode`](crate::strict::StrictMode),
/// which double-invokes root mounts under `Development`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Profile {
    /// Development build: integrity checks enabled.
    Development,
    /// Production build: all development-only wrappers are passthroughs.
    #[default]
    Production,
}

impl Profile {
    /// Check if development-only checks are active.
    #[inline]
    pub fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }
}

// =============================================================================
// Text Attributes (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Text attributes as a bitfield for efficient storage and comparison.
    ///
    /// Combine with bitwise OR: `Attr::BOLD | Attr::ITALIC`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Attr: u8 {
        const NONE = 0;
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const ITALIC = 1 << 2;
        const UNDERLINE = 1 << 3;
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_default_is_production() {
        assert_eq!(Profile::default(), Profile::Production);
        assert!(!Profile::default().is_development());
        assert!(Profile::Development.is_development());
    }

    #[test]
    fn test_attr_combination() {
        let attrs = Attr::BOLD | Attr::UNDERLINE;
        assert!(attrs.contains(Attr::BOLD));
        assert!(attrs.contains(Attr::UNDERLINE));
        assert!(!attrs.contains(Attr::ITALIC));
        assert_eq!(Attr::default(), Attr::NONE);
    }

    #[test]
    fn test_node_id_index() {
        let id = NodeId(7);
        assert_eq!(id.index(), 7);
    }
}
