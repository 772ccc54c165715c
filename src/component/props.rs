//! Component props - reactive property wrappers.
//!
//! Props support static values, signals, and getters. The reactive
//! connection survives being stored in the document: pass props directly,
//! don't extract values before binding.
//!
//! ```ignore
//! // CORRECT - signal stays connected
//! scope.text(TextProps { content: PropValue::Signal(title), ..Default::default() });
//!
//! // WRONG - extracts the value, breaks reactivity
//! scope.text(TextProps { content: PropValue::Static(title.get()), ..Default::default() });
//! ```

use std::rc::Rc;

use spark_signals::Signal;

use crate::types::Attr;
use super::Scope;

// =============================================================================
// Prop Value - Reactive property wrapper
// =============================================================================

/// A property value that can be static, a signal, or a getter.
///
/// Reading the value inside an effect tracks the underlying signal (or
/// whatever signals a getter reads), so renders stay reactive.
#[derive(Clone)]
pub enum PropValue<T: Clone + PartialEq + 'static> {
    /// Static value (not reactive).
    Static(T),
    /// Reactive signal (changes propagate automatically).
    Signal(Signal<T>),
    /// Getter function (called each time the value is needed).
    Getter(Rc<dyn Fn() -> T>),
}

impl<T: Clone + PartialEq + 'static> PropValue<T> {
    /// Get the current value.
    pub fn get(&self) -> T {
        match self {
            PropValue::Static(v) => v.clone(),
            PropValue::Signal(s) => s.get(),
            PropValue::Getter(f) => f(),
        }
    }
}

impl<T: Clone + PartialEq + Default + 'static> Default for PropValue<T> {
    fn default() -> Self {
        PropValue::Static(T::default())
    }
}

impl<T: Clone + PartialEq + 'static> From<T> for PropValue<T> {
    fn from(value: T) -> Self {
        PropValue::Static(value)
    }
}

impl<T: Clone + PartialEq + 'static> From<Signal<T>> for PropValue<T> {
    fn from(signal: Signal<T>) -> Self {
        PropValue::Signal(signal)
    }
}

impl From<&str> for PropValue<String> {
    fn from(value: &str) -> Self {
        PropValue::Static(value.to_string())
    }
}

// =============================================================================
// Text Props
// =============================================================================

/// Properties for the text primitive.
///
/// Text is a display leaf - it cannot have children.
#[derive(Default)]
pub struct TextProps {
    /// Optional node id for lookup.
    pub id: Option<String>,

    /// The text content to display.
    pub content: PropValue<String>,

    /// Whether the node is visible (default: true).
    pub visible: Option<PropValue<bool>>,

    /// Text attributes (bold, italic, etc.).
    pub attrs: Option<PropValue<Attr>>,
}

// =============================================================================
// Block Props
// =============================================================================

/// Properties for the block primitive.
///
/// Block is the container - it groups children and contributes no output
/// of its own.
#[derive(Default)]
pub struct BlockProps {
    /// Optional node id for lookup.
    pub id: Option<String>,

    /// Whether the node is visible (default: true).
    pub visible: Option<PropValue<bool>>,

    /// Child render function, run with the block as the current parent.
    pub children: Option<Box<dyn FnOnce(&mut Scope)>>,
}

// =============================================================================
// Tests
// =============================================================================
