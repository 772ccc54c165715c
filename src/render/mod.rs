//! Rendering subsystem - frame composition and paint surfaces.
//!
//! The pipeline is deliberately small:
//!
//! ```text
//! Document subtree → Frame::compose → Surface::present
//! ```
//!
//! The bootstrapper wires these together inside a render effect; composing
//! reads reactive state, so presentation re-runs whenever the mounted tree,
//! its bound signals, or the active locale change.

mod frame;
mod surface;

pub use frame::{Frame, Line};
pub use surface::{BufferSurface, Surface, TerminalSurface};
