//! Surfaces - where composed frames get painted.
//!
//! [`TerminalSurface`] paints to stdout through crossterm with line-level
//! diffing: the previous frame is kept and only changed lines are
//! rewritten, so reactive repaints stay cheap and flicker-free.
//! [`BufferSurface`] collects lines in memory for tests and headless runs.

use std::cell::RefCell;
use std::io::{self, Stdout, Write};
use std::rc::Rc;

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{self, Clear, ClearType};

use crate::types::Attr;
use super::frame::{Frame, Line};

// =============================================================================
// Surface Trait
// =============================================================================

/// A paint target for composed frames.
pub trait Surface {
    /// Width in terminal cells frames should be composed for.
    fn width(&self) -> u16;

    /// Paint a frame. Implementations own their own diffing.
    fn present(&mut self, frame: &Frame) -> io::Result<()>;
}

// =============================================================================
// Terminal Surface
// =============================================================================

/// Crossterm-backed surface with line-diff repainting.
pub struct TerminalSurface {
    out: Stdout,
    width: u16,
    previous: Option<Frame>,
}

impl TerminalSurface {
    /// Create a surface sized to the current terminal.
    pub fn new() -> io::Result<Self> {
        let (width, _height) = terminal::size()?;
        Ok(Self::with_width(width))
    }

    /// Create a surface with a fixed width.
    pub fn with_width(width: u16) -> Self {
        Self {
            out: io::stdout(),
            width,
            previous: None,
        }
    }

    /// Drop the previous frame so the next present repaints every line.
    ///
    /// Use after a resize or when the screen may be corrupted.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    /// Check if there is a previous frame to diff against.
    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    fn paint_line(&mut self, y: u16, line: Option<&Line>) -> io::Result<()> {
        queue!(self.out, MoveTo(0, y), Clear(ClearType::UntilNewLine))?;
        let Some(line) = line else {
            return Ok(());
        };
        if line.attrs.contains(Attr::BOLD) {
            queue!(self.out, SetAttribute(Attribute::Bold))?;
        }
        if line.attrs.contains(Attr::DIM) {
            queue!(self.out, SetAttribute(Attribute::Dim))?;
        }
        if line.attrs.contains(Attr::ITALIC) {
            queue!(self.out, SetAttribute(Attribute::Italic))?;
        }
        if line.attrs.contains(Attr::UNDERLINE) {
            queue!(self.out, SetAttribute(Attribute::Underlined))?;
        }
        queue!(self.out, Print(&line.text))?;
        if !line.attrs.is_empty() {
            queue!(self.out, SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }
}

impl Surface for TerminalSurface {
    fn width(&self) -> u16 {
        self.width
    }

    fn present(&mut self, frame: &Frame) -> io::Result<()> {
        let previous = self.previous.take();
        let prev_lines: &[Line] = previous.as_ref().map(Frame::lines).unwrap_or(&[]);

        let rows = frame.lines().len().max(prev_lines.len());
        let mut changed = false;
        for y in 0..rows {
            let new = frame.lines().get(y);
            let old = prev_lines.get(y);
            if new != old {
                changed = true;
                self.paint_line(y as u16, new)?;
            }
        }

        if changed {
            self.out.flush()?;
        }
        self.previous = Some(frame.clone());
        Ok(())
    }
}

// =============================================================================
// Buffer Surface
// =============================================================================

/// In-memory surface for tests and headless runs.
///
/// Clones share the same buffer, so keep one clone to inspect output after
/// handing the surface to the bootstrapper.
#[derive(Clone)]
pub struct BufferSurface {
    width: u16,
    lines: Rc<RefCell<Vec<String>>>,
}

impl BufferSurface {
    /// Create a buffer surface of the given width.
    pub fn new(width: u16) -> Self {
        Self {
            width,
            lines: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// The lines of the last presented frame.
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    /// The last presented frame as one newline-joined string.
    pub fn text(&self) -> String {
        self.lines.borrow().join("\n")
    }
}

impl Surface for BufferSurface {
    fn width(&self) -> u16 {
        self.width
    }

    fn present(&mut self, frame: &Frame) -> io::Result<()> {
        *self.lines.borrow_mut() = frame.lines().iter().map(|l| l.text.clone()).collect();
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::props::PropValue;
    use crate::host::Document;

    #[test]
    fn test_buffer_surface_shares_output_across_clones() {
        let mut doc = Document::with_root_element("root");
        let root = doc.element_by_id("root").unwrap();
        let node = doc.create_text(PropValue::Static("painted".to_string()));
        doc.append_child(root, node);

        let mut surface = BufferSurface::new(80);
        let inspector = surface.clone();

        let frame = Frame::compose(&doc, root, surface.width());
        surface.present(&frame).unwrap();

        assert_eq!(inspector.lines(), vec!["painted".to_string()]);
        assert_eq!(inspector.text(), "painted");
    }

    #[test]
    fn test_buffer_surface_replaces_previous_frame() {
        let mut surface = BufferSurface::new(10);
        let inspector = surface.clone();

        let mut doc = Document::new();
        let root = doc.create_element(None);
        let node = doc.create_text(PropValue::Static("one".to_string()));
        doc.append_child(root, node);
        surface.present(&Frame::compose(&doc, root, 10)).unwrap();

        doc.set_text(node, PropValue::Static("two".to_string()));
        surface.present(&Frame::compose(&doc, root, 10)).unwrap();
        assert_eq!(inspector.text(), "two");
    }

    #[test]
    fn test_terminal_surface_invalidate() {
        let mut surface = TerminalSurface::with_width(80);
        assert_eq!(surface.width(), 80);
        assert!(!surface.has_previous());

        // Can't paint without a terminal; exercise the previous-frame state.
        surface.previous = Some(Frame::empty(80));
        assert!(surface.has_previous());
        surface.invalidate();
        assert!(!surface.has_previous());
    }
}
