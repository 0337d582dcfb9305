// The drawing operations the render loop needs from a 2D surface.

use crate::color::Color;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub trait Canvas {
    /// False once the underlying surface is gone; frames become no-ops.
    fn is_available(&self) -> bool {
        true
    }

    fn set_size(&mut self, width: u32, height: u32);

    /// Fills `[0, width) x [0, height)` with a left-to-right linear gradient.
    fn fill_horizontal_gradient(&mut self, width: f64, height: f64, left: Color, right: Color);

    fn set_global_alpha(&mut self, alpha: f64);

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    SetSize {
        width: u32,
        height: u32,
    },
    Gradient {
        width: f64,
        height: f64,
        left: Color,
        right: Color,
    },
    GlobalAlpha(f64),
    Circle {
        x: f64,
        y: f64,
        radius: f64,
        color: Color,
    },
}

/// Canvas that records every call instead of drawing. Clones share the same
/// command log, so a test can keep one handle after moving another into the
/// controller.
#[derive(Clone)]
pub struct RecordingCanvas {
    commands: Rc<RefCell<Vec<DrawCommand>>>,
    available: Rc<Cell<bool>>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        RecordingCanvas {
            commands: Rc::new(RefCell::new(Vec::new())),
            available: Rc::new(Cell::new(true)),
        }
    }

    pub fn commands(&self) -> Vec<DrawCommand> {
        self.commands.borrow().clone()
    }

    pub fn clear(&self) {
        self.commands.borrow_mut().clear();
    }

    pub fn set_available(&self, available: bool) {
        self.available.set(available);
    }

    fn record(&self, command: DrawCommand) {
        self.commands.borrow_mut().push(command);
    }
}

impl Default for RecordingCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas for RecordingCanvas {
    fn is_available(&self) -> bool {
        self.available.get()
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.record(DrawCommand::SetSize { width, height });
    }

    fn fill_horizontal_gradient(&mut self, width: f64, height: f64, left: Color, right: Color) {
        self.record(DrawCommand::Gradient {
            width,
            height,
            left,
            right,
        });
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.record(DrawCommand::GlobalAlpha(alpha));
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) {
        self.record(DrawCommand::Circle {
            x,
            y,
            radius,
            color,
        });
    }
}
