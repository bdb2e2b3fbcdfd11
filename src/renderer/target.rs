//! Immediate-mode drawing surface
//!
//! Draw routines receive the target explicitly; nothing looks up a global
//! canvas.

use glam::Vec2;

/// A 2D immediate-mode drawing surface (canvas-like)
pub trait RenderTarget {
    fn clear(&mut self, width: f32, height: f32);
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: &str);
    /// Stroke a line; `dash` is an on/off pattern, `None` for solid
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: &str, dash: Option<[f32; 2]>);
    fn save(&mut self);
    fn translate(&mut self, x: f32, y: f32);
    fn rotate(&mut self, angle: f32);
    fn restore(&mut self);
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        width: f32,
        height: f32,
    },
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: String,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: String,
        dash: Option<[f32; 2]>,
    },
    Save,
    Translate(f32, f32),
    Rotate(f32),
    Restore,
}

/// Target that records commands instead of drawing (tests, headless runs)
#[derive(Debug, Default)]
pub struct RecordingTarget {
    pub commands: Vec<DrawCommand>,
}

impl RecordingTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filled rectangles of the given colour
    pub fn rects_with_color<'a>(&'a self, color: &'a str) -> impl Iterator<Item = &'a DrawCommand> + 'a {
        self.commands
            .iter()
            .filter(move |c| matches!(c, DrawCommand::FillRect { color: c, .. } if c == color))
    }

    pub fn lines_with_color<'a>(&'a self, color: &'a str) -> impl Iterator<Item = &'a DrawCommand> + 'a {
        self.commands
            .iter()
            .filter(move |c| matches!(c, DrawCommand::Line { color: c, .. } if c == color))
    }
}

impl RenderTarget for RecordingTarget {
    fn clear(&mut self, width: f32, height: f32) {
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: &str) {
        self.commands.push(DrawCommand::FillRect {
            x,
            y,
            width,
            height,
            color: color.to_string(),
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: &str, dash: Option<[f32; 2]>) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            color: color.to_string(),
            dash,
        });
    }

    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.commands.push(DrawCommand::Translate(x, y));
    }

    fn rotate(&mut self, angle: f32) {
        self.commands.push(DrawCommand::Rotate(angle));
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }
}
