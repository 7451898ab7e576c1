//! The drawing-surface contract between the simulation and the host.
//!
//! The simulation core never touches pixels directly; it emits path and
//! style commands against a [`Surface`] and finishes each frame with a
//! single [`present`](Surface::present). The trait mirrors an immediate-mode
//! 2D canvas: styles are sticky, path commands accumulate between
//! `begin_path` and `fill`/`stroke`.

use crate::color::Rgba;

/// An immediate-mode 2D drawing surface.
///
/// Object-safe so the simulation can run against any host-provided
/// implementation (`&mut dyn Surface`). Implementations decide what the
/// commands mean; [`RecordingSurface`] just logs them, a rasterizer turns
/// them into pixels.
pub trait Surface {
    /// Sets the fill color for subsequent `fill` calls.
    fn set_fill_color(&mut self, color: Rgba);

    /// Sets the stroke color for subsequent `stroke` calls.
    fn set_stroke_color(&mut self, color: Rgba);

    /// Sets the stroke width in surface units.
    fn set_line_width(&mut self, width: f64);

    /// Starts a new path, discarding any accumulated path commands.
    fn begin_path(&mut self);

    /// Moves the path cursor without drawing.
    fn move_to(&mut self, x: f64, y: f64);

    /// Adds a straight segment from the cursor to `(x, y)`.
    fn line_to(&mut self, x: f64, y: f64);

    /// Adds a full circle centered at `(x, y)`.
    fn circle(&mut self, x: f64, y: f64, radius: f64);

    /// Fills the current path with the fill color.
    fn fill(&mut self);

    /// Strokes the current path with the stroke color and width.
    fn stroke(&mut self);

    /// Closes the current path.
    fn close_path(&mut self);

    /// Commits the accumulated frame to the host.
    fn present(&mut self);
}

/// One recorded drawing command.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCommand {
    SetFillColor(Rgba),
    SetStrokeColor(Rgba),
    SetLineWidth(f64),
    BeginPath,
    MoveTo(f64, f64),
    LineTo(f64, f64),
    Circle { x: f64, y: f64, radius: f64 },
    Fill,
    Stroke,
    ClosePath,
    Present,
}

/// A [`Surface`] that records every command it receives.
///
/// Used by tests to assert on the exact draw sequence a tick produces, and
/// useful for headless inspection of what an animation would draw.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<SurfaceCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// All commands recorded so far, in order.
    pub fn commands(&self) -> &[SurfaceCommand] {
        &self.commands
    }

    /// Drops all recorded commands.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Number of `present` calls seen, i.e. completed frames.
    pub fn frames_presented(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, SurfaceCommand::Present))
            .count()
    }

    /// Number of commands matching `predicate`.
    pub fn count_matching(&self, predicate: impl Fn(&SurfaceCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| predicate(c)).count()
    }
}

impl Surface for RecordingSurface {
    fn set_fill_color(&mut self, color: Rgba) {
        self.commands.push(SurfaceCommand::SetFillColor(color));
    }

    fn set_stroke_color(&mut self, color: Rgba) {
        self.commands.push(SurfaceCommand::SetStrokeColor(color));
    }

    fn set_line_width(&mut self, width: f64) {
        self.commands.push(SurfaceCommand::SetLineWidth(width));
    }

    fn begin_path(&mut self) {
        self.commands.push(SurfaceCommand::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.commands.push(SurfaceCommand::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(SurfaceCommand::LineTo(x, y));
    }

    fn circle(&mut self, x: f64, y: f64, radius: f64) {
        self.commands.push(SurfaceCommand::Circle { x, y, radius });
    }

    fn fill(&mut self) {
        self.commands.push(SurfaceCommand::Fill);
    }

    fn stroke(&mut self) {
        self.commands.push(SurfaceCommand::Stroke);
    }

    fn close_path(&mut self) {
        self.commands.push(SurfaceCommand::ClosePath);
    }

    fn present(&mut self) {
        self.commands.push(SurfaceCommand::Present);
    }
}
