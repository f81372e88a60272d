//! Immediate-mode 2D drawing abstraction.

use glam::Vec2;

use crate::state::Viewport;
use crate::theme::Rgba;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Rgba,
    pub width: f32,
}

/// The three primitives the backdrop needs from a 2D canvas.
pub trait Surface {
    fn clear(&mut self, viewport: Viewport);
    fn line(&mut self, from: Vec2, to: Vec2, stroke: Stroke);
    fn disc(&mut self, center: Vec2, radius: f32, fill: Rgba);
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn clear(&mut self, viewport: Viewport) {
        (**self).clear(viewport)
    }
    fn line(&mut self, from: Vec2, to: Vec2, stroke: Stroke) {
        (**self).line(from, to, stroke)
    }
    fn disc(&mut self, center: Vec2, radius: f32, fill: Rgba) {
        (**self).disc(center, radius, fill)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Viewport),
    Line { from: Vec2, to: Vec2, stroke: Stroke },
    Disc { center: Vec2, radius: f32, fill: Rgba },
}

/// Surface that records the commands of the most recent frame.
///
/// `clear` starts a new frame, so memory stays bounded by one frame's worth
/// of commands.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    frames: u64,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of `clear` calls seen so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn lines(&self) -> impl Iterator<Item = (Vec2, Vec2, Stroke)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Line { from, to, stroke } => Some((*from, *to, *stroke)),
            _ => None,
        })
    }

    pub fn discs(&self) -> impl Iterator<Item = (Vec2, f32, Rgba)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Disc {
                center,
                radius,
                fill,
            } => Some((*center, *radius, *fill)),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, viewport: Viewport) {
        self.commands.clear();
        self.frames += 1;
        self.commands.push(DrawCommand::Clear(viewport));
    }

    fn line(&mut self, from: Vec2, to: Vec2, stroke: Stroke) {
        self.commands.push(DrawCommand::Line { from, to, stroke });
    }

    fn disc(&mut self, center: Vec2, radius: f32, fill: Rgba) {
        self.commands.push(DrawCommand::Disc {
            center,
            radius,
            fill,
        });
    }
}
