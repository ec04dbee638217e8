//! Render hooks
//!
//! The simulation never draws directly. Entities describe themselves to a
//! `Canvas`, which a presentation layer backs with whatever graphics API it
//! likes. `DrawList` is the built-in canvas: it just records the calls, which
//! is what tests and the headless binary use.

pub mod entity;
pub mod hud;
pub mod shapes;

pub use entity::{Entity, draw_arena};
pub use hud::{draw_boss_hud, draw_death_overlay, draw_player_hud};

use glam::Vec2;
use serde::Serialize;

use crate::sim::Aabb;

/// Linear RGBA, each channel 0 to 1
pub type Color = [f32; 4];

/// Drawing surface the simulation renders into
pub trait Canvas {
    /// Named image stretched over `rect`, optionally mirrored and tinted
    fn sprite(&mut self, name: &str, rect: Aabb, flip_x: bool, alpha: f32, tint: Option<Color>);
    fn circle(&mut self, center: Vec2, radius: f32, color: Color);
    /// Horizontal meter filled left to right by `fill` (0 to 1)
    fn bar(&mut self, rect: Aabb, fill: f32, fg: Color, bg: Color);
    /// Text centered on `pos`
    fn text(&mut self, pos: Vec2, size: f32, text: &str, color: Color);
    /// Full-screen wash
    fn overlay(&mut self, color: Color);
}

/// One recorded canvas call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawCmd {
    Sprite {
        name: String,
        rect: Aabb,
        flip_x: bool,
        alpha: f32,
        tint: Option<Color>,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Bar {
        rect: Aabb,
        fill: f32,
        fg: Color,
        bg: Color,
    },
    Text {
        pos: Vec2,
        size: f32,
        text: String,
        color: Color,
    },
    Overlay {
        color: Color,
    },
}

/// Canvas that records every call in order
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub cmds: Vec<DrawCmd>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    pub fn clear(&mut self) {
        self.cmds.clear();
    }

    /// How many sprites named `name` were drawn
    pub fn sprites_named(&self, name: &str) -> usize {
        self.cmds
            .iter()
            .filter(|c| matches!(c, DrawCmd::Sprite { name: n, .. } if n == name))
            .count()
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.cmds.iter().filter_map(|c| match c {
            DrawCmd::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Canvas for DrawList {
    fn sprite(&mut self, name: &str, rect: Aabb, flip_x: bool, alpha: f32, tint: Option<Color>) {
        self.cmds.push(DrawCmd::Sprite {
            name: name.to_string(),
            rect,
            flip_x,
            alpha,
            tint,
        });
    }

    fn circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.cmds.push(DrawCmd::Circle { center, radius, color });
    }

    fn bar(&mut self, rect: Aabb, fill: f32, fg: Color, bg: Color) {
        self.cmds.push(DrawCmd::Bar {
            rect,
            fill: fill.clamp(0.0, 1.0),
            fg,
            bg,
        });
    }

    fn text(&mut self, pos: Vec2, size: f32, text: &str, color: Color) {
        self.cmds.push(DrawCmd::Text {
            pos,
            size,
            text: text.to_string(),
            color,
        });
    }

    fn overlay(&mut self, color: Color) {
        self.cmds.push(DrawCmd::Overlay { color });
    }
}
