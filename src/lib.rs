//! Maskquerade - a boss-rush arena brawler
//!
//! Core modules:
//! - `sim`: Combat simulation (player, bosses, projectiles, collisions)
//! - `renderer`: Draw hooks the simulation exposes to a presentation layer
//! - `screen`: Screen state machine (start, intro, boss select, ...)
//! - `session`: Frame driver tying screens, arena and camera shake together
//! - `tuning`: Data-driven combat balance and rule flags
//! - `settings`: Presentation preferences (quality, shake, particles)
//! - `fog`: Title screen fog bank

pub mod fog;
pub mod renderer;
pub mod screen;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use screen::{Screen, ScreenEvent, TransitionError};
pub use session::{RunSummary, Session};
pub use settings::{QualityPreset, Settings};
pub use tuning::{ContactDamagePolicy, ProjectileHitPolicy, Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Target frame rate of the presentation loop
    pub const TARGET_FPS: f32 = 60.0;
    /// Fixed simulation timestep used by the session accumulator
    pub const SIM_DT: f32 = 1.0 / TARGET_FPS;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta fed into the accumulator
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Arena dimensions (logical units, origin top-left)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 800.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 128.0;
    pub const PLAYER_SPAWN: (f32, f32) = (400.0, 620.0);
    /// 5 px/frame at 60 Hz
    pub const PLAYER_SPEED: f32 = 300.0;
    /// 20 px/frame at 60 Hz
    pub const PLAYER_DASH_SPEED: f32 = 1200.0;
    pub const PLAYER_MAX_HEALTH: f32 = 100.0;
    pub const PLAYER_MAX_FLASKS: u8 = 3;

    /// Bosses all enter at the same spot
    pub const BOSS_SPAWN: (f32, f32) = (400.0, 300.0);
}

/// Normalize `v`, falling back to `fallback` when `v` has no usable length
#[inline]
pub fn direction_or(v: Vec2, fallback: Vec2) -> Vec2 {
    v.normalize_or(fallback)
}

/// Rotate a vector counter-clockwise by `radians`
#[inline]
pub fn rotate(v: Vec2, radians: f32) -> Vec2 {
    Vec2::from_angle(radians).rotate(v)
}

/// Arena center point
#[inline]
pub fn arena_center() -> Vec2 {
    Vec2::new(consts::ARENA_WIDTH / 2.0, consts::ARENA_HEIGHT / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_or_zero_falls_back() {
        let d = direction_or(Vec2::ZERO, Vec2::X);
        assert_eq!(d, Vec2::X);
    }

    #[test]
    fn test_direction_or_normalizes() {
        let d = direction_or(Vec2::new(3.0, 4.0), Vec2::X);
        assert!((d.length() - 1.0).abs() < 1e-5);
        assert!((d.x - 0.6).abs() < 1e-5);
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let v = rotate(Vec2::X, std::f32::consts::FRAC_PI_2);
        assert!(v.x.abs() < 1e-5);
        assert!((v.y - 1.0).abs() < 1e-5);
    }
}
