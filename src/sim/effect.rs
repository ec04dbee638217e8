//! Ephemeral effects
//!
//! Footsteps, hit sparks, dash trails and projectile trails all share one
//! shape: a position that ages toward a fixed lifetime and fades linearly.
//! Gameplay never reads them.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use super::SimRng;
use crate::consts::TARGET_FPS;

/// Age/lifetime pair shared by everything that expires on a clock
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lifetime {
    pub age: f32,
    pub span: f32,
}

impl Lifetime {
    pub fn new(span: f32) -> Self {
        Self { age: 0.0, span }
    }

    #[inline]
    pub fn advance(&mut self, dt: f32) {
        self.age += dt;
    }

    #[inline]
    pub fn expired(&self) -> bool {
        self.age >= self.span
    }

    /// Linear fade from 1 (just spawned) to 0 (expired)
    pub fn fade(&self) -> f32 {
        if self.span <= 0.0 {
            return 0.0;
        }
        (1.0 - self.age / self.span).clamp(0.0, 1.0)
    }

    pub fn remaining(&self) -> f32 {
        (self.span - self.age).max(0.0)
    }
}

/// Cosmetic particle flavours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    Footstep,
    HitSpark,
    DashTrail,
    ProjectileTrail,
    WispTrail,
    Fog,
}

/// Footprints linger this long
pub const FOOTSTEP_LIFETIME: f32 = 0.4;
pub const HIT_SPARK_LIFETIME: f32 = 0.4;
pub const PROJECTILE_TRAIL_LIFETIME: f32 = 0.3;
pub const WISP_TRAIL_LIFETIME: f32 = 0.6;

/// A short-lived cosmetic particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub kind: ParticleKind,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Velocity multiplier applied once per 60 Hz frame (1.0 = no drag)
    pub drag: f32,
    pub radius: f32,
    pub life: Lifetime,
}

impl Particle {
    pub fn footstep(pos: Vec2) -> Self {
        Self {
            kind: ParticleKind::Footstep,
            pos,
            vel: Vec2::ZERO,
            drag: 1.0,
            radius: 8.0,
            life: Lifetime::new(FOOTSTEP_LIFETIME),
        }
    }

    /// Spark flying out in a random direction, slowed by air resistance
    pub fn hit_spark(pos: Vec2, rng: &mut SimRng) -> Self {
        let angle = rng.random_range(0.0..TAU);
        let speed = rng.random_range(80.0..160.0);
        Self {
            kind: ParticleKind::HitSpark,
            pos,
            vel: Vec2::from_angle(angle) * speed,
            drag: 0.9,
            radius: rng.random_range(3..=5) as f32,
            life: Lifetime::new(HIT_SPARK_LIFETIME),
        }
    }

    pub fn dash_trail(pos: Vec2, lifetime: f32, rng: &mut SimRng) -> Self {
        let jitter = Vec2::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0));
        Self {
            kind: ParticleKind::DashTrail,
            pos,
            vel: jitter * 40.0,
            drag: 1.0,
            radius: rng.random_range(3..=6) as f32,
            life: Lifetime::new(lifetime),
        }
    }

    pub fn projectile_trail(pos: Vec2, rng: &mut SimRng) -> Self {
        // Up to 1 px/frame of drift
        let jitter = Vec2::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0));
        Self {
            kind: ParticleKind::ProjectileTrail,
            pos,
            vel: jitter * TARGET_FPS,
            drag: 1.0,
            radius: rng.random_range(2..=4) as f32,
            life: Lifetime::new(PROJECTILE_TRAIL_LIFETIME),
        }
    }

    /// Ghost image left behind a wisp
    pub fn wisp_trail(pos: Vec2, radius: f32) -> Self {
        Self {
            kind: ParticleKind::WispTrail,
            pos,
            vel: Vec2::ZERO,
            drag: 1.0,
            radius,
            life: Lifetime::new(WISP_TRAIL_LIFETIME),
        }
    }

    /// Background fog puff; never expires, its owner moves and recycles it
    pub fn fog(pos: Vec2, radius: f32) -> Self {
        Self {
            kind: ParticleKind::Fog,
            pos,
            vel: Vec2::ZERO,
            drag: 1.0,
            radius,
            life: Lifetime::new(f32::INFINITY),
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.life.advance(dt);
        if self.drag < 1.0 {
            self.vel *= self.drag.powf(dt * TARGET_FPS);
        }
        self.pos += self.vel * dt;
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        !self.life.expired()
    }

    /// Opacity in 0..=1
    #[inline]
    pub fn alpha(&self) -> f32 {
        self.life.fade()
    }

    /// Radius to draw at right now (some kinds shrink as they fade)
    pub fn display_radius(&self) -> f32 {
        let fade = self.life.fade();
        match self.kind {
            ParticleKind::Footstep => self.radius * fade,
            ParticleKind::WispTrail => self.radius * (0.6 + 0.4 * fade),
            _ => self.radius,
        }
    }
}

/// Age every particle and drop the expired ones
pub fn update_particles(particles: &mut Vec<Particle>, dt: f32) {
    for p in particles.iter_mut() {
        p.update(dt);
    }
    particles.retain(Particle::is_alive);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_lifetime_fade_is_linear() {
        let mut life = Lifetime::new(0.4);
        assert_eq!(life.fade(), 1.0);
        life.advance(0.1);
        assert!((life.fade() - 0.75).abs() < 1e-5);
        life.advance(0.3);
        assert!(life.expired());
        assert_eq!(life.fade(), 0.0);
    }

    #[test]
    fn test_particles_removed_once_expired() {
        let mut particles = vec![
            Particle::footstep(Vec2::ZERO),
            Particle::wisp_trail(Vec2::ZERO, 24.0),
        ];
        update_particles(&mut particles, 0.5);
        assert_eq!(particles.len(), 1);
        assert_eq!(particles[0].kind, ParticleKind::WispTrail);
        update_particles(&mut particles, 0.2);
        assert!(particles.is_empty());
    }

    #[test]
    fn test_hit_spark_slows_down() {
        let mut rng = SimRng::seed_from_u64(7);
        let mut spark = Particle::hit_spark(Vec2::ZERO, &mut rng);
        let speed = spark.vel.length();
        assert!((80.0..160.0).contains(&speed));
        spark.update(1.0 / 60.0);
        assert!(spark.vel.length() < speed);
        assert!(spark.pos.length() > 0.0);
    }

    #[test]
    fn test_footstep_shrinks() {
        let mut step = Particle::footstep(Vec2::ZERO);
        step.update(0.2);
        assert!((step.display_radius() - 4.0).abs() < 1e-4);
    }
}
