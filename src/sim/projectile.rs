//! Projectiles fired by the player and the bosses
//!
//! Direction always comes in as a vector; zero vectors fall back to +X so a
//! degenerate aim never produces NaN velocities.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::SimRng;
use super::effect::{Lifetime, Particle, update_particles};
use super::geom::Aabb;
use crate::direction_or;

/// How a projectile decorates its path
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TrailStyle {
    /// Two jittering sparks per update
    Sparkle,
    /// A fading ghost image every `interval` seconds
    Ghost { interval: f32 },
}

/// Static description of a projectile type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileSpec {
    /// Units per second
    pub speed: f32,
    /// Side length of the square hitbox
    pub size: f32,
    pub damage: f32,
    pub lifetime: Option<f32>,
    pub trail: TrailStyle,
}

impl ProjectileSpec {
    /// Player attack (12 px/frame at 60 Hz)
    pub const PLAYER_BOLT: Self = Self {
        speed: 720.0,
        size: 32.0,
        damage: 20.0,
        lifetime: None,
        trail: TrailStyle::Sparkle,
    };

    /// Pumpking ghosts and radial shots, same stats as the player's bolt
    pub const BOSS_SHOT: Self = Self::PLAYER_BOLT;

    /// Specter Bride's slow homing wisp
    pub const WISP: Self = Self {
        speed: 150.0,
        size: 48.0,
        damage: 20.0,
        lifetime: Some(3.0),
        trail: TrailStyle::Ghost { interval: 0.05 },
    };

    pub fn with_damage(mut self, damage: f32) -> Self {
        self.damage = damage;
        self
    }
}

/// A moving hitbox owned by whoever fired it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub damage: f32,
    pub alive: bool,
    pub life: Option<Lifetime>,
    pub trail: TrailStyle,
    trail_timer: f32,
    /// Cosmetic trail
    #[serde(skip)]
    pub particles: Vec<Particle>,
}

impl Projectile {
    pub fn new(pos: Vec2, direction: Vec2, spec: ProjectileSpec) -> Self {
        Self {
            pos,
            vel: direction_or(direction, Vec2::X) * spec.speed,
            size: spec.size,
            damage: spec.damage,
            alive: true,
            life: spec.lifetime.map(Lifetime::new),
            trail: spec.trail,
            trail_timer: 0.0,
            particles: Vec::new(),
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_size(self.pos, Vec2::splat(self.size))
    }

    /// Mark as spent (hit something)
    pub fn kill(&mut self) {
        self.alive = false;
    }

    /// Move, age, emit trail, and die when leaving `arena` or timing out
    pub fn update(&mut self, dt: f32, arena: &Aabb, rng: &mut SimRng) {
        if !self.alive {
            return;
        }

        self.pos += self.vel * dt;

        if let Some(life) = self.life.as_mut() {
            life.advance(dt);
            if life.expired() {
                self.alive = false;
            }
        }

        update_particles(&mut self.particles, dt);
        match self.trail {
            TrailStyle::Sparkle => {
                for _ in 0..2 {
                    self.particles.push(Particle::projectile_trail(self.pos, rng));
                }
            }
            TrailStyle::Ghost { interval } => {
                self.trail_timer += dt;
                if self.trail_timer >= interval {
                    self.particles.push(Particle::wisp_trail(self.pos, self.size / 2.0));
                    self.trail_timer = 0.0;
                }
            }
        }

        if !arena.contains_point(self.pos) {
            self.alive = false;
        }
    }
}

/// Advance a batch of projectiles and drop the dead ones
pub fn update_projectiles(
    projectiles: &mut Vec<Projectile>,
    dt: f32,
    arena: &Aabb,
    rng: &mut SimRng,
) {
    for proj in projectiles.iter_mut() {
        proj.update(dt, arena, rng);
    }
    projectiles.retain(|p| p.alive);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> SimRng {
        SimRng::seed_from_u64(1)
    }

    #[test]
    fn test_velocity_is_normalized_direction_times_speed() {
        let p = Projectile::new(Vec2::ZERO, Vec2::new(0.0, -5.0), ProjectileSpec::PLAYER_BOLT);
        assert!((p.vel - Vec2::new(0.0, -720.0)).length() < 1e-3);
    }

    #[test]
    fn test_zero_direction_does_not_produce_nan() {
        let p = Projectile::new(Vec2::ZERO, Vec2::ZERO, ProjectileSpec::BOSS_SHOT);
        assert!(p.vel.is_finite());
        assert_eq!(p.vel, Vec2::new(720.0, 0.0));
    }

    #[test]
    fn test_dies_within_one_tick_of_leaving_arena() {
        let arena = Aabb::arena();
        let mut rng = rng();
        let mut p = Projectile::new(Vec2::new(790.0, 400.0), Vec2::X, ProjectileSpec::PLAYER_BOLT);
        p.update(1.0 / 60.0, &arena, &mut rng);
        assert!(!p.alive);

        let fresh = Projectile::new(Vec2::new(400.0, 400.0), Vec2::X, ProjectileSpec::PLAYER_BOLT);
        let mut batch = vec![p, fresh];
        update_projectiles(&mut batch, 1.0 / 60.0, &arena, &mut rng);
        assert_eq!(batch.len(), 1);
        assert!(batch[0].alive);
    }

    #[test]
    fn test_wisp_expires_after_lifetime() {
        let arena = Aabb::arena();
        let mut rng = rng();
        let mut wisp = Projectile::new(Vec2::new(400.0, 400.0), Vec2::Y, ProjectileSpec::WISP);
        wisp.update(1.5, &arena, &mut rng);
        assert!(wisp.alive);
        assert!(!wisp.particles.is_empty());
        // Still inside the arena, but out of time
        wisp.vel = Vec2::ZERO;
        wisp.update(1.5, &arena, &mut rng);
        assert!(!wisp.alive);
    }

    #[test]
    fn test_sparkle_trail_emits_particles() {
        let arena = Aabb::arena();
        let mut rng = rng();
        let mut p = Projectile::new(Vec2::new(100.0, 100.0), Vec2::X, ProjectileSpec::BOSS_SHOT);
        p.update(1.0 / 60.0, &arena, &mut rng);
        assert_eq!(p.particles.len(), 2);
    }
}
