//! Pump-King: bounces around the arena and alternates between a homing
//! volley and a radial burst.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use super::{BossCore, BossKind};
use crate::direction_or;
use crate::sim::SimRng;
use crate::sim::geom::Aabb;
use crate::sim::player::Player;
use crate::sim::projectile::{Projectile, ProjectileSpec, update_projectiles};
use crate::tuning::Tuning;

pub const SPEED: f32 = 80.0;
pub const ATTACK_COOLDOWN: f32 = 2.0;
/// First attack comes soon after appearing
pub const FIRST_ATTACK_DELAY: f32 = 0.5;
pub const RADIAL_COUNT: usize = 8;
pub const VOLLEY_COUNT: usize = 3;
/// Max per-axis jitter added to the volley's aim
pub const VOLLEY_SPREAD: f32 = 0.3;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pumpking {
    pub core: BossCore,
    /// Per-axis wander direction, each component ±1
    pub direction: Vec2,
    pub speed: f32,
    pub attack_timer: f32,
}

impl Pumpking {
    pub fn new(tuning: &Tuning, rng: &mut SimRng) -> Self {
        Self {
            core: BossCore::new(BossKind::Pumpking, tuning),
            direction: random_diagonal(rng),
            speed: SPEED,
            attack_timer: FIRST_ATTACK_DELAY,
        }
    }

    pub fn reset(&mut self, rng: &mut SimRng) {
        self.core.reset();
        self.direction = random_diagonal(rng);
        self.attack_timer = FIRST_ATTACK_DELAY;
    }

    pub fn update(&mut self, dt: f32, player: &Player, arena: &Aabb, rng: &mut SimRng) {
        self.core.pos += self.direction * self.speed * dt;

        // Bounce: flip the axis that left the arena and pull back inside
        let (hit_x, hit_y) = self.core.bounds().escapes(arena);
        if hit_x {
            self.direction.x = -self.direction.x;
        }
        if hit_y {
            self.direction.y = -self.direction.y;
        }
        self.core.pos = Aabb::clamp_center(self.core.pos, self.core.half_extents(), arena);

        self.attack_timer -= dt;
        if self.attack_timer <= 0.0 {
            self.attack_timer = ATTACK_COOLDOWN;
            if rng.random_bool(0.5) {
                self.volley(player.pos, rng);
            } else {
                self.radial_burst();
            }
        }

        update_projectiles(&mut self.core.projectiles, dt, arena, rng);
    }

    fn shot(&self) -> ProjectileSpec {
        ProjectileSpec::BOSS_SHOT.with_damage(self.core.shot_damage)
    }

    /// Three shots aimed at `target` with random jitter
    pub fn volley(&mut self, target: Vec2, rng: &mut SimRng) {
        self.core.just_attacked = true;
        let aim = direction_or(target - self.core.pos, Vec2::Y);
        let spec = self.shot();
        for _ in 0..VOLLEY_COUNT {
            let spread = Vec2::new(
                rng.random_range(-VOLLEY_SPREAD..VOLLEY_SPREAD),
                rng.random_range(-VOLLEY_SPREAD..VOLLEY_SPREAD),
            );
            let dir = direction_or(aim + spread, aim);
            self.core.projectiles.push(Projectile::new(self.core.pos, dir, spec));
        }
    }

    /// Eight shots evenly spaced around the boss's center
    pub fn radial_burst(&mut self) {
        self.core.just_attacked = true;
        let spec = self.shot();
        let step = TAU / RADIAL_COUNT as f32;
        for i in 0..RADIAL_COUNT {
            let dir = Vec2::from_angle(i as f32 * step);
            self.core.projectiles.push(Projectile::new(self.core.pos, dir, spec));
        }
    }
}

fn random_diagonal(rng: &mut SimRng) -> Vec2 {
    let sign = |flip: bool| if flip { -1.0 } else { 1.0 };
    Vec2::new(sign(rng.random_bool(0.5)), sign(rng.random_bool(0.5)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::seeded_rng;

    fn pumpking() -> (Pumpking, SimRng) {
        let mut rng = seeded_rng(11);
        (Pumpking::new(&Tuning::default(), &mut rng), rng)
    }

    #[test]
    fn test_radial_burst_spacing() {
        let (mut boss, _) = pumpking();
        boss.radial_burst();
        assert_eq!(boss.core.projectiles.len(), RADIAL_COUNT);
        assert!(boss.core.just_attacked);
        let a = boss.core.projectiles[0].vel.normalize();
        let b = boss.core.projectiles[1].vel.normalize();
        assert!((a.angle_to(b) - TAU / 8.0).abs() < 1e-4);
    }

    #[test]
    fn test_volley_aims_at_target() {
        let (mut boss, mut rng) = pumpking();
        let target = boss.core.pos + Vec2::new(0.0, 300.0);
        boss.volley(target, &mut rng);
        assert_eq!(boss.core.projectiles.len(), VOLLEY_COUNT);
        for proj in &boss.core.projectiles {
            // Jitter never flips the shot away from the target
            assert!(proj.vel.y > 0.0);
        }
    }

    #[test]
    fn test_bounces_off_right_wall() {
        let (mut boss, mut rng) = pumpking();
        let arena = Aabb::arena();
        let player = Player::new();
        boss.direction = Vec2::new(1.0, 1.0);
        boss.core.pos = Vec2::new(800.0 - 128.0 - 0.5, 400.0);
        boss.update(1.0 / 60.0, &player, &arena, &mut rng);
        assert_eq!(boss.direction.x, -1.0);
        assert_eq!(boss.direction.y, 1.0);
        assert_eq!(boss.core.bounds().escapes(&arena), (false, false));
    }

    #[test]
    fn test_attacks_on_timer() {
        let (mut boss, mut rng) = pumpking();
        let arena = Aabb::arena();
        let player = Player::new();
        boss.update(0.4, &player, &arena, &mut rng);
        assert!(boss.core.projectiles.is_empty());
        boss.update(0.1, &player, &arena, &mut rng);
        assert!(boss.core.take_attack_signal());
        assert!(!boss.core.just_attacked);
        assert_eq!(boss.attack_timer, ATTACK_COOLDOWN);
    }
}
