//! Specter Bride: drifts on a slow float, throws a wisp at the player on a
//! steady beat, and every few seconds blinks toward or away from them.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{BossCore, BossKind, HasDash};
use crate::direction_or;
use crate::sim::SimRng;
use crate::sim::geom::Aabb;
use crate::sim::player::Player;
use crate::sim::projectile::{Projectile, ProjectileSpec, update_projectiles};
use crate::tuning::Tuning;

pub const ATTACK_COOLDOWN: f32 = 0.75;
pub const FIRST_ATTACK_DELAY: f32 = 0.25;
pub const DASH_SPEED: f32 = 700.0;
pub const DASH_DURATION: f32 = 0.2;
pub const DASH_INTERVAL_MIN: f32 = 3.0;
pub const DASH_INTERVAL_MAX: f32 = 6.0;
/// Opacity while blinking
pub const DASH_OPACITY: f32 = 120.0 / 255.0;
/// Opacity gained per second while fading in
pub const FADE_IN_RATE: f32 = 200.0 / 255.0;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BrideDash {
    pub active: bool,
    pub vel: Vec2,
    pub time_left: f32,
    /// Counts down to the next dash
    pub timer: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecterBride {
    pub core: BossCore,
    pub float_time: f32,
    pub attack_timer: f32,
    pub dash: BrideDash,
    /// Sprite opacity, 0 to 1
    pub opacity: f32,
}

impl SpecterBride {
    pub fn new(tuning: &Tuning, rng: &mut SimRng) -> Self {
        Self {
            core: BossCore::new(BossKind::SpecterBride, tuning),
            float_time: 0.0,
            attack_timer: FIRST_ATTACK_DELAY,
            dash: BrideDash {
                timer: next_dash_interval(rng),
                ..Default::default()
            },
            opacity: 0.0,
        }
    }

    pub fn reset(&mut self, rng: &mut SimRng) {
        self.core.reset();
        self.float_time = 0.0;
        self.attack_timer = rng.random_range(1.0..2.0);
        self.dash = BrideDash {
            timer: next_dash_interval(rng),
            ..Default::default()
        };
        self.opacity = 0.0;
    }

    pub fn update(&mut self, dt: f32, player: &Player, arena: &Aabb, rng: &mut SimRng) {
        if self.opacity < 1.0 {
            self.opacity = (self.opacity + FADE_IN_RATE * dt).min(1.0);
        }

        self.float_time += dt;
        self.core.pos.x += self.float_time.sin() * 40.0 * dt;
        self.core.pos.y += (self.float_time * 1.5).cos() * 20.0 * dt;

        self.attack_timer -= dt;
        if self.attack_timer <= 0.0 {
            self.throw_wisp(player.pos);
            self.attack_timer = ATTACK_COOLDOWN;
        }

        self.update_dash(dt, player.pos, rng);
        self.core.pos = Aabb::clamp_center(self.core.pos, self.core.half_extents(), arena);

        update_projectiles(&mut self.core.projectiles, dt, arena, rng);
    }

    /// Launch one slow wisp toward `target`
    pub fn throw_wisp(&mut self, target: Vec2) {
        let dir = direction_or(target - self.core.pos, Vec2::Y);
        let spec = ProjectileSpec::WISP.with_damage(self.core.shot_damage);
        self.core.projectiles.push(Projectile::new(self.core.pos, dir, spec));
        self.core.just_attacked = true;
    }

    fn update_dash(&mut self, dt: f32, target: Vec2, rng: &mut SimRng) {
        self.dash.timer -= dt;
        if !self.dash.active && self.dash.timer <= 0.0 {
            let mut dir = direction_or(target - self.core.pos, Vec2::Y);
            if rng.random_bool(0.5) {
                dir = -dir;
            }
            self.dash.vel = dir * DASH_SPEED;
            self.dash.active = true;
            self.dash.time_left = DASH_DURATION;
            self.opacity = DASH_OPACITY;
        }

        if self.dash.active {
            self.core.pos += self.dash.vel * dt;
            self.dash.time_left -= dt;
            if self.dash.time_left <= 0.0 {
                self.dash.active = false;
                self.dash.vel = Vec2::ZERO;
                self.opacity = 1.0;
                self.dash.timer = next_dash_interval(rng);
            }
        }
    }
}

impl HasDash for SpecterBride {
    fn is_dashing(&self) -> bool {
        self.dash.active
    }

    fn dash_ready_in(&self) -> f32 {
        if self.dash.active { 0.0 } else { self.dash.timer.max(0.0) }
    }
}

fn next_dash_interval(rng: &mut SimRng) -> f32 {
    rng.random_range(DASH_INTERVAL_MIN..DASH_INTERVAL_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::seeded_rng;

    fn setup() -> (SpecterBride, Player, Aabb, SimRng) {
        let mut rng = seeded_rng(21);
        let bride = SpecterBride::new(&Tuning::default(), &mut rng);
        (bride, Player::new(), Aabb::arena(), rng)
    }

    #[test]
    fn test_fades_in_from_zero() {
        let (mut bride, player, arena, mut rng) = setup();
        assert_eq!(bride.opacity, 0.0);
        bride.update(0.5, &player, &arena, &mut rng);
        assert!(bride.opacity > 0.3 && bride.opacity < 0.5);
        for _ in 0..4 {
            bride.update(0.25, &player, &arena, &mut rng);
        }
        // No dash can start in the first three seconds
        assert_eq!(bride.opacity, 1.0);
    }

    #[test]
    fn test_wisp_cadence() {
        let (mut bride, player, arena, mut rng) = setup();
        bride.dash.timer = 100.0;
        bride.update(0.25, &player, &arena, &mut rng);
        assert_eq!(bride.core.projectiles.len(), 1);
        assert!(bride.core.take_attack_signal());
        bride.update(0.5, &player, &arena, &mut rng);
        assert_eq!(bride.core.projectiles.len(), 1);
        bride.update(0.25, &player, &arena, &mut rng);
        assert_eq!(bride.core.projectiles.len(), 2);
    }

    #[test]
    fn test_wisp_heads_for_player() {
        let (mut bride, player, _, _) = setup();
        bride.throw_wisp(player.pos);
        let wisp = &bride.core.projectiles[0];
        let to_player = (player.pos - bride.core.pos).normalize();
        assert!(wisp.vel.normalize().dot(to_player) > 0.999);
        assert!(wisp.life.is_some());
    }

    #[test]
    fn test_dash_burst_and_recovery() {
        let (mut bride, player, arena, mut rng) = setup();
        bride.attack_timer = 100.0;
        bride.dash.timer = 0.01;
        let start = bride.core.pos;
        bride.update(0.1, &player, &arena, &mut rng);
        assert!(bride.is_dashing());
        assert_eq!(bride.opacity, DASH_OPACITY);
        assert!((bride.core.pos - start).length() > 50.0);

        bride.update(0.1, &player, &arena, &mut rng);
        assert!(!bride.is_dashing());
        assert_eq!(bride.opacity, 1.0);
        assert!(bride.dash.timer >= DASH_INTERVAL_MIN && bride.dash.timer < DASH_INTERVAL_MAX);
    }

    #[test]
    fn test_stays_inside_arena() {
        let (mut bride, player, arena, mut rng) = setup();
        for _ in 0..(60 * 30) {
            bride.update(1.0 / 60.0, &player, &arena, &mut rng);
        }
        assert_eq!(bride.core.bounds().escapes(&arena), (false, false));
    }

    #[test]
    fn test_reset_clears_wisps_and_fades_out() {
        let (mut bride, player, arena, mut rng) = setup();
        bride.update(0.3, &player, &arena, &mut rng);
        bride.core.take_damage(500.0);
        bride.reset(&mut rng);
        assert!(bride.core.alive);
        assert!(bride.core.projectiles.is_empty());
        assert_eq!(bride.opacity, 0.0);
        assert!(bride.attack_timer >= 1.0 && bride.attack_timer < 2.0);
    }
}
