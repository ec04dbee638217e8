//! Scarecrow Lord: lunges at the player and keeps summoning little
//! scarecrows that wander around until they rot away.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{BossCore, BossKind, HasDash, HasMinions};
use crate::sim::SimRng;
use crate::sim::effect::{Lifetime, Particle, update_particles};
use crate::sim::geom::Aabb;
use crate::sim::player::Player;
use crate::sim::projectile::update_projectiles;
use crate::tuning::Tuning;
use crate::{direction_or, rotate};

pub const DASH_SPEED: f32 = 400.0;
/// A dash ends once the lord gets this close to where the player was
pub const DASH_STOP_DISTANCE: f32 = 30.0;
pub const DASH_MAX_DURATION: f32 = 1.5;
pub const DASH_TRAIL_LIFETIME: f32 = 0.4;
pub const FIRST_SUMMON_DELAY: f32 = 3.0;
/// Summoned minions land within this many units of the lord on each axis
pub const SUMMON_SPREAD: i32 = 80;

pub const MINION_SIZE: Vec2 = Vec2::new(60.0, 80.0);
pub const MINION_HEALTH: f32 = 20.0;
/// Chance per second that a minion veers off its heading
pub const MINION_STEER_RATE: f32 = 1.2;

/// A short-lived wandering scarecrow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Minion {
    pub pos: Vec2,
    pub direction: Vec2,
    pub speed: f32,
    pub health: f32,
    pub alive: bool,
    pub life: Lifetime,
    /// Damage dealt by touching the player
    pub damage: f32,
}

impl Minion {
    pub fn spawn(pos: Vec2, damage: f32, rng: &mut SimRng) -> Self {
        let heading = Vec2::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0));
        Self {
            pos,
            direction: direction_or(heading, Vec2::X),
            speed: rng.random_range(60.0..100.0),
            health: MINION_HEALTH,
            alive: true,
            life: Lifetime::new(rng.random_range(3.0..5.0)),
            damage,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_size(self.pos, MINION_SIZE)
    }

    pub fn update(&mut self, dt: f32, rng: &mut SimRng) {
        if !self.alive {
            return;
        }
        self.pos += self.direction * self.speed * dt;

        if rng.random::<f32>() < MINION_STEER_RATE * dt {
            self.direction = rotate(self.direction, rng.random_range(-0.5..0.5));
        }

        self.life.advance(dt);
        if self.life.expired() {
            self.alive = false;
        }
    }

    pub fn take_damage(&mut self, amount: f32) -> bool {
        if !self.alive || amount <= 0.0 {
            return false;
        }
        self.health = (self.health - amount).max(0.0);
        if self.health <= 0.0 {
            self.alive = false;
        }
        true
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LordDash {
    pub active: bool,
    /// Counts up toward `cooldown`
    pub timer: f32,
    pub cooldown: f32,
    pub target: Vec2,
    pub vel: Vec2,
    pub elapsed: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScarecrowLord {
    pub core: BossCore,
    pub dash: LordDash,
    /// Counts up toward `summon_cooldown`
    pub summon_timer: f32,
    pub summon_cooldown: f32,
    pub minion_damage: f32,
    pub minions: Vec<Minion>,
    #[serde(skip)]
    pub trail: Vec<Particle>,
    summoned: usize,
}

impl ScarecrowLord {
    pub fn new(tuning: &Tuning, rng: &mut SimRng) -> Self {
        Self {
            core: BossCore::new(BossKind::ScarecrowLord, tuning),
            dash: LordDash {
                cooldown: rng.random_range(1.5..2.5),
                ..Default::default()
            },
            summon_timer: 0.0,
            summon_cooldown: FIRST_SUMMON_DELAY,
            minion_damage: tuning.minion_contact_damage,
            minions: Vec::new(),
            trail: Vec::new(),
            summoned: 0,
        }
    }

    pub fn reset(&mut self, rng: &mut SimRng) {
        self.core.reset();
        self.dash = LordDash {
            cooldown: rng.random_range(1.5..2.5),
            ..Default::default()
        };
        self.summon_timer = 0.0;
        self.summon_cooldown = FIRST_SUMMON_DELAY;
        self.minions.clear();
        self.trail.clear();
        self.summoned = 0;
    }

    pub fn update(&mut self, dt: f32, player: &Player, arena: &Aabb, rng: &mut SimRng) {
        self.update_dash(dt, player.pos, rng);
        self.core.pos = Aabb::clamp_center(self.core.pos, self.core.half_extents(), arena);
        update_particles(&mut self.trail, dt);

        self.summon_timer += dt;
        if self.summon_timer >= self.summon_cooldown {
            self.summon_timer = 0.0;
            self.summon_cooldown = rng.random_range(4.0..6.0);
            let count = rng.random_range(2..=4);
            self.summon_minions(count, rng);
        }

        for minion in self.minions.iter_mut() {
            minion.update(dt, rng);
        }
        self.minions.retain(|m| m.alive && m.health > 0.0);

        update_projectiles(&mut self.core.projectiles, dt, arena, rng);
    }

    fn update_dash(&mut self, dt: f32, target: Vec2, rng: &mut SimRng) {
        self.dash.timer += dt;
        if !self.dash.active {
            if self.dash.timer > self.dash.cooldown {
                self.dash.active = true;
                self.dash.target = target;
                self.dash.vel = direction_or(target - self.core.pos, Vec2::Y) * DASH_SPEED;
                self.dash.timer = 0.0;
                self.dash.elapsed = 0.0;
                self.dash.cooldown = rng.random_range(1.0..2.0);
            }
            return;
        }

        self.core.pos += self.dash.vel * dt;
        self.dash.elapsed += dt;
        self.trail.push(Particle::dash_trail(self.core.pos, DASH_TRAIL_LIFETIME, rng));

        if self.core.pos.distance(self.dash.target) < DASH_STOP_DISTANCE
            || self.dash.elapsed >= DASH_MAX_DURATION
        {
            self.dash.active = false;
            self.dash.vel = Vec2::ZERO;
        }
    }

    /// Spawn `count` minions scattered around the lord
    pub fn summon_minions(&mut self, count: usize, rng: &mut SimRng) {
        for _ in 0..count {
            let offset = Vec2::new(
                rng.random_range(-SUMMON_SPREAD..=SUMMON_SPREAD) as f32,
                rng.random_range(-SUMMON_SPREAD..=SUMMON_SPREAD) as f32,
            );
            self.minions
                .push(Minion::spawn(self.core.pos + offset, self.minion_damage, rng));
        }
        self.summoned += count;
        log::debug!("{} summoned {} minions", self.core.kind.name(), count);
    }
}

impl HasMinions for ScarecrowLord {
    fn minions(&self) -> &[Minion] {
        &self.minions
    }

    fn minions_mut(&mut self) -> &mut Vec<Minion> {
        &mut self.minions
    }

    fn take_summoned(&mut self) -> usize {
        std::mem::take(&mut self.summoned)
    }
}

impl HasDash for ScarecrowLord {
    fn is_dashing(&self) -> bool {
        self.dash.active
    }

    fn dash_ready_in(&self) -> f32 {
        if self.dash.active {
            0.0
        } else {
            (self.dash.cooldown - self.dash.timer).max(0.0)
        }
    }
}
