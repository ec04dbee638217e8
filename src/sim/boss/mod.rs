//! Bosses
//!
//! Three variants share a `BossCore` (health, hitbox, projectiles) and differ
//! in how they move and attack. Optional abilities are exposed through
//! capability traits rather than by probing for fields:
//! - `HasMinions`: Scarecrow Lord's summoned scarecrows
//! - `HasDash`: Specter Bride and Scarecrow Lord

pub mod bride;
pub mod pumpking;
pub mod scarecrow;

pub use bride::SpecterBride;
pub use pumpking::Pumpking;
pub use scarecrow::{Minion, ScarecrowLord};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::SimRng;
use super::geom::Aabb;
use super::player::{MaskKind, Player};
use super::projectile::Projectile;
use crate::consts::BOSS_SPAWN;
use crate::tuning::Tuning;

/// Which boss is in the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BossKind {
    Pumpking,
    SpecterBride,
    ScarecrowLord,
}

impl BossKind {
    pub const ALL: [BossKind; 3] = [
        BossKind::Pumpking,
        BossKind::SpecterBride,
        BossKind::ScarecrowLord,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Pumpking => "Pump-King",
            Self::SpecterBride => "Specter Bride",
            Self::ScarecrowLord => "Scarecrow Lord",
        }
    }

    /// Loose name lookup for menus and the command line
    pub fn from_name(s: &str) -> Option<Self> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "pumpking" => Some(Self::Pumpking),
            "specterbride" | "bride" => Some(Self::SpecterBride),
            "scarecrowlord" | "scarecrow" => Some(Self::ScarecrowLord),
            _ => None,
        }
    }

    pub fn max_health(&self) -> f32 {
        match self {
            Self::Pumpking => 800.0,
            Self::SpecterBride => 120.0,
            Self::ScarecrowLord => 1500.0,
        }
    }

    /// Side length of the square sprite / hitbox
    pub fn size(&self) -> f32 {
        match self {
            Self::Pumpking => 256.0,
            Self::SpecterBride => 160.0,
            Self::ScarecrowLord => 220.0,
        }
    }

    /// The mask the player earns for the kill
    pub fn mask(&self) -> MaskKind {
        match self {
            Self::Pumpking => MaskKind::Fire,
            Self::SpecterBride => MaskKind::Veil,
            Self::ScarecrowLord => MaskKind::Straw,
        }
    }
}

/// State every boss carries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossCore {
    pub kind: BossKind,
    pub pos: Vec2,
    pub size: f32,
    pub max_health: f32,
    pub health: f32,
    pub alive: bool,
    /// Set when an attack fires; consumed once by the arena for camera shake
    pub just_attacked: bool,
    /// Damage per projectile this boss fires
    pub shot_damage: f32,
    /// Damage for touching the player, if any
    pub contact_damage: Option<f32>,
    pub projectiles: Vec<Projectile>,
}

impl BossCore {
    pub fn new(kind: BossKind, tuning: &Tuning) -> Self {
        Self {
            kind,
            pos: Vec2::new(BOSS_SPAWN.0, BOSS_SPAWN.1),
            size: kind.size(),
            max_health: kind.max_health(),
            health: kind.max_health(),
            alive: true,
            just_attacked: false,
            shot_damage: tuning.boss_shot_damage,
            contact_damage: tuning.contact_damage_for(kind),
            projectiles: Vec::new(),
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_size(self.pos, Vec2::splat(self.size))
    }

    pub fn half_extents(&self) -> Vec2 {
        Vec2::splat(self.size / 2.0)
    }

    /// Returns true if the damage was applied
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

    pub fn health_ratio(&self) -> f32 {
        (self.health / self.max_health).clamp(0.0, 1.0)
    }

    /// Read and clear the attack signal
    pub fn take_attack_signal(&mut self) -> bool {
        std::mem::take(&mut self.just_attacked)
    }

    pub fn reset(&mut self) {
        self.pos = Vec2::new(BOSS_SPAWN.0, BOSS_SPAWN.1);
        self.health = self.max_health;
        self.alive = true;
        self.just_attacked = false;
        self.projectiles.clear();
    }
}

/// A boss that keeps a pool of child entities
pub trait HasMinions {
    fn minions(&self) -> &[Minion];
    fn minions_mut(&mut self) -> &mut Vec<Minion>;
    /// How many minions were summoned since the last call
    fn take_summoned(&mut self) -> usize;
}

/// A boss with a burst-movement ability
pub trait HasDash {
    fn is_dashing(&self) -> bool;
    /// Seconds until the next dash may start (0 while dashing)
    fn dash_ready_in(&self) -> f32;
}

/// One of the three bosses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Boss {
    Pumpking(Pumpking),
    SpecterBride(SpecterBride),
    ScarecrowLord(ScarecrowLord),
}

impl Boss {
    pub fn spawn(kind: BossKind, tuning: &Tuning, rng: &mut SimRng) -> Self {
        log::info!("Spawning boss: {}", kind.name());
        match kind {
            BossKind::Pumpking => Boss::Pumpking(Pumpking::new(tuning, rng)),
            BossKind::SpecterBride => Boss::SpecterBride(SpecterBride::new(tuning, rng)),
            BossKind::ScarecrowLord => Boss::ScarecrowLord(ScarecrowLord::new(tuning, rng)),
        }
    }

    pub fn core(&self) -> &BossCore {
        match self {
            Boss::Pumpking(b) => &b.core,
            Boss::SpecterBride(b) => &b.core,
            Boss::ScarecrowLord(b) => &b.core,
        }
    }

    pub fn core_mut(&mut self) -> &mut BossCore {
        match self {
            Boss::Pumpking(b) => &mut b.core,
            Boss::SpecterBride(b) => &mut b.core,
            Boss::ScarecrowLord(b) => &mut b.core,
        }
    }

    pub fn kind(&self) -> BossKind {
        self.core().kind
    }

    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.core().alive
    }

    pub fn bounds(&self) -> Aabb {
        self.core().bounds()
    }

    pub fn take_damage(&mut self, amount: f32) -> bool {
        self.core_mut().take_damage(amount)
    }

    /// Advance one tick. Does nothing once defeated.
    pub fn update(&mut self, dt: f32, player: &Player, arena: &Aabb, rng: &mut SimRng) {
        if !self.is_alive() {
            return;
        }
        match self {
            Boss::Pumpking(b) => b.update(dt, player, arena, rng),
            Boss::SpecterBride(b) => b.update(dt, player, arena, rng),
            Boss::ScarecrowLord(b) => b.update(dt, player, arena, rng),
        }
    }

    /// Full health, no projectiles or minions, fresh timers
    pub fn reset(&mut self, rng: &mut SimRng) {
        match self {
            Boss::Pumpking(b) => b.reset(rng),
            Boss::SpecterBride(b) => b.reset(rng),
            Boss::ScarecrowLord(b) => b.reset(rng),
        }
    }

    pub fn as_minion_host(&self) -> Option<&dyn HasMinions> {
        match self {
            Boss::ScarecrowLord(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_minion_host_mut(&mut self) -> Option<&mut dyn HasMinions> {
        match self {
            Boss::ScarecrowLord(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_dasher(&self) -> Option<&dyn HasDash> {
        match self {
            Boss::SpecterBride(b) => Some(b),
            Boss::ScarecrowLord(b) => Some(b),
            Boss::Pumpking(_) => None,
        }
    }

    /// Split borrow: the boss's projectiles and its minions at once
    pub fn projectiles_and_minions_mut(
        &mut self,
    ) -> (&mut Vec<Projectile>, Option<&mut Vec<Minion>>) {
        match self {
            Boss::ScarecrowLord(b) => (&mut b.core.projectiles, Some(&mut b.minions)),
            other => (&mut other.core_mut().projectiles, None),
        }
    }
}
