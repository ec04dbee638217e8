//! Arena state
//!
//! Everything one fight needs lives here: the player, the current boss (if
//! any), the balance data and the seeded RNG. Two arenas built from the same
//! seed and fed the same inputs evolve identically.

use serde::{Deserialize, Serialize};

use super::SimRng;
use super::boss::{Boss, BossKind};
use super::geom::Aabb;
use super::player::Player;
use super::seeded_rng;
use crate::tuning::Tuning;

/// Things that happened during a tick, for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// The boss fired; drives camera shake
    BossAttacked,
    PlayerHit { amount: f32 },
    PlayerDied,
    BossDefeated { name: String },
    MinionsSummoned { count: usize },
}

#[derive(Debug, Clone)]
pub struct Arena {
    pub seed: u64,
    pub player: Player,
    /// `None` between a defeat and the next selection
    pub boss: Option<Boss>,
    pub tuning: Tuning,
    pub bounds: Aabb,
    /// Simulated seconds since the current fight started
    pub time: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub(crate) rng: SimRng,
    pub(crate) events: Vec<GameEvent>,
}

impl Arena {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            player: Player::new(),
            boss: None,
            tuning,
            bounds: Aabb::arena(),
            time: 0.0,
            time_ticks: 0,
            rng: seeded_rng(seed),
            events: Vec::new(),
        }
    }

    /// Put a fresh boss in the arena. The player keeps their state.
    pub fn select_boss(&mut self, kind: BossKind) {
        self.boss = Some(Boss::spawn(kind, &self.tuning, &mut self.rng));
        self.time = 0.0;
    }

    /// Remove the boss; the arena goes inert
    pub fn clear_boss(&mut self) {
        if let Some(boss) = self.boss.take() {
            log::debug!("Cleared boss {}", boss.name());
        }
    }

    /// Retry the current fight: player and boss back to their starting state
    pub fn restart(&mut self) {
        self.player.restart();
        if let Some(boss) = self.boss.as_mut() {
            boss.reset(&mut self.rng);
        }
        self.time = 0.0;
        self.events.clear();
        log::info!("Fight restarted");
    }

    pub fn boss_kind(&self) -> Option<BossKind> {
        self.boss.as_ref().map(Boss::kind)
    }

    /// Alive and in the arena
    pub fn has_live_boss(&self) -> bool {
        self.boss.as_ref().is_some_and(Boss::is_alive)
    }

    /// Take every event queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
