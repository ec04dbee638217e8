//! Data-driven combat balance
//!
//! Every field has a default, so a JSON document only needs to name what it
//! overrides: `{"boss_shot_damage": 25}` is a complete tuning file.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::BossKind;
use crate::sim::ProjectileSpec;

/// Whether touching a boss or minion respects the post-hit invulnerability window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactDamagePolicy {
    #[default]
    RespectInvulnerability,
    /// Contact hurts every tick it overlaps
    BypassInvulnerability,
}

/// How many overlapping boss projectiles the player consumes per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectileHitPolicy {
    /// Stop after the first overlapping projectile
    #[default]
    OnePerTick,
    /// Consume every overlapping projectile (only the first can deal damage)
    All,
}

#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player_shot_damage: f32,
    pub boss_shot_damage: f32,
    pub pumpking_contact_damage: f32,
    pub scarecrow_contact_damage: f32,
    pub minion_contact_damage: f32,
    pub contact_damage: ContactDamagePolicy,
    pub projectile_hits: ProjectileHitPolicy,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_shot_damage: 20.0,
            boss_shot_damage: 20.0,
            pumpking_contact_damage: 10.0,
            scarecrow_contact_damage: 15.0,
            minion_contact_damage: 10.0,
            contact_damage: ContactDamagePolicy::default(),
            projectile_hits: ProjectileHitPolicy::default(),
        }
    }
}

impl Tuning {
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        let fields = [
            ("player_shot_damage", self.player_shot_damage),
            ("boss_shot_damage", self.boss_shot_damage),
            ("pumpking_contact_damage", self.pumpking_contact_damage),
            ("scarecrow_contact_damage", self.scarecrow_contact_damage),
            ("minion_contact_damage", self.minion_contact_damage),
        ];
        for (field, value) in fields {
            // NaN fails this too
            if !(value > 0.0) {
                return Err(TuningError::NotPositive { field, value });
            }
        }
        Ok(())
    }

    /// Contact damage a boss deals by touching the player (None = harmless)
    pub fn contact_damage_for(&self, kind: BossKind) -> Option<f32> {
        match kind {
            BossKind::Pumpking => Some(self.pumpking_contact_damage),
            BossKind::SpecterBride => None,
            BossKind::ScarecrowLord => Some(self.scarecrow_contact_damage),
        }
    }

    pub fn player_shot(&self) -> ProjectileSpec {
        ProjectileSpec::PLAYER_BOLT.with_damage(self.player_shot_damage)
    }
}
