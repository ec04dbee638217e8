//! Cross-entity collision resolution
//!
//! Runs after the player and the boss have moved. Player shots are tested
//! against minions first, then the boss; bodies touching the player deal
//! contact damage according to the tuning's `ContactDamagePolicy`.

use super::boss::Boss;
use super::player::Player;
use super::projectile::Projectile;
use crate::tuning::ContactDamagePolicy;

/// What the player's shots hit this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShotReport {
    pub minion_hits: u32,
    pub minion_kills: u32,
    pub boss_hits: u32,
}

/// Resolve the player's live shots against the boss's minions, then the boss.
///
/// A shot lands on at most one target per tick. Defeated bosses are not hit.
pub fn resolve_player_shots(shots: &mut [Projectile], boss: &mut Boss) -> ShotReport {
    let mut report = ShotReport::default();

    for shot in shots.iter_mut().filter(|s| s.alive) {
        let bounds = shot.bounds();

        if let Some(host) = boss.as_minion_host_mut() {
            let target = host
                .minions_mut()
                .iter_mut()
                .find(|m| m.alive && m.bounds().intersects(&bounds));
            if let Some(minion) = target {
                minion.take_damage(shot.damage);
                shot.kill();
                report.minion_hits += 1;
                if !minion.alive {
                    report.minion_kills += 1;
                }
                continue;
            }
        }

        if boss.is_alive() && boss.bounds().intersects(&bounds) {
            boss.take_damage(shot.damage);
            shot.kill();
            report.boss_hits += 1;
        }
    }

    report
}

/// Apply damage from the boss's body and its minions touching the player.
///
/// Returns the total health the player lost.
pub fn resolve_contact(player: &mut Player, boss: &Boss, policy: ContactDamagePolicy) -> f32 {
    if player.dead {
        return 0.0;
    }
    let before = player.current_health;
    let bounds = player.bounds();

    let core = boss.core();
    if core.alive && core.bounds().intersects(&bounds) {
        if let Some(amount) = core.contact_damage {
            player.take_contact_damage(amount, policy);
        }
    }

    if let Some(host) = boss.as_minion_host() {
        let touching = host
            .minions()
            .iter()
            .filter(|m| m.alive && m.bounds().intersects(&bounds));
        for minion in touching {
            player.take_contact_damage(minion.damage, policy);
        }
    }

    before - player.current_health
}
