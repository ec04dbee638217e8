//! Per-frame combat update
//!
//! One call to `tick` advances the whole arena by `dt` seconds: commands,
//! player, boss, collisions, cleanup, then events.

use glam::Vec2;

use super::boss::Boss;
use super::collision::{resolve_contact, resolve_player_shots};
use super::state::{Arena, GameEvent};

/// Commands for a single tick. One-shot flags are consumed by that tick.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Desired movement; normalized by the player
    pub move_intent: Vec2,
    pub dash: bool,
    pub attack: bool,
    /// Where to shoot; `None` fires the way the player faces
    pub aim: Option<Vec2>,
    pub heal: bool,
    pub toggle_mask: bool,
    /// Scripted player drives the commands instead
    pub autopilot: bool,
}

/// Preferred distance the autopilot keeps from the boss
const AUTOPILOT_RANGE: f32 = 260.0;
/// Seconds between strafe direction flips
const AUTOPILOT_STRAFE_PERIOD: f32 = 3.0;
/// Boss shots closer than this make the autopilot dash
const AUTOPILOT_DODGE_RADIUS: f32 = 90.0;
const AUTOPILOT_HEAL_BELOW: f32 = 45.0;
/// A dashing boss this close makes the autopilot dash aside
const AUTOPILOT_LUNGE_RADIUS: f32 = 320.0;
/// Seconds before a boss dash that count as already dashing
const AUTOPILOT_LUNGE_WARNING: f32 = 0.2;

/// Demo player: circles the boss at range, shoots at it, dashes away from
/// shots that get close or a boss about to lunge, and drinks a flask when low.
pub fn autopilot_input(arena: &Arena) -> TickInput {
    let player = &arena.player;
    let Some(boss) = arena.boss.as_ref().filter(|b| b.is_alive()) else {
        return TickInput::default();
    };
    if player.dead {
        return TickInput::default();
    }

    let to_boss = boss.core().pos - player.pos;
    let dist = to_boss.length();
    let toward = to_boss.normalize_or(Vec2::NEG_Y);

    let strafe_sign = if (arena.time / AUTOPILOT_STRAFE_PERIOD) as i32 % 2 == 0 {
        1.0
    } else {
        -1.0
    };
    let mut move_intent = toward.perp() * strafe_sign;
    if dist < AUTOPILOT_RANGE - 20.0 {
        move_intent -= toward;
    } else if dist > AUTOPILOT_RANGE + 40.0 {
        move_intent += toward;
    }

    // Nearest minion first: they soak shots meant for the boss anyway
    let aim_target = boss
        .as_minion_host()
        .and_then(|host| {
            host.minions()
                .iter()
                .filter(|m| m.alive)
                .min_by(|a, b| {
                    a.pos
                        .distance_squared(player.pos)
                        .total_cmp(&b.pos.distance_squared(player.pos))
                })
                .map(|m| m.pos)
        })
        .unwrap_or(boss.core().pos);

    let threat = boss.core().projectiles.iter().find(|p| {
        p.alive
            && p.pos.distance(player.pos) < AUTOPILOT_DODGE_RADIUS
            && p.vel.dot(player.pos - p.pos) > 0.0
    });
    let lunge = boss.as_dasher().is_some_and(|d| {
        dist < AUTOPILOT_LUNGE_RADIUS
            && (d.is_dashing() || d.dash_ready_in() < AUTOPILOT_LUNGE_WARNING)
    });
    let dash = match threat {
        Some(shot) => {
            // Sidestep across the shot's path
            let across = shot.vel.perp().normalize_or(Vec2::X);
            move_intent = if across.dot(player.pos - shot.pos) >= 0.0 { across } else { -across };
            true
        }
        None if lunge => {
            move_intent = toward.perp() * strafe_sign;
            true
        }
        None => false,
    };

    TickInput {
        move_intent,
        dash,
        attack: true,
        aim: Some(aim_target - player.pos),
        heal: player.current_health < AUTOPILOT_HEAL_BELOW,
        toggle_mask: false,
        autopilot: true,
    }
}

/// Advance the arena by `dt` seconds
pub fn tick(arena: &mut Arena, input: &TickInput, dt: f32) {
    let input = if input.autopilot {
        autopilot_input(arena)
    } else {
        input.clone()
    };

    apply_commands(arena, &input);

    let player_was_alive = !arena.player.dead;
    let boss_was_alive = arena.has_live_boss();

    // Player first: absorbs boss shots that reached it last tick
    let hits = arena.tuning.projectile_hits;
    match arena.boss.as_mut().filter(|b| b.is_alive()) {
        Some(boss) => {
            let incoming = &mut boss.core_mut().projectiles;
            arena.player.update(dt, incoming, hits, &arena.bounds, &mut arena.rng);
        }
        None => {
            arena.player.update(dt, &mut [], hits, &arena.bounds, &mut arena.rng);
        }
    }

    if let Some(boss) = arena.boss.as_mut() {
        boss.update(dt, &arena.player, &arena.bounds, &mut arena.rng);
        // Shots still in flight stop counting once the player is down
        if !arena.player.dead {
            resolve_player_shots(&mut arena.player.projectiles, boss);
        }
        resolve_contact(&mut arena.player, boss, arena.tuning.contact_damage);
        discard_dead(boss);
    }
    arena.player.projectiles.retain(|p| p.alive);

    emit_events(arena, player_was_alive, boss_was_alive);

    arena.time += dt;
    arena.time_ticks += 1;
}

fn apply_commands(arena: &mut Arena, input: &TickInput) {
    let player = &mut arena.player;
    player.move_intent(input.move_intent);
    if input.dash {
        player.start_dash();
    }
    if input.attack {
        player.attack(input.aim, arena.tuning.player_shot());
    }
    if input.heal {
        player.heal();
    }
    if input.toggle_mask {
        player.toggle_mask();
    }
}

fn discard_dead(boss: &mut Boss) {
    let (projectiles, minions) = boss.projectiles_and_minions_mut();
    projectiles.retain(|p| p.alive);
    if let Some(minions) = minions {
        minions.retain(|m| m.alive);
    }
}

fn emit_events(arena: &mut Arena, player_was_alive: bool, boss_was_alive: bool) {
    if let Some(boss) = arena.boss.as_mut() {
        if boss.core_mut().take_attack_signal() {
            arena.events.push(GameEvent::BossAttacked);
        }
        if let Some(host) = boss.as_minion_host_mut() {
            let count = host.take_summoned();
            if count > 0 {
                arena.events.push(GameEvent::MinionsSummoned { count });
            }
        }
    }

    let amount = arena.player.drain_damage_taken();
    if amount > 0.0 {
        arena.events.push(GameEvent::PlayerHit { amount });
    }
    if player_was_alive && arena.player.dead {
        arena.events.push(GameEvent::PlayerDied);
    }

    if boss_was_alive && !arena.has_live_boss() && !arena.player.dead {
        if let Some(boss) = arena.boss.as_ref() {
            log::info!("Boss defeated: {} after {:.1}s", boss.name(), arena.time);
            arena.player.unlock_mask(boss.kind().mask());
            arena.events.push(GameEvent::BossDefeated {
                name: boss.name().to_string(),
            });
        }
    }
}
