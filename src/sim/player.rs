//! The player character
//!
//! Movement, dash, attack, heal and the damage/invulnerability state machine.
//! Commands are advisory: each one returns whether it took effect and is
//! silently ignored when its preconditions fail.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::SimRng;
use super::effect::{Particle, update_particles};
use super::geom::Aabb;
use super::projectile::{Projectile, ProjectileSpec, update_projectiles};
use crate::consts::*;
use crate::tuning::{ContactDamagePolicy, ProjectileHitPolicy};

pub const DASH_TIME: f32 = 0.2;
pub const DASH_COOLDOWN: f32 = 1.0;
pub const ATTACK_COOLDOWN: f32 = 0.3;
pub const INVULN_TIME: f32 = 1.0;
pub const HEAL_AMOUNT: f32 = 40.0;
pub const HEAL_DURATION: f32 = 1.0;
/// How fast the displayed health catches up outside of a heal (units/s)
pub const DISPLAY_REGROW_SPEED: f32 = 80.0;
/// Displayed health snaps to the real value past this gap
pub const DISPLAY_SNAP_GAP: f32 = 5.0;
pub const FOOTSTEP_INTERVAL: f32 = 0.15;
pub const HIT_SPARK_COUNT: u32 = 10;
/// Attack projectiles spawn this far ahead of the player's center
pub const ATTACK_SPAWN_OFFSET: f32 = 32.0;

/// Which way the sprite faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    Left,
    Right,
}

impl Facing {
    pub fn unit(self) -> Vec2 {
        match self {
            Facing::Left => Vec2::NEG_X,
            Facing::Right => Vec2::X,
        }
    }
}

/// Masks earned by beating bosses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaskKind {
    Fire,
    Veil,
    Straw,
}

/// Dash timers
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DashState {
    pub active: bool,
    /// Seconds of dash left while active
    pub time_left: f32,
    /// Seconds until the next dash may start
    pub cooldown: f32,
}

/// Heal animation
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct HealState {
    pub active: bool,
    pub timer: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Center of the sprite
    pub pos: Vec2,
    pub facing: Facing,
    pub masked: bool,
    pub masks: Vec<MaskKind>,
    pub speed: f32,
    pub dash_speed: f32,
    pub max_health: f32,
    pub current_health: f32,
    /// Health bar value; animates toward `current_health`
    pub display_health: f32,
    pub max_flasks: u8,
    pub flasks: u8,
    pub dash: DashState,
    pub attack_timer: f32,
    pub heal: HealState,
    pub invuln_timer: f32,
    pub dead: bool,
    pub death_timer: f32,
    /// White flash after a hit, 1 to 0
    pub hit_flash: f32,
    /// Latest movement request, applied on update
    pub move_intent: Vec2,
    foot_timer: f32,
    pending_sparks: u32,
    /// Health lost since the arena last asked
    damage_taken: f32,
    pub projectiles: Vec<Projectile>,
    /// Footsteps and hit sparks
    #[serde(skip)]
    pub particles: Vec<Particle>,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(PLAYER_SPAWN.0, PLAYER_SPAWN.1),
            facing: Facing::Left,
            masked: false,
            masks: Vec::new(),
            speed: PLAYER_SPEED,
            dash_speed: PLAYER_DASH_SPEED,
            max_health: PLAYER_MAX_HEALTH,
            current_health: PLAYER_MAX_HEALTH,
            display_health: PLAYER_MAX_HEALTH,
            max_flasks: PLAYER_MAX_FLASKS,
            flasks: PLAYER_MAX_FLASKS,
            dash: DashState::default(),
            attack_timer: 0.0,
            heal: HealState::default(),
            invuln_timer: 0.0,
            dead: false,
            death_timer: 0.0,
            hit_flash: 0.0,
            move_intent: Vec2::ZERO,
            foot_timer: 0.0,
            pending_sparks: 0,
            damage_taken: 0.0,
            projectiles: Vec::new(),
            particles: Vec::new(),
        }
    }

    /// Put the player back to a fresh-fight state. Earned masks are kept.
    pub fn restart(&mut self) {
        self.pos = Vec2::new(PLAYER_SPAWN.0, PLAYER_SPAWN.1);
        self.current_health = self.max_health;
        self.display_health = self.max_health;
        self.flasks = self.max_flasks;
        self.dash = DashState::default();
        self.attack_timer = 0.0;
        self.heal = HealState::default();
        self.invuln_timer = 0.0;
        self.dead = false;
        self.death_timer = 0.0;
        self.hit_flash = 0.0;
        self.move_intent = Vec2::ZERO;
        self.foot_timer = 0.0;
        self.pending_sparks = 0;
        self.damage_taken = 0.0;
        self.projectiles.clear();
        self.particles.clear();
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_size(self.pos, Vec2::splat(PLAYER_SIZE))
    }

    #[inline]
    pub fn is_dashing(&self) -> bool {
        self.dash.active
    }

    #[inline]
    pub fn is_healing(&self) -> bool {
        self.heal.active
    }

    /// Death screen opacity, 0 to 1
    pub fn death_fade(&self) -> f32 {
        (self.death_timer * 128.0 / 255.0).min(1.0)
    }

    /// Dash bar fill, 1 when ready
    pub fn dash_ready_ratio(&self) -> f32 {
        (1.0 - self.dash.cooldown / DASH_COOLDOWN).clamp(0.0, 1.0)
    }

    /// Record a movement request. Any non-zero vector works; it is normalized on update.
    pub fn move_intent(&mut self, dir: Vec2) {
        if self.dead {
            self.move_intent = Vec2::ZERO;
            return;
        }
        if dir.x < 0.0 {
            self.facing = Facing::Left;
        } else if dir.x > 0.0 {
            self.facing = Facing::Right;
        }
        self.move_intent = dir;
    }

    pub fn start_dash(&mut self) -> bool {
        if self.dead || self.dash.active || self.dash.cooldown > 0.0 {
            return false;
        }
        self.dash.active = true;
        self.dash.time_left = DASH_TIME;
        true
    }

    /// Fire toward `direction`, or the facing direction when it is absent or zero
    pub fn attack(&mut self, direction: Option<Vec2>, spec: ProjectileSpec) -> bool {
        if self.dead || self.attack_timer > 0.0 {
            return false;
        }
        let facing = self.facing.unit();
        let dir = direction.map_or(facing, |d| d.normalize_or(facing));
        let spawn = self.pos + dir * ATTACK_SPAWN_OFFSET;
        self.projectiles.push(Projectile::new(spawn, dir, spec));
        self.attack_timer = ATTACK_COOLDOWN;
        true
    }

    pub fn heal(&mut self) -> bool {
        if self.dead
            || self.heal.active
            || self.flasks == 0
            || self.current_health >= self.max_health
        {
            return false;
        }
        self.heal.active = true;
        self.heal.timer = HEAL_DURATION;
        self.flasks -= 1;
        true
    }

    pub fn toggle_mask(&mut self) {
        self.masked = !self.masked;
    }

    /// Remember a mask earned from a boss and put it on
    pub fn unlock_mask(&mut self, mask: MaskKind) {
        if !self.masks.contains(&mask) {
            self.masks.push(mask);
        }
        self.masked = true;
    }

    /// Apply damage unless invulnerable. Returns true if the hit landed.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if self.dead || amount <= 0.0 || self.invuln_timer > 0.0 {
            return false;
        }
        self.apply_hit(amount);
        true
    }

    /// Damage from touching a boss or minion
    pub fn take_contact_damage(&mut self, amount: f32, policy: ContactDamagePolicy) -> bool {
        match policy {
            ContactDamagePolicy::RespectInvulnerability => self.take_damage(amount),
            ContactDamagePolicy::BypassInvulnerability => {
                if self.dead || amount <= 0.0 {
                    return false;
                }
                self.apply_hit(amount);
                true
            }
        }
    }

    fn apply_hit(&mut self, amount: f32) {
        let before = self.current_health;
        self.current_health = (self.current_health - amount).max(0.0);
        self.damage_taken += before - self.current_health;
        self.display_health = self.current_health;
        self.hit_flash = 1.0;
        self.pending_sparks += HIT_SPARK_COUNT;
        self.invuln_timer = INVULN_TIME;
        log::debug!("Player took {} damage, health {}", amount, self.current_health);

        if self.current_health <= 0.0 {
            self.current_health = 0.0;
            self.display_health = 0.0;
            self.dead = true;
            self.death_timer = 0.0;
            self.heal = HealState::default();
            log::info!("Player died");
        }
    }

    /// Health lost since the last call
    pub fn drain_damage_taken(&mut self) -> f32 {
        std::mem::take(&mut self.damage_taken)
    }

    /// Advance one tick.
    ///
    /// `incoming` are the boss's projectiles: overlapping ones are consumed and
    /// hurt the player while the invulnerability window is closed. Returns how
    /// many projectiles were consumed.
    pub fn update(
        &mut self,
        dt: f32,
        incoming: &mut [Projectile],
        hits: ProjectileHitPolicy,
        arena: &Aabb,
        rng: &mut SimRng,
    ) -> usize {
        if self.invuln_timer > 0.0 {
            self.invuln_timer = (self.invuln_timer - dt).max(0.0);
        }

        let consumed = if self.invuln_timer <= 0.0 && !self.dead {
            self.absorb(incoming, hits)
        } else {
            0
        };

        self.step_movement(dt, arena);

        // Timers run after movement so a dash covers its whole duration
        if self.dash.active {
            self.dash.time_left -= dt;
            if self.dash.time_left <= 0.0 {
                self.dash.active = false;
                self.dash.time_left = 0.0;
                self.dash.cooldown = DASH_COOLDOWN;
            }
        } else if self.dash.cooldown > 0.0 {
            self.dash.cooldown = (self.dash.cooldown - dt).max(0.0);
        }
        if self.attack_timer > 0.0 {
            self.attack_timer = (self.attack_timer - dt).max(0.0);
        }

        self.update_heal(dt);

        if self.dead {
            self.death_timer += dt;
        }

        self.hit_flash = (self.hit_flash - dt * 600.0 / 255.0).max(0.0);
        update_particles(&mut self.particles, dt);
        for _ in 0..std::mem::take(&mut self.pending_sparks) {
            self.particles.push(Particle::hit_spark(self.pos, rng));
        }

        update_projectiles(&mut self.projectiles, dt, arena, rng);
        consumed
    }

    fn absorb(&mut self, incoming: &mut [Projectile], hits: ProjectileHitPolicy) -> usize {
        let bounds = self.bounds();
        let mut consumed = 0;
        for proj in incoming.iter_mut().filter(|p| p.alive) {
            if !proj.bounds().intersects(&bounds) {
                continue;
            }
            self.take_damage(proj.damage);
            proj.kill();
            consumed += 1;
            if hits == ProjectileHitPolicy::OnePerTick {
                break;
            }
        }
        consumed
    }

    fn step_movement(&mut self, dt: f32, arena: &Aabb) {
        if self.dead {
            return;
        }
        let dir = self.move_intent.normalize_or_zero();
        if dir == Vec2::ZERO {
            return;
        }
        let speed = if self.dash.active { self.dash_speed } else { self.speed };
        let half = Vec2::splat(PLAYER_SIZE / 2.0);
        self.pos = Aabb::clamp_center(self.pos + dir * speed * dt, half, arena);

        self.foot_timer -= dt;
        if self.foot_timer <= 0.0 {
            self.foot_timer = FOOTSTEP_INTERVAL;
            let feet = self.pos + Vec2::new(0.0, PLAYER_SIZE / 2.0);
            self.particles.push(Particle::footstep(feet));
        }
    }

    fn update_heal(&mut self, dt: f32) {
        if self.dead {
            return;
        }
        if self.heal.active {
            self.heal.timer -= dt;
            let progress = (1.0 - self.heal.timer / HEAL_DURATION).clamp(0.0, 1.0);
            let target = (self.current_health + HEAL_AMOUNT).min(self.max_health);
            self.display_health = self.current_health + (target - self.current_health) * progress;

            if self.heal.timer <= 0.0 {
                self.heal = HealState::default();
                self.current_health = target;
                self.display_health = target;
            }
        } else {
            if self.display_health < self.current_health {
                self.display_health =
                    (self.display_health + DISPLAY_REGROW_SPEED * dt).min(self.current_health);
            }
            if (self.display_health - self.current_health).abs() > DISPLAY_SNAP_GAP {
                self.display_health = self.current_health;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::seeded_rng;
    use proptest::prelude::*;

    fn step(player: &mut Player, dt: f32) {
        let mut rng = seeded_rng(3);
        player.update(dt, &mut [], ProjectileHitPolicy::OnePerTick, &Aabb::arena(), &mut rng);
    }

    #[test]
    fn test_move_normalizes_diagonal() {
        let mut player = Player::new();
        player.pos = Vec2::new(400.0, 400.0);
        player.move_intent(Vec2::new(1.0, 1.0));
        step(&mut player, 0.1);
        let moved = player.pos - Vec2::new(400.0, 400.0);
        assert!((moved.length() - PLAYER_SPEED * 0.1).abs() < 1e-3);
        assert_eq!(player.facing, Facing::Right);
    }

    #[test]
    fn test_move_clamped_to_arena() {
        let mut player = Player::new();
        player.move_intent(Vec2::new(-1.0, 0.0));
        for _ in 0..200 {
            step(&mut player, 1.0 / 60.0);
        }
        assert!((player.pos.x - PLAYER_SIZE / 2.0).abs() < 1e-3);
        assert_eq!(player.bounds().escapes(&Aabb::arena()), (false, false));
    }

    #[test]
    fn test_dead_player_does_not_move() {
        let mut player = Player::new();
        player.take_damage(1000.0);
        let before = player.pos;
        player.move_intent(Vec2::X);
        step(&mut player, 0.1);
        assert_eq!(player.pos, before);
        assert!(!player.start_dash());
        assert!(!player.attack(None, ProjectileSpec::PLAYER_BOLT));
    }

    #[test]
    fn test_dash_lifecycle() {
        let mut player = Player::new();
        assert!(player.start_dash());
        assert!(!player.start_dash());

        step(&mut player, 0.1);
        assert!(player.is_dashing());
        step(&mut player, 0.1);
        assert!(!player.is_dashing());
        assert_eq!(player.dash.cooldown, DASH_COOLDOWN);

        // Still cooling down
        step(&mut player, 0.5);
        assert!(!player.start_dash());
        step(&mut player, 0.5);
        assert!(player.start_dash());
    }

    #[test]
    fn test_dash_uses_dash_speed() {
        let mut player = Player::new();
        player.pos = Vec2::new(400.0, 400.0);
        player.move_intent(Vec2::new(0.0, 1.0));
        player.start_dash();
        step(&mut player, 0.05);
        assert!((player.pos.y - (400.0 + PLAYER_DASH_SPEED * 0.05)).abs() < 1e-3);
    }

    #[test]
    fn test_attack_cooldown() {
        let mut player = Player::new();
        player.facing = Facing::Right;
        assert!(player.attack(None, ProjectileSpec::PLAYER_BOLT));
        assert!(!player.attack(None, ProjectileSpec::PLAYER_BOLT));
        assert_eq!(player.projectiles.len(), 1);
        assert!(player.projectiles[0].vel.x > 0.0);
        assert_eq!(player.projectiles[0].pos, player.pos + Vec2::new(ATTACK_SPAWN_OFFSET, 0.0));

        step(&mut player, 0.3);
        assert!(player.attack(Some(Vec2::ZERO), ProjectileSpec::PLAYER_BOLT));
        // Zero direction falls back to facing
        assert!(player.projectiles.last().map(|p| p.vel.x > 0.0).unwrap_or(false));
    }

    #[test]
    fn test_heal_scenario() {
        let mut player = Player::new();
        player.current_health = 60.0;
        player.display_health = 60.0;
        assert!(player.heal());
        assert_eq!(player.flasks, 2);
        assert!(!player.heal());

        for _ in 0..4 {
            step(&mut player, 0.25);
        }
        assert!(!player.is_healing());
        assert_eq!(player.current_health, 100.0);
        assert_eq!(player.display_health, 100.0);
    }

    #[test]
    fn test_heal_display_interpolates() {
        let mut player = Player::new();
        player.current_health = 20.0;
        player.display_health = 20.0;
        player.heal();
        step(&mut player, 0.5);
        assert!((player.display_health - 40.0).abs() < 1e-3);
        assert_eq!(player.current_health, 20.0);
    }

    #[test]
    fn test_heal_rejected_at_full_or_empty() {
        let mut player = Player::new();
        assert!(!player.heal());
        player.current_health = 50.0;
        player.flasks = 0;
        assert!(!player.heal());
    }

    #[test]
    fn test_damage_and_invulnerability() {
        let mut player = Player::new();
        assert!(player.take_damage(30.0));
        assert!(!player.take_damage(30.0));
        assert_eq!(player.current_health, 70.0);
        assert_eq!(player.display_health, 70.0);

        step(&mut player, 1.0);
        assert!(player.take_damage(30.0));
        assert_eq!(player.current_health, 40.0);
    }

    #[test]
    fn test_contact_damage_policies() {
        let mut player = Player::new();
        assert!(player.take_contact_damage(10.0, ContactDamagePolicy::RespectInvulnerability));
        assert!(!player.take_contact_damage(10.0, ContactDamagePolicy::RespectInvulnerability));
        assert_eq!(player.current_health, 90.0);

        assert!(player.take_contact_damage(10.0, ContactDamagePolicy::BypassInvulnerability));
        assert_eq!(player.current_health, 80.0);
        assert_eq!(player.invuln_timer, INVULN_TIME);
    }

    #[test]
    fn test_hit_spawns_sparks() {
        let mut player = Player::new();
        player.take_damage(10.0);
        step(&mut player, 1.0 / 60.0);
        let sparks = player
            .particles
            .iter()
            .filter(|p| p.kind == crate::sim::ParticleKind::HitSpark)
            .count();
        assert_eq!(sparks, HIT_SPARK_COUNT as usize);
    }

    #[test]
    fn test_lethal_damage_kills_and_fades() {
        let mut player = Player::new();
        player.take_damage(150.0);
        assert!(player.dead);
        assert_eq!(player.current_health, 0.0);
        step(&mut player, 1.0);
        assert!(player.death_fade() > 0.4);
        step(&mut player, 2.0);
        assert_eq!(player.death_fade(), 1.0);
    }

    #[test]
    fn test_lethal_hit_cancels_heal() {
        let mut player = Player::new();
        player.current_health = 15.0;
        player.display_health = 15.0;
        assert!(player.heal());
        assert!(player.take_damage(20.0));
        assert!(player.dead);
        assert!(!player.is_healing());

        for _ in 0..70 {
            step(&mut player, 1.0 / 60.0);
        }
        assert_eq!(player.current_health, 0.0);
        assert_eq!(player.display_health, 0.0);
        assert!(player.dead);
    }

    #[test]
    fn test_incoming_projectile_one_per_tick() {
        let mut player = Player::new();
        let mut rng = seeded_rng(9);
        let mut shots: Vec<Projectile> = (0..3)
            .map(|_| Projectile::new(player.pos, Vec2::X, ProjectileSpec::BOSS_SHOT))
            .collect();
        let consumed = player.update(
            1.0 / 60.0,
            &mut shots,
            ProjectileHitPolicy::OnePerTick,
            &Aabb::arena(),
            &mut rng,
        );
        assert_eq!(consumed, 1);
        assert_eq!(shots.iter().filter(|p| p.alive).count(), 2);
        assert_eq!(player.current_health, 80.0);
    }

    #[test]
    fn test_incoming_projectile_all_policy() {
        let mut player = Player::new();
        let mut rng = seeded_rng(9);
        let mut shots: Vec<Projectile> = (0..3)
            .map(|_| Projectile::new(player.pos, Vec2::X, ProjectileSpec::BOSS_SHOT))
            .collect();
        let consumed = player.update(
            1.0 / 60.0,
            &mut shots,
            ProjectileHitPolicy::All,
            &Aabb::arena(),
            &mut rng,
        );
        assert_eq!(consumed, 3);
        // Only the first hit lands; the window swallows the rest
        assert_eq!(player.current_health, 80.0);
    }

    #[test]
    fn test_restart_resets_fields() {
        let mut player = Player::new();
        player.unlock_mask(MaskKind::Fire);
        player.take_damage(500.0);
        player.flasks = 0;
        player.restart();
        assert!(!player.dead);
        assert_eq!(player.current_health, player.max_health);
        assert_eq!(player.flasks, PLAYER_MAX_FLASKS);
        assert_eq!(player.masks, vec![MaskKind::Fire]);
    }

    proptest! {
        #[test]
        fn prop_damage_clamps_at_zero(health in 1.0f32..100.0, amount in 0.1f32..300.0) {
            let mut player = Player::new();
            player.current_health = health;
            player.take_damage(amount);
            prop_assert_eq!(player.current_health, (health - amount).max(0.0));
            prop_assert_eq!(player.dead, player.current_health == 0.0);
        }

        #[test]
        fn prop_one_hit_per_invuln_window(hits in proptest::collection::vec(1.0f32..30.0, 1..10)) {
            let mut player = Player::new();
            let first = hits[0];
            for amount in &hits {
                player.take_damage(*amount);
            }
            prop_assert_eq!(player.current_health, PLAYER_MAX_HEALTH - first);
        }

        #[test]
        fn prop_heal_result(health in 1.0f32..99.0) {
            let mut player = Player::new();
            player.current_health = health;
            player.display_health = health;
            prop_assert!(player.heal());
            for _ in 0..4 {
                step(&mut player, 0.25);
            }
            prop_assert_eq!(player.flasks, PLAYER_MAX_FLASKS - 1);
            prop_assert_eq!(player.current_health, (health + HEAL_AMOUNT).min(PLAYER_MAX_HEALTH));
        }
    }
}
