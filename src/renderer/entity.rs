//! The shared capability set of everything that fights in the arena

use glam::Vec2;

use super::Canvas;
use super::hud::{draw_boss_hud, draw_death_overlay, draw_player_hud};
use super::shapes::{WHITE, draw_particles, with_alpha};
use crate::sim::boss::{Pumpking, ScarecrowLord, SpecterBride};
use crate::sim::{Aabb, Arena, Boss, Facing, Minion, Player, Projectile, TrailStyle};

/// Something with a place in the arena that can draw itself
pub trait Entity {
    fn position(&self) -> Vec2;
    fn bounds(&self) -> Aabb;
    fn is_alive(&self) -> bool;
    fn draw(&self, canvas: &mut dyn Canvas);
}

impl Entity for Player {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn bounds(&self) -> Aabb {
        Player::bounds(self)
    }

    fn is_alive(&self) -> bool {
        !self.dead
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        draw_particles(canvas, &self.particles);

        let name = if self.masked { "player_masked" } else { "player" };
        let tint = (self.hit_flash > 0.0).then(|| with_alpha(WHITE, self.hit_flash));
        canvas.sprite(name, Player::bounds(self), self.facing == Facing::Left, 1.0, tint);

        for proj in &self.projectiles {
            proj.draw(canvas);
        }
    }
}

impl Entity for Projectile {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn bounds(&self) -> Aabb {
        Projectile::bounds(self)
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        draw_particles(canvas, &self.particles);
        if !self.alive {
            return;
        }
        let (name, alpha) = match self.trail {
            TrailStyle::Sparkle => ("bolt", 1.0),
            TrailStyle::Ghost { .. } => ("wisp", self.life.map_or(1.0, |l| 0.4 + 0.6 * l.fade())),
        };
        canvas.sprite(name, Projectile::bounds(self), self.vel.x < 0.0, alpha, None);
    }
}

impl Entity for Minion {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn bounds(&self) -> Aabb {
        Minion::bounds(self)
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        if !self.alive {
            return;
        }
        // Fade out over the last second
        let alpha = self.life.remaining().min(1.0);
        canvas.sprite("minion", Minion::bounds(self), self.direction.x < 0.0, alpha, None);
    }
}

impl Entity for Pumpking {
    fn position(&self) -> Vec2 {
        self.core.pos
    }

    fn bounds(&self) -> Aabb {
        self.core.bounds()
    }

    fn is_alive(&self) -> bool {
        self.core.alive
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        if !self.core.alive {
            return;
        }
        canvas.sprite("pumpking", self.core.bounds(), false, 1.0, None);
        for proj in &self.core.projectiles {
            proj.draw(canvas);
        }
    }
}

impl Entity for SpecterBride {
    fn position(&self) -> Vec2 {
        self.core.pos
    }

    fn bounds(&self) -> Aabb {
        self.core.bounds()
    }

    fn is_alive(&self) -> bool {
        self.core.alive
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        if !self.core.alive {
            return;
        }
        canvas.sprite("specter_bride", self.core.bounds(), false, self.opacity, None);
        for proj in &self.core.projectiles {
            proj.draw(canvas);
        }
    }
}

impl Entity for ScarecrowLord {
    fn position(&self) -> Vec2 {
        self.core.pos
    }

    fn bounds(&self) -> Aabb {
        self.core.bounds()
    }

    fn is_alive(&self) -> bool {
        self.core.alive
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        if !self.core.alive {
            return;
        }
        draw_particles(canvas, &self.trail);
        for minion in &self.minions {
            minion.draw(canvas);
        }
        canvas.sprite("scarecrow_lord", self.core.bounds(), false, 1.0, None);
        for proj in &self.core.projectiles {
            proj.draw(canvas);
        }
    }
}

impl Entity for Boss {
    fn position(&self) -> Vec2 {
        self.core().pos
    }

    fn bounds(&self) -> Aabb {
        Boss::bounds(self)
    }

    fn is_alive(&self) -> bool {
        Boss::is_alive(self)
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        match self {
            Boss::Pumpking(b) => b.draw(canvas),
            Boss::SpecterBride(b) => b.draw(canvas),
            Boss::ScarecrowLord(b) => b.draw(canvas),
        }
    }
}

/// Draw one frame of the fight: boss, player, HUD, then the death overlay
pub fn draw_arena(canvas: &mut dyn Canvas, arena: &Arena) {
    if let Some(boss) = arena.boss.as_ref() {
        boss.draw(canvas);
    }
    arena.player.draw(canvas);

    draw_player_hud(canvas, &arena.player);
    if let Some(boss) = arena.boss.as_ref() {
        draw_boss_hud(canvas, boss);
    }
    draw_death_overlay(canvas, &arena.player);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCmd, DrawList};
    use crate::sim::seeded_rng;
    use crate::sim::{BossKind, ProjectileSpec};
    use crate::tuning::Tuning;

    fn spawn(kind: BossKind) -> Boss {
        let mut rng = seeded_rng(3);
        Boss::spawn(kind, &Tuning::default(), &mut rng)
    }

    #[test]
    fn test_defeated_boss_draws_nothing() {
        for kind in BossKind::ALL {
            let mut boss = spawn(kind);
            let mut list = DrawList::new();
            boss.draw(&mut list);
            assert!(!list.is_empty());

            boss.take_damage(kind.max_health());
            let mut list = DrawList::new();
            boss.draw(&mut list);
            draw_boss_hud(&mut list, &boss);
            assert!(list.is_empty(), "{:?} still drew {:?}", kind, list.cmds);
        }
    }

    #[test]
    fn test_dead_projectile_not_drawn() {
        let mut proj =
            Projectile::new(Vec2::new(100.0, 100.0), Vec2::X, ProjectileSpec::PLAYER_BOLT);
        let mut list = DrawList::new();
        proj.draw(&mut list);
        assert_eq!(list.sprites_named("bolt"), 1);

        proj.kill();
        let mut list = DrawList::new();
        proj.draw(&mut list);
        assert_eq!(list.sprites_named("bolt"), 0);
    }

    #[test]
    fn test_player_sprite_follows_mask_and_facing() {
        let mut player = Player::new();
        let mut list = DrawList::new();
        player.draw(&mut list);
        assert!(matches!(
            &list.cmds[0],
            DrawCmd::Sprite { name, flip_x: true, .. } if name == "player"
        ));

        player.toggle_mask();
        player.facing = Facing::Right;
        let mut list = DrawList::new();
        player.draw(&mut list);
        assert!(matches!(
            &list.cmds[0],
            DrawCmd::Sprite { name, flip_x: false, .. } if name == "player_masked"
        ));
    }

    #[test]
    fn test_bride_uses_opacity() {
        let mut boss = spawn(BossKind::SpecterBride);
        if let Boss::SpecterBride(bride) = &mut boss {
            bride.opacity = 0.25;
        }
        let mut list = DrawList::new();
        boss.draw(&mut list);
        assert!(matches!(
            &list.cmds[0],
            DrawCmd::Sprite { alpha, .. } if *alpha == 0.25
        ));
    }

    #[test]
    fn test_entity_capabilities() {
        let boss = spawn(BossKind::ScarecrowLord);
        let entities: Vec<&dyn Entity> = vec![&boss];
        assert!(entities.iter().all(|e| e.is_alive()));
        assert_eq!(entities[0].position(), Vec2::new(400.0, 300.0));
        assert_eq!(entities[0].bounds().size(), Vec2::splat(220.0));
    }

    #[test]
    fn test_draw_arena_with_and_without_boss() {
        let mut arena = Arena::new(1, Tuning::default());
        let mut list = DrawList::new();
        draw_arena(&mut list, &arena);
        assert_eq!(list.sprites_named("player"), 1);
        assert!(list.texts().next().is_none());

        arena.select_boss(BossKind::Pumpking);
        let mut list = DrawList::new();
        draw_arena(&mut list, &arena);
        assert_eq!(list.sprites_named("pumpking"), 1);
        assert!(list.texts().any(|t| t == "Pump-King"));
    }
}
