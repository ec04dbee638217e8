//! Heads-up display: health, flasks, dash meter, boss bar and the death screen

use glam::Vec2;

use super::shapes::{BLACK, BLOOD, rgb, with_alpha};
use super::{Canvas, Color};
use crate::arena_center;
use crate::consts::ARENA_WIDTH;
use crate::sim::{Aabb, Boss, Player};

const HEALTH_FG: Color = rgb(180, 30, 30);
const HEALTH_BG: Color = rgb(100, 0, 0);
const FLASK_FULL: Color = rgb(200, 180, 80);
const FLASK_EMPTY: Color = rgb(80, 80, 40);
const DASH_FG: Color = rgb(79, 121, 66);
const DASH_BG: Color = [30.0 / 255.0, 30.0 / 255.0, 30.0 / 255.0, 0.5];
const BOSS_FG: Color = rgb(255, 80, 80);
const BOSS_BG: Color = rgb(50, 0, 0);
const BOSS_NAME: Color = rgb(255, 200, 0);

/// Darkest the death overlay gets
const DEATH_OVERLAY_MAX: f32 = 200.0 / 255.0;

/// Health bar (animated display value), flask pips and the dash meter
pub fn draw_player_hud(canvas: &mut dyn Canvas, player: &Player) {
    let health = Aabb::from_min_size(Vec2::new(20.0, 20.0), Vec2::new(200.0, 20.0));
    canvas.bar(health, player.display_health / player.max_health, HEALTH_FG, HEALTH_BG);

    for i in 0..player.max_flasks {
        let pip = Aabb::from_min_size(Vec2::new(20.0 + i as f32 * 25.0, 50.0), Vec2::splat(20.0));
        let fill = if i < player.flasks { 1.0 } else { 0.0 };
        canvas.bar(pip, fill, FLASK_FULL, FLASK_EMPTY);
    }

    let dash = Aabb::from_min_size(Vec2::new(20.0, 80.0), Vec2::new(200.0, 20.0));
    canvas.bar(dash, player.dash_ready_ratio(), DASH_FG, DASH_BG);
}

/// Boss name and health along the bottom edge. Nothing once defeated.
pub fn draw_boss_hud(canvas: &mut dyn Canvas, boss: &Boss) {
    if !boss.is_alive() {
        return;
    }
    let width = 600.0;
    let bar = Aabb::from_min_size(
        Vec2::new((ARENA_WIDTH - width) / 2.0, 750.0),
        Vec2::new(width, 20.0),
    );
    canvas.bar(bar, boss.core().health_ratio(), BOSS_FG, BOSS_BG);
    canvas.text(Vec2::new(bar.center.x, 725.0), 48.0, boss.name(), BOSS_NAME);
}

/// "YOU DIED" fading in over a darkened arena
pub fn draw_death_overlay(canvas: &mut dyn Canvas, player: &Player) {
    if !player.dead {
        return;
    }
    let fade = player.death_fade();
    canvas.overlay(with_alpha(BLACK, fade.min(DEATH_OVERLAY_MAX)));
    canvas.text(arena_center(), 150.0, "YOU DIED", with_alpha(BLOOD, fade));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCmd, DrawList};
    use crate::sim::{BossKind, seeded_rng};
    use crate::tuning::Tuning;

    #[test]
    fn test_player_hud_shows_flasks_and_health() {
        let mut player = Player::new();
        player.display_health = 50.0;
        player.flasks = 1;
        let mut list = DrawList::new();
        draw_player_hud(&mut list, &player);

        let fills: Vec<f32> = list
            .cmds
            .iter()
            .filter_map(|c| match c {
                DrawCmd::Bar { fill, .. } => Some(*fill),
                _ => None,
            })
            .collect();
        // health, three flasks, dash
        assert_eq!(fills, vec![0.5, 1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_boss_hud_has_name() {
        let mut rng = seeded_rng(1);
        let mut boss = Boss::spawn(BossKind::ScarecrowLord, &Tuning::default(), &mut rng);
        boss.take_damage(750.0);
        let mut list = DrawList::new();
        draw_boss_hud(&mut list, &boss);
        assert!(matches!(list.cmds[0], DrawCmd::Bar { fill, .. } if (fill - 0.5).abs() < 1e-6));
        assert_eq!(list.texts().collect::<Vec<_>>(), vec!["Scarecrow Lord"]);
    }

    #[test]
    fn test_death_overlay_only_when_dead() {
        let mut player = Player::new();
        let mut list = DrawList::new();
        draw_death_overlay(&mut list, &player);
        assert!(list.is_empty());

        player.take_damage(200.0);
        player.death_timer = 10.0;
        draw_death_overlay(&mut list, &player);
        assert!(matches!(
            list.cmds[0],
            DrawCmd::Overlay { color } if (color[3] - DEATH_OVERLAY_MAX).abs() < 1e-6
        ));
        assert_eq!(list.texts().collect::<Vec<_>>(), vec!["YOU DIED"]);
    }
}
