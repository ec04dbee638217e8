//! Frame driver
//!
//! A `Session` owns the screen state machine and the arena. Each frame it
//! feeds the elapsed time through a fixed-step accumulator, turns arena
//! events into camera shake and screen transitions, and draws whatever the
//! current screen shows.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::fog::FogBank;
use crate::renderer::shapes::{WHITE, rgb};
use crate::renderer::{Canvas, Color, draw_arena};
use crate::screen::{Screen, ScreenEvent, TransitionError};
use crate::settings::Settings;
use crate::sim::{Aabb, Arena, BossKind, GameEvent, SimRng, TickInput, seeded_rng, tick};
use crate::tuning::Tuning;

pub const SHAKE_DURATION: f32 = 0.4;
pub const SHAKE_INTENSITY: f32 = 10.0;
/// Cosmetic RNG stream, kept apart from the arena's
const FX_SEED_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Background jolt after boss attacks
#[derive(Debug, Clone, Copy, Default)]
pub struct CameraShake {
    pub timer: f32,
    pub intensity: f32,
    pub offset: Vec2,
}

impl CameraShake {
    pub fn trigger(&mut self) {
        self.timer = SHAKE_DURATION;
        self.intensity = SHAKE_INTENSITY;
    }

    pub fn is_active(&self) -> bool {
        self.timer > 0.0
    }

    pub fn update(&mut self, dt: f32, rng: &mut SimRng) {
        if self.timer > 0.0 {
            self.timer = (self.timer - dt).max(0.0);
            let i = self.intensity;
            self.offset = Vec2::new(rng.random_range(-i..=i), rng.random_range(-i..=i));
        } else {
            self.offset = Vec2::ZERO;
        }
    }
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    BossDefeated,
    PlayerDied,
    InProgress,
}

/// Counters collected from arena events
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    pub boss_attacks: u32,
    pub hits_taken: u32,
    pub damage_taken: f32,
    pub minions_summoned: u32,
}

/// Result of a run, printed by the headless binary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub seed: u64,
    pub boss: Option<String>,
    pub outcome: Outcome,
    pub screen: Screen,
    pub sim_seconds: f32,
    pub ticks: u64,
    pub player_health: f32,
    pub flasks_left: u8,
    pub boss_health: Option<f32>,
    pub masks: usize,
    pub defeated: Vec<String>,
    pub stats: RunStats,
}

pub struct Session {
    pub screen: Screen,
    pub arena: Arena,
    pub settings: Settings,
    /// Held input; one-shot commands are cleared after the first substep
    pub input: TickInput,
    pub fog: FogBank,
    pub shake: CameraShake,
    /// Bosses beaten this session, in order
    pub defeated: Vec<BossKind>,
    pub stats: RunStats,
    accumulator: f32,
    fx_rng: SimRng,
    quit: bool,
}

impl Session {
    pub fn new(seed: u64, tuning: Tuning, settings: Settings) -> Self {
        let mut fx_rng = seeded_rng(seed ^ FX_SEED_SALT);
        let fog = FogBank::new(settings.fog_puffs(), &mut fx_rng);
        log::info!("Session started with seed {}", seed);
        Self {
            screen: Screen::Start,
            arena: Arena::new(seed, tuning),
            settings,
            input: TickInput::default(),
            fog,
            shake: CameraShake::default(),
            defeated: Vec::new(),
            stats: RunStats::default(),
            accumulator: 0.0,
            fx_rng,
            quit: false,
        }
    }

    /// True once the player quit from the title screen
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Apply a screen event and its side effects on the arena
    pub fn handle(&mut self, event: ScreenEvent) -> Result<Screen, TransitionError> {
        let from = self.screen;
        let to = match from.transition(event) {
            Ok(to) => to,
            Err(e) => {
                log::warn!("Rejected screen event: {}", e);
                return Err(e);
            }
        };

        match (from, event) {
            (Screen::Start, ScreenEvent::Quit) => self.quit = true,
            (_, ScreenEvent::ChooseBoss(kind)) => {
                self.arena.player.restart();
                self.arena.select_boss(kind);
                self.stats = RunStats::default();
            }
            (Screen::Death, ScreenEvent::Restart) => self.arena.restart(),
            (Screen::BossCleared, ScreenEvent::Confirm)
            | (Screen::Death, ScreenEvent::Back)
            | (_, ScreenEvent::Quit) => {
                self.arena.clear_boss();
                self.arena.player.restart();
            }
            _ => {}
        }

        if !to.runs_arena() {
            self.accumulator = 0.0;
        }
        log::info!("Screen {:?} -> {:?}", from, to);
        self.screen = to;
        Ok(to)
    }

    /// Advance by one presentation frame. Returns the simulation substeps run.
    pub fn frame(&mut self, dt: f32) -> u32 {
        let dt = dt.clamp(0.0, MAX_FRAME_DT);

        if self.screen == Screen::Start {
            self.fog.update(dt);
        }
        self.shake.update(dt, &mut self.fx_rng);

        if !self.screen.runs_arena() {
            return 0;
        }

        self.accumulator += dt;
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.arena, &self.input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            self.input.dash = false;
            self.input.attack = false;
            self.input.heal = false;
            self.input.toggle_mask = false;

            self.route_events();
            if !self.screen.runs_arena() {
                break;
            }
        }
        substeps
    }

    fn route_events(&mut self) {
        for event in self.arena.drain_events() {
            match event {
                GameEvent::BossAttacked => {
                    self.stats.boss_attacks += 1;
                    if self.settings.effective_screen_shake() {
                        self.shake.trigger();
                    }
                }
                GameEvent::PlayerHit { amount } => {
                    self.stats.hits_taken += 1;
                    self.stats.damage_taken += amount;
                }
                GameEvent::MinionsSummoned { count } => {
                    self.stats.minions_summoned += count as u32;
                }
                GameEvent::PlayerDied => {
                    let _ = self.handle(ScreenEvent::PlayerDied);
                }
                GameEvent::BossDefeated { .. } => {
                    let kind = self.arena.boss_kind();
                    if self.handle(ScreenEvent::BossDefeated).is_err() {
                        continue;
                    }
                    if let Some(kind) = kind {
                        if !self.defeated.contains(&kind) {
                            self.defeated.push(kind);
                        }
                    }
                }
            }
        }
    }

    pub fn outcome(&self) -> Outcome {
        match self.screen {
            Screen::Death => Outcome::PlayerDied,
            Screen::BossCleared => Outcome::BossDefeated,
            _ => Outcome::InProgress,
        }
    }

    pub fn summary(&self) -> RunSummary {
        let boss = self.arena.boss.as_ref();
        RunSummary {
            seed: self.arena.seed,
            boss: boss.map(|b| b.name().to_string()),
            outcome: self.outcome(),
            screen: self.screen,
            sim_seconds: self.arena.time,
            ticks: self.arena.time_ticks,
            player_health: self.arena.player.current_health,
            flasks_left: self.arena.player.flasks,
            boss_health: boss.map(|b| b.core().health),
            masks: self.arena.player.masks.len(),
            defeated: self.defeated.iter().map(|k| k.name().to_string()).collect(),
            stats: self.stats,
        }
    }

    /// Draw the current screen
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        match self.screen {
            Screen::Start => {
                canvas.overlay(rgb(0, 0, 0));
                self.fog.draw(canvas);
                canvas.overlay([0.0, 0.0, 0.0, 100.0 / 255.0]);
                text(canvas, 200.0, 100.0, "MASKQUERADE", rgb(200, 0, 0));
                text(canvas, 270.0, 60.0, "(Boss Rush)", rgb(230, 230, 230));
                text(canvas, 400.0, 50.0, "Press ENTER to Start", WHITE);
                text(canvas, 460.0, 50.0, "Press ESC to Quit", rgb(180, 180, 180));
            }
            Screen::Intro => {
                text(canvas, 300.0, 48.0, "Three masked lords hold the festival hostage.", WHITE);
                text(canvas, 360.0, 48.0, "Take their masks.", WHITE);
            }
            Screen::BossSelect => {
                for (i, kind) in BossKind::ALL.iter().enumerate() {
                    let color = if self.defeated.contains(kind) {
                        rgb(120, 120, 120)
                    } else {
                        WHITE
                    };
                    text(canvas, 300.0 + i as f32 * 80.0, 50.0, kind.name(), color);
                }
            }
            Screen::Playing | Screen::Death => {
                let backdrop = Aabb::arena();
                let shaken = Aabb {
                    center: backdrop.center + self.shake.offset,
                    ..backdrop
                };
                canvas.sprite("background", shaken, false, 1.0, None);
                let mut budget = ParticleBudget {
                    inner: canvas,
                    left: self.settings.max_particles(),
                };
                draw_arena(&mut budget, &self.arena);
            }
            Screen::BossCleared => {
                if let Some(kind) = self.defeated.last() {
                    let line = format!("{} defeated!", kind.name());
                    text(canvas, 360.0, 64.0, &line, rgb(255, 200, 0));
                }
                text(canvas, 440.0, 40.0, "Press ENTER to continue", WHITE);
            }
        }
    }
}

fn text(canvas: &mut dyn Canvas, y: f32, size: f32, s: &str, color: Color) {
    canvas.text(Vec2::new(crate::arena_center().x, y), size, s, color);
}

/// Canvas wrapper that stops drawing circles once the particle cap is hit
struct ParticleBudget<'a> {
    inner: &'a mut dyn Canvas,
    left: usize,
}

impl Canvas for ParticleBudget<'_> {
    fn sprite(&mut self, name: &str, rect: Aabb, flip_x: bool, alpha: f32, tint: Option<Color>) {
        self.inner.sprite(name, rect, flip_x, alpha, tint);
    }

    fn circle(&mut self, center: Vec2, radius: f32, color: Color) {
        if self.left > 0 {
            self.left -= 1;
            self.inner.circle(center, radius, color);
        }
    }

    fn bar(&mut self, rect: Aabb, fill: f32, fg: Color, bg: Color) {
        self.inner.bar(rect, fill, fg, bg);
    }

    fn text(&mut self, pos: Vec2, size: f32, text: &str, color: Color) {
        self.inner.text(pos, size, text, color);
    }

    fn overlay(&mut self, color: Color) {
        self.inner.overlay(color);
    }
}
