//! Title screen fog
//!
//! Large translucent puffs drifting together on a slowly turning wind and
//! wrapping around the screen edges.

use glam::Vec2;
use rand::Rng;

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};
use crate::renderer::Canvas;
use crate::renderer::shapes::{particle_color, with_alpha};
use crate::sim::{Particle, SimRng};

/// How fast the wind direction turns (radians per second)
const WIND_TURN_RATE: f32 = 0.2;

#[derive(Debug, Clone)]
pub struct FogPuff {
    pub particle: Particle,
    /// Drift speed, units per second
    pub speed: f32,
    pub opacity: f32,
}

#[derive(Debug, Clone, Default)]
pub struct FogBank {
    pub puffs: Vec<FogPuff>,
    clock: f32,
}

impl FogBank {
    pub fn new(count: usize, rng: &mut SimRng) -> Self {
        let puffs = (0..count)
            .map(|_| {
                let pos = Vec2::new(
                    rng.random_range(0.0..=ARENA_WIDTH),
                    rng.random_range(0.0..=ARENA_HEIGHT),
                );
                let radius = rng.random_range(80..=160) as f32;
                FogPuff {
                    particle: Particle::fog(pos, radius),
                    speed: rng.random_range(5.0..20.0),
                    opacity: rng.random_range(30..=80) as f32 / 255.0,
                }
            })
            .collect();
        Self { puffs, clock: 0.0 }
    }

    /// Current wind direction shared by every puff
    pub fn wind(&self) -> Vec2 {
        let t = self.clock * WIND_TURN_RATE;
        Vec2::new(t.sin(), t.cos())
    }

    pub fn update(&mut self, dt: f32) {
        self.clock += dt;
        let wind = self.wind();
        for puff in &mut self.puffs {
            let p = &mut puff.particle;
            p.vel = wind * puff.speed;
            p.update(dt);
            p.pos.x = wrap(p.pos.x, p.radius, ARENA_WIDTH);
            p.pos.y = wrap(p.pos.y, p.radius, ARENA_HEIGHT);
        }
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        for puff in &self.puffs {
            let color = with_alpha(particle_color(puff.particle.kind), puff.opacity);
            canvas.circle(puff.particle.pos, puff.particle.radius, color);
        }
    }
}

/// Once a puff is fully off one edge it reappears just past the other
fn wrap(v: f32, margin: f32, extent: f32) -> f32 {
    if v < -margin {
        extent + margin
    } else if v > extent + margin {
        -margin
    } else {
        v
    }
}
