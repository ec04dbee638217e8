//! Colors and particle drawing shared by entities, the HUD and the fog

use super::{Canvas, Color};
use crate::sim::{Particle, ParticleKind};

/// 8-bit RGB to an opaque `Color`
pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

/// Same color with its alpha scaled by `alpha`
pub fn with_alpha(color: Color, alpha: f32) -> Color {
    [color[0], color[1], color[2], color[3] * alpha.clamp(0.0, 1.0)]
}

pub const WHITE: Color = rgb(255, 255, 255);
pub const BLACK: Color = rgb(0, 0, 0);
pub const BLOOD: Color = rgb(180, 0, 0);

/// Base color of each particle kind at full opacity
pub fn particle_color(kind: ParticleKind) -> Color {
    match kind {
        ParticleKind::Footstep => [0.35, 0.3, 0.25, 0.6],
        ParticleKind::HitSpark => rgb(255, 230, 120),
        ParticleKind::DashTrail => [0.55, 0.45, 0.25, 0.8],
        ParticleKind::ProjectileTrail => rgb(255, 160, 60),
        ParticleKind::WispTrail => [0.7, 0.85, 1.0, 0.5],
        ParticleKind::Fog => rgb(200, 200, 200),
    }
}

/// Draw live particles as fading circles
pub fn draw_particles(canvas: &mut dyn Canvas, particles: &[Particle]) {
    for p in particles.iter().filter(|p| p.is_alive()) {
        let color = with_alpha(particle_color(p.kind), p.alpha());
        canvas.circle(p.pos, p.display_radius(), color);
    }
}
