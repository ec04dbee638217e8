//! Combat simulation module
//!
//! All gameplay logic lives here:
//! - Seeded RNG only (one `SimRng` per arena)
//! - `dt`-scaled timers and movement
//! - Stable iteration order (entities live in insertion-ordered `Vec`s)
//! - No rendering or platform dependencies

pub mod boss;
pub mod collision;
pub mod effect;
pub mod geom;
pub mod player;
pub mod projectile;
pub mod state;
pub mod tick;

pub use boss::{Boss, BossCore, BossKind, HasDash, HasMinions, Minion};
pub use effect::{Lifetime, Particle, ParticleKind};
pub use geom::Aabb;
pub use player::{Facing, MaskKind, Player};
pub use projectile::{Projectile, ProjectileSpec, TrailStyle};
pub use state::{Arena, GameEvent};
pub use tick::{TickInput, autopilot_input, tick};

/// The simulation's random source
pub type SimRng = rand_pcg::Pcg32;

/// Build a simulation RNG from a run seed
pub fn seeded_rng(seed: u64) -> SimRng {
    use rand::SeedableRng;
    SimRng::seed_from_u64(seed)
}
