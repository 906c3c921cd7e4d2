//! Cosmetic particle effects: destruction bursts and engine exhaust.
//!
//! ## Design
//!
//! Particles are plain values owned by the mission's particle list.  They have
//! no gameplay effect: the simulation only moves and expires them, and the
//! renderer draws each one as a small dot whose alpha is [`Particle::alpha`].
//!
//! | Emitter             | Trigger                                  | Count |
//! |---------------------|------------------------------------------|-------|
//! | [`spawn_burst`]     | asteroid destroyed, collected or bounced | 10/15 |
//! | [`spawn_thrust`]    | ship thrusting (random chance per tick)  | 0/1   |

use crate::config::ParticleConfig;
use bevy::math::Vec2;
use rand::Rng;

/// Short-lived visual particle.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Position (px, origin top-left).
    pub position: Vec2,
    /// Velocity (px/s).
    pub velocity: Vec2,
    /// Remaining lifetime (s).
    pub life: f32,
    /// Lifetime at spawn (s).
    pub max_life: f32,
    /// Base colour red channel (sRGB, 0–1).
    pub r: f32,
    /// Base colour green channel.
    pub g: f32,
    /// Base colour blue channel.
    pub b: f32,
}

impl Particle {
    /// Integrate one step and age the particle.  Returns `false` once expired.
    pub fn update(&mut self, dt: f32) -> bool {
        self.position += self.velocity * dt;
        self.life -= dt;
        self.life > 0.0
    }

    /// Linear fade: 1 at birth, 0 at expiry.
    #[inline]
    pub fn alpha(&self) -> f32 {
        if self.max_life <= 0.0 {
            return 0.0;
        }
        (self.life / self.max_life).clamp(0.0, 1.0)
    }
}

/// What a burst of particles is celebrating (or mourning).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurstKind {
    /// A prime was shot or rammed.
    Prime,
    /// A composite was destroyed, factored, bounced or rammed.
    Composite,
    /// A prime was collected.
    Collection,
}

impl BurstKind {
    /// sRGB tint of the burst.
    pub fn rgb(self) -> (f32, f32, f32) {
        match self {
            BurstKind::Prime => (0.23, 0.51, 0.96),
            BurstKind::Composite => (0.94, 0.27, 0.27),
            BurstKind::Collection => (0.13, 0.83, 0.93),
        }
    }
}

/// Exhaust colour (cyan, matching the collection-mode hull).
const THRUST_RGB: (f32, f32, f32) = (0.13, 0.83, 0.93);

/// Emit a radial burst at `position`: particles evenly spaced in angle, each
/// with a random speed in the configured band.
pub fn spawn_burst<R: Rng + ?Sized>(
    particles: &mut Vec<Particle>,
    rng: &mut R,
    position: Vec2,
    kind: BurstKind,
    config: &ParticleConfig,
) {
    let count = match kind {
        BurstKind::Collection => config.collection_count,
        BurstKind::Prime | BurstKind::Composite => config.explosion_count,
    };
    let (r, g, b) = kind.rgb();
    particles.reserve(count as usize);
    for i in 0..count {
        let angle = std::f32::consts::TAU * i as f32 / count as f32;
        let speed = if config.explosion_max_speed > config.explosion_min_speed {
            rng.gen_range(config.explosion_min_speed..config.explosion_max_speed)
        } else {
            config.explosion_min_speed
        };
        particles.push(Particle {
            position,
            velocity: Vec2::from_angle(angle) * speed,
            life: config.explosion_lifetime,
            max_life: config.explosion_lifetime,
            r,
            g,
            b,
        });
    }
}

/// Emit one exhaust particle behind a ship at `position` facing `rotation`.
///
/// The particle leaves backwards relative to the hull with a little sideways
/// jitter; `ship_velocity` is not inherited so the plume trails the ship.
pub fn spawn_thrust<R: Rng + ?Sized>(
    particles: &mut Vec<Particle>,
    rng: &mut R,
    position: Vec2,
    rotation: f32,
    config: &ParticleConfig,
) {
    let backwards = -Vec2::from_angle(rotation);
    let half_spread = config.thrust_spread / 2.0;
    let jitter = if half_spread > 0.0 {
        Vec2::new(
            rng.gen_range(-half_spread..half_spread),
            rng.gen_range(-half_spread..half_spread),
        )
    } else {
        Vec2::ZERO
    };
    let (r, g, b) = THRUST_RGB;
    particles.push(Particle {
        position: position + backwards * config.thrust_offset,
        velocity: backwards * config.thrust_speed + jitter,
        life: config.thrust_lifetime,
        max_life: config.thrust_lifetime,
        r,
        g,
        b,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn burst_sizes_follow_kind() {
        let mut rng = StdRng::seed_from_u64(1);
        let config = ParticleConfig::default();
        let mut particles = Vec::new();
        spawn_burst(&mut particles, &mut rng, Vec2::ZERO, BurstKind::Prime, &config);
        assert_eq!(particles.len(), config.explosion_count as usize);
        particles.clear();
        spawn_burst(&mut particles, &mut rng, Vec2::ZERO, BurstKind::Collection, &config);
        assert_eq!(particles.len(), config.collection_count as usize);
    }

    #[test]
    fn burst_speeds_stay_in_band() {
        let mut rng = StdRng::seed_from_u64(2);
        let config = ParticleConfig::default();
        let mut particles = Vec::new();
        spawn_burst(&mut particles, &mut rng, Vec2::ZERO, BurstKind::Composite, &config);
        for p in &particles {
            let speed = p.velocity.length();
            assert!(speed >= config.explosion_min_speed - 1e-3);
            assert!(speed <= config.explosion_max_speed + 1e-3);
        }
    }

    #[test]
    fn particle_fades_and_expires() {
        let mut rng = StdRng::seed_from_u64(3);
        let config = ParticleConfig::default();
        let mut particles = Vec::new();
        spawn_thrust(&mut particles, &mut rng, Vec2::new(100.0, 100.0), 0.0, &config);
        let p = &mut particles[0];
        assert_eq!(p.alpha(), 1.0);
        assert!(p.update(config.thrust_lifetime / 2.0));
        assert!((p.alpha() - 0.5).abs() < 1e-4);
        assert!(!p.update(config.thrust_lifetime));
        assert_eq!(p.alpha(), 0.0);
    }

    #[test]
    fn thrust_particle_leaves_behind_the_nose() {
        let mut rng = StdRng::seed_from_u64(4);
        let config = ParticleConfig::default();
        let mut particles = Vec::new();
        // Facing +x: exhaust spawns at -x and moves toward -x.
        spawn_thrust(&mut particles, &mut rng, Vec2::ZERO, 0.0, &config);
        let p = &particles[0];
        assert!((p.position.x + config.thrust_offset).abs() < 1e-4);
        assert!(p.velocity.x < 0.0);
    }
}
