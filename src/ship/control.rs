//! Controls snapshot and ship motion.
//!
//! ## Motion model
//!
//! Per tick, in order: turn, thrust along the nose, exponential damping,
//! speed clamp, integrate, wrap.  Damping uses the continuous rate from
//! [`ShipConfig::damping_rate`](crate::config::ShipConfig::damping_rate), so
//! the ship coasts the same distance at 30 Hz and at 144 Hz.
//!
//! Turning and thrusting are billed per second held; the totals end up in the
//! mission settlement.

use super::state::Ship;
use crate::config::GameConfig;
use crate::particles::{spawn_thrust, Particle};
use crate::simulation::PlayBounds;
use rand::Rng;

/// Player input sampled once per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub turn_left: bool,
    pub turn_right: bool,
    pub thrust: bool,
    /// Discrete event: flip between collection and combat mode this tick.
    pub toggle_mode: bool,
}

impl Ship {
    /// Apply one tick of controls and physics.
    ///
    /// Exhaust particles are emitted with a fixed chance per tick while
    /// thrusting (not scaled by `dt`).
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        controls: &Controls,
        dt: f32,
        bounds: PlayBounds,
        particles: &mut Vec<Particle>,
        rng: &mut R,
        config: &GameConfig,
    ) {
        let ship = &config.ship;
        let economy = &config.economy;

        if controls.toggle_mode {
            self.combat_mode = !self.combat_mode;
        }

        if controls.turn_left {
            self.rotation -= ship.turn_speed * dt;
            self.action_costs.turn += economy.turn_cost_per_second * dt as f64;
        }
        if controls.turn_right {
            self.rotation += ship.turn_speed * dt;
            self.action_costs.turn += economy.turn_cost_per_second * dt as f64;
        }

        if controls.thrust {
            self.velocity += self.heading() * ship.acceleration * dt;
            self.action_costs.thrust += economy.thrust_cost_per_second * dt as f64;

            if rng.gen_bool(config.particles.thrust_chance) {
                spawn_thrust(particles, rng, self.position, self.rotation, &config.particles);
            }
        }

        self.velocity *= (-ship.damping_rate() * dt).exp();
        self.velocity = self.velocity.clamp_length_max(ship.max_speed);

        self.position += self.velocity * dt;
        self.position = bounds.wrap(self.position, ship.wrap_margin);

        if self.fire_cooldown > 0.0 {
            self.fire_cooldown = (self.fire_cooldown - dt).max(0.0);
        }
    }
}
