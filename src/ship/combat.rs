//! Firing, hull damage and the mission's action-cost total.

use super::state::{Projectile, Ship};
use crate::config::GameConfig;

impl Ship {
    /// Fire one round from the nose if in combat mode and off cooldown.
    ///
    /// Each shot is billed immediately (base price plus the firepower
    /// surcharge when that subscription is active) and restarts the cooldown.
    /// Returns whether a shot was fired.
    pub fn fire(
        &mut self,
        projectiles: &mut Vec<Projectile>,
        firepower_active: bool,
        config: &GameConfig,
    ) -> bool {
        if !self.combat_mode || !self.can_fire() {
            return false;
        }

        let mut cost = config.economy.bullet_cost_base;
        if firepower_active {
            cost += config.economy.bullet_cost_firepower;
        }
        self.action_costs.bullets += cost;

        let heading = self.heading();
        projectiles.push(Projectile {
            position: self.position + heading * config.ship.nose_offset,
            velocity: heading * config.projectile.speed + self.velocity,
            life: config.projectile.lifetime,
        });

        self.fire_cooldown = config.ship.fire_delay;
        true
    }

    /// Subtract `amount` from the hull, flooring at zero.
    ///
    /// Returns `true` when the hull is now at zero (the ship is destroyed).
    pub fn take_damage(&mut self, amount: f32) -> bool {
        self.health = (self.health - amount).max(0.0);
        self.health <= 0.0
    }

    /// Thrust, turning and ammunition spent so far (¢, unrounded).
    #[inline]
    pub fn total_action_costs(&self) -> f64 {
        self.action_costs.total()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ship::Controls;
    use crate::simulation::PlayBounds;
    use bevy::math::Vec2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn combat_ship() -> Ship {
        let mut ship = Ship::new(Vec2::new(400.0, 300.0), 100.0);
        ship.combat_mode = true;
        ship
    }

    #[test]
    fn collection_mode_never_fires() {
        let config = GameConfig::default();
        let mut ship = Ship::new(Vec2::ZERO, 100.0);
        let mut projectiles = Vec::new();
        assert!(!ship.fire(&mut projectiles, false, &config));
        assert!(projectiles.is_empty());
        assert_eq!(ship.total_action_costs(), 0.0);
    }

    #[test]
    fn fire_spawns_at_nose_with_ship_velocity() {
        let config = GameConfig::default();
        let mut ship = combat_ship();
        ship.velocity = Vec2::new(10.0, 5.0);
        let mut projectiles = Vec::new();
        assert!(ship.fire(&mut projectiles, false, &config));
        let p = &projectiles[0];
        assert_eq!(p.position, Vec2::new(400.0 + config.ship.nose_offset, 300.0));
        assert_eq!(p.velocity, Vec2::new(config.projectile.speed + 10.0, 5.0));
        assert_eq!(p.life, config.projectile.lifetime);
    }

    #[test]
    fn cooldown_gates_second_shot_until_elapsed() {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        let mut particles = Vec::new();
        let mut projectiles = Vec::new();
        let mut ship = combat_ship();
        let bounds = PlayBounds::new(800.0, 600.0);

        assert!(ship.fire(&mut projectiles, false, &config));
        assert!(!ship.fire(&mut projectiles, false, &config));

        ship.update(&Controls::default(), 0.3, bounds, &mut particles, &mut rng, &config);
        assert!(!ship.fire(&mut projectiles, false, &config));

        ship.update(&Controls::default(), 0.11, bounds, &mut particles, &mut rng, &config);
        assert!(ship.fire(&mut projectiles, false, &config));
        assert_eq!(projectiles.len(), 2);
    }

    #[test]
    fn firepower_surcharge_is_billed() {
        let config = GameConfig::default();
        let mut ship = combat_ship();
        let mut projectiles = Vec::new();
        ship.fire(&mut projectiles, true, &config);
        let expected = config.economy.bullet_cost_base + config.economy.bullet_cost_firepower;
        assert_eq!(ship.action_costs().bullets, expected);
        assert_eq!(ship.total_action_costs(), expected);
    }

    #[test]
    fn take_damage_floors_at_zero() {
        let mut ship = Ship::new(Vec2::ZERO, 100.0);
        assert!(!ship.take_damage(40.0));
        assert_eq!(ship.health(), 60.0);
        assert!(!ship.take_damage(59.5));
        assert!(ship.take_damage(20.0));
        assert_eq!(ship.health(), 0.0);
    }

    #[test]
    fn exact_lethal_damage_reports_death() {
        let mut ship = Ship::new(Vec2::ZERO, 100.0);
        assert!(ship.take_damage(100.0));
        assert_eq!(ship.health(), 0.0);
    }
}
