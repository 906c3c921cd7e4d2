//! Runtime gameplay configuration loaded from `assets/game.toml`.
//!
//! [`GameConfig`] is a Bevy [`Resource`] that mirrors every constant in
//! [`crate::constants`].  At startup, [`load_game_config`] reads
//! `assets/game.toml` and replaces the defaults with any values present in
//! the file.  Missing keys fall back to the compile-time defaults, so a
//! minimal TOML can override just the values you care about:
//!
//! ```toml
//! [mission]
//! duration = 90.0
//!
//! [economy]
//! inflation_rate = 1.10
//! ```
//!
//! ## Tuning workflow
//!
//! 1. Edit `assets/game.toml`.
//! 2. Restart the game; no recompilation required.
//! 3. Watch the log: a rejected file is reported and the defaults are used.
//!
//! Keep `src/constants.rs` in sync: it remains the **authoritative default**
//! source used by `GameConfig::default()`.

use crate::constants::*;
use crate::error::{
    validate_non_negative, validate_positive, validate_probability, ConfigError, ConfigResult,
};
use bevy::prelude::*;
use serde::Deserialize;

/// Path of the optional override file, relative to the working directory.
pub const GAME_CONFIG_PATH: &str = "assets/game.toml";

/// Runtime-tunable gameplay configuration, one table per concern.
#[derive(Resource, Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub mission: MissionConfig,
    pub ship: ShipConfig,
    pub asteroid: AsteroidConfig,
    pub projectile: ProjectileConfig,
    pub particles: ParticleConfig,
    pub economy: EconomyConfig,
    pub streaks: StreakConfig,
    pub collision: CollisionConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MissionConfig {
    pub duration: f32,
    pub asteroid_pool: u32,
    pub initial_asteroids: u32,
    pub min_on_screen: usize,
    pub tutorial_speed_scale: f32,
}

/// Full width and height of an elliptical hitbox (px).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct HitboxSize {
    pub width: f32,
    pub height: f32,
}

impl HitboxSize {
    /// Semi-axes `(a, b)` of the ellipse.
    #[inline]
    pub fn semi_axes(self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShipConfig {
    pub turn_speed: f32,
    pub acceleration: f32,
    pub max_speed: f32,
    pub friction: f32,
    pub friction_frame_rate: f32,
    pub wrap_margin: f32,
    pub base_health: f32,
    pub hull_upgrade_multiplier: f32,
    pub fire_delay: f32,
    pub nose_offset: f32,
    pub hitbox_collection: HitboxSize,
    pub hitbox_combat: HitboxSize,
}

impl ShipConfig {
    /// Continuous velocity decay rate equivalent to `friction` applied once
    /// per reference frame.
    #[inline]
    pub fn damping_rate(&self) -> f32 {
        -self.friction.ln() * self.friction_frame_rate
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AsteroidConfig {
    pub base_radius: f32,
    pub radius_log_multiplier: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub min_number: u64,
    pub max_number: u64,
    pub prime_chance: f64,
    pub number_retries: u32,
    pub fallback_prime: u64,
    pub fallback_composite: u64,
    pub min_points: usize,
    pub max_extra_points: usize,
    pub radius_variation_min: f32,
    pub radius_variation_max: f32,
    pub spawn_margin: f32,
    pub hits_to_break: u32,
    pub factorization_reliability: f64,
    pub factor_kick: f32,
    pub hit_flash_duration: f32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    pub speed: f32,
    pub lifetime: f32,
    pub radius: f32,
    pub bounds_margin: f32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub thrust_chance: f64,
    pub thrust_lifetime: f32,
    pub thrust_speed: f32,
    pub thrust_spread: f32,
    pub thrust_offset: f32,
    pub explosion_count: u32,
    pub collection_count: u32,
    pub explosion_lifetime: f32,
    pub explosion_min_speed: f32,
    pub explosion_max_speed: f32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    pub starting_wallet: i64,
    pub space_tax: f64,
    pub base_maintenance: f64,
    pub maintenance_per_damage: f64,
    pub tow_fee: f64,
    pub thrust_cost_per_second: f64,
    pub turn_cost_per_second: f64,
    pub bullet_cost_base: f64,
    pub bullet_cost_firepower: f64,
    pub scanner_cost: f64,
    pub yield_cost: f64,
    pub yield_bonus: f64,
    pub firepower_cost: f64,
    pub hull_cost: f64,
    pub inflation_rate: f64,
    pub acquisition_min_missions: usize,
    pub acquisition_window: usize,
    pub acquisition_multiplier: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StreakConfig {
    pub small_threshold: u32,
    pub small_bonus: f64,
    pub large_threshold: u32,
    pub large_bonus: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    pub prime_combat_damage: f32,
    pub composite_combat_damage: f32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub max_frame_dt: f32,
    pub default_width: f32,
    pub default_height: f32,
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            duration: MISSION_DURATION,
            asteroid_pool: MISSION_ASTEROID_POOL,
            initial_asteroids: MISSION_INITIAL_ASTEROIDS,
            min_on_screen: MISSION_MIN_ON_SCREEN,
            tutorial_speed_scale: TUTORIAL_SPEED_SCALE,
        }
    }
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            turn_speed: SHIP_TURN_SPEED,
            acceleration: SHIP_ACCELERATION,
            max_speed: SHIP_MAX_SPEED,
            friction: SHIP_FRICTION,
            friction_frame_rate: SHIP_FRICTION_FRAME_RATE,
            wrap_margin: SHIP_WRAP_MARGIN,
            base_health: SHIP_BASE_HEALTH,
            hull_upgrade_multiplier: SHIP_HULL_UPGRADE_MULTIPLIER,
            fire_delay: SHIP_FIRE_DELAY,
            nose_offset: SHIP_NOSE_OFFSET,
            hitbox_collection: HitboxSize {
                width: SHIP_HITBOX_COLLECTION.0,
                height: SHIP_HITBOX_COLLECTION.1,
            },
            hitbox_combat: HitboxSize {
                width: SHIP_HITBOX_COMBAT.0,
                height: SHIP_HITBOX_COMBAT.1,
            },
        }
    }
}

impl Default for AsteroidConfig {
    fn default() -> Self {
        Self {
            base_radius: ASTEROID_BASE_RADIUS,
            radius_log_multiplier: ASTEROID_RADIUS_LOG_MULTIPLIER,
            min_speed: ASTEROID_MIN_SPEED,
            max_speed: ASTEROID_MAX_SPEED,
            min_number: ASTEROID_MIN_NUMBER,
            max_number: ASTEROID_MAX_NUMBER,
            prime_chance: ASTEROID_PRIME_CHANCE,
            number_retries: ASTEROID_NUMBER_RETRIES,
            fallback_prime: ASTEROID_FALLBACK_PRIME,
            fallback_composite: ASTEROID_FALLBACK_COMPOSITE,
            min_points: ASTEROID_MIN_POINTS,
            max_extra_points: ASTEROID_MAX_EXTRA_POINTS,
            radius_variation_min: ASTEROID_RADIUS_VARIATION_MIN,
            radius_variation_max: ASTEROID_RADIUS_VARIATION_MAX,
            spawn_margin: ASTEROID_SPAWN_MARGIN,
            hits_to_break: ASTEROID_HITS_TO_BREAK,
            factorization_reliability: ASTEROID_FACTORIZATION_RELIABILITY,
            factor_kick: ASTEROID_FACTOR_KICK,
            hit_flash_duration: ASTEROID_HIT_FLASH_DURATION,
        }
    }
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            speed: PROJECTILE_SPEED,
            lifetime: PROJECTILE_LIFETIME,
            radius: PROJECTILE_RADIUS,
            bounds_margin: PROJECTILE_BOUNDS_MARGIN,
        }
    }
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            thrust_chance: PARTICLE_THRUST_CHANCE,
            thrust_lifetime: PARTICLE_THRUST_LIFETIME,
            thrust_speed: PARTICLE_THRUST_SPEED,
            thrust_spread: PARTICLE_THRUST_SPREAD,
            thrust_offset: PARTICLE_THRUST_OFFSET,
            explosion_count: PARTICLE_EXPLOSION_COUNT,
            collection_count: PARTICLE_COLLECTION_COUNT,
            explosion_lifetime: PARTICLE_EXPLOSION_LIFETIME,
            explosion_min_speed: PARTICLE_EXPLOSION_MIN_SPEED,
            explosion_max_speed: PARTICLE_EXPLOSION_MAX_SPEED,
        }
    }
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            starting_wallet: ECONOMY_STARTING_WALLET,
            space_tax: ECONOMY_SPACE_TAX,
            base_maintenance: ECONOMY_BASE_MAINTENANCE,
            maintenance_per_damage: ECONOMY_MAINTENANCE_PER_DAMAGE,
            tow_fee: ECONOMY_TOW_FEE,
            thrust_cost_per_second: ECONOMY_THRUST_COST_PER_SECOND,
            turn_cost_per_second: ECONOMY_TURN_COST_PER_SECOND,
            bullet_cost_base: ECONOMY_BULLET_COST_BASE,
            bullet_cost_firepower: ECONOMY_BULLET_COST_FIREPOWER,
            scanner_cost: SUBSCRIPTION_SCANNER_COST,
            yield_cost: SUBSCRIPTION_YIELD_COST,
            yield_bonus: SUBSCRIPTION_YIELD_BONUS,
            firepower_cost: SUBSCRIPTION_FIREPOWER_COST,
            hull_cost: SUBSCRIPTION_HULL_COST,
            inflation_rate: ECONOMY_INFLATION_RATE,
            acquisition_min_missions: ECONOMY_ACQUISITION_MIN_MISSIONS,
            acquisition_window: ECONOMY_ACQUISITION_WINDOW,
            acquisition_multiplier: ECONOMY_ACQUISITION_MULTIPLIER,
        }
    }
}

impl Default for StreakConfig {
    fn default() -> Self {
        Self {
            small_threshold: STREAK_SMALL_THRESHOLD,
            small_bonus: STREAK_SMALL_BONUS,
            large_threshold: STREAK_LARGE_THRESHOLD,
            large_bonus: STREAK_LARGE_BONUS,
        }
    }
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            prime_combat_damage: COLLISION_PRIME_COMBAT_DAMAGE,
            composite_combat_damage: COLLISION_COMPOSITE_COMBAT_DAMAGE,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_frame_dt: SESSION_MAX_FRAME_DT,
            default_width: SESSION_DEFAULT_WIDTH,
            default_height: SESSION_DEFAULT_HEIGHT,
        }
    }
}

impl GameConfig {
    /// Parse a TOML document and validate the result.
    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        let config: GameConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> ConfigResult<()> {
        let m = &self.mission;
        validate_positive("mission.duration", m.duration as f64)?;
        validate_positive("mission.tutorial_speed_scale", m.tutorial_speed_scale as f64)?;

        let s = &self.ship;
        if !(s.friction > 0.0 && s.friction < 1.0) {
            return Err(ConfigError::UnsafeConstant {
                name: "ship.friction",
                value: s.friction as f64,
                safe_range: "(0.0, 1.0)",
            });
        }
        validate_positive("ship.friction_frame_rate", s.friction_frame_rate as f64)?;
        validate_positive("ship.max_speed", s.max_speed as f64)?;
        validate_positive("ship.base_health", s.base_health as f64)?;
        validate_positive("ship.hull_upgrade_multiplier", s.hull_upgrade_multiplier as f64)?;
        validate_non_negative("ship.fire_delay", s.fire_delay as f64)?;
        for (name, hitbox) in [
            ("ship.hitbox_collection", s.hitbox_collection),
            ("ship.hitbox_combat", s.hitbox_combat),
        ] {
            validate_positive(name, hitbox.width.min(hitbox.height) as f64)?;
        }

        let a = &self.asteroid;
        validate_positive("asteroid.base_radius", a.base_radius as f64)?;
        validate_non_negative("asteroid.radius_log_multiplier", a.radius_log_multiplier as f64)?;
        validate_positive("asteroid.min_speed", a.min_speed as f64)?;
        if a.max_speed < a.min_speed {
            return Err(ConfigError::UnsafeConstant {
                name: "asteroid.max_speed",
                value: a.max_speed as f64,
                safe_range: "[asteroid.min_speed, ∞)",
            });
        }
        if a.min_number < 2 || a.max_number < a.min_number {
            return Err(ConfigError::UnsafeConstant {
                name: "asteroid.min_number",
                value: a.min_number as f64,
                safe_range: "[2, asteroid.max_number]",
            });
        }
        if a.fallback_prime < 2 || a.fallback_composite < 4 {
            return Err(ConfigError::UnsafeConstant {
                name: "asteroid.fallback_prime",
                value: a.fallback_prime as f64,
                safe_range: "prime >= 2, composite >= 4",
            });
        }
        if a.min_points < 3 {
            return Err(ConfigError::UnsafeConstant {
                name: "asteroid.min_points",
                value: a.min_points as f64,
                safe_range: "[3, ∞)",
            });
        }
        if a.hits_to_break == 0 {
            return Err(ConfigError::UnsafeConstant {
                name: "asteroid.hits_to_break",
                value: 0.0,
                safe_range: "[1, ∞)",
            });
        }
        validate_probability("asteroid.prime_chance", a.prime_chance)?;
        validate_probability(
            "asteroid.factorization_reliability",
            a.factorization_reliability,
        )?;
        validate_positive("asteroid.radius_variation_min", a.radius_variation_min as f64)?;

        validate_positive("projectile.speed", self.projectile.speed as f64)?;
        validate_positive("projectile.lifetime", self.projectile.lifetime as f64)?;
        validate_positive("projectile.radius", self.projectile.radius as f64)?;

        validate_probability("particles.thrust_chance", self.particles.thrust_chance)?;

        let e = &self.economy;
        if e.inflation_rate < 1.0 {
            return Err(ConfigError::UnsafeConstant {
                name: "economy.inflation_rate",
                value: e.inflation_rate,
                safe_range: "[1.0, ∞)",
            });
        }
        validate_non_negative("economy.space_tax", e.space_tax)?;
        validate_non_negative("economy.tow_fee", e.tow_fee)?;
        validate_non_negative("economy.yield_bonus", e.yield_bonus)?;
        if e.acquisition_window == 0 {
            return Err(ConfigError::UnsafeConstant {
                name: "economy.acquisition_window",
                value: 0.0,
                safe_range: "[1, ∞)",
            });
        }

        validate_positive("session.max_frame_dt", self.session.max_frame_dt as f64)?;
        Ok(())
    }
}

/// Startup system: attempt to load `assets/game.toml` and overwrite the
/// `GameConfig` resource with any values present in the file.
///
/// Missing keys retain their compiled defaults.  Parse and validation errors
/// are logged but do not abort the game.  A missing file is not an error
/// (defaults are already in place from `insert_resource`).
pub fn load_game_config(mut config: ResMut<GameConfig>) {
    match std::fs::read_to_string(GAME_CONFIG_PATH) {
        Ok(contents) => match GameConfig::from_toml_str(&contents) {
            Ok(loaded) => {
                *config = loaded;
                info!("Loaded game config from {GAME_CONFIG_PATH}");
            }
            Err(e) => {
                warn!("Failed to load {GAME_CONFIG_PATH}: {e}; using defaults");
            }
        },
        Err(_) => {
            info!("No {GAME_CONFIG_PATH} found; using compiled defaults");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn empty_document_yields_defaults() {
        let config = GameConfig::from_toml_str("").unwrap();
        assert_eq!(config.mission.asteroid_pool, MISSION_ASTEROID_POOL);
        assert_eq!(config.economy.starting_wallet, ECONOMY_STARTING_WALLET);
    }

    #[test]
    fn shipped_game_toml_matches_defaults() {
        let config = GameConfig::from_toml_str(include_str!("../assets/game.toml")).unwrap();
        assert_eq!(config.ship.hitbox_combat, ShipConfig::default().hitbox_combat);
        assert_eq!(config.asteroid.max_number, ASTEROID_MAX_NUMBER);
        assert_eq!(config.economy.inflation_rate, ECONOMY_INFLATION_RATE);
        assert_eq!(config.streaks.large_threshold, STREAK_LARGE_THRESHOLD);
    }

    #[test]
    fn partial_table_overrides_only_named_keys() {
        let config = GameConfig::from_toml_str(
            r#"
            [mission]
            duration = 90.0

            [ship.hitbox_combat]
            width = 50.0
            height = 40.0
            "#,
        )
        .unwrap();
        assert_eq!(config.mission.duration, 90.0);
        assert_eq!(config.mission.asteroid_pool, MISSION_ASTEROID_POOL);
        assert_eq!(config.ship.hitbox_combat.width, 50.0);
        assert_eq!(config.ship.hitbox_collection.width, SHIP_HITBOX_COLLECTION.0);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = GameConfig::from_toml_str("[mission\nduration = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn out_of_range_probability_is_rejected() {
        let err = GameConfig::from_toml_str("[asteroid]\nprime_chance = 1.5").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UnsafeConstant {
                name: "asteroid.prime_chance",
                ..
            }
        ));
    }

    #[test]
    fn deflation_is_rejected() {
        let err = GameConfig::from_toml_str("[economy]\ninflation_rate = 0.9").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UnsafeConstant {
                name: "economy.inflation_rate",
                ..
            }
        ));
    }

    #[test]
    fn number_range_below_two_is_rejected() {
        assert!(GameConfig::from_toml_str("[asteroid]\nmin_number = 1").is_err());
    }

    #[test]
    fn damping_rate_matches_per_frame_friction() {
        let ship = ShipConfig::default();
        // One reference frame of continuous decay equals one multiply by friction.
        let per_frame = (-ship.damping_rate() / ship.friction_frame_rate).exp();
        assert!((per_frame - ship.friction).abs() < 1e-6);
    }
}
