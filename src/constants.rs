//! Centralised gameplay, physics, and economy constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place without source-diving across multiple modules.
//! [`crate::config::GameConfig`] mirrors every value and may override any of
//! them from `assets/game.toml`.
//!
//! ## Units
//!
//! Distances are in screen pixels, times in seconds, money in cents (¢).
//! Values tuned against a 60 Hz frame are stored as
//! per-second rates so the simulation is frame-rate independent.

// ── Mission ───────────────────────────────────────────────────────────────────

/// Length of a real mission (s).  Reaching it ends the mission.
pub const MISSION_DURATION: f32 = 120.0;

/// Total asteroids the spawner may release over one real mission.
pub const MISSION_ASTEROID_POOL: u32 = 30;

/// Asteroids released immediately when a real mission starts.
pub const MISSION_INITIAL_ASTEROIDS: u32 = 6;

/// While fewer than this many asteroids are on screen, one more is spawned
/// from the pool each tick.
pub const MISSION_MIN_ON_SCREEN: usize = 5;

/// Small primes the tutorial draws its collectible asteroid from.
pub const TUTORIAL_PRIMES: [u64; 5] = [2, 3, 5, 7, 11];

/// Small composites the tutorial draws its target asteroid from.
pub const TUTORIAL_COMPOSITES: [u64; 5] = [4, 6, 8, 9, 10];

/// Velocity scale applied to tutorial asteroids so new players can react.
pub const TUTORIAL_SPEED_SCALE: f32 = 0.5;

// ── Ship: Movement ────────────────────────────────────────────────────────────

/// Rotation rate while a turn control is held (rad/s).
pub const SHIP_TURN_SPEED: f32 = 4.8;

/// Linear acceleration along the nose while thrusting (px/s²).
pub const SHIP_ACCELERATION: f32 = 900.0;

/// Hard speed cap (px/s).
pub const SHIP_MAX_SPEED: f32 = 240.0;

/// Fraction of velocity kept per reference frame.
///
/// Converted to a continuous decay rate `-ln(friction) · frame_rate` so that
/// damping is identical at any tick rate.
pub const SHIP_FRICTION: f32 = 0.98;

/// Reference frame rate the friction constant was tuned at (Hz).
pub const SHIP_FRICTION_FRAME_RATE: f32 = 60.0;

/// Distance past a screen edge before the ship wraps to the opposite side.
pub const SHIP_WRAP_MARGIN: f32 = 50.0;

// ── Ship: Hull & Weapons ──────────────────────────────────────────────────────

/// Starting and maximum hull points without the hull subscription.
pub const SHIP_BASE_HEALTH: f32 = 100.0;

/// Health multiplier granted by the hull subscription (150 hull points).
pub const SHIP_HULL_UPGRADE_MULTIPLIER: f32 = 1.5;

/// Minimum time between two shots (s).
pub const SHIP_FIRE_DELAY: f32 = 0.4;

/// Distance from the ship centre to the muzzle (px).
pub const SHIP_NOSE_OFFSET: f32 = 30.0;

/// Full width × height of the collection-mode hitbox ellipse (px).
pub const SHIP_HITBOX_COLLECTION: (f32, f32) = (35.0, 20.0);

/// Full width × height of the combat-mode hitbox ellipse (px).
///
/// Larger than the collection ellipse: combat mode trades a bigger target for
/// firepower.
pub const SHIP_HITBOX_COMBAT: (f32, f32) = (45.0, 35.0);

// ── Asteroids ─────────────────────────────────────────────────────────────────

/// Radius of an asteroid before the logarithmic number term (px).
pub const ASTEROID_BASE_RADIUS: f32 = 20.0;

/// `radius = base + ln(number) · multiplier`.
pub const ASTEROID_RADIUS_LOG_MULTIPLIER: f32 = 8.0;

/// Speed band of a freshly spawned asteroid (px/s).
pub const ASTEROID_MIN_SPEED: f32 = 48.0;
pub const ASTEROID_MAX_SPEED: f32 = 120.0;

/// Inclusive range randomly spawned asteroid numbers are drawn from.
pub const ASTEROID_MIN_NUMBER: u64 = 2;
pub const ASTEROID_MAX_NUMBER: u64 = 50;

/// Probability that a randomly spawned asteroid is meant to be prime.
pub const ASTEROID_PRIME_CHANCE: f64 = 0.4;

/// Redraws allowed before falling back to a fixed number.
pub const ASTEROID_NUMBER_RETRIES: u32 = 100;

/// Numbers used when the retry budget runs out.
pub const ASTEROID_FALLBACK_PRIME: u64 = 7;
pub const ASTEROID_FALLBACK_COMPOSITE: u64 = 6;

/// Outline vertex count is `MIN_POINTS + [0, MAX_EXTRA_POINTS)`.
pub const ASTEROID_MIN_POINTS: usize = 8;
pub const ASTEROID_MAX_EXTRA_POINTS: usize = 5;

/// Per-vertex radius jitter of the outline, as a fraction of the radius.
pub const ASTEROID_RADIUS_VARIATION_MIN: f32 = 0.7;
pub const ASTEROID_RADIUS_VARIATION_MAX: f32 = 1.3;

/// Distance beyond a screen edge at which new asteroids appear (px).
pub const ASTEROID_SPAWN_MARGIN: f32 = 100.0;

/// Hits a composite absorbs before it breaks without the firepower upgrade.
pub const ASTEROID_HITS_TO_BREAK: u32 = 2;

/// Chance that a breaking composite actually splits into its factors.
pub const ASTEROID_FACTORIZATION_RELIABILITY: f64 = 0.8;

/// Extra radial speed given to each factor child (px/s).
pub const ASTEROID_FACTOR_KICK: f32 = 30.0;

/// White flash shown after a non-fatal hit (s).
pub const ASTEROID_HIT_FLASH_DURATION: f32 = 0.15;

// ── Projectiles ───────────────────────────────────────────────────────────────

/// Muzzle speed relative to the ship (px/s).
pub const PROJECTILE_SPEED: f32 = 480.0;

/// Time before a projectile fizzles (s).
pub const PROJECTILE_LIFETIME: f32 = 1.333;

/// Collision radius (px).
pub const PROJECTILE_RADIUS: f32 = 3.0;

/// Projectiles further than this outside the screen are removed (px).
pub const PROJECTILE_BOUNDS_MARGIN: f32 = 50.0;

// ── Particles ─────────────────────────────────────────────────────────────────

/// Chance per tick of emitting one exhaust particle while thrusting.
///
/// Intentionally not scaled by the frame delta.
pub const PARTICLE_THRUST_CHANCE: f64 = 0.3;
pub const PARTICLE_THRUST_LIFETIME: f32 = 0.333;
pub const PARTICLE_THRUST_SPEED: f32 = 120.0;
pub const PARTICLE_THRUST_SPREAD: f32 = 30.0;
pub const PARTICLE_THRUST_OFFSET: f32 = 20.0;

/// Particles in a destruction burst and in a collection burst.
pub const PARTICLE_EXPLOSION_COUNT: u32 = 10;
pub const PARTICLE_COLLECTION_COUNT: u32 = 15;
pub const PARTICLE_EXPLOSION_LIFETIME: f32 = 0.5;
pub const PARTICLE_EXPLOSION_MIN_SPEED: f32 = 60.0;
pub const PARTICLE_EXPLOSION_MAX_SPEED: f32 = 180.0;

// ── Economy ───────────────────────────────────────────────────────────────────

/// Wallet balance of a new company (¢).
pub const ECONOMY_STARTING_WALLET: i64 = 1000;

/// Mandatory per-mission tax (¢).
pub const ECONOMY_SPACE_TAX: f64 = 50.0;

/// Maintenance charged even for an undamaged hull (¢).
pub const ECONOMY_BASE_MAINTENANCE: f64 = 10.0;

/// Maintenance per hull point lost during the mission (¢).
pub const ECONOMY_MAINTENANCE_PER_DAMAGE: f64 = 0.5;

/// Charged when the hull reaches zero (¢).
pub const ECONOMY_TOW_FEE: f64 = 200.0;

/// Action costs (¢).  Thrust and turning are charged per second held.
pub const ECONOMY_THRUST_COST_PER_SECOND: f64 = 0.6;
pub const ECONOMY_TURN_COST_PER_SECOND: f64 = 0.3;
pub const ECONOMY_BULLET_COST_BASE: f64 = 0.5;
pub const ECONOMY_BULLET_COST_FIREPOWER: f64 = 2.0;

/// Subscription base prices per mission (¢), before inflation.
pub const SUBSCRIPTION_SCANNER_COST: f64 = 30.0;
pub const SUBSCRIPTION_YIELD_COST: f64 = 20.0;
pub const SUBSCRIPTION_FIREPOWER_COST: f64 = 25.0;
pub const SUBSCRIPTION_HULL_COST: f64 = 35.0;

/// Earnings bonus granted by the yield subscription.
pub const SUBSCRIPTION_YIELD_BONUS: f64 = 0.5;

/// Multiplier applied to the inflation factor after every settled mission.
pub const ECONOMY_INFLATION_RATE: f64 = 1.05;

/// Missions that must be on record before the company can be sold.
pub const ECONOMY_ACQUISITION_MIN_MISSIONS: usize = 4;

/// Number of most recent missions averaged for the acquisition price.
pub const ECONOMY_ACQUISITION_WINDOW: usize = 4;

/// Sale price = average recent profit × this multiplier.
pub const ECONOMY_ACQUISITION_MULTIPLIER: f64 = 5.0;

// ── Streaks ───────────────────────────────────────────────────────────────────

pub const STREAK_SMALL_THRESHOLD: u32 = 3;
pub const STREAK_SMALL_BONUS: f64 = 0.10;
pub const STREAK_LARGE_THRESHOLD: u32 = 7;
pub const STREAK_LARGE_BONUS: f64 = 0.30;

// ── Collision damage ──────────────────────────────────────────────────────────

/// Hull damage from touching a prime while in combat mode.
pub const COLLISION_PRIME_COMBAT_DAMAGE: f32 = 10.0;

/// Hull damage from touching a composite while in combat mode.
///
/// In collection mode a composite deals its own number as damage instead.
pub const COLLISION_COMPOSITE_COMBAT_DAMAGE: f32 = 15.0;

// ── Session ───────────────────────────────────────────────────────────────────

/// Upper bound on a single simulation step (s).
///
/// A stalled frame (tab in background, debugger pause) is clamped to this so
/// the simulation does not try to catch up in one huge jump.
pub const SESSION_MAX_FRAME_DT: f32 = 0.1;

/// Play area used before the first window resize arrives.
pub const SESSION_DEFAULT_WIDTH: f32 = 1200.0;
pub const SESSION_DEFAULT_HEIGHT: f32 = 680.0;

// ── HUD ───────────────────────────────────────────────────────────────────────

/// Hull readout turns amber below this value.
pub const HUD_HEALTH_WARNING: f32 = 60.0;

/// Hull readout turns red below this value.
pub const HUD_HEALTH_DANGER: f32 = 30.0;
