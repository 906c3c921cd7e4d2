//! Numbered asteroid entity: identity, motion, and the hit/factor state machine.
//!
//! Every asteroid carries a positive integer ≥ 2.  Primes are collectible and
//! shatter on any hit; composites must be shot apart and split into one child
//! asteroid per prime factor.
//!
//! ## Hit rules
//!
//! | Asteroid  | Firepower | Hit # | Result                                         |
//! |-----------|-----------|-------|------------------------------------------------|
//! | prime     | any       | any   | destroyed, not factored                        |
//! | composite | on        | 1     | destroyed, factored                            |
//! | composite | off       | 1     | survives, flashes white                        |
//! | composite | off       | 2     | destroyed; factored with `reliability` chance, |
//! |           |           |       | otherwise the shot "bounces" and nothing spawns |
//!
//! The polygon outline is purely cosmetic; collisions treat every asteroid as
//! a circle of [`Asteroid::radius`].

use crate::config::AsteroidConfig;
use crate::number_theory::{factorize, is_prime};
use crate::simulation::PlayBounds;
use bevy::log::debug;
use bevy::math::Vec2;
use rand::Rng;

/// Result of a projectile hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HitOutcome {
    /// The asteroid must be removed from play.
    pub destroyed: bool,
    /// The asteroid splits: call [`Asteroid::factor`] for the children.
    pub factored: bool,
}

/// Colour class used by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsteroidTint {
    /// Recently hit; drawn white.
    Flash,
    /// Prime, revealed by the auto-scanner subscription.
    Prime,
    /// Composite, revealed by the auto-scanner subscription.
    Composite,
    /// Identity hidden (no scanner).
    Neutral,
}

/// A numbered asteroid drifting across the play area.
#[derive(Debug, Clone)]
pub struct Asteroid {
    id: u64,
    /// Centre position (px, origin top-left).
    pub position: Vec2,
    /// Drift velocity (px/s).
    pub velocity: Vec2,
    number: u64,
    is_prime: bool,
    radius: f32,
    points: Vec<Vec2>,
    hits: u32,
    flash_timer: f32,
}

/// Collision radius of an asteroid carrying `number`.
///
/// Strictly increasing in `number`, so bigger numbers are bigger rocks.
pub fn radius_for_number(number: u64, config: &AsteroidConfig) -> f32 {
    config.base_radius + (number as f32).ln() * config.radius_log_multiplier
}

/// Draw an asteroid number from the configured range.
///
/// A coin flip with `prime_chance` decides whether a prime is wanted; numbers
/// are then redrawn until their primality matches.  After `number_retries`
/// failed draws a fixed fallback is used so the loop always terminates.
pub fn random_number<R: Rng + ?Sized>(rng: &mut R, config: &AsteroidConfig) -> u64 {
    let want_prime = rng.gen_bool(config.prime_chance);
    for _ in 0..config.number_retries {
        let n = rng.gen_range(config.min_number..=config.max_number);
        if is_prime(n) == want_prime {
            return n;
        }
    }
    if want_prime {
        config.fallback_prime
    } else {
        config.fallback_composite
    }
}

/// Random star-shaped outline around the origin.
fn generate_outline<R: Rng + ?Sized>(rng: &mut R, radius: f32, config: &AsteroidConfig) -> Vec<Vec2> {
    let count = config.min_points + rng.gen_range(0..config.max_extra_points.max(1));
    (0..count)
        .map(|i| {
            let angle = std::f32::consts::TAU * i as f32 / count as f32;
            let variation = if config.radius_variation_max > config.radius_variation_min {
                rng.gen_range(config.radius_variation_min..config.radius_variation_max)
            } else {
                config.radius_variation_min
            };
            Vec2::from_angle(angle) * radius * variation
        })
        .collect()
}

fn random_velocity<R: Rng + ?Sized>(rng: &mut R, config: &AsteroidConfig) -> Vec2 {
    let angle = rng.gen_range(0.0..std::f32::consts::TAU);
    let speed = if config.max_speed > config.min_speed {
        rng.gen_range(config.min_speed..config.max_speed)
    } else {
        config.min_speed
    };
    Vec2::from_angle(angle) * speed
}

impl Asteroid {
    /// Spawn an asteroid with a randomly drawn number.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, position: Vec2, config: &AsteroidConfig) -> Self {
        let number = random_number(rng, config);
        Self::with_number(rng, position, number, config)
    }

    /// Spawn an asteroid carrying a specific number (≥ 2).
    ///
    /// Velocity and outline are still random.
    pub fn with_number<R: Rng + ?Sized>(
        rng: &mut R,
        position: Vec2,
        number: u64,
        config: &AsteroidConfig,
    ) -> Self {
        debug_assert!(number >= 2, "asteroid numbers start at 2, got {number}");
        let radius = radius_for_number(number, config);
        let velocity = random_velocity(rng, config);
        let points = generate_outline(rng, radius, config);
        Self {
            id: 0,
            position,
            velocity,
            number,
            is_prime: is_prime(number),
            radius,
            points,
            hits: 0,
            flash_timer: 0.0,
        }
    }

    /// Identifier unique within a mission (0 until the mission adopts it).
    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    #[inline]
    pub fn number(&self) -> u64 {
        self.number
    }

    #[inline]
    pub fn is_prime(&self) -> bool {
        self.is_prime
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Outline vertices relative to [`Asteroid::position`].
    #[inline]
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Hits absorbed so far (composites only).
    #[inline]
    pub fn hits(&self) -> u32 {
        self.hits
    }

    /// Remaining white-flash time (s).
    #[inline]
    pub fn flash_timer(&self) -> f32 {
        self.flash_timer
    }

    /// Drift by `velocity · dt`, run down the flash timer, and wrap around the
    /// screen edges with a margin of one radius.
    pub fn update(&mut self, bounds: PlayBounds, dt: f32) {
        self.position += self.velocity * dt;
        if self.flash_timer > 0.0 {
            self.flash_timer = (self.flash_timer - dt).max(0.0);
        }
        self.position = bounds.wrap(self.position, self.radius);
    }

    /// Apply one projectile hit.  See the module table for the rules.
    pub fn hit<R: Rng + ?Sized>(
        &mut self,
        firepower_active: bool,
        rng: &mut R,
        config: &AsteroidConfig,
    ) -> HitOutcome {
        if self.is_prime {
            return HitOutcome {
                destroyed: true,
                factored: false,
            };
        }

        self.hits += 1;

        if firepower_active {
            return HitOutcome {
                destroyed: true,
                factored: true,
            };
        }

        if self.hits >= config.hits_to_break {
            // The reliability roll fails as a "bounce": the rock is lost
            // without spawning its factors.
            return HitOutcome {
                destroyed: true,
                factored: rng.gen_bool(config.factorization_reliability),
            };
        }

        self.flash_timer = config.hit_flash_duration;
        HitOutcome::default()
    }

    /// Split into one child per prime factor, spawned at this asteroid's
    /// position with an extra random radial kick on top of their own drift.
    ///
    /// Only meaningful after [`Asteroid::hit`] reported `factored: true`.
    pub fn factor<R: Rng + ?Sized>(&self, rng: &mut R, config: &AsteroidConfig) -> Vec<Asteroid> {
        let factors = factorize(self.number);
        debug!("asteroid {} factored into {:?}", self.number, factors);
        factors
            .into_iter()
            .map(|f| {
                let mut child = Asteroid::with_number(rng, self.position, f, config);
                let angle = rng.gen_range(0.0..std::f32::consts::TAU);
                child.velocity += Vec2::from_angle(angle) * config.factor_kick;
                child
            })
            .collect()
    }

    /// Render colour class, given whether the auto-scanner is subscribed.
    pub fn tint(&self, scanner_active: bool) -> AsteroidTint {
        if self.flash_timer > 0.0 {
            AsteroidTint::Flash
        } else if !scanner_active {
            AsteroidTint::Neutral
        } else if self.is_prime {
            AsteroidTint::Prime
        } else {
            AsteroidTint::Composite
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0xA57E_401D)
    }

    fn cfg() -> AsteroidConfig {
        AsteroidConfig::default()
    }

    // ── Identity ──────────────────────────────────────────────────────────────

    #[test]
    fn radius_is_strictly_increasing_in_number() {
        let config = cfg();
        let mut previous = radius_for_number(2, &config);
        for n in 3..10_000 {
            let r = radius_for_number(n, &config);
            assert!(r > previous, "radius({n})={r} not above radius({})={previous}", n - 1);
            previous = r;
        }
    }

    #[test]
    fn radius_is_deterministic_per_number() {
        let mut rng = rng();
        let a = Asteroid::with_number(&mut rng, Vec2::ZERO, 12, &cfg());
        let b = Asteroid::with_number(&mut rng, Vec2::new(50.0, 50.0), 12, &cfg());
        assert_eq!(a.radius(), b.radius());
        assert_eq!(a.radius(), radius_for_number(12, &cfg()));
    }

    #[test]
    fn primality_flag_matches_number() {
        let mut rng = rng();
        for _ in 0..500 {
            let a = Asteroid::spawn(&mut rng, Vec2::ZERO, &cfg());
            assert_eq!(a.is_prime(), is_prime(a.number()));
            assert!(a.number() >= 2);
        }
    }

    #[test]
    fn spawned_mix_tracks_prime_chance() {
        let mut rng = rng();
        let config = cfg();
        let trials = 10_000;
        let primes = (0..trials)
            .filter(|_| is_prime(random_number(&mut rng, &config)))
            .count();
        let ratio = primes as f64 / trials as f64;
        assert!(
            (ratio - config.prime_chance).abs() < 0.05,
            "prime ratio {ratio} too far from {}",
            config.prime_chance
        );
    }

    #[test]
    fn impossible_range_falls_back() {
        let mut rng = rng();
        // Only composites available: a prime request must hit the fallback.
        let config = AsteroidConfig {
            min_number: 4,
            max_number: 4,
            prime_chance: 1.0,
            ..cfg()
        };
        assert_eq!(random_number(&mut rng, &config), config.fallback_prime);

        let config = AsteroidConfig {
            min_number: 5,
            max_number: 5,
            prime_chance: 0.0,
            ..cfg()
        };
        assert_eq!(random_number(&mut rng, &config), config.fallback_composite);
    }

    #[test]
    fn outline_has_configured_point_count_and_jitter() {
        let mut rng = rng();
        let config = cfg();
        for _ in 0..100 {
            let a = Asteroid::spawn(&mut rng, Vec2::ZERO, &config);
            let n = a.points().len();
            assert!(n >= config.min_points && n < config.min_points + config.max_extra_points);
            for p in a.points() {
                let scale = p.length() / a.radius();
                assert!(
                    scale >= config.radius_variation_min - 1e-4
                        && scale <= config.radius_variation_max + 1e-4,
                    "vertex scale {scale} outside jitter band"
                );
            }
        }
    }

    #[test]
    fn spawn_speed_is_within_band() {
        let mut rng = rng();
        let config = cfg();
        for _ in 0..200 {
            let speed = Asteroid::spawn(&mut rng, Vec2::ZERO, &config).velocity.length();
            assert!(speed >= config.min_speed - 1e-3 && speed <= config.max_speed + 1e-3);
        }
    }

    // ── Motion ────────────────────────────────────────────────────────────────

    #[test]
    fn update_integrates_velocity() {
        let mut rng = rng();
        let mut a = Asteroid::with_number(&mut rng, Vec2::new(100.0, 100.0), 7, &cfg());
        a.velocity = Vec2::new(50.0, -20.0);
        a.update(PlayBounds::new(800.0, 600.0), 0.5);
        assert!((a.position - Vec2::new(125.0, 90.0)).length() < 1e-4);
    }

    #[test]
    fn update_wraps_past_right_edge() {
        let mut rng = rng();
        let mut a = Asteroid::with_number(&mut rng, Vec2::new(800.0, 300.0), 7, &cfg());
        let r = a.radius();
        a.position.x = 800.0 + r + 0.5;
        a.velocity = Vec2::ZERO;
        a.update(PlayBounds::new(800.0, 600.0), 0.016);
        assert_eq!(a.position.x, -r);
    }

    #[test]
    fn flash_timer_runs_down_to_zero() {
        let mut rng = rng();
        let config = cfg();
        let mut a = Asteroid::with_number(&mut rng, Vec2::ZERO, 12, &config);
        a.hit(false, &mut rng, &config);
        assert!(a.flash_timer() > 0.0);
        assert_eq!(a.tint(true), AsteroidTint::Flash);
        a.update(PlayBounds::new(800.0, 600.0), config.hit_flash_duration + 0.01);
        assert_eq!(a.flash_timer(), 0.0);
        assert_eq!(a.tint(true), AsteroidTint::Composite);
    }

    // ── Hit state machine ─────────────────────────────────────────────────────

    #[test]
    fn prime_hit_always_destroys_without_factoring() {
        let mut rng = rng();
        let config = cfg();
        for firepower in [false, true] {
            let mut a = Asteroid::with_number(&mut rng, Vec2::ZERO, 13, &config);
            assert_eq!(
                a.hit(firepower, &mut rng, &config),
                HitOutcome {
                    destroyed: true,
                    factored: false
                }
            );
        }
    }

    #[test]
    fn composite_with_firepower_breaks_on_first_hit() {
        let mut rng = rng();
        let config = cfg();
        for _ in 0..100 {
            let mut a = Asteroid::with_number(&mut rng, Vec2::ZERO, 30, &config);
            assert_eq!(
                a.hit(true, &mut rng, &config),
                HitOutcome {
                    destroyed: true,
                    factored: true
                }
            );
        }
    }

    #[test]
    fn composite_without_firepower_survives_first_hit() {
        let mut rng = rng();
        let config = cfg();
        let mut a = Asteroid::with_number(&mut rng, Vec2::ZERO, 9, &config);
        let outcome = a.hit(false, &mut rng, &config);
        assert!(!outcome.destroyed);
        assert!(!outcome.factored);
        assert_eq!(a.hits(), 1);
        assert!(a.hit(false, &mut rng, &config).destroyed);
        assert_eq!(a.hits(), 2);
    }

    #[test]
    fn second_hit_factor_rate_matches_reliability() {
        let mut rng = rng();
        let config = cfg();
        let trials = 10_000;
        let mut factored = 0;
        for _ in 0..trials {
            let mut a = Asteroid::with_number(&mut rng, Vec2::ZERO, 6, &config);
            assert!(!a.hit(false, &mut rng, &config).destroyed);
            let outcome = a.hit(false, &mut rng, &config);
            assert!(outcome.destroyed);
            if outcome.factored {
                factored += 1;
            }
        }
        let rate = factored as f64 / trials as f64;
        assert!(
            (rate - config.factorization_reliability).abs() < 0.05,
            "factor rate {rate} outside ±5% of {}",
            config.factorization_reliability
        );
    }

    #[test]
    fn tint_hides_identity_without_scanner() {
        let mut rng = rng();
        let prime = Asteroid::with_number(&mut rng, Vec2::ZERO, 5, &cfg());
        let composite = Asteroid::with_number(&mut rng, Vec2::ZERO, 8, &cfg());
        assert_eq!(prime.tint(false), AsteroidTint::Neutral);
        assert_eq!(composite.tint(false), AsteroidTint::Neutral);
        assert_eq!(prime.tint(true), AsteroidTint::Prime);
        assert_eq!(composite.tint(true), AsteroidTint::Composite);
    }

    // ── Factoring ─────────────────────────────────────────────────────────────

    #[test]
    fn children_multiply_to_parent() {
        let mut rng = rng();
        let config = cfg();
        for n in [4_u64, 6, 12, 30, 48, 49] {
            let parent = Asteroid::with_number(&mut rng, Vec2::new(200.0, 150.0), n, &config);
            let children = parent.factor(&mut rng, &config);
            assert_eq!(children.iter().map(Asteroid::number).product::<u64>(), n);
            assert!(children.iter().all(Asteroid::is_prime));
            assert!(children.iter().all(|c| c.position == parent.position));
        }
    }

    #[test]
    fn children_keep_minimum_speed_after_kick() {
        let mut rng = rng();
        let config = cfg();
        let parent = Asteroid::with_number(&mut rng, Vec2::ZERO, 8, &config);
        for child in parent.factor(&mut rng, &config) {
            let speed = child.velocity.length();
            assert!(speed <= config.max_speed + config.factor_kick + 1e-3);
            assert!(speed >= config.min_speed - config.factor_kick - 1e-3);
        }
    }
}
