//! One mission's worth of simulation: entity sets, the per-tick update, and
//! the rules that turn collisions into score, streaks and damage.
//!
//! ## Tick order
//!
//! | Step | Work                                                              |
//! |------|-------------------------------------------------------------------|
//! | 1    | bail out if the mission already ended                             |
//! | 2    | advance the contract timer; time up ends the mission              |
//! | 3    | ship controls + physics; combat mode auto-fires                   |
//! | 4–6  | move asteroids, projectiles, particles; expire the dead ones      |
//! | 7    | projectile ↔ asteroid hits (hit / factor / bounce)                |
//! | 8    | ship ↔ asteroid contacts (collect / damage); hull at 0 ends it    |
//! | 9    | top the field up from the spawn pool                              |
//! | 10   | empty pool and empty field ends the mission                       |
//!
//! Any mission end returns immediately, so a mission finishes (and is
//! settled) exactly once.
//!
//! Coordinates are screen pixels with the origin at the top-left and y
//! pointing down; [`crate::graphics`] maps them into Bevy world space.

use crate::asteroid::Asteroid;
use crate::collision::{circles_overlap, ellipse_circle_overlap};
use crate::config::GameConfig;
use crate::constants::{TUTORIAL_COMPOSITES, TUTORIAL_PRIMES};
use crate::economy::Loadout;
use crate::particles::{spawn_burst, BurstKind, Particle};
use crate::ship::{Controls, Projectile, Ship};
use bevy::log::{debug, info};
use bevy::math::Vec2;
use bevy::prelude::Message;
use rand::rngs::StdRng;
use rand::Rng;

// ── Play area ─────────────────────────────────────────────────────────────────

/// Size of the visible play area (px).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayBounds {
    pub width: f32,
    pub height: f32,
}

impl PlayBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Toroidal wrap: a point more than `margin` past one edge reappears
    /// `margin` past the opposite edge.
    pub fn wrap(self, mut p: Vec2, margin: f32) -> Vec2 {
        if p.x < -margin {
            p.x = self.width + margin;
        } else if p.x > self.width + margin {
            p.x = -margin;
        }
        if p.y < -margin {
            p.y = self.height + margin;
        } else if p.y > self.height + margin {
            p.y = -margin;
        }
        p
    }

    /// `true` while `p` is strictly inside the area grown by `margin`.
    pub fn contains(self, p: Vec2, margin: f32) -> bool {
        p.x > -margin && p.x < self.width + margin && p.y > -margin && p.y < self.height + margin
    }

    /// Random point `margin` outside a uniformly chosen edge.
    pub fn edge_spawn_point<R: Rng + ?Sized>(self, rng: &mut R, margin: f32) -> Vec2 {
        let along_x = rng.gen::<f32>() * self.width;
        let along_y = rng.gen::<f32>() * self.height;
        match rng.gen_range(0..4) {
            0 => Vec2::new(along_x, -margin),
            1 => Vec2::new(self.width + margin, along_y),
            2 => Vec2::new(along_x, self.height + margin),
            _ => Vec2::new(-margin, along_y),
        }
    }
}

// ── Sound cues ────────────────────────────────────────────────────────────────

/// Fire-and-forget audio events raised by the simulation.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Shoot,
    Collect,
    Damage,
    Factorize,
}

/// Receiver for [`SoundCue`]s.  The simulation never reads anything back.
pub trait SoundSink {
    fn play(&mut self, cue: SoundCue);
}

impl SoundSink for Vec<SoundCue> {
    fn play(&mut self, cue: SoundCue) {
        self.push(cue);
    }
}

// ── Mission state ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissionKind {
    /// Two-asteroid training run: no timer, no pool, no settlement.
    Tutorial,
    /// Paid contract: timed, pooled, settled by the ledger.
    Contract,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissionEndReason {
    TimeUp,
    ShipDestroyed,
    FieldCleared,
    Quit,
}

impl MissionEndReason {
    pub fn describe(self) -> &'static str {
        match self {
            MissionEndReason::TimeUp => "time up",
            MissionEndReason::ShipDestroyed => "ship destroyed",
            MissionEndReason::FieldCleared => "field cleared",
            MissionEndReason::Quit => "quit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Running,
    Ended(MissionEndReason),
}

/// Consecutive prime collections.
///
/// Collecting extends a live streak or starts a new one at 1.  Shooting a
/// prime or any combat-mode contact breaks the chain but keeps the count;
/// ramming a composite in collection mode zeroes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Streak {
    pub current: u32,
    pub active: bool,
}

impl Streak {
    pub fn collect(&mut self) {
        self.current = if self.active { self.current + 1 } else { 1 };
        self.active = true;
    }

    pub fn break_chain(&mut self) {
        self.active = false;
    }

    pub fn reset(&mut self) {
        self.active = false;
        self.current = 0;
    }

    /// The count to display, once it reaches `threshold`.
    pub fn shown(&self, threshold: u32) -> Option<u32> {
        (self.current >= threshold).then_some(self.current)
    }
}

/// What the ledger needs from a finished mission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MissionSummary {
    pub score: u64,
    pub final_streak: u32,
    pub primes_collected: u32,
    /// Unrounded action costs (¢).
    pub action_costs: f64,
    pub damage_taken: f32,
    pub ship_destroyed: bool,
    pub reason: MissionEndReason,
}

/// A single tutorial or contract in progress.
#[derive(Debug, Clone)]
pub struct Mission {
    kind: MissionKind,
    bounds: PlayBounds,
    ship: Ship,
    asteroids: Vec<Asteroid>,
    projectiles: Vec<Projectile>,
    particles: Vec<Particle>,
    score: u64,
    elapsed: f32,
    duration: Option<f32>,
    asteroids_remaining: u32,
    streak: Streak,
    damage_taken: f32,
    primes_collected: u32,
    loadout: Loadout,
    rng: StdRng,
    next_asteroid_id: u64,
    ended: Option<MissionEndReason>,
}

impl Mission {
    fn empty(kind: MissionKind, bounds: PlayBounds, ship: Ship, loadout: Loadout, rng: StdRng) -> Self {
        Self {
            kind,
            bounds,
            ship,
            asteroids: Vec::new(),
            projectiles: Vec::new(),
            particles: Vec::new(),
            score: 0,
            elapsed: 0.0,
            duration: None,
            asteroids_remaining: 0,
            streak: Streak::default(),
            damage_taken: 0.0,
            primes_collected: 0,
            loadout,
            rng,
            next_asteroid_id: 1,
            ended: None,
        }
    }

    /// A paid contract: ship at the centre (hull subscription applied), the
    /// opening wave spawned at the edges, the rest held in the pool.
    pub fn contract(bounds: PlayBounds, loadout: Loadout, config: &GameConfig, rng: StdRng) -> Self {
        let ship = Ship::for_mission(bounds.center(), loadout.hull, &config.ship);
        let mut mission = Self::empty(MissionKind::Contract, bounds, ship, loadout, rng);
        mission.duration = Some(config.mission.duration);
        mission.asteroids_remaining = config.mission.asteroid_pool;

        let opening = config.mission.initial_asteroids.min(config.mission.asteroid_pool);
        for _ in 0..opening {
            mission.spawn_from_pool(config);
        }
        info!(
            "Contract started: {} asteroids in the pool, {:.0}s on the clock",
            config.mission.asteroid_pool, config.mission.duration
        );
        mission
    }

    /// The training run: one small prime and one small composite, both slow.
    pub fn tutorial(bounds: PlayBounds, loadout: Loadout, config: &GameConfig, mut rng: StdRng) -> Self {
        let ship = Ship::for_mission(bounds.center(), false, &config.ship);
        let prime = TUTORIAL_PRIMES[rng.gen_range(0..TUTORIAL_PRIMES.len())];
        let composite = TUTORIAL_COMPOSITES[rng.gen_range(0..TUTORIAL_COMPOSITES.len())];
        let mut mission = Self::empty(MissionKind::Tutorial, bounds, ship, loadout, rng);

        let placements = [
            (prime, Vec2::new(bounds.width * 0.3, bounds.height * 0.3)),
            (composite, Vec2::new(bounds.width * 0.7, bounds.height * 0.7)),
        ];
        for (number, position) in placements {
            let mut asteroid = Asteroid::with_number(&mut mission.rng, position, number, &config.asteroid);
            asteroid.velocity *= config.mission.tutorial_speed_scale;
            mission.adopt(asteroid);
        }
        info!("Tutorial started: prime {} and composite {}", prime, composite);
        mission
    }

    fn adopt(&mut self, mut asteroid: Asteroid) {
        asteroid.set_id(self.next_asteroid_id);
        self.next_asteroid_id += 1;
        self.asteroids.push(asteroid);
    }

    fn spawn_from_pool(&mut self, config: &GameConfig) {
        if self.asteroids_remaining == 0 {
            return;
        }
        let position = self
            .bounds
            .edge_spawn_point(&mut self.rng, config.asteroid.spawn_margin);
        let asteroid = Asteroid::spawn(&mut self.rng, position, &config.asteroid);
        self.adopt(asteroid);
        self.asteroids_remaining -= 1;
    }

    /// End the mission now (no-op if it already ended).
    pub fn end(&mut self, reason: MissionEndReason) -> TickOutcome {
        if let Some(previous) = self.ended {
            return TickOutcome::Ended(previous);
        }
        self.ended = Some(reason);
        info!(
            "{:?} ended ({}): score {}, streak {}",
            self.kind,
            reason.describe(),
            self.score,
            self.streak.current
        );
        TickOutcome::Ended(reason)
    }

    /// Advance the mission by `dt` seconds.
    pub fn tick<S: SoundSink + ?Sized>(
        &mut self,
        controls: &Controls,
        dt: f32,
        config: &GameConfig,
        sounds: &mut S,
    ) -> TickOutcome {
        if let Some(reason) = self.ended {
            return TickOutcome::Ended(reason);
        }

        if let Some(duration) = self.duration {
            self.elapsed += dt;
            if self.elapsed >= duration {
                return self.end(MissionEndReason::TimeUp);
            }
        }

        self.ship.update(
            controls,
            dt,
            self.bounds,
            &mut self.particles,
            &mut self.rng,
            config,
        );
        if self.ship.combat_mode
            && self
                .ship
                .fire(&mut self.projectiles, self.loadout.firepower, config)
        {
            sounds.play(SoundCue::Shoot);
        }

        for asteroid in &mut self.asteroids {
            asteroid.update(self.bounds, dt);
        }

        let bounds = self.bounds;
        let margin = config.projectile.bounds_margin;
        self.projectiles.retain_mut(|p| p.update(dt, bounds, margin));
        self.particles.retain_mut(|p| p.update(dt));

        self.resolve_projectile_hits(config, sounds);

        if let Some(reason) = self.resolve_ship_contacts(config, sounds) {
            return self.end(reason);
        }

        if self.kind == MissionKind::Contract
            && self.asteroids.len() < config.mission.min_on_screen
            && self.asteroids_remaining > 0
        {
            self.spawn_from_pool(config);
        }

        if self.asteroids_remaining == 0 && self.asteroids.is_empty() {
            return self.end(MissionEndReason::FieldCleared);
        }

        TickOutcome::Running
    }

    fn resolve_projectile_hits<S: SoundSink + ?Sized>(&mut self, config: &GameConfig, sounds: &mut S) {
        let mut i = self.projectiles.len();
        while i > 0 {
            i -= 1;
            let shot = self.projectiles[i].position;
            let mut j = self.asteroids.len();
            while j > 0 {
                j -= 1;
                let target = &self.asteroids[j];
                if !circles_overlap(shot, config.projectile.radius, target.position, target.radius()) {
                    continue;
                }

                self.projectiles.remove(i);
                let outcome = self.asteroids[j].hit(self.loadout.firepower, &mut self.rng, &config.asteroid);
                if outcome.destroyed {
                    let asteroid = self.asteroids.remove(j);
                    if asteroid.is_prime() {
                        // Shooting a prime wastes it.
                        self.streak.break_chain();
                        self.burst(asteroid.position, BurstKind::Prime, config);
                    } else if outcome.factored {
                        let children = asteroid.factor(&mut self.rng, &config.asteroid);
                        sounds.play(SoundCue::Factorize);
                        for child in children {
                            self.adopt(child);
                        }
                        self.burst(asteroid.position, BurstKind::Composite, config);
                    } else {
                        debug!("shot bounced off {}", asteroid.number());
                        self.burst(asteroid.position, BurstKind::Composite, config);
                    }
                } else {
                    sounds.play(SoundCue::Shoot);
                }
                break;
            }
        }
    }

    /// Returns the end reason when a contact destroys the ship.
    fn resolve_ship_contacts<S: SoundSink + ?Sized>(
        &mut self,
        config: &GameConfig,
        sounds: &mut S,
    ) -> Option<MissionEndReason> {
        let hitbox = self.ship.hitbox(&config.ship);
        let mut j = self.asteroids.len();
        while j > 0 {
            j -= 1;
            let target = &self.asteroids[j];
            if !ellipse_circle_overlap(
                self.ship.position,
                self.ship.rotation,
                hitbox,
                target.position,
                target.radius(),
            ) {
                continue;
            }

            let asteroid = self.asteroids.remove(j);
            if self.ship.combat_mode {
                let (damage, kind) = if asteroid.is_prime() {
                    (config.collision.prime_combat_damage, BurstKind::Prime)
                } else {
                    (config.collision.composite_combat_damage, BurstKind::Composite)
                };
                let destroyed = self.apply_damage(damage);
                self.streak.break_chain();
                sounds.play(SoundCue::Damage);
                self.burst(asteroid.position, kind, config);
                if destroyed {
                    return Some(MissionEndReason::ShipDestroyed);
                }
            } else if asteroid.is_prime() {
                sounds.play(SoundCue::Collect);
                self.score += asteroid.number();
                self.primes_collected += 1;
                self.streak.collect();
                self.burst(asteroid.position, BurstKind::Collection, config);
            } else {
                let destroyed = self.apply_damage(asteroid.number() as f32);
                self.streak.reset();
                sounds.play(SoundCue::Damage);
                self.burst(asteroid.position, BurstKind::Composite, config);
                if destroyed {
                    return Some(MissionEndReason::ShipDestroyed);
                }
            }
        }
        None
    }

    fn apply_damage(&mut self, amount: f32) -> bool {
        self.damage_taken += amount;
        self.ship.take_damage(amount)
    }

    fn burst(&mut self, position: Vec2, kind: BurstKind, config: &GameConfig) {
        spawn_burst(&mut self.particles, &mut self.rng, position, kind, &config.particles);
    }

    // ── Read-only snapshot ────────────────────────────────────────────────────

    pub fn summary(&self) -> MissionSummary {
        MissionSummary {
            score: self.score,
            final_streak: self.streak.current,
            primes_collected: self.primes_collected,
            action_costs: self.ship.total_action_costs(),
            damage_taken: self.damage_taken,
            ship_destroyed: self.ship.health() <= 0.0,
            reason: self.ended.unwrap_or(MissionEndReason::Quit),
        }
    }

    #[inline]
    pub fn kind(&self) -> MissionKind {
        self.kind
    }

    #[inline]
    pub fn bounds(&self) -> PlayBounds {
        self.bounds
    }

    /// Follow a window resize.  Entities outside the new area wrap back in
    /// on their next update.
    pub fn set_bounds(&mut self, bounds: PlayBounds) {
        self.bounds = bounds;
    }

    pub fn ship(&self) -> &Ship {
        &self.ship
    }

    /// Direct access to the ship, bypassing the tick.  Used to stage
    /// situations in tests.
    #[doc(hidden)]
    pub fn ship_mut(&mut self) -> &mut Ship {
        &mut self.ship
    }

    pub fn asteroids(&self) -> &[Asteroid] {
        &self.asteroids
    }

    /// Replace the asteroid field.  Ids are reassigned.
    #[doc(hidden)]
    pub fn set_asteroids(&mut self, asteroids: Vec<Asteroid>) {
        self.asteroids.clear();
        for asteroid in asteroids {
            self.adopt(asteroid);
        }
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[inline]
    pub fn score(&self) -> u64 {
        self.score
    }

    #[inline]
    pub fn streak(&self) -> Streak {
        self.streak
    }

    #[inline]
    pub fn damage_taken(&self) -> f32 {
        self.damage_taken
    }

    #[inline]
    pub fn asteroids_remaining(&self) -> u32 {
        self.asteroids_remaining
    }

    /// Override the spawn pool.
    #[doc(hidden)]
    pub fn set_asteroids_remaining(&mut self, remaining: u32) {
        self.asteroids_remaining = remaining;
    }

    #[inline]
    pub fn loadout(&self) -> Loadout {
        self.loadout
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Seconds left on the clock; `None` for the untimed tutorial.
    pub fn time_left(&self) -> Option<f32> {
        self.duration.map(|d| (d - self.elapsed).max(0.0))
    }

    #[inline]
    pub fn ended(&self) -> Option<MissionEndReason> {
        self.ended
    }
}

/// `m:ss`, rounding partial seconds up so the clock reads 0:00 only at the end.
pub fn format_clock(seconds: f32) -> String {
    let total = seconds.max(0.0).ceil() as u32;
    format!("{}:{:02}", total / 60, total % 60)
}
