//! Ship, projectile and action-cost state.
//!
//! Behaviour lives in the sibling modules:
//! - [`super::control`]: controls snapshot, motion and thrust costs
//! - [`super::combat`]: firing, damage and cost totals
//! - [`super::rendering`]: gizmo drawing

use crate::config::ShipConfig;
use crate::constants::{HUD_HEALTH_DANGER, HUD_HEALTH_WARNING};
use crate::simulation::PlayBounds;
use bevy::math::Vec2;

/// Money spent flying the ship during one mission (¢, unrounded).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ActionCosts {
    pub thrust: f64,
    pub turn: f64,
    pub bullets: f64,
}

impl ActionCosts {
    #[inline]
    pub fn total(&self) -> f64 {
        self.thrust + self.turn + self.bullets
    }
}

/// Colour band of the hull readout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthBand {
    Healthy,
    Warning,
    Danger,
}

impl HealthBand {
    pub fn from_health(health: f32) -> Self {
        if health < HUD_HEALTH_DANGER {
            HealthBand::Danger
        } else if health < HUD_HEALTH_WARNING {
            HealthBand::Warning
        } else {
            HealthBand::Healthy
        }
    }
}

/// A fired round.
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub position: Vec2,
    /// Velocity (px/s), including the ship's velocity at launch.
    pub velocity: Vec2,
    /// Remaining lifetime (s).
    pub life: f32,
}

impl Projectile {
    /// Move and age the projectile.  Returns `false` once it has fizzled or
    /// left the play area by more than `margin`.
    pub fn update(&mut self, dt: f32, bounds: PlayBounds, margin: f32) -> bool {
        self.position += self.velocity * dt;
        self.life -= dt;
        self.life > 0.0 && bounds.contains(self.position, margin)
    }
}

/// The player's mining ship.
///
/// `health` stays within `[0, max_health]`; only [`Ship::take_damage`]
/// lowers it.
#[derive(Debug, Clone)]
pub struct Ship {
    /// Centre position (px, origin top-left, y down).
    pub position: Vec2,
    /// Velocity (px/s).
    pub velocity: Vec2,
    /// Heading (rad); 0 points along +x, positive turns clockwise on screen.
    pub rotation: f32,
    /// Combat mode: auto-fire on, bigger hitbox, every contact hurts.
    pub combat_mode: bool,
    pub(super) health: f32,
    pub(super) max_health: f32,
    /// Time until the next shot is allowed (s).
    pub(super) fire_cooldown: f32,
    pub(super) action_costs: ActionCosts,
}

impl Ship {
    /// A stationary ship in collection mode with full hull.
    pub fn new(position: Vec2, max_health: f32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            rotation: 0.0,
            combat_mode: false,
            health: max_health,
            max_health,
            fire_cooldown: 0.0,
            action_costs: ActionCosts::default(),
        }
    }

    /// Ship for a new mission; the hull subscription raises its health.
    pub fn for_mission(position: Vec2, hull_upgrade: bool, config: &ShipConfig) -> Self {
        let max_health = if hull_upgrade {
            config.base_health * config.hull_upgrade_multiplier
        } else {
            config.base_health
        };
        Self::new(position, max_health)
    }

    #[inline]
    pub fn health(&self) -> f32 {
        self.health
    }

    #[inline]
    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    #[inline]
    pub fn health_band(&self) -> HealthBand {
        HealthBand::from_health(self.health)
    }

    #[inline]
    pub fn action_costs(&self) -> ActionCosts {
        self.action_costs
    }

    /// `true` when the fire cooldown has run out.
    #[inline]
    pub fn can_fire(&self) -> bool {
        self.fire_cooldown <= 0.0
    }

    /// Semi-axes of the current hitbox ellipse.
    pub fn hitbox(&self, config: &ShipConfig) -> Vec2 {
        if self.combat_mode {
            config.hitbox_combat.semi_axes()
        } else {
            config.hitbox_collection.semi_axes()
        }
    }

    /// Unit vector along the nose.
    #[inline]
    pub fn heading(&self) -> Vec2 {
        Vec2::from_angle(self.rotation)
    }
}
