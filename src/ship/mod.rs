//! Ship module: hull state, controls, weapons, and drawing.
//!
//! ## Sub-module layout
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`state`] | `Ship`, `Projectile`, `ActionCosts`, `HealthBand` |
//! | [`control`] | `Controls` snapshot; turning, thrust, damping, wrap, thrust billing |
//! | [`combat`] | Firing with cooldown and shot billing, hull damage, cost totals |
//! | [`rendering`] | Gizmo hull, hitbox outline, health bar, projectiles, particles |
//!
//! All public items are re-exported at this level so the rest of the crate
//! can use flat `crate::ship::*` imports.

pub mod combat;
pub mod control;
pub mod rendering;
pub mod state;

pub use control::Controls;
pub use rendering::ship_gizmo_system;
pub use state::{ActionCosts, HealthBand, Projectile, Ship};
