//! Ship-side rendering: hull, hitbox, health bar, projectiles and particles.
//!
//! Everything here is immediate-mode gizmos redrawn every frame from the
//! session snapshot; nothing is spawned into the ECS.
//!
//! ## Layer model (ship / projectile)
//!
//! | Layer          | Technology | Shown while                                  |
//! |----------------|------------|----------------------------------------------|
//! | Hull + nose    | Gizmos     | ship visible (cyan collection, amber combat) |
//! | Hitbox ellipse | Gizmos     | ship visible                                 |
//! | Health bar     | Gizmos     | ship visible                                 |
//! | Projectiles    | Gizmos     | a mission exists                             |
//! | Particles      | Gizmos     | a mission exists; alpha follows life left    |

use crate::graphics::{to_world, to_world_angle};
use crate::session::GameSession;
use bevy::prelude::*;

/// Hull outline in ship-local simulation space (nose along +x).
const HULL: [Vec2; 4] = [
    Vec2::new(20.0, 0.0),
    Vec2::new(-12.0, 11.0),
    Vec2::new(-6.0, 0.0),
    Vec2::new(-12.0, -11.0),
];

const COLLECTION_COLOR: Color = Color::srgb(0.13, 0.83, 0.93);
const COMBAT_COLOR: Color = Color::srgb(0.96, 0.62, 0.04);
const PROJECTILE_COLOR: Color = Color::srgb(0.96, 0.62, 0.04);

/// Draw the ship, its hitbox, projectiles and particles.
///
/// - **Hull**: polygon loop + white nose line, cyan in collection mode and
///   amber in combat mode
/// - **Hitbox**: faint ellipse matching the active collision shape
/// - **Health bar**: green → red under the hull
/// - **Projectiles**: filled amber circles
/// - **Particles**: dots faded by remaining life
pub fn ship_gizmo_system(mut gizmos: Gizmos, session: Res<GameSession>) {
    let Some(mission) = session.mission() else {
        return;
    };
    let bounds = session.bounds();
    let config = session.config();

    // ── Ship ──────────────────────────────────────────────────────────────────
    if session.ship_visible() {
        let ship = mission.ship();
        let pos = to_world(ship.position, bounds);
        let heading = Rot2::radians(ship.rotation);
        let hull_color = if ship.combat_mode {
            COMBAT_COLOR
        } else {
            COLLECTION_COLOR
        };

        for i in 0..HULL.len() {
            let p1 = to_world(ship.position + heading * HULL[i], bounds);
            let p2 = to_world(ship.position + heading * HULL[(i + 1) % HULL.len()], bounds);
            gizmos.line_2d(p1, p2, hull_color);
        }
        let nose = to_world(ship.position + ship.heading() * config.ship.nose_offset * 0.5, bounds);
        gizmos.line_2d(pos, nose, Color::WHITE);

        gizmos.ellipse_2d(
            Isometry2d::new(pos, Rot2::radians(to_world_angle(ship.rotation))),
            ship.hitbox(&config.ship),
            hull_color.with_alpha(0.25),
        );

        let hp_frac = (ship.health() / ship.max_health()).clamp(0.0, 1.0);
        let bar_half = 20.0;
        let bar_y_offset = -30.0;
        let bar_start = pos + Vec2::new(-bar_half, bar_y_offset);
        let bar_end_full = pos + Vec2::new(bar_half, bar_y_offset);
        let bar_end_hp = bar_start + Vec2::new(bar_half * 2.0 * hp_frac, 0.0);
        gizmos.line_2d(bar_start, bar_end_full, Color::srgba(0.4, 0.0, 0.0, 0.8));
        if hp_frac > 0.0 {
            let fill_color = Color::srgb(1.0 - hp_frac, hp_frac, 0.0);
            gizmos.line_2d(bar_start, bar_end_hp, fill_color);
        }
    }

    // ── Projectiles ───────────────────────────────────────────────────────────
    for projectile in mission.projectiles() {
        let p = to_world(projectile.position, bounds);
        gizmos.circle_2d(p, config.projectile.radius, PROJECTILE_COLOR);
    }

    // ── Particles ─────────────────────────────────────────────────────────────
    for particle in mission.particles() {
        let p = to_world(particle.position, bounds);
        let color = Color::srgba(particle.r, particle.g, particle.b, particle.alpha());
        gizmos.circle_2d(p, 2.0, color);
    }
}
