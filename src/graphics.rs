//! Camera, window-size tracking, and the simulation → world transform.
//!
//! The simulation works in screen pixels (origin top-left, y down).  Bevy's
//! 2D camera looks at the world origin with y up, so every draw call maps its
//! positions through [`to_world`] and its headings through [`to_world_angle`].

use crate::session::GameSession;
use crate::simulation::PlayBounds;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

/// Setup camera for 2D rendering.
pub fn setup_camera(mut commands: Commands) {
    // Default scale shows exactly one world unit per window pixel.
    commands.spawn(Camera2d);
    info!("Camera spawned");
}

/// Keep the session's play area equal to the primary window.
pub fn sync_play_bounds_system(
    q_window: Query<&Window, With<PrimaryWindow>>,
    mut session: ResMut<GameSession>,
) {
    let Ok(window) = q_window.single() else {
        return;
    };
    let (width, height) = (window.width(), window.height());
    let current = session.bounds();
    if current.width != width || current.height != height {
        session.set_bounds(width, height);
    }
}

/// Screen-space point → world-space point.
#[inline]
pub fn to_world(p: Vec2, bounds: PlayBounds) -> Vec2 {
    Vec2::new(p.x - bounds.width / 2.0, bounds.height / 2.0 - p.y)
}

/// Screen-space heading (clockwise, y down) → world-space heading.
#[inline]
pub fn to_world_angle(rotation: f32) -> f32 {
    -rotation
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_map_to_world_extents() {
        let bounds = PlayBounds::new(1200.0, 680.0);
        assert_eq!(to_world(Vec2::ZERO, bounds), Vec2::new(-600.0, 340.0));
        assert_eq!(to_world(Vec2::new(1200.0, 680.0), bounds), Vec2::new(600.0, -340.0));
        assert_eq!(to_world(bounds.center(), bounds), Vec2::ZERO);
    }

    #[test]
    fn heading_flips_with_y_axis() {
        // Screen heading pointing "down" (+y) must point down in world space (-y).
        let screen = Vec2::from_angle(std::f32::consts::FRAC_PI_2);
        let world = Vec2::from_angle(to_world_angle(std::f32::consts::FRAC_PI_2));
        assert!((world - Vec2::new(screen.x, -screen.y)).length() < 1e-6);
    }
}
