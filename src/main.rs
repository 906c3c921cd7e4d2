use bevy::prelude::*;
use bevy::window::WindowResolution;
use factor_miner::{
    asteroid_rendering, audio, config, graphics, input, rendering, session, ship,
};

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Factor Miner".into(),
                resolution: WindowResolution::new(1200, 680),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .insert_resource(ClearColor(Color::BLACK))
        // Compiled defaults; load_game_config overwrites them from
        // assets/game.toml (if present) before the session is created.
        .insert_resource(config::GameConfig::default())
        .insert_resource(input::PlayerControls::default())
        .add_plugins(audio::SoundCuePlugin)
        .add_systems(
            Startup,
            (
                config::load_game_config,
                session::init_session_system,
                graphics::setup_camera,
                rendering::setup_hud,
                rendering::setup_overlay,
            )
                .chain(),
        )
        .add_systems(
            Update,
            (
                input::keyboard_controls_system,
                input::session_command_system,
                graphics::sync_play_bounds_system,
                session::advance_session_system,
                (
                    asteroid_rendering::sync_asteroid_visuals_system,
                    asteroid_rendering::asteroid_outline_gizmo_system,
                    ship::ship_gizmo_system,
                    rendering::hud_display_system,
                    rendering::overlay_display_system,
                ),
            )
                .chain(),
        )
        .run();
}
