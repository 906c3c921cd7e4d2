//! Keyboard → controls snapshot and session commands.
//!
//! | Key            | Effect                                                  |
//! |----------------|---------------------------------------------------------|
//! | A / ←, D / →   | turn (held)                                             |
//! | W / ↑          | thrust (held)                                           |
//! | Space          | toggle collection / combat mode                         |
//! | Esc            | pause / resume a contract                               |
//! | Enter          | dismiss briefing, next mission, or play again           |
//! | 1 – 4          | toggle scanner / yield / firepower / hull (between runs)|
//! | S              | sell the company (results screen)                       |
//! | Q              | quit the contract (while paused)                        |

use crate::economy::SubscriptionKind;
use crate::session::{GameSession, SessionPhase};
use crate::ship::Controls;
use bevy::prelude::*;

/// Controls for the next simulation step.
///
/// Held keys are re-sampled every frame; `toggle_mode` latches until the
/// session consumes it.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct PlayerControls(pub Controls);

pub fn keyboard_controls_system(keys: Res<ButtonInput<KeyCode>>, mut controls: ResMut<PlayerControls>) {
    let c = &mut controls.0;
    c.turn_left = keys.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]);
    c.turn_right = keys.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]);
    c.thrust = keys.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]);
    if keys.just_pressed(KeyCode::Space) {
        c.toggle_mode = true;
    }
}

/// Map one-shot keys to session commands for the current phase.
pub fn session_command_system(keys: Res<ButtonInput<KeyCode>>, mut session: ResMut<GameSession>) {
    if keys.just_pressed(KeyCode::Escape) {
        session.toggle_pause();
    }

    if keys.just_pressed(KeyCode::Enter) {
        match session.phase() {
            SessionPhase::TutorialBriefing => {
                session.dismiss_briefing();
            }
            SessionPhase::TutorialComplete | SessionPhase::MissionResults => {
                session.begin_mission();
            }
            SessionPhase::Bankrupt | SessionPhase::Acquired => {
                session.play_again();
            }
            _ => {}
        }
    }

    if session.phase().is_between_missions() {
        let bindings = [
            (KeyCode::Digit1, SubscriptionKind::Scanner),
            (KeyCode::Digit2, SubscriptionKind::Yield),
            (KeyCode::Digit3, SubscriptionKind::Firepower),
            (KeyCode::Digit4, SubscriptionKind::Hull),
        ];
        for (key, kind) in bindings {
            if keys.just_pressed(key) {
                session.toggle_subscription(kind);
            }
        }
    }

    if keys.just_pressed(KeyCode::KeyS) {
        session.sell_company();
    }

    if keys.just_pressed(KeyCode::KeyQ) && session.phase() == SessionPhase::Paused {
        session.quit_mission();
    }
}
