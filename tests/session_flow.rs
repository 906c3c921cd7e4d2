//! End-to-end tests for [`GameSession`]: a whole company lifetime driven
//! through the public command API, plus a headless Bevy app running the
//! session systems.
//!
//! Covered scenarios:
//! 1. Tutorial → first contract → quit settles exactly once.
//! 2. Quitting contracts until the wallet goes negative ends in `Bankrupt`,
//!    and `play_again` restores a brand-new company.
//! 3. After four settled contracts the company can be sold.
//! 4. Subscriptions only change between missions and apply to the next one.
//! 5. The frame systems tick the mission, consume the mode toggle and
//!    forward sound cues as messages.

use bevy::prelude::*;
use factor_miner::audio::SoundCuePlugin;
use factor_miner::config::GameConfig;
use factor_miner::economy::{SettlementOutcome, SubscriptionKind};
use factor_miner::input::PlayerControls;
use factor_miner::session::{advance_session_system, init_session_system, GameSession, SessionPhase};
use factor_miner::ship::Controls;
use factor_miner::simulation::{MissionEndReason, MissionKind, SoundCue};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn idle() -> Controls {
    Controls::default()
}

/// Session sitting on the "training complete" screen.
fn past_tutorial(seed: u64) -> GameSession {
    let mut session = GameSession::with_seed(GameConfig::default(), seed);
    assert!(session.start());
    assert!(session.dismiss_briefing());
    if let Some(mission) = session.mission_mut() {
        mission.set_asteroids(Vec::new());
    }
    let mut sounds: Vec<SoundCue> = Vec::new();
    session.advance(0.016, &idle(), &mut sounds);
    assert_eq!(session.phase(), SessionPhase::TutorialComplete);
    session
}

fn quit_one_contract(session: &mut GameSession) {
    assert!(session.begin_mission());
    assert!(session.quit_mission());
}

#[derive(Resource, Default)]
struct CueCount(usize);

fn count_cues(mut reader: MessageReader<SoundCue>, mut count: ResMut<CueCount>) {
    count.0 += reader.read().count();
}

/// Headless app with the session systems and no window or renderer.
fn headless_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, SoundCuePlugin))
        .insert_resource(GameConfig::default())
        .insert_resource(PlayerControls::default())
        .init_resource::<CueCount>()
        .add_systems(Startup, init_session_system)
        .add_systems(Update, (advance_session_system, count_cues).chain());
    app
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn tutorial_then_contract_settles_once() {
    let mut session = past_tutorial(1);
    // The tutorial is never billed.
    assert_eq!(session.ledger().wallet(), 1000);
    assert!(session.ledger().history().is_empty());
    assert_eq!(session.mission_serial(), 1);

    assert!(session.begin_mission());
    assert_eq!(session.mission_serial(), 2);
    assert_eq!(session.mission().map(|m| m.kind()), Some(MissionKind::Contract));
    assert!(session.quit_mission());
    assert_eq!(session.phase(), SessionPhase::MissionResults);
    assert_eq!(session.last_end_reason(), Some(MissionEndReason::Quit));

    // tax 50 + scanner 30 + maintenance 10, no movement, no tow.
    let report = session.last_report().copied().unwrap();
    assert_eq!(report.total_costs, 90);
    assert_eq!(report.net_profit, -90);
    assert_eq!(session.ledger().wallet(), 910);

    // Further frames on the results screen never settle again.
    let mut sounds: Vec<SoundCue> = Vec::new();
    for _ in 0..10 {
        session.advance(0.016, &idle(), &mut sounds);
    }
    assert_eq!(session.ledger().history().len(), 1);
    assert!(!session.quit_mission());
}

#[test]
fn losing_streak_ends_in_bankruptcy_and_restart() {
    let mut session = past_tutorial(2);
    for _ in 0..50 {
        if session.phase() == SessionPhase::Bankrupt {
            break;
        }
        quit_one_contract(&mut session);
    }
    assert_eq!(session.phase(), SessionPhase::Bankrupt);
    assert!(session.ledger().wallet() < 0);

    let report = session.final_report().copied().unwrap();
    assert_eq!(
        report.value,
        session.ledger().wallet() + session.ledger().acquisition_value()
    );
    assert!(matches!(
        session.last_outcome(),
        Some(SettlementOutcome::Bankrupt { .. })
    ));
    assert!(!session.begin_mission());

    assert!(session.play_again());
    assert_eq!(session.phase(), SessionPhase::TutorialBriefing);
    assert_eq!(session.ledger().wallet(), 1000);
    assert!(session.ledger().history().is_empty());
    assert_eq!(session.ledger().inflation_multiplier(), 1.0);
    assert!(session.final_report().is_none());
}

#[test]
fn company_can_be_sold_after_four_contracts() {
    let mut session = past_tutorial(3);
    for _ in 0..3 {
        quit_one_contract(&mut session);
        assert!(!session.sell_company());
    }
    quit_one_contract(&mut session);
    let offer = match session.last_outcome() {
        Some(SettlementOutcome::Solvent {
            acquisition_offer: Some(offer),
        }) => offer,
        other => panic!("expected an acquisition offer, got {other:?}"),
    };
    assert_eq!(offer, session.ledger().acquisition_value());

    assert!(session.sell_company());
    assert_eq!(session.phase(), SessionPhase::Acquired);
    let report = session.final_report().copied().unwrap();
    assert_eq!(report.value, offer);
    assert_eq!(report.stats.missions_played, 4);
}

#[test]
fn subscriptions_change_only_between_missions() {
    let mut session = past_tutorial(4);
    assert!(session.toggle_subscription(SubscriptionKind::Hull));
    assert!(session.toggle_subscription(SubscriptionKind::Scanner));

    assert!(session.begin_mission());
    assert!(!session.toggle_subscription(SubscriptionKind::Yield));
    let mission = session.mission().unwrap();
    assert!(mission.loadout().hull);
    assert!(!mission.loadout().scanner);
    assert_eq!(mission.ship().max_health(), 150.0);

    assert!(session.quit_mission());
    // Hull 35 replaces scanner 30 on the bill.
    assert_eq!(session.last_report().unwrap().subscriptions, 35);
    assert!(session.toggle_subscription(SubscriptionKind::Yield));
    assert!(session.ledger().is_active(SubscriptionKind::Yield));
}

#[test]
fn frame_systems_drive_the_mission() {
    let mut app = headless_app();
    app.update();
    assert_eq!(
        app.world().resource::<GameSession>().phase(),
        SessionPhase::TutorialBriefing
    );

    app.world_mut().resource_mut::<GameSession>().dismiss_briefing();
    app.world_mut().resource_mut::<PlayerControls>().0.toggle_mode = true;
    app.update();

    let session = app.world().resource::<GameSession>();
    let ship = session.mission().unwrap().ship();
    assert!(ship.combat_mode);
    // The toggle is consumed, not re-applied every frame.
    assert!(!app.world().resource::<PlayerControls>().0.toggle_mode);

    app.update();
    assert!(app.world().resource::<GameSession>().mission().unwrap().ship().combat_mode);
    // Combat mode fires on the first tick.
    assert!(app.world().resource::<CueCount>().0 >= 1);
}
