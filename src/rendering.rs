//! Bevy UI: the in-mission HUD and the centre overlay for every non-flying
//! phase.
//!
//! ## Layer Model
//!
//! | Layer           | Technology | Shown while                         |
//! |-----------------|------------|-------------------------------------|
//! | Asteroid fills  | `Mesh2d`   | a mission exists                    |
//! | Asteroid labels | `Text2d`   | a mission exists                    |
//! | Outlines, ship  | Gizmos     | a mission exists (ship: not briefing) |
//! | HUD             | Bevy UI    | a mission exists                    |
//! | Centre overlay  | Bevy UI    | briefing, results, pause, end screens |
//!
//! The text itself comes from [`hud_text`] and [`overlay_text`], which read
//! the session and nothing else.

use crate::economy::{SettlementOutcome, SettlementReport, SubscriptionKind};
use crate::session::{GameSession, SessionPhase};
use crate::ship::HealthBand;
use crate::simulation::{format_clock, MissionKind};
use bevy::prelude::*;

const HUD_FONT_SIZE: f32 = 18.0;
const OVERLAY_FONT_SIZE: f32 = 20.0;

/// Which HUD line a text entity shows.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudField {
    Stats,
    Hull,
}

#[derive(Component)]
pub struct HudRoot;

#[derive(Component)]
pub struct OverlayRoot;

#[derive(Component)]
pub struct OverlayText;

fn band_color(band: HealthBand) -> Color {
    match band {
        HealthBand::Healthy => Color::srgb(0.29, 0.87, 0.50),
        HealthBand::Warning => Color::srgb(0.98, 0.80, 0.08),
        HealthBand::Danger => Color::srgb(0.94, 0.27, 0.27),
    }
}

/// Signed cents, e.g. `-49¢`.
pub fn format_money(cents: i64) -> String {
    format!("{cents}¢")
}

// ── Startup ───────────────────────────────────────────────────────────────────

/// Spawn the top-left HUD (hidden until a mission exists).
pub fn setup_hud(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(10.0),
                top: Val::Px(10.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(4.0),
                ..default()
            },
            HudRoot,
            Visibility::Hidden,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: HUD_FONT_SIZE,
                    ..default()
                },
                TextColor(Color::srgb(0.95, 0.88, 0.45)),
                HudField::Stats,
            ));
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: HUD_FONT_SIZE,
                    ..default()
                },
                TextColor(band_color(HealthBand::Healthy)),
                HudField::Hull,
            ));
        });
}

/// Spawn the full-screen centred overlay panel (hidden while flying).
pub fn setup_overlay(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            OverlayRoot,
            Visibility::Hidden,
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    Node {
                        padding: UiRect::all(Val::Px(24.0)),
                        border: UiRect::all(Val::Px(2.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.05, 0.05, 0.10, 0.92)),
                    BorderColor::all(Color::srgb(0.28, 0.28, 0.38)),
                ))
                .with_children(|panel| {
                    panel.spawn((
                        Text::new(""),
                        TextFont {
                            font_size: OVERLAY_FONT_SIZE,
                            ..default()
                        },
                        TextColor(Color::srgb(0.85, 0.85, 0.88)),
                        OverlayText,
                    ));
                });
        });
}

// ── Update ────────────────────────────────────────────────────────────────────

/// Refresh the HUD lines and the hull colour.
pub fn hud_display_system(
    session: Res<GameSession>,
    mut root: Query<&mut Visibility, With<HudRoot>>,
    mut fields: Query<(&HudField, &mut Text, &mut TextColor)>,
) {
    let lines = hud_text(&session);
    if let Ok(mut vis) = root.single_mut() {
        *vis = if lines.is_some() {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }
    let Some((stats, hull, band)) = lines else {
        return;
    };
    for (field, mut text, mut color) in fields.iter_mut() {
        match field {
            HudField::Stats => *text = Text::new(stats.clone()),
            HudField::Hull => {
                *text = Text::new(hull.clone());
                *color = TextColor(band_color(band));
            }
        }
    }
}

/// Show the overlay for the current phase, or hide it while flying.
pub fn overlay_display_system(
    session: Res<GameSession>,
    mut root: Query<&mut Visibility, With<OverlayRoot>>,
    mut body: Query<&mut Text, With<OverlayText>>,
) {
    if !session.is_changed() {
        return;
    }
    let content = overlay_text(&session);
    if let Ok(mut vis) = root.single_mut() {
        *vis = if content.is_some() {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }
    if let (Some(content), Ok(mut text)) = (content, body.single_mut()) {
        *text = Text::new(content);
    }
}

// ── Text builders ─────────────────────────────────────────────────────────────

/// `(stats line, hull line, hull band)` while a mission exists.
pub fn hud_text(session: &GameSession) -> Option<(String, String, HealthBand)> {
    let mission = session.mission()?;
    let config = session.config();
    let ship = mission.ship();

    let mut stats = format!(
        "Wallet: {}   Score: {}",
        format_money(session.ledger().wallet()),
        mission.score()
    );
    match mission.kind() {
        MissionKind::Contract => {
            if let Some(left) = mission.time_left() {
                stats.push_str(&format!("   Time: {}", format_clock(left)));
            }
            stats.push_str(&format!("   Asteroids left: {}", mission.asteroids_remaining()));
        }
        MissionKind::Tutorial => stats.push_str("   Tutorial"),
    }
    stats.push_str(if ship.combat_mode {
        "   Mode: COMBAT"
    } else {
        "   Mode: COLLECTION"
    });
    if let Some(streak) = mission.streak().shown(config.streaks.small_threshold) {
        stats.push_str(&format!("   Streak: x{streak}"));
    }

    let hull = format!("Hull: {:.0}/{:.0}", ship.health().max(0.0), ship.max_health());
    Some((stats, hull, ship.health_band()))
}

/// Centre-overlay text for the current phase; `None` while flying.
pub fn overlay_text(session: &GameSession) -> Option<String> {
    match session.phase() {
        SessionPhase::NotStarted | SessionPhase::TutorialActive | SessionPhase::MissionActive => {
            None
        }
        SessionPhase::TutorialBriefing => Some(briefing_text()),
        SessionPhase::TutorialComplete => Some(format!(
            "TRAINING COMPLETE\n\nYou are now a licensed prime miner.\n\n{}\n\nEnter: accept first contract",
            subscription_menu(session)
        )),
        SessionPhase::Paused => Some(pause_text(session)),
        SessionPhase::MissionResults => Some(results_text(session)),
        SessionPhase::Bankrupt => {
            let report = session.final_report()?;
            let mut out = String::from("BANKRUPT\n\n");
            if let Some(settled) = session.last_report() {
                out.push_str(&settlement_lines(settled));
                out.push_str("\n\n");
            }
            out.push_str(&format!("Final score: {}\n", format_money(report.value)));
            out.push_str(&stats_lines(session));
            out.push_str("\n\nEnter: start a new company");
            Some(out)
        }
        SessionPhase::Acquired => {
            let report = session.final_report()?;
            Some(format!(
                "ACQUIRED\n\nYour company sold for {}\n{}\n\nEnter: start a new company",
                format_money(report.value),
                stats_lines(session)
            ))
        }
    }
}

fn briefing_text() -> String {
    [
        "FACTOR MINER: TRAINING",
        "",
        "Collect PRIME asteroids (blue) in collection mode.",
        "Shoot COMPOSITE asteroids (red) in combat mode to split them into primes.",
        "",
        "A/D or arrows: turn    W or up: thrust    Space: switch mode",
        "Every thrust, turn and shot costs money.",
        "",
        "Enter: begin",
    ]
    .join("\n")
}

fn pause_text(session: &GameSession) -> String {
    let ledger = session.ledger();
    format!(
        "PAUSED\n\nMissions played: {}\nWallet: {}\nAcquisition value: {}\n\nEsc: resume\nQ: abandon contract (it will still be settled)",
        ledger.history().len(),
        format_money(ledger.wallet()),
        format_money(ledger.acquisition_value())
    )
}

fn results_text(session: &GameSession) -> String {
    let mut out = String::from("MISSION COMPLETE");
    if let Some(reason) = session.last_end_reason() {
        out.push_str(&format!(" ({})", reason.describe()));
    }
    out.push_str("\n\n");
    if let Some(report) = session.last_report() {
        out.push_str(&settlement_lines(report));
        out.push_str("\n\n");
    }
    out.push_str(&subscription_menu(session));
    out.push_str("\n\nEnter: next contract");
    if let Some(SettlementOutcome::Solvent {
        acquisition_offer: Some(offer),
    }) = session.last_outcome()
    {
        out.push_str(&format!("    S: sell company for {}", format_money(offer)));
    }
    out
}

fn settlement_lines(report: &SettlementReport) -> String {
    let rows = [
        ("Primes collected", report.base_earnings),
        ("Streak bonus", report.streak_bonus),
        ("Yield bonus", report.yield_bonus),
        ("Total earnings", report.total_earnings),
        ("Space tax", -report.space_tax),
        ("Subscriptions", -report.subscriptions),
        ("Action costs", -report.action_costs),
        ("Maintenance", -report.maintenance),
        ("Tow fee", -report.tow_fee),
        ("Total costs", -report.total_costs),
        ("Net profit", report.net_profit),
        ("Wallet", report.wallet_after),
    ];
    rows.iter()
        .filter(|(label, value)| *value != 0 || matches!(*label, "Net profit" | "Wallet"))
        .map(|(label, value)| format!("{label:<18}{:>10}", format_money(*value)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn subscription_menu(session: &GameSession) -> String {
    let ledger = session.ledger();
    let mut out = String::from("Subscriptions for next contract:");
    for (i, kind) in SubscriptionKind::ALL.iter().enumerate() {
        let sub = ledger.subscription(*kind);
        out.push_str(&format!(
            "\n  {}: [{}] {:<20}{:>6}",
            i + 1,
            if sub.active { "x" } else { " " },
            kind.label(),
            format_money(ledger.inflated_cost(sub.cost))
        ));
    }
    out
}

fn stats_lines(session: &GameSession) -> String {
    let Some(report) = session.final_report() else {
        return String::new();
    };
    let stats = report.stats;
    format!(
        "Missions: {}\nPrimes collected: {}\nAverage income: {}\nBest streak: {}",
        stats.missions_played,
        stats.total_primes_collected,
        format_money(stats.average_income),
        stats.best_streak
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::simulation::SoundCue;

    fn session() -> GameSession {
        let mut session = GameSession::with_seed(GameConfig::default(), 11);
        session.start();
        session
    }

    #[test]
    fn briefing_overlay_hides_once_flying() {
        let mut session = session();
        assert!(overlay_text(&session).is_some_and(|t| t.contains("TRAINING")));
        session.dismiss_briefing();
        assert!(overlay_text(&session).is_none());
    }

    #[test]
    fn hud_shows_tutorial_without_clock() {
        let session = session();
        let (stats, hull, band) = hud_text(&session).unwrap();
        assert!(stats.contains("Tutorial"));
        assert!(!stats.contains("Time:"));
        assert!(stats.contains("Wallet: 1000¢"));
        assert_eq!(hull, "Hull: 100/100");
        assert_eq!(band, HealthBand::Healthy);
    }

    #[test]
    fn results_list_inflated_subscription_costs() {
        let mut session = session();
        session.dismiss_briefing();
        let mut sounds: Vec<SoundCue> = Vec::new();
        if let Some(mission) = session.mission_mut() {
            mission.set_asteroids(Vec::new());
        }
        session.advance(0.016, &Default::default(), &mut sounds);
        assert_eq!(session.phase(), SessionPhase::TutorialComplete);
        session.begin_mission();
        let (stats, _, _) = hud_text(&session).unwrap();
        assert!(stats.contains("Time: 2:00"));
        session.quit_mission();

        let text = overlay_text(&session).unwrap();
        assert!(text.starts_with("MISSION COMPLETE (quit)"));
        // Inflation compounded once: 30 × 1.05 = 31.5 → 32.
        assert!(text.contains("Auto-Scanner"));
        assert!(text.contains("32¢"));
        assert!(text.contains("Space tax"));
    }

    #[test]
    fn pause_shows_company_figures() {
        let mut session = session();
        session.dismiss_briefing();
        let mut sounds: Vec<SoundCue> = Vec::new();
        if let Some(mission) = session.mission_mut() {
            mission.set_asteroids(Vec::new());
        }
        session.advance(0.016, &Default::default(), &mut sounds);
        session.begin_mission();
        assert!(session.toggle_pause());

        let text = overlay_text(&session).unwrap();
        assert!(text.starts_with("PAUSED"));
        assert!(text.contains("Missions played: 0"));
        assert!(text.contains("Wallet: 1000¢"));
        // Fewer than four missions: nothing to sell yet.
        assert!(text.contains("Acquisition value: 0¢"));
        assert!(text.contains("Esc: resume"));
    }

    #[test]
    fn money_keeps_sign() {
        assert_eq!(format_money(-49), "-49¢");
        assert_eq!(format_money(0), "0¢");
    }
}
