//! Top-level game flow: tutorial, contracts, settlement, and the end screens.
//!
//! [`GameSession`] is the single owner of the ledger and the current mission.
//! Presentation code drives it through commands and reads it back through
//! accessors; it never touches mission or ledger internals directly.
//!
//! ## Phases
//!
//! ```text
//! NotStarted ─start→ TutorialBriefing ─dismiss→ TutorialActive ─(end)→ TutorialComplete
//!                                                                        │ begin_mission
//!                      ┌──────────────── begin_mission ────────────────┐ ▼
//!                MissionResults ←─(end / quit)─ MissionActive ⇄ Paused
//!                  │ sell_company      └─(end, wallet < 0)→ Bankrupt
//!                  ▼
//!               Acquired ─play_again→ TutorialBriefing ←play_again─ Bankrupt
//! ```
//!
//! Commands issued in the wrong phase return `false` and change nothing.

use crate::audio::CueBuffer;
use crate::config::GameConfig;
use crate::economy::{CompanyStats, EconomyLedger, SettlementOutcome, SettlementReport, SubscriptionKind};
use crate::input::PlayerControls;
use crate::ship::Controls;
use crate::simulation::{Mission, MissionEndReason, PlayBounds, SoundCue, SoundSink, TickOutcome};
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    NotStarted,
    /// Tutorial field laid out, instructions on screen, clock stopped.
    TutorialBriefing,
    TutorialActive,
    TutorialComplete,
    MissionActive,
    Paused,
    MissionResults,
    Bankrupt,
    Acquired,
}

impl SessionPhase {
    /// Phases in which the mission clock runs.
    #[inline]
    pub fn is_ticking(self) -> bool {
        matches!(self, SessionPhase::TutorialActive | SessionPhase::MissionActive)
    }

    /// Phases in which subscriptions may be changed.
    #[inline]
    pub fn is_between_missions(self) -> bool {
        matches!(self, SessionPhase::TutorialComplete | SessionPhase::MissionResults)
    }
}

/// Headline figure and lifetime stats for the Bankrupt / Acquired screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalReport {
    /// Sale price when acquired; wallet plus acquisition value when bankrupt.
    pub value: i64,
    pub stats: CompanyStats,
}

/// Orchestrates one playthrough.
#[derive(Resource, Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    ledger: EconomyLedger,
    phase: SessionPhase,
    mission: Option<Mission>,
    /// Bumped for every mission laid out; render identity is `(serial, id)`.
    mission_serial: u64,
    bounds: PlayBounds,
    rng: StdRng,
    last_end_reason: Option<MissionEndReason>,
    last_report: Option<SettlementReport>,
    last_outcome: Option<SettlementOutcome>,
    final_report: Option<FinalReport>,
}

impl GameSession {
    /// New session seeded from OS entropy.
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// New session with a fixed seed (reproducible runs and tests).
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Self {
        let bounds = PlayBounds::new(config.session.default_width, config.session.default_height);
        Self {
            ledger: EconomyLedger::new(&config),
            config,
            phase: SessionPhase::NotStarted,
            mission: None,
            mission_serial: 0,
            bounds,
            rng,
            last_end_reason: None,
            last_report: None,
            last_outcome: None,
            final_report: None,
        }
    }

    fn mission_rng(&mut self) -> StdRng {
        self.mission_serial += 1;
        StdRng::seed_from_u64(self.rng.gen())
    }

    fn enter_tutorial(&mut self) {
        let rng = self.mission_rng();
        self.mission = Some(Mission::tutorial(
            self.bounds,
            self.ledger.loadout(),
            &self.config,
            rng,
        ));
        self.last_end_reason = None;
        self.phase = SessionPhase::TutorialBriefing;
    }

    // ── Commands ──────────────────────────────────────────────────────────────

    /// Lay out the tutorial and show its briefing.
    pub fn start(&mut self) -> bool {
        if self.phase != SessionPhase::NotStarted {
            return false;
        }
        self.enter_tutorial();
        true
    }

    pub fn dismiss_briefing(&mut self) -> bool {
        if self.phase != SessionPhase::TutorialBriefing {
            return false;
        }
        self.phase = SessionPhase::TutorialActive;
        true
    }

    /// Start a paid contract with the current subscriptions.
    pub fn begin_mission(&mut self) -> bool {
        if !self.phase.is_between_missions() {
            return false;
        }
        let rng = self.mission_rng();
        self.mission = Some(Mission::contract(
            self.bounds,
            self.ledger.loadout(),
            &self.config,
            rng,
        ));
        self.last_end_reason = None;
        self.last_report = None;
        self.last_outcome = None;
        self.phase = SessionPhase::MissionActive;
        true
    }

    /// Pause or resume a contract.  The tutorial cannot be paused.
    pub fn toggle_pause(&mut self) -> bool {
        self.phase = match self.phase {
            SessionPhase::MissionActive => SessionPhase::Paused,
            SessionPhase::Paused => SessionPhase::MissionActive,
            _ => return false,
        };
        true
    }

    /// Abandon the running contract.  It is settled like any other ending.
    pub fn quit_mission(&mut self) -> bool {
        if !matches!(self.phase, SessionPhase::MissionActive | SessionPhase::Paused) {
            return false;
        }
        let Some(mission) = self.mission.as_mut() else {
            return false;
        };
        mission.end(MissionEndReason::Quit);
        self.finish_mission(MissionEndReason::Quit);
        true
    }

    pub fn set_subscription(&mut self, kind: SubscriptionKind, active: bool) -> bool {
        if !self.phase.is_between_missions() {
            return false;
        }
        self.ledger.set_subscription(kind, active);
        true
    }

    pub fn toggle_subscription(&mut self, kind: SubscriptionKind) -> bool {
        let active = !self.ledger.is_active(kind);
        self.set_subscription(kind, active)
    }

    /// Sell the company once the acquisition offer is on the table.
    pub fn sell_company(&mut self) -> bool {
        if self.phase != SessionPhase::MissionResults || !self.ledger.can_sell() {
            return false;
        }
        let report = FinalReport {
            value: self.ledger.acquisition_value(),
            stats: self.ledger.company_stats(),
        };
        info!("Company acquired for {}¢", report.value);
        self.final_report = Some(report);
        self.phase = SessionPhase::Acquired;
        true
    }

    /// Start over as a brand-new company.
    pub fn play_again(&mut self) -> bool {
        if !matches!(self.phase, SessionPhase::Bankrupt | SessionPhase::Acquired) {
            return false;
        }
        self.ledger.reset();
        self.last_report = None;
        self.last_outcome = None;
        self.final_report = None;
        self.enter_tutorial();
        true
    }

    /// Feed one frame of wall-clock time.  The delta is clamped so a stalled
    /// frame cannot make the simulation leap.
    pub fn advance<S: SoundSink + ?Sized>(
        &mut self,
        elapsed_secs: f32,
        controls: &Controls,
        sounds: &mut S,
    ) {
        if !self.phase.is_ticking() {
            return;
        }
        let dt = elapsed_secs.clamp(0.0, self.config.session.max_frame_dt);
        let Some(mission) = self.mission.as_mut() else {
            return;
        };
        if let TickOutcome::Ended(reason) = mission.tick(controls, dt, &self.config, sounds) {
            self.finish_mission(reason);
        }
    }

    /// Follow the window size.
    pub fn set_bounds(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        self.bounds = PlayBounds::new(width, height);
        if let Some(mission) = self.mission.as_mut() {
            mission.set_bounds(self.bounds);
        }
    }

    fn finish_mission(&mut self, reason: MissionEndReason) {
        self.last_end_reason = Some(reason);
        let Some(mission) = self.mission.as_ref() else {
            return;
        };

        if self.phase == SessionPhase::TutorialActive {
            info!("Tutorial complete ({})", reason.describe());
            self.phase = SessionPhase::TutorialComplete;
            return;
        }

        let summary = mission.summary();
        let (report, outcome) = self.ledger.settle(&summary);
        self.last_report = Some(report);
        self.last_outcome = Some(outcome);
        self.phase = match outcome {
            SettlementOutcome::Bankrupt { final_score } => {
                self.final_report = Some(FinalReport {
                    value: final_score,
                    stats: self.ledger.company_stats(),
                });
                SessionPhase::Bankrupt
            }
            SettlementOutcome::Solvent { .. } => SessionPhase::MissionResults,
        };
    }

    // ── Read-only access ──────────────────────────────────────────────────────

    #[inline]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn ledger(&self) -> &EconomyLedger {
        &self.ledger
    }

    pub fn mission(&self) -> Option<&Mission> {
        self.mission.as_ref()
    }

    /// Reach into the running mission without going through the phase
    /// machine.  Not part of the game's control surface.
    #[doc(hidden)]
    pub fn mission_mut(&mut self) -> Option<&mut Mission> {
        self.mission.as_mut()
    }

    #[inline]
    pub fn mission_serial(&self) -> u64 {
        self.mission_serial
    }

    #[inline]
    pub fn bounds(&self) -> PlayBounds {
        self.bounds
    }

    /// `false` while the tutorial briefing is up.
    pub fn ship_visible(&self) -> bool {
        self.mission.is_some() && self.phase != SessionPhase::TutorialBriefing
    }

    pub fn last_end_reason(&self) -> Option<MissionEndReason> {
        self.last_end_reason
    }

    pub fn last_report(&self) -> Option<&SettlementReport> {
        self.last_report.as_ref()
    }

    pub fn last_outcome(&self) -> Option<SettlementOutcome> {
        self.last_outcome
    }

    pub fn final_report(&self) -> Option<&FinalReport> {
        self.final_report.as_ref()
    }
}

// ── Bevy systems ──────────────────────────────────────────────────────────────

/// Create the session from the loaded config and lay out the tutorial.
pub fn init_session_system(mut commands: Commands, config: Res<GameConfig>) {
    let mut session = GameSession::new(config.clone());
    session.start();
    info!("Session started in {:?}", session.phase());
    commands.insert_resource(session);
}

/// Step the running mission by this frame's delta and forward its sound cues.
pub fn advance_session_system(
    time: Res<Time>,
    mut session: ResMut<GameSession>,
    mut controls: ResMut<PlayerControls>,
    mut writer: MessageWriter<SoundCue>,
    mut cues: Local<CueBuffer>,
) {
    session.advance(time.delta_secs(), &controls.0, &mut *cues);
    controls.0.toggle_mode = false;
    cues.flush(&mut writer);
}
