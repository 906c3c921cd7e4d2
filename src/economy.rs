//! Company finances that persist across missions.
//!
//! ## Settlement
//!
//! Once per finished contract, [`EconomyLedger::settle`] turns a
//! [`MissionSummary`] into a [`SettlementReport`]:
//!
//! ```text
//! earnings = score + streak bonus + yield bonus        (bonuses floor-rounded)
//! costs    = tax + subscriptions + actions + maintenance + tow fee
//! net      = earnings − costs                          → wallet, history
//! ```
//!
//! Every cost line is scaled by the inflation multiplier and ceil-rounded on
//! its own, never on the aggregate.  Subscriptions are rounded one by one.
//! The multiplier then compounds by `inflation_rate`, whether or not the
//! mission went well.
//!
//! A negative wallet after settlement is bankruptcy.  Otherwise, once enough
//! missions are on record, the company can be sold for its acquisition value.

use crate::config::{EconomyConfig, GameConfig, StreakConfig};
use crate::simulation::MissionSummary;
use bevy::log::info;

// ── Subscriptions ─────────────────────────────────────────────────────────────

/// The four optional per-mission services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubscriptionKind {
    /// Colours asteroids by primality.
    Scanner,
    /// Boosts earnings.
    Yield,
    /// One-shot composite breaking.
    Firepower,
    /// Extra hull points.
    Hull,
}

impl SubscriptionKind {
    pub const ALL: [SubscriptionKind; 4] = [
        SubscriptionKind::Scanner,
        SubscriptionKind::Yield,
        SubscriptionKind::Firepower,
        SubscriptionKind::Hull,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SubscriptionKind::Scanner => "Auto-Scanner",
            SubscriptionKind::Yield => "Yield Booster",
            SubscriptionKind::Firepower => "Firepower Upgrade",
            SubscriptionKind::Hull => "Hull Reinforcement",
        }
    }

    fn index(self) -> usize {
        match self {
            SubscriptionKind::Scanner => 0,
            SubscriptionKind::Yield => 1,
            SubscriptionKind::Firepower => 2,
            SubscriptionKind::Hull => 3,
        }
    }
}

/// What a subscription does while active.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SubscriptionEffect {
    AutoScan,
    YieldBonus { rate: f64 },
    Firepower,
    HullReinforcement { health_multiplier: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Subscription {
    pub kind: SubscriptionKind,
    /// Base price per mission (¢), before inflation.
    pub cost: f64,
    pub active: bool,
    pub effect: SubscriptionEffect,
}

/// Subscription flags frozen for the duration of one mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Loadout {
    pub scanner: bool,
    pub yield_booster: bool,
    pub firepower: bool,
    pub hull: bool,
}

impl Default for Loadout {
    /// A new company starts with the scanner on and nothing else.
    fn default() -> Self {
        Self {
            scanner: true,
            yield_booster: false,
            firepower: false,
            hull: false,
        }
    }
}

fn default_subscriptions(config: &GameConfig) -> [Subscription; 4] {
    let e = &config.economy;
    [
        Subscription {
            kind: SubscriptionKind::Scanner,
            cost: e.scanner_cost,
            active: true,
            effect: SubscriptionEffect::AutoScan,
        },
        Subscription {
            kind: SubscriptionKind::Yield,
            cost: e.yield_cost,
            active: false,
            effect: SubscriptionEffect::YieldBonus { rate: e.yield_bonus },
        },
        Subscription {
            kind: SubscriptionKind::Firepower,
            cost: e.firepower_cost,
            active: false,
            effect: SubscriptionEffect::Firepower,
        },
        Subscription {
            kind: SubscriptionKind::Hull,
            cost: e.hull_cost,
            active: false,
            effect: SubscriptionEffect::HullReinforcement {
                health_multiplier: config.ship.hull_upgrade_multiplier,
            },
        },
    ]
}

// ── Settlement results ────────────────────────────────────────────────────────

/// Line-by-line breakdown of one settled mission (¢).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SettlementReport {
    pub base_earnings: i64,
    pub streak_bonus: i64,
    pub yield_bonus: i64,
    pub total_earnings: i64,
    pub space_tax: i64,
    pub subscriptions: i64,
    pub action_costs: i64,
    pub maintenance: i64,
    pub tow_fee: i64,
    pub total_costs: i64,
    pub net_profit: i64,
    pub wallet_after: i64,
}

/// Where the company stands after a settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettlementOutcome {
    /// Wallet went negative: the run is over.
    Bankrupt { final_score: i64 },
    /// Still trading.  `acquisition_offer` is set once the company can be sold.
    Solvent { acquisition_offer: Option<i64> },
}

/// Lifetime figures shown on the end screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompanyStats {
    pub missions_played: usize,
    /// Sum of every collected prime's value across all missions.
    pub total_primes_collected: u64,
    /// `ceil(mean(net profits))`, 0 with no history.
    pub average_income: i64,
    pub best_streak: u32,
}

// ── Ledger ────────────────────────────────────────────────────────────────────

/// Wallet, subscriptions, inflation and mission history.
#[derive(Debug, Clone)]
pub struct EconomyLedger {
    wallet: i64,
    subscriptions: [Subscription; 4],
    inflation_multiplier: f64,
    history: Vec<i64>,
    total_primes_collected: u64,
    best_streak: u32,
    economy: EconomyConfig,
    streaks: StreakConfig,
    defaults: [Subscription; 4],
}

impl EconomyLedger {
    pub fn new(config: &GameConfig) -> Self {
        let subscriptions = default_subscriptions(config);
        Self {
            wallet: config.economy.starting_wallet,
            subscriptions,
            inflation_multiplier: 1.0,
            history: Vec::new(),
            total_primes_collected: 0,
            best_streak: 0,
            economy: config.economy.clone(),
            streaks: config.streaks.clone(),
            defaults: subscriptions,
        }
    }

    #[inline]
    pub fn wallet(&self) -> i64 {
        self.wallet
    }

    #[inline]
    pub fn inflation_multiplier(&self) -> f64 {
        self.inflation_multiplier
    }

    /// Net profit of every settled mission, oldest first.
    #[inline]
    pub fn history(&self) -> &[i64] {
        &self.history
    }

    pub fn subscriptions(&self) -> &[Subscription; 4] {
        &self.subscriptions
    }

    pub fn subscription(&self, kind: SubscriptionKind) -> &Subscription {
        &self.subscriptions[kind.index()]
    }

    pub fn set_subscription(&mut self, kind: SubscriptionKind, active: bool) {
        self.subscriptions[kind.index()].active = active;
    }

    pub fn is_active(&self, kind: SubscriptionKind) -> bool {
        self.subscription(kind).active
    }

    /// Current subscription flags, for the next mission.
    pub fn loadout(&self) -> Loadout {
        Loadout {
            scanner: self.is_active(SubscriptionKind::Scanner),
            yield_booster: self.is_active(SubscriptionKind::Yield),
            firepower: self.is_active(SubscriptionKind::Firepower),
            hull: self.is_active(SubscriptionKind::Hull),
        }
    }

    /// `ceil(base · inflation)`.
    #[inline]
    pub fn inflated_cost(&self, base: f64) -> i64 {
        (base * self.inflation_multiplier).ceil() as i64
    }

    /// Sale price of the company: `ceil(mean(last window) × multiplier)`, or 0
    /// until enough missions are on record.
    pub fn acquisition_value(&self) -> i64 {
        if self.history.len() < self.economy.acquisition_min_missions {
            return 0;
        }
        let window = self.economy.acquisition_window.min(self.history.len()).max(1);
        let recent = &self.history[self.history.len() - window..];
        let mean = recent.iter().sum::<i64>() as f64 / window as f64;
        (mean * self.economy.acquisition_multiplier).ceil() as i64
    }

    #[inline]
    pub fn can_sell(&self) -> bool {
        self.history.len() >= self.economy.acquisition_min_missions
    }

    pub fn company_stats(&self) -> CompanyStats {
        let average_income = if self.history.is_empty() {
            0
        } else {
            (self.history.iter().sum::<i64>() as f64 / self.history.len() as f64).ceil() as i64
        };
        CompanyStats {
            missions_played: self.history.len(),
            total_primes_collected: self.total_primes_collected,
            average_income,
            best_streak: self.best_streak,
        }
    }

    fn streak_bonus(&self, base: i64, streak: u32) -> i64 {
        let rate = if streak >= self.streaks.large_threshold {
            self.streaks.large_bonus
        } else if streak >= self.streaks.small_threshold {
            self.streaks.small_bonus
        } else {
            return 0;
        };
        (base as f64 * rate).floor() as i64
    }

    /// Settle a finished contract.  Mutates the wallet, history, lifetime
    /// stats and inflation exactly once.
    pub fn settle(&mut self, summary: &MissionSummary) -> (SettlementReport, SettlementOutcome) {
        let base_earnings = summary.score as i64;
        let streak_bonus = self.streak_bonus(base_earnings, summary.final_streak);
        let yield_bonus = match self.subscription(SubscriptionKind::Yield) {
            Subscription {
                active: true,
                effect: SubscriptionEffect::YieldBonus { rate },
                ..
            } => (base_earnings as f64 * rate).floor() as i64,
            _ => 0,
        };
        let total_earnings = base_earnings + streak_bonus + yield_bonus;

        let space_tax = self.inflated_cost(self.economy.space_tax);
        let subscriptions = self
            .subscriptions
            .iter()
            .filter(|s| s.active)
            .map(|s| self.inflated_cost(s.cost))
            .sum::<i64>();
        let action_costs = self.inflated_cost(summary.action_costs);
        let damage_charge = (summary.damage_taken as f64 * self.economy.maintenance_per_damage).ceil();
        let maintenance = self.inflated_cost(self.economy.base_maintenance + damage_charge);
        let tow_fee = if summary.ship_destroyed {
            self.inflated_cost(self.economy.tow_fee)
        } else {
            0
        };
        let total_costs = space_tax + subscriptions + action_costs + maintenance + tow_fee;

        let net_profit = total_earnings - total_costs;
        self.wallet += net_profit;
        self.history.push(net_profit);
        self.total_primes_collected += summary.score;
        self.best_streak = self.best_streak.max(summary.final_streak);
        self.inflation_multiplier *= self.economy.inflation_rate;

        let report = SettlementReport {
            base_earnings,
            streak_bonus,
            yield_bonus,
            total_earnings,
            space_tax,
            subscriptions,
            action_costs,
            maintenance,
            tow_fee,
            total_costs,
            net_profit,
            wallet_after: self.wallet,
        };

        info!(
            "Mission settled: earnings {}¢, costs {}¢, net {}¢, wallet {}¢",
            total_earnings, total_costs, net_profit, self.wallet
        );

        let outcome = if self.wallet < 0 {
            let final_score = self.wallet + self.acquisition_value();
            info!("Company bankrupt; final score {}¢", final_score);
            SettlementOutcome::Bankrupt { final_score }
        } else {
            SettlementOutcome::Solvent {
                acquisition_offer: self.can_sell().then(|| self.acquisition_value()),
            }
        };

        (report, outcome)
    }

    /// Back to a brand-new company: starting wallet, no history, no
    /// inflation, default subscriptions.
    pub fn reset(&mut self) {
        self.wallet = self.economy.starting_wallet;
        self.subscriptions = self.defaults;
        self.inflation_multiplier = 1.0;
        self.history.clear();
        self.total_primes_collected = 0;
        self.best_streak = 0;
        info!("Ledger reset to a new company");
    }
}
