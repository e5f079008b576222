//! Behavioral and risk analytics derived from a simulation's daily metric
//! series.
//!
//! This is the crate's other deliberate float boundary (alongside
//! [`crate::rng`]): these are descriptive statistics over historical
//! balances, not monetary values in their own right, so they are computed
//! in `f64` and only the final packet fields that are genuinely monetary
//! stay `Decimal`.

use crate::models::config::SimulationResult;
use crate::orchestrator::DailyMetric;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

fn balances_f64(metrics: &[DailyMetric]) -> Vec<f64> {
    metrics.iter().map(|m| m.balance.to_f64().unwrap_or(0.0)).collect()
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn stdev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// A 0-100 qualitative score over the last `min(30, len)` daily balances,
/// plus its descriptive band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VibeDescriptor {
    Thriving,
    Stable,
    Cautious,
    Stressed,
    Critical,
    /// Fewer than 7 days of history: no band applies yet.
    Neutral,
}

impl VibeDescriptor {
    fn from_score(score: i32) -> Self {
        if score >= 80 {
            VibeDescriptor::Thriving
        } else if score >= 60 {
            VibeDescriptor::Stable
        } else if score >= 40 {
            VibeDescriptor::Cautious
        } else if score >= 20 {
            VibeDescriptor::Stressed
        } else {
            VibeDescriptor::Critical
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VibeDescriptor::Thriving => "Thriving",
            VibeDescriptor::Stable => "Stable",
            VibeDescriptor::Cautious => "Cautious",
            VibeDescriptor::Stressed => "Stressed",
            VibeDescriptor::Critical => "Critical",
            VibeDescriptor::Neutral => "Neutral",
        }
    }
}

/// `financial_vibe` computation. Requires at least 7 days of history;
/// shorter series return the neutral default `(50, Cautious)`.
pub fn financial_vibe(metrics: &[DailyMetric]) -> (i32, VibeDescriptor) {
    if metrics.len() < 7 {
        return (50, VibeDescriptor::Neutral);
    }

    let window_len = metrics.len().min(30);
    let window = &metrics[metrics.len() - window_len..];
    let balances = balances_f64(window);

    let avg = mean(&balances);
    let trend = balances.last().copied().unwrap_or(0.0) - balances.first().copied().unwrap_or(0.0);
    let volatility = stdev(&balances);

    let mut score = if avg > 50_000.0 {
        80
    } else if avg > 10_000.0 {
        60
    } else if avg > 0.0 {
        40
    } else {
        20
    };

    if trend > 1000.0 {
        score += 15;
    } else if trend < -1000.0 {
        score -= 15;
    }
    if volatility > 10_000.0 {
        score -= 10;
    }

    let score = score.clamp(0, 100);
    (score, VibeDescriptor::from_score(score))
}

/// The virtual-pet mood mapped from a `financial_vibe` score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PetState {
    Celebrating,
    Happy,
    Neutral,
    Anxious,
    Panicking,
}

impl PetState {
    pub fn from_vibe_score(score: i32) -> Self {
        if score >= 80 {
            PetState::Celebrating
        } else if score >= 60 {
            PetState::Happy
        } else if score >= 40 {
            PetState::Neutral
        } else if score >= 20 {
            PetState::Anxious
        } else {
            PetState::Panicking
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PetState::Celebrating => "Celebrating",
            PetState::Happy => "Happy",
            PetState::Neutral => "Neutral",
            PetState::Anxious => "Anxious",
            PetState::Panicking => "Panicking",
        }
    }
}

/// Average daily balance change over the 30 days following the last
/// negative-balance period that the series actually exited (a trailing
/// negative period still open at the final day is ignored). `None` if no
/// negative period was ever exited.
pub fn recovery_slope(metrics: &[DailyMetric]) -> Option<Decimal> {
    let balances: Vec<Decimal> = metrics.iter().map(|m| m.balance).collect();
    if balances.is_empty() {
        return None;
    }

    let mut last_exited_negative_end: Option<usize> = None;
    let mut i = 0;
    while i < balances.len() {
        if balances[i] < Decimal::ZERO {
            while i < balances.len() && balances[i] < Decimal::ZERO {
                i += 1;
            }
            if i < balances.len() {
                // The run ended before the series did, i.e. it was exited.
                last_exited_negative_end = Some(i - 1);
            }
        } else {
            i += 1;
        }
    }

    let k = last_exited_negative_end?;

    if k + 30 < balances.len() {
        let slope = (balances[k + 30] - balances[k]) / dec!(30);
        Some(slope)
    } else {
        Some(Decimal::ZERO)
    }
}

/// Fraction of simulated days spent with a negative balance.
pub fn collapse_probability(metrics: &[DailyMetric]) -> Decimal {
    if metrics.is_empty() {
        return Decimal::ZERO;
    }
    let negative_days = metrics.iter().filter(|m| m.balance < Decimal::ZERO).count();
    Decimal::from(negative_days) / Decimal::from(metrics.len())
}

/// Months of spending the current liquid assets + balance would cover,
/// clamped to `[0, 10]`. Requires at least 30 days of history.
pub fn shock_resilience(metrics: &[DailyMetric]) -> Decimal {
    if metrics.len() < 30 {
        return Decimal::ZERO;
    }

    let last = metrics.last().unwrap();
    let thirty_ago = &metrics[metrics.len() - 30];
    let net_change = last.balance - thirty_ago.balance;

    let monthly_expense = if net_change < Decimal::ZERO {
        (last.balance - thirty_ago.balance).abs()
    } else {
        dec!(1000)
    };

    if monthly_expense.is_zero() {
        return dec!(10);
    }

    let rsi = (last.liquid_assets + last.balance) / monthly_expense;
    rsi.clamp(Decimal::ZERO, dec!(10))
}

/// Standard deviation of daily balances (`0` for fewer than 2 samples).
pub fn volatility(metrics: &[DailyMetric]) -> Decimal {
    let balances = balances_f64(metrics);
    crate::decimal::from_f64(stdev(&balances))
}

/// Cross-scenario percentiles (p5/p50/p95) and mean over a key extracted
/// from each [`SimulationResult`]. Indices use `⌊p·n⌋`, clamped to
/// `[0, n-1]`, matching the literal formula this implementation is
/// anchored on.
pub struct Percentiles {
    pub p5: Decimal,
    pub p50: Decimal,
    pub p95: Decimal,
    pub mean: Decimal,
}

pub fn percentiles(results: &[SimulationResult], key: impl Fn(&SimulationResult) -> Decimal) -> Option<Percentiles> {
    if results.is_empty() {
        return None;
    }

    let mut values: Vec<Decimal> = results.iter().map(key).collect();
    values.sort();

    let n = values.len();
    let index_at = |p: f64| -> usize { ((p * n as f64).floor() as usize).min(n - 1) };

    let sum: Decimal = values.iter().copied().sum();
    let mean = sum / Decimal::from(n);

    Some(Percentiles {
        p5: values[index_at(0.05)],
        p50: values[index_at(0.50)],
        p95: values[index_at(0.95)],
        mean,
    })
}

/// Portfolio-health figures derived from the terminal wallet state.
pub struct PortfolioHealth {
    pub net_asset_value: Decimal,
    pub liquidity_ratio: Decimal,
    pub debt_to_income: Decimal,
}

pub fn portfolio_health(result: &SimulationResult) -> PortfolioHealth {
    let state = &result.final_state;
    let net_asset_value = state.net_worth();
    let liquidity_ratio = crate::decimal::safe_div(state.liquid_assets() + state.balance, state.total_debt(), dec!(999));
    let debt_to_income = crate::decimal::safe_div(state.total_debt(), state.total_income_ytd, Decimal::ZERO);

    PortfolioHealth {
        net_asset_value,
        liquidity_ratio,
        debt_to_income,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PacketMeta {
    pub generated_at: String,
    pub simulation_period_start: chrono::NaiveDate,
    pub simulation_period_end: chrono::NaiveDate,
    pub random_seed: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalStateSummary {
    pub balance: Decimal,
    pub credit_score: Decimal,
    pub total_assets: Decimal,
    pub total_debt: Decimal,
    pub net_worth: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticalDistributions {
    pub final_balance: Decimal,
    pub expected_value: Option<Decimal>,
    pub percentile_5: Option<Decimal>,
    pub percentile_50: Option<Decimal>,
    pub percentile_95: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskMetrics {
    pub collapse_probability: Decimal,
    pub shock_resilience_index: Decimal,
    pub balance_volatility: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioHealthSummary {
    pub net_asset_value: Decimal,
    pub liquidity_ratio: Decimal,
    pub debt_to_income_ratio: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehavioralMetrics {
    pub financial_vibe_score: i32,
    pub financial_vibe_description: String,
    pub pet_state: String,
    pub recovery_slope: Option<Decimal>,
}

/// The terminal, `Serialize`-able packet. No function in this crate writes
/// this to disk or stdout; that is a caller's responsibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputPacket {
    pub meta: PacketMeta,
    pub final_state: FinalStateSummary,
    pub statistical_distributions: StatisticalDistributions,
    pub risk_metrics: RiskMetrics,
    pub portfolio_health: PortfolioHealthSummary,
    pub behavioral_metrics: BehavioralMetrics,
}

/// Assemble the output packet from one run's result and daily metrics,
/// optionally folding in cross-scenario percentiles when `multi_scenario`
/// is provided.
pub fn generate_packet(result: &SimulationResult, daily_metrics: &[DailyMetric], multi_scenario: Option<&[SimulationResult]>, generated_at: impl Into<String>) -> OutputPacket {
    let (vibe_score, vibe_descriptor) = financial_vibe(daily_metrics);
    let pet = PetState::from_vibe_score(vibe_score);
    let health = portfolio_health(result);

    let cross = multi_scenario.and_then(|results| percentiles(results, |r| r.final_balance));

    let state = &result.final_state;

    OutputPacket {
        meta: PacketMeta {
            generated_at: generated_at.into(),
            simulation_period_start: result.config.start_date,
            simulation_period_end: result.config.end_date,
            random_seed: result.config.random_seed,
        },
        final_state: FinalStateSummary {
            balance: state.balance,
            credit_score: state.credit_score(),
            total_assets: state.total_assets(),
            total_debt: state.total_debt(),
            net_worth: state.net_worth(),
        },
        statistical_distributions: StatisticalDistributions {
            final_balance: result.final_balance,
            expected_value: cross.as_ref().map(|p| p.mean),
            percentile_5: cross.as_ref().map(|p| p.p5),
            percentile_50: cross.as_ref().map(|p| p.p50),
            percentile_95: cross.as_ref().map(|p| p.p95),
        },
        risk_metrics: RiskMetrics {
            collapse_probability: collapse_probability(daily_metrics),
            shock_resilience_index: shock_resilience(daily_metrics),
            balance_volatility: volatility(daily_metrics),
        },
        portfolio_health: PortfolioHealthSummary {
            net_asset_value: health.net_asset_value,
            liquidity_ratio: health.liquidity_ratio,
            debt_to_income_ratio: health.debt_to_income,
        },
        behavioral_metrics: BehavioralMetrics {
            financial_vibe_score: vibe_score,
            financial_vibe_description: vibe_descriptor.as_str().to_string(),
            pet_state: pet.as_str().to_string(),
            recovery_slope: recovery_slope(daily_metrics),
        },
    }
}
