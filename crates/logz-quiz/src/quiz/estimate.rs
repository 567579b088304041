use serde::Serialize;

/// Share of annual spend assumed recoverable.
pub const SAVINGS_RATE: f64 = 0.15;
/// Savings ceiling used when no spend magnitude is known, in BRL.
pub const FALLBACK_CEILING: f64 = 500_000.0;
pub const MAX_EFFICIENCY_GAIN: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EconomicEstimate {
    /// Estimated yearly savings in BRL.
    pub economic_potential: u64,
    /// Efficiency gain in whole percent, 0..=20.
    pub efficiency_gain: u8,
}

/// Savings come from annualized spend when a positive magnitude is known,
/// otherwise from the score against [`FALLBACK_CEILING`].
pub fn estimate(percentage: f64, monthly_spend: Option<f64>) -> EconomicEstimate {
    let ratio = if percentage.is_finite() {
        percentage.clamp(0.0, 100.0) / 100.0
    } else {
        0.0
    };

    let economic_potential = match monthly_spend {
        Some(spend) if spend.is_finite() && spend > 0.0 => (spend * 12.0 * SAVINGS_RATE).round(),
        _ => (ratio * FALLBACK_CEILING).round(),
    };
    let efficiency_gain = (ratio * MAX_EFFICIENCY_GAIN).round();

    EconomicEstimate {
        economic_potential: economic_potential as u64,
        efficiency_gain: efficiency_gain as u8,
    }
}
