//! Per-tick model inputs and the risk numbers derived from them.

use serde::Serialize;

/// Feature vector extracted from one tick plus its rolling history.
///
/// All fields except `timestamp_ns` are raw, un-normalized model inputs.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[repr(C)]
pub struct MlFeatures {
    /// Relative distance of the last price from the window mean.
    pub price_change: f32,
    /// Tick volume over window mean volume.
    pub volume_ratio: f32,
    pub spread_bps: f32,
    /// Population std-dev of window prices (price units).
    pub volatility_5min: f32,
    /// Return versus the price five ticks back.
    pub momentum_1min: f32,
    /// `ln(bid_size + ask_size + 1)`.
    pub liquidity_score: f32,
    /// Venue id scaled by 1/10.
    pub venue_preference: f32,
    pub timestamp_ns: u64,
}

impl MlFeatures {
    pub const NUM_FEATURES: usize = 7;

    /// Model input order. `timestamp_ns` is metadata and not included.
    pub fn to_array(&self) -> [f32; Self::NUM_FEATURES] {
        [
            self.price_change,
            self.volume_ratio,
            self.spread_bps,
            self.volatility_5min,
            self.momentum_1min,
            self.liquidity_score,
            self.venue_preference,
        ]
    }
}

/// Pre-trade risk estimate for a position against one feature vector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[repr(C)]
pub struct RiskMetrics {
    pub position_risk: f32,
    pub market_impact_estimate: f32,
    pub execution_cost_estimate: f32,
    pub risk_limit_exceeded: bool,
}

impl std::fmt::Display for RiskMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "risk={:.2} impact={:.2} cost={:.2}{}",
            self.position_risk,
            self.market_impact_estimate,
            self.execution_cost_estimate,
            if self.risk_limit_exceeded { " LIMIT" } else { "" },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_order_matches_fields() {
        let f = MlFeatures {
            price_change: 1.0,
            volume_ratio: 2.0,
            spread_bps: 3.0,
            volatility_5min: 4.0,
            momentum_1min: 5.0,
            liquidity_score: 6.0,
            venue_preference: 7.0,
            timestamp_ns: 99,
        };
        assert_eq!(f.to_array(), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
    }

    #[test]
    fn display_flags_breach() {
        let r = RiskMetrics { risk_limit_exceeded: true, ..Default::default() };
        assert!(r.to_string().ends_with("LIMIT"));
    }
}
