// =============================================================================
// Fundamentals — externally supplied ratios and the derived risk profile
// =============================================================================
//
// The engine does not fetch statements; every ratio arrives from the caller.
// Scale conventions (pinned by tests, easy to get wrong upstream):
//   - `debt_to_equity` is a plain ratio: 1.0 means debt equals equity.
//   - `roce_pct` is a percentage: 15.0 means 15 %.
// Only debt-to-equity and ROCE feed the fundamental score; the rest are
// surfaced untouched in the report.

use serde::{Deserialize, Serialize};

use crate::price_series::PriceSeries;
use crate::series::{rolling_max, rolling_min};

/// Debt-to-equity above which a company is flagged as highly levered.
pub const HIGH_DEBT_RATIO: f64 = 2.0;

/// Trailing daily bars approximating one trading year.
pub const TRADING_YEAR_BARS: usize = 252;

/// Key ratios for one instrument, all optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FundamentalMetrics {
    /// Total debt / shareholder equity, plain ratio scale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debt_to_equity: Option<f64>,
    /// Return on capital employed, percent scale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roce_pct: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pe_ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peg_ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_to_book: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roe: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dividend_yield: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beta: Option<f64>,
}

/// Positioning of the current price against the trailing year, plus leverage
/// flags. Derived per request, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beta: Option<f64>,
    /// Percent below the 52-week high, rounded to 2 decimals.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_from_52w_high_pct: Option<f64>,
    /// Percent above the 52-week low, rounded to 2 decimals.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_from_52w_low_pct: Option<f64>,
    pub high_debt: bool,
}

/// Derive the risk profile from the daily series and the external ratios.
///
/// The 52-week extremes use the trailing `TRADING_YEAR_BARS` bars, clamped
/// to the available history so a younger listing still gets a reading.
pub fn risk_profile(daily: &PriceSeries, metrics: &FundamentalMetrics) -> RiskProfile {
    let window = TRADING_YEAR_BARS.min(daily.len()).max(1);
    let high_52w = rolling_max(&daily.highs(), window).last().copied().flatten();
    let low_52w = rolling_min(&daily.lows(), window).last().copied().flatten();
    let close = daily.last_close();

    let distance_from_high = match (close, high_52w) {
        (Some(c), Some(h)) if h > 0.0 => Some(round2((h - c) / h * 100.0)),
        _ => None,
    };
    let distance_from_low = match (close, low_52w) {
        (Some(c), Some(l)) if l > 0.0 => Some(round2((c - l) / l * 100.0)),
        _ => None,
    };

    RiskProfile {
        beta: metrics.beta,
        distance_from_52w_high_pct: distance_from_high,
        distance_from_52w_low_pct: distance_from_low,
        high_debt: metrics
            .debt_to_equity
            .map(|de| de > HIGH_DEBT_RATIO)
            .unwrap_or(false),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::price_series::test_support::series_from_closes;
    use crate::price_series::PriceSeries;
    use crate::types::Timeframe;

    #[test]
    fn distances_use_trailing_extremes() {
        // Closes 50..=100: synthetic high = close * 1.01, low = close * 0.99.
        let closes: Vec<f64> = (50..=100).map(|i| i as f64).collect();
        let daily = series_from_closes(&closes);
        let profile = risk_profile(&daily, &FundamentalMetrics::default());

        // 52w high = 101.0, close = 100 => 0.99% below the high.
        assert!((profile.distance_from_52w_high_pct.unwrap() - 0.99).abs() < 1e-9);
        // 52w low = 49.5, close = 100 => 102.02% above the low.
        assert!((profile.distance_from_52w_low_pct.unwrap() - 102.02).abs() < 1e-9);
    }

    #[test]
    fn young_listing_clamps_window() {
        let daily = series_from_closes(&[10.0, 12.0, 11.0]);
        let profile = risk_profile(&daily, &FundamentalMetrics::default());
        assert!(profile.distance_from_52w_high_pct.is_some());
        assert!(profile.distance_from_52w_low_pct.is_some());
    }

    #[test]
    fn empty_series_yields_no_distances() {
        let daily = PriceSeries::new(Timeframe::Daily, Vec::new()).unwrap();
        let profile = risk_profile(&daily, &FundamentalMetrics::default());
        assert!(profile.distance_from_52w_high_pct.is_none());
        assert!(profile.distance_from_52w_low_pct.is_none());
        assert!(!profile.high_debt);
    }

    #[test]
    fn high_debt_flag_thresholds() {
        let daily = series_from_closes(&[100.0; 5]);
        let flagged = risk_profile(
            &daily,
            &FundamentalMetrics {
                debt_to_equity: Some(2.5),
                ..Default::default()
            },
        );
        assert!(flagged.high_debt);

        let healthy = risk_profile(
            &daily,
            &FundamentalMetrics {
                debt_to_equity: Some(2.0),
                ..Default::default()
            },
        );
        assert!(!healthy.high_debt);
    }

    #[test]
    fn metrics_deserialize_from_partial_json() {
        let metrics: FundamentalMetrics =
            serde_json::from_str(r#"{ "debt_to_equity": 0.4, "roce_pct": 22.0 }"#).unwrap();
        assert_eq!(metrics.debt_to_equity, Some(0.4));
        assert_eq!(metrics.roce_pct, Some(22.0));
        assert!(metrics.pe_ratio.is_none());
        assert!(metrics.beta.is_none());
    }
}
