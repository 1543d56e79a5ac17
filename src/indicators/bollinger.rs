// =============================================================================
// Bollinger Bands & support/resistance extremes
// =============================================================================
//
// Bollinger Bands consist of a middle band (SMA-20 of close), an upper band
// (SMA + k*σ) and a lower band (SMA - k*σ), with σ the *sample* standard
// deviation (ddof = 1). The latest close is classified against the envelope:
// above the upper band => Overbought, below the lower band => Oversold,
// inside => Neutral.
//
// Support and resistance are plain trailing extremes (rolling min of lows /
// rolling max of highs), not clustering-based zones. Two horizons are used:
// 30 bars (short) and 126 bars (roughly six months of daily data).

use crate::series::{rolling_max, rolling_mean, rolling_min, rolling_std};
use crate::types::BandPosition;

/// Standard Bollinger window.
pub const BOLLINGER_PERIOD: usize = 20;
/// Standard band width in standard deviations.
pub const BOLLINGER_WIDTH: f64 = 2.0;

/// Trailing window for short-horizon support/resistance.
pub const SR_SHORT_WINDOW: usize = 30;
/// Trailing window for long-horizon support/resistance (~6 months daily).
pub const SR_LONG_WINDOW: usize = 126;

/// Result of a Bollinger Band calculation at the latest sample.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// Calculate Bollinger Bands at the latest close.
///
/// Returns `None` when fewer than `period` closes exist or the window is
/// non-finite. A flat window has zero sample deviation, so upper == middle
/// == lower is a valid result.
pub fn calculate_bollinger(
    closes: &[f64],
    period: usize,
    num_std: f64,
) -> Option<BollingerBands> {
    let middle = rolling_mean(closes, period).last().copied().flatten()?;
    let std_dev = rolling_std(closes, period).last().copied().flatten()?;

    let upper = middle + num_std * std_dev;
    let lower = middle - num_std * std_dev;

    (upper.is_finite() && lower.is_finite()).then_some(BollingerBands {
        upper,
        middle,
        lower,
    })
}

/// Classify the latest close against the band envelope.
pub fn band_position(close: f64, bands: &BollingerBands) -> BandPosition {
    if close > bands.upper {
        BandPosition::Overbought
    } else if close < bands.lower {
        BandPosition::Oversold
    } else {
        BandPosition::Neutral
    }
}

/// Trailing support level: rolling min of lows over `window` bars.
pub fn support_level(lows: &[f64], window: usize) -> Option<f64> {
    rolling_min(lows, window).last().copied().flatten()
}

/// Trailing resistance level: rolling max of highs over `window` bars.
pub fn resistance_level(highs: &[f64], window: usize) -> Option<f64> {
    rolling_max(highs, window).last().copied().flatten()
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bollinger_orders_bands() {
        let closes: Vec<f64> = (1..=20).map(|x| x as f64).collect();
        let bb = calculate_bollinger(&closes, 20, 2.0).unwrap();
        assert!(bb.upper > bb.middle);
        assert!(bb.lower < bb.middle);
    }

    #[test]
    fn bollinger_insufficient_data() {
        let closes = vec![1.0, 2.0, 3.0];
        assert!(calculate_bollinger(&closes, 20, 2.0).is_none());
    }

    #[test]
    fn bollinger_flat_series_collapses_bands() {
        // No variance: upper == middle == lower == SMA.
        let closes = vec![100.0; 25];
        let bb = calculate_bollinger(&closes, 20, 2.0).unwrap();
        assert!((bb.upper - 100.0).abs() < 1e-12);
        assert!((bb.middle - 100.0).abs() < 1e-12);
        assert!((bb.lower - 100.0).abs() < 1e-12);
        assert_eq!(band_position(100.0, &bb), BandPosition::Neutral);
    }

    #[test]
    fn bollinger_uses_sample_std() {
        // Window [1, 2, 3, 4]: sample std = sqrt(5/3).
        let bb = calculate_bollinger(&[1.0, 2.0, 3.0, 4.0], 4, 2.0).unwrap();
        let expected = 2.5 + 2.0 * (5.0_f64 / 3.0).sqrt();
        assert!((bb.upper - expected).abs() < 1e-12, "got {}", bb.upper);
    }

    #[test]
    fn band_position_classification() {
        let bb = BollingerBands {
            upper: 110.0,
            middle: 100.0,
            lower: 90.0,
        };
        assert_eq!(band_position(115.0, &bb), BandPosition::Overbought);
        assert_eq!(band_position(85.0, &bb), BandPosition::Oversold);
        assert_eq!(band_position(100.0, &bb), BandPosition::Neutral);
        // Touching a band is still inside the envelope.
        assert_eq!(band_position(110.0, &bb), BandPosition::Neutral);
    }

    #[test]
    fn support_resistance_are_trailing_extremes() {
        let lows: Vec<f64> = (0..40).map(|i| 50.0 + (i as f64 * 0.7).sin() * 5.0).collect();
        let highs: Vec<f64> = lows.iter().map(|l| l + 10.0).collect();

        let support = support_level(&lows, 30).unwrap();
        let resistance = resistance_level(&highs, 30).unwrap();

        let tail_lows = &lows[lows.len() - 30..];
        let tail_highs = &highs[highs.len() - 30..];
        assert_eq!(support, tail_lows.iter().copied().fold(f64::MAX, f64::min));
        assert_eq!(
            resistance,
            tail_highs.iter().copied().fold(f64::MIN, f64::max)
        );
        assert!(resistance > support);
    }

    #[test]
    fn support_resistance_need_full_window() {
        let lows = vec![1.0; 20];
        assert!(support_level(&lows, 30).is_none());
        assert!(resistance_level(&lows, 126).is_none());
    }
}
