// =============================================================================
// Trend indicators — SMA cross, MACD, timeframe classifier
// =============================================================================
//
// Three independent reads of trend:
//   SMA cross  — golden/death cross of the 50- and 200-bar simple averages.
//   MACD       — EMA(12) - EMA(26) against its own EMA(9) signal line.
//   Classifier — latest close vs. SMA-20 ratio, bucketed per timeframe.
//
// The classifier buckets are deliberately asymmetric (see `TimeframeTrend`):
// ratio > 1.05 => Strong Bullish, > 1.00 => Bullish, < 0.95 => Strong
// Bearish, everything else (including exactly 1.00) => Bearish.

use crate::series::{ema, rolling_mean};
use crate::types::{MacdSignal, TimeframeTrend, TrendDirection};

/// Short SMA window (classifier center, Bollinger middle).
pub const SMA_SHORT: usize = 20;
/// Medium SMA window (fast leg of the cross).
pub const SMA_MEDIUM: usize = 50;
/// Long SMA window (slow leg of the cross).
pub const SMA_LONG: usize = 200;

/// MACD fast EMA span.
pub const MACD_FAST: usize = 12;
/// MACD slow EMA span.
pub const MACD_SLOW: usize = 26;
/// MACD signal-line EMA span.
pub const MACD_SIGNAL: usize = 9;

/// Classifier ratio above which the trend reads Strong Bullish.
const STRONG_BULLISH_RATIO: f64 = 1.05;
/// Classifier ratio below which the trend reads Strong Bearish.
const STRONG_BEARISH_RATIO: f64 = 0.95;

/// Latest simple moving average over `window` closes.
pub fn sma(closes: &[f64], window: usize) -> Option<f64> {
    rolling_mean(closes, window).last().copied().flatten()
}

/// Moving-average-cross trend: Bullish when SMA-50 > SMA-200.
///
/// Returns `None` when either average lacks history.
pub fn sma_trend(closes: &[f64]) -> Option<TrendDirection> {
    let fast = sma(closes, SMA_MEDIUM)?;
    let slow = sma(closes, SMA_LONG)?;
    Some(if fast > slow {
        TrendDirection::Bullish
    } else {
        TrendDirection::Bearish
    })
}

/// MACD line vs. signal line at the latest sample.
///
/// Returns `None` with fewer than `MACD_SLOW` closes — the slow EMA has not
/// seen a full span of data before that and the line is still settling.
pub fn macd_signal(closes: &[f64]) -> Option<MacdSignal> {
    if closes.len() < MACD_SLOW {
        return None;
    }

    let fast = ema(closes, MACD_FAST);
    let slow = ema(closes, MACD_SLOW);
    let macd_line: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
    let signal_line = ema(&macd_line, MACD_SIGNAL);

    let macd = *macd_line.last()?;
    let signal = *signal_line.last()?;
    if !macd.is_finite() || !signal.is_finite() {
        return None;
    }

    Some(if macd > signal {
        MacdSignal::Buy
    } else {
        MacdSignal::Sell
    })
}

/// Classify one timeframe's trend from its latest close / SMA-20 ratio.
///
/// Fewer than 20 samples => `NotAvailable`.
pub fn timeframe_trend(closes: &[f64]) -> TimeframeTrend {
    let (Some(&close), Some(center)) = (closes.last(), sma(closes, SMA_SHORT)) else {
        return TimeframeTrend::NotAvailable;
    };
    if center == 0.0 || !close.is_finite() {
        return TimeframeTrend::NotAvailable;
    }

    let ratio = close / center;
    if ratio > STRONG_BULLISH_RATIO {
        TimeframeTrend::StrongBullish
    } else if ratio > 1.0 {
        TimeframeTrend::Bullish
    } else if ratio < STRONG_BEARISH_RATIO {
        TimeframeTrend::StrongBearish
    } else {
        TimeframeTrend::Bearish
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    /// Flat series of `n` closes at 100, with the last one overridden.
    fn flat_with_last(n: usize, last: f64) -> Vec<f64> {
        let mut closes = vec![100.0; n];
        *closes.last_mut().unwrap() = last;
        closes
    }

    // ---- sma / sma_trend ---------------------------------------------------

    #[test]
    fn sma_latest_window() {
        let closes: Vec<f64> = (1..=25).map(|x| x as f64).collect();
        // Mean of 6..=25 is 15.5.
        assert!((sma(&closes, 20).unwrap() - 15.5).abs() < 1e-12);
    }

    #[test]
    fn sma_trend_requires_both_legs() {
        let closes: Vec<f64> = (1..=100).map(|x| x as f64).collect();
        assert!(sma_trend(&closes).is_none());
    }

    #[test]
    fn sma_trend_bullish_on_rise() {
        let closes: Vec<f64> = (1..=250).map(|x| x as f64).collect();
        assert_eq!(sma_trend(&closes), Some(TrendDirection::Bullish));
    }

    #[test]
    fn sma_trend_bearish_on_fall() {
        let closes: Vec<f64> = (1..=250).rev().map(|x| x as f64).collect();
        assert_eq!(sma_trend(&closes), Some(TrendDirection::Bearish));
    }

    // ---- macd_signal ---------------------------------------------------------

    #[test]
    fn macd_insufficient_data() {
        let closes: Vec<f64> = (1..=25).map(|x| x as f64).collect();
        assert!(macd_signal(&closes).is_none());
    }

    #[test]
    fn macd_buy_on_sustained_rise() {
        // Rising series: the fast EMA leads the slow one and the MACD line
        // leads its own signal.
        let closes: Vec<f64> = (1..=60).map(|x| 100.0 + x as f64).collect();
        assert_eq!(macd_signal(&closes), Some(MacdSignal::Buy));
    }

    #[test]
    fn macd_sell_on_sustained_fall() {
        let closes: Vec<f64> = (1..=60).map(|x| 200.0 - x as f64).collect();
        assert_eq!(macd_signal(&closes), Some(MacdSignal::Sell));
    }

    #[test]
    fn macd_flat_series_is_sell() {
        // All lines converge to zero; a tie is not a Buy.
        let closes = vec![100.0; 60];
        assert_eq!(macd_signal(&closes), Some(MacdSignal::Sell));
    }

    // ---- timeframe_trend ----------------------------------------------------

    #[test]
    fn classifier_short_series_not_available() {
        let closes = vec![100.0; 19];
        assert_eq!(timeframe_trend(&closes), TimeframeTrend::NotAvailable);
    }

    #[test]
    fn classifier_strong_bullish_above_five_percent() {
        assert_eq!(
            timeframe_trend(&flat_with_last(20, 110.0)),
            TimeframeTrend::StrongBullish
        );
    }

    #[test]
    fn classifier_bullish_just_above_center() {
        assert_eq!(
            timeframe_trend(&flat_with_last(20, 101.0)),
            TimeframeTrend::Bullish
        );
    }

    #[test]
    fn classifier_strong_bearish_below_five_percent() {
        assert_eq!(
            timeframe_trend(&flat_with_last(20, 90.0)),
            TimeframeTrend::StrongBearish
        );
    }

    #[test]
    fn classifier_mid_band_is_asymmetric() {
        // A close slightly below center and a dead-flat series both read
        // plain Bearish; there is no symmetric mid-band bullish bucket.
        assert_eq!(
            timeframe_trend(&flat_with_last(20, 99.0)),
            TimeframeTrend::Bearish
        );
        assert_eq!(timeframe_trend(&[100.0; 20]), TimeframeTrend::Bearish);
    }
}
