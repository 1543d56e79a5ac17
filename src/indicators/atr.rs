// =============================================================================
// Average True Range (ATR) — rolling-mean method
// =============================================================================
//
// ATR measures volatility by decomposing the entire range of a bar.
//
// True Range (TR) for each bar:
//   TR = max(H - L, |H - prevClose|, |L - prevClose|)
//
// ATR is the simple rolling mean of TR over the trailing `period` bars.
// TR needs a previous close, so bar 0 has no TR and the first defined ATR
// sits at bar index `period`.
//
// Default period: 14
// =============================================================================

use crate::price_series::PriceBar;
use crate::series::rolling_mean;

/// Standard ATR look-back.
pub const ATR_PERIOD: usize = 14;

/// True range per bar, starting at bar index 1 (oldest first).
pub fn true_ranges(bars: &[PriceBar]) -> Vec<f64> {
    let mut out = Vec::with_capacity(bars.len().saturating_sub(1));
    for i in 1..bars.len() {
        let high = bars[i].high;
        let low = bars[i].low;
        let prev_close = bars[i - 1].close;

        let hl = high - low;
        let hc = (high - prev_close).abs();
        let lc = (low - prev_close).abs();
        out.push(hl.max(hc).max(lc));
    }
    out
}

/// ATR per bar, aligned with `bars` (index i holds the ATR ending at bar i).
///
/// Indices before `period` are `None`; windows containing non-finite bars
/// are `None` as well.
pub fn atr_series(bars: &[PriceBar], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; bars.len()];
    if period == 0 || bars.len() < period + 1 {
        return out;
    }

    let tr = true_ranges(bars);
    let means = rolling_mean(&tr, period);
    // TR index j corresponds to bar index j + 1.
    for (j, mean) in means.into_iter().enumerate() {
        out[j + 1] = mean;
    }
    out
}

/// The most recent ATR value for the given look-back.
///
/// Returns `None` when fewer than `period + 1` bars exist or the final
/// window is non-finite.
pub fn calculate_atr(bars: &[PriceBar], period: usize) -> Option<f64> {
    atr_series(bars, period).last().copied().flatten()
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::price_series::test_support::bar;

    fn flat_range_bars(count: usize) -> Vec<PriceBar> {
        (0..count)
            .map(|i| {
                let base = 100.0 + i as f64 * 0.1;
                bar(i as i64, base, base + 5.0, base - 5.0, base)
            })
            .collect()
    }

    #[test]
    fn atr_period_zero() {
        assert!(calculate_atr(&flat_range_bars(20), 0).is_none());
    }

    #[test]
    fn atr_insufficient_data() {
        // period = 14 needs 15 bars.
        assert!(calculate_atr(&flat_range_bars(14), 14).is_none());
        assert!(calculate_atr(&flat_range_bars(15), 14).is_some());
    }

    #[test]
    fn atr_constant_range_converges_to_range() {
        // Every bar spans 10 with a negligible drift, so ATR sits near 10.
        let atr = calculate_atr(&flat_range_bars(30), 14).unwrap();
        assert!((atr - 10.0).abs() < 0.5, "expected ATR near 10.0, got {atr}");
    }

    #[test]
    fn atr_is_plain_mean_of_true_ranges() {
        // period = 2: ATR = mean of the last two TR values.
        let bars = vec![
            bar(0, 100.0, 102.0, 98.0, 101.0),
            bar(1, 101.0, 105.0, 100.0, 104.0), // TR = max(5, 4, 1) = 5
            bar(2, 104.0, 106.0, 103.0, 105.0), // TR = max(3, 2, 1) = 3
        ];
        let atr = calculate_atr(&bars, 2).unwrap();
        assert!((atr - 4.0).abs() < 1e-12, "got {atr}");
    }

    #[test]
    fn atr_true_range_uses_prev_close_on_gaps() {
        // Gap up: |H - prevClose| dominates H - L.
        let bars = vec![
            bar(0, 100.0, 105.0, 95.0, 95.0),
            bar(1, 110.0, 115.0, 108.0, 112.0), // TR = |115 - 95| = 20
            bar(2, 112.0, 118.0, 110.0, 115.0),
            bar(3, 115.0, 120.0, 113.0, 118.0),
        ];
        let atr = calculate_atr(&bars, 3).unwrap();
        assert!(atr > 7.0, "ATR should reflect the gap, got {atr}");
    }

    #[test]
    fn atr_series_alignment() {
        let bars = flat_range_bars(20);
        let series = atr_series(&bars, 14);
        assert_eq!(series.len(), bars.len());
        assert!(series[..14].iter().all(|v| v.is_none()));
        assert!(series[14..].iter().all(|v| v.is_some()));
    }

    #[test]
    fn atr_nan_bar_degrades_window() {
        let mut bars = flat_range_bars(20);
        bars[18].high = f64::NAN;
        let series = atr_series(&bars, 3);
        // Windows touching the NaN TR are undefined; earlier ones are fine.
        assert!(series[17].is_some());
        assert!(series[18].is_none());
        assert!(series[19].is_none());
    }
}
