// =============================================================================
// Relative Strength Index (RSI) — rolling-mean variant
// =============================================================================
//
// RSI measures the speed and magnitude of recent price changes to evaluate
// whether an instrument is overbought or oversold.
//
// Step 1 — Compute day-over-day deltas from consecutive closes.
// Step 2 — Split deltas into gains (positive moves) and losses (negated
//          negative moves), zero elsewhere.
// Step 3 — Take the `period`-bar simple rolling mean of each side.
// Step 4 — RS  = avg_gain / avg_loss
//          RSI = 100 - 100 / (1 + RS)
//
// A zero average loss makes RS infinite; that case resolves to RSI = 100
// rather than NaN. A completely flat window (zero gain and zero loss)
// resolves to the neutral 50.
// =============================================================================

use crate::series::rolling_mean;

/// Standard RSI look-back.
pub const RSI_PERIOD: usize = 14;

/// Compute the full RSI series for the given `closes` and `period`.
///
/// The returned vector has one RSI value per close starting at index
/// `period` (one delta per close pair, plus a full window of deltas).
///
/// # Edge cases
/// - `period == 0` or `closes.len() < period + 1` => empty vec
/// - avg_loss == 0, avg_gain > 0 => 100.0
/// - avg_loss == 0, avg_gain == 0 => 50.0 (no movement)
/// - Non-finite windows are skipped and the series is truncated there.
pub fn calculate_rsi(closes: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || closes.len() < period + 1 {
        return Vec::new();
    }

    // --- Split deltas into gain / loss legs ----------------------------------
    let mut gains = Vec::with_capacity(closes.len() - 1);
    let mut losses = Vec::with_capacity(closes.len() - 1);
    for pair in closes.windows(2) {
        let delta = pair[1] - pair[0];
        if delta.is_finite() {
            gains.push(if delta > 0.0 { delta } else { 0.0 });
            losses.push(if delta < 0.0 { -delta } else { 0.0 });
        } else {
            // Poison both legs so the affected windows stay undefined.
            gains.push(f64::NAN);
            losses.push(f64::NAN);
        }
    }

    let avg_gains = rolling_mean(&gains, period);
    let avg_losses = rolling_mean(&losses, period);

    // --- Resolve RS into bounded RSI values ----------------------------------
    let mut result = Vec::with_capacity(gains.len() - period + 1);
    for (avg_gain, avg_loss) in avg_gains.iter().zip(&avg_losses).skip(period - 1) {
        match (avg_gain, avg_loss) {
            (Some(gain), Some(loss)) => match rsi_from_averages(*gain, *loss) {
                Some(rsi) => result.push(rsi),
                None => break,
            },
            _ => break,
        }
    }

    result
}

/// The most recent RSI value at the standard 14-bar period.
///
/// Returns `None` when fewer than 15 closes exist or the calculation hits a
/// non-finite window.
pub fn current_rsi(closes: &[f64]) -> Option<f64> {
    calculate_rsi(closes, RSI_PERIOD).last().copied()
}

/// Convert average gain / average loss into an RSI value in [0, 100].
fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> Option<f64> {
    let rsi = if avg_loss == 0.0 && avg_gain == 0.0 {
        50.0 // Flat window — neutral.
    } else if avg_loss == 0.0 {
        100.0 // All gains, no losses.
    } else {
        let rs = avg_gain / avg_loss;
        100.0 - 100.0 / (1.0 + rs)
    };

    rsi.is_finite().then_some(rsi)
}
