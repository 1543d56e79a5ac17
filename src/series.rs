// =============================================================================
// Series utilities — rolling and exponential statistics
// =============================================================================
//
// Generic building blocks for the indicator modules. Every rolling function
// returns a vector aligned with the input: indices before a full window are
// `None`, and any window containing a non-finite sample yields `None` at that
// index instead of poisoning downstream math with NaN.
//
// `rolling_std` uses the *sample* standard deviation (ddof = 1). This is the
// conventional Bollinger Band definition and directly controls band width, so
// it must not be swapped for the population form.

/// Simple moving average over a trailing `window`.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if window == 0 {
        return out;
    }

    for i in (window - 1)..values.len() {
        let slice = &values[i + 1 - window..=i];
        let mean = slice.iter().sum::<f64>() / window as f64;
        if mean.is_finite() {
            out[i] = Some(mean);
        }
    }
    out
}

/// Sample standard deviation (ddof = 1) over a trailing `window`.
///
/// A window of 0 or 1 has no sample variance and yields all-`None`.
pub fn rolling_std(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if window < 2 {
        return out;
    }

    for i in (window - 1)..values.len() {
        let slice = &values[i + 1 - window..=i];
        let mean = slice.iter().sum::<f64>() / window as f64;
        let variance =
            slice.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (window - 1) as f64;
        let std = variance.sqrt();
        if std.is_finite() {
            out[i] = Some(std);
        }
    }
    out
}

/// Exponential moving average with smoothing factor `alpha = 2 / (span + 1)`.
///
/// Recursive form: `ema[0] = values[0]`, then
/// `ema[i] = alpha * values[i] + (1 - alpha) * ema[i - 1]`.
///
/// Unlike the rolling-window functions there is no warm-up gap: every index
/// has a value. A zero `span` or empty input returns an empty vector.
pub fn ema(values: &[f64], span: usize) -> Vec<f64> {
    if span == 0 || values.is_empty() {
        return Vec::new();
    }

    let alpha = 2.0 / (span + 1) as f64;
    let mut out = Vec::with_capacity(values.len());
    let mut prev = values[0];
    out.push(prev);

    for &value in &values[1..] {
        prev = alpha * value + (1.0 - alpha) * prev;
        out.push(prev);
    }
    out
}

/// Rolling minimum over a trailing `window`.
pub fn rolling_min(values: &[f64], window: usize) -> Vec<Option<f64>> {
    rolling_extreme(values, window, |a, b| a.min(b))
}

/// Rolling maximum over a trailing `window`.
pub fn rolling_max(values: &[f64], window: usize) -> Vec<Option<f64>> {
    rolling_extreme(values, window, |a, b| a.max(b))
}

fn rolling_extreme(
    values: &[f64],
    window: usize,
    pick: impl Fn(f64, f64) -> f64,
) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if window == 0 {
        return out;
    }

    for i in (window - 1)..values.len() {
        let slice = &values[i + 1 - window..=i];
        if slice.iter().any(|v| !v.is_finite()) {
            continue;
        }
        let extreme = slice.iter().copied().fold(slice[0], &pick);
        out[i] = Some(extreme);
    }
    out
}
