// =============================================================================
// SuperTrend — ATR band-ratchet trend follower
// =============================================================================
//
// SuperTrend places a volatility stop on the far side of price and ratchets
// it toward price to avoid early flips.
//
//   midpoint  = (high + low) / 2
//   raw upper = midpoint + multiplier * ATR(period)
//   raw lower = midpoint - multiplier * ATR(period)
//
// The final bands carry state from bar to bar. For each bar after the seed:
//   - close above the prior final upper band  => trend is Up
//   - close below the prior final lower band  => trend is Down
//   - otherwise the trend is carried over, and the trailing band may only
//     ratchet toward price: while Up the final lower band never moves down,
//     while Down the final upper band never moves up.
//
// The recurrence depends on the *ratcheted* band of the previous step, not
// the previous raw band, so it must run left-to-right over the whole window.
// It is expressed here as a fold threading an explicit `BandState` rather
// than loop-mutated band variables.
//
// Defaults: period 10, multiplier 3.
// =============================================================================

use crate::indicators::atr::atr_series;
use crate::price_series::PriceBar;
use crate::types::TrendDirection;

/// Standard SuperTrend ATR look-back.
pub const SUPERTREND_PERIOD: usize = 10;
/// Standard SuperTrend band multiplier.
pub const SUPERTREND_MULTIPLIER: f64 = 3.0;

/// Tagged trend direction carried through the recurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn signal(self) -> TrendDirection {
        match self {
            Self::Up => TrendDirection::Bullish,
            Self::Down => TrendDirection::Bearish,
        }
    }
}

/// Ratcheted band state at one bar.
#[derive(Debug, Clone, Copy)]
pub struct BandState {
    pub direction: Direction,
    pub upper: f64,
    pub lower: f64,
}

impl BandState {
    /// The band price is trailing: lower while Up, upper while Down.
    pub fn active_band(&self) -> f64 {
        match self.direction {
            Direction::Up => self.lower,
            Direction::Down => self.upper,
        }
    }
}

/// Latest SuperTrend reading.
#[derive(Debug, Clone, Copy)]
pub struct SuperTrend {
    pub signal: TrendDirection,
    /// Active band for the current direction, rounded to 2 decimals.
    pub stop_level: f64,
}

/// Compute the per-bar SuperTrend state, aligned with `bars`.
///
/// Indices before the first defined ATR (bar `period`) are `None`. The seed
/// bar starts Up with the raw bands; every later bar folds the previous
/// state forward.
pub fn supertrend_series(
    bars: &[PriceBar],
    period: usize,
    multiplier: f64,
) -> Vec<Option<BandState>> {
    let mut out = vec![None; bars.len()];
    if period == 0 || bars.len() < period + 1 {
        return out;
    }

    let atr = atr_series(bars, period);
    let raw_bands = |i: usize| -> Option<(f64, f64)> {
        let midpoint = (bars[i].high + bars[i].low) / 2.0;
        let span = multiplier * atr[i]?;
        let upper = midpoint + span;
        let lower = midpoint - span;
        (upper.is_finite() && lower.is_finite()).then_some((upper, lower))
    };

    let start = period;
    let Some((seed_upper, seed_lower)) = raw_bands(start) else {
        return out;
    };
    let seed = BandState {
        direction: Direction::Up,
        upper: seed_upper,
        lower: seed_lower,
    };
    out[start] = Some(seed);

    let _ = (start + 1..bars.len()).fold(seed, |prev, i| {
        let Some((raw_upper, raw_lower)) = raw_bands(i) else {
            // Undefined ATR mid-series: carry the prior state unchanged.
            out[i] = Some(prev);
            return prev;
        };

        let close = bars[i].close;
        let mut upper = raw_upper;
        let mut lower = raw_lower;

        let direction = if close > prev.upper {
            Direction::Up
        } else if close < prev.lower {
            Direction::Down
        } else {
            // No band break: carry the trend and ratchet the trailing band.
            match prev.direction {
                Direction::Up => {
                    if lower < prev.lower {
                        lower = prev.lower;
                    }
                }
                Direction::Down => {
                    if upper > prev.upper {
                        upper = prev.upper;
                    }
                }
            }
            prev.direction
        };

        let state = BandState {
            direction,
            upper,
            lower,
        };
        out[i] = Some(state);
        state
    });

    out
}

/// The latest SuperTrend signal and stop level.
///
/// Returns `None` when fewer than `period + 1` bars exist.
pub fn calculate_supertrend(
    bars: &[PriceBar],
    period: usize,
    multiplier: f64,
) -> Option<SuperTrend> {
    let state = supertrend_series(bars, period, multiplier)
        .last()
        .copied()
        .flatten()?;
    Some(SuperTrend {
        signal: state.direction.signal(),
        stop_level: round2(state.active_band()),
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
