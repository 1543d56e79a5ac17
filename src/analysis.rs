// =============================================================================
// Indicator Aggregator — assembles the per-request market view
// =============================================================================
//
// Runs the full indicator pipeline over the daily series (RSI, SMA set, MACD,
// Bollinger envelope, support/resistance, ATR, SuperTrend) and the timeframe
// classifier over each of the daily, weekly and monthly series independently.
//
// Failure policy:
//   - An empty daily series is the only terminal condition: the aggregator
//     returns `None` (an explicit no-data marker, not an error).
//   - Anything else degrades field-by-field: a short weekly series only turns
//     that timeframe's classification into `N/A`, a short daily series only
//     blanks the indicators that lack their look-back.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine_config::EngineConfig;
use crate::indicators::atr::{calculate_atr, ATR_PERIOD};
use crate::indicators::bollinger::{
    band_position, calculate_bollinger, resistance_level, support_level, BOLLINGER_PERIOD,
    SR_LONG_WINDOW, SR_SHORT_WINDOW,
};
use crate::indicators::rsi::current_rsi;
use crate::indicators::supertrend::calculate_supertrend;
use crate::indicators::trend::{
    macd_signal, sma, sma_trend, timeframe_trend, SMA_LONG, SMA_MEDIUM, SMA_SHORT,
};
use crate::price_series::PriceSeries;
use crate::types::{BandPosition, MacdSignal, Timeframe, TimeframeTrend, TrendDirection};

/// Point-in-time bundle of every indicator computed from the daily series.
///
/// Every field is optional: absent means the series was too short for that
/// indicator's look-back or the arithmetic was undefined, never NaN.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsi: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sma_20: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sma_50: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sma_200: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sma_trend: Option<TrendDirection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macd_signal: Option<MacdSignal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bb_upper: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bb_lower: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bb_position: Option<BandPosition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub support_30d: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resistance_30d: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub support_6m: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resistance_6m: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub atr_14: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supertrend_signal: Option<TrendDirection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supertrend_stop: Option<f64>,
}

/// Trend classification per timeframe, each derived from its own series.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MultiTimeframeView {
    pub daily: TimeframeTrend,
    pub weekly: TimeframeTrend,
    pub monthly: TimeframeTrend,
}

impl MultiTimeframeView {
    pub fn get(&self, timeframe: Timeframe) -> TimeframeTrend {
        match timeframe {
            Timeframe::Daily => self.daily,
            Timeframe::Weekly => self.weekly,
            Timeframe::Monthly => self.monthly,
        }
    }
}

/// Everything the scoring stage needs from the price history.
#[derive(Debug, Clone)]
pub struct MarketAnalysis {
    pub snapshot: IndicatorSnapshot,
    pub timeframes: MultiTimeframeView,
    pub last_close: f64,
}

/// Run the indicator pipeline over one instrument's price history.
///
/// Returns `None` only when the daily series is empty.
pub fn analyze_market(
    daily: &PriceSeries,
    weekly: Option<&PriceSeries>,
    monthly: Option<&PriceSeries>,
    config: &EngineConfig,
) -> Option<MarketAnalysis> {
    if daily.is_empty() {
        debug!("market analysis skipped: daily series is empty");
        return None;
    }

    let closes = daily.closes();
    let highs = daily.highs();
    let lows = daily.lows();
    let last_close = daily.last_close()?;

    let bands = calculate_bollinger(&closes, BOLLINGER_PERIOD, config.bollinger_width);
    let supertrend = calculate_supertrend(
        daily.bars(),
        config.supertrend_period,
        config.supertrend_multiplier,
    );

    let snapshot = IndicatorSnapshot {
        rsi: current_rsi(&closes),
        sma_20: sma(&closes, SMA_SHORT),
        sma_50: sma(&closes, SMA_MEDIUM),
        sma_200: sma(&closes, SMA_LONG),
        sma_trend: sma_trend(&closes),
        macd_signal: macd_signal(&closes),
        bb_upper: bands.as_ref().map(|b| b.upper),
        bb_lower: bands.as_ref().map(|b| b.lower),
        bb_position: bands.as_ref().map(|b| band_position(last_close, b)),
        support_30d: support_level(&lows, SR_SHORT_WINDOW),
        resistance_30d: resistance_level(&highs, SR_SHORT_WINDOW),
        support_6m: support_level(&lows, SR_LONG_WINDOW),
        resistance_6m: resistance_level(&highs, SR_LONG_WINDOW),
        atr_14: calculate_atr(daily.bars(), ATR_PERIOD),
        supertrend_signal: supertrend.as_ref().map(|s| s.signal),
        supertrend_stop: supertrend.as_ref().map(|s| s.stop_level),
    };

    let timeframes = MultiTimeframeView {
        daily: timeframe_trend(&closes),
        weekly: classify_optional(weekly),
        monthly: classify_optional(monthly),
    };

    debug!(
        bars = daily.len(),
        rsi = ?snapshot.rsi,
        sma_trend = ?snapshot.sma_trend,
        supertrend = ?snapshot.supertrend_signal,
        "market analysis complete"
    );

    Some(MarketAnalysis {
        snapshot,
        timeframes,
        last_close,
    })
}

/// Classify a timeframe that may be missing entirely.
fn classify_optional(series: Option<&PriceSeries>) -> TimeframeTrend {
    match series {
        Some(s) if !s.is_empty() => timeframe_trend(&s.closes()),
        _ => TimeframeTrend::NotAvailable,
    }
}
