// =============================================================================
// Composite Scoring Engine — category scores, signal and rationale
// =============================================================================
//
// Deterministic, stateless mapping from (indicator snapshot, fundamental
// metrics, sentiment summary) to a CompositeScore. The stage never fails:
// every missing input degrades its category to the configured baseline, so a
// request with nothing but headlines still scores.
//
//   technical   = base 40, +20 for a neutral RSI, +20 for a Bullish SuperTrend
//   fundamental = base 50, +20 for debt-to-equity < 1, +20 for ROCE > 15 %
//   sentiment   = round((avg_polarity + 1) * 50)
//   overall     = round(0.4*tech + 0.4*fund + 0.2*sent)
//
// All four scores are clamped to [0, 100]. Signal cut points come from the
// configured `ThresholdTable` (canonical 70/50/40, legacy 80/60/40).
// =============================================================================

use serde::{Deserialize, Serialize};

use crate::analysis::IndicatorSnapshot;
use crate::engine_config::{EngineConfig, ThresholdTable};
use crate::fundamentals::FundamentalMetrics;
use crate::sentiment::SentimentSummary;
use crate::types::{Signal, TrendDirection, Verdict};

/// Final composite verdict for one instrument. Integer scores on 0–100.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositeScore {
    pub technical_score: u32,
    pub fundamental_score: u32,
    pub sentiment_score: u32,
    pub overall_score: u32,
    pub signal: Signal,
    pub verdict: Verdict,
    pub rationale: String,
}

/// Score one instrument from its indicator snapshot and external inputs.
pub fn score(
    ticker: &str,
    snapshot: &IndicatorSnapshot,
    fundamentals: &FundamentalMetrics,
    sentiment: &SentimentSummary,
    config: &EngineConfig,
) -> CompositeScore {
    let technical_score = technical_score(snapshot, config);
    let fundamental_score = fundamental_score(fundamentals, config);
    let sentiment_score = sentiment_score(sentiment.average_polarity);

    let overall = config.technical_weight * technical_score as f64
        + config.fundamental_weight * fundamental_score as f64
        + config.sentiment_weight * sentiment_score as f64;
    let overall_score = overall.round().clamp(0.0, 100.0) as u32;

    let (signal, verdict) = classify_signal(overall_score, config.threshold_table);

    let rationale = build_rationale(
        ticker,
        snapshot,
        fundamentals,
        sentiment_score,
        verdict,
        config,
    );

    CompositeScore {
        technical_score,
        fundamental_score,
        sentiment_score,
        overall_score,
        signal,
        verdict,
        rationale,
    }
}

/// Technical category: baseline plus RSI-neutrality and SuperTrend bonuses.
fn technical_score(snapshot: &IndicatorSnapshot, config: &EngineConfig) -> u32 {
    let mut score = config.technical_base;

    if let Some(rsi) = snapshot.rsi {
        if rsi >= config.rsi_neutral_low && rsi <= config.rsi_neutral_high {
            score += config.rsi_neutral_bonus;
        }
    }
    if snapshot.supertrend_signal == Some(TrendDirection::Bullish) {
        score += config.supertrend_bonus;
    }

    score.min(100)
}

/// Fundamental category: baseline plus leverage and profitability bonuses.
fn fundamental_score(metrics: &FundamentalMetrics, config: &EngineConfig) -> u32 {
    let mut score = config.fundamental_base;

    if let Some(de) = metrics.debt_to_equity {
        if de < config.low_debt_ratio {
            score += config.low_debt_bonus;
        }
    }
    if let Some(roce) = metrics.roce_pct {
        if roce > config.roce_threshold_pct {
            score += config.roce_bonus;
        }
    }

    score.min(100)
}

/// Linear rescale of average polarity from [-1, 1] to [0, 100].
///
/// Out-of-range polarities are absorbed by the clamp rather than rejected.
fn sentiment_score(average_polarity: f64) -> u32 {
    if !average_polarity.is_finite() {
        return 50;
    }
    ((average_polarity + 1.0) * 50.0).round().clamp(0.0, 100.0) as u32
}

/// Map the overall score onto a signal/verdict pair. Highest cut first; a
/// score must strictly exceed a cut to claim it.
pub fn classify_signal(overall_score: u32, table: ThresholdTable) -> (Signal, Verdict) {
    let (strong_buy, buy, hold) = table.cut_points();
    if overall_score > strong_buy {
        (Signal::StrongBuy, Verdict::Treasure)
    } else if overall_score > buy {
        (Signal::Buy, Verdict::Treasure)
    } else if overall_score > hold {
        (Signal::Hold, Verdict::Trap)
    } else {
        (Signal::Sell, Verdict::Trap)
    }
}

/// Coarse momentum label from the RSI reading, used only in the rationale.
fn momentum_label(rsi: Option<f64>, config: &EngineConfig) -> &'static str {
    match rsi {
        Some(v) if v > config.rsi_neutral_high => "Overbought",
        Some(v) if v < config.rsi_neutral_low => "Oversold",
        Some(_) => "Bullish",
        None => "Neutral",
    }
}

/// Templated analyst-style sentence. Reproducible from the same inputs: no
/// randomness, no wall clock.
fn build_rationale(
    ticker: &str,
    snapshot: &IndicatorSnapshot,
    fundamentals: &FundamentalMetrics,
    sentiment_score: u32,
    verdict: Verdict,
    config: &EngineConfig,
) -> String {
    let trend = momentum_label(snapshot.rsi, config);
    let rsi_text = snapshot
        .rsi
        .map(|v| format!("{v:.2}"))
        .unwrap_or_else(|| "N/A".to_string());
    let de_text = fundamentals
        .debt_to_equity
        .map(|v| format!("{v:.2}"))
        .unwrap_or_else(|| "N/A".to_string());

    let mut rationale = format!(
        "Based on our analysis, {} currently shows a {} technical trend with an RSI of {}. ",
        ticker.to_uppercase(),
        trend,
        rsi_text
    );
    rationale.push_str(&format!(
        "Fundamentally, the company carries a Debt-to-Equity ratio of {de_text}, "
    ));
    if fundamentals
        .debt_to_equity
        .map(|de| de < config.low_debt_ratio)
        .unwrap_or(false)
    {
        rationale.push_str("indicating a healthy balance sheet. ");
    } else {
        rationale.push_str("which warrants caution regarding leverage. ");
    }
    if let Some(pe) = fundamentals.pe_ratio {
        rationale.push_str(&format!(
            "The P/E ratio stands at {pe:.2}, reflecting current market valuation. "
        ));
    }
    rationale.push_str(&format!(
        "Combining these factors with a sentiment score of {sentiment_score}, \
         our verdict is that this stock is a {verdict}."
    ));

    rationale
}
