// =============================================================================
// Sentiment aggregation — average polarity over scored headlines
// =============================================================================
//
// Headline polarity scoring is an upstream concern; each headline arrives
// with a polarity already attached, in [-1, 1]. This module only aggregates:
// average polarity (rounded to 2 decimals), a coarse label, and the most
// recent headlines retained for the report.

use serde::{Deserialize, Serialize};

/// Polarity above which the aggregate reads Bullish.
const BULLISH_POLARITY: f64 = 0.1;
/// Polarity below which the aggregate reads Bearish.
const BEARISH_POLARITY: f64 = -0.1;

/// Headlines carried into the report, newest first.
pub const MAX_REPORT_HEADLINES: usize = 5;

/// One headline with its externally computed polarity in [-1, 1].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredHeadline {
    pub headline: String,
    pub polarity: f64,
}

/// Coarse aggregate sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentLabel {
    Bullish,
    Bearish,
    Neutral,
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bullish => write!(f, "Bullish"),
            Self::Bearish => write!(f, "Bearish"),
            Self::Neutral => write!(f, "Neutral"),
        }
    }
}

/// Aggregated view over all scored headlines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentSummary {
    /// Mean polarity over every input headline, rounded to 2 decimals.
    pub average_polarity: f64,
    pub label: SentimentLabel,
    pub headlines: Vec<ScoredHeadline>,
}

impl Default for SentimentSummary {
    /// The neutral baseline used when no headlines are available.
    fn default() -> Self {
        Self {
            average_polarity: 0.0,
            label: SentimentLabel::Neutral,
            headlines: Vec::new(),
        }
    }
}

/// Aggregate scored headlines into a summary.
///
/// An empty input degrades to the neutral baseline (average 0.0) rather than
/// failing; non-finite polarities are ignored.
pub fn summarize(headlines: &[ScoredHeadline]) -> SentimentSummary {
    let finite: Vec<&ScoredHeadline> = headlines
        .iter()
        .filter(|h| h.polarity.is_finite())
        .collect();
    if finite.is_empty() {
        return SentimentSummary::default();
    }

    let average = finite.iter().map(|h| h.polarity).sum::<f64>() / finite.len() as f64;
    let average = (average * 100.0).round() / 100.0;

    let label = if average > BULLISH_POLARITY {
        SentimentLabel::Bullish
    } else if average < BEARISH_POLARITY {
        SentimentLabel::Bearish
    } else {
        SentimentLabel::Neutral
    };

    SentimentSummary {
        average_polarity: average,
        label,
        headlines: finite
            .into_iter()
            .take(MAX_REPORT_HEADLINES)
            .cloned()
            .collect(),
    }
}
