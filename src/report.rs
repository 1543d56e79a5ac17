// =============================================================================
// Analysis Report — the engine's request/response envelope
// =============================================================================
//
// `AnalysisRequest` is the typed input contract: price bars per timeframe
// plus the optional external scores (fundamental ratios, scored headlines).
// `AnalysisReport` is the full output record: composite score, indicator
// snapshot, per-timeframe trends, risk profile and sentiment summary, stamped
// with a UUID and an ISO 8601 creation time.
//
// Reports are derived, never persisted; every request recomputes from fresh
// inputs.
// =============================================================================

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::analysis::{analyze_market, IndicatorSnapshot, MultiTimeframeView};
use crate::engine_config::EngineConfig;
use crate::fundamentals::{risk_profile, FundamentalMetrics, RiskProfile};
use crate::price_series::{PriceBar, PriceSeries};
use crate::scoring::{score, CompositeScore};
use crate::sentiment::{summarize, ScoredHeadline, SentimentSummary};
use crate::types::Timeframe;

/// Everything the engine needs for one instrument, in one place.
///
/// Bars must be oldest-first; weekly and monthly histories are optional and
/// only feed the per-timeframe trend classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub ticker: String,
    #[serde(default)]
    pub daily: Vec<PriceBar>,
    #[serde(default)]
    pub weekly: Vec<PriceBar>,
    #[serde(default)]
    pub monthly: Vec<PriceBar>,
    #[serde(default)]
    pub fundamentals: FundamentalMetrics,
    #[serde(default)]
    pub headlines: Vec<ScoredHeadline>,
}

/// Complete record of one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Unique identifier for this report (UUID v4).
    pub id: String,

    /// Upper-cased ticker the report pertains to.
    pub ticker: String,

    /// Latest daily close.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    /// Category scores, overall score, signal, verdict and rationale.
    pub composite: CompositeScore,

    /// Indicator values computed from the daily series.
    pub indicators: IndicatorSnapshot,

    /// Trend classification per timeframe.
    pub timeframes: MultiTimeframeView,

    /// Leverage flags and 52-week positioning.
    pub risk: RiskProfile,

    /// Aggregated headline sentiment.
    pub sentiment: SentimentSummary,

    /// ISO 8601 timestamp of when this report was created.
    pub created_at: String,
}

impl AnalysisReport {
    /// Run the full pipeline for one request.
    ///
    /// Returns `Ok(None)` when the daily series is empty (the explicit
    /// no-data marker) and an error only for a broken input contract such as
    /// out-of-order bars.
    pub fn generate(request: &AnalysisRequest, config: &EngineConfig) -> Result<Option<Self>> {
        let daily = PriceSeries::new(Timeframe::Daily, request.daily.clone())?;
        let weekly = PriceSeries::new(Timeframe::Weekly, request.weekly.clone())?;
        let monthly = PriceSeries::new(Timeframe::Monthly, request.monthly.clone())?;

        let Some(market) = analyze_market(&daily, Some(&weekly), Some(&monthly), config)
        else {
            debug!(ticker = %request.ticker, "no daily history; nothing to analyze");
            return Ok(None);
        };

        let sentiment = summarize(&request.headlines);
        let composite = score(
            &request.ticker,
            &market.snapshot,
            &request.fundamentals,
            &sentiment,
            config,
        );
        let risk = risk_profile(&daily, &request.fundamentals);

        info!(
            ticker = %request.ticker,
            overall = composite.overall_score,
            signal = %composite.signal,
            verdict = %composite.verdict,
            "analysis complete"
        );

        Ok(Some(Self {
            id: uuid::Uuid::new_v4().to_string(),
            ticker: request.ticker.to_uppercase(),
            price: Some(market.last_close),
            composite,
            indicators: market.snapshot,
            timeframes: market.timeframes,
            risk,
            sentiment,
            created_at: chrono::Utc::now().to_rfc3339(),
        }))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::price_series::test_support::bar;
    use crate::types::{Signal, Verdict};

    fn daily_bars(count: usize) -> Vec<PriceBar> {
        (0..count)
            .map(|i| {
                let c = 100.0 + (i as f64 * 0.17).sin() * 5.0;
                bar(i as i64, c, c + 1.0, c - 1.0, c)
            })
            .collect()
    }

    fn request() -> AnalysisRequest {
        AnalysisRequest {
            ticker: "reliance.ns".to_string(),
            daily: daily_bars(260),
            weekly: daily_bars(60),
            monthly: daily_bars(24),
            fundamentals: FundamentalMetrics {
                debt_to_equity: Some(0.4),
                roce_pct: Some(18.0),
                pe_ratio: Some(21.0),
                ..Default::default()
            },
            headlines: vec![ScoredHeadline {
                headline: "record quarterly profits".to_string(),
                polarity: 0.6,
            }],
        }
    }

    #[test]
    fn generate_produces_full_report() {
        let report = AnalysisReport::generate(&request(), &EngineConfig::default())
            .unwrap()
            .unwrap();

        assert_eq!(report.ticker, "RELIANCE.NS");
        assert!(!report.id.is_empty());
        assert!(report.price.is_some());
        assert!(report.indicators.rsi.is_some());
        assert!(report.composite.overall_score <= 100);
        assert!(report.composite.rationale.contains("RELIANCE.NS"));
    }

    #[test]
    fn empty_daily_series_is_no_data_not_an_error() {
        let mut req = request();
        req.daily.clear();
        let result = AnalysisReport::generate(&req, &EngineConfig::default()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn out_of_order_bars_are_a_contract_error() {
        let mut req = request();
        req.daily.swap(0, 1);
        assert!(AnalysisReport::generate(&req, &EngineConfig::default()).is_err());
    }

    #[test]
    fn scoring_never_fails_without_external_inputs() {
        let req = AnalysisRequest {
            ticker: "bare".to_string(),
            daily: daily_bars(30),
            weekly: Vec::new(),
            monthly: Vec::new(),
            fundamentals: FundamentalMetrics::default(),
            headlines: Vec::new(),
        };
        let report = AnalysisReport::generate(&req, &EngineConfig::default())
            .unwrap()
            .unwrap();
        assert_eq!(report.sentiment.average_polarity, 0.0);
        assert_eq!(report.composite.sentiment_score, 50);
        assert!(matches!(
            report.composite.signal,
            Signal::Buy | Signal::Hold | Signal::Sell | Signal::StrongBuy
        ));
    }

    #[test]
    fn report_serialization_omits_absent_fields() {
        let req = AnalysisRequest {
            ticker: "tiny".to_string(),
            daily: daily_bars(5),
            weekly: Vec::new(),
            monthly: Vec::new(),
            fundamentals: FundamentalMetrics::default(),
            headlines: Vec::new(),
        };
        let report = AnalysisReport::generate(&req, &EngineConfig::default())
            .unwrap()
            .unwrap();
        let json = serde_json::to_string(&report).unwrap();
        // Five bars leave every indicator unavailable; absent means absent.
        assert!(!json.contains("\"rsi\""));
        assert!(!json.contains("\"supertrend_signal\""));
        assert!(json.contains("\"timeframes\""));
        assert!(json.contains("\"N/A\""));
    }

    #[test]
    fn request_deserializes_with_minimal_fields() {
        let req: AnalysisRequest =
            serde_json::from_str(r#"{ "ticker": "TCS.NS" }"#).unwrap();
        assert_eq!(req.ticker, "TCS.NS");
        assert!(req.daily.is_empty());
        assert!(req.headlines.is_empty());
    }

    #[test]
    fn verdict_consistent_with_score() {
        let report = AnalysisReport::generate(&request(), &EngineConfig::default())
            .unwrap()
            .unwrap();
        let expect_treasure = report.composite.overall_score > 50;
        assert_eq!(
            report.composite.verdict == Verdict::Treasure,
            expect_treasure
        );
    }
}
