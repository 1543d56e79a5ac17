// =============================================================================
// Alpha Engine — technical indicator & composite scoring library
// =============================================================================
//
// Pure computation over already-fetched price history: indicator pipeline,
// multi-timeframe trend classification and composite scoring. The engine
// performs no I/O and holds no cross-request state; data retrieval, transport
// and headline polarity scoring are upstream concerns.

pub mod analysis;
pub mod engine_config;
pub mod fundamentals;
pub mod indicators;
pub mod price_series;
pub mod report;
pub mod scoring;
pub mod sentiment;
pub mod series;
pub mod types;

pub use analysis::{analyze_market, IndicatorSnapshot, MarketAnalysis, MultiTimeframeView};
pub use engine_config::{EngineConfig, ThresholdTable};
pub use fundamentals::{risk_profile, FundamentalMetrics, RiskProfile};
pub use price_series::{PriceBar, PriceSeries};
pub use report::{AnalysisReport, AnalysisRequest};
pub use scoring::{score, CompositeScore};
pub use sentiment::{summarize, ScoredHeadline, SentimentSummary};
pub use types::{
    BandPosition, MacdSignal, Signal, Timeframe, TimeframeTrend, TrendDirection, Verdict,
};
