// =============================================================================
// Engine Configuration — tunable scoring and indicator settings
// =============================================================================
//
// Central configuration hub for the Alpha scoring engine.  Every tunable
// parameter lives here so that deployments can adjust scoring behavior
// without a rebuild.
//
// Persistence uses an atomic tmp + rename pattern to prevent corruption on
// crash.  All fields carry `#[serde(default)]` so that adding new fields
// never breaks loading an older config file.
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

// =============================================================================
// Signal threshold tables
// =============================================================================

/// Which overall-score cut points map scores onto signals.
///
/// `Canonical` is the current 70/50/40 table; `Legacy` keeps the older
/// 80/60/40 table alive for deployments that still depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThresholdTable {
    Canonical,
    Legacy,
}

impl ThresholdTable {
    /// (strong_buy, buy, hold) lower bounds; a score must strictly exceed a
    /// bound to claim its bucket, highest bucket first.
    pub fn cut_points(self) -> (u32, u32, u32) {
        match self {
            Self::Canonical => (70, 50, 40),
            Self::Legacy => (80, 60, 40),
        }
    }
}

impl Default for ThresholdTable {
    fn default() -> Self {
        Self::Canonical
    }
}

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_technical_base() -> u32 {
    40
}

fn default_rsi_neutral_bonus() -> u32 {
    20
}

fn default_supertrend_bonus() -> u32 {
    20
}

fn default_fundamental_base() -> u32 {
    50
}

fn default_low_debt_bonus() -> u32 {
    20
}

fn default_roce_bonus() -> u32 {
    20
}

fn default_technical_weight() -> f64 {
    0.4
}

fn default_fundamental_weight() -> f64 {
    0.4
}

fn default_sentiment_weight() -> f64 {
    0.2
}

fn default_rsi_neutral_low() -> f64 {
    40.0
}

fn default_rsi_neutral_high() -> f64 {
    60.0
}

fn default_low_debt_ratio() -> f64 {
    1.0
}

fn default_roce_threshold_pct() -> f64 {
    15.0
}

fn default_bollinger_width() -> f64 {
    2.0
}

fn default_supertrend_period() -> usize {
    10
}

fn default_supertrend_multiplier() -> f64 {
    3.0
}

// =============================================================================
// EngineConfig
// =============================================================================

/// Top-level configuration for the scoring engine.
///
/// Every field has a serde default so that older JSON files missing new
/// fields will still deserialise correctly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    // --- Signal classification ----------------------------------------------

    /// Overall-score cut points used for signal/verdict classification.
    #[serde(default)]
    pub threshold_table: ThresholdTable,

    // --- Technical score ------------------------------------------------------

    /// Baseline technical score before bonuses.
    #[serde(default = "default_technical_base")]
    pub technical_base: u32,

    /// Bonus when RSI sits inside the neutral band.
    #[serde(default = "default_rsi_neutral_bonus")]
    pub rsi_neutral_bonus: u32,

    /// Bonus when the SuperTrend stop reads Bullish.
    #[serde(default = "default_supertrend_bonus")]
    pub supertrend_bonus: u32,

    /// Lower edge of the neutral RSI band (inclusive).
    #[serde(default = "default_rsi_neutral_low")]
    pub rsi_neutral_low: f64,

    /// Upper edge of the neutral RSI band (inclusive).
    #[serde(default = "default_rsi_neutral_high")]
    pub rsi_neutral_high: f64,

    // --- Fundamental score ----------------------------------------------------

    /// Baseline fundamental score before bonuses.
    #[serde(default = "default_fundamental_base")]
    pub fundamental_base: u32,

    /// Bonus when debt-to-equity is below `low_debt_ratio`.
    #[serde(default = "default_low_debt_bonus")]
    pub low_debt_bonus: u32,

    /// Bonus when ROCE exceeds `roce_threshold_pct`.
    #[serde(default = "default_roce_bonus")]
    pub roce_bonus: u32,

    /// Debt-to-equity below this ratio is rewarded (plain ratio scale).
    #[serde(default = "default_low_debt_ratio")]
    pub low_debt_ratio: f64,

    /// ROCE above this percentage is rewarded.
    #[serde(default = "default_roce_threshold_pct")]
    pub roce_threshold_pct: f64,

    // --- Category weights -----------------------------------------------------

    #[serde(default = "default_technical_weight")]
    pub technical_weight: f64,

    #[serde(default = "default_fundamental_weight")]
    pub fundamental_weight: f64,

    #[serde(default = "default_sentiment_weight")]
    pub sentiment_weight: f64,

    // --- Indicator parameters -------------------------------------------------

    /// Bollinger band width in standard deviations.
    #[serde(default = "default_bollinger_width")]
    pub bollinger_width: f64,

    /// SuperTrend ATR look-back.
    #[serde(default = "default_supertrend_period")]
    pub supertrend_period: usize,

    /// SuperTrend band multiplier.
    #[serde(default = "default_supertrend_multiplier")]
    pub supertrend_multiplier: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            threshold_table: ThresholdTable::Canonical,
            technical_base: default_technical_base(),
            rsi_neutral_bonus: default_rsi_neutral_bonus(),
            supertrend_bonus: default_supertrend_bonus(),
            rsi_neutral_low: default_rsi_neutral_low(),
            rsi_neutral_high: default_rsi_neutral_high(),
            fundamental_base: default_fundamental_base(),
            low_debt_bonus: default_low_debt_bonus(),
            roce_bonus: default_roce_bonus(),
            low_debt_ratio: default_low_debt_ratio(),
            roce_threshold_pct: default_roce_threshold_pct(),
            technical_weight: default_technical_weight(),
            fundamental_weight: default_fundamental_weight(),
            sentiment_weight: default_sentiment_weight(),
            bollinger_width: default_bollinger_width(),
            supertrend_period: default_supertrend_period(),
            supertrend_multiplier: default_supertrend_multiplier(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist, returns an error so the caller can fall
    /// back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read engine config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse engine config from {}", path.display()))?;

        info!(
            path = %path.display(),
            threshold_table = ?config.threshold_table,
            "engine config loaded"
        );

        Ok(config)
    }

    /// Persist the current configuration to `path` using an atomic write
    /// (write to `.tmp`, then rename).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content = serde_json::to_string_pretty(self)
            .context("failed to serialise engine config to JSON")?;

        let tmp_path = path.with_extension("json.tmp");

        std::fs::write(&tmp_path, &content)
            .with_context(|| format!("failed to write tmp config to {}", tmp_path.display()))?;

        std::fs::rename(&tmp_path, path)
            .with_context(|| format!("failed to rename tmp config to {}", path.display()))?;

        info!(path = %path.display(), "engine config saved (atomic)");
        Ok(())
    }
}
