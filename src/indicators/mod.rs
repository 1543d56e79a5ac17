// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations of the core technical indicators used
// by the scoring engine.  Every public function returns `Option<T>` (or an
// aligned vector of options) so callers are forced to handle insufficient-data
// and numerical-edge-case scenarios.

pub mod atr;
pub mod bollinger;
pub mod rsi;
pub mod supertrend;
pub mod trend;
