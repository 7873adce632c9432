// Scoring defaults and fixed weights for the routing engine.

/// Latency factor applied when a chain has no fresh, successful latency
/// sample. Missing data is treated as moderately degraded, never as free.
pub const DEFAULT_LATENCY_FACTOR: f64 = 1.5;

/// Neutral score assumed for chains with no security rating or reliability
/// history. An unrated chain is unproven, not malicious.
pub const NEUTRAL_CHAIN_SCORE: f64 = 50.0;

/// Floor for a scored step's time so downstream math never sees zero.
pub const MIN_STEP_TIME_SECS: f64 = 1e-3;

// Step score weights: protocol profile dominates, endpoint chains share the rest.
pub const PROTOCOL_SCORE_WEIGHT: f64 = 0.6;
pub const CHAIN_SCORE_WEIGHT: f64 = 0.2;

// Balanced-criterion weights. Fixed by design; tests depend on exact values.
pub const BALANCED_SECURITY_WEIGHT: f64 = 0.30;
pub const BALANCED_RELIABILITY_WEIGHT: f64 = 0.20;
pub const BALANCED_COST_WEIGHT: f64 = 0.25;
pub const BALANCED_TIME_WEIGHT: f64 = 0.25;

// Risk tier thresholds, boundaries inclusive.
pub const LOW_RISK_MIN_SCORE: u8 = 80;
pub const MEDIUM_RISK_MIN_SCORE: u8 = 60;

// Time constants (in seconds)
pub const DEFAULT_SIGNAL_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_LATENCY_FRESHNESS_SECS: i64 = 300; // 5 minutes

/// Default reliability-history lookback handed to the provider.
pub const DEFAULT_RELIABILITY_WINDOW_MS: u64 = 24 * 60 * 60 * 1000; // 24h

/// Hop cap: one intermediate chain at most.
pub const MAX_SUPPORTED_HOPS: u8 = 2;
