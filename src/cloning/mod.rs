// AI-voice (cloning) detection: three independent sub-scorers fused by
// fixed weights into one confidence and a risk tier.
//
// Each sub-scorer is a pure function returning a score in [0, 1] plus the
// indicators that fired, so every method is unit-testable in isolation and
// the fusion formula stays a single auditable expression.

pub mod heuristic;
pub mod pattern;
pub mod temporal;

use serde::Serialize;

use crate::audio::Waveform;
use crate::features::FeatureVector;

/// Fusion weights; must sum to 1.
pub const HEURISTIC_WEIGHT: f64 = 0.5;
pub const PATTERN_WEIGHT: f64 = 0.3;
pub const TEMPORAL_WEIGHT: f64 = 0.2;

/// Fused confidence above which a clip is flagged as AI-generated.
pub const DECISION_THRESHOLD: f64 = 0.65;

/// Fused confidence above which the risk tier becomes high.
pub const HIGH_RISK_THRESHOLD: f64 = 0.80;

/// One sub-scorer's output: a clamped score and the indicators that fired.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodScore {
    pub score: f64,
    pub indicators: Vec<&'static str>,
}

impl MethodScore {
    pub fn zero() -> Self {
        Self {
            score: 0.0,
            indicators: Vec::new(),
        }
    }
}

/// Coarse risk bucket derived from the fused confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Raw per-method scores carried in the result for auditability.
#[derive(Debug, Clone, Serialize)]
pub struct ComponentScores {
    pub heuristic: f64,
    pub pattern: f64,
    pub temporal: f64,
}

/// Outcome of AI-voice detection for one waveform.
#[derive(Debug, Clone, Serialize)]
pub struct VoiceCloningDetectionResult {
    pub is_ai_generated: bool,
    pub confidence_score: f64,
    pub detection_method: &'static str,
    pub risk_level: RiskLevel,
    pub component_scores: ComponentScores,
}

impl VoiceCloningDetectionResult {
    /// The documented fallback when feature extraction fails entirely.
    pub fn fallback() -> Self {
        Self {
            is_ai_generated: false,
            confidence_score: 0.0,
            detection_method: "error",
            risk_level: RiskLevel::Low,
            component_scores: ComponentScores {
                heuristic: 0.0,
                pattern: 0.0,
                temporal: 0.0,
            },
        }
    }
}

/// The single fusion expression: weighted sum, decision, risk tier.
pub(crate) fn fuse(heuristic: f64, pattern: f64, temporal: f64) -> (f64, bool, RiskLevel) {
    let confidence =
        heuristic * HEURISTIC_WEIGHT + pattern * PATTERN_WEIGHT + temporal * TEMPORAL_WEIGHT;
    let is_ai = confidence > DECISION_THRESHOLD;
    let risk = if confidence > HIGH_RISK_THRESHOLD {
        RiskLevel::High
    } else if confidence > DECISION_THRESHOLD {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };
    (confidence, is_ai, risk)
}

/// Run all three sub-scorers and fuse their results.
///
/// A degraded feature vector (extraction could not proceed) short-circuits to
/// the fallback result; individual sub-scorers degrade to 0 on their own.
pub fn detect(waveform: &Waveform, features: &FeatureVector) -> VoiceCloningDetectionResult {
    if features.degraded {
        tracing::warn!("Feature extraction degraded, returning fallback cloning result");
        return VoiceCloningDetectionResult::fallback();
    }

    let heuristic = heuristic::consistency_score(features);
    let pattern = pattern::pattern_score(waveform);
    let temporal = temporal::temporal_score(waveform);

    let (confidence, is_ai, risk) = fuse(heuristic.score, pattern.score, temporal.score);

    tracing::info!(
        "AI detection: {} (confidence {:.3}, risk {:?})",
        is_ai,
        confidence,
        risk
    );
    tracing::debug!(
        "Component scores - heuristic: {:.3} {:?}, pattern: {:.3} {:?}, temporal: {:.3} {:?}",
        heuristic.score,
        heuristic.indicators,
        pattern.score,
        pattern.indicators,
        temporal.score,
        temporal.indicators
    );

    VoiceCloningDetectionResult {
        is_ai_generated: is_ai,
        confidence_score: confidence,
        detection_method: "advanced_multi_method",
        risk_level: risk,
        component_scores: ComponentScores {
            heuristic: heuristic.score,
            pattern: pattern.score,
            temporal: temporal.score,
        },
    }
}
