// Language scoring: rule banks over five aggregate acoustic features.
//
// Each supported language has a bank of range predicates with fixed weights;
// the highest accumulated score wins. English predicates are deliberately the
// widest and heaviest so it acts as the default basin, and any winning score
// below the confident threshold is forced to English outright.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::features::FeatureVector;

/// Language forced whenever no bank scores confidently.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Minimum winning score for a result to keep its detected language.
pub const CONFIDENT_SCORE: u32 = 2;

/// A supported language: ISO 639-1 code and display name.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
}

/// The static supported-language table.
pub const SUPPORTED_LANGUAGES: [Language; 4] = [
    Language {
        code: "en",
        name: "English",
    },
    Language {
        code: "hi",
        name: "Hindi",
    },
    Language {
        code: "kn",
        name: "Kannada",
    },
    Language {
        code: "te",
        name: "Telugu",
    },
];

/// Display name for a language code, if supported.
pub fn language_name(code: &str) -> Option<&'static str> {
    SUPPORTED_LANGUAGES
        .iter()
        .find(|l| l.code == code)
        .map(|l| l.name)
}

/// Open range predicate; both bounds exclusive.
struct Range {
    lo: f64,
    hi: f64,
}

impl Range {
    fn contains(&self, v: f64) -> bool {
        self.lo < v && v < self.hi
    }
}

/// Per-language predicate bank. The spectral predicate requires centroid and
/// roll-off to land in range simultaneously.
struct LanguageBank {
    code: &'static str,
    centroid: Range,
    rolloff: Range,
    spectral_weight: u32,
    zcr: Range,
    zcr_weight: u32,
    bandwidth: Range,
    bandwidth_weight: u32,
    mfcc_std: Range,
    mfcc_weight: u32,
}

/// Measured acoustic tendencies per language. Bank order doubles as the
/// tie-break priority: the first strictly-maximal score wins, with English
/// last so it only wins ties through the below-threshold forcing rule.
const BANKS: [LanguageBank; 4] = [
    LanguageBank {
        code: "kn",
        centroid: Range {
            lo: 1100.0,
            hi: 1900.0,
        },
        rolloff: Range {
            lo: 1800.0,
            hi: 3500.0,
        },
        spectral_weight: 3,
        zcr: Range { lo: 0.02, hi: 0.11 },
        zcr_weight: 2,
        bandwidth: Range {
            lo: 800.0,
            hi: 1400.0,
        },
        bandwidth_weight: 2,
        mfcc_std: Range { lo: 8.0, hi: 18.0 },
        mfcc_weight: 1,
    },
    LanguageBank {
        code: "te",
        centroid: Range {
            lo: 1500.0,
            hi: 2200.0,
        },
        rolloff: Range {
            lo: 3000.0,
            hi: 4500.0,
        },
        spectral_weight: 3,
        zcr: Range { lo: 0.05, hi: 0.14 },
        zcr_weight: 2,
        bandwidth: Range {
            lo: 1000.0,
            hi: 1600.0,
        },
        bandwidth_weight: 2,
        mfcc_std: Range { lo: 10.0, hi: 20.0 },
        mfcc_weight: 1,
    },
    LanguageBank {
        code: "hi",
        centroid: Range {
            lo: 1300.0,
            hi: 2000.0,
        },
        rolloff: Range {
            lo: 2200.0,
            hi: 4000.0,
        },
        spectral_weight: 3,
        zcr: Range { lo: 0.04, hi: 0.13 },
        zcr_weight: 2,
        bandwidth: Range {
            lo: 900.0,
            hi: 1500.0,
        },
        bandwidth_weight: 2,
        mfcc_std: Range { lo: 9.0, hi: 19.0 },
        mfcc_weight: 1,
    },
    LanguageBank {
        code: "en",
        centroid: Range {
            lo: 1200.0,
            hi: 4000.0,
        },
        rolloff: Range {
            lo: 2000.0,
            hi: 7000.0,
        },
        spectral_weight: 4,
        zcr: Range { lo: 0.02, hi: 0.25 },
        zcr_weight: 3,
        bandwidth: Range {
            lo: 900.0,
            hi: 2200.0,
        },
        bandwidth_weight: 2,
        mfcc_std: Range { lo: 10.0, hi: 35.0 },
        mfcc_weight: 2,
    },
];

/// Raw inputs to the language snapshot attached for diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct DetectionFeatures {
    pub spectral_centroid: f64,
    pub spectral_rolloff: f64,
    pub spectral_bandwidth: f64,
    pub zero_crossing_rate: f64,
    pub mfcc_std: f64,
    pub language_scores: BTreeMap<&'static str, u32>,
}

/// Outcome of language scoring for one waveform.
#[derive(Debug, Clone, Serialize)]
pub struct LanguageDetectionResult {
    pub detected_language: String,
    pub confidence: f64,
    pub language_name: String,
    pub language_code: String,
    /// Empty until a speech-to-text stage is wired in.
    pub transcription: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detection_features: Option<DetectionFeatures>,
}

impl LanguageDetectionResult {
    fn for_code(code: &str, confidence: f64) -> Self {
        Self {
            detected_language: code.to_string(),
            confidence,
            language_name: language_name(code).unwrap_or("Unknown").to_string(),
            language_code: code.to_string(),
            transcription: String::new(),
            detection_features: None,
        }
    }

    /// The documented hard-failure fallback: English at lowest confidence.
    pub fn fallback() -> Self {
        Self::for_code(DEFAULT_LANGUAGE, 0.10)
    }
}

/// Accumulate each language's score in bank order.
pub(crate) fn score_table(
    centroid: f64,
    rolloff: f64,
    bandwidth: f64,
    zcr: f64,
    mfcc_std: f64,
) -> Vec<(&'static str, u32)> {
    BANKS
        .iter()
        .map(|bank| {
            let mut score = 0;
            if bank.centroid.contains(centroid) && bank.rolloff.contains(rolloff) {
                score += bank.spectral_weight;
            }
            if bank.zcr.contains(zcr) {
                score += bank.zcr_weight;
            }
            if bank.bandwidth.contains(bandwidth) {
                score += bank.bandwidth_weight;
            }
            if bank.mfcc_std.contains(mfcc_std) {
                score += bank.mfcc_weight;
            }
            (bank.code, score)
        })
        .collect()
}

/// Step-function mapping from a winning score to a calibrated confidence.
pub(crate) fn confidence_for_score(score: u32) -> f64 {
    if score >= 6 {
        0.85
    } else if score >= 4 {
        0.70
    } else if score >= 2 {
        0.55
    } else {
        0.40
    }
}

/// Score a feature vector against every language bank.
pub fn detect_language(features: &FeatureVector, include_features: bool) -> LanguageDetectionResult {
    let centroid = features.spectral_centroid.mean;
    let rolloff = features.spectral_rolloff.mean;
    let bandwidth = features.spectral_bandwidth.mean;
    let zcr = features.zero_crossing_rate.mean;
    let mfcc_std = features.mfcc13_std;

    let scores = score_table(centroid, rolloff, bandwidth, zcr, mfcc_std);
    let (mut code, best) = scores
        .iter()
        .fold(("en", 0u32), |(wc, ws), &(c, s)| {
            if s > ws {
                (c, s)
            } else {
                (wc, ws)
            }
        });

    let confidence = confidence_for_score(best);
    if best < CONFIDENT_SCORE {
        code = DEFAULT_LANGUAGE;
    }

    tracing::debug!("Language scores: {:?}", scores);
    tracing::info!("Detected language {} (score {}, confidence {})", code, best, confidence);

    let mut result = LanguageDetectionResult::for_code(code, confidence);
    if include_features {
        result.detection_features = Some(DetectionFeatures {
            spectral_centroid: centroid,
            spectral_rolloff: rolloff,
            spectral_bandwidth: bandwidth,
            zero_crossing_rate: zcr,
            mfcc_std,
            language_scores: scores.into_iter().collect(),
        });
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::stats::Summary;

    fn vector(centroid: f64, rolloff: f64, bandwidth: f64, zcr: f64, mfcc_std: f64) -> FeatureVector {
        let mut fv = FeatureVector::zero();
        fv.degraded = false;
        fv.spectral_centroid = Summary {
            mean: centroid,
            ..Summary::ZERO
        };
        fv.spectral_rolloff = Summary {
            mean: rolloff,
            ..Summary::ZERO
        };
        fv.spectral_bandwidth = Summary {
            mean: bandwidth,
            ..Summary::ZERO
        };
        fv.zero_crossing_rate = Summary {
            mean: zcr,
            ..Summary::ZERO
        };
        fv.mfcc13_std = mfcc_std;
        fv
    }

    #[test]
    fn test_confidence_step_function_exact() {
        assert_eq!(confidence_for_score(0), 0.40);
        assert_eq!(confidence_for_score(1), 0.40);
        assert_eq!(confidence_for_score(2), 0.55);
        assert_eq!(confidence_for_score(3), 0.55);
        assert_eq!(confidence_for_score(4), 0.70);
        assert_eq!(confidence_for_score(5), 0.70);
        assert_eq!(confidence_for_score(6), 0.85);
        assert_eq!(confidence_for_score(11), 0.85);
    }

    #[test]
    fn test_kannada_profile_scores_high() {
        // In kn's centroid/rolloff/bandwidth/mfcc ranges but outside
        // te/hi/en spectral ranges.
        let fv = vector(1150.0, 1900.0, 850.0, 0.03, 8.5);
        let result = detect_language(&fv, true);
        assert_eq!(result.detected_language, "kn");
        assert_eq!(result.language_name, "Kannada");
        assert_eq!(result.confidence, 0.85);

        let snapshot = result.detection_features.unwrap();
        assert_eq!(snapshot.language_scores["kn"], 8);
        assert_eq!(snapshot.language_scores["en"], 3);
    }

    #[test]
    fn test_english_wide_basin() {
        let fv = vector(3000.0, 5000.0, 2000.0, 0.2, 30.0);
        let result = detect_language(&fv, false);
        assert_eq!(result.detected_language, "en");
        // 4 + 3 + 2 + 2 = 11.
        assert_eq!(result.confidence, 0.85);
        assert!(result.detection_features.is_none());
    }

    #[test]
    fn test_out_of_range_forces_default() {
        let fv = vector(500.0, 1000.0, 5000.0, 0.5, 100.0);
        let result = detect_language(&fv, true);
        assert_eq!(result.detected_language, "en");
        assert_eq!(result.confidence, 0.40);
        let scores = result.detection_features.unwrap().language_scores;
        assert!(scores.values().all(|&s| s == 0));
    }

    #[test]
    fn test_tie_breaks_in_bank_order() {
        // Only the bandwidth predicate fires, and every bank's bandwidth
        // range covers 1050, so all four tie at 2 and bank order decides.
        let fv = vector(100.0, 100.0, 1050.0, 0.5, 50.0);
        let result = detect_language(&fv, true);
        assert_eq!(result.detected_language, "kn");
        assert_eq!(result.confidence, 0.55);
        let scores = result.detection_features.unwrap().language_scores;
        assert_eq!(scores["kn"], 2);
        assert_eq!(scores["te"], 2);
        assert_eq!(scores["hi"], 2);
        assert_eq!(scores["en"], 2);
    }

    #[test]
    fn test_zero_vector_falls_back_at_040() {
        let result = detect_language(&FeatureVector::zero(), false);
        assert_eq!(result.detected_language, "en");
        assert_eq!(result.confidence, 0.40);
        assert!(result.transcription.is_empty());
    }

    #[test]
    fn test_hard_fallback_is_low_confidence_english() {
        let result = LanguageDetectionResult::fallback();
        assert_eq!(result.detected_language, "en");
        assert_eq!(result.language_code, "en");
        assert_eq!(result.language_name, "English");
        assert_eq!(result.confidence, 0.10);
    }

    #[test]
    fn test_supported_table_is_exposed() {
        assert_eq!(SUPPORTED_LANGUAGES.len(), 4);
        assert_eq!(language_name("te"), Some("Telugu"));
        assert_eq!(language_name("fr"), None);
    }
}
