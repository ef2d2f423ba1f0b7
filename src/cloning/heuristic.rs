// Statistical-consistency heuristic: natural voices drift, synthesized
// voices hold their spectral and temporal statistics unnaturally steady.
//
// Every feature's standard deviation is bucketed into consistency tiers with
// fixed increments, a "too-perfect" count rewards several features tripping
// permissive limits at once, and two multi-feature signature combinations add
// fixed bonuses. The raw additive score is normalized by a fixed constant.

use crate::cloning::MethodScore;
use crate::features::FeatureVector;

/// Raw additive score is divided by this before clamping to [0, 1].
const NORMALIZATION: f64 = 3.0;

struct Tier {
    below: f64,
    add: f64,
    indicator: &'static str,
}

const CENTROID_TIERS: &[Tier] = &[
    Tier {
        below: 15.0,
        add: 1.0,
        indicator: "extreme_spectral_consistency",
    },
    Tier {
        below: 35.0,
        add: 0.7,
        indicator: "high_spectral_consistency",
    },
    Tier {
        below: 70.0,
        add: 0.4,
        indicator: "moderate_spectral_consistency",
    },
];

const MFCC_TIERS: &[Tier] = &[
    Tier {
        below: 4.0,
        add: 1.2,
        indicator: "extreme_mfcc_consistency",
    },
    Tier {
        below: 9.0,
        add: 0.9,
        indicator: "high_mfcc_consistency",
    },
    Tier {
        below: 16.0,
        add: 0.5,
        indicator: "moderate_mfcc_consistency",
    },
];

const ZCR_TIERS: &[Tier] = &[
    Tier {
        below: 0.004,
        add: 0.9,
        indicator: "extreme_zcr_consistency",
    },
    Tier {
        below: 0.010,
        add: 0.6,
        indicator: "high_zcr_consistency",
    },
    Tier {
        below: 0.018,
        add: 0.3,
        indicator: "moderate_zcr_consistency",
    },
];

const RMS_TIERS: &[Tier] = &[
    Tier {
        below: 0.004,
        add: 0.9,
        indicator: "extreme_energy_consistency",
    },
    Tier {
        below: 0.010,
        add: 0.6,
        indicator: "high_energy_consistency",
    },
    Tier {
        below: 0.018,
        add: 0.3,
        indicator: "moderate_energy_consistency",
    },
];

const ROLLOFF_TIERS: &[Tier] = &[
    Tier {
        below: 80.0,
        add: 0.8,
        indicator: "extreme_rolloff_consistency",
    },
    Tier {
        below: 200.0,
        add: 0.5,
        indicator: "high_rolloff_consistency",
    },
    Tier {
        below: 400.0,
        add: 0.2,
        indicator: "moderate_rolloff_consistency",
    },
];

const BANDWIDTH_TIERS: &[Tier] = &[
    Tier {
        below: 40.0,
        add: 0.7,
        indicator: "low_bandwidth_variation",
    },
    Tier {
        below: 90.0,
        add: 0.4,
        indicator: "moderate_bandwidth_variation",
    },
];

const CHROMA_TIERS: &[Tier] = &[
    Tier {
        below: 0.025,
        add: 0.8,
        indicator: "extreme_chroma_consistency",
    },
    Tier {
        below: 0.065,
        add: 0.4,
        indicator: "moderate_chroma_consistency",
    },
];

const FLATNESS_TIERS: &[Tier] = &[
    Tier {
        below: 0.02,
        add: 0.7,
        indicator: "extreme_flatness_consistency",
    },
    Tier {
        below: 0.05,
        add: 0.3,
        indicator: "moderate_flatness_consistency",
    },
];

fn apply_tiers(std: f64, tiers: &[Tier], score: &mut f64, indicators: &mut Vec<&'static str>) {
    if let Some(tier) = tiers.iter().find(|t| std < t.below) {
        *score += tier.add;
        indicators.push(tier.indicator);
    }
}

/// Score a feature vector for unnatural statistical consistency.
pub fn consistency_score(features: &FeatureVector) -> MethodScore {
    let centroid_std = features.spectral_centroid.std;
    let rolloff_std = features.spectral_rolloff.std;
    let bandwidth_std = features.spectral_bandwidth.std;
    let mfcc_std = features.mfcc.std;
    let chroma_std = features.chroma.std;
    let zcr_std = features.zero_crossing_rate.std;
    let rms_std = features.rms.std;
    let flatness_std = features.spectral_flatness.std;

    let mut score = 0.0;
    let mut indicators = Vec::new();

    apply_tiers(centroid_std, CENTROID_TIERS, &mut score, &mut indicators);
    apply_tiers(mfcc_std, MFCC_TIERS, &mut score, &mut indicators);
    apply_tiers(zcr_std, ZCR_TIERS, &mut score, &mut indicators);
    apply_tiers(rms_std, RMS_TIERS, &mut score, &mut indicators);
    apply_tiers(rolloff_std, ROLLOFF_TIERS, &mut score, &mut indicators);
    apply_tiers(bandwidth_std, BANDWIDTH_TIERS, &mut score, &mut indicators);
    apply_tiers(chroma_std, CHROMA_TIERS, &mut score, &mut indicators);
    apply_tiers(flatness_std, FLATNESS_TIERS, &mut score, &mut indicators);

    // "Too perfect" syndrome: several features steady at once.
    let perfect_count = [
        centroid_std < 30.0,
        mfcc_std < 8.0,
        zcr_std < 0.008,
        rms_std < 0.008,
        chroma_std < 0.05,
        rolloff_std < 150.0,
        bandwidth_std < 70.0,
        flatness_std < 0.04,
    ]
    .iter()
    .filter(|&&p| p)
    .count();

    if perfect_count >= 6 {
        score += 1.5;
        indicators.push("extreme_perfection");
    } else if perfect_count >= 5 {
        score += 1.0;
        indicators.push("high_perfection");
    } else if perfect_count >= 4 {
        score += 0.7;
        indicators.push("moderate_perfection");
    } else if perfect_count >= 3 {
        score += 0.4;
        indicators.push("some_perfection");
    }

    // Signature combinations observed on cloned voices.
    if centroid_std < 35.0 && rolloff_std < 170.0 && mfcc_std < 10.0 {
        score += 0.9;
        indicators.push("ai_signature_combo");
    }
    if rms_std < 0.010 && zcr_std < 0.010 && mfcc_std < 12.0 {
        score += 0.8;
        indicators.push("ai_energy_pattern");
    }

    MethodScore {
        score: (score / NORMALIZATION).min(1.0),
        indicators,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::stats::Summary;

    fn vector_with_stds(
        centroid: f64,
        rolloff: f64,
        bandwidth: f64,
        mfcc: f64,
        chroma: f64,
        zcr: f64,
        rms: f64,
        flatness: f64,
    ) -> FeatureVector {
        let std = |v| Summary {
            std: v,
            ..Summary::ZERO
        };
        let mut fv = FeatureVector::zero();
        fv.degraded = false;
        fv.spectral_centroid = std(centroid);
        fv.spectral_rolloff = std(rolloff);
        fv.spectral_bandwidth = std(bandwidth);
        fv.mfcc = std(mfcc);
        fv.chroma = std(chroma);
        fv.zero_crossing_rate = std(zcr);
        fv.rms = std(rms);
        fv.spectral_flatness = std(flatness);
        fv
    }

    #[test]
    fn test_natural_variation_scores_zero() {
        let fv = vector_with_stds(500.0, 1000.0, 800.0, 50.0, 0.3, 0.1, 0.1, 0.2);
        let result = consistency_score(&fv);
        assert_eq!(result.score, 0.0);
        assert!(result.indicators.is_empty());
    }

    #[test]
    fn test_extreme_consistency_saturates() {
        let fv = vector_with_stds(1.0, 1.0, 1.0, 0.5, 0.001, 0.0001, 0.0001, 0.001);
        let result = consistency_score(&fv);
        // Raw: 1.0 + 1.2 + 0.9 + 0.9 + 0.8 + 0.7 + 0.8 + 0.7 + 1.5 + 0.9 + 0.8 = 10.2.
        assert_eq!(result.score, 1.0);
        assert!(result.indicators.contains(&"extreme_spectral_consistency"));
        assert!(result.indicators.contains(&"extreme_mfcc_consistency"));
        assert!(result.indicators.contains(&"extreme_perfection"));
        assert!(result.indicators.contains(&"ai_signature_combo"));
        assert!(result.indicators.contains(&"ai_energy_pattern"));
    }

    #[test]
    fn test_single_moderate_tier() {
        let fv = vector_with_stds(50.0, 1000.0, 800.0, 50.0, 0.3, 0.1, 0.1, 0.2);
        let result = consistency_score(&fv);
        assert!((result.score - 0.4 / 3.0).abs() < 1e-12);
        assert_eq!(result.indicators, vec!["moderate_spectral_consistency"]);
    }

    #[test]
    fn test_tier_boundaries_are_strict() {
        // std exactly at a boundary falls to the next tier down.
        let fv = vector_with_stds(15.0, 1000.0, 800.0, 50.0, 0.3, 0.1, 0.1, 0.2);
        let result = consistency_score(&fv);
        assert_eq!(result.indicators, vec!["high_spectral_consistency"]);
        assert!((result.score - 0.7 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_perfect_count_bonus_tiers() {
        // Exactly 4 permissive limits tripped (centroid, rolloff, bandwidth,
        // zcr), keeping mfcc/chroma/rms/flatness well outside theirs.
        let fv = vector_with_stds(25.0, 120.0, 60.0, 50.0, 0.3, 0.0075, 0.1, 0.2);
        let result = consistency_score(&fv);
        assert!(result.indicators.contains(&"moderate_perfection"));
        // centroid 25 -> +0.7, rolloff 120 -> +0.5, bandwidth 60 -> +0.4,
        // zcr 0.0075 -> +0.6, perfection (4) -> +0.7.
        assert!((result.score - 2.9 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_energy_pattern_combo() {
        // Only the rms/zcr/mfcc combo plus their individual tiers.
        let fv = vector_with_stds(500.0, 1000.0, 800.0, 11.0, 0.3, 0.009, 0.009, 0.2);
        let result = consistency_score(&fv);
        assert!(result.indicators.contains(&"ai_energy_pattern"));
        assert!(!result.indicators.contains(&"ai_signature_combo"));
        // mfcc 11 -> +0.5, zcr 0.009 -> +0.6, rms 0.009 -> +0.6, combo +0.8,
        // perfect count 2 -> no bonus.
        assert!((result.score - 2.5 / 3.0).abs() < 1e-12);
    }
}
