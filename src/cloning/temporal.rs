// Cross-segment similarity analysis.
//
// The clip is cut into consecutive 2-second segments (up to 5) and each
// segment is reduced to a 13-coefficient cepstral profile. Natural speech
// drifts between segments; very high correlation between consecutive
// profiles indicates synthesis. Needs at least two full segments.

use crate::audio::Waveform;
use crate::cloning::MethodScore;
use crate::dsp::{mel, stats, stft};

/// Segment length in seconds.
const SEGMENT_SECS: usize = 2;

/// Maximum number of segments analyzed.
const MAX_SEGMENTS: usize = 5;

/// Cepstral coefficients per segment profile.
const PROFILE_COEFFS: usize = 13;

/// Score inter-segment cepstral similarity.
pub fn temporal_score(waveform: &Waveform) -> MethodScore {
    let seg_len = waveform.sample_rate as usize * SEGMENT_SECS;
    if seg_len == 0 {
        return MethodScore::zero();
    }
    let n_segments = waveform.samples.len() / seg_len;
    if n_segments < 2 {
        return MethodScore::zero();
    }

    let mut profiles: Vec<Vec<f64>> = Vec::new();
    for i in 0..n_segments.min(MAX_SEGMENTS) {
        let segment = &waveform.samples[i * seg_len..(i + 1) * seg_len];
        let spec = stft::magnitude_spectrogram(segment, waveform.sample_rate);
        if spec.n_frames() == 0 {
            continue;
        }
        let mfcc = mel::mfcc(&spec, PROFILE_COEFFS);
        profiles.push(mfcc.iter().map(|row| stats::mean(row)).collect());
    }
    if profiles.len() < 2 {
        return MethodScore::zero();
    }

    let similarities: Vec<f64> = profiles
        .windows(2)
        .filter_map(|pair| stats::pearson(&pair[0], &pair[1]))
        .collect();
    if similarities.is_empty() {
        return MethodScore::zero();
    }
    let avg = stats::mean(&similarities);

    let mut score: f64 = 0.0;
    let mut indicators = Vec::new();
    if avg > 0.95 {
        score += 0.9;
        indicators.push("near_identical_segments");
    } else if avg > 0.90 {
        score += 0.7;
        indicators.push("highly_similar_segments");
    } else if avg > 0.85 {
        score += 0.5;
        indicators.push("similar_segments");
    } else if avg > 0.80 {
        score += 0.3;
        indicators.push("correlated_segments");
    }

    MethodScore {
        score: score.min(1.0),
        indicators,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(freq: f32, secs: f32, sample_rate: u32) -> Vec<f32> {
        let n = (secs * sample_rate as f32) as usize;
        (0..n)
            .map(|i| {
                let t = i as f32 / sample_rate as f32;
                (2.0 * std::f32::consts::PI * freq * t).sin() * 0.5
            })
            .collect()
    }

    #[test]
    fn test_identical_segments_hit_top_tier() {
        // 5 seconds of a steady tone: consecutive 2 s segments are identical.
        let waveform = Waveform::new(sine(440.0, 5.0, 22_050), 22_050);
        let result = temporal_score(&waveform);
        assert_eq!(result.score, 0.9);
        assert_eq!(result.indicators, vec!["near_identical_segments"]);
    }

    #[test]
    fn test_single_segment_contributes_zero() {
        // 3 seconds holds only one full 2 s segment.
        let waveform = Waveform::new(sine(440.0, 3.0, 22_050), 22_050);
        assert_eq!(temporal_score(&waveform), MethodScore::zero());
    }

    #[test]
    fn test_empty_waveform_contributes_zero() {
        let waveform = Waveform::new(vec![], 22_050);
        assert_eq!(temporal_score(&waveform), MethodScore::zero());
    }

    #[test]
    fn test_contrasting_segments_score_below_identical() {
        // Alternate a low tone and a high noise-like sweep every 2 seconds.
        let sample_rate = 22_050u32;
        let mut samples = Vec::new();
        for seg in 0..4 {
            let freq = if seg % 2 == 0 { 220.0 } else { 3500.0 };
            samples.extend(sine(freq, 2.0, sample_rate));
        }
        let contrasting = temporal_score(&Waveform::new(samples, sample_rate));
        let steady = temporal_score(&Waveform::new(sine(440.0, 8.0, sample_rate), sample_rate));
        assert!(contrasting.score <= steady.score);
        assert_eq!(steady.score, 0.9);
    }
}
