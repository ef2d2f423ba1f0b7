// Feature extraction: waveform -> fixed set of named acoustic summaries.
//
// Pure and deterministic: the same waveform always produces the same vector.
// Degenerate input (empty, silent, or shorter than one analysis frame) yields
// the all-zero vector with `degraded` set instead of an error, so downstream
// scorers can apply their documented fallbacks.

use crate::audio::Waveform;
use crate::dsp::stats::Summary;
use crate::dsp::{mel, stft};

/// Number of cepstral coefficients summarized for the AI-voice detector.
pub const N_MFCC: usize = 20;

/// Coefficients used by the language scorer's cepstral-spread input.
pub const N_MFCC_LANGUAGE: usize = 13;

/// Named acoustic features summarized over all analysis frames.
///
/// Each [`Summary`] covers the flattened per-frame matrix of one feature
/// family. Values are always finite.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    pub spectral_centroid: Summary,
    pub spectral_rolloff: Summary,
    pub spectral_bandwidth: Summary,
    pub spectral_contrast: Summary,
    pub spectral_flatness: Summary,
    pub mfcc: Summary,
    pub chroma: Summary,
    pub zero_crossing_rate: Summary,
    pub rms: Summary,
    pub tonnetz: Summary,

    /// Standard deviation over the first 13 cepstral coefficients, the
    /// cepstral-spread input to the language scorer.
    pub mfcc13_std: f64,

    /// True when extraction fell back to the all-zero vector.
    pub degraded: bool,
}

impl FeatureVector {
    /// The documented default vector used when extraction cannot proceed.
    pub fn zero() -> Self {
        Self {
            spectral_centroid: Summary::ZERO,
            spectral_rolloff: Summary::ZERO,
            spectral_bandwidth: Summary::ZERO,
            spectral_contrast: Summary::ZERO,
            spectral_flatness: Summary::ZERO,
            mfcc: Summary::ZERO,
            chroma: Summary::ZERO,
            zero_crossing_rate: Summary::ZERO,
            rms: Summary::ZERO,
            tonnetz: Summary::ZERO,
            mfcc13_std: 0.0,
            degraded: true,
        }
    }

    /// Extract the full feature set from a waveform.
    pub fn extract(waveform: &Waveform) -> Self {
        let silent = !waveform.samples.iter().any(|s| s.abs() > 1e-8);
        let spec = stft::magnitude_spectrogram(&waveform.samples, waveform.sample_rate);
        if silent || spec.n_frames() == 0 {
            tracing::debug!(
                "Degenerate signal ({} samples), returning zero feature vector",
                waveform.samples.len()
            );
            return Self::zero();
        }

        let mut centroids = Vec::with_capacity(spec.n_frames());
        let mut rolloffs = Vec::with_capacity(spec.n_frames());
        let mut bandwidths = Vec::with_capacity(spec.n_frames());
        let mut flatnesses = Vec::with_capacity(spec.n_frames());
        for frame in &spec.mags {
            let c = frame_centroid(frame, &spec);
            centroids.push(c);
            rolloffs.push(frame_rolloff(frame, &spec));
            bandwidths.push(frame_bandwidth(frame, &spec, c));
            flatnesses.push(frame_flatness(frame));
        }

        let contrast = flatten(&mel::spectral_contrast(&spec));
        let mfcc20 = mel::mfcc(&spec, N_MFCC);
        let chroma = mel::chroma(&spec);
        let tonnetz = flatten(&mel::tonnetz(&chroma));

        let zcr: Vec<f64> = stft::frames(&waveform.samples, stft::N_FFT, stft::HOP_LENGTH)
            .iter()
            .map(|f| frame_zcr(f))
            .collect();
        let rms: Vec<f64> = stft::frames(&waveform.samples, stft::N_FFT, stft::HOP_LENGTH)
            .iter()
            .map(|f| frame_rms(f))
            .collect();

        let mfcc13: Vec<f64> = flatten(&mfcc20[..N_MFCC_LANGUAGE]);

        Self {
            spectral_centroid: Summary::from_values(&centroids),
            spectral_rolloff: Summary::from_values(&rolloffs),
            spectral_bandwidth: Summary::from_values(&bandwidths),
            spectral_contrast: Summary::from_values(&contrast),
            spectral_flatness: Summary::from_values(&flatnesses),
            mfcc: Summary::from_values(&flatten(&mfcc20)),
            chroma: Summary::from_values(&flatten(&chroma)),
            zero_crossing_rate: Summary::from_values(&zcr),
            rms: Summary::from_values(&rms),
            tonnetz: Summary::from_values(&tonnetz),
            mfcc13_std: Summary::from_values(&mfcc13).std,
            degraded: false,
        }
    }
}

fn flatten(matrix: &[Vec<f64>]) -> Vec<f64> {
    matrix.iter().flatten().copied().collect()
}

/// Magnitude-weighted mean frequency of one frame.
fn frame_centroid(frame: &[f32], spec: &stft::Spectrogram) -> f64 {
    let total: f64 = frame.iter().map(|&m| m as f64).sum();
    if total <= 0.0 {
        return 0.0;
    }
    frame
        .iter()
        .enumerate()
        .map(|(k, &m)| spec.bin_frequency(k) * m as f64)
        .sum::<f64>()
        / total
}

/// Frequency below which 85% of the spectral magnitude lies.
fn frame_rolloff(frame: &[f32], spec: &stft::Spectrogram) -> f64 {
    let total: f64 = frame.iter().map(|&m| m as f64).sum();
    if total <= 0.0 {
        return 0.0;
    }
    let target = 0.85 * total;
    let mut acc = 0.0;
    for (k, &m) in frame.iter().enumerate() {
        acc += m as f64;
        if acc >= target {
            return spec.bin_frequency(k);
        }
    }
    spec.bin_frequency(frame.len() - 1)
}

/// Magnitude-weighted spread around the centroid.
fn frame_bandwidth(frame: &[f32], spec: &stft::Spectrogram, centroid: f64) -> f64 {
    let total: f64 = frame.iter().map(|&m| m as f64).sum();
    if total <= 0.0 {
        return 0.0;
    }
    let var = frame
        .iter()
        .enumerate()
        .map(|(k, &m)| {
            let d = spec.bin_frequency(k) - centroid;
            d * d * m as f64
        })
        .sum::<f64>()
        / total;
    var.sqrt()
}

/// Geometric-to-arithmetic mean ratio of the power spectrum.
fn frame_flatness(frame: &[f32]) -> f64 {
    if frame.is_empty() {
        return 0.0;
    }
    let n = frame.len() as f64;
    let mut log_sum = 0.0;
    let mut sum = 0.0;
    for &m in frame {
        let p = (m as f64) * (m as f64) + 1e-10;
        log_sum += p.ln();
        sum += p;
    }
    let geo = (log_sum / n).exp();
    let arith = sum / n;
    if arith <= 0.0 {
        0.0
    } else {
        geo / arith
    }
}

/// Fraction of adjacent sample pairs that change sign.
fn frame_zcr(frame: &[f32]) -> f64 {
    if frame.len() < 2 {
        return 0.0;
    }
    let crossings = frame
        .windows(2)
        .filter(|w| (w[0] >= 0.0) != (w[1] >= 0.0))
        .count();
    crossings as f64 / frame.len() as f64
}

fn frame_rms(frame: &[f32]) -> f64 {
    if frame.is_empty() {
        return 0.0;
    }
    let sum: f64 = frame.iter().map(|&s| (s as f64) * (s as f64)).sum();
    (sum / frame.len() as f64).sqrt()
}
