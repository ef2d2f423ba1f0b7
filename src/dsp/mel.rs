// Perceptual transforms built on the magnitude spectrogram: mel-frequency
// cepstral coefficients, chroma (pitch-class) folding, tonal-centroid
// (tonnetz) projection, and per-band spectral contrast.

use std::f64::consts::PI;

use crate::dsp::stft::{Spectrogram, N_FFT};

/// Number of mel bands backing the cepstral transform.
pub const N_MELS: usize = 40;

/// Octave band edges (Hz) for spectral contrast; the last band runs to Nyquist.
const CONTRAST_EDGES: [f64; 7] = [0.0, 200.0, 400.0, 800.0, 1600.0, 3200.0, 6400.0];

fn hz_to_mel(hz: f64) -> f64 {
    2595.0 * (1.0 + hz / 700.0).log10()
}

fn mel_to_hz(mel: f64) -> f64 {
    700.0 * (10f64.powf(mel / 2595.0) - 1.0)
}

/// Triangular mel filterbank, `N_MELS` rows over `n_bins` FFT bins.
fn mel_filterbank(sample_rate: u32, n_bins: usize) -> Vec<Vec<f64>> {
    let nyquist = sample_rate as f64 / 2.0;
    let max_mel = hz_to_mel(nyquist);
    let points: Vec<f64> = (0..N_MELS + 2)
        .map(|i| mel_to_hz(max_mel * i as f64 / (N_MELS + 1) as f64))
        .collect();

    let bin_freq = |k: usize| k as f64 * sample_rate as f64 / N_FFT as f64;
    let mut bank = Vec::with_capacity(N_MELS);
    for m in 0..N_MELS {
        let (lo, mid, hi) = (points[m], points[m + 1], points[m + 2]);
        let row: Vec<f64> = (0..n_bins)
            .map(|k| {
                let f = bin_freq(k);
                if f <= lo || f >= hi {
                    0.0
                } else if f <= mid {
                    (f - lo) / (mid - lo)
                } else {
                    (hi - f) / (hi - mid)
                }
            })
            .collect();
        bank.push(row);
    }
    bank
}

/// Orthonormal DCT-II, truncated to the first `n_out` coefficients.
pub fn dct_ii(input: &[f64], n_out: usize) -> Vec<f64> {
    let len = input.len();
    if len == 0 {
        return vec![0.0; n_out];
    }
    let n = len as f64;
    (0..n_out)
        .map(|k| {
            let sum: f64 = input
                .iter()
                .enumerate()
                .map(|(i, &x)| x * (PI * k as f64 * (2.0 * i as f64 + 1.0) / (2.0 * n)).cos())
                .sum();
            let scale = if k == 0 {
                (1.0 / n).sqrt()
            } else {
                (2.0 / n).sqrt()
            };
            scale * sum
        })
        .collect()
}

/// Mel-frequency cepstral coefficients: `n_mfcc` rows, one column per frame.
pub fn mfcc(spec: &Spectrogram, n_mfcc: usize) -> Vec<Vec<f64>> {
    let bank = mel_filterbank(spec.sample_rate, spec.n_bins());
    let mut out = vec![Vec::with_capacity(spec.n_frames()); n_mfcc];

    for frame in &spec.mags {
        let mel: Vec<f64> = bank
            .iter()
            .map(|row| {
                row.iter()
                    .zip(frame)
                    .map(|(&w, &m)| w * (m as f64) * (m as f64))
                    .sum::<f64>()
            })
            .collect();
        let db: Vec<f64> = mel.iter().map(|&e| 10.0 * e.max(1e-10).log10()).collect();
        for (row, c) in out.iter_mut().zip(dct_ii(&db, n_mfcc)) {
            row.push(c);
        }
    }
    out
}

/// 12-bin chroma: spectral energy folded onto pitch classes (C = 0), each
/// frame normalized by its maximum so values lie in [0, 1].
pub fn chroma(spec: &Spectrogram) -> Vec<Vec<f64>> {
    let mut out = vec![Vec::with_capacity(spec.n_frames()); 12];

    for frame in &spec.mags {
        let mut classes = [0.0f64; 12];
        for (k, &m) in frame.iter().enumerate().skip(1) {
            let f = spec.bin_frequency(k);
            if f < 20.0 {
                continue;
            }
            let midi = 69.0 + 12.0 * (f / 440.0).log2();
            let pc = ((midi.round() as i64 % 12) + 12) % 12;
            classes[pc as usize] += (m as f64) * (m as f64);
        }
        let max = classes.iter().cloned().fold(0.0f64, f64::max);
        for (row, &c) in out.iter_mut().zip(&classes) {
            row.push(if max > 0.0 { c / max } else { 0.0 });
        }
    }
    out
}

/// Tonal-centroid (tonnetz) projection of a chroma matrix: six rows built
/// from the circle of fifths, minor thirds, and major thirds.
pub fn tonnetz(chroma: &[Vec<f64>]) -> Vec<Vec<f64>> {
    // (angle multiplier in units of pi/6, radius)
    const DIMS: [(f64, f64); 3] = [(7.0, 1.0), (9.0, 1.0), (4.0, 0.5)];

    let n_frames = chroma.first().map_or(0, |row| row.len());
    let mut out = vec![Vec::with_capacity(n_frames); 6];

    for t in 0..n_frames {
        let norm: f64 = chroma.iter().map(|row| row[t].abs()).sum();
        for (d, &(mult, radius)) in DIMS.iter().enumerate() {
            let (mut sin_sum, mut cos_sum) = (0.0, 0.0);
            if norm > 1e-12 {
                for (c, row) in chroma.iter().enumerate() {
                    let v = row[t] / norm;
                    let angle = PI * mult * c as f64 / 6.0;
                    sin_sum += v * radius * angle.sin();
                    cos_sum += v * radius * angle.cos();
                }
            }
            out[2 * d].push(sin_sum);
            out[2 * d + 1].push(cos_sum);
        }
    }
    out
}

/// Per-band spectral contrast: log ratio between the strongest and weakest
/// quantiles of each octave band, seven rows per frame.
pub fn spectral_contrast(spec: &Spectrogram) -> Vec<Vec<f64>> {
    let nyquist = spec.sample_rate as f64 / 2.0;
    let n_bands = CONTRAST_EDGES.len();
    let mut out = vec![Vec::with_capacity(spec.n_frames()); n_bands];

    for frame in &spec.mags {
        for band in 0..n_bands {
            let lo = CONTRAST_EDGES[band];
            let hi = if band + 1 < n_bands {
                CONTRAST_EDGES[band + 1]
            } else {
                nyquist
            };

            let mut mags: Vec<f64> = frame
                .iter()
                .enumerate()
                .filter(|(k, _)| {
                    let f = spec.bin_frequency(*k);
                    f >= lo && f < hi
                })
                .map(|(_, &m)| m as f64)
                .collect();

            if mags.is_empty() {
                out[band].push(0.0);
                continue;
            }
            mags.sort_by(|a, b| a.total_cmp(b));
            let n = ((mags.len() as f64 * 0.02) as usize).max(1);
            let valley = mags[..n].iter().sum::<f64>() / n as f64;
            let peak = mags[mags.len() - n..].iter().sum::<f64>() / n as f64;
            out[band].push(((peak + 1e-10) / (valley + 1e-10)).ln());
        }
    }
    out
}
