// Short-time Fourier transform over Hann-windowed frames.
//
// Frame geometry is fixed (2048-sample frames, 512-sample hop) so that every
// feature in the crate sees the same time resolution. Only complete frames
// are analyzed; a signal shorter than one frame yields an empty spectrogram.

use rustfft::{num_complex::Complex, FftPlanner};

/// Analysis frame length in samples.
pub const N_FFT: usize = 2048;

/// Hop between consecutive frames in samples.
pub const HOP_LENGTH: usize = 512;

/// Magnitude spectra, one row per frame, `N_FFT / 2 + 1` bins per row.
#[derive(Debug, Clone)]
pub struct Spectrogram {
    pub mags: Vec<Vec<f32>>,
    pub sample_rate: u32,
}

impl Spectrogram {
    pub fn n_frames(&self) -> usize {
        self.mags.len()
    }

    pub fn n_bins(&self) -> usize {
        N_FFT / 2 + 1
    }

    /// Center frequency of an FFT bin in Hz.
    pub fn bin_frequency(&self, bin: usize) -> f64 {
        bin as f64 * self.sample_rate as f64 / N_FFT as f64
    }
}

/// Periodic Hann window of length `len`.
pub fn hann_window(len: usize) -> Vec<f32> {
    (0..len)
        .map(|i| {
            let x = std::f32::consts::PI * i as f32 / len as f32;
            let s = x.sin();
            s * s
        })
        .collect()
}

/// Compute the magnitude spectrogram of `samples`.
pub fn magnitude_spectrogram(samples: &[f32], sample_rate: u32) -> Spectrogram {
    let mut mags = Vec::new();

    if samples.len() >= N_FFT {
        let window = hann_window(N_FFT);
        let mut planner = FftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(N_FFT);

        let mut start = 0;
        while start + N_FFT <= samples.len() {
            let mut buf: Vec<Complex<f32>> = samples[start..start + N_FFT]
                .iter()
                .zip(&window)
                .map(|(&s, &w)| Complex::new(s * w, 0.0))
                .collect();
            fft.process(&mut buf);
            mags.push(buf[..N_FFT / 2 + 1].iter().map(|c| c.norm()).collect());
            start += HOP_LENGTH;
        }
    }

    Spectrogram { mags, sample_rate }
}

/// Iterate complete time-domain frames of `frame_len` samples, `hop` apart.
pub fn frames(samples: &[f32], frame_len: usize, hop: usize) -> Vec<&[f32]> {
    let mut out = Vec::new();
    if frame_len == 0 || hop == 0 {
        return out;
    }
    let mut start = 0;
    while start + frame_len <= samples.len() {
        out.push(&samples[start..start + frame_len]);
        start += hop;
    }
    out
}
