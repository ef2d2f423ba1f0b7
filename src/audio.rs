// WAV decoding: file -> mono f32 waveform at the target sample rate.
//
// Decoding is the only I/O in the crate. Everything downstream works on the
// in-memory `Waveform`, so callers that already hold PCM can skip this module
// entirely and construct a `Waveform` directly.

use std::path::Path;

use hound::SampleFormat;

use crate::error::DecodeError;

/// Default analysis sample rate. All reference thresholds were calibrated
/// against audio decoded at this rate.
pub const TARGET_SAMPLE_RATE: u32 = 22_050;

/// A decoded mono audio signal. Immutable after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl Waveform {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Decode a WAV file to a mono waveform at `target_sample_rate`.
///
/// Multi-channel audio is downmixed by averaging channels; sample rates other
/// than the target are converted by linear interpolation, which is adequate
/// for the statistical features computed downstream.
pub fn decode_wav(path: &Path, target_sample_rate: u32) -> Result<Waveform, DecodeError> {
    let mut reader = hound::WavReader::open(path).map_err(|e| DecodeError::Open {
        path: path.to_path_buf(),
        source: e,
    })?;
    let spec = reader.spec();

    let samples: Vec<f32> = match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Float, 32) => reader.samples::<f32>().collect::<Result<_, _>>()?,
        (SampleFormat::Int, 16) => reader
            .samples::<i16>()
            .map(|s| s.map(|v| v as f32 / 32_768.0))
            .collect::<Result<_, _>>()?,
        (SampleFormat::Int, 24) => reader
            .samples::<i32>()
            .map(|s| s.map(|v| v as f32 / 8_388_608.0))
            .collect::<Result<_, _>>()?,
        (SampleFormat::Int, 32) => reader
            .samples::<i32>()
            .map(|s| s.map(|v| v as f32 / 2_147_483_648.0))
            .collect::<Result<_, _>>()?,
        (format, bits) => {
            return Err(DecodeError::UnsupportedFormat {
                bits,
                format: match format {
                    SampleFormat::Float => "float",
                    SampleFormat::Int => "int",
                },
            })
        }
    };

    let mono = downmix(&samples, spec.channels);
    let resampled = if spec.sample_rate == target_sample_rate {
        mono
    } else {
        tracing::debug!(
            "Resampling {} Hz -> {} Hz ({} samples)",
            spec.sample_rate,
            target_sample_rate,
            mono.len()
        );
        resample(&mono, spec.sample_rate, target_sample_rate)
    };

    Ok(Waveform::new(resampled, target_sample_rate))
}

/// Average interleaved channels into a single mono channel.
fn downmix(samples: &[f32], channels: u16) -> Vec<f32> {
    if channels <= 1 {
        return samples.to_vec();
    }
    let ch = channels as usize;
    samples
        .chunks_exact(ch)
        .map(|frame| frame.iter().sum::<f32>() / ch as f32)
        .collect()
}

/// Linear-interpolation resampler.
fn resample(samples: &[f32], from: u32, to: u32) -> Vec<f32> {
    if samples.is_empty() || from == to || from == 0 || to == 0 {
        return samples.to_vec();
    }
    let ratio = from as f64 / to as f64;
    let out_len = (samples.len() as f64 / ratio).floor() as usize;
    (0..out_len)
        .map(|i| {
            let pos = i as f64 * ratio;
            let idx = pos as usize;
            let frac = (pos - idx as f64) as f32;
            let a = samples[idx.min(samples.len() - 1)];
            let b = samples[(idx + 1).min(samples.len() - 1)];
            a + (b - a) * frac
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::{WavSpec, WavWriter};

    #[test]
    fn test_downmix_averages_channels() {
        let stereo = vec![1.0, 0.0, 0.5, 0.5, -1.0, 1.0];
        let mono = downmix(&stereo, 2);
        assert_eq!(mono, vec![0.5, 0.5, 0.0]);
    }

    #[test]
    fn test_resample_halves_length() {
        let samples: Vec<f32> = (0..1000).map(|i| (i as f32 / 1000.0).sin()).collect();
        let out = resample(&samples, 44_100, 22_050);
        assert_eq!(out.len(), 500);
    }

    #[test]
    fn test_resample_identity() {
        let samples = vec![0.1, 0.2, 0.3];
        assert_eq!(resample(&samples, 22_050, 22_050), samples);
    }

    #[test]
    fn test_decode_wav_i16_roundtrip() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("tone.wav");

        let spec = WavSpec {
            channels: 1,
            sample_rate: 22_050,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        for i in 0..22_050u32 {
            let t = i as f32 / 22_050.0;
            let v = (2.0 * std::f32::consts::PI * 440.0 * t).sin() * 0.5;
            writer.write_sample((v * 32_767.0) as i16).unwrap();
        }
        writer.finalize().unwrap();

        let waveform = decode_wav(&path, TARGET_SAMPLE_RATE).unwrap();
        assert_eq!(waveform.sample_rate, TARGET_SAMPLE_RATE);
        assert_eq!(waveform.samples.len(), 22_050);
        assert!((waveform.duration_secs() - 1.0).abs() < 1e-6);
        let peak = waveform.samples.iter().fold(0.0f32, |m, s| m.max(s.abs()));
        assert!((peak - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_decode_stereo_downmixes_and_resamples() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("stereo.wav");

        let spec = WavSpec {
            channels: 2,
            sample_rate: 44_100,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        for _ in 0..44_100 {
            writer.write_sample(8000i16).unwrap();
            writer.write_sample(-8000i16).unwrap();
        }
        writer.finalize().unwrap();

        let waveform = decode_wav(&path, TARGET_SAMPLE_RATE).unwrap();
        assert_eq!(waveform.sample_rate, TARGET_SAMPLE_RATE);
        assert_eq!(waveform.samples.len(), 22_050);
        // Opposite channels cancel on downmix.
        assert!(waveform.samples.iter().all(|s| s.abs() < 1e-4));
    }

    #[test]
    fn test_decode_missing_file_errors() {
        let result = decode_wav(Path::new("/nonexistent/clip.wav"), TARGET_SAMPLE_RATE);
        assert!(matches!(result, Err(DecodeError::Open { .. })));
    }
}
