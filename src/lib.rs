//! Heuristic spoken-audio classification.
//!
//! Classifies a short clip along two independent axes: which supported
//! language is being spoken, and whether the voice is synthetically
//! generated. Purely computational: the only I/O is decoding the input
//! WAV, and the public entry point never returns an error — internal
//! failures degrade to documented low-confidence fallback results.
//!
//! ```no_run
//! use voiceprobe::{Analyzer, Waveform};
//!
//! let waveform = Waveform::new(vec![0.0; 22_050], 22_050);
//! let report = Analyzer::new().analyze(&waveform);
//! println!("{}", report.language_detection.detected_language);
//! ```

pub mod analyzer;
pub mod audio;
pub mod cli;
pub mod cloning;
pub mod commands;
pub mod config;
pub mod dsp;
pub mod error;
pub mod features;
pub mod language;

pub use analyzer::{Analyzer, EnhancedAnalysisResult};
pub use audio::{Waveform, TARGET_SAMPLE_RATE};
pub use cloning::{RiskLevel, VoiceCloningDetectionResult};
pub use features::FeatureVector;
pub use language::{LanguageDetectionResult, SUPPORTED_LANGUAGES};
