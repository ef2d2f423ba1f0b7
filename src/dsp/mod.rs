// Low-level signal processing shared by the feature extractor and the
// AI-voice sub-scorers: STFT, mel/cepstral transforms, scalar statistics.

pub mod mel;
pub mod stats;
pub mod stft;
