use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub audio: AudioConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Sample rate audio is resampled to before analysis. The scoring
    /// thresholds were calibrated at 22050 Hz.
    pub target_sample_rate: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print the JSON report.
    pub pretty: bool,
    /// Attach the raw feature/score snapshot to language results.
    pub include_features: bool,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            target_sample_rate: crate::audio::TARGET_SAMPLE_RATE,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            include_features: false,
        }
    }
}

impl Config {
    /// Load config: explicit path, then beside the executable, then the
    /// platform config directory, then defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(p) = path {
            let content = std::fs::read_to_string(p).map_err(|e| {
                anyhow::anyhow!("Failed to read config file {}: {}", p.display(), e)
            })?;
            return Ok(toml::from_str(&content)?);
        }

        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(beside_exe) = exe_path.parent().map(|p| p.join("voiceprobe.toml")) {
                if beside_exe.exists() {
                    let content = std::fs::read_to_string(&beside_exe)?;
                    return Ok(toml::from_str(&content)?);
                }
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let platform_config: PathBuf = config_dir.join("voiceprobe").join("config.toml");
            if platform_config.exists() {
                let content = std::fs::read_to_string(&platform_config)?;
                return Ok(toml::from_str(&content)?);
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.audio.target_sample_rate, 22_050);
        assert!(config.output.pretty);
        assert!(!config.output.include_features);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [audio]
            target_sample_rate = 16000
            "#,
        )
        .unwrap();
        assert_eq!(config.audio.target_sample_rate, 16_000);
        assert!(config.output.pretty);
    }

    #[test]
    fn test_load_explicit_path() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[output]\npretty = false\ninclude_features = true\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert!(!config.output.pretty);
        assert!(config.output.include_features);
        assert_eq!(config.audio.target_sample_rate, 22_050);
    }

    #[test]
    fn test_load_missing_explicit_path_errors() {
        assert!(Config::load(Some(Path::new("/nonexistent/voiceprobe.toml"))).is_err());
    }
}
