use std::path::Path;

use anyhow::Result;

use crate::analyzer::Analyzer;
use crate::config::Config;
use crate::language::SUPPORTED_LANGUAGES;

/// Analyze one audio file and print the report as JSON on stdout.
pub fn analyze(config: &Config, file: &Path, include_features: bool) -> Result<()> {
    let analyzer = Analyzer::new()
        .with_feature_snapshot(include_features || config.output.include_features);
    let report = analyzer.analyze_path(file, config.audio.target_sample_rate);

    let json = if config.output.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{json}");
    Ok(())
}

/// Print the supported-language table.
pub fn list_languages() -> Result<()> {
    for language in &SUPPORTED_LANGUAGES {
        println!("{}  {}", language.code, language.name);
    }
    Ok(())
}
