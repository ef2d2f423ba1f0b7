use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "voiceprobe",
    version,
    about = "Heuristic language identification and AI-voice detection for short audio clips"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a WAV file and print the JSON report
    Analyze {
        /// Audio file to analyze
        file: PathBuf,

        /// Include the raw feature/score snapshot in the report
        #[arg(long)]
        features: bool,
    },

    /// List the supported languages
    Languages,
}
