use clap::Parser;
use voiceprobe::cli::{Cli, Commands};
use voiceprobe::commands;
use voiceprobe::config::Config;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("voiceprobe=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Analyze { file, features } => commands::analyze(&config, &file, features),
        Commands::Languages => commands::list_languages(),
    }
}
