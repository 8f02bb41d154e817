//! Entrain CLI - Binaural affirmation track generator
//!
//! This binary validates session configs, previews affirmation spacing, lists
//! the built-in voices and renders finished FLAC or WAV tracks.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use entrain_cli::commands;
use entrain_cli::voice_cache::DEFAULT_TTL_SECS;

/// Entrain - Binaural beats with spoken affirmations
#[derive(Parser)]
#[command(name = "entrain")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a track from a config file
    Generate {
        /// Path to the config file (JSON or YAML)
        #[arg(short, long)]
        config: String,

        /// Output file (.flac or .wav)
        #[arg(short, long)]
        output: String,

        /// Seed for shuffle and jitter (random when omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// ElevenLabs API key (default: $ELEVENLABS_API_KEY)
        #[arg(long)]
        api_key: Option<String>,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Validate a config file without generating audio
    Validate {
        /// Path to the config file (JSON or YAML)
        #[arg(short, long)]
        config: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Show the expected affirmation spacing for a config
    Spacing {
        /// Path to the config file (JSON or YAML)
        #[arg(short, long)]
        config: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// List the built-in voices with preview URLs
    Voices {
        /// Refetch even when the cache is fresh
        #[arg(long)]
        refresh: bool,

        /// Delete the cached voice list and exit
        #[arg(long, conflicts_with = "refresh")]
        clear_cache: bool,

        /// Cache lifetime in seconds
        #[arg(long, default_value_t = DEFAULT_TTL_SECS)]
        ttl_secs: u64,

        /// ElevenLabs API key (default: $ELEVENLABS_API_KEY)
        #[arg(long)]
        api_key: Option<String>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            config,
            output,
            seed,
            api_key,
            json,
        } => commands::generate::run(&config, &output, seed, api_key.as_deref(), json),
        Commands::Validate { config, json } => commands::validate::run(&config, json),
        Commands::Spacing { config, json } => commands::spacing::run(&config, json),
        Commands::Voices {
            refresh,
            clear_cache,
            ttl_secs,
            api_key,
            json,
        } => commands::voices::run(refresh, clear_cache, ttl_secs, api_key.as_deref(), json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
