//! Spacing command implementation
//!
//! Shows how far apart affirmations will land and how many fit before the
//! trail window.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use entrain_spec::{spacing_estimate, EDGE_WINDOW_SECONDS, JITTER_SECONDS};

use super::json_output::{print_json, SpacingInfo};
use crate::input::load_config;

/// Run the spacing command
pub fn run(config_path: &str, json_output: bool) -> Result<ExitCode> {
    let loaded = load_config(Path::new(config_path))
        .with_context(|| format!("Failed to load config file: {}", config_path))?;
    let estimate = spacing_estimate(&loaded.config);

    if json_output {
        print_json(&SpacingInfo::from(&estimate))?;
        return Ok(ExitCode::SUCCESS);
    }

    println!("{} {}", "Config:".cyan().bold(), config_path);
    println!(
        "  {} {} phrase(s) x {} = {} entries",
        "Entries:".dimmed(),
        loaded.config.affirmations.len(),
        loaded.config.repetitions,
        estimate.total_entries
    );
    println!(
        "  {} {} min",
        "Duration:".dimmed(),
        estimate.duration_seconds / 60
    );
    println!(
        "  {} {:.1}s (+/-{}s jitter)",
        "Interval:".dimmed(),
        estimate.interval_seconds,
        JITTER_SECONDS
    );
    println!(
        "  {} ~{} of {}",
        "Placed:".dimmed(),
        estimate.estimated_placements,
        estimate.total_entries
    );

    if estimate.is_truncated() {
        println!(
            "\n{} about {} entries will not fit before the final {}s",
            "!".yellow(),
            estimate.total_entries - estimate.estimated_placements,
            EDGE_WINDOW_SECONDS
        );
    }

    Ok(ExitCode::SUCCESS)
}
