//! Validate command implementation
//!
//! Loads a config, runs the range checks, and prints errors, warnings and the
//! expected affirmation spacing.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use entrain_spec::{spacing_estimate, validate_config, ValidationResult};

use super::json_output::{
    config_error_to_json, print_json, validation_error_to_json, validation_warning_to_json,
    SpacingInfo, ValidateOutput,
};
use crate::input::{load_config, LoadResult};

/// Run the validate command
///
/// # Arguments
/// * `config_path` - Path to the config file (JSON or YAML)
/// * `json_output` - Whether to output machine-readable JSON diagnostics
///
/// # Returns
/// Exit code: 0 if valid, 1 if invalid
pub fn run(config_path: &str, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(config_path)
    } else {
        run_human(config_path)
    }
}

fn run_human(config_path: &str) -> Result<ExitCode> {
    println!("{} {}", "Validating:".cyan().bold(), config_path);

    let LoadResult {
        config,
        source_kind,
        source_hash,
    } = match load_config(Path::new(config_path)) {
        Ok(loaded) => loaded,
        Err(e) => {
            println!("\n{} {}", "FAILED".red().bold(), e);
            return Ok(ExitCode::from(1));
        }
    };
    println!(
        "{} {} ({})",
        "Source:".dimmed(),
        source_kind.as_str(),
        &source_hash[..16]
    );

    let result = validate_config(&config);
    print_validation_results(&result);

    if result.is_ok() {
        let spacing = spacing_estimate(&config);
        println!(
            "\n{} {} entries, ~{:.1}s apart, ~{} placed",
            "Spacing:".dimmed(),
            spacing.total_entries,
            spacing.interval_seconds,
            spacing.estimated_placements
        );
        println!("\n{} Config is valid", "SUCCESS".green().bold());
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "\n{} Config has {} error(s)",
            "FAILED".red().bold(),
            result.errors.len()
        );
        Ok(ExitCode::from(1))
    }
}

fn run_json(config_path: &str) -> Result<ExitCode> {
    let loaded = match load_config(Path::new(config_path)) {
        Ok(loaded) => loaded,
        Err(e) => {
            let output = ValidateOutput {
                success: false,
                errors: vec![config_error_to_json(&e)],
                warnings: Vec::new(),
                source_hash: None,
                spacing: None,
            };
            print_json(&output)?;
            return Ok(ExitCode::from(1));
        }
    };

    let result = validate_config(&loaded.config);
    let spacing = result
        .is_ok()
        .then(|| SpacingInfo::from(&spacing_estimate(&loaded.config)));

    let output = ValidateOutput {
        success: result.is_ok(),
        errors: result.errors.iter().map(validation_error_to_json).collect(),
        warnings: result
            .warnings
            .iter()
            .map(validation_warning_to_json)
            .collect(),
        source_hash: Some(loaded.source_hash),
        spacing,
    };
    print_json(&output)?;

    Ok(if output.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

/// Prints errors and warnings in the human format.
pub(crate) fn print_validation_results(result: &ValidationResult) {
    if !result.errors.is_empty() {
        println!("\n{}", "Errors:".red().bold());
        for error in &result.errors {
            let path_info = error
                .path
                .as_ref()
                .map(|p| format!(" at {}", p))
                .unwrap_or_default();
            println!(
                "  {} [{}]{}: {}",
                "x".red(),
                error.code.to_string().red(),
                path_info.dimmed(),
                error.message
            );
        }
    }

    if !result.warnings.is_empty() {
        println!("\n{}", "Warnings:".yellow().bold());
        for warning in &result.warnings {
            let path_info = warning
                .path
                .as_ref()
                .map(|p| format!(" at {}", p))
                .unwrap_or_default();
            println!(
                "  {} [{}]{}: {}",
                "!".yellow(),
                warning.code.to_string().yellow(),
                path_info.dimmed(),
                warning.message
            );
        }
    }
}
