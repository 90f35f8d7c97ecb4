//! Init command implementation
//!
//! Writes a default configuration file into a project.

use anyhow::{bail, Context, Result};
use assetguard_rules::{ProjectConfig, CONFIG_FILE_NAME};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

/// Run the init command.
///
/// Refuses to replace an existing configuration unless `force` is set.
pub fn run(project: &str, force: bool) -> Result<ExitCode> {
    let project_dir = Path::new(project);
    if !project_dir.is_dir() {
        bail!("project directory not found: {}", project);
    }

    let path = project_dir.join(CONFIG_FILE_NAME);
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    ProjectConfig::default()
        .save(&path)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("{} {}", "Created".green().bold(), path.display());
    Ok(ExitCode::SUCCESS)
}
