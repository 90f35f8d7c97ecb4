//! Scan command implementation
//!
//! Checks a project tree against its naming and location rules.

use anyhow::{bail, Context, Result};
use assetguard_rules::{
    export_csv, ConditionCategory, FsInventory, ProjectConfig, RuleEngine, ScanFilter,
    ScanSummary, Violation, ViolationGroup, CONFIG_FILE_NAME,
};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Default export location, relative to the project directory.
pub const DEFAULT_EXPORT_PATH: &str = "Assets/AssetGuard_Results.csv";

/// Output format for scan results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Options collected from the command line.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Explicit configuration file; falls back to `<project>/assetguard.json`.
    pub config: Option<String>,
    pub max_violations: Option<usize>,
    /// `Some(None)` exports to [`DEFAULT_EXPORT_PATH`].
    pub export: Option<Option<String>>,
    /// Check names to disable for this run.
    pub skip: Vec<String>,
}

/// JSON output for the scan command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanOutput {
    /// Whether the scan found no violations.
    pub success: bool,
    pub project: String,
    pub summary: ScanSummary,
    pub violations: Vec<Violation>,
    /// Where the CSV report was written, if anywhere.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_path: Option<String>,
}

/// Run the scan command.
///
/// # Returns
/// Exit code: 0 if the project is clean, 1 if any violation was found or the
/// violation limit was reached
pub fn run(project: &str, options: &ScanOptions, format: OutputFormat) -> Result<ExitCode> {
    let project_dir = Path::new(project);
    if !project_dir.is_dir() {
        bail!("project directory not found: {}", project);
    }

    let mut config = load_config(project_dir, options.config.as_deref())?;
    if let Some(max) = options.max_violations {
        if max == 0 {
            bail!("--max-violations must be at least 1");
        }
        config.settings.max_violations = max;
    }
    apply_skips(&mut config.settings.filter, &options.skip)?;

    let inventory = FsInventory::new(project_dir);
    let mut engine = RuleEngine::new(config.rules, config.settings);
    let summary = engine.scan(&inventory);

    let export_path = match &options.export {
        Some(target) => {
            let path = target
                .as_ref()
                .map(PathBuf::from)
                .unwrap_or_else(|| project_dir.join(DEFAULT_EXPORT_PATH));
            let written = export_csv(&path, engine.violations())
                .with_context(|| format!("Failed to export results to {}", path.display()))?;
            written.then(|| path.display().to_string())
        }
        None => None,
    };

    // A cap of 0 (possible from a config file) records nothing but is not a pass.
    let success = summary.violations == 0 && !summary.truncated;
    match format {
        OutputFormat::Json => {
            let output = ScanOutput {
                success,
                project: project.to_string(),
                summary,
                violations: engine.violations().to_vec(),
                export_path,
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&output)
                    .expect("ScanOutput serialization should not fail")
            );
        }
        OutputFormat::Text => {
            print_text_output(project, &engine, &summary);
            match (&options.export, &export_path) {
                (Some(_), Some(path)) => println!("{} {}", "Exported:".cyan().bold(), path),
                (Some(_), None) => println!("{}", "Nothing to export".dimmed()),
                _ => {}
            }
        }
    }

    if success {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

/// Loads the configuration for a scan.
///
/// An explicit path must exist. Without one, the project's own config file is
/// used when present, otherwise the built-in defaults.
pub fn load_config(project_dir: &Path, explicit: Option<&str>) -> Result<ProjectConfig> {
    let path = match explicit {
        Some(path) => PathBuf::from(path),
        None => {
            let candidate = project_dir.join(CONFIG_FILE_NAME);
            if !candidate.is_file() {
                tracing::debug!("no {} in {}, using defaults", CONFIG_FILE_NAME, project_dir.display());
                return Ok(ProjectConfig::default());
            }
            candidate
        }
    };

    tracing::debug!("loading configuration from {}", path.display());
    ProjectConfig::from_file(&path)
        .with_context(|| format!("Failed to load configuration: {}", path.display()))
}

/// Disables the named checks in `filter`.
///
/// Accepts `special-folders`, `folders`, `conditions` and the typed category
/// names (case-insensitive, `graphics3d` is an alias for `model`).
pub fn apply_skips(filter: &mut ScanFilter, skip: &[String]) -> Result<()> {
    for name in skip {
        match name.to_lowercase().as_str() {
            "special-folders" => filter.special_folders = false,
            "folders" => filter.folders = false,
            "conditions" => filter.conditions = false,
            other => match parse_category(other) {
                Some(category) => filter.categories.remove(category),
                None => bail!(
                    "unknown check '{}', expected special-folders, folders, conditions or an asset category",
                    name
                ),
            },
        }
    }
    Ok(())
}

fn parse_category(name: &str) -> Option<ConditionCategory> {
    if name == "graphics3d" {
        return Some(ConditionCategory::Graphics3D);
    }
    ConditionCategory::ALL
        .into_iter()
        .find(|c| c.asset_category().name().eq_ignore_ascii_case(name))
}

/// Print scan results in human-readable text format.
fn print_text_output(project: &str, engine: &RuleEngine, summary: &ScanSummary) {
    println!("{} {}", "Scanning:".cyan().bold(), project);

    if engine.violations().is_empty() && !summary.truncated {
        println!(
            "\n{} No violations found {}",
            "PASSED".green().bold(),
            format!("({} ms)", summary.elapsed_ms).dimmed()
        );
        return;
    }

    for (group, count) in engine.sink().group_counts() {
        if count == 0 {
            continue;
        }
        println!("\n{}", format!("{} ({})", group.label(), count).red().bold());
        for violation in engine.violations().iter().filter(|v| v.group() == group) {
            print_violation(violation, marker(group));
        }
    }

    let mut line = format!(
        "{} violation(s) in {} ms",
        summary.violations, summary.elapsed_ms
    );
    if summary.truncated {
        line.push_str(", limit reached");
    }
    println!("\n{} {}", "FAILED".red().bold(), line.dimmed());
}

fn marker(group: ViolationGroup) -> colored::ColoredString {
    match group {
        ViolationGroup::WrongName | ViolationGroup::WrongLocation => "x".red(),
        _ => "!".yellow(),
    }
}

fn print_violation(violation: &Violation, marker: colored::ColoredString) {
    println!(
        "  {} [{}] {}",
        marker,
        violation.category.name(),
        violation.full_path()
    );
    if !violation.hint.is_empty() {
        println!("      {} {}", "expected:".dimmed(), violation.hint);
    }
}
