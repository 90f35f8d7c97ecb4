//! Patterns command implementation
//!
//! Lists the naming styles and the category suffixes they are combined with.

use anyhow::Result;
use assetguard_rules::pattern::category_suffix;
use assetguard_rules::{AssetCategory, NamingStyle};
use colored::Colorize;
use serde::Serialize;
use std::process::ExitCode;

#[derive(Debug, Serialize)]
struct StyleEntry {
    selector: u8,
    style: NamingStyle,
    grammar: &'static str,
    example: &'static str,
}

#[derive(Debug, Serialize)]
struct SuffixEntry {
    category: AssetCategory,
    suffix: &'static str,
}

#[derive(Debug, Serialize)]
struct PatternsOutput {
    styles: Vec<StyleEntry>,
    suffixes: Vec<SuffixEntry>,
}

fn collect() -> PatternsOutput {
    PatternsOutput {
        styles: NamingStyle::ALL
            .into_iter()
            .map(|style| StyleEntry {
                selector: style.selector(),
                style,
                grammar: style.grammar(),
                example: style.example(),
            })
            .collect(),
        suffixes: AssetCategory::ALL
            .into_iter()
            .map(|category| SuffixEntry {
                category,
                suffix: category_suffix(category),
            })
            .collect(),
    }
}

/// Run the patterns command.
pub fn run(json: bool) -> Result<ExitCode> {
    let output = collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{}", "Naming styles".cyan().bold());
    for entry in &output.styles {
        println!(
            "  {} {:<18} {}",
            entry.selector.to_string().bold(),
            format!("{:?}", entry.style),
            entry.example.dimmed()
        );
        println!("      {}", entry.grammar);
    }

    println!("\n{}", "Category suffixes".cyan().bold());
    for entry in &output.suffixes {
        let suffix = if entry.suffix.is_empty() {
            "(none)"
        } else {
            entry.suffix
        };
        println!("  {:<10} {}", entry.category.name(), suffix);
    }

    Ok(ExitCode::SUCCESS)
}
