//! Check command implementation.
//!
//! Decodes a document with the configured date policy, then reports what it
//! holds and any validation findings. Decode failures are errors; findings
//! are advisory unless `--strict` is in effect.

use std::path::Path;

use colored::Colorize;
use serde_json::Value;

use crate::codec::CodecError;
use crate::config::Settings;
use crate::document::{Stats, content_hash, read_document};
use crate::error::{Error, Result};
use crate::validate::{self, Finding};

/// Execute the check command.
///
/// # Errors
///
/// Returns decode errors, I/O errors, and `Error::Validation` when strict
/// mode is on and the document has findings.
pub fn execute(file: Option<&Path>, settings: &Settings, json: bool) -> Result<()> {
    let text = read_document(file)?;
    let value: Value = serde_json::from_str(&text).map_err(CodecError::from)?;
    let doc = settings.codec()?.decode(&value)?;

    let mut findings = validate::check(&doc);
    findings.extend(validate::unknown_attributes(&value));
    tracing::debug!(findings = findings.len(), "validated document");

    if settings.strict && !findings.is_empty() {
        return Err(Error::Validation { findings });
    }

    let stats = Stats::of(&doc);
    let hash = content_hash(&doc)?;
    let source = describe(file);

    if json {
        let output = serde_json::json!({
            "valid": true,
            "source": source,
            "hash": hash,
            "stats": stats,
            "findings": findings.iter().map(ToString::to_string).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    if stats.is_empty() {
        println!("{} {source}: empty document", "✓".green());
    } else {
        println!(
            "{} {source}: {} envelopes",
            "✓".green(),
            stats.total()
        );
        println!();
        print_count("To-dos:", stats.todos);
        print_count("Projects:", stats.projects);
        print_count("Project to-dos:", stats.project_todos);
        print_count("Headings:", stats.headings);
        print_count("Checklist items:", stats.checklist_items);
        print_count("Updates:", stats.updates);
    }
    println!();
    println!("  Hash: {}", hash.dimmed());

    print_findings(&findings);
    Ok(())
}

fn print_count(label: &str, count: usize) {
    if count > 0 {
        println!("  {label:<17}{count}");
    }
}

fn print_findings(findings: &[Finding]) {
    if findings.is_empty() {
        return;
    }
    println!();
    println!("{}", format!("{} warning(s)", findings.len()).yellow().bold());
    for finding in findings {
        println!("  {finding}");
    }
}

/// Display name for the input.
pub(crate) fn describe(file: Option<&Path>) -> String {
    match file {
        Some(path) if path != Path::new("-") => path.display().to_string(),
        _ => "<stdin>".to_string(),
    }
}
