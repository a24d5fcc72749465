//! Format command implementation.

use std::path::Path;

use colored::Colorize;
use serde_json::Value;

use super::check::describe;
use crate::codec::CodecError;
use crate::config::Settings;
use crate::document::{atomic_write, content_hash, read_document};
use crate::error::{Error, Result};
use crate::validate;

/// Execute the fmt command.
///
/// Decodes the document and re-encodes it, which drops unknown attribute
/// keys, restores field table key order and normalizes dates to the
/// configured policy. With `write`, the file is replaced atomically and only
/// when the canonical text differs from what is on disk.
///
/// # Errors
///
/// Returns `InvalidArgument` when `write` has no file to write to, and
/// decode, validation or I/O errors otherwise.
pub fn execute(
    file: Option<&Path>,
    pretty: bool,
    write: bool,
    settings: &Settings,
    json: bool,
) -> Result<()> {
    let target = file.filter(|path| *path != Path::new("-"));
    if write && target.is_none() {
        return Err(Error::InvalidArgument(
            "--write needs a file path, not stdin".to_string(),
        ));
    }

    let codec = settings.codec()?;
    let text = read_document(file)?;
    let value: Value = serde_json::from_str(&text).map_err(CodecError::from)?;
    let doc = codec.decode(&value)?;

    // Re-encoding drops unknown keys, so strict mode must see them first.
    if settings.strict {
        let mut findings = validate::check(&doc);
        findings.extend(validate::unknown_attributes(&value));
        if !findings.is_empty() {
            return Err(Error::Validation { findings });
        }
    }

    let mut output = if pretty {
        codec.to_json_pretty(&doc)?
    } else {
        codec.to_json(&doc)?
    };
    output.push('\n');

    let Some(path) = target.filter(|_| write) else {
        print!("{output}");
        return Ok(());
    };

    let changed = output != text;
    if changed {
        atomic_write(path, &output)?;
        tracing::info!(path = %path.display(), "rewrote document");
    }

    if json {
        let result = serde_json::json!({
            "path": describe(file),
            "changed": changed,
            "hash": content_hash(&doc)?,
        });
        println!("{}", serde_json::to_string(&result)?);
    } else if changed {
        println!("{} {}", "Formatted".green(), path.display());
    } else {
        println!("{} {}", "Unchanged".dimmed(), path.display());
    }
    Ok(())
}
