//! Batch generation of agreement documents into one ZIP archive.
//!
//! Records are processed in input order. A record that fails to render is
//! logged and skipped; the rest of the batch still completes. Only a failure
//! while assembling the archive itself aborts the call.

use std::collections::HashSet;
use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::{agreement, GeneratorError};
use crate::contract::models::ContractRecord;

/// Result of a batch run: the archive plus the records that did not make it.
#[derive(Debug)]
pub struct BatchArchive {
    pub bytes: Vec<u8>,
    pub skipped: Vec<SkippedContract>,
}

/// One record left out of a batch archive, with the render error that
/// caused it.
#[derive(Debug)]
pub struct SkippedContract {
    pub contract_number: String,
    pub reason: String,
}

/// Keep only alphanumerics, `.`, `_`, `-` and spaces, then trim. Falls back
/// to `fallback` when nothing survives.
pub fn sanitize_component(raw: &str, fallback: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '.' | '_' | '-' | ' '))
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        fallback.to_string()
    } else {
        cleaned.to_string()
    }
}

/// Generate every record into a single archive.
///
/// Entry names come from the sanitized Party B signature name; the first
/// record claims the bare `{name}.docx`, later records with the same name
/// get `{name}_{contract_number}_{counter}.docx`. Names are claimed in
/// input order before rendering, so naming does not depend on which
/// records succeed.
pub fn generate_batch(records: &[ContractRecord]) -> Result<BatchArchive, GeneratorError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default());

    let mut used_names: HashSet<String> = HashSet::new();
    let mut skipped = Vec::new();

    for (index, record) in records.iter().enumerate() {
        let base = sanitize_component(&record.party_b_signature_name, &format!("Unknown_{index}"));
        let contract_part =
            sanitize_component(&record.contract_number, &format!("Contract_{index}"));

        let mut filename = format!("{base}.docx");
        if used_names.contains(&filename) {
            let mut counter = 1usize;
            loop {
                let candidate = format!("{base}_{contract_part}_{counter}.docx");
                if !used_names.contains(&candidate) {
                    filename = candidate;
                    break;
                }
                counter += 1;
            }
        }
        used_names.insert(filename.clone());

        let bytes = match agreement::render(record) {
            Ok(bytes) => bytes,
            Err(err) => {
                log::warn!(
                    "skipping contract {} in batch generation: {}",
                    record.contract_number,
                    err
                );
                skipped.push(SkippedContract {
                    contract_number: record.contract_number.clone(),
                    reason: err.to_string(),
                });
                continue;
            }
        };

        writer.start_file(filename.as_str(), options)?;
        writer.write_all(&bytes)?;
    }

    let cursor = writer.finish()?;
    Ok(BatchArchive {
        bytes: cursor.into_inner(),
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_component_strips_punctuation() {
        assert_eq!(sanitize_component("Mr. SEAN Bunrith", "x"), "Mr. SEAN Bunrith");
        assert_eq!(sanitize_component("a/b\\c:d", "x"), "abcd");
        assert_eq!(sanitize_component("  trimmed  ", "x"), "trimmed");
    }

    #[test]
    fn test_sanitize_component_falls_back_when_emptied() {
        assert_eq!(sanitize_component("///", "Unknown_3"), "Unknown_3");
        assert_eq!(sanitize_component("", "Unknown_0"), "Unknown_0");
    }
}
