use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use crate::shared::constants::{EXIFTOOL_BINARY, READ_TAG_FIELDS, TAG_FIELDS};
use crate::tagging::domain::metadata_store::{MetadataError, MetadataStore};
use crate::tagging::infrastructure::tool_locator::{self, MissingToolError};

/// Reads and writes person tags by shelling out to `exiftool`.
///
/// Names are added to `Keywords`, `Subject` and `HierarchicalSubject` with
/// exiftool's `-TAG-=VALUE -TAG+=VALUE` idiom, which appends a value only
/// when it is not already present. Only the given names appear on the
/// command line, so other entries are never touched.
pub struct ExiftoolMetadataStore {
    executable: PathBuf,
}

impl ExiftoolMetadataStore {
    pub fn new(executable: PathBuf) -> Self {
        Self { executable }
    }

    /// Finds `exiftool` on PATH; failing here is fatal for the whole run.
    pub fn locate() -> Result<Self, MissingToolError> {
        let executable = tool_locator::locate(EXIFTOOL_BINARY)?;
        log::debug!("Using exiftool at {}", executable.display());
        Ok(Self::new(executable))
    }

    fn run(&self, path: &Path, args: &[String]) -> Result<Output, MetadataError> {
        let output = Command::new(&self.executable)
            .args(args)
            .arg(path)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| MetadataError::Spawn {
                path: path.to_path_buf(),
                source,
            })?;

        if !output.status.success() {
            return Err(MetadataError::ToolFailed {
                path: path.to_path_buf(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(output)
    }
}

impl MetadataStore for ExiftoolMetadataStore {
    fn read_tags(&self, path: &Path) -> Result<Vec<String>, MetadataError> {
        let output = self.run(path, &read_args())?;
        parse_tags_json(path, &output.stdout)
    }

    fn write_tags(&self, path: &Path, names: &[String]) -> Result<(), MetadataError> {
        if names.is_empty() {
            return Ok(());
        }
        self.run(path, &write_args(names))?;
        log::debug!("Added {} name(s) to {}", names.len(), path.display());
        Ok(())
    }
}

fn read_args() -> Vec<String> {
    let mut args = vec!["-j".to_string()];
    args.extend(READ_TAG_FIELDS.iter().map(|field| format!("-{field}")));
    args
}

fn write_args(names: &[String]) -> Vec<String> {
    let mut args = vec!["-overwrite_original".to_string()];
    for field in TAG_FIELDS {
        for name in names {
            args.push(format!("-{field}-={name}"));
            args.push(format!("-{field}+={name}"));
        }
    }
    args
}

/// Extracts tags from `exiftool -j` output, de-duplicated in field order.
///
/// Single-valued fields come back as scalars, list fields as arrays; purely
/// numeric keywords are emitted as JSON numbers.
fn parse_tags_json(path: &Path, stdout: &[u8]) -> Result<Vec<String>, MetadataError> {
    let parse_err = |reason: String| MetadataError::Parse {
        path: path.to_path_buf(),
        reason,
    };

    let value: serde_json::Value =
        serde_json::from_slice(stdout).map_err(|e| parse_err(e.to_string()))?;
    let record = value
        .as_array()
        .and_then(|records| records.first())
        .and_then(|record| record.as_object())
        .ok_or_else(|| parse_err("expected a JSON array with one object".to_string()))?;

    let mut tags: Vec<String> = Vec::new();
    for field in READ_TAG_FIELDS {
        let Some(value) = record.get(*field) else {
            continue;
        };
        let values = match value {
            serde_json::Value::Array(items) => items.iter().collect(),
            other => vec![other],
        };
        for item in values {
            let Some(tag) = scalar_to_string(item) else {
                continue;
            };
            if !tag.is_empty() && !tags.contains(&tag) {
                tags.push(tag);
            }
        }
    }
    Ok(tags)
}

fn scalar_to_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.trim().to_string()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn parse(json: &str) -> Result<Vec<String>, MetadataError> {
        parse_tags_json(Path::new("photo.jpg"), json.as_bytes())
    }

    #[test]
    fn test_parse_list_and_scalar_fields() {
        let json = r#"[{"SourceFile":"photo.jpg","Keywords":["Alice","Holiday"],"Subject":"Bob"}]"#;
        assert_eq!(parse(json).unwrap(), tags(&["Alice", "Holiday", "Bob"]));
    }

    #[test]
    fn test_parse_deduplicates_across_fields() {
        let json = r#"[{"SourceFile":"photo.jpg","Keywords":["Alice"],"Subject":["Alice","Bob"]}]"#;
        assert_eq!(parse(json).unwrap(), tags(&["Alice", "Bob"]));
    }

    #[test]
    fn test_parse_numeric_keywords() {
        let json = r#"[{"SourceFile":"photo.jpg","Keywords":[2019,"Zoë"]}]"#;
        assert_eq!(parse(json).unwrap(), tags(&["2019", "Zoë"]));
    }

    #[test]
    fn test_parse_untagged_file() {
        let json = r#"[{"SourceFile":"photo.jpg"}]"#;
        assert!(parse(json).unwrap().is_empty());
    }

    #[test]
    fn test_parse_garbage_is_error() {
        assert!(matches!(parse("Error: oops"), Err(MetadataError::Parse { .. })));
        assert!(matches!(parse("[]"), Err(MetadataError::Parse { .. })));
    }

    #[test]
    fn test_read_args_request_json() {
        assert_eq!(read_args(), tags(&["-j", "-Keywords", "-Subject"]));
    }

    #[test]
    fn test_write_args_use_add_without_duplicate_idiom() {
        let args = write_args(&tags(&["Alice", "Bob"]));
        assert_eq!(args[0], "-overwrite_original");
        assert!(args.contains(&"-Keywords-=Alice".to_string()));
        assert!(args.contains(&"-Keywords+=Alice".to_string()));
        assert!(args.contains(&"-Subject+=Bob".to_string()));
        assert!(args.contains(&"-HierarchicalSubject+=Bob".to_string()));
        assert_eq!(args.len(), 1 + 3 * 2 * 2);
    }

    #[test]
    fn test_write_args_mention_only_given_names() {
        let args = write_args(&tags(&["Bob"]));
        assert_eq!(
            args,
            tags(&[
                "-overwrite_original",
                "-Keywords-=Bob",
                "-Keywords+=Bob",
                "-Subject-=Bob",
                "-Subject+=Bob",
                "-HierarchicalSubject-=Bob",
                "-HierarchicalSubject+=Bob",
            ])
        );
    }

    #[test]
    fn test_write_empty_tags_is_noop() {
        let store = ExiftoolMetadataStore::new(PathBuf::from("/nonexistent/exiftool"));
        assert!(store.write_tags(Path::new("photo.jpg"), &[]).is_ok());
    }

    #[test]
    fn test_missing_executable_is_spawn_error() {
        let store = ExiftoolMetadataStore::new(PathBuf::from("/nonexistent/exiftool"));
        let result = store.read_tags(Path::new("photo.jpg"));
        assert!(matches!(result, Err(MetadataError::Spawn { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_is_tool_failure() {
        let store = ExiftoolMetadataStore::new(PathBuf::from("false"));
        let result = store.write_tags(Path::new("photo.jpg"), &tags(&["Alice"]));
        assert!(matches!(result, Err(MetadataError::ToolFailed { .. })));
    }
}
