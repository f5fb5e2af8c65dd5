use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
#[error("required tool `{name}` was not found on PATH; install it and try again")]
pub struct MissingToolError {
    pub name: String,
}

/// Resolves an executable on the system search path.
pub fn locate(name: &str) -> Result<PathBuf, MissingToolError> {
    which::which(name).map_err(|e| {
        log::debug!("Lookup of {name} failed: {e}");
        MissingToolError {
            name: name.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tool_is_reported_by_name() {
        let err = locate("face-tagger-no-such-tool-4f2a").unwrap_err();
        assert_eq!(err.name, "face-tagger-no-such-tool-4f2a");
        assert!(err.to_string().contains("face-tagger-no-such-tool-4f2a"));
    }

    #[cfg(unix)]
    #[test]
    fn test_locates_shell() {
        let path = locate("sh").unwrap();
        assert!(path.is_absolute());
    }
}
