use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::video::domain::media_kind::MediaKind;

/// Files to process plus the inputs that had to be skipped.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CollectedInputs {
    pub files: Vec<PathBuf>,
    pub skipped: Vec<(PathBuf, String)>,
}

/// Expands the user's input paths into a de-duplicated file list.
///
/// Directories contribute their supported media files (non-recursive, sorted
/// by name). Explicit files are kept as given even with an unknown extension
/// so the decoder can report them. Duplicates are detected by canonical path;
/// the first occurrence wins.
pub fn collect_inputs(inputs: &[PathBuf]) -> CollectedInputs {
    let mut collected = CollectedInputs::default();
    let mut seen: HashSet<PathBuf> = HashSet::new();

    for input in inputs {
        if input.is_dir() {
            log::info!("Adding supported files in {}", input.display());
            match supported_files_in(input) {
                Ok(files) => {
                    for file in files {
                        push_unique(&mut collected.files, &mut seen, file);
                    }
                }
                Err(e) => collected.skipped.push((input.clone(), e.to_string())),
            }
        } else if input.is_file() {
            push_unique(&mut collected.files, &mut seen, input.clone());
        } else {
            collected
                .skipped
                .push((input.clone(), "no such file or directory".to_string()));
        }
    }

    collected
}

fn supported_files_in(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && MediaKind::of(&path).is_some() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn push_unique(files: &mut Vec<PathBuf>, seen: &mut HashSet<PathBuf>, path: PathBuf) {
    let key = fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
    if seen.insert(key) {
        files.push(path);
    } else {
        log::debug!("Ignoring duplicate input {}", path.display());
    }
}
