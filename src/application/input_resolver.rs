// Input resolution - Turns the input argument into a list of dashboard files
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{Span, debug, warn};

const GLOB_CHARS: [char; 6] = ['*', '?', '[', ']', '{', '}'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Glob,
    File,
    Directory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInput {
    pub mode: InputMode,
    pub files: Vec<PathBuf>,
}

pub fn is_glob_pattern(input: &str) -> bool {
    input.contains(GLOB_CHARS)
}

/// Case-insensitive `.json` extension check.
pub fn has_json_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Resolves `input` as a glob pattern, a single file or a directory, in that
/// order of precedence.
pub async fn resolve_input(input: &str) -> Result<ResolvedInput> {
    if is_glob_pattern(input) {
        let pattern = input.to_string();
        let span = Span::current();
        return tokio::task::spawn_blocking(move || span.in_scope(|| expand_glob(&pattern)))
            .await
            .map_err(|source| Error::TaskFailed {
                path: PathBuf::from(input),
                source,
            })?;
    }

    let path = Path::new(input);
    match tokio::fs::metadata(path).await {
        Ok(metadata) if metadata.is_dir() => list_directory(path).await,
        Ok(_) => {
            if !has_json_extension(path) {
                return Err(Error::NotJson(path.to_path_buf()));
            }
            Ok(ResolvedInput {
                mode: InputMode::File,
                files: vec![path.to_path_buf()],
            })
        }
        Err(_) => Err(Error::InvalidInput(input.to_string())),
    }
}

fn expand_glob(pattern: &str) -> Result<ResolvedInput> {
    let paths = glob::glob(pattern).map_err(|source| Error::Pattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in paths {
        match entry {
            Ok(path) if has_json_extension(&path) => files.push(path),
            Ok(path) => debug!(file = %path.display(), "Skipping non-JSON file"),
            Err(e) => warn!(error = %e, "Skipping unreadable glob match"),
        }
    }

    Ok(ResolvedInput {
        mode: InputMode::Glob,
        files,
    })
}

/// Immediate (non-recursive) `.json` entries of `dir`, sorted by name.
async fn list_directory(dir: &Path) -> Result<ResolvedInput> {
    let read_dir_error = |source| Error::ReadDirectory {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await.map_err(read_dir_error)?;
    while let Some(entry) = entries.next_entry().await.map_err(read_dir_error)? {
        let is_dir = entry.file_type().await.map_err(read_dir_error)?.is_dir();
        let path = entry.path();
        if !is_dir && has_json_extension(&path) {
            files.push(path);
        }
    }
    files.sort();

    Ok(ResolvedInput {
        mode: InputMode::Directory,
        files,
    })
}
