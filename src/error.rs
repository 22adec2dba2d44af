// Error types shared by the application and infrastructure layers
use crate::promql::ParseError;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("error reading dashboard file {}: {source}", .path.display())]
    ReadDashboard {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error unmarshalling dashboard json {}: {source}", .path.display())]
    DecodeDashboard {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("error parsing promql expression in {}: {source}", .path.display())]
    Query {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("error opening the corresponding markdown file {}: {source}", .path.display())]
    WriteMarkdown {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error reading directory {}: {source}", .path.display())]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid glob pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("input file must be a json file: {}", .0.display())]
    NotJson(PathBuf),

    #[error("input path is not a valid file, directory, or glob pattern: {0}")]
    InvalidInput(String),

    #[error("processing task for {} did not complete: {source}", .path.display())]
    TaskFailed {
        path: PathBuf,
        #[source]
        source: tokio::task::JoinError,
    },

    #[error(transparent)]
    Batch(#[from] BatchError),
}

/// One dashboard that could not be documented.
#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: Error,
}

/// Every per-file failure of a batch, in input order.
#[derive(Debug)]
pub struct BatchError {
    failures: Vec<FileFailure>,
    total: usize,
}

impl BatchError {
    pub fn new(failures: Vec<FileFailure>, total: usize) -> Self {
        Self { failures, total }
    }

    pub fn failures(&self) -> &[FileFailure] {
        &self.failures
    }

    pub fn total(&self) -> usize {
        self.total
    }
}

impl fmt::Display for BatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} dashboard files failed:",
            self.failures.len(),
            self.total
        )?;
        for failure in &self.failures {
            write!(f, "\n  * {}", failure.error)?;
        }
        Ok(())
    }
}

impl std::error::Error for BatchError {}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_error_lists_every_failure() {
        let failures = vec![
            FileFailure {
                path: PathBuf::from("a.json"),
                error: Error::NotJson(PathBuf::from("a.json")),
            },
            FileFailure {
                path: PathBuf::from("b.json"),
                error: Error::ReadDashboard {
                    path: PathBuf::from("b.json"),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
                },
            },
        ];
        let err = BatchError::new(failures, 5);
        let message = err.to_string();

        assert_eq!(err.failures().len(), 2);
        assert_eq!(err.total(), 5);
        assert!(message.starts_with("2 of 5 dashboard files failed:"));
        assert!(message.contains("input file must be a json file: a.json"));
        assert!(message.contains("error reading dashboard file b.json: missing"));
        assert_eq!(message.lines().count(), 3);
    }

    #[test]
    fn test_batch_error_is_transparent() {
        let err = Error::from(BatchError::new(Vec::new(), 0));
        assert_eq!(err.to_string(), "0 of 0 dashboard files failed:");
    }
}
