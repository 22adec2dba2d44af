// Batch processor - Fans dashboard files out to one task each
use crate::application::documentation_service::DocumentationService;
use crate::application::input_resolver::{InputMode, resolve_input};
use crate::error::{BatchError, Error, FileFailure, Result};
use futures::future::join_all;
use std::path::{Path, PathBuf};
use tracing::{Instrument, info, info_span, warn};

/// Markdown files written by a successful batch, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub written: Vec<PathBuf>,
}

#[derive(Clone)]
pub struct BatchProcessor {
    service: DocumentationService,
}

impl BatchProcessor {
    pub fn new(service: DocumentationService) -> Self {
        Self { service }
    }

    /// Documents every dashboard `input` resolves to. All tasks run to
    /// completion; failures are reported together once they have.
    pub async fn process(&self, input: &str, output_dir: &Path) -> Result<BatchReport> {
        let resolved = resolve_input(input).await?;
        if resolved.files.is_empty() {
            warn!(input, "No JSON files found");
            return Ok(BatchReport::default());
        }

        let total = resolved.files.len();
        info!(count = total, "Processing dashboard files");

        let handles: Vec<_> = resolved
            .files
            .iter()
            .map(|file| {
                let service = self.service.clone();
                let file = file.clone();
                let output_dir = output_dir.to_path_buf();
                let span = info_span!("dashboard", file = %file.display());
                tokio::spawn(
                    async move { service.document_file(&file, &output_dir).await }
                        .instrument(span),
                )
            })
            .collect();

        let mut report = BatchReport::default();
        let mut failures = Vec::new();
        for (file, joined) in resolved.files.into_iter().zip(join_all(handles).await) {
            match joined {
                Ok(Ok(written)) => report.written.push(written),
                Ok(Err(error)) => failures.push(FileFailure { path: file, error }),
                Err(source) => failures.push(FileFailure {
                    error: Error::TaskFailed {
                        path: file.clone(),
                        source,
                    },
                    path: file,
                }),
            }
        }

        if failures.is_empty() {
            return Ok(report);
        }

        warn!(failed = failures.len(), total, "Some dashboard files failed");
        if resolved.mode == InputMode::File {
            if let Some(failure) = failures.pop() {
                return Err(failure.error);
            }
        }
        Err(BatchError::new(failures, total).into())
    }
}
