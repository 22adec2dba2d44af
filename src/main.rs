// Main entry point - Settings, logging and dependency injection
mod application;
mod domain;
mod error;
mod infrastructure;
mod presentation;
mod promql;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{Instrument, error, info, info_span};

use crate::application::batch_processor::BatchProcessor;
use crate::application::documentation_service::DocumentationService;
use crate::error::Error;
use crate::infrastructure::config::load_settings;
use crate::infrastructure::fs_store::FsDashboardStore;
use crate::presentation::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let cli = Cli::parse();
    let settings = load_settings(cli.overrides()).context("failed to load settings")?;

    // Initialize tracing
    presentation::logging::init(settings.log_level);

    // Create store (infrastructure layer) and services (application layer)
    let store = Arc::new(FsDashboardStore);
    let service = DocumentationService::new(store);
    let processor = BatchProcessor::new(service);

    let span = info_span!(
        "autodoc",
        input = %settings.input,
        output = %settings.output.display(),
        log_level = %settings.log_level,
    );

    async {
        match processor.process(&settings.input, &settings.output).await {
            Ok(report) => {
                info!(count = report.written.len(), "Documentation generated");
                Ok(())
            }
            Err(Error::Batch(batch)) => {
                for failure in batch.failures() {
                    error!(file = %failure.path.display(), error = %failure.error, "Dashboard failed");
                }
                Err(anyhow::Error::from(batch))
            }
            Err(e) => {
                error!(error = %e, "Documentation failed");
                Err(anyhow::Error::from(e))
            }
        }
    }
    .instrument(span)
    .await
}
