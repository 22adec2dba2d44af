// Filesystem store - DashboardStore backed by tokio::fs
use crate::application::dashboard_store::DashboardStore;
use async_trait::async_trait;
use std::io;
use std::path::Path;

/// Reads dashboards from and writes documents to the local filesystem.
/// Output files are created or truncated; parent directories are not created.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsDashboardStore;

#[async_trait]
impl DashboardStore for FsDashboardStore {
    async fn read_dashboard(&self, path: &Path) -> io::Result<Vec<u8>> {
        tracing::debug!(file = %path.display(), "Reading dashboard");
        tokio::fs::read(path).await
    }

    async fn write_document(&self, path: &Path, contents: &str) -> io::Result<()> {
        tokio::fs::write(path, contents).await
    }
}
