// Storage trait for dashboard input and documentation output
use async_trait::async_trait;
use std::path::Path;

#[async_trait]
pub trait DashboardStore: Send + Sync {
    /// Read the raw bytes of a dashboard definition
    async fn read_dashboard(&self, path: &Path) -> std::io::Result<Vec<u8>>;

    /// Create or truncate `path` and write the rendered documentation
    async fn write_document(&self, path: &Path, contents: &str) -> std::io::Result<()>;
}
