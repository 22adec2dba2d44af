// Documentation service - Use case for documenting a single dashboard file
use crate::application::dashboard_store::DashboardStore;
use crate::domain::dashboard::Dashboard;
use crate::domain::document::Document;
use crate::error::{Error, Result};
use crate::infrastructure::markdown;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info};

#[derive(Clone)]
pub struct DocumentationService {
    store: Arc<dyn DashboardStore>,
}

impl DocumentationService {
    pub fn new(store: Arc<dyn DashboardStore>) -> Self {
        Self { store }
    }

    /// Reads one dashboard, renders its documentation and writes it to
    /// `output_dir`. Returns the path of the written markdown file.
    pub async fn document_file(&self, dashboard: &Path, output_dir: &Path) -> Result<PathBuf> {
        debug!("processing file");

        let bytes = self.store.read_dashboard(dashboard).await.map_err(|source| {
            error!(error = %source, "error reading json file");
            Error::ReadDashboard {
                path: dashboard.to_path_buf(),
                source,
            }
        })?;

        let parsed: Dashboard = serde_json::from_slice(&bytes).map_err(|source| {
            error!(error = %source, "error unmarshalling dashboard json");
            Error::DecodeDashboard {
                path: dashboard.to_path_buf(),
                source,
            }
        })?;

        let document = Document::from_dashboard(&parsed).map_err(|source| {
            error!(error = %source, expr = %source.expr, "error parsing promql expression");
            Error::Query {
                path: dashboard.to_path_buf(),
                source,
            }
        })?;

        let markdown_file = output_path(dashboard, output_dir);
        let contents = markdown::render(&document);
        self.store
            .write_document(&markdown_file, &contents)
            .await
            .map_err(|source| {
                error!(error = %source, markdown_file = %markdown_file.display(), "error writing md file");
                Error::WriteMarkdown {
                    path: markdown_file.clone(),
                    source,
                }
            })?;

        info!(
            markdown_file = %markdown_file.display(),
            panels = document.panels.len(),
            "wrote dashboard documentation"
        );
        Ok(markdown_file)
    }
}

/// `<output_dir>/<file name without a trailing .json>.md`
pub fn output_path(dashboard: &Path, output_dir: &Path) -> PathBuf {
    let file_name = dashboard
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = file_name.strip_suffix(".json").unwrap_or(&file_name);
    output_dir.join(format!("{}.md", stem))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory store used by service and batch tests.
    #[derive(Default)]
    pub(crate) struct MemoryStore {
        pub(crate) dashboards: Mutex<HashMap<PathBuf, Vec<u8>>>,
        pub(crate) documents: Mutex<HashMap<PathBuf, String>>,
    }

    impl MemoryStore {
        pub(crate) fn with_dashboard(self, path: &str, json: &str) -> Self {
            self.dashboards
                .lock()
                .unwrap()
                .insert(PathBuf::from(path), json.as_bytes().to_vec());
            self
        }

        pub(crate) fn document(&self, path: &str) -> Option<String> {
            self.documents.lock().unwrap().get(Path::new(path)).cloned()
        }
    }

    #[async_trait]
    impl DashboardStore for MemoryStore {
        async fn read_dashboard(&self, path: &Path) -> std::io::Result<Vec<u8>> {
            self.dashboards
                .lock()
                .unwrap()
                .get(path)
                .cloned()
                .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"))
        }

        async fn write_document(&self, path: &Path, contents: &str) -> std::io::Result<()> {
            if !path.starts_with("out") {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "no such directory",
                ));
            }
            self.documents
                .lock()
                .unwrap()
                .insert(path.to_path_buf(), contents.to_string());
            Ok(())
        }
    }

    const ROUND_TRIP: &str = r#"{"title":"T","description":"D","panels":[{"title":"P1","description":"d1","type":"graph","targets":[{"expr":"up"}]}]}"#;

    fn service(store: MemoryStore) -> (DocumentationService, Arc<MemoryStore>) {
        let store = Arc::new(store);
        (DocumentationService::new(store.clone()), store)
    }

    #[test]
    fn test_output_path() {
        assert_eq!(
            output_path(Path::new("dashboards/node.json"), Path::new("docs")),
            PathBuf::from("docs/node.md")
        );
        assert_eq!(
            output_path(Path::new("NODE.JSON"), Path::new(".")),
            PathBuf::from("./NODE.JSON.md")
        );
    }

    #[tokio::test]
    async fn test_document_file_round_trip() {
        let (service, store) = service(MemoryStore::default().with_dashboard("in/dash.json", ROUND_TRIP));

        let written = service
            .document_file(Path::new("in/dash.json"), Path::new("out"))
            .await
            .unwrap();
        assert_eq!(written, PathBuf::from("out/dash.md"));

        let markdown = store.document("out/dash.md").unwrap();
        assert!(markdown.starts_with("# T\nD\n"));
        assert!(markdown.contains("| P1 | d1 | graph | `up`<br> |"));
    }

    #[tokio::test]
    async fn test_document_file_empty_json() {
        let (service, store) = service(MemoryStore::default().with_dashboard("in/empty.json", ""));

        let err = service
            .document_file(Path::new("in/empty.json"), Path::new("out"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::DecodeDashboard { .. }));
        assert!(err.to_string().contains("error unmarshalling dashboard json"));
        assert!(store.documents.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_document_file_bad_query() {
        let json = r#"{"title":"T","panels":[{"type":"graph","targets":[{"expr":"sum(rate(foo[5m])"}]}]}"#;
        let (service, store) = service(MemoryStore::default().with_dashboard("in/bad.json", json));

        let err = service
            .document_file(Path::new("in/bad.json"), Path::new("out"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Query { .. }));
        assert!(err.to_string().contains("error parsing promql expression"));
        assert!(store.documents.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_document_file_bad_schema() {
        let json = r#"{"title":"T","panels":{"type":"graph"}}"#;
        let (service, _) = service(MemoryStore::default().with_dashboard("in/schema.json", json));

        let err = service
            .document_file(Path::new("in/schema.json"), Path::new("out"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("error unmarshalling dashboard json"));
    }

    #[tokio::test]
    async fn test_document_file_missing_input() {
        let (service, _) = service(MemoryStore::default());

        let err = service
            .document_file(Path::new("in/missing.json"), Path::new("out"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("error reading dashboard file"));
    }

    #[tokio::test]
    async fn test_document_file_unwritable_output() {
        let (service, _) = service(MemoryStore::default().with_dashboard("in/dash.json", ROUND_TRIP));

        let err = service
            .document_file(Path::new("in/dash.json"), Path::new("missing/dir"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::WriteMarkdown { .. }));
        assert!(err.to_string().contains("error opening the corresponding markdown file"));
    }
}
