// Documentation model built from a dashboard
use super::dashboard::{Dashboard, Panel};
use crate::promql::{self, ParseError};

/// Everything the markdown renderer needs for one dashboard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub title: String,
    pub description: String,
    pub panels: Vec<DocumentPanel>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentPanel {
    pub title: String,
    /// Newlines are escaped so the description stays inside one table cell.
    pub description: String,
    pub kind: String,
    pub metrics: Vec<String>,
}

impl Document {
    /// Builds the document from the flattened panels, skipping row panels.
    /// A single unparsable target expression fails the whole dashboard.
    pub fn from_dashboard(dashboard: &Dashboard) -> Result<Self, ParseError> {
        let panels = dashboard
            .panels()
            .iter()
            .filter(|panel| !panel.is_row())
            .map(DocumentPanel::from_panel)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            title: dashboard.title.clone(),
            description: dashboard.description.clone(),
            panels,
        })
    }
}

impl DocumentPanel {
    pub fn from_panel(panel: &Panel) -> Result<Self, ParseError> {
        let mut metrics = Vec::new();
        for target in &panel.targets {
            metrics.extend(promql::extract_metrics(&target.query())?);
        }

        Ok(Self {
            title: panel.title.clone(),
            description: panel.description.replace('\n', "\\n"),
            kind: panel.kind.clone(),
            metrics: promql::unique(metrics),
        })
    }
}
