// Markdown rendering for dashboard documents
use crate::domain::document::{Document, DocumentPanel};
use std::fmt::Write;

const TABLE_HEADER: &str = "| Panel Name | Panel Description | Panel Type | Metrics Used |\n\
                            | ---------- | ----------------- | ---------- | -------- |";

/// Renders the document as a title, a description and one table row per
/// panel. The output has no trailing newline.
pub fn render(document: &Document) -> String {
    let mut out = String::new();
    out.push_str("# ");
    out.push_str(&document.title);
    out.push('\n');
    out.push_str(&document.description);
    out.push_str("\n\n");
    out.push_str(TABLE_HEADER);

    for panel in &document.panels {
        out.push('\n');
        push_row(&mut out, panel);
    }
    out
}

fn push_row(out: &mut String, panel: &DocumentPanel) {
    // Writing to a String cannot fail.
    let _ = write!(out, "| {} | {} | {} |", panel.title, panel.description, panel.kind);
    for metric in &panel.metrics {
        let _ = write!(out, " `{}`<br>", metric);
    }
    out.push_str(" |");
}
