// Dashboard domain model
use serde::{Deserialize, Deserializer};

/// Panel type used by Grafana for collapsible row groups.
pub const ROW_PANEL_TYPE: &str = "row";

/// Grafana template variables that only make sense at query time. They are
/// swapped for a fixed range so the expression can be parsed.
const PLACEHOLDERS: [(&str, &str); 3] = [
    ("$__rate_interval", "1m"),
    ("$__range", "1m"),
    ("$interval", "1m"),
];

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Dashboard {
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
    #[serde(default, deserialize_with = "nullable")]
    pub panels: Vec<RowPanel>,
}

/// A top-level panel. Collapsed rows carry their children in `panels`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RowPanel {
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
    #[serde(default, rename = "type", deserialize_with = "nullable")]
    pub kind: String,
    #[serde(default, deserialize_with = "nullable")]
    pub targets: Vec<Target>,
    #[serde(default, deserialize_with = "nullable")]
    pub panels: Vec<Panel>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Panel {
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
    #[serde(default, rename = "type", deserialize_with = "nullable")]
    pub kind: String,
    #[serde(default, deserialize_with = "nullable")]
    pub targets: Vec<Target>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Target {
    #[serde(default, deserialize_with = "nullable")]
    pub expr: String,
}

/// Treats an explicit `null` like a missing field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Dashboard {
    /// Flattens the panel hierarchy one level deep: for every top-level
    /// panel its children come first, followed by the panel itself.
    pub fn panels(&self) -> Vec<Panel> {
        let mut panels = Vec::new();
        for row in &self.panels {
            panels.extend(row.panels.iter().cloned());
            panels.push(row.to_panel());
        }
        panels
    }
}

impl RowPanel {
    /// Copies the row's own metadata into a plain panel, dropping children.
    pub fn to_panel(&self) -> Panel {
        Panel {
            title: self.title.clone(),
            description: self.description.clone(),
            kind: self.kind.clone(),
            targets: self.targets.clone(),
        }
    }
}

impl Panel {
    pub fn is_row(&self) -> bool {
        self.kind == ROW_PANEL_TYPE
    }
}

impl Target {
    /// The target expression with Grafana placeholders replaced.
    pub fn query(&self) -> String {
        substitute_placeholders(&self.expr)
    }
}

/// Replaces every placeholder in a single left-to-right pass, so a
/// replacement is never itself rewritten.
pub fn substitute_placeholders(expr: &str) -> String {
    let mut result = String::with_capacity(expr.len());
    let mut rest = expr;

    while let Some(idx) = rest.find('$') {
        result.push_str(&rest[..idx]);
        rest = &rest[idx..];
        match PLACEHOLDERS.iter().find(|(key, _)| rest.starts_with(key)) {
            Some((key, value)) => {
                result.push_str(value);
                rest = &rest[key.len()..];
            }
            None => {
                result.push('$');
                rest = &rest[1..];
            }
        }
    }

    result.push_str(rest);
    result
}
