// Metric name extraction over the PromQL AST
use super::parser::{ParseError, parse};
use promql_parser::label::MatchOp;
use promql_parser::parser::{Expr, VectorSelector};
use std::collections::HashSet;

/// Label holding the metric name when it is written as a matcher.
pub const METRIC_NAME_LABEL: &str = "__name__";

/// Callbacks for [`walk`]. Every node is offered to `visit_expr` before its
/// children; selectors are additionally offered to `visit_selector`.
pub trait Visitor {
    fn visit_expr(&mut self, _expr: &Expr) {}

    fn visit_selector(&mut self, _selector: &VectorSelector) {}
}

/// Depth-first, pre-order, left-to-right traversal. An aggregation's
/// parameter is visited before its body.
pub fn walk<V: Visitor>(expr: &Expr, visitor: &mut V) {
    visitor.visit_expr(expr);
    match expr {
        Expr::VectorSelector(selector) => visitor.visit_selector(selector),
        Expr::MatrixSelector(matrix) => visitor.visit_selector(&matrix.vs),
        Expr::Subquery(subquery) => walk(&subquery.expr, visitor),
        Expr::Call(call) => {
            for arg in &call.args.args {
                walk(arg, visitor);
            }
        }
        Expr::Aggregate(agg) => {
            if let Some(param) = &agg.param {
                walk(param, visitor);
            }
            walk(&agg.expr, visitor);
        }
        Expr::Binary(binary) => {
            walk(&binary.lhs, visitor);
            walk(&binary.rhs, visitor);
        }
        Expr::Unary(unary) => walk(&unary.expr, visitor),
        Expr::Paren(paren) => walk(&paren.expr, visitor),
        // Literals and extensions reference no metric.
        _ => {}
    }
}

/// Name of the referenced metric, either written in front of the braces or
/// given as an equality matcher on `__name__`.
pub fn metric_name(selector: &VectorSelector) -> Option<&str> {
    selector.name.as_deref().or_else(|| {
        selector
            .matchers
            .matchers
            .iter()
            .find(|m| m.name == METRIC_NAME_LABEL && matches!(m.op, MatchOp::Equal))
            .map(|m| m.value.as_str())
    })
}

#[derive(Default)]
struct MetricNameVisitor {
    names: Vec<String>,
}

impl Visitor for MetricNameVisitor {
    fn visit_selector(&mut self, selector: &VectorSelector) {
        // Label-only selectors such as {job="api"} reference no metric.
        if let Some(name) = metric_name(selector) {
            self.names.push(name.to_string());
        }
    }
}

/// Metric names referenced by `expr` in reading order, duplicates included.
pub fn metric_names(expr: &Expr) -> Vec<String> {
    let mut visitor = MetricNameVisitor::default();
    walk(expr, &mut visitor);
    visitor.names
}

/// Parses `query` and returns the metric names it references.
pub fn extract_metrics(query: &str) -> Result<Vec<String>, ParseError> {
    let expr = parse(query)?;
    let names = metric_names(&expr);
    tracing::trace!(query, metrics = names.len(), "Parsed query");
    Ok(names)
}

/// Removes duplicates, keeping the first occurrence of each element.
pub fn unique<T, I>(items: I) -> Vec<T>
where
    T: Eq + std::hash::Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
