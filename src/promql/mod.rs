// PromQL parsing and metric extraction
pub mod metrics;
pub mod parser;

pub use metrics::{extract_metrics, unique};
pub use parser::{ParseError, parse};
