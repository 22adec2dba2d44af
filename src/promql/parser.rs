// PromQL expression parsing
//
// Grammar and AST come from `promql-parser`. Queries are screened for
// nesting depth first so a pathological expression fails its dashboard
// instead of exhausting the task's stack.
use promql_parser::parser::Expr;
use thiserror::Error;

/// Deepest syntax tree accepted, counting brackets and chained operators.
pub const MAX_NESTING_DEPTH: usize = 128;

/// A malformed PromQL expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("error parsing promql expression {expr:?}: {reason}")]
pub struct ParseError {
    pub expr: String,
    pub reason: String,
}

impl ParseError {
    fn new(expr: &str, reason: impl Into<String>) -> Self {
        Self {
            expr: expr.to_string(),
            reason: reason.into(),
        }
    }
}

/// Parses a complete PromQL expression.
pub fn parse(input: &str) -> Result<Expr, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError::new(input, "no expression found in input"));
    }
    if nesting_depth(input) > MAX_NESTING_DEPTH {
        return Err(ParseError::new(input, "expression nested too deeply"));
    }
    promql_parser::parser::parse(input).map_err(|reason| ParseError::new(input, reason))
}

/// Upper bound on the syntax tree depth of `query`: open `(` and `[` levels
/// plus the operators chained inside each of them. Quoted text, label
/// matchers and comments are skipped. Stops counting once past the limit.
fn nesting_depth(query: &str) -> usize {
    let mut levels: Vec<usize> = vec![0];
    let mut operators = 0;
    let mut deepest = 0;
    let mut chars = query.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' | '\'' | '`' => skip_quoted(&mut chars, c),
            '#' => {
                for c in chars.by_ref() {
                    if c == '\n' {
                        break;
                    }
                }
            }
            '{' => {
                while let Some(c) = chars.next() {
                    match c {
                        '}' => break,
                        '"' | '\'' | '`' => skip_quoted(&mut chars, c),
                        _ => {}
                    }
                }
            }
            '(' | '[' => levels.push(0),
            ')' | ']' => {
                if levels.len() > 1 {
                    operators -= levels.pop().unwrap_or(0);
                }
            }
            '+' | '-' | '*' | '/' | '%' | '^' | '=' | '!' | '<' | '>' => {
                if let Some(level) = levels.last_mut() {
                    *level += 1;
                    operators += 1;
                }
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut word = String::from(c);
                while let Some(&next) = chars.peek() {
                    if !(next.is_ascii_alphanumeric() || next == '_' || next == ':') {
                        break;
                    }
                    word.push(next);
                    chars.next();
                }
                let is_operator = ["and", "or", "unless", "atan2"]
                    .iter()
                    .any(|op| word.eq_ignore_ascii_case(op));
                if let Some(level) = levels.last_mut().filter(|_| is_operator) {
                    *level += 1;
                    operators += 1;
                }
            }
            _ => {}
        }

        deepest = deepest.max(levels.len() - 1 + operators);
        if deepest > MAX_NESTING_DEPTH {
            break;
        }
    }

    deepest
}

fn skip_quoted(chars: &mut std::iter::Peekable<std::str::Chars<'_>>, quote: char) {
    while let Some(c) = chars.next() {
        if c == quote {
            return;
        }
        if c == '\\' && quote != '`' {
            chars.next();
        }
    }
}
