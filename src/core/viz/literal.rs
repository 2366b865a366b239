//! Extraction and parsing of the `data` / `layout` literals a chart script
//! declares.
//!
//! Parsing is two-stage: strict JSON first, then a [`LiteralEvaluator`] for
//! JavaScript-only syntax (unquoted keys, single quotes, trailing commas).
//! Nothing is executed; a literal that is not data is an error.

use serde_json::Value;

/// Errors when parsing a script literal.
#[derive(Debug, thiserror::Error)]
pub enum LiteralError {
    #[error("JSON parse failed ({json}); JSON5 parse failed ({loose})")]
    Loose { json: String, loose: String },
    #[error("not valid JSON: {0}")]
    Strict(#[from] serde_json::Error),
}

/// Evaluates a literal that strict JSON rejected.
pub trait LiteralEvaluator: Send + Sync {
    fn evaluate(&self, literal: &str, json_error: serde_json::Error) -> Result<Value, LiteralError>;
}

/// Accepts JavaScript object-literal syntax via JSON5.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json5Evaluator;

impl LiteralEvaluator for Json5Evaluator {
    fn evaluate(&self, literal: &str, json_error: serde_json::Error) -> Result<Value, LiteralError> {
        json5::from_str::<Value>(literal).map_err(|e| LiteralError::Loose {
            json: json_error.to_string(),
            loose: e.to_string(),
        })
    }
}

/// Rejects anything that is not strict JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictJsonEvaluator;

impl LiteralEvaluator for StrictJsonEvaluator {
    fn evaluate(&self, _literal: &str, json_error: serde_json::Error) -> Result<Value, LiteralError> {
        Err(LiteralError::Strict(json_error))
    }
}

/// Parse a literal: JSON first, then the evaluator.
pub fn parse_literal(literal: &str, evaluator: &dyn LiteralEvaluator) -> Result<Value, LiteralError> {
    match serde_json::from_str::<Value>(literal) {
        Ok(v) => Ok(v),
        Err(e) => {
            log::debug!("literal is not strict JSON ({}), trying evaluator", e);
            evaluator.evaluate(literal, e)
        }
    }
}

/// Find `var|let|const <name> = <literal>` in a script and return the literal
/// text: a balanced `[...]` or `{...}` span, honouring string quoting.
pub fn find_declaration<'a>(script: &'a str, name: &str) -> Option<&'a str> {
    let mut search_from = 0;
    while let Some(rel) = script[search_from..].find(name) {
        let at = search_from + rel;
        search_from = at + name.len();
        if !is_declared_at(script, at, name) {
            continue;
        }
        let rest = script[search_from..].trim_start();
        let Some(rest) = rest.strip_prefix('=') else {
            continue;
        };
        let rest = rest.trim_start();
        if !(rest.starts_with('[') || rest.starts_with('{')) {
            continue;
        }
        return balanced_span(rest);
    }
    None
}

/// Whether a literal is an array of variable names only, like `[trace1, trace2]`.
/// Such a literal refers to values declared elsewhere in the script.
pub fn is_reference_list(literal: &str) -> bool {
    let Some(inner) = literal
        .trim()
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
    else {
        return false;
    };
    let names: Vec<&str> = inner.split(',').map(str::trim).collect();
    let first_named = names.first().is_some_and(|first| !first.is_empty());
    first_named
        && names.iter().all(|name| {
            name.is_empty()
                || (name.chars().all(is_ident_char)
                    && !name.starts_with(|c: char| c.is_ascii_digit()))
        })
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Whether `name` at byte `at` is a whole identifier preceded by a declaration keyword.
fn is_declared_at(script: &str, at: usize, name: &str) -> bool {
    let before = &script[..at];
    let after = &script[at + name.len()..];
    if before.chars().next_back().is_some_and(is_ident_char)
        || after.chars().next().is_some_and(is_ident_char)
    {
        return false;
    }
    let before = before.trim_end();
    if before.len() == script[..at].len() {
        return false;
    }
    ["var", "let", "const"].iter().any(|kw| {
        before.strip_suffix(kw).is_some_and(|head| {
            !head.chars().next_back().is_some_and(is_ident_char)
        })
    })
}

/// The shortest prefix of `s` whose brackets balance, skipping string contents.
fn balanced_span(s: &str) -> Option<&str> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (i, c) in s.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' | '`' => quote = Some(c),
            '[' | '{' => depth += 1,
            ']' | '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(&s[..i + c.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}
