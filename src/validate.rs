//! Validation chains: ordered (predicate, message) pairs over a candidate
//! document. Rules are pure; the first failing rule aborts the chain.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::error::AppError;
use crate::store::Document;

/// One rule in a variant's chain. `check` must not mutate anything and sees
/// the candidate after normalization to the declared field set.
pub struct Rule {
    pub message: &'static str,
    pub check: fn(&Document) -> bool,
}

/// Evaluate rules strictly in order. The error carries the first failing
/// rule's message verbatim; nothing else about the document is reported.
pub fn run_chain(rules: &[Rule], doc: &Document) -> Result<(), AppError> {
    for rule in rules {
        if !(rule.check)(doc) {
            return Err(AppError::ValidationFailed(rule.message.to_string()));
        }
    }
    Ok(())
}

/// Required string field: present, a string, and non-empty.
pub fn non_empty(doc: &Document, key: &str) -> bool {
    matches!(doc.get(key), Some(Value::String(s)) if !s.is_empty())
}

/// Optional string field: absent or null passes, a present value must be a
/// non-empty string.
pub fn optional_non_empty(doc: &Document, key: &str) -> bool {
    match doc.get(key) {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => false,
    }
}

/// Integer value of a field. Absent or null reads as 0 (candidates are
/// normalized from bodies where numeric fields may be omitted); a non-integer
/// value is None and fails whatever comparison the rule makes.
pub fn int_field(doc: &Document, key: &str) -> Option<i64> {
    match doc.get(key) {
        None | Some(Value::Null) => Some(0),
        Some(Value::Number(n)) => n.as_i64(),
        Some(_) => None,
    }
}

pub fn int_at_least(doc: &Document, key: &str, min: i64) -> bool {
    int_field(doc, key).is_some_and(|n| n >= min)
}

pub fn int_greater_than(doc: &Document, key: &str, min: i64) -> bool {
    int_field(doc, key).is_some_and(|n| n > min)
}

/// Exact, case-sensitive membership in a closed set of literals.
pub fn one_of(doc: &Document, key: &str, allowed: &[&str]) -> bool {
    matches!(doc.get(key), Some(Value::String(s)) if allowed.contains(&s.as_str()))
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

pub fn well_formed_email(doc: &Document, key: &str) -> bool {
    let re = EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex")
    });
    matches!(doc.get(key), Some(Value::String(s)) if re.is_match(s))
}
