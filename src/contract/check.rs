use serde_json::Value;
use std::time::Instant;
use url::Url;

use super::expectation::{Expectation, FieldType, SearchPredicate};
use super::snapshot::ResponseSnapshot;
use super::verdict::{Mismatch, Outcome, Verdict};
use super::ContractCase;
use crate::error::ContractError;
use crate::http::{PreparedRequest, Transport};

/// Resolve a dot path (`results.0.name`) inside a JSON value
pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(value);
    }

    path.split('.').try_fold(value, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

fn require_field<'a>(body: &'a Value, path: &str) -> Result<&'a Value, Mismatch> {
    lookup(body, path).ok_or_else(|| Mismatch::MissingField {
        path: path.to_string(),
    })
}

fn require_array<'a>(body: &'a Value, path: &str) -> Result<&'a Vec<Value>, Mismatch> {
    let value = require_field(body, path)?;
    value.as_array().ok_or_else(|| Mismatch::WrongType {
        path: path.to_string(),
        expected: FieldType::Array,
        actual: FieldType::describe(value).to_string(),
    })
}

/// Compare an expectation against a snapshot; returns the first mismatch.
///
/// Checks run in a fixed order: status, presence, types, non-emptiness,
/// lengths, values, then the search predicate.
pub fn evaluate(
    expect: &Expectation,
    snapshot: &ResponseSnapshot,
    search_term: Option<&str>,
) -> Result<(), Mismatch> {
    if snapshot.status != expect.status {
        return Err(Mismatch::Status {
            expected: expect.status,
            actual: snapshot.status,
        });
    }

    let body = &snapshot.body;

    for path in &expect.required {
        require_field(body, path)?;
    }

    for (path, field_type) in &expect.types {
        let value = require_field(body, path)?;
        if !field_type.matches(value) {
            return Err(Mismatch::WrongType {
                path: path.clone(),
                expected: *field_type,
                actual: FieldType::describe(value).to_string(),
            });
        }
    }

    for path in &expect.non_empty {
        if require_array(body, path)?.is_empty() {
            return Err(Mismatch::EmptyArray { path: path.clone() });
        }
    }

    for (path, expected) in &expect.lengths {
        let actual = require_array(body, path)?.len();
        if actual != *expected {
            return Err(Mismatch::Length {
                path: path.clone(),
                expected: *expected,
                actual,
            });
        }
    }

    for (path, expected) in &expect.equals {
        let actual = require_field(body, path)?;
        if actual != expected {
            return Err(Mismatch::Value {
                path: path.clone(),
                expected: expected.clone(),
                actual: actual.clone(),
            });
        }
    }

    if let Some(predicate) = &expect.contains {
        check_predicate(body, predicate, search_term)?;
    }

    Ok(())
}

fn check_predicate(
    body: &Value,
    predicate: &SearchPredicate,
    fallback_term: Option<&str>,
) -> Result<(), Mismatch> {
    let term = predicate
        .term
        .as_deref()
        .or(fallback_term)
        .ok_or_else(|| Mismatch::MissingSearchTerm {
            array: predicate.array.clone(),
        })?
        .to_lowercase();

    for (index, item) in require_array(body, &predicate.array)?.iter().enumerate() {
        let matched = predicate.fields.iter().any(|field| {
            lookup(item, field)
                .and_then(Value::as_str)
                .map(|text| text.to_lowercase().contains(&term))
                .unwrap_or(false)
        });

        if !matched {
            return Err(Mismatch::Predicate {
                array: predicate.array.clone(),
                index,
                fields: predicate.fields.clone(),
                term,
            });
        }
    }

    Ok(())
}

/// Resolve a case against the base URL without sending anything
pub fn prepare(base_url: &Url, case: &ContractCase) -> Result<PreparedRequest, ContractError> {
    case.request
        .prepare(base_url)
        .map_err(|reason| ContractError::invalid_descriptor(&case.name, reason))
}

/// Send a prepared case and judge the response
pub async fn execute<T>(transport: &T, case: &ContractCase, request: &PreparedRequest) -> Verdict
where
    T: Transport + ?Sized,
{
    let started = Instant::now();
    let search_term = case.request.search_term();

    let (status, outcome) = match transport.send(request).await {
        Err(error) => {
            tracing::warn!(case = %case.name, kind = %error.kind, "network failure: {}", error.message);
            (None, Outcome::Error { error })
        }
        Ok(first) => {
            let status = Some(first.status);
            let judged = match evaluate(&case.expect, &first, search_term.as_deref()) {
                Err(mismatch) => Outcome::Fail { mismatch },
                Ok(()) if case.idempotent => match transport.send(request).await {
                    Err(error) => Outcome::Error { error },
                    Ok(second) => compare_repeat(&first, &second),
                },
                Ok(()) => Outcome::Pass,
            };
            (status, judged)
        }
    };

    let verdict = Verdict {
        case: case.name.clone(),
        method: request.method,
        url: request.url.to_string(),
        status,
        outcome,
        elapsed_ms: started.elapsed().as_millis() as u64,
    };

    match &verdict.outcome {
        Outcome::Pass => tracing::debug!(case = %verdict.case, "pass"),
        Outcome::Fail { mismatch } => tracing::info!(case = %verdict.case, "fail: {}", mismatch),
        Outcome::Error { .. } => {}
    }

    verdict
}

fn compare_repeat(first: &ResponseSnapshot, second: &ResponseSnapshot) -> Outcome {
    if first.same_content(second) {
        return Outcome::Pass;
    }

    let detail = if first.status != second.status {
        format!("status {} then {}", first.status, second.status)
    } else {
        "body changed between requests".to_string()
    };
    Outcome::Fail {
        mismatch: Mismatch::NotIdempotent { detail },
    }
}

/// Prepare, send, and judge one case
pub async fn check<T>(transport: &T, base_url: &Url, case: &ContractCase) -> Result<Verdict, ContractError>
where
    T: Transport + ?Sized,
{
    let request = prepare(base_url, case)?;
    Ok(execute(transport, case, &request).await)
}
