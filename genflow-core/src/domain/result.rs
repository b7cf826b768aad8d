//! Result resolution
//!
//! Completed jobs expose their artifact URL somewhere inside a result
//! payload whose shape varies across job types and backend versions: the
//! fields of interest (`raw`, the full-fidelity artifact, and `min`, a
//! lower-fidelity alternative) show up at several nesting depths, and the
//! value at the leaf may be a bare URL string or an object with a `url`
//! (or `image_url`) field.
//!
//! The resolver re-expresses the original duck-typed probing as an ordered
//! list of typed accessors with first-match-wins semantics. It is pure and
//! total: absence of a field at any level means "try the next candidate",
//! never an error.

use serde_json::Value;

/// Extracts the artifact URL from a result payload, if one is present
///
/// Probes the `raw` field at every known nesting point first; `min` is
/// consulted only when no `raw` variant matched anywhere. Returns `None`
/// when no candidate matches, which callers should treat as "not ready
/// yet" rather than as an error.
///
/// Idempotent: the same payload always resolves to the same URL.
pub fn resolve_result_url(payload: &Value) -> Option<String> {
    let points = nesting_points(payload);

    for field in ["raw", "min"] {
        for point in points.iter().flatten() {
            if let Some(url) = point.get(field).and_then(candidate_url) {
                return Some(url);
            }
        }
    }

    None
}

/// The containers that may hold a `raw`/`min` result field, in precedence
/// order. Different job types and backend versions wrap results differently;
/// this list covers every shape observed so far.
fn nesting_points(payload: &Value) -> [Option<&Value>; 7] {
    let inner = payload.get("payload");

    [
        // flat
        Some(payload),
        payload.get("results"),
        // wrapped in `payload`
        inner,
        inner.and_then(|p| p.get("results")),
        // per-job result lists
        inner.and_then(first_job_results),
        inner
            .and_then(|p| p.get("payload"))
            .and_then(first_job_results),
        first_job_results(payload),
    ]
}

/// `jobs[0].results`, when present
fn first_job_results(value: &Value) -> Option<&Value> {
    value.get("jobs")?.get(0)?.get("results")
}

/// Accepts a bare URL string or an object carrying `url` / `image_url`
fn candidate_url(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Object(map) => map
            .get("url")
            .or_else(|| map.get("image_url"))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        _ => None,
    }
}
