//! Structural subset comparison
//!
//! The asymmetric containment check at the heart of diff suppression:
//! a remote record may carry server-computed fields the user never
//! declared, and those must not register as drift.

use serde_json::Value;

/// Check whether `candidate` is recursively contained in `reference`.
///
/// Rules:
/// - Exactly equal values (any type) are a subset.
/// - Mismatched types (object vs array, object vs scalar, ...) are not.
/// - Objects: every key in `candidate` must exist in `reference` with a
///   recursively matching value. Keys only in `reference` are ignored.
/// - Arrays: lengths must be equal and elements match positionally.
///   Reordering counts as a difference; a prefix is not a subset.
/// - Numbers compare by numeric value: `30` and `30.0` are equal.
/// - Other scalars that are not exactly equal are not a subset.
///
/// Pure and terminating for any finite value (JSON decoding guarantees
/// acyclicity).
pub fn is_subset(candidate: &Value, reference: &Value) -> bool {
    if candidate == reference {
        return true;
    }

    match (candidate, reference) {
        (Value::Object(cand), Value::Object(reference)) => cand
            .iter()
            .all(|(key, value)| reference.get(key).is_some_and(|r| is_subset(value, r))),
        (Value::Array(cand), Value::Array(reference)) => {
            cand.len() == reference.len()
                && cand
                    .iter()
                    .zip(reference.iter())
                    .all(|(c, r)| is_subset(c, r))
        }
        // Remote re-encoding can turn 30 into 30.0; numeric value is
        // what counts, not the encoded representation.
        (Value::Number(cand), Value::Number(reference)) => {
            cand.as_f64() == reference.as_f64()
        }
        // Type mismatch, or scalars that the equality check above
        // did not match.
        _ => false,
    }
}
