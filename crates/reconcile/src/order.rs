//! Sequence-ordering policy
//!
//! Some fields are genuinely ordered lists, others are sets that happen
//! to arrive as lists. The remote schema has moved fields between the
//! two over revisions, so comparison is parameterized per field instead
//! of hardcoded.

use serde::{Deserialize, Serialize};

/// How a sequence-valued field compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderPolicy {
    /// Position matters: `[1, 2]` differs from `[2, 1]`.
    Ordered,
    /// Set semantics: reordering is not a change.
    Unordered,
}

/// Compare two sequences under the given policy.
///
/// `Unordered` compares sorted copies, so duplicate elements still
/// count: `[1, 1, 2]` differs from `[1, 2, 2]`.
pub fn sequences_equal<T: Ord + Clone>(a: &[T], b: &[T], policy: OrderPolicy) -> bool {
    match policy {
        OrderPolicy::Ordered => a == b,
        OrderPolicy::Unordered => {
            if a.len() != b.len() {
                return false;
            }
            let mut a = a.to_vec();
            let mut b = b.to_vec();
            a.sort();
            b.sort();
            a == b
        }
    }
}
