//! # Reconcile
//!
//! Pure primitives for reconciling declared configuration against
//! last-known remote state.
//!
//! Remote services enrich the payloads they store: server-computed
//! defaults, normalized formatting, assigned identifiers. Compared
//! naively, that enrichment shows up as a spurious change on every
//! plan. This crate provides the pieces needed to tell real changes
//! apart from noise:
//!
//! - **Canonical normalization** ([`normalize`]): re-encode JSON text
//!   deterministically so formatting differences compare equal.
//! - **Subset comparison** ([`is_subset`]): structural containment -
//!   true when everything the user declared is present and equal in
//!   the remote copy, even if the remote copy carries more.
//! - **Identity carry-forward** ([`carry_ids`]): match declared child
//!   records to previous ones by name so server-assigned identifiers
//!   survive edits.
//! - **Ordering policy** ([`OrderPolicy`]): per-field choice between
//!   positional and set semantics when comparing sequences.
//!
//! Everything here is pure and synchronous: no I/O, no shared state,
//! no retries. Callers own error reporting and any remote calls.

pub mod identity;
pub mod normalize;
pub mod order;
pub mod subset;

pub use identity::{Identified, carry_ids};
pub use normalize::{Error, decode, normalize};
pub use order::{OrderPolicy, sequences_equal};
pub use subset::is_subset;
