//! Sequential identifier allocation.
//!
//! Allocation is a pure function of "highest id handed out so far": the
//! first issue for a key gets `<key>-1`, every later one gets the
//! predecessor's number plus one. Uniqueness holds only under the
//! single-writer execution model; nothing here defends against two
//! concurrent allocations reading the same maximum.

use crate::model::IssueId;

/// Allocate the identifier after `current_max`, or the first identifier
/// for `default_key` when no issue exists yet.
///
/// Deterministic and side-effect free; failures (a malformed stored id)
/// originate upstream in identifier parsing, never here.
#[must_use]
pub fn allocate_next(current_max: Option<&IssueId>, default_key: &str) -> IssueId {
    current_max.map_or_else(|| IssueId::first(default_key), IssueId::next)
}
