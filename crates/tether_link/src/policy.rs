//! Link policy lookup.

use tether_storage::{FieldSchema, LinkPolicy};

/// Returns the link policy declared on a field, if any.
///
/// The raw marker is returned rather than a flag so new policy kinds can be
/// added without changing callers.
#[must_use]
pub fn policy(field: &FieldSchema) -> Option<LinkPolicy> {
    field.link_policy
}

/// Returns true if discovery must skip this field.
///
/// An absent policy and [`LinkPolicy::Check`] both mean "not excluded".
#[must_use]
pub fn is_excluded(field: &FieldSchema) -> bool {
    matches!(policy(field), Some(LinkPolicy::Skip))
}
