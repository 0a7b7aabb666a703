//! Permission gate policy.

/// Allow iff the caller holds at least one of the permissions the route
/// requires. Permissions are opaque ids with no hierarchy; membership is
/// exact-match. An empty required set admits nobody.
pub fn is_allowed(granted: &[i64], required: &[i64]) -> bool {
    required.iter().any(|p| granted.contains(p))
}
