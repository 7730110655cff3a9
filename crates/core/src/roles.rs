//! Well-known participant role constants.
//!
//! These must match the `role` values stored on user profiles by the
//! platform API.

pub const ROLE_MENTOR: &str = "mentor";
pub const ROLE_MENTEE: &str = "mentee";

/// The set of all valid profile roles.
pub const VALID_ROLES: &[&str] = &[ROLE_MENTOR, ROLE_MENTEE];

/// Returns `true` if the given role string is a known profile role.
pub fn is_valid_role(role: &str) -> bool {
    VALID_ROLES.contains(&role)
}
