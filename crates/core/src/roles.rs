//! Well-known role name constants.
//!
//! These must match the `role` claim values issued by the identity service.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_CLIENT: &str = "client";
pub const ROLE_PARTNER: &str = "partner";

/// All roles the API accepts in a token.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_CLIENT, ROLE_PARTNER];

/// Returns `true` if `role` is one of [`VALID_ROLES`].
pub fn is_known_role(role: &str) -> bool {
    VALID_ROLES.contains(&role)
}
