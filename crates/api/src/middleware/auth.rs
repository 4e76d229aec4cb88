//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use cabinet_core::error::CoreError;
use cabinet_core::roles::is_known_role;
use cabinet_core::trash::TrashScope;
use cabinet_core::types::UserId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a JWT Bearer token in the `Authorization` header.
///
/// Tokens carrying a role outside [`cabinet_core::roles::VALID_ROLES`] are
/// rejected with 403.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Opaque user id from `claims.sub`.
    pub user_id: UserId,
    /// The user's role name.
    pub role: String,
}

impl AuthUser {
    /// The trash entries this user may see.
    pub fn trash_scope(&self) -> TrashScope {
        TrashScope::for_user(&self.user_id, &self.role)
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        if !is_known_role(&claims.role) {
            tracing::warn!(user_id = %claims.sub, role = %claims.role, "Token with unknown role");
            return Err(AppError::Core(CoreError::Forbidden(format!(
                "Unknown role '{}'",
                claims.role
            ))));
        }

        Ok(AuthUser {
            user_id: claims.sub,
            role: claims.role,
        })
    }
}
