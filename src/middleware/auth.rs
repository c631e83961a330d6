use axum::extract::FromRequestParts;

use crate::{
    dto::auth::{AdminClaims, TokenClaims},
    error::AppError,
    models::Role,
};

/// Staff member behind an admin request, as verified by the route guard.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
    pub email: String,
    pub role: Role,
}

pub fn ensure_role(user: &AuthUser, allowed: &[Role]) -> Result<(), AppError> {
    if !allowed.contains(&user.role) {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

pub fn ensure_admin(user: &AuthUser) -> Result<(), AppError> {
    ensure_role(user, &[Role::Admin])
}

impl From<AdminClaims> for AuthUser {
    fn from(claims: AdminClaims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
            role: claims.role,
        }
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;
    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        // Claims are only present when the route guard verified a token.
        let token = parts
            .extensions
            .get::<TokenClaims>()
            .cloned()
            .ok_or(AppError::Unauthorized)?;
        let claims = AdminClaims::from_token(token).map_err(|err| {
            tracing::debug!(error = %err, "token carries no staff identity");
            AppError::Unauthorized
        })?;

        if !claims.role.is_staff() {
            return Err(AppError::Forbidden);
        }
        Ok(claims.into())
    }
}
