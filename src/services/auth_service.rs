use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordVerifier},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use crate::{
    dto::auth::{AdminClaims, LoginRequest, LoginResponse},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::User,
    response::{ApiResponse, Meta},
    state::AppState,
};

/// A freshly issued admin token and the response describing it.
pub struct IssuedToken {
    pub token: String,
    pub max_age_secs: i64,
    pub response: ApiResponse<LoginResponse>,
}

pub fn login_user(state: &AppState, payload: LoginRequest) -> AppResult<IssuedToken> {
    let LoginRequest { email, password } = payload;
    let user = match state.store.get_user_by_email(&email) {
        Some(u) => u,
        None => return Err(AppError::BadRequest("Invalid email or password".into())),
    };

    let parsed_hash = PasswordHash::new(&user.password_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;

    let argon2 = Argon2::default();
    if argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_err()
    {
        return Err(AppError::BadRequest("Invalid email or password".into()));
    }

    if !user.is_active || !user.role.is_staff() {
        tracing::warn!(user_id = %user.id, "admin login refused");
        return Err(AppError::Forbidden);
    }

    let ttl = Duration::hours(state.config.token_ttl_hours);
    let expiration = Utc::now()
        .checked_add_signed(ttl)
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = AdminClaims {
        sub: user.id.clone(),
        email: user.email.clone(),
        role: user.role,
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        exp: Some(expiration.timestamp() as u64),
    };
    let token = issue_token(&claims, &state.config.jwt_secret)?;

    tracing::info!(user_id = %user.id, role = ?user.role, "admin logged in");

    let response = ApiResponse::success(
        "Logged in",
        LoginResponse {
            token: format!("Bearer {}", token),
            expires_at: expiration.timestamp(),
        },
        Some(Meta::empty()),
    );
    Ok(IssuedToken {
        token,
        max_age_secs: ttl.num_seconds(),
        response,
    })
}

/// Signs `claims` with HS256.
pub fn issue_token(claims: &AdminClaims, secret: &str) -> AppResult<String> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

pub fn current_user(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<User>> {
    // The token may outlive the account it was issued for.
    let found = state
        .store
        .get_user_by_id(&user.user_id)
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Current user", found, Some(Meta::empty())))
}
