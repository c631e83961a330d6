use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::models::Role;

#[derive(Deserialize, Debug, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: i64,
}

/// Claims carried by an admin token. `exp` is optional: a token without it
/// never expires on its own.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct AdminClaims {
    pub sub: String,
    pub email: String,
    pub role: Role,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,
}

impl AdminClaims {
    /// Reads the staff identity out of a verified token.
    pub fn from_token(claims: TokenClaims) -> Result<Self, serde_json::Error> {
        let mut fields = claims.extra;
        if let Some(exp) = claims.exp {
            fields.insert("exp".into(), exp.into());
        }
        serde_json::from_value(Value::Object(fields))
    }
}

/// Claim set of any token that passed signature and expiry checks. Nothing
/// beyond `exp` is interpreted here.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TokenClaims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Account to add to the user collection. The password is hashed on insert.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub role: Role,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
}
