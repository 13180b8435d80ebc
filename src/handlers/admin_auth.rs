use axum::{extract::State, http::HeaderMap, response::Json};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use utoipa::ToSchema;

use crate::auth::{self, AdminClaims};
use crate::error::ApiError;
use crate::schemas::{ApiResponse, AppState};

/// Header carrying the admin token.
const TOKEN_HEADER: &str = "x-access-token";

/// Request body for admin login
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct AdminLoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Admin login response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminLoginResponse {
    pub username: String,
    pub token: String,
}

/// Log the admin in against the configured credential pair
#[utoipa::path(
    post,
    path = "/adminlogin",
    tag = "admin",
    request_body = AdminLoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<AdminLoginResponse>),
        (status = 400, description = "Missing fields", body = crate::schemas::ErrorResponse),
        (status = 401, description = "Invalid credentials", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn admin_login(
    State(state): State<AppState>,
    Json(request): Json<AdminLoginRequest>,
) -> Result<Json<ApiResponse<AdminLoginResponse>>, ApiError> {
    if request.username.trim().is_empty() || request.password.trim().is_empty() {
        return Err(ApiError::Validation(
            "Please fill in all fields".to_string(),
        ));
    }

    if request.username != state.config.admin_username
        || request.password != state.config.admin_password
    {
        warn!("Rejected admin login for username: {}", request.username);
        return Err(ApiError::Auth("Invalid credentials".to_string()));
    }

    let token = auth::issue_admin_token(&state.config.jwt_secret, &request.username)?;

    info!("Admin logged in");
    let response = ApiResponse {
        data: AdminLoginResponse {
            username: request.username,
            token,
        },
        message: "Login successful".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Check an admin token supplied in the `x-access-token` header
#[utoipa::path(
    get,
    path = "/isAuth",
    tag = "admin",
    responses(
        (status = 200, description = "Token is valid", body = ApiResponse<AdminClaims>),
        (status = 401, description = "Invalid or expired token", body = crate::schemas::ErrorResponse),
        (status = 403, description = "No token provided", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state, headers))]
pub async fn is_auth(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<AdminClaims>>, ApiError> {
    let token = headers
        .get(TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::Forbidden("No token provided".to_string()))?;

    let claims = auth::verify_admin_token(&state.config.jwt_secret, token)?;

    let response = ApiResponse {
        data: claims,
        message: "Token is valid".to_string(),
        success: true,
    };
    Ok(Json(response))
}
