use axum::{extract::State, http::StatusCode, response::Json};
use model::entities::user;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use utoipa::ToSchema;

use crate::auth;
use crate::error::ApiError;
use crate::schemas::{ApiResponse, AppState};

/// Request body for registering a new customer.
///
/// Every field is required; absent fields deserialize to empty strings and
/// are rejected by the handler, so a partial body gets the same
/// "fill in all fields" answer as an empty one.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
    #[serde(default)]
    pub house_no: String,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub pincode: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub phone: String,
}

/// Request body for customer login
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Public user summary returned on login
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PublicUser {
    pub id: i32,
    pub username: String,
    pub email: String,
}

/// Login response: user summary plus a signed bearer token
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub user: PublicUser,
    pub token: String,
}

/// Register a new customer
#[utoipa::path(
    post,
    path = "/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = ApiResponse<String>),
        (status = 400, description = "Missing fields or password mismatch", body = crate::schemas::ErrorResponse),
        (status = 409, description = "Email already registered", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<String>>), ApiError> {
    let required = [
        &request.username,
        &request.email,
        &request.password,
        &request.confirm_password,
        &request.house_no,
        &request.street,
        &request.city,
        &request.state,
        &request.pincode,
        &request.country,
        &request.phone,
    ];
    if required.iter().any(|field| field.trim().is_empty()) {
        return Err(ApiError::Validation(
            "Please fill in all fields".to_string(),
        ));
    }
    if request.password != request.confirm_password {
        return Err(ApiError::Validation("Passwords do not match".to_string()));
    }

    debug!("Registering user with email: {}", request.email);
    let existing = user::Entity::find()
        .filter(user::Column::Email.eq(request.email.as_str()))
        .one(&state.db)
        .await?;
    if existing.is_some() {
        warn!("Registration rejected, email already in use: {}", request.email);
        return Err(ApiError::Conflict("Email already registered".to_string()));
    }

    let password_hash = auth::hash_password(&request.password)?;

    let new_user = user::ActiveModel {
        username: Set(request.username.clone()),
        email: Set(request.email.clone()),
        password_hash: Set(password_hash),
        house_no: Set(request.house_no.clone()),
        street: Set(request.street.clone()),
        city: Set(request.city.clone()),
        state: Set(request.state.clone()),
        pincode: Set(request.pincode.clone()),
        country: Set(request.country.clone()),
        phone: Set(request.phone.clone()),
        is_active: Set(true),
        ..Default::default()
    };
    let user_model = new_user.insert(&state.db).await?;

    info!(
        "User registered successfully with ID: {}, email: {}",
        user_model.id, user_model.email
    );
    let response = ApiResponse {
        data: format!("User {} registered", user_model.id),
        message: "User registered successfully".to_string(),
        success: true,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// Log a customer in
#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<LoginResponse>),
        (status = 400, description = "Missing fields", body = crate::schemas::ErrorResponse),
        (status = 401, description = "Invalid credentials", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    if request.email.trim().is_empty() || request.password.trim().is_empty() {
        return Err(ApiError::Validation(
            "Please fill in all fields".to_string(),
        ));
    }

    debug!("Login attempt for email: {}", request.email);
    let user_model = user::Entity::find()
        .filter(user::Column::Email.eq(request.email.as_str()))
        .one(&state.db)
        .await?
        .ok_or_else(|| ApiError::Auth("Invalid credentials".to_string()))?;

    if !auth::verify_password(&user_model.password_hash, &request.password)? {
        warn!("Bad password for email: {}", request.email);
        return Err(ApiError::Auth("Invalid credentials".to_string()));
    }

    let token = auth::issue_user_token(
        &state.config.jwt_secret,
        user_model.id,
        &user_model.username,
        &user_model.email,
    )?;

    info!("User {} logged in", user_model.id);
    let response = ApiResponse {
        data: LoginResponse {
            user: PublicUser {
                id: user_model.id,
                username: user_model.username,
                email: user_model.email,
            },
            token,
        },
        message: "Login successful".to_string(),
        success: true,
    };
    Ok(Json(response))
}
