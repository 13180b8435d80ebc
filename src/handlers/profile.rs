use axum::{
    extract::{Path, State},
    response::Json,
};
use model::entities::user;
use sea_orm::EntityTrait;
use tracing::{info, instrument, warn};

use crate::error::ApiError;
use crate::schemas::{ApiResponse, AppState, UserResponse};

/// Fetch the profile of one customer. The password hash never leaves the
/// store; `UserResponse` does not carry it.
#[utoipa::path(
    get,
    path = "/myprofile/{user_id}",
    tag = "auth",
    params(
        ("user_id" = i32, Path, description = "User ID"),
    ),
    responses(
        (status = 200, description = "Profile retrieved successfully", body = ApiResponse<UserResponse>),
        (status = 404, description = "User not found", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument]
pub async fn get_my_profile(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user_model = user::Entity::find_by_id(user_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| {
            warn!("Profile requested for unknown user {}", user_id);
            ApiError::NotFound("User not found".to_string())
        })?;

    info!("Profile retrieved for user {}", user_id);
    let response = ApiResponse {
        data: UserResponse::from(user_model),
        message: "Profile retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}
