//! Admin dashboard: user management.

use axum::{
    extract::{Path, State},
    response::Json,
};
use model::entities::{cart_item, product, user};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::schemas::{ApiResponse, AppState, CartItemResponse, ProductResponse, UserResponse};

/// Request body for the partial user update: exactly these two fields
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
}

/// Dashboard listing: all users plus precomputed counts
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminUsersResponse {
    pub total_users: usize,
    pub active_users_count: usize,
    pub users: Vec<UserResponse>,
}

/// List all users with total and active counts
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "admin",
    responses(
        (status = 200, description = "Users retrieved successfully", body = ApiResponse<AdminUsersResponse>),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument]
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<AdminUsersResponse>>, ApiError> {
    let users = user::Entity::find().all(&state.db).await?;
    let active_users_count = users.iter().filter(|u| u.is_active).count();
    debug!(
        "Retrieved {} users ({} active)",
        users.len(),
        active_users_count
    );

    let response = ApiResponse {
        data: AdminUsersResponse {
            total_users: users.len(),
            active_users_count,
            users: users.into_iter().map(UserResponse::from).collect(),
        },
        message: "Users retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Update a user's username and email
#[utoipa::path(
    put,
    path = "/api/usersupdate/{id}",
    tag = "admin",
    params(
        ("id" = i32, Path, description = "User ID"),
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated successfully", body = ApiResponse<UserResponse>),
        (status = 404, description = "User not found", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument]
pub async fn update_user(
    Path(id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let existing = user::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| {
            warn!("Update requested for unknown user {}", id);
            ApiError::NotFound("User not found".to_string())
        })?;

    let mut user_active: user::ActiveModel = existing.into();
    if let Some(username) = request.username {
        user_active.username = Set(username);
    }
    if let Some(email) = request.email {
        user_active.email = Set(email);
    }

    let updated = user_active.update(&state.db).await?;
    info!("User {} updated", id);

    let response = ApiResponse {
        data: UserResponse::from(updated),
        message: "User updated successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Delete a user and all of that user's cart rows.
///
/// The two deletes are not wrapped in a transaction; cart rows are
/// re-creatable state, so an interruption between them is tolerated.
#[utoipa::path(
    delete,
    path = "/api/usersdelet/{id}",
    tag = "admin",
    params(
        ("id" = i32, Path, description = "User ID"),
    ),
    responses(
        (status = 200, description = "User deleted successfully", body = ApiResponse<String>),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument]
pub async fn delete_user(
    Path(id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, ApiError> {
    let carts = cart_item::Entity::delete_many()
        .filter(cart_item::Column::UserId.eq(id))
        .exec(&state.db)
        .await?;
    let users = user::Entity::delete_by_id(id).exec(&state.db).await?;
    info!(
        "Deleted user {} ({} user rows, {} cart rows)",
        id, users.rows_affected, carts.rows_affected
    );

    let response = ApiResponse {
        data: format!("User {} deleted", id),
        message: "User deleted successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Fetch one user's details
#[utoipa::path(
    get,
    path = "/api/usersshowdetails/{id}",
    tag = "admin",
    params(
        ("id" = i32, Path, description = "User ID"),
    ),
    responses(
        (status = 200, description = "User retrieved successfully", body = ApiResponse<UserResponse>),
        (status = 404, description = "User not found", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument]
pub async fn get_user_details(
    Path(id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user_model = user::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let response = ApiResponse {
        data: UserResponse::from(user_model),
        message: "User retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Fetch one user's raw cart rows. An empty cart is an empty list.
#[utoipa::path(
    get,
    path = "/api/usercartdetails/{id}",
    tag = "admin",
    params(
        ("id" = i32, Path, description = "User ID"),
    ),
    responses(
        (status = 200, description = "Cart rows retrieved successfully", body = ApiResponse<Vec<CartItemResponse>>),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument]
pub async fn get_user_cart(
    Path(id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<CartItemResponse>>>, ApiError> {
    let rows = cart_item::Entity::find()
        .filter(cart_item::Column::UserId.eq(id))
        .all(&state.db)
        .await?;
    debug!("User {} has {} cart rows", id, rows.len());

    let response = ApiResponse {
        data: rows.into_iter().map(CartItemResponse::from).collect(),
        message: "Cart rows retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Fetch one product's details (admin view)
#[utoipa::path(
    get,
    path = "/api/userproductdetails/{id}",
    tag = "admin",
    params(
        ("id" = i32, Path, description = "Product ID"),
    ),
    responses(
        (status = 200, description = "Product retrieved successfully", body = ApiResponse<ProductResponse>),
        (status = 404, description = "Product not found", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument]
pub async fn get_product_details(
    Path(id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ProductResponse>>, ApiError> {
    let product_model = product::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))?;

    let response = ApiResponse {
        data: ProductResponse::from(product_model),
        message: "Product retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}
