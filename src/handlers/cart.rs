//! Per-user shopping cart.
//!
//! All quantity mutations are single UPDATE statements so that two
//! concurrent requests against the same row cannot lose an update; the
//! original read-modify-write shape is not reproduced here.

use axum::{
    extract::{Path, State},
    response::Json,
};
use model::entities::{cart_item, product};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::schemas::{ApiResponse, AppState, CartItemResponse, CartItemView, CartProductView};

/// Request body for adding a product to a cart
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddCartItemRequest {
    pub product_id: Option<i32>,
    pub quantity: Option<i32>,
}

/// Load a user's cart joined with product data, projected for display.
///
/// Rows whose product has been deleted out from under them are dropped
/// from the projection, mirroring the inner-join the listing always had.
pub(crate) async fn load_cart_view(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<Vec<CartItemView>, ApiError> {
    let rows = cart_item::Entity::find()
        .filter(cart_item::Column::UserId.eq(user_id))
        .find_also_related(product::Entity)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(item, product)| {
            product.map(|p| CartItemView {
                id: item.id,
                quantity: item.quantity,
                product: CartProductView {
                    name: p.name,
                    price: p.price,
                    img: p.img,
                },
            })
        })
        .collect())
}

/// Add a product to a cart, accumulating quantity on repeat adds
#[utoipa::path(
    post,
    path = "/cart/{user_id}",
    tag = "cart",
    params(
        ("user_id" = i32, Path, description = "User ID"),
    ),
    request_body = AddCartItemRequest,
    responses(
        (status = 200, description = "Cart updated successfully", body = ApiResponse<String>),
        (status = 400, description = "Missing required fields", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument]
pub async fn add_item(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<AddCartItemRequest>,
) -> Result<Json<ApiResponse<String>>, ApiError> {
    let (Some(product_id), Some(quantity)) = (request.product_id, request.quantity) else {
        return Err(ApiError::Validation("Missing required fields".to_string()));
    };
    if quantity < 1 {
        return Err(ApiError::Validation(
            "Quantity must be at least 1".to_string(),
        ));
    }

    // Atomic accumulate; falls through to an insert when the pair has no
    // row yet. The unique (user_id, product_id) index keeps a concurrent
    // double-insert from producing two rows.
    let updated = cart_item::Entity::update_many()
        .col_expr(
            cart_item::Column::Quantity,
            Expr::col(cart_item::Column::Quantity).add(quantity),
        )
        .filter(cart_item::Column::UserId.eq(user_id))
        .filter(cart_item::Column::ProductId.eq(product_id))
        .exec(&state.db)
        .await?;

    if updated.rows_affected == 0 {
        cart_item::ActiveModel {
            user_id: Set(user_id),
            product_id: Set(product_id),
            quantity: Set(quantity),
            ..Default::default()
        }
        .insert(&state.db)
        .await?;
        debug!("Created cart row for user {} product {}", user_id, product_id);
    } else {
        debug!(
            "Accumulated {} into cart row for user {} product {}",
            quantity, user_id, product_id
        );
    }

    let response = ApiResponse {
        data: "Cart updated".to_string(),
        message: "Cart updated successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// List a user's cart with product details
#[utoipa::path(
    get,
    path = "/cart/{user_id}",
    tag = "cart",
    params(
        ("user_id" = i32, Path, description = "User ID"),
    ),
    responses(
        (status = 200, description = "Cart retrieved successfully (possibly empty)", body = ApiResponse<Vec<CartItemView>>),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument]
pub async fn list_items(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<CartItemView>>>, ApiError> {
    let items = load_cart_view(&state.db, user_id).await?;
    debug!("User {} has {} cart rows", user_id, items.len());

    // An empty cart is an ordinary empty list, not an error; callers
    // branch on length.
    let response = ApiResponse {
        data: items,
        message: "Cart retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Remove one row from a cart
#[utoipa::path(
    delete,
    path = "/cart/{user_id}/{cart_item_id}",
    tag = "cart",
    params(
        ("user_id" = i32, Path, description = "User ID"),
        ("cart_item_id" = i32, Path, description = "Cart item ID"),
    ),
    responses(
        (status = 200, description = "Item removed from cart", body = ApiResponse<String>),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument]
pub async fn remove_item(
    Path((user_id, cart_item_id)): Path<(i32, i32)>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, ApiError> {
    // Deleting an already-gone row still reports success.
    let result = cart_item::Entity::delete_by_id(cart_item_id)
        .exec(&state.db)
        .await?;
    debug!(
        "Removed cart row {} for user {} ({} rows affected)",
        cart_item_id, user_id, result.rows_affected
    );

    let response = ApiResponse {
        data: "Item removed".to_string(),
        message: "Item removed from cart".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Increment a cart row's quantity by one
#[utoipa::path(
    put,
    path = "/cart/{user_id}/increment/{cart_item_id}",
    tag = "cart",
    params(
        ("user_id" = i32, Path, description = "User ID"),
        ("cart_item_id" = i32, Path, description = "Cart item ID"),
    ),
    responses(
        (status = 200, description = "Item quantity incremented", body = ApiResponse<CartItemResponse>),
        (status = 404, description = "Cart item not found", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument]
pub async fn increment_item(
    Path((user_id, cart_item_id)): Path<(i32, i32)>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<CartItemResponse>>, ApiError> {
    let updated = cart_item::Entity::update_many()
        .col_expr(
            cart_item::Column::Quantity,
            Expr::col(cart_item::Column::Quantity).add(1),
        )
        .filter(cart_item::Column::Id.eq(cart_item_id))
        .exec(&state.db)
        .await?;

    if updated.rows_affected == 0 {
        return Err(ApiError::NotFound("Cart item not found".to_string()));
    }

    let item = cart_item::Entity::find_by_id(cart_item_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| ApiError::NotFound("Cart item not found".to_string()))?;

    info!("Incremented cart row {} for user {}", cart_item_id, user_id);
    let response = ApiResponse {
        data: CartItemResponse::from(item),
        message: "Item quantity incremented".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Decrement a cart row's quantity by one; quantity never reaches zero
/// through this path
#[utoipa::path(
    put,
    path = "/cart/{user_id}/decrement/{cart_item_id}",
    tag = "cart",
    params(
        ("user_id" = i32, Path, description = "User ID"),
        ("cart_item_id" = i32, Path, description = "Cart item ID"),
    ),
    responses(
        (status = 200, description = "Item quantity decremented", body = ApiResponse<CartItemResponse>),
        (status = 400, description = "Quantity already at the floor of 1", body = crate::schemas::ErrorResponse),
        (status = 404, description = "Cart item not found", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument]
pub async fn decrement_item(
    Path((user_id, cart_item_id)): Path<(i32, i32)>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<CartItemResponse>>, ApiError> {
    // The quantity > 1 guard rides inside the UPDATE itself; a row at the
    // floor is left untouched and told apart from a missing row below.
    let updated = cart_item::Entity::update_many()
        .col_expr(
            cart_item::Column::Quantity,
            Expr::col(cart_item::Column::Quantity).sub(1),
        )
        .filter(cart_item::Column::Id.eq(cart_item_id))
        .filter(cart_item::Column::Quantity.gt(1))
        .exec(&state.db)
        .await?;

    if updated.rows_affected == 0 {
        return match cart_item::Entity::find_by_id(cart_item_id)
            .one(&state.db)
            .await?
        {
            None => Err(ApiError::NotFound("Cart item not found".to_string())),
            Some(_) => Err(ApiError::Validation(
                "Quantity cannot be less than 1".to_string(),
            )),
        };
    }

    let item = cart_item::Entity::find_by_id(cart_item_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| ApiError::NotFound("Cart item not found".to_string()))?;

    info!("Decremented cart row {} for user {}", cart_item_id, user_id);
    let response = ApiResponse {
        data: CartItemResponse::from(item),
        message: "Item quantity decremented".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Clear a user's cart
#[utoipa::path(
    delete,
    path = "/cart/{user_id}",
    tag = "cart",
    params(
        ("user_id" = i32, Path, description = "User ID"),
    ),
    responses(
        (status = 200, description = "Cart cleared", body = ApiResponse<String>),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument]
pub async fn clear_cart(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, ApiError> {
    let result = cart_item::Entity::delete_many()
        .filter(cart_item::Column::UserId.eq(user_id))
        .exec(&state.db)
        .await?;
    info!(
        "Cleared cart for user {} ({} rows removed)",
        user_id, result.rows_affected
    );

    let response = ApiResponse {
        data: "Cart cleared".to_string(),
        message: "Cart cleared".to_string(),
        success: true,
    };
    Ok(Json(response))
}
