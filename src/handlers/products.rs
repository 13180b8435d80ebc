use axum::{extract::State, response::Json};
use model::entities::product;
use sea_orm::EntityTrait;
use tracing::{debug, instrument};

use crate::error::ApiError;
use crate::schemas::{ApiResponse, AppState, ProductResponse};

/// List the product catalog (storefront view)
#[utoipa::path(
    get,
    path = "/products",
    tag = "catalog",
    responses(
        (status = 200, description = "Products retrieved successfully", body = ApiResponse<Vec<ProductResponse>>),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument]
pub async fn get_products(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ProductResponse>>>, ApiError> {
    let products = product::Entity::find().all(&state.db).await?;
    debug!("Retrieved {} products", products.len());

    let response = ApiResponse {
        data: products.into_iter().map(ProductResponse::from).collect(),
        message: "Products retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}
