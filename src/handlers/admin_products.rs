//! Admin dashboard: catalog management.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use model::entities::product;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::schemas::{ApiResponse, AppState, ProductResponse};

/// Request body for creating a product. Image and name are mandatory;
/// price and rating fall back to 0.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateProductRequest {
    pub img: Option<String>,
    pub name: Option<String>,
    pub price: Option<f64>,
    pub desc: Option<String>,
    pub category: Option<String>,
    pub rating: Option<f64>,
}

/// Request body for the partial product update
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateProductRequest {
    pub img: Option<String>,
    pub name: Option<String>,
    pub price: Option<f64>,
    pub desc: Option<String>,
    pub category: Option<String>,
    pub rating: Option<f64>,
}

/// List the product catalog (admin view)
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "admin",
    responses(
        (status = 200, description = "Products retrieved successfully", body = ApiResponse<Vec<ProductResponse>>),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument]
pub async fn list_products(
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

/// Add a product to the catalog
#[utoipa::path(
    post,
    path = "/api/productsadd",
    tag = "admin",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product added successfully", body = ApiResponse<ProductResponse>),
        (status = 400, description = "Image and name are required", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument]
pub async fn add_product(
    State(state): State<AppState>,
    Json(request): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ProductResponse>>), ApiError> {
    let img = request.img.filter(|img| !img.trim().is_empty());
    let name = request.name.filter(|name| !name.trim().is_empty());
    let (Some(img), Some(name)) = (img, name) else {
        return Err(ApiError::Validation(
            "Image and Name are required".to_string(),
        ));
    };

    let new_product = product::ActiveModel {
        img: Set(img),
        name: Set(name),
        price: Set(request.price.unwrap_or(0.0)),
        description: Set(request.desc),
        category: Set(request.category),
        rating: Set(request.rating.unwrap_or(0.0)),
        ..Default::default()
    };
    let product_model = new_product.insert(&state.db).await?;

    info!(
        "Product created with ID: {}, name: {}",
        product_model.id, product_model.name
    );
    let response = ApiResponse {
        data: ProductResponse::from(product_model),
        message: "Product added successfully".to_string(),
        success: true,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// Update a product
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "admin",
    params(
        ("id" = i32, Path, description = "Product ID"),
    ),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated successfully", body = ApiResponse<ProductResponse>),
        (status = 404, description = "Product not found", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument]
pub async fn update_product(
    Path(id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateProductRequest>,
) -> Result<Json<ApiResponse<ProductResponse>>, ApiError> {
    let existing = product::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| {
            warn!("Update requested for unknown product {}", id);
            ApiError::NotFound("Product not found".to_string())
        })?;

    let mut product_active: product::ActiveModel = existing.into();
    if let Some(img) = request.img {
        product_active.img = Set(img);
    }
    if let Some(name) = request.name {
        product_active.name = Set(name);
    }
    if let Some(price) = request.price {
        product_active.price = Set(price);
    }
    if let Some(desc) = request.desc {
        product_active.description = Set(Some(desc));
    }
    if let Some(category) = request.category {
        product_active.category = Set(Some(category));
    }
    if let Some(rating) = request.rating {
        product_active.rating = Set(rating);
    }

    let updated = product_active.update(&state.db).await?;
    info!("Product {} updated", id);

    let response = ApiResponse {
        data: ProductResponse::from(updated),
        message: "Product updated successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "admin",
    params(
        ("id" = i32, Path, description = "Product ID"),
    ),
    responses(
        (status = 200, description = "Product deleted successfully", body = ApiResponse<String>),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument]
pub async fn delete_product(
    Path(id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, ApiError> {
    // Deleting an already-gone product still reports success.
    let result = product::Entity::delete_by_id(id).exec(&state.db).await?;
    info!(
        "Deleted product {} ({} rows affected)",
        id, result.rows_affected
    );

    let response = ApiResponse {
        data: format!("Product {} deleted", id),
        message: "Product deleted successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}
