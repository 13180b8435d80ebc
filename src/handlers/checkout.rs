use axum::{
    extract::{Path, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::handlers::cart::load_cart_view;
use crate::schemas::{ApiResponse, AppState};
use crate::services::payment::build_line_items;

/// Request body for creating a checkout session
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CheckoutRequest {
    /// Email attached to the payment session
    #[serde(default)]
    pub email: String,
}

/// Checkout session response: where to redirect the customer
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CheckoutSessionResponse {
    pub url: String,
}

/// Convert the user's current cart into a hosted checkout session.
///
/// The cart itself is left untouched; it is cleared by a post-payment
/// flow outside this service.
#[utoipa::path(
    post,
    path = "/create-checkout-session/{user_id}",
    tag = "checkout",
    params(
        ("user_id" = i32, Path, description = "User ID"),
    ),
    request_body = CheckoutRequest,
    responses(
        (status = 200, description = "Checkout session created", body = ApiResponse<CheckoutSessionResponse>),
        (status = 400, description = "Cart is empty", body = crate::schemas::ErrorResponse),
        (status = 502, description = "Payment provider failure", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn create_checkout_session(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<CheckoutRequest>,
) -> Result<Json<ApiResponse<CheckoutSessionResponse>>, ApiError> {
    let cart = load_cart_view(&state.db, user_id).await?;
    if cart.is_empty() {
        return Err(ApiError::Validation("Cart is empty".to_string()));
    }

    let line_items = build_line_items(&cart);
    let url = state
        .payment
        .create_checkout_session(&request.email, &line_items)
        .await
        .map_err(|e| ApiError::Payment(e.to_string()))?;

    info!(
        "Checkout session created for user {} with {} line items",
        user_id,
        line_items.len()
    );
    let response = ApiResponse {
        data: CheckoutSessionResponse { url },
        message: "Checkout session created".to_string(),
        success: true,
    };
    Ok(Json(response))
}
