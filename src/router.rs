use crate::handlers::{
    admin_auth::{admin_login, is_auth},
    admin_products::{add_product, delete_product, list_products, update_product},
    admin_users::{
        delete_user, get_product_details, get_user_cart, get_user_details, list_users, update_user,
    },
    auth::{login, register},
    cart::{add_item, clear_cart, decrement_item, increment_item, list_items, remove_item},
    checkout::create_checkout_session,
    health::health_check,
    products::get_products,
    profile::get_my_profile,
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Customer auth and profile
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/myprofile/:user_id", get(get_my_profile))
        // Storefront catalog
        .route("/products", get(get_products))
        // Cart
        .route("/cart/:user_id", post(add_item))
        .route("/cart/:user_id", get(list_items))
        .route("/cart/:user_id", delete(clear_cart))
        .route("/cart/:user_id/:cart_item_id", delete(remove_item))
        .route("/cart/:user_id/increment/:cart_item_id", put(increment_item))
        .route("/cart/:user_id/decrement/:cart_item_id", put(decrement_item))
        // Checkout
        .route("/create-checkout-session/:user_id", post(create_checkout_session))
        // Admin auth
        .route("/adminlogin", post(admin_login))
        .route("/isAuth", get(is_auth))
        // Admin user management
        .route("/api/users", get(list_users))
        .route("/api/usersdelet/:id", delete(delete_user))
        .route("/api/usersupdate/:id", put(update_user))
        .route("/api/usersshowdetails/:id", get(get_user_details))
        .route("/api/usercartdetails/:id", get(get_user_cart))
        .route("/api/userproductdetails/:id", get(get_product_details))
        // Admin catalog management
        .route("/api/products", get(list_products))
        .route("/api/productsadd", post(add_product))
        .route("/api/products/:id", put(update_product))
        .route("/api/products/:id", delete(delete_product))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
