use model::entities::{cart_item, product, user};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::auth::AdminClaims;
use crate::config::AppConfig;
use crate::handlers::admin_auth::{AdminLoginRequest, AdminLoginResponse};
use crate::handlers::admin_products::{CreateProductRequest, UpdateProductRequest};
use crate::handlers::admin_users::{AdminUsersResponse, UpdateUserRequest};
use crate::handlers::auth::{LoginRequest, LoginResponse, PublicUser, RegisterRequest};
use crate::handlers::cart::AddCartItemRequest;
use crate::handlers::checkout::{CheckoutRequest, CheckoutSessionResponse};
use crate::services::payment::PaymentClient;

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// Runtime configuration, loaded once at startup
    pub config: AppConfig,
    /// Payment provider client
    pub payment: PaymentClient,
}

/// API response wrapper
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

/// Error response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// User response model, shared by the profile and admin endpoints.
/// Never carries the password hash.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub house_no: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub country: String,
    pub phone: String,
    pub is_active: bool,
}

impl From<user::Model> for UserResponse {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            house_no: model.house_no,
            street: model.street,
            city: model.city,
            state: model.state,
            pincode: model.pincode,
            country: model.country,
            phone: model.phone,
            is_active: model.is_active,
        }
    }
}

/// Product response model, shared by the storefront and admin endpoints.
/// The `desc` field name matches the stored description.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductResponse {
    pub id: i32,
    pub img: String,
    pub name: String,
    pub price: f64,
    pub desc: Option<String>,
    pub category: Option<String>,
    pub rating: f64,
}

impl From<product::Model> for ProductResponse {
    fn from(model: product::Model) -> Self {
        Self {
            id: model.id,
            img: model.img,
            name: model.name,
            price: model.price,
            desc: model.description,
            category: model.category,
            rating: model.rating,
        }
    }
}

/// Raw cart row, as stored
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CartItemResponse {
    pub id: i32,
    pub user_id: i32,
    pub product_id: i32,
    pub quantity: i32,
}

impl From<cart_item::Model> for CartItemResponse {
    fn from(model: cart_item::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            product_id: model.product_id,
            quantity: model.quantity,
        }
    }
}

/// A cart row joined with its product, projected for display and checkout
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CartItemView {
    /// Cart row id
    pub id: i32,
    pub quantity: i32,
    pub product: CartProductView,
}

/// The product fields a cart listing needs
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CartProductView {
    pub name: String,
    pub price: f64,
    pub img: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::auth::register,
        crate::handlers::auth::login,
        crate::handlers::products::get_products,
        crate::handlers::profile::get_my_profile,
        crate::handlers::cart::add_item,
        crate::handlers::cart::list_items,
        crate::handlers::cart::remove_item,
        crate::handlers::cart::increment_item,
        crate::handlers::cart::decrement_item,
        crate::handlers::cart::clear_cart,
        crate::handlers::checkout::create_checkout_session,
        crate::handlers::admin_auth::admin_login,
        crate::handlers::admin_auth::is_auth,
        crate::handlers::admin_users::list_users,
        crate::handlers::admin_users::update_user,
        crate::handlers::admin_users::delete_user,
        crate::handlers::admin_users::get_user_details,
        crate::handlers::admin_users::get_user_cart,
        crate::handlers::admin_users::get_product_details,
        crate::handlers::admin_products::list_products,
        crate::handlers::admin_products::add_product,
        crate::handlers::admin_products::update_product,
        crate::handlers::admin_products::delete_product,
    ),
    components(
        schemas(
            ApiResponse<String>,
            ApiResponse<UserResponse>,
            ApiResponse<Vec<UserResponse>>,
            ApiResponse<ProductResponse>,
            ApiResponse<Vec<ProductResponse>>,
            ApiResponse<Vec<CartItemView>>,
            ApiResponse<CartItemResponse>,
            ApiResponse<AdminClaims>,
            ApiResponse<LoginResponse>,
            ApiResponse<CheckoutSessionResponse>,
            ApiResponse<AdminLoginResponse>,
            ApiResponse<AdminUsersResponse>,
            ErrorResponse,
            HealthResponse,
            UserResponse,
            ProductResponse,
            CartItemResponse,
            CartItemView,
            CartProductView,
            AdminClaims,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            PublicUser,
            AddCartItemRequest,
            CheckoutRequest,
            CheckoutSessionResponse,
            AdminLoginRequest,
            AdminLoginResponse,
            UpdateUserRequest,
            AdminUsersResponse,
            CreateProductRequest,
            UpdateProductRequest,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Customer registration and login"),
        (name = "catalog", description = "Public product catalog"),
        (name = "cart", description = "Per-user shopping cart"),
        (name = "checkout", description = "Payment session creation"),
        (name = "admin", description = "Admin dashboard endpoints"),
    ),
    info(
        title = "Shoprust API",
        description = "E-commerce backend - user accounts, product catalog, shopping cart, and checkout",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
