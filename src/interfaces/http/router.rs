//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    http::{HeaderName, StatusCode},
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::categories::{
    CategoryService, GetCategoryQueryResponse, GetCategoryWithProdsQueryResponse,
};
use crate::application::identity::{GetUserQueryResponse, UserService};
use crate::application::products::{
    GetProductQueryResponse, GetProductWithCatQueryResponse, ProductService,
};
use crate::domain::{Policy, RepositoryProvider, Role};
use crate::interfaces::http::common::{
    ErrorResponse, PageLimits, X_PAGINATION, X_PAGINATION_VERSION,
};
use crate::interfaces::http::middleware::{authorize, AuthState};
use crate::interfaces::http::modules::health::{self, HealthState};
use crate::interfaces::http::modules::metrics::{
    http_metrics_middleware, prometheus_metrics, MetricsState,
};
use crate::interfaces::http::modules::request_id::{request_id_middleware, REQUEST_ID_HEADER};
use crate::interfaces::http::modules::{auth, categories, products, users};
use crate::shared::PaginationMetadata;

/// Everything the handlers need. Each handler extracts only its own piece
/// through `FromRef`.
#[derive(Clone)]
pub struct AppState {
    pub products: Arc<ProductService>,
    pub categories: Arc<CategoryService>,
    pub users: Arc<UserService>,
    pub health: HealthState,
    pub limits: PageLimits,
}

impl AppState {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        users: Arc<UserService>,
        limits: PageLimits,
    ) -> Self {
        Self {
            products: Arc::new(ProductService::new(repos.clone())),
            categories: Arc::new(CategoryService::new(repos.clone())),
            users,
            health: HealthState {
                repos,
                started_at: Arc::new(Instant::now()),
            },
            limits,
        }
    }
}

impl FromRef<AppState> for Arc<ProductService> {
    fn from_ref(s: &AppState) -> Self {
        Arc::clone(&s.products)
    }
}

impl FromRef<AppState> for Arc<CategoryService> {
    fn from_ref(s: &AppState) -> Self {
        Arc::clone(&s.categories)
    }
}

impl FromRef<AppState> for Arc<UserService> {
    fn from_ref(s: &AppState) -> Self {
        Arc::clone(&s.users)
    }
}

impl FromRef<AppState> for HealthState {
    fn from_ref(s: &AppState) -> Self {
        s.health.clone()
    }
}

impl FromRef<AppState> for PageLimits {
    fn from_ref(s: &AppState) -> Self {
        s.limits
    }
}

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token from /api/v1/auth/login"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Auth
        auth::login,
        auth::register,
        auth::get_current_user,
        // Products
        products::list_products,
        products::list_products_with_category,
        products::get_product,
        products::get_product_with_category,
        products::create_product,
        products::update_product,
        products::delete_product,
        // Categories
        categories::list_categories,
        categories::list_categories_with_products,
        categories::get_category,
        categories::get_category_with_products,
        categories::create_category,
        categories::update_category,
        categories::delete_category,
        // Users
        users::list_users,
        users::get_user,
    ),
    components(
        schemas(
            // Common
            ErrorResponse,
            PaginationMetadata,
            Role,
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            auth::RegisterRequest,
            // Products
            products::ProductRequest,
            GetProductQueryResponse,
            GetProductWithCatQueryResponse,
            // Categories
            categories::CategoryRequest,
            GetCategoryQueryResponse,
            GetCategoryWithProdsQueryResponse,
            // Users
            GetUserQueryResponse,
            // Health
            health::HealthResponse,
            health::StoreHealth,
            health::HealthStatus,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health check"),
        (name = "Authentication", description = "Login (JWT), customer registration, current user"),
        (name = "Products", description = "Catalogue items. List endpoints return the page metadata in the X-Pagination header (schema PaginationMetadata, version in X-Pagination-Version)"),
        (name = "Categories", description = "Product categories"),
        (name = "Users", description = "User accounts (admin only)"),
    ),
    info(
        title = "Catalogue Service API",
        version = "1.0.0",
        description = "REST API for browsing and managing a product catalogue",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

async fn route_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("not_found", "No such route")),
    )
}

/// Create the API router with all routes.
///
/// `/metrics` is mounted only when a Prometheus handle is supplied.
pub fn create_api_router(
    state: AppState,
    auth_state: AuthState,
    metrics: Option<MetricsState>,
) -> Router {
    let read = middleware::from_fn_with_state(auth_state.guard(Policy::Read), authorize);
    let manage = middleware::from_fn_with_state(auth_state.guard(Policy::Manage), authorize);

    // `/category` is a static segment and wins over `/{id}`.
    let product_routes = Router::new()
        .route("/", get(products::list_products))
        .route("/category", get(products::list_products_with_category))
        .route("/category/{id}", get(products::get_product_with_category))
        .route("/{id}", get(products::get_product))
        .route_layer(read.clone())
        .merge(
            Router::new()
                .route("/", post(products::create_product))
                .route(
                    "/{id}",
                    put(products::update_product).delete(products::delete_product),
                )
                .route_layer(manage.clone()),
        );

    let category_routes = Router::new()
        .route("/", get(categories::list_categories))
        .route("/products", get(categories::list_categories_with_products))
        .route("/products/{id}", get(categories::get_category_with_products))
        .route("/{id}", get(categories::get_category))
        .route_layer(read.clone())
        .merge(
            Router::new()
                .route("/", post(categories::create_category))
                .route(
                    "/{id}",
                    put(categories::update_category).delete(categories::delete_category),
                )
                .route_layer(manage.clone()),
        );

    let user_routes = Router::new()
        .route("/", get(users::list_users))
        .route("/{id}", get(users::get_user))
        .route_layer(manage);

    let auth_routes = Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .merge(
            Router::new()
                .route("/me", get(auth::get_current_user))
                .route_layer(read),
        );

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([
            HeaderName::from_static(X_PAGINATION),
            HeaderName::from_static(X_PAGINATION_VERSION),
            HeaderName::from_static(REQUEST_ID_HEADER),
        ]);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    let mut router = Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/v1/auth", auth_routes)
        .nest("/api/v1/products", product_routes)
        .nest("/api/v1/categories", category_routes)
        .nest("/api/v1/users", user_routes)
        .fallback(route_not_found)
        .with_state(state)
        .merge(swagger_routes);

    if let Some(metrics) = metrics {
        router = router.merge(
            Router::new()
                .route("/metrics", get(prometheus_metrics))
                .with_state(metrics),
        );
    }

    router
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
}
