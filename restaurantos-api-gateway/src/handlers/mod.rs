pub mod ai;
pub mod menu;
pub mod menu_item;
pub mod restaurant;


// Re-export routers for easier importing
pub use ai::router as ai_router;
pub use menu::router as menu_router;
pub use menu_item::router as menu_item_router;
pub use restaurant::router as restaurant_router;

use std::sync::Arc;

use axum::{Router, http::StatusCode};
use restaurantos_menu_service::{MenuService, StoreError};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::completion::CompletionClient;
use crate::error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub menu_service: MenuService,
    pub completion_client: Arc<dyn CompletionClient>,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(restaurant_router())
        .merge(menu_router())
        .merge(menu_item_router())
        .merge(ai_router())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// Diesel is synchronous, so store calls run on the blocking pool.
async fn run_blocking<T, F>(state: &AppState, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&MenuService) -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    let service = state.menu_service.clone();
    tokio::task::spawn_blocking(move || f(&service))
        .await
        .map_err(|e| ApiError::InternalError(format!("Worker task failed: {e}")))?
        .map_err(ApiError::from)
}

/// Reads a numeric id from a query parameter. Absent or blank values are
/// reported as missing.
fn required_id(value: Option<&str>, name: &str) -> Result<i64, ApiError> {
    let value = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::BadRequest(format!("Missing parameter: {name}")))?;
    value
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid parameter: {name}")))
}

fn upsert_status(created: bool) -> StatusCode {
    if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    }
}

/// Treats absent and blank strings alike, the way a form submits them.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        restaurant::list_restaurants,
        restaurant::create_restaurant,
        menu::list_menus,
        menu::upsert_menu,
        menu::delete_menu,
        menu::save_menu,
        menu_item::list_menu_items,
        menu_item::upsert_menu_item,
        menu_item::delete_menu_item,
        ai::enhance_description,
    ),
    components(
        schemas(
            crate::models::RestaurantResponse,
            crate::models::ListRestaurantsResponse,
            crate::models::CreateRestaurantRequest,
            crate::models::RestaurantEnvelope,
            crate::models::MenuResponse,
            crate::models::ListMenusResponse,
            crate::models::MenuEnvelope,
            crate::models::UpsertMenuRequest,
            crate::models::MenuItemResponse,
            crate::models::ListMenuItemsResponse,
            crate::models::MenuItemEnvelope,
            crate::models::UpsertMenuItemRequest,
            crate::models::SaveMenuItemRequest,
            crate::models::SaveMenuRequest,
            crate::models::SaveMenuResponse,
            crate::models::SuccessResponse,
            crate::models::EnhanceDescriptionRequest,
            crate::models::EnhanceDescriptionResponse,
            crate::models::ApiErrorResponse
        )
    ),
    tags(
        (name = "restaurants", description = "Restaurant endpoints"),
        (name = "menus", description = "Menu management endpoints"),
        (name = "menu-items", description = "Menu item management endpoints"),
        (name = "ai", description = "Description rewriting")
    ),
    info(
        title = "RestaurantOS API",
        description = "Menu builder API for RestaurantOS",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;
