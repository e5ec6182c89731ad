use axum::{
    Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use restaurantos_menu_service::{
    MenuDraft,
    models::{Template, UnknownTemplate},
};
use tracing::instrument;

use crate::error::ApiError;
use crate::models::*;

use super::{AppState, menu_item::item_draft, non_blank, required_id, run_blocking, upsert_status};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/menus", get(list_menus).post(upsert_menu).delete(delete_menu))
        .route("/menus/save", post(save_menu))
}

fn menu_draft(payload: UpsertMenuRequest) -> Result<MenuDraft, ApiError> {
    let (Some(restaurant_id), Some(name), Some(template_id)) = (
        payload.restaurant_id,
        non_blank(payload.name),
        non_blank(payload.template_id),
    ) else {
        return Err(ApiError::BadRequest(
            "Missing required fields: restaurantId, name, or templateId".to_string(),
        ));
    };
    let template_id: Template = template_id
        .parse()
        .map_err(|e: UnknownTemplate| ApiError::BadRequest(e.to_string()))?;

    Ok(MenuDraft {
        id: payload.id,
        restaurant_id,
        name,
        template_id,
    })
}

#[utoipa::path(
    get,
    path = "/menus",
    params(RestaurantIdQuery),
    responses(
        (status = 200, description = "Menus of the restaurant", body = ListMenusResponse),
        (status = 400, description = "Missing or invalid restaurantId", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse),
    ),
    tag = "menus"
)]
#[instrument(skip(state))]
pub async fn list_menus(
    State(state): State<AppState>,
    query: Result<Query<RestaurantIdQuery>, QueryRejection>,
) -> Result<Json<ListMenusResponse>, ApiError> {
    let Query(query) = query?;
    let restaurant_id = required_id(query.restaurant_id.as_deref(), "restaurantId")?;

    let menus = run_blocking(&state, move |service| service.list_menus(restaurant_id)).await?;

    Ok(Json(ListMenusResponse {
        menus: menus.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/menus",
    request_body = UpsertMenuRequest,
    responses(
        (status = 200, description = "Menu updated", body = MenuEnvelope),
        (status = 201, description = "Menu created", body = MenuEnvelope),
        (status = 400, description = "Missing fields or unknown template", body = ApiErrorResponse),
        (status = 404, description = "Menu or restaurant not found", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse),
    ),
    tag = "menus"
)]
#[instrument(skip(state, payload))]
pub async fn upsert_menu(
    State(state): State<AppState>,
    payload: Result<Json<UpsertMenuRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MenuEnvelope>), ApiError> {
    let Json(payload) = payload?;
    let draft = menu_draft(payload)?;

    let upserted = run_blocking(&state, move |service| service.upsert_menu(draft)).await?;
    let status = upsert_status(upserted.is_created());

    Ok((
        status,
        Json(MenuEnvelope {
            menu: upserted.into_inner().into(),
        }),
    ))
}

#[utoipa::path(
    delete,
    path = "/menus",
    params(MenuIdQuery),
    responses(
        (status = 200, description = "Menu deleted", body = SuccessResponse),
        (status = 400, description = "Missing or invalid menuId", body = ApiErrorResponse),
        (status = 404, description = "Menu not found", body = ApiErrorResponse),
        (status = 409, description = "Menu still has items", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse),
    ),
    tag = "menus"
)]
#[instrument(skip(state))]
pub async fn delete_menu(
    State(state): State<AppState>,
    query: Result<Query<MenuIdQuery>, QueryRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let Query(query) = query?;
    let menu_id = required_id(query.menu_id.as_deref(), "menuId")?;

    run_blocking(&state, move |service| service.delete_menu(menu_id)).await?;

    Ok(Json(SuccessResponse { success: true }))
}

/// Writes the menu and every item in a single transaction. Nothing is kept
/// when any write fails.
#[utoipa::path(
    post,
    path = "/menus/save",
    request_body = SaveMenuRequest,
    responses(
        (status = 200, description = "Existing menu saved", body = SaveMenuResponse),
        (status = 201, description = "Menu created and saved", body = SaveMenuResponse),
        (status = 400, description = "Missing fields, unknown template or invalid price", body = ApiErrorResponse),
        (status = 404, description = "Menu, item or restaurant not found", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse),
    ),
    tag = "menus"
)]
#[instrument(skip(state, payload))]
pub async fn save_menu(
    State(state): State<AppState>,
    payload: Result<Json<SaveMenuRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SaveMenuResponse>), ApiError> {
    let Json(payload) = payload?;
    let menu = menu_draft(payload.menu)?;
    let items = payload
        .items
        .into_iter()
        .map(|item| {
            let name = non_blank(item.name).ok_or_else(|| {
                ApiError::BadRequest("Missing required field: items[].name".to_string())
            })?;
            item_draft(item.id, name, item.description, item.price, item.category)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let saved = run_blocking(&state, move |service| service.save_menu(menu, items)).await?;

    Ok((
        upsert_status(saved.created),
        Json(SaveMenuResponse {
            menu: saved.menu.into(),
            menu_items: saved.items.into_iter().map(Into::into).collect(),
        }),
    ))
}
