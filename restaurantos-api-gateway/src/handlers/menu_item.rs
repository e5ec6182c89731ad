use axum::{
    Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::Json,
    routing::get,
};
use restaurantos_menu_service::MenuItemDraft;
use tracing::instrument;

use crate::error::ApiError;
use crate::models::*;

use super::{AppState, non_blank, required_id, run_blocking, upsert_status};

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/menuItems",
        get(list_menu_items).post(upsert_menu_item).delete(delete_menu_item),
    )
}

pub(super) fn item_draft(
    id: Option<i64>,
    name: String,
    description: Option<String>,
    price: Option<PriceInput>,
    category: Option<String>,
) -> Result<MenuItemDraft, ApiError> {
    let price = match price {
        Some(price) => price.parse()?,
        None => None,
    };

    Ok(MenuItemDraft {
        id,
        name,
        description,
        price,
        category,
    })
}

#[utoipa::path(
    get,
    path = "/menuItems",
    params(MenuIdQuery),
    responses(
        (status = 200, description = "Items of the menu", body = ListMenuItemsResponse),
        (status = 400, description = "Missing or invalid menuId", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse),
    ),
    tag = "menu-items"
)]
#[instrument(skip(state))]
pub async fn list_menu_items(
    State(state): State<AppState>,
    query: Result<Query<MenuIdQuery>, QueryRejection>,
) -> Result<Json<ListMenuItemsResponse>, ApiError> {
    let Query(query) = query?;
    let menu_id = required_id(query.menu_id.as_deref(), "menuId")?;

    let items = run_blocking(&state, move |service| service.list_menu_items(menu_id)).await?;

    Ok(Json(ListMenuItemsResponse {
        menu_items: items.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/menuItems",
    request_body = UpsertMenuItemRequest,
    responses(
        (status = 200, description = "Item updated", body = MenuItemEnvelope),
        (status = 201, description = "Item created", body = MenuItemEnvelope),
        (status = 400, description = "Missing fields or invalid price", body = ApiErrorResponse),
        (status = 404, description = "Item or menu not found", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse),
    ),
    tag = "menu-items"
)]
#[instrument(skip(state, payload))]
pub async fn upsert_menu_item(
    State(state): State<AppState>,
    payload: Result<Json<UpsertMenuItemRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MenuItemEnvelope>), ApiError> {
    let Json(payload) = payload?;
    let (Some(menu_id), Some(name)) = (payload.menu_id, non_blank(payload.name)) else {
        return Err(ApiError::BadRequest(
            "Missing required fields: menuId, name".to_string(),
        ));
    };
    let draft = item_draft(
        payload.id,
        name,
        payload.description,
        payload.price,
        payload.category,
    )?;

    let upserted =
        run_blocking(&state, move |service| service.upsert_menu_item(menu_id, draft)).await?;
    let status = upsert_status(upserted.is_created());

    Ok((
        status,
        Json(MenuItemEnvelope {
            item: upserted.into_inner().into(),
        }),
    ))
}

#[utoipa::path(
    delete,
    path = "/menuItems",
    params(ItemIdQuery),
    responses(
        (status = 200, description = "Item deleted", body = SuccessResponse),
        (status = 400, description = "Missing or invalid itemId", body = ApiErrorResponse),
        (status = 404, description = "Item not found", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse),
    ),
    tag = "menu-items"
)]
#[instrument(skip(state))]
pub async fn delete_menu_item(
    State(state): State<AppState>,
    query: Result<Query<ItemIdQuery>, QueryRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let Query(query) = query?;
    let item_id = required_id(query.item_id.as_deref(), "itemId")?;

    run_blocking(&state, move |service| service.delete_menu_item(item_id)).await?;

    Ok(Json(SuccessResponse { success: true }))
}
