use axum::{
    Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
    routing::get,
};
use tracing::instrument;

use crate::error::ApiError;
use crate::models::*;

use super::{AppState, non_blank, run_blocking};

pub fn router() -> Router<AppState> {
    Router::new().route("/restaurants", get(list_restaurants).post(create_restaurant))
}

#[utoipa::path(
    get,
    path = "/restaurants",
    responses(
        (status = 200, description = "List of restaurants", body = ListRestaurantsResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse),
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn list_restaurants(
    State(state): State<AppState>,
) -> Result<Json<ListRestaurantsResponse>, ApiError> {
    let restaurants = run_blocking(&state, |service| service.list_restaurants()).await?;

    Ok(Json(ListRestaurantsResponse {
        restaurants: restaurants.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/restaurants",
    request_body = CreateRestaurantRequest,
    responses(
        (status = 201, description = "Restaurant created", body = RestaurantEnvelope),
        (status = 400, description = "Missing name", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse),
    ),
    tag = "restaurants"
)]
#[instrument(skip(state, payload))]
pub async fn create_restaurant(
    State(state): State<AppState>,
    payload: Result<Json<CreateRestaurantRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RestaurantEnvelope>), ApiError> {
    let Json(payload) = payload?;
    let name = non_blank(payload.name)
        .ok_or_else(|| ApiError::BadRequest("Missing required field: name".to_string()))?;

    let restaurant = run_blocking(&state, move |service| service.create_restaurant(name)).await?;

    Ok((
        StatusCode::CREATED,
        Json(RestaurantEnvelope {
            restaurant: restaurant.into(),
        }),
    ))
}
