use axum::{
    Router,
    extract::{State, rejection::JsonRejection},
    response::Json,
    routing::post,
};
use tracing::instrument;

use crate::completion::enhance_description as rewrite_description;
use crate::error::ApiError;
use crate::models::*;

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/ai/enhanceDescription", post(enhance_description))
}

#[utoipa::path(
    post,
    path = "/ai/enhanceDescription",
    request_body = EnhanceDescriptionRequest,
    responses(
        (status = 200, description = "Rewritten description", body = EnhanceDescriptionResponse),
        (status = 400, description = "Malformed request body", body = ApiErrorResponse),
        (status = 500, description = "Completion service failed", body = ApiErrorResponse),
    ),
    tag = "ai"
)]
#[instrument(skip(state, payload))]
pub async fn enhance_description(
    State(state): State<AppState>,
    payload: Result<Json<EnhanceDescriptionRequest>, JsonRejection>,
) -> Result<Json<EnhanceDescriptionResponse>, ApiError> {
    let Json(payload) = payload?;

    let new_description = rewrite_description(
        state.completion_client.as_ref(),
        &payload.name,
        &payload.old_description,
        payload.brand_voice.as_deref(),
    )
    .await?;

    Ok(Json(EnhanceDescriptionResponse { new_description }))
}
