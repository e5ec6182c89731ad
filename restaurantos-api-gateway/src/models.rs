use std::str::FromStr;

use bigdecimal::BigDecimal;
use restaurantos_menu_service::models::{Menu, MenuItem, Restaurant, normalize_price};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::ApiError;

#[derive(Debug, Serialize, ToSchema)]
pub struct RestaurantResponse {
    /// Unique identifier for the restaurant
    pub id: i64,
    /// Name of the restaurant
    pub name: String,
}

impl From<Restaurant> for RestaurantResponse {
    fn from(r: Restaurant) -> Self {
        Self {
            id: r.id,
            name: r.name,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListRestaurantsResponse {
    pub restaurants: Vec<RestaurantResponse>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRestaurantRequest {
    /// Name of the restaurant
    pub name: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RestaurantEnvelope {
    pub restaurant: RestaurantResponse,
}

/// A menu row as stored.
#[derive(Debug, Serialize, ToSchema)]
pub struct MenuResponse {
    pub id: i64,
    pub restaurant_id: i64,
    pub name: String,
    /// One of `modern`, `classic`, `minimal`
    pub template_id: String,
}

impl From<Menu> for MenuResponse {
    fn from(m: Menu) -> Self {
        Self {
            id: m.id,
            restaurant_id: m.restaurant_id,
            name: m.name,
            template_id: m.template_id.to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListMenusResponse {
    pub menus: Vec<MenuResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MenuEnvelope {
    pub menu: MenuResponse,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertMenuRequest {
    /// Updates this menu when present, creates a new one otherwise
    pub id: Option<i64>,
    pub restaurant_id: Option<i64>,
    pub name: Option<String>,
    /// One of `modern`, `classic`, `minimal`
    pub template_id: Option<String>,
}

/// A menu item row as stored.
#[derive(Debug, Serialize, ToSchema)]
pub struct MenuItemResponse {
    pub id: i64,
    pub menu_id: i64,
    pub name: String,
    pub description: String,
    /// Decimal price with two fractional digits
    pub price: String,
    pub category: String,
}

impl From<MenuItem> for MenuItemResponse {
    fn from(i: MenuItem) -> Self {
        Self {
            id: i.id,
            menu_id: i.menu_id,
            name: i.name,
            description: i.description,
            price: i.price.to_string(),
            category: i.category,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListMenuItemsResponse {
    #[serde(rename = "menuItems")]
    pub menu_items: Vec<MenuItemResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MenuItemEnvelope {
    pub item: MenuItemResponse,
}

/// Prices arrive either as JSON numbers or as the raw text of a form field.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PriceInput {
    Number(serde_json::Number),
    Text(String),
}

impl PriceInput {
    /// Blank text counts as an absent price. Anything that does not fit in
    /// cents below 100,000,000 is rejected.
    pub fn parse(&self) -> Result<Option<BigDecimal>, ApiError> {
        let text = match self {
            PriceInput::Number(n) => n.to_string(),
            PriceInput::Text(s) if s.trim().is_empty() => return Ok(None),
            PriceInput::Text(s) => s.trim().to_string(),
        };
        let price = BigDecimal::from_str(&text)
            .map_err(|_| ApiError::BadRequest(format!("Invalid price: {text}")))?;
        normalize_price(&price)
            .map(Some)
            .map_err(|e| ApiError::BadRequest(e.to_string()))
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertMenuItemRequest {
    /// Updates this item when present, creates a new one otherwise
    pub id: Option<i64>,
    pub menu_id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<String>, example = "12.50")]
    pub price: Option<PriceInput>,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveMenuItemRequest {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<String>, example = "12.50")]
    pub price: Option<PriceInput>,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SaveMenuRequest {
    pub menu: UpsertMenuRequest,
    #[serde(default)]
    pub items: Vec<SaveMenuItemRequest>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SaveMenuResponse {
    pub menu: MenuResponse,
    #[serde(rename = "menuItems")]
    pub menu_items: Vec<MenuItemResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnhanceDescriptionRequest {
    /// Name of the menu item
    #[serde(default)]
    pub name: String,
    /// Description to rewrite
    #[serde(default)]
    pub old_description: String,
    /// Tone hint such as "playful" or "upscale"; defaults to "generic"
    pub brand_voice: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnhanceDescriptionResponse {
    pub new_description: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RestaurantIdQuery {
    /// Restaurant whose menus to list
    #[serde(rename = "restaurantId")]
    pub restaurant_id: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MenuIdQuery {
    #[serde(rename = "menuId")]
    pub menu_id: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ItemIdQuery {
    #[serde(rename = "itemId")]
    pub item_id: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    /// Error message
    pub error: String,
}
