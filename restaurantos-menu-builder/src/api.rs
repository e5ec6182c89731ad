use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{
    de::{DeserializeOwned, IgnoredAny},
    Deserialize,
};
use tracing::debug;

use crate::error::ApiClientError;
use crate::models::{
    EnhanceDescriptionPayload, Menu, MenuItem, MenuItemPayload, MenuPayload, Restaurant,
    SaveMenuPayload, SavedMenu,
};

/// The RestaurantOS endpoints the menu builder talks to.
#[async_trait]
pub trait MenuApi: Send + Sync {
    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, ApiClientError>;

    async fn list_menus(&self, restaurant_id: i64) -> Result<Vec<Menu>, ApiClientError>;

    async fn upsert_menu(&self, menu: &MenuPayload) -> Result<Menu, ApiClientError>;

    async fn delete_menu(&self, menu_id: i64) -> Result<(), ApiClientError>;

    async fn list_menu_items(&self, menu_id: i64) -> Result<Vec<MenuItem>, ApiClientError>;

    async fn upsert_menu_item(&self, item: &MenuItemPayload) -> Result<MenuItem, ApiClientError>;

    async fn delete_menu_item(&self, item_id: i64) -> Result<(), ApiClientError>;

    async fn save_menu(&self, payload: &SaveMenuPayload) -> Result<SavedMenu, ApiClientError>;

    async fn enhance_description(
        &self,
        payload: &EnhanceDescriptionPayload,
    ) -> Result<String, ApiClientError>;
}

#[derive(Deserialize)]
struct RestaurantsEnvelope {
    restaurants: Vec<Restaurant>,
}

#[derive(Deserialize)]
struct MenusEnvelope {
    menus: Vec<Menu>,
}

#[derive(Deserialize)]
struct MenuEnvelope {
    menu: Menu,
}

#[derive(Deserialize)]
struct MenuItemsEnvelope {
    #[serde(rename = "menuItems")]
    menu_items: Vec<MenuItem>,
}

#[derive(Deserialize)]
struct MenuItemEnvelope {
    item: MenuItem,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EnhancedDescription {
    new_description: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Clone)]
pub struct HttpMenuApi {
    http: Client,
    base_url: String,
}

impl HttpMenuApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiClientError> {
        let response = request.send().await?;
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "api response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or(body);
            return Err(ApiClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl MenuApi for HttpMenuApi {
    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, ApiClientError> {
        let envelope: RestaurantsEnvelope =
            Self::send(self.http.get(self.url("/restaurants"))).await?;
        Ok(envelope.restaurants)
    }

    async fn list_menus(&self, restaurant_id: i64) -> Result<Vec<Menu>, ApiClientError> {
        let request = self
            .http
            .get(self.url("/menus"))
            .query(&[("restaurantId", restaurant_id)]);
        let envelope: MenusEnvelope = Self::send(request).await?;
        Ok(envelope.menus)
    }

    async fn upsert_menu(&self, menu: &MenuPayload) -> Result<Menu, ApiClientError> {
        let envelope: MenuEnvelope = Self::send(self.http.post(self.url("/menus")).json(menu)).await?;
        Ok(envelope.menu)
    }

    async fn delete_menu(&self, menu_id: i64) -> Result<(), ApiClientError> {
        let request = self
            .http
            .delete(self.url("/menus"))
            .query(&[("menuId", menu_id)]);
        let _: IgnoredAny = Self::send(request).await?;
        Ok(())
    }

    async fn list_menu_items(&self, menu_id: i64) -> Result<Vec<MenuItem>, ApiClientError> {
        let request = self
            .http
            .get(self.url("/menuItems"))
            .query(&[("menuId", menu_id)]);
        let envelope: MenuItemsEnvelope = Self::send(request).await?;
        Ok(envelope.menu_items)
    }

    async fn upsert_menu_item(&self, item: &MenuItemPayload) -> Result<MenuItem, ApiClientError> {
        let envelope: MenuItemEnvelope =
            Self::send(self.http.post(self.url("/menuItems")).json(item)).await?;
        Ok(envelope.item)
    }

    async fn delete_menu_item(&self, item_id: i64) -> Result<(), ApiClientError> {
        let request = self
            .http
            .delete(self.url("/menuItems"))
            .query(&[("itemId", item_id)]);
        let _: IgnoredAny = Self::send(request).await?;
        Ok(())
    }

    async fn save_menu(&self, payload: &SaveMenuPayload) -> Result<SavedMenu, ApiClientError> {
        Self::send(self.http.post(self.url("/menus/save")).json(payload)).await
    }

    async fn enhance_description(
        &self,
        payload: &EnhanceDescriptionPayload,
    ) -> Result<String, ApiClientError> {
        let enhanced: EnhancedDescription =
            Self::send(self.http.post(self.url("/ai/enhanceDescription")).json(payload)).await?;
        Ok(enhanced.new_description)
    }
}
