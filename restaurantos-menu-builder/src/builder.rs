use tracing::{debug, info, warn};

use crate::api::MenuApi;
use crate::error::BuilderError;
use crate::models::{
    DraftItem, EnhanceDescriptionPayload, Menu, MenuItemPayload, MenuPayload, Restaurant,
    SaveItemPayload, SaveMenuPayload, Template,
};

/// Where the builder is in the select-then-edit flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderState {
    NoRestaurant,
    /// A restaurant is chosen but neither an existing menu nor a new draft.
    RestaurantSelected { restaurant_id: i64 },
    EditingMenu { restaurant_id: i64, menu_id: i64 },
    DraftingMenu { restaurant_id: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemField {
    Name,
    Description,
    Price,
    Category,
}

pub struct MenuBuilder<A> {
    api: A,
    state: BuilderState,
    saved_menus: Vec<Menu>,
    menu_name: String,
    template: Template,
    items: Vec<DraftItem>,
    dirty: bool,
}

impl<A: MenuApi> MenuBuilder<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: BuilderState::NoRestaurant,
            saved_menus: Vec::new(),
            menu_name: String::new(),
            template: Template::default(),
            items: Vec::new(),
            dirty: false,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn state(&self) -> BuilderState {
        self.state
    }

    pub fn saved_menus(&self) -> &[Menu] {
        &self.saved_menus
    }

    pub fn menu_name(&self) -> &str {
        &self.menu_name
    }

    pub fn template(&self) -> Template {
        self.template
    }

    pub fn items(&self) -> &[DraftItem] {
        &self.items
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn restaurant_id(&self) -> Result<i64, BuilderError> {
        match self.state {
            BuilderState::NoRestaurant => Err(BuilderError::NoRestaurantSelected),
            BuilderState::RestaurantSelected { restaurant_id }
            | BuilderState::EditingMenu { restaurant_id, .. }
            | BuilderState::DraftingMenu { restaurant_id } => Ok(restaurant_id),
        }
    }

    fn ensure_menu(&self) -> Result<(), BuilderError> {
        match self.state {
            BuilderState::EditingMenu { .. } | BuilderState::DraftingMenu { .. } => Ok(()),
            BuilderState::RestaurantSelected { .. } => Err(BuilderError::NoMenuSelected),
            BuilderState::NoRestaurant => Err(BuilderError::NoRestaurantSelected),
        }
    }

    fn selected_menu_id(&self) -> Option<i64> {
        match self.state {
            BuilderState::EditingMenu { menu_id, .. } => Some(menu_id),
            _ => None,
        }
    }

    fn clear_menu(&mut self) {
        self.menu_name.clear();
        self.template = Template::default();
        self.items.clear();
        self.dirty = false;
    }

    pub async fn list_restaurants(&self) -> Result<Vec<Restaurant>, BuilderError> {
        Ok(self.api.list_restaurants().await?)
    }

    /// Switches to `restaurant_id` and loads its saved menus. Any menu being
    /// edited is discarded.
    pub async fn select_restaurant(&mut self, restaurant_id: i64) -> Result<(), BuilderError> {
        let menus = self.api.list_menus(restaurant_id).await?;
        debug!(restaurant_id, menus = menus.len(), "restaurant selected");

        self.saved_menus = menus;
        self.state = BuilderState::RestaurantSelected { restaurant_id };
        self.clear_menu();
        Ok(())
    }

    /// Opens one of the saved menus and replaces the local items with the
    /// stored ones.
    pub async fn select_menu(&mut self, menu_id: i64) -> Result<(), BuilderError> {
        let restaurant_id = self.restaurant_id()?;
        let menu = self
            .saved_menus
            .iter()
            .find(|m| m.id == menu_id)
            .cloned()
            .ok_or(BuilderError::UnknownMenu(menu_id))?;

        let items = self.api.list_menu_items(menu_id).await?;

        self.state = BuilderState::EditingMenu {
            restaurant_id,
            menu_id,
        };
        self.menu_name = menu.name;
        self.template = menu.template_id;
        self.items = items.into_iter().map(DraftItem::from).collect();
        self.dirty = false;
        Ok(())
    }

    /// Starts a blank menu for the selected restaurant.
    pub fn new_menu(&mut self) -> Result<(), BuilderError> {
        let restaurant_id = self.restaurant_id()?;
        self.state = BuilderState::DraftingMenu { restaurant_id };
        self.clear_menu();
        Ok(())
    }

    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), BuilderError> {
        self.ensure_menu()?;
        self.menu_name = name.into();
        self.dirty = true;
        Ok(())
    }

    pub fn set_template(&mut self, template: Template) -> Result<(), BuilderError> {
        self.ensure_menu()?;
        self.template = template;
        self.dirty = true;
        Ok(())
    }

    /// Appends an empty item and returns its position.
    pub fn add_item(&mut self) -> Result<usize, BuilderError> {
        self.ensure_menu()?;
        self.items.push(DraftItem::default());
        self.dirty = true;
        Ok(self.items.len() - 1)
    }

    pub fn update_item(
        &mut self,
        index: usize,
        field: ItemField,
        value: impl Into<String>,
    ) -> Result<(), BuilderError> {
        self.ensure_menu()?;
        let item = self
            .items
            .get_mut(index)
            .ok_or(BuilderError::NoSuchItem(index))?;
        let value = value.into();
        match field {
            ItemField::Name => item.name = value,
            ItemField::Description => item.description = value,
            ItemField::Price => item.price = value,
            ItemField::Category => item.category = value,
        }
        self.dirty = true;
        Ok(())
    }

    /// Removes an item. A stored item is deleted on the server right away;
    /// if that call fails the item stays in the list.
    pub async fn remove_item(&mut self, index: usize) -> Result<(), BuilderError> {
        self.ensure_menu()?;
        let item = self.items.get(index).ok_or(BuilderError::NoSuchItem(index))?;

        if let Some(item_id) = item.id {
            self.api.delete_menu_item(item_id).await?;
            debug!(item_id, "menu item deleted");
        }

        self.items.remove(index);
        self.dirty = true;
        Ok(())
    }

    fn menu_payload(&self) -> Result<MenuPayload, BuilderError> {
        self.ensure_menu()?;
        Ok(MenuPayload {
            id: self.selected_menu_id(),
            restaurant_id: self.restaurant_id()?,
            name: self.menu_name.clone(),
            template_id: self.template,
        })
    }

    /// Records the stored menu locally and makes it the selected one.
    fn adopt_menu(&mut self, menu: Menu) {
        self.state = BuilderState::EditingMenu {
            restaurant_id: menu.restaurant_id,
            menu_id: menu.id,
        };
        match self.saved_menus.iter_mut().find(|m| m.id == menu.id) {
            Some(saved) => *saved = menu,
            None => self.saved_menus.push(menu),
        }
    }

    /// Upserts the menu, then each item in order. Stops at the first failure;
    /// items written before it stay written and the builder stays dirty.
    pub async fn save(&mut self) -> Result<(), BuilderError> {
        let payload = self.menu_payload()?;
        let menu = self.api.upsert_menu(&payload).await?;
        let menu_id = menu.id;
        self.adopt_menu(menu);

        for index in 0..self.items.len() {
            let item = &self.items[index];
            let payload = MenuItemPayload {
                id: item.id,
                menu_id,
                name: item.name.clone(),
                description: item.description.clone(),
                price: item.price.clone(),
                category: item.category.clone(),
            };
            let stored = match self.api.upsert_menu_item(&payload).await {
                Ok(stored) => stored,
                Err(err) => {
                    warn!(menu_id, index, error = %err, "saving menu item failed");
                    return Err(err.into());
                }
            };
            self.items[index].id = Some(stored.id);
        }

        self.dirty = false;
        info!(menu_id, items = self.items.len(), "menu saved");
        Ok(())
    }

    /// Saves the menu and all items in one request. Either everything is
    /// stored or nothing is.
    pub async fn save_atomic(&mut self) -> Result<(), BuilderError> {
        let payload = SaveMenuPayload {
            menu: self.menu_payload()?,
            items: self.items.iter().map(SaveItemPayload::from).collect(),
        };
        let saved = self.api.save_menu(&payload).await?;
        let menu_id = saved.menu.id;

        self.adopt_menu(saved.menu);
        self.items = saved.menu_items.into_iter().map(DraftItem::from).collect();
        self.dirty = false;
        info!(menu_id, items = self.items.len(), "menu saved atomically");
        Ok(())
    }

    /// Deletes the open menu. Stored items go first since the server refuses
    /// to delete a menu that still owns items. An unsaved draft is dropped
    /// without calling the server.
    pub async fn delete_menu(&mut self) -> Result<(), BuilderError> {
        self.ensure_menu()?;
        let restaurant_id = self.restaurant_id()?;

        if let Some(menu_id) = self.selected_menu_id() {
            while let Some((index, item_id)) = self
                .items
                .iter()
                .enumerate()
                .find_map(|(index, item)| item.id.map(|id| (index, id)))
            {
                self.api.delete_menu_item(item_id).await?;
                self.items.remove(index);
            }
            self.api.delete_menu(menu_id).await?;
            self.saved_menus.retain(|m| m.id != menu_id);
            info!(menu_id, "menu deleted");
        }

        self.state = BuilderState::RestaurantSelected { restaurant_id };
        self.clear_menu();
        Ok(())
    }

    /// Replaces an item's description with a rewritten one.
    pub async fn enhance_item_description(
        &mut self,
        index: usize,
        brand_voice: Option<&str>,
    ) -> Result<(), BuilderError> {
        self.ensure_menu()?;
        let item = self.items.get(index).ok_or(BuilderError::NoSuchItem(index))?;
        let payload = EnhanceDescriptionPayload {
            name: item.name.clone(),
            old_description: item.description.clone(),
            brand_voice: brand_voice.map(str::to_string),
        };

        let description = self.api.enhance_description(&payload).await?;

        self.items[index].description = description;
        self.dirty = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::error::ApiClientError;
    use crate::models::{MenuItem, Restaurant, SavedMenu};

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        ListRestaurants,
        ListMenus(i64),
        UpsertMenu(MenuPayload),
        ListItems(i64),
        UpsertItem(MenuItemPayload),
        DeleteItem(i64),
        DeleteMenu(i64),
        Save(SaveMenuPayload),
        Enhance(EnhanceDescriptionPayload),
    }

    /// Scripted API: assigns ids from a counter and records every call.
    #[derive(Default)]
    struct FakeApi {
        calls: Mutex<Vec<Call>>,
        next_id: Mutex<i64>,
        menus: Vec<Menu>,
        items: Vec<MenuItem>,
        fail_item_named: Option<&'static str>,
        fail_delete_item: Option<i64>,
    }

    impl FakeApi {
        fn record(&self, call: Call) {
            self.calls.lock().unwrap().push(call);
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn next_id(&self) -> i64 {
            let mut id = self.next_id.lock().unwrap();
            *id += 1;
            100 + *id
        }

        fn store_item(&self, id: Option<i64>, menu_id: i64, item: &SaveItemPayload) -> MenuItem {
            MenuItem {
                id: id.unwrap_or_else(|| self.next_id()),
                menu_id,
                name: item.name.clone(),
                description: item.description.clone(),
                price: if item.price.is_empty() {
                    "0.00".to_string()
                } else {
                    item.price.clone()
                },
                category: item.category.clone(),
            }
        }
    }

    fn server_error(message: &str) -> ApiClientError {
        ApiClientError::Status {
            status: 500,
            message: message.to_string(),
        }
    }

    #[async_trait]
    impl MenuApi for FakeApi {
        async fn list_restaurants(&self) -> Result<Vec<Restaurant>, ApiClientError> {
            self.record(Call::ListRestaurants);
            Ok(vec![Restaurant {
                id: 1,
                name: "My Restaurant".to_string(),
            }])
        }

        async fn list_menus(&self, restaurant_id: i64) -> Result<Vec<Menu>, ApiClientError> {
            self.record(Call::ListMenus(restaurant_id));
            Ok(self
                .menus
                .iter()
                .filter(|m| m.restaurant_id == restaurant_id)
                .cloned()
                .collect())
        }

        async fn upsert_menu(&self, menu: &MenuPayload) -> Result<Menu, ApiClientError> {
            self.record(Call::UpsertMenu(menu.clone()));
            Ok(Menu {
                id: menu.id.unwrap_or_else(|| self.next_id()),
                restaurant_id: menu.restaurant_id,
                name: menu.name.clone(),
                template_id: menu.template_id,
            })
        }

        async fn delete_menu(&self, menu_id: i64) -> Result<(), ApiClientError> {
            self.record(Call::DeleteMenu(menu_id));
            Ok(())
        }

        async fn list_menu_items(&self, menu_id: i64) -> Result<Vec<MenuItem>, ApiClientError> {
            self.record(Call::ListItems(menu_id));
            Ok(self
                .items
                .iter()
                .filter(|i| i.menu_id == menu_id)
                .cloned()
                .collect())
        }

        async fn upsert_menu_item(
            &self,
            item: &MenuItemPayload,
        ) -> Result<MenuItem, ApiClientError> {
            self.record(Call::UpsertItem(item.clone()));
            if self.fail_item_named == Some(item.name.as_str()) {
                return Err(server_error("value too long for type character varying"));
            }
            let save_item = SaveItemPayload {
                id: item.id,
                name: item.name.clone(),
                description: item.description.clone(),
                price: item.price.clone(),
                category: item.category.clone(),
            };
            Ok(self.store_item(item.id, item.menu_id, &save_item))
        }

        async fn delete_menu_item(&self, item_id: i64) -> Result<(), ApiClientError> {
            self.record(Call::DeleteItem(item_id));
            if self.fail_delete_item == Some(item_id) {
                return Err(server_error("connection reset"));
            }
            Ok(())
        }

        async fn save_menu(&self, payload: &SaveMenuPayload) -> Result<SavedMenu, ApiClientError> {
            self.record(Call::Save(payload.clone()));
            let menu = Menu {
                id: payload.menu.id.unwrap_or_else(|| self.next_id()),
                restaurant_id: payload.menu.restaurant_id,
                name: payload.menu.name.clone(),
                template_id: payload.menu.template_id,
            };
            let menu_items = payload
                .items
                .iter()
                .map(|item| self.store_item(item.id, menu.id, item))
                .collect();
            Ok(SavedMenu { menu, menu_items })
        }

        async fn enhance_description(
            &self,
            payload: &EnhanceDescriptionPayload,
        ) -> Result<String, ApiClientError> {
            self.record(Call::Enhance(payload.clone()));
            Ok(format!("Hearty {}", payload.old_description.to_lowercase()))
        }
    }

    fn dinner() -> Menu {
        Menu {
            id: 3,
            restaurant_id: 1,
            name: "Dinner".to_string(),
            template_id: Template::Classic,
        }
    }

    fn soup() -> MenuItem {
        MenuItem {
            id: 7,
            menu_id: 3,
            name: "Soup".to_string(),
            description: "Tomato soup".to_string(),
            price: "6.50".to_string(),
            category: "Starters".to_string(),
        }
    }

    fn api_with_dinner() -> FakeApi {
        FakeApi {
            menus: vec![dinner()],
            items: vec![soup()],
            ..Default::default()
        }
    }

    async fn editing_dinner() -> MenuBuilder<FakeApi> {
        let mut builder = MenuBuilder::new(api_with_dinner());
        builder.select_restaurant(1).await.unwrap();
        builder.select_menu(3).await.unwrap();
        builder
    }

    #[tokio::test]
    async fn test_edits_require_a_menu() {
        let mut builder = MenuBuilder::new(api_with_dinner());
        assert!(matches!(
            builder.add_item(),
            Err(BuilderError::NoRestaurantSelected)
        ));
        assert!(matches!(
            builder.new_menu(),
            Err(BuilderError::NoRestaurantSelected)
        ));

        builder.select_restaurant(1).await.unwrap();
        assert_eq!(
            builder.state(),
            BuilderState::RestaurantSelected { restaurant_id: 1 }
        );
        assert_eq!(builder.saved_menus(), &[dinner()]);
        assert!(matches!(builder.rename("Lunch"), Err(BuilderError::NoMenuSelected)));
        assert!(matches!(
            builder.select_menu(9).await,
            Err(BuilderError::UnknownMenu(9))
        ));
    }

    #[tokio::test]
    async fn test_select_menu_loads_items() {
        let mut builder = editing_dinner().await;

        assert_eq!(
            builder.state(),
            BuilderState::EditingMenu {
                restaurant_id: 1,
                menu_id: 3
            }
        );
        assert_eq!(builder.menu_name(), "Dinner");
        assert_eq!(builder.template(), Template::Classic);
        assert_eq!(builder.items().len(), 1);
        assert_eq!(builder.items()[0].id, Some(7));
        assert!(!builder.is_dirty());

        builder.set_template(Template::Minimal).unwrap();
        assert!(builder.is_dirty());

        builder.new_menu().unwrap();
        assert_eq!(builder.state(), BuilderState::DraftingMenu { restaurant_id: 1 });
        assert_eq!(builder.menu_name(), "");
        assert_eq!(builder.template(), Template::Modern);
        assert!(builder.items().is_empty());
        assert!(!builder.is_dirty());
    }

    #[tokio::test]
    async fn test_select_restaurant_clears_menu() {
        let mut builder = editing_dinner().await;
        builder.add_item().unwrap();

        builder.select_restaurant(2).await.unwrap();

        assert_eq!(
            builder.state(),
            BuilderState::RestaurantSelected { restaurant_id: 2 }
        );
        assert!(builder.saved_menus().is_empty());
        assert!(builder.items().is_empty());
        assert!(!builder.is_dirty());
    }

    #[tokio::test]
    async fn test_remove_item() {
        let mut builder = editing_dinner().await;
        let index = builder.add_item().unwrap();
        builder.update_item(index, ItemField::Name, "Bread").unwrap();

        // Unsaved item: local only.
        builder.remove_item(index).await.unwrap();
        assert_eq!(builder.api().calls(), vec![Call::ListMenus(1), Call::ListItems(3)]);

        // Stored item: deleted right away, before any save.
        builder.remove_item(0).await.unwrap();
        assert_eq!(builder.api().calls().last(), Some(&Call::DeleteItem(7)));
        assert!(builder.items().is_empty());
        assert!(builder.is_dirty());

        assert!(matches!(
            builder.remove_item(0).await,
            Err(BuilderError::NoSuchItem(0))
        ));
    }

    #[tokio::test]
    async fn test_save_new_menu_in_order() {
        let mut builder = MenuBuilder::new(FakeApi::default());
        builder.select_restaurant(1).await.unwrap();
        builder.new_menu().unwrap();
        builder.rename("Brunch").unwrap();
        let first = builder.add_item().unwrap();
        builder.update_item(first, ItemField::Name, "Pancakes").unwrap();
        builder.update_item(first, ItemField::Price, "7.5").unwrap();
        let second = builder.add_item().unwrap();
        builder.update_item(second, ItemField::Name, "Coffee").unwrap();

        builder.save().await.unwrap();

        let calls = builder.api().calls();
        let Call::UpsertMenu(menu) = &calls[1] else {
            panic!("expected menu upsert first, got {:?}", calls[1]);
        };
        assert_eq!(menu.id, None);
        assert_eq!(menu.name, "Brunch");
        let names: Vec<_> = calls[2..]
            .iter()
            .map(|call| match call {
                Call::UpsertItem(item) => item.name.as_str(),
                other => panic!("unexpected call {other:?}"),
            })
            .collect();
        assert_eq!(names, ["Pancakes", "Coffee"]);

        let BuilderState::EditingMenu { menu_id, .. } = builder.state() else {
            panic!("expected the new menu to be selected");
        };
        assert_eq!(builder.saved_menus().last().map(|m| m.id), Some(menu_id));
        assert!(builder.items().iter().all(|item| item.id.is_some()));
        assert!(!builder.is_dirty());
    }

    #[tokio::test]
    async fn test_second_save_updates() {
        let mut builder = MenuBuilder::new(FakeApi::default());
        builder.select_restaurant(1).await.unwrap();
        builder.new_menu().unwrap();
        builder.rename("Brunch").unwrap();
        let index = builder.add_item().unwrap();
        builder.update_item(index, ItemField::Name, "Pancakes").unwrap();
        builder.save().await.unwrap();
        let item_id = builder.items()[0].id;

        builder.update_item(index, ItemField::Price, "8").unwrap();
        builder.save().await.unwrap();

        let calls = builder.api().calls();
        let Some(Call::UpsertItem(item)) = calls.last() else {
            panic!("expected an item upsert");
        };
        assert_eq!(item.id, item_id);
        assert_eq!(item.price, "8");
        assert_eq!(builder.saved_menus().len(), 1);
    }

    #[tokio::test]
    async fn test_save_stops_at_failed_item() {
        let api = FakeApi {
            fail_item_named: Some("Coffee"),
            ..api_with_dinner()
        };
        let mut builder = MenuBuilder::new(api);
        builder.select_restaurant(1).await.unwrap();
        builder.select_menu(3).await.unwrap();
        for name in ["Coffee", "Tea"] {
            let index = builder.add_item().unwrap();
            builder.update_item(index, ItemField::Name, name).unwrap();
        }

        let err = builder.save().await.unwrap_err();

        assert!(matches!(err, BuilderError::Api(ApiClientError::Status { status: 500, .. })));
        assert!(builder.is_dirty());
        let upserted: Vec<_> = builder
            .api()
            .calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::UpsertItem(item) => Some(item.name),
                _ => None,
            })
            .collect();
        assert_eq!(upserted, ["Soup", "Coffee"]);
        assert_eq!(builder.items()[1].id, None);
        assert_eq!(builder.items()[2].id, None);
    }

    #[tokio::test]
    async fn test_save_atomic() {
        let mut builder = editing_dinner().await;
        builder.rename("Supper").unwrap();
        let index = builder.add_item().unwrap();
        builder.update_item(index, ItemField::Name, "Bread").unwrap();

        builder.save_atomic().await.unwrap();

        let Some(Call::Save(payload)) = builder.api().calls().last().cloned() else {
            panic!("expected a single save call");
        };
        assert_eq!(payload.menu.id, Some(3));
        assert_eq!(payload.items.len(), 2);
        assert_eq!(builder.saved_menus()[0].name, "Supper");
        assert_eq!(builder.items()[1].price, "0.00");
        assert!(builder.items().iter().all(|item| item.id.is_some()));
        assert!(!builder.is_dirty());
    }

    #[tokio::test]
    async fn test_enhance_item_description() {
        let mut builder = editing_dinner().await;

        builder
            .enhance_item_description(0, Some("rustic"))
            .await
            .unwrap();

        assert_eq!(builder.items()[0].description, "Hearty tomato soup");
        assert!(builder.is_dirty());
        assert_eq!(
            builder.api().calls().last(),
            Some(&Call::Enhance(EnhanceDescriptionPayload {
                name: "Soup".to_string(),
                old_description: "Tomato soup".to_string(),
                brand_voice: Some("rustic".to_string()),
            }))
        );
    }

    #[tokio::test]
    async fn test_list_restaurants() {
        let builder = MenuBuilder::new(FakeApi::default());

        let restaurants = builder.list_restaurants().await.unwrap();

        assert_eq!(restaurants.len(), 1);
        assert_eq!(restaurants[0].name, "My Restaurant");
        assert_eq!(builder.api().calls(), vec![Call::ListRestaurants]);
        assert_eq!(builder.state(), BuilderState::NoRestaurant);
    }

    #[tokio::test]
    async fn test_delete_menu_removes_items_first() {
        let mut builder = editing_dinner().await;
        let index = builder.add_item().unwrap();
        builder.update_item(index, ItemField::Name, "Bread").unwrap();

        builder.delete_menu().await.unwrap();

        assert_eq!(
            builder.api().calls()[2..].to_vec(),
            vec![Call::DeleteItem(7), Call::DeleteMenu(3)]
        );
        assert_eq!(
            builder.state(),
            BuilderState::RestaurantSelected { restaurant_id: 1 }
        );
        assert!(builder.saved_menus().is_empty());
        assert!(builder.items().is_empty());
        assert!(!builder.is_dirty());
    }

    #[tokio::test]
    async fn test_delete_menu_keeps_menu_when_item_delete_fails() {
        let api = FakeApi {
            fail_delete_item: Some(7),
            ..api_with_dinner()
        };
        let mut builder = MenuBuilder::new(api);
        builder.select_restaurant(1).await.unwrap();
        builder.select_menu(3).await.unwrap();

        let err = builder.delete_menu().await.unwrap_err();

        assert!(matches!(err, BuilderError::Api(ApiClientError::Status { status: 500, .. })));
        assert!(!builder.api().calls().contains(&Call::DeleteMenu(3)));
        assert_eq!(builder.saved_menus(), &[dinner()]);
        assert_eq!(builder.items().len(), 1);
        assert_eq!(
            builder.state(),
            BuilderState::EditingMenu {
                restaurant_id: 1,
                menu_id: 3
            }
        );
    }

    #[tokio::test]
    async fn test_delete_draft_menu_is_local() {
        let mut builder = MenuBuilder::new(api_with_dinner());
        assert!(matches!(
            builder.delete_menu().await,
            Err(BuilderError::NoRestaurantSelected)
        ));
        builder.select_restaurant(1).await.unwrap();
        assert!(matches!(
            builder.delete_menu().await,
            Err(BuilderError::NoMenuSelected)
        ));
        builder.new_menu().unwrap();
        builder.rename("Brunch").unwrap();

        builder.delete_menu().await.unwrap();

        assert_eq!(builder.api().calls(), vec![Call::ListMenus(1)]);
        assert_eq!(
            builder.state(),
            BuilderState::RestaurantSelected { restaurant_id: 1 }
        );
        assert_eq!(builder.saved_menus(), &[dinner()]);
        assert_eq!(builder.menu_name(), "");
    }
}
