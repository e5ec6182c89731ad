use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{Entity, MenuItemWrite, MenuStore, MenuWrite, SavedMenu, StoreError};
use crate::models::{
    Menu, MenuChanges, MenuItem, MenuItemChanges, NewMenu, NewMenuItem, NewRestaurant, Restaurant,
};

/// Process-local store with the same key and foreign-key rules as the
/// PostgreSQL schema. Used by tests and local demos.
#[derive(Default)]
pub struct MemoryMenuStore {
    tables: Mutex<Tables>,
}

#[derive(Default, Clone)]
struct Tables {
    restaurant_seq: i64,
    menu_seq: i64,
    item_seq: i64,
    restaurants: BTreeMap<i64, Restaurant>,
    menus: BTreeMap<i64, Menu>,
    items: BTreeMap<i64, MenuItem>,
}

impl Tables {
    fn insert_menu(&mut self, new: NewMenu) -> Result<Menu, StoreError> {
        if !self.restaurants.contains_key(&new.restaurant_id) {
            return Err(StoreError::MissingParent(Entity::Restaurant));
        }
        self.menu_seq += 1;
        let menu = Menu {
            id: self.menu_seq,
            restaurant_id: new.restaurant_id,
            name: new.name,
            template_id: new.template_id,
        };
        self.menus.insert(menu.id, menu.clone());
        Ok(menu)
    }

    fn update_menu(&mut self, id: i64, changes: MenuChanges) -> Result<Menu, StoreError> {
        let menu = self
            .menus
            .get_mut(&id)
            .ok_or(StoreError::NotFound(Entity::Menu))?;
        menu.name = changes.name;
        menu.template_id = changes.template_id;
        Ok(menu.clone())
    }

    fn insert_item(&mut self, new: NewMenuItem) -> Result<MenuItem, StoreError> {
        if !self.menus.contains_key(&new.menu_id) {
            return Err(StoreError::MissingParent(Entity::Menu));
        }
        self.item_seq += 1;
        let item = MenuItem {
            id: self.item_seq,
            menu_id: new.menu_id,
            name: new.name,
            description: new.description,
            price: new.price,
            category: new.category,
        };
        self.items.insert(item.id, item.clone());
        Ok(item)
    }

    fn update_item(
        &mut self,
        id: i64,
        menu_id: Option<i64>,
        changes: MenuItemChanges,
    ) -> Result<MenuItem, StoreError> {
        let item = self
            .items
            .get_mut(&id)
            .filter(|item| menu_id.map_or(true, |menu_id| item.menu_id == menu_id))
            .ok_or(StoreError::NotFound(Entity::MenuItem))?;
        item.name = changes.name;
        item.description = changes.description;
        item.price = changes.price;
        item.category = changes.category;
        Ok(item.clone())
    }
}

impl MemoryMenuStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl MenuStore for MemoryMenuStore {
    fn list_restaurants(&self) -> Result<Vec<Restaurant>, StoreError> {
        Ok(self.tables().restaurants.values().cloned().collect())
    }

    fn create_restaurant(&self, new: NewRestaurant) -> Result<Restaurant, StoreError> {
        let mut tables = self.tables();
        tables.restaurant_seq += 1;
        let restaurant = Restaurant {
            id: tables.restaurant_seq,
            name: new.name,
        };
        tables.restaurants.insert(restaurant.id, restaurant.clone());
        Ok(restaurant)
    }

    fn list_menus(&self, restaurant_id: i64) -> Result<Vec<Menu>, StoreError> {
        Ok(self
            .tables()
            .menus
            .values()
            .filter(|menu| menu.restaurant_id == restaurant_id)
            .cloned()
            .collect())
    }

    fn create_menu(&self, new: NewMenu) -> Result<Menu, StoreError> {
        self.tables().insert_menu(new)
    }

    fn update_menu(&self, id: i64, changes: MenuChanges) -> Result<Menu, StoreError> {
        self.tables().update_menu(id, changes)
    }

    fn delete_menu(&self, id: i64) -> Result<(), StoreError> {
        let mut tables = self.tables();
        if !tables.menus.contains_key(&id) {
            return Err(StoreError::NotFound(Entity::Menu));
        }
        if tables.items.values().any(|item| item.menu_id == id) {
            return Err(StoreError::HasDependents(Entity::Menu));
        }
        tables.menus.remove(&id);
        Ok(())
    }

    fn list_menu_items(&self, menu_id: i64) -> Result<Vec<MenuItem>, StoreError> {
        Ok(self
            .tables()
            .items
            .values()
            .filter(|item| item.menu_id == menu_id)
            .cloned()
            .collect())
    }

    fn create_menu_item(&self, new: NewMenuItem) -> Result<MenuItem, StoreError> {
        self.tables().insert_item(new)
    }

    fn update_menu_item(
        &self,
        id: i64,
        changes: MenuItemChanges,
    ) -> Result<MenuItem, StoreError> {
        self.tables().update_item(id, None, changes)
    }

    fn delete_menu_item(&self, id: i64) -> Result<(), StoreError> {
        match self.tables().items.remove(&id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound(Entity::MenuItem)),
        }
    }

    fn save_menu(
        &self,
        menu: MenuWrite,
        items: Vec<MenuItemWrite>,
    ) -> Result<SavedMenu, StoreError> {
        let mut tables = self.tables();
        // Work on a copy so a failure leaves the committed tables untouched.
        let mut draft = tables.clone();

        let (menu, created) = match menu {
            MenuWrite::Create(new) => (draft.insert_menu(new)?, true),
            MenuWrite::Update { id, changes } => (draft.update_menu(id, changes)?, false),
        };
        let items = items
            .into_iter()
            .map(|write| match write {
                MenuItemWrite::Create(changes) => draft.insert_item(changes.into_new(menu.id)),
                MenuItemWrite::Update { id, changes } => {
                    draft.update_item(id, Some(menu.id), changes)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        *tables = draft;
        Ok(SavedMenu {
            menu,
            created,
            items,
        })
    }
}
