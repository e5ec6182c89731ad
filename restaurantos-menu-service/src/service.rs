use std::sync::Arc;

use bigdecimal::BigDecimal;
use tracing::info;

use crate::models::{
    normalize_price, Menu, MenuChanges, MenuItem, MenuItemChanges, NewMenu, NewRestaurant,
    Restaurant, Template,
};
use crate::store::{MenuItemWrite, MenuStore, MenuWrite, SavedMenu, StoreError};

/// Result of an upsert: which branch ran, and the row it produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Upserted<T> {
    Created(T),
    Updated(T),
}

impl<T> Upserted<T> {
    pub fn is_created(&self) -> bool {
        matches!(self, Upserted::Created(_))
    }

    pub fn into_inner(self) -> T {
        match self {
            Upserted::Created(v) | Upserted::Updated(v) => v,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuDraft {
    pub id: Option<i64>,
    pub restaurant_id: i64,
    pub name: String,
    pub template_id: Template,
}

/// Item fields as submitted. Absent optional fields fall back to an empty
/// string or a zero price; prices are rounded half-up to cents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuItemDraft {
    pub id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub price: Option<BigDecimal>,
    pub category: Option<String>,
}

impl MenuItemDraft {
    fn into_changes(self) -> Result<MenuItemChanges, StoreError> {
        let price = normalize_price(&self.price.unwrap_or_default())?;
        Ok(MenuItemChanges {
            name: self.name,
            description: self.description.unwrap_or_default(),
            price,
            category: self.category.unwrap_or_default(),
        })
    }
}

#[derive(Clone)]
pub struct MenuService {
    store: Arc<dyn MenuStore>,
}

impl MenuService {
    pub fn new(store: Arc<dyn MenuStore>) -> Self {
        Self { store }
    }

    pub fn list_restaurants(&self) -> Result<Vec<Restaurant>, StoreError> {
        self.store.list_restaurants()
    }

    pub fn create_restaurant(&self, name: String) -> Result<Restaurant, StoreError> {
        let restaurant = self.store.create_restaurant(NewRestaurant { name })?;
        info!(restaurant_id = restaurant.id, "restaurant created");
        Ok(restaurant)
    }

    pub fn list_menus(&self, restaurant_id: i64) -> Result<Vec<Menu>, StoreError> {
        self.store.list_menus(restaurant_id)
    }

    /// Updates the menu when the draft carries an id, inserts it otherwise.
    pub fn upsert_menu(&self, draft: MenuDraft) -> Result<Upserted<Menu>, StoreError> {
        match draft.id {
            Some(id) => {
                let menu = self.store.update_menu(
                    id,
                    MenuChanges {
                        name: draft.name,
                        template_id: draft.template_id,
                    },
                )?;
                Ok(Upserted::Updated(menu))
            }
            None => {
                let menu = self.store.create_menu(NewMenu {
                    restaurant_id: draft.restaurant_id,
                    name: draft.name,
                    template_id: draft.template_id,
                })?;
                info!(menu_id = menu.id, restaurant_id = menu.restaurant_id, "menu created");
                Ok(Upserted::Created(menu))
            }
        }
    }

    pub fn delete_menu(&self, id: i64) -> Result<(), StoreError> {
        self.store.delete_menu(id)?;
        info!(menu_id = id, "menu deleted");
        Ok(())
    }

    pub fn list_menu_items(&self, menu_id: i64) -> Result<Vec<MenuItem>, StoreError> {
        self.store.list_menu_items(menu_id)
    }

    pub fn upsert_menu_item(
        &self,
        menu_id: i64,
        draft: MenuItemDraft,
    ) -> Result<Upserted<MenuItem>, StoreError> {
        match draft.id {
            Some(id) => {
                let item = self.store.update_menu_item(id, draft.into_changes()?)?;
                Ok(Upserted::Updated(item))
            }
            None => {
                let item = self
                    .store
                    .create_menu_item(draft.into_changes()?.into_new(menu_id))?;
                Ok(Upserted::Created(item))
            }
        }
    }

    pub fn delete_menu_item(&self, id: i64) -> Result<(), StoreError> {
        self.store.delete_menu_item(id)
    }

    /// Writes a menu and all of its items in one transaction.
    pub fn save_menu(
        &self,
        menu: MenuDraft,
        items: Vec<MenuItemDraft>,
    ) -> Result<SavedMenu, StoreError> {
        let menu_write = match menu.id {
            Some(id) => MenuWrite::Update {
                id,
                changes: MenuChanges {
                    name: menu.name,
                    template_id: menu.template_id,
                },
            },
            None => MenuWrite::Create(NewMenu {
                restaurant_id: menu.restaurant_id,
                name: menu.name,
                template_id: menu.template_id,
            }),
        };
        let item_writes = items
            .into_iter()
            .map(|draft| {
                Ok(match draft.id {
                    Some(id) => MenuItemWrite::Update {
                        id,
                        changes: draft.into_changes()?,
                    },
                    None => MenuItemWrite::Create(draft.into_changes()?),
                })
            })
            .collect::<Result<Vec<_>, StoreError>>()?;

        let saved = self.store.save_menu(menu_write, item_writes)?;
        info!(
            menu_id = saved.menu.id,
            created = saved.created,
            items = saved.items.len(),
            "menu saved"
        );
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::store::{Entity, MemoryMenuStore};

    fn service_with_restaurant() -> (MenuService, Restaurant) {
        let service = MenuService::new(Arc::new(MemoryMenuStore::new()));
        let restaurant = service
            .create_restaurant("Test Restaurant".to_string())
            .unwrap();
        (service, restaurant)
    }

    fn dinner(restaurant_id: i64) -> MenuDraft {
        MenuDraft {
            id: None,
            restaurant_id,
            name: "Dinner".to_string(),
            template_id: Template::Modern,
        }
    }

    #[test]
    fn test_upsert_menu_inserts_then_updates() {
        let (service, restaurant) = service_with_restaurant();

        let created = service.upsert_menu(dinner(restaurant.id)).unwrap();
        assert!(created.is_created());
        let menu = created.into_inner();

        let updated = service
            .upsert_menu(MenuDraft {
                id: Some(menu.id),
                template_id: Template::Classic,
                ..dinner(restaurant.id)
            })
            .unwrap();
        assert!(!updated.is_created());
        let updated = updated.into_inner();
        assert_eq!(updated.id, menu.id);
        assert_eq!(updated.template_id, Template::Classic);

        let again = service
            .upsert_menu(MenuDraft {
                id: Some(menu.id),
                template_id: Template::Classic,
                ..dinner(restaurant.id)
            })
            .unwrap()
            .into_inner();
        assert_eq!(again, updated);
        assert_eq!(service.list_menus(restaurant.id).unwrap().len(), 1);
    }

    #[test]
    fn test_upsert_menu_with_unknown_id() {
        let (service, restaurant) = service_with_restaurant();
        let result = service.upsert_menu(MenuDraft {
            id: Some(77),
            ..dinner(restaurant.id)
        });

        assert!(matches!(result, Err(StoreError::NotFound(Entity::Menu))));
    }

    #[test]
    fn test_upsert_menu_item_defaults() {
        let (service, restaurant) = service_with_restaurant();
        let menu = service
            .upsert_menu(dinner(restaurant.id))
            .unwrap()
            .into_inner();

        let item = service
            .upsert_menu_item(
                menu.id,
                MenuItemDraft {
                    name: "Soup".to_string(),
                    ..Default::default()
                },
            )
            .unwrap()
            .into_inner();

        assert_eq!(item.menu_id, menu.id);
        assert_eq!(item.description, "");
        assert_eq!(item.category, "");
        assert_eq!(item.price.to_string(), "0.00");
    }

    #[test]
    fn test_upsert_menu_item_keeps_menu() {
        let (service, restaurant) = service_with_restaurant();
        let lunch = service
            .upsert_menu(dinner(restaurant.id))
            .unwrap()
            .into_inner();
        let dinner_menu = service
            .upsert_menu(dinner(restaurant.id))
            .unwrap()
            .into_inner();
        let item = service
            .upsert_menu_item(
                lunch.id,
                MenuItemDraft {
                    name: "Soup".to_string(),
                    ..Default::default()
                },
            )
            .unwrap()
            .into_inner();

        let updated = service
            .upsert_menu_item(
                dinner_menu.id,
                MenuItemDraft {
                    id: Some(item.id),
                    name: "Tomato Soup".to_string(),
                    price: Some(BigDecimal::from_str("6.5").unwrap()),
                    ..Default::default()
                },
            )
            .unwrap()
            .into_inner();

        assert_eq!(updated.menu_id, lunch.id);
        assert_eq!(updated.name, "Tomato Soup");
        assert_eq!(updated.price.to_string(), "6.50");
    }

    #[test]
    fn test_upsert_menu_item_rounds_price() {
        let (service, restaurant) = service_with_restaurant();
        let menu = service
            .upsert_menu(dinner(restaurant.id))
            .unwrap()
            .into_inner();

        let item = service
            .upsert_menu_item(
                menu.id,
                MenuItemDraft {
                    name: "Soup".to_string(),
                    price: Some(BigDecimal::from_str("4.567").unwrap()),
                    ..Default::default()
                },
            )
            .unwrap()
            .into_inner();

        assert_eq!(item.price.to_string(), "4.57");
    }

    #[test]
    fn test_upsert_menu_item_rejects_unstorable_price() {
        let (service, restaurant) = service_with_restaurant();
        let menu = service
            .upsert_menu(dinner(restaurant.id))
            .unwrap()
            .into_inner();

        for price in ["1e30000000", "100000000"] {
            let result = service.upsert_menu_item(
                menu.id,
                MenuItemDraft {
                    name: "Soup".to_string(),
                    price: Some(BigDecimal::from_str(price).unwrap()),
                    ..Default::default()
                },
            );
            assert!(matches!(result, Err(StoreError::InvalidPrice(_))), "{price}");
        }
        assert!(service.list_menu_items(menu.id).unwrap().is_empty());

        let result = service.save_menu(
            dinner(restaurant.id),
            vec![MenuItemDraft {
                name: "Soup".to_string(),
                price: Some(BigDecimal::from_str("1e30000000").unwrap()),
                ..Default::default()
            }],
        );
        assert!(matches!(result, Err(StoreError::InvalidPrice(_))));
        assert_eq!(service.list_menus(restaurant.id).unwrap().len(), 1);
    }

    #[test]
    fn test_delete_menu_item_twice() {
        let (service, restaurant) = service_with_restaurant();
        let menu = service
            .upsert_menu(dinner(restaurant.id))
            .unwrap()
            .into_inner();
        let item = service
            .upsert_menu_item(
                menu.id,
                MenuItemDraft {
                    name: "Soup".to_string(),
                    ..Default::default()
                },
            )
            .unwrap()
            .into_inner();

        service.delete_menu_item(item.id).unwrap();
        assert!(matches!(
            service.delete_menu_item(item.id),
            Err(StoreError::NotFound(Entity::MenuItem))
        ));
    }

    #[test]
    fn test_save_menu_creates_menu_and_items() {
        let (service, restaurant) = service_with_restaurant();

        let saved = service
            .save_menu(
                dinner(restaurant.id),
                vec![
                    MenuItemDraft {
                        name: "Soup".to_string(),
                        ..Default::default()
                    },
                    MenuItemDraft {
                        name: "Bread".to_string(),
                        category: Some("Sides".to_string()),
                        ..Default::default()
                    },
                ],
            )
            .unwrap();

        assert!(saved.created);
        assert_eq!(saved.items.len(), 2);
        assert!(saved.items.iter().all(|i| i.menu_id == saved.menu.id));
        assert_eq!(service.list_menu_items(saved.menu.id).unwrap(), saved.items);
    }
}
