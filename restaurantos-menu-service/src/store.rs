use std::fmt;

use crate::models::{
    Menu, MenuChanges, MenuItem, MenuItemChanges, NewMenu, NewMenuItem, NewRestaurant,
    PriceOutOfRange, Restaurant,
};

#[cfg(any(test, feature = "memory"))]
mod memory;
mod postgres;

#[cfg(any(test, feature = "memory"))]
pub use memory::MemoryMenuStore;
pub use postgres::{PgMenuStore, PgPool};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Restaurant,
    Menu,
    MenuItem,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Entity::Restaurant => "Restaurant",
            Entity::Menu => "Menu",
            Entity::MenuItem => "Item",
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(Entity),
    /// An insert referenced a parent row that does not exist.
    #[error("{0} not found")]
    MissingParent(Entity),
    /// A delete was refused because child rows still point at the row.
    #[error("{0} still has items and cannot be deleted")]
    HasDependents(Entity),
    #[error(transparent)]
    InvalidPrice(#[from] PriceOutOfRange),
    #[error("Migration failed: {0}")]
    Migration(String),
    #[error(transparent)]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error(transparent)]
    Database(#[from] diesel::result::Error),
}

pub enum MenuWrite {
    Create(NewMenu),
    Update { id: i64, changes: MenuChanges },
}

pub enum MenuItemWrite {
    Create(MenuItemChanges),
    /// Only matches an item that already belongs to the saved menu.
    Update { id: i64, changes: MenuItemChanges },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SavedMenu {
    pub menu: Menu,
    pub created: bool,
    pub items: Vec<MenuItem>,
}

/// Persistence accessor for restaurants, menus and menu items.
///
/// Every method is a single statement except `save_menu`, which runs all of
/// its writes in one transaction.
pub trait MenuStore: Send + Sync {
    fn list_restaurants(&self) -> Result<Vec<Restaurant>, StoreError>;

    fn create_restaurant(&self, new: NewRestaurant) -> Result<Restaurant, StoreError>;

    fn list_menus(&self, restaurant_id: i64) -> Result<Vec<Menu>, StoreError>;

    fn create_menu(&self, new: NewMenu) -> Result<Menu, StoreError>;

    fn update_menu(&self, id: i64, changes: MenuChanges) -> Result<Menu, StoreError>;

    fn delete_menu(&self, id: i64) -> Result<(), StoreError>;

    fn list_menu_items(&self, menu_id: i64) -> Result<Vec<MenuItem>, StoreError>;

    fn create_menu_item(&self, new: NewMenuItem) -> Result<MenuItem, StoreError>;

    fn update_menu_item(&self, id: i64, changes: MenuItemChanges)
        -> Result<MenuItem, StoreError>;

    fn delete_menu_item(&self, id: i64) -> Result<(), StoreError>;

    fn save_menu(
        &self,
        menu: MenuWrite,
        items: Vec<MenuItemWrite>,
    ) -> Result<SavedMenu, StoreError>;
}
