use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_migrations::MigrationHarness;
use tracing::{debug, info};

use super::{Entity, MenuItemWrite, MenuStore, MenuWrite, SavedMenu, StoreError};
use crate::models::{
    Menu, MenuChanges, MenuItem, MenuItemChanges, NewMenu, NewMenuItem, NewRestaurant, Restaurant,
};
use crate::schema::{menu_items, menus, restaurants};
use crate::MIGRATIONS;

pub type PgPool = Pool<ConnectionManager<PgConnection>>;

#[derive(Clone)]
pub struct PgMenuStore {
    pool: PgPool,
}

impl PgMenuStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn connect(database_url: &str, max_size: u32) -> Result<Self, StoreError> {
        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool = Pool::builder().max_size(max_size).build(manager)?;
        Ok(Self::new(pool))
    }

    /// Applies embedded migrations that have not run yet and returns how many ran.
    pub fn run_migrations(&self) -> Result<usize, StoreError> {
        self.with_conn(|conn| {
            let applied = conn
                .run_pending_migrations(MIGRATIONS)
                .map_err(|e| StoreError::Migration(e.to_string()))?;
            for version in &applied {
                info!(%version, "applied migration");
            }
            Ok(applied.len())
        })
    }

    fn with_conn<T>(
        &self,
        f: impl FnOnce(&mut PgConnection) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut pooled = self.pool.get()?;
        let conn: &mut PgConnection = &mut pooled;
        f(conn)
    }
}

fn missing_parent(parent: Entity) -> impl FnOnce(DieselError) -> StoreError {
    move |err| match err {
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            StoreError::MissingParent(parent)
        }
        err => StoreError::Database(err),
    }
}

fn insert_menu(conn: &mut PgConnection, new: &NewMenu) -> Result<Menu, StoreError> {
    diesel::insert_into(menus::table)
        .values(new)
        .returning(Menu::as_returning())
        .get_result(conn)
        .map_err(missing_parent(Entity::Restaurant))
}

fn update_menu(conn: &mut PgConnection, id: i64, changes: &MenuChanges) -> Result<Menu, StoreError> {
    diesel::update(menus::table.find(id))
        .set(changes)
        .returning(Menu::as_returning())
        .get_result(conn)
        .optional()?
        .ok_or(StoreError::NotFound(Entity::Menu))
}

fn insert_menu_item(conn: &mut PgConnection, new: &NewMenuItem) -> Result<MenuItem, StoreError> {
    diesel::insert_into(menu_items::table)
        .values(new)
        .returning(MenuItem::as_returning())
        .get_result(conn)
        .map_err(missing_parent(Entity::Menu))
}

impl MenuStore for PgMenuStore {
    fn list_restaurants(&self) -> Result<Vec<Restaurant>, StoreError> {
        self.with_conn(|conn| {
            Ok(restaurants::table
                .order(restaurants::id.asc())
                .select(Restaurant::as_select())
                .load(conn)?)
        })
    }

    fn create_restaurant(&self, new: NewRestaurant) -> Result<Restaurant, StoreError> {
        self.with_conn(|conn| {
            Ok(diesel::insert_into(restaurants::table)
                .values(&new)
                .returning(Restaurant::as_returning())
                .get_result(conn)?)
        })
    }

    fn list_menus(&self, restaurant_id: i64) -> Result<Vec<Menu>, StoreError> {
        self.with_conn(|conn| {
            Ok(menus::table
                .filter(menus::restaurant_id.eq(restaurant_id))
                .order(menus::id.asc())
                .select(Menu::as_select())
                .load(conn)?)
        })
    }

    fn create_menu(&self, new: NewMenu) -> Result<Menu, StoreError> {
        self.with_conn(|conn| insert_menu(conn, &new))
    }

    fn update_menu(&self, id: i64, changes: MenuChanges) -> Result<Menu, StoreError> {
        self.with_conn(|conn| update_menu(conn, id, &changes))
    }

    fn delete_menu(&self, id: i64) -> Result<(), StoreError> {
        self.with_conn(|conn| {
            let deleted = diesel::delete(menus::table.find(id))
                .execute(conn)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        StoreError::HasDependents(Entity::Menu)
                    }
                    err => StoreError::Database(err),
                })?;
            match deleted {
                0 => Err(StoreError::NotFound(Entity::Menu)),
                _ => Ok(()),
            }
        })
    }

    fn list_menu_items(&self, menu_id: i64) -> Result<Vec<MenuItem>, StoreError> {
        self.with_conn(|conn| {
            Ok(menu_items::table
                .filter(menu_items::menu_id.eq(menu_id))
                .order(menu_items::id.asc())
                .select(MenuItem::as_select())
                .load(conn)?)
        })
    }

    fn create_menu_item(&self, new: NewMenuItem) -> Result<MenuItem, StoreError> {
        self.with_conn(|conn| insert_menu_item(conn, &new))
    }

    fn update_menu_item(
        &self,
        id: i64,
        changes: MenuItemChanges,
    ) -> Result<MenuItem, StoreError> {
        self.with_conn(|conn| {
            diesel::update(menu_items::table.find(id))
                .set(&changes)
                .returning(MenuItem::as_returning())
                .get_result(conn)
                .optional()?
                .ok_or(StoreError::NotFound(Entity::MenuItem))
        })
    }

    fn delete_menu_item(&self, id: i64) -> Result<(), StoreError> {
        self.with_conn(|conn| {
            match diesel::delete(menu_items::table.find(id)).execute(conn)? {
                0 => Err(StoreError::NotFound(Entity::MenuItem)),
                _ => Ok(()),
            }
        })
    }

    fn save_menu(
        &self,
        menu: MenuWrite,
        items: Vec<MenuItemWrite>,
    ) -> Result<SavedMenu, StoreError> {
        self.with_conn(|conn| {
            conn.transaction::<_, StoreError, _>(|conn| {
                let (menu, created) = match menu {
                    MenuWrite::Create(new) => (insert_menu(conn, &new)?, true),
                    MenuWrite::Update { id, changes } => (update_menu(conn, id, &changes)?, false),
                };

                let mut saved = Vec::with_capacity(items.len());
                for write in items {
                    let item = match write {
                        MenuItemWrite::Create(changes) => {
                            insert_menu_item(conn, &changes.into_new(menu.id))?
                        }
                        MenuItemWrite::Update { id, changes } => diesel::update(
                            menu_items::table
                                .filter(menu_items::id.eq(id))
                                .filter(menu_items::menu_id.eq(menu.id)),
                        )
                        .set(&changes)
                        .returning(MenuItem::as_returning())
                        .get_result(conn)
                        .optional()?
                        .ok_or(StoreError::NotFound(Entity::MenuItem))?,
                    };
                    saved.push(item);
                }

                debug!(menu_id = menu.id, items = saved.len(), "saved menu");
                Ok(SavedMenu {
                    menu,
                    created,
                    items: saved,
                })
            })
        })
    }
}
