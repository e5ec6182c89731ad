use diesel_migrations::{embed_migrations, EmbeddedMigrations};

pub mod models;
pub mod schema;
pub mod service;
pub mod store;

pub use service::{MenuDraft, MenuItemDraft, MenuService, Upserted};
pub use store::{Entity, MenuStore, PgMenuStore, SavedMenu, StoreError};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");
