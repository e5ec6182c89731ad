//! Client-side state for the menu builder: pick a restaurant, pick or draft a
//! menu, edit its items locally and push them to the RestaurantOS API.

pub mod api;
pub mod builder;
pub mod error;
pub mod models;

pub use api::{HttpMenuApi, MenuApi};
pub use builder::{BuilderState, ItemField, MenuBuilder};
pub use error::{ApiClientError, BuilderError};
