use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    #[default]
    Modern,
    Classic,
    Minimal,
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Template::Modern => "modern",
            Template::Classic => "classic",
            Template::Minimal => "minimal",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Menu {
    pub id: i64,
    pub restaurant_id: i64,
    pub name: String,
    pub template_id: Template,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MenuItem {
    pub id: i64,
    pub menu_id: i64,
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: String,
}

/// An item as edited in the form. `id` is set once the item has been stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftItem {
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    /// Raw form text; an empty price is stored as zero.
    pub price: String,
    pub category: String,
}

impl From<MenuItem> for DraftItem {
    fn from(item: MenuItem) -> Self {
        Self {
            id: Some(item.id),
            name: item.name,
            description: item.description,
            price: item.price,
            category: item.category,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuPayload {
    pub id: Option<i64>,
    pub restaurant_id: i64,
    pub name: String,
    pub template_id: Template,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemPayload {
    pub id: Option<i64>,
    pub menu_id: i64,
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveItemPayload {
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: String,
}

impl From<&DraftItem> for SaveItemPayload {
    fn from(item: &DraftItem) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price.clone(),
            category: item.category.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveMenuPayload {
    pub menu: MenuPayload,
    pub items: Vec<SaveItemPayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SavedMenu {
    pub menu: Menu,
    #[serde(rename = "menuItems")]
    pub menu_items: Vec<MenuItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhanceDescriptionPayload {
    pub name: String,
    pub old_description: String,
    pub brand_voice: Option<String>,
}
