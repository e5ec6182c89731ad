use std::fmt;
use std::io::Write;
use std::str::FromStr;

use bigdecimal::{BigDecimal, RoundingMode};
use diesel::{
    deserialize::{self, FromSql, FromSqlRow},
    expression::AsExpression,
    pg::{Pg, PgValue},
    prelude::*,
    serialize::{self, IsNull, Output, ToSql},
};

use crate::schema::{menu_items, menus, restaurants};

/// Visual layout applied when a menu is rendered.
#[derive(FromSqlRow, AsExpression, PartialEq, Eq, Copy, Clone, Debug, Default)]
#[diesel(sql_type = crate::schema::sql_types::MenuTemplate)]
pub enum Template {
    #[default]
    Modern,
    Classic,
    Minimal,
}

impl Template {
    pub const ALL: [Template; 3] = [Template::Modern, Template::Classic, Template::Minimal];

    pub fn as_str(&self) -> &'static str {
        match self {
            Template::Modern => "modern",
            Template::Classic => "classic",
            Template::Minimal => "minimal",
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown template: {0}")]
pub struct UnknownTemplate(pub String);

impl FromStr for Template {
    type Err = UnknownTemplate;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "modern" => Ok(Template::Modern),
            "classic" => Ok(Template::Classic),
            "minimal" => Ok(Template::Minimal),
            other => Err(UnknownTemplate(other.to_string())),
        }
    }
}

impl ToSql<crate::schema::sql_types::MenuTemplate, Pg> for Template {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<crate::schema::sql_types::MenuTemplate, Pg> for Template {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"modern" => Ok(Template::Modern),
            b"classic" => Ok(Template::Classic),
            b"minimal" => Ok(Template::Minimal),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = restaurants)]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = restaurants)]
pub struct NewRestaurant {
    pub name: String,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone, PartialEq)]
#[diesel(belongs_to(Restaurant))]
#[diesel(table_name = menus)]
pub struct Menu {
    pub id: i64,
    pub restaurant_id: i64,
    pub name: String,
    pub template_id: Template,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = menus)]
pub struct NewMenu {
    pub restaurant_id: i64,
    pub name: String,
    pub template_id: Template,
}

/// Columns an update may touch. The owning restaurant is not one of them.
#[derive(AsChangeset, Debug, Clone, PartialEq)]
#[diesel(table_name = menus)]
pub struct MenuChanges {
    pub name: String,
    pub template_id: Template,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone, PartialEq)]
#[diesel(belongs_to(Menu))]
#[diesel(table_name = menu_items)]
pub struct MenuItem {
    pub id: i64,
    pub menu_id: i64,
    pub name: String,
    pub description: String,
    pub price: BigDecimal,
    pub category: String,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = menu_items)]
pub struct NewMenuItem {
    pub menu_id: i64,
    pub name: String,
    pub description: String,
    pub price: BigDecimal,
    pub category: String,
}

/// Item columns an update may touch. `menu_id` stays fixed after creation.
#[derive(AsChangeset, Debug, Clone, PartialEq)]
#[diesel(table_name = menu_items)]
pub struct MenuItemChanges {
    pub name: String,
    pub description: String,
    pub price: BigDecimal,
    pub category: String,
}

impl MenuItemChanges {
    pub fn into_new(self, menu_id: i64) -> NewMenuItem {
        NewMenuItem {
            menu_id,
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
        }
    }
}

/// Largest absolute price a `NUMERIC(10, 2)` column holds, exclusive.
const PRICE_LIMIT: i64 = 100_000_000;
/// Integer digits allowed before the decimal point.
const PRICE_INTEGER_DIGITS: i64 = 8;
/// Fractional digits accepted on input; the stored value keeps two.
const PRICE_MAX_FRACTION_DIGITS: i64 = 20;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Price out of range: {0}")]
pub struct PriceOutOfRange(pub String);

/// Rounds a price half-up to cents. Values a `NUMERIC(10, 2)` column cannot
/// hold are rejected before any rescaling.
pub fn normalize_price(price: &BigDecimal) -> Result<BigDecimal, PriceOutOfRange> {
    let (_, scale) = price.as_bigint_and_exponent();
    let integer_digits = price.digits() as i64 - scale;
    if scale > PRICE_MAX_FRACTION_DIGITS || integer_digits > PRICE_INTEGER_DIGITS {
        return Err(PriceOutOfRange(price.to_scientific_notation()));
    }

    let rounded = price.with_scale_round(2, RoundingMode::HalfUp);
    if rounded.abs() >= BigDecimal::from(PRICE_LIMIT) {
        return Err(PriceOutOfRange(rounded.to_string()));
    }
    Ok(rounded)
}
