//! Material entity model and the grouped catalog view.

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};
use storefront_core::material::MaterialKind;
use storefront_core::types::{DbId, Timestamp};

/// A row from the `materials` table with its properties decoded by category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Material {
    pub id: DbId,
    /// Serialized as the `category` and `properties` keys.
    #[serde(flatten)]
    pub kind: MaterialKind,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub price: Decimal,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl<'r> FromRow<'r, PgRow> for Material {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let category: String = row.try_get("category")?;
        let properties: serde_json::Value = row.try_get("properties")?;
        let kind = MaterialKind::from_parts(&category, properties).map_err(|e| {
            sqlx::Error::ColumnDecode {
                index: "properties".to_string(),
                source: Box::new(e),
            }
        })?;

        Ok(Self {
            id: row.try_get("id")?,
            kind,
            slug: row.try_get("slug")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            image_url: row.try_get("image_url")?,
            price: row.try_get("price")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

/// A material joined through `material_order`, tagged with its order.
#[derive(Debug, Clone)]
pub struct OrderMaterial {
    pub order_id: DbId,
    pub material: Material,
}

impl<'r> FromRow<'r, PgRow> for OrderMaterial {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            order_id: row.try_get("order_id")?,
            material: Material::from_row(row)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Grouped configurator view
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleOption {
    pub id: String,
    pub name: String,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FabricOption {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub gradient: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorOption {
    pub id: String,
    pub name: String,
    pub hex: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorniceOption {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub icon: String,
}

/// Materials split by category, in the shape the configurator consumes.
///
/// Option ids are slugs. Absent descriptions and images render as `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MaterialGroups {
    pub styles: Vec<StyleOption>,
    pub fabrics: Vec<FabricOption>,
    pub colors: Vec<ColorOption>,
    pub cornices: Vec<CorniceOption>,
}

impl MaterialGroups {
    /// Partition materials by category, keeping their input order.
    pub fn from_materials<I>(materials: I) -> Self
    where
        I: IntoIterator<Item = Material>,
    {
        let mut groups = Self::default();
        for m in materials {
            let desc = m.description.unwrap_or_default();
            match m.kind {
                MaterialKind::Style(_) => groups.styles.push(StyleOption {
                    id: m.slug,
                    name: m.name,
                    image: m.image_url.unwrap_or_default(),
                }),
                MaterialKind::Fabric(props) => groups.fabrics.push(FabricOption {
                    id: m.slug,
                    name: m.name,
                    desc,
                    gradient: props.gradient,
                }),
                MaterialKind::Color(props) => groups.colors.push(ColorOption {
                    id: m.slug,
                    name: m.name,
                    hex: props.hex,
                }),
                MaterialKind::Cornice(props) => groups.cornices.push(CorniceOption {
                    id: m.slug,
                    name: m.name,
                    desc,
                    icon: props.icon,
                }),
            }
        }
        groups
    }
}
