//! Material categories and their typed property bags.
//!
//! Materials are the selectable customization options attached to an order.
//! Each category carries its own extra attributes, stored as a JSON object
//! next to the row. [`MaterialKind`] pairs the category with the matching
//! property struct and serializes back to the `category` + `properties`
//! shape clients already consume.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// The fixed set of material categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialCategory {
    Style,
    Fabric,
    Color,
    Cornice,
}

/// All valid category strings, in display order.
pub const VALID_CATEGORIES: &[&str] = &["style", "fabric", "color", "cornice"];

impl MaterialCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Style => "style",
            Self::Fabric => "fabric",
            Self::Color => "color",
            Self::Cornice => "cornice",
        }
    }

    /// Parse a category from its stored string form.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "style" => Ok(Self::Style),
            "fabric" => Ok(Self::Fabric),
            "color" => Ok(Self::Color),
            "cornice" => Ok(Self::Cornice),
            _ => Err(CoreError::Validation(format!(
                "Invalid material category '{s}'. Must be one of: {}",
                VALID_CATEGORIES.join(", ")
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Property bags
// ---------------------------------------------------------------------------

/// Styles carry no extra attributes; the preview lives in `image_url`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleProps {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FabricProps {
    /// CSS gradient used as the swatch.
    #[serde(default)]
    pub gradient: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorProps {
    #[serde(default)]
    pub hex: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorniceProps {
    /// SVG path data for the cornice pictogram.
    #[serde(default)]
    pub icon: String,
}

/// A material's category together with its typed properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "category", content = "properties", rename_all = "lowercase")]
pub enum MaterialKind {
    Style(StyleProps),
    Fabric(FabricProps),
    Color(ColorProps),
    Cornice(CorniceProps),
}

impl MaterialKind {
    pub fn category(&self) -> MaterialCategory {
        match self {
            Self::Style(_) => MaterialCategory::Style,
            Self::Fabric(_) => MaterialCategory::Fabric,
            Self::Color(_) => MaterialCategory::Color,
            Self::Cornice(_) => MaterialCategory::Cornice,
        }
    }

    /// Build a kind from the stored `category` column and `properties` JSON.
    ///
    /// A `null` properties value is treated as an empty object; missing keys
    /// fall back to empty strings.
    pub fn from_parts(category: &str, properties: serde_json::Value) -> Result<Self, CoreError> {
        let category = MaterialCategory::parse(category)?;
        let properties = if properties.is_null() {
            serde_json::Value::Object(serde_json::Map::new())
        } else {
            properties
        };

        let kind = match category {
            MaterialCategory::Style => serde_json::from_value(properties).map(Self::Style),
            MaterialCategory::Fabric => serde_json::from_value(properties).map(Self::Fabric),
            MaterialCategory::Color => serde_json::from_value(properties).map(Self::Color),
            MaterialCategory::Cornice => serde_json::from_value(properties).map(Self::Cornice),
        };

        kind.map_err(|e| {
            CoreError::Internal(format!(
                "Malformed properties for {} material: {e}",
                category.as_str()
            ))
        })
    }
}
