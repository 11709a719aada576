//! Catalog entities: categories and the products filed under them.

use serde::{Deserialize, Serialize};

use super::id::{CategoryId, ProductId};

/// Category assigned to a product when the client does not name one.
pub const DEFAULT_CATEGORY: &str = "Regular";

/// Category name shown for a product whose category row is missing.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// A named product grouping ("Regular", "Seasonal", ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// A stored product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Optional list price; `None` means "price on request".
    pub price: Option<i32>,
    pub image_url: String,
    pub category_id: CategoryId,
    /// Extra images shown on the product detail view.
    pub gallery: Vec<String>,
}

/// Fields required to insert a product. The category must already exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Option<i32>,
    pub image_url: String,
    pub category_id: CategoryId,
    #[serde(default)]
    pub gallery: Vec<String>,
}

impl NewProduct {
    /// Attach the storage-assigned ID.
    #[must_use]
    pub fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            image_url: self.image_url,
            category_id: self.category_id,
            gallery: self.gallery,
        }
    }
}
