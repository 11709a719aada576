//! Product route handlers.
//!
//! The wire shape differs from storage: clients send and receive the
//! category by name and the image as `image`. Responses carry both
//! `imageUrl` and `image`.

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, instrument};
use validator::Validate;

use goodwill_core::{
    Category, CategoryId, DEFAULT_CATEGORY, NewProduct, Product, ProductId, UNCATEGORIZED,
};

use super::parse_leading_int;
use crate::error::{AppError, Result, ValidationIssue};
use crate::state::AppState;
use crate::storage::Storage;

/// A product as returned to clients.
#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    #[serde(flatten)]
    pub product: Product,
    /// Category name, or "Uncategorized" if the category row is gone.
    pub category: String,
    pub image: String,
}

impl ProductView {
    fn new(product: Product, category: &str) -> Self {
        Self {
            image: product.image_url.clone(),
            category: category.to_owned(),
            product,
        }
    }
}

/// Body of `POST /api/products`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    #[validate(required, length(min = 1))]
    pub name: Option<String>,
    #[validate(required, length(min = 1))]
    pub description: Option<String>,
    /// Category name; blank or absent means "Regular".
    pub category: Option<String>,
    #[validate(required, length(min = 1))]
    pub image: Option<String>,
    /// Number or numeric string; falsy means no price.
    #[serde(default)]
    pub price: Value,
    #[serde(default)]
    pub gallery: Vec<String>,
}

impl CreateProductRequest {
    /// Validate every field, returning all problems at once.
    fn check(&self) -> Result<Option<i32>> {
        let mut issues = match self.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => match AppError::from(errors) {
                AppError::Validation(issues) => issues,
                other => return Err(other),
            },
        };

        let price = match parse_price(&self.price) {
            Ok(price) => price,
            Err(issue) => {
                issues.push(issue);
                None
            }
        };

        if issues.is_empty() {
            Ok(price)
        } else {
            issues.sort_by(|a, b| a.path.cmp(&b.path));
            Err(AppError::Validation(issues))
        }
    }

    fn category_name(&self) -> &str {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_CATEGORY)
    }

    fn into_new_product(self, price: Option<i32>, category_id: CategoryId) -> NewProduct {
        NewProduct {
            name: self.name.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            price,
            image_url: self.image.unwrap_or_default(),
            category_id,
            gallery: self.gallery,
        }
    }
}

/// Interpret a client-supplied price.
///
/// Falsy values (`null`, `false`, `0`, `""`) mean no price. Numbers are
/// truncated toward zero; strings use their leading integer.
fn parse_price(value: &Value) -> std::result::Result<Option<i32>, ValidationIssue> {
    let invalid = || ValidationIssue::new("price", "invalid_type", "Expected a whole number");

    match value {
        Value::Null | Value::Bool(false) => Ok(None),
        Value::String(s) if s.is_empty() => Ok(None),
        Value::String(s) => parse_leading_int(s).map(Some).ok_or_else(invalid),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return match i {
                    0 => Ok(None),
                    _ => i32::try_from(i).map(Some).map_err(|_| invalid()),
                };
            }
            match n.as_f64() {
                Some(f) if f.abs() < f64::EPSILON => Ok(None),
                Some(f) => parse_leading_int(&f.trunc().to_string())
                    .map(Some)
                    .ok_or_else(invalid),
                None => Err(invalid()),
            }
        }
        Value::Bool(true) | Value::Array(_) | Value::Object(_) => Err(invalid()),
    }
}

fn category_names(categories: Vec<Category>) -> HashMap<CategoryId, String> {
    categories.into_iter().map(|c| (c.id, c.name)).collect()
}

/// List all products with their category names.
///
/// GET /api/products
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<ProductView>>> {
    let storage = state.storage();
    let products = storage.list_products().await?;
    let names = category_names(storage.list_categories().await?);

    let views = products
        .into_iter()
        .map(|product| {
            let name = names
                .get(&product.category_id)
                .map_or(UNCATEGORIZED, String::as_str);
            ProductView::new(product, name)
        })
        .collect();
    Ok(Json(views))
}

/// Create a product, creating its category if the name is new.
///
/// POST /api/products
#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    body: std::result::Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<Json<ProductView>> {
    let Json(request) = body?;
    let price = request.check()?;

    let category = state
        .storage()
        .create_category(request.category_name())
        .await?;
    let product = state
        .storage()
        .create_product(request.into_new_product(price, category.id))
        .await?;

    info!(id = %product.id, category = %category.name, "Product created");
    Ok(Json(ProductView::new(product, &category.name)))
}

/// Delete a product. Unknown or unparseable ids still succeed.
///
/// DELETE /api/products/{id}
#[instrument(skip(state))]
pub async fn destroy(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode> {
    match parse_leading_int(&id) {
        Some(id) => state.storage().delete_product(ProductId::new(id)).await?,
        None => debug!(%id, "Ignoring delete with non-numeric id"),
    }
    Ok(StatusCode::NO_CONTENT)
}
