use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::models::Product;

/// Add a product, or restock an existing one with the same name.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpsertProductRequest {
    pub name: String,
    #[schema(value_type = String, example = "10.00")]
    pub price: Decimal,
    /// Added to the current stock when the product already exists.
    pub stock_delta: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub name: String,
    #[schema(value_type = String, example = "10.00")]
    pub price: Decimal,
    pub stock: i32,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductQuery {
    /// Only list products with stock left.
    pub available: Option<bool>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<Product>)]
    pub items: Vec<Product>,
}
