use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use sea_orm::ActiveValue::NotSet;

use crate::{
    dto::products::{ProductList, UpdateProductRequest},
    entity::{
        order_items::{Column as OrderItemCol, Entity as OrderItems},
        products::{ActiveModel, Column, Entity as Products, Model as ProductModel},
    },
    error::{AppError, AppResult},
    models::Product,
    money::{from_cents, to_cents},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn list_products(state: &AppState) -> AppResult<ApiResponse<ProductList>> {
    let items: Vec<Product> = Products::find()
        .order_by_asc(Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(product_from_entity)
        .collect();

    let meta = Meta::count(items.len());
    Ok(ApiResponse::success("Products", ProductList { items }, Some(meta)))
}

/// Products that can still be sold (stock above zero).
pub async fn list_available_products(state: &AppState) -> AppResult<ApiResponse<ProductList>> {
    let items: Vec<Product> = Products::find()
        .filter(Column::Stock.gt(0))
        .order_by_asc(Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(product_from_entity)
        .collect();

    let meta = Meta::count(items.len());
    Ok(ApiResponse::success(
        "Available products",
        ProductList { items },
        Some(meta),
    ))
}

pub async fn get_product(state: &AppState, id: i32) -> AppResult<ApiResponse<Product>> {
    let product = Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(product_from_entity)
        .ok_or_else(|| product_not_found(id))?;
    Ok(ApiResponse::success("Product", product, None))
}

/// Restock-or-add: an existing product with `name` gets `stock_delta` added
/// to its stock and its price overwritten; otherwise a new product is
/// inserted with `stock_delta` as its stock.
pub async fn upsert_by_name(
    state: &AppState,
    name: &str,
    price: Decimal,
    stock_delta: i32,
) -> AppResult<ApiResponse<Product>> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::InvalidInput("Product name is required".into()));
    }
    let price_cents = to_cents(price)?;

    let txn = state.orm.begin().await?;

    let existing = Products::find()
        .filter(Column::Name.eq(name))
        .one(&txn)
        .await?;

    let (message, product) = match existing {
        Some(existing) => {
            let new_stock = existing
                .stock
                .checked_add(stock_delta)
                .filter(|stock| *stock >= 0)
                .ok_or_else(|| {
                    AppError::InvalidInput(format!(
                        "Restocking '{name}' by {stock_delta} would make stock negative (current {})",
                        existing.stock
                    ))
                })?;
            let mut active: ActiveModel = existing.into();
            active.stock = Set(new_stock);
            active.price = Set(price_cents);
            let product = active.update(&txn).await?;
            (format!("Product '{name}' restocked"), product)
        }
        None => {
            if stock_delta < 0 {
                return Err(AppError::InvalidInput(
                    "Stock quantity must not be negative".into(),
                ));
            }
            let product = ActiveModel {
                id: NotSet,
                name: Set(name.to_owned()),
                price: Set(price_cents),
                stock: Set(stock_delta),
            }
            .insert(&txn)
            .await?;
            (format!("Product '{name}' added"), product)
        }
    };

    txn.commit().await?;

    tracing::info!(
        product_id = product.id,
        stock = product.stock,
        price = product.price,
        "product upserted"
    );

    Ok(ApiResponse::success(
        message,
        product_from_entity(product),
        Some(Meta::empty()),
    ))
}

/// Absolute overwrite of name, price and stock.
pub async fn update_by_id(
    state: &AppState,
    id: i32,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(AppError::InvalidInput("Product name is required".into()));
    }
    if payload.stock < 0 {
        return Err(AppError::InvalidInput(
            "Stock quantity must not be negative".into(),
        ));
    }
    let price_cents = to_cents(payload.price)?;

    let existing = Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| product_not_found(id))?;

    let mut active: ActiveModel = existing.into();
    active.name = Set(name.to_owned());
    active.price = Set(price_cents);
    active.stock = Set(payload.stock);
    let product = active.update(&state.orm).await?;

    tracing::info!(product_id = id, "product updated");

    Ok(ApiResponse::success(
        format!("Product ID {id} updated successfully"),
        product_from_entity(product),
        Some(Meta::empty()),
    ))
}

/// Delete a product that no order line refers to.
pub async fn delete_by_id(
    state: &AppState,
    id: i32,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let references = OrderItems::find()
        .filter(OrderItemCol::ProductId.eq(id))
        .count(&state.orm)
        .await?;
    if references > 0 {
        return Err(AppError::ConstraintViolation(format!(
            "Product {id} is referenced by {references} order line(s) and cannot be deleted"
        )));
    }

    let result = Products::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(product_not_found(id));
    }

    tracing::info!(product_id = id, "product deleted");

    Ok(ApiResponse::success(
        format!("Product ID {id} deleted successfully"),
        serde_json::json!({ "id": id }),
        Some(Meta::empty()),
    ))
}

fn product_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Product {id} not found"))
}

pub(crate) fn product_from_entity(model: ProductModel) -> Product {
    Product {
        id: model.id,
        name: model.name,
        price: from_cents(model.price),
        stock: model.stock,
    }
}
