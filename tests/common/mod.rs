#![allow(dead_code)]

use chrono::{Duration, Utc};
use inventory_pos_api::{
    db::{create_orm_conn, run_migrations},
    entity::{
        order_header::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel},
        order_items::{Column as OrderItemCol, Entity as OrderItems, Model as OrderItemModel},
    },
    models::{PaymentStatus, Product},
    services::product_service,
    state::AppState,
};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, EntityTrait, QueryOrder, Set};

pub const TEST_SECRET: &str = "test-secret";

/// Fresh, migrated in-memory database per test.
pub async fn setup_state() -> anyhow::Result<AppState> {
    let orm = create_orm_conn("sqlite::memory:", 1).await?;
    run_migrations(&orm).await?;
    Ok(AppState::new(orm, TEST_SECRET))
}

pub async fn add_product(
    state: &AppState,
    name: &str,
    price: Decimal,
    stock: i32,
) -> anyhow::Result<Product> {
    let resp = product_service::upsert_by_name(state, name, price, stock).await?;
    Ok(resp.data.expect("product data"))
}

pub async fn stock_of(state: &AppState, product_id: i32) -> anyhow::Result<i32> {
    let product = product_service::get_product(state, product_id).await?;
    Ok(product.data.expect("product data").stock)
}

/// Every product, order header and line item, for before/after comparisons.
#[derive(Debug, PartialEq)]
pub struct Snapshot {
    pub products: Vec<Product>,
    pub orders: Vec<OrderModel>,
    pub items: Vec<OrderItemModel>,
}

pub async fn snapshot(state: &AppState) -> anyhow::Result<Snapshot> {
    let products = product_service::list_products(state)
        .await?
        .data
        .expect("product list")
        .items;
    let orders = Orders::find()
        .order_by_asc(OrderCol::Id)
        .all(&state.orm)
        .await?;
    let items = OrderItems::find()
        .order_by_asc(OrderItemCol::Id)
        .all(&state.orm)
        .await?;
    Ok(Snapshot {
        products,
        orders,
        items,
    })
}

/// Insert an order header directly with a back-dated timestamp.
pub async fn insert_order_at(
    state: &AppState,
    customer: &str,
    days_ago: i64,
    total_cents: i64,
    status: PaymentStatus,
) -> anyhow::Result<OrderModel> {
    let order = OrderActive {
        id: NotSet,
        customer_name: Set(customer.to_owned()),
        order_date: Set(Utc::now() - Duration::days(days_ago)),
        total_amount: Set(total_cents),
        payment_status: Set(status.to_string()),
    }
    .insert(&state.orm)
    .await?;
    Ok(order)
}
