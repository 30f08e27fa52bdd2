use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{LineItem, OrderItemDetail, OrderSummary};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub customer_name: String,
    pub items: Vec<LineItem>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderWithItems {
    pub order: OrderSummary,
    pub items: Vec<OrderItemDetail>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct OrderList {
    #[schema(value_type = Vec<OrderSummary>)]
    pub items: Vec<OrderSummary>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct OrderItemList {
    #[schema(value_type = Vec<OrderItemDetail>)]
    pub items: Vec<OrderItemDetail>,
}
