use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum PaymentStatus {
    Pending,
    Paid,
    Cancelled,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Pending" => Ok(PaymentStatus::Pending),
            "Paid" => Ok(PaymentStatus::Paid),
            "Cancelled" => Ok(PaymentStatus::Cancelled),
            other => Err(AppError::InvalidInput(format!(
                "Invalid payment status '{other}', expected one of Pending, Paid, Cancelled"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: i32,
    pub name: String,
    #[schema(value_type = String, example = "10.00")]
    pub price: Decimal,
    pub stock: i32,
}

/// One requested product/quantity pair of a finalized cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LineItem {
    pub product_id: i32,
    pub quantity: i32,
}

impl LineItem {
    pub fn new(product_id: i32, quantity: i32) -> Self {
        Self {
            product_id,
            quantity,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderSummary {
    pub id: i32,
    pub customer_name: String,
    pub order_date: DateTime<Utc>,
    /// Total formatted with two decimals.
    pub total: String,
    pub status: PaymentStatus,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderItemDetail {
    pub id: i32,
    /// Current catalog name of the product.
    pub product_name: String,
    pub quantity: i32,
    #[schema(value_type = String)]
    pub price_at_sale: Decimal,
    #[schema(value_type = String)]
    pub subtotal: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreatedOrder {
    pub order_id: i32,
    #[schema(value_type = String)]
    pub total: Decimal,
    pub status: PaymentStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct IncomeSummary {
    #[schema(value_type = String)]
    pub total_all_time: Decimal,
    #[schema(value_type = String)]
    pub total_in_window: Decimal,
    pub window_days: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DailyIncome {
    /// Calendar day (UTC), `YYYY-MM-DD`.
    pub day: String,
    pub order_count: i64,
    pub total: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IncomeReport {
    #[schema(value_type = String)]
    pub total_all_time: Decimal,
    #[schema(value_type = String)]
    pub total_in_window: Decimal,
    pub details: Vec<DailyIncome>,
}
