use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse},
        income::{DailyIncomeList, WindowQuery},
        orders::{
            CreateOrderRequest, OrderItemList, OrderList, OrderWithItems, UpdateOrderStatusRequest,
        },
        products::{ProductList, ProductQuery, UpdateProductRequest, UpsertProductRequest},
    },
    models::{
        CreatedOrder, DailyIncome, IncomeReport, IncomeSummary, LineItem, OrderItemDetail,
        OrderSummary, PaymentStatus, Product,
    },
    response::{ApiResponse, Meta},
    routes::{auth, health, income, orders, products},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        products::list_products,
        products::get_product,
        products::upsert_product,
        products::update_product,
        products::delete_product,
        orders::list_orders,
        orders::create_order,
        orders::get_order,
        orders::list_order_items,
        orders::update_order_status,
        orders::delete_order,
        income::income_summary,
        income::daily_income,
        income::income_report
    ),
    components(
        schemas(
            Product,
            LineItem,
            PaymentStatus,
            OrderSummary,
            OrderItemDetail,
            CreatedOrder,
            IncomeSummary,
            DailyIncome,
            IncomeReport,
            LoginRequest,
            LoginResponse,
            UpsertProductRequest,
            UpdateProductRequest,
            ProductQuery,
            ProductList,
            CreateOrderRequest,
            UpdateOrderStatusRequest,
            OrderList,
            OrderItemList,
            OrderWithItems,
            WindowQuery,
            DailyIncomeList,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<CreatedOrder>,
            ApiResponse<OrderList>,
            ApiResponse<OrderWithItems>,
            ApiResponse<IncomeReport>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Products", description = "Product catalog endpoints"),
        (name = "Orders", description = "Sales and order history endpoints"),
        (name = "Income", description = "Income report endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_every_store_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health",
            "/api/auth/login",
            "/api/products",
            "/api/products/{id}",
            "/api/orders",
            "/api/orders/{id}",
            "/api/orders/{id}/items",
            "/api/orders/{id}/status",
            "/api/income/summary",
            "/api/income/daily",
            "/api/income/report",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
