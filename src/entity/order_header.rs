use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "order_header")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "order_id")]
    pub id: i32,
    pub customer_name: String,
    pub order_date: DateTimeUtc,
    /// Order total in cents.
    pub total_amount: i64,
    pub payment_status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order_items::Entity")]
    OrderItems,
}

impl Related<super::order_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
