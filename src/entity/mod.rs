pub mod order_header;
pub mod order_items;
pub mod products;
pub mod users;

pub use order_header::Entity as OrderHeader;
pub use order_items::Entity as OrderItems;
pub use products::Entity as Products;
pub use users::Entity as Users;
