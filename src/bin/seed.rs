use inventory_pos_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    entity::{
        products::{ActiveModel as ProductActive, Column as ProdCol, Entity as Products},
        users::{ActiveModel as UserActive, Column as UserCol, Entity as Users},
    },
    money::to_cents,
    services::auth_service::hash_password,
};
use rust_decimal::Decimal;
use sea_orm::{ActiveValue::NotSet, DatabaseConnection, EntityTrait, Set, sea_query::OnConflict};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url, config.db_max_connections).await?;
    // Ensure the schema exists.
    run_migrations(&orm).await?;

    let username = std::env::var("SEED_USERNAME").unwrap_or_else(|_| "admin".to_string());
    let password = std::env::var("SEED_PASSWORD").unwrap_or_else(|_| "admin123".to_string());
    ensure_user(&orm, &username, &password).await?;
    seed_products(&orm).await?;

    println!("Seed completed. Login as '{username}'");
    Ok(())
}

async fn ensure_user(orm: &DatabaseConnection, username: &str, password: &str) -> anyhow::Result<()> {
    let password_hash = hash_password(password)?;

    // Existing user gets the password reset
    Users::insert(UserActive {
        username: Set(username.to_owned()),
        password: Set(password_hash),
    })
    .on_conflict(
        OnConflict::column(UserCol::Username)
            .update_column(UserCol::Password)
            .to_owned(),
    )
    .exec_without_returning(orm)
    .await?;

    println!("Ensured user {username}");
    Ok(())
}

async fn seed_products(orm: &DatabaseConnection) -> anyhow::Result<()> {
    let products = [
        ("Notebook A5", Decimal::new(4500, 2), 120),
        ("Ballpoint Pen (Blue)", Decimal::new(1250, 2), 300),
        ("Stapler", Decimal::new(18900, 2), 25),
        ("Printer Paper 500s", Decimal::new(27500, 2), 40),
    ];

    for (name, price, stock) in products {
        let inserted = Products::insert(ProductActive {
            id: NotSet,
            name: Set(name.to_owned()),
            price: Set(to_cents(price)?),
            stock: Set(stock),
        })
        .on_conflict(OnConflict::column(ProdCol::Name).do_nothing().to_owned())
        .exec_without_returning(orm)
        .await?;
        if inserted > 0 {
            println!("Seeded product {name}");
        }
    }

    Ok(())
}
