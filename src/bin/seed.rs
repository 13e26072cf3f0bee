use chrono::Utc;
use marketplace_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    entity::{
        Listings, Users,
        enums::{Category, ItemCondition, ListingStatus},
        listings::{self, ActiveModel as ListingActive},
        users::{self, ActiveModel as UserActive},
    },
    services::auth_service::hash_password,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url, 1).await?;
    // Ensure migrations are applied.
    run_migrations(&orm).await?;

    let alice = ensure_user(&orm, "Alice", "Seller", "alice@example.com", "alice-password").await?;
    let bob = ensure_user(&orm, "Bob", "Buyer", "bob@example.com", "bob-password").await?;
    seed_listings(&orm, alice).await?;

    println!("Seed completed. Alice ID: {alice}, Bob ID: {bob}");
    Ok(())
}

async fn ensure_user(
    orm: &DatabaseConnection,
    first_name: &str,
    last_name: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<Uuid> {
    if let Some(existing) = Users::find()
        .filter(users::Column::Email.eq(email))
        .one(orm)
        .await?
    {
        println!("User {email} already exists");
        return Ok(existing.id);
    }

    let password_hash = hash_password(password)?;
    let now = Utc::now();
    let user = UserActive {
        id: Set(Uuid::new_v4()),
        first_name: Set(first_name.to_string()),
        last_name: Set(last_name.to_string()),
        email: Set(email.to_string()),
        password_hash: Set(password_hash),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(orm)
    .await?;

    println!("Created user {email}");
    Ok(user.id)
}

async fn seed_listings(orm: &DatabaseConnection, owner_id: Uuid) -> anyhow::Result<()> {
    let existing = Listings::find()
        .filter(listings::Column::OwnerId.eq(owner_id))
        .count(orm)
        .await?;
    if existing > 0 {
        println!("Owner {owner_id} already has {existing} listings");
        return Ok(());
    }

    let listings = vec![
        ("Desk", "Solid wood desk", 40.0, ItemCondition::Used, Category::Furniture),
        ("Road bike", "Aluminium frame, 54cm", 320.0, ItemCondition::Used, Category::Sports),
        ("Headphones", "Sealed in box", 89.99, ItemCondition::New, Category::Electronics),
        ("Rust in Action", "Paperback, lightly read", 25.0, ItemCondition::Used, Category::Books),
    ];

    for (title, description, price, condition, category) in listings {
        let now = Utc::now();
        ListingActive {
            id: Set(Uuid::new_v4()),
            title: Set(title.to_string()),
            description: Set(description.to_string()),
            price: Set(price),
            condition: Set(condition),
            category: Set(category),
            status: Set(ListingStatus::Available),
            pictures: Set(serde_json::json!([])),
            owner_id: Set(owner_id),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(orm)
        .await?;
    }

    println!("Seeded listings");
    Ok(())
}
