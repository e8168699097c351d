//! Database seeder for Orbit development and testing.
//!
//! Seeds an admin and a viewer account plus a handful of sample
//! transactions for local development. Inserts are existence-checked,
//! so the seeder is safe to re-run.
//!
//! Usage: cargo run --bin seeder

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use orbit_core::auth::hash_password;
use orbit_db::entities::sea_orm_active_enums::{PaymentMethod, UserRole};
use orbit_db::{
    CreateTransactionInput, PermissionRepository, TransactionRepository, UserRepository,
};
use orbit_shared::config::DatabaseConfig;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = orbit_db::connect(&DatabaseConfig {
        url: database_url,
        max_connections: 5,
        min_connections: 1,
    })
    .await
    .expect("Failed to connect to database");

    println!("Seeding users...");
    let admin_id = seed_users(&db).await;

    println!("Seeding sample transactions...");
    if let Some(admin_id) = admin_id {
        seed_transactions(&db, admin_id).await;
    } else {
        eprintln!("  No admin user available, skipping transactions...");
    }

    println!("Seeding complete!");
}

/// Seeds the development accounts and returns the admin's ID.
async fn seed_users(db: &DatabaseConnection) -> Option<Uuid> {
    let users = UserRepository::new(db.clone());
    let permissions = PermissionRepository::new(db.clone());

    let admin_id = seed_user(
        &users,
        &permissions,
        "admin@example.com",
        "admin123",
        "Admin User",
        UserRole::Admin,
        true,
    )
    .await;

    seed_user(
        &users,
        &permissions,
        "viewer@example.com",
        "viewer123",
        "Viewer User",
        UserRole::Viewer,
        false,
    )
    .await;

    admin_id
}

/// Creates one account with its permission attachments, skipping it if
/// the email is already taken.
async fn seed_user(
    users: &UserRepository,
    permissions: &PermissionRepository,
    email: &str,
    password: &str,
    name: &str,
    role: UserRole,
    can_download: bool,
) -> Option<Uuid> {
    match users.find_by_email(email).await {
        Ok(Some(existing)) => {
            println!("  User {email} already exists, skipping...");
            return Some(existing.id);
        }
        Ok(None) => {}
        Err(e) => {
            eprintln!("Failed to look up {email}: {e}");
            return None;
        }
    }

    let password_hash = match hash_password(password) {
        Ok(hash) => hash,
        Err(e) => {
            eprintln!("Failed to hash password for {email}: {e}");
            return None;
        }
    };

    match users
        .create(email, &password_hash, name, role, can_download)
        .await
    {
        Ok(user) => {
            if let Err(e) = permissions.attach_all(user.id).await {
                eprintln!("Failed to attach permissions for {email}: {e}");
            }
            println!("  Created user: {email}");
            Some(user.id)
        }
        Err(e) => {
            eprintln!("Failed to insert user {email}: {e}");
            None
        }
    }
}

/// Seeds sample transactions owned by the admin account.
async fn seed_transactions(db: &DatabaseConnection, admin_id: Uuid) {
    let repo = TransactionRepository::new(db.clone());

    match repo.count_and_total().await {
        Ok((count, _)) if count > 0 => {
            println!("  Transactions already exist, skipping...");
            return;
        }
        Ok(_) => {}
        Err(e) => {
            eprintln!("Failed to count transactions: {e}");
            return;
        }
    }

    let today = Utc::now().date_naive();
    let samples = [
        (
            "Office Supplies",
            "Printer paper and toner",
            PaymentMethod::Cash,
            "Staples",
            Decimal::new(8450, 2),
            6,
        ),
        (
            "Software",
            "Annual licence renewal",
            PaymentMethod::Online,
            "Acme Software",
            Decimal::new(120_000, 2),
            4,
        ),
        (
            "Travel",
            "Client site visit",
            PaymentMethod::Other,
            "City Cabs",
            Decimal::new(3275, 2),
            2,
        ),
        (
            "Utilities",
            "Electricity bill",
            PaymentMethod::Online,
            "Metro Power",
            Decimal::new(15600, 2),
            1,
        ),
        (
            "Catering",
            "Team lunch",
            PaymentMethod::Cash,
            "Corner Deli",
            Decimal::new(9680, 2),
            0,
        ),
    ];

    for (category, description, payment_method, party_name, amount, days_ago) in samples {
        let input = CreateTransactionInput {
            date: today - Duration::days(days_ago),
            amount,
            category: category.to_string(),
            description: Some(description.to_string()),
            payment_method,
            party_name: party_name.to_string(),
            invoice_image: None,
            user_id: admin_id,
        };

        match repo.create(input).await {
            Ok(transaction) => {
                println!("  Created transaction: {category} ({})", transaction.date);
            }
            Err(e) => eprintln!("Failed to insert transaction {category}: {e}"),
        }
    }
}
