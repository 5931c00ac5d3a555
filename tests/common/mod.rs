//! Shared helpers for the integration tests: an in-memory SQLite database
//! with migrations applied, plus seeding shortcuts.

#![allow(dead_code)]

use chrono::{Duration, Utc};
use migration::{Migrator, MigratorTrait};
use rewardx_backend::database::DbPool;
use rewardx_backend::entities::{rewards, users};
use rewardx_backend::models::Role;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, Set};

pub async fn setup_test_db() -> DbPool {
    // Single connection so every query sees the same in-memory database.
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options.max_connections(1).sqlx_logging(false);

    let pool = Database::connect(options).await.expect("connect test db");
    Migrator::up(&pool, None).await.expect("run migrations");
    pool
}

pub async fn seed_user(pool: &DbPool, email: &str, points: i64, verified: bool) -> users::Model {
    seed_user_with_age(pool, email, points, verified, Duration::zero()).await
}

pub async fn seed_user_with_age(
    pool: &DbPool,
    email: &str,
    points: i64,
    verified: bool,
    age: Duration,
) -> users::Model {
    let created_at = Utc::now() - age;
    users::ActiveModel {
        username: Set(email.split('@').next().unwrap_or("user").to_string()),
        email: Set(email.to_string()),
        // Not a real bcrypt digest; auth tests that exercise login hash properly.
        password_hash: Set("seeded".to_string()),
        role: Set(Role::User),
        points: Set(points),
        is_verified: Set(verified),
        otp_code: Set(Some("123456".to_string())),
        otp_expires_at: Set(Some(created_at + Duration::minutes(5))),
        created_at: Set(created_at),
        updated_at: Set(created_at),
        ..Default::default()
    }
    .insert(pool)
    .await
    .expect("seed user")
}

pub async fn seed_partner(pool: &DbPool, email: &str) -> users::Model {
    let now = Utc::now();
    users::ActiveModel {
        username: Set(email.split('@').next().unwrap_or("partner").to_string()),
        email: Set(email.to_string()),
        password_hash: Set("seeded".to_string()),
        role: Set(Role::Partner),
        points: Set(0),
        is_verified: Set(true),
        otp_code: Set(None),
        otp_expires_at: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(pool)
    .await
    .expect("seed partner")
}

pub async fn seed_reward(
    pool: &DbPool,
    name: &str,
    cost: i64,
    stock: i64,
    created_by: i64,
) -> rewards::Model {
    let now = Utc::now();
    rewards::ActiveModel {
        name: Set(name.to_string()),
        category: Set("test".to_string()),
        cost: Set(cost),
        stock: Set(stock),
        created_by_id: Set(created_by),
        discount: Set(None),
        campaign_name: Set(None),
        description: Set(None),
        start_date: Set(None),
        end_date: Set(None),
        auto_expire_after_redemption: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(pool)
    .await
    .expect("seed reward")
}
