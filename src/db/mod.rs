//! Database module - AppState and database operations
//!
//! This module is split into submodules for better separation of concerns:
//! - `contract` - Contract record database operations
//! - `user` - User account database operations for authentication

mod contract;
mod user;

pub use contract::CONTRACTS_CACHE_KEY;

use dotenvy::dotenv;
use moka::future::Cache;
use sqlx::PgPool;
use std::env;
use std::time::Duration;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub contract_cache: Cache<String, Vec<crate::contract::models::ContractRecord>>,
}

impl AppState {
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        dotenv().ok();
        let database_url = env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?;

        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(100)
            .min_connections(10)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(900))
            .max_lifetime(Duration::from_secs(1800))
            .connect(&database_url)
            .await?;

        let state = Self::new_with_pool(pool);
        state.init_schema().await?;
        Ok(state)
    }

    /// Build state around an existing pool. Schema setup is the caller's
    /// responsibility; integration tests use this with a prepared database.
    pub fn new_with_pool(pool: PgPool) -> Self {
        let contract_cache = Cache::builder()
            .time_to_live(Duration::from_secs(10 * 60))
            .max_capacity(10)
            .build();

        AppState {
            pool,
            contract_cache,
        }
    }

    /// Create the tables the server needs if they do not exist yet.
    pub async fn init_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id UUID PRIMARY KEY,
                username TEXT NOT NULL UNIQUE,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                role TEXT NOT NULL DEFAULT 'employee',
                refresh_token TEXT,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS contracts (
                id UUID PRIMARY KEY,
                contract_number TEXT NOT NULL UNIQUE,
                project_title TEXT NOT NULL,
                output_description TEXT NOT NULL,
                workshop_description TEXT NOT NULL,
                organization_name TEXT NOT NULL,
                party_a_name TEXT NOT NULL,
                party_a_position TEXT NOT NULL,
                party_a_address TEXT NOT NULL,
                registration_number TEXT NOT NULL,
                registration_date TEXT NOT NULL,
                party_a_signature_name TEXT NOT NULL,
                party_b_signature_name TEXT NOT NULL,
                party_b_full_name_with_title TEXT NOT NULL,
                party_b_position TEXT NOT NULL,
                party_b_phone TEXT NOT NULL,
                party_b_email TEXT NOT NULL,
                party_b_address TEXT NOT NULL,
                focal_person_a_name TEXT NOT NULL,
                focal_person_a_position TEXT NOT NULL,
                focal_person_a_phone TEXT NOT NULL,
                focal_person_a_email TEXT NOT NULL,
                agreement_start_date TEXT NOT NULL,
                agreement_end_date TEXT NOT NULL,
                total_fee_usd TEXT NOT NULL,
                tax_percentage TEXT NOT NULL,
                gross_amount_usd TEXT NOT NULL,
                payment_installment_desc TEXT NOT NULL,
                payment_gross TEXT NOT NULL,
                payment_net TEXT NOT NULL,
                total_fee_words TEXT NOT NULL,
                deliverables TEXT NOT NULL,
                custom_article_sentences JSONB
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
