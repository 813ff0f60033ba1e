//! SQLite persistence for classes and bookings.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

use crate::models::{Booking, FitnessClass, NewClass};

/// Result of an attempt to take one slot of a class.
#[derive(Debug, Clone, PartialEq)]
pub enum BookOutcome {
    Booked(Booking),
    ClassNotFound,
    NoSlotsAvailable,
}

#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the pool and creates the schema if it is missing.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool_options = SqlitePoolOptions::new().max_connections(max_connections);
        Self::open(url, pool_options).await
    }

    /// Every connection to `sqlite::memory:` opens its own database, so the
    /// pool holds exactly one connection and never recycles it.
    pub async fn in_memory() -> Result<Self, sqlx::Error> {
        let pool_options = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
        Self::open("sqlite::memory:", pool_options).await
    }

    async fn open(url: &str, pool_options: SqlitePoolOptions) -> Result<Self, sqlx::Error> {
        info!("Connecting to database: {url}");
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = pool_options.connect_with(options).await?;

        let db = Self { pool };
        db.create_schema().await?;
        Ok(db)
    }

    async fn create_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS classes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                date_time DATETIME NOT NULL,
                instructor TEXT NOT NULL,
                available_slots INTEGER NOT NULL CHECK (available_slots >= 0)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS bookings (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                class_id INTEGER NOT NULL,
                client_name TEXT NOT NULL,
                client_email TEXT NOT NULL,
                FOREIGN KEY(class_id) REFERENCES classes(id)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_bookings_client_email ON bookings(client_email)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub async fn fetch_classes(&self) -> Result<Vec<FitnessClass>, sqlx::Error> {
        sqlx::query_as::<_, FitnessClass>(
            "SELECT id, name, date_time, instructor, available_slots FROM classes ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
    }

    pub async fn fetch_class(&self, id: i64) -> Result<Option<FitnessClass>, sqlx::Error> {
        sqlx::query_as::<_, FitnessClass>(
            "SELECT id, name, date_time, instructor, available_slots FROM classes WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn fetch_bookings_by_email(&self, email: &str) -> Result<Vec<Booking>, sqlx::Error> {
        sqlx::query_as::<_, Booking>(
            "SELECT id, class_id, client_name, client_email FROM bookings WHERE client_email = ? ORDER BY id",
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn insert_class(&self, class: &NewClass) -> Result<FitnessClass, sqlx::Error> {
        let id = sqlx::query(
            "INSERT INTO classes (name, date_time, instructor, available_slots) VALUES (?, ?, ?, ?)",
        )
        .bind(&class.name)
        .bind(class.date_time)
        .bind(&class.instructor)
        .bind(class.available_slots)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        Ok(FitnessClass {
            id,
            name: class.name.clone(),
            date_time: class.date_time,
            instructor: class.instructor.clone(),
            available_slots: class.available_slots,
        })
    }

    /// Takes one slot of `class_id` and records the booking in one transaction.
    ///
    /// The decrement only applies while `available_slots > 0`, so two callers
    /// racing for the last slot cannot both succeed.
    pub async fn book(
        &self,
        class_id: i64,
        client_name: &str,
        client_email: &str,
    ) -> Result<BookOutcome, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            "UPDATE classes SET available_slots = available_slots - 1 WHERE id = ? AND available_slots > 0",
        )
        .bind(class_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if updated == 0 {
            let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM classes WHERE id = ?")
                .bind(class_id)
                .fetch_optional(&mut *tx)
                .await?;
            tx.rollback().await?;
            return Ok(match exists {
                Some(_) => BookOutcome::NoSlotsAvailable,
                None => BookOutcome::ClassNotFound,
            });
        }

        let id = sqlx::query(
            "INSERT INTO bookings (class_id, client_name, client_email) VALUES (?, ?, ?)",
        )
        .bind(class_id)
        .bind(client_name)
        .bind(client_email)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        tx.commit().await?;

        Ok(BookOutcome::Booked(Booking {
            id,
            class_id,
            client_name: client_name.to_string(),
            client_email: client_email.to_string(),
        }))
    }
}
