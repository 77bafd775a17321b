// SQLite RecordStore Implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use petadoption_core::context::RequestContext;
use petadoption_core::domain::{Adoption, PetId, TransactionId};
use petadoption_core::error::{AppError, Result};
use petadoption_core::port::{RecordStore, TimeProvider};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::debug;

// Helper to convert sqlx::Error to AppError with structured information
fn map_sqlx_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(code) = db_err.code() {
                let code_str = code.as_ref();

                // SQLite error codes: https://www.sqlite.org/rescode.html
                match code_str {
                    "2067" | "1555" => AppError::Database(format!(
                        "Unique constraint violation: {} ({})",
                        db_err.message(),
                        code_str
                    )),
                    "787" | "3850" => AppError::Database(format!(
                        "Foreign key constraint violation: {} ({})",
                        db_err.message(),
                        code_str
                    )),
                    "5" => AppError::Database(format!(
                        "Database locked (SQLITE_BUSY): {}",
                        db_err.message()
                    )),
                    "13" => AppError::Database(format!("Database full: {}", db_err.message())),
                    _ => AppError::Database(format!(
                        "Database error [{}]: {}",
                        code_str,
                        db_err.message()
                    )),
                }
            } else {
                AppError::Database(format!("Database error: {}", db_err.message()))
            }
        }
        sqlx::Error::RowNotFound => AppError::Database("Row not found".to_string()),
        sqlx::Error::ColumnNotFound(col) => AppError::Database(format!("Column not found: {}", col)),
        sqlx::Error::PoolTimedOut => AppError::Database("Connection pool timed out".to_string()),
        // Connection, pool, protocol errors
        _ => AppError::Database(err.to_string()),
    }
}

/// Adoption records and pet availability in SQLite
pub struct SqliteRecordStore {
    pool: SqlitePool,
    time_provider: Arc<dyn TimeProvider>,
}

impl SqliteRecordStore {
    pub fn new(pool: SqlitePool, time_provider: Arc<dyn TimeProvider>) -> Self {
        Self {
            pool,
            time_provider,
        }
    }

    /// Find a transaction by ID
    pub async fn find_transaction(&self, id: &TransactionId) -> Result<Option<Adoption>> {
        let row = sqlx::query_as::<_, TransactionRow>(
            "SELECT transaction_id, pet_id, pet_type, adoption_date FROM transactions WHERE transaction_id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(TransactionRow::into_adoption).transpose()
    }

    /// Count all stored transactions
    pub async fn count_transactions(&self) -> Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }

    /// Availability of a pet; `None` if the pet was never seen
    pub async fn is_available(&self, pet_id: &PetId) -> Result<Option<bool>> {
        let available: Option<i64> =
            sqlx::query_scalar("SELECT available FROM pet_availability WHERE pet_id = ?")
                .bind(pet_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        Ok(available.map(|v| v != 0))
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn create_transaction(&self, ctx: &RequestContext, adoption: &Adoption) -> Result<()> {
        ctx.run(async {
            sqlx::query(
                r#"
                INSERT INTO transactions (transaction_id, pet_id, pet_type, adoption_date)
                VALUES (?, ?, ?, ?)
                "#,
            )
            .bind(&adoption.transaction_id)
            .bind(&adoption.pet_id)
            .bind(&adoption.pet_type)
            .bind(adoption.adoption_date.timestamp_millis())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

            debug!(transaction_id = %adoption.transaction_id, "Transaction inserted");
            Ok::<(), AppError>(())
        })
        .await
    }

    async fn update_availability(&self, ctx: &RequestContext, adoption: &Adoption) -> Result<()> {
        let now = self.time_provider.now().timestamp_millis();

        ctx.run(async {
            // Upsert: pets unknown to this store are recorded as adopted
            sqlx::query(
                r#"
                INSERT INTO pet_availability (pet_id, pet_type, available, updated_at)
                VALUES (?, ?, 0, ?)
                ON CONFLICT(pet_id) DO UPDATE
                SET available = 0, pet_type = excluded.pet_type, updated_at = excluded.updated_at
                "#,
            )
            .bind(&adoption.pet_id)
            .bind(&adoption.pet_type)
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

            debug!(pet_id = %adoption.pet_id, "Pet marked unavailable");
            Ok::<(), AppError>(())
        })
        .await
    }

    async fn drop_transactions(&self, ctx: &RequestContext) -> Result<()> {
        ctx.run(async {
            let result = sqlx::query("DELETE FROM transactions")
                .execute(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

            debug!(deleted = result.rows_affected(), "Transactions dropped");
            Ok::<(), AppError>(())
        })
        .await
    }
}

/// SQLite row representation
#[derive(Debug, sqlx::FromRow)]
struct TransactionRow {
    transaction_id: String,
    pet_id: String,
    pet_type: String,
    adoption_date: i64, // epoch ms
}

impl TransactionRow {
    fn into_adoption(self) -> Result<Adoption> {
        let adoption_date = DateTime::<Utc>::from_timestamp_millis(self.adoption_date)
            .ok_or_else(|| {
                AppError::Database(format!(
                    "Invalid adoption_date {} for transaction {}",
                    self.adoption_date, self.transaction_id
                ))
            })?;

        Ok(Adoption {
            transaction_id: self.transaction_id,
            pet_id: self.pet_id,
            pet_type: self.pet_type,
            adoption_date,
        })
    }
}
