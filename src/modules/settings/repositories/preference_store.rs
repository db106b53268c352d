use async_trait::async_trait;
use sqlx::{MySqlPool, Row};

use crate::core::{AppError, Result};
use crate::modules::settings::models::Preferences;

/// Storage for account preferences.
///
/// Preferences are read and written as a whole object so the service
/// layer never has to merge partial updates.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Load the stored preferences, or None if the account has never
    /// saved any.
    async fn load(&self, account_id: &str) -> Result<Option<Preferences>>;

    /// Persist the full preferences object, replacing any previous one.
    async fn save(&self, account_id: &str, preferences: &Preferences) -> Result<()>;
}

/// MySQL-backed store keeping one JSON blob per account.
pub struct MySqlPreferenceStore {
    pool: MySqlPool,
}

impl MySqlPreferenceStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PreferenceStore for MySqlPreferenceStore {
    async fn load(&self, account_id: &str) -> Result<Option<Preferences>> {
        let row = sqlx::query("SELECT data FROM preferences WHERE account_id = ?")
            .bind(account_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        match row {
            Some(row) => {
                let data: String = row.try_get("data").map_err(AppError::Database)?;
                let preferences = serde_json::from_str(&data)?;
                Ok(Some(preferences))
            }
            None => Ok(None),
        }
    }

    async fn save(&self, account_id: &str, preferences: &Preferences) -> Result<()> {
        let data = serde_json::to_string(preferences)?;

        sqlx::query(
            r#"
            INSERT INTO preferences (account_id, data, updated_at)
            VALUES (?, ?, NOW())
            ON DUPLICATE KEY UPDATE data = VALUES(data), updated_at = NOW()
            "#,
        )
        .bind(account_id)
        .bind(data)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(())
    }
}
