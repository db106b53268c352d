use sqlx::MySqlPool;
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::clients::models::{Client, CreateClientRequest};

const CLIENT_COLUMNS: &str = r#"
    id, account_id, name, email, phone, company_name, address, city,
    country, tax_id, notes, created_at, updated_at
"#;

/// Repository for client database operations
pub struct ClientRepository {
    pool: MySqlPool,
}

impl ClientRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: &CreateClientRequest, account_id: &str) -> Result<Client> {
        let id = Uuid::new_v4().to_string();

        sqlx::query(
            r#"
            INSERT INTO clients (
                id, account_id, name, email, phone, company_name, address,
                city, country, tax_id, notes, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, NOW(), NOW())
            "#,
        )
        .bind(&id)
        .bind(account_id)
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(&request.company_name)
        .bind(&request.address)
        .bind(&request.city)
        .bind(&request.country)
        .bind(&request.tax_id)
        .bind(&request.notes)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        self.find_by_id(&id, account_id)
            .await?
            .ok_or_else(|| AppError::internal("Client disappeared after insert"))
    }

    pub async fn find_by_id(&self, id: &str, account_id: &str) -> Result<Option<Client>> {
        let client = sqlx::query_as::<_, Client>(&format!(
            "SELECT {} FROM clients WHERE id = ? AND account_id = ?",
            CLIENT_COLUMNS
        ))
        .bind(id)
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(client)
    }

    /// List clients for an account, newest first
    pub async fn list(&self, account_id: &str) -> Result<Vec<Client>> {
        let clients = sqlx::query_as::<_, Client>(&format!(
            "SELECT {} FROM clients WHERE account_id = ? ORDER BY created_at DESC",
            CLIENT_COLUMNS
        ))
        .bind(account_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(clients)
    }

    /// Case-insensitive substring search over name, email and company
    pub async fn search(&self, account_id: &str, query: &str) -> Result<Vec<Client>> {
        let pattern = format!("%{}%", query);

        let clients = sqlx::query_as::<_, Client>(&format!(
            r#"
            SELECT {} FROM clients
            WHERE account_id = ?
              AND (name LIKE ? OR email LIKE ? OR company_name LIKE ?)
            ORDER BY created_at DESC
            "#,
            CLIENT_COLUMNS
        ))
        .bind(account_id)
        .bind(&pattern)
        .bind(&pattern)
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(clients)
    }

    pub async fn update(
        &self,
        id: &str,
        request: &CreateClientRequest,
        account_id: &str,
    ) -> Result<Client> {
        let result = sqlx::query(
            r#"
            UPDATE clients SET
                name = ?, email = ?, phone = ?, company_name = ?, address = ?,
                city = ?, country = ?, tax_id = ?, notes = ?, updated_at = NOW()
            WHERE id = ? AND account_id = ?
            "#,
        )
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(&request.company_name)
        .bind(&request.address)
        .bind(&request.city)
        .bind(&request.country)
        .bind(&request.tax_id)
        .bind(&request.notes)
        .bind(id)
        .bind(account_id)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Client with id '{}' not found",
                id
            )));
        }

        self.find_by_id(id, account_id)
            .await?
            .ok_or_else(|| AppError::internal("Client disappeared after update"))
    }

    /// Delete a client. Cascading effects on invoices referencing the
    /// client are rejected by the foreign key rather than silently
    /// cascaded.
    pub async fn delete(&self, id: &str, account_id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM clients WHERE id = ? AND account_id = ?")
            .bind(id)
            .bind(account_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_foreign_key_violation() {
                        return AppError::conflict(
                            "Client has invoices and cannot be deleted".to_string(),
                        );
                    }
                }
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Client with id '{}' not found",
                id
            )));
        }

        Ok(())
    }
}
