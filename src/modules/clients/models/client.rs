use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::{AppError, Result};

/// A billable client owned by one account
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Client {
    /// Unique client ID (UUID)
    #[serde(skip_deserializing)]
    pub id: Option<String>,

    /// Owning account
    #[serde(skip_deserializing)]
    pub account_id: String,

    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company_name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub tax_id: Option<String>,
    pub notes: Option<String>,

    #[serde(skip_deserializing)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip_deserializing)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request body for creating or updating a client
#[derive(Debug, Clone, Deserialize)]
pub struct CreateClientRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company_name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub tax_id: Option<String>,
    pub notes: Option<String>,
}

impl CreateClientRequest {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("Client name cannot be empty"));
        }

        if self.email.trim().is_empty() {
            return Err(AppError::validation("Client email cannot be empty"));
        }

        if !self.email.contains('@') {
            return Err(AppError::validation(format!(
                "Invalid email address: {}",
                self.email
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, email: &str) -> CreateClientRequest {
        CreateClientRequest {
            name: name.to_string(),
            email: email.to_string(),
            phone: None,
            company_name: None,
            address: None,
            city: None,
            country: None,
            tax_id: None,
            notes: None,
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request("Acme Corp", "billing@acme.test").validate().is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        let result = request("  ", "billing@acme.test").validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("name cannot be empty"));
    }

    #[test]
    fn test_malformed_email_rejected() {
        let result = request("Acme Corp", "not-an-email").validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid email"));
    }
}
