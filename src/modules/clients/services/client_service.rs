use std::sync::Arc;

use crate::core::{AppError, Result};
use crate::modules::clients::models::{Client, CreateClientRequest};
use crate::modules::clients::repositories::ClientRepository;

/// Service for client business logic
pub struct ClientService {
    client_repo: Arc<ClientRepository>,
}

impl ClientService {
    pub fn new(client_repo: Arc<ClientRepository>) -> Self {
        Self { client_repo }
    }

    pub async fn create_client(
        &self,
        request: CreateClientRequest,
        account_id: &str,
    ) -> Result<Client> {
        request.validate()?;

        let client = self.client_repo.create(&request, account_id).await?;

        tracing::info!(client_id = ?client.id, "Client created");

        Ok(client)
    }

    pub async fn get_client(&self, id: &str, account_id: &str) -> Result<Client> {
        self.client_repo
            .find_by_id(id, account_id)
            .await?
            .ok_or_else(|| AppError::not_found("Client not found"))
    }

    /// List clients, optionally filtered by a search query over name,
    /// email and company
    pub async fn list_clients(&self, account_id: &str, query: Option<&str>) -> Result<Vec<Client>> {
        match query {
            Some(q) if !q.trim().is_empty() => self.client_repo.search(account_id, q.trim()).await,
            _ => self.client_repo.list(account_id).await,
        }
    }

    pub async fn update_client(
        &self,
        id: &str,
        request: CreateClientRequest,
        account_id: &str,
    ) -> Result<Client> {
        request.validate()?;

        self.client_repo.update(id, &request, account_id).await
    }

    pub async fn delete_client(&self, id: &str, account_id: &str) -> Result<()> {
        self.client_repo.delete(id, account_id).await?;

        tracing::info!(client_id = %id, "Client deleted");

        Ok(())
    }
}
