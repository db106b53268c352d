use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::core::error::AppError;
use crate::middleware::auth::AccountId;
use crate::modules::clients::models::CreateClientRequest;
use crate::modules::clients::services::client_service::ClientService;

/// Query parameters for listing clients
#[derive(Debug, Deserialize)]
pub struct ListClientsQuery {
    /// Optional search over name, email and company
    pub q: Option<String>,
}

/// Create a new client
/// POST /clients
pub async fn create_client(
    service: web::Data<Arc<ClientService>>,
    account_id: AccountId,
    request: web::Json<CreateClientRequest>,
) -> Result<HttpResponse, AppError> {
    let client = service
        .create_client(request.into_inner(), &account_id.0)
        .await?;

    Ok(HttpResponse::Created().json(client))
}

/// Get client by ID
/// GET /clients/{id}
pub async fn get_client(
    service: web::Data<Arc<ClientService>>,
    account_id: AccountId,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let client = service.get_client(&path.into_inner(), &account_id.0).await?;

    Ok(HttpResponse::Ok().json(client))
}

/// List clients, optionally searching
/// GET /clients?q=
pub async fn list_clients(
    service: web::Data<Arc<ClientService>>,
    account_id: AccountId,
    query: web::Query<ListClientsQuery>,
) -> Result<HttpResponse, AppError> {
    let clients = service
        .list_clients(&account_id.0, query.q.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(clients))
}

/// Update a client
/// PUT /clients/{id}
pub async fn update_client(
    service: web::Data<Arc<ClientService>>,
    account_id: AccountId,
    path: web::Path<String>,
    request: web::Json<CreateClientRequest>,
) -> Result<HttpResponse, AppError> {
    let client = service
        .update_client(&path.into_inner(), request.into_inner(), &account_id.0)
        .await?;

    Ok(HttpResponse::Ok().json(client))
}

/// Delete a client
/// DELETE /clients/{id}
pub async fn delete_client(
    service: web::Data<Arc<ClientService>>,
    account_id: AccountId,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    service
        .delete_client(&path.into_inner(), &account_id.0)
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Configure client routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/clients")
            .route("", web::post().to(create_client))
            .route("", web::get().to(list_clients))
            .route("/{id}", web::get().to(get_client))
            .route("/{id}", web::put().to(update_client))
            .route("/{id}", web::delete().to(delete_client)),
    );
}
