use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::middleware::auth::AccountId;
use crate::modules::settings::models::Preferences;
use crate::modules::settings::services::settings_service::SettingsService;

/// Get the account's preferences
/// GET /settings
pub async fn get_settings(
    service: web::Data<Arc<SettingsService>>,
    account_id: AccountId,
) -> Result<HttpResponse, AppError> {
    let preferences = service.get_preferences(&account_id.0).await?;

    Ok(HttpResponse::Ok().json(preferences))
}

/// Replace the account's preferences
/// PUT /settings
pub async fn update_settings(
    service: web::Data<Arc<SettingsService>>,
    account_id: AccountId,
    payload: web::Json<Preferences>,
) -> Result<HttpResponse, AppError> {
    let preferences = service
        .update_preferences(&account_id.0, payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(preferences))
}

/// Configure settings routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/settings")
            .route("", web::get().to(get_settings))
            .route("", web::put().to(update_settings)),
    );
}
