use crate::core::AppError;
use actix_web::{
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use sha2::{Digest, Sha256};
use sqlx::MySqlPool;
use std::future::{ready, Ready};
use std::rc::Rc;

/// Account identity resolved from the request's API key.
///
/// Every repository query is scoped by this id; handlers take it as an
/// extractor so unauthenticated requests never reach business logic.
#[derive(Debug, Clone)]
pub struct AccountId(pub String);

impl FromRequest for AccountId {
    type Error = Error;
    type Future = Ready<std::result::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AccountId>()
                .cloned()
                .ok_or_else(|| Error::from(AppError::unauthorized("Missing account context"))),
        )
    }
}

/// API key authentication middleware
pub struct ApiKeyAuth {
    pool: MySqlPool,
}

impl ApiKeyAuth {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ApiKeyAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = ApiKeyAuthMiddleware<S>;
    type Future = Ready<std::result::Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ApiKeyAuthMiddleware {
            service: Rc::new(service),
            pool: self.pool.clone(),
        }))
    }
}

pub struct ApiKeyAuthMiddleware<S> {
    service: Rc<S>,
    pool: MySqlPool,
}

impl<S, B> Service<ServiceRequest> for ApiKeyAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, std::result::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let svc = self.service.clone();
        let pool = self.pool.clone();

        Box::pin(async move {
            // Health check and root stay public
            let path = req.path();
            if path == "/health" || path == "/" {
                return svc.call(req).await;
            }

            let api_key = req
                .headers()
                .get("X-API-Key")
                .and_then(|h| h.to_str().ok())
                .ok_or_else(|| Error::from(AppError::unauthorized("Missing X-API-Key header")))?;

            let record = validate_api_key(&pool, api_key)
                .await
                .map_err(Error::from)?;

            req.extensions_mut().insert(AccountId(record.account_id));

            svc.call(req).await
        })
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct ApiKeyRecord {
    account_id: String,
}

async fn validate_api_key(pool: &MySqlPool, api_key: &str) -> crate::core::Result<ApiKeyRecord> {
    let record = sqlx::query_as::<_, ApiKeyRecord>(
        r#"
        SELECT account_id
        FROM api_keys
        WHERE key_hash = ? AND is_active = TRUE
        LIMIT 1
        "#,
    )
    .bind(hash_api_key(api_key))
    .fetch_optional(pool)
    .await
    .map_err(AppError::Database)?
    .ok_or_else(|| AppError::unauthorized("Invalid API key"))?;

    Ok(record)
}

/// Hash an API key for storage and lookup (SHA-256, hex encoded)
pub fn hash_api_key(api_key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(api_key.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_api_key_is_deterministic() {
        let hash = hash_api_key("test_key_123");
        assert_eq!(hash, hash_api_key("test_key_123"));
        assert_ne!(hash, hash_api_key("other_key"));
        // SHA-256 hex digest is 64 characters
        assert_eq!(hash.len(), 64);
    }
}
