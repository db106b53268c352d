use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use factura::config::Config;
use factura::middleware::{ApiKeyAuth, RateLimiter, RequestId};
use factura::modules::clients::controllers as client_controllers;
use factura::modules::clients::repositories::ClientRepository;
use factura::modules::clients::services::ClientService;
use factura::modules::exports::controllers as export_controllers;
use factura::modules::exports::services::CsvExporter;
use factura::modules::invoices::controllers as invoice_controllers;
use factura::modules::invoices::repositories::InvoiceRepository;
use factura::modules::invoices::services::InvoiceService;
use factura::modules::payments::repositories::PaymentRepository;
use factura::modules::payments::services::PaymentService;
use factura::modules::reports::controllers as report_controllers;
use factura::modules::reports::repositories::ReportRepository;
use factura::modules::reports::services::ReportService;
use factura::modules::settings::controllers as settings_controllers;
use factura::modules::settings::repositories::MySqlPreferenceStore;
use factura::modules::settings::services::SettingsService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "factura=debug,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");
    config.validate().expect("Configuration validation failed");

    tracing::info!("Starting Factura Invoice Management Service");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    // Create database connection pool
    let db_pool = config
        .database
        .create_pool()
        .await
        .expect("Failed to create database pool");

    tracing::info!(
        "Database pool initialized ({} connections)",
        config.database.pool_size
    );

    // Repositories
    let client_repo = Arc::new(ClientRepository::new(db_pool.clone()));
    let invoice_repo = Arc::new(InvoiceRepository::new(db_pool.clone()));
    let payment_repo = Arc::new(PaymentRepository::new(db_pool.clone()));
    let report_repo = Arc::new(ReportRepository::new(db_pool.clone()));
    let preference_store = Arc::new(MySqlPreferenceStore::new(db_pool.clone()));

    // Services
    let client_service = Arc::new(ClientService::new(client_repo.clone()));
    let invoice_service = Arc::new(InvoiceService::new(
        invoice_repo.clone(),
        client_repo.clone(),
    ));
    let payment_service = Arc::new(PaymentService::new(
        db_pool.clone(),
        payment_repo.clone(),
        invoice_repo.clone(),
    ));
    let report_service = Arc::new(ReportService::new(
        report_repo.clone(),
        invoice_repo.clone(),
    ));
    let csv_exporter = Arc::new(CsvExporter::new(invoice_repo.clone(), client_repo.clone()));
    let settings_service = Arc::new(SettingsService::new(preference_store));

    let rate_limit = config.security.rate_limit_per_minute;
    let workers = config.server.workers;
    let bind_address = config.server.bind_address();

    let auth_pool = db_pool.clone();
    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .wrap(ApiKeyAuth::new(auth_pool.clone()))
            .wrap(RateLimiter::new(rate_limit))
            .wrap(RequestId)
            .wrap(TracingLogger::default())
            .wrap(cors)
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(web::Data::new(client_service.clone()))
            .app_data(web::Data::new(invoice_service.clone()))
            .app_data(web::Data::new(payment_service.clone()))
            .app_data(web::Data::new(report_service.clone()))
            .app_data(web::Data::new(csv_exporter.clone()))
            .app_data(web::Data::new(settings_service.clone()))
            .configure(client_controllers::configure)
            .configure(invoice_controllers::configure)
            .configure(report_controllers::configure)
            .configure(export_controllers::configure)
            .configure(settings_controllers::configure)
            .route("/health", web::get().to(health_check))
            .route("/", web::get().to(index))
    })
    .workers(workers)
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "factura"
    }))
}

async fn index() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "service": "Factura Invoice Management Service",
        "version": "0.1.0",
        "status": "running"
    }))
}
