// Reports module

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{DashboardStats, RevenueByMonth};
pub use repositories::ReportRepository;
pub use services::ReportService;
