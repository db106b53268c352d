pub mod report_service;
pub mod status_classifier;

pub use report_service::ReportService;
