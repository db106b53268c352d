mod dashboard;

pub use dashboard::{DashboardStats, InvoiceAggregate, RevenueByMonth};
