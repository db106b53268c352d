use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Utc};

use crate::core::Result;
use crate::modules::invoices::models::{Invoice, InvoiceStatus};
use crate::modules::invoices::repositories::InvoiceRepository;
use crate::modules::reports::models::{DashboardStats, InvoiceAggregate, RevenueByMonth};
use crate::modules::reports::repositories::ReportRepository;
use crate::modules::reports::services::status_classifier::is_overdue;

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Service for dashboard statistics and revenue reporting
pub struct ReportService {
    report_repo: Arc<ReportRepository>,
    invoice_repo: Arc<InvoiceRepository>,
}

impl ReportService {
    pub fn new(report_repo: Arc<ReportRepository>, invoice_repo: Arc<InvoiceRepository>) -> Self {
        Self {
            report_repo,
            invoice_repo,
        }
    }

    /// Aggregate statistics across all invoices and clients of an
    /// account. Overdue counting happens here, against today's date;
    /// the persisted status field is never touched.
    pub async fn dashboard_stats(&self, account_id: &str) -> Result<DashboardStats> {
        let invoices = self.report_repo.fetch_invoice_aggregates(account_id).await?;
        let total_clients = self.report_repo.count_clients(account_id).await?;
        let today = Utc::now().date_naive();

        Ok(Self::aggregate_stats(&invoices, total_clients, today))
    }

    /// Revenue received per calendar month, most recent `months` entries
    pub async fn revenue_by_month(
        &self,
        account_id: &str,
        months: usize,
    ) -> Result<Vec<RevenueByMonth>> {
        let invoices = self.report_repo.fetch_invoice_aggregates(account_id).await?;

        Ok(Self::group_revenue_by_month(&invoices, months))
    }

    /// Most recently created invoices with their client summaries
    pub async fn recent_invoices(&self, account_id: &str, limit: i64) -> Result<Vec<Invoice>> {
        self.invoice_repo.list(account_id, Some(limit), None).await
    }

    fn aggregate_stats(
        invoices: &[InvoiceAggregate],
        total_clients: u64,
        today: NaiveDate,
    ) -> DashboardStats {
        let mut stats = DashboardStats {
            total_invoices: invoices.len() as u64,
            total_clients,
            ..Default::default()
        };

        for invoice in invoices {
            stats.total_revenue += invoice.paid_amount;
            stats.outstanding_amount += invoice.balance;

            match invoice.status {
                InvoiceStatus::Paid => stats.paid_invoices += 1,
                InvoiceStatus::Unpaid => {
                    stats.unpaid_invoices += 1;
                    if is_overdue(invoice.status, invoice.due_date, today) {
                        stats.overdue_invoices += 1;
                    }
                }
                InvoiceStatus::Partial => stats.unpaid_invoices += 1,
                // Not written by any flow; counted defensively if seen
                InvoiceStatus::Overdue => {
                    stats.unpaid_invoices += 1;
                    stats.overdue_invoices += 1;
                }
            }
        }

        stats
    }

    /// Group paid amounts by creation month. Input is ordered by
    /// created_at ascending, so months arrive contiguously and the
    /// label order stays chronological. Every invoice contributes its
    /// month, so a month holding only unpaid invoices still shows up
    /// with zero revenue.
    fn group_revenue_by_month(invoices: &[InvoiceAggregate], months: usize) -> Vec<RevenueByMonth> {
        let mut grouped: Vec<RevenueByMonth> = Vec::new();

        for invoice in invoices {
            let label = format!(
                "{} {}",
                MONTH_NAMES[invoice.created_at.month0() as usize],
                invoice.created_at.year()
            );

            match grouped.last_mut() {
                Some(entry) if entry.month == label => entry.revenue += invoice.paid_amount,
                _ => grouped.push(RevenueByMonth {
                    month: label,
                    revenue: invoice.paid_amount,
                }),
            }
        }

        let skip = grouped.len().saturating_sub(months);
        grouped.split_off(skip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn aggregate(
        status: InvoiceStatus,
        total: Decimal,
        paid: Decimal,
        due: (i32, u32, u32),
        created: (i32, u32, u32),
    ) -> InvoiceAggregate {
        InvoiceAggregate {
            status,
            total,
            paid_amount: paid,
            balance: total - paid,
            due_date: NaiveDate::from_ymd_opt(due.0, due.1, due.2).unwrap(),
            created_at: Utc
                .with_ymd_and_hms(created.0, created.1, created.2, 12, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_dashboard_aggregation() {
        let today = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
        let invoices = vec![
            aggregate(InvoiceStatus::Paid, dec!(100), dec!(100), (2026, 5, 1), (2026, 4, 1)),
            aggregate(InvoiceStatus::Unpaid, dec!(200), dec!(0), (2026, 5, 1), (2026, 4, 15)),
            aggregate(InvoiceStatus::Unpaid, dec!(300), dec!(0), (2026, 7, 1), (2026, 5, 1)),
            aggregate(InvoiceStatus::Partial, dec!(400), dec!(150), (2026, 5, 1), (2026, 5, 10)),
        ];

        let stats = ReportService::aggregate_stats(&invoices, 3, today);

        assert_eq!(stats.total_invoices, 4);
        assert_eq!(stats.total_clients, 3);
        assert_eq!(stats.total_revenue, dec!(250));
        assert_eq!(stats.outstanding_amount, dec!(750));
        assert_eq!(stats.paid_invoices, 1);
        // Unpaid counts include partially paid invoices
        assert_eq!(stats.unpaid_invoices, 3);
        // Only the past-due unpaid invoice counts as overdue; the
        // past-due partial one does not
        assert_eq!(stats.overdue_invoices, 1);
    }

    #[test]
    fn test_stored_status_is_not_mutated_by_aggregation() {
        let today = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
        let invoices = vec![aggregate(
            InvoiceStatus::Unpaid,
            dec!(100),
            dec!(0),
            (2026, 1, 1),
            (2025, 12, 1),
        )];

        let stats = ReportService::aggregate_stats(&invoices, 0, today);

        assert_eq!(stats.overdue_invoices, 1);
        // The input still carries its stored status
        assert_eq!(invoices[0].status, InvoiceStatus::Unpaid);
    }

    #[test]
    fn test_revenue_grouped_by_month() {
        let invoices = vec![
            aggregate(InvoiceStatus::Paid, dec!(100), dec!(100), (2026, 2, 1), (2026, 1, 5)),
            aggregate(InvoiceStatus::Partial, dec!(300), dec!(50), (2026, 2, 20), (2026, 1, 20)),
            aggregate(InvoiceStatus::Unpaid, dec!(500), dec!(0), (2026, 3, 1), (2026, 2, 1)),
            aggregate(InvoiceStatus::Paid, dec!(200), dec!(200), (2026, 4, 1), (2026, 3, 1)),
        ];

        let revenue = ReportService::group_revenue_by_month(&invoices, 6);

        assert_eq!(
            revenue,
            vec![
                RevenueByMonth {
                    month: "Jan 2026".to_string(),
                    revenue: dec!(150),
                },
                RevenueByMonth {
                    month: "Feb 2026".to_string(),
                    revenue: dec!(0),
                },
                RevenueByMonth {
                    month: "Mar 2026".to_string(),
                    revenue: dec!(200),
                },
            ]
        );
    }

    #[test]
    fn test_month_with_only_unpaid_invoices_shows_zero_revenue() {
        let invoices = vec![
            aggregate(InvoiceStatus::Unpaid, dec!(500), dec!(0), (2026, 3, 1), (2026, 2, 1)),
            aggregate(InvoiceStatus::Unpaid, dec!(700), dec!(0), (2026, 3, 15), (2026, 2, 20)),
        ];

        let revenue = ReportService::group_revenue_by_month(&invoices, 6);

        assert_eq!(
            revenue,
            vec![RevenueByMonth {
                month: "Feb 2026".to_string(),
                revenue: dec!(0),
            }]
        );
    }

    #[test]
    fn test_revenue_window_keeps_most_recent_months() {
        let invoices = vec![
            aggregate(InvoiceStatus::Paid, dec!(10), dec!(10), (2026, 1, 1), (2025, 11, 1)),
            aggregate(InvoiceStatus::Paid, dec!(20), dec!(20), (2026, 1, 1), (2025, 12, 1)),
            aggregate(InvoiceStatus::Paid, dec!(30), dec!(30), (2026, 2, 1), (2026, 1, 1)),
        ];

        let revenue = ReportService::group_revenue_by_month(&invoices, 2);

        assert_eq!(revenue.len(), 2);
        assert_eq!(revenue[0].month, "Dec 2025");
        assert_eq!(revenue[1].month, "Jan 2026");
    }
}
