// Read-time status classification.
//
// Overdue is a derived display value, never persisted: the stored
// status field only moves between Unpaid, Partial and Paid via payment
// application. The dashboard aggregator classifies against the due
// date on every read, so there is exactly one source of truth for
// "is this invoice overdue".

use chrono::NaiveDate;

use crate::modules::invoices::models::InvoiceStatus;

/// An invoice counts as overdue when nothing has been paid and the due
/// date has passed. Partially paid invoices are not classified overdue.
pub fn is_overdue(status: InvoiceStatus, due_date: NaiveDate, today: NaiveDate) -> bool {
    status == InvoiceStatus::Unpaid && due_date < today
}

/// Status as shown in aggregate views: the stored status, promoted to
/// Overdue when the due date has passed
pub fn display_status(status: InvoiceStatus, due_date: NaiveDate, today: NaiveDate) -> InvoiceStatus {
    if is_overdue(status, due_date, today) {
        InvoiceStatus::Overdue
    } else {
        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_unpaid_past_due_is_overdue() {
        let today = date(2026, 3, 15);
        assert!(is_overdue(InvoiceStatus::Unpaid, date(2026, 3, 14), today));
        assert_eq!(
            display_status(InvoiceStatus::Unpaid, date(2026, 3, 14), today),
            InvoiceStatus::Overdue
        );
    }

    #[test]
    fn test_due_today_is_not_overdue() {
        let today = date(2026, 3, 15);
        assert!(!is_overdue(InvoiceStatus::Unpaid, today, today));
    }

    #[test]
    fn test_partial_past_due_is_not_overdue() {
        let today = date(2026, 3, 15);
        assert!(!is_overdue(InvoiceStatus::Partial, date(2026, 1, 1), today));
        assert_eq!(
            display_status(InvoiceStatus::Partial, date(2026, 1, 1), today),
            InvoiceStatus::Partial
        );
    }

    #[test]
    fn test_paid_past_due_is_not_overdue() {
        let today = date(2026, 3, 15);
        assert!(!is_overdue(InvoiceStatus::Paid, date(2026, 1, 1), today));
    }
}
