// Read-time status classification.
//
// Overdue is derived from the stored status and the due date at read
// time; it is never written back, so the stored status always remains
// one of Unpaid, Partial, Paid.

use chrono::NaiveDate;

use factura::modules::invoices::models::InvoiceStatus;
use factura::modules::reports::services::status_classifier::{display_status, is_overdue};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[test]
fn test_unpaid_past_due_is_overdue() {
    let due = date(2026, 8, 1);
    let today = date(2026, 8, 15);

    assert!(is_overdue(InvoiceStatus::Unpaid, due, today));
    assert_eq!(
        display_status(InvoiceStatus::Unpaid, due, today),
        InvoiceStatus::Overdue
    );
}

#[test]
fn test_due_today_is_not_overdue() {
    let today = date(2026, 8, 15);

    assert!(!is_overdue(InvoiceStatus::Unpaid, today, today));
    assert_eq!(
        display_status(InvoiceStatus::Unpaid, today, today),
        InvoiceStatus::Unpaid
    );
}

#[test]
fn test_partial_past_due_keeps_partial() {
    let due = date(2026, 8, 1);
    let today = date(2026, 8, 15);

    assert!(!is_overdue(InvoiceStatus::Partial, due, today));
    assert_eq!(
        display_status(InvoiceStatus::Partial, due, today),
        InvoiceStatus::Partial
    );
}

#[test]
fn test_paid_past_due_keeps_paid() {
    let due = date(2026, 8, 1);
    let today = date(2026, 8, 15);

    assert!(!is_overdue(InvoiceStatus::Paid, due, today));
    assert_eq!(
        display_status(InvoiceStatus::Paid, due, today),
        InvoiceStatus::Paid
    );
}

#[test]
fn test_unpaid_before_due_stays_unpaid() {
    let due = date(2026, 9, 1);
    let today = date(2026, 8, 15);

    assert!(!is_overdue(InvoiceStatus::Unpaid, due, today));
    assert_eq!(
        display_status(InvoiceStatus::Unpaid, due, today),
        InvoiceStatus::Unpaid
    );
}
