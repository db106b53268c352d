// Payment application.
//
// Pure derivation of the invoice's denormalized payment fields from a
// validated payment amount. Callers enforce the preconditions
// (amount > 0 and amount <= balance) before calling; the functions here
// assume valid input and perform no further checks.

use rust_decimal::Decimal;

use crate::modules::invoices::models::InvoiceStatus;

/// The invoice fields derived from applying one payment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentOutcome {
    pub paid_amount: Decimal,
    pub balance: Decimal,
    pub status: InvoiceStatus,
}

/// Apply a payment of `amount` to an invoice with the given `total` and
/// pre-payment `paid_amount`
pub fn apply_payment(total: Decimal, paid_amount: Decimal, amount: Decimal) -> PaymentOutcome {
    let new_paid = paid_amount + amount;

    PaymentOutcome {
        paid_amount: new_paid,
        balance: total - new_paid,
        status: status_for_paid_amount(new_paid, total),
    }
}

/// Recompute the denormalized payment fields after an invoice edit
/// changed the total while keeping the recorded payments.
///
/// Restores `balance = total - paid_amount` and re-derives the status.
/// The balance is not clamped: when the new total drops below what was
/// already paid, the balance goes negative and the status stays Paid.
pub fn rebalance(total: Decimal, paid_amount: Decimal) -> PaymentOutcome {
    PaymentOutcome {
        paid_amount,
        balance: total - paid_amount,
        status: status_for_paid_amount(paid_amount, total),
    }
}

/// Status classification from payment progress alone.
///
/// Overdue is never produced here; it is a read-time classification
/// against the due date (see the reports status classifier).
pub fn status_for_paid_amount(paid_amount: Decimal, total: Decimal) -> InvoiceStatus {
    if paid_amount <= Decimal::ZERO {
        InvoiceStatus::Unpaid
    } else if paid_amount >= total {
        InvoiceStatus::Paid
    } else {
        InvoiceStatus::Partial
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_full_payment_marks_paid() {
        let outcome = apply_payment(dec!(220), dec!(0), dec!(220));

        assert_eq!(outcome.paid_amount, dec!(220));
        assert_eq!(outcome.balance, dec!(0));
        assert_eq!(outcome.status, InvoiceStatus::Paid);
    }

    #[test]
    fn test_partial_payment_marks_partial() {
        let outcome = apply_payment(dec!(220), dec!(0), dec!(100));

        assert_eq!(outcome.paid_amount, dec!(100));
        assert_eq!(outcome.balance, dec!(120));
        assert_eq!(outcome.status, InvoiceStatus::Partial);
    }

    #[test]
    fn test_second_payment_completes_invoice() {
        let first = apply_payment(dec!(220), dec!(0), dec!(100));
        let second = apply_payment(dec!(220), first.paid_amount, dec!(120));

        assert_eq!(second.paid_amount, dec!(220));
        assert_eq!(second.balance, dec!(0));
        assert_eq!(second.status, InvoiceStatus::Paid);
    }

    #[test]
    fn test_status_for_zero_paid_is_unpaid() {
        assert_eq!(
            status_for_paid_amount(dec!(0), dec!(500)),
            InvoiceStatus::Unpaid
        );
    }

    #[test]
    fn test_rebalance_after_edit_keeps_paid_amount() {
        // 100 already paid; the edit raises the total from 220 to 330
        let outcome = rebalance(dec!(330), dec!(100));

        assert_eq!(outcome.paid_amount, dec!(100));
        assert_eq!(outcome.balance, dec!(230));
        assert_eq!(outcome.status, InvoiceStatus::Partial);
    }

    #[test]
    fn test_rebalance_below_paid_goes_negative() {
        // The edit drops the total under what was already paid
        let outcome = rebalance(dec!(80), dec!(100));

        assert_eq!(outcome.balance, dec!(-20));
        assert_eq!(outcome.status, InvoiceStatus::Paid);
    }

    #[test]
    fn test_status_for_zero_total_invoice() {
        // A zero-total invoice with no payments stays unpaid rather than
        // being born paid
        assert_eq!(
            status_for_paid_amount(dec!(0), dec!(0)),
            InvoiceStatus::Unpaid
        );
    }
}
