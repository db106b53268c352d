// Property-based tests for the invoice totals calculator.
//
// Totals are pure arithmetic over line amounts and rate parameters,
// so the core properties hold for any input:
// - a percentage line discount scales the line amount linearly
// - the subtotal is the exact sum of line amounts
// - recomputation is deterministic (safe to re-derive on every edit)

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use factura::modules::invoices::models::DiscountType;
use factura::modules::invoices::services::totals::{
    compute_totals, line_amount, Discount, InvoiceRates,
};

proptest! {
    #[test]
    fn test_percentage_discount_scales_line_amount(
        quantity in 1u32..10_000u32,
        unit_price_cents in 0u64..100_000_000u64,
        discount_percent in 0u8..=100u8
    ) {
        let quantity = Decimal::from(quantity);
        let unit_price = Decimal::from(unit_price_cents) / Decimal::from(100);
        let discount = Discount {
            kind: DiscountType::Percentage,
            value: Decimal::from(discount_percent),
        };

        let amount = line_amount(quantity, unit_price, Some(&discount));
        let expected = quantity * unit_price
            * (Decimal::ONE_HUNDRED - Decimal::from(discount_percent))
            / Decimal::ONE_HUNDRED;

        prop_assert_eq!(amount, expected);
    }

    #[test]
    fn test_subtotal_is_exact_sum_of_line_amounts(
        amounts_cents in proptest::collection::vec(0i64..100_000_000i64, 0..20)
    ) {
        let amounts: Vec<Decimal> = amounts_cents
            .iter()
            .map(|&c| Decimal::from(c) / Decimal::from(100))
            .collect();
        let expected: Decimal = amounts.iter().copied().sum();

        let totals = compute_totals(amounts, &InvoiceRates::default());

        prop_assert_eq!(totals.subtotal, expected);
        // With no tax and no discount, total equals subtotal
        prop_assert_eq!(totals.total, expected);
    }

    #[test]
    fn test_recomputation_is_deterministic(
        amounts_cents in proptest::collection::vec(0i64..100_000_000i64, 0..20),
        tax_rate_percent in 0u8..=100u8
    ) {
        let amounts: Vec<Decimal> = amounts_cents
            .iter()
            .map(|&c| Decimal::from(c) / Decimal::from(100))
            .collect();
        let rates = InvoiceRates {
            tax_rate: Decimal::from(tax_rate_percent),
            ..InvoiceRates::default()
        };

        let first = compute_totals(amounts.clone(), &rates);
        let second = compute_totals(amounts, &rates);

        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_total_identity_holds(
        amounts_cents in proptest::collection::vec(0i64..100_000_000i64, 1..20),
        tax_rate_percent in 0u8..=100u8,
        discount_percent in 0u8..=100u8
    ) {
        let amounts: Vec<Decimal> = amounts_cents
            .iter()
            .map(|&c| Decimal::from(c) / Decimal::from(100))
            .collect();
        let rates = InvoiceRates {
            tax_rate: Decimal::from(tax_rate_percent),
            discount: Some(Discount {
                kind: DiscountType::Percentage,
                value: Decimal::from(discount_percent),
            }),
            deposit_percentage: None,
        };

        let totals = compute_totals(amounts, &rates);

        prop_assert_eq!(
            totals.total,
            totals.subtotal + totals.tax_amount - totals.discount_amount
        );
    }
}

#[test]
fn test_worked_example() {
    // Two units at 100 with 10% tax: subtotal 200, tax 20, total 220
    let amount = line_amount(dec!(2), dec!(100), None);
    assert_eq!(amount, dec!(200));

    let rates = InvoiceRates {
        tax_rate: dec!(10),
        ..InvoiceRates::default()
    };
    let totals = compute_totals([amount], &rates);

    assert_eq!(totals.subtotal, dec!(200));
    assert_eq!(totals.tax_amount, dec!(20));
    assert_eq!(totals.discount_amount, dec!(0));
    assert_eq!(totals.total, dec!(220));
}

#[test]
fn test_deposit_is_informational() {
    let rates = InvoiceRates {
        tax_rate: dec!(10),
        discount: None,
        deposit_percentage: Some(dec!(50)),
    };
    let totals = compute_totals([dec!(200)], &rates);

    assert_eq!(totals.deposit_amount, Some(dec!(100)));
    // Deposit does not reduce the total
    assert_eq!(totals.total, dec!(220));
}

#[test]
fn test_fixed_invoice_discount_subtracted_after_tax() {
    let rates = InvoiceRates {
        tax_rate: dec!(10),
        discount: Some(Discount {
            kind: DiscountType::Fixed,
            value: dec!(30),
        }),
        deposit_percentage: None,
    };
    let totals = compute_totals([dec!(200)], &rates);

    // Tax is computed on the subtotal, not the discounted base
    assert_eq!(totals.tax_amount, dec!(20));
    assert_eq!(totals.discount_amount, dec!(30));
    assert_eq!(totals.total, dec!(190));
}
