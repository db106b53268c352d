// Invoice totals calculator.
//
// Pure arithmetic over caller-supplied data; persistence of the result
// is the repository's responsibility. All values stay at full decimal
// precision here. Rounding happens only at display and export
// boundaries (see core::Currency).

use rust_decimal::Decimal;

use crate::modules::invoices::models::DiscountType;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// A discount with a resolved type and value.
///
/// Built from the optional type/value column pair: an absent value means
/// no discount regardless of type, an absent type means a fixed amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Discount {
    pub kind: DiscountType,
    pub value: Decimal,
}

impl Discount {
    pub fn from_parts(kind: Option<DiscountType>, value: Option<Decimal>) -> Option<Self> {
        value.map(|value| Discount {
            kind: kind.unwrap_or(DiscountType::Fixed),
            value,
        })
    }

    /// Discount amount against the given base (the line gross or the
    /// invoice subtotal)
    fn amount_against(&self, base: Decimal) -> Decimal {
        match self.kind {
            DiscountType::Percentage => base * self.value / HUNDRED,
            DiscountType::Fixed => self.value,
        }
    }
}

/// Invoice-level rate parameters
#[derive(Debug, Clone, Default)]
pub struct InvoiceRates {
    /// Tax rate in percent
    pub tax_rate: Decimal,
    pub discount: Option<Discount>,
    /// Informational deposit percentage of subtotal
    pub deposit_percentage: Option<Decimal>,
}

/// Derived invoice totals
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceTotals {
    pub subtotal: Decimal,
    pub tax_amount: Decimal,
    pub discount_amount: Decimal,
    pub deposit_amount: Option<Decimal>,
    pub total: Decimal,
}

/// Amount for a single line: quantity * unit_price - line discount.
///
/// Not clamped: a discount larger than the line value yields a negative
/// amount, which the caller sees as-is.
pub fn line_amount(quantity: Decimal, unit_price: Decimal, discount: Option<&Discount>) -> Decimal {
    let gross = quantity * unit_price;
    let line_discount = discount
        .map(|d| d.amount_against(gross))
        .unwrap_or(Decimal::ZERO);

    gross - line_discount
}

/// Derive invoice totals from precomputed line amounts and rate
/// parameters. An empty amount sequence yields all-zero totals.
pub fn compute_totals<I>(line_amounts: I, rates: &InvoiceRates) -> InvoiceTotals
where
    I: IntoIterator<Item = Decimal>,
{
    let subtotal: Decimal = line_amounts.into_iter().sum();

    let tax_amount = subtotal * rates.tax_rate / HUNDRED;

    let discount_amount = match rates.discount {
        Some(Discount {
            kind: DiscountType::Percentage,
            value,
        }) => subtotal * value / HUNDRED,
        Some(Discount {
            kind: DiscountType::Fixed,
            value,
        }) => value,
        None => Decimal::ZERO,
    };

    // Deposit is informational only and never subtracted from the total
    let deposit_amount = rates
        .deposit_percentage
        .map(|pct| subtotal * pct / HUNDRED);

    let total = subtotal + tax_amount - discount_amount;

    InvoiceTotals {
        subtotal,
        tax_amount,
        discount_amount,
        deposit_amount,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_line_amount_no_discount() {
        assert_eq!(line_amount(dec!(2), dec!(100), None), dec!(200));
    }

    #[test]
    fn test_line_amount_percentage_discount() {
        let discount = Discount {
            kind: DiscountType::Percentage,
            value: dec!(25),
        };
        // 4 * 10 = 40, minus 25% = 30
        assert_eq!(line_amount(dec!(4), dec!(10), Some(&discount)), dec!(30));
    }

    #[test]
    fn test_line_amount_fixed_discount() {
        let discount = Discount {
            kind: DiscountType::Fixed,
            value: dec!(15),
        };
        assert_eq!(line_amount(dec!(1), dec!(100), Some(&discount)), dec!(85));
    }

    #[test]
    fn test_discount_from_parts_without_value() {
        // A type with no value is no discount at all
        assert_eq!(
            Discount::from_parts(Some(DiscountType::Percentage), None),
            None
        );
    }

    #[test]
    fn test_discount_from_parts_defaults_to_fixed() {
        let discount = Discount::from_parts(None, Some(dec!(10))).unwrap();
        assert_eq!(discount.kind, DiscountType::Fixed);
    }

    #[test]
    fn test_compute_totals_empty_items() {
        let totals = compute_totals(
            std::iter::empty(),
            &InvoiceRates {
                tax_rate: dec!(10),
                ..Default::default()
            },
        );

        assert_eq!(totals.subtotal, Decimal::ZERO);
        assert_eq!(totals.tax_amount, Decimal::ZERO);
        assert_eq!(totals.discount_amount, Decimal::ZERO);
        assert_eq!(totals.deposit_amount, None);
        assert_eq!(totals.total, Decimal::ZERO);
    }

    #[test]
    fn test_compute_totals_with_tax_and_deposit() {
        let rates = InvoiceRates {
            tax_rate: dec!(10),
            discount: None,
            deposit_percentage: Some(dec!(50)),
        };
        let totals = compute_totals([dec!(200)], &rates);

        assert_eq!(totals.subtotal, dec!(200));
        assert_eq!(totals.tax_amount, dec!(20));
        assert_eq!(totals.deposit_amount, Some(dec!(100)));
        // Deposit does not reduce the total
        assert_eq!(totals.total, dec!(220));
    }

    #[test]
    fn test_compute_totals_invoice_percentage_discount() {
        let rates = InvoiceRates {
            tax_rate: dec!(0),
            discount: Some(Discount {
                kind: DiscountType::Percentage,
                value: dec!(10),
            }),
            deposit_percentage: None,
        };
        let totals = compute_totals([dec!(300), dec!(200)], &rates);

        assert_eq!(totals.subtotal, dec!(500));
        assert_eq!(totals.discount_amount, dec!(50));
        assert_eq!(totals.total, dec!(450));
    }
}
