use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Monetary amounts derived for a single order line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LineAmounts {
    pub excl_amount: Decimal,
    pub tax_amount: Decimal,
    pub incl_amount: Decimal,
}

/// Monetary totals for a whole order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    pub total_excl: Decimal,
    pub total_tax: Decimal,
    pub total_incl: Decimal,
}

impl OrderTotals {
    pub const ZERO: OrderTotals = OrderTotals {
        total_excl: Decimal::ZERO,
        total_tax: Decimal::ZERO,
        total_incl: Decimal::ZERO,
    };
}

/// Rounds a monetary value to 2 decimal places, half-up.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Derives the three amounts for one line from quantity, unit price, and tax
/// rate (a percentage). Each amount is rounded to 2 decimal places before the
/// next step, so `incl_amount == excl_amount + tax_amount` holds exactly on
/// the stored values.
pub fn line_amounts(quantity: Decimal, price: Decimal, tax_rate: Decimal) -> LineAmounts {
    let excl_amount = round2(quantity * price);
    let tax_amount = round2(excl_amount * tax_rate / Decimal::ONE_HUNDRED);
    let incl_amount = round2(excl_amount + tax_amount);
    LineAmounts {
        excl_amount,
        tax_amount,
        incl_amount,
    }
}

/// Sums line amounts field-wise. Inputs are already rounded, so no further
/// rounding is applied here.
pub fn order_totals<'a, I>(lines: I) -> OrderTotals
where
    I: IntoIterator<Item = &'a LineAmounts>,
{
    lines.into_iter().fold(OrderTotals::ZERO, |acc, line| OrderTotals {
        total_excl: acc.total_excl + line.excl_amount,
        total_tax: acc.total_tax + line.tax_amount,
        total_incl: acc.total_incl + line.incl_amount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn rounds_half_up_at_two_places() {
        assert_eq!(round2(dec!(1.005)), dec!(1.01));
        assert_eq!(round2(dec!(1.004)), dec!(1.00));
        assert_eq!(round2(dec!(2.675)), dec!(2.68));
        assert_eq!(round2(dec!(10)), dec!(10.00));
    }

    #[test]
    fn zero_quantity_yields_zero_amounts() {
        let amounts = line_amounts(Decimal::ZERO, dec!(99.99), dec!(15));
        assert_eq!(amounts.excl_amount, Decimal::ZERO);
        assert_eq!(amounts.tax_amount, Decimal::ZERO);
        assert_eq!(amounts.incl_amount, Decimal::ZERO);
    }

    #[test]
    fn computes_simple_line() {
        let amounts = line_amounts(dec!(2), dec!(10), dec!(10));
        assert_eq!(amounts.excl_amount, dec!(20.00));
        assert_eq!(amounts.tax_amount, dec!(2.00));
        assert_eq!(amounts.incl_amount, dec!(22.00));
    }

    #[test]
    fn computes_tax_free_line() {
        let amounts = line_amounts(dec!(3), dec!(49.99), Decimal::ZERO);
        assert_eq!(amounts.excl_amount, dec!(149.97));
        assert_eq!(amounts.tax_amount, dec!(0.00));
        assert_eq!(amounts.incl_amount, dec!(149.97));
    }

    #[test]
    fn rounds_each_amount_before_aggregation() {
        // 3 x 0.333 = 0.999 -> 1.00 excl; 10% of 1.00 -> 0.10 tax
        let amounts = line_amounts(dec!(3), dec!(0.333), dec!(10));
        assert_eq!(amounts.excl_amount, dec!(1.00));
        assert_eq!(amounts.tax_amount, dec!(0.10));
        assert_eq!(amounts.incl_amount, dec!(1.10));
    }

    #[test]
    fn totals_are_field_wise_sums() {
        let lines = vec![
            line_amounts(dec!(2), dec!(10), dec!(10)),
            line_amounts(dec!(3), dec!(49.99), Decimal::ZERO),
        ];
        let totals = order_totals(&lines);
        assert_eq!(totals.total_excl, dec!(169.97));
        assert_eq!(totals.total_tax, dec!(2.00));
        assert_eq!(totals.total_incl, dec!(171.97));
    }

    #[test]
    fn totals_of_no_lines_are_zero() {
        assert_eq!(order_totals(std::iter::empty()), OrderTotals::ZERO);
    }

    #[test]
    fn totals_are_idempotent_over_the_same_lines() {
        let lines = vec![
            line_amounts(dec!(1.5), dec!(3.33), dec!(12.5)),
            line_amounts(dec!(7), dec!(0.99), dec!(20)),
        ];
        assert_eq!(order_totals(&lines), order_totals(&lines));
    }
}
