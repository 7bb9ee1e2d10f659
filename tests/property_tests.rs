//! Property-based tests for the amount calculation and order validation
//! rules.
//!
//! These tests use proptest to verify invariants across a wide range of
//! inputs, helping to catch edge cases that unit tests might miss.

use proptest::prelude::*;
use rust_decimal::Decimal;
use sales_orders_api::pricing::{line_amounts, order_totals, round2};
use sales_orders_api::validation::{validate_order, LineDraft, OrderDraft, ReferenceIds};

// Strategies for generating test data
fn money_strategy() -> impl Strategy<Value = Decimal> {
    (0u64..1_000_000, 0u8..100)
        .prop_map(|(units, cents)| format!("{}.{:02}", units, cents).parse().unwrap())
}

fn quantity_strategy() -> impl Strategy<Value = Decimal> {
    (0u32..10_000, 0u8..100)
        .prop_map(|(whole, frac)| format!("{}.{:02}", whole, frac).parse().unwrap())
}

fn tax_rate_strategy() -> impl Strategy<Value = Decimal> {
    (0u8..=100, 0u8..100)
        .prop_map(|(pct, frac)| format!("{}.{:02}", pct, frac).parse().unwrap())
}

fn line_input_strategy() -> impl Strategy<Value = (Decimal, Decimal, Decimal)> {
    (quantity_strategy(), money_strategy(), tax_rate_strategy())
}

// Property: the three stored amounts of a line reconcile exactly
proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn line_amounts_reconcile_exactly((quantity, price, tax_rate) in line_input_strategy()) {
        let amounts = line_amounts(quantity, price, tax_rate);
        prop_assert_eq!(
            amounts.incl_amount,
            amounts.excl_amount + amounts.tax_amount,
            "incl must equal excl + tax after rounding"
        );
    }

    #[test]
    fn line_amounts_have_cent_precision((quantity, price, tax_rate) in line_input_strategy()) {
        let amounts = line_amounts(quantity, price, tax_rate);
        prop_assert_eq!(round2(amounts.excl_amount), amounts.excl_amount);
        prop_assert_eq!(round2(amounts.tax_amount), amounts.tax_amount);
        prop_assert_eq!(round2(amounts.incl_amount), amounts.incl_amount);
    }

    #[test]
    fn line_amounts_are_non_negative((quantity, price, tax_rate) in line_input_strategy()) {
        let amounts = line_amounts(quantity, price, tax_rate);
        prop_assert!(!amounts.excl_amount.is_sign_negative());
        prop_assert!(!amounts.tax_amount.is_sign_negative());
        prop_assert!(!amounts.incl_amount.is_sign_negative());
    }
}

// Property: degenerate lines behave predictably
proptest! {
    #[test]
    fn zero_quantity_zeroes_the_line(price in money_strategy(), tax_rate in tax_rate_strategy()) {
        let amounts = line_amounts(Decimal::ZERO, price, tax_rate);
        prop_assert_eq!(amounts.excl_amount, Decimal::ZERO);
        prop_assert_eq!(amounts.tax_amount, Decimal::ZERO);
        prop_assert_eq!(amounts.incl_amount, Decimal::ZERO);
    }

    #[test]
    fn zero_tax_rate_means_incl_equals_excl(quantity in quantity_strategy(), price in money_strategy()) {
        let amounts = line_amounts(quantity, price, Decimal::ZERO);
        prop_assert_eq!(amounts.tax_amount, Decimal::ZERO);
        prop_assert_eq!(amounts.incl_amount, amounts.excl_amount);
    }
}

// Property: rounding to cents is stable
proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn round2_is_idempotent(units in 0u64..10_000_000, frac in 0u32..10_000) {
        let value: Decimal = format!("{}.{:04}", units, frac).parse().unwrap();
        let rounded = round2(value);
        prop_assert_eq!(round2(rounded), rounded);
    }
}

// Property: order totals are exactly the field-wise sums of their lines
proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn order_totals_match_field_wise_sums(inputs in prop::collection::vec(line_input_strategy(), 0..10)) {
        let lines: Vec<_> = inputs
            .iter()
            .map(|(quantity, price, tax_rate)| line_amounts(*quantity, *price, *tax_rate))
            .collect();
        let totals = order_totals(&lines);

        let expected_excl: Decimal = lines.iter().map(|l| l.excl_amount).sum();
        let expected_tax: Decimal = lines.iter().map(|l| l.tax_amount).sum();
        let expected_incl: Decimal = lines.iter().map(|l| l.incl_amount).sum();

        prop_assert_eq!(totals.total_excl, expected_excl);
        prop_assert_eq!(totals.total_tax, expected_tax);
        prop_assert_eq!(totals.total_incl, expected_incl);
        prop_assert_eq!(totals.total_incl, totals.total_excl + totals.total_tax);
    }

    #[test]
    fn order_totals_ignore_line_order(
        inputs in prop::collection::vec(line_input_strategy(), 1..10),
        rotation in 0usize..10,
    ) {
        let lines: Vec<_> = inputs
            .iter()
            .map(|(quantity, price, tax_rate)| line_amounts(*quantity, *price, *tax_rate))
            .collect();

        let mut rotated = lines.clone();
        rotated.rotate_left(rotation % lines.len());

        prop_assert_eq!(order_totals(&lines), order_totals(&rotated));
    }
}

// Property: validation accepts exactly the orders that satisfy every rule
proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn orders_with_known_references_pass(
        client_id in 1i32..50,
        item_ids in prop::collection::vec(1i32..50, 1..6),
        invoice_no in "[A-Z]{2,4}-[0-9]{1,6}",
    ) {
        let refs = ReferenceIds::new(1..50, 1..50);
        let draft = OrderDraft {
            client_id: Some(client_id),
            invoice_no,
            lines: item_ids
                .into_iter()
                .map(|id| LineDraft { item_id: Some(id) })
                .collect(),
        };
        let violations = validate_order(&draft, &refs);
        prop_assert!(violations.is_empty(), "unexpected violations: {:?}", violations);
    }

    #[test]
    fn blank_invoice_numbers_always_fail(invoice_no in "\\s*") {
        let refs = ReferenceIds::new(1..50, 1..50);
        let draft = OrderDraft {
            client_id: Some(1),
            invoice_no,
            lines: vec![LineDraft { item_id: Some(1) }],
        };
        let violations = validate_order(&draft, &refs);
        prop_assert!(violations
            .iter()
            .any(|v| v.field == "invoiceNo"), "blank invoice number should be rejected");
    }

    #[test]
    fn unknown_items_are_reported_once(
        known_items in prop::collection::vec(1i32..50, 0..4),
        unknown_items in prop::collection::vec(1_000i32..2_000, 1..4),
    ) {
        let refs = ReferenceIds::new(1..50, 1..50);
        let mut lines: Vec<LineDraft> = known_items
            .into_iter()
            .map(|id| LineDraft { item_id: Some(id) })
            .collect();
        lines.extend(unknown_items.into_iter().map(|id| LineDraft { item_id: Some(id) }));

        let draft = OrderDraft {
            client_id: Some(1),
            invoice_no: "INV-1".to_string(),
            lines,
        };
        let violations = validate_order(&draft, &refs);
        let line_violations: Vec<_> = violations.iter().filter(|v| v.field == "lines").collect();
        prop_assert_eq!(line_violations.len(), 1, "one violation regardless of how many lines miss items");
    }
}
