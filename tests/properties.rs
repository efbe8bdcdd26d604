//! Property tests for the payroll calculations and the rate store.

use proptest::prelude::*;
use rust_decimal::Decimal;

use payroll_engine::calculation::{
    CURRENT_TABLES, INSS_2025, calculate_inss, calculate_payroll, percent_of,
};
use payroll_engine::config::RateStore;
use payroll_engine::models::{
    ConsumptionTaxTreatment, MAX_AMOUNT, MAX_RATE, PayrollInput, RateSet,
};

const INSS_MAXIMUM: Decimal = Decimal::from_parts(95163, 0, 0, false, 2);

fn arb_money(max_cents: i64) -> impl Strategy<Value = Decimal> {
    (0..=max_cents).prop_map(|cents| Decimal::new(cents, 2))
}

fn arb_rate() -> impl Strategy<Value = Decimal> {
    (0i64..=10_000).prop_map(|hundredths| Decimal::new(hundredths, 2))
}

/// Any non-negative decimal up to six places, valid as a rate or not.
fn arb_any_rate() -> impl Strategy<Value = Decimal> {
    (0i64..=20_000_000, 0u32..=6).prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
}

fn arb_rates() -> impl Strategy<Value = RateSet> {
    (arb_rate(), arb_rate()).prop_map(|(cbs_rate, ibs_rate)| RateSet { cbs_rate, ibs_rate })
}

fn arb_treatment() -> impl Strategy<Value = ConsumptionTaxTreatment> {
    prop_oneof![
        Just(ConsumptionTaxTreatment::Deducted),
        Just(ConsumptionTaxTreatment::Informational),
    ]
}

fn payroll(
    gross: Decimal,
    rates: &RateSet,
    treatment: ConsumptionTaxTreatment,
) -> payroll_engine::models::PayrollResult {
    calculate_payroll(&PayrollInput::from_gross(gross), rates, treatment, &CURRENT_TABLES).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_inss_is_bounded(salary in arb_money(10_000_000)) {
        let inss = calculate_inss(salary, &INSS_2025, 1).total;
        prop_assert!(inss >= Decimal::ZERO);
        prop_assert!(inss <= INSS_MAXIMUM);
        prop_assert!(inss <= salary);
    }

    #[test]
    fn prop_inss_is_monotonic(a in arb_money(1_500_000), b in arb_money(1_500_000)) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let inss_low = calculate_inss(low, &INSS_2025, 1).total;
        let inss_high = calculate_inss(high, &INSS_2025, 1).total;
        prop_assert!(inss_low <= inss_high);
    }

    #[test]
    fn prop_inss_slices_sum_to_total(salary in arb_money(2_000_000)) {
        let result = calculate_inss(salary, &INSS_2025, 1);
        let sum: Decimal = result.slices.iter().map(|s| s.amount).sum();
        prop_assert_eq!(sum, result.total);
    }

    #[test]
    fn prop_net_never_exceeds_gross(
        gross in arb_money(5_000_000),
        rates in arb_rates(),
        treatment in arb_treatment(),
    ) {
        let result = payroll(gross, &rates, treatment);
        prop_assert!(result.net <= result.gross);
        prop_assert!(result.irrf_deduction >= Decimal::ZERO);
    }

    #[test]
    fn prop_net_is_gross_minus_deductions(gross in arb_money(5_000_000), rates in arb_rates()) {
        let result = payroll(gross, &rates, ConsumptionTaxTreatment::Deducted);
        let expected = gross
            - result.inss_deduction
            - result.irrf_deduction
            - result.cbs_amount
            - result.ibs_amount;
        prop_assert_eq!(result.net, expected);
        prop_assert_eq!(result.total_deductions(), gross - result.net);
    }

    #[test]
    fn prop_consumption_taxes_are_flat_percentages(gross in arb_money(5_000_000), rates in arb_rates()) {
        let result = payroll(gross, &rates, ConsumptionTaxTreatment::Informational);
        prop_assert_eq!(result.cbs_amount, percent_of(gross, rates.cbs_rate));
        prop_assert_eq!(result.ibs_amount, percent_of(gross, rates.ibs_rate));
    }

    #[test]
    fn prop_informational_net_is_deducted_net_plus_taxes(gross in arb_money(5_000_000), rates in arb_rates()) {
        let deducted = payroll(gross, &rates, ConsumptionTaxTreatment::Deducted);
        let informational = payroll(gross, &rates, ConsumptionTaxTreatment::Informational);
        prop_assert_eq!(
            informational.net,
            deducted.net + deducted.cbs_amount + deducted.ibs_amount
        );
    }

    #[test]
    fn prop_rates_survive_save_and_load(cbs_rate in arb_any_rate(), ibs_rate in arb_any_rate()) {
        let rates = RateSet { cbs_rate, ibs_rate };
        let path = std::env::temp_dir().join(format!("payroll-prop-{}.json", uuid::Uuid::new_v4()));
        let store = RateStore::new(&path);

        let saved = store.save(&rates);
        prop_assert_eq!(saved.is_ok(), rates.validate().is_ok());
        if saved.is_ok() {
            let loaded = store.try_load().unwrap();
            std::fs::remove_file(&path).unwrap();
            prop_assert_eq!(loaded, rates);
        } else {
            prop_assert!(!path.exists());
        }
    }
}

#[test]
fn salary_at_max_amount_is_calculated() {
    let result = payroll(
        MAX_AMOUNT,
        &RateSet::new(MAX_RATE, MAX_RATE).unwrap(),
        ConsumptionTaxTreatment::Deducted,
    );
    assert!(result.net < Decimal::ZERO);
}

#[test]
fn zero_salary_gives_zero_net() {
    let result = payroll(
        Decimal::ZERO,
        &RateSet::default(),
        ConsumptionTaxTreatment::Deducted,
    );
    assert_eq!(result.net, Decimal::ZERO);
    assert_eq!(result.total_deductions(), Decimal::ZERO);
}

#[test]
fn inss_is_continuous_across_bracket_bounds() {
    let cent = Decimal::new(1, 2);
    for bracket in INSS_2025.brackets {
        let Some(bound) = bracket.upper_bound else {
            continue;
        };
        let at = calculate_inss(bound, &INSS_2025, 1);
        let above = calculate_inss(bound + cent, &INSS_2025, 1);
        assert_eq!(above.slices.len(), at.slices.len() + 1, "bound {}", bound);
        assert!(above.total - at.total <= cent, "bound {}", bound);
    }
}

#[test]
fn irrf_is_continuous_across_bracket_bounds() {
    let cent = Decimal::new(1, 2);
    for bracket in CURRENT_TABLES.irrf.brackets {
        let Some(bound) = bracket.upper_bound else {
            continue;
        };
        let (i, _) = CURRENT_TABLES.irrf.find(bound).unwrap();
        let (j, _) = CURRENT_TABLES.irrf.find(bound + cent).unwrap();
        assert_eq!(j, i + 1, "bound {}", bound);
    }
}
