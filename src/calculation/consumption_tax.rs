//! CBS/IBS consumption-tax simulation.
//!
//! Both taxes are flat percentages of a base amount. The figures are
//! simulations for planning only.

use rust_decimal::Decimal;

use crate::models::{AuditStep, RateSet};

use super::money::{format_brl, percent_of};

/// Reference used in audit steps for the simulated taxes.
pub const CONSUMPTION_TAX_REF: &str = "LC nº 214/2025 (simulação)";

/// The simulated CBS and IBS amounts on a base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsumptionTaxResult {
    /// CBS amount, rounded to cents.
    pub cbs: Decimal,
    /// IBS amount, rounded to cents.
    pub ibs: Decimal,
    /// The audit step recording this simulation.
    pub audit_step: AuditStep,
}

impl ConsumptionTaxResult {
    /// CBS plus IBS.
    pub fn total(&self) -> Decimal {
        self.cbs + self.ibs
    }
}

/// Simulates CBS and IBS as `base * rate / 100` each.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::simulate_consumption_taxes;
/// use payroll_engine::models::RateSet;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let rates = RateSet::new(dec("0.9"), dec("2.0")).unwrap();
/// let result = simulate_consumption_taxes(dec("5000"), &rates, 1);
/// assert_eq!(result.cbs, dec("45.00"));
/// assert_eq!(result.ibs, dec("100.00"));
/// ```
pub fn simulate_consumption_taxes(
    base: Decimal,
    rates: &RateSet,
    step_number: u32,
) -> ConsumptionTaxResult {
    let cbs = percent_of(base, rates.cbs_rate);
    let ibs = percent_of(base, rates.ibs_rate);

    let audit_step = AuditStep {
        step_number,
        rule_id: "consumption_tax_simulation".to_string(),
        rule_name: "CBS/IBS Simulation".to_string(),
        legal_ref: CONSUMPTION_TAX_REF.to_string(),
        input: serde_json::json!({
            "base": base.to_string(),
            "cbs_rate": rates.cbs_rate.to_string(),
            "ibs_rate": rates.ibs_rate.to_string()
        }),
        output: serde_json::json!({
            "cbs": cbs.to_string(),
            "ibs": ibs.to_string()
        }),
        reasoning: format!(
            "CBS {}% and IBS {}% ({}% combined) of {}: {} + {}",
            rates.cbs_rate.normalize(),
            rates.ibs_rate.normalize(),
            rates.combined().normalize(),
            format_brl(base),
            format_brl(cbs),
            format_brl(ibs)
        ),
    };

    ConsumptionTaxResult {
        cbs,
        ibs,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_reduced_rates_on_five_thousand() {
        let rates = RateSet::new(dec("0.9"), dec("2.0")).unwrap();
        let result = simulate_consumption_taxes(dec("5000"), &rates, 1);
        assert_eq!(result.cbs, dec("45.00"));
        assert_eq!(result.ibs, dec("100.00"));
        assert_eq!(result.total(), dec("145.00"));
    }

    #[test]
    fn test_default_rates() {
        let result = simulate_consumption_taxes(dec("1000"), &RateSet::default(), 1);
        assert_eq!(result.cbs, dec("120.00"));
        assert_eq!(result.ibs, dec("80.00"));
    }

    #[test]
    fn test_zero_base() {
        let result = simulate_consumption_taxes(Decimal::ZERO, &RateSet::default(), 1);
        assert_eq!(result.total(), Decimal::ZERO);
    }

    #[test]
    fn test_rounds_to_cents() {
        // 1234.56 * 0.9% = 11.11104
        let rates = RateSet::new(dec("0.9"), Decimal::ZERO).unwrap();
        let result = simulate_consumption_taxes(dec("1234.56"), &rates, 1);
        assert_eq!(result.cbs, dec("11.11"));
    }

    #[test]
    fn test_audit_step_mentions_rates() {
        let rates = RateSet::new(dec("0.9"), dec("2.0")).unwrap();
        let result = simulate_consumption_taxes(dec("5000"), &rates, 4);
        assert_eq!(result.audit_step.step_number, 4);
        assert!(result.audit_step.reasoning.contains("CBS 0.9%"));
        assert!(result.audit_step.reasoning.contains("IBS 2%"));
        assert!(result.audit_step.reasoning.contains("2.9% combined"));
    }
}
