//! IRRF income-tax withholding.
//!
//! IRRF uses the "parcela a deduzir" method: the whole taxable base is taxed
//! at the rate of the bracket containing it, minus that bracket's deduction
//! constant.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{AuditStep, IrrfDetail};

use super::money::{format_brl, round_money};
use super::tables::TaxTable;

/// The result of an IRRF calculation, including the audit step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IrrfResult {
    /// Tax withheld, floored at zero.
    pub amount: Decimal,
    /// How the amount was derived.
    pub detail: IrrfDetail,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Everything subtracted from gross salary before the IRRF lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IrrfDeductions {
    /// INSS contribution already computed for the salary.
    pub inss: Decimal,
    /// Other deductions (e.g. alimony) entered with the payroll.
    pub other: Decimal,
    /// Number of dependents.
    pub dependents: u32,
    /// Allowance per dependent.
    pub allowance_per_dependent: Decimal,
}

/// Calculates the IRRF withholding on a monthly salary.
///
/// The taxable base is `salary - inss - other - dependents * allowance`,
/// floored at zero and rounded to cents. The withholding is
/// `max(base * rate - deduction, 0)` for the bracket containing the base.
///
/// Returns `TableError` only if the table has no bracket for the base.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{calculate_irrf, IrrfDeductions, IRRF_2025_05};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let deductions = IrrfDeductions {
///     inss: dec("509.59"),
///     other: Decimal::ZERO,
///     dependents: 0,
///     allowance_per_dependent: dec("189.59"),
/// };
/// let result = calculate_irrf(dec("5000"), &deductions, &IRRF_2025_05, 2).unwrap();
/// assert_eq!(result.detail.base, dec("4490.41"));
/// assert_eq!(result.amount, dec("334.85"));
/// ```
pub fn calculate_irrf(
    salary: Decimal,
    deductions: &IrrfDeductions,
    table: &TaxTable,
    step_number: u32,
) -> EngineResult<IrrfResult> {
    let dependents_allowance =
        Decimal::from(deductions.dependents) * deductions.allowance_per_dependent;
    let raw_base = salary - deductions.inss - deductions.other - dependents_allowance;
    let base = round_money(raw_base.max(Decimal::ZERO));

    let (index, bracket) = table.find(base)?;
    let amount = round_money((base * bracket.rate - bracket.deduction).max(Decimal::ZERO));

    let reasoning = if bracket.rate.is_zero() {
        format!(
            "Taxable base {} falls in the exempt bracket, no IRRF withheld",
            format_brl(base)
        )
    } else {
        format!(
            "Taxable base {} falls in bracket {} ({}%): {} x {}% - {} = {}",
            format_brl(base),
            index + 1,
            (bracket.rate * Decimal::ONE_HUNDRED).normalize(),
            format_brl(base),
            (bracket.rate * Decimal::ONE_HUNDRED).normalize(),
            format_brl(bracket.deduction),
            format_brl(amount)
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "irrf_bracket".to_string(),
        rule_name: "IRRF Withholding".to_string(),
        legal_ref: table.legal_ref.to_string(),
        input: serde_json::json!({
            "salary": salary.to_string(),
            "inss": deductions.inss.to_string(),
            "other_deductions": deductions.other.to_string(),
            "dependents": deductions.dependents,
            "table": table.version
        }),
        output: serde_json::json!({
            "base": base.to_string(),
            "bracket": index + 1,
            "rate": bracket.rate.to_string(),
            "deduction_constant": bracket.deduction.to_string(),
            "amount": amount.to_string()
        }),
        reasoning,
    };

    Ok(IrrfResult {
        amount,
        detail: IrrfDetail {
            base,
            rate: bracket.rate,
            deduction_constant: bracket.deduction,
            dependents_allowance,
        },
        audit_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::tables::{IRRF_2025_05, IRRF_DEPENDENT_ALLOWANCE};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn deductions(inss: &str, other: &str, dependents: u32) -> IrrfDeductions {
        IrrfDeductions {
            inss: dec(inss),
            other: dec(other),
            dependents,
            allowance_per_dependent: IRRF_DEPENDENT_ALLOWANCE,
        }
    }

    #[test]
    fn test_zero_salary_withholds_nothing() {
        let result = calculate_irrf(Decimal::ZERO, &deductions("0", "0", 0), &IRRF_2025_05, 1)
            .unwrap();
        assert_eq!(result.amount, Decimal::ZERO);
        assert_eq!(result.detail.base, Decimal::ZERO);
    }

    #[test]
    fn test_exempt_bracket() {
        let result = calculate_irrf(dec("2500"), &deductions("196.54", "0", 0), &IRRF_2025_05, 1)
            .unwrap();
        assert_eq!(result.detail.base, dec("2303.46"));
        assert_eq!(result.amount, Decimal::ZERO);
        assert!(result.audit_step.reasoning.contains("exempt"));
    }

    #[test]
    fn test_five_thousand_without_dependents() {
        // base 4490.41 * 22.5% - 675.49 = 334.85225
        let result = calculate_irrf(dec("5000"), &deductions("509.59", "0", 0), &IRRF_2025_05, 1)
            .unwrap();
        assert_eq!(result.detail.base, dec("4490.41"));
        assert_eq!(result.detail.rate, dec("0.225"));
        assert_eq!(result.detail.deduction_constant, dec("675.49"));
        assert_eq!(result.amount, dec("334.85"));
    }

    #[test]
    fn test_dependents_reduce_the_base() {
        // base 4490.41 - 2 * 189.59 = 4111.23; 4111.23 * 22.5% - 675.49 = 249.53675
        let result = calculate_irrf(dec("5000"), &deductions("509.59", "0", 2), &IRRF_2025_05, 1)
            .unwrap();
        assert_eq!(result.detail.dependents_allowance, dec("379.18"));
        assert_eq!(result.detail.base, dec("4111.23"));
        assert_eq!(result.amount, dec("249.54"));
    }

    #[test]
    fn test_top_bracket() {
        // base 10000 - 951.63 = 9048.37; * 27.5% - 908.73 = 1579.57175
        let result = calculate_irrf(dec("10000"), &deductions("951.63", "0", 0), &IRRF_2025_05, 1)
            .unwrap();
        assert_eq!(result.detail.base, dec("9048.37"));
        assert_eq!(result.amount, dec("1579.57"));
    }

    #[test]
    fn test_deductions_larger_than_salary_floor_base_at_zero() {
        let result = calculate_irrf(dec("1000"), &deductions("75.00", "2000", 3), &IRRF_2025_05, 1)
            .unwrap();
        assert_eq!(result.detail.base, Decimal::ZERO);
        assert_eq!(result.amount, Decimal::ZERO);
    }

    #[test]
    fn test_base_at_bracket_upper_bound_uses_that_bracket() {
        // base exactly 2826.65 stays in the 7.5% bracket: 2826.65 * 0.075 - 182.16 = 29.83875
        let result = calculate_irrf(dec("2826.65"), &deductions("0", "0", 0), &IRRF_2025_05, 1)
            .unwrap();
        assert_eq!(result.detail.rate, dec("0.075"));
        assert_eq!(result.amount, dec("29.84"));
    }

    #[test]
    fn test_audit_step_fields() {
        let result = calculate_irrf(dec("5000"), &deductions("509.59", "0", 0), &IRRF_2025_05, 2)
            .unwrap();
        assert_eq!(result.audit_step.step_number, 2);
        assert_eq!(result.audit_step.rule_id, "irrf_bracket");
        assert_eq!(result.audit_step.output["bracket"], 4);
        assert_eq!(result.audit_step.output["amount"], "334.85");
    }
}
