//! Payroll input and result models.
//!
//! This module contains the [`PayrollInput`] accepted by the calculator and
//! the [`PayrollResult`] breakdown it produces.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::{AuditTrace, RateSet};

/// How the simulated CBS/IBS amounts affect net pay.
///
/// # Example
///
/// ```
/// use payroll_engine::models::ConsumptionTaxTreatment;
///
/// assert_eq!(ConsumptionTaxTreatment::default(), ConsumptionTaxTreatment::Deducted);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsumptionTaxTreatment {
    /// CBS and IBS are subtracted from net pay.
    #[default]
    Deducted,
    /// CBS and IBS are reported but leave net pay untouched.
    Informational,
}

impl ConsumptionTaxTreatment {
    /// Returns true if CBS/IBS reduce net pay.
    pub fn reduces_net(self) -> bool {
        self == Self::Deducted
    }
}

/// The salary data for one payroll calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollInput {
    /// Monthly gross salary (salário bruto).
    pub gross_salary: Decimal,
    /// Number of IRRF dependents.
    #[serde(default)]
    pub dependents: u32,
    /// Other deductions subtracted from both the IRRF base and net pay.
    #[serde(default)]
    pub other_deductions: Decimal,
    /// Benefits added to total earnings (not subject to INSS/IRRF here).
    #[serde(default)]
    pub benefits: Decimal,
}

impl PayrollInput {
    /// Creates an input with only a gross salary.
    pub fn from_gross(gross_salary: Decimal) -> Self {
        Self {
            gross_salary,
            dependents: 0,
            other_deductions: Decimal::ZERO,
            benefits: Decimal::ZERO,
        }
    }

    /// Rejects negative or out-of-range monetary fields before any
    /// calculation runs.
    pub fn validate(&self) -> EngineResult<()> {
        ensure_amount("gross_salary", self.gross_salary)?;
        ensure_amount("other_deductions", self.other_deductions)?;
        ensure_amount("benefits", self.benefits)
    }
}

/// The largest monetary amount accepted as input (10^15).
///
/// Keeps every product and sum in the calculators well inside `Decimal`'s
/// range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

pub(crate) fn ensure_amount(field: &str, value: Decimal) -> EngineResult<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(EngineError::InvalidInput {
            field: field.to_string(),
            message: format!("must not be negative (got {})", value),
        });
    }
    if value > MAX_AMOUNT {
        return Err(EngineError::InvalidInput {
            field: field.to_string(),
            message: format!("must not exceed {} (got {})", MAX_AMOUNT, value),
        });
    }
    Ok(())
}

/// The INSS contribution on one bracket's slice of the salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InssSlice {
    /// Lower bound of the bracket.
    pub from: Decimal,
    /// Upper bound of the bracket (`None` above the contribution ceiling).
    pub to: Option<Decimal>,
    /// Marginal rate applied to the slice.
    pub rate: Decimal,
    /// Portion of the salary inside this bracket.
    pub taxable: Decimal,
    /// Contribution for this slice, rounded to cents.
    pub amount: Decimal,
}

/// How the IRRF withholding was derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrrfDetail {
    /// Taxable base after INSS, other deductions and dependents.
    pub base: Decimal,
    /// Marginal rate of the bracket containing the base.
    pub rate: Decimal,
    /// Deduction constant (parcela a deduzir) of that bracket.
    pub deduction_constant: Decimal,
    /// Total allowance for dependents.
    pub dependents_allowance: Decimal,
}

/// The versions of the bracket tables a result was computed with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableVersions {
    /// INSS table version label.
    pub inss: String,
    /// IRRF table version label.
    pub irrf: String,
}

/// The full payroll breakdown for one salary.
///
/// Net pay is `gross + benefits - inss - irrf - other_deductions`, minus
/// `cbs + ibs` when [`ConsumptionTaxTreatment::Deducted`] applies. FGTS is
/// an employer deposit and never reduces net pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollResult {
    /// Monthly gross salary.
    pub gross: Decimal,
    /// Benefits added on top of the salary.
    pub benefits: Decimal,
    /// Gross salary plus benefits.
    pub total_earnings: Decimal,
    /// Total INSS contribution.
    pub inss_deduction: Decimal,
    /// Per-bracket INSS contributions.
    pub inss_slices: Vec<InssSlice>,
    /// IRRF withheld.
    pub irrf_deduction: Decimal,
    /// How the IRRF figure was derived.
    pub irrf: IrrfDetail,
    /// Other deductions supplied with the input.
    pub other_deductions: Decimal,
    /// Simulated CBS amount.
    pub cbs_amount: Decimal,
    /// Simulated IBS amount.
    pub ibs_amount: Decimal,
    /// Employer FGTS deposit (informational).
    pub fgts_deposit: Decimal,
    /// Net pay.
    pub net: Decimal,
    /// The rates used for CBS/IBS.
    pub rates: RateSet,
    /// Whether CBS/IBS were subtracted from net pay.
    pub consumption_tax_treatment: ConsumptionTaxTreatment,
    /// Bracket table versions applied.
    pub table_versions: TableVersions,
    /// Audit trace of every rule applied.
    pub audit_trace: AuditTrace,
}

impl PayrollResult {
    /// Sum of every amount withheld from the employee, CBS/IBS included
    /// only when they reduce net pay.
    pub fn total_deductions(&self) -> Decimal {
        let mut total = self.inss_deduction + self.irrf_deduction + self.other_deductions;
        if self.consumption_tax_treatment.reduces_net() {
            total += self.cbs_amount + self.ibs_amount;
        }
        total
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
    fn test_deserialize_minimal_input_defaults_optional_fields() {
        let input: PayrollInput = serde_json::from_str(r#"{"gross_salary": "5000.00"}"#).unwrap();
        assert_eq!(input.gross_salary, dec("5000.00"));
        assert_eq!(input.dependents, 0);
        assert_eq!(input.other_deductions, Decimal::ZERO);
        assert_eq!(input.benefits, Decimal::ZERO);
    }

    #[test]
    fn test_non_numeric_salary_fails_to_deserialize() {
        let result: Result<PayrollInput, _> = serde_json::from_str(r#"{"gross_salary": "abc"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_negative_salary_is_rejected() {
        let input = PayrollInput::from_gross(dec("-1"));
        match input.validate() {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "gross_salary"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_benefits_are_rejected() {
        let mut input = PayrollInput::from_gross(dec("1000"));
        input.benefits = dec("-10");
        match input.validate() {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "benefits"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_max_amount_is_ten_to_the_fifteenth() {
        assert_eq!(MAX_AMOUNT, dec("1000000000000000"));
    }

    #[test]
    fn test_salary_above_max_amount_is_rejected() {
        let input = PayrollInput::from_gross(dec("10000000000000000000000000000"));
        match input.validate() {
            Err(EngineError::InvalidInput { field, message }) => {
                assert_eq!(field, "gross_salary");
                assert!(message.contains("must not exceed"));
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
        assert!(PayrollInput::from_gross(MAX_AMOUNT).validate().is_ok());
    }

    #[test]
    fn test_zero_salary_is_valid() {
        assert!(PayrollInput::from_gross(Decimal::ZERO).validate().is_ok());
    }

    #[test]
    fn test_treatment_serialization() {
        assert_eq!(
            serde_json::to_string(&ConsumptionTaxTreatment::Informational).unwrap(),
            "\"informational\""
        );
        let treatment: ConsumptionTaxTreatment = serde_json::from_str("\"deducted\"").unwrap();
        assert!(treatment.reduces_net());
    }
}
