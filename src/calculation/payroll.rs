//! Payroll calculation.
//!
//! [`calculate_payroll`] chains the individual rules (INSS, IRRF, CBS/IBS,
//! FGTS) into one [`PayrollResult`], recording an audit step per rule.

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::EngineResult;
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, ConsumptionTaxTreatment, PayrollInput, PayrollResult,
    RateSet, TableVersions,
};

use super::consumption_tax::simulate_consumption_taxes;
use super::inss::calculate_inss;
use super::irrf::{IrrfDeductions, calculate_irrf};
use super::money::{format_brl, round_money};
use super::tables::TaxTables;

/// Calculates the full payroll breakdown for one salary.
///
/// The input is validated first; negative amounts and out-of-range rates are
/// rejected before any rule runs. The calculation itself is deterministic.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{calculate_payroll, CURRENT_TABLES};
/// use payroll_engine::models::{ConsumptionTaxTreatment, PayrollInput, RateSet};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let rates = RateSet::new(dec("0.9"), dec("2.0")).unwrap();
/// let result = calculate_payroll(
///     &PayrollInput::from_gross(dec("5000")),
///     &rates,
///     ConsumptionTaxTreatment::Deducted,
///     &CURRENT_TABLES,
/// )
/// .unwrap();
///
/// assert_eq!(result.inss_deduction, dec("509.59"));
/// assert_eq!(result.irrf_deduction, dec("334.85"));
/// assert_eq!(result.net, dec("4010.56"));
/// ```
pub fn calculate_payroll(
    input: &PayrollInput,
    rates: &RateSet,
    treatment: ConsumptionTaxTreatment,
    tables: &TaxTables,
) -> EngineResult<PayrollResult> {
    input.validate()?;
    rates.validate()?;

    let mut trace = AuditTrace::default();
    let gross = input.gross_salary;

    let inss = calculate_inss(gross, &tables.inss, trace.next_step_number());
    trace.steps.push(inss.audit_step.clone());
    if inss.above_ceiling {
        trace.warnings.push(AuditWarning {
            code: "INSS_CEILING_REACHED".to_string(),
            message: format!(
                "Salary {} exceeds the INSS contribution ceiling; contribution is capped",
                format_brl(gross)
            ),
            severity: "info".to_string(),
        });
    }

    let deductions = IrrfDeductions {
        inss: inss.total,
        other: input.other_deductions,
        dependents: input.dependents,
        allowance_per_dependent: tables.irrf_dependent_allowance,
    };
    let irrf = calculate_irrf(gross, &deductions, &tables.irrf, trace.next_step_number())?;
    trace.steps.push(irrf.audit_step.clone());

    let consumption = simulate_consumption_taxes(gross, rates, trace.next_step_number());
    trace.steps.push(consumption.audit_step.clone());
    if !consumption.total().is_zero() {
        trace.warnings.push(AuditWarning {
            code: "CONSUMPTION_TAX_SIMULATED".to_string(),
            message: "CBS/IBS amounts are simulations, not legally binding figures".to_string(),
            severity: "low".to_string(),
        });
    }

    let fgts_deposit = round_money(gross * tables.fgts_rate);
    trace.steps.push(AuditStep {
        step_number: trace.next_step_number(),
        rule_id: "fgts_deposit".to_string(),
        rule_name: "FGTS Employer Deposit".to_string(),
        legal_ref: "Lei nº 8.036/1990, art. 15".to_string(),
        input: serde_json::json!({
            "salary": gross.to_string(),
            "rate": tables.fgts_rate.to_string()
        }),
        output: serde_json::json!({ "fgts_deposit": fgts_deposit.to_string() }),
        reasoning: format!(
            "Employer deposits {} to FGTS; informational, not deducted from net pay",
            format_brl(fgts_deposit)
        ),
    });

    let total_earnings = gross + input.benefits;
    let mut net = total_earnings - inss.total - irrf.amount - input.other_deductions;
    if treatment.reduces_net() {
        net -= consumption.total();
    }
    let net = round_money(net);

    trace.steps.push(AuditStep {
        step_number: trace.next_step_number(),
        rule_id: "net_pay".to_string(),
        rule_name: "Net Pay".to_string(),
        legal_ref: "CLT art. 462".to_string(),
        input: serde_json::json!({
            "total_earnings": total_earnings.to_string(),
            "inss": inss.total.to_string(),
            "irrf": irrf.amount.to_string(),
            "other_deductions": input.other_deductions.to_string(),
            "consumption_taxes": consumption.total().to_string(),
            "consumption_tax_treatment": treatment
        }),
        output: serde_json::json!({ "net": net.to_string() }),
        reasoning: match treatment {
            ConsumptionTaxTreatment::Deducted => format!(
                "Net pay {} after INSS, IRRF, other deductions and simulated CBS/IBS",
                format_brl(net)
            ),
            ConsumptionTaxTreatment::Informational => format!(
                "Net pay {} after INSS, IRRF and other deductions; CBS/IBS shown for information only",
                format_brl(net)
            ),
        },
    });

    debug!(
        gross = %gross,
        inss = %inss.total,
        irrf = %irrf.amount,
        net = %net,
        "Payroll calculated"
    );

    Ok(PayrollResult {
        gross,
        benefits: input.benefits,
        total_earnings,
        inss_deduction: inss.total,
        inss_slices: inss.slices,
        irrf_deduction: irrf.amount,
        irrf: irrf.detail,
        other_deductions: input.other_deductions,
        cbs_amount: consumption.cbs,
        ibs_amount: consumption.ibs,
        fgts_deposit,
        net,
        rates: *rates,
        consumption_tax_treatment: treatment,
        table_versions: TableVersions {
            inss: tables.inss.version.to_string(),
            irrf: tables.irrf.version.to_string(),
        },
        audit_trace: trace,
    })
}
