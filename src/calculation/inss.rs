//! INSS employee contribution.
//!
//! This module computes the progressive INSS contribution: each bracket's
//! marginal rate applies only to the slice of salary inside that bracket.

use rust_decimal::Decimal;

use crate::models::{AuditStep, InssSlice};

use super::money::{format_brl, round_money};
use super::tables::TaxTable;

/// The result of an INSS calculation, including the audit step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InssResult {
    /// Total contribution (sum of the rounded slices).
    pub total: Decimal,
    /// Contribution per bracket slice, in bracket order.
    pub slices: Vec<InssSlice>,
    /// True when the salary exceeds the contribution ceiling.
    pub above_ceiling: bool,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the progressive INSS contribution for a monthly salary.
///
/// Each slice is rounded to cents before summing. A salary exactly at a
/// bracket's upper bound is fully taxed at that bracket's rate; the next
/// bracket only starts a cent above it.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{calculate_inss, INSS_2025};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let result = calculate_inss(Decimal::from_str("5000").unwrap(), &INSS_2025, 1);
/// assert_eq!(result.total, Decimal::from_str("509.59").unwrap());
/// assert_eq!(result.slices.len(), 4);
/// ```
pub fn calculate_inss(salary: Decimal, table: &TaxTable, step_number: u32) -> InssResult {
    let mut slices = Vec::new();
    let mut total = Decimal::ZERO;

    for bracket in table.brackets {
        if salary <= bracket.lower_bound {
            break;
        }
        let top = match bracket.upper_bound {
            Some(upper) => salary.min(upper),
            None => salary,
        };
        let taxable = top - bracket.lower_bound;
        let amount = round_money(taxable * bracket.rate);
        total += amount;
        slices.push(InssSlice {
            from: bracket.lower_bound,
            to: bracket.upper_bound,
            rate: bracket.rate,
            taxable,
            amount,
        });
    }

    let above_ceiling = table.ceiling().is_some_and(|ceiling| salary > ceiling);

    let reasoning = if salary.is_zero() {
        "Zero salary, no INSS contribution".to_string()
    } else {
        let parts: Vec<String> = slices
            .iter()
            .filter(|s| !s.rate.is_zero())
            .map(|s| {
                format!(
                    "{} x {}% = {}",
                    format_brl(s.taxable),
                    (s.rate * Decimal::ONE_HUNDRED).normalize(),
                    format_brl(s.amount)
                )
            })
            .collect();
        let mut text = format!(
            "Progressive INSS on {}: {} (total {})",
            format_brl(salary),
            parts.join(" + "),
            format_brl(total)
        );
        if above_ceiling {
            text.push_str("; salary above contribution ceiling");
        }
        text
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "inss_progressive".to_string(),
        rule_name: "INSS Progressive Contribution".to_string(),
        legal_ref: table.legal_ref.to_string(),
        input: serde_json::json!({
            "salary": salary.to_string(),
            "table": table.version
        }),
        output: serde_json::json!({
            "total": total.to_string(),
            "slices": slices.len(),
            "above_ceiling": above_ceiling
        }),
        reasoning,
    };

    InssResult {
        total,
        slices,
        above_ceiling,
        audit_step,
    }
}
