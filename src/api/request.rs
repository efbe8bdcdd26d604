//! Request types for the payroll engine API.
//!
//! This module defines the JSON request bodies for the `/calculate` and
//! `/income-statement` endpoints. `PUT /rates` takes a bare
//! [`RateSet`](crate::models::RateSet).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{ConsumptionTaxTreatment, IncomeStatementInput, PayrollInput, RateSet};

/// Request body for the `/calculate` endpoint.
///
/// Only `gross_salary` is required. `rates` and `consumption_tax_treatment`
/// apply to this request only and leave the session untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Monthly gross salary.
    pub gross_salary: Decimal,
    /// Number of IRRF dependents.
    #[serde(default)]
    pub dependents: u32,
    /// Other deductions.
    #[serde(default)]
    pub other_deductions: Decimal,
    /// Benefits added to earnings.
    #[serde(default)]
    pub benefits: Decimal,
    /// Rates to use instead of the session rates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rates: Option<RateSet>,
    /// Treatment to use instead of the configured default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumption_tax_treatment: Option<ConsumptionTaxTreatment>,
}

impl CalculationRequest {
    /// Creates a request with only a gross salary.
    pub fn from_gross(gross_salary: Decimal) -> Self {
        Self {
            gross_salary,
            dependents: 0,
            other_deductions: Decimal::ZERO,
            benefits: Decimal::ZERO,
            rates: None,
            consumption_tax_treatment: None,
        }
    }
}

impl From<&CalculationRequest> for PayrollInput {
    fn from(req: &CalculationRequest) -> Self {
        PayrollInput {
            gross_salary: req.gross_salary,
            dependents: req.dependents,
            other_deductions: req.other_deductions,
            benefits: req.benefits,
        }
    }
}

/// Request body for the `/income-statement` endpoint.
///
/// Missing amounts default to zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IncomeStatementRequest {
    /// Revenue from goods.
    pub product_revenue: Decimal,
    /// Revenue from services.
    pub service_revenue: Decimal,
    /// Direct costs (CMV/CSP).
    pub direct_costs: Decimal,
    /// Indirect costs.
    pub indirect_costs: Decimal,
    /// Payroll cost for the period.
    pub payroll_cost: Decimal,
    /// Rates to use instead of the session rates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rates: Option<RateSet>,
}

impl From<&IncomeStatementRequest> for IncomeStatementInput {
    fn from(req: &IncomeStatementRequest) -> Self {
        IncomeStatementInput {
            product_revenue: req.product_revenue,
            service_revenue: req.service_revenue,
            direct_costs: req.direct_costs,
            indirect_costs: req.indirect_costs,
            payroll_cost: req.payroll_cost,
        }
    }
}
