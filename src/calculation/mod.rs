//! Calculation logic for the payroll engine.
//!
//! This module contains the versioned INSS/IRRF bracket tables, the
//! progressive INSS contribution, IRRF withholding, the CBS/IBS simulation,
//! the payroll orchestration that combines them, and the income-statement
//! simulation.

mod consumption_tax;
mod income_statement;
mod inss;
mod irrf;
mod money;
mod payroll;
mod tables;

pub use consumption_tax::{
    CONSUMPTION_TAX_REF, ConsumptionTaxResult, simulate_consumption_taxes,
};
pub use income_statement::calculate_income_statement;
pub use inss::{InssResult, calculate_inss};
pub use irrf::{IrrfDeductions, IrrfResult, calculate_irrf};
pub use money::{format_brl, percent_of, round_money};
pub use payroll::calculate_payroll;
pub use tables::{
    CURRENT_TABLES, FGTS_RATE, INSS_2025, IRRF_2025_05, IRRF_DEPENDENT_ALLOWANCE, TaxBracket,
    TaxTable, TaxTables,
};
