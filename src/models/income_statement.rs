//! Income statement (DRE) models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;

use super::RateSet;
use super::payroll::ensure_amount;

/// Revenue and cost totals for one income-statement period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncomeStatementInput {
    /// Revenue from product sales.
    pub product_revenue: Decimal,
    /// Revenue from services rendered.
    pub service_revenue: Decimal,
    /// Direct costs (cost of goods sold).
    pub direct_costs: Decimal,
    /// Indirect operating costs.
    pub indirect_costs: Decimal,
    /// Payroll cost (salaries plus benefits).
    pub payroll_cost: Decimal,
}

impl IncomeStatementInput {
    /// Rejects negative or out-of-range totals.
    pub fn validate(&self) -> EngineResult<()> {
        ensure_amount("product_revenue", self.product_revenue)?;
        ensure_amount("service_revenue", self.service_revenue)?;
        ensure_amount("direct_costs", self.direct_costs)?;
        ensure_amount("indirect_costs", self.indirect_costs)?;
        ensure_amount("payroll_cost", self.payroll_cost)
    }
}

/// The simulated income statement with CBS/IBS charged on gross revenue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeStatement {
    /// Product plus service revenue.
    pub gross_revenue: Decimal,
    /// Simulated CBS on gross revenue.
    pub cbs: Decimal,
    /// Simulated IBS on gross revenue.
    pub ibs: Decimal,
    /// Gross revenue minus CBS and IBS.
    pub net_revenue: Decimal,
    /// Cost of goods sold (direct costs).
    pub cost_of_goods_sold: Decimal,
    /// Net revenue minus cost of goods sold.
    pub gross_profit: Decimal,
    /// Indirect costs plus payroll.
    pub operating_expenses: Decimal,
    /// Gross profit minus operating expenses.
    pub operating_result: Decimal,
    /// Operating result; profit taxes are not simulated.
    pub net_profit: Decimal,
    /// Net profit as a percentage of gross revenue.
    pub margin_percent: Decimal,
    /// The rates used for CBS/IBS.
    pub rates: RateSet,
}
