//! Income statement (DRE) simulation.
//!
//! CBS and IBS are charged on gross revenue; payroll joins indirect costs as
//! an operating expense.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{IncomeStatement, IncomeStatementInput, RateSet};

use super::money::{percent_of, round_money};

/// Builds the simulated income statement for a period.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_income_statement;
/// use payroll_engine::models::{IncomeStatementInput, RateSet};
/// use rust_decimal::Decimal;
///
/// let input = IncomeStatementInput {
///     service_revenue: Decimal::from(10_000),
///     ..Default::default()
/// };
/// let statement = calculate_income_statement(&input, &RateSet::default()).unwrap();
/// assert_eq!(statement.net_revenue, Decimal::from(8_000));
/// ```
pub fn calculate_income_statement(
    input: &IncomeStatementInput,
    rates: &RateSet,
) -> EngineResult<IncomeStatement> {
    input.validate()?;
    rates.validate()?;

    let gross_revenue = input.product_revenue + input.service_revenue;
    let cbs = percent_of(gross_revenue, rates.cbs_rate);
    let ibs = percent_of(gross_revenue, rates.ibs_rate);
    let net_revenue = gross_revenue - cbs - ibs;
    let gross_profit = net_revenue - input.direct_costs;
    let operating_expenses = input.indirect_costs + input.payroll_cost;
    let operating_result = gross_profit - operating_expenses;
    let net_profit = operating_result;

    let margin_percent = if gross_revenue.is_zero() {
        Decimal::ZERO
    } else {
        round_money(net_profit / gross_revenue * Decimal::ONE_HUNDRED)
    };

    Ok(IncomeStatement {
        gross_revenue,
        cbs,
        ibs,
        net_revenue,
        cost_of_goods_sold: input.direct_costs,
        gross_profit,
        operating_expenses,
        operating_result,
        net_profit,
        margin_percent,
        rates: *rates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_full_statement() {
        let input = IncomeStatementInput {
            product_revenue: dec("6000"),
            service_revenue: dec("4000"),
            direct_costs: dec("2500"),
            indirect_costs: dec("1000"),
            payroll_cost: dec("3000"),
        };
        let statement = calculate_income_statement(&input, &RateSet::default()).unwrap();

        assert_eq!(statement.gross_revenue, dec("10000"));
        assert_eq!(statement.cbs, dec("1200.00"));
        assert_eq!(statement.ibs, dec("800.00"));
        assert_eq!(statement.net_revenue, dec("8000"));
        assert_eq!(statement.gross_profit, dec("5500"));
        assert_eq!(statement.operating_expenses, dec("4000"));
        assert_eq!(statement.operating_result, dec("1500"));
        assert_eq!(statement.net_profit, dec("1500"));
        assert_eq!(statement.margin_percent, dec("15.00"));
    }

    #[test]
    fn test_zero_revenue_has_zero_margin() {
        let input = IncomeStatementInput {
            indirect_costs: dec("500"),
            ..Default::default()
        };
        let statement = calculate_income_statement(&input, &RateSet::default()).unwrap();
        assert_eq!(statement.net_profit, dec("-500"));
        assert_eq!(statement.margin_percent, Decimal::ZERO);
    }

    #[test]
    fn test_loss_gives_negative_margin() {
        let input = IncomeStatementInput {
            service_revenue: dec("1000"),
            payroll_cost: dec("1500"),
            ..Default::default()
        };
        let statement = calculate_income_statement(&input, &RateSet::default()).unwrap();
        // 1000 - 200 - 1500 = -700
        assert_eq!(statement.net_profit, dec("-700"));
        assert_eq!(statement.margin_percent, dec("-70.00"));
    }

    #[test]
    fn test_revenue_above_max_amount_is_rejected() {
        let input = IncomeStatementInput {
            product_revenue: dec("79228162514264337593543950335"),
            ..Default::default()
        };
        match calculate_income_statement(&input, &RateSet::default()) {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "product_revenue"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_cost_is_rejected() {
        let input = IncomeStatementInput {
            direct_costs: dec("-1"),
            ..Default::default()
        };
        match calculate_income_statement(&input, &RateSet::default()) {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "direct_costs"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }
}
