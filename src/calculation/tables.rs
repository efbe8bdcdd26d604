//! Versioned INSS and IRRF bracket tables.
//!
//! Official tables change every year (INSS follows the minimum wage, IRRF
//! follows legislation). Each table is a constant record carrying a version
//! label and effective date so a new table is a data change, not a code
//! change. Add the new table below and point [`CURRENT_TABLES`] at it.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{EngineError, EngineResult};

const fn money(cents: u32) -> Decimal {
    Decimal::from_parts(cents, 0, 0, false, 2)
}

const fn rate(value: u32, scale: u32) -> Decimal {
    Decimal::from_parts(value, 0, 0, false, scale)
}

/// One bracket of a progressive table.
///
/// A bracket covers `(lower_bound, upper_bound]`; the first bracket also
/// includes zero and the last one has no upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaxBracket {
    /// Exclusive lower bound (inclusive for the first bracket).
    pub lower_bound: Decimal,
    /// Inclusive upper bound, `None` for the open-ended last bracket.
    pub upper_bound: Option<Decimal>,
    /// Marginal rate as a fraction (0.075 for 7.5%).
    pub rate: Decimal,
    /// Deduction constant (parcela a deduzir); zero for INSS.
    pub deduction: Decimal,
}

impl TaxBracket {
    /// Returns true if `value` falls inside this bracket.
    pub fn contains(&self, value: Decimal) -> bool {
        let above_lower = if self.lower_bound.is_zero() {
            value >= Decimal::ZERO
        } else {
            value > self.lower_bound
        };
        above_lower && self.upper_bound.is_none_or(|upper| value <= upper)
    }
}

/// A versioned bracket table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaxTable {
    /// Version label, e.g. `INSS-2025-01`.
    pub version: &'static str,
    /// ISO date from which the table applies.
    pub effective_from: &'static str,
    /// Statute or ordinance that published the table.
    pub legal_ref: &'static str,
    /// Brackets in ascending order.
    pub brackets: &'static [TaxBracket],
}

impl TaxTable {
    /// Finds the single bracket containing `value`.
    ///
    /// Returns `TableError` for negative values or a table with gaps.
    pub fn find(&self, value: Decimal) -> EngineResult<(usize, &TaxBracket)> {
        self.brackets
            .iter()
            .enumerate()
            .find(|(_, b)| b.contains(value))
            .ok_or_else(|| EngineError::TableError {
                table: self.version.to_string(),
                message: format!("no bracket contains {}", value),
            })
    }

    /// Checks the bracket invariants: starts at zero, contiguous,
    /// strictly ascending, and open-ended at the top.
    pub fn validate(&self) -> EngineResult<()> {
        let fail = |message: String| EngineError::TableError {
            table: self.version.to_string(),
            message,
        };

        let first = self
            .brackets
            .first()
            .ok_or_else(|| fail("table has no brackets".to_string()))?;
        if !first.lower_bound.is_zero() {
            return Err(fail(format!(
                "first bracket starts at {} instead of 0",
                first.lower_bound
            )));
        }

        let last_index = self.brackets.len() - 1;
        let mut previous_upper = Decimal::ZERO;
        for (i, bracket) in self.brackets.iter().enumerate() {
            if i > 0 && bracket.lower_bound != previous_upper {
                return Err(fail(format!(
                    "bracket {} starts at {} but previous ends at {}",
                    i, bracket.lower_bound, previous_upper
                )));
            }
            if bracket.rate.is_sign_negative() || bracket.deduction.is_sign_negative() {
                return Err(fail(format!("bracket {} has a negative rate or deduction", i)));
            }
            match bracket.upper_bound {
                Some(upper) if i == last_index => {
                    return Err(fail(format!("last bracket is capped at {}", upper)));
                }
                Some(upper) if upper <= bracket.lower_bound => {
                    return Err(fail(format!("bracket {} is empty or inverted", i)));
                }
                Some(upper) => previous_upper = upper,
                None if i != last_index => {
                    return Err(fail(format!("bracket {} is open-ended but not last", i)));
                }
                None => {}
            }
        }
        Ok(())
    }

    /// The highest finite upper bound (the INSS contribution ceiling).
    pub fn ceiling(&self) -> Option<Decimal> {
        self.brackets.iter().rev().find_map(|b| b.upper_bound)
    }
}

/// The complete set of tables and constants one calculation uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaxTables {
    /// Progressive INSS employee contribution table.
    pub inss: TaxTable,
    /// Monthly IRRF withholding table.
    pub irrf: TaxTable,
    /// IRRF deduction per dependent.
    pub irrf_dependent_allowance: Decimal,
    /// Employer FGTS deposit rate as a fraction.
    pub fgts_rate: Decimal,
}

impl TaxTables {
    /// Validates both bracket tables.
    pub fn validate(&self) -> EngineResult<()> {
        self.inss.validate()?;
        self.irrf.validate()
    }
}

const INSS_2025_BRACKETS: &[TaxBracket] = &[
    TaxBracket {
        lower_bound: Decimal::ZERO,
        upper_bound: Some(money(1_518_00)),
        rate: rate(75, 3),
        deduction: Decimal::ZERO,
    },
    TaxBracket {
        lower_bound: money(1_518_00),
        upper_bound: Some(money(2_793_88)),
        rate: rate(9, 2),
        deduction: Decimal::ZERO,
    },
    TaxBracket {
        lower_bound: money(2_793_88),
        upper_bound: Some(money(4_190_83)),
        rate: rate(12, 2),
        deduction: Decimal::ZERO,
    },
    TaxBracket {
        lower_bound: money(4_190_83),
        upper_bound: Some(money(8_157_41)),
        rate: rate(14, 2),
        deduction: Decimal::ZERO,
    },
    // Above the contribution ceiling nothing more is due.
    TaxBracket {
        lower_bound: money(8_157_41),
        upper_bound: None,
        rate: Decimal::ZERO,
        deduction: Decimal::ZERO,
    },
];

/// INSS employee contribution table effective January 2025.
pub const INSS_2025: TaxTable = TaxTable {
    version: "INSS-2025-01",
    effective_from: "2025-01-01",
    legal_ref: "Portaria Interministerial MPS/MF nº 6/2025",
    brackets: INSS_2025_BRACKETS,
};

const IRRF_2025_05_BRACKETS: &[TaxBracket] = &[
    TaxBracket {
        lower_bound: Decimal::ZERO,
        upper_bound: Some(money(2_428_80)),
        rate: Decimal::ZERO,
        deduction: Decimal::ZERO,
    },
    TaxBracket {
        lower_bound: money(2_428_80),
        upper_bound: Some(money(2_826_65)),
        rate: rate(75, 3),
        deduction: money(182_16),
    },
    TaxBracket {
        lower_bound: money(2_826_65),
        upper_bound: Some(money(3_751_05)),
        rate: rate(15, 2),
        deduction: money(394_16),
    },
    TaxBracket {
        lower_bound: money(3_751_05),
        upper_bound: Some(money(4_664_68)),
        rate: rate(225, 3),
        deduction: money(675_49),
    },
    TaxBracket {
        lower_bound: money(4_664_68),
        upper_bound: None,
        rate: rate(275, 3),
        deduction: money(908_73),
    },
];

/// Monthly IRRF table effective May 2025.
pub const IRRF_2025_05: TaxTable = TaxTable {
    version: "IRRF-2025-05",
    effective_from: "2025-05-01",
    legal_ref: "Lei nº 15.191/2025",
    brackets: IRRF_2025_05_BRACKETS,
};

/// IRRF allowance per dependent (R$ 189,59).
pub const IRRF_DEPENDENT_ALLOWANCE: Decimal = money(189_59);

/// FGTS employer deposit rate (8%).
pub const FGTS_RATE: Decimal = rate(8, 2);

/// The tables in force.
pub const CURRENT_TABLES: TaxTables = TaxTables {
    inss: INSS_2025,
    irrf: IRRF_2025_05,
    irrf_dependent_allowance: IRRF_DEPENDENT_ALLOWANCE,
    fgts_rate: FGTS_RATE,
};
