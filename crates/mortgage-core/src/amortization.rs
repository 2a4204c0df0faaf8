//! Repayment schedules for a single loan leg.
//!
//! Two methods: 等额本息 (fixed total payment) and 等额本金 (fixed monthly
//! principal). Principals are in yuan, rates are annual percentages. All
//! math in `rust_decimal::Decimal`.

use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::MortgageError;
use crate::types::{Money, Rate};
use crate::MortgageResult;

/// Scale between yuan and the 万元 reporting unit.
pub const TEN_THOUSAND: Decimal = dec!(10000);

const MONTHS_PER_YEAR: Decimal = dec!(12);
const HUNDRED: Decimal = dec!(100);

/// First/last month figures for an equal-principal schedule.
///
/// Payments are in yuan; `total_interest` is already scaled to 万元.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EqualPrincipalBreakdown {
    pub first_month: Money,
    pub last_month: Money,
    pub monthly_decrease: Money,
    pub total_interest: Money,
}

/// Fixed monthly payment under 等额本息.
///
/// payment = P·r·(1+r)^n / ((1+r)^n − 1) with r the monthly rate. A zero
/// rate degenerates the closed form, so it falls back to straight
/// principal division, P/n.
pub fn equal_interest_payment(
    principal: Money,
    annual_rate_percent: Rate,
    periods: u32,
) -> MortgageResult<Money> {
    check_periods(periods)?;
    check_rate(annual_rate_percent)?;

    let rate = monthly_rate(annual_rate_percent);
    if rate.is_zero() {
        return Ok(principal / Decimal::from(periods));
    }

    let factor = (Decimal::ONE + rate).powi(periods as i64);
    Ok(principal * rate * factor / (factor - Decimal::ONE))
}

/// First month, last month, monthly decrease and total interest under
/// 等额本金.
///
/// Total interest is an explicit month-by-month sum, month 0 accruing on
/// the full principal. The last-month figure charges interest on one
/// final principal installment rather than on the true remaining balance;
/// that simplification is part of the published schedule and is kept.
pub fn equal_principal_breakdown(
    principal: Money,
    annual_rate_percent: Rate,
    periods: u32,
) -> MortgageResult<EqualPrincipalBreakdown> {
    check_periods(periods)?;
    check_rate(annual_rate_percent)?;

    let rate = monthly_rate(annual_rate_percent);
    let monthly_principal = principal / Decimal::from(periods);

    let mut total_interest = Decimal::ZERO;
    for month in 0..periods {
        total_interest += (principal - Decimal::from(month) * monthly_principal) * rate;
    }

    Ok(EqualPrincipalBreakdown {
        first_month: monthly_principal + principal * rate,
        last_month: monthly_principal + monthly_principal * rate,
        monthly_decrease: monthly_principal * rate,
        total_interest: total_interest / TEN_THOUSAND,
    })
}

fn monthly_rate(annual_rate_percent: Rate) -> Rate {
    annual_rate_percent / HUNDRED / MONTHS_PER_YEAR
}

fn check_periods(periods: u32) -> MortgageResult<()> {
    if periods == 0 {
        return Err(MortgageError::InvalidInput {
            field: "periods".into(),
            reason: "repayment term must cover at least one month".into(),
        });
    }
    Ok(())
}

fn check_rate(annual_rate_percent: Rate) -> MortgageResult<()> {
    if annual_rate_percent < Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "annual_rate_percent".into(),
            reason: "interest rate cannot be negative".into(),
        });
    }
    Ok(())
}
