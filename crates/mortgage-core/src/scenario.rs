//! Scenario aggregation: one complete financial picture per
//! (loan mix, repayment method) pair.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::amortization::{self, TEN_THOUSAND};
use crate::config::LoanParameters;
use crate::error::MortgageError;
use crate::types::{Money, Rate, RepaymentMethod};
use crate::MortgageResult;

/// Scenario names in run order: the combined loan first, then the
/// pure-commercial family, each under both repayment methods.
pub const SCENARIO_NAMES: [&str; 4] = [
    "组合贷款方案-等额本息",
    "组合贷款方案-等额本金",
    "纯商业贷款方案-等额本息",
    "纯商业贷款方案-等额本金",
];

/// Method-specific repayment figures. Payments in yuan, interest in 万元.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum MethodFigures {
    EqualInterest {
        monthly_payment: Money,
        total_interest: Money,
    },
    EqualPrincipal {
        first_month: Money,
        last_month: Money,
        monthly_decrease: Money,
        total_interest: Money,
    },
}

impl MethodFigures {
    /// Total interest paid over the full term, in 万元.
    pub fn total_interest(&self) -> Money {
        match *self {
            MethodFigures::EqualInterest { total_interest, .. }
            | MethodFigures::EqualPrincipal { total_interest, .. } => total_interest,
        }
    }
}

/// One fully aggregated scenario.
///
/// Amounts are in 万元 unless a field says otherwise; the down-payment
/// ratio and the loan shares are fractions of one. Values stay numeric
/// until [`ScenarioResult::rows`] formats them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub house_price: Money,
    pub down_payment_ratio: Rate,
    pub down_payment: Money,
    pub total_loan: Money,
    pub fund_loan: Money,
    pub commercial_loan: Money,
    pub fund_loan_share: Rate,
    pub commercial_loan_share: Rate,
    pub fund_loan_rate: Rate,
    pub commercial_loan_rate: Rate,
    pub loan_years: u32,
    pub deed_tax: Money,
    pub agent_fee: Money,
    pub decoration_cost: Money,
    /// Principal plus interest over the whole term.
    pub total_loan_payment: Money,
    pub budget_without_decoration: Money,
    pub budget_with_decoration: Money,
    pub expense_without_decoration: Money,
    pub expense_with_decoration: Money,
    pub figures: MethodFigures,
}

/// Aggregate one scenario from validated parameters.
pub fn build_scenario(
    params: &LoanParameters,
    method: RepaymentMethod,
) -> MortgageResult<ScenarioResult> {
    let down_payment_ratio = params.down_payment_ratio / dec!(100);
    let down_payment = params.house_price * down_payment_ratio;
    let total_loan = params.house_price - down_payment;

    if total_loan <= Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "total_loan".into(),
            reason: "down payment covers the full price, nothing left to finance".into(),
        });
    }

    let commercial_loan = total_loan - params.fund_loan_amount;
    if commercial_loan < Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "fund_loan_amount".into(),
            reason: "housing-fund loan exceeds the total loan amount".into(),
        });
    }

    let periods = params.loan_years * 12;
    let figures = match method {
        RepaymentMethod::EqualInterest => equal_interest_figures(params, commercial_loan, periods)?,
        RepaymentMethod::EqualPrincipal => {
            equal_principal_figures(params, commercial_loan, periods)?
        }
    };

    let total_loan_payment = total_loan + figures.total_interest();

    let deed_tax = params.house_price * params.deed_tax_rate / dec!(100);
    let agent_fee = params.house_price * params.agent_fee_ratio / dec!(100);
    let decoration_cost = params.decoration_total();

    let budget_without_decoration = down_payment + deed_tax + agent_fee;
    let budget_with_decoration = budget_without_decoration + decoration_cost;
    let expense_without_decoration = budget_without_decoration + total_loan_payment;
    let expense_with_decoration = budget_with_decoration + total_loan_payment;

    Ok(ScenarioResult {
        house_price: params.house_price,
        down_payment_ratio,
        down_payment,
        total_loan,
        fund_loan: params.fund_loan_amount,
        commercial_loan,
        fund_loan_share: params.fund_loan_amount / total_loan,
        commercial_loan_share: commercial_loan / total_loan,
        fund_loan_rate: params.fund_loan_rate,
        commercial_loan_rate: params.commercial_loan_rate,
        loan_years: params.loan_years,
        deed_tax,
        agent_fee,
        decoration_cost,
        total_loan_payment,
        budget_without_decoration,
        budget_with_decoration,
        expense_without_decoration,
        expense_with_decoration,
        figures,
    })
}

/// Build all four scenarios in run order. The pure-commercial pair uses a
/// derived parameter set with the housing-fund leg zeroed.
pub fn build_report(params: &LoanParameters) -> MortgageResult<Vec<(String, ScenarioResult)>> {
    let commercial_only = params.commercial_only();

    Ok(vec![
        (
            SCENARIO_NAMES[0].to_string(),
            build_scenario(params, RepaymentMethod::EqualInterest)?,
        ),
        (
            SCENARIO_NAMES[1].to_string(),
            build_scenario(params, RepaymentMethod::EqualPrincipal)?,
        ),
        (
            SCENARIO_NAMES[2].to_string(),
            build_scenario(&commercial_only, RepaymentMethod::EqualInterest)?,
        ),
        (
            SCENARIO_NAMES[3].to_string(),
            build_scenario(&commercial_only, RepaymentMethod::EqualPrincipal)?,
        ),
    ])
}

fn equal_interest_figures(
    params: &LoanParameters,
    commercial_loan: Money,
    periods: u32,
) -> MortgageResult<MethodFigures> {
    let fund_principal = params.fund_loan_amount * TEN_THOUSAND;
    let commercial_principal = commercial_loan * TEN_THOUSAND;

    let fund_payment =
        amortization::equal_interest_payment(fund_principal, params.fund_loan_rate, periods)?;
    let commercial_payment = amortization::equal_interest_payment(
        commercial_principal,
        params.commercial_loan_rate,
        periods,
    )?;

    // Interest per leg is backed out of the payment, not re-simulated.
    let months = Decimal::from(periods);
    let fund_interest = (fund_payment * months - fund_principal) / TEN_THOUSAND;
    let commercial_interest = (commercial_payment * months - commercial_principal) / TEN_THOUSAND;

    Ok(MethodFigures::EqualInterest {
        monthly_payment: fund_payment + commercial_payment,
        total_interest: fund_interest + commercial_interest,
    })
}

fn equal_principal_figures(
    params: &LoanParameters,
    commercial_loan: Money,
    periods: u32,
) -> MortgageResult<MethodFigures> {
    let fund = amortization::equal_principal_breakdown(
        params.fund_loan_amount * TEN_THOUSAND,
        params.fund_loan_rate,
        periods,
    )?;
    let commercial = amortization::equal_principal_breakdown(
        commercial_loan * TEN_THOUSAND,
        params.commercial_loan_rate,
        periods,
    )?;

    Ok(MethodFigures::EqualPrincipal {
        first_month: fund.first_month + commercial.first_month,
        last_month: fund.last_month + commercial.last_month,
        monthly_decrease: fund.monthly_decrease + commercial.monthly_decrease,
        total_interest: fund.total_interest + commercial.total_interest,
    })
}

impl ScenarioResult {
    /// Label/value pairs in report order. This order is the contract for
    /// every render target.
    pub fn rows(&self) -> Vec<(String, String)> {
        let mut rows = vec![
            ("房屋总价(万元)", amount(self.house_price)),
            ("首付比例", percent(self.down_payment_ratio)),
            ("首付款(万元)", amount(self.down_payment)),
            ("贷款金额(万元)", amount(self.total_loan)),
            ("公积金贷款金额(万元)", amount(self.fund_loan)),
            ("商业贷款金额(万元)", amount(self.commercial_loan)),
            ("公积金贷款比例", percent(self.fund_loan_share)),
            ("商业贷款比例", percent(self.commercial_loan_share)),
            ("公积金贷款利率", rate(self.fund_loan_rate)),
            ("商业贷款利率", rate(self.commercial_loan_rate)),
            ("贷款期限(年)", self.loan_years.to_string()),
            ("契税(万元)", amount(self.deed_tax)),
            ("中介费(万元)", amount(self.agent_fee)),
            ("装修费(万元)", amount(self.decoration_cost)),
            ("贷款总支付金额(万元)", amount(self.total_loan_payment)),
            ("总预算不带装修(万元)", amount(self.budget_without_decoration)),
            ("总预算带装修(万元)", amount(self.budget_with_decoration)),
            (
                "总花费带利息不带装修（万元）",
                amount(self.expense_without_decoration),
            ),
            (
                "总花费带利息带装修（万元）",
                amount(self.expense_with_decoration),
            ),
        ];

        match self.figures {
            MethodFigures::EqualInterest {
                monthly_payment,
                total_interest,
            } => {
                rows.push(("月供(元)", amount(monthly_payment)));
                rows.push(("总支付利息(万元)", amount(total_interest)));
            }
            MethodFigures::EqualPrincipal {
                first_month,
                last_month,
                monthly_decrease,
                total_interest,
            } => {
                rows.push(("首月还款额(元)", amount(first_month)));
                rows.push(("末月还款额(元)", amount(last_month)));
                rows.push(("每月递减金额(元)", amount(monthly_decrease)));
                rows.push(("总支付利息(万元)", amount(total_interest)));
            }
        }

        rows.into_iter()
            .map(|(label, value)| (label.to_string(), value))
            .collect()
    }
}

/// Two-decimal amount, e.g. "210.00".
fn amount(value: Money) -> String {
    format!("{:.2}", value.round_dp(2))
}

/// Fraction of one rendered as a percentage, e.g. 0.3 into "30.00%".
fn percent(value: Rate) -> String {
    format!("{}%", amount(value * dec!(100)))
}

/// Raw percentage value, e.g. 4.9 into "4.90%".
fn rate(value: Rate) -> String {
    format!("{}%", amount(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn params() -> LoanParameters {
        LoanParameters {
            house_price: dec!(300),
            down_payment_ratio: dec!(30),
            fund_loan_amount: dec!(20),
            fund_loan_rate: dec!(3.1),
            commercial_loan_rate: dec!(4.9),
            deed_tax_rate: dec!(1),
            agent_fee_ratio: dec!(1),
            loan_years: 30,
            hard_deco: dec!(60000),
            whole_house_custom: dec!(30000),
            doors_and_windows: dec!(20000),
            soft_furnishings: dec!(15000),
            appliance: dec!(20000),
            miscellaneous: dec!(5000),
        }
    }

    #[test]
    fn test_loan_split_and_shares() {
        let result = build_scenario(&params(), RepaymentMethod::EqualInterest).unwrap();
        assert_eq!(result.down_payment, dec!(90));
        assert_eq!(result.total_loan, dec!(210));
        assert_eq!(result.fund_loan + result.commercial_loan, result.total_loan);
        assert_eq!(
            result.fund_loan_share + result.commercial_loan_share,
            Decimal::ONE
        );
    }

    #[test]
    fn test_budget_totals_stack() {
        let result = build_scenario(&params(), RepaymentMethod::EqualPrincipal).unwrap();
        assert_eq!(result.budget_without_decoration, dec!(96));
        assert_eq!(result.budget_with_decoration, dec!(111));
        assert_eq!(
            result.expense_without_decoration,
            result.budget_without_decoration + result.total_loan_payment
        );
        assert_eq!(
            result.expense_with_decoration,
            result.budget_with_decoration + result.total_loan_payment
        );
    }

    #[test]
    fn test_zero_total_loan_rejected() {
        let mut p = params();
        p.down_payment_ratio = dec!(100);
        assert!(matches!(
            build_scenario(&p, RepaymentMethod::EqualInterest),
            Err(MortgageError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_fund_loan_exceeding_total_rejected() {
        let mut p = params();
        p.fund_loan_amount = dec!(250);
        assert!(matches!(
            build_scenario(&p, RepaymentMethod::EqualPrincipal),
            Err(MortgageError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_rows_order_and_method_block() {
        let ei = build_scenario(&params(), RepaymentMethod::EqualInterest).unwrap();
        let rows = ei.rows();
        assert_eq!(rows[0].0, "房屋总价(万元)");
        assert_eq!(rows[0].1, "300.00");
        assert_eq!(rows[1].1, "30.00%");
        assert_eq!(rows[6].1, "9.52%");
        assert_eq!(rows[10].1, "30");
        assert_eq!(rows[19].0, "月供(元)");
        assert_eq!(rows.last().unwrap().0, "总支付利息(万元)");

        let ep = build_scenario(&params(), RepaymentMethod::EqualPrincipal).unwrap();
        let rows = ep.rows();
        assert_eq!(rows[19].0, "首月还款额(元)");
        assert_eq!(rows[22].0, "总支付利息(万元)");
        assert_eq!(rows.len(), 23);
    }
}
