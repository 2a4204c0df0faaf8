use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates and ratios as configured: raw percentages (3.1 = 3.1%), divided
/// by 100 at the point of use.
pub type Rate = Decimal;

/// Repayment method for a loan schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepaymentMethod {
    /// 等额本息: fixed total monthly payment for the whole term.
    EqualInterest,
    /// 等额本金: fixed monthly principal, total payment decaying linearly.
    EqualPrincipal,
}
