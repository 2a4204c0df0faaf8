//! Configuration loading: `key = value` text into validated [`LoanParameters`].

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::MortgageError;
use crate::types::{Money, Rate};
use crate::MortgageResult;

/// Keys accepted in a configuration file. Anything else fails the parse.
const RECOGNIZED_KEYS: [&str; 14] = [
    "house_price",
    "down_payment_ratio",
    "fund_loan_amount",
    "fund_loan_rate",
    "commercial_loan_rate",
    "deed_tax_rate",
    "loan_years",
    "agent_fee_ratio",
    "hard_deco",
    "whole_house_custom",
    "doors_and_windows",
    "soft_furnishings",
    "appliance",
    "miscellaneous",
];

/// Validated loan parameters for one purchase.
///
/// Amounts are in 万元 unless noted; ratios and rates are raw percentages
/// (30 = 30%). Decoration line items are in yuan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanParameters {
    pub house_price: Money,
    pub down_payment_ratio: Rate,
    pub fund_loan_amount: Money,
    pub fund_loan_rate: Rate,
    pub commercial_loan_rate: Rate,
    pub deed_tax_rate: Rate,
    pub agent_fee_ratio: Rate,
    pub loan_years: u32,
    pub hard_deco: Money,
    pub whole_house_custom: Money,
    pub doors_and_windows: Money,
    pub soft_furnishings: Money,
    pub appliance: Money,
    pub miscellaneous: Money,
}

impl LoanParameters {
    /// Derive the pure-commercial variant: the housing-fund leg drops to
    /// zero and the commercial loan absorbs the full loan amount.
    pub fn commercial_only(&self) -> Self {
        Self {
            fund_loan_amount: Decimal::ZERO,
            ..self.clone()
        }
    }

    /// Total decoration cost across all line items, in 万元.
    pub fn decoration_total(&self) -> Money {
        (self.hard_deco
            + self.whole_house_custom
            + self.doors_and_windows
            + self.soft_furnishings
            + self.appliance
            + self.miscellaneous)
            / dec!(10000)
    }
}

/// Read and parse a configuration file.
pub fn load_config(path: &Path) -> MortgageResult<LoanParameters> {
    let text = fs::read_to_string(path)?;
    parse_config(&text)
}

/// Parse `key = value` configuration text into validated parameters.
///
/// Blank lines and lines starting with `#` are skipped. Each remaining
/// line must contain exactly one `=` and a decimal value. A key repeated
/// later in the file overrides the earlier value.
pub fn parse_config(text: &str) -> MortgageResult<LoanParameters> {
    let mut values: HashMap<&str, Decimal> = HashMap::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = line.split('=').collect();
        if parts.len() != 2 {
            return Err(parse_error(idx, line, "expected exactly one `=` separator"));
        }

        let key = parts[0].trim();
        let Some(&canonical) = RECOGNIZED_KEYS.iter().find(|&&k| k == key) else {
            return Err(parse_error(idx, line, &format!("unrecognized key `{key}`")));
        };

        let value = parts[1]
            .trim()
            .parse::<Decimal>()
            .map_err(|_| parse_error(idx, line, &format!("value for `{key}` is not a number")))?;

        values.insert(canonical, value);
    }

    build_parameters(&values)
}

fn parse_error(idx: usize, line: &str, reason: &str) -> MortgageError {
    MortgageError::ParseError {
        line: idx + 1,
        content: line.to_string(),
        reason: reason.to_string(),
    }
}

fn build_parameters(values: &HashMap<&str, Decimal>) -> MortgageResult<LoanParameters> {
    let require = |key: &str| {
        values
            .get(key)
            .copied()
            .ok_or_else(|| MortgageError::MissingParameter(key.to_string()))
    };

    let params = LoanParameters {
        house_price: require("house_price")?,
        down_payment_ratio: require("down_payment_ratio")?,
        fund_loan_amount: require("fund_loan_amount")?,
        fund_loan_rate: require("fund_loan_rate")?,
        commercial_loan_rate: require("commercial_loan_rate")?,
        deed_tax_rate: require("deed_tax_rate")?,
        agent_fee_ratio: require("agent_fee_ratio")?,
        loan_years: whole_years(require("loan_years")?)?,
        hard_deco: require("hard_deco")?,
        whole_house_custom: require("whole_house_custom")?,
        doors_and_windows: require("doors_and_windows")?,
        soft_furnishings: require("soft_furnishings")?,
        appliance: require("appliance")?,
        miscellaneous: require("miscellaneous")?,
    };

    validate(&params)?;
    Ok(params)
}

fn whole_years(value: Decimal) -> MortgageResult<u32> {
    let invalid = |reason: &str| MortgageError::InvalidInput {
        field: "loan_years".into(),
        reason: reason.into(),
    };

    if value <= Decimal::ZERO {
        return Err(invalid("loan term must be positive"));
    }
    if !value.fract().is_zero() {
        return Err(invalid("loan term must be a whole number of years"));
    }
    value.to_u32().ok_or_else(|| invalid("loan term is out of range"))
}

fn validate(params: &LoanParameters) -> MortgageResult<()> {
    let amounts = [
        ("house_price", params.house_price),
        ("down_payment_ratio", params.down_payment_ratio),
        ("fund_loan_amount", params.fund_loan_amount),
        ("fund_loan_rate", params.fund_loan_rate),
        ("commercial_loan_rate", params.commercial_loan_rate),
        ("deed_tax_rate", params.deed_tax_rate),
        ("agent_fee_ratio", params.agent_fee_ratio),
        ("hard_deco", params.hard_deco),
        ("whole_house_custom", params.whole_house_custom),
        ("doors_and_windows", params.doors_and_windows),
        ("soft_furnishings", params.soft_furnishings),
        ("appliance", params.appliance),
        ("miscellaneous", params.miscellaneous),
    ];

    for (field, value) in amounts {
        if value < Decimal::ZERO {
            return Err(MortgageError::InvalidInput {
                field: field.into(),
                reason: "must be non-negative".into(),
            });
        }
    }

    if params.down_payment_ratio > dec!(100) {
        return Err(MortgageError::InvalidInput {
            field: "down_payment_ratio".into(),
            reason: "down payment ratio cannot exceed 100%".into(),
        });
    }

    Ok(())
}
