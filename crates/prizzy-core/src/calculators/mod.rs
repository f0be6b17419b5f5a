//! Forex risk calculators.
//!
//! Each calculator is a plain input struct holding the raw field text plus a
//! pure `compute` that derives its display output. Inputs never fail: text
//! that doesn't parse degrades to the calculator's neutral output.

pub mod pip_value;
pub mod position_size;
pub mod profit_loss;
pub mod risk_reward;

pub use pip_value::PipValueInputs;
pub use position_size::{PositionSizeInputs, PositionSizeOutput};
pub use profit_loss::{ProfitLossInputs, ProfitLossOutput, Tone};
pub use risk_reward::RiskRewardInputs;

use serde::{Deserialize, Serialize};

/// Value of one pip for one standard lot, in account currency.
pub const PIP_VALUE_PER_LOT: f64 = 10.0;

/// Base-currency units in one standard lot.
pub const UNITS_PER_LOT: f64 = 100_000.0;

/// All four calculators as shown together on the calculators screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculatorSet {
    pub position_size: PositionSizeInputs,
    pub profit_loss: ProfitLossInputs,
    pub risk_reward: RiskRewardInputs,
    pub pip_value: PipValueInputs,
}

/// Parse a numeric field. Blank, non-numeric and non-finite text is `None`.
pub fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a field that must be strictly positive.
pub fn parse_positive(text: &str) -> Option<f64> {
    parse_number(text).filter(|v| *v > 0.0)
}

/// Two decimal places, ties rounded away from zero. Negative zero prints as `0.00`.
pub(crate) fn fixed2(value: f64) -> String {
    let value = value + 0.0;
    format!("{:.2}", (value * 100.0).round() / 100.0)
}

pub(crate) fn money(value: f64) -> String {
    format!("${}", fixed2(value))
}

/// Round to the nearest integer and group thousands with commas.
pub(crate) fn grouped_integer(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(" 12.5 "), Some(12.5));
        assert_eq!(parse_number("-25"), Some(-25.0));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_positive("0"), None);
        assert_eq!(parse_positive("-1"), None);
    }

    #[test]
    fn test_grouped_integer() {
        assert_eq!(grouped_integer(0.0), "0");
        assert_eq!(grouped_integer(999.0), "999");
        assert_eq!(grouped_integer(50_000.0), "50,000");
        assert_eq!(grouped_integer(1_234_567.4), "1,234,567");
        assert_eq!(grouped_integer(33_333.5), "33,334");
    }

    #[test]
    fn test_fixed2_rounds_ties_away_from_zero() {
        assert_eq!(fixed2(1.125), "1.13");
        assert_eq!(fixed2(0.125), "0.13");
        assert_eq!(fixed2(-0.125), "-0.13");
        assert_eq!(fixed2(2.5), "2.50");
        assert_eq!(fixed2(-0.0), "0.00");
    }

    #[test]
    fn test_money() {
        assert_eq!(money(10.0), "$10.00");
        assert_eq!(money(-25.0), "$-25.00");
    }

    #[test]
    fn test_default_set_matches_form_defaults() {
        let set = CalculatorSet::default();
        assert_eq!(set.position_size.compute().lot_size, "0.50");
        assert_eq!(set.profit_loss.compute().value, "$50.00");
        assert_eq!(set.risk_reward.compute(), "1 : 3.00");
        assert_eq!(set.pip_value.compute(), "$10.00");
    }
}
