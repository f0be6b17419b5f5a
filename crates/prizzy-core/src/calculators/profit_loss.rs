use serde::{Deserialize, Serialize};

use super::{money, parse_number, PIP_VALUE_PER_LOT};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitLossInputs {
    /// Signed pips gained (positive) or lost (negative).
    pub pips: String,
    pub lot_size: String,
}

impl Default for ProfitLossInputs {
    fn default() -> Self {
        Self {
            pips: "50".to_string(),
            lot_size: "0.10".to_string(),
        }
    }
}

/// How a profit/loss figure should be coloured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Gain,
    Loss,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfitLossOutput {
    pub value: String,
    pub tone: Tone,
}

impl ProfitLossInputs {
    pub fn compute(&self) -> ProfitLossOutput {
        let (Some(pips), Some(lots)) = (parse_number(&self.pips), parse_number(&self.lot_size))
        else {
            return ProfitLossOutput {
                value: money(0.0),
                tone: Tone::Neutral,
            };
        };

        let result = pips * lots * PIP_VALUE_PER_LOT;
        ProfitLossOutput {
            value: money(result),
            tone: if result >= 0.0 { Tone::Gain } else { Tone::Loss },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(pips: &str, lot_size: &str) -> ProfitLossInputs {
        ProfitLossInputs {
            pips: pips.to_string(),
            lot_size: lot_size.to_string(),
        }
    }

    #[test]
    fn test_gain() {
        let out = inputs("50", "0.10").compute();
        assert_eq!(out.value, "$50.00");
        assert_eq!(out.tone, Tone::Gain);
    }

    #[test]
    fn test_loss() {
        let out = inputs("-25", "0.10").compute();
        assert_eq!(out.value, "$-25.00");
        assert_eq!(out.tone, Tone::Loss);
    }

    #[test]
    fn test_zero_is_gain_tone() {
        let out = inputs("0", "1").compute();
        assert_eq!(out.value, "$0.00");
        assert_eq!(out.tone, Tone::Gain);
    }

    #[test]
    fn test_negative_zero_prints_as_zero() {
        let out = inputs("-0", "1").compute();
        assert_eq!(out.value, "$0.00");
        assert_eq!(out.tone, Tone::Gain);
    }

    #[test]
    fn test_half_cent_loss_rounds_away_from_zero() {
        // -1 pip * 0.0125 lots * 10 = -0.125
        let out = inputs("-1", "0.0125").compute();
        assert_eq!(out.value, "$-0.13");
        assert_eq!(out.tone, Tone::Loss);
    }

    #[test]
    fn test_invalid_is_neutral() {
        for (pips, lots) in [("", "0.1"), ("50", "lots"), ("NaN", "1")] {
            let out = inputs(pips, lots).compute();
            assert_eq!(out.value, "$0.00");
            assert_eq!(out.tone, Tone::Neutral);
        }
    }
}
