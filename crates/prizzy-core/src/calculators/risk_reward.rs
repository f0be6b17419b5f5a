use serde::{Deserialize, Serialize};

use super::{fixed2, parse_number};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskRewardInputs {
    pub stop_loss_pips: String,
    pub take_profit_pips: String,
}

impl Default for RiskRewardInputs {
    fn default() -> Self {
        Self {
            stop_loss_pips: "20".to_string(),
            take_profit_pips: "60".to_string(),
        }
    }
}

impl RiskRewardInputs {
    /// Ratio rendered as `1 : <reward per unit of risk>`, or `Invalid`.
    pub fn compute(&self) -> String {
        match (
            parse_number(&self.stop_loss_pips),
            parse_number(&self.take_profit_pips),
        ) {
            (Some(stop_loss), Some(take_profit)) if stop_loss > 0.0 => {
                format!("1 : {}", fixed2(take_profit / stop_loss))
            }
            _ => "Invalid".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(stop_loss: &str, take_profit: &str) -> RiskRewardInputs {
        RiskRewardInputs {
            stop_loss_pips: stop_loss.to_string(),
            take_profit_pips: take_profit.to_string(),
        }
    }

    #[test]
    fn test_ratio() {
        assert_eq!(inputs("20", "60").compute(), "1 : 3.00");
        assert_eq!(inputs("30", "45").compute(), "1 : 1.50");
    }

    #[test]
    fn test_ratio_ties_round_up() {
        assert_eq!(inputs("8", "9").compute(), "1 : 1.13");
        assert_eq!(inputs("8", "1").compute(), "1 : 0.13");
    }

    #[test]
    fn test_zero_stop_loss_is_invalid_whatever_the_target() {
        for take_profit in ["60", "0", "-10", "", "abc"] {
            assert_eq!(inputs("0", take_profit).compute(), "Invalid");
        }
    }

    #[test]
    fn test_non_numeric_is_invalid() {
        assert_eq!(inputs("-5", "60").compute(), "Invalid");
        assert_eq!(inputs("20", "").compute(), "Invalid");
        assert_eq!(inputs("sl", "60").compute(), "Invalid");
    }
}
