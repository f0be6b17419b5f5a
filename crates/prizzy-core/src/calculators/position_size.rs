use serde::{Deserialize, Serialize};

use super::{fixed2, grouped_integer, money, parse_positive, PIP_VALUE_PER_LOT, UNITS_PER_LOT};
use crate::pair::CurrencyPair;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionSizeInputs {
    pub account_balance: String,
    pub risk_percentage: String,
    pub stop_loss_pips: String,
    pub pair: CurrencyPair,
}

impl Default for PositionSizeInputs {
    fn default() -> Self {
        Self {
            account_balance: "10000".to_string(),
            risk_percentage: "1".to_string(),
            stop_loss_pips: "20".to_string(),
            pair: CurrencyPair::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionSizeOutput {
    pub lot_size: String,
    pub risk_amount: String,
    pub position_size: String,
}

impl Default for PositionSizeOutput {
    fn default() -> Self {
        Self {
            lot_size: "0.00".to_string(),
            risk_amount: "$0.00".to_string(),
            position_size: "0".to_string(),
        }
    }
}

impl PositionSizeInputs {
    /// Lot size that risks `risk_percentage` of the balance over the stop.
    pub fn compute(&self) -> PositionSizeOutput {
        let (Some(balance), Some(risk), Some(stop_loss)) = (
            parse_positive(&self.account_balance),
            parse_positive(&self.risk_percentage),
            parse_positive(&self.stop_loss_pips),
        ) else {
            return PositionSizeOutput::default();
        };

        let risk_amount = balance * (risk / 100.0);
        let lot_size = risk_amount / (stop_loss * PIP_VALUE_PER_LOT);

        PositionSizeOutput {
            lot_size: fixed2(lot_size),
            risk_amount: money(risk_amount),
            position_size: format!("{} units", grouped_integer(lot_size * UNITS_PER_LOT)),
        }
    }
}
