use serde::{Deserialize, Serialize};

use super::{money, parse_positive, PIP_VALUE_PER_LOT};
use crate::pair::CurrencyPair;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipValueInputs {
    pub pair: CurrencyPair,
    pub lot_size: String,
}

impl Default for PipValueInputs {
    fn default() -> Self {
        Self {
            pair: CurrencyPair::default(),
            lot_size: "1.0".to_string(),
        }
    }
}

impl PipValueInputs {
    pub fn compute(&self) -> String {
        match parse_positive(&self.lot_size) {
            Some(lots) => money(lots * PIP_VALUE_PER_LOT),
            None => money(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_lots(lot_size: &str) -> PipValueInputs {
        PipValueInputs {
            lot_size: lot_size.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_pip_value() {
        assert_eq!(with_lots("1.0").compute(), "$10.00");
        assert_eq!(with_lots("2.5").compute(), "$25.00");
        assert_eq!(with_lots("0.01").compute(), "$0.10");
    }

    #[test]
    fn test_half_cent_rounds_up() {
        assert_eq!(with_lots("0.0125").compute(), "$0.13");
    }

    #[test]
    fn test_non_positive_or_garbage_is_zero() {
        assert_eq!(with_lots("0").compute(), "$0.00");
        assert_eq!(with_lots("-1").compute(), "$0.00");
        assert_eq!(with_lots("lots").compute(), "$0.00");
        assert_eq!(with_lots("").compute(), "$0.00");
    }
}
