use serde::{Deserialize, Serialize};

/// Currency pairs offered by the calculator selectors.
///
/// The selection is for display only; every formula assumes the quote
/// currency is the account currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CurrencyPair {
    #[default]
    #[serde(rename = "EUR/USD")]
    EurUsd,
    #[serde(rename = "GBP/USD")]
    GbpUsd,
    #[serde(rename = "USD/JPY")]
    UsdJpy,
    #[serde(rename = "USD/CHF")]
    UsdChf,
    #[serde(rename = "AUD/USD")]
    AudUsd,
    #[serde(rename = "USD/CAD")]
    UsdCad,
    #[serde(rename = "NZD/USD")]
    NzdUsd,
    #[serde(rename = "EUR/GBP")]
    EurGbp,
    #[serde(rename = "EUR/JPY")]
    EurJpy,
    #[serde(rename = "GBP/JPY")]
    GbpJpy,
}

impl CurrencyPair {
    pub const ALL: [CurrencyPair; 10] = [
        CurrencyPair::EurUsd,
        CurrencyPair::GbpUsd,
        CurrencyPair::UsdJpy,
        CurrencyPair::UsdChf,
        CurrencyPair::AudUsd,
        CurrencyPair::UsdCad,
        CurrencyPair::NzdUsd,
        CurrencyPair::EurGbp,
        CurrencyPair::EurJpy,
        CurrencyPair::GbpJpy,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CurrencyPair::EurUsd => "EUR/USD",
            CurrencyPair::GbpUsd => "GBP/USD",
            CurrencyPair::UsdJpy => "USD/JPY",
            CurrencyPair::UsdChf => "USD/CHF",
            CurrencyPair::AudUsd => "AUD/USD",
            CurrencyPair::UsdCad => "USD/CAD",
            CurrencyPair::NzdUsd => "NZD/USD",
            CurrencyPair::EurGbp => "EUR/GBP",
            CurrencyPair::EurJpy => "EUR/JPY",
            CurrencyPair::GbpJpy => "GBP/JPY",
        }
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|p| p == self).unwrap_or(0)
    }

    /// Next pair in the selector, wrapping to the first.
    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous pair in the selector, wrapping to the last.
    pub fn prev(&self) -> Self {
        let len = Self::ALL.len();
        Self::ALL[(self.index() + len - 1) % len]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_wraps() {
        assert_eq!(CurrencyPair::EurUsd.next(), CurrencyPair::GbpUsd);
        assert_eq!(CurrencyPair::GbpJpy.next(), CurrencyPair::EurUsd);
        assert_eq!(CurrencyPair::EurUsd.prev(), CurrencyPair::GbpJpy);
    }

    #[test]
    fn test_serializes_as_label() {
        let json = serde_json::to_string(&CurrencyPair::UsdJpy).unwrap();
        assert_eq!(json, "\"USD/JPY\"");
        let pair: CurrencyPair = serde_json::from_str("\"EUR/GBP\"").unwrap();
        assert_eq!(pair, CurrencyPair::EurGbp);
    }
}
