//! Signal records: the classifier's output, one per indicator rule.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Three-way recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Buy,
    Sell,
    Neutral,
}

/// Language used for action labels in rendered output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Fr,
}

impl Action {
    /// Buy when `value > reference`, Sell when below, Neutral on equality.
    ///
    /// Any NaN operand yields Neutral.
    pub fn above_is_buy(value: f64, reference: f64) -> Self {
        if value > reference {
            Action::Buy
        } else if value < reference {
            Action::Sell
        } else {
            Action::Neutral
        }
    }

    pub fn label(self, language: Language) -> &'static str {
        match (self, language) {
            (Action::Buy, Language::En) => "Buy",
            (Action::Sell, Language::En) => "Sell",
            (Action::Neutral, Language::En) => "Neutral",
            (Action::Buy, Language::Fr) => "Acheter",
            (Action::Sell, Language::Fr) => "Vendre",
            (Action::Neutral, Language::Fr) => "Neutre",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label(Language::En))
    }
}

/// The value shown next to a signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SignalValue {
    Number { value: f64 },
    Bands { upper: f64, lower: f64 },
    /// Indicator window not filled yet.
    Undefined,
}

impl SignalValue {
    /// Wraps a number, mapping NaN to `Undefined`.
    pub fn number(value: f64) -> Self {
        if value.is_nan() {
            SignalValue::Undefined
        } else {
            SignalValue::Number { value }
        }
    }
}

impl fmt::Display for SignalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalValue::Number { value } => write!(f, "{value:.2}"),
            SignalValue::Bands { upper, lower } => {
                write!(f, "Upper: {upper:.2}, Lower: {lower:.2}")
            }
            SignalValue::Undefined => f.write_str("n/a"),
        }
    }
}

/// One classified indicator (or valuation method).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub name: String,
    pub value: SignalValue,
    pub action: Action,
}

impl Signal {
    pub fn new(name: impl Into<String>, value: SignalValue, action: Action) -> Self {
        Self {
            name: name.into(),
            value,
            action,
        }
    }
}

/// Buy/Sell/Neutral tally over a list of signals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalSummary {
    pub buy: usize,
    pub sell: usize,
    pub neutral: usize,
}

impl SignalSummary {
    pub fn from_signals(signals: &[Signal]) -> Self {
        signals.iter().fold(Self::default(), |mut acc, s| {
            match s.action {
                Action::Buy => acc.buy += 1,
                Action::Sell => acc.sell += 1,
                Action::Neutral => acc.neutral += 1,
            }
            acc
        })
    }

    pub fn total(&self) -> usize {
        self.buy + self.sell + self.neutral
    }

    /// Majority action; ties between Buy and Sell, or a Neutral majority, give Neutral.
    pub fn consensus(&self) -> Action {
        if self.buy > self.sell && self.buy > self.neutral {
            Action::Buy
        } else if self.sell > self.buy && self.sell > self.neutral {
            Action::Sell
        } else {
            Action::Neutral
        }
    }
}

/// A named valuation-method estimate for one security.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationEstimate {
    pub method_name: String,
    pub estimated_value: f64,
}
