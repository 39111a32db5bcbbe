//! Filter criteria
//!
//! One optional block per category; an absent block leaves that category
//! unconstrained. Criteria are validated once when constructed.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Criteria construction errors
#[derive(Debug, Error)]
pub enum CriteriaError {
    /// Input was blank
    #[error("Filter criteria is empty")]
    Empty,
    /// Input was not valid criteria JSON
    #[error("Unparseable filter criteria: {0}")]
    Parse(#[from] serde_json::Error),
    /// Values parsed but are inconsistent
    #[error("Invalid filter criteria: {0}")]
    Invalid(String),
}

/// Moving-average period that price can be compared against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum MaPeriod {
    Twenty,
    Fifty,
}

impl TryFrom<u32> for MaPeriod {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            20 => Ok(MaPeriod::Twenty),
            50 => Ok(MaPeriod::Fifty),
            other => Err(format!("moving average period must be 20 or 50, got {}", other)),
        }
    }
}

impl From<MaPeriod> for u32 {
    fn from(period: MaPeriod) -> Self {
        match period {
            MaPeriod::Twenty => 20,
            MaPeriod::Fifty => 50,
        }
    }
}

/// Inclusive RSI range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RsiRange {
    pub min: Decimal,
    pub max: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RsiFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub below: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub above: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub between: Option<RsiRange>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MacdFilter {
    #[serde(default)]
    pub bullish: bool,
    #[serde(default)]
    pub bearish: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub histogram_positive: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MaFilter {
    #[serde(default)]
    pub golden_cross: bool,
    #[serde(default)]
    pub death_cross: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub above: Option<MaPeriod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub below: Option<MaPeriod>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BollingerFilter {
    #[serde(default)]
    pub touch_upper: bool,
    #[serde(default)]
    pub touch_lower: bool,
    #[serde(default)]
    pub below_lower: bool,
    #[serde(default)]
    pub above_upper: bool,
    #[serde(default)]
    pub narrow: bool,
    #[serde(default)]
    pub wide: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PriceFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Decimal>,
}

/// Screening criteria; categories are ANDed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rsi: Option<RsiFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub macd: Option<MacdFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ma: Option<MaFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bollinger: Option<BollingerFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<PriceFilter>,
}

impl FilterCriteria {
    /// Criteria that every instrument satisfies
    pub fn unconstrained() -> Self {
        Self::default()
    }

    /// Parse and validate criteria from JSON such as `{"rsi": {"below": 30}}`
    pub fn from_json(input: &str) -> Result<Self, CriteriaError> {
        if input.trim().is_empty() {
            return Err(CriteriaError::Empty);
        }
        let criteria: FilterCriteria = serde_json::from_str(input)?;
        criteria.validate()?;
        Ok(criteria)
    }

    /// Reject values that can never describe a real snapshot
    pub fn validate(&self) -> Result<(), CriteriaError> {
        if let Some(rsi) = &self.rsi {
            let bounds = [rsi.below, rsi.above]
                .into_iter()
                .flatten()
                .chain(rsi.between.iter().flat_map(|r| [r.min, r.max]));
            for value in bounds {
                if value < Decimal::ZERO || value > dec!(100) {
                    return Err(CriteriaError::Invalid(format!(
                        "RSI threshold {} outside 0..=100",
                        value
                    )));
                }
            }
            if let Some(range) = rsi.between {
                if range.min > range.max {
                    return Err(CriteriaError::Invalid(format!(
                        "RSI range min {} exceeds max {}",
                        range.min, range.max
                    )));
                }
            }
        }

        if let Some(price) = &self.price {
            for value in [price.min, price.max].into_iter().flatten() {
                if value < Decimal::ZERO {
                    return Err(CriteriaError::Invalid(format!(
                        "price bound {} is negative",
                        value
                    )));
                }
            }
            if let (Some(min), Some(max)) = (price.min, price.max) {
                if min > max {
                    return Err(CriteriaError::Invalid(format!(
                        "price min {} exceeds max {}",
                        min, max
                    )));
                }
            }
        }

        Ok(())
    }

    /// True when no category is constrained
    pub fn is_unconstrained(&self) -> bool {
        self == &Self::default()
    }
}
