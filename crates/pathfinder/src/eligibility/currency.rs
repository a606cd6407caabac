use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::domain::{CurrencyCode, Money};

/// Where the rate used for a conversion came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "source", content = "rate")]
pub enum RateSource {
    Identity,
    Table(f64),
    /// No rate was listed for the pair; the amount passed through at 1:1.
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversion {
    pub amount: f64,
    pub currency: CurrencyCode,
    pub source: RateSource,
}

impl Conversion {
    /// True when the amount was not really converted because the pair is unlisted.
    pub fn is_degraded(&self) -> bool {
        matches!(self.source, RateSource::Fallback)
    }
}

/// Fixed source -> target rate table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversionTable {
    rates: BTreeMap<CurrencyCode, BTreeMap<CurrencyCode, f64>>,
}

impl ConversionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rate(
        mut self,
        from: impl Into<CurrencyCode>,
        to: impl Into<CurrencyCode>,
        rate: f64,
    ) -> Self {
        self.rates
            .entry(from.into())
            .or_default()
            .insert(to.into(), rate);
        self
    }

    pub fn rate(&self, from: &CurrencyCode, to: &CurrencyCode) -> Option<f64> {
        self.rates
            .get(from)
            .and_then(|targets| targets.get(to))
            .copied()
            .filter(|rate| rate.is_finite() && *rate > 0.0)
    }

    /// Convert `amount` into `to`, rounded to two decimals.
    ///
    /// Same-currency conversions return the amount untouched. Unlisted pairs fall back
    /// to 1:1 and are reported through [`RateSource::Fallback`].
    pub fn convert(&self, amount: f64, from: &CurrencyCode, to: &CurrencyCode) -> Conversion {
        if from == to {
            return Conversion {
                amount,
                currency: to.clone(),
                source: RateSource::Identity,
            };
        }

        let (rate, source) = match self.rate(from, to) {
            Some(rate) => (rate, RateSource::Table(rate)),
            None => {
                warn!(from = %from, to = %to, "no conversion rate listed; using 1:1");
                (1.0, RateSource::Fallback)
            }
        };

        Conversion {
            amount: round_cents(amount * rate),
            currency: to.clone(),
            source,
        }
    }

    pub fn convert_money(&self, money: &Money, to: &CurrencyCode) -> Conversion {
        self.convert(money.amount, &money.currency, to)
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Render an amount with thousands separators, e.g. `EUR 500,000`.
pub fn format_money(amount: f64, currency: &CurrencyCode) -> String {
    format!("{currency} {}", format_amount(amount))
}

pub(crate) fn format_amount(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    if fraction == 0 {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{fraction:02}")
    }
}
