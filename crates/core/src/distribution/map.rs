//! Typed analytic distribution map.

use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use kontor_shared::types::AnalyticAccountId;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use super::error::DistributionError;

/// Percentage share of a line attributed to each cost center.
///
/// Each raw entry is validated to lie in 0..=100. The shares of one line are
/// NOT required to sum to 100 and are never normalised.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DistributionMap(BTreeMap<AnalyticAccountId, Decimal>);

impl DistributionMap {
    /// Decodes the host's JSON representation.
    ///
    /// Keys are analytic account IDs; a comma-joined key (`"a,b"`) attributes
    /// its percentage to every listed account. An account listed under
    /// several keys receives the sum of their percentages.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not an object, a key does not parse,
    /// or a percentage is not a number in 0..=100.
    pub fn decode(raw: &Value) -> Result<Self, DistributionError> {
        let object = raw
            .as_object()
            .ok_or_else(|| DistributionError::NotAnObject(json_kind(raw).to_string()))?;

        let mut shares = BTreeMap::new();
        for (key, value) in object {
            let percentage = parse_percentage(key, value)?;
            if percentage < Decimal::ZERO || percentage > Decimal::ONE_HUNDRED {
                return Err(DistributionError::PercentageOutOfRange {
                    key: key.clone(),
                    percentage,
                });
            }

            for account in parse_key(key)? {
                *shares.entry(account).or_insert(Decimal::ZERO) += percentage;
            }
        }

        Ok(Self(shares))
    }

    /// Builds a map from already validated shares.
    #[must_use]
    pub fn from_shares(shares: impl IntoIterator<Item = (AnalyticAccountId, Decimal)>) -> Self {
        Self(shares.into_iter().collect())
    }

    /// Percentage attributed to `account`, if it appears in the map.
    #[must_use]
    pub fn percentage(&self, account: AnalyticAccountId) -> Option<Decimal> {
        self.0.get(&account).copied()
    }

    /// Portion of `amount` attributed to `account`.
    #[must_use]
    pub fn share_of(&self, account: AnalyticAccountId, amount: Decimal) -> Option<Decimal> {
        self.percentage(account)
            .map(|percentage| amount * percentage / Decimal::ONE_HUNDRED)
    }

    /// Cost centers referenced by the map.
    pub fn accounts(&self) -> impl Iterator<Item = AnalyticAccountId> + '_ {
        self.0.keys().copied()
    }

    /// Number of cost centers in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the map references no cost center.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<&Value> for DistributionMap {
    type Error = DistributionError;

    fn try_from(raw: &Value) -> Result<Self, Self::Error> {
        Self::decode(raw)
    }
}

/// Extracts the cost centers named by a raw distribution, ignoring values.
///
/// Unlike [`DistributionMap::decode`] this is lenient: a key that does not
/// parse is logged and skipped while the remaining keys are still returned.
///
/// # Errors
///
/// Returns an error only if the value is not a JSON object.
pub fn decode_account_keys(raw: &Value) -> Result<Vec<AnalyticAccountId>, DistributionError> {
    let object = raw
        .as_object()
        .ok_or_else(|| DistributionError::NotAnObject(json_kind(raw).to_string()))?;

    let mut accounts = BTreeSet::new();
    for key in object.keys() {
        for part in key.split(',') {
            match parse_account(part) {
                Some(account) => {
                    accounts.insert(account);
                }
                None => {
                    warn!(key = %key, "Ignoring unparsable analytic account key");
                }
            }
        }
    }

    Ok(accounts.into_iter().collect())
}

fn parse_key(key: &str) -> Result<Vec<AnalyticAccountId>, DistributionError> {
    key.split(',')
        .map(|part| {
            parse_account(part).ok_or_else(|| DistributionError::InvalidAccountKey(key.to_string()))
        })
        .collect()
}

/// Accepts only the canonical lowercase hyphenated form, which is how the
/// host writes keys and what the database prefilter matches on.
fn parse_account(part: &str) -> Option<AnalyticAccountId> {
    let part = part.trim();
    AnalyticAccountId::from_str(part)
        .ok()
        .filter(|account| account.to_string() == part)
}

fn parse_percentage(key: &str, value: &Value) -> Result<Decimal, DistributionError> {
    let invalid = || DistributionError::InvalidPercentage {
        key: key.to_string(),
        value: value.to_string(),
    };

    let text = match value {
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.trim().to_string(),
        _ => return Err(invalid()),
    };

    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| invalid())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
