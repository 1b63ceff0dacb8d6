use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;

use crate::error::RelayError;

/// Timeframe labels the dashboard submits. The Arabic labels come from the
/// localized signal creator and mean the same intervals.
pub const TIMEFRAMES: &[&str] = &[
    "5m", "15m", "1h", "4h", "1d", // Latin
    "5م", "15م", "1س", "4س", "1ي", // Arabic
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeSignal {
    pub pair: String,
    pub timeframe: String,
    pub strategy: String,
    pub entry_price: String,
    pub stop_loss: String,
    pub take_profit: String,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

/// The signal as it arrives over HTTP. Every key is optional here so that a
/// missing key surfaces as `MissingField` rather than a parse error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalRequest {
    #[serde(default)]
    pub pair: Option<String>,
    #[serde(default)]
    pub timeframe: Option<String>,
    #[serde(default)]
    pub strategy: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub entry_price: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub stop_loss: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub take_profit: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl SignalRequest {
    pub fn from_slice(body: &[u8]) -> Result<Self, RelayError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(RelayError::MalformedRequest("empty request body".to_string()));
        }
        let value: Value = serde_json::from_slice(body)?;
        if !value.is_object() {
            return Err(RelayError::MalformedRequest(
                "expected a JSON object".to_string(),
            ));
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn validate(self) -> Result<TradeSignal, RelayError> {
        let pair = required("pair", self.pair)?;
        let timeframe = required("timeframe", self.timeframe)?;
        let strategy = required("strategy", self.strategy)?;
        let entry_price = required("entryPrice", self.entry_price)?;
        let stop_loss = required("stopLoss", self.stop_loss)?;
        let take_profit = required("takeProfit", self.take_profit)?;

        if !TIMEFRAMES.contains(&timeframe.as_str()) {
            return Err(RelayError::InvalidField {
                field: "timeframe",
                reason: format!("unsupported timeframe `{}`", timeframe),
            });
        }

        check_price("entryPrice", &entry_price)?;
        check_price("stopLoss", &stop_loss)?;
        check_price("takeProfit", &take_profit)?;

        Ok(TradeSignal {
            pair,
            timeframe,
            strategy,
            entry_price,
            stop_loss,
            take_profit,
            notes: self.notes.unwrap_or_default(),
            created_at: self.created_at.unwrap_or_else(Utc::now),
        })
    }
}

fn required(field: &'static str, value: Option<String>) -> Result<String, RelayError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(RelayError::MissingField(field)),
    }
}

fn check_price(field: &'static str, value: &str) -> Result<(), RelayError> {
    let price = Decimal::from_str(value).map_err(|e| RelayError::InvalidField {
        field,
        reason: format!("`{}` is not a decimal: {}", value, e),
    })?;

    if price.is_sign_negative() || price.is_zero() {
        return Err(RelayError::InvalidField {
            field,
            reason: format!("`{}` must be positive", value),
        });
    }
    Ok(())
}

// The form posts prices as strings, scripted clients tend to send numbers.
fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(de::Error::custom(format!(
            "expected a string or a number, got {}",
            other
        ))),
    }
}
