//! Token Snapshot Parsing
//!
//! Normalizes the raw market-data snapshot returned by the DEX API into a
//! fixed `TokenRecord`. Required fields are looked up directly; a missing
//! field is fatal for the evaluation of that token.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Developer address used when the snapshot does not carry one
pub const UNKNOWN_DEVELOPER: &str = "unknown";

const SECONDS_PER_DAY: i64 = 86_400;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SnapshotError {
    #[error("Snapshot is missing required field '{0}'")]
    MissingField(&'static str),

    #[error("Snapshot field '{field}' is malformed: {reason}")]
    Malformed { field: &'static str, reason: String },

    #[error("Creation timestamp out of range: {0} ms")]
    TimestampOutOfRange(f64),
}

/// Raw, unvalidated snapshot as served by the market data API
#[derive(Debug, Clone)]
pub struct RawSnapshot {
    pub address: String,
    pub price: f64,
    pub volume: f64,
    pub liquidity: f64,
    pub market_cap: f64,
    /// Pair creation time in epoch milliseconds
    pub pair_created_at: f64,
    pub developer_address: Option<String>,
}

impl RawSnapshot {
    /// Pull the snapshot fields out of a decoded JSON body. Each field is
    /// looked up by key so the error names the one that was missing.
    pub fn from_value(body: &Value) -> Result<Self, SnapshotError> {
        Ok(Self {
            address: required_str(body, "address")?,
            price: required_f64(body, "price")?,
            volume: required_f64(body, "volume")?,
            liquidity: required_f64(body, "liquidity")?,
            market_cap: required_f64(body, "marketCap")?,
            pair_created_at: required_f64(body, "pairCreatedAt")?,
            developer_address: body
                .get("developerAddress")
                .and_then(Value::as_str)
                .map(str::to_string),
        })
    }
}

/// Normalized token record produced by the parser
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenRecord {
    pub token_address: String,
    pub price: f64,
    pub volume: f64,
    pub liquidity: f64,
    pub market_cap: f64,
    pub pair_created_at: DateTime<Utc>,
    /// Whole days since pair creation. Informational only, never stored.
    pub token_age_days: i64,
    pub developer_address: String,
}

impl TokenRecord {
    /// ISO-8601 form of the creation time, as written to the store
    pub fn pair_created_at_iso(&self) -> String {
        self.pair_created_at
            .to_rfc3339_opts(chrono::SecondsFormat::AutoSi, true)
    }
}

/// True for a body that carries no snapshot at all: `null`, `{}`, `[]`,
/// `""`, `false` or `0`. Such a body means "no data", not a malformed snapshot.
pub fn is_empty_snapshot(body: &Value) -> bool {
    match body {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

/// Parse a decoded snapshot body into a `TokenRecord`
pub fn parse_snapshot(body: &Value, now: DateTime<Utc>) -> Result<TokenRecord, SnapshotError> {
    let raw = RawSnapshot::from_value(body)?;
    TokenRecord::from_raw(raw, now)
}

impl TokenRecord {
    /// Build a record from a raw snapshot, deriving the token age against `now`
    pub fn from_raw(raw: RawSnapshot, now: DateTime<Utc>) -> Result<Self, SnapshotError> {
        let pair_created_at = millis_to_datetime(raw.pair_created_at)?;
        let token_age_days = (now - pair_created_at)
            .num_seconds()
            .div_euclid(SECONDS_PER_DAY);

        Ok(Self {
            token_address: raw.address,
            price: raw.price,
            volume: raw.volume,
            liquidity: raw.liquidity,
            market_cap: raw.market_cap,
            pair_created_at,
            token_age_days,
            developer_address: raw
                .developer_address
                .unwrap_or_else(|| UNKNOWN_DEVELOPER.to_string()),
        })
    }
}

fn millis_to_datetime(millis: f64) -> Result<DateTime<Utc>, SnapshotError> {
    if !millis.is_finite() {
        return Err(SnapshotError::TimestampOutOfRange(millis));
    }
    let seconds = (millis / 1000.0).floor();
    let nanos = ((millis - seconds * 1000.0) * 1_000_000.0).round() as u32;
    DateTime::from_timestamp(seconds as i64, nanos.min(999_999_999))
        .ok_or(SnapshotError::TimestampOutOfRange(millis))
}

fn required<'a>(body: &'a Value, field: &'static str) -> Result<&'a Value, SnapshotError> {
    match body.get(field) {
        Some(Value::Null) | None => Err(SnapshotError::MissingField(field)),
        Some(value) => Ok(value),
    }
}

fn required_str(body: &Value, field: &'static str) -> Result<String, SnapshotError> {
    required(body, field)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| SnapshotError::Malformed {
            field,
            reason: "expected a string".to_string(),
        })
}

fn required_f64(body: &Value, field: &'static str) -> Result<f64, SnapshotError> {
    let number = match required(body, field)? {
        Value::Number(n) => n.as_f64().ok_or_else(|| SnapshotError::Malformed {
            field,
            reason: format!("{} is not representable as f64", n),
        })?,
        // Some DEX APIs serve numbers as strings
        Value::String(s) => s.parse::<f64>().map_err(|e| SnapshotError::Malformed {
            field,
            reason: e.to_string(),
        })?,
        other => {
            return Err(SnapshotError::Malformed {
                field,
                reason: format!("expected a number, got {}", other),
            })
        }
    };

    // "NaN" and "inf" parse as f64; the bundling gate needs finite values
    if !number.is_finite() {
        return Err(SnapshotError::Malformed {
            field,
            reason: format!("{} is not a finite number", number),
        });
    }
    Ok(number)
}
