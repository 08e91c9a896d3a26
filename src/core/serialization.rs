//! Serializable escalator state and JSON helpers.
//!
//! A snapshot captures the configuration and the derived factor table so a run
//! can be audited or reproduced later.
//!
//! # Examples
//! ```rust
//! use chrono::NaiveDate;
//! use cpi_escalation::core::{EscalationSnapshot, EscalatorConfig, from_json, to_json_pretty};
//! use cpi_escalation::escalation::Escalator;
//!
//! let d = |y| NaiveDate::from_ymd_opt(y, 1, 1).unwrap();
//! let esc = Escalator::from_observations(
//!     vec![(d(2020), 100.0).into(), (d(2021), 110.0).into()],
//!     EscalatorConfig::default().with_target_date(d(2021)),
//! )
//! .unwrap();
//!
//! let json = to_json_pretty(&esc.snapshot()).expect("json serialization");
//! let decoded: EscalationSnapshot = from_json(&json).expect("json deserialization");
//! assert_eq!(decoded, esc.snapshot());
//! ```

use serde::de::DeserializeOwned;

use crate::core::{EscalationRow, EscalatorConfig};

/// Point-in-time view of an escalator: settings and factor table.
///
/// `config.target_date` holds the resolved target, never `None` for a snapshot
/// taken from an [`Escalator`](crate::escalation::Escalator).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EscalationSnapshot {
    pub config: EscalatorConfig,
    pub rows: Vec<EscalationRow>,
}

impl EscalationSnapshot {
    /// Checks the target date, ordering and positivity of the serialized table.
    pub fn validate(&self) -> Result<(), String> {
        if self.config.target_date.is_none() {
            return Err("snapshot config must carry the target date".to_string());
        }
        if self.rows.is_empty() {
            return Err("snapshot rows must be non-empty".to_string());
        }
        if self.rows.windows(2).any(|w| w[1].date <= w[0].date) {
            return Err("snapshot dates must be strictly increasing".to_string());
        }
        if self
            .rows
            .iter()
            .any(|r| r.index_value <= 0.0 || r.escalation_factor <= 0.0)
        {
            return Err("snapshot index values and factors must be > 0".to_string());
        }
        Ok(())
    }
}

/// Serialize a value to pretty JSON.
pub fn to_json_pretty<T: serde::Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

/// Deserialize a value from JSON.
pub fn from_json<T: DeserializeOwned>(payload: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(payload)
}
