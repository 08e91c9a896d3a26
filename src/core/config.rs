//! Escalator configuration.
//!
//! Every field has a default so a partial JSON document is enough:
//! ```rust
//! use cpi_escalation::core::{EscalatorConfig, from_json};
//!
//! let cfg: EscalatorConfig = from_json(r#"{ "allow_estimation": false }"#).unwrap();
//! assert!(!cfg.allow_estimation);
//! assert_eq!(cfg.default_escalation_rate, 1.025);
//! ```

use chrono::NaiveDateTime;

use crate::core::{DateInput, EscalationError};
use crate::dates::DayCountConvention;

/// Gross annual rate applied beyond the reference range (2.5 % per year).
pub const DEFAULT_ESCALATION_RATE: f64 = 1.025;

/// Construction-time settings for an [`Escalator`](crate::escalation::Escalator).
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EscalatorConfig {
    /// Real-terms basis date. `None` means "now" at construction.
    pub target_date: Option<NaiveDateTime>,
    /// Gross annual escalation used for extrapolation, e.g. `1.025`.
    pub default_escalation_rate: f64,
    /// When false, dates outside the reference range are rejected.
    pub allow_estimation: bool,
    /// Measures extrapolation distance in years.
    pub day_count: DayCountConvention,
}

impl Default for EscalatorConfig {
    fn default() -> Self {
        Self {
            target_date: None,
            default_escalation_rate: DEFAULT_ESCALATION_RATE,
            allow_estimation: true,
            day_count: DayCountConvention::Act365_25,
        }
    }
}

impl EscalatorConfig {
    /// Sets the target date; plain dates are read as midnight.
    pub fn with_target_date<D: DateInput>(mut self, date: D) -> Self {
        self.target_date = Some(date.into_date_time());
        self
    }

    pub fn with_default_escalation_rate(mut self, rate: f64) -> Self {
        self.default_escalation_rate = rate;
        self
    }

    pub fn with_allow_estimation(mut self, allow: bool) -> Self {
        self.allow_estimation = allow;
        self
    }

    pub fn with_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = day_count;
        self
    }

    /// Checks that the extrapolation rate is usable.
    ///
    /// # Errors
    /// Returns [`EscalationError::InvalidInput`] when the rate is non-finite or `<= 0`.
    pub fn validate(&self) -> Result<(), EscalationError> {
        let rate = self.default_escalation_rate;
        if !rate.is_finite() || rate <= 0.0 {
            return Err(EscalationError::invalid(format!(
                "default_escalation_rate must be finite and > 0, got {rate}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = EscalatorConfig::default();
        assert!(cfg.validate().is_ok());
        assert!(cfg.allow_estimation);
        assert_eq!(cfg.day_count, DayCountConvention::Act365_25);
    }

    #[test]
    fn rejects_non_positive_rate() {
        for rate in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let cfg = EscalatorConfig::default().with_default_escalation_rate(rate);
            assert!(matches!(
                cfg.validate(),
                Err(EscalationError::InvalidInput(_))
            ));
        }
    }
}
