use serde::{Deserialize, Serialize};
use tw_core::DEFAULT_SPEED;

use crate::error::{SimError, SimResult};

/// Default event log capacity. Standard tasks never finish, so an unbounded
/// log grows for as long as anything overlaps.
pub const DEFAULT_MAX_EVENTS: usize = 10_000;

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Nominal milliseconds between ticks, used by fixed-interval drivers.
    pub tick_interval_ms: f64,
    /// Speed given to movers spawned without one (distance per ms).
    pub default_speed: f64,
    /// Maximum event log size (oldest events dropped when exceeded). 0 = unlimited,
    /// which callers must opt into explicitly.
    pub max_events: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 33.0,
            default_speed: DEFAULT_SPEED,
            max_events: DEFAULT_MAX_EVENTS,
        }
    }
}

impl SimConfig {
    /// Set the nominal tick interval in milliseconds.
    pub fn with_tick_interval_ms(mut self, ms: f64) -> Self {
        self.tick_interval_ms = ms;
        self
    }

    /// Set the fallback speed for movers.
    pub fn with_default_speed(mut self, speed: f64) -> Self {
        self.default_speed = speed;
        self
    }

    /// Set the maximum event log size (0 = unlimited).
    pub fn with_max_events(mut self, max: usize) -> Self {
        self.max_events = max;
        self
    }

    /// Check that every value is in range.
    pub fn validate(&self) -> SimResult<()> {
        if !self.tick_interval_ms.is_finite() || self.tick_interval_ms <= 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "tick_interval_ms must be positive, got {}",
                self.tick_interval_ms
            )));
        }
        if !self.default_speed.is_finite() || self.default_speed < 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "default_speed must be non-negative, got {}",
                self.default_speed
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_values() {
        let config = SimConfig::default();
        assert!((config.tick_interval_ms - 33.0).abs() < f64::EPSILON);
        assert!((config.default_speed - 0.005).abs() < f64::EPSILON);
        assert_eq!(config.max_events, DEFAULT_MAX_EVENTS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_builder_chain() {
        let config = SimConfig::default()
            .with_tick_interval_ms(16.0)
            .with_default_speed(0.01)
            .with_max_events(500);
        assert!((config.tick_interval_ms - 16.0).abs() < f64::EPSILON);
        assert!((config.default_speed - 0.01).abs() < f64::EPSILON);
        assert_eq!(config.max_events, 500);
    }

    #[test]
    fn config_rejects_bad_values() {
        assert!(SimConfig::default().with_tick_interval_ms(0.0).validate().is_err());
        assert!(SimConfig::default().with_tick_interval_ms(f64::NAN).validate().is_err());
        assert!(SimConfig::default().with_default_speed(-1.0).validate().is_err());
    }

    #[test]
    fn config_deserializes_partial() {
        let config: SimConfig = serde_json::from_str(r#"{"tick_interval_ms": 10.0}"#).unwrap();
        assert!((config.tick_interval_ms - 10.0).abs() < f64::EPSILON);
        assert_eq!(config.max_events, DEFAULT_MAX_EVENTS);
    }
}
