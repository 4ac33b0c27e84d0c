//! Scheduler configuration.

use serde::{Deserialize, Serialize};

/// Constants the dispatching rules report and fall back on.
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```
/// use fuzzy_schedule::SchedulerConfig;
///
/// let config = SchedulerConfig::from_json(r#"{ "edd_priority_scale": 5.0 }"#).unwrap();
/// assert_eq!(config.edd_priority_scale, 5.0);
/// assert_eq!(config.neutral_priority, 50.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Priority score reported for every job under FCFS.
    pub neutral_priority: f64,
    /// Fuzzy-mode priority when no machine is registered.
    pub fallback_priority: f64,
    /// EDD reports `urgency × edd_priority_scale`.
    pub edd_priority_scale: f64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            neutral_priority: 50.0,
            fallback_priority: 50.0,
            edd_priority_scale: 10.0,
        }
    }
}

impl SchedulerConfig {
    pub fn with_neutral_priority(mut self, value: f64) -> Self {
        self.neutral_priority = value;
        self
    }

    pub fn with_fallback_priority(mut self, value: f64) -> Self {
        self.fallback_priority = value;
        self
    }

    pub fn with_edd_priority_scale(mut self, value: f64) -> Self {
        self.edd_priority_scale = value;
        self
    }

    /// Parses a JSON document; missing fields keep their defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = SchedulerConfig::default();
        assert_eq!(c.neutral_priority, 50.0);
        assert_eq!(c.fallback_priority, 50.0);
        assert_eq!(c.edd_priority_scale, 10.0);
    }

    #[test]
    fn test_builders() {
        let c = SchedulerConfig::default()
            .with_neutral_priority(40.0)
            .with_fallback_priority(60.0)
            .with_edd_priority_scale(8.0);
        assert_eq!(c.neutral_priority, 40.0);
        assert_eq!(c.fallback_priority, 60.0);
        assert_eq!(c.edd_priority_scale, 8.0);
    }

    #[test]
    fn test_from_json() {
        assert_eq!(
            SchedulerConfig::from_json("{}").unwrap(),
            SchedulerConfig::default()
        );
        let c = SchedulerConfig::from_json(r#"{"neutral_priority": 42.5}"#).unwrap();
        assert_eq!(c.neutral_priority, 42.5);
        assert_eq!(c.fallback_priority, 50.0);
        assert!(SchedulerConfig::from_json("not json").is_err());
    }

    #[test]
    fn test_json_roundtrip() {
        let c = SchedulerConfig::default().with_fallback_priority(12.0);
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(SchedulerConfig::from_json(&json).unwrap(), c);
    }
}
