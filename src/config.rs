//! Tracker configuration.

use crate::tracker::TrackerError;
use serde::{Deserialize, Serialize};

/// Presentation and logging defaults for a [`StepTracker`](crate::StepTracker).
///
/// Missing fields fall back to their defaults, so a host application can
/// embed a partial section in its own configuration file.
///
/// # Example
///
/// ```rust
/// use steplog::TrackerConfig;
///
/// let config = TrackerConfig::from_json(r#"{ "indent_width": 4, "color": false }"#).unwrap();
/// assert_eq!(config.indent_width, 4);
/// assert!(!config.color);
/// assert_eq!(config.rule_width, 120);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Spaces per indent level.
    pub indent_width: usize,

    /// Length of the header/trailer rule.
    pub rule_width: usize,

    /// Character the rule is drawn with.
    pub rule_char: char,

    /// Colorize terminal output.
    pub color: bool,

    /// Send step BEGIN/DONE/SLOW events to the log sink unless a step
    /// says otherwise.
    pub log_steps: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            indent_width: 2,
            rule_width: 120,
            rule_char: '=',
            color: true,
            log_steps: false,
        }
    }
}

impl TrackerConfig {
    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, TrackerError> {
        serde_json::from_str(json).map_err(|e| TrackerError::InvalidConfig(e.to_string()))
    }

    /// Leading whitespace for a line at `indent` levels.
    pub(crate) fn padding(&self, indent: usize) -> String {
        " ".repeat(indent * self.indent_width + 1)
    }

    pub(crate) fn rule(&self) -> String {
        std::iter::repeat(self.rule_char)
            .take(self.rule_width)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_console_layout() {
        let config = TrackerConfig::default();
        assert_eq!(config.indent_width, 2);
        assert_eq!(config.rule_width, 120);
        assert_eq!(config.rule_char, '=');
        assert!(config.color);
        assert!(!config.log_steps);
    }

    #[test]
    fn empty_json_yields_defaults() {
        let config = TrackerConfig::from_json("{}").unwrap();
        assert_eq!(config, TrackerConfig::default());
    }

    #[test]
    fn invalid_json_is_reported() {
        let result = TrackerConfig::from_json(r#"{ "indent_width": "wide" }"#);
        assert!(matches!(result, Err(TrackerError::InvalidConfig(_))));
    }

    #[test]
    fn padding_has_one_leading_space() {
        let config = TrackerConfig::default();
        assert_eq!(config.padding(0), " ");
        assert_eq!(config.padding(2), "     ");
    }

    #[test]
    fn rule_uses_configured_char_and_width() {
        let config = TrackerConfig {
            rule_width: 5,
            rule_char: '-',
            ..TrackerConfig::default()
        };
        assert_eq!(config.rule(), "-----");
        assert_eq!(TrackerConfig::default().rule().chars().count(), 120);
    }

    #[test]
    fn config_serializes_correctly() {
        let config = TrackerConfig {
            log_steps: true,
            ..TrackerConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let deserialized = TrackerConfig::from_json(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
