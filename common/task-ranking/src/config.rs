//! Ranking configuration
//!
//! Maps each logical role (`done`, `scheduled`, `status`, `priority`) to the
//! column name used by the task database, and carries the ordered label lists
//! the ranker compares against. Validated once before any ranking happens.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Placeholder title for pages without a usable title or URL
pub const UNTITLED: &str = "Untitled";

/// Errors found while validating a [`RankingConfig`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A role was mapped to an empty column name
    #[error("property name for role '{0}' must not be empty")]
    EmptyPropertyName(&'static str),

    /// An ordered label list contains an empty entry
    #[error("{list} contains an empty label")]
    EmptyLabel { list: &'static str },
}

/// Column names for each logical role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyNames {
    /// Checkbox marking a task as done
    #[serde(default = "default_done")]
    pub done: String,
    /// Date column holding the scheduled start
    #[serde(default = "default_scheduled")]
    pub scheduled: String,
    /// Select column holding the status label
    #[serde(default = "default_status")]
    pub status: String,
    /// Select column holding the priority label
    #[serde(default = "default_priority")]
    pub priority: String,
}

/// What to show when a page has no title text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleFallback {
    /// Use the page URL, then the placeholder
    #[default]
    Url,
    /// Use the placeholder directly
    Placeholder,
}

impl std::str::FromStr for TitleFallback {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "url" => Ok(TitleFallback::Url),
            "placeholder" => Ok(TitleFallback::Placeholder),
            other => Err(format!("unknown title fallback: {}", other)),
        }
    }
}

/// Everything the normalizer and ranker need to know about the database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingConfig {
    #[serde(default)]
    pub properties: PropertyNames,
    /// Statuses that outrank every date and priority, most urgent first
    #[serde(default = "default_hot_statuses")]
    pub hot_statuses: Vec<String>,
    /// Priority labels, most important first
    #[serde(default = "default_priority_order")]
    pub priority_order: Vec<String>,
    #[serde(default)]
    pub title_fallback: TitleFallback,
}

fn default_done() -> String {
    "Done".to_string()
}

fn default_scheduled() -> String {
    "Date".to_string()
}

fn default_status() -> String {
    "Status".to_string()
}

fn default_priority() -> String {
    "Priority".to_string()
}

fn default_hot_statuses() -> Vec<String> {
    vec!["Now".to_string(), "Active".to_string()]
}

fn default_priority_order() -> Vec<String> {
    vec!["High".to_string(), "Medium".to_string(), "Low".to_string()]
}

impl Default for PropertyNames {
    fn default() -> Self {
        Self {
            done: default_done(),
            scheduled: default_scheduled(),
            status: default_status(),
            priority: default_priority(),
        }
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            properties: PropertyNames::default(),
            hot_statuses: default_hot_statuses(),
            priority_order: default_priority_order(),
            title_fallback: TitleFallback::default(),
        }
    }
}

impl RankingConfig {
    /// Check that every role has a column and no label list has blank entries
    pub fn validate(&self) -> Result<(), ConfigError> {
        let roles = [
            ("done", &self.properties.done),
            ("scheduled", &self.properties.scheduled),
            ("status", &self.properties.status),
            ("priority", &self.properties.priority),
        ];
        for (role, name) in roles {
            if name.trim().is_empty() {
                return Err(ConfigError::EmptyPropertyName(role));
            }
        }

        if self.hot_statuses.iter().any(|s| s.trim().is_empty()) {
            return Err(ConfigError::EmptyLabel {
                list: "hot_statuses",
            });
        }
        if self.priority_order.iter().any(|s| s.trim().is_empty()) {
            return Err(ConfigError::EmptyLabel {
                list: "priority_order",
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = RankingConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.properties.scheduled, "Date");
        assert_eq!(config.hot_statuses, vec!["Now", "Active"]);
        assert_eq!(config.priority_order, vec!["High", "Medium", "Low"]);
        assert_eq!(config.title_fallback, TitleFallback::Url);
    }

    #[test]
    fn test_empty_property_name_rejected() {
        let mut config = RankingConfig::default();
        config.properties.status = "  ".to_string();
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyPropertyName("status"))
        );
    }

    #[test]
    fn test_empty_label_rejected() {
        let mut config = RankingConfig::default();
        config.priority_order.push(String::new());
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyLabel {
                list: "priority_order"
            })
        );
    }

    #[test]
    fn test_empty_lists_are_allowed() {
        let config = RankingConfig {
            hot_statuses: vec![],
            priority_order: vec![],
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_title_fallback_from_str() {
        assert_eq!("URL".parse::<TitleFallback>(), Ok(TitleFallback::Url));
        assert_eq!(
            " placeholder ".parse::<TitleFallback>(),
            Ok(TitleFallback::Placeholder)
        );
        assert!("first".parse::<TitleFallback>().is_err());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: RankingConfig = serde_json::from_str(
            r#"{"properties": {"scheduled": "Due"}, "title_fallback": "placeholder"}"#,
        )
        .unwrap();
        assert_eq!(config.properties.scheduled, "Due");
        assert_eq!(config.properties.done, "Done");
        assert_eq!(config.hot_statuses, vec!["Now", "Active"]);
        assert_eq!(config.title_fallback, TitleFallback::Placeholder);
    }
}
