//! Page configuration
//!
//! Every knob the page controller uses lives here with a default matching the
//! shipped landing page. A host page can override any subset by passing JSON to
//! `PageController.mountWithConfig`.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Configuration for the page controller and the upload widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Analysis endpoint the upload is POSTed to
    pub endpoint: String,
    /// Multipart field name carrying the file
    pub upload_field: String,
    /// The only MIME type the upload widget accepts
    pub accepted_mime_type: String,
    /// Extra space kept between the fixed header and a scrolled-to section
    pub header_padding_px: f64,
    /// How far above a section its highlight band starts
    pub band_slack_px: f64,
    /// Fraction of an element that must be visible before it fades in
    pub fade_threshold: f64,
    /// Per-element transition delay for hero elements
    pub hero_stagger_secs: f64,
    /// Delay before hero elements are revealed on load
    pub hero_reveal_delay_ms: u32,
    /// Per-element transition delay when replaying results animations
    pub results_stagger_secs: f64,
    /// Delay between resetting and re-revealing results elements
    pub results_replay_delay_ms: u32,
    /// Section activated when the URL has no fragment
    pub home_section: String,
    /// Section scrolled to after results render
    pub results_section: String,
    /// Link used for opportunities that do not carry one
    pub fallback_opportunity_link: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            endpoint: "/api/analyze-form16".to_string(),
            upload_field: "form16".to_string(),
            accepted_mime_type: "application/pdf".to_string(),
            header_padding_px: 20.0,
            band_slack_px: 50.0,
            fade_threshold: 0.1,
            hero_stagger_secs: 0.2,
            hero_reveal_delay_ms: 100,
            results_stagger_secs: 0.1,
            results_replay_delay_ms: 50,
            home_section: "home".to_string(),
            results_section: "analyzer-tool".to_string(),
            fallback_opportunity_link: "#tax-saving-options".to_string(),
        }
    }
}

impl PageConfig {
    /// Parse a configuration override from JSON
    ///
    /// Missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a value is out of range
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: PageConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.fade_threshold) {
            return Err(ConfigError::InvalidValue {
                field: "fade_threshold",
                reason: format!("{} is outside 0.0..=1.0", self.fade_threshold),
            });
        }
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "endpoint",
                reason: "must not be empty".to_string(),
            });
        }
        if self.upload_field.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "upload_field",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = PageConfig::default();
        assert_eq!(config.endpoint, "/api/analyze-form16");
        assert_eq!(config.upload_field, "form16");
        assert_eq!(config.accepted_mime_type, "application/pdf");
        assert_eq!(config.header_padding_px, 20.0);
        assert_eq!(config.band_slack_px, 50.0);
        assert_eq!(config.fade_threshold, 0.1);
    }

    #[test]
    fn test_empty_json_is_default() {
        let config = PageConfig::from_json("{}").unwrap();
        assert_eq!(config, PageConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = PageConfig::from_json(r#"{"endpoint": "/v2/analyze", "band_slack_px": 80}"#)
            .unwrap();
        assert_eq!(config.endpoint, "/v2/analyze");
        assert_eq!(config.band_slack_px, 80.0);
        assert_eq!(config.upload_field, "form16");
    }

    #[test]
    fn test_rejects_bad_threshold() {
        let err = PageConfig::from_json(r#"{"fade_threshold": 1.5}"#).unwrap_err();
        assert!(err.to_string().contains("fade_threshold"));
    }

    #[test]
    fn test_rejects_empty_endpoint() {
        assert!(PageConfig::from_json(r#"{"endpoint": "  "}"#).is_err());
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = PageConfig::from_json("{endpoint").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
