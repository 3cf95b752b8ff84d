//! Interaction timings and contract strings.
//!
//! Every field has a default matching the production site, so a config file
//! only needs the values it overrides:
//!
//! ```json
//! { "carousel_interval_ms": 6000, "heart_count": 5 }
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CheerError, CheerResult};

/// Tunables for the interaction controllers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Like endpoint path; `{id}` is replaced by the card identifier.
    pub like_endpoint: String,
    /// Cookie holding the CSRF token.
    pub csrf_cookie: String,
    /// Request header carrying the CSRF token.
    pub csrf_header: String,

    /// How long the point display keeps its highlight class.
    pub flash_ms: u64,
    /// Hearts spawned per successful cheer.
    pub heart_count: usize,
    /// Lifetime of a heart marker.
    pub heart_lifetime_ms: u64,
    /// Horizontal spread of heart markers around the control's centre.
    pub heart_spread_px: f64,

    /// Delay before the first card is revealed.
    pub reveal_initial_ms: u64,
    /// Delay between consecutive card reveals.
    pub reveal_stagger_ms: u64,

    /// Autoplay period for carousels without a `data-interval`.
    pub carousel_interval_ms: u64,

    /// Re-enable the purchase confirm button after this long if the
    /// navigation never happened.
    pub confirm_cooldown_ms: u64,
    /// Coins exchanged for one stanning point in the completion summary.
    pub coins_per_point: u64,
    /// Query parameter marking a completed purchase redirect.
    pub completion_param: String,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            like_endpoint: "/like/{id}/".to_string(),
            csrf_cookie: "csrftoken".to_string(),
            csrf_header: "X-CSRFToken".to_string(),
            flash_ms: 350,
            heart_count: 3,
            heart_lifetime_ms: 1000,
            heart_spread_px: 60.0,
            reveal_initial_ms: 120,
            reveal_stagger_ms: 90,
            carousel_interval_ms: 4000,
            confirm_cooldown_ms: 3000,
            coins_per_point: 100,
            completion_param: "done".to_string(),
        }
    }
}

impl InteractionConfig {
    /// Load overrides from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> CheerResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would break the controllers.
    pub fn validate(&self) -> CheerResult<()> {
        if self.coins_per_point == 0 {
            return Err(CheerError::Config("coins_per_point must be positive".into()));
        }
        if self.carousel_interval_ms == 0 {
            return Err(CheerError::Config("carousel_interval_ms must be positive".into()));
        }
        if !self.like_endpoint.contains("{id}") {
            return Err(CheerError::Config(
                "like_endpoint must contain an {id} placeholder".into(),
            ));
        }
        Ok(())
    }

    /// Endpoint path for one card.
    pub fn like_path(&self, card_id: &str) -> String {
        self.like_endpoint.replace("{id}", card_id)
    }

    pub fn flash(&self) -> Duration {
        Duration::from_millis(self.flash_ms)
    }

    pub fn heart_lifetime(&self) -> Duration {
        Duration::from_millis(self.heart_lifetime_ms)
    }

    pub fn reveal_initial(&self) -> Duration {
        Duration::from_millis(self.reveal_initial_ms)
    }

    pub fn reveal_stagger(&self) -> Duration {
        Duration::from_millis(self.reveal_stagger_ms)
    }

    pub fn carousel_interval(&self) -> Duration {
        Duration::from_millis(self.carousel_interval_ms)
    }

    pub fn confirm_cooldown(&self) -> Duration {
        Duration::from_millis(self.confirm_cooldown_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_are_valid() {
        let config = InteractionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.like_path("otter-1"), "/like/otter-1/");
        assert_eq!(config.flash(), Duration::from_millis(350));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("cheerpaw.json");
        std::fs::write(&path, r#"{ "heart_count": 5, "carousel_interval_ms": 6000 }"#).unwrap();

        let config = InteractionConfig::from_json_file(&path).unwrap();
        assert_eq!(config.heart_count, 5);
        assert_eq!(config.carousel_interval(), Duration::from_secs(6));
        assert_eq!(config.csrf_cookie, "csrftoken");
    }

    #[test]
    fn test_invalid_exchange_rate_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.json");
        std::fs::write(&path, r#"{ "coins_per_point": 0 }"#).unwrap();

        let err = InteractionConfig::from_json_file(&path).unwrap_err();
        assert!(matches!(err, CheerError::Config(_)));
    }
}
