//! Planner configuration.
//!
//! Every field has a default, so an empty TOML document is a valid
//! configuration. The recess policy is not configurable.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};
use crate::models::{ROOM_PENDING, UNIT_PENDING};
use crate::ranking::ScoreWeights;

/// Tunables for the planning board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Room label given to allocations without a room.
    pub pending_room_label: String,
    /// Unit label given to allocations without a curriculum unit.
    pub pending_unit_label: String,
    /// Room label given to sessions created from oracle suggestions.
    pub suggested_room_label: String,
    /// Course days covered by a batch suggestion request.
    pub batch_lookahead_days: usize,
    /// Monthly capacity = weekly hours x this.
    pub weeks_per_month: u32,
    /// Man-hours counted per unallocated session in board metrics.
    pub pending_session_hours: u32,
    /// Candidate ranking weights.
    pub weights: ScoreWeights,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            pending_room_label: ROOM_PENDING.to_string(),
            pending_unit_label: UNIT_PENDING.to_string(),
            suggested_room_label: "AI ROOM".to_string(),
            batch_lookahead_days: 10,
            weeks_per_month: 4,
            pending_session_hours: 4,
            weights: ScoreWeights::default(),
        }
    }
}

impl PlannerConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(document: &str) -> Result<Self> {
        toml::from_str(document).map_err(|e| PlannerError::Config(e.to_string()))
    }

    /// Reads and parses a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let document = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&document)?;
        tracing::debug!(path = %path.display(), "loaded planner configuration");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = PlannerConfig::from_toml_str("").unwrap();
        assert_eq!(config, PlannerConfig::default());
        assert_eq!(config.pending_room_label, ROOM_PENDING);
        assert_eq!(config.batch_lookahead_days, 10);
        assert_eq!(config.weights.same_area, 10);
    }

    #[test]
    fn test_partial_override() {
        let config = PlannerConfig::from_toml_str(
            r#"
            weeks_per_month = 5
            suggested_room_label = "ROOM AUTO"

            [weights]
            admin_conflict = 70
            "#,
        )
        .unwrap();
        assert_eq!(config.weeks_per_month, 5);
        assert_eq!(config.suggested_room_label, "ROOM AUTO");
        assert_eq!(config.weights.admin_conflict, 70);
        assert_eq!(config.weights.class_conflict, 100);
        assert_eq!(config.pending_session_hours, 4);
    }

    #[test]
    fn test_invalid_document() {
        let err = PlannerConfig::from_toml_str("weeks_per_month = \"four\"").unwrap_err();
        assert!(matches!(err, PlannerError::Config(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = PlannerConfig::load("/nonexistent/u-timetable.toml").unwrap_err();
        assert!(matches!(err, PlannerError::Io(_)));
    }
}
