//! JSON save files.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use wg_core::{CoreError, Snapshot};

use crate::error::{EngineError, EngineResult};

/// The only save format version this engine reads and writes.
pub const SAVE_VERSION: u64 = 1;

/// Where the story came from and where the player was.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoryMeta {
    /// Location of the story script.
    pub url: String,
    /// Location of the stat config.
    pub stats_config_url: String,
    /// First branch of the story.
    pub start: String,
    /// Branch the player was on.
    pub current_branch_id: String,
    /// Title of that branch.
    pub current_branch_title: String,
}

impl StoryMeta {
    /// Metadata naming the story and stat config sources.
    pub fn new(url: impl Into<String>, stats_config_url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            stats_config_url: stats_config_url.into(),
            ..Self::default()
        }
    }
}

/// A complete save file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePayload {
    /// Format version, always [`SAVE_VERSION`].
    pub version: u64,
    /// When the save was made.
    pub created_at: DateTime<Utc>,
    /// Story metadata.
    pub story: StoryMeta,
    /// The saved state.
    pub state: Snapshot,
}

impl SavePayload {
    /// Wrap a snapshot, stamped with the current time.
    pub fn new(story: StoryMeta, state: Snapshot) -> Self {
        Self {
            version: SAVE_VERSION,
            created_at: Utc::now(),
            story,
            state,
        }
    }

    /// Parse a save file.
    ///
    /// Rejects any version other than [`SAVE_VERSION`] and payloads without a
    /// `state` object.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        match value.get("version") {
            Some(v) if v.as_u64() == Some(SAVE_VERSION) => {}
            Some(v) => return Err(EngineError::UnsupportedVersion(v.to_string())),
            None => return Err(EngineError::UnsupportedVersion("(missing)".to_string())),
        }
        match value.get("state") {
            None | Some(Value::Null) => return Err(EngineError::MissingState),
            Some(Value::Object(_)) => {}
            Some(_) => {
                return Err(CoreError::InvalidSnapshot("state must be an object".to_string()).into());
            }
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> EngineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SavePayload {
        let mut state = Snapshot {
            current_branch_id: Some("hall".to_string()),
            ..Snapshot::default()
        };
        state.stats.insert("luck".to_string(), 3);
        SavePayload::new(StoryMeta::new("castle.story", "castle.stats"), state)
    }

    #[test]
    fn json_shape_is_camel_case() {
        let json = sample().to_json().unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["version"], 1);
        assert!(value["createdAt"].is_string());
        assert_eq!(value["story"]["statsConfigUrl"], "castle.stats");
        assert_eq!(value["state"]["currentBranchId"], "hall");
        assert_eq!(value["state"]["stats"]["luck"], 3);
    }

    #[test]
    fn parse_back() {
        let payload = sample();
        let parsed = SavePayload::from_json(&payload.to_json().unwrap()).unwrap();
        assert_eq!(parsed, payload);
    }

    #[test]
    fn rejects_other_versions() {
        let json = r#"{"version":2,"createdAt":"2024-01-01T00:00:00Z","story":{},"state":{}}"#;
        assert!(matches!(
            SavePayload::from_json(json),
            Err(EngineError::UnsupportedVersion(v)) if v == "2"
        ));
        let json = r#"{"createdAt":"2024-01-01T00:00:00Z","story":{},"state":{}}"#;
        assert!(matches!(
            SavePayload::from_json(json),
            Err(EngineError::UnsupportedVersion(_))
        ));
    }

    #[test]
    fn rejects_missing_state() {
        let json = r#"{"version":1,"createdAt":"2024-01-01T00:00:00Z","story":{}}"#;
        assert!(matches!(SavePayload::from_json(json), Err(EngineError::MissingState)));
        let json = r#"{"version":1,"createdAt":"2024-01-01T00:00:00Z","story":{},"state":[]}"#;
        assert!(matches!(SavePayload::from_json(json), Err(EngineError::Core(_))));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            SavePayload::from_json("{not json"),
            Err(EngineError::Json(_))
        ));
    }

    #[test]
    fn minimal_payload_loads() {
        let json = r#"{"version":1,"createdAt":"2024-01-01T00:00:00Z","story":{},"state":{}}"#;
        let payload = SavePayload::from_json(json).unwrap();
        assert_eq!(payload.state, Snapshot::default());
        assert_eq!(payload.story, StoryMeta::default());
    }
}
