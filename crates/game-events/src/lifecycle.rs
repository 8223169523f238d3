//! Unit lifecycle events fired by the external game loop.

use serde::{Deserialize, Serialize};

use crate::UnitTag;

/// A discrete unit lifecycle notification.
///
/// Events carry tags, not resolved snapshots; handlers resolve them
/// against the frame they arrived with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "tag")]
pub enum LifecycleEvent {
    /// A unit finished training or spawning
    UnitCreated(UnitTag),
    /// A structure finished construction
    ConstructionComplete(UnitTag),
    /// A unit died or was destroyed
    UnitDestroyed(UnitTag),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_event_serialization() {
        let event = LifecycleEvent::UnitCreated(UnitTag(42));
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"type":"unit_created","tag":42}"#);

        let parsed: LifecycleEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
    }
}
