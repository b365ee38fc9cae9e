use serde::Deserialize;
use serde_json::Value;

use crate::error::DecodeError;
use crate::game::object::{
    GameObject, ObjectKind, PickupItem, KIND_CAVE_ENTRANCE, KIND_ENEMY, KIND_PICKUP, KIND_PLAYER,
};

/// A decoded datagram
#[derive(Debug, Clone, PartialEq)]
pub enum InboundMessage {
    /// Control message: static objects should be reset. The payload is not
    /// interpreted.
    Action { action_type: Value },
    /// Latest state of one object
    State(GameObject),
}

/// Wire form of a state update. Every kind shares `type`, `id`, `x` and `y`;
/// the rest are required per kind.
#[derive(Debug, Deserialize)]
struct RawObject {
    #[serde(rename = "type")]
    kind: i64,
    id: i64,
    x: f32,
    y: f32,
    #[serde(rename = "rotZ", default)]
    rot_z: Option<f32>,
    #[serde(rename = "inCave", default)]
    in_cave: Option<bool>,
    #[serde(rename = "itemID", default)]
    item_id: Option<i64>,
}

impl RawObject {
    fn into_object(self) -> Result<GameObject, DecodeError> {
        let kind = match self.kind {
            KIND_PLAYER => ObjectKind::Player {
                rotation: require(self.rot_z, "player", "rotZ")?,
                in_cave: require(self.in_cave, "player", "inCave")?,
            },
            KIND_ENEMY => ObjectKind::Enemy {
                rotation: require(self.rot_z, "enemy", "rotZ")?,
            },
            KIND_CAVE_ENTRANCE => ObjectKind::CaveEntrance,
            KIND_PICKUP => ObjectKind::Pickup {
                item: PickupItem::resolve(require(self.item_id, "pickup", "itemID")?),
            },
            other => return Err(DecodeError::UnknownKind(other)),
        };
        Ok(GameObject::new(self.id, self.x, self.y, kind))
    }
}

fn require<T>(value: Option<T>, kind: &'static str, field: &'static str) -> Result<T, DecodeError> {
    value.ok_or(DecodeError::MissingField { kind, field })
}

/// Decode one datagram: a single UTF-8 JSON object, optionally followed by
/// whitespace.
pub fn decode_datagram(data: &[u8]) -> Result<InboundMessage, DecodeError> {
    let text = std::str::from_utf8(data)?;
    let value: Value = serde_json::from_str(text.trim())?;

    let action_type = match value.as_object() {
        Some(map) => map.get("actionType").cloned(),
        None => return Err(DecodeError::NotAnObject),
    };
    if let Some(action_type) = action_type {
        return Ok(InboundMessage::Action { action_type });
    }

    let raw: RawObject = serde_json::from_value(value)?;
    raw.into_object().map(InboundMessage::State)
}
