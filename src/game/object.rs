/// Pickup items the map has an icon for. Discriminants are the game's item IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Item {
    Cloth = 33,
    Meds = 49,
    Flashlight = 51,
    Rope = 54,
    OldPot = 142,
    AirCanister = 144,
    Dynamite = 175,
}

impl Item {
    pub const ALL: [Item; 7] = [
        Item::Cloth,
        Item::Meds,
        Item::Flashlight,
        Item::Rope,
        Item::OldPot,
        Item::AirCanister,
        Item::Dynamite,
    ];

    pub fn from_id(item_id: i64) -> Option<Self> {
        match item_id {
            33 => Some(Item::Cloth),
            49 => Some(Item::Meds),
            51 => Some(Item::Flashlight),
            54 => Some(Item::Rope),
            142 => Some(Item::OldPot),
            144 => Some(Item::AirCanister),
            175 => Some(Item::Dynamite),
            _ => None,
        }
    }

    pub fn id(self) -> i64 {
        self as i64
    }

    /// Icon file name under the icons directory
    pub fn icon_file(self) -> &'static str {
        match self {
            Item::Cloth => "cloth.png",
            Item::Meds => "meds.png",
            Item::Flashlight => "flashlight.png",
            Item::Rope => "rope_pickup.png",
            Item::OldPot => "old_pot.png",
            Item::AirCanister => "air_canister.png",
            Item::Dynamite => "dynamite_64.png",
        }
    }
}

/// What a pickup's `itemID` resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupItem {
    Known(Item),
    Unrecognized(i64),
}

impl PickupItem {
    pub fn resolve(item_id: i64) -> Self {
        match Item::from_id(item_id) {
            Some(item) => PickupItem::Known(item),
            None => PickupItem::Unrecognized(item_id),
        }
    }

    pub fn item(&self) -> Option<Item> {
        match self {
            PickupItem::Known(item) => Some(*item),
            PickupItem::Unrecognized(_) => None,
        }
    }
}

/// Kind codes used on the wire
pub const KIND_PLAYER: i64 = 0;
pub const KIND_ENEMY: i64 = 1;
pub const KIND_CAVE_ENTRANCE: i64 = 2;
pub const KIND_PICKUP: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ObjectKind {
    Player { rotation: f32, in_cave: bool },
    Enemy { rotation: f32 },
    CaveEntrance,
    Pickup { item: PickupItem },
}

impl ObjectKind {
    pub fn name(&self) -> &'static str {
        match self {
            ObjectKind::Player { .. } => "player",
            ObjectKind::Enemy { .. } => "enemy",
            ObjectKind::CaveEntrance => "cave entrance",
            ObjectKind::Pickup { .. } => "pickup",
        }
    }

    /// Static and collectible objects, reset by an action event
    pub fn is_static(&self) -> bool {
        matches!(self, ObjectKind::CaveEntrance | ObjectKind::Pickup { .. })
    }

    pub fn is_enemy(&self) -> bool {
        matches!(self, ObjectKind::Enemy { .. })
    }
}

/// Latest known state of one object in the game session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameObject {
    pub id: i64,
    pub x: f32,
    pub y: f32,
    pub kind: ObjectKind,
}

impl GameObject {
    pub fn new(id: i64, x: f32, y: f32, kind: ObjectKind) -> Self {
        Self { id, x, y, kind }
    }

    pub fn player(id: i64, x: f32, y: f32, rotation: f32, in_cave: bool) -> Self {
        Self::new(id, x, y, ObjectKind::Player { rotation, in_cave })
    }

    pub fn enemy(id: i64, x: f32, y: f32, rotation: f32) -> Self {
        Self::new(id, x, y, ObjectKind::Enemy { rotation })
    }

    pub fn cave_entrance(id: i64, x: f32, y: f32) -> Self {
        Self::new(id, x, y, ObjectKind::CaveEntrance)
    }

    pub fn pickup(id: i64, x: f32, y: f32, item_id: i64) -> Self {
        Self::new(id, x, y, ObjectKind::Pickup { item: PickupItem::resolve(item_id) })
    }

    /// `Some(in_cave)` if this is a player record
    pub fn player_in_cave(&self) -> Option<bool> {
        match self.kind {
            ObjectKind::Player { in_cave, .. } => Some(in_cave),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_ids_roundtrip() {
        for item in Item::ALL {
            assert_eq!(Item::from_id(item.id()), Some(item));
        }
        assert_eq!(Item::from_id(-1), None);
        assert_eq!(Item::from_id(55), None);
    }

    #[test]
    fn test_pickup_resolves_item() {
        let rope = GameObject::pickup(7, 0.0, 0.0, 54);
        assert_eq!(rope.kind, ObjectKind::Pickup { item: PickupItem::Known(Item::Rope) });

        let unknown = GameObject::pickup(8, 0.0, 0.0, 999);
        assert_eq!(unknown.kind, ObjectKind::Pickup { item: PickupItem::Unrecognized(999) });
        assert!(PickupItem::Unrecognized(999).item().is_none());
    }

    #[test]
    fn test_kind_classification() {
        assert!(ObjectKind::CaveEntrance.is_static());
        assert!(ObjectKind::Pickup { item: PickupItem::Unrecognized(1) }.is_static());
        assert!(!ObjectKind::Enemy { rotation: 0.0 }.is_static());
        assert!(ObjectKind::Enemy { rotation: 0.0 }.is_enemy());
        assert!(!ObjectKind::Player { rotation: 0.0, in_cave: false }.is_enemy());
    }
}
