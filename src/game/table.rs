use std::collections::HashMap;

use super::object::{GameObject, ObjectKind};

/// An object plus the time (seconds) its latest update arrived
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackedObject {
    pub object: GameObject,
    pub last_seen: f64,
    /// Position in ingest order; larger is newer
    pub seq: u64,
}

/// Live objects keyed by instance ID. At most one record per ID;
/// a newer record replaces the old one wholesale.
#[derive(Debug, Default)]
pub struct ObjectTable {
    objects: HashMap<i64, TrackedObject>,
    next_seq: u64,
}

impl ObjectTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the record for `object.id`, returning the previous one
    pub fn upsert(&mut self, object: GameObject, now: f64) -> Option<GameObject> {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.objects
            .insert(object.id, TrackedObject { object, last_seen: now, seq })
            .map(|prev| prev.object)
    }

    pub fn get(&self, id: i64) -> Option<&GameObject> {
        self.objects.get(&id).map(|tracked| &tracked.object)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.objects.contains_key(&id)
    }

    /// Remove every object whose kind matches, returning how many went
    pub fn remove_where(&mut self, mut pred: impl FnMut(&ObjectKind) -> bool) -> usize {
        let before = self.objects.len();
        self.objects.retain(|_, tracked| !pred(&tracked.object.kind));
        before - self.objects.len()
    }

    /// Drop cave entrances and pickups
    pub fn remove_static(&mut self) -> usize {
        self.remove_where(ObjectKind::is_static)
    }

    pub fn remove_enemies(&mut self) -> usize {
        self.remove_where(ObjectKind::is_enemy)
    }

    /// Drop objects not updated within `ttl` seconds of `now`
    pub fn evict_stale(&mut self, now: f64, ttl: f64) -> usize {
        let before = self.objects.len();
        self.objects.retain(|_, tracked| now - tracked.last_seen <= ttl);
        before - self.objects.len()
    }

    /// The most recently updated player record. A sender that respawns its
    /// player under a new ID leaves the old record behind until it is cleared.
    pub fn player(&self) -> Option<&GameObject> {
        self.objects
            .values()
            .filter(|tracked| matches!(tracked.object.kind, ObjectKind::Player { .. }))
            .max_by_key(|tracked| tracked.seq)
            .map(|tracked| &tracked.object)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameObject> {
        self.objects.values().map(|tracked| &tracked.object)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    fn populated() -> ObjectTable {
        let mut table = ObjectTable::new();
        table.upsert(GameObject::player(1, 0.0, 0.0, 0.0, false), 0.0);
        table.upsert(GameObject::enemy(2, 5.0, 5.0, 90.0), 0.0);
        table.upsert(GameObject::enemy(3, 6.0, 6.0, 90.0), 0.0);
        table.upsert(GameObject::cave_entrance(4, 10.0, 10.0), 0.0);
        table.upsert(GameObject::pickup(5, 11.0, 11.0, 54), 0.0);
        table
    }

    #[test]
    fn test_upsert_replaces_whole_record() {
        let mut table = ObjectTable::new();
        assert!(table.upsert(GameObject::enemy(9, 1.0, 2.0, 45.0), 0.0).is_none());
        let prev = table.upsert(GameObject::cave_entrance(9, 3.0, 4.0), 1.0);

        assert_eq!(prev, Some(GameObject::enemy(9, 1.0, 2.0, 45.0)));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(9), Some(&GameObject::cave_entrance(9, 3.0, 4.0)));
    }

    #[test]
    fn test_remove_static_keeps_actors() {
        let mut table = populated();
        assert_eq!(table.remove_static(), 2);
        assert!(table.contains(1));
        assert!(table.contains(2));
        assert!(table.contains(3));
        assert!(!table.contains(4));
        assert!(!table.contains(5));
    }

    #[test]
    fn test_remove_enemies_only() {
        let mut table = populated();
        assert_eq!(table.remove_enemies(), 2);
        assert_eq!(table.len(), 3);
        assert!(table.iter().all(|object| !object.kind.is_enemy()));
    }

    #[test]
    fn test_evict_stale() {
        let mut table = ObjectTable::new();
        table.upsert(GameObject::enemy(1, 0.0, 0.0, 0.0), 1.0);
        table.upsert(GameObject::enemy(2, 0.0, 0.0, 0.0), 4.0);

        assert_eq!(table.evict_stale(5.0, 2.0), 1);
        assert!(!table.contains(1));
        assert!(table.contains(2));
    }

    #[test]
    fn test_player_lookup() {
        let table = populated();
        assert_eq!(table.player().map(|p| p.id), Some(1));
        assert!(ObjectTable::new().player().is_none());
    }

    #[test]
    fn test_player_lookup_prefers_latest_update() {
        let mut table = ObjectTable::new();
        table.upsert(GameObject::player(1, 100.0, 100.0, 0.0, true), 0.0);
        table.upsert(GameObject::player(2, -50.0, -50.0, 0.0, false), 0.0);
        for _ in 0..50 {
            assert_eq!(table.player().map(|p| p.id), Some(2));
        }

        // The older ID becomes current again once it is the latest update
        table.upsert(GameObject::player(1, 101.0, 100.0, 0.0, true), 0.0);
        assert_eq!(table.player().map(|p| p.id), Some(1));
    }
}
