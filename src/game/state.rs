use super::object::GameObject;
use super::table::ObjectTable;
use crate::config::MapConfig;

/// What the viewport shows: zoom, center, and which map layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    /// Divisor applied to the map image; smaller is more zoomed in
    pub zoom_factor: f32,
    /// World coordinates the viewport is centered on
    pub point_of_view: (f32, f32),
    pub in_caves: bool,
}

impl ViewState {
    pub fn new(zoom_factor: f32) -> Self {
        Self {
            zoom_factor,
            point_of_view: (0.0, 0.0),
            in_caves: false,
        }
    }

    /// Follow a player record. Other kinds are ignored.
    pub fn follow(&mut self, object: &GameObject) {
        if let Some(in_cave) = object.player_in_cave() {
            self.point_of_view = (object.x, object.y);
            self.in_caves = in_cave;
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(MapConfig::default().initial_zoom)
    }
}

/// Everything the ingest and render paths share
#[derive(Debug, Default)]
pub struct MapState {
    pub objects: ObjectTable,
    pub view: ViewState,
}

impl MapState {
    pub fn new(config: &MapConfig) -> Self {
        Self {
            objects: ObjectTable::new(),
            view: ViewState::new(config.initial_zoom),
        }
    }

    /// Re-center on the current player record, if there is one
    pub fn sync_view_to_player(&mut self) {
        if let Some(player) = self.objects.player() {
            self.view.follow(player);
        }
    }
}
