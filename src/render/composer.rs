use macroquad::color::{Color, BLACK, GREEN, RED, WHITE};
use macroquad::math::Vec2;

use crate::config::MapConfig;
use crate::game::{GameObject, MapState, ObjectKind, PickupItem, ViewState};

use super::projection::Projection;
use super::surface::{DrawSurface, ImageKey};

const PLAYER_COLOR: Color = GREEN;
const ENEMY_COLOR: Color = RED;
const OUTLINE_COLOR: Color = WHITE;

/// Map-image pixels to window pixels for one frame: `screen = origin + map * scale`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub origin: Vec2,
    pub scale: f32,
}

impl Viewport {
    pub fn map_to_screen(&self, map_x: f32, map_y: f32) -> Vec2 {
        self.origin + Vec2::new(map_x, map_y) * self.scale
    }

    #[cfg(test)]
    fn screen_to_map(&self, screen: Vec2) -> (f32, f32) {
        let map = (screen - self.origin) / self.scale;
        (map.x, map.y)
    }
}

/// Draw order: pickups and entrances under enemies, the player on top
fn draw_layer(kind: &ObjectKind) -> u8 {
    match kind {
        ObjectKind::CaveEntrance | ObjectKind::Pickup { .. } => 0,
        ObjectKind::Enemy { .. } => 1,
        ObjectKind::Player { .. } => 2,
    }
}

/// Rotate counter-clockwise (in image space, y down) by `degrees`
fn rotate(v: Vec2, degrees: f32) -> Vec2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Turns the object table and view state into draw calls
pub struct ViewComposer {
    projection: Projection,
    window_size: f32,
    min_zoom: f32,
    max_zoom: f32,
    zoom_sensitivity: f32,
    marker_size: f32,
    icon_size: f32,
}

impl ViewComposer {
    pub fn new(config: &MapConfig) -> Self {
        Self {
            projection: config.projection(),
            window_size: config.window_size as f32,
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
            zoom_sensitivity: config.zoom_sensitivity,
            marker_size: config.marker_size,
            icon_size: config.icon_size,
        }
    }

    #[cfg(test)]
    fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Positive delta zooms in
    pub fn on_zoom_input(&self, view: &mut ViewState, delta: f32) {
        view.zoom_factor -= delta * self.zoom_sensitivity;
        view.zoom_factor = view.zoom_factor.clamp(self.min_zoom, self.max_zoom);
    }

    /// The background is shrunk by `1 / zoom` and shifted so the projected
    /// point of view sits at the window center.
    pub fn viewport(&self, view: &ViewState) -> Viewport {
        let scale = 1.0 / view.zoom_factor;
        let window_center = Vec2::splat(self.window_size / 2.0);
        let (pov_x, pov_y) = self.projection.world_to_map(view.point_of_view.0, view.point_of_view.1);
        Viewport {
            origin: window_center - Vec2::new(pov_x, pov_y) * scale,
            scale,
        }
    }

    /// Draw one frame. Returns the number of objects drawn.
    pub fn render<S: DrawSurface + ?Sized>(&self, state: &mut MapState, surface: &mut S) -> usize {
        // The table is the authority on where the player is at render time
        state.sync_view_to_player();

        let view = state.view;
        let viewport = self.viewport(&view);

        surface.fill_background(BLACK);
        surface.draw_scaled_image_at(
            ImageKey::background(view.in_caves),
            viewport.origin.round(),
            Vec2::splat(self.projection.image_size * viewport.scale),
        );

        let mut objects: Vec<&GameObject> = state.objects.iter().collect();
        objects.sort_by_key(|object| (draw_layer(&object.kind), object.id));

        let mut drawn = 0;
        for object in objects {
            let (map_x, map_y) = self.projection.world_to_map(object.x, object.y);
            let map_pos = Vec2::new(map_x, map_y);
            let zoom = view.zoom_factor;

            match object.kind {
                ObjectKind::Player { rotation, .. } => {
                    self.draw_marker(surface, &viewport, map_pos, zoom, PLAYER_COLOR, Some(rotation));
                }
                ObjectKind::Enemy { .. } => {
                    self.draw_marker(surface, &viewport, map_pos, zoom, ENEMY_COLOR, None);
                }
                ObjectKind::CaveEntrance => {
                    self.draw_icon(surface, &viewport, map_pos, zoom, ImageKey::CaveEntrance);
                }
                ObjectKind::Pickup { item: PickupItem::Known(item) } => {
                    self.draw_icon(surface, &viewport, map_pos, zoom, ImageKey::Item(item));
                }
                ObjectKind::Pickup { item: PickupItem::Unrecognized(_) } => continue,
            }
            drawn += 1;
        }

        surface.present_frame();
        drawn
    }

    /// Circle with a white ring; players also get an arrowhead pointing along
    /// `heading`. Sizes grow with zoom in map space so they stay constant on
    /// screen.
    fn draw_marker<S: DrawSurface + ?Sized>(
        &self,
        surface: &mut S,
        viewport: &Viewport,
        map_pos: Vec2,
        zoom: f32,
        color: Color,
        heading: Option<f32>,
    ) {
        let center = viewport.map_to_screen(map_pos.x, map_pos.y).round();
        let fill_radius = ((self.marker_size - 1.0) * zoom - 1.0).max(0.0) * viewport.scale;
        let ring_radius = self.marker_size * zoom * viewport.scale;
        let ring_thickness = viewport.scale.max(1.0);

        surface.draw_filled_circle(center, fill_radius, color);
        surface.draw_ring_outline(center, ring_radius, ring_thickness, OUTLINE_COLOR);

        if let Some(rotation) = heading {
            let mut v = rotate(Vec2::new(0.0, (self.marker_size + 5.0) * zoom), rotation);
            let tip = map_pos + v;
            v = v.normalize_or_zero() * (self.marker_size + 2.0) * zoom;
            v = rotate(v, -45.0);
            let left = map_pos + v;
            v = rotate(v, 90.0);
            let right = map_pos + v;

            // Snapped like the center so the arrowhead stays on the ring
            let tip = viewport.map_to_screen(tip.x, tip.y).round();
            let arrow_thickness = (2.0 * viewport.scale).max(1.0);
            for side in [left, right] {
                surface.draw_line_segment(
                    tip,
                    viewport.map_to_screen(side.x, side.y).round(),
                    arrow_thickness,
                    OUTLINE_COLOR,
                );
            }
        }
    }

    fn draw_icon<S: DrawSurface + ?Sized>(
        &self,
        surface: &mut S,
        viewport: &Viewport,
        map_pos: Vec2,
        zoom: f32,
        image: ImageKey,
    ) {
        let map_size = self.icon_size * zoom / 4.0;
        let corner = map_pos - Vec2::splat(map_size / 2.0);
        surface.draw_scaled_image_at(
            image,
            viewport.map_to_screen(corner.x, corner.y).round(),
            Vec2::splat(map_size * viewport.scale),
        );
    }
}
