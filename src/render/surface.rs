use macroquad::color::Color;
use macroquad::math::Vec2;

use crate::config::AssetPaths;
use crate::game::Item;

/// Every image the map draws. Backends must be able to draw all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageKey {
    Overworld,
    Caves,
    CaveEntrance,
    Item(Item),
}

impl ImageKey {
    pub fn all() -> Vec<ImageKey> {
        let mut keys = vec![ImageKey::Overworld, ImageKey::Caves, ImageKey::CaveEntrance];
        keys.extend(Item::ALL.iter().copied().map(ImageKey::Item));
        keys
    }

    /// Background layer for the player's current area
    pub fn background(in_caves: bool) -> Self {
        if in_caves {
            ImageKey::Caves
        } else {
            ImageKey::Overworld
        }
    }

    pub fn path(&self, paths: &AssetPaths) -> String {
        let dir = std::path::Path::new(&paths.dir);
        let path = match self {
            ImageKey::Overworld => dir.join(&paths.overworld),
            ImageKey::Caves => dir.join(&paths.caves),
            ImageKey::CaveEntrance => dir.join(&paths.icons_dir).join("entrance.png"),
            ImageKey::Item(item) => dir.join(&paths.icons_dir).join(item.icon_file()),
        };
        path.to_string_lossy().into_owned()
    }
}

/// Drawing capability the view composer renders through. All positions and
/// sizes are in window pixels.
pub trait DrawSurface {
    fn fill_background(&mut self, color: Color);

    fn draw_filled_circle(&mut self, center: Vec2, radius: f32, color: Color);

    fn draw_ring_outline(&mut self, center: Vec2, radius: f32, thickness: f32, color: Color);

    fn draw_line_segment(&mut self, from: Vec2, to: Vec2, thickness: f32, color: Color);

    /// Draw `image` stretched to `size` with its top-left corner at `top_left`
    fn draw_scaled_image_at(&mut self, image: ImageKey, top_left: Vec2, size: Vec2);

    fn present_frame(&mut self);
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_keys_unique() {
        let keys = ImageKey::all();
        assert_eq!(keys.len(), 10);
        let unique: std::collections::HashSet<_> = keys.iter().collect();
        assert_eq!(unique.len(), keys.len());
    }

    #[test]
    fn test_paths() {
        let paths = AssetPaths::default();
        let entrance = ImageKey::CaveEntrance.path(&paths);
        assert!(entrance.ends_with("entrance.png"));
        assert!(entrance.starts_with("assets"));
        assert!(ImageKey::Item(Item::Dynamite).path(&paths).ends_with("dynamite_64.png"));
        assert!(ImageKey::background(true).path(&paths).ends_with("caves.jpg"));
    }
}
