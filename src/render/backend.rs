use std::collections::HashMap;

use macroquad::prelude::*;

use crate::config::AssetPaths;
use crate::error::AssetError;

use super::surface::{DrawSurface, ImageKey};

/// Textures for every [`ImageKey`]. Loading fails if any one is missing,
/// so drawing never has to handle an absent image.
pub struct MapAssets {
    textures: HashMap<ImageKey, Texture2D>,
}

impl MapAssets {
    pub async fn load(paths: &AssetPaths) -> Result<Self, AssetError> {
        let mut textures = HashMap::new();
        for key in ImageKey::all() {
            let path = key.path(paths);
            let tex = load_texture(&path).await.map_err(|source| AssetError {
                key,
                path: path.clone(),
                source,
            })?;
            // Backgrounds are heavily downscaled; linear filtering keeps them smooth
            tex.set_filter(FilterMode::Linear);
            log::debug!("Loaded {:?}: {} ({}x{})", key, path, tex.width(), tex.height());
            textures.insert(key, tex);
        }
        log::info!("Loaded {} map textures", textures.len());
        Ok(Self { textures })
    }

    pub fn get(&self, key: ImageKey) -> Option<&Texture2D> {
        self.textures.get(&key)
    }
}

/// Draws straight to the macroquad window
pub struct MacroquadSurface<'a> {
    assets: &'a MapAssets,
}

impl<'a> MacroquadSurface<'a> {
    pub fn new(assets: &'a MapAssets) -> Self {
        Self { assets }
    }
}

impl DrawSurface for MacroquadSurface<'_> {
    fn fill_background(&mut self, color: Color) {
        clear_background(color);
    }

    fn draw_filled_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        draw_circle(center.x, center.y, radius, color);
    }

    fn draw_ring_outline(&mut self, center: Vec2, radius: f32, thickness: f32, color: Color) {
        draw_circle_lines(center.x, center.y, radius, thickness, color);
    }

    fn draw_line_segment(&mut self, from: Vec2, to: Vec2, thickness: f32, color: Color) {
        draw_line(from.x, from.y, to.x, to.y, thickness, color);
    }

    fn draw_scaled_image_at(&mut self, image: ImageKey, top_left: Vec2, size: Vec2) {
        if let Some(texture) = self.assets.get(image) {
            draw_texture_ex(
                texture,
                top_left.x,
                top_left.y,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(size),
                    ..Default::default()
                },
            );
        }
    }

    fn present_frame(&mut self) {
        // The main loop swaps buffers with `next_frame().await`
    }
}
