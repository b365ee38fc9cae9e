/// Affine map from in-game world coordinates (origin at world center) to
/// map image pixels (origin top-left). World X runs opposite to image X.
///
/// No rounding and no zoom: callers snap to pixels and the viewport applies
/// zoom afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub image_size: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl Projection {
    pub fn world_to_map(&self, world_x: f32, world_y: f32) -> (f32, f32) {
        let half = self.image_size / 2.0;
        let map_x = -(world_x * self.scale_x) + half - self.offset_x;
        let map_y = (world_y * self.scale_y) + half + self.offset_y;
        (map_x, map_y)
    }

    /// Inverse of [`world_to_map`](Self::world_to_map)
    #[cfg(test)]
    fn map_to_world(&self, map_x: f32, map_y: f32) -> (f32, f32) {
        let half = self.image_size / 2.0;
        let world_x = -(map_x - half + self.offset_x) / self.scale_x;
        let world_y = (map_y - half - self.offset_y) / self.scale_y;
        (world_x, world_y)
    }

    #[cfg(test)]
    pub(crate) fn image_center(&self) -> (f32, f32) {
        (self.image_size / 2.0, self.image_size / 2.0)
    }
}
