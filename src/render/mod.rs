pub mod backend;
pub mod composer;
pub mod projection;
pub mod surface;

pub use backend::{MacroquadSurface, MapAssets};
pub use composer::{ViewComposer, Viewport};
pub use projection::Projection;
pub use surface::{DrawSurface, ImageKey};
