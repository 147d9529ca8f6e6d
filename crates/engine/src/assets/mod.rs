mod loader;
mod probe;

pub use loader::{AssetError, AssetLoader, ColorKey, FontFace, Texture};
pub use probe::{find_content_bounds, RgbRange};
