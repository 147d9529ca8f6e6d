mod canvas;
mod renderer;
mod transform;

pub use canvas::{DrawTarget, FrameCanvas};
pub use renderer::{RenderError, Renderer};
pub use transform::{Rect, Viewport};
