use std::sync::Arc;

use pixels::{Pixels, SurfaceTexture};
use thiserror::Error;
use winit::window::Window;

use crate::app::Scene;

use super::{FrameCanvas, Viewport};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("pixels surface error: {0}")]
    Surface(#[from] pixels::Error),
    #[error("failed to resize surface: {0}")]
    Resize(#[from] pixels::TextureError),
}

/// Owns the pixel buffer at a fixed logical size; `pixels` scales it to the
/// window surface with integer letterboxing.
pub struct Renderer {
    pixels: Pixels<'static>,
    logical: Viewport,
}

impl Renderer {
    pub fn new(window: Arc<Window>, logical: Viewport) -> Result<Self, RenderError> {
        let size = window.inner_size();
        let surface = SurfaceTexture::new(size.width.max(1), size.height.max(1), window);
        let pixels = Pixels::new(logical.width, logical.height, surface)?;
        Ok(Self {
            pixels,
            logical,
        })
    }

    pub fn logical_size(&self) -> Viewport {
        self.logical
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels.resize_surface(width, height)?;
        Ok(())
    }

    pub fn render_scene(
        &mut self,
        scene: &dyn Scene,
        clear_color: [u8; 4],
    ) -> Result<(), RenderError> {
        let Viewport { width, height } = self.logical;
        {
            let mut canvas = FrameCanvas::new(self.pixels.frame_mut(), width, height);
            canvas.clear(clear_color);
            scene.draw(&mut canvas);
        }
        self.pixels.render()?;
        Ok(())
    }
}
