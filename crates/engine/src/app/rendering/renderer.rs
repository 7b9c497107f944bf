use std::sync::Arc;

use pixels::{Error, Pixels, SurfaceTexture};
use winit::window::Window;

use super::canvas::FrameCanvas;
use super::Viewport;

/// Owns the window's pixel buffer. Each frame is drawn through a
/// [`FrameCanvas`] and then presented.
pub struct Renderer {
    window: Arc<Window>,
    pixels: Pixels<'static>,
    viewport: Viewport,
}

impl Renderer {
    pub fn new(window: Arc<Window>) -> Result<Self, Error> {
        let size = window.inner_size();
        let pixels = Self::build_pixels(Arc::clone(&window), size.width, size.height)?;
        Ok(Self {
            window,
            pixels,
            viewport: Viewport {
                width: size.width,
                height: size.height,
            },
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), Error> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels = Self::build_pixels(Arc::clone(&self.window), width, height)?;
        self.viewport = Viewport { width, height };
        Ok(())
    }

    fn build_pixels(
        window: Arc<Window>,
        width: u32,
        height: u32,
    ) -> Result<Pixels<'static>, Error> {
        let surface = SurfaceTexture::new(width, height, window);
        Pixels::new(width, height, surface)
    }

    pub fn is_drawable(&self) -> bool {
        self.viewport.width > 0 && self.viewport.height > 0
    }

    pub fn canvas(&mut self) -> FrameCanvas<'_> {
        let Viewport { width, height } = self.viewport;
        FrameCanvas::new(self.pixels.frame_mut(), width, height)
    }

    pub fn present(&self) -> Result<(), Error> {
        if !self.is_drawable() {
            return Ok(());
        }
        self.pixels.render()
    }
}
