//! Page rendering.
//!
//! Rasterizing PDF pages belongs to a rendering library. The session only
//! talks to it through [`PageRenderer`], so any backend can be plugged in.
//! [`FrameRenderer`] is the built-in backend: it reads page geometry with
//! lopdf and produces a blank page frame of the right size, which is enough to
//! lay out previews when no rasterizer is available.

pub mod frame;

pub use frame::FrameRenderer;

use futures::future::BoxFuture;
use std::fmt;
use std::sync::Arc;

use crate::error::Result;

/// An 8-bit grayscale raster.
#[derive(Clone, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Surface {
    /// A white surface of the given size.
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![u8::MAX; width as usize * height as usize],
        }
    }

    /// Wrap existing row-major pixels; returns None if the length does not match.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        (pixels.len() == width as usize * height as usize).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major pixel values (0 = black, 255 = white).
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Set one pixel; out-of-bounds writes are ignored.
    pub fn put(&mut self, x: u32, y: u32, value: u8) {
        if x < self.width && y < self.height {
            self.pixels[y as usize * self.width as usize + x as usize] = value;
        }
    }

    /// Encode as a binary PGM (P5) image.
    pub fn to_pgm(&self) -> Vec<u8> {
        let mut out = format!("P5\n{} {}\n255\n", self.width, self.height).into_bytes();
        out.extend_from_slice(&self.pixels);
        out
    }
}

impl fmt::Debug for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// One rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    /// 1-based page number within its document.
    pub page_number: u32,
    /// The raster.
    pub surface: Surface,
}

/// Renders pages of a PDF held in memory.
///
/// Implementations must be cheap to share: the session clones an
/// `Arc<dyn PageRenderer>` into every background render.
pub trait PageRenderer: Send + Sync {
    /// Number of pages in the document.
    fn page_count(&self, bytes: Arc<[u8]>) -> BoxFuture<'static, Result<u32>>;

    /// Render 1-based `page_number` at `scale` (1.0 = one pixel per point).
    fn render_page(
        &self,
        bytes: Arc<[u8]>,
        page_number: u32,
        scale: f32,
    ) -> BoxFuture<'static, Result<RenderedPage>>;
}
