//! Page-frame renderer backed by lopdf.

use futures::FutureExt;
use futures::future::BoxFuture;
use lopdf::Document;
use std::sync::Arc;
use tokio::task;

use super::{PageRenderer, RenderedPage, Surface};
use crate::error::{PdfDeckError, Result};
use crate::utils::{page_dimensions, page_rotation};

/// Gray level of the one-pixel page border.
const BORDER: u8 = 160;

/// Longest side a rendered page may have, in pixels.
const MAX_SIDE_PIXELS: u32 = 16_384;

/// Largest pixel count a single rendered page may have.
const MAX_PIXELS: u64 = 1 << 26;

/// Renders every page as a blank frame sized from its media box.
///
/// Honours `/Rotate`: a page rotated by 90 or 270 degrees renders with width
/// and height exchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameRenderer;

impl FrameRenderer {
    /// Create a frame renderer.
    pub fn new() -> Self {
        Self
    }

    fn load(bytes: &[u8]) -> Result<Document> {
        Document::load_mem(bytes).map_err(|e| PdfDeckError::from_load("document", e))
    }

    fn render_blocking(bytes: &[u8], page_number: u32, scale: f32) -> Result<RenderedPage> {
        let doc = Self::load(bytes)?;
        let pages = doc.get_pages();
        let total = pages.len() as u32;

        let page_id = *pages
            .get(&page_number)
            .ok_or(PdfDeckError::PageOutOfRange {
                page: page_number,
                total,
            })?;
        let page = doc
            .get_dictionary(page_id)
            .map_err(|e| PdfDeckError::render_failed(page_number, e.to_string()))?;

        let (mut width, mut height) = page_dimensions(&doc, page);
        if page_rotation(&doc, page) % 180 != 0 {
            std::mem::swap(&mut width, &mut height);
        }

        let (Some(width), Some(height)) = (to_pixels(width, scale), to_pixels(height, scale))
        else {
            return Err(PdfDeckError::render_failed(page_number, "page too large to preview"));
        };
        if u64::from(width) * u64::from(height) > MAX_PIXELS {
            return Err(PdfDeckError::render_failed(page_number, "page too large to preview"));
        }

        Ok(RenderedPage {
            page_number,
            surface: framed(width, height),
        })
    }
}

impl PageRenderer for FrameRenderer {
    fn page_count(&self, bytes: Arc<[u8]>) -> BoxFuture<'static, Result<u32>> {
        async move {
            task::spawn_blocking(move || Self::load(&bytes).map(|doc| doc.get_pages().len() as u32))
                .await
                .map_err(|e| PdfDeckError::other(format!("Render task failed: {e}")))?
        }
        .boxed()
    }

    fn render_page(
        &self,
        bytes: Arc<[u8]>,
        page_number: u32,
        scale: f32,
    ) -> BoxFuture<'static, Result<RenderedPage>> {
        async move {
            task::spawn_blocking(move || Self::render_blocking(&bytes, page_number, scale))
                .await
                .map_err(|e| PdfDeckError::render_failed(page_number, e.to_string()))?
        }
        .boxed()
    }
}

/// Pixel length of `points` at `scale`, or `None` past [`MAX_SIDE_PIXELS`].
fn to_pixels(points: f32, scale: f32) -> Option<u32> {
    let pixels = (points * scale).round();
    if pixels.is_nan() {
        return Some(1);
    }
    if pixels > MAX_SIDE_PIXELS as f32 {
        return None;
    }
    Some(pixels.max(1.0) as u32)
}

fn framed(width: u32, height: u32) -> Surface {
    let mut surface = Surface::blank(width, height);
    for x in 0..width {
        surface.put(x, 0, BORDER);
        surface.put(x, height - 1, BORDER);
    }
    for y in 0..height {
        surface.put(0, y, BORDER);
        surface.put(width - 1, y, BORDER);
    }
    surface
}
