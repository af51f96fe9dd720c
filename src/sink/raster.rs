use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;

use crate::foundation::error::{VizError, VizResult};

const MAX_DIM: u32 = 16_384;

/// Straight-alpha RGBA8 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// SVG to pixel converter backed by `usvg`/`resvg`, with system fonts loaded once.
pub struct Rasterizer {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer {
    pub fn new() -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.len(), "loaded system fonts");
        Self {
            fontdb: Arc::new(db),
        }
    }

    pub fn rasterize(&self, svg: &str, scale: f32) -> VizResult<RasterImage> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(VizError::validation("raster scale must be finite and > 0"));
        }
        let opts = usvg::Options {
            fontdb: Arc::clone(&self.fontdb),
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(svg, &opts).context("parse svg document")?;

        let size = tree.size();
        let width = (size.width() * scale).ceil().max(1.0) as u32;
        let height = (size.height() * scale).ceil().max(1.0) as u32;
        if width > MAX_DIM || height > MAX_DIM {
            return Err(VizError::render(format!(
                "raster size too large: {width}x{height} (max {MAX_DIM}x{MAX_DIM})"
            )));
        }

        let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| VizError::render("failed to allocate pixmap"))?;
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::from_scale(scale, scale),
            &mut pixmap.as_mut(),
        );

        let mut data = pixmap.take();
        demultiply(&mut data);
        Ok(RasterImage {
            width,
            height,
            data,
        })
    }

    pub fn save_png(&self, svg: &str, scale: f32, path: &Path) -> VizResult<()> {
        let img = self.rasterize(svg, scale)?;
        image::save_buffer_with_format(
            path,
            &img.data,
            img.width,
            img.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

/// Premultiplied to straight alpha, in place.
fn demultiply(data: &mut [u8]) {
    for px in data.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sink/raster.rs"]
mod tests;
