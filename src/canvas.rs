use tiny_skia as sk;

use crate::error::{DrawError, DrawResult};
use crate::geom::Region;

/// Pixel grid backed by a tiny-skia pixmap.
///
/// Every pixel is opaque (alpha 255), so tiny-skia's premultiplied storage
/// carries plain RGB values and `pixel()` can read the bytes directly.
pub struct Canvas {
    pix: sk::Pixmap,
}

impl Canvas {
    /// Blank opaque-black canvas.
    pub fn new(width: u32, height: u32) -> DrawResult<Self> {
        let mut pix =
            sk::Pixmap::new(width, height).ok_or(DrawError::Allocation { width, height })?;
        pix.fill(sk::Color::from_rgba8(0, 0, 0, 255));
        Ok(Canvas { pix })
    }

    /// Canvas holding a decoded source image. The alpha channel of the input
    /// is discarded; only RGB takes part in scoring.
    pub fn from_rgb(image: &image::RgbImage) -> DrawResult<Self> {
        let mut canvas = Canvas::new(image.width(), image.height())?;
        let data = canvas.pix.data_mut();
        for (i, px) in image.pixels().enumerate() {
            let o = i * 4;
            data[o] = px[0];
            data[o + 1] = px[1];
            data[o + 2] = px[2];
            data[o + 3] = 255;
        }
        Ok(canvas)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.pix.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.pix.height()
    }

    /// Packed `0xRRGGBB` color at (x, y). Bits above 23 are always zero.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> u32 {
        debug_assert!(x < self.width() && y < self.height());
        let i = ((y * self.width() + x) * 4) as usize;
        let d = self.pix.data();
        (d[i] as u32) << 16 | (d[i + 1] as u32) << 8 | d[i + 2] as u32
    }

    /// Raw RGBA bytes, row-major.
    #[inline]
    pub fn data(&self) -> &[u8] {
        self.pix.data()
    }

    /// Filled circle of diameter `2 * radius` centered on pixel (cx, cy).
    /// Anti-aliasing is off so the draw never bleeds outside the disc's
    /// bounding box; bits 24+ of `color` are ignored.
    pub fn fill_disc(&mut self, cx: u32, cy: u32, radius: u32, color: u32) {
        profiling::scope!("fill_disc");
        let mut pb = sk::PathBuilder::new();
        pb.push_circle(cx as f32 + 0.5, cy as f32 + 0.5, radius as f32);
        let Some(path) = pb.finish() else {
            return;
        };

        let mut paint = sk::Paint::default();
        paint.anti_alias = false;
        paint.shader = sk::Shader::SolidColor(sk::Color::from_rgba8(
            (color >> 16) as u8,
            (color >> 8) as u8,
            color as u8,
            255,
        ));
        self.pix.fill_path(
            &path,
            &paint,
            sk::FillRule::Winding,
            sk::Transform::identity(),
            None,
        );
    }

    /// Copy a rectangular region from `src` at matching coordinates.
    /// Both canvases must share dimensions; an empty region is a no-op.
    pub fn blit_from(&mut self, src: &Canvas, region: Region) {
        profiling::scope!("blit_from");
        debug_assert_eq!(self.width(), src.width());
        debug_assert_eq!(self.height(), src.height());
        if region.is_empty() {
            return;
        }

        let stride = self.width();
        let dst = self.pix.data_mut();
        let src = src.pix.data();
        for y in region.y..region.y + region.h {
            let start = ((y * stride + region.x) * 4) as usize;
            let end = ((y * stride + region.x + region.w) * 4) as usize;
            debug_assert!(end <= src.len());
            dst[start..end].copy_from_slice(&src[start..end]);
        }
    }
}
