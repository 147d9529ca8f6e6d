use crate::assets::{FontFace, Texture};

use super::{Rect, Viewport};

/// Drawing primitives a scene composes its frame from.
pub trait DrawTarget {
    fn size(&self) -> Viewport;

    fn fill_rect(&mut self, rect: Rect, color: [u8; 4]);

    /// Copies `src` (texture pixels) into `dst` (target pixels), scaling with
    /// nearest-neighbour sampling. Fully transparent source pixels are skipped.
    fn blit(&mut self, texture: &Texture, src: Rect, dst: Rect);

    /// Draws one line of text with its top-left corner at `(x, y)`.
    fn draw_text(&mut self, font: &FontFace, text: &str, x: i32, y: i32, color: [u8; 4]);
}

/// Software target over a tightly packed RGBA8 frame.
pub struct FrameCanvas<'a> {
    frame: &'a mut [u8],
    width: u32,
    height: u32,
}

impl<'a> FrameCanvas<'a> {
    pub fn new(frame: &'a mut [u8], width: u32, height: u32) -> Self {
        Self {
            frame,
            width,
            height,
        }
    }

    pub fn clear(&mut self, color: [u8; 4]) {
        for pixel in self.frame.chunks_exact_mut(4) {
            pixel.copy_from_slice(&color);
        }
    }

    fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    fn pixel_offset(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        let pixel_offset = (y as usize)
            .checked_mul(self.width as usize)?
            .checked_add(x as usize)?;
        let byte_offset = pixel_offset.checked_mul(4)?;
        if byte_offset.checked_add(4)? > self.frame.len() {
            return None;
        }
        Some(byte_offset)
    }

    fn blend_pixel(&mut self, x: i32, y: i32, color: [u8; 4]) {
        let Some(offset) = self.pixel_offset(x, y) else {
            return;
        };
        let alpha = color[3];
        if alpha == 0 {
            return;
        }
        let dst = &mut self.frame[offset..offset + 4];
        if alpha == 255 {
            dst.copy_from_slice(&color);
            return;
        }
        let a = alpha as u32;
        let inv = 255 - a;
        for channel in 0..3 {
            dst[channel] = ((color[channel] as u32 * a + dst[channel] as u32 * inv) / 255) as u8;
        }
        dst[3] = 255;
    }
}

impl DrawTarget for FrameCanvas<'_> {
    fn size(&self) -> Viewport {
        Viewport {
            width: self.width,
            height: self.height,
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: [u8; 4]) {
        let Some(visible) = rect.intersect(self.bounds()) else {
            return;
        };
        for y in visible.y..visible.bottom() {
            for x in visible.x..visible.right() {
                self.blend_pixel(x, y, color);
            }
        }
    }

    fn blit(&mut self, texture: &Texture, src: Rect, dst: Rect) {
        if src.is_empty() || dst.is_empty() {
            return;
        }
        let Some(visible) = dst.intersect(self.bounds()) else {
            return;
        };

        for out_y in visible.y..visible.bottom() {
            let src_y = scale_to_source(out_y - dst.y, dst.h, src.y, src.h);
            if src_y < 0 {
                continue;
            }
            for out_x in visible.x..visible.right() {
                let src_x = scale_to_source(out_x - dst.x, dst.w, src.x, src.w);
                if src_x < 0 {
                    continue;
                }
                let Some(color) = texture.pixel(src_x as u32, src_y as u32) else {
                    continue;
                };
                self.blend_pixel(out_x, out_y, color);
            }
        }
    }

    fn draw_text(&mut self, font: &FontFace, text: &str, x: i32, y: i32, color: [u8; 4]) {
        let px = font.px();
        let mut cursor_x = x as f32;
        for ch in text.chars() {
            let (metrics, bitmap) = font.font().rasterize(ch, px);
            let glyph_x = cursor_x.round() as i32 + metrics.xmin;
            let glyph_y = y + (px as i32 - metrics.height as i32 - metrics.ymin);

            for row in 0..metrics.height {
                for col in 0..metrics.width {
                    let coverage = bitmap[row * metrics.width + col];
                    if coverage == 0 {
                        continue;
                    }
                    let alpha = (coverage as u32 * color[3] as u32 / 255) as u8;
                    self.blend_pixel(
                        glyph_x + col as i32,
                        glyph_y + row as i32,
                        [color[0], color[1], color[2], alpha],
                    );
                }
            }

            cursor_x += metrics.advance_width;
        }
    }
}

fn scale_to_source(dst_offset: i32, dst_len: u32, src_start: i32, src_len: u32) -> i64 {
    let scaled = dst_offset as i64 * src_len as i64 / dst_len.max(1) as i64;
    src_start as i64 + scaled
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: [u8; 4] = [255, 0, 0, 255];
    const CLEAR: [u8; 4] = [0x1a, 0x4d, 0x2e, 255];

    fn pixel_at(frame: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
        let offset = ((y * width + x) * 4) as usize;
        let mut out = [0u8; 4];
        out.copy_from_slice(&frame[offset..offset + 4]);
        out
    }

    fn checker_texture() -> Texture {
        // 2x2: red, green / blue, transparent
        let rgba = vec![
            255, 0, 0, 255, 0, 255, 0, 255, //
            0, 0, 255, 255, 9, 9, 9, 0,
        ];
        Texture::from_rgba("checker", 2, 2, rgba).expect("texture")
    }

    #[test]
    fn fill_rect_is_clipped_to_frame() {
        let mut frame = vec![0u8; 4 * 4 * 4];
        let mut canvas = FrameCanvas::new(&mut frame, 4, 4);
        canvas.clear(CLEAR);
        canvas.fill_rect(Rect::new(-2, 2, 4, 10), RED);

        assert_eq!(pixel_at(&frame, 4, 0, 3), RED);
        assert_eq!(pixel_at(&frame, 4, 1, 2), RED);
        assert_eq!(pixel_at(&frame, 4, 2, 2), CLEAR);
        assert_eq!(pixel_at(&frame, 4, 0, 1), CLEAR);
    }

    #[test]
    fn blit_scales_source_rect_to_destination() {
        let texture = checker_texture();
        let mut frame = vec![0u8; 4 * 4 * 4];
        let mut canvas = FrameCanvas::new(&mut frame, 4, 4);
        canvas.clear(CLEAR);
        canvas.blit(&texture, Rect::new(0, 0, 2, 2), Rect::new(0, 0, 4, 4));

        assert_eq!(pixel_at(&frame, 4, 1, 1), RED);
        assert_eq!(pixel_at(&frame, 4, 2, 0), [0, 255, 0, 255]);
        assert_eq!(pixel_at(&frame, 4, 0, 3), [0, 0, 255, 255]);
        // keyed-out pixel leaves the background untouched
        assert_eq!(pixel_at(&frame, 4, 3, 3), CLEAR);
    }

    #[test]
    fn blit_samples_only_the_source_subrect() {
        let texture = checker_texture();
        let mut frame = vec![0u8; 2 * 2 * 4];
        let mut canvas = FrameCanvas::new(&mut frame, 2, 2);
        canvas.clear(CLEAR);
        canvas.blit(&texture, Rect::new(1, 0, 1, 1), Rect::new(0, 0, 2, 2));

        for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            assert_eq!(pixel_at(&frame, 2, x, y), [0, 255, 0, 255]);
        }
    }

    #[test]
    fn blit_partially_offscreen_keeps_source_alignment() {
        let texture = checker_texture();
        let mut frame = vec![0u8; 2 * 2 * 4];
        let mut canvas = FrameCanvas::new(&mut frame, 2, 2);
        canvas.clear(CLEAR);
        canvas.blit(&texture, Rect::new(0, 0, 2, 2), Rect::new(-1, 0, 2, 2));

        assert_eq!(pixel_at(&frame, 2, 0, 0), [0, 255, 0, 255]);
        assert_eq!(pixel_at(&frame, 2, 1, 0), CLEAR);
    }

    #[test]
    fn source_rect_outside_texture_draws_nothing() {
        let texture = checker_texture();
        let mut frame = vec![0u8; 2 * 2 * 4];
        let mut canvas = FrameCanvas::new(&mut frame, 2, 2);
        canvas.clear(CLEAR);
        canvas.blit(&texture, Rect::new(60, 0, 60, 129), Rect::new(0, 0, 2, 2));

        assert!(frame.chunks_exact(4).all(|pixel| pixel == CLEAR));
    }

    #[test]
    fn partial_alpha_blends_over_background() {
        let mut frame = vec![0u8; 4];
        let mut canvas = FrameCanvas::new(&mut frame, 1, 1);
        canvas.clear([0, 0, 0, 255]);
        canvas.fill_rect(Rect::new(0, 0, 1, 1), [255, 255, 255, 51]);

        assert_eq!(pixel_at(&frame, 1, 0, 0), [51, 51, 51, 255]);
    }

    #[test]
    fn undersized_frame_buffer_is_never_indexed_past_its_end() {
        let mut frame = vec![0u8; 4];
        let mut canvas = FrameCanvas::new(&mut frame, 4, 4);
        canvas.fill_rect(Rect::new(0, 0, 4, 4), RED);
        assert_eq!(frame, RED.to_vec());
    }
}
