use crate::app::Rect;

use super::Texture;

/// Inclusive per-channel RGB range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RgbRange {
    pub min: [u8; 3],
    pub max: [u8; 3],
}

impl RgbRange {
    pub fn contains(&self, pixel: [u8; 4]) -> bool {
        (0..3).all(|channel| pixel[channel] >= self.min[channel] && pixel[channel] <= self.max[channel])
    }
}

/// Bounding box of every pixel inside `region` whose color falls outside
/// `background`. The region is clipped to the texture first.
pub fn find_content_bounds(texture: &Texture, region: Rect, background: RgbRange) -> Option<Rect> {
    let x_start = region.x.max(0) as u32;
    let y_start = region.y.max(0) as u32;
    let x_end = (region.right().max(0) as u32).min(texture.width());
    let y_end = (region.bottom().max(0) as u32).min(texture.height());

    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for y in y_start..y_end {
        for x in x_start..x_end {
            let Some(pixel) = texture.pixel(x, y) else {
                continue;
            };
            if background.contains(pixel) {
                continue;
            }
            bounds = Some(match bounds {
                None => (x, y, x, y),
                Some((left, top, right, bottom)) => {
                    (left.min(x), top.min(y), right.max(x), bottom.max(y))
                }
            });
        }
    }

    bounds.map(|(left, top, right, bottom)| {
        Rect::new(
            left as i32,
            top as i32,
            right - left + 1,
            bottom - top + 1,
        )
    })
}
